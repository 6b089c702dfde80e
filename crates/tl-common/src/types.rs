//! Closed enums for the categorical job/candidate attributes.
//!
//! Values are parsed from and persisted by their SCREAMING_SNAKE_CASE name
//! (`ON_SITE`, `WITHIN_1_MONTH`, ...). Parsing is case-insensitive. The
//! human-readable label shown by the portal is a separate `label()`.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum LocationType {
    #[default]
    Remote,
    Hybrid,
    OnSite,
}

impl LocationType {
    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Remote => "Remote",
            LocationType::Hybrid => "Hybrid",
            LocationType::OnSite => "On-site",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CareerPreference {
    #[default]
    UpwardMobility,
    LateralMove,
    CareerChange,
}

impl CareerPreference {
    pub fn label(&self) -> &'static str {
        match self {
            CareerPreference::UpwardMobility => "Upward Mobility",
            CareerPreference::LateralMove => "Lateral Move",
            CareerPreference::CareerChange => "Career Change",
        }
    }
}

// Digits break the automatic case conversion, so the numbered variants carry
// explicit names.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Availability {
    #[default]
    #[serde(rename = "IMMEDIATE")]
    #[strum(serialize = "IMMEDIATE")]
    Immediate,
    #[serde(rename = "WITHIN_1_MONTH")]
    #[strum(serialize = "WITHIN_1_MONTH")]
    Within1Month,
    #[serde(rename = "WITHIN_3_MONTHS")]
    #[strum(serialize = "WITHIN_3_MONTHS")]
    Within3Months,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Immediate => "Immediate",
            Availability::Within1Month => "Within 1 Month",
            Availability::Within3Months => "Within 3 Months",
        }
    }
}
