use serde::{Deserialize, Serialize};

/// Years of experience as delivered by the store or intake layer.
///
/// Anything that is not a non-negative whole number stays representable so
/// the scorer can apply its penalty branch instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Experience {
    Years(u32),
    /// Value that arrived unparsed (e.g. free text from an import).
    Raw(String),
    #[default]
    Missing,
}

impl Experience {
    /// Valid year count, or `None` when missing or non-numeric.
    pub fn years(&self) -> Option<u32> {
        match self {
            Experience::Years(years) => Some(*years),
            Experience::Raw(raw) => raw.trim().parse().ok(),
            Experience::Missing => None,
        }
    }
}

impl From<u32> for Experience {
    fn from(years: u32) -> Self {
        Experience::Years(years)
    }
}

impl From<Option<i32>> for Experience {
    fn from(value: Option<i32>) -> Self {
        match value {
            Some(years) => u32::try_from(years)
                .map(Experience::Years)
                .unwrap_or_else(|_| Experience::Raw(years.to_string())),
            None => Experience::Missing,
        }
    }
}
