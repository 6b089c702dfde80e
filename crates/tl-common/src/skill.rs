use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Proficiency level. Declaration order is the ordinal order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// 1-based ordinal (BEGINNER = 1 .. EXPERT = 4).
    pub fn rank(&self) -> u8 {
        match self {
            SkillLevel::Beginner => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Advanced => 3,
            SkillLevel::Expert => 4,
        }
    }
}

/// Catalog entry. Matching identity is `(skill_group, skill_level)`;
/// `skill_type` is descriptive only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub id: Option<i64>,
    pub skill_type: Option<String>,
    pub skill_group: String,
    pub skill_level: SkillLevel,
}

impl Skill {
    pub fn new(skill_group: impl Into<String>, skill_level: SkillLevel) -> Self {
        Self {
            skill_group: skill_group.into(),
            skill_level,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, skill_type: impl Into<String>) -> Self {
        self.skill_type = Some(skill_type.into());
        self
    }

    pub fn key(&self) -> (&str, SkillLevel) {
        (self.skill_group.as_str(), self.skill_level)
    }
}

/// Renders the portal label, e.g. `Python (ADVANCED)`.
impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.skill_group, self.skill_level.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(SkillLevel::Beginner < SkillLevel::Intermediate);
        assert!(SkillLevel::Advanced < SkillLevel::Expert);
        assert_eq!(SkillLevel::Expert.rank(), 4);
    }

    #[test]
    fn skill_type_does_not_affect_key() {
        let plain = Skill::new("Python", SkillLevel::Advanced);
        let typed = Skill::new("Python", SkillLevel::Advanced).with_type("Programming");
        assert_eq!(plain.key(), typed.key());
        assert_ne!(plain, typed);
    }

    #[test]
    fn displays_portal_label() {
        let skill = Skill::new("Machine Learning", SkillLevel::Intermediate);
        assert_eq!(skill.to_string(), "Machine Learning (INTERMEDIATE)");
    }
}
