//! Global skill catalog.
//!
//! Jobs and candidates reference catalog entries by `(skill_group,
//! skill_level)`. The portal addresses entries with labels of the form
//! `Python (ADVANCED)`; this module parses those labels and resolves them.

use std::collections::HashMap;

use strum::IntoEnumIterator;
use thiserror::Error;

use crate::{Skill, SkillLevel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("malformed skill label: {0:?} (expected \"<group> (<LEVEL>)\")")]
    MalformedLabel(String),
    #[error("unknown skill level {level:?} in label {label:?}")]
    UnknownLevel { label: String, level: String },
    #[error("invalid skill: {0}")]
    UnknownSkill(String),
}

/// Splits `Python (ADVANCED)` into its group and level.
pub fn parse_skill_label(label: &str) -> Result<(String, SkillLevel), CatalogError> {
    let malformed = || CatalogError::MalformedLabel(label.to_string());

    let (group, rest) = label.trim().rsplit_once(" (").ok_or_else(malformed)?;
    let level_text = rest.strip_suffix(')').ok_or_else(malformed)?;
    let group = group.trim();
    if group.is_empty() {
        return Err(malformed());
    }

    let level = level_text
        .trim()
        .parse::<SkillLevel>()
        .map_err(|_| CatalogError::UnknownLevel {
            label: label.to_string(),
            level: level_text.to_string(),
        })?;

    Ok((group.to_string(), level))
}

/// Comma separated portal labels, in the given order.
pub fn format_skills(skills: &[Skill]) -> String {
    skills
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    index: HashMap<(String, SkillLevel), usize>,
}

impl SkillCatalog {
    /// Builds the lookup index. Later duplicates of a key are ignored.
    pub fn new(skills: Vec<Skill>) -> Self {
        let mut kept = Vec::with_capacity(skills.len());
        let mut index = HashMap::with_capacity(skills.len());

        for skill in skills {
            let key = (skill.skill_group.clone(), skill.skill_level);
            if index.contains_key(&key) {
                continue;
            }
            index.insert(key, kept.len());
            kept.push(skill);
        }

        Self {
            skills: kept,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn lookup(&self, skill_group: &str, skill_level: SkillLevel) -> Option<&Skill> {
        self.index
            .get(&(skill_group.to_string(), skill_level))
            .map(|&idx| &self.skills[idx])
    }

    pub fn resolve_label(&self, label: &str) -> Result<&Skill, CatalogError> {
        let (group, level) = parse_skill_label(label)?;
        self.lookup(&group, level)
            .ok_or_else(|| CatalogError::UnknownSkill(label.trim().to_string()))
    }

    /// Portal labels for every entry, in catalog order.
    pub fn labels(&self) -> Vec<String> {
        self.skills.iter().map(ToString::to_string).collect()
    }
}

const SEED_GROUPS: &[(&str, &[&str])] = &[
    ("Programming", &["Python", "Rust", "JavaScript", "Java", "SQL"]),
    ("Data", &["Machine Learning", "Data Analysis"]),
    ("Tools", &["Docker", "Kubernetes", "Git"]),
];

/// Bootstrap catalog: every seed group at every level.
pub fn default_seed() -> Vec<Skill> {
    SEED_GROUPS
        .iter()
        .flat_map(|(skill_type, groups)| {
            groups.iter().flat_map(move |group| {
                SkillLevel::iter()
                    .map(move |level| Skill::new(*group, level).with_type(*skill_type))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_portal_labels() {
        assert_eq!(
            parse_skill_label("Python (ADVANCED)").unwrap(),
            ("Python".to_string(), SkillLevel::Advanced)
        );
        assert_eq!(
            parse_skill_label("Machine Learning (expert)").unwrap(),
            ("Machine Learning".to_string(), SkillLevel::Expert)
        );
    }

    #[test]
    fn group_may_contain_parentheses() {
        assert_eq!(
            parse_skill_label("C (lang) (BEGINNER)").unwrap(),
            ("C (lang)".to_string(), SkillLevel::Beginner)
        );
    }

    #[test]
    fn rejects_malformed_labels() {
        assert!(matches!(
            parse_skill_label("Python"),
            Err(CatalogError::MalformedLabel(_))
        ));
        assert!(matches!(
            parse_skill_label("Python (ADVANCED"),
            Err(CatalogError::MalformedLabel(_))
        ));
        assert!(matches!(
            parse_skill_label(" (EXPERT)"),
            Err(CatalogError::MalformedLabel(_))
        ));
        assert!(matches!(
            parse_skill_label("Python (GURU)"),
            Err(CatalogError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn resolves_known_labels_only() {
        let catalog = SkillCatalog::new(vec![
            Skill::new("Python", SkillLevel::Advanced),
            Skill::new("Rust", SkillLevel::Beginner),
        ]);

        let skill = catalog.resolve_label("Python (ADVANCED)").unwrap();
        assert_eq!(skill.key(), ("Python", SkillLevel::Advanced));

        assert_eq!(
            catalog.resolve_label("Python (EXPERT)"),
            Err(CatalogError::UnknownSkill("Python (EXPERT)".into()))
        );
    }

    #[test]
    fn labels_round_trip_through_resolve() {
        let catalog = SkillCatalog::new(default_seed());
        for label in catalog.labels() {
            let skill = catalog.resolve_label(&label).unwrap();
            assert_eq!(skill.to_string(), label);
        }
    }

    #[test]
    fn duplicate_keys_keep_first_entry() {
        let catalog = SkillCatalog::new(vec![
            Skill::new("Git", SkillLevel::Expert).with_type("Tools"),
            Skill::new("Git", SkillLevel::Expert).with_type("VCS"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog
                .lookup("Git", SkillLevel::Expert)
                .and_then(|s| s.skill_type.as_deref()),
            Some("Tools")
        );
    }

    #[test]
    fn seed_covers_every_level() {
        let seed = default_seed();
        assert_eq!(seed.len(), 10 * 4);
        assert!(
            seed.iter()
                .any(|s| s.key() == ("Kubernetes", SkillLevel::Beginner))
        );
    }

    #[test]
    fn formats_skill_lists() {
        let skills = vec![
            Skill::new("Python", SkillLevel::Advanced),
            Skill::new("SQL", SkillLevel::Beginner),
        ];
        assert_eq!(format_skills(&skills), "Python (ADVANCED), SQL (BEGINNER)");
    }
}
