use std::collections::{BTreeSet, HashSet};

use crate::{Skill, SkillLevel};

pub const FULL_MATCH_POINTS: f64 = 10.0;
pub const PARTIAL_MATCH_POINTS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    /// Distinct `(group, level)` pairs present on both sides.
    pub full_matches: usize,
    /// Shared groups minus `full_matches`. Goes to zero or below when one
    /// side lists the same group at several levels; kept as is.
    pub partial_matches: i64,
    /// Distinct `(group, level)` pairs the job asks for.
    pub required_pairs: usize,
    pub shared_groups: Vec<String>,
}

impl SkillOverlap {
    /// Unweighted points: full x 10 + partial x 5.
    pub fn raw_points(&self) -> f64 {
        self.full_matches as f64 * FULL_MATCH_POINTS
            + self.partial_matches as f64 * PARTIAL_MATCH_POINTS
    }
}

/// Compares required and possessed skills on `(group, level)` identity.
pub fn check_skill_overlap(job_skills: &[Skill], candidate_skills: &[Skill]) -> SkillOverlap {
    let job_pairs: HashSet<(&str, SkillLevel)> = job_skills.iter().map(Skill::key).collect();
    let candidate_pairs: HashSet<(&str, SkillLevel)> =
        candidate_skills.iter().map(Skill::key).collect();

    let full_matches = job_pairs.intersection(&candidate_pairs).count();

    let job_groups: BTreeSet<&str> = job_pairs.iter().map(|(group, _)| *group).collect();
    let candidate_groups: BTreeSet<&str> =
        candidate_pairs.iter().map(|(group, _)| *group).collect();
    let shared_groups: Vec<String> = job_groups
        .intersection(&candidate_groups)
        .map(|group| group.to_string())
        .collect();

    let partial_matches = shared_groups.len() as i64 - full_matches as i64;

    SkillOverlap {
        full_matches,
        partial_matches,
        required_pairs: job_pairs.len(),
        shared_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(group: &str, level: SkillLevel) -> Skill {
        Skill::new(group, level)
    }

    #[test]
    fn exact_pair_is_a_full_match() {
        let overlap = check_skill_overlap(
            &[skill("Python", SkillLevel::Advanced)],
            &[skill("Python", SkillLevel::Advanced)],
        );
        assert_eq!(overlap.full_matches, 1);
        assert_eq!(overlap.partial_matches, 0);
        assert_eq!(overlap.raw_points(), 10.0);
    }

    #[test]
    fn same_group_different_level_is_partial() {
        let overlap = check_skill_overlap(
            &[skill("Python", SkillLevel::Expert)],
            &[skill("Python", SkillLevel::Beginner)],
        );
        assert_eq!(overlap.full_matches, 0);
        assert_eq!(overlap.partial_matches, 1);
        assert_eq!(overlap.raw_points(), 5.0);
        assert_eq!(overlap.shared_groups, vec!["Python".to_string()]);
    }

    #[test]
    fn disjoint_groups_score_nothing() {
        let overlap = check_skill_overlap(
            &[skill("Rust", SkillLevel::Advanced)],
            &[skill("Python", SkillLevel::Advanced)],
        );
        assert_eq!(overlap.raw_points(), 0.0);
        assert!(overlap.shared_groups.is_empty());
    }

    #[test]
    fn group_at_several_levels_keeps_raw_arithmetic() {
        // Two full matches in one shared group: 1 group - 2 full = -1 partial.
        let both = [
            skill("Python", SkillLevel::Advanced),
            skill("Python", SkillLevel::Expert),
        ];
        let overlap = check_skill_overlap(&both, &both);
        assert_eq!(overlap.full_matches, 2);
        assert_eq!(overlap.partial_matches, -1);
        assert_eq!(overlap.raw_points(), 15.0);
    }

    #[test]
    fn duplicate_entries_count_once() {
        let overlap = check_skill_overlap(
            &[
                skill("SQL", SkillLevel::Intermediate),
                skill("SQL", SkillLevel::Intermediate),
            ],
            &[skill("SQL", SkillLevel::Intermediate)],
        );
        assert_eq!(overlap.full_matches, 1);
        assert_eq!(overlap.required_pairs, 1);
    }

    #[test]
    fn skill_type_is_ignored() {
        let overlap = check_skill_overlap(
            &[skill("Docker", SkillLevel::Beginner).with_type("Tools")],
            &[skill("Docker", SkillLevel::Beginner).with_type("DevOps")],
        );
        assert_eq!(overlap.full_matches, 1);
    }
}
