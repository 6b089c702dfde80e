use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::{
    location::evaluate_location_salary,
    skills::check_skill_overlap,
    weights::{DEFAULT_SALARY_TOLERANCE, DEFAULT_WEIGHTS, Weights},
};
use crate::{Candidate, Job};

pub const EXPERIENCE_MET_POINTS: f64 = 10.0;
pub const EXPERIENCE_SHORT_POINTS: f64 = -5.0;
pub const CAREER_MATCH_POINTS: f64 = 10.0;
pub const CAREER_MISMATCH_POINTS: f64 = -10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub weights: Weights,
    pub salary_tolerance: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            salary_tolerance: DEFAULT_SALARY_TOLERANCE,
        }
    }
}

impl MatchingConfig {
    /// Defaults, with `TL_SALARY_TOLERANCE` overriding the salary tolerance
    /// when it parses as an integer.
    pub fn from_env() -> Self {
        Self {
            salary_tolerance: env_salary_tolerance().unwrap_or(DEFAULT_SALARY_TOLERANCE),
            ..Self::default()
        }
    }
}

fn env_salary_tolerance() -> Option<i64> {
    std::env::var("TL_SALARY_TOLERANCE")
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    PerfectMatch,
    Match,
    PartialMatch,
    Miss,
    /// Input could not be interpreted; the penalty branch was applied.
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Weighted contribution to the total.
    pub score: f64,
    /// Points before weighting.
    pub raw: f64,
    pub status: MatchStatus,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total: f64,
    pub skills: ScoringResult,
    pub experience: ScoringResult,
    pub career: ScoringResult,
    pub location_salary: ScoringResult,
}

/// Compatibility score of a job/candidate pair with the default config.
pub fn score(job: &Job, candidate: &Candidate) -> f64 {
    calculate_match_score(job, candidate).total
}

/// Same as [`score`] but keeps the per-factor breakdown.
pub fn calculate_match_score(job: &Job, candidate: &Candidate) -> MatchScore {
    Scorer::default().calculate_match_score(job, candidate)
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: MatchingConfig,
}

impl Scorer {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn score(&self, job: &Job, candidate: &Candidate) -> f64 {
        self.calculate_match_score(job, candidate).total
    }

    /// Sum of the four weighted sub-scores. Unbounded; no clamping.
    pub fn calculate_match_score(&self, job: &Job, candidate: &Candidate) -> MatchScore {
        let skills = self.score_skills(job, candidate);
        let experience = self.score_experience(job, candidate);
        let career = self.score_career(job, candidate);
        let location_salary = self.score_location_salary(job, candidate);

        let total = skills.score + experience.score + career.score + location_salary.score;

        MatchScore {
            total,
            skills,
            experience,
            career,
            location_salary,
        }
    }

    fn score_skills(&self, job: &Job, candidate: &Candidate) -> ScoringResult {
        let overlap = check_skill_overlap(&job.skills, &candidate.skills);
        let raw = overlap.raw_points();

        let status = if overlap.required_pairs > 0 && overlap.full_matches == overlap.required_pairs
        {
            MatchStatus::PerfectMatch
        } else if overlap.full_matches > 0 {
            MatchStatus::Match
        } else if overlap.partial_matches > 0 {
            MatchStatus::PartialMatch
        } else {
            MatchStatus::Miss
        };

        ScoringResult {
            score: raw * self.config.weights.skills,
            raw,
            status,
            details: format!(
                "full:{} partial:{} of {} required (shared groups: {})",
                overlap.full_matches,
                overlap.partial_matches,
                overlap.required_pairs,
                if overlap.shared_groups.is_empty() {
                    "none".to_string()
                } else {
                    overlap.shared_groups.join(", ")
                }
            ),
        }
    }

    fn score_experience(&self, job: &Job, candidate: &Candidate) -> ScoringResult {
        let weight = self.config.weights.experience;

        let (raw, status, details) = match (
            candidate.total_experience.years(),
            job.required_experience.years(),
        ) {
            (Some(actual), Some(required)) if actual >= required => (
                EXPERIENCE_MET_POINTS,
                MatchStatus::Match,
                format!("{actual}y >= {required}y required"),
            ),
            (Some(actual), Some(required)) => (
                EXPERIENCE_SHORT_POINTS,
                MatchStatus::Miss,
                format!("{actual}y < {required}y required"),
            ),
            _ => (
                EXPERIENCE_SHORT_POINTS,
                MatchStatus::InvalidInput,
                format!(
                    "unusable experience (candidate: {:?}, job: {:?}); penalty applied",
                    candidate.total_experience, job.required_experience
                ),
            ),
        };

        ScoringResult {
            score: raw * weight,
            raw,
            status,
            details,
        }
    }

    fn score_career(&self, job: &Job, candidate: &Candidate) -> ScoringResult {
        let matched = job.career_preference == candidate.career_preference;
        let raw = if matched {
            CAREER_MATCH_POINTS
        } else {
            CAREER_MISMATCH_POINTS
        };

        ScoringResult {
            score: raw * self.config.weights.career,
            raw,
            status: if matched {
                MatchStatus::Match
            } else {
                MatchStatus::Miss
            },
            details: format!(
                "{} vs {}",
                job.career_preference.as_ref(),
                candidate.career_preference.as_ref()
            ),
        }
    }

    fn score_location_salary(&self, job: &Job, candidate: &Candidate) -> ScoringResult {
        let evaluation = evaluate_location_salary(job, candidate, self.config.salary_tolerance);
        let raw = evaluation.raw_points();

        ScoringResult {
            score: raw * self.config.weights.location_salary,
            raw,
            status: status_from_points(raw, 20.0),
            details: evaluation.details,
        }
    }
}

fn status_from_points(raw: f64, max: f64) -> MatchStatus {
    let ratio = raw / max;
    if ratio >= 1.0 {
        MatchStatus::PerfectMatch
    } else if ratio >= 0.5 {
        MatchStatus::Match
    } else if ratio > 0.0 {
        MatchStatus::PartialMatch
    } else {
        MatchStatus::Miss
    }
}
