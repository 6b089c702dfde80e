//! DDL for the marketplace tables.
//!
//! Enum columns hold the variant name (`ON_SITE`, `EXPERT`, ...) and are
//! guarded by CHECK constraints so rows always parse back into the closed
//! Rust enums.

pub const SCHEMA_DDL: &str = "CREATE SCHEMA IF NOT EXISTS tl;";

/// Global skill catalog. `(skill_group, skill_level)` is the matching identity.
pub const SKILLS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS tl.skills (
    id BIGSERIAL PRIMARY KEY,
    skill_type VARCHAR(50),
    skill_group VARCHAR(50) NOT NULL,
    skill_level VARCHAR(20) NOT NULL,

    CONSTRAINT uq_skills_group_level UNIQUE (skill_group, skill_level),
    CONSTRAINT chk_skill_level CHECK (skill_level IN ('BEGINNER', 'INTERMEDIATE', 'ADVANCED', 'EXPERT'))
);
"#;

pub const JOBS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS tl.jobs (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    required_experience INTEGER,
    location_type VARCHAR(20) NOT NULL,
    salary_min BIGINT NOT NULL,
    salary_max BIGINT NOT NULL,
    availability VARCHAR(20) NOT NULL,
    career_preference VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_job_location CHECK (location_type IN ('REMOTE', 'HYBRID', 'ON_SITE')),
    CONSTRAINT chk_job_availability CHECK (availability IN ('IMMEDIATE', 'WITHIN_1_MONTH', 'WITHIN_3_MONTHS')),
    CONSTRAINT chk_job_career CHECK (career_preference IN ('UPWARD_MOBILITY', 'LATERAL_MOVE', 'CAREER_CHANGE')),
    CONSTRAINT chk_job_salary CHECK (salary_min <= salary_max),
    CONSTRAINT chk_job_experience CHECK (required_experience IS NULL OR required_experience >= 0)
);
"#;

pub const CANDIDATES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS tl.candidates (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    total_experience INTEGER,
    preferred_location VARCHAR(20) NOT NULL,
    expected_salary_min BIGINT NOT NULL,
    expected_salary_max BIGINT NOT NULL,
    career_preference VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_candidate_location CHECK (preferred_location IN ('REMOTE', 'HYBRID', 'ON_SITE')),
    CONSTRAINT chk_candidate_career CHECK (career_preference IN ('UPWARD_MOBILITY', 'LATERAL_MOVE', 'CAREER_CHANGE')),
    CONSTRAINT chk_candidate_salary CHECK (expected_salary_min <= expected_salary_max),
    CONSTRAINT chk_candidate_experience CHECK (total_experience IS NULL OR total_experience >= 0)
);
"#;

/// Junction tables; skills are referenced, never owned.
pub const SKILL_LINKS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS tl.job_skills (
    job_id BIGINT NOT NULL REFERENCES tl.jobs(id) ON DELETE CASCADE,
    skill_id BIGINT NOT NULL REFERENCES tl.skills(id),
    PRIMARY KEY (job_id, skill_id)
);

CREATE TABLE IF NOT EXISTS tl.candidate_skills (
    candidate_id BIGINT NOT NULL REFERENCES tl.candidates(id) ON DELETE CASCADE,
    skill_id BIGINT NOT NULL REFERENCES tl.skills(id),
    PRIMARY KEY (candidate_id, skill_id)
);
"#;

pub const SKILL_LINK_INDEXES_DDL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_job_skills_skill ON tl.job_skills(skill_id);
CREATE INDEX IF NOT EXISTS idx_candidate_skills_skill ON tl.candidate_skills(skill_id);
CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON tl.jobs(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_candidates_created_at ON tl.candidates(created_at DESC);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Availability, CareerPreference, LocationType, SkillLevel};
    use strum::IntoEnumIterator;

    #[test]
    fn check_constraints_list_every_enum_name() {
        for level in SkillLevel::iter() {
            assert!(SKILLS_DDL.contains(&format!("'{}'", level.as_ref())));
        }
        for location in LocationType::iter() {
            assert!(JOBS_DDL.contains(&format!("'{}'", location.as_ref())));
            assert!(CANDIDATES_DDL.contains(&format!("'{}'", location.as_ref())));
        }
        for availability in Availability::iter() {
            assert!(JOBS_DDL.contains(&format!("'{}'", availability.as_ref())));
        }
        for career in CareerPreference::iter() {
            assert!(JOBS_DDL.contains(&format!("'{}'", career.as_ref())));
            assert!(CANDIDATES_DDL.contains(&format!("'{}'", career.as_ref())));
        }
    }
}
