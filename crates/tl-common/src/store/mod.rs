#![allow(async_fn_in_trait)]

pub mod memory;

use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;

use crate::{Candidate, Job, Skill, SkillLevel};

pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("failed to map row: {0}")]
    Mapping(String),
    #[error("duplicate {0}")]
    Duplicate(String),
    #[error("skill is not stored in the catalog: {0}")]
    UnknownSkill(String),
}

/// Persistence collaborator of the matching engine.
///
/// Handles are passed explicitly to whoever needs them; the scorer and
/// ranker never see a store.
pub trait MarketplaceStore {
    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError>;

    async fn find_skill(&self, group: &str, level: SkillLevel)
    -> Result<Option<Skill>, StoreError>;

    /// Inserts a catalog entry, or returns the stored one with the same
    /// `(skill_group, skill_level)`.
    async fn insert_skill(&self, skill: Skill) -> Result<Skill, StoreError>;

    /// Stores a job and its skill associations. Every skill must carry a
    /// catalog id.
    async fn insert_job(&self, job: Job) -> Result<Job, StoreError>;

    /// Stores a candidate and its skill associations. Usernames are unique.
    async fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, StoreError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError>;

    async fn get_job(&self, id: i64) -> Result<Option<Job>, StoreError>;

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, StoreError>;
}

/// Ids of the given skills, failing on entries that never went through the catalog.
pub(crate) fn skill_ids(skills: &[Skill]) -> Result<Vec<i64>, StoreError> {
    skills
        .iter()
        .map(|skill| skill.id.ok_or_else(|| StoreError::UnknownSkill(skill.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_ids_require_catalog_ids() {
        let stored = Skill {
            id: Some(7),
            ..Skill::new("Rust", SkillLevel::Expert)
        };
        assert_eq!(skill_ids(&[stored]).unwrap(), vec![7]);

        let err = skill_ids(&[Skill::new("Rust", SkillLevel::Expert)]).unwrap_err();
        assert!(matches!(err, StoreError::UnknownSkill(label) if label == "Rust (EXPERT)"));
    }
}
