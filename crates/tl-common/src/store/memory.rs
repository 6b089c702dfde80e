use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use super::{MarketplaceStore, StoreError, skill_ids};
use crate::{Candidate, Job, Skill, SkillLevel};

#[derive(Debug, Default)]
struct Tables {
    skills: Vec<Skill>,
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
}

/// Process-local store with sequential ids, for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given catalog entries.
    pub fn with_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let store = Self::new();
        {
            let mut tables = store.write();
            for skill in skills {
                insert_skill_locked(&mut tables, skill);
            }
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn insert_skill_locked(tables: &mut Tables, mut skill: Skill) -> Skill {
    if let Some(existing) = tables.skills.iter().find(|s| s.key() == skill.key()) {
        return existing.clone();
    }
    skill.id = Some(tables.skills.len() as i64 + 1);
    tables.skills.push(skill.clone());
    skill
}

/// Replaces each skill with the stored catalog row carrying the same id.
fn resolve_stored_skills(tables: &Tables, skills: &[Skill]) -> Result<Vec<Skill>, StoreError> {
    let ids = skill_ids(skills)?;
    ids.iter()
        .zip(skills)
        .map(|(id, skill)| {
            tables
                .skills
                .iter()
                .find(|stored| stored.id == Some(*id))
                .cloned()
                .ok_or_else(|| StoreError::UnknownSkill(skill.to_string()))
        })
        .collect()
}

impl MarketplaceStore for InMemoryStore {
    async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        Ok(self.read().skills.clone())
    }

    async fn find_skill(
        &self,
        group: &str,
        level: SkillLevel,
    ) -> Result<Option<Skill>, StoreError> {
        Ok(self
            .read()
            .skills
            .iter()
            .find(|s| s.key() == (group, level))
            .cloned())
    }

    async fn insert_skill(&self, skill: Skill) -> Result<Skill, StoreError> {
        Ok(insert_skill_locked(&mut self.write(), skill))
    }

    async fn insert_job(&self, mut job: Job) -> Result<Job, StoreError> {
        let mut tables = self.write();
        job.skills = resolve_stored_skills(&tables, &job.skills)?;
        job.id = Some(tables.jobs.len() as i64 + 1);
        job.created_at = Some(Utc::now());
        tables.jobs.push(job.clone());
        debug!(job_id = job.id, skills = job.skills.len(), "job_stored");
        Ok(job)
    }

    async fn insert_candidate(&self, mut candidate: Candidate) -> Result<Candidate, StoreError> {
        let mut tables = self.write();
        if tables
            .candidates
            .iter()
            .any(|c| c.username == candidate.username)
        {
            return Err(StoreError::Duplicate(format!(
                "candidate username {}",
                candidate.username
            )));
        }
        candidate.skills = resolve_stored_skills(&tables, &candidate.skills)?;
        candidate.id = Some(tables.candidates.len() as i64 + 1);
        candidate.created_at = Some(Utc::now());
        tables.candidates.push(candidate.clone());
        debug!(
            candidate_id = candidate.id,
            skills = candidate.skills.len(),
            "candidate_stored"
        );
        Ok(candidate)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.read().jobs.clone())
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.read().candidates.clone())
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, StoreError> {
        Ok(self.read().jobs.iter().find(|j| j.id == Some(id)).cloned())
    }

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, StoreError> {
        Ok(self
            .read()
            .candidates
            .iter()
            .find(|c| c.id == Some(id))
            .cloned())
    }
}
