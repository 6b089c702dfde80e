//! Job posting and candidate sign-up flows.
//!
//! Drafts carry form values as entered. Intake validates them, resolves skill
//! labels against the stored catalog, persists the record and answers with
//! the best matches from the other side of the marketplace.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    Availability, Candidate, CareerPreference, Experience, Job, LocationType, Skill,
    catalog::{CatalogError, SkillCatalog},
    matching::{Ranker, ScoredMatch},
    store::{MarketplaceStore, StoreError},
};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("minimum salary cannot be greater than maximum salary ({min} > {max})")]
    SalaryRange { min: i64, max: i64 },
    #[error("salaries cannot be negative")]
    NegativeSalary,
    #[error("experience cannot be negative (got {0})")]
    NegativeExperience(i64),
    #[error("please select at least one skill")]
    NoSkills,
    #[error("{0} cannot be blank")]
    Blank(&'static str),
    #[error(transparent)]
    Skill(#[from] CatalogError),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct JobDraft {
    pub title: String,
    pub required_experience: i64,
    pub location_type: LocationType,
    pub salary_min: i64,
    pub salary_max: i64,
    pub availability: Availability,
    pub career_preference: CareerPreference,
    /// Labels such as `Python (ADVANCED)`.
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CandidateDraft {
    pub username: String,
    pub total_experience: i64,
    pub preferred_location: LocationType,
    pub expected_salary_min: i64,
    pub expected_salary_max: i64,
    pub career_preference: CareerPreference,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PostedJob {
    pub job: Job,
    pub top_candidates: Vec<ScoredMatch<Candidate>>,
}

#[derive(Debug, Clone)]
pub struct CreatedCandidate {
    pub candidate: Candidate,
    pub top_jobs: Vec<ScoredMatch<Job>>,
}

pub fn validate_salary(min: i64, max: i64) -> Result<(i64, i64), IntakeError> {
    if min < 0 || max < 0 {
        return Err(IntakeError::NegativeSalary);
    }
    if min > max {
        return Err(IntakeError::SalaryRange { min, max });
    }
    Ok((min, max))
}

pub fn validate_experience(years: i64) -> Result<Experience, IntakeError> {
    u32::try_from(years)
        .map(Experience::Years)
        .map_err(|_| IntakeError::NegativeExperience(years))
}

fn non_blank(value: &str, field: &'static str) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::Blank(field));
    }
    Ok(trimmed.to_string())
}

/// Resolves labels to catalog entries. Repeated labels collapse to one entry.
pub fn resolve_skills(
    catalog: &SkillCatalog,
    labels: &[String],
) -> Result<Vec<Skill>, IntakeError> {
    if labels.iter().all(|label| label.trim().is_empty()) {
        return Err(IntakeError::NoSkills);
    }

    let mut seen = HashSet::new();
    let mut skills = Vec::with_capacity(labels.len());
    for label in labels.iter().filter(|label| !label.trim().is_empty()) {
        let skill = catalog.resolve_label(label)?;
        if seen.insert((skill.skill_group.clone(), skill.skill_level)) {
            skills.push(skill.clone());
        }
    }

    Ok(skills)
}

impl JobDraft {
    pub fn into_job(self, catalog: &SkillCatalog) -> Result<Job, IntakeError> {
        let title = non_blank(&self.title, "job title")?;
        let required_experience = validate_experience(self.required_experience)?;
        let (salary_min, salary_max) = validate_salary(self.salary_min, self.salary_max)?;
        let skills = resolve_skills(catalog, &self.skills)?;

        Ok(Job {
            id: None,
            title,
            required_experience,
            location_type: self.location_type,
            salary_min,
            salary_max,
            availability: self.availability,
            career_preference: self.career_preference,
            skills,
            created_at: None,
        })
    }
}

impl CandidateDraft {
    pub fn into_candidate(self, catalog: &SkillCatalog) -> Result<Candidate, IntakeError> {
        let username = non_blank(&self.username, "username")?;
        let total_experience = validate_experience(self.total_experience)?;
        let (expected_salary_min, expected_salary_max) =
            validate_salary(self.expected_salary_min, self.expected_salary_max)?;
        let skills = resolve_skills(catalog, &self.skills)?;

        Ok(Candidate {
            id: None,
            username,
            total_experience,
            preferred_location: self.preferred_location,
            expected_salary_min,
            expected_salary_max,
            career_preference: self.career_preference,
            skills,
            created_at: None,
        })
    }
}

/// Loads the stored catalog.
pub async fn load_catalog<S: MarketplaceStore>(store: &S) -> Result<SkillCatalog, IntakeError> {
    Ok(SkillCatalog::new(store.list_skills().await?))
}

/// Validates and stores a job, then ranks every stored candidate against it.
#[instrument(skip(store, ranker, draft), fields(title = %draft.title))]
pub async fn post_job<S: MarketplaceStore>(
    store: &S,
    ranker: &Ranker,
    draft: JobDraft,
    top_k: usize,
) -> Result<PostedJob, IntakeError> {
    let catalog = load_catalog(store).await?;
    let job = store.insert_job(draft.into_job(&catalog)?).await?;
    let candidates = store.list_candidates().await?;

    let top_candidates = ranker
        .rank_candidates_for_job(&job, &candidates, top_k)
        .into_iter()
        .map(|ranked| ranked.into_owned())
        .collect::<Vec<_>>();

    info!(
        job_id = job.id,
        pool = candidates.len(),
        returned = top_candidates.len(),
        "job_posted"
    );

    Ok(PostedJob {
        job,
        top_candidates,
    })
}

/// Validates and stores a candidate, then ranks every stored job for them.
#[instrument(skip(store, ranker, draft), fields(username = %draft.username))]
pub async fn create_candidate<S: MarketplaceStore>(
    store: &S,
    ranker: &Ranker,
    draft: CandidateDraft,
    top_k: usize,
) -> Result<CreatedCandidate, IntakeError> {
    let catalog = load_catalog(store).await?;
    let candidate = store
        .insert_candidate(draft.into_candidate(&catalog)?)
        .await?;
    let jobs = store.list_jobs().await?;

    let top_jobs = ranker
        .rank_jobs_for_candidate(&candidate, &jobs, top_k)
        .into_iter()
        .map(|ranked| ranked.into_owned())
        .collect::<Vec<_>>();

    info!(
        candidate_id = candidate.id,
        pool = jobs.len(),
        returned = top_jobs.len(),
        "candidate_created"
    );

    Ok(CreatedCandidate {
        candidate,
        top_jobs,
    })
}

/// Best candidates for an already stored job.
#[instrument(skip(store, ranker))]
pub async fn find_matches_for_job<S: MarketplaceStore>(
    store: &S,
    ranker: &Ranker,
    job_id: i64,
    top_k: usize,
) -> Result<PostedJob, IntakeError> {
    let job = store
        .get_job(job_id)
        .await?
        .ok_or(IntakeError::NotFound {
            kind: "job",
            id: job_id,
        })?;
    let candidates = store.list_candidates().await?;

    let top_candidates = ranker
        .rank_candidates_for_job(&job, &candidates, top_k)
        .into_iter()
        .map(|ranked| ranked.into_owned())
        .collect();

    Ok(PostedJob {
        job,
        top_candidates,
    })
}

/// Best jobs for an already stored candidate.
#[instrument(skip(store, ranker))]
pub async fn find_matches_for_candidate<S: MarketplaceStore>(
    store: &S,
    ranker: &Ranker,
    candidate_id: i64,
    top_k: usize,
) -> Result<CreatedCandidate, IntakeError> {
    let candidate = store
        .get_candidate(candidate_id)
        .await?
        .ok_or(IntakeError::NotFound {
            kind: "candidate",
            id: candidate_id,
        })?;
    let jobs = store.list_jobs().await?;

    let top_jobs = ranker
        .rank_jobs_for_candidate(&candidate, &jobs, top_k)
        .into_iter()
        .map(|ranked| ranked.into_owned())
        .collect();

    Ok(CreatedCandidate {
        candidate,
        top_jobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkillLevel;

    fn catalog() -> SkillCatalog {
        SkillCatalog::new(vec![
            Skill {
                id: Some(1),
                ..Skill::new("Python", SkillLevel::Advanced)
            },
            Skill {
                id: Some(2),
                ..Skill::new("SQL", SkillLevel::Beginner)
            },
        ])
    }

    fn job_draft() -> JobDraft {
        JobDraft {
            title: "  Data Engineer ".into(),
            required_experience: 3,
            location_type: LocationType::OnSite,
            salary_min: 80_000,
            salary_max: 120_000,
            availability: Availability::Within1Month,
            career_preference: CareerPreference::UpwardMobility,
            skills: vec!["Python (ADVANCED)".into()],
        }
    }

    #[test]
    fn salary_validation() {
        assert_eq!(validate_salary(60_000, 100_000).unwrap(), (60_000, 100_000));
        assert_eq!(validate_salary(90_000, 90_000).unwrap(), (90_000, 90_000));
        assert!(matches!(
            validate_salary(120_000, 80_000),
            Err(IntakeError::SalaryRange {
                min: 120_000,
                max: 80_000
            })
        ));
        assert!(matches!(
            validate_salary(-1, 80_000),
            Err(IntakeError::NegativeSalary)
        ));
    }

    #[test]
    fn experience_validation() {
        assert_eq!(validate_experience(0).unwrap(), Experience::Years(0));
        assert!(matches!(
            validate_experience(-2),
            Err(IntakeError::NegativeExperience(-2))
        ));
    }

    #[test]
    fn job_draft_becomes_job() {
        let job = job_draft().into_job(&catalog()).unwrap();
        assert_eq!(job.title, "Data Engineer");
        assert_eq!(job.required_experience, Experience::Years(3));
        assert_eq!(job.skills.len(), 1);
        assert_eq!(job.skills[0].id, Some(1));
        assert_eq!(job.availability, Availability::Within1Month);
    }

    #[test]
    fn empty_or_unknown_skills_are_rejected() {
        let mut draft = job_draft();
        draft.skills.clear();
        assert!(matches!(
            draft.into_job(&catalog()),
            Err(IntakeError::NoSkills)
        ));

        let mut draft = job_draft();
        draft.skills = vec!["Haskell (EXPERT)".into()];
        assert!(matches!(
            draft.into_job(&catalog()),
            Err(IntakeError::Skill(CatalogError::UnknownSkill(_)))
        ));
    }

    #[test]
    fn duplicate_labels_collapse() {
        let skills = resolve_skills(
            &catalog(),
            &[
                "SQL (BEGINNER)".into(),
                "sql (beginner)".into(),
                "SQL (beginner)".into(),
            ],
        );
        // Group lookup is case-sensitive, so only the exact group resolves.
        assert!(matches!(
            skills,
            Err(IntakeError::Skill(CatalogError::UnknownSkill(_)))
        ));

        let skills =
            resolve_skills(&catalog(), &["SQL (BEGINNER)".into(), "SQL (beginner)".into()])
                .unwrap();
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn blank_username_is_rejected() {
        let draft = CandidateDraft {
            username: "   ".into(),
            total_experience: 2,
            preferred_location: LocationType::Remote,
            expected_salary_min: 50_000,
            expected_salary_max: 70_000,
            career_preference: CareerPreference::LateralMove,
            skills: vec!["SQL (BEGINNER)".into()],
        };
        assert!(matches!(
            draft.into_candidate(&catalog()),
            Err(IntakeError::Blank("username"))
        ));
    }
}
