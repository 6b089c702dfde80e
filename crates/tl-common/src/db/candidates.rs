use tokio_postgres::{Row, error::SqlState};
use tracing::{info, instrument};

use super::{
    experience_to_column,
    skills::{SkillOwner, fetch_skill_links, insert_skill_links, parse_enum},
    util::TimedClientExt,
};
use crate::{Candidate, Experience, db::PgPool, store::StoreError, store::skill_ids};

const CANDIDATE_COLUMNS: &str = "id, username, total_experience, preferred_location, \
     expected_salary_min, expected_salary_max, career_preference, created_at";

fn candidate_from_row(row: &Row) -> Result<Candidate, StoreError> {
    Ok(Candidate {
        id: Some(row.try_get("id")?),
        username: row.try_get("username")?,
        total_experience: Experience::from(row.try_get::<_, Option<i32>>("total_experience")?),
        preferred_location: parse_enum(row, "preferred_location")?,
        expected_salary_min: row.try_get("expected_salary_min")?,
        expected_salary_max: row.try_get("expected_salary_max")?,
        career_preference: parse_enum(row, "career_preference")?,
        skills: Vec::new(),
        created_at: row.try_get("created_at")?,
    })
}

/// Candidates (all, or the one with `id`) with their skill sets, oldest first.
#[instrument(skip(pool))]
pub async fn fetch_candidates(
    pool: &PgPool,
    id: Option<i64>,
) -> Result<Vec<Candidate>, StoreError> {
    let client = pool.get().await?;
    let rows = client
        .timed_query(
            &format!(
                "SELECT {CANDIDATE_COLUMNS} FROM tl.candidates \
                 WHERE $1::BIGINT IS NULL OR id = $1 \
                 ORDER BY id"
            ),
            &[&id],
            "fetch_candidates",
        )
        .await?;

    let mut candidates = rows
        .iter()
        .map(candidate_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    let ids: Vec<i64> = candidates.iter().filter_map(|c| c.id).collect();
    let mut links = fetch_skill_links(&client, SkillOwner::Candidate, &ids).await?;

    for candidate in &mut candidates {
        if let Some(skills) = candidate.id.and_then(|id| links.remove(&id)) {
            candidate.skills = skills;
        }
    }

    Ok(candidates)
}

/// Inserts the candidate row and its skill links in one transaction.
/// A taken username surfaces as [`StoreError::Duplicate`].
#[instrument(skip(pool, candidate), fields(username = %candidate.username))]
pub async fn insert_candidate(
    pool: &PgPool,
    candidate: &Candidate,
) -> Result<Candidate, StoreError> {
    let ids = skill_ids(&candidate.skills)?;

    let mut client = pool.get().await?;
    let tx = client.transaction().await?;

    let row = tx
        .timed_query_one(
            "INSERT INTO tl.candidates (
                username,
                total_experience,
                preferred_location,
                expected_salary_min,
                expected_salary_max,
                career_preference
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at",
            &[
                &candidate.username,
                &experience_to_column(&candidate.total_experience),
                &candidate.preferred_location.as_ref(),
                &candidate.expected_salary_min,
                &candidate.expected_salary_max,
                &candidate.career_preference.as_ref(),
            ],
            "insert_candidate",
        )
        .await
        .map_err(|err| {
            if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                StoreError::Duplicate(format!("candidate username {}", candidate.username))
            } else {
                StoreError::Postgres(err)
            }
        })?;

    let candidate_id: i64 = row.try_get("id")?;
    insert_skill_links(&tx, SkillOwner::Candidate, candidate_id, &ids).await?;
    tx.commit().await?;

    info!(candidate_id, skills = ids.len(), "candidate_stored");

    Ok(Candidate {
        id: Some(candidate_id),
        created_at: row.try_get("created_at")?,
        ..candidate.clone()
    })
}
