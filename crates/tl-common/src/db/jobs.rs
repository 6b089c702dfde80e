use tokio_postgres::Row;
use tracing::{info, instrument};

use super::{
    experience_to_column,
    skills::{SkillOwner, fetch_skill_links, insert_skill_links, parse_enum},
    util::TimedClientExt,
};
use crate::{Experience, Job, db::PgPool, store::StoreError, store::skill_ids};

const JOB_COLUMNS: &str = "id, title, required_experience, location_type, salary_min, \
     salary_max, availability, career_preference, created_at";

fn job_from_row(row: &Row) -> Result<Job, StoreError> {
    Ok(Job {
        id: Some(row.try_get("id")?),
        title: row.try_get("title")?,
        required_experience: Experience::from(
            row.try_get::<_, Option<i32>>("required_experience")?,
        ),
        location_type: parse_enum(row, "location_type")?,
        salary_min: row.try_get("salary_min")?,
        salary_max: row.try_get("salary_max")?,
        availability: parse_enum(row, "availability")?,
        career_preference: parse_enum(row, "career_preference")?,
        skills: Vec::new(),
        created_at: row.try_get("created_at")?,
    })
}

/// Jobs (all, or the one with `id`) with their skill sets, oldest first.
#[instrument(skip(pool))]
pub async fn fetch_jobs(pool: &PgPool, id: Option<i64>) -> Result<Vec<Job>, StoreError> {
    let client = pool.get().await?;
    let rows = client
        .timed_query(
            &format!(
                "SELECT {JOB_COLUMNS} FROM tl.jobs \
                 WHERE $1::BIGINT IS NULL OR id = $1 \
                 ORDER BY id"
            ),
            &[&id],
            "fetch_jobs",
        )
        .await?;

    let mut jobs = rows.iter().map(job_from_row).collect::<Result<Vec<_>, _>>()?;
    let ids: Vec<i64> = jobs.iter().filter_map(|job| job.id).collect();
    let mut links = fetch_skill_links(&client, SkillOwner::Job, &ids).await?;

    for job in &mut jobs {
        if let Some(skills) = job.id.and_then(|id| links.remove(&id)) {
            job.skills = skills;
        }
    }

    Ok(jobs)
}

/// Inserts the job row and its skill links in one transaction.
#[instrument(skip(pool, job), fields(title = %job.title))]
pub async fn insert_job(pool: &PgPool, job: &Job) -> Result<Job, StoreError> {
    let ids = skill_ids(&job.skills)?;

    let mut client = pool.get().await?;
    let tx = client.transaction().await?;

    let row = tx
        .timed_query_one(
            "INSERT INTO tl.jobs (
                title,
                required_experience,
                location_type,
                salary_min,
                salary_max,
                availability,
                career_preference
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at",
            &[
                &job.title,
                &experience_to_column(&job.required_experience),
                &job.location_type.as_ref(),
                &job.salary_min,
                &job.salary_max,
                &job.availability.as_ref(),
                &job.career_preference.as_ref(),
            ],
            "insert_job",
        )
        .await?;

    let job_id: i64 = row.try_get("id")?;
    insert_skill_links(&tx, SkillOwner::Job, job_id, &ids).await?;
    tx.commit().await?;

    info!(job_id, skills = ids.len(), "job_stored");

    Ok(Job {
        id: Some(job_id),
        created_at: row.try_get("created_at")?,
        ..job.clone()
    })
}
