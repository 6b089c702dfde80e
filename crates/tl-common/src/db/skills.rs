use std::{collections::HashMap, str::FromStr};

use deadpool_postgres::GenericClient;
use tokio_postgres::Row;
use tracing::instrument;

use super::util::TimedClientExt;
use crate::{Skill, SkillLevel, db::PgPool, store::StoreError};

const SKILL_COLUMNS: &str = "s.id, s.skill_type, s.skill_group, s.skill_level";

/// Parses an enum column stored by variant name.
pub(crate) fn parse_enum<E: FromStr>(row: &Row, column: &str) -> Result<E, StoreError> {
    let raw: String = row.try_get(column)?;
    raw.parse::<E>()
        .map_err(|_| StoreError::Mapping(format!("unexpected {column} value: {raw}")))
}

pub(crate) fn skill_from_row(row: &Row) -> Result<Skill, StoreError> {
    Ok(Skill {
        id: Some(row.try_get("id")?),
        skill_type: row.try_get("skill_type")?,
        skill_group: row.try_get("skill_group")?,
        skill_level: parse_enum::<SkillLevel>(row, "skill_level")?,
    })
}

#[instrument(skip(pool))]
pub async fn list_skills(pool: &PgPool) -> Result<Vec<Skill>, StoreError> {
    let client = pool.get().await?;
    let rows = client
        .timed_query(
            &format!("SELECT {SKILL_COLUMNS} FROM tl.skills s ORDER BY s.id"),
            &[],
            "list_skills",
        )
        .await?;

    rows.iter().map(skill_from_row).collect()
}

#[instrument(skip(pool))]
pub async fn find_skill(
    pool: &PgPool,
    group: &str,
    level: SkillLevel,
) -> Result<Option<Skill>, StoreError> {
    let client = pool.get().await?;
    let rows = client
        .timed_query(
            &format!(
                "SELECT {SKILL_COLUMNS} FROM tl.skills s \
                 WHERE s.skill_group = $1 AND s.skill_level = $2"
            ),
            &[&group, &level.as_ref()],
            "find_skill",
        )
        .await?;

    rows.first().map(skill_from_row).transpose()
}

/// Upserts a catalog entry. An existing `(group, level)` row wins, including
/// its `skill_type` unless that was NULL.
#[instrument(skip(pool, skill), fields(skill = %skill))]
pub async fn insert_skill(pool: &PgPool, skill: &Skill) -> Result<Skill, StoreError> {
    let client = pool.get().await?;
    let row = client
        .timed_query_one(
            "INSERT INTO tl.skills AS s (skill_type, skill_group, skill_level)
             VALUES ($1, $2, $3)
             ON CONFLICT (skill_group, skill_level)
             DO UPDATE SET skill_type = COALESCE(s.skill_type, EXCLUDED.skill_type)
             RETURNING s.id, s.skill_type, s.skill_group, s.skill_level",
            &[
                &skill.skill_type,
                &skill.skill_group,
                &skill.skill_level.as_ref(),
            ],
            "insert_skill",
        )
        .await?;

    skill_from_row(&row)
}

/// Which side of the marketplace a junction table belongs to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SkillOwner {
    Job,
    Candidate,
}

impl SkillOwner {
    fn table(self) -> &'static str {
        match self {
            SkillOwner::Job => "tl.job_skills",
            SkillOwner::Candidate => "tl.candidate_skills",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            SkillOwner::Job => "job_id",
            SkillOwner::Candidate => "candidate_id",
        }
    }
}

/// Loads the skill sets of the given owners, keyed by owner id.
pub(crate) async fn fetch_skill_links<C: GenericClient>(
    client: &C,
    owner: SkillOwner,
    owner_ids: &[i64],
) -> Result<HashMap<i64, Vec<Skill>>, StoreError> {
    let mut links: HashMap<i64, Vec<Skill>> = HashMap::new();
    if owner_ids.is_empty() {
        return Ok(links);
    }

    let query = format!(
        "SELECT l.{owner_col} AS owner_id, {SKILL_COLUMNS} \
         FROM {table} l \
         JOIN tl.skills s ON s.id = l.skill_id \
         WHERE l.{owner_col} = ANY($1) \
         ORDER BY l.{owner_col}, s.id",
        owner_col = owner.owner_column(),
        table = owner.table(),
    );

    let ids = owner_ids.to_vec();
    let rows = client
        .timed_query(&query, &[&ids], "fetch_skill_links")
        .await?;

    for row in &rows {
        let owner_id: i64 = row.try_get("owner_id")?;
        links.entry(owner_id).or_default().push(skill_from_row(row)?);
    }

    Ok(links)
}

/// Inserts junction rows for a freshly stored owner.
pub(crate) async fn insert_skill_links<C: GenericClient>(
    client: &C,
    owner: SkillOwner,
    owner_id: i64,
    skill_ids: &[i64],
) -> Result<(), StoreError> {
    let query = format!(
        "INSERT INTO {table} ({owner_col}, skill_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        table = owner.table(),
        owner_col = owner.owner_column(),
    );

    for skill_id in skill_ids {
        client
            .timed_execute(&query, &[&owner_id, skill_id], "insert_skill_link")
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pooled_clients_and_transactions_load_links() {
        fn accepts<C: GenericClient>() {}
        accepts::<deadpool_postgres::Client>();
        accepts::<deadpool_postgres::Transaction<'static>>();
    }

    #[test]
    fn owners_map_to_their_junction_tables() {
        assert_eq!(SkillOwner::Job.table(), "tl.job_skills");
        assert_eq!(SkillOwner::Job.owner_column(), "job_id");
        assert_eq!(SkillOwner::Candidate.table(), "tl.candidate_skills");
        assert_eq!(SkillOwner::Candidate.owner_column(), "candidate_id");
    }
}
