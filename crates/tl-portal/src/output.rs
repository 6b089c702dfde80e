use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tl_common::{
    Candidate, Job,
    catalog::{SkillCatalog, format_skills},
    matching::ScoredMatch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct MatchReport<'a, S, T> {
    subject: &'a S,
    matches: &'a [ScoredMatch<T>],
}

pub fn print_catalog(catalog: &SkillCatalog, format: OutputFormat) -> Result<()> {
    write_catalog(&mut io::stdout().lock(), catalog, format)
}

pub fn print_candidate_matches(
    job: &Job,
    matches: &[ScoredMatch<Candidate>],
    format: OutputFormat,
) -> Result<()> {
    write_candidate_matches(&mut io::stdout().lock(), job, matches, format)
}

pub fn print_job_matches(
    candidate: &Candidate,
    matches: &[ScoredMatch<Job>],
    format: OutputFormat,
) -> Result<()> {
    write_job_matches(&mut io::stdout().lock(), candidate, matches, format)
}

fn write_catalog<W: Write>(
    out: &mut W,
    catalog: &SkillCatalog,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, catalog.skills())?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for skill in catalog.skills() {
                match skill.skill_type.as_deref() {
                    Some(skill_type) => writeln!(out, "{skill} [{skill_type}]")?,
                    None => writeln!(out, "{skill}")?,
                }
            }
        }
    }
    Ok(())
}

fn write_candidate_matches<W: Write>(
    out: &mut W,
    job: &Job,
    matches: &[ScoredMatch<Candidate>],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &MatchReport { subject: job, matches })?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Top Candidate Matches for {}", job.title)?;
    if matches.is_empty() {
        writeln!(out, "(no candidates yet)")?;
    }
    for m in matches {
        let candidate = &m.entity;
        writeln!(out, "{}", candidate.username)?;
        writeln!(out, "Skills: {}", format_skills(&candidate.skills))?;
        writeln!(
            out,
            "Score: {:.1} | Salary: {}-{}$",
            m.score, candidate.expected_salary_min, candidate.expected_salary_max
        )?;
        writeln!(
            out,
            "Location: {} | Career: {}",
            candidate.preferred_location.label(),
            candidate.career_preference.label()
        )?;
        writeln!(out, "---")?;
    }
    Ok(())
}

fn write_job_matches<W: Write>(
    out: &mut W,
    candidate: &Candidate,
    matches: &[ScoredMatch<Job>],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(
            &mut *out,
            &MatchReport {
                subject: candidate,
                matches,
            },
        )?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Top Job Matches for {}", candidate.username)?;
    if matches.is_empty() {
        writeln!(out, "(no jobs yet)")?;
    }
    for m in matches {
        let job = &m.entity;
        writeln!(out, "{}", job.title)?;
        writeln!(out, "Skills: {}", format_skills(&job.skills))?;
        writeln!(
            out,
            "Score: {:.1} | Salary: {}-{}$",
            m.score, job.salary_min, job.salary_max
        )?;
        writeln!(
            out,
            "Location: {} | Availability: {}",
            job.location_type.label(),
            job.availability.label()
        )?;
        writeln!(out, "---")?;
    }
    Ok(())
}
