use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use tl_common::{
    Availability, CareerPreference, LocationType,
    catalog::{SkillCatalog, default_seed},
    db::{PgStore, run_migrations},
    intake::{self, CandidateDraft, JobDraft},
    logging::{init_tracing_subscriber, install_tracing_panic_hook},
    matching::{DEFAULT_TOP_K, MatchingConfig, Ranker},
    store::{InMemoryStore, MarketplaceStore},
};
use tracing::info;

mod output;

use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "tl-portal",
    about = "Post jobs, create candidate profiles and find matches"
)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Use a throwaway in-memory store seeded with the default skill catalog
    #[arg(long, global = true)]
    in_memory: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or upgrade the database schema
    Migrate,
    /// Insert the default skill catalog (existing entries are kept)
    SeedSkills,
    /// List the skill catalog
    Skills,
    /// Post a new job and show the best candidate matches
    PostJob(PostJobArgs),
    /// Create a candidate profile and show the best job matches
    CreateCandidate(CreateCandidateArgs),
    /// Show matches for an existing job or candidate
    #[command(subcommand)]
    Matches(MatchesCommand),
}

#[derive(Debug, Args)]
struct PostJobArgs {
    #[arg(long)]
    title: String,
    /// Required experience in years
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    required_experience: i64,
    /// REMOTE | HYBRID | ON_SITE
    #[arg(long)]
    location: LocationType,
    #[arg(long, default_value_t = 80_000, allow_negative_numbers = true)]
    salary_min: i64,
    #[arg(long, default_value_t = 120_000, allow_negative_numbers = true)]
    salary_max: i64,
    /// IMMEDIATE | WITHIN_1_MONTH | WITHIN_3_MONTHS
    #[arg(long)]
    availability: Availability,
    /// UPWARD_MOBILITY | LATERAL_MOVE | CAREER_CHANGE
    #[arg(long)]
    career_preference: CareerPreference,
    /// Required skill label, e.g. "Python (ADVANCED)"; repeatable
    #[arg(long = "skill", required = true)]
    skills: Vec<String>,
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
}

#[derive(Debug, Args)]
struct CreateCandidateArgs {
    /// Anonymous username
    #[arg(long)]
    username: String,
    /// Total experience in years
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    total_experience: i64,
    /// REMOTE | HYBRID | ON_SITE
    #[arg(long)]
    preferred_location: LocationType,
    #[arg(long, default_value_t = 60_000, allow_negative_numbers = true)]
    salary_min: i64,
    #[arg(long, default_value_t = 100_000, allow_negative_numbers = true)]
    salary_max: i64,
    /// UPWARD_MOBILITY | LATERAL_MOVE | CAREER_CHANGE
    #[arg(long)]
    career_preference: CareerPreference,
    /// Possessed skill label, e.g. "Rust (EXPERT)"; repeatable
    #[arg(long = "skill", required = true)]
    skills: Vec<String>,
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
}

#[derive(Debug, Subcommand)]
enum MatchesCommand {
    /// Best candidates for a stored job
    Job {
        id: i64,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Best jobs for a stored candidate
    Candidate {
        id: i64,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

impl From<PostJobArgs> for JobDraft {
    fn from(args: PostJobArgs) -> Self {
        JobDraft {
            title: args.title,
            required_experience: args.required_experience,
            location_type: args.location,
            salary_min: args.salary_min,
            salary_max: args.salary_max,
            availability: args.availability,
            career_preference: args.career_preference,
            skills: args.skills,
        }
    }
}

impl From<CreateCandidateArgs> for CandidateDraft {
    fn from(args: CreateCandidateArgs) -> Self {
        CandidateDraft {
            username: args.username,
            total_experience: args.total_experience,
            preferred_location: args.preferred_location,
            expected_salary_min: args.salary_min,
            expected_salary_max: args.salary_max,
            career_preference: args.career_preference,
            skills: args.skills,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing_subscriber("tl-portal");
    install_tracing_panic_hook("tl-portal");

    let cli = Cli::parse();
    let format = OutputFormat::from(cli.format);
    let ranker = Ranker::new(MatchingConfig::from_env());

    if cli.in_memory {
        let store = InMemoryStore::with_skills(default_seed());
        return run(&store, &ranker, cli.command, format).await;
    }

    let Some(database_url) = cli.database_url.as_deref() else {
        bail!("DATABASE_URL (or --database-url) is required unless --in-memory is set");
    };
    let store = PgStore::from_url(database_url).context("failed to build database pool")?;

    if matches!(cli.command, Command::Migrate) {
        let applied = run_migrations(store.pool())
            .await
            .context("failed to run migrations")?;
        info!(applied, "migrations complete");
        println!("applied {applied} migration(s)");
        return Ok(());
    }

    run(&store, &ranker, cli.command, format).await
}

async fn run<S: MarketplaceStore>(
    store: &S,
    ranker: &Ranker,
    command: Command,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Command::Migrate => bail!("migrate needs a PostgreSQL database; drop --in-memory"),
        Command::SeedSkills => {
            let mut submitted = 0usize;
            for skill in default_seed() {
                store.insert_skill(skill).await?;
                submitted += 1;
            }
            info!(submitted, "skill catalog seeded");
            let catalog = SkillCatalog::new(store.list_skills().await?);
            println!("catalog holds {} skill(s)", catalog.len());
        }
        Command::Skills => {
            let catalog = intake::load_catalog(store).await?;
            output::print_catalog(&catalog, format)?;
        }
        Command::PostJob(args) => {
            let top_k = args.top_k;
            let posted = intake::post_job(store, ranker, args.into(), top_k).await?;
            println!("Job posted successfully!");
            output::print_candidate_matches(&posted.job, &posted.top_candidates, format)?;
        }
        Command::CreateCandidate(args) => {
            let top_k = args.top_k;
            let created = intake::create_candidate(store, ranker, args.into(), top_k).await?;
            println!("Profile created successfully!");
            output::print_job_matches(&created.candidate, &created.top_jobs, format)?;
        }
        Command::Matches(MatchesCommand::Job { id, top_k }) => {
            let found = intake::find_matches_for_job(store, ranker, id, top_k).await?;
            output::print_candidate_matches(&found.job, &found.top_candidates, format)?;
        }
        Command::Matches(MatchesCommand::Candidate { id, top_k }) => {
            let found = intake::find_matches_for_candidate(store, ranker, id, top_k).await?;
            output::print_job_matches(&found.candidate, &found.top_jobs, format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_post_job_with_repeated_skills() {
        let cli = Cli::try_parse_from([
            "tl-portal",
            "--in-memory",
            "post-job",
            "--title",
            "Data Engineer",
            "--location",
            "on_site",
            "--availability",
            "WITHIN_1_MONTH",
            "--career-preference",
            "UPWARD_MOBILITY",
            "--skill",
            "Python (ADVANCED)",
            "--skill",
            "SQL (BEGINNER)",
        ])
        .unwrap();

        let Command::PostJob(args) = cli.command else {
            panic!("expected post-job");
        };
        assert_eq!(args.location, LocationType::OnSite);
        assert_eq!(args.skills.len(), 2);
        assert_eq!(args.top_k, DEFAULT_TOP_K);

        let draft = JobDraft::from(args);
        assert_eq!(draft.salary_min, 80_000);
        assert_eq!(draft.required_experience, 3);
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let result = Cli::try_parse_from([
            "tl-portal",
            "create-candidate",
            "--username",
            "anon",
            "--preferred-location",
            "MOON",
            "--career-preference",
            "LATERAL_MOVE",
            "--skill",
            "Rust (EXPERT)",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_matches_subcommand() {
        let cli = Cli::try_parse_from(["tl-portal", "matches", "candidate", "7", "--top-k", "2"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Matches(MatchesCommand::Candidate { id: 7, top_k: 2 })
        ));
    }

    #[tokio::test]
    async fn in_memory_flow_runs_end_to_end() {
        let store = InMemoryStore::with_skills(default_seed());
        let ranker = Ranker::default();

        let command = Command::CreateCandidate(CreateCandidateArgs {
            username: "anon-1".into(),
            total_experience: 5,
            preferred_location: LocationType::OnSite,
            salary_min: 90_000,
            salary_max: 110_000,
            career_preference: CareerPreference::UpwardMobility,
            skills: vec!["Python (ADVANCED)".into()],
            top_k: DEFAULT_TOP_K,
        });
        run(&store, &ranker, command, OutputFormat::Json).await.unwrap();

        let found = intake::find_matches_for_candidate(&store, &ranker, 1, DEFAULT_TOP_K)
            .await
            .unwrap();
        assert!(found.top_jobs.is_empty());
    }
}
