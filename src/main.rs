use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rosterbot::config::Config;
use rosterbot::error::RosterErrorTrait;
use rosterbot::planner::{MatchingMode, SubstitutionPlanner};
use rosterbot::runner::{plan_snapshot_files, RosterRunner, SnapshotPlan};
use rosterbot::utils::today_local;

#[derive(Parser)]
#[command(
    name = "rosterbot",
    version,
    about = "Keeps a fantasy roster's lineup filled with eligible starters",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Path to a TOML config file (defaults to ROSTERBOT_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one roster update pass (intended for a periodic trigger)
    Run {
        /// Lineup date to project (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Plan and encode without sending updates
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Override the configured matching strategy
        #[arg(short, long, value_enum)]
        matching: Option<MatchingMode>,
    },

    /// Plan substitutions from saved roster snapshots
    Plan {
        /// Current roster XML
        #[arg(long)]
        current: PathBuf,

        /// Projected lineup XML
        #[arg(long)]
        projected: PathBuf,

        /// Matching strategy
        #[arg(short, long, value_enum, default_value_t = MatchingMode::NestedScan)]
        matching: MatchingMode,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Run {
            date,
            dry_run,
            matching,
        } => {
            let lineup_date = date.unwrap_or_else(today_local);
            tracing::info!(
                lineup_date = %lineup_date,
                dry_run = %dry_run,
                matching = ?matching,
                "Starting run command"
            );
            run(cli.config, lineup_date, dry_run, matching).await?;
        }

        Commands::Plan {
            current,
            projected,
            matching,
            format,
        } => {
            tracing::info!(
                current = %current.display(),
                projected = %projected.display(),
                matching = %matching,
                "Starting plan command"
            );
            let planner = SubstitutionPlanner::new(matching);
            let plan = plan_snapshot_files(&current, &projected, &planner)?;
            print_plan(&plan, format)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("rosterbot=debug,info")
        } else {
            tracing_subscriber::EnvFilter::new("rosterbot=info,warn")
        }
    });

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn run(
    config_path: Option<PathBuf>,
    lineup_date: NaiveDate,
    dry_run: bool,
    matching: Option<MatchingMode>,
) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(matching) = matching {
        config.planner.matching = matching;
    }

    let runner = RosterRunner::from_config(&config)?.with_dry_run(dry_run);

    let report = match runner.run_once(lineup_date).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(
                error = %e,
                category = %e.category(),
                recoverable = e.is_recoverable(),
                "Roster update run failed"
            );
            return Err(e.into());
        }
    };

    println!("Roster Update Summary");
    println!("=====================");
    println!("Lineup date: {}", report.lineup_date);
    println!("Current players: {}", report.current_players);
    println!("Projected players: {}", report.projected_players);
    println!("Directives: {}", report.directives.len());
    for directive in &report.directives {
        println!("  {directive}");
    }
    if report.dry_run {
        println!("Dry run: no updates sent");
    } else {
        println!(
            "Dispatched: {} (rejected: {})",
            report.outcomes.len(),
            report.failed_dispatches()
        );
    }

    Ok(())
}

fn print_plan(plan: &SnapshotPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        OutputFormat::Text => {
            println!(
                "Players: {} current, {} projected",
                plan.current_players, plan.projected_players
            );
            if plan.updates.is_empty() {
                println!("No substitutions needed");
            }
            for update in &plan.updates {
                println!("{}", update.directive);
                println!("  {}", update.payload.team.roster);
            }
        }
    }
    Ok(())
}
