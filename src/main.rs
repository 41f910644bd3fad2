//! Huddle - stand-up order, speaker timers and team health trends
//!
//! A CLI that randomises the stand-up speaking order, keeps each speaker
//! to a two-minute cap, records the weekly well-being survey and reports
//! per-metric trends over the survey history.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, config, storage failure, etc.)

mod analytics;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod sample;
mod shuffle;
mod storage;
mod timer;
mod week;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use cli::{Args, Command, OutputFormat, StandupInput, SubmitArgs};
use config::{Config, CONFIG_FILE};
use models::SurveyResponse;
use report::ResultsReport;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use storage::{JsonFileStore, ResolvedRoster, RosterOrigin, RosterSource, SurveyStore};
use timer::{MonotonicClock, StandupSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so `[general] verbose` can raise the level
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("Huddle v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    if let Err(e) = run(args, config).await {
        error!("Command failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .huddle.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to set the data directory, default roster and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Dispatch the selected subcommand.
async fn run(args: Args, config: Config) -> Result<()> {
    let store = JsonFileStore::new(&config.general.data_dir);
    debug!("Data directory: {}", config.general.data_dir.display());

    match args.command {
        Some(Command::Shuffle) => handle_shuffle(&store, &config),
        Some(Command::Standup) => handle_standup(&store, &config).await,
        Some(Command::Submit(submit)) => handle_submit(&store, &submit),
        Some(Command::Results { format, output, .. }) => {
            handle_results(&store, &config, format, output.as_deref())
        }
        Some(Command::Weeks) => handle_weeks(&config),
        Some(Command::Sample { weeks, force }) => {
            handle_sample(&store, &store, &config, weeks, force)
        }
        None => Ok(()),
    }
}

/// Fetch the roster, falling back to the configured defaults.
fn load_roster(roster: &dyn RosterSource, config: &Config) -> ResolvedRoster {
    let resolved = storage::resolve_roster(roster.fetch_roster(), &config.roster.fallback());

    if let RosterOrigin::Fallback { ref reason } = resolved.origin {
        println!("⚠️  Roster unavailable ({}), using default members.", reason);
    }

    resolved
}

/// Handle `shuffle`: print a randomised speaking order.
fn handle_shuffle(roster: &dyn RosterSource, config: &Config) -> Result<()> {
    let resolved = load_roster(roster, config);

    if resolved.members.is_empty() {
        println!("No team members to shuffle.");
        return Ok(());
    }

    println!("🎲 Today's standup order:\n");
    for (index, participant) in shuffle::shuffle(&resolved.members).iter().enumerate() {
        println!("  {:>2}. {}", index + 1, participant);
    }
    Ok(())
}

/// Handle `standup`: interactive session with speaker timers.
async fn handle_standup(roster: &dyn RosterSource, config: &Config) -> Result<()> {
    let resolved = load_roster(roster, config);

    if resolved.members.is_empty() {
        println!("No team members to run a standup with.");
        return Ok(());
    }

    let order = shuffle::shuffle(&resolved.members);
    let mut session = StandupSession::new(
        order,
        Arc::new(MonotonicClock::new()),
        config.standup.tick_interval(),
    );

    println!("🎤 Today's standup order:\n");
    print_board(&session);
    print_standup_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match StandupInput::parse(&line) {
            StandupInput::Start(who) => match session.resolve(&who) {
                Some(participant) => session.start(&participant),
                None => {
                    println!("Nobody called '{}' in today's order.", who);
                    continue;
                }
            },
            StandupInput::Done(who) => match session.resolve(&who) {
                Some(participant) => session.complete(&participant),
                None => {
                    println!("Nobody called '{}' in today's order.", who);
                    continue;
                }
            },
            StandupInput::Status => {}
            StandupInput::Shuffle => session.reshuffle(),
            StandupInput::Help => {
                print_standup_help();
                continue;
            }
            StandupInput::Quit => break,
            StandupInput::Unknown(input) => {
                warn!("Unrecognised input: {}", input);
                println!("Unknown command. Type 'help' for the list of commands.");
                continue;
            }
        }

        print_board(&session);
    }

    let snapshot = session.snapshot();
    let completed = snapshot.values().filter(|state| state.completed).count();
    println!(
        "\n✅ Standup finished: {} of {} done.",
        completed,
        session.order().len()
    );
    Ok(())
}

fn print_board(session: &StandupSession) {
    print!("{}", report::render_board(session.order(), &session.snapshot()));
    if let Some(speaker) = session.running() {
        println!("▶ Now speaking: {}", speaker);
    }
}

fn print_standup_help() {
    println!();
    println!("Commands: start <n|name>, done <n|name>, status (or Enter), shuffle, help, quit");
}

/// Handle `submit`: validate and store one survey response.
fn handle_submit(store: &dyn SurveyStore, submit: &SubmitArgs) -> Result<()> {
    let week_ending = submit
        .week_ending
        .unwrap_or_else(|| week::week_ending(Local::now().date_naive()));

    let mut response = SurveyResponse::new(
        submit.name.trim(),
        week_ending,
        submit.ratings(),
        Utc::now(),
    );
    if let Some(ref feedback) = submit.feedback {
        response = response.with_feedback(feedback.as_str());
    }

    response.validate()?;
    store.append_response(&response)?;

    println!(
        "✅ Thanks, {}! Response recorded for {}.",
        response.name,
        week::week_label(week_ending)
    );
    Ok(())
}

/// Handle `results`: aggregate responses and render the report.
fn handle_results(
    store: &dyn SurveyStore,
    config: &Config,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let responses = storage::responses_or_empty(store.fetch_responses());
    info!("Loaded {} survey responses", responses.len());

    let report = ResultsReport::build(
        &responses,
        config.analytics.rolling_window,
        config.report.include_feedback,
        Utc::now(),
    );

    let rendered = match format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📊 Report saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Handle `weeks`: list recent week endings.
fn handle_weeks(config: &Config) -> Result<()> {
    let today = Local::now().date_naive();

    for week_ending in week::recent_week_endings(today, config.analytics.recent_weeks) {
        println!("{}  {}", week_ending, week::week_label(week_ending));
    }
    Ok(())
}

/// Handle `sample`: replace the survey store with generated responses.
fn handle_sample(
    roster: &dyn RosterSource,
    store: &dyn SurveyStore,
    config: &Config,
    weeks: usize,
    force: bool,
) -> Result<()> {
    let existing = store.fetch_responses()?;
    if !existing.is_empty() && !force {
        bail!(
            "{} survey responses already stored; pass --force to replace them",
            existing.len()
        );
    }

    let resolved = load_roster(roster, config);

    // Oldest week first
    let mut week_endings = week::recent_week_endings(Local::now().date_naive(), weeks);
    week_endings.reverse();

    let responses = sample::generate(&resolved.members, &week_endings, &mut rand::rng());
    store.replace_responses(&responses)?;

    println!(
        "✅ Generated {} survey responses for {} weeks ({} to {}).",
        responses.len(),
        week_endings.len(),
        week_endings.first().map(|d| d.to_string()).unwrap_or_default(),
        week_endings.last().map(|d| d.to_string()).unwrap_or_default()
    );
    Ok(())
}

/// Load configuration from file or use defaults, then apply CLI overrides.
///
/// Runs before logging is initialised, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        // Try explicit config path
        Some(ref config_path) => Config::load(config_path)?,
        // Try default location
        None => match Config::load_default() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("⚠️  Failed to load {}: {:#}. Using defaults.", CONFIG_FILE, e);
                Config::default()
            }
        },
    };

    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}
