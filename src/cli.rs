//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Metric;

/// Huddle - stand-up order, speaker timers and team health trends
///
/// Randomise who speaks first, keep everyone to two minutes, and track
/// the weekly well-being survey over time.
///
/// Examples:
///   huddle shuffle
///   huddle standup
///   huddle submit --name Max --blocked 3 --supported 8 --workload 6 \
///       --learned 5 --meeting-productivity 6 --solo-productivity 7 --week-quality 7
///   huddle results --window 4 --format json --output results.json
///   huddle sample --weeks 6
///   huddle --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .huddle.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding team.json and surveys.json
    #[arg(long, value_name = "DIR", env = "HUDDLE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .huddle.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print a randomised speaking order
    Shuffle,

    /// Run an interactive stand-up with two-minute speaker timers
    Standup,

    /// Record a weekly survey response
    Submit(SubmitArgs),

    /// Summarise survey responses into weekly trends
    Results {
        /// Weeks in the rolling average (default: from config or 3)
        #[arg(long, value_name = "WEEKS")]
        window: Option<usize>,

        /// Output format (markdown, json)
        #[arg(long, default_value = "markdown", value_name = "FORMAT")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List recent week-ending dates
    Weeks,

    /// Fill the survey store with generated demo responses
    Sample {
        /// Number of weeks to generate, ending this week
        #[arg(long, default_value_t = crate::sample::DEFAULT_SAMPLE_WEEKS, value_name = "WEEKS")]
        weeks: usize,

        /// Replace existing survey responses
        #[arg(long)]
        force: bool,
    },
}

/// Ratings are 1 (lowest) to 10 (highest).
#[derive(clap::Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Sunday closing the reported week (default: this week's Sunday)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub week_ending: Option<NaiveDate>,

    /// How much of the week you were blocked
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub blocked: u8,

    /// How supported you felt
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub supported: u8,

    /// How heavy your workload was
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub workload: u8,

    /// How much you learned
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub learned: u8,

    /// How productive meetings were
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub meeting_productivity: u8,

    /// How productive solo work was
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub solo_productivity: u8,

    /// Overall quality of the week
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub week_quality: u8,

    /// Anything else to share
    #[arg(long)]
    pub feedback: Option<String>,
}

impl SubmitArgs {
    /// Ratings in [`Metric::ALL`] order.
    pub fn ratings(&self) -> [u8; Metric::COUNT] {
        [
            self.blocked,
            self.supported,
            self.workload,
            self.learned,
            self.meeting_productivity,
            self.solo_productivity,
            self.week_quality,
        ]
    }
}

/// Output format for the results report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// A line typed during an interactive stand-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandupInput {
    /// Start the timer of a participant (position or name)
    Start(String),
    /// Mark a participant as done (position or name)
    Done(String),
    /// Show the board
    Status,
    /// Draw a new speaking order
    Shuffle,
    Help,
    Quit,
    Unknown(String),
}

impl StandupInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match (verb.to_lowercase().as_str(), rest) {
            ("" | "status" | "s", _) => StandupInput::Status,
            ("start" | "go", who) if !who.is_empty() => StandupInput::Start(who.to_string()),
            ("done" | "d", who) if !who.is_empty() => StandupInput::Done(who.to_string()),
            ("shuffle", _) => StandupInput::Shuffle,
            ("help" | "h" | "?", _) => StandupInput::Help,
            ("quit" | "exit" | "q", _) => StandupInput::Quit,
            _ => StandupInput::Unknown(line.to_string()),
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.command.is_none() {
            return Err("A subcommand is required (try --help)".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(Command::Results {
            window: Some(0), ..
        }) = &self.command
        {
            return Err("Window must be at least 1 week".to_string());
        }

        if let Some(Command::Sample { weeks: 0, .. }) = &self.command {
            return Err("Sample data needs at least 1 week".to_string());
        }

        if let Some(Command::Submit(submit)) = &self.command {
            if submit.name.trim().is_empty() {
                return Err("Name must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file;
    /// `--quiet` still wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    fn submit_args(extra: &[&str]) -> Vec<String> {
        let mut args = vec![
            "huddle",
            "submit",
            "--name",
            "Max",
            "--blocked",
            "3",
            "--supported",
            "8",
            "--workload",
            "6",
            "--learned",
            "5",
            "--meeting-productivity",
            "6",
            "--solo-productivity",
            "7",
            "--week-quality",
            "7",
        ];
        args.extend_from_slice(extra);
        args.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_parse_submit() {
        let args = Args::try_parse_from(submit_args(&["--week-ending", "2025-01-12"])).unwrap();
        let Some(Command::Submit(submit)) = args.command else {
            panic!("expected submit command");
        };
        assert_eq!(submit.ratings(), [3, 8, 6, 5, 6, 7, 7]);
        assert_eq!(submit.week_ending, NaiveDate::from_ymd_opt(2025, 1, 12));
        assert_eq!(submit.feedback, None);
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let mut args = submit_args(&[]);
        let position = args.iter().position(|a| a == "--workload").unwrap();
        args[position + 1] = "11".to_string();
        assert!(Args::try_parse_from(args).is_err());
    }

    #[test]
    fn test_results_defaults() {
        let args = parse(&["huddle", "results"]);
        match args.command {
            Some(Command::Results {
                window,
                format,
                output,
            }) => {
                assert_eq!(window, None);
                assert_eq!(format, OutputFormat::Markdown);
                assert_eq!(output, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validation_requires_command() {
        let args = parse(&["huddle"]);
        assert!(args.validate().is_err());

        let args = parse(&["huddle", "--init-config"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let args = parse(&["huddle", "shuffle", "--verbose", "--quiet"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_window() {
        let args = parse(&["huddle", "results", "--window", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_sample_command() {
        let args = parse(&["huddle", "sample"]);
        assert!(matches!(
            args.command,
            Some(Command::Sample {
                weeks: 6,
                force: false
            })
        ));
        assert!(args.validate().is_ok());

        let args = parse(&["huddle", "sample", "--weeks", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_standup_input() {
        assert_eq!(StandupInput::parse("start 2"), StandupInput::Start("2".to_string()));
        assert_eq!(
            StandupInput::parse("  START  María "),
            StandupInput::Start("María".to_string())
        );
        assert_eq!(StandupInput::parse("done Max"), StandupInput::Done("Max".to_string()));
        assert_eq!(StandupInput::parse(""), StandupInput::Status);
        assert_eq!(StandupInput::parse("shuffle"), StandupInput::Shuffle);
        assert_eq!(StandupInput::parse("q"), StandupInput::Quit);
        assert_eq!(
            StandupInput::parse("start"),
            StandupInput::Unknown("start".to_string())
        );
    }

    #[test]
    fn test_log_level() {
        let mut args = parse(&["huddle", "weeks"]);
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_config_verbose_raises_log_level() {
        let args = parse(&["huddle", "results"]);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        let args = parse(&["huddle", "results", "--quiet"]);
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
