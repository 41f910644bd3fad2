//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.huddle.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Participant;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".huddle.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Roster settings.
    #[serde(default)]
    pub roster: RosterConfig,

    /// Stand-up timer settings.
    #[serde(default)]
    pub standup: StandupConfig,

    /// Survey analytics settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding `team.json` and `surveys.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            verbose: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Roster settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Members used when the stored roster is unavailable.
    #[serde(default = "default_members")]
    pub default_members: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            default_members: default_members(),
        }
    }
}

fn default_members() -> Vec<String> {
    vec![
        "Max", "Nikhil", "Pavel", "Anthony", "Vahid", "Daphne", "David", "María", "Ziming",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl RosterConfig {
    pub fn fallback(&self) -> Vec<Participant> {
        self.default_members
            .iter()
            .map(|name| Participant::new(name.as_str()))
            .collect()
    }
}

/// Stand-up timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandupConfig {
    /// How often the running timer is refreshed.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for StandupConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl StandupConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Survey analytics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of trailing weeks in the rolling average.
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,

    /// Week endings listed by `huddle weeks`.
    #[serde(default = "default_recent_weeks")]
    pub recent_weeks: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            rolling_window: default_rolling_window(),
            recent_weeks: default_recent_weeks(),
        }
    }
}

fn default_rolling_window() -> usize {
    crate::analytics::DEFAULT_WINDOW
}

fn default_recent_weeks() -> usize {
    8
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the latest week's feedback comments.
    #[serde(default = "default_true")]
    pub include_feedback: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_feedback: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data_dir) = args.data_dir {
            self.general.data_dir = data_dir.clone();
        }

        if let Some(crate::cli::Command::Results {
            window: Some(window),
            ..
        }) = &args.command
        {
            self.analytics.rolling_window = *window;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Reject settings the timers and analytics cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.standup.tick_interval_ms == 0 {
            bail!("standup.tick_interval_ms must be at least 1");
        }
        if self.analytics.rolling_window == 0 {
            bail!("analytics.rolling_window must be at least 1");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.data_dir, PathBuf::from("data"));
        assert_eq!(config.standup.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.analytics.rolling_window, 3);
        assert_eq!(config.roster.default_members.len(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
data_dir = "/srv/huddle"
verbose = true

[roster]
default_members = ["Ada", "Grace"]

[analytics]
rolling_window = 4
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.data_dir, PathBuf::from("/srv/huddle"));
        assert!(config.general.verbose);
        assert_eq!(
            config.roster.fallback(),
            vec![Participant::from("Ada"), Participant::from("Grace")]
        );
        assert_eq!(config.analytics.rolling_window, 4);
        assert_eq!(config.analytics.recent_weeks, 8);
        assert_eq!(config.standup.tick_interval_ms, 100);
        assert!(config.report.include_feedback);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.standup.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analytics.rolling_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let args = crate::cli::Args::try_parse_from([
            "huddle",
            "--data-dir",
            "/tmp/team",
            "--verbose",
            "results",
            "--window",
            "5",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_args(&args);

        assert_eq!(config.general.data_dir, PathBuf::from("/tmp/team"));
        assert_eq!(config.analytics.rolling_window, 5);
        assert!(config.general.verbose);
    }

    #[test]
    fn test_verbose_in_file_raises_log_level() {
        let args = crate::cli::Args::try_parse_from(["huddle", "results"]).unwrap();
        let mut config: Config = toml::from_str("[general]\nverbose = true").unwrap();
        config.merge_with_args(&args);

        assert!(config.general.verbose);
        assert_eq!(
            args.log_level(config.general.verbose),
            tracing::Level::DEBUG
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[roster]"));
        assert!(toml_str.contains("[standup]"));
        assert!(toml_str.contains("[analytics]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.analytics.rolling_window, 3);
    }
}
