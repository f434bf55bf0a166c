//! Journal replay entry point for the Grove engine.
//!
//! Loads `grove-config.yaml`, replays a JSON journal of user actions through
//! the [`GrowthEngine`](grove_core::GrowthEngine), and prints a JSON summary
//! per user: level, points, streak, plants, and a 30-day activity heatmap.
//!
//! ```text
//! grove-replay <journal.json> [--config <grove-config.yaml>]
//! ```
//!
//! Engine rejections in the journal are logged as warnings and the replay
//! continues. `RUST_LOG` takes precedence over the configured log level.

mod error;
mod journal;
mod replay;

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grove_core::{EngineConfig, GrowthEngine};

use crate::error::ReplayError;
use crate::journal::Journal;
use crate::replay::Replay;

/// Config file used when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "grove-config.yaml";

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    journal: PathBuf,
    config: PathBuf,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ReplayError> {
        let mut journal = None;
        let mut config = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ReplayError::Usage(String::from("--config needs a path")))?;
                    config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => {
                    return Err(ReplayError::Usage(format!("unknown flag {flag}")));
                }
                _ if journal.is_none() => journal = Some(PathBuf::from(&arg)),
                _ => return Err(ReplayError::Usage(format!("unexpected argument {arg}"))),
            }
        }

        Ok(Self {
            journal: journal.ok_or_else(|| {
                ReplayError::Usage(String::from(
                    "grove-replay <journal.json> [--config <grove-config.yaml>]",
                ))
            })?,
            config: config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        })
    }
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the arguments, configuration, or journal are invalid.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1))?;
    let config = load_config(&args.config)?;
    init_logging(&config);

    info!(
        journal = %args.journal.display(),
        config = %args.config.display(),
        "grove-replay starting"
    );

    let contents = std::fs::read_to_string(&args.journal).map_err(|source| ReplayError::Io {
        path: args.journal.clone(),
        source,
    })?;
    let journal = Journal::parse(&contents).map_err(ReplayError::from)?;
    info!(
        users = journal.users.len(),
        entries = journal.entries.len(),
        "journal loaded"
    );

    let engine = GrowthEngine::from_config(&config);
    let replay = Replay::run(engine, &journal)?;

    let as_of = journal
        .last_timestamp()
        .unwrap_or_else(Utc::now)
        .date_naive();
    let summaries = replay.summarize(as_of)?;
    for summary in &summaries {
        info!(
            user = %summary.name,
            level = summary.level,
            total_points = summary.total_points,
            balance = summary.balance,
            streak = summary.streak,
            plants = summary.plants.len(),
            heatmap = %summary.heatmap,
            ledger_balanced = summary.ledger_balanced,
            "user summary"
        );
    }

    info!(
        applied = replay.applied(),
        rejected = replay.rejected(),
        users = summaries.len(),
        "grove-replay finished"
    );
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

/// Load the config file, or fall back to defaults when the default path is
/// absent. An explicitly named file must exist.
fn load_config(path: &Path) -> Result<EngineConfig, ReplayError> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        let mut config = EngineConfig::default();
        config.apply_log_level_override(std::env::var(grove_core::config::LOG_LEVEL_ENV).ok());
        return Ok(config);
    }
    Ok(EngineConfig::from_file(path)?)
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, ReplayError> {
        Args::parse(list.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn journal_only_uses_default_config() {
        let parsed = args(&["journal.json"]).ok();
        assert_eq!(
            parsed.map(|a| a.config),
            Some(PathBuf::from(DEFAULT_CONFIG_PATH))
        );
    }

    #[test]
    fn config_flag() {
        let parsed = args(&["--config", "custom.yaml", "journal.json"]).ok();
        assert_eq!(
            parsed,
            Some(Args {
                journal: PathBuf::from("journal.json"),
                config: PathBuf::from("custom.yaml"),
            })
        );
    }

    #[test]
    fn missing_journal_is_usage_error() {
        assert!(matches!(args(&[]), Err(ReplayError::Usage(_))));
        assert!(matches!(args(&["--config"]), Err(ReplayError::Usage(_))));
        assert!(matches!(args(&["a.json", "b.json"]), Err(ReplayError::Usage(_))));
        assert!(matches!(args(&["--verbose", "a.json"]), Err(ReplayError::Usage(_))));
    }
}
