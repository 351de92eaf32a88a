//! Logging for the `lty` binary.
//!
//! Engine decisions (superclass cycles, degraded index lookups, structural
//! mismatches) are emitted as `tracing` events under the `lty_solver` target.
//! They reach stderr when any of these is given:
//!
//! - `-v` / `-vv`: `debug` / `trace` for the lty crates only
//! - `LTY_LOG`: a bare level (`LTY_LOG=trace`) is scoped to the lty crates,
//!   anything else is used as `EnvFilter` directives verbatim
//! - `RUST_LOG`: standard `EnvFilter` syntax, used when neither of the above is set
//!
//! ```bash
//! # Why is Str not a HasLen?
//! lty -vv --log-format tree -p project.json subtype Str HasLen
//!
//! # Index lookups that failed and were treated as absent
//! LTY_LOG=warn lty -p project.json supers Dog
//! ```

use clap::ValueEnum;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "LTY_LOG";
const LOG_FORMAT_VAR: &str = "LTY_LOG_FORMAT";
const LTY_TARGETS: [&str; 2] = ["lty_solver", "lty_cli"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Text,
    /// Indented by span nesting
    Tree,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// `LTY_LOG_FORMAT`, or `Text` when unset or unrecognised.
    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|value| Self::from_str(value.trim(), true).ok())
            .unwrap_or_default()
    }
}

/// Filter directives for the given `LTY_LOG` value and `-v` count, or `None`
/// when neither asks for logging.
pub fn filter_directives(lty_log: Option<&str>, verbose: u8) -> Option<String> {
    if let Some(spec) = lty_log.map(str::trim).filter(|spec| !spec.is_empty()) {
        if spec.parse::<LevelFilter>().is_ok() {
            return Some(scoped(spec));
        }
        return Some(spec.to_string());
    }
    match verbose {
        0 => None,
        1 => Some(scoped("debug")),
        _ => Some(scoped("trace")),
    }
}

fn scoped(level: &str) -> String {
    LTY_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber, writing to stderr. Does nothing when no
/// logging was requested.
pub fn init_tracing(verbose: u8, format: Option<LogFormat>) {
    let lty_log = std::env::var(LOG_VAR).ok();
    let filter = match filter_directives(lty_log.as_deref(), verbose) {
        Some(directives) => EnvFilter::builder().parse_lossy(directives),
        None if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        None => return,
    };

    match format.unwrap_or_else(LogFormat::from_env) {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
