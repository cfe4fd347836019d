//! Logging setup for the Actions runner.
//!
//! Records go through `env_logger`; warnings, errors and debug lines are
//! rendered as workflow commands so the runner annotates them.

use crate::outputs::escape_data;
use log::Level;
use std::io::Write;

/// Initialize the global logger.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` when
/// the runner has step debug logging on (`RUNNER_DEBUG=1`).
pub fn init() {
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let default_filter = if runner_debug { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                workflow_line(record.level(), &record.args().to_string())
            )
        })
        .init();
}

/// Render one log message as a line of runner output.
#[must_use]
pub fn workflow_line(level: Level, message: &str) -> String {
    match level {
        Level::Error => format!("::error::{}", escape_data(message)),
        Level::Warn => format!("::warning::{}", escape_data(message)),
        Level::Info => message.to_string(),
        Level::Debug | Level::Trace => format!("::debug::{}", escape_data(message)),
    }
}
