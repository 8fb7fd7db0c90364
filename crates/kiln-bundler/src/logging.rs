//! Logging setup for applications embedding kiln.
//!
//! Only available with the `logging` feature. Without it kiln just emits
//! `tracing` events and leaves the subscriber to the host application.

use std::sync::Once;
use tracing_subscriber::{
    EnvFilter, filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

static INIT: Once = Once::new();

/// Verbosity for kiln's own events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    fn directive(&self) -> &'static str {
        match self {
            LogLevel::Silent => "kiln_bundler=off",
            LogLevel::Error => "kiln_bundler=error",
            LogLevel::Warn => "kiln_bundler=warn",
            LogLevel::Info => "kiln_bundler=info",
            LogLevel::Debug => "kiln_bundler=debug",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Install a compact global subscriber at `level`.
///
/// Only the first call in a process has any effect. `RUST_LOG` directives are
/// layered on top of the level.
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| {
        let filter = EnvFilter::new(level.directive());
        let filter = match std::env::var("RUST_LOG") {
            Ok(extra) => extra
                .split(',')
                .filter_map(|d| d.parse::<Directive>().ok())
                .fold(filter, |f, d| f.add_directive(d)),
            Err(_) => filter,
        };

        install(filter);
    });
}

/// Install a subscriber configured from `RUST_LOG`, defaulting to info.
pub fn init_logging_from_env() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::Info.directive()));
        install(filter);
    });
}

fn install(filter: EnvFilter) {
    // Another subscriber may already be installed by the host; keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).without_time())
        .try_init();
}
