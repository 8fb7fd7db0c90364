//! Logging setup for the kiln CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! The filter is chosen in this order:
//! 1. `--verbose`: debug for every kiln crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`, when set
//! 4. warnings and above, so status lines from [`crate::ui`] stay readable

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "kiln_bundler=debug,kiln_plugin_styles=debug,kiln_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "warn";

/// Pick the filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber. Call once, before logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_kiln_crates() {
        let filter = filter_for(true, false).to_string();
        assert!(filter.contains("kiln_bundler=debug"));
        assert!(filter.contains("kiln_plugin_styles=debug"));
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        assert!(filter_for(true, true).to_string().contains("debug"));
    }

    #[test]
    fn test_quiet_is_errors_only() {
        assert_eq!(filter_for(false, true).to_string(), "error");
    }
}
