//! Miette report conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert a `CliError` into a miette report.
///
/// Build failures keep their own `Diagnostic` impl so the code and help
/// text from the bundler are shown unchanged.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => Report::new(e),
        CliError::Config(e) => miette::miette!(code = "kiln::config", "{}", e),
        other => miette::miette!("{}", other),
    }
}
