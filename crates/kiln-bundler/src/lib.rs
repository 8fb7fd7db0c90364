#![cfg_attr(docsrs, feature(doc_cfg))]

//! # kiln-bundler
//!
//! Declares an asset build and hands it to a build facility.
//!
//! A [`BuildConfig`] names entry-point glob patterns, an output directory, the
//! minify and tree-shaking toggles and an ordered list of [`PluginHandle`]s.
//! A [`BuildInvoker`] passes that configuration, once, to a [`BuildFacility`]
//! and waits for it to finish. The default facility, [`RolldownFacility`],
//! expands the patterns, runs Rolldown over module entries, copies every other
//! matched file verbatim and writes the results into the output directory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kiln_bundler::{BuildConfig, BuildInvoker};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::new(["assets/**/*"])
//!     .outdir("public")
//!     .minify(true)
//!     .tree_shaking(true);
//!
//! let context = BuildInvoker::default().invoke(config).await?;
//! println!("wrote {} files", context.outputs().len());
//! # Ok(()) }
//! ```
//!
//! Library users only receive `tracing` events; enable the `logging` feature
//! for a ready-made subscriber.

pub mod config;
pub mod diagnostics;
pub mod entries;
pub mod facility;
pub mod invoker;
pub mod output;
pub mod plugin;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

pub use config::BuildConfig;
pub use diagnostics::{DiagnosticKind, DiagnosticSeverity, ExtractedDiagnostic};
pub use facility::{BuildFacility, RolldownFacility};
pub use invoker::{BuildInvoker, build};
pub use output::BuildContext;
pub use plugin::{PluginHandle, plugin};

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

// Re-export plugin types for plugin authors
pub use rolldown_common::ModuleType;
pub use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookUsage, Plugin, PluginContext,
};

/// Error type for kiln-bundler operations.
///
/// Every failure raised inside the build facility is a build failure; the
/// diagnostics describe the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Build failed: {}", format_diagnostics(.0))]
    BuildFailure(Vec<ExtractedDiagnostic>),
}

/// Result type alias for kiln-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build failure with a single error diagnostic.
    pub fn failure(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Error::BuildFailure(vec![ExtractedDiagnostic::error(kind, message)])
    }

    /// Create a build failure from a Rolldown error.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::BuildFailure(diagnostics::extract_from_rolldown_error(error))
    }

    pub fn diagnostics(&self) -> &[ExtractedDiagnostic] {
        match self {
            Error::BuildFailure(diagnostics) => diagnostics,
        }
    }

    /// Kind of the primary diagnostic, if any.
    pub fn kind(&self) -> Option<&DiagnosticKind> {
        self.diagnostics().first().map(|d| &d.kind)
    }
}

impl From<ExtractedDiagnostic> for Error {
    fn from(diagnostic: ExtractedDiagnostic) -> Self {
        Error::BuildFailure(vec![diagnostic])
    }
}

fn format_diagnostics(diagnostics: &[ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown build error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        let code = match self.kind() {
            Some(DiagnosticKind::EmptyEntryPatterns) => "kiln::empty_entry_patterns",
            Some(DiagnosticKind::InvalidPattern) => "kiln::invalid_pattern",
            Some(DiagnosticKind::NoMatchingEntries) => "kiln::no_matching_entries",
            Some(DiagnosticKind::OutputNotWritable) => "kiln::output_not_writable",
            Some(DiagnosticKind::InvalidOutputPath) => "kiln::invalid_output_path",
            Some(DiagnosticKind::WriteFailure) => "kiln::write_failure",
            Some(DiagnosticKind::DuplicateOutput) => "kiln::duplicate_output",
            Some(DiagnosticKind::Plugin) => "kiln::plugin",
            _ => "kiln::build_failure",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self.diagnostics() {
            [diag] => diag
                .help
                .as_ref()
                .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
            [] => None,
            _ => Some(Box::new(
                "Multiple build errors occurred. See details above.".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_failure_display_single() {
        let err = Error::failure(DiagnosticKind::EmptyEntryPatterns, "no entry patterns");
        assert_eq!(err.to_string(), "Build failed: EmptyEntryPatterns: no entry patterns");
        assert_eq!(err.kind(), Some(&DiagnosticKind::EmptyEntryPatterns));
    }

    #[test]
    fn test_failure_display_multiple() {
        let err = Error::BuildFailure(vec![
            ExtractedDiagnostic::error(DiagnosticKind::ParseError, "bad token"),
            ExtractedDiagnostic::error(DiagnosticKind::Plugin, "styles failed"),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("Build failed: 2 errors"));
        assert!(text.contains("ParseError: bad token"));
        assert!(text.contains("Plugin: styles failed"));
    }

    #[test]
    fn test_miette_code_and_help() {
        let err: Error = ExtractedDiagnostic::error(DiagnosticKind::OutputNotWritable, "denied")
            .with_help("pick another directory")
            .into();
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("kiln::output_not_writable")
        );
        assert_eq!(
            err.help().map(|h| h.to_string()).as_deref(),
            Some("pick another directory")
        );
    }
}
