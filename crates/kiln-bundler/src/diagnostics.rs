//! Structured diagnostics carried by a build failure.
//!
//! Everything that goes wrong inside the build facility is reported as one or
//! more [`ExtractedDiagnostic`]s. Rolldown errors are converted from their
//! debug representation so the rest of kiln never depends on Rolldown's error
//! types directly.

use serde::{Deserialize, Serialize};

/// Diagnostic information extracted from a failed build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub help: Option<String>,
    /// Error chain (causes) extracted from the error
    #[serde(default)]
    pub error_chain: Vec<String>,
}

impl ExtractedDiagnostic {
    /// Error-severity diagnostic with only a kind and a message.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            file: None,
            help: None,
            error_chain: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// What part of the build failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No entry patterns were declared.
    EmptyEntryPatterns,
    /// An entry pattern is not a valid glob.
    InvalidPattern,
    /// The entry patterns matched no files.
    NoMatchingEntries,
    /// The output directory cannot be created or written.
    OutputNotWritable,
    /// An output file would land outside the output directory.
    InvalidOutputPath,
    /// Writing or copying an output file failed.
    WriteFailure,
    /// Two entries or outputs would be written to the same file.
    DuplicateOutput,
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    Plugin,
    Other(String),
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::EmptyEntryPatterns => write!(f, "EmptyEntryPatterns"),
            DiagnosticKind::InvalidPattern => write!(f, "InvalidPattern"),
            DiagnosticKind::NoMatchingEntries => write!(f, "NoMatchingEntries"),
            DiagnosticKind::OutputNotWritable => write!(f, "OutputNotWritable"),
            DiagnosticKind::InvalidOutputPath => write!(f, "InvalidOutputPath"),
            DiagnosticKind::WriteFailure => write!(f, "WriteFailure"),
            DiagnosticKind::DuplicateOutput => write!(f, "DuplicateOutput"),
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract diagnostics from a Rolldown error value.
///
/// Rolldown batches its diagnostics; the debug string is split on the batch
/// marker and each part classified on its own.
pub fn extract_from_rolldown_error(error: &dyn std::fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");

    let parts: Vec<&str> = error_str
        .split("BatchedBuildDiagnostic")
        .filter(|s| !s.trim().trim_matches('"').is_empty())
        .collect();

    if parts.len() > 1 {
        parts.iter().map(|part| extract_single(part)).collect()
    } else {
        vec![extract_single(&error_str)]
    }
}

fn extract_single(error_str: &str) -> ExtractedDiagnostic {
    let kind = if error_str.contains("Parse error")
        || error_str.contains("Syntax")
        || error_str.contains("Expected")
    {
        DiagnosticKind::ParseError
    } else if error_str.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if error_str.contains("UnresolvedImport") || error_str.contains("Cannot resolve") {
        DiagnosticKind::UnresolvedImport
    } else if error_str.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other("Bundler".to_string())
    };

    let severity = if error_str.contains("warning") || error_str.contains("Warning") {
        DiagnosticSeverity::Warning
    } else {
        DiagnosticSeverity::Error
    };

    ExtractedDiagnostic {
        kind,
        severity,
        message: error_str.trim().to_string(),
        file: extract_file_path(error_str),
        help: extract_help_text(error_str),
        error_chain: extract_error_chain(error_str),
    }
}

/// Collect "Caused by:" lines, as printed by anyhow-style errors.
fn extract_error_chain(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let pos = trimmed.find("Caused by:")?;
            let cause = trimmed[pos + 10..].trim();
            (!cause.is_empty()).then(|| cause.to_string())
        })
        .collect()
}

fn extract_file_path(text: &str) -> Option<String> {
    for ext in &[".css", ".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs", ".json"] {
        if let Some(pos) = text.find(ext) {
            let before = &text[..pos + ext.len()];
            for indicator in &["in ", "at ", "file: ", "path: ", "\"", "'"] {
                if let Some(start) = before.rfind(indicator) {
                    let path_str = &before[start + indicator.len()..];
                    if let Some(end) = path_str.find([' ', '\n', '"', '\'', ',']) {
                        return Some(path_str[..end].trim().to_string());
                    }
                    return Some(path_str.trim().to_string());
                }
            }
        }
    }
    None
}

fn extract_help_text(text: &str) -> Option<String> {
    for indicator in &["help: ", "Help: ", "hint: ", "Hint: "] {
        if let Some(pos) = text.find(indicator) {
            let help_str = text[pos + indicator.len()..]
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            if !help_str.is_empty() {
                return Some(help_str);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_unresolved_import() {
        let diags = extract_from_rolldown_error(&"Cannot resolve 'lodash' in src/app.js");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedImport);
        assert_eq!(diags[0].file.as_deref(), Some("src/app.js"));
    }

    #[test]
    fn test_splits_batched_diagnostics() {
        let raw = "BatchedBuildDiagnostic Parse error in 'a.js' BatchedBuildDiagnostic Plugin kiln-styles failed";
        let diags = extract_from_rolldown_error(&raw);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].kind, DiagnosticKind::ParseError);
        assert_eq!(diags[1].kind, DiagnosticKind::Plugin);
    }

    #[test]
    fn test_extracts_help_and_chain() {
        let raw = "Plugin error\nhint: check the stylesheet\nCaused by: unexpected token";
        let diag = extract_single(raw);
        assert_eq!(diag.help.as_deref(), Some("check the stylesheet"));
        assert_eq!(diag.error_chain, vec!["unexpected token".to_string()]);
    }

    #[test]
    fn test_warning_severity() {
        let diag = extract_single("Warning: something odd");
        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DiagnosticKind::OutputNotWritable.to_string(), "OutputNotWritable");
        assert_eq!(DiagnosticKind::Other("Bundler".into()).to_string(), "Bundler");
    }
}
