//! Output directory preparation and two-phase file writing.
//!
//! Every target path is validated, and checked for duplicates, before anything
//! is written. Files then go to `<name>.tmp` siblings; if one of those writes
//! fails the temporary files are removed and no final file is touched. Once all
//! temporary files exist they are renamed into place one by one. A failed
//! rename leaves the files already renamed in place and removes the remaining
//! temporary files.
//!
//! Output names come from the bundler and from entry paths, so each one is
//! normalized and checked to stay inside the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rolldown::BundleOutput;
use rolldown_common::Output;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::entries::ResolvedEntry;
use crate::{DiagnosticKind, Error, ExtractedDiagnostic, Result};

const WRITE_CHECK_FILE: &str = ".kiln-write-check";

/// A file destined for the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the output directory, `/`-separated.
    pub filename: String,
    pub contents: Vec<u8>,
}

impl OutputFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

/// Collect the chunks and assets of a Rolldown bundle.
///
/// A stylesheet entry emits its CSS as an asset next to an empty script stub.
/// Entry chunks named in `stylesheet_entries` are skipped unless another
/// chunk imports them.
pub fn files_from_bundle(
    output: &BundleOutput,
    stylesheet_entries: &FxHashSet<String>,
) -> Vec<OutputFile> {
    let imported: FxHashSet<&str> = output
        .assets
        .iter()
        .filter_map(|item| match item {
            Output::Chunk(chunk) => Some(chunk.imports.iter().map(|i| i.as_str())),
            Output::Asset(_) => None,
        })
        .flatten()
        .collect();

    output
        .assets
        .iter()
        .filter_map(|item| match item {
            Output::Chunk(chunk) => {
                if chunk.is_entry
                    && stylesheet_entries.contains(chunk.name.as_str())
                    && !imported.contains(chunk.filename.as_str())
                {
                    debug!(file = %chunk.filename, "dropping script stub of stylesheet entry");
                    return None;
                }
                Some(OutputFile::new(chunk.filename.as_str(), chunk.code.as_bytes()))
            }
            Output::Asset(asset) => Some(OutputFile::new(
                asset.filename.as_str(),
                asset.source.as_bytes(),
            )),
        })
        .collect()
}

/// Read static entries so they can be copied under their outbase-relative path.
pub fn files_from_statics(entries: &[ResolvedEntry]) -> Result<Vec<OutputFile>> {
    entries
        .iter()
        .map(|entry| {
            let contents = fs::read(&entry.path).map_err(|e| {
                Error::from(
                    ExtractedDiagnostic::error(
                        DiagnosticKind::WriteFailure,
                        format!("Failed to read '{}': {}", entry.path.display(), e),
                    )
                    .with_file(entry.path.to_string_lossy()),
                )
            })?;
            Ok(OutputFile::new(
                entry.relative.to_string_lossy().replace('\\', "/"),
                contents,
            ))
        })
        .collect()
}

/// Create the output directory and make sure files can be created inside it.
///
/// Returns the normalized absolute directory.
pub fn prepare_output_dir(dir: &Path) -> Result<PathBuf> {
    let dir = normalize_dir(dir)?;

    let not_writable = |reason: String| {
        Error::from(
            ExtractedDiagnostic::error(
                DiagnosticKind::OutputNotWritable,
                format!("Output directory '{}' is not writable: {}", dir.display(), reason),
            )
            .with_file(dir.to_string_lossy())
            .with_help("Check directory permissions or choose a different output directory"),
        )
    };

    fs::create_dir_all(&dir).map_err(|e| not_writable(e.to_string()))?;

    let check = dir.join(WRITE_CHECK_FILE);
    fs::write(&check, b"").map_err(|e| not_writable(e.to_string()))?;
    if let Err(e) = fs::remove_file(&check) {
        warn!(path = %check.display(), error = %e, "failed to remove write check file");
    }

    Ok(dir)
}

/// Write all files into `dir`, replacing existing ones.
///
/// Returns the final paths in the order given.
///
/// # Errors
///
/// - `InvalidOutputPath` when a name escapes `dir`
/// - `DuplicateOutput` when two files resolve to the same path
/// - `WriteFailure` when the filesystem refuses a write or rename
pub fn write_outputs(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    let mut operations = Vec::with_capacity(files.len());
    let mut targets: FxHashMap<PathBuf, &str> = FxHashMap::default();
    for file in files {
        let target = validate_output_path(dir, &file.filename)?;
        if let Some(first) = targets.insert(target.clone(), &file.filename) {
            return Err(ExtractedDiagnostic::error(
                DiagnosticKind::DuplicateOutput,
                format!(
                    "Outputs '{}' and '{}' would both be written to '{}'",
                    first,
                    file.filename,
                    target.display()
                ),
            )
            .with_file(target.to_string_lossy())
            .into());
        }
        operations.push((target, file.contents.as_slice()));
    }

    write_files_two_phase(&operations)?;

    for (path, contents) in &operations {
        debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    }

    Ok(operations.into_iter().map(|(path, _)| path).collect())
}

fn normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.to_path_buf().clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    let cwd = std::env::current_dir().map_err(|e| {
        Error::failure(
            DiagnosticKind::OutputNotWritable,
            format!("Failed to get current directory: {}", e),
        )
    })?;
    Ok(cwd.join(cleaned).clean())
}

/// Join `filename` onto `base_dir`, refusing anything that escapes it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::failure(
            DiagnosticKind::InvalidOutputPath,
            "Filename contains null byte",
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::failure(
            DiagnosticKind::InvalidOutputPath,
            format!(
                "Path '{}' escapes output directory '{}' (resolved to '{}')",
                filename,
                base_dir.display(),
                full_path.display()
            ),
        ));
    }

    Ok(full_path)
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Two-phase write: temp files first, then renames.
///
/// Temporary files are removed on any failure; renames already done stay.
fn write_files_two_phase(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files: Vec<(PathBuf, PathBuf)> = Vec::new();

    let write_failure = |message: String| Error::failure(DiagnosticKind::WriteFailure, message);

    for (target_path, content) in operations {
        if let Some(parent) = target_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                cleanup_temp_files(&temp_files);
                return Err(write_failure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                )));
            }
        }

        let temp_path = temp_path_for(target_path);
        if let Err(e) = fs::write(&temp_path, content) {
            cleanup_temp_files(&temp_files);
            return Err(write_failure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            )));
        }

        temp_files.push((temp_path, target_path.clone()));
    }

    for (temp_path, target_path) in &temp_files {
        if let Err(e) = fs::rename(temp_path, target_path) {
            cleanup_temp_files(&temp_files);
            return Err(write_failure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            )));
        }
    }

    Ok(())
}

/// Best-effort removal of leftover temp files.
fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                warn!(path = %temp_path.display(), error = %e, "failed to clean up temporary file");
            }
        }
    }
}
