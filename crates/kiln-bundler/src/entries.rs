//! Entry-point expansion.
//!
//! Glob patterns are expanded against the working directory in declaration
//! order. Within one pattern files are visited in file-name order; a file
//! matched by several patterns is kept once, at its first position.
//!
//! Patterns use `globset` syntax with literal separators: `*` stays inside one
//! path segment and `**` crosses directories.

use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{DiagnosticKind, Error, ExtractedDiagnostic, Result};

/// Extensions handed to the bundler as modules. Everything else is copied.
const MODULE_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx", "json", "css", "scss", "sass",
];

/// Module extensions whose entry output is a stylesheet rather than a script.
const STYLESHEET_EXTENSIONS: &[&str] = &["css", "scss", "sass"];

/// How a matched file is turned into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Bundled by Rolldown.
    Module,
    /// Copied byte-for-byte.
    Static,
}

impl EntryKind {
    pub fn of(path: &Path) -> Self {
        let is_module = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| MODULE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if is_module { Self::Module } else { Self::Static }
    }
}

/// A matched entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Path relative to the outbase; the output keeps this layout.
    pub relative: PathBuf,
    pub kind: EntryKind,
}

impl ResolvedEntry {
    /// Bundler entry name: the relative path without extension, `/`-separated.
    pub fn chunk_name(&self) -> String {
        to_slash(&self.relative.with_extension(""))
    }

    pub fn is_stylesheet(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| STYLESHEET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }
}

/// Entries split by how they are built.
#[derive(Debug, Clone, Default)]
pub struct EntryPlan {
    pub outbase: PathBuf,
    pub modules: Vec<ResolvedEntry>,
    pub statics: Vec<ResolvedEntry>,
}

impl EntryPlan {
    /// Split matched files into bundled modules and copied statics.
    ///
    /// # Errors
    ///
    /// `DuplicateOutput` when two module entries share a chunk name, e.g.
    /// `js/app.ts` next to `js/app.js`.
    pub fn from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        let outbase = lowest_common_ancestor(&paths);
        let mut plan = EntryPlan {
            outbase: outbase.clone(),
            ..Default::default()
        };
        let mut names: FxHashMap<String, PathBuf> = FxHashMap::default();

        for path in paths {
            let relative = path
                .strip_prefix(&outbase)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(path.file_name().unwrap_or_default()));
            let kind = EntryKind::of(&path);
            let entry = ResolvedEntry {
                path,
                relative,
                kind,
            };
            match kind {
                EntryKind::Module => {
                    let name = entry.chunk_name();
                    if let Some(first) = names.get(&name) {
                        return Err(ExtractedDiagnostic::error(
                            DiagnosticKind::DuplicateOutput,
                            format!(
                                "Entries '{}' and '{}' would both be emitted as '{}'",
                                to_slash(first),
                                to_slash(&entry.relative),
                                name
                            ),
                        )
                        .with_file(to_slash(&entry.path))
                        .with_help("Rename one of the files or narrow the entry patterns")
                        .into());
                    }
                    names.insert(name, entry.relative.clone());
                    plan.modules.push(entry);
                }
                EntryKind::Static => plan.statics.push(entry),
            }
        }

        Ok(plan)
    }

    /// Chunk names of stylesheet entries.
    pub fn stylesheet_names(&self) -> FxHashSet<String> {
        self.modules
            .iter()
            .filter(|e| e.is_stylesheet())
            .map(ResolvedEntry::chunk_name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len() + self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entry paths, modules first.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.modules
            .iter()
            .chain(&self.statics)
            .map(|e| e.path.clone())
            .collect()
    }
}

/// Expand entry patterns into absolute file paths.
///
/// Files under `exclude_dir` (normally the output directory) are skipped so a
/// broad pattern never feeds previous output back into the build.
///
/// # Errors
///
/// - `EmptyEntryPatterns` when `patterns` is empty
/// - `InvalidPattern` when a pattern does not parse
/// - `UnresolvedEntry` when a literal path does not name a file
/// - `NoMatchingEntries` when the patterns match nothing at all
pub fn expand_patterns(
    patterns: &[String],
    cwd: &Path,
    exclude_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    if patterns.is_empty() {
        return Err(ExtractedDiagnostic::error(
            DiagnosticKind::EmptyEntryPatterns,
            "No entry patterns were provided",
        )
        .with_help("Declare at least one entry pattern, e.g. \"assets/**/*\"")
        .into());
    }

    let mut seen = FxHashSet::default();
    let mut files = Vec::new();

    for pattern in patterns {
        let matched = expand_one(pattern, cwd, exclude_dir)?;
        if matched.is_empty() {
            warn!(pattern = %pattern, "entry pattern matched no files");
        }
        debug!(pattern = %pattern, count = matched.len(), "expanded entry pattern");

        for path in matched {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(ExtractedDiagnostic::error(
            DiagnosticKind::NoMatchingEntries,
            format!(
                "No files matched the entry patterns [{}] in {}",
                patterns.join(", "),
                cwd.display()
            ),
        )
        .with_help("Check the patterns and the working directory")
        .into());
    }

    Ok(files)
}

fn expand_one(pattern: &str, cwd: &Path, exclude_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !has_glob_meta(pattern) {
        let path = resolve(cwd, Path::new(pattern));
        if !path.is_file() {
            return Err(ExtractedDiagnostic::error(
                DiagnosticKind::UnresolvedEntry,
                format!("Entry point not found: {}", path.display()),
            )
            .with_file(pattern)
            .into());
        }
        return Ok(vec![path]);
    }

    // Only the glob tail is compiled; candidates are matched relative to the
    // walk root, so `./`, `../` and metacharacters in `cwd` never reach globset.
    let (prefix, tail) = split_pattern(pattern);
    let matcher = GlobBuilder::new(&tail)
        .literal_separator(true)
        .build()
        .map_err(|e| {
            Error::from(
                ExtractedDiagnostic::error(
                    DiagnosticKind::InvalidPattern,
                    format!("Invalid entry pattern '{}': {}", pattern, e),
                )
                .with_file(pattern),
            )
        })?
        .compile_matcher();

    let root = resolve(cwd, &prefix);
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut matched = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path during entry expansion");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path().to_path_buf().clean();
        if exclude_dir.is_some_and(|dir| path.starts_with(dir)) {
            continue;
        }

        let candidate = match path.strip_prefix(&root) {
            Ok(rel) => to_slash(rel),
            Err(_) => continue,
        };

        if matcher.is_match(&candidate) {
            matched.push(path);
        }
    }

    Ok(matched)
}

/// Split a pattern into the literal directory to walk from and the glob
/// matched beneath it.
///
/// The prefix stops at the first segment carrying a glob metacharacter and
/// never includes the last segment, which names files.
fn split_pattern(pattern: &str) -> (PathBuf, String) {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .take_while(|segment| !has_glob_meta(segment))
        .count();

    let mut prefix = PathBuf::new();
    for segment in &segments[..literal] {
        if segment.is_empty() {
            prefix.push("/");
        } else {
            prefix.push(segment);
        }
    }

    (prefix, segments[literal..].join("/"))
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Deepest directory containing every path.
///
/// A single file yields its parent directory.
pub fn lowest_common_ancestor(paths: &[PathBuf]) -> PathBuf {
    let mut iter = paths.iter();
    let Some(first) = iter.next() else {
        return PathBuf::new();
    };

    let mut common: Vec<Component<'_>> = first
        .parent()
        .map(|p| p.components().collect())
        .unwrap_or_default();

    for path in iter {
        let dir: Vec<Component<'_>> = path
            .parent()
            .map(|p| p.components().collect())
            .unwrap_or_default();
        let shared = common
            .iter()
            .zip(dir.iter())
            .take_while(|(a, b)| a == b)
            .count();
        common.truncate(shared);
    }

    common.iter().collect()
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
