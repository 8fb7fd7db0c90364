use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a finished build hands back.
///
/// Callers are free to ignore it. It holds no open resources, so dropping it
/// is all the cleanup a build needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    outdir: PathBuf,
    entries: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    duration: Duration,
}

impl BuildContext {
    pub fn new(
        outdir: impl Into<PathBuf>,
        entries: Vec<PathBuf>,
        outputs: Vec<PathBuf>,
        duration: Duration,
    ) -> Self {
        Self {
            outdir: outdir.into(),
            entries,
            outputs,
            duration,
        }
    }

    /// Resolved output directory.
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Entry files that were built, modules first.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Files written into the output directory.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Total size of the written files, skipping any that vanished since.
    pub fn total_output_bytes(&self) -> u64 {
        self.outputs
            .iter()
            .filter_map(|p| std::fs::metadata(p).ok())
            .map(|m| m.len())
            .sum()
    }
}
