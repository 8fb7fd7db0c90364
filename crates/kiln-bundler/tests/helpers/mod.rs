//! Shared test utilities for kiln-bundler tests.

#![allow(dead_code)]

use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use kiln_bundler::{
    BuildConfig, BuildContext, BuildFacility, DiagnosticKind, Error, HookUsage, Plugin, Result,
};
use parking_lot::Mutex;

/// Plugin that only has a name.
#[derive(Debug)]
pub struct NamedPlugin(pub &'static str);

impl Plugin for NamedPlugin {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.0)
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::empty()
    }
}

/// What a facility was asked to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub patterns: Vec<String>,
    pub outdir: PathBuf,
    pub minify: bool,
    pub tree_shaking: bool,
    pub plugins: Vec<String>,
}

/// Facility that records each call instead of building.
#[derive(Default)]
pub struct RecordingFacility {
    calls: Mutex<Vec<RecordedCall>>,
    fail_with: Option<DiagnosticKind>,
}

impl RecordingFacility {
    pub fn failing(kind: DiagnosticKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// The only recorded call; panics unless exactly one happened.
    pub fn single_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one build call");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl BuildFacility for RecordingFacility {
    async fn build(&self, config: BuildConfig) -> Result<BuildContext> {
        self.calls.lock().push(RecordedCall {
            patterns: config.entry_patterns().to_vec(),
            outdir: config.output_dir().to_path_buf(),
            minify: config.is_minify(),
            tree_shaking: config.is_tree_shaking(),
            plugins: config.plugin_names().into_iter().map(String::from).collect(),
        });

        if let Some(kind) = &self.fail_with {
            return Err(Error::failure(kind.clone(), "recorded failure"));
        }

        Ok(BuildContext::new(
            config.output_dir(),
            Vec::new(),
            Vec::new(),
            Duration::ZERO,
        ))
    }
}
