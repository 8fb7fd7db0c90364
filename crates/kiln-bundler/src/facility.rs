//! Build facilities.
//!
//! A [`BuildFacility`] takes a [`BuildConfig`] and produces a [`BuildContext`]
//! or fails. Kiln never looks behind this seam; [`RolldownFacility`] is the
//! implementation used by default.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use path_clean::PathClean;
use rolldown::{BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, InputItem, RawMinifyOptions};
use rolldown_common::TreeshakeOptions;
use rolldown_plugin::__inner::SharedPluginable;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::entries::{self, EntryPlan};
use crate::output::{BuildContext, OutputFile, writer};
use crate::plugin::PluginHandle;
use crate::{BuildConfig, DiagnosticKind, Error, Result};

/// Something that can carry out a build.
#[async_trait]
pub trait BuildFacility: Send + Sync {
    /// Run one build to completion.
    ///
    /// # Errors
    ///
    /// Every failure is an [`Error::BuildFailure`].
    async fn build(&self, config: BuildConfig) -> Result<BuildContext>;
}

#[async_trait]
impl<F> BuildFacility for std::sync::Arc<F>
where
    F: BuildFacility + ?Sized,
{
    async fn build(&self, config: BuildConfig) -> Result<BuildContext> {
        (**self).build(config).await
    }
}

/// Build facility backed by Rolldown.
///
/// # Build Process
///
/// 1. Expand the entry patterns (output directory excluded)
/// 2. Create the output directory and check that it is writable
/// 3. Bundle module entries with Rolldown, plugins in configured order
/// 4. Read every other matched file for a verbatim copy
/// 5. Write everything in two phases, mirroring paths below the outbase
#[derive(Debug, Clone, Default)]
pub struct RolldownFacility;

impl RolldownFacility {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BuildFacility for RolldownFacility {
    async fn build(&self, config: BuildConfig) -> Result<BuildContext> {
        let started = Instant::now();

        let cwd = match config.working_dir() {
            Some(dir) => absolutize(dir)?,
            None => current_dir()?,
        };
        let outdir = cwd.join(config.output_dir()).clean();

        let paths = entries::expand_patterns(config.entry_patterns(), &cwd, Some(&outdir))?;
        let outdir = writer::prepare_output_dir(&outdir)?;
        let plan = EntryPlan::from_paths(paths)?;

        info!(
            entries = plan.len(),
            modules = plan.modules.len(),
            statics = plan.statics.len(),
            outbase = %plan.outbase.display(),
            "resolved entry points"
        );

        let minify = config.is_minify();
        let tree_shaking = config.is_tree_shaking();
        let plugins = config.into_plugins();

        let mut files = Vec::new();
        if !plan.modules.is_empty() {
            let options = bundler_options(&plan, &cwd, minify, tree_shaking);
            files.extend(bundle(options, plugins, &plan.stylesheet_names()).await?);
        } else if !plugins.is_empty() {
            debug!("no module entries; plugins not invoked");
        }
        files.extend(writer::files_from_statics(&plan.statics)?);

        let outputs = writer::write_outputs(&outdir, &files)?;

        Ok(BuildContext::new(
            outdir,
            plan.paths(),
            outputs,
            started.elapsed(),
        ))
    }
}

/// Configure Rolldown from the resolved entry plan.
///
/// `minify` and `tree_shaking` are forwarded as plain booleans.
pub(crate) fn bundler_options(
    plan: &EntryPlan,
    cwd: &Path,
    minify: bool,
    tree_shaking: bool,
) -> BundlerOptions {
    BundlerOptions {
        input: Some(
            plan.modules
                .iter()
                .map(|entry| InputItem {
                    name: Some(entry.chunk_name()),
                    import: entry.path.to_string_lossy().into_owned(),
                })
                .collect(),
        ),
        cwd: Some(cwd.to_path_buf()),
        minify: Some(RawMinifyOptions::from(minify)),
        treeshake: TreeshakeOptions::Boolean(tree_shaking),
        ..Default::default()
    }
}

async fn bundle(
    options: BundlerOptions,
    plugins: Vec<PluginHandle>,
    stylesheet_entries: &FxHashSet<String>,
) -> Result<Vec<OutputFile>> {
    let plugins: Vec<SharedPluginable> = plugins
        .into_iter()
        .map(PluginHandle::into_pluginable)
        .collect();

    let mut bundler = RolldownBundlerBuilder::default()
        .with_options(options)
        .with_plugins(plugins)
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let output = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    Ok(writer::files_from_bundle(&output, stylesheet_entries))
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        Error::failure(
            DiagnosticKind::Other("WorkingDirectory".to_string()),
            format!("Failed to get current directory: {}", e),
        )
    })
}

fn absolutize(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf().clean())
    } else {
        Ok(current_dir()?.join(dir).clean())
    }
}
