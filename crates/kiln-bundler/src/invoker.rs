//! The build invoker.
//!
//! [`BuildInvoker::invoke`] is the single suspension point of a build: it hands
//! the configuration to the facility and waits. Failures come back exactly as
//! the facility reported them; there is no retry and no partial result.

use tracing::{error, info};

use crate::facility::{BuildFacility, RolldownFacility};
use crate::{BuildConfig, BuildContext, Result};

/// Hands a [`BuildConfig`] to a [`BuildFacility`].
#[derive(Debug, Clone)]
pub struct BuildInvoker<F = RolldownFacility> {
    facility: F,
}

impl<F: BuildFacility> BuildInvoker<F> {
    pub fn new(facility: F) -> Self {
        Self { facility }
    }

    pub fn facility(&self) -> &F {
        &self.facility
    }

    /// Run the build and wait for it.
    ///
    /// The config is moved into the facility unchanged.
    pub async fn invoke(&self, config: BuildConfig) -> Result<BuildContext> {
        info!(
            patterns = ?config.entry_patterns(),
            outdir = %config.output_dir().display(),
            minify = config.is_minify(),
            tree_shaking = config.is_tree_shaking(),
            plugins = ?config.plugin_names(),
            "invoking build"
        );

        match self.facility.build(config).await {
            Ok(context) => {
                info!(
                    outputs = context.outputs().len(),
                    elapsed_ms = context.duration().as_millis() as u64,
                    "build finished"
                );
                Ok(context)
            }
            Err(err) => {
                error!(error = %err, "build failed");
                Err(err)
            }
        }
    }
}

impl Default for BuildInvoker<RolldownFacility> {
    fn default() -> Self {
        Self::new(RolldownFacility::new())
    }
}

/// Build with the default Rolldown facility.
///
/// # Examples
///
/// ```no_run
/// use kiln_bundler::{build, BuildConfig};
///
/// # async fn example() -> kiln_bundler::Result<()> {
/// let context = build(BuildConfig::new(["assets/**/*"]).outdir("public")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn build(config: BuildConfig) -> Result<BuildContext> {
    BuildInvoker::default().invoke(config).await
}
