//! Build command implementation.
//!
//! Implements `kiln build` (and bare `kiln`): one configuration, one call to
//! the build invoker.

use std::time::Instant;

use kiln_bundler::{BuildContext, BuildFacility, BuildInvoker};

use crate::cli::BuildArgs;
use crate::config::KilnConfig;
use crate::error::Result;
use crate::ui;

/// Execute the build command against Rolldown.
///
/// # Build Process
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Hand the resulting build configuration to the invoker, once
/// 3. Display build summary
///
/// # Errors
///
/// Invalid configuration, or any build failure reported by the facility.
pub async fn execute(args: BuildArgs) -> Result<()> {
    execute_with(args, &BuildInvoker::default()).await?;
    Ok(())
}

/// Execute the build command with a specific invoker.
pub async fn execute_with<F: BuildFacility>(
    args: BuildArgs,
    invoker: &BuildInvoker<F>,
) -> Result<BuildContext> {
    let start_time = Instant::now();

    let config = KilnConfig::load(&args)?;
    config.validate()?;

    describe(&config);

    let context = invoker.invoke(config.to_build_config()).await?;

    ui::success(&format!(
        "Built {} entries in {}",
        context.entries().len(),
        ui::format_duration(start_time.elapsed())
    ));
    ui::print_build_summary(&context);

    Ok(context)
}

fn describe(config: &KilnConfig) {
    ui::info(&format!("Entries: {}", config.entry_patterns.join(", ")));
    ui::info(&format!("Output: {}", config.outdir.display()));
    ui::info(&format!(
        "Minify: {}, tree shaking: {}, styles: {}",
        on_off(config.minify),
        on_off(config.tree_shaking),
        on_off(config.styles)
    ));
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
