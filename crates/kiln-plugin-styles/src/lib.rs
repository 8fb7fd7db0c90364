//! Styling pre-processor plugin for kiln.
//!
//! Hooks Rolldown's `load` step for stylesheet modules. `.scss` and `.sass`
//! sources are compiled with grass first; every stylesheet then runs through
//! lightningcss. Authors can write nested rules and `@custom-media`; the
//! plugin lowers both for the configured browsers and minifies the result.
//!
//! ```text
//! .scss/.sass → grass ─┐
//! .css ────────────────┴→ parse (nesting, custom media) → lower → minify → CSS module
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use kiln_bundler::BuildConfig;
//! use kiln_plugin_styles::styles_plugin;
//!
//! let config = BuildConfig::new(["assets/**/*"])
//!     .outdir("public")
//!     .plugin(styles_plugin());
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kiln_bundler::PluginHandle;
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserFlags, ParserOptions, StyleSheet},
};
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, HookUsage, Plugin, PluginContext};
use tracing::debug;

mod options;
pub use options::StylesPluginOptions;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "kiln-styles";

/// Create the styling plugin with default options.
pub fn styles_plugin() -> PluginHandle {
    PluginHandle::new(StylesPlugin::new())
}

/// Create the styling plugin with custom options.
pub fn styles_plugin_with(options: StylesPluginOptions) -> PluginHandle {
    PluginHandle::new(StylesPlugin::with_options(options))
}

/// Rolldown plugin that pre-processes stylesheets with lightningcss.
#[derive(Debug, Clone, Default)]
pub struct StylesPlugin {
    options: StylesPluginOptions,
}

impl StylesPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StylesPluginOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StylesPluginOptions {
        &self.options
    }

    /// Compile a stylesheet of any supported syntax to processed CSS.
    ///
    /// `@use` and `@import` in Sass sources resolve relative to the file's
    /// directory.
    pub fn compile(&self, path: &Path, source: &str) -> anyhow::Result<String> {
        match StyleSyntax::of(path) {
            Some(StyleSyntax::Css) => self.process(path, source),
            Some(syntax @ (StyleSyntax::Scss | StyleSyntax::Sass)) => {
                let css = compile_sass(path, source, syntax)?;
                self.process(path, &css)
            }
            None => anyhow::bail!("Not a stylesheet: {}", path.display()),
        }
    }

    /// Parse, lower and print one stylesheet.
    pub fn process(&self, path: &Path, source: &str) -> anyhow::Result<String> {
        let filename = path.to_string_lossy().to_string();
        let mut stylesheet = StyleSheet::parse(
            source,
            ParserOptions {
                filename: filename.clone(),
                flags: ParserFlags::NESTING | ParserFlags::CUSTOM_MEDIA,
                ..Default::default()
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to parse CSS from {}: {}", filename, e))?;

        let targets = self.options.targets();

        // Resolves custom media and merges rules; printing below does the rest.
        stylesheet
            .minify(MinifyOptions {
                targets,
                ..Default::default()
            })
            .map_err(|e| anyhow::anyhow!("Failed to transform CSS from {}: {}", filename, e))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: self.options.minify,
                targets,
                ..Default::default()
            })
            .map_err(|e| anyhow::anyhow!("Failed to print CSS from {}: {}", filename, e))?;

        Ok(result.code)
    }
}

/// Source syntaxes the plugin loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleSyntax {
    Css,
    Scss,
    Sass,
}

impl StyleSyntax {
    fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "css" => Some(Self::Css),
            "scss" => Some(Self::Scss),
            "sass" => Some(Self::Sass),
            _ => None,
        }
    }
}

fn compile_sass(path: &Path, source: &str, syntax: StyleSyntax) -> anyhow::Result<String> {
    let input_syntax = match syntax {
        StyleSyntax::Sass => grass::InputSyntax::Sass,
        _ => grass::InputSyntax::Scss,
    };
    let dir: PathBuf = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let options = grass::Options::default()
        .input_syntax(input_syntax)
        .load_path(&dir);

    grass::from_string(source.to_string(), &options)
        .map_err(|e| anyhow::anyhow!("Failed to compile Sass from {}: {}", path.display(), e))
}

impl Plugin for StylesPlugin {
    fn name(&self) -> Cow<'static, str> {
        PLUGIN_NAME.into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let plugin = self.clone();

        async move {
            let path = Path::new(&id);
            if StyleSyntax::of(path).is_none() || !plugin.options.should_process(&id) {
                return Ok(None);
            }

            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read stylesheet: {}", id))?;
            let processed = plugin.compile(path, &source)?;

            debug!(
                file = %id,
                before = source.len(),
                after = processed.len(),
                minify = plugin.options.minify,
                "processed stylesheet"
            );

            Ok(Some(HookLoadOutput {
                code: processed.into(),
                module_type: Some(ModuleType::Css),
                ..Default::default()
            }))
        }
    }
}
