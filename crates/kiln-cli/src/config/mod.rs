//! Configuration for the kiln CLI with multi-source loading.
//!
//! Merges settings from CLI args, `KILN_*` environment variables, and
//! `kiln.config.json`. Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod tests;
mod validation;

use std::path::PathBuf;

use kiln_bundler::BuildConfig;
use kiln_plugin_styles::styles_plugin;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use defaults::*;

/// Kiln configuration, loaded from kiln.config.json, the environment or CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KilnConfig {
    /// Entry-point glob patterns, in order (e.g. ["assets/**/*"])
    #[serde(alias = "entrypatterns")]
    pub entry_patterns: Vec<String>,

    /// Output directory
    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,

    /// Minify generated code
    #[serde(default = "default_true")]
    pub minify: bool,

    /// Remove unused code
    #[serde(default = "default_true", alias = "treeshaking")]
    pub tree_shaking: bool,

    /// Register the styles plugin
    #[serde(default = "default_true")]
    pub styles: bool,

    /// Directory patterns and the output directory are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl KilnConfig {
    /// The build kiln runs when nothing is configured.
    pub fn default_config() -> Self {
        Self {
            entry_patterns: default_entry_patterns(),
            outdir: default_outdir(),
            minify: true,
            tree_shaking: true,
            styles: true,
            cwd: None,
        }
    }

    /// Turn this configuration into the value handed to the build invoker.
    pub fn to_build_config(&self) -> BuildConfig {
        let mut config = BuildConfig::new(self.entry_patterns.iter().cloned())
            .outdir(&self.outdir)
            .minify(self.minify)
            .tree_shaking(self.tree_shaking);

        if self.styles {
            config = config.plugin(styles_plugin());
        }
        if let Some(cwd) = &self.cwd {
            config = config.cwd(cwd);
        }

        config
    }

    /// JSON schema for kiln.config.json.
    pub fn json_schema() -> serde_json::Value {
        // Serializing a schema is infallible
        serde_json::to_value(schemars::schema_for!(KilnConfig)).unwrap_or_default()
    }
}
