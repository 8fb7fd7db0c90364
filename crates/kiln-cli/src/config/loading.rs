use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;

use crate::cli::BuildArgs;
use crate::config::{CONFIG_FILE_NAME, ENV_PREFIX, KilnConfig};
use crate::error::ConfigError;

/// Environment keys, after the prefix and underscores are stripped.
const ENV_KEYS: &[&str] = &[
    "entrypatterns",
    "outdir",
    "minify",
    "treeshaking",
    "styles",
    "cwd",
];

/// Values set on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outdir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree_shaking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    styles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
}

impl From<&BuildArgs> for CliOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            entry_patterns: (!args.patterns.is_empty()).then(|| args.patterns.clone()),
            outdir: args.outdir.clone(),
            minify: args.no_minify.then_some(false),
            tree_shaking: args.no_tree_shaking.then_some(false),
            styles: args.no_styles.then_some(false),
            cwd: args.cwd.clone(),
        }
    }
}

impl KilnConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(args: &BuildArgs) -> Result<Self, ConfigError> {
        Ok(Self::figment(args)?.extract()?)
    }

    /// The layered sources, before extraction.
    pub fn figment(args: &BuildArgs) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = config_file(args)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // KILN_TREE_SHAKING and KILN_TREESHAKING both land on treeShaking
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| key.as_str().replace('_', "").into())
                .only(ENV_KEYS),
        );

        Ok(figment.merge(Serialized::defaults(CliOverrides::from(args))))
    }
}

/// The config file to read: `--config` if given (it must exist), otherwise
/// kiln.config.json in the working directory when present.
fn config_file(args: &BuildArgs) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = &args.config {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.clone()));
        }
        return Ok(Some(path.clone()));
    }

    let base = args.cwd.as_deref().unwrap_or(Path::new("."));
    let default_path = base.join(CONFIG_FILE_NAME);
    Ok(default_path.is_file().then_some(default_path))
}
