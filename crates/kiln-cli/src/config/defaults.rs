use std::path::PathBuf;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "kiln.config.json";

/// Prefix for environment overrides (`KILN_OUTDIR`, `KILN_MINIFY`, ...).
pub const ENV_PREFIX: &str = "KILN_";

pub fn default_entry_patterns() -> Vec<String> {
    vec!["assets/**/*".to_string()]
}

pub fn default_outdir() -> PathBuf {
    PathBuf::from("public")
}

pub fn default_true() -> bool {
    true
}
