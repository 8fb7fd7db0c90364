use crate::config::KilnConfig;
use crate::error::ConfigError;

impl KilnConfig {
    /// Reject values no build could use.
    ///
    /// An empty pattern list is left to the build facility, which reports
    /// it as a build failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(pattern) = self.entry_patterns.iter().find(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "entryPatterns".to_string(),
                value: format!("{:?}", pattern),
                hint: "Remove blank patterns, e.g. use [\"assets/**/*\"]".to_string(),
            });
        }

        if self.outdir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "outdir".to_string(),
                hint: "Set an output directory, e.g. \"public\"".to_string(),
            });
        }

        if let Some(cwd) = &self.cwd {
            if !cwd.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "cwd".to_string(),
                    value: cwd.display().to_string(),
                    hint: "The working directory must exist".to_string(),
                });
            }
        }

        Ok(())
    }
}
