#[cfg(test)]
mod tests {
    use crate::cli::BuildArgs;
    use crate::config::*;
    use crate::error::ConfigError;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args_in(dir: &TempDir) -> BuildArgs {
        BuildArgs {
            cwd: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_serialization() {
        let config = KilnConfig::default_config();
        let json_val = serde_json::to_value(&config).unwrap();

        // camelCase field names
        assert_eq!(json_val["entryPatterns"], serde_json::json!(["assets/**/*"]));
        assert_eq!(json_val["treeShaking"], serde_json::json!(true));
        assert!(json_val.get("tree_shaking").is_none());

        // skip_serializing_if
        assert!(json_val.get("cwd").is_none());

        let back: KilnConfig = serde_json::from_value(json_val).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<KilnConfig, _> =
            serde_json::from_str(r#"{ "entryPatterns": ["a/*"], "outDir": "dist" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_defaults() {
        let config: KilnConfig = serde_json::from_str(r#"{ "entryPatterns": ["a/*"] }"#).unwrap();
        assert_eq!(config.outdir, PathBuf::from("public"));
        assert!(config.minify);
        assert!(config.tree_shaking);
        assert!(config.styles);
    }

    #[test]
    fn test_default_build_config() {
        let build = KilnConfig::default_config().to_build_config();
        assert_eq!(build.entry_patterns(), ["assets/**/*"]);
        assert_eq!(build.output_dir(), PathBuf::from("public"));
        assert!(build.is_minify());
        assert!(build.is_tree_shaking());
        assert_eq!(build.plugin_names(), vec!["kiln-styles"]);
    }

    #[test]
    fn test_styles_disabled_registers_no_plugins() {
        let config = KilnConfig {
            styles: false,
            ..KilnConfig::default_config()
        };
        assert!(config.to_build_config().plugin_names().is_empty());
    }

    #[test]
    fn test_validation() {
        assert!(KilnConfig::default_config().validate().is_ok());

        // Blank pattern fails
        assert!(matches!(
            KilnConfig {
                entry_patterns: vec!["assets/*".into(), "  ".into()],
                ..KilnConfig::default_config()
            }
            .validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        // Empty outdir fails
        assert!(matches!(
            KilnConfig {
                outdir: PathBuf::new(),
                ..KilnConfig::default_config()
            }
            .validate(),
            Err(ConfigError::MissingField { .. })
        ));

        // Missing cwd fails
        assert!(KilnConfig {
            cwd: Some(PathBuf::from("/definitely/not/here")),
            ..KilnConfig::default_config()
        }
        .validate()
        .is_err());

        // Empty pattern list is left to the build
        assert!(KilnConfig {
            entry_patterns: vec![],
            ..KilnConfig::default_config()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_json_schema_names_fields() {
        let schema = KilnConfig::json_schema();
        let properties = &schema["properties"];
        assert!(properties.get("entryPatterns").is_some());
        assert!(properties.get("treeShaking").is_some());
        assert!(properties.get("outdir").is_some());
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = KilnConfig::load(&args_in(&temp)).unwrap();

        assert_eq!(config.entry_patterns, vec!["assets/**/*"]);
        assert_eq!(config.outdir, PathBuf::from("public"));
        assert!(config.minify && config.tree_shaking && config.styles);
        assert_eq!(config.cwd.as_deref(), Some(temp.path()));
    }

    #[test]
    #[serial]
    fn test_load_config_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "entryPatterns": ["src/**/*.css"], "outdir": "dist", "treeShaking": false }"#,
        )
        .unwrap();

        let config = KilnConfig::load(&args_in(&temp)).unwrap();

        assert_eq!(config.entry_patterns, vec!["src/**/*.css"]);
        assert_eq!(config.outdir, PathBuf::from("dist"));
        assert!(!config.tree_shaking);
        assert!(config.minify);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "entryPatterns": ["src/**/*.css"], "outdir": "dist" }"#,
        )
        .unwrap();

        let args = BuildArgs {
            patterns: vec!["web/*.js".into()],
            outdir: Some(PathBuf::from("out")),
            no_minify: true,
            no_styles: true,
            ..args_in(&temp)
        };
        let config = KilnConfig::load(&args).unwrap();

        assert_eq!(config.entry_patterns, vec!["web/*.js"]);
        assert_eq!(config.outdir, PathBuf::from("out"));
        assert!(!config.minify);
        assert!(!config.styles);
        assert!(config.tree_shaking);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_but_not_cli() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "entryPatterns": ["a/*"], "outdir": "dist", "minify": true }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var("KILN_OUTDIR", "from-env");
            std::env::set_var("KILN_TREE_SHAKING", "false");
            std::env::set_var("KILN_UNRELATED", "ignored");
        }

        let from_env = KilnConfig::load(&args_in(&temp));
        let from_cli = KilnConfig::load(&BuildArgs {
            outdir: Some(PathBuf::from("from-cli")),
            ..args_in(&temp)
        });

        unsafe {
            std::env::remove_var("KILN_OUTDIR");
            std::env::remove_var("KILN_TREE_SHAKING");
            std::env::remove_var("KILN_UNRELATED");
        }

        let from_env = from_env.unwrap();
        assert_eq!(from_env.outdir, PathBuf::from("from-env"));
        assert!(!from_env.tree_shaking);
        assert_eq!(from_cli.unwrap().outdir, PathBuf::from("from-cli"));
    }

    #[test]
    #[serial]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let args = BuildArgs {
            config: Some(temp.path().join("missing.json")),
            ..args_in(&temp)
        };

        assert!(matches!(
            KilnConfig::load(&args),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    #[serial]
    fn test_invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "entryPatterns": "not-a-list" }"#,
        )
        .unwrap();

        assert!(matches!(
            KilnConfig::load(&args_in(&temp)),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
