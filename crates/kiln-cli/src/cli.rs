//! Command-line interface definition for kiln.
//!
//! - `kiln` / `kiln build` - build the configured assets
//! - `kiln schema` - print the JSON schema of `kiln.config.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Kiln - build web assets with Rolldown
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Build web assets with Rolldown",
    long_about = "Kiln expands entry-point globs, bundles scripts and stylesheets with Rolldown\n\
                  and copies every other matched file into the output directory.\n\
                  Running `kiln` without a subcommand performs the default build."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute (defaults to `build`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build assets into the output directory
    Build(BuildArgs),

    /// Print the JSON schema for kiln.config.json
    Schema,
}

/// Arguments for `kiln build`.
///
/// Every field is optional; anything left unset falls back to the config
/// file, then `KILN_*` environment variables, then the built-in defaults.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    /// Entry-point glob patterns (e.g. "assets/**/*")
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Disable minification
    #[arg(long)]
    pub no_minify: bool,

    /// Keep unused code
    #[arg(long)]
    pub no_tree_shaking: bool,

    /// Do not register the styles plugin
    #[arg(long)]
    pub no_styles: bool,

    /// Directory patterns and the output directory are resolved against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to a config file (defaults to ./kiln.config.json when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["kiln"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "kiln",
            "build",
            "assets/**/*.css",
            "assets/js/*.js",
            "-o",
            "public",
            "--no-minify",
            "--no-styles",
        ])
        .unwrap();

        let Some(Command::Build(args)) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.patterns, vec!["assets/**/*.css", "assets/js/*.js"]);
        assert_eq!(args.outdir, Some(PathBuf::from("public")));
        assert!(args.no_minify);
        assert!(!args.no_tree_shaking);
        assert!(args.no_styles);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["kiln", "build", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kiln", "-v", "-q"]).is_err());
    }
}
