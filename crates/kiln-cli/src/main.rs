//! Kiln CLI entry point.
//!
//! Parses arguments, sets up logging and colors, then dispatches the command.

use clap::Parser;
use kiln_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    // No subcommand means the default asset build
    let result = match args.command {
        Some(cli::Command::Build(build_args)) => commands::build_execute(build_args).await,
        Some(cli::Command::Schema) => commands::schema_execute(),
        None => commands::build_execute(cli::BuildArgs::default()).await,
    };

    result.map_err(error::cli_error_to_miette)
}
