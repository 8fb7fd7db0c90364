//! Kiln CLI - build web assets with Rolldown.
//!
//! The `kiln` binary turns command-line flags, `kiln.config.json` and
//! `KILN_*` environment variables into a single [`kiln_bundler::BuildConfig`]
//! and hands it to the build invoker.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - layered configuration loading and validation
//! - [`commands`] - command implementations
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and build summary
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln_cli::{cli::BuildArgs, commands};
//!
//! # #[tokio::main]
//! # async fn main() -> kiln_cli::Result<()> {
//! commands::build_execute(BuildArgs::default()).await?;
//! # Ok(()) }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
