//! Command implementations for the kiln CLI.
//!
//! - [`build`] - build assets into the output directory
//! - [`schema`] - print the config file schema

pub mod build;
pub mod schema;

pub use build::execute as build_execute;
pub use schema::execute as schema_execute;
