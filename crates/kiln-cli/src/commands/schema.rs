//! `kiln schema`: print the JSON schema for kiln.config.json to stdout.

use crate::config::KilnConfig;
use crate::error::Result;

pub fn execute() -> Result<()> {
    let schema = serde_json::to_string_pretty(&KilnConfig::json_schema())?;
    println!("{}", schema);
    Ok(())
}
