// Commands module - handles CLI command execution

use anyhow::{Context, Result};
use std::path::Path;

pub mod report;

pub use report::handle_report;

use crate::config::Config;

/// Write the default configuration file
pub fn handle_init_config(path: &Path) -> Result<()> {
    Config::write_default(path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    println!("Created configuration file: {}", path.display());
    Ok(())
}
