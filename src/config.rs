// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ReportError, ReportResult};
use crate::report::{DEFAULT_STACK_LINES_COUNT, ReporterOptions};

pub const CONFIG_FILE_NAME: &str = ".testreportrc.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reporter: ReporterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Stack lines shown per error
    #[serde(default = "default_stack_lines_count")]
    pub stack_lines_count: usize,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            stack_lines_count: default_stack_lines_count(),
            color: default_color(),
        }
    }
}

fn default_stack_lines_count() -> usize {
    DEFAULT_STACK_LINES_COUNT
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .testreportrc.toml (current directory)
        // 2. ~/.testreportrc.toml (home directory)

        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }

        for path in &paths {
            if path.exists() {
                return match Self::load_from_file(path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {}", path.display(), e);
                        None
                    }
                };
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ReportResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Write the default configuration to `path`
    pub fn write_default(path: &Path) -> ReportResult<()> {
        std::fs::write(path, Self::default().to_toml())?;
        Ok(())
    }

    pub fn reporter_options(&self) -> ReporterOptions {
        ReporterOptions::new(Some(self.reporter.stack_lines_count))
    }
}
