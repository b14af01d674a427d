// Error printer - renders the errors attached to a failure tree node

use anyhow::Result;
use async_trait::async_trait;

use super::console::Logger;
use crate::runner::{ErrorEntry, Phase};

/// Renders a labelled list of errors
#[async_trait]
pub trait ErrorsPrinter: Send + Sync {
    async fn print_errors(&self, label: &str, errors: &[ErrorEntry]) -> Result<()>;
}

/// Default printer writing to a `Logger`
#[derive(Debug, Clone)]
pub struct ConsoleErrorsPrinter {
    stack_lines_count: usize,
    logger: Logger,
}

impl ConsoleErrorsPrinter {
    pub fn new(stack_lines_count: usize, logger: Logger) -> Self {
        Self {
            stack_lines_count,
            logger,
        }
    }

    fn print_entry(&self, label: &str, entry: &ErrorEntry) {
        let colors = self.logger.colors();

        let heading = if entry.phase == Phase::Test {
            format!("✖ {}", label)
        } else {
            format!("✖ {} [{}]", label, entry.phase.as_str())
        };
        self.logger.log(colors.red(heading));
        self.logger.log(format!(
            "  {}: {}",
            entry.error.name, entry.error.message
        ));

        if let Some(stack) = &entry.error.stack {
            for line in stack
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .take(self.stack_lines_count)
            {
                self.logger.log(colors.dim(format!("    {}", line)));
            }
        }
        self.logger.log("");
    }
}

#[async_trait]
impl ErrorsPrinter for ConsoleErrorsPrinter {
    async fn print_errors(&self, label: &str, errors: &[ErrorEntry]) -> Result<()> {
        for entry in errors {
            self.print_entry(label, entry);
        }
        Ok(())
    }
}
