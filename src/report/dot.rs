// Dot reporter - one glyph per finished test, then the summary

use anyhow::Result;
use async_trait::async_trait;

use super::{Reporter, ReporterContext};
use crate::runner::{RunnerEndNode, TestEndNode};

const LINE_WIDTH: usize = 80;

#[derive(Debug, Default)]
pub struct DotReporter {
    dots_count: usize,
    finished: usize,
}

impl DotReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests seen finishing so far
    pub fn finished(&self) -> usize {
        self.finished
    }
}

#[async_trait]
impl Reporter for DotReporter {
    fn on_test_end(&mut self, ctx: &ReporterContext, node: &TestEndNode) -> Result<()> {
        let colors = ctx.logger().colors();
        let glyph = if node.has_error {
            colors.red("×")
        } else if node.is_todo {
            colors.cyan("-")
        } else if node.is_skipped {
            colors.yellow("~")
        } else {
            colors.green(".")
        };
        ctx.logger().write(glyph);

        self.finished += 1;
        self.dots_count += 1;
        if self.dots_count >= LINE_WIDTH {
            ctx.logger().log("");
            self.dots_count = 0;
        }
        Ok(())
    }

    async fn end(&mut self, ctx: &ReporterContext, _node: &RunnerEndNode) -> Result<()> {
        if self.dots_count > 0 {
            ctx.logger().log("");
            self.dots_count = 0;
        }

        if let Some(runner) = ctx.runner() {
            let summary = runner.get_summary();
            ctx.print_summary(&summary).await?;
        }
        Ok(())
    }
}
