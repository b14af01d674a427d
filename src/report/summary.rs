// Summary reporter - prints only the end-of-run summary

use anyhow::Result;
use async_trait::async_trait;

use super::{Reporter, ReporterContext};
use crate::runner::RunnerEndNode;

#[derive(Debug, Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reporter for SummaryReporter {
    async fn end(&mut self, ctx: &ReporterContext, _node: &RunnerEndNode) -> Result<()> {
        if let Some(runner) = ctx.runner() {
            let summary = runner.get_summary();
            ctx.print_summary(&summary).await?;
        }
        Ok(())
    }
}
