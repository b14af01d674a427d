// Runner module - the runner-side contract a reporter consumes
// Events, the run summary, and the emitter they flow through

pub mod emitter;
pub mod events;
pub mod summary;

pub use emitter::Emitter;
pub use events::{
    EventName, GroupEndNode, GroupStartNode, NodeMeta, RunnerEndNode, RunnerEvent,
    RunnerStartNode, SuiteEndNode, SuiteStartNode, TestEndNode, TestStartNode, Title,
    parse_event_log,
};
pub use summary::{
    Aggregates, CapturedError, ErrorEntry, FailureTreeChild, FailureTreeGroup, FailureTreeSuite,
    FailureTreeTest, Phase, Summary,
};

/// The test runner as seen by a reporter
pub trait Runner: Send + Sync {
    /// Current summary of the run
    fn get_summary(&self) -> Summary;
}

/// Runner that always reports the same summary.
///
/// Used when replaying a recorded run.
#[derive(Debug, Clone, Default)]
pub struct StaticRunner {
    summary: Summary,
}

impl StaticRunner {
    pub fn new(summary: Summary) -> Self {
        Self { summary }
    }
}

impl Runner for StaticRunner {
    fn get_summary(&self) -> Summary {
        self.summary.clone()
    }
}
