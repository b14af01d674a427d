// Lifecycle events emitted by the test runner

use serde::{Deserialize, Serialize};

use super::summary::{CapturedError, ErrorEntry};
use crate::error::{ReportError, ReportResult};

/// Test title before and after dataset interpolation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub original: String,
    pub expanded: String,
}

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            original: title.clone(),
            expanded: title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMeta {
    pub file_name: Option<String>,
}

impl NodeMeta {
    pub fn file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStartNode {
    pub title: Title,
    #[serde(default)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub is_todo: bool,
    #[serde(default)]
    pub is_skipped: bool,
    #[serde(default)]
    pub is_failing: bool,
}

impl TestStartNode {
    pub fn new(title: impl Into<String>, meta: NodeMeta) -> Self {
        Self {
            title: Title::new(title),
            meta,
            is_todo: false,
            is_skipped: false,
            is_failing: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEndNode {
    pub title: Title,
    #[serde(default)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub is_todo: bool,
    #[serde(default)]
    pub is_skipped: bool,
    #[serde(default)]
    pub is_failing: bool,
    #[serde(default)]
    pub has_error: bool,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    /// Milliseconds spent running the test
    #[serde(default)]
    pub duration: f64,
}

impl TestEndNode {
    /// End node for a test that started with `start`
    pub fn from_start(start: &TestStartNode, errors: Vec<ErrorEntry>, duration: f64) -> Self {
        Self {
            title: start.title.clone(),
            meta: start.meta.clone(),
            is_todo: start.is_todo,
            is_skipped: start.is_skipped,
            is_failing: start.is_failing,
            has_error: !errors.is_empty(),
            errors,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStartNode {
    pub title: String,
    #[serde(default)]
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEndNode {
    pub title: String,
    #[serde(default)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub has_error: bool,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteStartNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteEndNode {
    pub name: String,
    #[serde(default)]
    pub has_error: bool,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunnerStartNode {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunnerEndNode {
    #[serde(default)]
    pub has_error: bool,
}

/// Channel names an emitter dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    TestStart,
    TestEnd,
    GroupStart,
    GroupEnd,
    SuiteStart,
    SuiteEnd,
    UncaughtException,
    RunnerStart,
    RunnerEnd,
}

impl EventName {
    pub const ALL: [EventName; 9] = [
        Self::TestStart,
        Self::TestEnd,
        Self::GroupStart,
        Self::GroupEnd,
        Self::SuiteStart,
        Self::SuiteEnd,
        Self::UncaughtException,
        Self::RunnerStart,
        Self::RunnerEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestStart => "test:start",
            Self::TestEnd => "test:end",
            Self::GroupStart => "group:start",
            Self::GroupEnd => "group:end",
            Self::SuiteStart => "suite:start",
            Self::SuiteEnd => "suite:end",
            Self::UncaughtException => "uncaught:exception",
            Self::RunnerStart => "runner:start",
            Self::RunnerEnd => "runner:end",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lifecycle event with its payload.
///
/// The serialized form is one JSON object per event:
/// `{"event": "test:start", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum RunnerEvent {
    #[serde(rename = "test:start")]
    TestStart(TestStartNode),
    #[serde(rename = "test:end")]
    TestEnd(TestEndNode),
    #[serde(rename = "group:start")]
    GroupStart(GroupStartNode),
    #[serde(rename = "group:end")]
    GroupEnd(GroupEndNode),
    #[serde(rename = "suite:start")]
    SuiteStart(SuiteStartNode),
    #[serde(rename = "suite:end")]
    SuiteEnd(SuiteEndNode),
    #[serde(rename = "uncaught:exception")]
    UncaughtException(CapturedError),
    #[serde(rename = "runner:start")]
    RunnerStart(RunnerStartNode),
    #[serde(rename = "runner:end")]
    RunnerEnd(RunnerEndNode),
}

impl RunnerEvent {
    pub fn name(&self) -> EventName {
        match self {
            Self::TestStart(_) => EventName::TestStart,
            Self::TestEnd(_) => EventName::TestEnd,
            Self::GroupStart(_) => EventName::GroupStart,
            Self::GroupEnd(_) => EventName::GroupEnd,
            Self::SuiteStart(_) => EventName::SuiteStart,
            Self::SuiteEnd(_) => EventName::SuiteEnd,
            Self::UncaughtException(_) => EventName::UncaughtException,
            Self::RunnerStart(_) => EventName::RunnerStart,
            Self::RunnerEnd(_) => EventName::RunnerEnd,
        }
    }

    /// Decode one line of an event log. `line` is 1-based and only used for errors.
    pub fn from_json_line(line: usize, content: &str) -> ReportResult<Self> {
        serde_json::from_str(content).map_err(|source| ReportError::Event { line, source })
    }
}

/// Decode a newline-delimited event log.
///
/// Blank lines are ignored. Malformed lines are logged and skipped so a
/// truncated log still replays what it can.
pub fn parse_event_log(content: &str) -> Vec<RunnerEvent> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match RunnerEvent::from_json_line(index + 1, line) {
            Ok(event) => events.push(event),
            Err(e) => tracing::warn!("Skipping event: {}", e),
        }
    }
    events
}
