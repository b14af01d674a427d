// Run summary as reported by the test runner

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Phase of the test lifecycle an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    #[serde(rename = "test")]
    Test,
    #[serde(rename = "setup")]
    Setup,
    #[serde(rename = "setup:cleanup")]
    SetupCleanup,
    #[serde(rename = "teardown")]
    Teardown,
    #[serde(rename = "teardown:cleanup")]
    TeardownCleanup,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Setup => "setup",
            Self::SetupCleanup => "setup:cleanup",
            Self::Teardown => "teardown",
            Self::TeardownCleanup => "teardown:cleanup",
        }
    }
}

/// An error captured by the runner. The reporter never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedError {
    #[serde(default = "default_error_name")]
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

fn default_error_name() -> String {
    String::from("Error")
}

impl CapturedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: default_error_name(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Error entry attached to a failure tree node or an uncaught exception
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub phase: Phase,
    pub error: CapturedError,
}

impl ErrorEntry {
    pub fn new(phase: Phase, error: CapturedError) -> Self {
        Self { phase, error }
    }
}

/// Per-category counts for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Aggregates {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub todo: usize,
    pub skipped: usize,
    pub regression: usize,
    pub uncaught_exceptions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTreeTest {
    pub title: String,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTreeGroup {
    pub name: String,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(default)]
    pub children: Vec<FailureTreeTest>,
}

/// Direct child of a suite: either a group of tests or a bare test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FailureTreeChild {
    Group(FailureTreeGroup),
    Test(FailureTreeTest),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTreeSuite {
    pub name: String,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(default)]
    pub children: Vec<FailureTreeChild>,
}

/// Summary returned by `Runner::get_summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub aggregates: Aggregates,
    /// Total run duration in milliseconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub has_error: bool,
    #[serde(default)]
    pub failure_tree: Vec<FailureTreeSuite>,
    #[serde(default)]
    pub failed_tests_titles: Vec<String>,
}

impl Summary {
    /// Parse a summary from its JSON form
    pub fn from_json(content: &str) -> ReportResult<Self> {
        serde_json::from_str(content).map_err(ReportError::Summary)
    }

    /// Load a summary from a JSON file
    pub fn load_from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
