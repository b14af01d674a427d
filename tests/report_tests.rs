// Tests for summary rendering - public API only

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use testreport::report::{
    BaseReporter, ErrorsPrinter, Logger, MemoryOutput, Reporter, ReporterOptions,
};
use testreport::runner::{
    Aggregates, CapturedError, ErrorEntry, FailureTreeChild, FailureTreeGroup, FailureTreeSuite,
    FailureTreeTest, Phase, RunnerEvent, Summary,
};

struct Plain;
impl Reporter for Plain {}

/// Records every print_errors call as (label, messages)
#[derive(Clone, Default)]
struct RecordingPrinter {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl RecordingPrinter {
    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ErrorsPrinter for RecordingPrinter {
    async fn print_errors(&self, label: &str, errors: &[ErrorEntry]) -> Result<()> {
        let messages = errors.iter().map(|e| e.error.message.clone()).collect();
        self.calls
            .lock()
            .unwrap()
            .push((label.to_string(), messages));
        Ok(())
    }
}

fn reporter() -> (BaseReporter<Plain>, MemoryOutput, RecordingPrinter) {
    let (logger, output) = Logger::memory();
    let printer = RecordingPrinter::default();
    let reporter = BaseReporter::new(Plain, ReporterOptions::default())
        .with_logger(logger)
        .with_errors_printer(printer.clone());
    (reporter, output, printer)
}

fn error(message: &str) -> ErrorEntry {
    ErrorEntry::new(Phase::Test, CapturedError::new(message))
}

fn passing(aggregates: Aggregates) -> Summary {
    Summary {
        aggregates,
        duration: 4.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_no_tests_executed() {
    // Arrange
    let (reporter, output, printer) = reporter();

    // Act
    reporter.print_summary(&Summary::default()).await.unwrap();

    // Assert
    assert_eq!(output.lines(), vec!["", " NO TESTS EXECUTED "]);
    assert!(printer.calls().is_empty());
}

#[tokio::test]
async fn test_zero_tests_with_error_is_failed() {
    // Arrange
    let (reporter, output, printer) = reporter();
    let summary = Summary {
        has_error: true,
        ..Default::default()
    };

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    let lines = output.lines();
    assert_eq!(lines[1], " FAILED ");
    assert_eq!(lines[3], "Tests: (0)");
    assert_eq!(printer.calls().len(), 1);
}

#[tokio::test]
async fn test_single_todo_scenario() {
    // Arrange
    let (reporter, output, printer) = reporter();
    let summary = passing(Aggregates {
        total: 1,
        todo: 1,
        ..Default::default()
    });

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    assert_eq!(
        output.lines(),
        vec!["", " PASSED ", "", "Tests: 1 todo (1)", "Time : 4ms"]
    );
    assert_eq!(
        printer.calls(),
        vec![("Uncaught exception".to_string(), Vec::<String>::new())]
    );
}

#[tokio::test]
async fn test_banner_follows_error_flag_not_counts() {
    // Arrange
    let (reporter, output, _) = reporter();
    let summary = Summary {
        aggregates: Aggregates {
            total: 3,
            passed: 3,
            ..Default::default()
        },
        has_error: true,
        ..Default::default()
    };

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    assert_eq!(output.lines()[1], " FAILED ");
    assert_eq!(output.lines()[3], "Tests: 3 passed (3)");
}

#[tokio::test]
async fn test_uncaught_exceptions_widen_labels() {
    // Arrange
    let (reporter, output, _) = reporter();
    let summary = passing(Aggregates {
        total: 2,
        passed: 1,
        failed: 1,
        uncaught_exceptions: 2,
        ..Default::default()
    });

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    let lines = output.lines();
    assert_eq!(lines[3], "Tests              : 1 passed, 1 failed (2)");
    assert_eq!(lines[4], "Time               : 4ms");
    assert_eq!(lines[5], "Uncaught exceptions: 2");
}

#[tokio::test]
async fn test_failure_tree_render_order() {
    // Arrange
    let (reporter, output, printer) = reporter();
    let summary = Summary {
        aggregates: Aggregates {
            total: 3,
            failed: 3,
            ..Default::default()
        },
        has_error: true,
        failure_tree: vec![
            FailureTreeSuite {
                name: "unit".into(),
                errors: vec![],
                children: vec![
                    FailureTreeChild::Group(FailureTreeGroup {
                        name: "math".into(),
                        errors: vec![error("group hook failed")],
                        children: vec![
                            FailureTreeTest {
                                title: "adds".into(),
                                errors: vec![error("expected 4")],
                            },
                            FailureTreeTest {
                                title: "subtracts".into(),
                                errors: vec![error("expected 0")],
                            },
                        ],
                    }),
                    FailureTreeChild::Test(FailureTreeTest {
                        title: "bare".into(),
                        errors: vec![error("boom")],
                    }),
                ],
            },
            FailureTreeSuite {
                name: "functional".into(),
                errors: vec![error("suite setup failed")],
                children: vec![],
            },
        ],
        ..Default::default()
    };

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    let labels: Vec<String> = printer.calls().into_iter().map(|(l, _)| l).collect();
    assert_eq!(
        labels,
        vec![
            "unit",
            "math",
            "adds",
            "subtracts",
            "bare",
            "functional",
            "Uncaught exception"
        ]
    );
    assert_eq!(printer.calls()[2].1, vec!["expected 4"]);

    // Two blank lines separate the aggregates from the error tree
    let lines = output.lines();
    assert_eq!(&lines[lines.len() - 2..], &["", ""]);
}

#[tokio::test]
async fn test_uncaught_exceptions_rendered_last() {
    // Arrange
    let (mut reporter, output, printer) = reporter();
    reporter
        .handle(RunnerEvent::UncaughtException(CapturedError::new(
            "unhandled rejection",
        )))
        .await
        .unwrap();
    let summary = passing(Aggregates {
        total: 1,
        passed: 1,
        uncaught_exceptions: 1,
        ..Default::default()
    });

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    assert_eq!(
        printer.calls(),
        vec![(
            "Uncaught exception".to_string(),
            vec!["unhandled rejection".to_string()]
        )]
    );
    let lines = output.lines();
    assert_eq!(&lines[lines.len() - 2..], &["", ""]);
}

#[tokio::test]
async fn test_default_printer_renders_to_logger() {
    // Arrange
    let (logger, output) = Logger::memory();
    let reporter = BaseReporter::new(Plain, ReporterOptions::new(Some(1))).with_logger(logger);
    let failing = ErrorEntry::new(
        Phase::Test,
        CapturedError::new("expected 4 to equal 5")
            .with_name("AssertionError")
            .with_stack("at add (math.rs:1)\nat run (runner.rs:9)"),
    );
    let summary = Summary {
        aggregates: Aggregates {
            total: 1,
            failed: 1,
            ..Default::default()
        },
        has_error: true,
        failure_tree: vec![FailureTreeSuite {
            name: "unit".into(),
            errors: vec![],
            children: vec![FailureTreeChild::Test(FailureTreeTest {
                title: "2 + 2".into(),
                errors: vec![failing],
            })],
        }],
        ..Default::default()
    };

    // Act
    reporter.print_summary(&summary).await.unwrap();

    // Assert
    let text = output.text();
    assert!(text.contains("✖ 2 + 2"));
    assert!(text.contains("AssertionError: expected 4 to equal 5"));
    assert!(text.contains("at add (math.rs:1)"));
    assert!(!text.contains("at run (runner.rs:9)"));
}

#[tokio::test]
async fn test_printer_error_propagates() {
    // Arrange
    struct FailingPrinter;

    #[async_trait]
    impl ErrorsPrinter for FailingPrinter {
        async fn print_errors(&self, _label: &str, _errors: &[ErrorEntry]) -> Result<()> {
            anyhow::bail!("terminal closed")
        }
    }

    let (logger, _) = Logger::memory();
    let reporter = BaseReporter::new(Plain, ReporterOptions::default())
        .with_logger(logger)
        .with_errors_printer(FailingPrinter);

    // Act
    let result = reporter
        .print_summary(&passing(Aggregates {
            total: 1,
            passed: 1,
            ..Default::default()
        }))
        .await;

    // Assert
    assert_eq!(result.unwrap_err().to_string(), "terminal closed");
}
