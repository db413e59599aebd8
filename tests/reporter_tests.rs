// Tests for the structured session reporter - public API only

use testlens::model::TestState;
use testlens::session::{ErrorInfo, ProtocolError, ReportBuilder, RunReporter, SessionEvent};

fn begin(title: &str) -> SessionEvent {
    SessionEvent::SuiteBegin {
        title: title.into(),
        root: false,
    }
}

fn end(title: &str) -> SessionEvent {
    SessionEvent::SuiteEnd {
        title: title.into(),
        root: false,
    }
}

fn pass(title: &str) -> SessionEvent {
    SessionEvent::TestPass {
        title: title.into(),
        duration_ms: Some(5),
    }
}

fn fail(title: &str, message: &str) -> SessionEvent {
    SessionEvent::TestFail {
        title: title.into(),
        duration_ms: None,
        error: ErrorInfo {
            message: Some(message.into()),
            stack: None,
        },
    }
}

#[test]
fn test_totals_equal_observed_events() {
    // Arrange
    let events = vec![
        SessionEvent::RunBegin,
        begin("a"),
        pass("a1"),
        fail("a2", "boom"),
        begin("b"),
        SessionEvent::TestPending { title: "b1".into() },
        pass("b2"),
        end("b"),
        end("a"),
        SessionEvent::RunEnd { duration_ms: None },
    ];

    // Act
    let report = ReportBuilder::new().collect(events).unwrap().unwrap();

    // Assert
    assert_eq!(report.stats.tests, 4);
    assert_eq!(report.stats.passes, 2);
    assert_eq!(report.stats.failures, 1);
    assert_eq!(report.stats.pending, 1);
    assert_eq!(
        report.stats.tests,
        report.stats.passes + report.stats.failures + report.stats.pending
    );
    assert_eq!(report.root.total_tests(), 4);
}

#[test]
fn test_tree_depth_equals_max_nesting() {
    let events = vec![
        SessionEvent::RunBegin,
        begin("level1"),
        begin("level2"),
        pass("deep"),
        end("level2"),
        end("level1"),
        SessionEvent::RunEnd { duration_ms: None },
    ];

    let report = ReportBuilder::new().collect(events).unwrap().unwrap();
    assert_eq!(report.root.depth(), 2);
}

#[test]
fn test_full_titles_join_the_ancestor_chain() {
    let events = vec![
        SessionEvent::RunBegin,
        begin("CookieSerializer"),
        begin("loadAllMatching"),
        fail("finds all matching cookies", "expected [] to deeply equal [...]"),
        end("loadAllMatching"),
        end("CookieSerializer"),
        SessionEvent::RunEnd { duration_ms: None },
    ];

    let report = ReportBuilder::new().collect(events).unwrap().unwrap();
    let test = &report.root.suites[0].suites[0].tests[0];
    assert_eq!(
        test.full_title,
        "CookieSerializer > loadAllMatching > finds all matching cookies"
    );
    assert_eq!(test.state, TestState::Failed);
}

#[test]
fn test_mismatched_suite_end_is_fatal() {
    let mut builder = ReportBuilder::new();
    builder.handle(SessionEvent::RunBegin).unwrap();
    builder.handle(begin("only")).unwrap();
    builder.handle(end("only")).unwrap();

    let err = builder.handle(end("only")).unwrap_err();
    assert!(matches!(err, ProtocolError::UnbalancedSuiteEnd { .. }));
}

#[test]
fn test_no_run_end_means_no_report() {
    let events = vec![SessionEvent::RunBegin, begin("s"), pass("t"), end("s")];
    assert!(ReportBuilder::new().collect(events).unwrap().is_none());
}

#[test]
fn test_callback_fires_once_with_assembled_report() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let deliveries = Arc::new(AtomicUsize::new(0));
    let counter = deliveries.clone();

    let mut reporter = RunReporter::new(move |report| {
        assert_eq!(report.stats.passes, 1);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    reporter.handle(SessionEvent::RunBegin).unwrap();
    reporter.handle(pass("single")).unwrap();
    reporter
        .handle(SessionEvent::RunEnd { duration_ms: Some(9) })
        .unwrap();

    assert_eq!(deliveries.load(Ordering::SeqCst), 1);
}

#[test]
fn test_event_stream_round_trips_as_json_lines() {
    let events = vec![
        SessionEvent::RunBegin,
        begin("suite"),
        fail("broken", "nope"),
        end("suite"),
        SessionEvent::RunEnd { duration_ms: Some(44) },
    ];

    let jsonl: String = events
        .iter()
        .map(|event| serde_json::to_string(event).unwrap() + "\n")
        .collect();

    let replayed: Vec<SessionEvent> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replayed, events);

    let report = ReportBuilder::new().collect(replayed).unwrap().unwrap();
    assert_eq!(report.stats.failures, 1);
    assert_eq!(report.stats.duration_ms, Some(44));
}

#[tokio::test]
async fn test_async_stream_collection() {
    let events = vec![
        SessionEvent::RunBegin,
        begin("s"),
        pass("a"),
        pass("b"),
        end("s"),
        SessionEvent::RunEnd { duration_ms: None },
    ];

    let report = ReportBuilder::new()
        .collect_stream(tokio_stream::iter(events))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.stats.passes, 2);
    assert_eq!(report.root.suites[0].tests.len(), 2);
}

#[tokio::test]
async fn test_async_stream_without_run_end_yields_none() {
    let events = vec![SessionEvent::RunBegin, begin("s"), pass("a")];

    let result = ReportBuilder::new()
        .collect_stream(tokio_stream::iter(events))
        .await
        .unwrap();
    assert!(result.is_none());
}
