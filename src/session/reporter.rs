// Structured reporter - suite-stack state machine over session events

use crate::model::{Report, ReportStats, SuiteNode, TestNode, join_titles};
use crate::session::events::SessionEvent;
use thiserror::Error;
use tokio_stream::{Stream, StreamExt};

/// Violations of the session event protocol.
/// These are fatal to the reporter instance that observed them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("suite '{title}' ended with no matching begin")]
    UnbalancedSuiteEnd { title: String },

    #[error("run ended with {open} unclosed suite(s)")]
    UnclosedSuites { open: usize },

    #[error("event received after run end")]
    EventAfterRunEnd,
}

/// Accumulates one run's events into a Report.
///
/// The suite stack is the only state: the root sits at the bottom,
/// suite-begin pushes, suite-end pops the finished suite into its
/// parent. One instance per run; never reused across runs.
pub struct ReportBuilder {
    stack: Vec<SuiteNode>,
    stats: ReportStats,
    done: bool,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![SuiteNode::root()],
            stats: ReportStats::default(),
            done: false,
        }
    }

    /// Feed one event into the state machine.
    ///
    /// Returns `Ok(Some(report))` exactly once, when `RunEnd` arrives
    /// with balanced nesting. All other accepted events return
    /// `Ok(None)`.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Option<Report>, ProtocolError> {
        if self.done {
            return Err(ProtocolError::EventAfterRunEnd);
        }

        match event {
            SessionEvent::RunBegin => {
                self.stack = vec![SuiteNode::root()];
                self.stats = ReportStats {
                    start_time: Some(chrono::Utc::now().timestamp()),
                    ..Default::default()
                };
            }
            SessionEvent::SuiteBegin { title, root } => {
                if !root {
                    self.stats.suites += 1;
                    let parent_full_title = self.top().full_title.clone();
                    self.stack.push(SuiteNode::new(title, &parent_full_title));
                }
            }
            SessionEvent::SuiteEnd { title, root } => {
                if !root {
                    if self.stack.len() == 1 {
                        return Err(ProtocolError::UnbalancedSuiteEnd { title });
                    }
                    let finished = self.stack.pop().unwrap();
                    self.top().push_suite(finished);
                }
            }
            SessionEvent::TestPass { title, duration_ms } => {
                self.stats.tests += 1;
                self.stats.passes += 1;
                let full_title = join_titles(&self.top().full_title, &title);
                self.top().push_test(TestNode::pass(title, full_title, duration_ms));
            }
            SessionEvent::TestFail {
                title,
                duration_ms,
                error,
            } => {
                self.stats.tests += 1;
                self.stats.failures += 1;
                let full_title = join_titles(&self.top().full_title, &title);
                self.top().push_test(TestNode::fail(
                    title,
                    full_title,
                    error.message.unwrap_or_default(),
                    error.stack,
                    duration_ms,
                ));
            }
            SessionEvent::TestPending { title } => {
                self.stats.tests += 1;
                self.stats.pending += 1;
                let full_title = join_titles(&self.top().full_title, &title);
                self.top().push_test(TestNode::pending(title, full_title));
            }
            SessionEvent::RunEnd { duration_ms } => {
                if self.stack.len() > 1 {
                    return Err(ProtocolError::UnclosedSuites {
                        open: self.stack.len() - 1,
                    });
                }
                self.done = true;
                let mut stats = std::mem::take(&mut self.stats);
                stats.end_time = Some(chrono::Utc::now().timestamp());
                stats.duration_ms = duration_ms.or_else(|| {
                    match (stats.start_time, stats.end_time) {
                        (Some(start), Some(end)) => Some((end - start).max(0) as u64 * 1000),
                        _ => None,
                    }
                });
                let root = self.stack.pop().unwrap();
                return Ok(Some(Report::new(stats, root)));
            }
        }

        Ok(None)
    }

    /// Drain a synchronous event sequence.
    ///
    /// `Ok(None)` means the sequence ended without `RunEnd` — the
    /// caller treats that as "no result", not as an empty report.
    pub fn collect<I>(mut self, events: I) -> Result<Option<Report>, ProtocolError>
    where
        I: IntoIterator<Item = SessionEvent>,
    {
        for event in events {
            if let Some(report) = self.handle(event)? {
                return Ok(Some(report));
            }
        }
        Ok(None)
    }

    /// Drain an asynchronous event stream. Same contract as `collect`.
    pub async fn collect_stream<S>(mut self, mut events: S) -> Result<Option<Report>, ProtocolError>
    where
        S: Stream<Item = SessionEvent> + Unpin,
    {
        while let Some(event) = events.next().await {
            if let Some(report) = self.handle(event)? {
                return Ok(Some(report));
            }
        }
        Ok(None)
    }

    fn top(&mut self) -> &mut SuiteNode {
        // The stack is never empty: RunEnd consumes the root but also
        // flips `done`, which rejects any further event.
        self.stack.last_mut().unwrap()
    }
}

/// Delivers the completed report through a caller-supplied callback,
/// exactly once. If the session never reaches run-end the callback is
/// never invoked; timeouts are the caller's concern.
pub struct RunReporter {
    builder: ReportBuilder,
    on_complete: Option<Box<dyn FnOnce(Report) + Send>>,
}

impl RunReporter {
    pub fn new(on_complete: impl FnOnce(Report) + Send + 'static) -> Self {
        Self {
            builder: ReportBuilder::new(),
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<(), ProtocolError> {
        if let Some(report) = self.builder.handle(event)? {
            if let Some(deliver) = self.on_complete.take() {
                deliver(report);
            }
        }
        Ok(())
    }
}
