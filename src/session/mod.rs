// Session module - structured run lifecycle consumption
// Builds a Report from a typed event stream instead of live callbacks

pub mod events;
pub mod reporter;

pub use events::{ErrorInfo, SessionEvent};
pub use reporter::{ProtocolError, ReportBuilder, RunReporter};
