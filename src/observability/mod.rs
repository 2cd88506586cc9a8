//! # Observability
//!
//! Structured one-line JSON logging with typed lifecycle events.
//! Logs are synchronous and unbuffered, with deterministic key ordering.
//! Store failure detail is logged here and never returned to clients.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = event.severity();
    if severity >= Severity::Error {
        Logger::log_stderr(severity, event.as_str(), fields);
    } else {
        Logger::log(severity, event.as_str(), fields);
    }
}
