//! Observable lifecycle events
//!
//! Events are explicit and typed; one log line = one event. They cover:
//! - Boot and shutdown
//! - Store connection
//! - Request handling failures

use std::fmt;

use super::logger::Severity;

/// Observable events in the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Store connection established
    StoreConnected,
    /// Store connection failed; startup aborts (FATAL)
    StoreConnectFailed,
    /// HTTP listener accepting requests
    Serving,
    /// Shutdown initiated
    ShutdownStart,

    // Request handling
    /// A request was rejected before reaching the store
    RequestRejected,
    /// A store operation failed during a request
    StoreOpFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::StoreConnectFailed => "STORE_CONNECT_FAILED",
            Event::Serving => "SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::StoreOpFailed => "STORE_OP_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreConnectFailed => Severity::Fatal,
            Event::StoreOpFailed => Severity::Error,
            Event::RequestRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }

    /// Fatal events abort startup after logging
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
