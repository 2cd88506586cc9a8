//! CLI-specific error types
//!
//! All CLI errors abort the process with a non-zero exit code.

use std::fmt;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FILMSTORE_CLI_CONFIG_ERROR",
            Self::BootFailed => "FILMSTORE_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Boot failure
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// The error code string
    pub fn code(&self) -> &'static str {
        self.code.code()
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CliError::config_error("bad file").code(),
            "FILMSTORE_CLI_CONFIG_ERROR"
        );
        assert_eq!(
            CliError::boot_failed("no runtime").code(),
            "FILMSTORE_CLI_BOOT_FAILED"
        );
    }

    #[test]
    fn test_error_display() {
        let err = CliError::boot_failed("DB connection error");
        let display = format!("{}", err);
        assert!(display.contains("FILMSTORE_CLI_BOOT_FAILED"));
        assert!(display.contains("DB connection error"));
    }
}
