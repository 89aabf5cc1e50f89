// Engine access error types and constants

use crate::error::{ConfigError, ErrorCode};
use log::error;
use std::fmt;

/// Engine error code constants
///
/// Error code range: 4001-4002
pub struct EngineErrorCodes;

impl EngineErrorCodes {
    /// Mutex guarding the shared engine was poisoned
    pub const LOCK_POISONED: i32 = 4001;
    /// Input or configuration rejected by the engine
    pub const INVALID_INPUT: i32 = 4002;
}

/// Log an engine error with structured context
pub fn log_engine_error(err: &EngineError, context: &str) {
    error!(
        "Engine error in {}: code={}, component=EngineHandle, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors surfaced by the shared engine handle
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Mutex was poisoned by a panicking holder
    LockPoisoned { component: String },
    /// Samples or configuration failed validation
    InvalidInput { source: ConfigError },
}

impl ErrorCode for EngineError {
    fn code(&self) -> i32 {
        match self {
            EngineError::LockPoisoned { .. } => EngineErrorCodes::LOCK_POISONED,
            EngineError::InvalidInput { .. } => EngineErrorCodes::INVALID_INPUT,
        }
    }

    fn message(&self) -> String {
        match self {
            EngineError::LockPoisoned { component } => {
                format!("Lock poisoned on {}", component)
            }
            EngineError::InvalidInput { source } => {
                format!("Invalid input: {}", source.message())
            }
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EngineError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidInput { source } => Some(source),
            EngineError::LockPoisoned { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(source: ConfigError) -> Self {
        EngineError::InvalidInput { source }
    }
}
