//! Error types.
//!
//! The library surfaces `PursuitError` from every fallible operation. The
//! `pursuit` binary wraps it into `AppError`, which also carries the process
//! exit code.

use thiserror::Error;

/// Errors raised by the pursuit engines, the data generator and the experiment drivers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PursuitError {
    /// Observation length does not match the dictionary row count.
    #[error("dimension mismatch: dictionary has {rows} rows but observation has length {observation}")]
    DimensionMismatch { rows: usize, observation: usize },

    /// A named option (method, distribution, ...) is not recognized.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A numeric option is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An external baseline solver reported a failure.
    #[error("baseline solver '{solver}' failed: {message}")]
    Solver { solver: String, message: String },
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, PursuitError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<PursuitError> for AppError {
    fn from(err: PursuitError) -> Self {
        let exit_code = match err {
            PursuitError::DimensionMismatch { .. }
            | PursuitError::UnknownOption { .. }
            | PursuitError::InvalidConfig(_) => 2,
            PursuitError::Solver { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_exit_code_two() {
        let err: AppError = PursuitError::InvalidConfig("delta must be finite".into()).into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "invalid configuration: delta must be finite");
    }

    #[test]
    fn solver_errors_map_to_exit_code_four() {
        let err: AppError = PursuitError::Solver {
            solver: "astar".into(),
            message: "budget exhausted".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 4);
    }
}
