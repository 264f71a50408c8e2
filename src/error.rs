//! Error type shared by the host bridge and the typed wrappers.

use thiserror::Error;

use crate::config::ConfigError;

/// Failures produced while talking to the script runtime or adapting its
/// values into typed wrappers.
#[derive(Debug, Error)]
pub enum WrapperError {
    /// The candidate handed to a wrapper is not an object owned by the host.
    ///
    /// This is a contract violation by the caller, never a transient fault.
    #[error("js invoke failed: expected a script object, found {found}")]
    InvalidForeignReference { found: &'static str },
    #[error("javascript execution failed: {0}")]
    Execution(String),
    #[error("property `{name}` is not callable")]
    NotCallable { name: String },
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WrapperError {
    /// Whether the error signals a programming error on the caller's side.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            WrapperError::InvalidForeignReference { .. } | WrapperError::TypeMismatch { .. }
        )
    }
}

/// Convenience alias for wrapper results.
pub type WrapperResult<T> = Result<T, WrapperError>;
