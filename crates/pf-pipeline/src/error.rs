//! Error types for the wrapper layer

use thiserror::Error;

/// Errors raised by the wrappers before any native call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    /// An operation was attempted on an already-disposed wrapper.
    #[error("{0} used after dispose")]
    UseAfterDispose(&'static str),

    /// The native engine returned a null handle from a create call.
    #[error("native engine failed to create {0}")]
    CreateFailed(&'static str),

    /// Optimization level outside the supported 0..=3 range.
    #[error("optimization level must be between 0 and 3, got {0}")]
    InvalidOptLevel(u32),
}

pub type Result<T> = std::result::Result<T, PassError>;
