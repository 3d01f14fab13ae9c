//! Checkpoint error types.

use crate::core::{OperandError, Slot};
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// An operand could not have been produced by typing
    #[error("Invalid {slot:?} operand: {source}")]
    InvalidOperand {
        slot: Slot,
        #[source]
        source: OperandError,
    },

    /// Operands, operation and result disagree with the lifecycle state
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
