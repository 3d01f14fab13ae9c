//! Checkpoint and resume functionality for the engine.
//!
//! A checkpoint captures the engine's snapshot and transition history so a
//! session can be handed over or restored. Checkpoints encode to JSON or to
//! a compact binary form. Decoding never trusts the input: every operand and
//! lifecycle invariant is checked before an engine is rebuilt from it.

use crate::core::{EngineState, Slot, StateHistory};
use crate::engine::EngineSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of an engine.
///
/// # Example
///
/// ```rust
/// use keycalc::Engine;
///
/// let mut engine = Engine::new();
/// for c in "12*3".chars() {
///     engine.process(c);
/// }
///
/// let json = engine.checkpoint().to_json().unwrap();
/// let checkpoint = keycalc::checkpoint::Checkpoint::from_json(&json).unwrap();
/// let restored = Engine::resume(checkpoint).unwrap();
///
/// assert_eq!(restored.snapshot(), engine.snapshot());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Operands, operation, result and lifecycle state
    pub snapshot: EngineSnapshot,

    /// Recorded lifecycle transitions
    pub history: StateHistory,
}

impl Checkpoint {
    pub fn new(snapshot: EngineSnapshot, history: StateHistory) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            snapshot,
            history,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Check the version and every engine invariant.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        let result = self
            .check_version()
            .and_then(|()| validate_snapshot(&self.snapshot))
            .and_then(|()| validate_history(&self.history));

        match &result {
            Ok(()) => info!(id = %self.id, state = %self.snapshot.state, "checkpoint validated"),
            Err(e) => warn!(id = %self.id, error = %e, "rejecting checkpoint"),
        }
        result
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

fn validate_history(history: &StateHistory) -> Result<(), CheckpointError> {
    let len = history.transitions().len();
    if len > history.limit() {
        return Err(CheckpointError::ValidationFailed(format!(
            "history holds {len} transitions but its limit is {}",
            history.limit()
        )));
    }
    Ok(())
}

fn validate_snapshot(snapshot: &EngineSnapshot) -> Result<(), CheckpointError> {
    snapshot
        .first
        .validate()
        .map_err(|source| CheckpointError::InvalidOperand {
            slot: Slot::First,
            source,
        })?;
    snapshot
        .second
        .validate()
        .map_err(|source| CheckpointError::InvalidOperand {
            slot: Slot::Second,
            source,
        })?;

    // (first typed, second typed, operation chosen, result present)
    let expected = match snapshot.state {
        EngineState::WaitingFirst => (false, false, false, false),
        EngineState::EnteringFirst => (true, false, false, false),
        EngineState::WaitingSecond => (true, false, true, false),
        EngineState::EnteringSecond => (true, true, true, false),
        EngineState::ShowingResult => (true, true, true, true),
    };
    let found = (
        !snapshot.first.is_empty(),
        !snapshot.second.is_empty(),
        !snapshot.operation.is_none(),
        snapshot.outcome.is_some(),
    );
    if found != expected {
        return Err(CheckpointError::ValidationFailed(format!(
            "state {} expects (first, second, operation, result) = {expected:?}, found {found:?}",
            snapshot.state
        )));
    }

    if snapshot.state.slot() == Some(Slot::First) && snapshot.second.sign().is_negative() {
        return Err(CheckpointError::ValidationFailed(format!(
            "second operand is signed while in {}",
            snapshot.state
        )));
    }

    Ok(())
}
