//! Lifecycle transition history.
//!
//! Every input that moves the engine to a different lifecycle state is
//! recorded together with the key that caused it. The log is bounded; the
//! oldest entries are dropped first.

use super::state::EngineState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of transitions kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single lifecycle transition.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{EngineState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: EngineState::WaitingFirst,
///     to: EngineState::EnteringFirst,
///     input: '7',
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.input, '7');
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: EngineState,
    /// The state being transitioned to
    pub to: EngineState,
    /// The key that triggered the transition
    pub input: char,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of lifecycle transitions.
///
/// `record` consumes the history and returns it with the transition added.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{EngineState, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: EngineState::WaitingFirst,
///         to: EngineState::EnteringFirst,
///         input: '5',
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: EngineState::EnteringFirst,
///         to: EngineState::WaitingSecond,
///         input: '+',
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // WaitingFirst -> EnteringFirst -> WaitingSecond
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
    limit: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create an empty history holding up to [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding up to `limit` entries.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a transition, returning the updated history.
    pub fn record(mut self, transition: StateTransition) -> Self {
        if self.limit == 0 {
            self.transitions.clear();
            return self;
        }
        if self.transitions.len() >= self.limit {
            let excess = self.transitions.len() + 1 - self.limit;
            self.transitions.drain(..excess);
        }
        self.transitions.push(transition);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest transition, then the `to`
    /// state of each transition in order.
    pub fn get_path(&self) -> Vec<EngineState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and newest recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// All recorded transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Drop every recorded transition, keeping the limit.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
