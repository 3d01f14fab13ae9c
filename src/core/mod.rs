//! Core calculator types and logic.
//!
//! This module contains the pure building blocks the engine is made of:
//! - Lifecycle states via [`EngineState`]
//! - Operand accumulators via [`Operand`]
//! - Operations and the arithmetic evaluator
//! - Bounded transition history
//!
//! Nothing in here performs I/O.

mod history;
mod operand;
mod operation;
mod state;

pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use operand::{Operand, OperandError, Sign, DECIMAL_POINT};
pub use operation::{evaluate, Operation, Outcome, DIVISION_BY_ZERO};
pub use state::{EngineState, Slot};
