//! Keycalc: a keystroke-driven two-operand calculator
//!
//! Keycalc follows a "pure core, imperative shell" layout. The core is an
//! input state machine that turns single characters into edits of two
//! operands, one pending operation and a result. The terminal shell around
//! it only reads keys and draws the fields the engine exposes.
//!
//! # Core Concepts
//!
//! - **Classifier**: [`input::classify`] maps a key to an [`input::InputCategory`]
//! - **Engine**: [`Engine`] applies classified keys as lifecycle transitions
//! - **Readout**: [`display::Readout`] renders the engine for the adapter
//! - **Checkpoint**: [`checkpoint::Checkpoint`] captures and restores an engine
//!
//! # Example
//!
//! ```rust
//! use keycalc::config::DisplayConfig;
//! use keycalc::display::Readout;
//! use keycalc::Engine;
//!
//! let mut engine = Engine::new();
//! for c in "7/0=".chars() {
//!     engine.process(c);
//! }
//!
//! let readout = Readout::from_engine(&engine, &DisplayConfig::default());
//! assert_eq!(readout.to_string(), "7 / 0 = Division by zero");
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod display;
pub mod engine;
pub mod input;
pub mod keymap;

// Re-export commonly used types
pub use crate::core::{EngineState, Operand, Operation, Outcome};
pub use engine::{Engine, EngineSnapshot};
pub use input::{classify, InputCategory};
