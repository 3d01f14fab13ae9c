//! The calculator state machine.
//!
//! [`Engine::process`] takes one key at a time, classifies it and applies
//! the matching handler. Input that makes no sense in the current state is
//! ignored; the engine never reports an error for a keystroke.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{
    evaluate, EngineState, Operand, Operation, Outcome, Slot, StateHistory, StateTransition,
};
use crate::input::{classify, InputCategory};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Everything the engine owns apart from its history.
///
/// Two engines that have been fed keys leading to the same calculator
/// contents compare equal through their snapshots, however they got there.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub state: EngineState,
    pub first: Operand,
    pub second: Operand,
    pub operation: Operation,
    pub outcome: Option<Outcome>,
}

/// Two operands, one pending operation and the last result.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{EngineState, Outcome};
/// use keycalc::Engine;
///
/// let mut engine = Engine::new();
/// for c in "5+3=".chars() {
///     engine.process(c);
/// }
///
/// assert_eq!(engine.state(), EngineState::ShowingResult);
/// assert_eq!(engine.outcome(), Some(&Outcome::Value(8.0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    state: EngineState,
    first: Operand,
    second: Operand,
    operation: Operation,
    outcome: Option<Outcome>,
    history: StateHistory,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose transition history keeps at most `limit` entries.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: StateHistory::with_limit(limit),
            ..Self::default()
        }
    }

    /// Feed one key to the engine and return how it was classified.
    pub fn process(&mut self, c: char) -> InputCategory {
        let category = classify(c, self.state);
        let before = self.state;

        match category {
            InputCategory::Digit => self.on_digit(c),
            InputCategory::Operation => self.on_operation(c),
            InputCategory::Sign => self.on_sign(),
            InputCategory::DecimalPoint => self.on_decimal_point(),
            InputCategory::Erase => self.on_erase(),
            InputCategory::Clear => self.on_clear(),
            InputCategory::Calculate => self.on_calculate(),
            InputCategory::Incorrect => {
                trace!(input = ?c, state = %self.state, "ignoring key");
            }
        }

        if self.state != before {
            debug!(input = ?c, from = %before, to = %self.state, "state transition");
            self.history = std::mem::take(&mut self.history).record(StateTransition {
                from: before,
                to: self.state,
                input: c,
                timestamp: Utc::now(),
            });
        }

        category
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn first(&self) -> &Operand {
        &self.first
    }

    pub fn second(&self) -> &Operand {
        &self.second
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The computed result, present only while showing it.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state,
            first: self.first.clone(),
            second: self.second.clone(),
            operation: self.operation,
            outcome: self.outcome.clone(),
        }
    }

    /// Capture the engine, history included, for later [`Engine::resume`].
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.snapshot(), self.history.clone())
    }

    /// Rebuild an engine from a checkpoint after validating it.
    pub fn resume(checkpoint: Checkpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        let Checkpoint {
            snapshot, history, ..
        } = checkpoint;

        Ok(Self {
            state: snapshot.state,
            first: snapshot.first,
            second: snapshot.second,
            operation: snapshot.operation,
            outcome: snapshot.outcome,
            history,
        })
    }

    fn operand_mut(&mut self, slot: Slot) -> &mut Operand {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }

    fn on_digit(&mut self, c: char) {
        // No slot means a result is on screen.
        let Some(slot) = self.state.slot() else {
            return;
        };

        self.state = EngineState::entering(slot);
        if !self.operand_mut(slot).push_digit(c) {
            trace!(input = ?c, "rejecting redundant leading zero");
        }
    }

    fn on_operation(&mut self, c: char) {
        if self.state != EngineState::EnteringFirst {
            return;
        }

        let Some(operation) = Operation::from_symbol(c) else {
            unreachable!("{c:?} classified as an operation but is not one");
        };
        self.operation = operation;
        self.state = EngineState::WaitingSecond;
    }

    fn on_sign(&mut self) {
        match self.state {
            EngineState::WaitingFirst => self.first.set_negative(),
            EngineState::WaitingSecond => self.second.set_negative(),
            EngineState::EnteringFirst
            | EngineState::EnteringSecond
            | EngineState::ShowingResult => {}
        }
    }

    fn on_decimal_point(&mut self) {
        if !self.state.is_entering() {
            return;
        }
        if let Some(slot) = self.state.slot() {
            self.operand_mut(slot).push_decimal_point();
        }
    }

    fn on_erase(&mut self) {
        match self.state {
            EngineState::ShowingResult => {}
            EngineState::WaitingFirst => {
                self.first.clear_sign();
            }
            EngineState::WaitingSecond => {
                if !self.second.clear_sign() {
                    self.operation = Operation::None;
                    self.state = EngineState::EnteringFirst;
                }
            }
            EngineState::EnteringFirst => self.erase_last(Slot::First),
            EngineState::EnteringSecond => self.erase_last(Slot::Second),
        }
    }

    fn erase_last(&mut self, slot: Slot) {
        let operand = self.operand_mut(slot);
        let removed = operand.pop();
        debug_assert!(removed.is_some(), "entering state with an empty operand");

        if operand.is_empty() {
            self.state = EngineState::waiting(slot);
        }
    }

    fn on_clear(&mut self) {
        self.first.reset();
        self.second.reset();
        self.operation = Operation::None;
        self.outcome = None;
        self.state = EngineState::WaitingFirst;
    }

    fn on_calculate(&mut self) {
        if self.state != EngineState::EnteringSecond {
            return;
        }

        let (Some(first), Some(second)) = (self.first.signed_value(), self.second.signed_value())
        else {
            unreachable!("both operands hold digits while entering the second one");
        };
        debug_assert!(!self.operation.is_none(), "no operation pending");

        let outcome = evaluate(first, second, self.operation);
        debug!(first, second, operation = ?self.operation, ?outcome, "calculated");
        self.outcome = Some(outcome);
        self.state = EngineState::ShowingResult;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Sign, DIVISION_BY_ZERO};

    fn feed(keys: &str) -> Engine {
        let mut engine = Engine::new();
        for c in keys.chars() {
            engine.process(c);
        }
        engine
    }

    #[test]
    fn new_engine_waits_for_first_operand() {
        let engine = Engine::new();
        assert_eq!(engine.state(), EngineState::WaitingFirst);
        assert!(engine.first().is_empty());
        assert!(engine.second().is_empty());
        assert_eq!(engine.operation(), Operation::None);
        assert_eq!(engine.outcome(), None);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn digit_starts_first_operand() {
        let engine = feed("12");
        assert_eq!(engine.state(), EngineState::EnteringFirst);
        assert_eq!(engine.first().digits(), "12");
        assert_eq!(engine.first().value(), Some(12.0));
    }

    #[test]
    fn leading_zero_guard() {
        let engine = feed("00");
        assert_eq!(engine.first().digits(), "0");
        let engine = feed("0.0");
        assert_eq!(engine.first().digits(), "0.0");
    }

    #[test]
    fn operation_needs_first_digits() {
        let engine = feed("+");
        assert_eq!(engine.operation(), Operation::None);
        assert_eq!(engine.state(), EngineState::WaitingFirst);

        let engine = feed("5*");
        assert_eq!(engine.operation(), Operation::Multiply);
        assert_eq!(engine.state(), EngineState::WaitingSecond);
    }

    #[test]
    fn operation_cannot_be_replaced_while_waiting_second() {
        let engine = feed("5*/");
        assert_eq!(engine.operation(), Operation::Multiply);
    }

    #[test]
    fn minus_after_first_digits_is_subtract() {
        let engine = feed("8-");
        assert_eq!(engine.operation(), Operation::Subtract);
        assert_eq!(engine.state(), EngineState::WaitingSecond);
    }

    #[test]
    fn minus_while_waiting_sets_sign() {
        let engine = feed("-");
        assert_eq!(engine.first().sign(), Sign::Negative);

        let engine = feed("8--");
        assert_eq!(engine.operation(), Operation::Subtract);
        assert_eq!(engine.second().sign(), Sign::Negative);
    }

    #[test]
    fn minus_while_entering_second_is_ignored() {
        let before = feed("8+2");
        let mut after = before.clone();
        assert_eq!(after.process('-'), InputCategory::Incorrect);
        assert_eq!(after.snapshot(), before.snapshot());
    }

    #[test]
    fn decimal_point_only_while_entering() {
        let engine = feed(".");
        assert_eq!(engine.state(), EngineState::WaitingFirst);
        assert!(engine.first().is_empty());

        let engine = feed("1,5+.");
        assert_eq!(engine.first().digits(), "1.5");
        assert!(engine.second().is_empty());
    }

    #[test]
    fn second_decimal_point_is_ignored() {
        let engine = feed("1..5.");
        assert_eq!(engine.first().digits(), "1.5");
        assert!(engine.first().has_decimal_point());
    }

    #[test]
    fn erase_removes_characters_and_returns_to_waiting() {
        let mut engine = feed("4.5");
        engine.process('e');
        assert_eq!(engine.first().digits(), "4.");
        assert!(engine.first().has_decimal_point());

        engine.process('e');
        assert_eq!(engine.first().digits(), "4");
        assert!(!engine.first().has_decimal_point());

        engine.process('e');
        assert_eq!(engine.state(), EngineState::WaitingFirst);
        assert_eq!(engine.first().value(), None);
    }

    #[test]
    fn erase_drops_pending_sign() {
        let engine = feed("-e");
        assert_eq!(engine.first().sign(), Sign::Positive);
        assert_eq!(engine.state(), EngineState::WaitingFirst);

        let engine = feed("3+-e");
        assert_eq!(engine.second().sign(), Sign::Positive);
        assert_eq!(engine.operation(), Operation::Add);
        assert_eq!(engine.state(), EngineState::WaitingSecond);
    }

    #[test]
    fn erase_while_waiting_second_cancels_operation() {
        let engine = feed("9+e");
        assert_eq!(engine.operation(), Operation::None);
        assert_eq!(engine.state(), EngineState::EnteringFirst);
        assert_eq!(engine.first().digits(), "9");
    }

    #[test]
    fn erase_second_operand_back_to_waiting_second() {
        let engine = feed("9+12ee");
        assert_eq!(engine.state(), EngineState::WaitingSecond);
        assert_eq!(engine.second().value(), None);
        assert_eq!(engine.operation(), Operation::Add);
    }

    #[test]
    fn erase_keeps_sign_after_digits() {
        let engine = feed("-7e");
        assert_eq!(engine.state(), EngineState::WaitingFirst);
        assert_eq!(engine.first().sign(), Sign::Negative);
    }

    #[test]
    fn calculate_applies_signs() {
        let engine = feed("-6*-2=");
        assert_eq!(engine.outcome(), Some(&Outcome::Value(12.0)));
    }

    #[test]
    fn calculate_requires_second_operand() {
        let engine = feed("6+=");
        assert_eq!(engine.state(), EngineState::WaitingSecond);
        assert_eq!(engine.outcome(), None);

        let engine = feed("-6=");
        assert_eq!(engine.state(), EngineState::EnteringFirst);
        assert_eq!(engine.outcome(), None);
    }

    #[test]
    fn division_by_zero_is_reported_as_outcome() {
        let engine = feed("7/0=");
        assert_eq!(engine.state(), EngineState::ShowingResult);
        let outcome = engine.outcome().unwrap();
        assert!(!outcome.is_valid());
        assert_eq!(outcome.message(), Some(DIVISION_BY_ZERO));
    }

    #[test]
    fn showing_result_ignores_everything_but_clear() {
        let before = feed("5+3=");
        for c in "1+-*/.,e=x".chars() {
            let mut after = before.clone();
            after.process(c);
            assert_eq!(after.snapshot(), before.snapshot(), "{c:?}");
        }

        let mut cleared = before.clone();
        cleared.process('c');
        assert_eq!(cleared.snapshot(), Engine::new().snapshot());
    }

    #[test]
    fn clear_resets_everything_but_history() {
        let mut engine = feed("-1.5*-2");
        engine.process('c');
        assert_eq!(engine.snapshot(), EngineSnapshot::default());
        assert!(!engine.history().is_empty());
    }

    #[test]
    fn history_records_state_changes_only() {
        let engine = feed("12+x3=");
        let path = engine.history().get_path();
        assert_eq!(
            path,
            vec![
                EngineState::WaitingFirst,
                EngineState::EnteringFirst,
                EngineState::WaitingSecond,
                EngineState::EnteringSecond,
                EngineState::ShowingResult,
            ]
        );
        let inputs: Vec<char> = engine
            .history()
            .transitions()
            .iter()
            .map(|t| t.input)
            .collect();
        assert_eq!(inputs, vec!['1', '+', '3', '=']);
    }

    #[test]
    fn history_limit_is_respected() {
        let mut engine = Engine::with_history_limit(1);
        for c in "1+2=".chars() {
            engine.process(c);
        }
        assert_eq!(engine.history().transitions().len(), 1);
        assert_eq!(engine.history().transitions()[0].input, '=');
    }

    #[test]
    fn process_returns_category() {
        let mut engine = Engine::new();
        assert_eq!(engine.process('-'), InputCategory::Sign);
        assert_eq!(engine.process('4'), InputCategory::Digit);
        assert_eq!(engine.process('-'), InputCategory::Operation);
        assert_eq!(engine.process('q'), InputCategory::Incorrect);
    }
}
