//! One-step Q-learning update

use serde::{Deserialize, Serialize};

use crate::{identifiers::StateId, q_learning::q_table::ValueTable};

/// How terminal-ish rewards (gold grabbed, climbed out, died) reach the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStrategy {
    /// Overwrite Q(s,a) with the terminal reward.
    #[default]
    Pin,
    /// TD-blend toward the terminal reward with no successor value.
    Blend,
}

/// Off-policy TD control over a [`ValueTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdLearner {
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    terminal: TerminalStrategy,
}

impl TdLearner {
    pub fn new(learning_rate: f64, discount_factor: f64, terminal: TerminalStrategy) -> Self {
        Self {
            learning_rate,
            discount_factor,
            terminal,
        }
    }

    /// Q-learning update, returning the new value.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn update(
        &self,
        table: &mut ValueTable,
        state: StateId,
        slot: usize,
        reward: f64,
        next_state: StateId,
    ) -> f64 {
        let max_next_q = table.best_value(next_state);
        self.apply(table, state, slot, reward + self.discount_factor * max_next_q)
    }

    /// Write a terminal reward according to the configured strategy.
    pub fn terminal(&self, table: &mut ValueTable, state: StateId, slot: usize, reward: f64) -> f64 {
        match self.terminal {
            TerminalStrategy::Pin => {
                table.set(state, slot, reward);
                reward
            }
            TerminalStrategy::Blend => self.apply(table, state, slot, reward),
        }
    }

    fn apply(&self, table: &mut ValueTable, state: StateId, slot: usize, td_target: f64) -> f64 {
        let current_q = table.value(state, slot);
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        table.set(state, slot, new_q);
        new_q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_form_update() {
        let mut table = ValueTable::new(4);
        let state = StateId::new(1);
        let next = StateId::new(2);
        table.set(state, 0, 5.0);
        table.insert_row(next, vec![2.0, 9.0, 0.0, 0.0]).unwrap();

        let learner = TdLearner::new(1.0, 1.0, TerminalStrategy::Pin);
        let updated = learner.update(&mut table, state, 0, 10.0, next);

        // 5 + 1 * (10 + 1 * 9 - 5) = 19
        assert_eq!(updated, 19.0);
        assert_eq!(table.value(state, 0), 19.0);
    }

    #[test]
    fn test_partial_learning_rate() {
        let mut table = ValueTable::new(4);
        let state = StateId::new(1);
        let next = StateId::new(2);
        table.set(next, 2, 2.0);

        let learner = TdLearner::new(0.5, 0.99, TerminalStrategy::Pin);
        learner.update(&mut table, state, 3, 0.0, next);

        // 0 + 0.5 * (0 + 0.99 * 2 - 0) = 0.99
        assert!((table.value(state, 3) - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_successor_counts_as_zero() {
        let mut table = ValueTable::new(4);
        let learner = TdLearner::new(0.5, 0.9, TerminalStrategy::Pin);
        learner.update(&mut table, StateId::new(1), 0, -1.0, StateId::new(99));
        assert_eq!(table.value(StateId::new(1), 0), -0.5);
        assert!(!table.contains(StateId::new(99)));
    }

    #[test]
    fn test_pin_overwrites() {
        let mut table = ValueTable::new(6);
        table.set(StateId::new(4), 5, 42.0);
        let learner = TdLearner::new(0.1, 0.9, TerminalStrategy::Pin);
        learner.terminal(&mut table, StateId::new(4), 5, 100.0);
        assert_eq!(table.value(StateId::new(4), 5), 100.0);
    }

    #[test]
    fn test_blend_moves_toward_reward() {
        let mut table = ValueTable::new(6);
        table.set(StateId::new(4), 5, 40.0);
        let learner = TdLearner::new(0.5, 0.9, TerminalStrategy::Blend);
        learner.terminal(&mut table, StateId::new(4), 5, 100.0);
        assert_eq!(table.value(StateId::new(4), 5), 70.0);
    }
}
