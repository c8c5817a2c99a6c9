//! Value table for tabular Q-learning

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    identifiers::StateId,
    types::{Action, ActionSet},
};

/// Sparse mapping from encoded state to one action-value per table slot.
///
/// Rows are created lazily, all zero, the first time a state is touched.
/// Reads through [`ValueTable::value`] and [`ValueTable::best_value`] never
/// create rows; an unseen state reads as all zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    /// Q-values: state -> [Q(state, slot) for each slot]
    rows: HashMap<StateId, Vec<f64>>,
    /// Row length (4 or 6)
    width: usize,
}

impl ValueTable {
    /// Create an empty table with `width` action slots per state
    pub fn new(width: usize) -> Self {
        Self {
            rows: HashMap::new(),
            width,
        }
    }

    /// Create an empty table sized for an action set
    pub fn for_actions(actions: ActionSet) -> Self {
        Self::new(actions.width())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the row for a state, creating a zero row if absent
    pub fn get(&mut self, state: StateId) -> &[f64] {
        self.row_mut(state)
    }

    /// Make sure a row exists for the state
    pub fn ensure(&mut self, state: StateId) {
        self.row_mut(state);
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.rows.contains_key(&state)
    }

    /// Get a single Q-value without creating the row
    pub fn value(&self, state: StateId, slot: usize) -> f64 {
        self.rows
            .get(&state)
            .and_then(|row| row.get(slot))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set a single Q-value. Slots outside the row are ignored.
    pub fn set(&mut self, state: StateId, slot: usize, value: f64) {
        if let Some(entry) = self.row_mut(state).get_mut(slot) {
            *entry = value;
        }
    }

    /// Replace a whole row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row length does not match the table width.
    pub fn insert_row(&mut self, state: StateId, row: Vec<f64>) -> Result<()> {
        if row.len() != self.width {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "row for state {state} has {} values, table width is {}",
                    row.len(),
                    self.width
                ),
            });
        }
        self.rows.insert(state, row);
        Ok(())
    }

    /// Maximum Q-value in a state (0 for unseen states)
    pub fn best_value(&self, state: StateId) -> f64 {
        self.value(state, self.best_slot(state))
    }

    /// Slot with the highest Q-value; ties go to the lowest slot
    pub fn best_slot(&self, state: StateId) -> usize {
        let Some(row) = self.rows.get(&state) else {
            return 0;
        };
        row.iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, best_q), (slot, &q)| {
                if q > best_q { (slot, q) } else { (best, best_q) }
            })
            .0
    }

    /// Greedy action for a state under the given action set
    pub fn best_action(&self, state: StateId, actions: ActionSet) -> Action {
        actions.action_at(self.best_slot(state))
    }

    /// Iterate rows in ascending state order
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &[f64])> {
        let mut states: Vec<&StateId> = self.rows.keys().collect();
        states.sort();
        states
            .into_iter()
            .map(|state| (*state, self.rows[state].as_slice()))
    }

    /// Number of states with a row
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_mut(&mut self, state: StateId) -> &mut Vec<f64> {
        let width = self.width;
        self.rows.entry(state).or_insert_with(|| vec![0.0; width])
    }
}
