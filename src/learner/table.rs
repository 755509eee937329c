//! Tabular action-value store.

use std::collections::HashMap;

use super::state_key::StateKey;
use crate::agent::Action;

/// One estimated return per action.
pub type ActionValues = [f64; Action::COUNT];

/// Action-value table of one fighter.
///
/// Rows are created lazily, all zero, the first time a state is looked up
/// for selection or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionValueTable {
    rows: HashMap<StateKey, ActionValues>,
}

impl ActionValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row for `key`, if it exists.
    pub fn get(&self, key: &StateKey) -> Option<&ActionValues> {
        self.rows.get(key)
    }

    /// Returns the row for `key`, creating a zero row if absent.
    pub fn row_mut(&mut self, key: &StateKey) -> &mut ActionValues {
        self.rows
            .entry(key.clone())
            .or_insert([0.0; Action::COUNT])
    }

    /// Highest-valued action for `key`; ties go to the lowest index.
    pub fn best_action(&mut self, key: &StateKey) -> Action {
        let row = self.row_mut(key);
        let mut best = 0;
        for (i, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = i;
            }
        }
        Action::nth(best)
    }

    /// Largest value in the row for `key`.
    pub fn max_value(&mut self, key: &StateKey) -> f64 {
        self.row_mut(key)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn insert(&mut self, key: StateKey, values: ActionValues) {
        self.rows.insert(key, values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &ActionValues)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
