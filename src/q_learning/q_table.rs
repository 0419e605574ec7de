//! Q-table implementation for temporal difference learning

use std::{collections::HashMap, hash::Hash};

/// Sparse Q-table mapping (state, action) pairs to value estimates.
///
/// Unseen pairs read as exactly 0.0. Entries are never evicted, so the
/// table grows without bound over training; acceptable here because runs
/// are process-lifetime only and the table is never persisted.
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    values: HashMap<(S, A), f64>,
}

impl<S, A> QTable<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get the estimate for a state-action pair, or 0.0 if unseen
    pub fn get(&self, state: &S, action: &A) -> f64 {
        self.values
            .get(&(state.clone(), action.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Insert or overwrite the estimate for a state-action pair
    pub fn set(&mut self, state: S, action: A, value: f64) {
        self.values.insert((state, action), value);
    }

    /// Maximum estimate over the given actions in a state.
    ///
    /// Callers must pass a non-empty slice; an empty slice folds to
    /// negative infinity.
    pub fn max_q(&self, state: &S, actions: &[A]) -> f64 {
        actions
            .iter()
            .map(|action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of stored (state, action) entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S, A> Default for QTable<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
