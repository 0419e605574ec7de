//! Epsilon-greedy Q-learning agent
//!
//! Off-policy TD control: the agent always updates toward the maximum
//! value over the successor state's own legal actions, regardless of the
//! action actually taken next.

use std::hash::Hash;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::q_table::QTable,
};

/// Learning parameters for the agent.
///
/// Passed explicitly at construction; there are no module-level defaults
/// to mutate between calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size of the TD update
    pub learning_rate: f64,
    /// Weight on the bootstrapped future value
    pub discount_factor: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            discount_factor: 0.9,
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent over an opaque state/action space
///
/// Owns the Q-table and the exploration RNG. Action selection is
/// epsilon-greedy, with exact ties on the maximum broken uniformly at
/// random so that equally-unvisited actions carry no positional bias
/// early in training.
#[derive(Debug, Clone)]
pub struct QLearningAgent<S, A> {
    q_table: QTable<S, A>,
    config: AgentConfig,
    rng: StdRng,
}

impl<S, A> QLearningAgent<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Create an agent with an empty Q-table
    pub fn new(config: AgentConfig) -> Self {
        Self {
            q_table: QTable::new(),
            config,
            rng: build_rng(None),
        }
    }

    /// Seed the exploration RNG for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Reseed the exploration RNG in place.
    ///
    /// Training pipelines call this when supplied with a deterministic seed.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// ε-greedy action selection over the legal actions of `state`.
    ///
    /// With probability `epsilon` an action is drawn uniformly from
    /// `actions`; otherwise the highest-valued action wins, with exact
    /// ties broken uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActionsAvailable`] if `actions` is empty.
    pub fn select_action(&mut self, state: &S, actions: &[A], epsilon: f64) -> Result<A> {
        if actions.is_empty() {
            return Err(Error::NoActionsAvailable);
        }

        if self.rng.random::<f64>() < epsilon {
            // Explore: uniform over the legal actions
            Ok(actions.choose(&mut self.rng).unwrap().clone())
        } else {
            Ok(self.greedy_action(state, actions))
        }
    }

    /// Greedy selection with uniform tie-breaking on the exact maximum
    fn greedy_action(&mut self, state: &S, actions: &[A]) -> A {
        let values: Vec<f64> = actions
            .iter()
            .map(|action| self.q_table.get(state, action))
            .collect();
        let max_q = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let tied: Vec<&A> = actions
            .iter()
            .zip(&values)
            .filter(|&(_, &q)| q == max_q)
            .map(|(action, _)| action)
            .collect();

        (*tied.choose(&mut self.rng).unwrap()).clone()
    }

    /// Q-learning update for one observed transition.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap maximum ranges over `next_actions`, the legal actions
    /// of the *successor* state, which may differ from the set the action
    /// was chosen from. On terminal transitions (`done`, or a successor
    /// with no legal actions) the bootstrap term is zero: there is no
    /// future value past the end of an episode.
    pub fn learn_step(
        &mut self,
        state: &S,
        action: &A,
        reward: f64,
        next_state: &S,
        next_actions: &[A],
        done: bool,
    ) {
        let current_q = self.q_table.get(state, action);
        let max_next_q = if done || next_actions.is_empty() {
            0.0
        } else {
            self.q_table.max_q(next_state, next_actions)
        };
        let td_target = reward + self.config.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.config.learning_rate * td_error;
        self.q_table.set(state.clone(), action.clone(), new_q);
    }

    /// Current estimate for a state-action pair
    pub fn q_value(&self, state: &S, action: &A) -> f64 {
        self.q_table.get(state, action)
    }

    /// Number of (state, action) pairs visited so far
    pub fn table_len(&self) -> usize {
        self.q_table.len()
    }

    /// Learning parameters in effect
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
