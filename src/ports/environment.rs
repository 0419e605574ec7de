//! Environment port - abstraction over the grid game being learned
//!
//! The training core never inspects game rules. It reaches the game
//! exclusively through this trait: episode resets, legal-action queries,
//! steps, and a render toggle used during evaluation runs.

use std::{
    hash::Hash,
    ops::{Deref, DerefMut},
};

use crate::error::Result;

/// Per-step metadata reported by the environment.
///
/// The game reports its own running score here; the core treats it as an
/// opaque figure of merit for progress tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInfo {
    /// Game score after the step
    pub score: f64,
}

/// Result of a single environment step
#[derive(Debug, Clone)]
pub struct Step<S> {
    /// Successor state
    pub state: S,
    /// Reward signal for the transition
    pub reward: f64,
    /// Whether the episode ended with this step
    pub done: bool,
    /// Whether the environment cut the episode short (time limit etc.).
    /// Carried for contract fidelity; the training core ignores it.
    pub truncated: bool,
    /// Additional step metadata
    pub info: StepInfo,
}

/// Environment trait - the external collaborator contract
///
/// States and actions are opaque to the learner: both are used only as
/// hashable, equality-comparable lookup keys. Environments whose natural
/// state is a mutable grid must expose a canonical value representation
/// (e.g. a serialized board) so equal logical states compare equal.
pub trait Environment {
    /// Observation key identifying the current game position
    type State: Clone + Eq + Hash;
    /// Identifier for one legal move, drawn from a finite state-dependent set
    type Action: Clone + Eq + Hash;

    /// Reset to a fresh episode and return the initial state.
    fn reset(&mut self) -> Result<Self::State>;

    /// Legal actions for the current state.
    ///
    /// Must be non-empty while the episode is active.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply an action and return the resulting transition.
    fn step(&mut self, action: &Self::Action) -> Result<Step<Self::State>>;

    /// Enable or disable rendering of subsequent steps.
    fn set_render(&mut self, enabled: bool);

    /// Current state of the render toggle.
    fn render_enabled(&self) -> bool;
}

/// Scoped enable of an environment's render flag.
///
/// The flag is a borrowed external resource: evaluation runs switch it on
/// for their duration and must restore the previous value on every exit
/// path, early returns and unwinding included. Dropping the guard performs
/// the restore.
pub struct RenderGuard<'a, E: Environment> {
    env: &'a mut E,
    previous: bool,
}

impl<'a, E: Environment> RenderGuard<'a, E> {
    /// Enable rendering on `env`, remembering the previous flag value.
    pub fn new(env: &'a mut E) -> Self {
        let previous = env.render_enabled();
        env.set_render(true);
        Self { env, previous }
    }
}

impl<E: Environment> Deref for RenderGuard<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.env
    }
}

impl<E: Environment> DerefMut for RenderGuard<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.env
    }
}

impl<E: Environment> Drop for RenderGuard<'_, E> {
    fn drop(&mut self) {
        self.env.set_render(self.previous);
    }
}
