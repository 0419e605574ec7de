//! Tabular Q-learning
//!
//! Off-policy temporal difference control over an opaque state/action
//! space. The agent bootstraps value estimates from successor states and
//! stores them sparsely, so nothing about the game's structure leaks into
//! the learner.
//!
//! ## Usage Example
//!
//! ```
//! use tileq::q_learning::{AgentConfig, QLearningAgent};
//!
//! let mut agent: QLearningAgent<String, usize> =
//!     QLearningAgent::new(AgentConfig::default()).with_seed(42);
//!
//! let state = "0,2,0,4".to_string();
//! let actions = vec![0, 1, 2, 3];
//! let action = agent.select_action(&state, &actions, 0.5).unwrap();
//! assert!(actions.contains(&action));
//! ```

pub mod agent;
pub mod q_table;

pub use agent::{AgentConfig, QLearningAgent};
pub use q_table::QTable;
