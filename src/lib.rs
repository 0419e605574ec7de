//! Tabular Q-learning trainer for tile-merging grid games
//!
//! This crate provides:
//! - A sparse Q-table mapping (state, action) pairs to value estimates
//! - An epsilon-greedy Q-learning agent with uniform tie-breaking
//! - A training pipeline with linear exploration decay, rolling score
//!   statistics, and milestone-triggered evaluation runs
//! - Ports for the game environment and for training observation

pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use pipeline::{
    ConsoleObserver, EpisodeSummary, EvaluationReport, MetricsObserver, ProgressObserver,
    ScoreWindow, TrainingConfig, TrainingPipeline, TrainingResult,
};
pub use ports::{Environment, RenderGuard, Step, StepInfo, TrainingObserver};
pub use q_learning::{AgentConfig, QLearningAgent, QTable};
