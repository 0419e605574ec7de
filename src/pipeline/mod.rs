//! Training and evaluation pipeline
//!
//! Composable training loop: the pipeline owns episode orchestration and
//! exploration decay, observers handle reporting, and the greedy
//! evaluation run is a plain method so the milestone trigger stays
//! independently testable.

pub mod metrics;
pub mod observers;
pub mod training;

pub use metrics::ScoreWindow;
// Re-export observer implementations (adapters)
pub use observers::{ConsoleObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{
    EpisodeSummary, EvaluationReport, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::{Environment, TrainingObserver};
