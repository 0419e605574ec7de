//! Observer port - abstraction for training observation
//!
//! This port defines the interface for observing training events,
//! allowing composable reporting without coupling the loop to specific
//! output formats.

use crate::{
    Result,
    pipeline::{EpisodeSummary, EvaluationReport, TrainingResult},
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different kinds of data during a
/// run: console progress lines, progress bars, metric aggregation.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_best_score(...)` - when the episode set a new best score
///    - `on_evaluation_end(...)` - when a demonstration run was triggered
///    - `on_episode_end(...)`
///    - `on_window_average(...)` - at reporting intervals (episode 0 included)
/// 3. `on_training_end(result)` - once at the end
///
/// All methods default to no-ops and return the crate [`Result`] so that
/// reporting sinks fail loudly instead of silently dropping output.
pub trait TrainingObserver {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every episode, completed or truncated.
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when an episode's score strictly exceeds the best seen so far.
    fn on_best_score(&mut self, _episode: usize, _score: f64, _epsilon: f64) -> Result<()> {
        Ok(())
    }

    /// Called at reporting intervals with the rolling window average.
    fn on_window_average(&mut self, _episode: usize, _average: f64) -> Result<()> {
        Ok(())
    }

    /// Called after an evaluation run, whether triggered by a milestone or
    /// invoked directly.
    fn on_evaluation_end(&mut self, _report: &EvaluationReport) -> Result<()> {
        Ok(())
    }

    /// Called once after the final episode.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
