//! Stock observers for training pipelines
//!
//! Observers decouple the training loop from its output: the console
//! observer prints the classic progress lines, the progress observer
//! drives an indicatif bar, and the metrics observer aggregates counts
//! for programmatic consumption.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::training::{EpisodeSummary, EvaluationReport, TrainingResult},
    ports::TrainingObserver,
};

/// Console observer - prints human-readable progress lines
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    /// Create a new console observer
    pub fn new() -> Self {
        Self
    }
}

impl TrainingObserver for ConsoleObserver {
    fn on_best_score(&mut self, episode: usize, score: f64, epsilon: f64) -> Result<()> {
        println!(
            "New best score: {score}, current epsilon: {:.2}% at episode {episode}",
            epsilon * 100.0
        );
        Ok(())
    }

    fn on_window_average(&mut self, episode: usize, average: f64) -> Result<()> {
        println!("Episode {episode}: avg. score over recent episodes: {average:.2}");
        Ok(())
    }

    fn on_evaluation_end(&mut self, report: &EvaluationReport) -> Result<()> {
        println!(
            "Game finished after {} steps with score: {:.2}",
            report.steps, report.score
        );
        Ok(())
    }
}

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_score: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_score: 0.0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (best: {msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_message("0");
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_best_score(&mut self, _episode: usize, score: f64, _epsilon: f64) -> Result<()> {
        self.best_score = score;
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{score:.0}"));
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
        }
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{:.0}", self.best_score));
        }
        Ok(())
    }
}

/// Metrics observer - tracks aggregate training metrics
pub struct MetricsObserver {
    episodes: usize,
    truncated: usize,
    best_score: f64,
    evaluations: usize,
    step_counts: Vec<usize>,
    score_total: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            episodes: 0,
            truncated: 0,
            best_score: 0.0,
            evaluations: 0,
            step_counts: Vec::new(),
            score_total: 0.0,
        }
    }

    /// Average episode length so far
    pub fn avg_episode_length(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Average episode score so far
    pub fn avg_score(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.score_total / self.episodes as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes,
            truncated: self.truncated,
            best_score: self.best_score,
            evaluations: self.evaluations,
            avg_episode_length: self.avg_episode_length(),
            avg_score: self.avg_score(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub truncated: usize,
    pub best_score: f64,
    pub evaluations: usize,
    pub avg_episode_length: f64,
    pub avg_score: f64,
}

impl TrainingObserver for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.episodes += 1;
        if !summary.completed {
            self.truncated += 1;
        }
        self.step_counts.push(summary.steps);
        self.score_total += summary.score;
        Ok(())
    }

    fn on_best_score(&mut self, _episode: usize, score: f64, _epsilon: f64) -> Result<()> {
        self.best_score = score;
        Ok(())
    }

    fn on_evaluation_end(&mut self, _report: &EvaluationReport) -> Result<()> {
        self.evaluations += 1;
        Ok(())
    }
}
