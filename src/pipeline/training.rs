//! Training pipeline for the Q-learning agent
//!
//! The pipeline owns episode orchestration: exploration decay, per-step
//! selection and TD updates, score bookkeeping, and milestone-triggered
//! evaluation runs. Reporting is delegated to observers so the loop stays
//! free of output concerns.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    pipeline::metrics::ScoreWindow,
    ports::{Environment, RenderGuard, TrainingObserver},
    q_learning::QLearningAgent,
};

/// Training loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Total training episodes
    pub max_episodes: usize,

    /// Per-episode step cap; episodes hitting it are truncated, not failed
    pub max_steps: usize,

    /// Exploration rate at the start of training
    pub start_epsilon: f64,

    /// Floor the exploration rate never decays below
    pub final_epsilon: f64,

    /// Best score that triggers a rendered greedy demonstration run
    pub demo_score: f64,

    /// Capacity of the rolling score window
    pub score_window: usize,

    /// Emit a window average every this many episodes (episode 0 included)
    pub report_interval: usize,

    /// Random seed applied to the agent before training
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_episodes: 1000,
            max_steps: 5000,
            start_epsilon: 0.9,
            final_epsilon: 0.05,
            demo_score: 4000.0,
            score_window: 1000,
            report_interval: 1000,
            seed: None,
        }
    }
}

/// Per-episode outcome reported to observers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Steps taken before the episode ended or was cut off
    pub steps: usize,

    /// Sum of rewards over the episode
    pub total_reward: f64,

    /// Game score at the end of the episode
    pub score: f64,

    /// Exploration rate the episode ran at
    pub epsilon: f64,

    /// False when the step cap cut the episode off before `done`
    pub completed: bool,
}

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub total_episodes: usize,

    /// Best episode score seen across the run
    pub best_score: f64,

    /// Mean score over the trailing window at the end of the run
    pub mean_recent_score: f64,

    /// Distinct (state, action) pairs visited
    pub table_entries: usize,
}

impl TrainingResult {
    /// Save the summary to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a summary from a JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Outcome of a single evaluation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Steps taken before the game ended or the cap was reached
    pub steps: usize,

    /// Final game score
    pub score: f64,

    /// Sum of rewards over the run
    pub total_reward: f64,
}

/// Orchestrates repeated episodes of agent-environment interaction
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Configuration in effect
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Exploration rate for an episode.
    ///
    /// Linear decay from `start_epsilon` toward `final_epsilon` over the
    /// course of training, never dropping below the floor and independent
    /// of per-episode step counts.
    pub fn epsilon_for_episode(&self, episode: usize) -> f64 {
        let progress = episode as f64 / self.config.max_episodes as f64;
        (self.config.start_epsilon * (1.0 - progress)).max(self.config.final_epsilon)
    }

    /// Run the full training loop.
    ///
    /// Plays `max_episodes` episodes, decaying exploration per episode,
    /// updating the agent every step, and tracking the best score seen.
    /// A new best score at or above `demo_score` immediately triggers one
    /// rendered greedy evaluation episode.
    pub fn train<E>(
        &mut self,
        agent: &mut QLearningAgent<E::State, E::Action>,
        env: &mut E,
    ) -> Result<TrainingResult>
    where
        E: Environment,
    {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        let mut best_score = 0.0_f64;
        let mut window = ScoreWindow::with_capacity(self.config.score_window);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.max_episodes)?;
        }

        for episode in 0..self.config.max_episodes {
            let epsilon = self.epsilon_for_episode(episode);
            let summary = self.run_episode(agent, env, epsilon)?;

            window.push(summary.score);

            if summary.score > best_score {
                best_score = summary.score;
                for observer in &mut self.observers {
                    observer.on_best_score(episode, best_score, epsilon)?;
                }

                if best_score >= self.config.demo_score {
                    let report = self.play(agent, env, 0.0)?;
                    for observer in &mut self.observers {
                        observer.on_evaluation_end(&report)?;
                    }
                }
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &summary)?;
            }

            if self.config.report_interval > 0 && episode % self.config.report_interval == 0 {
                let average = window.mean();
                for observer in &mut self.observers {
                    observer.on_window_average(episode, average)?;
                }
            }
        }

        let result = TrainingResult {
            total_episodes: self.config.max_episodes,
            best_score,
            mean_recent_score: window.mean(),
            table_entries: agent.table_len(),
        };
        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        Ok(result)
    }

    fn run_episode<E>(
        &mut self,
        agent: &mut QLearningAgent<E::State, E::Action>,
        env: &mut E,
        epsilon: f64,
    ) -> Result<EpisodeSummary>
    where
        E: Environment,
    {
        let mut state = env.reset()?;
        let mut total_reward = 0.0;
        let mut score = 0.0;
        let mut steps = 0;
        let mut completed = false;

        for _ in 0..self.config.max_steps {
            let actions = env.legal_actions();
            let action = agent.select_action(&state, &actions, epsilon)?;
            let step = env.step(&action)?;
            total_reward += step.reward;
            steps += 1;
            score = step.info.score;

            // Bootstrap over the successor state's own legal actions,
            // which may differ from the set the action was chosen from.
            let next_actions = env.legal_actions();
            agent.learn_step(
                &state,
                &action,
                step.reward,
                &step.state,
                &next_actions,
                step.done,
            );

            state = step.state;
            if step.done {
                completed = true;
                break;
            }
        }

        Ok(EpisodeSummary {
            steps,
            total_reward,
            score,
            epsilon,
            completed,
        })
    }

    /// Run one evaluation episode at a fixed exploration rate.
    ///
    /// Resets the environment, plays up to `max_steps` steps without
    /// learning, and reports the step count and final score. Rendering is
    /// enabled for the duration of the run; the previous flag value is
    /// restored however the run exits.
    pub fn play<E>(
        &mut self,
        agent: &mut QLearningAgent<E::State, E::Action>,
        env: &mut E,
        epsilon: f64,
    ) -> Result<EvaluationReport>
    where
        E: Environment,
    {
        let mut env = RenderGuard::new(env);

        let mut state = env.reset()?;
        let mut total_reward = 0.0;
        let mut score = 0.0;
        let mut steps = 0;

        for _ in 0..self.config.max_steps {
            let actions = env.legal_actions();
            let action = agent.select_action(&state, &actions, epsilon)?;
            let step = env.step(&action)?;
            total_reward += step.reward;
            steps += 1;
            score = step.info.score;
            state = step.state;
            if step.done {
                break;
            }
        }

        Ok(EvaluationReport {
            steps,
            score,
            total_reward,
        })
    }
}
