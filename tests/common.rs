//! Common test environments and observers for the tileq test suite.

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use tileq::{
    Environment, EpisodeSummary, Error, EvaluationReport, Result, Step, StepInfo,
    TrainingObserver, TrainingResult,
};

/// Two-state environment: action 0 stays on the start state with reward 1,
/// action 1 ends the episode with reward 0. The score counts rewarded steps.
pub struct LoopOrQuitEnv {
    score: f64,
    render: bool,
}

impl LoopOrQuitEnv {
    pub fn new() -> Self {
        Self {
            score: 0.0,
            render: false,
        }
    }
}

impl Environment for LoopOrQuitEnv {
    type State = u8;
    type Action = usize;

    fn reset(&mut self) -> Result<u8> {
        self.score = 0.0;
        Ok(0)
    }

    fn legal_actions(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn step(&mut self, action: &usize) -> Result<Step<u8>> {
        if *action == 0 {
            self.score += 1.0;
            Ok(Step {
                state: 0,
                reward: 1.0,
                done: false,
                truncated: false,
                info: StepInfo { score: self.score },
            })
        } else {
            Ok(Step {
                state: 1,
                reward: 0.0,
                done: true,
                truncated: false,
                info: StepInfo { score: self.score },
            })
        }
    }

    fn set_render(&mut self, enabled: bool) {
        self.render = enabled;
    }

    fn render_enabled(&self) -> bool {
        self.render
    }
}

/// Environment whose episodes end after a single step, reporting scores
/// from a prescribed sequence. Records the render flag seen at every step
/// so tests can check when rendering was active.
pub struct ScriptedScoreEnv {
    scores: Vec<f64>,
    cursor: usize,
    render: bool,
    pub render_log: Vec<bool>,
}

impl ScriptedScoreEnv {
    pub fn new(scores: Vec<f64>) -> Self {
        assert!(!scores.is_empty());
        Self {
            scores,
            cursor: 0,
            render: false,
            render_log: Vec::new(),
        }
    }

    pub fn render_enabled_now(&self) -> bool {
        self.render
    }
}

impl Environment for ScriptedScoreEnv {
    type State = u8;
    type Action = usize;

    fn reset(&mut self) -> Result<u8> {
        Ok(0)
    }

    fn legal_actions(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn step(&mut self, _action: &usize) -> Result<Step<u8>> {
        self.render_log.push(self.render);
        let score = self.scores[self.cursor.min(self.scores.len() - 1)];
        self.cursor += 1;
        Ok(Step {
            state: 1,
            reward: score,
            done: true,
            truncated: false,
            info: StepInfo { score },
        })
    }

    fn set_render(&mut self, enabled: bool) {
        self.render = enabled;
    }

    fn render_enabled(&self) -> bool {
        self.render
    }
}

/// Environment that never reports `done`; the score counts steps taken in
/// the current episode. Exercises step-cap truncation.
pub struct EndlessEnv {
    steps_this_episode: usize,
    render: bool,
}

impl EndlessEnv {
    pub fn new() -> Self {
        Self {
            steps_this_episode: 0,
            render: false,
        }
    }
}

impl Environment for EndlessEnv {
    type State = u32;
    type Action = usize;

    fn reset(&mut self) -> Result<u32> {
        self.steps_this_episode = 0;
        Ok(0)
    }

    fn legal_actions(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn step(&mut self, _action: &usize) -> Result<Step<u32>> {
        self.steps_this_episode += 1;
        Ok(Step {
            state: self.steps_this_episode as u32 % 4,
            reward: 1.0,
            done: false,
            truncated: false,
            info: StepInfo {
                score: self.steps_this_episode as f64,
            },
        })
    }

    fn set_render(&mut self, enabled: bool) {
        self.render = enabled;
    }

    fn render_enabled(&self) -> bool {
        self.render
    }
}

/// Environment whose `step` always fails. Exercises error exit paths.
pub struct FailingEnv {
    render: bool,
}

impl FailingEnv {
    pub fn new(render: bool) -> Self {
        Self { render }
    }
}

impl Environment for FailingEnv {
    type State = u8;
    type Action = usize;

    fn reset(&mut self) -> Result<u8> {
        Ok(0)
    }

    fn legal_actions(&self) -> Vec<usize> {
        vec![0]
    }

    fn step(&mut self, _action: &usize) -> Result<Step<u8>> {
        Err(Error::Environment {
            message: "display backend lost".to_string(),
        })
    }

    fn set_render(&mut self, enabled: bool) {
        self.render = enabled;
    }

    fn render_enabled(&self) -> bool {
        self.render
    }
}

/// Environment that violates the contract by returning no legal actions.
pub struct NoActionsEnv;

impl Environment for NoActionsEnv {
    type State = u8;
    type Action = usize;

    fn reset(&mut self) -> Result<u8> {
        Ok(0)
    }

    fn legal_actions(&self) -> Vec<usize> {
        Vec::new()
    }

    fn step(&mut self, _action: &usize) -> Result<Step<u8>> {
        unreachable!("no action can ever be selected");
    }

    fn set_render(&mut self, _enabled: bool) {}

    fn render_enabled(&self) -> bool {
        false
    }
}

/// Everything the training loop reported through one observer.
#[derive(Default)]
pub struct EventLog {
    pub started: Option<usize>,
    pub episodes: Vec<(usize, EpisodeSummary)>,
    pub best_scores: Vec<(usize, f64, f64)>,
    pub window_averages: Vec<(usize, f64)>,
    pub evaluations: Vec<EvaluationReport>,
    pub finished: Option<TrainingResult>,
}

/// Observer that records every event into a shared log.
pub struct RecordingObserver {
    log: Rc<RefCell<EventLog>>,
}

impl RecordingObserver {
    pub fn new() -> (Self, Rc<RefCell<EventLog>>) {
        let log = Rc::new(RefCell::new(EventLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl TrainingObserver for RecordingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.log.borrow_mut().started = Some(total_episodes);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.log.borrow_mut().episodes.push((episode, *summary));
        Ok(())
    }

    fn on_best_score(&mut self, episode: usize, score: f64, epsilon: f64) -> Result<()> {
        self.log
            .borrow_mut()
            .best_scores
            .push((episode, score, epsilon));
        Ok(())
    }

    fn on_window_average(&mut self, episode: usize, average: f64) -> Result<()> {
        self.log
            .borrow_mut()
            .window_averages
            .push((episode, average));
        Ok(())
    }

    fn on_evaluation_end(&mut self, report: &EvaluationReport) -> Result<()> {
        self.log.borrow_mut().evaluations.push(*report);
        Ok(())
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        self.log.borrow_mut().finished = Some(result.clone());
        Ok(())
    }
}
