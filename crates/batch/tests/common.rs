#![allow(dead_code)]

use qlearn::{BinEdges, Env, RateParams, TrainerConfig, Transition};

/// Walk on the integer line that fails once it leaves `[-limit, limit]`.
pub struct WalkEnv {
    position: i32,
    limit: i32,
}

impl WalkEnv {
    pub fn new(limit: i32) -> Self {
        Self { position: 0, limit }
    }
}

impl Env for WalkEnv {
    fn reset(&mut self) -> Vec<f64> {
        self.position = 0;
        vec![0.0]
    }

    fn step(&mut self, action: usize) -> Transition {
        self.position += if action == 0 { -1 } else { 1 };
        let terminal = self.position.abs() > self.limit;
        Transition::new(vec![f64::from(self.position)], 1.0, terminal)
    }

    fn obs_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        2
    }
}

/// Declares two observation dimensions but only ever produces one.
pub struct BrokenEnv;

impl Env for BrokenEnv {
    fn reset(&mut self) -> Vec<f64> {
        vec![0.0]
    }

    fn step(&mut self, _action: usize) -> Transition {
        Transition::new(vec![0.0], 0.0, true)
    }

    fn obs_size(&self) -> usize {
        2
    }

    fn action_size(&self) -> usize {
        2
    }
}

pub fn walk_config() -> TrainerConfig {
    TrainerConfig {
        bin_edges: BinEdges::new(vec![vec![-1.5, -0.5, 0.5, 1.5]]).unwrap(),
        max_episodes: 30,
        max_steps: 20,
        solved_step_threshold: 19,
        goal_streak: 3,
        learning_rate: RateParams::new(0.5, 0.01, 0.05),
        exploration_rate: RateParams::new(0.5, 0.02, 0.0),
        discount_factor: 0.9,
        ..TrainerConfig::default()
    }
}
