#![allow(dead_code)]

use qlearn::{Env, Transition};

/// Single observation, two actions. Action 0 keeps the episode alive with
/// reward 1; action 1 fails it immediately.
pub struct OneStateEnv;

impl Env for OneStateEnv {
    fn reset(&mut self) -> Vec<f64> {
        vec![0.0]
    }

    fn step(&mut self, action: usize) -> Transition {
        if action == 0 {
            Transition::new(vec![0.0], 1.0, false)
        } else {
            Transition::new(vec![0.0], 0.0, true)
        }
    }

    fn obs_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        2
    }
}

/// Deterministic walk on the integer line. Action 0 steps left, action 1
/// steps right; leaving `[-limit, limit]` fails the episode. The observation
/// carries an unused leading dimension so only the trailing one is binned.
pub struct WalkEnv {
    pub position: i32,
    pub limit: i32,
}

impl WalkEnv {
    pub fn new(limit: i32) -> Self {
        Self { position: 0, limit }
    }

    fn observation(&self) -> Vec<f64> {
        vec![99.0, f64::from(self.position)]
    }
}

impl Env for WalkEnv {
    fn reset(&mut self) -> Vec<f64> {
        self.position = 0;
        self.observation()
    }

    fn step(&mut self, action: usize) -> Transition {
        self.position += if action == 0 { -1 } else { 1 };
        let terminal = self.position.abs() > self.limit;
        Transition::new(self.observation(), 1.0, terminal)
    }

    fn obs_size(&self) -> usize {
        2
    }

    fn action_size(&self) -> usize {
        2
    }
}

/// Never fails on its own; fails on step `fail_at` of every episode when set.
pub struct ScriptedEnv {
    pub fail_at: Option<usize>,
    step: usize,
}

impl ScriptedEnv {
    pub fn new(fail_at: Option<usize>) -> Self {
        Self { fail_at, step: 0 }
    }
}

impl Env for ScriptedEnv {
    fn reset(&mut self) -> Vec<f64> {
        self.step = 0;
        vec![0.0]
    }

    fn step(&mut self, _action: usize) -> Transition {
        let terminal = self.fail_at == Some(self.step);
        self.step += 1;
        Transition::new(vec![0.0], 1.0, terminal)
    }

    fn obs_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        2
    }
}

/// Returns an observation of the wrong length after the first step.
pub struct ShrinkingEnv;

impl Env for ShrinkingEnv {
    fn reset(&mut self) -> Vec<f64> {
        vec![0.0, 0.0]
    }

    fn step(&mut self, _action: usize) -> Transition {
        Transition::new(vec![0.0], 1.0, false)
    }

    fn obs_size(&self) -> usize {
        2
    }

    fn action_size(&self) -> usize {
        2
    }
}

/// Produces NaN observations after every step.
pub struct NanEnv;

impl Env for NanEnv {
    fn reset(&mut self) -> Vec<f64> {
        vec![0.0]
    }

    fn step(&mut self, _action: usize) -> Transition {
        Transition::new(vec![f64::NAN], 1.0, false)
    }

    fn obs_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        2
    }
}
