//! Synthetic tilt task: a linearised pole on a sliding base.
//!
//! Observation is `[position, velocity, angle, angular_velocity]`, matching
//! the layout the default cart-pole bins expect. Action 0 pushes the base
//! left, action 1 pushes it right. Every step pays a reward of 1; the episode
//! fails once the angle or the position leaves its bounds.

use qlearn::{Env, Transition};

const DT: f64 = 0.02;
const PUSH: f64 = 10.0;
const GRAVITY_GAIN: f64 = 15.0;
const PUSH_GAIN: f64 = 1.5;
const ANGLE_LIMIT: f64 = 0.21;
const POSITION_LIMIT: f64 = 2.4;
const RESET_SPREAD: f64 = 0.05;

pub struct TiltEnv {
    state: [f64; 4],
    rng: fastrand::Rng,
}

impl TiltEnv {
    /// Creates the task. A seed makes the reset perturbations reproducible.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            state: [0.0; 4],
            rng,
        }
    }

    fn failed(&self) -> bool {
        let [x, _, theta, _] = self.state;
        theta.abs() > ANGLE_LIMIT || x.abs() > POSITION_LIMIT
    }
}

impl Env for TiltEnv {
    fn reset(&mut self) -> Vec<f64> {
        for value in &mut self.state {
            *value = (self.rng.f64() * 2.0 - 1.0) * RESET_SPREAD;
        }
        self.state.to_vec()
    }

    fn step(&mut self, action: usize) -> Transition {
        let force = if action == 0 { -PUSH } else { PUSH };
        let [x, x_dot, theta, theta_dot] = self.state;

        let x_acc = force / 10.0;
        let theta_acc = GRAVITY_GAIN * theta - PUSH_GAIN * x_acc;

        self.state = [
            x + DT * x_dot,
            x_dot + DT * x_acc,
            theta + DT * theta_dot,
            theta_dot + DT * theta_acc,
        ];
        Transition::new(self.state.to_vec(), 1.0, self.failed())
    }

    fn obs_size(&self) -> usize {
        4
    }

    fn action_size(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_stays_near_upright() {
        let mut env = TiltEnv::new(Some(3));
        for _ in 0..20 {
            let obs = env.reset();
            assert_eq!(obs.len(), 4);
            assert!(obs.iter().all(|v| v.abs() <= RESET_SPREAD));
        }
    }

    #[test]
    fn seeded_resets_repeat() {
        let mut a = TiltEnv::new(Some(11));
        let mut b = TiltEnv::new(Some(11));
        assert_eq!(a.reset(), b.reset());
    }

    #[test]
    fn pushing_right_tilts_the_pole_left() {
        let mut env = TiltEnv::new(Some(0));
        env.state = [0.0; 4];
        let t = env.step(1);
        assert!(t.observation[1] > 0.0);
        assert!(t.observation[3] < 0.0);
        assert!(!t.terminal);
    }

    #[test]
    fn unattended_pole_falls() {
        let mut env = TiltEnv::new(Some(0));
        env.reset();
        env.state = [0.0, 0.0, 0.1, 0.0];
        let mut steps = 0;
        loop {
            steps += 1;
            // alternate pushes so the base stays put while the pole falls
            if env.step(steps % 2).terminal {
                break;
            }
            assert!(steps < 200, "pole never fell");
        }
        assert!(env.state[2].abs() > ANGLE_LIMIT);
    }
}
