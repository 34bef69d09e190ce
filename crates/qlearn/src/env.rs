/// Result of advancing an environment by one action.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Observation vector after the action was applied.
    pub observation: Vec<f64>,
    /// Scalar reward for the action.
    pub reward: f64,
    /// Whether the episode ended in failure.
    pub terminal: bool,
}

impl Transition {
    #[must_use]
    pub fn new(observation: Vec<f64>, reward: f64, terminal: bool) -> Self {
        Self {
            observation,
            reward,
            terminal,
        }
    }
}

/// Reinforcement learning environment with a discrete action space.
///
/// Modelled on the Gym interface: [`reset`] starts an episode and returns the
/// initial observation, [`step`] applies an action and reports the outcome.
/// Implementations are driven synchronously by a single trainer and never
/// shared between attempts.
///
/// [`reset`]: Env::reset
/// [`step`]: Env::step
pub trait Env {
    /// Reset the environment to a starting state and return the initial
    /// observation vector.
    fn reset(&mut self) -> Vec<f64>;

    /// Advance the environment by one action in `[0, action_size())`.
    fn step(&mut self, action: usize) -> Transition;

    /// Length of every observation vector this environment produces.
    fn obs_size(&self) -> usize;

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn reset(&mut self) -> Vec<f64> {
        (**self).reset()
    }

    fn step(&mut self, action: usize) -> Transition {
        (**self).step(action)
    }

    fn obs_size(&self) -> usize {
        (**self).obs_size()
    }

    fn action_size(&self) -> usize {
        (**self).action_size()
    }
}
