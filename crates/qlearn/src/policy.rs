use crate::discretize::DiscreteState;
use crate::error::Result;
use crate::table::QTable;

/// Epsilon-greedy action selection.
///
/// One uniform draw decides between exploring (a uniformly random action)
/// and exploiting (the greedy action of `table`, lowest index on ties). A
/// draw is consumed on every call so the random stream does not depend on
/// the table contents.
///
/// # Errors
///
/// Returns [`QLearnError::StateOutOfRange`](crate::QLearnError::StateOutOfRange)
/// if `state` does not index `table`.
pub fn select_action(
    table: &QTable,
    state: &DiscreteState,
    exploration_rate: f64,
    rng: &mut fastrand::Rng,
) -> Result<usize> {
    if rng.f64() < exploration_rate {
        Ok(rng.usize(..table.action_count()))
    } else {
        table.greedy_action(state)
    }
}
