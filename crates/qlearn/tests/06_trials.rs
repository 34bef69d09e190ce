mod common;

use common::{OneStateEnv, WalkEnv};
use qlearn::{
    run_greedy_trial, run_random_trial, BinEdges, DiscreteState, QLearnError, QTable, Trainer,
    TrainerConfig,
};

#[test]
fn greedy_trial_follows_the_table() {
    let bins = BinEdges::new(vec![vec![]]).unwrap();
    let mut table = QTable::zeros(&[1], 2);
    let s = DiscreteState::new(vec![0]);

    table.set(&s, 0, 1.0).unwrap();
    let alive = run_greedy_trial(&mut OneStateEnv, &bins, &table, 25).unwrap();
    assert_eq!(alive.steps, 25);
    assert_eq!(alive.total_reward, 25.0);
    assert!(!alive.terminated);

    table.set(&s, 1, 2.0).unwrap();
    let failed = run_greedy_trial(&mut OneStateEnv, &bins, &table, 25).unwrap();
    assert_eq!(failed.steps, 1);
    assert!(failed.terminated);
}

#[test]
fn greedy_trial_rejects_a_mismatched_table() {
    let bins = BinEdges::new(vec![vec![0.0]]).unwrap();
    let table = QTable::zeros(&[1], 2);
    let err = run_greedy_trial(&mut OneStateEnv, &bins, &table, 10).unwrap_err();
    assert!(matches!(err, QLearnError::TableShapeMismatch { .. }));
}

#[test]
fn random_trial_ends_when_the_walk_leaves_its_bounds() {
    let mut env = WalkEnv::new(2);
    let mut rng = fastrand::Rng::with_seed(4);
    let report = run_random_trial(&mut env, 10_000, &mut rng).unwrap();
    assert!(report.terminated);
    assert!(report.steps >= 3);
    assert_eq!(report.total_reward, report.steps as f64);
}

#[test]
fn trained_table_replays_greedily_against_a_fresh_env() {
    let config = TrainerConfig {
        bin_edges: BinEdges::new(vec![vec![-1.5, -0.5, 0.5, 1.5]]).unwrap(),
        max_episodes: 300,
        max_steps: 60,
        solved_step_threshold: 59,
        goal_streak: 20,
        seed: Some(21),
        ..TrainerConfig::default()
    };
    let bins = config.bin_edges.clone();
    let outcome = Trainer::new(config, WalkEnv::new(2)).unwrap().run().unwrap();

    let greedy = run_greedy_trial(&mut WalkEnv::new(2), &bins, &outcome.table, 60).unwrap();
    assert!(outcome.table.is_finite());
    // leaving [-2, 2] takes at least three steps
    assert!(greedy.steps >= 3, "{greedy:?}");
    assert!(greedy.steps <= 60);
}
