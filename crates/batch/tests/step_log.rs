mod common;

use std::fs;

use batch::{BatchRunner, CsvStepLog};
use common::{walk_config, WalkEnv};
use qlearn::{StepObserver, StepRecord, StepTag};

#[test]
fn rows_carry_episode_step_tag_and_observation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");

    let mut log = CsvStepLog::create(&path).unwrap();
    let observation = [0.5, -1.25];
    log.record(&StepRecord {
        episode: 0,
        step: None,
        tag: StepTag::Reset,
        observation: &observation,
        reward: 0.0,
        terminal: false,
    })
    .unwrap();
    log.record(&StepRecord {
        episode: 0,
        step: Some(0),
        tag: StepTag::Step,
        observation: &observation,
        reward: 1.0,
        terminal: true,
    })
    .unwrap();
    log.finish().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "episode,step,tag,reward,terminal,obs_0,obs_1",
            "0,,reset,0,0,0.5,-1.25",
            "0,0,step,1,1,0.5,-1.25",
        ]
    );
}

#[test]
fn batch_writes_one_log_per_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("steps");
    let report = BatchRunner::new(3)
        .with_workers(2)
        .with_seed(9)
        .with_step_logs(&logs)
        .run(&walk_config(), |_| WalkEnv::new(2))
        .unwrap();
    assert_eq!(report.completed(), 3);

    for (index, outcome) in report.outcomes().enumerate() {
        let text = fs::read_to_string(logs.join(format!("attempt-{index}.csv"))).unwrap();
        let rows = text.lines().count() - 1;
        let resets = text.lines().filter(|l| l.contains(",reset,")).count();
        let steps: usize = outcome.episodes.iter().map(|e| e.steps).sum();
        assert_eq!(resets, outcome.episodes.len());
        assert_eq!(rows, resets + steps);
    }
}
