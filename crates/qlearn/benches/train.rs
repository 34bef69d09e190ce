use criterion::{criterion_group, criterion_main, Criterion};
use qlearn::{BinEdges, Env, Trainer, TrainerConfig, Transition};

/// Pendulum-like tilt that drifts away from upright unless pushed back.
struct DriftEnv {
    angle: f64,
    velocity: f64,
}

impl Env for DriftEnv {
    fn reset(&mut self) -> Vec<f64> {
        self.angle = 0.01;
        self.velocity = 0.0;
        vec![self.angle, self.velocity]
    }

    fn step(&mut self, action: usize) -> Transition {
        let push = if action == 0 { -0.02 } else { 0.02 };
        self.velocity += 0.05 * self.angle + push;
        self.angle += self.velocity * 0.1;
        let terminal = self.angle.abs() > 0.3;
        Transition::new(vec![self.angle, self.velocity], 1.0, terminal)
    }

    fn obs_size(&self) -> usize {
        2
    }

    fn action_size(&self) -> usize {
        2
    }
}

fn bench_training_run(c: &mut Criterion) {
    let config = TrainerConfig {
        bin_edges: BinEdges::cart_pole(),
        max_episodes: 100,
        goal_streak: 10,
        seed: Some(0),
        ..TrainerConfig::default()
    };
    c.bench_function("train_100_episodes", |b| {
        b.iter(|| {
            let env = DriftEnv {
                angle: 0.0,
                velocity: 0.0,
            };
            Trainer::new(config.clone(), env)
                .and_then(Trainer::run)
                .map(|outcome| outcome.episodes_to_solve)
        });
    });
}

criterion_group!(benches, bench_training_run);
criterion_main!(benches);
