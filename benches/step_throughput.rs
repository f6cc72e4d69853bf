use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::SmallRng, SeedableRng};
use snake_gridworld::config::WorldConfig;
use snake_gridworld::types::{Action, RandomReasonableMovesGame, VictorDeterminableGame};
use snake_gridworld::world::GridWorld;

fn run_one_round(world: &mut GridWorld, rng: &mut SmallRng, total_iterations: &mut u64) {
    if world.is_over() {
        world.reset();
    } else {
        let actions: Vec<Action> = world
            .random_reasonable_move_for_each_snake(rng)
            .into_iter()
            .map(|(_, action)| action)
            .collect();
        black_box(world.step_all(&actions));
        *total_iterations += 1;
    }
}

fn bench_world(b: &mut Bencher, config: WorldConfig) {
    b.iter_custom(|iter_count| {
        let mut world = GridWorld::seeded(config, 11).unwrap();
        let mut rng = SmallRng::from_entropy();
        let mut total_iterations = 0;

        let start = Instant::now();
        while total_iterations < iter_count {
            run_one_round(&mut world, &mut rng, &mut total_iterations);
        }
        start.elapsed()
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut g = c.benchmark_group("GridWorlds");
    g.bench_function("solo random rollout 10x10", |b| {
        bench_world(b, WorldConfig::default());
    });
    g.bench_function("duel random rollout 10x10", |b| {
        bench_world(b, WorldConfig::two_player());
    });
    g.bench_function("duel random rollout 20x20", |b| {
        bench_world(
            b,
            WorldConfig {
                grid_size: 20,
                ..WorldConfig::two_player()
            },
        );
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
