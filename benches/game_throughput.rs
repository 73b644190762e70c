use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ruins::core::GameConfig;
use ruins::events::NullSink;
use ruins::runner::GameRunner;
use ruins::strategy::{builtin, Entrant};

fn roster(size: usize) -> Vec<Entrant> {
    (0..size)
        .map(|i| if i % 2 == 0 { builtin::drunkard() } else { builtin::eager_thief() })
        .collect()
}

fn full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");
    for size in [2usize, 10, 40] {
        let entrants = roster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entrants, |b, entrants| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let runner = GameRunner::new(GameConfig::default(), entrants, seed).unwrap();
                black_box(runner.run(&mut NullSink))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, full_game);
criterion_main!(benches);
