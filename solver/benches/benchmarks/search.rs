use criterion::{black_box, criterion_group, Criterion};
use rand::Rng;

use cube_base::Turn;
use solver::Analyzer;

fn random_scramble(len: usize) -> Vec<Turn> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| Turn::from_index(rng.gen_range(0..18))).collect()
}

fn search_benchmark(c: &mut Criterion) {
    let analyzer = Analyzer::build(6);

    c.bench_function("analyze_random_scramble", |b| {
        b.iter(|| {
            let scramble = random_scramble(20);
            analyzer.analyze(black_box(&scramble))
        })
    });
}

criterion_group! {search, search_benchmark}
