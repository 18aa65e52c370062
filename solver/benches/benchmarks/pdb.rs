use criterion::{black_box, criterion_group, Criterion};

use cube_core::{build_basic_table, build_transition_table, successor, CORNERS_2, CORNER_1};
use solver::pdb::generate;

fn pdb_benchmark(c: &mut Criterion) {
    let basic = build_basic_table(CORNER_1);
    let table = build_transition_table(CORNERS_2, &basic);
    let seed = 0u64;

    c.bench_function("pdb_generate_corners2", |b| {
        b.iter(|| {
            generate(black_box(CORNERS_2.size), black_box(12), &[seed], |i| {
                let mut out = [0u64; 18];
                for m in 0..18u8 {
                    out[m as usize] = successor(&table, i as u32, cube_base::Turn::from_index(m)) as u64;
                }
                out
            })
        })
    });
}

criterion_group! {pdb, pdb_benchmark}
