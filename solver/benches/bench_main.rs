use criterion::criterion_main;

mod benchmarks;

criterion_main! {
    benchmarks::pdb::pdb,
    benchmarks::search::search,
}
