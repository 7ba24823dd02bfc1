use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use theseus::{
    config,
    generators::{self, CheckpointPlacement, MazeGenerator},
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut g = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(7);

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            g.reset();
            generators::recursive_backtracker(&mut g, &mut rng)
        })
    });
}

fn bench_generate_maze_32(c: &mut Criterion) {
    let mut g = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut generator = MazeGenerator::from_seed(7)
        .with_checkpoints(CheckpointPlacement::Random { count: 16 });

    c.bench_function("generate_maze_32", move |b| {
        b.iter(|| generator.generate(&mut g))
    });
}

fn bench_generate_classic_maze(c: &mut Criterion) {
    let mut g = Grid::new(RowsCount(config::DEFAULT_ROWS),
                          ColumnsCount(config::DEFAULT_COLUMNS)).unwrap();
    let mut generator = MazeGenerator::from_seed(7).with_checkpoints(config::classic_checkpoints());

    c.bench_function("generate_classic_maze", move |b| {
        b.iter(|| generator.generate(&mut g))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_generate_maze_32,
    bench_generate_classic_maze
);
criterion_main!(benches);
