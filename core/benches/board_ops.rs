use criterion::{Criterion, criterion_group, criterion_main};
use estopim_core::{Board, BoardConfig, RandomMinePlacer};

fn bench_generate(c: &mut Criterion) {
    let config = BoardConfig::new(200, 200).unwrap();
    c.bench_function("generate_200x200", |b| {
        b.iter(|| Board::generate(config, RandomMinePlacer::new(0xC0FFEE)))
    });
}

fn bench_flood_fill(c: &mut Criterion) {
    // a mineless board floods corner to corner
    let board = Board::from_mine_coords(200, 200, &[]).unwrap();
    c.bench_function("flood_fill_200x200", |b| b.iter(|| board.reveal((0, 0)).unwrap()));
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
