//! Chess Engine Benchmarks
//!
//! Performance benchmarks for critical engine functions using Criterion.

use chess_engine::evaluation::evaluate_material;
use chess_engine::{legal_moves, new_game, parse_fen, select_best_move, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const MIDDLEGAME: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("new_game", |b| b.iter(|| black_box(new_game())));
}

fn bench_legal_moves_starting(c: &mut Criterion) {
    let game = new_game();

    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(legal_moves(&game)))
    });
}

fn bench_legal_moves_middlegame(c: &mut Criterion) {
    let position = parse_fen(MIDDLEGAME).unwrap_or_else(|_| Position::starting());

    c.bench_function("legal_moves_middlegame", |b| {
        b.iter(|| black_box(legal_moves(&position)))
    });
}

fn bench_evaluate_material(c: &mut Criterion) {
    let game = new_game();

    c.bench_function("evaluate_material_starting", |b| {
        b.iter(|| black_box(evaluate_material(&game)))
    });
}

fn bench_fen_round_trip(c: &mut Criterion) {
    c.bench_function("fen_round_trip", |b| {
        b.iter(|| {
            let position = parse_fen(black_box(MIDDLEGAME));
            black_box(position.map(|p| p.to_fen()))
        })
    });
}

fn bench_search_depth_3(c: &mut Criterion) {
    let game = new_game();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("select_best_move_depth_3", |b| {
        b.iter(|| black_box(select_best_move(&game, 3)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_new_game,
    bench_legal_moves_starting,
    bench_legal_moves_middlegame,
    bench_evaluate_material,
    bench_fen_round_trip,
    bench_search_depth_3
);
criterion_main!(benches);
