//! Criterion benchmark measuring full legal-move computation: raw generation
//! plus the check-safety filter for every occupied square of a position.

use criterion::{criterion_group, criterion_main, Criterion};
use tabiya::chess::board::Board;
use tabiya::chess::core::{Square, BOARD_SIZE};

fn select_all_legal(board: &Board) {
    for index in 0..BOARD_SIZE {
        let square = Square::try_from(index).unwrap();
        if board.at(square).is_some() {
            std::hint::black_box(board.select_legal(square).unwrap());
        }
    }
}

fn movegen_bench(c: &mut Criterion) {
    let positions = [
        Board::starting(),
        Board::from_placement("r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1").unwrap(),
        Board::from_placement("2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4").unwrap(),
    ];
    let mut group = c.benchmark_group("Legal move computation");
    group.throughput(criterion::Throughput::Elements(positions.len() as u64));
    let _ = group.bench_function("select_legal_all_squares", |b| {
        b.iter(|| {
            for position in &positions {
                select_all_legal(position);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, movegen_bench);
criterion_main!(benches);
