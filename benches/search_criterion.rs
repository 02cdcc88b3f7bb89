use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_adversary::game_state::board::Board;
use chess_adversary::search::board_scoring::{BoardScorer, PieceSquareScorer};
use chess_adversary::search::minimax::search_best_move;
use chess_adversary::search::threading::ThreadingConfig;

const POSITIONS: &[(&str, &str)] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_beta");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let scorer: Arc<dyn BoardScorer> = Arc::new(PieceSquareScorer::default());

    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).expect("benchmark FEN should parse");
        for threads in [1usize, 4] {
            let id = BenchmarkId::new(format!("{name}_d3"), format!("{threads}t"));
            group.bench_with_input(id, &threads, |b, &threads| {
                b.iter(|| {
                    let report = search_best_move(
                        black_box(&board),
                        3,
                        Arc::clone(&scorer),
                        ThreadingConfig::with_threads(threads),
                        None,
                    )
                    .expect("position has legal moves");
                    black_box(report.nodes)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
