//! Fixed-depth minimax with alpha-beta pruning and a root-split worker pool.
//!
//! White maximizes and Black minimizes a White-minus-Black score. A side with
//! no legal moves scores as mated (worse the sooner it happens) when in check
//! and as a draw otherwise.
//!
//! The root move list is ordered once, numbered, and dealt round-robin to the
//! workers. Each worker reports its local best; the reduction picks the best
//! score and breaks ties by the lowest root number, so the chosen move does
//! not depend on the thread count or on which worker finished first.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::order_moves;
use crate::search::threading::{partition_round_robin, SharedSearchState, ThreadingConfig};

/// Nodes between two deadline checks. The stop flag itself is read every node.
const DEADLINE_POLL_INTERVAL: u64 = 256;

/// Per-worker search scratch: scorer, shared stop state and a node counter.
pub struct SearchContext<'a> {
    scorer: &'a dyn BoardScorer,
    shared: &'a SharedSearchState,
    nodes: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(scorer: &'a dyn BoardScorer, shared: &'a SharedSearchState) -> Self {
        Self {
            scorer,
            shared,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    fn enter_node(&mut self) -> ChessResult<()> {
        self.nodes += 1;
        let deadline_due = self.nodes % DEADLINE_POLL_INTERVAL == 0;
        if self.shared.should_stop() || (deadline_due && self.shared.poll_deadline()) {
            return Err(ChessErrors::SearchStopped);
        }
        Ok(())
    }
}

/// Score of a side to move that has no legal moves, `depth` plies from the horizon.
#[inline]
pub fn terminal_score(board: &Board, color: Color, depth: u8) -> i32 {
    if !board.is_in_check(color) {
        return 0;
    }
    let mate = MATE_SCORE + i32::from(depth);
    match color {
        Color::White => -mate,
        _ => mate,
    }
}

/// Alpha-beta value of `board` searched `depth` plies deep.
///
/// The board is returned unchanged, including when the search is stopped.
pub fn alpha_beta(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<i32> {
    ctx.enter_node()?;

    if depth == 0 {
        return Ok(ctx.scorer.score(board));
    }

    let color = board.color_to_move();
    let mut moves = board.legal_moves(color);
    if moves.is_empty() {
        return Ok(terminal_score(board, color, depth));
    }

    let maximizing = color == Color::White;
    order_moves(board, &mut moves, maximizing);

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in &moves {
        board.apply_move(mv)?;
        let result = alpha_beta(board, depth - 1, alpha, beta, ctx);
        board.revert_move(mv)?;
        let score = result?;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }

        if beta <= alpha {
            break;
        }
    }

    Ok(best)
}

/// A root move with its position in the ordered root list and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootCandidate {
    pub index: usize,
    pub mv: Move,
    pub score: i32,
}

impl RootCandidate {
    /// Strictly better score for the mover, or an equal score earlier in root order.
    #[inline]
    fn beats(&self, other: &RootCandidate, maximizing: bool) -> bool {
        let better = if maximizing {
            self.score > other.score
        } else {
            self.score < other.score
        };
        better || (self.score == other.score && self.index < other.index)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionOutcome {
    pub best: Option<RootCandidate>,
    pub nodes: u64,
    pub completed: usize,
    pub stopped: bool,
}

/// Search one worker's share of the root moves, in the order given.
///
/// A stop request ends the partition early; the moves finished before it
/// still count.
pub fn search_partition(
    board: &mut Board,
    root_moves: &[(usize, Move)],
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> ChessResult<PartitionOutcome> {
    let maximizing = board.color_to_move() == Color::White;
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut outcome = PartitionOutcome::default();

    for &(index, mv) in root_moves {
        board.apply_move(&mv)?;
        let result = alpha_beta(board, depth.saturating_sub(1), alpha, beta, ctx);
        board.revert_move(&mv)?;

        let score = match result {
            Ok(score) => score,
            Err(ChessErrors::SearchStopped) => {
                outcome.stopped = true;
                break;
            }
            Err(other) => return Err(other),
        };

        outcome.completed += 1;
        let candidate = RootCandidate { index, mv, score };
        if outcome
            .best
            .map_or(true, |best| candidate.beats(&best, maximizing))
        {
            outcome.best = Some(candidate);
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    outcome.nodes = ctx.nodes();
    Ok(outcome)
}

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// `None` when no root move finished and the first ordered move was taken.
    pub score: Option<i32>,
    pub root_index: usize,
    pub root_moves: usize,
    pub completed_root_moves: usize,
    pub nodes: u64,
    pub stopped: bool,
}

/// Pick a move for the side to move on `board`, searching `depth` plies on
/// `threading.normalized_threads()` workers.
pub fn search_best_move(
    board: &Board,
    depth: u8,
    scorer: Arc<dyn BoardScorer>,
    threading: ThreadingConfig,
    time_limit: Option<Duration>,
) -> ChessResult<SearchReport> {
    let shared = SharedSearchState::with_time_limit(time_limit);
    search_best_move_with_state(board, depth, scorer, threading, shared)
}

/// Like `search_best_move`, with caller-owned stop state. Requesting a stop on
/// `shared` ends the search early.
pub fn search_best_move_with_state(
    board: &Board,
    depth: u8,
    scorer: Arc<dyn BoardScorer>,
    threading: ThreadingConfig,
    shared: Arc<SharedSearchState>,
) -> ChessResult<SearchReport> {
    let mut root_board = board.clone();
    let color = root_board.color_to_move();
    let maximizing = color == Color::White;

    let mut root_moves = root_board.legal_moves(color);
    if root_moves.is_empty() {
        return Err(ChessErrors::NoLegalMoves);
    }
    order_moves(&root_board, &mut root_moves, maximizing);

    let numbered: Vec<(usize, Move)> = root_moves.iter().copied().enumerate().collect();
    let workers = threading.normalized_threads().min(numbered.len());
    let depth = depth.max(1);

    let mut handles = Vec::with_capacity(workers);
    for (worker, partition) in partition_round_robin(&numbered, workers)
        .into_iter()
        .enumerate()
    {
        let mut worker_board = board.clone();
        let scorer = Arc::clone(&scorer);
        let shared = Arc::clone(&shared);
        handles.push(thread::spawn(move || {
            let mut ctx = SearchContext::new(scorer.as_ref(), shared.as_ref());
            let outcome = search_partition(&mut worker_board, &partition, depth, &mut ctx);
            shared.add_nodes(ctx.nodes());
            if let Ok(outcome) = &outcome {
                debug!(
                    worker,
                    moves = partition.len(),
                    nodes = outcome.nodes,
                    completed = outcome.completed,
                    best = ?outcome.best.map(|best| (best.mv.to_string(), best.score)),
                    "search worker finished"
                );
            }
            outcome
        }));
    }

    let mut best: Option<RootCandidate> = None;
    let mut completed = 0usize;
    let mut stopped = false;
    for (worker, handle) in handles.into_iter().enumerate() {
        let outcome = match handle.join() {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                error!(worker, error = %err, "search worker returned an error");
                continue;
            }
            Err(_) => {
                error!(worker, error = %ChessErrors::SearchWorkerFailed(worker), "search worker panicked");
                continue;
            }
        };

        completed += outcome.completed;
        stopped |= outcome.stopped;
        if let Some(candidate) = outcome.best {
            if best.map_or(true, |current| candidate.beats(&current, maximizing)) {
                best = Some(candidate);
            }
        }
    }

    let nodes = shared.nodes();
    let report = match best {
        Some(best) => SearchReport {
            best_move: best.mv,
            score: Some(best.score),
            root_index: best.index,
            root_moves: numbered.len(),
            completed_root_moves: completed,
            nodes,
            stopped,
        },
        None => SearchReport {
            best_move: root_moves[0],
            score: None,
            root_index: 0,
            root_moves: numbered.len(),
            completed_root_moves: completed,
            nodes,
            stopped,
        },
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PieceKind, Position};
    use crate::search::board_scoring::{MaterialScorer, PieceSquareScorer};
    use std::time::Instant;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("test position is on the board")
    }

    fn plain_minimax(board: &mut Board, depth: u8, scorer: &dyn BoardScorer) -> i32 {
        if depth == 0 {
            return scorer.score(board);
        }
        let color = board.color_to_move();
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return terminal_score(board, color, depth);
        }

        let mut scores = Vec::with_capacity(moves.len());
        for mv in &moves {
            board.apply_move(mv).expect("apply");
            scores.push(plain_minimax(board, depth - 1, scorer));
            board.revert_move(mv).expect("revert");
        }
        let best = if color == Color::White {
            scores.iter().max()
        } else {
            scores.iter().min()
        };
        best.copied().unwrap_or_default()
    }

    fn back_rank_board() -> Board {
        let mut board = Board::empty();
        for (position, piece) in [
            (pos(0, 6), Piece::new(Color::Black, PieceKind::King)),
            (pos(1, 5), Piece::new(Color::Black, PieceKind::Pawn)),
            (pos(1, 6), Piece::new(Color::Black, PieceKind::Pawn)),
            (pos(1, 7), Piece::new(Color::Black, PieceKind::Pawn)),
            (pos(7, 0), Piece::with_moves(Color::White, PieceKind::Rook, 1)),
            (pos(7, 6), Piece::with_moves(Color::White, PieceKind::King, 1)),
        ] {
            board.add_piece(position, piece).expect("setup");
        }
        board
    }

    #[test]
    fn alpha_beta_matches_unpruned_minimax() {
        let scorer = PieceSquareScorer::default();
        let shared = SharedSearchState::new();
        let positions = [
            (Board::starting_position(), 3u8),
            (Board::from_fen(KIWIPETE).expect("kiwipete"), 2),
            (back_rank_board(), 3),
        ];

        for (mut board, max_depth) in positions {
            for depth in 1..=max_depth {
                let before = board.clone();
                let expected = plain_minimax(&mut board, depth, &scorer);
                let mut ctx = SearchContext::new(&scorer, &shared);
                let actual = alpha_beta(&mut board, depth, i32::MIN, i32::MAX, &mut ctx)
                    .expect("search completes");
                assert_eq!(actual, expected, "depth {depth}");
                assert_eq!(board, before);
            }
        }
    }

    #[test]
    fn finds_back_rank_mate() {
        let board = back_rank_board();
        let report = search_best_move(
            &board,
            2,
            Arc::new(MaterialScorer),
            ThreadingConfig::default(),
            None,
        )
        .expect("white has moves");

        assert_eq!(report.best_move, Move::new(pos(7, 0), pos(0, 0)));
        assert_eq!(report.score, Some(MATE_SCORE + 1));
        assert_eq!(report.completed_root_moves, report.root_moves);
        assert!(!report.stopped);
    }

    #[test]
    fn black_avoids_losing_its_queen() {
        let mut board = Board::empty();
        for (position, piece) in [
            (pos(0, 4), Piece::with_moves(Color::Black, PieceKind::King, 1)),
            (pos(3, 3), Piece::new(Color::Black, PieceKind::Queen)),
            (pos(7, 4), Piece::with_moves(Color::White, PieceKind::King, 1)),
            (pos(5, 3), Piece::new(Color::White, PieceKind::Rook)),
            (pos(5, 5), Piece::new(Color::White, PieceKind::Pawn)),
        ] {
            board.add_piece(position, piece).expect("setup");
        }
        board.set_color_to_move(Color::Black);

        let report = search_best_move(
            &board,
            2,
            Arc::new(MaterialScorer),
            ThreadingConfig::with_threads(2),
            None,
        )
        .expect("black has moves");
        // Qxd3 wins a rook and cannot be recaptured.
        assert_eq!(report.best_move.target(), pos(5, 3));
        assert!(report.score.is_some_and(|score| score < 0));
    }

    #[test]
    fn result_is_independent_of_thread_count() {
        let scorer: Arc<dyn BoardScorer> = Arc::new(PieceSquareScorer::default());
        for board in [
            Board::starting_position(),
            Board::from_fen(KIWIPETE).expect("kiwipete"),
        ] {
            let baseline = search_best_move(
                &board,
                2,
                Arc::clone(&scorer),
                ThreadingConfig::with_threads(1),
                None,
            )
            .expect("search");

            for threads in [2, 3, 4, 7] {
                let report = search_best_move(
                    &board,
                    2,
                    Arc::clone(&scorer),
                    ThreadingConfig::with_threads(threads),
                    None,
                )
                .expect("search");
                assert_eq!(report.best_move, baseline.best_move, "{threads} threads");
                assert_eq!(report.score, baseline.score);
                assert_eq!(report.root_index, baseline.root_index);
            }
        }
    }

    #[test]
    fn stopped_search_falls_back_to_first_ordered_move() {
        let board = Board::from_fen(KIWIPETE).expect("kiwipete");
        let shared = SharedSearchState::new();
        shared.request_stop();

        let report = search_best_move_with_state(
            &board,
            4,
            Arc::new(MaterialScorer),
            ThreadingConfig::default(),
            shared,
        )
        .expect("fallback move");

        assert!(report.stopped);
        assert_eq!(report.completed_root_moves, 0);
        assert_eq!(report.score, None);
        assert_eq!(report.root_index, 0);

        let mut root = board.clone();
        let mut ordered = root.legal_moves(Color::White);
        order_moves(&root, &mut ordered, true);
        assert_eq!(report.best_move, ordered[0]);
    }

    #[test]
    fn time_limit_cuts_a_deep_search_short_with_a_legal_move() {
        let board = Board::from_fen(KIWIPETE).expect("kiwipete");
        let started = Instant::now();

        let report = search_best_move(
            &board,
            6,
            Arc::new(PieceSquareScorer::default()),
            ThreadingConfig::default(),
            Some(Duration::from_millis(100)),
        )
        .expect("a move within the deadline");

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(report.stopped);
        assert!(report.completed_root_moves < report.root_moves);
        let mut root = board.clone();
        assert!(root.legal_moves(Color::White).contains(&report.best_move));
    }

    #[test]
    fn checkmated_side_has_no_move_to_search() {
        let mut board = Board::starting_position();
        for (from, to) in [((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6)), ((0, 3), (4, 7))] {
            let mv = board
                .find_legal_move(pos(from.0, from.1), pos(to.0, to.1))
                .expect("legal");
            board.apply_move(&mv).expect("apply");
        }

        let result = search_best_move(
            &board,
            2,
            Arc::new(MaterialScorer),
            ThreadingConfig::default(),
            None,
        );
        assert!(matches!(result, Err(ChessErrors::NoLegalMoves)));
    }

    #[test]
    fn stalemate_scores_as_a_draw() {
        let mut board = Board::empty();
        for (position, piece) in [
            (pos(0, 0), Piece::new(Color::Black, PieceKind::King)),
            (pos(1, 2), Piece::new(Color::White, PieceKind::Queen)),
            (pos(2, 1), Piece::new(Color::White, PieceKind::King)),
        ] {
            board.add_piece(position, piece).expect("setup");
        }
        board.set_color_to_move(Color::Black);

        let shared = SharedSearchState::new();
        let mut ctx = SearchContext::new(&MaterialScorer, &shared);
        let score = alpha_beta(&mut board, 3, i32::MIN, i32::MAX, &mut ctx).expect("search");
        assert_eq!(score, 0);
    }
}
