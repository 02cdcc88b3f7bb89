//! Perft: exhaustive legal-move-tree counting used to validate the generator.
//!
//! Each promotion is expanded into its four piece choices so totals line up
//! with the published reference tables.

use std::thread;

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, SpecialMove};
use crate::move_generation::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf nodes `depth` plies below `board` for the side to move.
/// The board is returned to its original state.
pub fn perft(board: &mut Board, depth: u8) -> ChessResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }
    perft_recurse(board, depth, &mut total)?;
    Ok(total)
}

/// Same totals as `perft`, with each root move searched on its own thread
/// against a private clone of the board.
pub fn perft_multi_threaded(board: &Board, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut root = board.clone();
    let color = root.color_to_move();
    let root_moves: Vec<Move> = root
        .legal_moves(color)
        .iter()
        .flat_map(promotion_variants)
        .collect();

    let mut handles = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        let mut local_board = board.clone();
        handles.push(thread::spawn(move || -> ChessResult<PerftCounts> {
            let mut local = PerftCounts::default();
            local_board.apply_move(&mv)?;
            if depth == 1 {
                tally_leaf(&mut local_board, &mv, &mut local);
            } else {
                perft_recurse(&mut local_board, depth - 1, &mut local)?;
            }
            local_board.revert_move(&mv)?;
            Ok(local)
        }));
    }

    let mut total = PerftCounts::default();
    for (index, handle) in handles.into_iter().enumerate() {
        let local = handle
            .join()
            .map_err(|_| ChessErrors::SearchWorkerFailed(index))??;
        total.merge(local);
    }

    debug!(depth, nodes = total.nodes, "perft finished");
    Ok(total)
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    let color = board.color_to_move();
    let moves = board.legal_moves(color);

    for mv in moves.iter().flat_map(promotion_variants) {
        board.apply_move(&mv)?;
        if depth == 1 {
            tally_leaf(board, &mv, counts);
        } else {
            perft_recurse(board, depth - 1, counts)?;
        }
        board.revert_move(&mv)?;
    }

    Ok(())
}

/// Record a leaf reached by `mv`, which has just been applied to `board`.
fn tally_leaf(board: &mut Board, mv: &Move, counts: &mut PerftCounts) {
    counts.nodes += 1;

    if board.last_captured().is_some_and(|piece| !piece.is_empty()) {
        counts.captures += 1;
    }
    match mv.special() {
        SpecialMove::EnPassant => counts.en_passant += 1,
        SpecialMove::Castle => counts.castles += 1,
        SpecialMove::Promotion => counts.promotions += 1,
        _ => {}
    }

    let defender = board.color_to_move();
    if board.is_in_check(defender) {
        counts.checks += 1;
        if !board.has_any_legal_move(defender) {
            counts.checkmates += 1;
        }
    }
}

/// A promotion fans out into one move per promotion piece; anything else is itself.
pub fn promotion_variants(mv: &Move) -> Vec<Move> {
    if mv.is_promotion() {
        PieceKind::PROMOTION_CHOICES
            .iter()
            .map(|&kind| mv.with_promotion(kind))
            .collect()
    } else {
        vec![*mv]
    }
}
