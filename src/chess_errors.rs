//! Errors used throughout the rules engine and adversary.
//!
//! `ChessErrors` is the single error type returned by board mutation, setup
//! parsing, table loading and search. Variants carry enough context for a
//! caller to log or display a precise diagnostic.
//!
//! Usage guidelines:
//! - Coordinate validation happens once, when a `Position` is built. Code that
//!   already holds a `Position` never sees `InvalidPosition`.
//! - `NoLegalMoves` is a normal game-level condition (checkmate or stalemate)
//!   and is expected to be matched on by callers.
//! - `EmptyOrigin`, `NothingToUndo` and `RevertOutOfOrder` indicate the caller drove the board out
//!   of sequence and are programmer errors.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Position};
use crate::move_generation::chess_move::Move;

/// Unified error type for the crate.
#[derive(Debug, Error)]
pub enum ChessErrors {
    /// Row or column outside `0..=7`.
    #[error("position ({row}, {column}) does not exist on the board")]
    InvalidPosition { row: i32, column: i32 },

    /// A coordinate string such as `"e4"` failed to parse.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraicString(String),

    /// A FEN string had malformed structure or tokens.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A second king of the same color was placed on the board.
    #[error("a {0} king is already on the board")]
    DuplicateKing(Color),

    /// A move was applied from a square that holds no piece.
    #[error("no piece stands on the origin square {0}")]
    EmptyOrigin(Position),

    /// `revert_move` was called with an empty undo stack.
    #[error("no move left to revert")]
    NothingToUndo,

    /// `revert_move` was asked to undo something other than the latest move.
    #[error("cannot revert {requested}: the most recent move is {latest}")]
    RevertOutOfOrder { latest: Move, requested: Move },

    /// An adversary proposed a move that is not legal on the current board.
    #[error("illegal move proposed: {0}")]
    IllegalMove(Move),

    /// The side asked to move has no legal moves (checkmate or stalemate).
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A piece-square table file was readable but malformed.
    #[error("invalid piece table at line {line}: {reason}")]
    InvalidPieceTable { line: usize, reason: String },

    /// The search deadline passed or a stop was requested mid-search.
    #[error("search stopped before completion")]
    SearchStopped,

    /// A root-search worker thread panicked before reporting.
    #[error("search worker {0} failed to complete")]
    SearchWorkerFailed(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ChessResult<T> = Result<T, ChessErrors>;
