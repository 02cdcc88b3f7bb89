//! Conversions between board positions and algebraic coordinates.
//!
//! Files `a..h` map to columns 0..7. Rank 8 is row 0 (Black's back rank) and
//! rank 1 is row 7.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Position;

/// Convert an algebraic square (for example: "e4") to a `Position`.
#[inline]
pub fn algebraic_to_position(square: &str) -> ChessResult<Position> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    Position::new(i32::from(b'8' - rank), i32::from(file - b'a'))
}

/// Convert a `Position` to algebraic notation (for example: "e4").
#[inline]
pub fn position_to_algebraic(position: Position) -> String {
    position.to_string()
}
