use crate::game_state::chess_types::{Color, Piece, Position};
use crate::game_state::square::Square;
use crate::move_generation::chess_move::Move;

/// Single undo record for `apply_move` / `revert_move`.
///
/// The board keeps these on a LIFO stack. `captured` is the piece that stood
/// on the capture square before the move (`Piece::EMPTY` for quiet moves), so
/// the top of the stack doubles as the "last taken" piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub captured: Piece,
    pub captured_at: Position,

    /// Every square the move touched, exactly as it was before the move.
    pub touched_squares: [Option<Square>; 4],

    pub prev_color_to_move: Color,
    pub prev_king_positions: [Option<Position>; 2],
    pub prev_queen_counts: [u8; 2],
}
