//! Direction tables and the ray/offset walkers shared by the per-piece
//! generators and the attack detector.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, Position};
use crate::move_generation::chess_move::Move;

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Walk each ray from `from` until the edge or the first occupied square.
/// Empty squares are pushed, an enemy on the stopping square is pushed as a
/// capture, a friendly piece is not.
pub fn cast_rays(
    board: &Board,
    from: Position,
    mover: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(d_row, d_column) in directions {
        let mut cursor = from.offset(d_row, d_column);
        while let Some(target) = cursor {
            let occupant = board.piece_at(target);
            if occupant.is_empty() {
                out.push(Move::new(from, target));
            } else {
                if occupant.color() != mover {
                    out.push(Move::new(from, target));
                }
                break;
            }
            cursor = target.offset(d_row, d_column);
        }
    }
}

/// Fixed-offset jumps (knight, king) that stay on the board and do not land
/// on a friendly piece.
pub fn push_offset_moves(
    board: &Board,
    from: Position,
    mover: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(d_row, d_column) in offsets {
        if let Some(target) = from.offset(d_row, d_column) {
            if board.piece_at(target).color() != mover {
                out.push(Move::new(from, target));
            }
        }
    }
}

/// First occupied square along a ray, if any.
pub fn first_piece_along(board: &Board, from: Position, direction: (i8, i8)) -> Option<(Position, Piece)> {
    let (d_row, d_column) = direction;
    let mut cursor = from.offset(d_row, d_column);
    while let Some(position) = cursor {
        let piece = board.piece_at(position);
        if !piece.is_empty() {
            return Some((position, piece));
        }
        cursor = position.offset(d_row, d_column);
    }
    None
}
