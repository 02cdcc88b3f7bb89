use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position, SpecialMove};
use crate::move_generation::chess_move::Move;

/// Pseudo-legal pawn moves: single and double advance, diagonal captures,
/// en passant. Any advance or capture landing on the far rank is flagged as
/// a promotion.
pub fn generate_pawn_moves(board: &Board, from: Position, pawn: Piece, out: &mut Vec<Move>) {
    let color = pawn.color();
    let direction = color.pawn_direction();
    if direction == 0 {
        return;
    }

    if let Some(one_step) = from.offset(direction, 0) {
        if board.piece_at(one_step).is_empty() {
            out.push(Move::with_special(from, one_step, advance_kind(one_step)));

            if pawn.moves_made() == 0 {
                if let Some(two_steps) = one_step.offset(direction, 0) {
                    if board.piece_at(two_steps).is_empty() {
                        out.push(Move::with_special(from, two_steps, SpecialMove::NonAttacking));
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(diagonal) = from.offset(direction, side) else {
            continue;
        };

        if board.piece_at(diagonal).color() == color.opposite() {
            let special = if is_last_rank(diagonal) {
                SpecialMove::Promotion
            } else {
                SpecialMove::None
            };
            out.push(Move::with_special(from, diagonal, special));
        } else if can_capture_en_passant(board, from, color, side) {
            out.push(Move::with_special(from, diagonal, SpecialMove::EnPassant));
        }
    }
}

/// True when the enemy pawn beside `from` (on the `side` column) arrived on the
/// immediately preceding ply with its two-square advance.
pub fn can_capture_en_passant(board: &Board, from: Position, color: Color, side: i8) -> bool {
    let enemy = color.opposite();
    let Some(beside) = from.offset(0, side) else {
        return false;
    };
    if from.row() != enemy.double_push_rank() {
        return false;
    }

    let square = board.square(beside);
    let victim = square.piece();
    victim.is_of_type(enemy, PieceKind::Pawn)
        && victim.moves_made() == 1
        && square.plies_standing(board.ply()) == Some(0)
        && from
            .offset(color.pawn_direction(), side)
            .map(|landing| board.piece_at(landing).is_empty())
            .unwrap_or(false)
}

#[inline]
fn is_last_rank(position: Position) -> bool {
    position.row() == 0 || position.row() == 7
}

#[inline]
fn advance_kind(target: Position) -> SpecialMove {
    if is_last_rank(target) {
        SpecialMove::Promotion
    } else {
        SpecialMove::NonAttacking
    }
}
