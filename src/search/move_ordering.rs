//! Cheap capture/promotion ordering so alpha-beta sees strong moves first.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_apply::capture_square;

/// Value of the piece taken plus the promotion piece, signed for the mover:
/// positive for White, negative for Black. Quiet moves score 0.
#[inline]
pub fn ordering_score(board: &Board, mv: &Move) -> i32 {
    let mover = board.piece_at(mv.origin()).color();
    let mut gain = board.piece_at(capture_square(mv)).value();
    if mv.is_promotion() {
        gain += mv.promotion().value();
    }
    match mover {
        Color::Black => -gain,
        _ => gain,
    }
}

/// Score every move, then sort: descending for the maximizing side (White),
/// ascending for the minimizing side. The sort is stable so equal scores keep
/// generation order.
pub fn order_moves(board: &Board, moves: &mut [Move], maximizing: bool) {
    for mv in moves.iter_mut() {
        let score = ordering_score(board, mv);
        mv.set_ordering_score(score);
    }
    if maximizing {
        moves.sort_by_key(|mv| std::cmp::Reverse(mv.ordering_score()));
    } else {
        moves.sort_by_key(|mv| mv.ordering_score());
    }
}
