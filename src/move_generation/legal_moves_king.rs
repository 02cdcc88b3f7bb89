use crate::game_state::board::Board;
use crate::game_state::chess_rules::{CastleSide, LONG_CASTLE, SHORT_CASTLE};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position, SpecialMove};
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{push_offset_moves, KING_OFFSETS};

pub fn generate_king_moves(board: &Board, from: Position, king: Piece, out: &mut Vec<Move>) {
    push_offset_moves(board, from, king.color(), &KING_OFFSETS, out);
    generate_castling_moves(board, from, king.color(), out);
}

fn generate_castling_moves(board: &Board, king_from: Position, side: Color, out: &mut Vec<Move>) {
    if board.king_on_home_square(side) != Some(king_from) {
        return;
    }

    for castle in [LONG_CASTLE, SHORT_CASTLE] {
        if castling_allowed(board, king_from, side, &castle) {
            out.push(Move::with_special(
                king_from,
                king_from.with_column(castle.king_to),
                SpecialMove::Castle,
            ));
        }
    }
}

/// Unmoved rook in the corner, nothing in between, and no enemy attack on
/// any square the king stands on while castling (so never out of check).
fn castling_allowed(board: &Board, king_from: Position, side: Color, castle: &CastleSide) -> bool {
    let rook = board.piece_at(king_from.with_column(castle.rook_from));
    if !rook.is_of_type(side, PieceKind::Rook) || rook.moves_made() != 0 {
        return false;
    }

    let between_empty = castle
        .must_be_empty
        .iter()
        .all(|&column| board.piece_at(king_from.with_column(column)).is_empty());
    if !between_empty {
        return false;
    }

    let enemy = side.opposite();
    castle
        .king_path
        .iter()
        .all(|&column| !is_square_attacked(board, king_from.with_column(column), enemy, false))
}
