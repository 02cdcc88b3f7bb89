use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_shared::{cast_rays, ORTHOGONAL_DIRECTIONS};

pub fn generate_rook_moves(board: &Board, from: Position, rook: Piece, out: &mut Vec<Move>) {
    cast_rays(board, from, rook.color(), &ORTHOGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn rook_on_open_board_has_fourteen_moves() {
        let mut board = Board::empty();
        let from = Position::new(3, 3).expect("d5");
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        board.add_piece(from, rook).expect("rook");

        let mut out = Vec::new();
        generate_rook_moves(&board, from, rook, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn boxed_in_rook_has_no_moves() {
        let board = Board::starting_position();
        let from = Position::new(0, 0).expect("a8");
        let mut out = Vec::new();
        generate_rook_moves(&board, from, board.piece_at(from), &mut out);
        assert!(out.is_empty());
    }
}
