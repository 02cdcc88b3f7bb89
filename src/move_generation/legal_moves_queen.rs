use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_shared::{
    cast_rays, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS,
};

/// Union of the rook and bishop rays.
pub fn generate_queen_moves(board: &Board, from: Position, queen: Piece, out: &mut Vec<Move>) {
    cast_rays(board, from, queen.color(), &ORTHOGONAL_DIRECTIONS, out);
    cast_rays(board, from, queen.color(), &DIAGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn centre_queen_has_twenty_seven_moves() {
        let mut board = Board::empty();
        let from = Position::new(4, 3).expect("d4");
        let queen = Piece::new(Color::White, PieceKind::Queen);
        board.add_piece(from, queen).expect("queen");

        let mut out = Vec::new();
        generate_queen_moves(&board, from, queen, &mut out);
        assert_eq!(out.len(), 27);
    }
}
