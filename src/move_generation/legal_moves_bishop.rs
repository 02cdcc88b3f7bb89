use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_shared::{cast_rays, DIAGONAL_DIRECTIONS};

pub fn generate_bishop_moves(board: &Board, from: Position, bishop: Piece, out: &mut Vec<Move>) {
    cast_rays(board, from, bishop.color(), &DIAGONAL_DIRECTIONS, out);
}
