use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_shared::{push_offset_moves, KNIGHT_OFFSETS};

pub fn generate_knight_moves(board: &Board, from: Position, knight: Piece, out: &mut Vec<Move>) {
    push_offset_moves(board, from, knight.color(), &KNIGHT_OFFSETS, out);
}
