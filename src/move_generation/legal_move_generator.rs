//! Full legal move generation pipeline.
//!
//! Gathers pseudo-legal moves piece by piece, then keeps only those that do
//! not leave the mover's king attacked. Legality is decided by simulation:
//! each candidate is applied, the king is tested, and the move is reverted.
//! Discovered checks and pinned pieces fall out of this without any static
//! pin analysis.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::move_generation::chess_move::Move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

impl Board {
    /// Moves obeying piece movement rules for every piece of `color`, in
    /// row-major order of their origin. King safety is not checked.
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        for (from, _) in self.pieces(color) {
            self.pseudo_legal_moves_for(from, &mut out);
        }
        out
    }

    /// Every legal move for `color`, in generation order.
    ///
    /// Takes `&mut self` because candidates are played and taken back on this
    /// board; it is left exactly as it was found.
    pub fn legal_moves(&mut self, color: Color) -> Vec<Move> {
        let candidates = self.pseudo_legal_moves(color);
        candidates
            .into_iter()
            .filter(|mv| self.is_legal_candidate(mv, color))
            .collect()
    }

    /// Early-exit form of `!legal_moves(color).is_empty()`.
    pub fn has_any_legal_move(&mut self, color: Color) -> bool {
        let candidates = self.pseudo_legal_moves(color);
        candidates
            .iter()
            .any(|mv| self.is_legal_candidate(mv, color))
    }

    /// Legal moves of the piece standing on `from`, whichever side owns it.
    pub fn legal_moves_from(&mut self, from: Position) -> Vec<Move> {
        let color = self.piece_at(from).color();
        let mut candidates = Vec::new();
        self.pseudo_legal_moves_for(from, &mut candidates);
        candidates
            .into_iter()
            .filter(|mv| self.is_legal_candidate(mv, color))
            .collect()
    }

    /// The legal move from `from` to `to`, if there is one.
    pub fn find_legal_move(&mut self, from: Position, to: Position) -> Option<Move> {
        self.legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.target() == to)
    }

    fn pseudo_legal_moves_for(&self, from: Position, out: &mut Vec<Move>) {
        let piece = self.piece_at(from);
        match piece.kind() {
            PieceKind::Pawn => generate_pawn_moves(self, from, piece, out),
            PieceKind::Knight => generate_knight_moves(self, from, piece, out),
            PieceKind::Bishop => generate_bishop_moves(self, from, piece, out),
            PieceKind::Rook => generate_rook_moves(self, from, piece, out),
            PieceKind::Queen => generate_queen_moves(self, from, piece, out),
            PieceKind::King => generate_king_moves(self, from, piece, out),
            PieceKind::None => {}
        }
    }

    /// Simulate `mv` and report whether `color`'s king survives it.
    fn is_legal_candidate(&mut self, mv: &Move, color: Color) -> bool {
        // Kings are never captured; a position offering one is already lost.
        if self.piece_at(mv.target()).kind() == PieceKind::King {
            return false;
        }
        if self.apply_move(mv).is_err() {
            return false;
        }
        let safe = !is_king_in_check(self, color);
        let reverted = self.revert_move(mv);
        debug_assert!(reverted.is_ok(), "candidate {mv} failed to revert");
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::GameOutcome;
    use crate::game_state::chess_types::{Piece, SpecialMove};
    use crate::move_generation::legal_move_checks::is_square_attacked;

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("test position is on the board")
    }

    fn play(board: &mut Board, from: (i32, i32), to: (i32, i32)) -> Move {
        let mv = board
            .find_legal_move(pos(from.0, from.1), pos(to.0, to.1))
            .expect("move should be legal");
        board.apply_move(&mv).expect("apply");
        mv
    }

    #[test]
    fn starting_position_has_twenty_moves_each_side() {
        let mut board = Board::starting_position();
        let before = board.clone();
        assert_eq!(board.legal_moves(Color::White).len(), 20);
        assert_eq!(board.legal_moves(Color::Black).len(), 20);
        assert_eq!(board, before);
    }

    #[test]
    fn e2e4_leaves_black_with_twenty_replies() {
        let mut board = Board::starting_position();
        play(&mut board, (6, 4), (4, 4));

        assert_eq!(board.color_to_move(), Color::Black);
        assert!(board.piece_at(pos(4, 4)).is_of_type(Color::White, PieceKind::Pawn));
        assert!(board.piece_at(pos(6, 4)).is_empty());
        assert_eq!(board.legal_moves(Color::Black).len(), 20);
    }

    #[test]
    fn en_passant_lasts_exactly_one_ply() {
        let mut board = Board::starting_position();
        play(&mut board, (6, 4), (4, 4));
        play(&mut board, (1, 0), (2, 0));
        play(&mut board, (4, 4), (3, 4));
        play(&mut board, (1, 3), (3, 3));

        let capture = board
            .find_legal_move(pos(3, 4), pos(2, 3))
            .expect("e5xd6 is available right after d7d5");
        assert_eq!(capture.special(), SpecialMove::EnPassant);

        let before = board.clone();
        board.apply_move(&capture).expect("apply en passant");
        assert!(board.piece_at(pos(3, 3)).is_empty());
        assert!(board.piece_at(pos(2, 3)).is_of_type(Color::White, PieceKind::Pawn));
        assert!(board
            .last_captured()
            .is_some_and(|p| p.is_of_type(Color::Black, PieceKind::Pawn)));
        board.revert_move(&capture).expect("revert");
        assert_eq!(board, before);

        play(&mut board, (7, 6), (5, 5));
        play(&mut board, (0, 6), (2, 5));
        assert!(board.find_legal_move(pos(3, 4), pos(2, 3)).is_none());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut board = Board::empty();
        board
            .add_piece(pos(7, 4), Piece::new(Color::White, PieceKind::King))
            .expect("king");
        board
            .add_piece(pos(5, 4), Piece::new(Color::White, PieceKind::Knight))
            .expect("knight");
        board
            .add_piece(pos(0, 4), Piece::new(Color::Black, PieceKind::Rook))
            .expect("rook");
        board
            .add_piece(pos(0, 0), Piece::new(Color::Black, PieceKind::King))
            .expect("black king");

        assert!(board.legal_moves_from(pos(5, 4)).is_empty());
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked() {
        let mut board = Board::starting_position();
        play(&mut board, (6, 4), (4, 4));
        play(&mut board, (1, 5), (2, 5));
        play(&mut board, (7, 3), (3, 7));

        for mv in board.legal_moves(Color::Black) {
            board.apply_move(&mv).expect("apply");
            let king = board.king_position(Color::Black).expect("king");
            assert!(!is_square_attacked(&board, king, Color::White, false), "{mv}");
            board.revert_move(&mv).expect("revert");
        }
    }

    #[test]
    fn king_captures_are_never_generated() {
        let mut board = Board::empty();
        board
            .add_piece(pos(4, 4), Piece::new(Color::White, PieceKind::Rook))
            .expect("rook");
        board
            .add_piece(pos(7, 7), Piece::new(Color::White, PieceKind::King))
            .expect("king");
        board
            .add_piece(pos(0, 4), Piece::new(Color::Black, PieceKind::King))
            .expect("black king");

        let moves = board.legal_moves(Color::White);
        assert!(moves.iter().all(|mv| mv.target() != pos(0, 4)));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::starting_position();
        play(&mut board, (6, 5), (5, 5));
        play(&mut board, (1, 4), (3, 4));
        play(&mut board, (6, 6), (4, 6));
        play(&mut board, (0, 3), (4, 7));

        assert!(board.is_in_check(Color::White));
        assert!(board.is_checkmate(Color::White));
        assert!(!board.is_stalemate(Color::White));
        assert_eq!(board.winner(), Color::Black);
        assert_eq!(
            board.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let mut board = Board::empty();
        board
            .add_piece(pos(0, 0), Piece::new(Color::Black, PieceKind::King))
            .expect("black king");
        board
            .add_piece(pos(1, 2), Piece::new(Color::White, PieceKind::Queen))
            .expect("queen");
        board
            .add_piece(pos(2, 1), Piece::new(Color::White, PieceKind::King))
            .expect("white king");
        board.set_color_to_move(Color::Black);

        assert!(board.is_stalemate(Color::Black));
        assert!(!board.is_checkmate(Color::Black));
        assert_eq!(board.outcome(), Some(GameOutcome::Stalemate));
        assert_eq!(board.winner(), Color::None);
    }
}
