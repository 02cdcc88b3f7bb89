//! Random-move adversary.
//!
//! Selects uniformly from legal moves and picks promotions uniformly from the
//! four promotion pieces. Used for the easiest difficulty and for tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::ComputerAdversary;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::chess_move::Move;

pub struct RandomAdversary {
    color: Color,
    rng: StdRng,
}

impl RandomAdversary {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self {
            color,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ComputerAdversary for RandomAdversary {
    fn name(&self) -> &str {
        "Random"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn choose_move(&mut self, board: &Board) -> ChessResult<Move> {
        let mut scratch = board.clone();
        let legal_moves = scratch.legal_moves(self.color);

        let picked = *legal_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or(ChessErrors::NoLegalMoves)?;

        let promotion = self.choose_promotion();
        Ok(picked.with_promotion(promotion))
    }

    fn choose_promotion(&mut self) -> PieceKind {
        PieceKind::PROMOTION_CHOICES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PieceKind::Queen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, Position};

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("test position is on the board")
    }

    #[test]
    fn picks_a_legal_move_for_its_color() {
        let board = Board::starting_position();
        let mut adversary = RandomAdversary::with_seed(Color::Black, 11);
        let mut scratch = board.clone();
        let legal = scratch.legal_moves(Color::Black);

        for _ in 0..20 {
            let mv = adversary.choose_move(&board).expect("black has moves");
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let board = Board::starting_position();
        let mut first = RandomAdversary::with_seed(Color::White, 42);
        let mut second = RandomAdversary::with_seed(Color::White, 42);
        for _ in 0..10 {
            assert_eq!(
                first.choose_move(&board).expect("move"),
                second.choose_move(&board).expect("move")
            );
        }
    }

    #[test]
    fn promotions_cover_all_choices() {
        let mut adversary = RandomAdversary::with_seed(Color::White, 3);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let kind = adversary.choose_promotion();
            assert!(PieceKind::PROMOTION_CHOICES.contains(&kind));
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn no_moves_is_an_error() {
        let mut board = Board::empty();
        board
            .add_piece(pos(0, 0), Piece::new(Color::Black, PieceKind::King))
            .expect("king");
        board
            .add_piece(pos(1, 2), Piece::new(Color::White, PieceKind::Queen))
            .expect("queen");
        board
            .add_piece(pos(2, 1), Piece::new(Color::White, PieceKind::King))
            .expect("king");

        let mut adversary = RandomAdversary::with_seed(Color::Black, 1);
        assert!(matches!(
            adversary.choose_move(&board),
            Err(ChessErrors::NoLegalMoves)
        ));
    }
}
