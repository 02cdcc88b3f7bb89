//! Minimal head-to-head adversary match harness for local testing.
//!
//! Runs two `ComputerAdversary` implementations against each other on one
//! board until checkmate, stalemate or a ply cap, recording every move in
//! coordinate notation.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::ComputerAdversary;
use crate::game_state::board::{Board, GameOutcome};
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_plies: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_plies: 300 }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
    pub started_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "outcome={:?} plies={} white_avg_ms={:.3} black_avg_ms={:.3} started_at={}",
            self.outcome,
            self.played_moves.len(),
            average_ms(self.white_total_time_ns, self.white_move_count),
            average_ms(self.black_total_time_ns, self.black_move_count),
            self.started_at.to_rfc3339()
        )
    }
}

fn average_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        total_ns as f64 / f64::from(moves) / 1_000_000.0
    }
}

/// Play `white` against `black` starting from `start`.
///
/// Each proposed move is checked against the legal move list before it is
/// applied; an illegal proposal aborts the match with `IllegalMove`.
pub fn play_match(
    white: &mut dyn ComputerAdversary,
    black: &mut dyn ComputerAdversary,
    start: Board,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    let started_at = Utc::now();
    let mut board = start;

    let mut played_moves = Vec::<String>::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    let outcome = loop {
        if let Some(finished) = board.outcome() {
            break match finished {
                GameOutcome::Checkmate {
                    winner: Color::White,
                } => MatchOutcome::WhiteWinCheckmate,
                GameOutcome::Checkmate { .. } => MatchOutcome::BlackWinCheckmate,
                GameOutcome::Stalemate => MatchOutcome::DrawStalemate,
            };
        }
        if played_moves.len() >= config.max_plies as usize {
            break MatchOutcome::DrawMaxPlies;
        }

        let mover = board.color_to_move();
        let started = Instant::now();
        let proposed = if mover == Color::White {
            white.choose_move(&board)?
        } else {
            black.choose_move(&board)?
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            _ => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let legal = board
            .find_legal_move(proposed.origin(), proposed.target())
            .filter(|mv| *mv == proposed)
            .ok_or(ChessErrors::IllegalMove(proposed))?;
        let chosen = legal.with_promotion(proposed.promotion());

        played_moves.push(chosen.to_string());
        board.apply_move(&chosen)?;
    };

    let result = MatchResult {
        outcome,
        final_board: board,
        played_moves,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
        started_at,
    };
    info!(
        white = white.name(),
        black = black.name(),
        outcome = ?result.outcome,
        plies = result.played_moves.len(),
        "match finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::{MiniMaxAdversary, SearchConfig};
    use crate::engines::engine_random::RandomAdversary;
    use crate::game_state::chess_types::{PieceKind, Position};
    use crate::move_generation::chess_move::Move;

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("test position is on the board")
    }

    #[test]
    fn seeded_random_match_is_reproducible() {
        let config = MatchConfig { max_plies: 40 };
        let run = || {
            let mut white = RandomAdversary::with_seed(Color::White, 5);
            let mut black = RandomAdversary::with_seed(Color::Black, 6);
            play_match(&mut white, &mut black, Board::starting_position(), config)
                .expect("match runs")
        };

        let first = run();
        let second = run();
        assert_eq!(first.played_moves, second.played_moves);
        assert_eq!(first.outcome, second.outcome);
        assert!(first.played_moves.len() <= 40);
        assert_eq!(
            first.white_move_count + first.black_move_count,
            first.played_moves.len() as u32
        );
    }

    #[test]
    fn finished_position_reports_without_moving() {
        let mut board = Board::starting_position();
        for (from, to) in [((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6)), ((0, 3), (4, 7))] {
            let mv = board
                .find_legal_move(pos(from.0, from.1), pos(to.0, to.1))
                .expect("legal");
            board.apply_move(&mv).expect("apply");
        }

        let mut white = RandomAdversary::with_seed(Color::White, 1);
        let mut black = RandomAdversary::with_seed(Color::Black, 2);
        let result = play_match(&mut white, &mut black, board, MatchConfig::default())
            .expect("match runs");
        assert_eq!(result.outcome, MatchOutcome::BlackWinCheckmate);
        assert!(result.played_moves.is_empty());
    }

    #[test]
    fn minimax_delivers_mate_in_one() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen");
        let mut white = MiniMaxAdversary::new(
            Color::White,
            SearchConfig {
                depth: 2,
                ..SearchConfig::default()
            },
        );
        let mut black = RandomAdversary::with_seed(Color::Black, 9);

        let result = play_match(&mut white, &mut black, board, MatchConfig { max_plies: 1 })
            .expect("match runs");
        assert_eq!(result.outcome, MatchOutcome::WhiteWinCheckmate);
        assert_eq!(result.played_moves, vec!["a1a8".to_owned()]);
        assert_eq!(result.white_move_count, 1);
        assert_eq!(result.black_move_count, 0);
    }

    struct Cheater;

    impl ComputerAdversary for Cheater {
        fn name(&self) -> &str {
            "Cheater"
        }

        fn color(&self) -> Color {
            Color::White
        }

        fn choose_move(&mut self, _board: &Board) -> ChessResult<Move> {
            Ok(Move::new(pos(7, 3), pos(3, 7)))
        }

        fn choose_promotion(&mut self) -> PieceKind {
            PieceKind::Queen
        }
    }

    #[test]
    fn illegal_proposal_aborts_the_match() {
        let mut black = RandomAdversary::with_seed(Color::Black, 2);
        let result = play_match(
            &mut Cheater,
            &mut black,
            Board::starting_position(),
            MatchConfig::default(),
        );
        assert!(matches!(result, Err(ChessErrors::IllegalMove(_))));
    }
}
