//! Minimax adversary: fixed-depth alpha-beta over a root-split worker pool.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::ComputerAdversary;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, MaterialScorer, PieceSquareScorer};
use crate::search::minimax::{search_best_move, SearchReport};
use crate::search::piece_tables::PieceTables;
use crate::search::threading::ThreadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub use_piece_tables: bool,
    pub threading: ThreadingConfig,
    /// Wall-clock budget per move; `None` searches to full depth.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            use_piece_tables: true,
            threading: ThreadingConfig::default(),
            time_limit: None,
        }
    }
}

pub struct MiniMaxAdversary {
    color: Color,
    config: SearchConfig,
    scorer: Arc<dyn BoardScorer>,
    last_report: Option<SearchReport>,
}

impl MiniMaxAdversary {
    /// Uses the built-in piece tables when `config.use_piece_tables` is set.
    pub fn new(color: Color, config: SearchConfig) -> Self {
        Self::with_tables(color, config, PieceTables::builtin())
    }

    pub fn with_tables(color: Color, config: SearchConfig, tables: PieceTables) -> Self {
        let scorer: Arc<dyn BoardScorer> = if config.use_piece_tables {
            Arc::new(PieceSquareScorer::new(tables))
        } else {
            Arc::new(MaterialScorer)
        };
        Self::with_scorer(color, config, scorer)
    }

    pub fn with_scorer(color: Color, config: SearchConfig, scorer: Arc<dyn BoardScorer>) -> Self {
        Self {
            color,
            config,
            scorer,
            last_report: None,
        }
    }

    /// Details of the most recent `choose_move` search.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl ComputerAdversary for MiniMaxAdversary {
    fn name(&self) -> &str {
        "MiniMax"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn choose_move(&mut self, board: &Board) -> ChessResult<Move> {
        let report = if board.color_to_move() == self.color {
            search_best_move(
                board,
                self.config.depth,
                Arc::clone(&self.scorer),
                self.config.threading,
                self.config.time_limit,
            )?
        } else {
            let mut own_turn = board.clone();
            own_turn.set_color_to_move(self.color);
            search_best_move(
                &own_turn,
                self.config.depth,
                Arc::clone(&self.scorer),
                self.config.threading,
                self.config.time_limit,
            )?
        };

        info!(
            color = %self.color,
            depth = self.config.depth,
            chosen = %report.best_move,
            score = ?report.score,
            nodes = report.nodes,
            stopped = report.stopped,
            "minimax move chosen"
        );

        self.last_report = Some(report);
        Ok(report.best_move.with_promotion(self.choose_promotion()))
    }

    fn choose_promotion(&mut self) -> PieceKind {
        PieceKind::Queen
    }
}
