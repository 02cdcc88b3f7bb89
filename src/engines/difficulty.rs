//! Difficulty levels and the strategy each one selects.

use std::fmt;
use std::str::FromStr;

use crate::engines::engine_minimax::{MiniMaxAdversary, SearchConfig};
use crate::engines::engine_random::RandomAdversary;
use crate::engines::engine_trait::Adversary;
use crate::game_state::chess_types::Color;
use crate::search::piece_tables::PieceTables;
use crate::search::threading::ThreadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    /// Search settings for the minimax levels; `None` for the random level.
    pub fn search_config(self, threading: ThreadingConfig) -> Option<SearchConfig> {
        let (depth, use_piece_tables) = match self {
            Difficulty::VeryEasy => return None,
            Difficulty::Easy => (2, false),
            Difficulty::Medium => (3, true),
            Difficulty::Hard => (4, true),
            Difficulty::VeryHard => (5, true),
        };
        Some(SearchConfig {
            depth,
            use_piece_tables,
            threading,
            time_limit: None,
        })
    }

    /// Build the adversary this level plays with.
    pub fn adversary(self, color: Color, tables: PieceTables, threading: ThreadingConfig) -> Adversary {
        match self.search_config(threading) {
            Some(config) => Adversary::MiniMax(MiniMaxAdversary::with_tables(color, config, tables)),
            None => Adversary::Random(RandomAdversary::new(color)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::VeryEasy => "Very easy",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Accepts `very-easy`, `very_easy`, `VERY_EASY`, `very easy` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "veryeasy" => Ok(Difficulty::VeryEasy),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "veryhard" => Ok(Difficulty::VeryHard),
            _ => Err(format!("unknown difficulty '{s}'")),
        }
    }
}
