//! Crate root module declarations for the chess adversary.
//!
//! This file exposes the board model, move generation, search, computer
//! adversaries and utility helpers so the binary, benches and external
//! tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod square;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod chess_move;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod move_ordering;
    pub mod piece_tables;
    pub mod threading;
}

pub mod engines {
    pub mod difficulty;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod fen_parser;
    pub mod render_game_state;
}
