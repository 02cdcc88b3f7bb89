use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

use chess_adversary::chess_errors::ChessResult;
use chess_adversary::engines::difficulty::Difficulty;
use chess_adversary::engines::engine_random::RandomAdversary;
use chess_adversary::engines::engine_trait::Adversary;
use chess_adversary::game_state::board::Board;
use chess_adversary::game_state::chess_types::Color;
use chess_adversary::search::piece_tables::PieceTables;
use chess_adversary::search::threading::{ThreadingConfig, DEFAULT_SEARCH_THREADS};
use chess_adversary::utils::engine_match_harness::{play_match, MatchConfig};
use chess_adversary::utils::render_game_state::render_game_state;

/// Let two computer adversaries play each other and print the result.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Difficulty of the White adversary.
    #[arg(long, default_value = "medium")]
    white: Difficulty,

    /// Difficulty of the Black adversary.
    #[arg(long, default_value = "medium")]
    black: Difficulty,

    /// Stop the game as a draw after this many plies.
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Directory holding Pawn.txt, Knight.txt, ... piece-square tables.
    #[arg(long, value_name = "DIR")]
    piece_tables: Option<PathBuf>,

    /// Root-search worker threads per adversary.
    #[arg(long, default_value_t = DEFAULT_SEARCH_THREADS)]
    threads: usize,

    /// Seed for the random adversaries.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from this FEN instead of the initial position.
    #[arg(long)]
    fen: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_adversary(
    level: Difficulty,
    color: Color,
    tables: &PieceTables,
    threading: ThreadingConfig,
    seed: Option<u64>,
) -> Adversary {
    match (level, seed) {
        (Difficulty::VeryEasy, Some(seed)) => {
            let per_color = if color == Color::White { seed } else { seed.wrapping_add(1) };
            Adversary::Random(RandomAdversary::with_seed(color, per_color))
        }
        _ => level.adversary(color, tables.clone(), threading),
    }
}

fn run(cli: &Cli) -> ChessResult<()> {
    let start = match &cli.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::starting_position(),
    };
    let tables = match &cli.piece_tables {
        Some(dir) => PieceTables::load_from_dir(dir),
        None => PieceTables::builtin(),
    };
    let threading = ThreadingConfig::with_threads(cli.threads);

    let mut white = build_adversary(cli.white, Color::White, &tables, threading, cli.seed);
    let mut black = build_adversary(cli.black, Color::Black, &tables, threading, cli.seed);

    println!("{} (White) vs {} (Black)", cli.white, cli.black);
    let result = play_match(
        &mut white,
        &mut black,
        start,
        MatchConfig {
            max_plies: cli.max_plies,
        },
    )?;

    println!("{}", result.played_moves.join(" "));
    println!("{}", render_game_state(&result.final_board));
    println!("{}", result.report());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "match aborted");
            ExitCode::FAILURE
        }
    }
}
