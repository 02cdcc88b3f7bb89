//! Piece-square tables used by the positional scorer.
//!
//! Tables are written from White's point of view with rank 8 on the first
//! line, which is row 0 of the board. White reads `table[row][column]` and
//! Black reads the rank-mirrored `table[7 - row][column]`. The king switches
//! from the midgame to the late-game table once both queens are gone.
//!
//! Files on disk hold 8 lines of 8 comma-separated integers. A missing or
//! malformed file is logged and replaced by an all-zero table, so a broken
//! install degrades to plain material scoring instead of failing.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

pub type PieceTable = [[i32; 8]; 8];

pub const ZERO_TABLE: PieceTable = [[0; 8]; 8];

#[rustfmt::skip]
const PAWN: PieceTable = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT: PieceTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP: PieceTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK: PieceTable = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN: PieceTable = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_MID_GAME: PieceTable = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

#[rustfmt::skip]
const KING_LATE_GAME: PieceTable = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10,   0,   0, -10, -20, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -30,   0,   0,   0,   0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTables {
    pub pawn: PieceTable,
    pub knight: PieceTable,
    pub bishop: PieceTable,
    pub rook: PieceTable,
    pub queen: PieceTable,
    pub king_mid_game: PieceTable,
    pub king_late_game: PieceTable,
}

impl Default for PieceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PieceTables {
    /// Standard tables compiled into the binary.
    pub const fn builtin() -> Self {
        Self {
            pawn: PAWN,
            knight: KNIGHT,
            bishop: BISHOP,
            rook: ROOK,
            queen: QUEEN,
            king_mid_game: KING_MID_GAME,
            king_late_game: KING_LATE_GAME,
        }
    }

    pub const fn zeroed() -> Self {
        Self {
            pawn: ZERO_TABLE,
            knight: ZERO_TABLE,
            bishop: ZERO_TABLE,
            rook: ZERO_TABLE,
            queen: ZERO_TABLE,
            king_mid_game: ZERO_TABLE,
            king_late_game: ZERO_TABLE,
        }
    }

    /// Read the seven table files from `dir`. Each file that cannot be read
    /// or parsed becomes a zero table.
    pub fn load_from_dir(dir: &Path) -> Self {
        Self {
            pawn: load_table_or_zero(&dir.join("Pawn.txt")),
            knight: load_table_or_zero(&dir.join("Knight.txt")),
            bishop: load_table_or_zero(&dir.join("Bishop.txt")),
            rook: load_table_or_zero(&dir.join("Rook.txt")),
            queen: load_table_or_zero(&dir.join("Queen.txt")),
            king_mid_game: load_table_or_zero(&dir.join("KingMidGame.txt")),
            king_late_game: load_table_or_zero(&dir.join("KingLateGame.txt")),
        }
    }

    pub fn table(&self, kind: PieceKind, endgame: bool) -> Option<&PieceTable> {
        match kind {
            PieceKind::Pawn => Some(&self.pawn),
            PieceKind::Knight => Some(&self.knight),
            PieceKind::Bishop => Some(&self.bishop),
            PieceKind::Rook => Some(&self.rook),
            PieceKind::Queen => Some(&self.queen),
            PieceKind::King if endgame => Some(&self.king_late_game),
            PieceKind::King => Some(&self.king_mid_game),
            PieceKind::None => None,
        }
    }

    /// Positional bonus of `piece` standing on `position`, from its owner's view.
    #[inline]
    pub fn value(&self, piece: Piece, position: Position, endgame: bool) -> i32 {
        let Some(table) = self.table(piece.kind(), endgame) else {
            return 0;
        };
        let row = match piece.color() {
            Color::White => usize::from(position.row()),
            Color::Black => 7 - usize::from(position.row()),
            Color::None => return 0,
        };
        table[row][usize::from(position.column())]
    }
}

fn load_table_or_zero(path: &Path) -> PieceTable {
    match load_table(path) {
        Ok(table) => table,
        Err(error) => {
            warn!(path = %path.display(), %error, "piece table unavailable, using zeros");
            ZERO_TABLE
        }
    }
}

pub fn load_table(path: &Path) -> ChessResult<PieceTable> {
    let text = fs::read_to_string(path)?;
    parse_piece_table(&text)
}

/// Parse 8 non-blank lines of 8 comma-separated integers.
pub fn parse_piece_table(text: &str) -> ChessResult<PieceTable> {
    let mut table = ZERO_TABLE;
    let mut rows = 0usize;

    for (line_index, line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if rows == 8 {
            return Err(bad_table(line_number, "more than 8 rows"));
        }

        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() != 8 {
            return Err(bad_table(
                line_number,
                format!("expected 8 values, found {}", tokens.len()),
            ));
        }
        for (column, token) in tokens.iter().enumerate() {
            table[rows][column] = token
                .parse::<i32>()
                .map_err(|_| bad_table(line_number, format!("'{token}' is not an integer")))?;
        }
        rows += 1;
    }

    if rows != 8 {
        return Err(bad_table(rows, format!("expected 8 rows, found {rows}")));
    }
    Ok(table)
}

fn bad_table(line: usize, reason: impl Into<String>) -> ChessErrors {
    ChessErrors::InvalidPieceTable {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("test position is on the board")
    }

    fn bundled_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("piece_tables")
    }

    #[test]
    fn bundled_files_match_builtin_tables() {
        assert_eq!(PieceTables::load_from_dir(&bundled_dir()), PieceTables::builtin());
    }

    #[test]
    fn missing_directory_degrades_to_zeros() {
        let tables = PieceTables::load_from_dir(Path::new("/definitely/not/a/table/dir"));
        assert_eq!(tables, PieceTables::zeroed());
    }

    #[test]
    fn black_reads_the_mirrored_row() {
        let tables = PieceTables::builtin();
        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);

        // One step from promotion is worth the same for both sides.
        assert_eq!(tables.value(white_pawn, pos(1, 3), false), 50);
        assert_eq!(tables.value(black_pawn, pos(6, 3), false), 50);
        // d2 and d7 starting squares.
        assert_eq!(tables.value(white_pawn, pos(6, 3), false), -20);
        assert_eq!(tables.value(black_pawn, pos(1, 3), false), -20);
    }

    #[test]
    fn king_switches_table_in_the_endgame() {
        let tables = PieceTables::builtin();
        let king = Piece::new(Color::White, PieceKind::King);
        assert_eq!(tables.value(king, pos(7, 6), false), 30);
        assert_eq!(tables.value(king, pos(7, 6), true), -30);
    }

    #[test]
    fn malformed_text_reports_the_line() {
        let short_row = "1,2,3\n";
        assert!(matches!(
            parse_piece_table(short_row),
            Err(ChessErrors::InvalidPieceTable { line: 1, .. })
        ));

        let mut text = String::new();
        for _ in 0..7 {
            text.push_str("0,0,0,0,0,0,0,0\n");
        }
        text.push_str("0,0,0,x,0,0,0,0\n");
        assert!(matches!(
            parse_piece_table(&text),
            Err(ChessErrors::InvalidPieceTable { line: 8, .. })
        ));
    }
}
