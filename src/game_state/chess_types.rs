//! Value types shared by the board, the move generator and the search.
//!
//! Everything in this module is `Copy` and carries no reference back into a
//! board. A `Position` is validated once at construction, so code that holds
//! one can index the square arena without further checks.

use std::fmt;

use crate::chess_errors::{ChessErrors, ChessResult};

/// Side of a piece. `None` marks an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    None,
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::None => Color::None,
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Slot in per-color caches; `None` has no slot.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        match self {
            Color::None => None,
            Color::White => Some(0),
            Color::Black => Some(1),
        }
    }

    /// Row delta of a pawn advance. White starts on row 6 and walks toward row 0.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::None => 0,
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::Black => 0,
            _ => 7,
        }
    }

    /// Row where this side's pawns start.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::Black => 1,
            _ => 6,
        }
    }

    /// Row a pawn of this side lands on after its two-square advance.
    #[inline]
    pub const fn double_push_rank(self) -> u8 {
        match self {
            Color::Black => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::None => "None",
            Color::White => "White",
            Color::Black => "Black",
        };
        f.write_str(name)
    }
}

/// Kind of a piece. `None` marks an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceKind {
    #[default]
    None,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in the order a picker offers them.
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Material value in centipawns. The king is priceless and counts as zero.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::None => 0,
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Lowercase letter used by FEN and coordinate notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::None => '.',
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::None => "None",
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        f.write_str(name)
    }
}

/// A piece value. Pieces are replaced, never edited in place: `moved` and
/// `promoted_to` hand back a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    moves_made: u32,
}

impl Piece {
    /// Canonical empty-square sentinel.
    pub const EMPTY: Piece = Piece {
        color: Color::None,
        kind: PieceKind::None,
        moves_made: 0,
    };

    /// A fresh piece. A missing color or kind collapses to `EMPTY`.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self::with_moves(color, kind, 0)
    }

    pub const fn with_moves(color: Color, kind: PieceKind, moves_made: u32) -> Self {
        if matches!(color, Color::None) || matches!(kind, PieceKind::None) {
            return Self::EMPTY;
        }
        Self {
            color,
            kind,
            moves_made,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn moves_made(self) -> u32 {
        self.moves_made
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self.kind, PieceKind::None)
    }

    #[inline]
    pub fn is_of_type(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.kind.value()
    }

    /// The same piece after one more real move.
    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            moves_made: self.moves_made + 1,
            ..self
        }
    }

    /// The same piece wearing a new kind; the move counter is kept.
    #[inline]
    pub const fn promoted_to(self, kind: PieceKind) -> Self {
        Self::with_moves(self.color, kind, self.moves_made)
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            _ => self.kind.letter(),
        }
    }
}

/// Board coordinate. Row 0 is Black's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    pub fn new(row: i32, column: i32) -> ChessResult<Self> {
        if !(0..8).contains(&row) || !(0..8).contains(&column) {
            return Err(ChessErrors::InvalidPosition { row, column });
        }
        Ok(Self {
            row: row as u8,
            column: column as u8,
        })
    }

    /// Arena index to position for indices known to be below 64.
    #[inline]
    pub(crate) const fn at_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self {
            row: (index / 8) as u8,
            column: (index % 8) as u8,
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.column as usize
    }

    /// Shift by a row/column delta, or `None` when that walks off the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_column: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let column = self.column as i8 + d_column;
        if (0..8).contains(&row) && (0..8).contains(&column) {
            Some(Self {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    /// Same row, different column. Used for castling and en passant squares.
    #[inline]
    pub(crate) fn with_column(self, column: u8) -> Self {
        debug_assert!(column < 8);
        Self {
            row: self.row,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.column);
        let rank = char::from(b'8' - self.row);
        write!(f, "{file}{rank}")
    }
}

/// Extra meaning attached to a generated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpecialMove {
    #[default]
    None,
    /// Pawn push; may not capture.
    NonAttacking,
    EnPassant,
    Promotion,
    Castle,
}
