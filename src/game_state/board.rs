//! The board arena.
//!
//! `Board` owns a flat array of 64 `Square`s, the side to move, a global ply
//! counter and the undo stack used for exact `apply_move` / `revert_move`
//! round trips. Moves and positions are plain values that index into the
//! arena; nothing outside the board holds a reference into it.
//!
//! Two caches are kept consistent by every mutator: the location of each
//! king (queried by every legality check) and the number of queens of each
//! color (used to pick the midgame or endgame king table).
//!
//! Move generation, move application and the attack detector live in
//! `move_generation` and extend `Board` with further `impl` blocks.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::KING_START_COLUMN;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};
use crate::game_state::square::Square;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_checks::is_king_in_check;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
    color_to_move: Color,
    ply: u32,
    undo_stack: Vec<UndoState>,
    king_positions: [Option<Position>; 2],
    queen_counts: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces and White to move.
    pub fn empty() -> Self {
        Self {
            squares: std::array::from_fn(|index| Square::new(Position::at_index(index), Piece::EMPTY)),
            color_to_move: Color::White,
            ply: 0,
            undo_stack: Vec::new(),
            king_positions: [None, None],
            queen_counts: [0, 0],
        }
    }

    /// The standard starting layout, White to move.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for color in [Color::White, Color::Black] {
            let back_rank = color.back_rank();
            let pawn_rank = color.pawn_rank();
            for (column, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
                board.squares[back_rank as usize * 8 + column].set_piece(Piece::new(color, *kind));
                board.squares[pawn_rank as usize * 8 + column]
                    .set_piece(Piece::new(color, PieceKind::Pawn));
            }
        }

        board.rebuild_caches();
        board
    }

    #[inline]
    pub fn square(&self, position: Position) -> &Square {
        &self.squares[position.index()]
    }

    /// Checked access by raw coordinates.
    pub fn square_at(&self, row: i32, column: i32) -> ChessResult<&Square> {
        Ok(self.square(Position::new(row, column)?))
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Piece {
        self.squares[position.index()].piece()
    }

    /// Occupied squares of one color, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares
            .iter()
            .filter(move |square| !square.is_empty() && square.piece().color() == color)
            .map(|square| (square.position(), square.piece()))
    }

    #[inline]
    pub fn color_to_move(&self) -> Color {
        self.color_to_move
    }

    pub fn set_color_to_move(&mut self, color: Color) {
        self.color_to_move = color;
    }

    /// Half-moves applied since the board was set up.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Place `piece` on `position` and return whatever stood there before.
    ///
    /// Used for setup and for putting a dragged piece back. Placing a king
    /// while another king of the same color stands elsewhere is rejected.
    pub fn add_piece(&mut self, position: Position, piece: Piece) -> ChessResult<Piece> {
        if piece.kind() == PieceKind::King {
            if let Some(existing) = self.king_position(piece.color()) {
                if existing != position {
                    return Err(ChessErrors::DuplicateKing(piece.color()));
                }
            }
        }

        let previous = self.remove_piece(position);
        self.squares[position.index()].set_piece(piece);
        self.note_placed(position, piece);
        Ok(previous)
    }

    /// Empty `position` and return the piece that stood there.
    pub fn remove_piece(&mut self, position: Position) -> Piece {
        let previous = self.piece_at(position);
        self.squares[position.index()].clear();
        self.note_removed(position, previous);
        previous
    }

    #[inline]
    pub fn king_position(&self, color: Color) -> Option<Position> {
        color.index().and_then(|slot| self.king_positions[slot])
    }

    pub fn queen_standing(&self, color: Color) -> bool {
        color
            .index()
            .map(|slot| self.queen_counts[slot] > 0)
            .unwrap_or(false)
    }

    /// Endgame once both sides have lost every queen.
    pub fn is_endgame(&self) -> bool {
        !self.queen_standing(Color::White) && !self.queen_standing(Color::Black)
    }

    /// Sum of piece values for one color.
    pub fn material(&self, color: Color) -> i32 {
        self.pieces(color).map(|(_, piece)| piece.value()).sum()
    }

    /// The piece taken by the most recent move still on the undo stack;
    /// `Some(Piece::EMPTY)` when that move captured nothing.
    pub fn last_captured(&self) -> Option<Piece> {
        self.undo_stack.last().map(|undo| undo.captured)
    }

    /// Number of moves that can still be reverted.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(self, color)
    }

    pub fn has_no_legal_moves(&mut self, color: Color) -> bool {
        !self.has_any_legal_move(color)
    }

    /// `color` is in check and cannot escape.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && self.has_no_legal_moves(color)
    }

    /// `color` is not in check but has no legal move.
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_in_check(color) && self.has_no_legal_moves(color)
    }

    /// The game result for the side to move, if the game is over.
    pub fn outcome(&mut self) -> Option<GameOutcome> {
        let side = self.color_to_move;
        if !self.has_no_legal_moves(side) {
            return None;
        }
        if self.is_in_check(side) {
            Some(GameOutcome::Checkmate {
                winner: side.opposite(),
            })
        } else {
            Some(GameOutcome::Stalemate)
        }
    }

    /// The mating color, or `Color::None` while the game goes on or ends drawn.
    pub fn winner(&mut self) -> Color {
        match self.outcome() {
            Some(GameOutcome::Checkmate { winner }) => winner,
            _ => Color::None,
        }
    }

    #[inline]
    pub(crate) fn square_mut(&mut self, position: Position) -> &mut Square {
        &mut self.squares[position.index()]
    }

    pub(crate) fn set_ply(&mut self, ply: u32) {
        self.ply = ply;
    }

    pub(crate) fn king_positions(&self) -> [Option<Position>; 2] {
        self.king_positions
    }

    pub(crate) fn queen_counts(&self) -> [u8; 2] {
        self.queen_counts
    }

    pub(crate) fn push_undo(&mut self, undo: UndoState) {
        self.undo_stack.push(undo);
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoState> {
        self.undo_stack.pop()
    }

    /// Restore bookkeeping saved in an undo record.
    pub(crate) fn restore_state(&mut self, undo: &UndoState) {
        for square in undo.touched_squares.iter().flatten() {
            self.squares[square.position().index()] = *square;
        }
        self.color_to_move = undo.prev_color_to_move;
        self.king_positions = undo.prev_king_positions;
        self.queen_counts = undo.prev_queen_counts;
        self.ply = self.ply.saturating_sub(1);
    }

    pub(crate) fn advance_ply(&mut self) -> u32 {
        self.ply += 1;
        self.ply
    }

    /// Update caches after `piece` was taken off `position`.
    pub(crate) fn note_removed(&mut self, position: Position, piece: Piece) {
        let Some(slot) = piece.color().index() else {
            return;
        };
        match piece.kind() {
            PieceKind::King => {
                if self.king_positions[slot] == Some(position) {
                    self.king_positions[slot] = None;
                }
            }
            PieceKind::Queen => {
                self.queen_counts[slot] = self.queen_counts[slot].saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Update caches after `piece` was put on `position`.
    pub(crate) fn note_placed(&mut self, position: Position, piece: Piece) {
        let Some(slot) = piece.color().index() else {
            return;
        };
        match piece.kind() {
            PieceKind::King => self.king_positions[slot] = Some(position),
            PieceKind::Queen => self.queen_counts[slot] += 1,
            _ => {}
        }
    }

    /// Recompute both caches from a full scan. Setup paths call this after
    /// writing squares directly.
    pub(crate) fn rebuild_caches(&mut self) {
        self.king_positions = [None, None];
        self.queen_counts = [0, 0];
        for index in 0..64 {
            let square = self.squares[index];
            self.note_placed(square.position(), square.piece());
        }
    }

    /// Whether the king of `color` still stands untouched on its home square.
    pub(crate) fn king_on_home_square(&self, color: Color) -> Option<Position> {
        let king = self.king_position(color)?;
        let piece = self.piece_at(king);
        (king.row() == color.back_rank()
            && king.column() == KING_START_COLUMN
            && piece.moves_made() == 0)
            .then_some(king)
    }
}
