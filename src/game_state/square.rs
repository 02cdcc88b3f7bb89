//! A single cell of the board arena.

use crate::game_state::chess_types::{Piece, Position};

/// One of the 64 board cells. Every square always holds a concrete `Piece`;
/// an unoccupied square holds `Piece::EMPTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    position: Position,
    piece: Piece,
    /// Ply at which the current occupant arrived here. `None` for pieces that
    /// were placed during setup and have not moved onto this square since.
    arrived_at_ply: Option<u32>,
}

impl Square {
    #[inline]
    pub const fn new(position: Position, piece: Piece) -> Self {
        Self {
            position,
            piece,
            arrived_at_ply: None,
        }
    }

    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn arrived_at_ply(&self) -> Option<u32> {
        self.arrived_at_ply
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.piece.is_empty()
    }

    /// Number of half-moves the occupant has been standing here, measured
    /// against `current_ply`. `None` when it never moved here.
    #[inline]
    pub fn plies_standing(&self, current_ply: u32) -> Option<u32> {
        self.arrived_at_ply
            .map(|arrived| current_ply.saturating_sub(arrived))
    }

    /// Replace the occupant; the arrival stamp is reset.
    #[inline]
    pub(crate) fn set_piece(&mut self, piece: Piece) {
        self.piece = piece;
        self.arrived_at_ply = None;
    }

    /// Put a piece here as the result of a move made on `ply`.
    #[inline]
    pub(crate) fn receive(&mut self, piece: Piece, ply: u32) {
        self.piece = piece;
        self.arrived_at_ply = Some(ply);
    }

    #[inline]
    pub(crate) fn set_arrived_at_ply(&mut self, ply: Option<u32>) {
        self.arrived_at_ply = ply;
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.set_piece(Piece::EMPTY);
    }
}
