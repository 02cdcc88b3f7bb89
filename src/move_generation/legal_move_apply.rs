//! In-place move application with an exact undo path.
//!
//! `apply_move` snapshots every square it is about to touch into an
//! `UndoState` before mutating, so `revert_move` restores the board bit for
//! bit: occupants, move counters, arrival stamps, caches, side to move and ply.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::CastleSide;
use crate::game_state::chess_types::{PieceKind, Position, SpecialMove};
use crate::game_state::undo_state::UndoState;
use crate::move_generation::chess_move::Move;

impl Board {
    /// Play `mv` for whichever side owns the piece on its origin square.
    ///
    /// The move is not checked for legality; callers pass moves taken from
    /// `legal_moves`. Afterwards the side to move is the opponent of the mover.
    pub fn apply_move(&mut self, mv: &Move) -> ChessResult<()> {
        let origin = mv.origin();
        let target = mv.target();
        let moving = self.piece_at(origin);
        if moving.is_empty() {
            return Err(ChessErrors::EmptyOrigin(origin));
        }

        let captured_at = capture_square(mv);
        let captured = self.piece_at(captured_at);
        let castle = castle_side(mv);

        let mut touched = [None; 4];
        touched[0] = Some(*self.square(origin));
        touched[1] = Some(*self.square(target));
        if captured_at != target {
            touched[2] = Some(*self.square(captured_at));
        }
        if let Some(castle) = castle {
            touched[2] = Some(*self.square(origin.with_column(castle.rook_from)));
            touched[3] = Some(*self.square(origin.with_column(castle.rook_to)));
        }

        let undo = UndoState {
            mv: *mv,
            captured,
            captured_at,
            touched_squares: touched,
            prev_color_to_move: self.color_to_move(),
            prev_king_positions: self.king_positions(),
            prev_queen_counts: self.queen_counts(),
        };

        let ply = self.advance_ply();

        if !captured.is_empty() {
            self.square_mut(captured_at).clear();
            self.note_removed(captured_at, captured);
        }

        self.square_mut(origin).clear();
        self.note_removed(origin, moving);

        let mut placed = moving.moved();
        if mv.is_promotion() {
            let kind = match mv.promotion() {
                PieceKind::None => PieceKind::Queen,
                kind => kind,
            };
            placed = placed.promoted_to(kind);
        }
        self.square_mut(target).receive(placed, ply);
        self.note_placed(target, placed);

        if let Some(castle) = castle {
            let rook_from = origin.with_column(castle.rook_from);
            let rook_to = origin.with_column(castle.rook_to);
            let rook = self.piece_at(rook_from);
            if !rook.is_empty() {
                self.square_mut(rook_from).clear();
                self.square_mut(rook_to).receive(rook.moved(), ply);
            }
        }

        self.set_color_to_move(moving.color().opposite());
        self.push_undo(undo);
        Ok(())
    }

    /// Undo the most recent `apply_move`, which must have been `mv`.
    pub fn revert_move(&mut self, mv: &Move) -> ChessResult<()> {
        let undo = self.pop_undo().ok_or(ChessErrors::NothingToUndo)?;
        if undo.mv != *mv {
            let latest = undo.mv;
            self.push_undo(undo);
            return Err(ChessErrors::RevertOutOfOrder {
                latest,
                requested: *mv,
            });
        }

        self.restore_state(&undo);
        Ok(())
    }

    /// Undo whatever was played last and hand the move back.
    pub fn revert_last_move(&mut self) -> ChessResult<Move> {
        let undo = self.pop_undo().ok_or(ChessErrors::NothingToUndo)?;
        self.restore_state(&undo);
        Ok(undo.mv)
    }
}

/// Square whose occupant the move removes. Only en passant differs from the target.
#[inline]
pub fn capture_square(mv: &Move) -> Position {
    match mv.special() {
        SpecialMove::EnPassant => mv.origin().with_column(mv.target().column()),
        _ => mv.target(),
    }
}

#[inline]
fn castle_side(mv: &Move) -> Option<CastleSide> {
    match mv.special() {
        SpecialMove::Castle => CastleSide::for_king_target(mv.target().column()),
        _ => None,
    }
}
