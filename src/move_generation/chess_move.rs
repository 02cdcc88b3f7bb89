//! The move value produced by the generator and consumed by apply/revert and search.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::{PieceKind, Position, SpecialMove};

/// A candidate move: origin and target squares plus its special meaning.
///
/// `promotion` is the kind a promoting pawn becomes; it defaults to the queen
/// and is picked by the mover before the move is applied. `ordering_score`
/// is scratch space for move ordering. Neither field takes part in equality:
/// two moves are equal when origin, target and special kind match.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Move {
    origin: Position,
    target: Position,
    special: SpecialMove,
    promotion: PieceKind,
    ordering_score: i32,
}

impl Move {
    #[inline]
    pub const fn new(origin: Position, target: Position) -> Self {
        Self::with_special(origin, target, SpecialMove::None)
    }

    #[inline]
    pub const fn with_special(origin: Position, target: Position, special: SpecialMove) -> Self {
        Self {
            origin,
            target,
            special,
            promotion: match special {
                SpecialMove::Promotion => PieceKind::Queen,
                _ => PieceKind::None,
            },
            ordering_score: 0,
        }
    }

    #[inline]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    #[inline]
    pub const fn target(&self) -> Position {
        self.target
    }

    #[inline]
    pub const fn special(&self) -> SpecialMove {
        self.special
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.special, SpecialMove::Promotion)
    }

    /// Kind the pawn turns into; `PieceKind::None` for non-promotions.
    #[inline]
    pub const fn promotion(&self) -> PieceKind {
        self.promotion
    }

    /// The same move promoting to `kind`. Ignored unless this is a promotion.
    pub fn with_promotion(self, kind: PieceKind) -> Self {
        if !self.is_promotion() || !PieceKind::PROMOTION_CHOICES.contains(&kind) {
            return self;
        }
        Self {
            promotion: kind,
            ..self
        }
    }

    #[inline]
    pub const fn ordering_score(&self) -> i32 {
        self.ordering_score
    }

    #[inline]
    pub fn set_ordering_score(&mut self, score: i32) {
        self.ordering_score = score;
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.target == other.target && self.special == other.special
    }
}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.target.hash(state);
        self.special.hash(state);
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.target)?;
        if self.is_promotion() {
            write!(f, "{}", self.promotion.letter())?;
        }
        Ok(())
    }
}
