//! FEN-to-Board parser.
//!
//! The board carries no castling-rights or en-passant fields; both are
//! derived from per-piece history instead. Parsing therefore translates them:
//! - pawns off their starting row, and kings or rooks without a matching
//!   castling right, are marked as having moved once;
//! - an en-passant target marks the double-pushed pawn as having arrived on
//!   the current ply, which opens the capture window for exactly one reply.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KING_START_COLUMN, LONG_CASTLE, SHORT_CASTLE};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};
use crate::utils::algebraic::algebraic_to_position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CastlingRights {
    white_short: bool,
    white_long: bool,
    black_short: bool,
    black_long: bool,
}

impl CastlingRights {
    fn short(self, color: Color) -> bool {
        match color {
            Color::White => self.white_short,
            Color::Black => self.black_short,
            Color::None => false,
        }
    }

    fn long(self, color: Color) -> bool {
        match color {
            Color::White => self.white_long,
            Color::Black => self.black_long,
            Color::None => false,
        }
    }
}

impl Board {
    /// Build a board from a FEN string. The halfmove and fullmove fields may
    /// be omitted.
    pub fn from_fen(fen: &str) -> ChessResult<Board> {
        parse_fen(fen)
    }
}

pub fn parse_fen(fen: &str) -> ChessResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    halfmove_part
        .parse::<u32>()
        .map_err(|_| invalid(format!("halfmove clock '{halfmove_part}'")))?;
    let fullmove = fullmove_part
        .parse::<u32>()
        .map_err(|_| invalid(format!("fullmove number '{fullmove_part}'")))?;

    let side = parse_side_to_move(side_part)?;
    let rights = parse_castling_rights(castling_part)?;

    let mut board = Board::empty();
    for (position, piece) in parse_board(board_part)? {
        let moves_made = setup_moves_made(position, piece, rights);
        board.add_piece(
            position,
            Piece::with_moves(piece.color(), piece.kind(), moves_made),
        )?;
    }

    let ply = fullmove.saturating_sub(1) * 2 + u32::from(side == Color::Black);
    board.set_ply(ply);
    board.set_color_to_move(side);

    if en_passant_part != "-" {
        let target = algebraic_to_position(en_passant_part)?;
        let pusher = side.opposite();
        let pawn_at = target
            .offset(pusher.pawn_direction(), 0)
            .filter(|at| at.row() == pusher.double_push_rank())
            .ok_or_else(|| invalid(format!("en-passant square {en_passant_part}")))?;
        if !board.piece_at(pawn_at).is_of_type(pusher, PieceKind::Pawn) {
            return Err(invalid(format!("no pawn behind en-passant square {en_passant_part}")));
        }
        board.square_mut(pawn_at).set_arrived_at_ply(Some(ply));
    }

    board.rebuild_caches();
    Ok(board)
}

fn parse_board(board_part: &str) -> ChessResult<Vec<(Position, Piece)>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut placed = Vec::with_capacity(32);
    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut column = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                column += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("piece character '{ch}'")))?;
            if column >= 8 {
                return Err(invalid("rank has too many files"));
            }

            placed.push((Position::new(row as i32, column as i32)?, piece));
            column += 1;
        }

        if column != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(placed)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::default();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_short = true,
            'Q' => rights.white_long = true,
            'k' => rights.black_short = true,
            'q' => rights.black_long = true,
            _ => return Err(invalid(format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

/// Move count implied by where a piece stands and which rights remain.
fn setup_moves_made(position: Position, piece: Piece, rights: CastlingRights) -> u32 {
    let color = piece.color();
    let on_back_rank = position.row() == color.back_rank();
    let unmoved = match piece.kind() {
        PieceKind::Pawn => position.row() == color.pawn_rank(),
        PieceKind::King => {
            on_back_rank
                && position.column() == KING_START_COLUMN
                && (rights.short(color) || rights.long(color))
        }
        PieceKind::Rook => {
            on_back_rank
                && ((position.column() == SHORT_CASTLE.rook_from && rights.short(color))
                    || (position.column() == LONG_CASTLE.rook_from && rights.long(color)))
        }
        _ => true,
    };
    u32::from(!unmoved)
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };
    PieceKind::from_letter(ch).map(|kind| Piece::new(color, kind))
}

fn invalid(reason: impl Into<String>) -> ChessErrors {
    ChessErrors::InvalidFen(reason.into())
}
