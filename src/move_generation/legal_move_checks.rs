use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::move_generation::legal_move_shared::{
    first_piece_along, DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS,
};

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.king_position(color) else {
        return false;
    };
    is_square_attacked(board, king_square, color.opposite(), false)
}

/// Whether any piece of `attacker_color` attacks `square`.
///
/// Scans outward from the target: pawn diagonals, knight jumps, adjacent
/// kings (unless `exclude_king`), then diagonal and orthogonal rays for
/// sliders. Pawn pushes never count as attacks. Legality checks always pass
/// `exclude_king = false`.
pub fn is_square_attacked(
    board: &Board,
    square: Position,
    attacker_color: Color,
    exclude_king: bool,
) -> bool {
    if attacker_color == Color::None {
        return false;
    }

    // An attacking pawn sits one row behind the square, from its own point of view.
    let pawn_row = -attacker_color.pawn_direction();
    for side in [-1, 1] {
        if let Some(from) = square.offset(pawn_row, side) {
            if board.piece_at(from).is_of_type(attacker_color, PieceKind::Pawn) {
                return true;
            }
        }
    }

    if any_at_offsets(board, square, attacker_color, &KNIGHT_OFFSETS, PieceKind::Knight) {
        return true;
    }

    if !exclude_king
        && any_at_offsets(board, square, attacker_color, &KING_OFFSETS, PieceKind::King)
    {
        return true;
    }

    if any_slider(board, square, attacker_color, &DIAGONAL_DIRECTIONS, PieceKind::Bishop) {
        return true;
    }

    any_slider(board, square, attacker_color, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook)
}

fn any_at_offsets(
    board: &Board,
    square: Position,
    attacker_color: Color,
    offsets: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    offsets.iter().any(|&(d_row, d_column)| {
        square
            .offset(d_row, d_column)
            .map(|from| board.piece_at(from).is_of_type(attacker_color, kind))
            .unwrap_or(false)
    })
}

/// Rays from `square`; the first occupant attacks it when it is an enemy
/// `kind` slider or queen.
fn any_slider(
    board: &Board,
    square: Position,
    attacker_color: Color,
    directions: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    directions.iter().any(|&direction| {
        first_piece_along(board, square, direction)
            .map(|(_, piece)| {
                piece.color() == attacker_color
                    && (piece.kind() == kind || piece.kind() == PieceKind::Queen)
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Piece;

    fn pos(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("test position is on the board")
    }

    #[test]
    fn pawns_attack_diagonally_forward_only() {
        let mut board = Board::empty();
        board
            .add_piece(pos(6, 4), Piece::new(Color::White, PieceKind::Pawn))
            .expect("pawn");

        assert!(is_square_attacked(&board, pos(5, 3), Color::White, false));
        assert!(is_square_attacked(&board, pos(5, 5), Color::White, false));
        assert!(!is_square_attacked(&board, pos(5, 4), Color::White, false));
        assert!(!is_square_attacked(&board, pos(7, 3), Color::White, false));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let mut board = Board::empty();
        board
            .add_piece(pos(0, 0), Piece::new(Color::Black, PieceKind::Queen))
            .expect("queen");
        assert!(is_square_attacked(&board, pos(7, 7), Color::Black, false));
        assert!(is_square_attacked(&board, pos(0, 7), Color::Black, false));

        board
            .add_piece(pos(3, 3), Piece::new(Color::Black, PieceKind::Pawn))
            .expect("blocker");
        assert!(!is_square_attacked(&board, pos(7, 7), Color::Black, false));
    }

    #[test]
    fn exclude_king_ignores_adjacent_king() {
        let mut board = Board::empty();
        board
            .add_piece(pos(4, 4), Piece::new(Color::Black, PieceKind::King))
            .expect("king");
        assert!(is_square_attacked(&board, pos(5, 5), Color::Black, false));
        assert!(!is_square_attacked(&board, pos(5, 5), Color::Black, true));
    }

    #[test]
    fn starting_position_has_no_check() {
        let board = Board::starting_position();
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
        // f3 is covered by the g1 knight and the e2/g2 pawns.
        assert!(is_square_attacked(&board, pos(5, 5), Color::White, false));
    }

    #[test]
    fn knight_gives_check() {
        let mut board = Board::empty();
        board
            .add_piece(pos(7, 4), Piece::new(Color::White, PieceKind::King))
            .expect("king");
        board
            .add_piece(pos(5, 3), Piece::new(Color::Black, PieceKind::Knight))
            .expect("knight");
        assert!(is_king_in_check(&board, Color::White));
    }
}
