//! What the engine needs from a position, and the scoped make/undo guard.

use std::fmt;
use std::ops::{Deref, DerefMut};

use gambit_core::{Bitboard, Board, Color, Move, PieceKind, Square};

/// A move as the orderer sees it.
pub trait SearchMove: Copy + PartialEq + fmt::Debug + fmt::Display {
    fn piece(&self) -> PieceKind;
    fn captured(&self) -> Option<PieceKind>;
    fn promotion(&self) -> Option<PieceKind>;
    fn target(&self) -> Square;
}

/// A mutable game position the search can walk.
///
/// `make_move` and `undo_move` must pair in strict LIFO order. Search code
/// goes through [`MoveGuard`] rather than calling them directly.
pub trait Position {
    type Move: SearchMove;

    fn make_move(&mut self, mv: Self::Move);
    fn undo_move(&mut self, mv: Self::Move);

    /// Legal moves for the side to move; with `captures_only`, captures and
    /// promotions.
    fn legal_moves(&mut self, captures_only: bool) -> Vec<Self::Move>;

    /// `true` if the side to move has at least one legal move. Cheaper than
    /// building the full list.
    fn has_legal_move(&mut self) -> bool {
        !self.legal_moves(false).is_empty()
    }

    fn is_in_check(&self) -> bool;

    /// Drawn by rule. A side with no legal moves is not reported here.
    fn is_draw(&self) -> bool;

    fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard;
    fn king_square(&self, color: Color) -> Square;

    /// `true` if the side not to move attacks `sq`.
    fn is_attacked_by_opponent(&self, sq: Square) -> bool;

    fn side_to_move(&self) -> Color;
}

/// A move applied to a position for the guard's lifetime.
///
/// Construction makes the move; drop undoes it, on every exit path.
pub struct MoveGuard<'a, P: Position> {
    position: &'a mut P,
    mv: P::Move,
}

impl<'a, P: Position> MoveGuard<'a, P> {
    pub fn new(position: &'a mut P, mv: P::Move) -> Self {
        position.make_move(mv);
        Self { position, mv }
    }
}

impl<P: Position> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        self.position.undo_move(self.mv);
    }
}

impl SearchMove for Move {
    #[inline]
    fn piece(&self) -> PieceKind {
        Move::piece(*self)
    }

    #[inline]
    fn captured(&self) -> Option<PieceKind> {
        Move::captured(*self)
    }

    #[inline]
    fn promotion(&self) -> Option<PieceKind> {
        Move::promotion(*self)
    }

    #[inline]
    fn target(&self) -> Square {
        Move::target(*self)
    }
}

impl Position for Board {
    type Move = Move;

    fn make_move(&mut self, mv: Move) {
        Board::make_move(self, mv);
    }

    fn undo_move(&mut self, mv: Move) {
        Board::undo_move(self, mv);
    }

    fn legal_moves(&mut self, captures_only: bool) -> Vec<Move> {
        if captures_only {
            Board::legal_captures(self)
        } else {
            Board::legal_moves(self)
        }
    }

    fn has_legal_move(&mut self) -> bool {
        Board::has_legal_move(self)
    }

    fn is_in_check(&self) -> bool {
        Board::is_in_check(self)
    }

    fn is_draw(&self) -> bool {
        Board::is_draw(self)
    }

    fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        Board::pieces(self, kind, color)
    }

    fn king_square(&self, color: Color) -> Square {
        Board::king_square(self, color)
    }

    fn is_attacked_by_opponent(&self, sq: Square) -> bool {
        self.is_square_attacked(sq, !self.side_to_move())
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::Board;

    use super::{MoveGuard, Position};

    #[test]
    fn guard_undoes_on_drop() {
        let mut board = Board::starting_position();
        let before = board.clone();
        let mv = board.parse_uci_move("e2e4").unwrap();
        {
            let guard = MoveGuard::new(&mut board, mv);
            assert_ne!(*guard, before);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn guard_undoes_on_early_return() {
        fn first_capture_square(board: &mut Board) -> Option<String> {
            for mv in Position::legal_moves(board, false) {
                let mut child = MoveGuard::new(board, mv);
                if let Some(cap) = Position::legal_moves(&mut *child, true).first() {
                    return Some(cap.to_string());
                }
            }
            None
        }

        // The knight can land on c4, where the pawn takes it.
        let mut board: Board = "4k3/8/8/3p4/8/8/3N4/4K3 w - - 0 1".parse().unwrap();
        let before = board.clone();
        assert!(first_capture_square(&mut board).is_some());
        assert_eq!(board, before);
    }

    #[test]
    fn opponent_attack_is_relative_to_mover() {
        let board: Board = "4k3/8/8/3p4/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(board.is_attacked_by_opponent("e4".parse().unwrap()));
        assert!(!board.is_attacked_by_opponent("d4".parse().unwrap()));
    }
}
