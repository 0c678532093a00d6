//! In-place move execution and reversal, and attack queries.

use crate::board::{Board, Undo};
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

pub(crate) const KNIGHT_STEPS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
pub(crate) const KING_STEPS: [(i8, i8); 8] =
    [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
pub(crate) const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Rook source and target for a castling king move landing on `king_to`.
pub(crate) fn castling_rook(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    let (from_file, to_file) = if king_to.file() == 6 { (7, 5) } else { (0, 3) };
    (
        Square::from_index_unchecked(rank * 8 + from_file),
        Square::from_index_unchecked(rank * 8 + to_file),
    )
}

impl Board {
    /// Apply `mv`, which must be legal in the current position.
    ///
    /// Every call must be paired with exactly one [`undo_move`](Self::undo_move)
    /// of the same move, in LIFO order.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = !us;
        let (from, to) = (mv.source(), mv.target());

        self.history.push(Undo {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        });

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= zobrist::en_passant(ep);
        }

        match mv.kind() {
            MoveKind::Normal => {
                self.remove_piece(to);
                self.relocate(from, to);
            }
            MoveKind::Promotion => {
                self.remove_piece(to);
                self.remove_piece(from);
                let promoted = mv.promotion().unwrap_or(PieceKind::Queen);
                self.put_piece(to, Piece::new(promoted, us));
            }
            MoveKind::EnPassant => {
                if let Some(victim) = to.offset(0, -us.pawn_step()) {
                    self.remove_piece(victim);
                }
                self.relocate(from, to);
            }
            MoveKind::Castling => {
                self.relocate(from, to);
                let (rook_from, rook_to) = castling_rook(to);
                self.relocate(rook_from, rook_to);
            }
        }

        if mv.piece() == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            let skipped = from.offset(0, us.pawn_step());
            let enemy_pawn = Piece::new(PieceKind::Pawn, them);
            let capturable = [-1, 1]
                .into_iter()
                .filter_map(|df| to.offset(df, 0))
                .any(|sq| self.piece_at(sq) == Some(enemy_pawn));
            if let Some(ep) = skipped.filter(|_| capturable) {
                self.en_passant = Some(ep);
                self.hash ^= zobrist::en_passant(ep);
            }
        }

        let rights = self
            .castling
            .remove(CastleRights::revoked_by(from))
            .remove(CastleRights::revoked_by(to));
        if rights != self.castling {
            self.hash ^= zobrist::castling(self.castling.bits()) ^ zobrist::castling(rights.bits());
            self.castling = rights;
        }

        self.halfmove_clock = if mv.piece() == PieceKind::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;
        self.hash ^= zobrist::side_to_move();
    }

    /// Revert `mv`, which must be the most recently made move.
    pub fn undo_move(&mut self, mv: Move) {
        let Some(undo) = self.history.pop() else {
            debug_assert!(false, "undo_move({mv}) with empty history");
            return;
        };
        debug_assert_eq!(undo.mv, mv, "undo_move out of LIFO order");

        let us = !self.side_to_move;
        let (from, to) = (mv.source(), mv.target());

        match mv.kind() {
            MoveKind::Normal => {
                self.relocate(to, from);
                if let Some(captured) = mv.captured() {
                    self.put_piece(to, Piece::new(captured, !us));
                }
            }
            MoveKind::Promotion => {
                self.remove_piece(to);
                self.put_piece(from, Piece::new(PieceKind::Pawn, us));
                if let Some(captured) = mv.captured() {
                    self.put_piece(to, Piece::new(captured, !us));
                }
            }
            MoveKind::EnPassant => {
                self.relocate(to, from);
                if let Some(victim) = to.offset(0, -us.pawn_step()) {
                    self.put_piece(victim, Piece::new(PieceKind::Pawn, !us));
                }
            }
            MoveKind::Castling => {
                let (rook_from, rook_to) = castling_rook(to);
                self.relocate(rook_to, rook_from);
                self.relocate(to, from);
            }
        }

        if us == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side_to_move = us;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
    }

    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.remove_piece(from) {
            self.put_piece(to, piece);
        }
    }

    /// `true` if any piece of `by` attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let holds = |target: Option<Square>, kind: PieceKind| {
            target.and_then(|t| self.piece_at(t)) == Some(Piece::new(kind, by))
        };

        // A pawn of `by` attacks `sq` from one rank behind it, relative to `by`.
        if [-1, 1]
            .into_iter()
            .any(|df| holds(sq.offset(df, -by.pawn_step()), PieceKind::Pawn))
        {
            return true;
        }
        if KNIGHT_STEPS.iter().any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::Knight)) {
            return true;
        }
        if KING_STEPS.iter().any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::King)) {
            return true;
        }

        let slider_hit = |rays: &[(i8, i8)], kind: PieceKind| {
            rays.iter().any(|&(df, dr)| {
                let mut cursor = sq.offset(df, dr);
                while let Some(t) = cursor {
                    if let Some(piece) = self.piece_at(t) {
                        return piece.color() == by
                            && (piece.kind() == kind || piece.kind() == PieceKind::Queen);
                    }
                    cursor = t.offset(df, dr);
                }
                false
            })
        };
        slider_hit(&ROOK_RAYS, PieceKind::Rook) || slider_hit(&BISHOP_RAYS, PieceKind::Bishop)
    }

    /// `true` if the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), !us)
    }
}
