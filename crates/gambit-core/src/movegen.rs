//! Legal move generation.
//!
//! Pseudo-legal moves are produced square by square from the mailbox, then
//! each one is made, tested for leaving the mover's king attacked, and undone.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::MoveParseError;
use crate::make_move::{BISHOP_RAYS, KING_STEPS, KNIGHT_STEPS, ROOK_RAYS};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Which pseudo-legal moves to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    All,
    /// Captures (en passant included) and promotions.
    Tactical,
}

impl Board {
    /// All legal moves for the side to move.
    ///
    /// Takes `&mut self` because legality is checked by making each move;
    /// the board is unchanged on return.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.generate(Scope::All)
    }

    /// Legal captures, en passant captures, and promotions.
    pub fn legal_captures(&mut self) -> Vec<Move> {
        self.generate(Scope::Tactical)
    }

    /// `true` if the side to move has any legal move. Stops at the first one.
    pub fn has_legal_move(&mut self) -> bool {
        let mut pseudo = Vec::with_capacity(64);
        self.pseudo_legal(Scope::All, &mut pseudo);
        pseudo.into_iter().any(|mv| self.is_legal(mv))
    }

    /// Resolve UCI text such as `e2e4` or `e7e8q` against the legal moves.
    pub fn parse_uci_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed { text: text.to_string() };
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(malformed());
        }
        let source: Square = text[0..2].parse().map_err(|_| malformed())?;
        let target: Square = text[2..4].parse().map_err(|_| malformed())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_fen_char(c.to_ascii_lowercase()) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(malformed()),
            },
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.source() == source && mv.target() == target && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::Illegal { text: text.to_string() })
    }

    fn generate(&mut self, scope: Scope) -> Vec<Move> {
        let mut pseudo = Vec::with_capacity(64);
        self.pseudo_legal(scope, &mut pseudo);

        pseudo.retain(|&mv| self.is_legal(mv));
        pseudo
    }

    /// Whether a pseudo-legal move leaves the mover's king safe.
    fn is_legal(&mut self, mv: Move) -> bool {
        let us = self.side_to_move;
        self.make_move(mv);
        let safe = !self.is_square_attacked(self.king_square(us), !us);
        self.undo_move(mv);
        safe
    }

    fn pseudo_legal(&self, scope: Scope, out: &mut Vec<Move>) {
        let us = self.side_to_move;
        for from in self.occupancy(us) {
            let Some(piece) = self.piece_at(from) else { continue };
            match piece.kind() {
                PieceKind::Pawn => self.pawn_moves(from, scope, out),
                PieceKind::Knight => self.step_moves(from, PieceKind::Knight, &KNIGHT_STEPS, scope, out),
                PieceKind::Bishop => self.ray_moves(from, PieceKind::Bishop, &BISHOP_RAYS, scope, out),
                PieceKind::Rook => self.ray_moves(from, PieceKind::Rook, &ROOK_RAYS, scope, out),
                PieceKind::Queen => {
                    self.ray_moves(from, PieceKind::Queen, &ROOK_RAYS, scope, out);
                    self.ray_moves(from, PieceKind::Queen, &BISHOP_RAYS, scope, out);
                }
                PieceKind::King => {
                    self.step_moves(from, PieceKind::King, &KING_STEPS, scope, out);
                    if scope == Scope::All {
                        self.castling_moves(from, out);
                    }
                }
            }
        }
    }

    /// What a move to `to` would capture, or `Err` if our own piece is there.
    fn landing(&self, to: Square) -> Result<Option<PieceKind>, ()> {
        match self.piece_at(to) {
            None => Ok(None),
            Some(p) if p.color() != self.side_to_move => Ok(Some(p.kind())),
            Some(_) => Err(()),
        }
    }

    fn step_moves(&self, from: Square, kind: PieceKind, steps: &[(i8, i8)], scope: Scope, out: &mut Vec<Move>) {
        for &(df, dr) in steps {
            let Some(to) = from.offset(df, dr) else { continue };
            if let Ok(captured) = self.landing(to)
                && (scope == Scope::All || captured.is_some())
            {
                out.push(Move::new(from, to, kind, captured, None, MoveKind::Normal));
            }
        }
    }

    fn ray_moves(&self, from: Square, kind: PieceKind, rays: &[(i8, i8)], scope: Scope, out: &mut Vec<Move>) {
        for &(df, dr) in rays {
            let mut cursor = from.offset(df, dr);
            while let Some(to) = cursor {
                match self.landing(to) {
                    Ok(None) => {
                        if scope == Scope::All {
                            out.push(Move::new(from, to, kind, None, None, MoveKind::Normal));
                        }
                    }
                    Ok(Some(captured)) => {
                        out.push(Move::new(from, to, kind, Some(captured), None, MoveKind::Normal));
                        break;
                    }
                    Err(()) => break,
                }
                cursor = to.offset(df, dr);
            }
        }
    }

    fn pawn_moves(&self, from: Square, scope: Scope, out: &mut Vec<Move>) {
        let us = self.side_to_move;
        let step = us.pawn_step();

        let push_to = |out: &mut Vec<Move>, to: Square, captured: Option<PieceKind>| {
            if to.rank() == us.promotion_rank() {
                for promo in PieceKind::PROMOTIONS {
                    out.push(Move::new(from, to, PieceKind::Pawn, captured, Some(promo), MoveKind::Promotion));
                }
            } else if scope == Scope::All || captured.is_some() {
                out.push(Move::new(from, to, PieceKind::Pawn, captured, None, MoveKind::Normal));
            }
        };

        if let Some(one) = from.offset(0, step)
            && self.is_empty_square(one)
        {
            push_to(out, one, None);
            if scope == Scope::All
                && from.rank() == us.pawn_home_rank()
                && let Some(two) = one.offset(0, step)
                && self.is_empty_square(two)
            {
                out.push(Move::new(from, two, PieceKind::Pawn, None, None, MoveKind::Normal));
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(df, step) else { continue };
            match self.piece_at(to) {
                Some(p) if p.color() != us => push_to(out, to, Some(p.kind())),
                None if self.en_passant == Some(to) => out.push(Move::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    MoveKind::EnPassant,
                )),
                _ => {}
            }
        }
    }

    fn castling_moves(&self, from: Square, out: &mut Vec<Move>) {
        let us = self.side_to_move;
        let home = match us {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        };
        if from != home || self.is_square_attacked(from, !us) {
            return;
        }

        // (right, squares that must be empty, squares the king crosses, king target)
        let (king_side, queen_side) = match us {
            Color::White => (
                (CastleRights::king_side(us), &[Square::F1, Square::G1][..], [Square::F1, Square::G1], Square::G1),
                (
                    CastleRights::queen_side(us),
                    &[Square::D1, Square::C1, Square::B1][..],
                    [Square::D1, Square::C1],
                    Square::C1,
                ),
            ),
            Color::Black => (
                (CastleRights::king_side(us), &[Square::F8, Square::G8][..], [Square::F8, Square::G8], Square::G8),
                (
                    CastleRights::queen_side(us),
                    &[Square::D8, Square::C8, Square::B8][..],
                    [Square::D8, Square::C8],
                    Square::C8,
                ),
            ),
        };

        for (right, empty, crossed, to) in [king_side, queen_side] {
            if self.castling.contains(right)
                && empty.iter().all(|&sq| self.is_empty_square(sq))
                && crossed.iter().all(|&sq| !self.is_square_attacked(sq, !us))
            {
                out.push(Move::new(from, to, PieceKind::King, None, None, MoveKind::Castling));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::error::MoveParseError;
    use crate::piece_kind::PieceKind;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn twenty_moves_from_start() {
        assert_eq!(Board::starting_position().legal_moves().len(), 20);
    }

    #[test]
    fn start_has_no_captures() {
        assert!(Board::starting_position().legal_captures().is_empty());
    }

    #[test]
    fn captures_include_en_passant_and_promotions() {
        let mut b = board("4k3/1P6/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let caps: Vec<String> = b.legal_captures().iter().map(|m| m.to_uci()).collect();
        assert!(caps.contains(&"e5d6".to_string()));
        for promo in ["b7b8q", "b7b8r", "b7b8b", "b7b8n"] {
            assert!(caps.contains(&promo.to_string()), "missing {promo}");
        }
        assert!(!caps.contains(&"e5e6".to_string()));
    }

    #[test]
    fn pinned_piece_cannot_move_off_line() {
        // Knight on e2 is pinned by the rook on e8.
        let mut b = board("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(b.legal_moves().iter().all(|m| m.piece() != PieceKind::Knight));
    }

    #[test]
    fn cannot_castle_through_attack() {
        // Black rook on f8 covers f1.
        let mut b = board("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves: Vec<String> = b.legal_moves().iter().map(|m| m.to_uci()).collect();
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn checkmate_has_no_moves() {
        let mut b = board("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1");
        assert!(b.is_in_check());
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn has_legal_move_matches_move_list() {
        for fen in [
            "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1",
            "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
            "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        ] {
            let mut b = board(fen);
            let before = b.clone();
            assert_eq!(b.has_legal_move(), !b.legal_moves().is_empty(), "{fen}");
            assert_eq!(b, before);
        }
    }

    #[test]
    fn generation_leaves_board_untouched() {
        let mut b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = b.clone();
        let _ = b.legal_moves();
        let _ = b.legal_captures();
        assert_eq!(b, before);
    }

    #[test]
    fn parse_uci_move_errors() {
        let mut b = Board::starting_position();
        assert!(matches!(b.parse_uci_move("e2"), Err(MoveParseError::Malformed { .. })));
        assert!(matches!(b.parse_uci_move("e2e5"), Err(MoveParseError::Illegal { .. })));
        assert!(b.parse_uci_move("e2e4").is_ok());
    }

    #[test]
    fn parse_uci_promotion() {
        let mut b = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let mv = b.parse_uci_move("b7b8n").unwrap();
        assert_eq!(mv.promotion(), Some(PieceKind::Knight));
    }
}
