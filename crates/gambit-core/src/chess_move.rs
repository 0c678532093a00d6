//! Moves, bit-packed into a `u32`.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

const SRC_SHIFT: u32 = 0;
const DST_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURE_SHIFT: u32 = 15;
const PROMO_SHIFT: u32 = 18;
const KIND_SHIFT: u32 = 21;
const SQUARE_MASK: u32 = 0x3F;
const KIND3_MASK: u32 = 0b111;
const MOVE_KIND_MASK: u32 = 0b11;
/// Stored in a 3-bit piece field to mean "no piece".
const NO_PIECE: u32 = 0b111;

/// The category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// A move, carrying everything an orderer needs without consulting the board.
///
/// ```text
/// bits  0-5:  source square
/// bits  6-11: target square
/// bits 12-14: moving piece kind
/// bits 15-17: captured piece kind (7 = none)
/// bits 18-20: promotion piece kind (7 = none)
/// bits 21-22: move kind
/// ```
///
/// Moves are produced by the board's generator and never mutated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    pub(crate) const fn new(
        source: Square,
        target: Square,
        piece: PieceKind,
        captured: Option<PieceKind>,
        promotion: Option<PieceKind>,
        kind: MoveKind,
    ) -> Move {
        let captured = match captured {
            Some(k) => k as u32,
            None => NO_PIECE,
        };
        let promotion = match promotion {
            Some(k) => k as u32,
            None => NO_PIECE,
        };
        Move(
            (source.index() as u32) << SRC_SHIFT
                | (target.index() as u32) << DST_SHIFT
                | (piece as u32) << PIECE_SHIFT
                | captured << CAPTURE_SHIFT
                | promotion << PROMO_SHIFT
                | (kind as u32) << KIND_SHIFT,
        )
    }

    #[inline]
    pub const fn source(self) -> Square {
        Square::from_index_unchecked(((self.0 >> SRC_SHIFT) & SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn target(self) -> Square {
        Square::from_index_unchecked(((self.0 >> DST_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Kind of the piece being moved.
    #[inline]
    pub const fn piece(self) -> PieceKind {
        match PieceKind::from_index(((self.0 >> PIECE_SHIFT) & KIND3_MASK) as usize) {
            Some(kind) => kind,
            None => PieceKind::Pawn,
        }
    }

    /// Kind of the piece removed from the board, including en passant.
    #[inline]
    pub const fn captured(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> CAPTURE_SHIFT) & KIND3_MASK) as usize)
    }

    /// Kind a pawn promotes to.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> PROMO_SHIFT) & KIND3_MASK) as usize)
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        match (self.0 >> KIND_SHIFT) & MOVE_KIND_MASK {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURE_SHIFT) & KIND3_MASK != NO_PIECE
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMO_SHIFT) & KIND3_MASK != NO_PIECE
    }

    /// UCI text, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.target())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}")?;
        if let Some(captured) = self.captured() {
            write!(f, " x{captured}")?;
        }
        write!(f, ")")
    }
}
