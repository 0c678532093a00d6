//! Piece values and material counts.

use gambit_core::{Color, PieceKind};

use crate::position::Position;

/// Centipawn value of a piece kind. Kings count nothing.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight | PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// Total value of `color`'s pieces.
pub fn material<P: Position>(position: &P, color: Color) -> i32 {
    PieceKind::ALL
        .into_iter()
        .map(|kind| position.pieces(kind, color).count() as i32 * piece_value(kind))
        .sum()
}

/// Value of `color`'s knights, bishops, rooks and queens.
pub fn non_pawn_material<P: Position>(position: &P, color: Color) -> i32 {
    material(position, color) - position.pieces(PieceKind::Pawn, color).count() as i32 * piece_value(PieceKind::Pawn)
}

/// `true` when `color` has at most one minor piece and no pawns, rooks or
/// queens, so cannot force mate.
pub fn lacks_mating_material<P: Position>(position: &P, color: Color) -> bool {
    let count = |kind| position.pieces(kind, color).count();
    let minors: u32 = PieceKind::ALL.into_iter().filter(|k| k.is_minor()).map(count).sum();
    count(PieceKind::Pawn) == 0 && count(PieceKind::Rook) == 0 && count(PieceKind::Queen) == 0 && minors <= 1
}
