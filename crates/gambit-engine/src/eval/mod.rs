//! Static evaluation: material, piece-square bonuses, and a phase-aware
//! king term, scored for the side to move.

pub mod material;
pub mod phase;
pub mod pst;

use gambit_core::{Color, PieceKind};

use crate::config::KingTableMode;
use crate::position::Position;

use self::material::{non_pawn_material, piece_value};
use self::phase::endgame_weight;
use self::pst::{ScoreType, table_value};

/// Phase weight from which [`KingTableMode::Tiered`] leaves the middlegame
/// king table.
const ENDGAME_TIER: f32 = 0.5;
/// Phase weight from which [`KingTableMode::Tiered`] hunts with the king.
const HUNT_TIER: f32 = 0.9;

const NON_KING: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Evaluate `position` in centipawns; positive favors the side to move.
pub fn evaluate<P: Position>(position: &P, king_tables: KingTableMode) -> i32 {
    let white = side_score(position, Color::White, king_tables);
    let black = side_score(position, Color::Black, king_tables);
    (white + black) * position.side_to_move().sign()
}

/// One side's contribution, signed from White's side.
fn side_score<P: Position>(position: &P, color: Color, king_tables: KingTableMode) -> i32 {
    let mut score = 0;
    for kind in NON_KING {
        for sq in position.pieces(kind, color) {
            score += piece_value(kind) * color.sign() + table_value(sq, ScoreType::for_piece(kind), color);
        }
    }

    let weight = endgame_weight(non_pawn_material(position, !color));
    score + king_score(position, color, weight, king_tables)
}

fn king_score<P: Position>(position: &P, color: Color, weight: f32, king_tables: KingTableMode) -> i32 {
    let sq = position.king_square(color);
    match king_tables {
        KingTableMode::Blend => {
            let middlegame = table_value(sq, ScoreType::King, color) as f32;
            let endgame = table_value(sq, ScoreType::KingEndgame, color) as f32;
            (middlegame * (1.0 - weight) + endgame * weight) as i32
        }
        KingTableMode::Tiered => {
            let score_type = if weight < ENDGAME_TIER {
                ScoreType::King
            } else if weight < HUNT_TIER {
                ScoreType::KingEndgame
            } else {
                ScoreType::KingHunt
            };
            table_value(sq, score_type, color)
        }
    }
}
