//! Piece-square tables, packed eight channels to a square.
//!
//! Tables are authored from White's side as 8 rows of 4 files: row 0 is
//! rank 8, and files e-h mirror d-a. Each of the 32 half-board squares is
//! one `u64` holding a signed byte per [`ScoreType`]. Use [`table_value`]
//! to read a score for a real square and color.

use gambit_core::{Color, PieceKind, Square};

/// Channel selector within a packed square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScoreType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    /// King, middlegame.
    King = 5,
    KingEndgame = 6,
    /// King when the opponent is down to almost nothing: march to the
    /// center and help mate.
    KingHunt = 7,
}

impl ScoreType {
    pub const COUNT: usize = 8;

    pub const ALL: [ScoreType; Self::COUNT] = [
        ScoreType::Pawn,
        ScoreType::Knight,
        ScoreType::Bishop,
        ScoreType::Rook,
        ScoreType::Queen,
        ScoreType::King,
        ScoreType::KingEndgame,
        ScoreType::KingHunt,
    ];

    /// Channel for a non-king piece kind; the king picks its channel by phase.
    pub const fn for_piece(kind: PieceKind) -> ScoreType {
        match kind {
            PieceKind::Pawn => ScoreType::Pawn,
            PieceKind::Knight => ScoreType::Knight,
            PieceKind::Bishop => ScoreType::Bishop,
            PieceKind::Rook => ScoreType::Rook,
            PieceKind::Queen => ScoreType::Queen,
            PieceKind::King => ScoreType::King,
        }
    }
}

const HALF_SQUARES: usize = 32;

#[rustfmt::skip]
pub(crate) const AUTHORED: [[i8; HALF_SQUARES]; ScoreType::COUNT] = [
    // Pawn
    [
         70,  70,  70,  70,
         50,  50,  50,  50,
         10,  10,  20,  30,
          5,   5,  10,  25,
          0,   0,   0,  20,
          5,  -5, -10,   0,
          5,  10,  10, -20,
          0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30,
        -40, -20,   0,   0,
        -30,   0,  10,  15,
        -30,   5,  15,  20,
        -30,   0,  15,  20,
        -30,   5,  10,  15,
        -40, -20,   0,   5,
        -50, -40, -30, -30,
    ],
    // Bishop
    [
        -20, -10, -10, -10,
        -10,   0,   0,   0,
        -10,   0,   5,  10,
        -10,   5,   5,  10,
        -10,   0,  10,  10,
        -10,  10,  10,  10,
        -10,   5,   0,   0,
        -20, -10, -10, -10,
    ],
    // Rook
    [
          0,   0,   0,   0,
          5,  10,  10,  10,
         -5,   0,   0,   0,
         -5,   0,   0,   0,
         -5,   0,   0,   0,
         -5,   0,   0,   0,
         -5,   0,   0,   0,
          0,   0,   0,   5,
    ],
    // Queen
    [
        -20, -10, -10,  -5,
        -10,   0,   0,   0,
        -10,   0,   5,   5,
         -5,   0,   5,   5,
          0,   0,   5,   5,
        -10,   5,   5,   5,
        -10,   0,   5,   0,
        -20, -10, -10,  -5,
    ],
    // King
    [
        -30, -40, -40, -50,
        -30, -40, -40, -50,
        -30, -40, -40, -50,
        -30, -40, -40, -50,
        -20, -30, -30, -40,
        -10, -20, -20, -20,
         20,  20,   0,   0,
         20,  30,  10,   0,
    ],
    // KingEndgame
    [
        -50, -40, -30, -20,
        -30, -20, -10,   0,
        -30, -10,  20,  30,
        -30, -10,  30,  40,
        -30, -10,  30,  40,
        -30, -10,  20,  30,
        -30, -30,   0,   0,
        -50, -30, -30, -30,
    ],
    // KingHunt
    [
        -60, -40, -30, -20,
        -40, -10,   0,  10,
        -30,   0,  30,  40,
        -20,  10,  40,  60,
        -20,  10,  40,  60,
        -30,   0,  30,  40,
        -40, -10,   0,  10,
        -60, -40, -30, -20,
    ],
];

const fn pack(tables: &[[i8; HALF_SQUARES]; ScoreType::COUNT]) -> [u64; HALF_SQUARES] {
    let mut packed = [0u64; HALF_SQUARES];
    let mut sq = 0;
    while sq < HALF_SQUARES {
        let mut channel = 0;
        while channel < ScoreType::COUNT {
            packed[sq] |= (tables[channel][sq] as u8 as u64) << (channel * 8);
            channel += 1;
        }
        sq += 1;
    }
    packed
}

static PACKED: [u64; HALF_SQUARES] = pack(&AUTHORED);

/// Half-board index of `sq` as seen by `color`.
#[inline]
const fn half_index(sq: Square, color: Color) -> usize {
    let row = match color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    let file = sq.file();
    let file = if file > 3 { 7 - file } else { file };
    row as usize * 4 + file as usize
}

/// Positional score of a `color` piece on `sq`, signed from White's side:
/// bonuses for Black read negative.
#[inline]
pub fn table_value(sq: Square, score_type: ScoreType, color: Color) -> i32 {
    let byte = (PACKED[half_index(sq, color)] >> (score_type as u32 * 8)) as u8;
    byte as i8 as i32 * color.sign()
}
