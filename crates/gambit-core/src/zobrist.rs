//! Zobrist keys, generated at compile time from a fixed xorshift stream.
//!
//! Keys identify positions for repetition detection; they are updated
//! incrementally by make/undo and recomputed from scratch on FEN load.

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

const SEED: u64 = 0x2F6B_8A7C_D13E_4905;

const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

/// All keys in one table: 768 piece-square keys, 1 side key, 16 castling
/// keys, 8 en-passant file keys.
const KEY_COUNT: usize = 12 * 64 + 1 + 16 + 8;
const SIDE_OFFSET: usize = 12 * 64;
const CASTLING_OFFSET: usize = SIDE_OFFSET + 1;
const EP_OFFSET: usize = CASTLING_OFFSET + 16;

static KEYS: [u64; KEY_COUNT] = {
    let mut keys = [0u64; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        let (value, next) = xorshift64(state);
        keys[i] = value;
        state = next;
        i += 1;
    }
    keys
};

#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS[piece.index() * 64 + sq.index()]
}

#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS[SIDE_OFFSET]
}

#[inline]
pub(crate) fn castling(bits: u8) -> u64 {
    KEYS[CASTLING_OFFSET + (bits & 0b1111) as usize]
}

#[inline]
pub(crate) fn en_passant(sq: Square) -> u64 {
    KEYS[EP_OFFSET + sq.file() as usize]
}

/// Compute the key of `board` without using its cached key.
pub(crate) fn hash_from_scratch(board: &Board) -> u64 {
    let mut hash = 0u64;
    for sq in Square::all() {
        if let Some(piece) = board.piece_at(sq) {
            hash ^= piece_square(piece, sq);
        }
    }
    if board.side_to_move() == Color::Black {
        hash ^= side_to_move();
    }
    hash ^= castling(board.castling().bits());
    if let Some(ep) = board.en_passant() {
        hash ^= en_passant(ep);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::KEYS;

    #[test]
    fn keys_are_distinct_and_nonzero() {
        let mut sorted = KEYS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), KEYS.len());
        assert!(KEYS.iter().all(|&k| k != 0));
    }
}
