//! The board: piece placement, side to move, castling, en passant, clocks,
//! and the undo history that make/undo and repetition detection share.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// State that a move destroys and `undo_move` must restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    /// Key of the position before `mv` was made.
    pub(crate) hash: u64,
}

/// A mutable chess position.
///
/// Pieces are kept both square-indexed (for lookups by square) and as one
/// [`Bitboard`] per color and kind (for piece lists). Moves are applied in
/// place with [`make_move`](Board::make_move) and reverted with
/// [`undo_move`](Board::undo_move) in strict LIFO order.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
    pieces: [[Bitboard; PieceKind::COUNT]; Color::COUNT],
    occupancy: [Bitboard; Color::COUNT],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) hash: u64,
    pub(crate) history: Vec<Undo>,
}

impl Board {
    /// A board with no pieces, White to move, no rights.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; Square::COUNT],
            pieces: [[Bitboard::EMPTY; PieceKind::COUNT]; Color::COUNT],
            occupancy: [Bitboard::EMPTY; Color::COUNT],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::new(),
        }
    }

    /// The standard initial position.
    pub fn starting_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, kind) in (0u8..).zip(BACK_RANK) {
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let Some(sq) = Square::from_coords(file, back) {
                    board.put_piece(sq, Piece::new(kind, color));
                }
                if let Some(sq) = Square::from_coords(file, pawns) {
                    board.put_piece(sq, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
        board.castling = CastleRights::ALL;
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Squares holding pieces of `kind` and `color`.
    #[inline]
    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    /// Squares holding any piece of `color`.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    #[inline]
    pub fn is_empty_square(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king, which FEN validation rules out.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(PieceKind::King, color)
            .lsb()
            .expect("board must have a king for each side")
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist key of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Place `piece` on an empty square.
    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none(), "{sq} already occupied");
        self.squares[sq.index()] = Some(piece);
        self.toggle_sets(sq, piece);
    }

    /// Lift whatever stands on `sq`.
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        self.toggle_sets(sq, piece);
        Some(piece)
    }

    fn toggle_sets(&mut self, sq: Square, piece: Piece) {
        let (c, k) = (piece.color().index(), piece.kind().index());
        self.pieces[c][k] = self.pieces[c][k].toggle(sq);
        self.occupancy[c] = self.occupancy[c].toggle(sq);
        self.hash ^= zobrist::piece_square(piece, sq);
    }

    /// Whether the game is drawn by rule: repetition, the fifty-move rule,
    /// or insufficient mating material.
    ///
    /// A side with no legal moves is not reported here; callers detect
    /// stalemate from an empty move list.
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100 || self.is_repetition() || self.is_insufficient_material()
    }

    /// `true` if the current position occurred earlier since the last
    /// capture or pawn move. One earlier occurrence suffices.
    pub fn is_repetition(&self) -> bool {
        let window = (self.halfmove_clock as usize).min(self.history.len());
        (2..=window)
            .step_by(2)
            .any(|back| self.history[self.history.len() - back].hash == self.hash)
    }

    /// `true` when neither side can possibly deliver mate: no pawns, rooks,
    /// or queens, and either at most one minor piece in total or only
    /// bishops that all stand on squares of one color.
    pub fn is_insufficient_material(&self) -> bool {
        let any = |kind| Color::ALL.iter().any(|&c| !self.pieces(kind, c).is_empty());
        if any(PieceKind::Pawn) || any(PieceKind::Rook) || any(PieceKind::Queen) {
            return false;
        }

        let knights = self.pieces(PieceKind::Knight, Color::White) | self.pieces(PieceKind::Knight, Color::Black);
        let bishops = self.pieces(PieceKind::Bishop, Color::White) | self.pieces(PieceKind::Bishop, Color::Black);
        if knights.count() + bishops.count() <= 1 {
            return true;
        }

        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & !Bitboard::LIGHT_SQUARES).is_empty())
    }

    /// The same position with colors swapped and the board mirrored top to
    /// bottom. Move history is not carried over.
    pub fn color_flipped(&self) -> Board {
        let mut board = Board::empty();
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                board.put_piece(sq.flip_rank(), piece.flipped());
            }
        }
        board.side_to_move = !self.side_to_move;
        board.castling = self.castling.flipped();
        board.en_passant = self.en_passant.map(Square::flip_rank);
        board.halfmove_clock = self.halfmove_clock;
        board.fullmove_number = self.fullmove_number;
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{self}\")")
    }
}
