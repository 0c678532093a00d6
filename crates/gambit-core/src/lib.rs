//! Chess position types for gambit: squares, pieces, moves, and a
//! make/undo board with legal move generation and draw detection.

mod bitboard;
mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod square;
mod zobrist;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castle_rights::CastleRights;
pub use chess_move::{Move, MoveKind};
pub use color::Color;
pub use error::{FenError, MoveParseError};
pub use fen::STARTING_FEN;
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
