//! FEN parsing and serialization for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    /// Parse a FEN string. The two move counters may be omitted and default
    /// to `0 1`.
    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let mut board = Board::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_index as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += skip as u8;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                let sq = Square::from_coords(file, rank).ok_or(FenError::BadRankLength {
                    rank_index,
                    length: file as usize + 1,
                })?;
                board.put_piece(sq, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file as usize,
                });
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor { found: other.to_string() }),
        };
        board.castling = CastleRights::from_fen(fields[2])?;
        board.en_passant = match fields[3] {
            "-" => None,
            text => Some(text.parse::<Square>()?),
        };
        board.halfmove_clock = parse_counter(fields.get(4), "halfmove clock", 0)?;
        board.fullmove_number = parse_counter(fields.get(5), "fullmove number", 1)?;

        validate(&board)?;
        board.hash = zobrist::hash_from_scratch(&board);
        Ok(board)
    }
}

fn parse_counter(field: Option<&&str>, name: &'static str, default: u16) -> Result<u16, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse::<u16>().map_err(|_| FenError::InvalidMoveCounter {
            field: name,
            found: text.to_string(),
        }),
    }
}

fn validate(board: &Board) -> Result<(), FenError> {
    for color in Color::ALL {
        let count = board.pieces(PieceKind::King, color).count();
        if count != 1 {
            let color = match color {
                Color::White => "white",
                Color::Black => "black",
            };
            return Err(FenError::InvalidKingCount { color, count });
        }
    }

    let pawns_on_back_rank = Color::ALL
        .into_iter()
        .flat_map(|c| board.pieces(PieceKind::Pawn, c))
        .any(|sq| sq.rank() == 0 || sq.rank() == 7);
    if pawns_on_back_rank {
        return Err(FenError::PawnsOnBackRank);
    }

    if let Some(ep) = board.en_passant() {
        validate_en_passant(board, ep)?;
    }

    let them = !board.side_to_move();
    if board.is_square_attacked(board.king_square(them), board.side_to_move()) {
        return Err(FenError::OpponentInCheck);
    }
    Ok(())
}

/// An en-passant square must be empty, sit on the rank a double push crosses,
/// and have the pushed enemy pawn right behind it.
fn validate_en_passant(board: &Board, ep: Square) -> Result<(), FenError> {
    let us = board.side_to_move();
    let them = !us;
    let crossed_rank = them.pawn_home_rank() as i8 + them.pawn_step();
    let pushed = ep.offset(0, them.pawn_step());
    let valid = ep.rank() as i8 == crossed_rank
        && board.is_empty_square(ep)
        && pushed.and_then(|sq| board.piece_at(sq)) == Some(Piece::new(PieceKind::Pawn, them));
    if valid {
        Ok(())
    } else {
        Err(FenError::InvalidEnPassant { square: ep.to_string() })
    }
}

impl fmt::Display for Board {
    /// Serialize as a six-field FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty = 0;
            for file in 0u8..8 {
                match Square::from_coords(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {} {} ", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::board::Board;
    use crate::error::FenError;

    #[test]
    fn roundtrip() {
        for fen in [
            STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "8/8/4k3/8/8/4K3/8/8 b - - 12 40",
        ] {
            let board: Board = fen.parse().unwrap();
            assert_eq!(board.to_string(), fen);
        }
    }

    #[test]
    fn counters_are_optional() {
        let board: Board = "8/8/4k3/8/8/4K3/8/8 w - -".parse().unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn rejects_wrong_rank_count() {
        let err = "8/8/8 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::WrongRankCount { found: 3 });
    }

    #[test]
    fn rejects_missing_king() {
        let err = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>().unwrap_err();
        assert!(matches!(err, FenError::InvalidKingCount { color: "black", count: 0 }));
    }

    #[test]
    fn rejects_pawn_on_back_rank() {
        let err = "P3k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::PawnsOnBackRank);
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        // Black king on e8 attacked by the rook on e1 with White to move.
        let err = "4k3/8/8/8/8/8/8/K3R3 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::OpponentInCheck);
    }

    #[test]
    fn rejects_en_passant_without_pushed_pawn() {
        // No black pawn on e4 and e3 is Black's crossed rank, not White's.
        for fen in [
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - e6 0 1",
            "4k3/8/3p4/3pP3/8/8/8/4K3 w - d6 0 1",
            "4k3/8/8/8/3pP3/8/8/4K3 w - e3 0 1",
        ] {
            assert!(
                matches!(fen.parse::<Board>(), Err(FenError::InvalidEnPassant { .. })),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_en_passant_after_double_push() {
        let board: Board = "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1".parse().unwrap();
        assert_eq!(board.en_passant(), Some("e3".parse().unwrap()));
    }

    #[test]
    fn en_passant_from_fen_keeps_make_undo_exact() {
        let mut board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let before = board.clone();
        let moves = board.legal_moves();
        assert!(moves.iter().any(|m| m.to_uci() == "e5d6"));
        assert_eq!(board, before);
        for mv in moves {
            board.make_move(mv);
            board.undo_move(mv);
            assert_eq!(board, before, "after {mv}");
        }
    }

    #[test]
    fn rejects_bad_side() {
        assert!(matches!(
            "8/8/4k3/8/8/4K3/8/8 x - - 0 1".parse::<Board>(),
            Err(FenError::InvalidColor { .. })
        ));
    }
}
