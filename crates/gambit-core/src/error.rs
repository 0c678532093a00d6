//! Errors for FEN parsing and move text parsing.

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Fewer than 4 or more than 6 space-separated fields.
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// Piece placement does not describe 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index as written (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },
    #[error("invalid square: \"{found}\"")]
    InvalidSquare { found: String },
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// "halfmove clock" or "fullmove number".
        field: &'static str,
        found: String,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// The side not to move is in check, which no legal game reaches.
    #[error("side not to move is in check")]
    OpponentInCheck,
    /// The en-passant square is not one a double pawn push just crossed.
    #[error("invalid en passant square: {square}")]
    InvalidEnPassant { square: String },
}

/// Errors from resolving UCI move text against a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    /// The text is not of the form `e2e4` / `e7e8q`.
    #[error("malformed move text: \"{text}\"")]
    Malformed { text: String },
    /// Well-formed, but not a legal move in the position.
    #[error("illegal move: {text}")]
    Illegal { text: String },
}
