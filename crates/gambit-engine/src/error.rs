//! Engine errors.

/// Errors returned by [`decide_move`](crate::decide_move).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The side to move is checkmated or stalemated; there is nothing to
    /// decide.
    #[error("position has no legal moves")]
    NoLegalMoves,
}
