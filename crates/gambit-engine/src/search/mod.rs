//! The search controller: picks depths, draw-seeking and the deadline, and
//! keeps the best move of the last completed search.

pub mod control;
pub mod negamax;
pub mod ordering;

use gambit_core::Color;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::{EngineConfig, SearchMode};
use crate::error::EngineError;
use crate::eval::material::lacks_mating_material;
use crate::position::Position;
use crate::time::move_time_slice;

use self::control::SearchControl;
use self::negamax::{INF, MATE_THRESHOLD, Searcher};

/// Outcome of one [`decide_move`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<M> {
    /// Best move of the deepest completed search.
    pub best_move: M,
    /// Score of `best_move` in centipawns for the side to move.
    pub score: i32,
    /// Depth of the search that produced `best_move`.
    pub depth: u8,
    /// Nodes visited across all searches of this decision.
    pub nodes: u64,
    pub seek_draw: bool,
    /// The last search started was cut short by the clock and discarded.
    pub aborted: bool,
}

/// Whether the engine should steer toward a draw: it cannot force mate, or
/// its clock is nearly gone.
pub fn should_seek_draw<P: Position, C: Clock + ?Sized>(
    position: &P,
    clock: &C,
    engine_color: Color,
    config: &EngineConfig,
) -> bool {
    config.draw_seeking
        && (lacks_mating_material(position, engine_color) || clock.remaining() < config.draw_seek_threshold)
}

/// Choose a move for the side to move.
///
/// Depth 1 is always searched to completion, so a legal move is returned
/// even if every deeper search runs out of time. The position is restored
/// before returning.
///
/// # Errors
///
/// [`EngineError::NoLegalMoves`] if the side to move is checkmated or
/// stalemated.
pub fn decide_move<P: Position, C: Clock + ?Sized>(
    position: &mut P,
    clock: &C,
    engine_color: Color,
    config: &EngineConfig,
) -> Result<Decision<P::Move>, EngineError> {
    if position.legal_moves(false).is_empty() {
        return Err(EngineError::NoLegalMoves);
    }

    let remaining = clock.remaining();
    let seek_draw = should_seek_draw(position, clock, engine_color, config);
    let control = SearchControl::new(clock, move_time_slice(remaining, config));

    let mut target = config.target_depth(remaining).max(1);
    if seek_draw {
        // Draw-seeking searches ignore the clock, so keep them shallow.
        target = target.min(config.panic_depth.max(1));
    }
    let depths: Vec<u8> = match config.mode {
        SearchMode::FixedDepth if target > 1 => vec![1, target],
        SearchMode::FixedDepth => vec![1],
        SearchMode::Iterative { .. } => (1..=target).collect(),
    };

    let mut searcher: Searcher<'_, P, C> = Searcher::new(config, &control, engine_color);
    let mut best: Option<(P::Move, i32, u8)> = None;
    let mut aborted = false;

    for depth in depths {
        if depth > 1 && matches!(config.mode, SearchMode::Iterative { .. }) && control.should_stop() {
            break;
        }

        searcher.abortable = depth > 1;
        searcher.root_best = None;
        let score = searcher.search(position, depth, 0, -INF, INF, seek_draw);

        if control.is_stopped() && searcher.abortable {
            warn!(depth, elapsed = ?control.elapsed(), "search aborted, keeping previous depth");
            aborted = true;
            break;
        }

        if let Some(mv) = searcher.root_best {
            best = Some((mv, score, depth));
            debug!(depth, score, nodes = searcher.nodes, best = %mv, "search completed");
        }

        if score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    let (best_move, score, depth) = best.ok_or(EngineError::NoLegalMoves)?;
    if seek_draw {
        debug!(score, "draw-seeking choice");
    }
    info!(
        best = %best_move,
        score,
        depth,
        nodes = searcher.nodes,
        seek_draw,
        slice = ?control.slice(),
        elapsed = ?control.elapsed(),
        "move decided"
    );

    Ok(Decision {
        best_move,
        score,
        depth,
        nodes: searcher.nodes,
        seek_draw,
        aborted,
    })
}
