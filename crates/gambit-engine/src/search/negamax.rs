//! Negamax alpha-beta search with quiescence.

use gambit_core::Color;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::eval::evaluate;
use crate::position::{MoveGuard, Position};
use crate::search::control::SearchControl;
use crate::search::ordering::order_moves;

/// Bound wider than any reachable score.
pub const INF: i32 = 1_000_000;

/// Score of delivering mate at the root; mate at ply `n` scores `MATE - n`.
pub const MATE: i32 = 100_000;

/// Scores at or beyond this magnitude are forced mates.
pub const MATE_THRESHOLD: i32 = MATE - 1_000;

/// State threaded through one decision's searches.
pub(crate) struct Searcher<'a, P: Position, C: Clock + ?Sized> {
    config: &'a EngineConfig,
    control: &'a SearchControl<'a, C>,
    engine_color: Color,
    /// Whether the current iteration may be cut short by the clock.
    pub(crate) abortable: bool,
    pub(crate) nodes: u64,
    /// Best root move of the current iteration.
    pub(crate) root_best: Option<P::Move>,
}

impl<'a, P: Position, C: Clock + ?Sized> Searcher<'a, P, C> {
    pub(crate) fn new(config: &'a EngineConfig, control: &'a SearchControl<'a, C>, engine_color: Color) -> Self {
        Self {
            config,
            control,
            engine_color,
            abortable: true,
            nodes: 0,
            root_best: None,
        }
    }

    /// Negamax score of `position` for the side to move.
    ///
    /// Records the best root move in `root_best` when `ply == 0`. Returns 0
    /// as soon as the clock runs out, unless `seek_draw` is set.
    pub(crate) fn search(
        &mut self,
        position: &mut P,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
        seek_draw: bool,
    ) -> i32 {
        self.nodes += 1;

        if self.abortable && !seek_draw && self.control.should_stop() {
            return 0;
        }

        if ply > 0 {
            if position.is_draw() {
                return self.draw_score(position, seek_draw);
            }

            // Mate distance: no line from here can beat a mate next move or
            // lose faster than being mated now.
            alpha = alpha.max(-(MATE - ply as i32));
            beta = beta.min(MATE - ply as i32 - 1);
            if alpha >= beta {
                return alpha;
            }
        }

        if depth == 0 {
            if !position.has_legal_move() {
                return Self::terminal_score(position, ply);
            }
            return self.quiescence(position, alpha, beta, seek_draw);
        }

        let mut moves = position.legal_moves(false);
        if moves.is_empty() {
            return Self::terminal_score(position, ply);
        }

        order_moves(position, &mut moves, self.config.penalize_attacked_targets);

        for mv in moves {
            let score = {
                let mut child = MoveGuard::new(position, mv);
                -self.search(&mut child, depth - 1, ply + 1, -beta, -alpha, seek_draw)
            };

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
                if ply == 0 {
                    self.root_best = Some(mv);
                }
            }
        }

        alpha
    }

    /// Capture-only search from a horizon node.
    pub(crate) fn quiescence(&mut self, position: &mut P, mut alpha: i32, beta: i32, seek_draw: bool) -> i32 {
        self.nodes += 1;

        if self.abortable && !seek_draw && self.control.should_stop() {
            return 0;
        }

        // Stand pat: the side to move may decline every capture.
        let stand_pat = evaluate(position, self.config.king_tables);
        if stand_pat >= beta {
            return beta;
        }
        alpha = alpha.max(stand_pat);

        let mut moves = position.legal_moves(true);
        order_moves(position, &mut moves, self.config.penalize_attacked_targets);

        for mv in moves {
            let score = {
                let mut child = MoveGuard::new(position, mv);
                -self.quiescence(&mut child, -beta, -alpha, seek_draw)
            };

            if score >= beta {
                return beta;
            }
            alpha = alpha.max(score);
        }

        alpha
    }

    /// Checkmate or stalemate score for a node with no legal moves.
    fn terminal_score(position: &P, ply: u8) -> i32 {
        if position.is_in_check() { -(MATE - ply as i32) } else { 0 }
    }

    /// Value of a drawn node for the side to move there.
    fn draw_score(&self, position: &P, seek_draw: bool) -> i32 {
        if !seek_draw {
            0
        } else if position.side_to_move() == self.engine_color {
            self.config.draw_score
        } else {
            -self.config.draw_score
        }
    }
}
