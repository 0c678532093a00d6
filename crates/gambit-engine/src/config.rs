//! Engine configuration.

use std::time::Duration;

/// Deepest iteration the iterative controller will start.
pub const MAX_DEPTH: u8 = 64;

/// How the controller schedules searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// One search at [`EngineConfig::depth`], or at
    /// [`EngineConfig::panic_depth`] when the clock is below
    /// [`EngineConfig::panic_threshold`]. A depth-1 pass always runs first.
    FixedDepth,
    /// Deepen one ply at a time from depth 1 until the move time slice
    /// runs out, a mate score appears, or `max_depth` completes.
    Iterative { max_depth: u8 },
}

/// How the king's square bonus reacts to the game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KingTableMode {
    /// Interpolate between the middlegame and endgame king tables.
    Blend,
    /// Pick one of the middlegame, endgame and king-hunt tables by phase
    /// weight threshold.
    Tiered,
}

/// Tunables for [`decide_move`](crate::decide_move).
///
/// `Default` reproduces the reference engine: fixed depth 5, depth 4 below
/// 40 seconds, draw-seeking on.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub mode: SearchMode,
    /// Search depth with a comfortable clock.
    pub depth: u8,
    /// Search depth in panic mode, and the cap for draw-seeking searches.
    pub panic_depth: u8,
    /// Remaining game time at or below which panic mode starts.
    pub panic_threshold: Duration,
    /// Allow the controller to turn on draw-seeking at all.
    pub draw_seeking: bool,
    /// Remaining game time below which the engine seeks a draw regardless
    /// of material.
    pub draw_seek_threshold: Duration,
    /// Value of a drawn node, for the engine, while draw-seeking.
    pub draw_score: i32,
    /// Share of the remaining game time one move may use.
    pub move_time_fraction: f64,
    /// Upper bound on one move's time slice.
    pub max_move_time: Duration,
    pub king_tables: KingTableMode,
    /// Order moves onto squares the opponent attacks later.
    pub penalize_attacked_targets: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::FixedDepth,
            depth: 5,
            panic_depth: 4,
            panic_threshold: Duration::from_secs(40),
            draw_seeking: true,
            draw_seek_threshold: Duration::from_secs(10),
            draw_score: 2_500,
            move_time_fraction: 0.05,
            max_move_time: Duration::from_secs(10),
            king_tables: KingTableMode::Blend,
            penalize_attacked_targets: false,
        }
    }
}

impl EngineConfig {
    /// Default settings with iterative deepening up to [`MAX_DEPTH`].
    pub fn iterative() -> Self {
        Self {
            mode: SearchMode::Iterative { max_depth: MAX_DEPTH },
            king_tables: KingTableMode::Tiered,
            penalize_attacked_targets: true,
            ..Self::default()
        }
    }

    /// Depth the controller aims for given the remaining game time.
    pub fn target_depth(&self, remaining: Duration) -> u8 {
        match self.mode {
            SearchMode::FixedDepth if remaining <= self.panic_threshold => self.panic_depth,
            SearchMode::FixedDepth => self.depth,
            SearchMode::Iterative { max_depth } => max_depth,
        }
    }
}
