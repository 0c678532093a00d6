//! Decision engine for gambit: alpha-beta search with quiescence, move
//! ordering, a packed piece-square evaluator, and clock-driven control.

pub mod clock;
pub mod config;
pub mod error;
pub mod eval;
pub mod position;
pub mod search;
pub mod time;

pub use clock::{Clock, GameClock, ManualClock};
pub use config::{EngineConfig, KingTableMode, SearchMode};
pub use error::EngineError;
pub use eval::evaluate;
pub use position::{MoveGuard, Position, SearchMove};
pub use search::control::SearchControl;
pub use search::negamax::{MATE, MATE_THRESHOLD};
pub use search::ordering::order_moves;
pub use search::{Decision, decide_move, should_seek_draw};
pub use time::move_time_slice;
