use std::time::Duration;

use anyhow::{Context, Result};
use gambit_core::{Board, STARTING_FEN};
use gambit_engine::{EngineConfig, GameClock, KingTableMode, SearchMode, decide_move};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(name = "gambit", about = "Pick a move for the side to move in a chess position.")]
struct Args {
    /// Position to search from, in FEN.
    #[structopt(long, default_value = STARTING_FEN)]
    fen: String,

    /// Moves already played from `--fen`, in UCI notation. Needed for
    /// repetition detection.
    #[structopt(long)]
    moves: Vec<String>,

    /// Time left on the engine's clock.
    #[structopt(long, default_value = "300000")]
    remaining_ms: u64,

    #[structopt(long, default_value = "5")]
    depth: u8,

    /// Depth used once the clock drops under the panic threshold.
    #[structopt(long, default_value = "4")]
    panic_depth: u8,

    /// Deepen one ply at a time until the move's time slice runs out.
    #[structopt(long)]
    iterative: bool,

    /// Deepest iteration in `--iterative` mode.
    #[structopt(long, default_value = "64")]
    max_depth: u8,

    #[structopt(long)]
    no_draw_seek: bool,

    /// Score of a draw for the engine while it is seeking one.
    #[structopt(long, default_value = "2500")]
    draw_score: i32,

    /// Switch king tables by phase instead of blending them.
    #[structopt(long)]
    tiered_king: bool,
}

impl Args {
    fn config(&self) -> EngineConfig {
        let base = if self.iterative {
            EngineConfig::iterative()
        } else {
            EngineConfig::default()
        };
        EngineConfig {
            mode: if self.iterative {
                SearchMode::Iterative { max_depth: self.max_depth }
            } else {
                SearchMode::FixedDepth
            },
            depth: self.depth,
            panic_depth: self.panic_depth,
            draw_seeking: !self.no_draw_seek,
            draw_score: self.draw_score,
            king_tables: if self.tiered_king { KingTableMode::Tiered } else { base.king_tables },
            ..base
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::from_args();
    let mut board: Board = args.fen.parse().with_context(|| format!("invalid FEN: {}", args.fen))?;
    for text in &args.moves {
        let mv = board
            .parse_uci_move(text)
            .with_context(|| format!("cannot play {text} in {board}"))?;
        board.make_move(mv);
    }

    let config = args.config();
    let engine_color = board.side_to_move();
    info!(fen = %board, mode = ?config.mode, "searching");

    let clock = GameClock::start(Duration::from_millis(args.remaining_ms));
    let decision = decide_move(&mut board, &clock, engine_color, &config).context("no move to play")?;
    println!("{}", decision.best_move);
    Ok(())
}
