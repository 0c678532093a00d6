//! Integration tests for the decision engine on real boards.
//!
//! Checks the alpha-beta result against an unpruned minimax, draw-seeking
//! behavior around a repetition, and the controller's depth scheduling.

use std::cell::Cell;
use std::time::Duration;

use gambit_core::{Board, Color, Move};
use gambit_engine::{
    Clock, EngineConfig, GameClock, KingTableMode, MATE, ManualClock, Position, SearchMode, decide_move, evaluate,
    order_moves,
};

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ROOK_ENDGAME_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const TACTICAL_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
const SCHOLARS_MATE_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
/// White: king and knight. Black: king and pawn. White cannot win by force.
const KNIGHT_VS_PAWN_FEN: &str = "7k/p7/8/8/4N3/8/8/K7 w - - 0 1";

fn board(fen: &str) -> Board {
    fen.parse().unwrap()
}

fn fixed(depth: u8) -> EngineConfig {
    EngineConfig {
        mode: SearchMode::FixedDepth,
        depth,
        panic_depth: depth,
        draw_seeking: false,
        ..EngineConfig::default()
    }
}

fn plenty_of_time() -> ManualClock {
    ManualClock::new(Duration::from_secs(600))
}

// ── Reference minimax ─────────────────────────────────────────────────────────

fn full_width_quiescence(b: &mut Board, king_tables: KingTableMode) -> i32 {
    let mut best = evaluate(&*b, king_tables);
    for mv in Position::legal_moves(b, true) {
        b.make_move(mv);
        best = best.max(-full_width_quiescence(b, king_tables));
        b.undo_move(mv);
    }
    best
}

fn minimax(b: &mut Board, depth: u8, ply: i32, king_tables: KingTableMode) -> i32 {
    if ply > 0 && b.is_draw() {
        return 0;
    }
    let moves = b.legal_moves();
    if moves.is_empty() {
        return if b.is_in_check() { -(MATE - ply) } else { 0 };
    }
    if depth == 0 {
        return full_width_quiescence(b, king_tables);
    }
    let mut best = i32::MIN;
    for mv in moves {
        b.make_move(mv);
        best = best.max(-minimax(b, depth - 1, ply + 1, king_tables));
        b.undo_move(mv);
    }
    best
}

/// First move, in search order, reaching the minimax value.
fn minimax_root(b: &mut Board, depth: u8, config: &EngineConfig) -> (Move, i32) {
    let mut moves = b.legal_moves();
    order_moves(&*b, &mut moves, config.penalize_attacked_targets);
    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        b.make_move(mv);
        let score = -minimax(b, depth - 1, 1, config.king_tables);
        b.undo_move(mv);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best.unwrap()
}

fn assert_matches_minimax(fen: &str, depth: u8) {
    let config = fixed(depth);
    let mut b = board(fen);
    let (expected_move, expected_score) = minimax_root(&mut b, depth, &config);

    let mover = b.side_to_move();
    let decision = decide_move(&mut b, &plenty_of_time(), mover, &config).unwrap();
    assert_eq!(decision.depth, depth);
    assert_eq!(decision.score, expected_score, "{fen} at depth {depth}");
    assert_eq!(decision.best_move, expected_move, "{fen} at depth {depth}");
    assert_eq!(b, board(fen), "search must leave the board as it found it");
}

// ── Alpha-beta equivalence ────────────────────────────────────────────────────

#[test]
fn alpha_beta_matches_minimax_startpos() {
    assert_matches_minimax(gambit_core::STARTING_FEN, 1);
    assert_matches_minimax(gambit_core::STARTING_FEN, 2);
    assert_matches_minimax(gambit_core::STARTING_FEN, 3);
}

#[test]
fn alpha_beta_matches_minimax_kiwipete() {
    assert_matches_minimax(KIWIPETE_FEN, 1);
}

#[test]
fn alpha_beta_matches_minimax_rook_endgame() {
    assert_matches_minimax(ROOK_ENDGAME_FEN, 3);
}

#[test]
fn alpha_beta_matches_minimax_italian() {
    assert_matches_minimax(TACTICAL_FEN, 2);
}

// ── Depth 1 from the start ────────────────────────────────────────────────────

#[test]
fn depth_one_from_start_is_best_negated_reply_eval() {
    let config = fixed(1);
    let mut b = Board::starting_position();
    // No captures exist on move one, so each reply stands pat.
    let expected = b
        .legal_moves()
        .into_iter()
        .map(|mv| {
            b.make_move(mv);
            let score = -evaluate(&b, config.king_tables);
            b.undo_move(mv);
            score
        })
        .max()
        .unwrap();

    let decision = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
    assert_eq!(decision.score, expected);
    assert!(Board::starting_position().legal_moves().contains(&decision.best_move));
}

// ── Draw seeking ──────────────────────────────────────────────────────────────

/// Shuffle both kings out and back so the start position has occurred twice;
/// a1a2 now repeats the position after White's first move.
fn knight_vs_pawn_after_shuffle() -> Board {
    let mut b = board(KNIGHT_VS_PAWN_FEN);
    for text in ["a1a2", "h8g8", "a2a1", "g8h8"] {
        let mv = b.parse_uci_move(text).unwrap();
        b.make_move(mv);
    }
    b
}

#[test]
fn draw_seeking_prefers_the_repetition() {
    let config = EngineConfig {
        draw_seeking: true,
        draw_score: 2_500,
        ..fixed(2)
    };
    let mut b = knight_vs_pawn_after_shuffle();
    let decision = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
    assert!(decision.seek_draw);
    assert_eq!(decision.best_move.to_uci(), "a1a2");
    assert_eq!(decision.score, 2_500);
}

#[test]
fn without_draw_seeking_the_repetition_is_worth_nothing() {
    let config = fixed(2);
    let mut b = knight_vs_pawn_after_shuffle();
    let decision = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
    assert!(!decision.seek_draw);
    assert_ne!(decision.best_move.to_uci(), "a1a2");
    assert!(decision.score > 0, "knight against pawn should stay ahead, got {}", decision.score);

    let repeat = b.parse_uci_move("a1a2").unwrap();
    b.make_move(repeat);
    assert!(b.is_draw(), "a1a2 should repeat the position");
}

#[test]
fn draw_seeking_search_is_capped_at_panic_depth() {
    let config = EngineConfig {
        draw_seeking: true,
        depth: 4,
        panic_depth: 2,
        ..fixed(4)
    };
    let mut b = board(KNIGHT_VS_PAWN_FEN);
    let decision = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
    assert!(decision.seek_draw);
    assert_eq!(decision.depth, 2);
}

// ── Iterative deepening ───────────────────────────────────────────────────────

#[test]
fn iterative_reaches_max_depth_with_time_to_spare() {
    let config = EngineConfig {
        mode: SearchMode::Iterative { max_depth: 3 },
        draw_seeking: false,
        ..EngineConfig::iterative()
    };
    let mut b = board(TACTICAL_FEN);
    let decision = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
    assert_eq!(decision.depth, 3);
    assert!(!decision.aborted);
}

#[test]
fn iterative_stops_once_mate_is_found() {
    let config = EngineConfig {
        mode: SearchMode::Iterative { max_depth: 6 },
        ..EngineConfig::iterative()
    };
    let mut b = board(SCHOLARS_MATE_FEN);
    let decision = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
    assert_eq!(decision.best_move.to_uci(), "h5f7");
    assert_eq!(decision.score, MATE - 1);
    assert_eq!(decision.depth, 1);
}

/// Reports no time spent until it has been polled `limit` times, then
/// reports the whole game spent.
struct PollClock {
    polls: Cell<u64>,
    limit: u64,
}

impl PollClock {
    fn new(limit: u64) -> Self {
        Self {
            polls: Cell::new(0),
            limit,
        }
    }
}

impl Clock for PollClock {
    fn remaining(&self) -> Duration {
        Duration::from_secs(600)
    }

    fn elapsed_this_turn(&self) -> Duration {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        if polls > self.limit { Duration::from_secs(600) } else { Duration::ZERO }
    }
}

fn iterative_to(max_depth: u8) -> EngineConfig {
    EngineConfig {
        mode: SearchMode::Iterative { max_depth },
        draw_seeking: false,
        ..EngineConfig::iterative()
    }
}

#[test]
fn aborted_iteration_keeps_the_previous_depth() {
    for depth in [2, 3] {
        // Count the polls a clean search to `depth - 1` makes.
        let mut b = board(TACTICAL_FEN);
        let counting = PollClock::new(u64::MAX);
        let completed = decide_move(&mut b, &counting, Color::White, &iterative_to(depth - 1)).unwrap();
        assert!(!completed.aborted);
        assert_eq!(completed.depth, depth - 1);

        // Allow those polls plus the one before the next iteration starts,
        // so the clock runs out on its first node.
        let clock = PollClock::new(counting.polls.get() + 1);
        let decision = decide_move(&mut b, &clock, Color::White, &iterative_to(depth)).unwrap();
        assert!(decision.aborted, "depth {depth}");
        assert_eq!(decision.depth, depth - 1, "depth {depth}");
        assert_eq!(decision.best_move, completed.best_move, "depth {depth}");
        assert_eq!(decision.score, completed.score, "depth {depth}");
        assert_eq!(b, board(TACTICAL_FEN));

        let config = EngineConfig {
            king_tables: KingTableMode::Tiered,
            penalize_attacked_targets: true,
            ..fixed(depth - 1)
        };
        let reference = decide_move(&mut b, &plenty_of_time(), Color::White, &config).unwrap();
        assert_eq!(decision.best_move, reference.best_move, "depth {depth}");
        assert_eq!(decision.score, reference.score, "depth {depth}");
    }
}

#[test]
fn iterative_on_a_wall_clock_returns_a_legal_move() {
    let config = EngineConfig {
        draw_seeking: false,
        max_move_time: Duration::from_millis(50),
        ..EngineConfig::iterative()
    };
    let mut b = board(KIWIPETE_FEN);
    let clock = GameClock::start(Duration::from_secs(60));
    let decision = decide_move(&mut b, &clock, Color::White, &config).unwrap();
    assert!(decision.depth >= 1);
    assert!(board(KIWIPETE_FEN).legal_moves().contains(&decision.best_move));
    assert_eq!(b, board(KIWIPETE_FEN));
}
