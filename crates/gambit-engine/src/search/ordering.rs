//! Move ordering: captures by most valuable victim, then least valuable
//! attacker, with promotion bonuses and an optional attacked-square penalty.

use crate::eval::material::piece_value;
use crate::position::{Position, SearchMove};

/// Added to every capture so captures outrank all non-captures.
const CAPTURE_BAND: i32 = 100_000;

/// Ordering score for `mv`; higher is searched first.
///
/// | Component            | Score                                        |
/// |----------------------|----------------------------------------------|
/// | Capture              | `100_000 + 10 * victim - attacker`            |
/// | Promotion            | `+ value(promoted piece)`                    |
/// | Target attacked      | `- value(mover) / 2` (when enabled)          |
pub fn score_move<P: Position>(position: &P, mv: P::Move, penalize_attacked: bool) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.captured() {
        // Victim outweighs attacker. Weighting the attacker by ten instead
        // would put queen-takes-pawn ahead of pawn-takes-queen.
        score += CAPTURE_BAND + 10 * piece_value(victim) - piece_value(mv.piece());
    }
    if let Some(promoted) = mv.promotion() {
        score += piece_value(promoted);
    }
    if penalize_attacked && position.is_attacked_by_opponent(mv.target()) {
        score -= piece_value(mv.piece()) / 2;
    }
    score
}

/// Sort `moves` best-first. Equal scores keep generation order.
pub fn order_moves<P: Position>(position: &P, moves: &mut Vec<P::Move>, penalize_attacked: bool) {
    let mut scored: Vec<(i32, P::Move)> = moves
        .iter()
        .map(|&mv| (score_move(position, mv, penalize_attacked), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    moves.clear();
    moves.extend(scored.into_iter().map(|(_, mv)| mv));
}
