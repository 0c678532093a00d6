//! Endgame phase weight from remaining non-pawn material.

/// Weight in `[0, 1]`: 0 with plenty of non-pawn material, 1 when none is
/// left. Full material for one side (3100) gives about 0.07.
#[inline]
pub fn endgame_weight(non_pawn_material: i32) -> f32 {
    1.0 - (non_pawn_material.max(0) as f32 * 0.0003).min(1.0)
}
