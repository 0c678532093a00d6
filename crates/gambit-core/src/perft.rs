//! Perft: leaf-node counts for move generator verification.

use crate::board::Board;

/// Count leaf nodes `depth` plies below `board`.
///
/// Depth 0 counts the position itself; depth 1 counts legal moves without
/// making them. The board is restored before returning.
pub fn perft(board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.undo_move(mv);
    }
    nodes
}

/// Per-root-move perft counts as `(uci, nodes)`, sorted by move text.
pub fn divide(board: &mut Board, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = board
        .legal_moves()
        .into_iter()
        .map(|mv| {
            board.make_move(mv);
            let count = perft(board, depth.saturating_sub(1));
            board.undo_move(mv);
            (mv.to_uci(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn startpos() {
        let mut b = Board::starting_position();
        assert_eq!(perft(&mut b, 1), 20);
        assert_eq!(perft(&mut b, 2), 400);
        assert_eq!(perft(&mut b, 3), 8_902);
    }

    #[test]
    #[ignore] // slow
    fn startpos_depth_4() {
        assert_eq!(perft(&mut Board::starting_position(), 4), 197_281);
    }

    #[test]
    fn kiwipete() {
        let mut b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(perft(&mut b, 1), 48);
        assert_eq!(perft(&mut b, 2), 2_039);
    }

    #[test]
    #[ignore] // slow
    fn kiwipete_depth_3() {
        let mut b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(perft(&mut b, 3), 97_862);
    }

    #[test]
    fn rook_endgame_with_en_passant_pins() {
        let mut b = board("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
        assert_eq!(perft(&mut b, 1), 14);
        assert_eq!(perft(&mut b, 2), 191);
        assert_eq!(perft(&mut b, 3), 2_812);
    }

    #[test]
    fn promotions_and_castling_out_of_check() {
        let mut b = board("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
        assert_eq!(perft(&mut b, 1), 6);
        assert_eq!(perft(&mut b, 2), 264);
        assert_eq!(perft(&mut b, 3), 9_467);
    }

    #[test]
    fn position5() {
        let mut b = board("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");
        assert_eq!(perft(&mut b, 1), 44);
        assert_eq!(perft(&mut b, 2), 1_486);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut b = Board::starting_position();
        let split = divide(&mut b, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8_902);
        assert_eq!(b, Board::starting_position());
    }
}
