//! Perft: count leaf nodes of the legal-move tree to a fixed depth.
//!
//! Promotions are expanded to all four piece choices so the totals line up
//! with published reference counts. Draw rules are not applied; perft
//! measures move generation only.

use crate::board::Board;
use crate::moves::Move;
use crate::piece::Player;

/// Legal moves for `player` with every promotion choice listed separately.
pub fn expanded_legal_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .legal_moves_for(player)
        .into_iter()
        .flat_map(Move::promotion_choices)
        .collect()
}

/// The board after `player` plays `mv`, with the turn bookkeeping GameState
/// does: the mover's old skip square is forgotten first.
fn play(board: &Board, player: Player, mv: &Move) -> Board {
    let mut next = board.clone();
    next.set_pawn_skip_position(player, None);
    mv.execute(&mut next);
    next
}

pub fn perft(board: &Board, player: Player, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = expanded_legal_moves(board, player);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&play(board, player, mv), player.opponent(), depth - 1))
        .sum()
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(board: &Board, player: Player, depth: u32) -> Vec<(Move, u64)> {
    assert!(depth > 0, "divide only makes sense for depth > 0");
    expanded_legal_moves(board, player)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&play(board, player, &mv), player.opponent(), depth - 1);
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
    // Kiwipete: castling, en passant and pins interacting.
    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    // Promotion-heavy middlegame from the talkchess perft suite.
    const TALKCHESS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn run(fen: &str, depth: u32) -> u64 {
        let parsed = parse_fen(fen).unwrap();
        perft(&parsed.board, parsed.side_to_move, depth)
    }

    #[test]
    fn depth_zero_is_one() {
        assert_eq!(run(START, 0), 1);
    }

    #[test]
    fn startpos_depth1() {
        assert_eq!(run(START, 1), 20);
    }

    #[test]
    fn startpos_depth2() {
        assert_eq!(run(START, 2), 400);
    }

    #[test]
    fn startpos_depth3() {
        assert_eq!(run(START, 3), 8902);
    }

    #[test]
    #[ignore]
    fn startpos_depth4() {
        assert_eq!(run(START, 4), 197_281);
    }

    #[test]
    fn kiwipete_depth1() {
        assert_eq!(run(KIWIPETE, 1), 48);
    }

    #[test]
    fn kiwipete_depth2() {
        assert_eq!(run(KIWIPETE, 2), 2_039);
    }

    #[test]
    #[ignore]
    fn kiwipete_depth3() {
        assert_eq!(run(KIWIPETE, 3), 97_862);
    }

    #[test]
    fn talkchess_depth1() {
        assert_eq!(run(TALKCHESS, 1), 44);
    }

    #[test]
    fn talkchess_depth2() {
        assert_eq!(run(TALKCHESS, 2), 1_486);
    }

    #[test]
    fn divide_sums_to_perft() {
        let parsed = parse_fen(KIWIPETE).unwrap();
        let divide = perft_divide(&parsed.board, parsed.side_to_move, 2);
        assert_eq!(divide.len(), 48);
        let total: u64 = divide.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 2_039);
    }
}
