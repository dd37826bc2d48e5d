// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::moves::Move;

/// Counts the leaf nodes of the legal move tree of the given depth. Root moves
/// are searched in parallel; boards are values, so no synchronization is needed.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(board.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| perft_serial(&board.make_unchecked(mov), depth - 1))
        .sum()
}

fn perft_serial(board: &Board, depth: u32) -> u64 {
    let moves = board.legal_moves(board.side_to_move());
    if depth <= 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mov| perft_serial(&board.make_unchecked(mov), depth - 1))
        .sum()
}

/// Node counts below each root move, in generation order.
pub fn divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return vec![];
    }

    board
        .legal_moves(board.side_to_move())
        .par_iter()
        .map(|&mov| (mov, perft(&board.make_unchecked(mov), depth - 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{divide, perft};
    use crate::board::Board;

    fn perft_test(fen: &'static str, depth: u32, count: u64) {
        let pos = Board::from_fen(fen).unwrap();
        assert_eq!(count, perft(&pos, depth));
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

        (skip $name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            #[ignore]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

    }

    perft_tests! {
        start_1 (1): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 20;
        start_2 (2): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 400;
        start_3 (3): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 8902;
        skip start_4 (4): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 197281;

        kiwipete_1 (1): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" => 48;
        kiwipete_2 (2): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" => 2039;
        skip kiwipete_3 (3): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" => 97862;

        position_3_1 (1): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 14;
        position_3_2 (2): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 191;
        position_3_3 (3): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 2812;
        skip position_3_4 (4): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 43238;

        position_4_1 (1): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 6;
        position_4_2 (2): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 264;
        skip position_4_3 (3): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 9467;

        position_5_1 (1): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 44;
        position_5_2 (2): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 1486;
        skip position_5_3 (3): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 62379;
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Board::start_position();
        let split = divide(&pos, 2);
        assert_eq!(20, split.len());
        assert!(split.iter().all(|&(_, nodes)| nodes == 20));
        assert_eq!(400, split.iter().map(|&(_, n)| n).sum::<u64>());
    }
}
