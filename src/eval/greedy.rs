// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::piece_value;
use crate::moves::Move;
use crate::types::{Color, PieceKind};

/// Ranks a king above every other piece. Legal moves never capture a king, so
/// this only matters to callers ranking hypothetical captures.
const KING_RANK_VALUE: i32 = 100;

/// Value of the piece `mov` would capture on `board`, zero for quiet moves.
pub fn capture_gain(board: &Board, mov: Move) -> i32 {
    match board.captured_piece(mov) {
        Some(piece) if piece.kind == PieceKind::King => KING_RANK_VALUE,
        Some(piece) => piece_value(piece.kind),
        None => 0,
    }
}

/// Picks the legal move for `side` that captures the most material.
///
/// Ties go to the first candidate in generation order, which scans origin
/// squares from a1 to h8, so the choice is reproducible. Returns `None` when
/// `side` has no legal moves.
pub fn choose_greedy_move(board: &Board, side: Color) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for mov in board.legal_moves(side) {
        let gain = capture_gain(board, mov);
        trace!("greedy candidate {} gains {}", mov, gain);
        if best.map_or(true, |(_, best_gain)| gain > best_gain) {
            best = Some((mov, gain));
        }
    }

    best.map(|(mov, _)| mov)
}
