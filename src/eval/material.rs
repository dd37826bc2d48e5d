// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::BoardEvaluator;
use crate::types::{Color, PieceKind};

const PAWN_VALUE: i32 = 1;
const KNIGHT_VALUE: i32 = 3;
const BISHOP_VALUE: i32 = 3;
const ROOK_VALUE: i32 = 5;
const QUEEN_VALUE: i32 = 9;

/// Kings are worth nothing in material counts; they can never be traded.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

/// Total value of `side`'s pieces.
pub fn material(board: &Board, side: Color) -> i32 {
    board
        .occupied()
        .filter(|(_, piece)| piece.color == side)
        .map(|(_, piece)| piece_value(piece.kind))
        .sum()
}

/// `side`'s material minus its opponent's.
pub fn material_score(board: &Board, side: Color) -> i32 {
    material(board, side) - material(board, side.toggle())
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, side: Color) -> i32 {
        material_score(board, side)
    }
}
