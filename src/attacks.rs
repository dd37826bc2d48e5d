// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack sets for each kind of piece. Knights, kings and pawns have fixed
//! attack patterns that are tabulated once per square; sliding pieces cast
//! rays over the current occupancy.
use crate::bitboard::Bitboard;
use crate::types::{Color, Direction, PieceKind, Square, TableIndex, DIAGONALS, ORTHOGONALS, SQUARES};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

struct StepTable {
    table: [Bitboard; 64],
}

impl StepTable {
    fn new(offsets: &[(i8, i8)]) -> StepTable {
        let mut st = StepTable {
            table: [Bitboard::none(); 64],
        };

        for &sq in SQUARES.iter() {
            st.table[sq.as_index()] = offsets
                .iter()
                .filter_map(|&(df, dr)| sq.offset(df, dr))
                .collect();
        }

        st
    }

    fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in &[Color::White, Color::Black] {
                let forward = color.forward();
                pt.table[sq.as_index()][color.as_index()] = [-1, 1]
                    .iter()
                    .filter_map(|&df| sq.offset(df, forward))
                    .collect();
            }
        }

        pt
    }

    fn attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.table[sq.as_index()][color.as_index()]
    }
}

lazy_static! {
    static ref KNIGHT_TABLE: StepTable = StepTable::new(&KNIGHT_OFFSETS);
    static ref KING_TABLE: StepTable = StepTable::new(&KING_OFFSETS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
}

/// Walks from `sq` in `dir` until the edge of the board, stopping after the
/// first occupied square. The blocker itself is included in the result.
pub fn ray(sq: Square, dir: Direction, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::none();
    let mut cursor = sq;
    while let Some(next) = cursor.towards(dir) {
        attacks.set(next);
        if occupancy.test(next) {
            break;
        }

        cursor = next;
    }

    attacks
}

fn rays(sq: Square, dirs: &[Direction], occupancy: Bitboard) -> Bitboard {
    dirs.iter()
        .fold(Bitboard::none(), |acc, &dir| acc | ray(sq, dir, occupancy))
}

/// Squares a pawn of the given color attacks diagonally, whether or not it could
/// capture there this turn.
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rays(sq, &DIAGONALS, occupancy)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rays(sq, &ORTHOGONALS, occupancy)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

/// Attack set of a piece of the given kind and color standing on `sq`.
pub fn attacks(kind: PieceKind, color: Color, sq: Square, occupancy: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupancy),
        PieceKind::Rook => rook_attacks(sq, occupancy),
        PieceKind::Queen => queen_attacks(sq, occupancy),
        PieceKind::King => king_attacks(sq),
    }
}
