// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `Bitboard` is a set of squares packed into a single 64-bit integer,
//! bit `n` standing for the square with index `n` (a1 = 0, h8 = 63).
//!
//! The board itself is stored square-by-square; bitboards are the currency
//! for derived square sets: attack maps, occupancy, and pawn-structure
//! queries in the analysis module.
use std::fmt;
use std::iter::{FromIterator, Iterator};
use std::ops;

use crate::types::{self, File, Square, SQUARES};

const FILE_A_BITS: u64 = 0x0101_0101_0101_0101;

#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    pub const fn from_square(square: Square) -> Bitboard {
        Bitboard::from_bits(1u64 << (square as u8))
    }

    /// Every square on the given file.
    pub const fn file_mask(file: File) -> Bitboard {
        Bitboard::from_bits(FILE_A_BITS << (file as u8))
    }

    pub const fn test(self, square: Square) -> bool {
        (self.bits & (1u64 << (square as u8))) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.bits |= 1u64 << (square as u8);
    }

    pub fn unset(&mut self, square: Square) {
        self.bits &= !(1u64 << (square as u8));
    }

    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    pub fn first(self) -> Option<Square> {
        self.iter().next()
    }

    /// Iterates the members of this set in ascending square order.
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Bitboard").field(&self.bits).finish()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in types::RANKS.iter().rev() {
            for &file in &types::FILES {
                let mark = if self.test(Square::of(rank, file)) {
                    " 1 "
                } else {
                    " . "
                };
                f.write_str(mark)?;
            }

            writeln!(f, "| {}", rank)?;
        }

        Ok(())
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = self.or(rhs);
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut board = Bitboard::none();
        for square in iter {
            board.set(square);
        }
        board
    }
}

pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(SQUARES[next])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}
