// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module defines `Move`, a pure description of a chess move.
//!
//! A move names its source and destination squares, the piece a pawn
//! promotes to (if any), and a `MoveKind` flag for the moves whose side
//! effects reach beyond the two named squares:
//!
//! | Kind              | Side effect                                      |
//! |-------------------|--------------------------------------------------|
//! | `Normal`          | none                                             |
//! | `DoublePawnPush`  | sets the en-passant square behind the pawn       |
//! | `EnPassant`       | removes the pawn beside the source square        |
//! | `KingsideCastle`  | moves the h-file rook next to the king           |
//! | `QueensideCastle` | moves the a-file rook next to the king           |
//!
//! Whether a move captures is not recorded; that depends on the board the
//! move is played on.
use std::fmt::{self, Write};

use crate::types::{PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    DoublePawnPush,
    EnPassant,
    KingsideCastle,
    QueensideCastle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
    kind: MoveKind,
}

impl Move {
    /// Constructs an ordinary move, capturing or not, from the source square to the
    /// destination square.
    pub fn quiet(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            promotion: None,
            kind: MoveKind::Normal,
        }
    }

    pub fn double_pawn_push(source: Square, dest: Square) -> Move {
        Move {
            kind: MoveKind::DoublePawnPush,
            ..Move::quiet(source, dest)
        }
    }

    pub fn en_passant(source: Square, dest: Square) -> Move {
        Move {
            kind: MoveKind::EnPassant,
            ..Move::quiet(source, dest)
        }
    }

    /// Constructs a pawn move to the last rank that promotes to `promoted`.
    pub fn promotion(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move {
            promotion: Some(promoted),
            ..Move::quiet(source, dest)
        }
    }

    /// Constructs a kingside castle, encoded by the king's start and stop squares.
    pub fn kingside_castle(source: Square, dest: Square) -> Move {
        Move {
            kind: MoveKind::KingsideCastle,
            ..Move::quiet(source, dest)
        }
    }

    /// Constructs a queenside castle, encoded by the king's start and stop squares.
    pub fn queenside_castle(source: Square, dest: Square) -> Move {
        Move {
            kind: MoveKind::QueensideCastle,
            ..Move::quiet(source, dest)
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn kind(self) -> MoveKind {
        self.kind
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_en_passant(self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.kind == MoveKind::DoublePawnPush
    }

    pub fn is_kingside_castle(self) -> bool {
        self.kind == MoveKind::KingsideCastle
    }

    pub fn is_queenside_castle(self) -> bool {
        self.kind == MoveKind::QueensideCastle
    }

    pub fn is_castle(self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    /// Returns the UCI form of this move: source, destination and an optional
    /// lowercase promotion letter.
    ///
    /// ```
    /// use caissa::{Move, PieceKind, Square};
    ///
    /// assert_eq!("e2e4", Move::double_pawn_push(Square::E2, Square::E4).as_uci());
    /// assert_eq!("a7a8q", Move::promotion(Square::A7, Square::A8, PieceKind::Queen).as_uci());
    /// ```
    pub fn as_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(kind) = self.promotion {
            f.write_char(kind.as_char())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveKind};
    use crate::types::{PieceKind, Square};

    #[test]
    fn quiet() {
        let quiet = Move::quiet(Square::A4, Square::A5);
        assert_eq!(Square::A4, quiet.source());
        assert_eq!(Square::A5, quiet.destination());
        assert_eq!(MoveKind::Normal, quiet.kind());
        assert!(!quiet.is_promotion());
    }

    #[test]
    fn special_kinds_are_distinct() {
        let ep = Move::en_passant(Square::E5, Square::D6);
        assert!(ep.is_en_passant());
        assert_ne!(Move::quiet(Square::E5, Square::D6), ep);

        let dpp = Move::double_pawn_push(Square::D2, Square::D4);
        assert!(dpp.is_double_pawn_push());
        assert!(!dpp.is_castle());

        let oo = Move::kingside_castle(Square::E1, Square::G1);
        assert!(oo.is_kingside_castle());
        assert!(oo.is_castle());

        let ooo = Move::queenside_castle(Square::E8, Square::C8);
        assert!(ooo.is_queenside_castle());
        assert!(!ooo.is_kingside_castle());
    }

    #[test]
    fn promotion() {
        let promo = Move::promotion(Square::B7, Square::B8, PieceKind::Knight);
        assert!(promo.is_promotion());
        assert_eq!(Some(PieceKind::Knight), promo.promotion_piece());
        assert_ne!(
            promo,
            Move::promotion(Square::B7, Square::B8, PieceKind::Queen)
        );
    }

    #[test]
    fn uci_forms() {
        assert_eq!("a1a2", Move::quiet(Square::A1, Square::A2).as_uci());
        assert_eq!("e1g1", Move::kingside_castle(Square::E1, Square::G1).as_uci());
        assert_eq!(
            "h2h1r",
            Move::promotion(Square::H2, Square::H1, PieceKind::Rook).as_uci()
        );
    }
}
