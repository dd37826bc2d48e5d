// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::eval;
use crate::types::{Color, File, PieceKind, Square, FILES};

/// The four central squares.
pub static CENTRE_SQUARES: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Provider of common board analyses upon a static position.
pub struct Analysis<'a> {
    board: &'a Board,
}

impl<'a> Analysis<'a> {
    pub fn new(board: &'a Board) -> Analysis<'a> {
        Analysis { board }
    }

    /// Returns the set of doubled pawns left by the given color.
    pub fn doubled_pawns(&self, color: Color) -> Bitboard {
        let pawns = self.board.pieces_of_kind(color, PieceKind::Pawn);
        let mut answer = Bitboard::none();
        for &file in &FILES {
            let pawns_on_file = pawns & Bitboard::file_mask(file);
            if pawns_on_file.count() > 1 {
                answer |= pawns_on_file;
            }
        }

        answer
    }

    /// Pawns with no friendly pawn on either neighbouring file.
    pub fn isolated_pawns(&self, color: Color) -> Bitboard {
        let pawns = self.board.pieces_of_kind(color, PieceKind::Pawn);
        let mut answer = Bitboard::none();
        for &file in &FILES {
            let pawns_on_current_file = pawns & Bitboard::file_mask(file);
            if pawns_on_current_file.empty() {
                continue;
            }

            if (pawns & adjacent_files(file)).empty() {
                answer |= pawns_on_current_file;
            }
        }

        answer
    }

    /// Number of legal moves available to `color`.
    pub fn mobility(&self, color: Color) -> u32 {
        self.board.legal_moves(color).len() as u32
    }

    /// How many of the four central squares `color` occupies.
    pub fn centre_squares(&self, color: Color) -> u32 {
        CENTRE_SQUARES
            .iter()
            .filter(|&&sq| self.board.piece_at(sq).map(|p| p.color) == Some(color))
            .count() as u32
    }

    /// Central occupation of White minus that of Black.
    pub fn centre_control(&self) -> i32 {
        self.centre_squares(Color::White) as i32 - self.centre_squares(Color::Black) as i32
    }

    /// Legal captures available to the side to move, en passant included.
    pub fn captures_available(&self) -> usize {
        self.board
            .legal_moves(self.board.side_to_move())
            .iter()
            .filter(|&&m| self.board.is_capture(m))
            .count()
    }

    fn side(&self, color: Color) -> SideReport {
        SideReport {
            material: eval::material(self.board, color),
            mobility: self.mobility(color),
            centre_squares: self.centre_squares(color),
            doubled_pawns: self.doubled_pawns(color).count(),
            isolated_pawns: self.isolated_pawns(color).count(),
        }
    }

    /// Summarizes the position for the side to move.
    pub fn report(&self) -> AnalysisReport {
        let side_to_move = self.board.side_to_move();
        let in_check = self.board.is_check(side_to_move);
        let captures_available = self.captures_available();
        let centre_control = self.centre_control();

        let mut suggestions = vec![];
        if in_check {
            suggestions.push(Suggestion::InCheck);
        }

        if captures_available > 0 {
            suggestions.push(Suggestion::CapturesAvailable(captures_available));
        }

        let own_centre = match side_to_move {
            Color::White => centre_control,
            Color::Black => -centre_control,
        };
        if own_centre < 0 {
            suggestions.push(Suggestion::ContestCentre);
        }

        AnalysisReport {
            side_to_move,
            material_balance: eval::material_score(self.board, Color::White),
            centre_control,
            in_check,
            captures_available,
            white: self.side(Color::White),
            black: self.side(Color::Black),
            suggestions,
        }
    }
}

fn adjacent_files(file: File) -> Bitboard {
    let index = file as i8;
    FILES
        .iter()
        .filter(|&&f| (f as i8 - index).abs() == 1)
        .fold(Bitboard::none(), |acc, &f| acc | Bitboard::file_mask(f))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideReport {
    pub material: i32,
    pub mobility: u32,
    pub centre_squares: u32,
    pub doubled_pawns: u32,
    pub isolated_pawns: u32,
}

/// Advice for the side to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    InCheck,
    CapturesAvailable(usize),
    ContestCentre,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Suggestion::InCheck => {
                write!(f, "You are in check! Move your king or block the attack.")
            }
            Suggestion::CapturesAvailable(n) => {
                write!(f, "Consider capturing moves: {} available", n)
            }
            Suggestion::ContestCentre => {
                write!(f, "Try to control the center squares (d4, d5, e4, e5)")
            }
        }
    }
}

/// A snapshot of the position's material, structure, and activity.
/// `material_balance` and `centre_control` are from White's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub side_to_move: Color,
    pub material_balance: i32,
    pub centre_control: i32,
    pub in_check: bool,
    pub captures_available: usize,
    pub white: SideReport,
    pub black: SideReport,
    pub suggestions: Vec<Suggestion>,
}
