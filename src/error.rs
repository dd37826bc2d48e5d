// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

use crate::fen::FenParseError;
use crate::moves::Move;

/// Errors raised by the rules engine. Every failing operation leaves its
/// input board untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The move is not in the legal set for the board it was played on.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// A pawn move reaches the last rank but names no promotion piece.
    #[error("move {0} reaches the last rank without a promotion piece")]
    AmbiguousPromotion(Move),

    #[error("invalid FEN: {0}")]
    Fen(#[from] FenParseError),

    #[error("invalid move text: {0}")]
    Notation(#[from] NotationError),
}

/// Failures to read a move written in algebraic or UCI notation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("could not parse {0:?}")]
    Syntax(String),

    #[error("no legal move matches {0:?}")]
    NoSuchMove(String),

    #[error("{0:?} matches more than one legal move")]
    Ambiguous(String),
}
