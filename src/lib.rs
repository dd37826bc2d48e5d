// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! caissa is a chess rules engine: board representation, legal move
//! generation, move application, and game-end detection, plus the small
//! amount of evaluation and notation a front end needs.
//!
//! Boards are immutable values. Every operation is a pure function of its
//! arguments, so boards can be shared freely between threads.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate pest_derive;

mod analysis;
pub mod attacks;
mod bitboard;
mod board;
mod error;
pub mod eval;
mod fen;
pub mod interface;
mod move_generator;
mod moves;
pub mod notation;
mod perft;
mod status;
mod types;

pub use analysis::{Analysis, AnalysisReport, SideReport, Suggestion, CENTRE_SQUARES};
pub use bitboard::{Bitboard, BitboardIterator};
pub use board::{Board, START_POSITION_FEN};
pub use error::{ChessError, NotationError};
pub use fen::FenParseError;
pub use interface::{Game, GameSnapshot};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveKind};
pub use perft::{divide, perft};
pub use status::{
    is_insufficient_material, status, DrawRule, GameStatus, PositionKey, RepetitionTable,
};
pub use types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
pub use types::{COLORS, FILES, PIECE_KINDS, PROMOTION_KINDS, RANKS, SQUARES};
