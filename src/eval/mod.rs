// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::types::Color;

mod greedy;
mod material;

pub use greedy::{capture_gain, choose_greedy_move};
pub use material::{material, material_score, piece_value, MaterialEvaluator};

/// Static evaluation of a board from one side's point of view. Positive
/// scores favor `side`.
pub trait BoardEvaluator: Default {
    fn evaluate(&self, board: &Board, side: Color) -> i32;
}
