// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Game-end detection. A board knows nothing about the game that led to it,
//! so the repetition history is kept by the caller in a `RepetitionTable` and
//! handed to `status` alongside the board.
use std::fmt;

use hashbrown::HashMap;

use crate::board::Board;
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawRule {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// The game is over and the given color won.
    Checkmate(Color),
    Stalemate,
    DrawByRule(DrawRule),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(color) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate(Color::White) => write!(f, "checkmate, white wins"),
            GameStatus::Checkmate(Color::Black) => write!(f, "checkmate, black wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawByRule(DrawRule::FiftyMoveRule) => write!(f, "draw by the fifty-move rule"),
            GameStatus::DrawByRule(DrawRule::ThreefoldRepetition) => {
                write!(f, "draw by threefold repetition")
            }
            GameStatus::DrawByRule(DrawRule::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
        }
    }
}

/// The part of a board that decides whether two positions are "the same" for
/// repetition purposes. Clocks are ignored, and the en-passant square only
/// counts when an en-passant capture is actually available.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
}

impl PositionKey {
    pub fn of(board: &Board) -> PositionKey {
        let en_passant_square = board.en_passant_square().filter(|_| {
            board
                .legal_moves(board.side_to_move())
                .iter()
                .any(|m| m.is_en_passant())
        });

        PositionKey {
            squares: board.squares,
            side_to_move: board.side_to_move(),
            castle_status: board.castle_status(),
            en_passant_square,
        }
    }
}

/// Occurrence counts of every position reached in a game.
#[derive(Clone, Debug, Default)]
pub struct RepetitionTable {
    counts: HashMap<PositionKey, u32>,
}

impl RepetitionTable {
    pub fn new() -> RepetitionTable {
        RepetitionTable::default()
    }

    /// Builds a table from every position of a game, including the current one.
    pub fn from_history<'a, I>(boards: I) -> RepetitionTable
    where
        I: IntoIterator<Item = &'a Board>,
    {
        let mut table = RepetitionTable::new();
        for board in boards {
            table.record(board);
        }

        table
    }

    /// Records one more occurrence of `board` and returns the new count.
    pub fn record(&mut self, board: &Board) -> u32 {
        let count = self.counts.entry(PositionKey::of(board)).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, board: &Board) -> u32 {
        self.counts
            .get(&PositionKey::of(board))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Determines the status of the game at `board`.
///
/// Checkmate and stalemate are decided first: a position with no legal moves
/// is never reported as a draw by rule. The repetition count includes `board`
/// itself if the caller has already recorded it.
pub fn status(board: &Board, repetitions: &RepetitionTable) -> GameStatus {
    let side = board.side_to_move();
    let status = if board.legal_moves(side).is_empty() {
        if board.is_check(side) {
            GameStatus::Checkmate(side.toggle())
        } else {
            GameStatus::Stalemate
        }
    } else if board.halfmove_clock() >= 100 {
        GameStatus::DrawByRule(DrawRule::FiftyMoveRule)
    } else if repetitions.count(board) >= 3 {
        GameStatus::DrawByRule(DrawRule::ThreefoldRepetition)
    } else if is_insufficient_material(board) {
        GameStatus::DrawByRule(DrawRule::InsufficientMaterial)
    } else {
        GameStatus::InProgress
    };

    if status.is_over() {
        debug!("game over at {}: {}", board.as_fen(), status);
    }

    status
}

/// Neither side can deliver mate: bare kings, a single minor piece, or any
/// number of bishops that all stand on the same square color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let others: Vec<(Square, Piece)> = board
        .occupied()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => true,
        [(_, piece)] => piece.kind == PieceKind::Knight || piece.kind == PieceKind::Bishop,
        [(first, _), ..] => others.iter().all(|(sq, piece)| {
            piece.kind == PieceKind::Bishop && sq.is_light() == first.is_light()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    fn fresh(fen: &str) -> GameStatus {
        status(&Board::from_fen(fen).unwrap(), &RepetitionTable::new())
    }

    #[test]
    fn start_in_progress() {
        assert_eq!(
            GameStatus::InProgress,
            status(&Board::start_position(), &RepetitionTable::new())
        );
    }

    #[test]
    fn back_rank_mate() {
        assert_eq!(
            GameStatus::Checkmate(Color::Black),
            fresh("4k3/8/8/8/8/8/5PPP/r5K1 w - - 0 1")
        );
    }

    #[test]
    fn table_from_history() {
        let start = Board::start_position();
        let nf3 = start.apply_move(Move::quiet(Square::G1, Square::F3)).unwrap();
        let nf6 = nf3.apply_move(Move::quiet(Square::G8, Square::F6)).unwrap();

        let table = RepetitionTable::from_history(vec![&start, &nf3, &nf6, &start]);
        assert_eq!(3, table.len());
        assert_eq!(2, table.count(&start));
        assert_eq!(1, table.count(&nf6));
        assert!(RepetitionTable::new().is_empty());
        assert!(!table.is_empty());
    }

    #[test]
    fn stalemate() {
        assert_eq!(GameStatus::Stalemate, fresh("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1"));
    }

    #[test]
    fn fifty_moves() {
        assert_eq!(
            GameStatus::DrawByRule(DrawRule::FiftyMoveRule),
            fresh("4k3/8/8/8/8/8/8/R3K3 w - - 100 80")
        );
        assert_eq!(
            GameStatus::InProgress,
            fresh("4k3/8/8/8/8/8/8/R3K3 w - - 99 80")
        );
    }

    #[test]
    fn mate_beats_fifty_moves() {
        assert_eq!(
            GameStatus::Checkmate(Color::Black),
            fresh("4k3/8/8/8/8/8/5PPP/r5K1 w - - 100 80")
        );
    }

    #[test]
    fn insufficient_material() {
        assert!(is_insufficient_material(
            &Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap()
        ));
        assert!(is_insufficient_material(
            &Board::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").unwrap()
        ));
        // both bishops on dark squares.
        assert!(is_insufficient_material(
            &Board::from_fen("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap()
        ));
        // opposite-colored bishops can still mate.
        assert!(!is_insufficient_material(
            &Board::from_fen("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap()
        ));
        assert!(!is_insufficient_material(
            &Board::from_fen("4k3/8/8/8/8/8/8/4KNN1 w - - 0 1").unwrap()
        ));
        assert!(!is_insufficient_material(
            &Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap()
        ));
        assert_eq!(
            GameStatus::DrawByRule(DrawRule::InsufficientMaterial),
            fresh("4k3/8/8/8/8/8/8/4K3 w - - 0 1")
        );
    }

    #[test]
    fn threefold_repetition() {
        let shuffle = [
            Move::quiet(Square::G1, Square::F3),
            Move::quiet(Square::G8, Square::F6),
            Move::quiet(Square::F3, Square::G1),
            Move::quiet(Square::F6, Square::G8),
        ];

        let mut board = Board::start_position();
        let mut table = RepetitionTable::new();
        table.record(&board);
        for &mov in &shuffle {
            board = board.apply_move(mov).unwrap();
            table.record(&board);
        }

        assert_eq!(2, table.count(&board));
        assert_eq!(GameStatus::InProgress, status(&board, &table));

        for &mov in &shuffle {
            board = board.apply_move(mov).unwrap();
            table.record(&board);
        }

        assert_eq!(3, table.count(&board));
        assert_eq!(
            GameStatus::DrawByRule(DrawRule::ThreefoldRepetition),
            status(&board, &table)
        );
    }

    #[test]
    fn irrelevant_en_passant_square_is_ignored() {
        let with_ep = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
        let without = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(PositionKey::of(&with_ep), PositionKey::of(&without));

        let with_ep = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        let without = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1").unwrap();
        assert_ne!(PositionKey::of(&with_ep), PositionKey::of(&without));
    }
}
