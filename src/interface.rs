// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The narrow surface a front end needs: start a game, list and play moves,
//! ask for the game status, and exchange boards and moves as text.
//!
//! Every function here is a thin, stateless wrapper; `Game` adds the one piece
//! of state a front end must keep, the history used for repetition draws.
use crate::board::Board;
use crate::error::ChessError;
use crate::eval;
use crate::moves::Move;
use crate::notation;
use crate::status::{self, GameStatus, RepetitionTable};
use crate::types::{Color, Square};

pub fn new_game() -> Board {
    Board::start_position()
}

pub fn legal_moves(board: &Board, side: Color) -> Vec<Move> {
    board.legal_moves(side)
}

pub fn legal_moves_from(board: &Board, square: Square) -> Vec<Move> {
    board.legal_moves_from(square)
}

pub fn apply_move(board: &Board, mov: Move) -> Result<Board, ChessError> {
    board.apply_move(mov)
}

pub fn status(board: &Board, repetitions: &RepetitionTable) -> GameStatus {
    status::status(board, repetitions)
}

pub fn to_fen(board: &Board) -> String {
    board.as_fen()
}

pub fn from_fen(fen: &str) -> Result<Board, ChessError> {
    Ok(Board::from_fen(fen)?)
}

pub fn move_to_algebraic(board: &Board, mov: Move) -> Result<String, ChessError> {
    notation::move_to_san(board, mov)
}

pub fn parse_algebraic(board: &Board, text: &str) -> Result<Move, ChessError> {
    notation::parse_move(board, text)
}

/// A suggested move for the side to move: the greedy capture choice.
pub fn hint(board: &Board) -> Option<Move> {
    eval::choose_greedy_move(board, board.side_to_move())
}

/// Everything a client needs to draw the current position, in a shape that
/// serializes directly to JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub fen: String,
    pub turn: Color,
    pub legal_moves: Vec<String>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub game_over: bool,
    pub status: GameStatus,
    pub fullmove_number: u32,
    pub move_count: usize,
}

/// A game in progress: the current board plus the history behind it.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    san: Vec<String>,
    repetitions: RepetitionTable,
}

impl Game {
    pub fn new() -> Game {
        Game::from_board(new_game())
    }

    /// Starts a game from an arbitrary position.
    pub fn from_board(board: Board) -> Game {
        let mut repetitions = RepetitionTable::new();
        repetitions.record(&board);
        Game {
            board,
            moves: vec![],
            san: vec![],
            repetitions,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The moves played so far, in Standard Algebraic Notation.
    pub fn san_history(&self) -> &[String] {
        &self.san
    }

    pub fn repetitions(&self) -> &RepetitionTable {
        &self.repetitions
    }

    pub fn status(&self) -> GameStatus {
        status::status(&self.board, &self.repetitions)
    }

    /// Plays `mov`, returning the status of the resulting position. Fails
    /// without changing the game if the move is illegal or the game is over.
    pub fn play(&mut self, mov: Move) -> Result<GameStatus, ChessError> {
        if self.status().is_over() {
            return Err(ChessError::IllegalMove(mov));
        }

        let next = self.board.apply_move(mov)?;
        let san = notation::move_to_san(&self.board, mov)?;
        self.board = next;
        self.moves.push(mov);
        self.san.push(san);
        self.repetitions.record(&self.board);
        Ok(self.status())
    }

    /// Parses `text` as SAN or coordinate notation and plays it.
    pub fn play_text(&mut self, text: &str) -> Result<GameStatus, ChessError> {
        let mov = notation::parse_move(&self.board, text)?;
        self.play(mov)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let status = self.status();
        GameSnapshot {
            fen: self.board.as_fen(),
            turn: self.board.side_to_move(),
            legal_moves: self
                .board
                .legal_moves(self.board.side_to_move())
                .iter()
                .map(|m| m.as_uci())
                .collect(),
            is_check: self.board.is_check(self.board.side_to_move()),
            is_checkmate: status.winner().is_some(),
            is_stalemate: status == GameStatus::Stalemate,
            game_over: status.is_over(),
            status,
            fullmove_number: self.board.fullmove_number(),
            move_count: self.moves.len(),
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DrawRule;

    #[test]
    fn fresh_game_snapshot() {
        let game = Game::new();
        let snapshot = game.snapshot();
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            snapshot.fen
        );
        assert_eq!(Color::White, snapshot.turn);
        assert_eq!(20, snapshot.legal_moves.len());
        assert!(snapshot.legal_moves.contains(&"e2e4".to_owned()));
        assert!(!snapshot.game_over);
        assert_eq!(1, snapshot.fullmove_number);
        assert_eq!(0, snapshot.move_count);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        for text in &["f3", "e5", "g4"] {
            assert_eq!(GameStatus::InProgress, game.play_text(text).unwrap());
        }

        assert_eq!(
            GameStatus::Checkmate(Color::Black),
            game.play_text("Qh4").unwrap()
        );
        assert_eq!(vec!["f3", "e5", "g4", "Qh4#"], game.san_history());

        let snapshot = game.snapshot();
        assert!(snapshot.is_checkmate);
        assert!(snapshot.is_check);
        assert!(snapshot.legal_moves.is_empty());

        // nothing more can be played once the game is over.
        let before = game.board().clone();
        assert!(game.play_text("a3").is_err());
        assert_eq!(&before, game.board());
    }

    #[test]
    fn repetition_through_game() {
        let mut game = Game::new();
        let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];
        for text in shuffle.iter().chain(shuffle[..3].iter()) {
            assert!(!game.play_text(text).unwrap().is_over());
        }

        assert_eq!(
            GameStatus::DrawByRule(DrawRule::ThreefoldRepetition),
            game.play_text("Ng8").unwrap()
        );
    }

    #[test]
    fn illegal_move_leaves_game_untouched() {
        let mut game = Game::new();
        assert!(game.play_text("e5").is_err());
        assert_eq!(&new_game(), game.board());
        assert!(game.moves().is_empty());
    }

    #[test]
    fn free_functions() {
        let board = new_game();
        assert_eq!(20, legal_moves(&board, Color::White).len());
        assert_eq!(2, legal_moves_from(&board, Square::G1).len());
        let mov = parse_algebraic(&board, "e4").unwrap();
        assert_eq!("e4", move_to_algebraic(&board, mov).unwrap());
        let next = apply_move(&board, mov).unwrap();
        assert_eq!(next, from_fen(&to_fen(&next)).unwrap());
        assert_eq!(
            GameStatus::InProgress,
            status(&next, &RepetitionTable::new())
        );
        assert!(from_fen("not a fen").is_err());
        assert!(hint(&board).is_some());
    }
}
