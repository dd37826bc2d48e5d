// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading and writing moves as text.
//!
//! `move_to_san` renders Standard Algebraic Notation with the minimal
//! disambiguation and a check or mate suffix. `parse_move` accepts both SAN
//! and the coordinate notation used by UCI, and resolves either against the
//! legal moves of a board.
use pest::iterators::Pair;
use pest::Parser;

use crate::board::Board;
use crate::error::{ChessError, NotationError};
use crate::moves::Move;
use crate::types::{PieceKind, Square};

#[derive(Parser)]
#[grammar = "notation.pest"]
struct NotationParser;

/// Renders `mov` in Standard Algebraic Notation. The move must be legal on `board`.
pub fn move_to_san(board: &Board, mov: Move) -> Result<String, ChessError> {
    let legal = board.legal_moves(board.side_to_move());
    if !legal.contains(&mov) {
        return Err(ChessError::IllegalMove(mov));
    }

    let mut san = String::new();
    if mov.is_kingside_castle() {
        san.push_str("O-O");
    } else if mov.is_queenside_castle() {
        san.push_str("O-O-O");
    } else {
        let kind = board
            .piece_at(mov.source())
            .map(|p| p.kind)
            .ok_or(ChessError::IllegalMove(mov))?;
        let capture = board.is_capture(mov);
        if kind == PieceKind::Pawn {
            if capture {
                san.push_str(&mov.source().file().to_string());
                san.push('x');
            }

            san.push_str(&mov.destination().to_string());
            if let Some(promoted) = mov.promotion_piece() {
                san.push('=');
                san.push(promoted.as_char().to_ascii_uppercase());
            }
        } else {
            san.push(kind.as_char().to_ascii_uppercase());
            let rivals: Vec<Square> = legal
                .iter()
                .filter(|m| {
                    m.destination() == mov.destination()
                        && m.source() != mov.source()
                        && board.piece_at(m.source()).map(|p| p.kind) == Some(kind)
                })
                .map(|m| m.source())
                .collect();

            if !rivals.is_empty() {
                let source = mov.source();
                if rivals.iter().all(|sq| sq.file() != source.file()) {
                    san.push_str(&source.file().to_string());
                } else if rivals.iter().all(|sq| sq.rank() != source.rank()) {
                    san.push_str(&source.rank().to_string());
                } else {
                    san.push_str(&source.to_string());
                }
            }

            if capture {
                san.push('x');
            }

            san.push_str(&mov.destination().to_string());
        }
    }

    let next = board.make_unchecked(mov);
    let defender = next.side_to_move();
    if next.is_check(defender) {
        if next.legal_moves(defender).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }

    Ok(san)
}

/// What the text says about the move, before it is matched against the board.
#[derive(Debug, Default)]
struct MoveText {
    castle: Option<bool>,
    piece: Option<PieceKind>,
    from_square: Option<Square>,
    from_file: Option<char>,
    from_rank: Option<char>,
    destination: Option<Square>,
    promotion: Option<PieceKind>,
    coordinate: bool,
}

impl MoveText {
    fn read(&mut self, pair: Pair<Rule>) {
        match pair.as_rule() {
            Rule::kingside_castle => self.castle = Some(true),
            Rule::queenside_castle => self.castle = Some(false),
            Rule::coordinate_move => {
                self.coordinate = true;
                self.read_all(pair);
            }
            Rule::piece => self.piece = pair.as_str().chars().next().and_then(PieceKind::from_char),
            Rule::from_square => self.from_square = Square::from_algebraic(pair.as_str()),
            Rule::from_file => self.from_file = pair.as_str().chars().next(),
            Rule::from_rank => self.from_rank = pair.as_str().chars().next(),
            Rule::square => self.destination = Square::from_algebraic(pair.as_str()),
            Rule::promotion_piece => {
                self.promotion = pair.as_str().chars().next().and_then(PieceKind::from_char)
            }
            Rule::castle | Rule::san_move | Rule::piece_move | Rule::pawn_move | Rule::promotion => {
                self.read_all(pair)
            }
            _ => {}
        }
    }

    fn read_all(&mut self, pair: Pair<Rule>) {
        for inner in pair.into_inner() {
            self.read(inner);
        }
    }

    fn matches(&self, board: &Board, mov: Move) -> bool {
        if let Some(kingside) = self.castle {
            return mov.is_castle() && mov.is_kingside_castle() == kingside;
        }

        if Some(mov.destination()) != self.destination {
            return false;
        }

        if let Some(source) = self.from_square {
            if mov.source() != source {
                return false;
            }
        }

        let source_label = mov.source().to_string();
        if let Some(file) = self.from_file {
            if !source_label.starts_with(file) {
                return false;
            }
        }

        if let Some(rank) = self.from_rank {
            if !source_label.ends_with(rank) {
                return false;
            }
        }

        if self.coordinate {
            return true;
        }

        let kind = board.piece_at(mov.source()).map(|p| p.kind);
        match self.piece {
            Some(piece) => kind == Some(piece) && !mov.is_castle(),
            // a pawn move without a source file is a push along its own file.
            None => {
                kind == Some(PieceKind::Pawn)
                    && (self.from_file.is_some() || mov.source().file() == mov.destination().file())
            }
        }
    }
}

/// Parses `text` as SAN or coordinate notation and returns the matching legal
/// move on `board`.
///
/// Check and annotation suffixes are accepted but not verified. A pawn move
/// to the last rank written without a promotion piece yields a move without
/// one, which `Board::apply_move` rejects as an ambiguous promotion.
pub fn parse_move(board: &Board, text: &str) -> Result<Move, ChessError> {
    let trimmed = text.trim();
    let mut pairs = NotationParser::parse(Rule::move_text, trimmed).map_err(|e| {
        debug!("failed to parse move {:?}: {}", trimmed, e);
        NotationError::Syntax(trimmed.to_owned())
    })?;

    let mut parsed = MoveText::default();
    if let Some(move_text) = pairs.next() {
        parsed.read_all(move_text);
    }

    let legal = board.legal_moves(board.side_to_move());
    let candidates: Vec<Move> = legal
        .iter()
        .cloned()
        .filter(|&mov| parsed.matches(board, mov))
        .collect();

    let exact: Vec<Move> = candidates
        .iter()
        .cloned()
        .filter(|mov| parsed.castle.is_some() || mov.promotion_piece() == parsed.promotion)
        .collect();

    match exact.as_slice() {
        [mov] => Ok(*mov),
        [] => match candidates.first() {
            // every candidate promotes, but the text named no piece.
            Some(mov) if parsed.promotion.is_none() && mov.is_promotion() => {
                if candidates.iter().all(|m| m.source() == mov.source()) {
                    Ok(Move::quiet(mov.source(), mov.destination()))
                } else {
                    Err(NotationError::Ambiguous(trimmed.to_owned()).into())
                }
            }
            _ => Err(NotationError::NoSuchMove(trimmed.to_owned()).into()),
        },
        _ => Err(NotationError::Ambiguous(trimmed.to_owned()).into()),
    }
}
