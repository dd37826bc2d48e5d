// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Forsyth-Edwards Notation, the textual interchange format for a `Board`.
use std::convert::TryFrom;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::board::{castle_rook_squares, Board};
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{COLORS, FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected input after the fullmove number")]
    TrailingInput,
    #[error("empty-square counts must be between 1 and 8")]
    InvalidDigit,
    #[error("rank does not sum to eight files")]
    FileDoesNotSumToEight,
    #[error("unknown piece {0:?}")]
    UnknownPiece(char),
    #[error("side to move must be 'w' or 'b'")]
    InvalidSideToMove,
    #[error("invalid castling field")]
    InvalidCastle,
    #[error("invalid en-passant square")]
    InvalidEnPassant,
    #[error("halfmove clock is missing")]
    EmptyHalfmove,
    #[error("invalid halfmove clock")]
    InvalidHalfmove,
    #[error("fullmove number is missing")]
    EmptyFullmove,
    #[error("invalid fullmove number")]
    InvalidFullmove,
    #[error("{0:?} has no king")]
    MissingKing(Color),
    #[error("{0:?} has more than one king")]
    TooManyKings(Color),
    #[error("pawn on the back rank at {0}")]
    PawnOnBackRank(Square),
    #[error("the side not to move is in check")]
    OpponentInCheck,
}

type Stream<'a> = Peekable<Chars<'a>>;

fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
    match iter.next() {
        Some(c) if c == expected => Ok(()),
        Some(c) => Err(FenParseError::UnexpectedChar(c)),
        None => Err(FenParseError::UnexpectedEnd),
    }
}

fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
    iter.peek().copied().ok_or(FenParseError::UnexpectedEnd)
}

fn eat_placement(iter: &mut Stream, board: &mut Board) -> Result<(), FenParseError> {
    for &rank in RANKS.iter().rev() {
        let mut file = File::A as usize;
        while file < 8 {
            let c = peek(iter)?;
            // digits 1 through 8 indicate empty squares.
            if let Some(value) = c.to_digit(10) {
                if value < 1 || value > 8 {
                    return Err(FenParseError::InvalidDigit);
                }

                file += value as usize;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                iter.next();
                continue;
            }

            if c == '/' || c == ' ' {
                return Err(FenParseError::FileDoesNotSumToEight);
            }

            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            let square = Square::of(rank, File::from_index(file));
            board.squares[square.as_index()] = Some(piece);
            iter.next();
            file += 1;
        }

        if rank != Rank::One {
            match iter.next() {
                Some('/') => {}
                Some(c) if c.is_digit(10) || Piece::try_from(c).is_ok() => {
                    return Err(FenParseError::FileDoesNotSumToEight)
                }
                Some(c) => return Err(FenParseError::UnexpectedChar(c)),
                None => return Err(FenParseError::UnexpectedEnd),
            }
        }
    }

    Ok(())
}

fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
    let side = match peek(iter)? {
        'w' => Color::White,
        'b' => Color::Black,
        _ => return Err(FenParseError::InvalidSideToMove),
    };

    iter.next();
    Ok(side)
}

fn eat_castle_status(iter: &mut Stream) -> Result<CastleStatus, FenParseError> {
    if peek(iter)? == '-' {
        iter.next();
        return Ok(CastleStatus::NONE);
    }

    let mut status = CastleStatus::NONE;
    for _ in 0..4 {
        match iter.peek() {
            Some('K') => status |= CastleStatus::WHITE_KINGSIDE,
            Some('k') => status |= CastleStatus::BLACK_KINGSIDE,
            Some('Q') => status |= CastleStatus::WHITE_QUEENSIDE,
            Some('q') => status |= CastleStatus::BLACK_QUEENSIDE,
            Some(' ') | None => break,
            Some(_) => return Err(FenParseError::InvalidCastle),
        }

        iter.next();
    }

    if status.is_empty() {
        return Err(FenParseError::InvalidCastle);
    }

    Ok(status)
}

fn eat_en_passant(iter: &mut Stream) -> Result<Option<Square>, FenParseError> {
    let c = peek(iter)?;
    if c == '-' {
        iter.next();
        return Ok(None);
    }

    let file = File::try_from(c).map_err(|_| FenParseError::InvalidEnPassant)?;
    iter.next();
    let rank = Rank::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidEnPassant)?;
    iter.next();
    Ok(Some(Square::of(rank, file)))
}

fn eat_number(
    iter: &mut Stream,
    empty: FenParseError,
    invalid: FenParseError,
) -> Result<u32, FenParseError> {
    let mut buf = String::new();
    while let Some(&c) = iter.peek() {
        if !c.is_digit(10) {
            break;
        }

        buf.push(c);
        iter.next();
    }

    if buf.is_empty() {
        return Err(empty);
    }

    buf.parse::<u32>().map_err(|_| invalid)
}

impl Board {
    /// Constructs a board from its FEN representation.
    ///
    /// Besides the syntax of the six fields, the position itself is checked:
    /// each side has exactly one king, no pawn stands on the first or eighth
    /// rank, an en-passant square sits directly behind a pawn that could just
    /// have pushed two squares, and the side that just moved is not in check.
    /// Castling rights whose king or rook has left its home square are dropped.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Board, FenParseError> {
        let mut board = Board::empty();
        let iter = &mut fen.as_ref().chars().peekable();

        eat_placement(iter, &mut board)?;
        eat(iter, ' ')?;
        board.side_to_move = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        board.castle_status = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        board.en_passant_square = eat_en_passant(iter)?;
        eat(iter, ' ')?;
        board.halfmove_clock = eat_number(
            iter,
            FenParseError::EmptyHalfmove,
            FenParseError::InvalidHalfmove,
        )?;
        eat(iter, ' ')?;
        board.fullmove_number = eat_number(
            iter,
            FenParseError::EmptyFullmove,
            FenParseError::InvalidFullmove,
        )?;

        if iter.any(|c| !c.is_whitespace()) {
            return Err(FenParseError::TrailingInput);
        }

        board.validate()?;
        board.castle_status = board.consistent_castle_status();
        Ok(board)
    }

    fn validate(&self) -> Result<(), FenParseError> {
        for &color in &COLORS {
            let kings = self.pieces_of_kind(color, PieceKind::King).count();
            if kings == 0 {
                return Err(FenParseError::MissingKing(color));
            }

            if kings > 1 {
                return Err(FenParseError::TooManyKings(color));
            }
        }

        for &rank in &[Rank::One, Rank::Eight] {
            for &file in &FILES {
                let square = Square::of(rank, file);
                if let Some(Piece {
                    kind: PieceKind::Pawn,
                    ..
                }) = self.piece_at(square)
                {
                    return Err(FenParseError::PawnOnBackRank(square));
                }
            }
        }

        if let Some(ep) = self.en_passant_square {
            // The pawn that just moved is the side-not-to-move's, one rank past ep.
            let mover = self.side_to_move.toggle();
            let expected_rank = match mover {
                Color::White => Rank::Three,
                Color::Black => Rank::Six,
            };
            let pushed = ep.offset(0, mover.forward());
            let origin = ep.offset(0, -mover.forward());
            let pawn_there = pushed.and_then(|sq| self.piece_at(sq))
                == Some(Piece::new(PieceKind::Pawn, mover));
            let path_clear = self.piece_at(ep).is_none()
                && origin.map_or(false, |sq| self.piece_at(sq).is_none());
            if ep.rank() != expected_rank || !pawn_there || !path_clear {
                return Err(FenParseError::InvalidEnPassant);
            }
        }

        if self.is_check(self.side_to_move.toggle()) {
            return Err(FenParseError::OpponentInCheck);
        }

        Ok(())
    }

    fn consistent_castle_status(&self) -> CastleStatus {
        let mut status = self.castle_status;
        for &color in &COLORS {
            let king_home = Square::of(color.back_rank(), File::E);
            if self.piece_at(king_home) != Some(Piece::new(PieceKind::King, color)) {
                status.remove(CastleStatus::for_color(color));
                continue;
            }

            let rook = Some(Piece::new(PieceKind::Rook, color));
            let (kingside_rook, _) = castle_rook_squares(color, true);
            if self.piece_at(kingside_rook) != rook {
                status.remove(CastleStatus::kingside(color));
            }

            let (queenside_rook, _) = castle_rook_squares(color, false);
            if self.piece_at(queenside_rook) != rook {
                status.remove(CastleStatus::queenside(color));
            }
        }

        status
    }

    /// Renders this board as a FEN string. `Board::from_fen(b.as_fen())`
    /// always reproduces `b`.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            buf.push_str(&empty_squares.to_string());
                        }
                        buf.push_str(&piece.to_string());
                        empty_squares = 0;
                    }
                    None => empty_squares += 1,
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&self.side_to_move.to_string());
        buf.push(' ');
        if self.castle_status.is_empty() {
            buf.push('-');
        } else {
            for &(flag, c) in &[
                (CastleStatus::WHITE_KINGSIDE, 'K'),
                (CastleStatus::WHITE_QUEENSIDE, 'Q'),
                (CastleStatus::BLACK_KINGSIDE, 'k'),
                (CastleStatus::BLACK_QUEENSIDE, 'q'),
            ] {
                if self.castle_status.contains(flag) {
                    buf.push(c);
                }
            }
        }

        buf.push(' ');
        match self.en_passant_square {
            Some(sq) => buf.push_str(&sq.to_string()),
            None => buf.push('-'),
        }

        buf.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        buf
    }
}
