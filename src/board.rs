// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::error::ChessError;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Square};
use crate::types::{FILES, RANKS, SQUARES};

pub const START_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A complete chess position: piece placement plus the side-effect state that
/// the rules depend on.
///
/// Boards are values. Nothing outside this crate can change a `Board` once it
/// exists; `apply_move` produces a new board and leaves the original as it was,
/// so speculative look-ahead can never corrupt the position it started from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castle_status: CastleStatus,
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

//
// Board state getters
//

impl Board {
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard initial position, White to move.
    pub fn start_position() -> Board {
        Board::from_fen(START_POSITION_FEN).expect("start position FEN must parse")
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// Iterates every occupied square with its piece, in a1..h8 scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        SQUARES
            .iter()
            .filter_map(move |&sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.occupied()
            .filter(|(_, piece)| piece.color == color)
            .map(|(sq, _)| sq)
            .collect()
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.occupied()
            .filter(|(_, piece)| *piece == Piece::new(kind, color))
            .map(|(sq, _)| sq)
            .collect()
    }

    pub fn occupancy(&self) -> Bitboard {
        self.occupied().map(|(sq, _)| sq).collect()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, piece)| *piece == Piece::new(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }
}

//
// Move application
//

impl Board {
    /// Plays `mov` and returns the resulting board.
    ///
    /// The move must be one of `legal_moves(side_to_move)`. A pawn move onto the
    /// last rank without a promotion piece fails with `AmbiguousPromotion`; any
    /// other move outside the legal set fails with `IllegalMove`. On failure no
    /// new board is produced and `self` is unchanged.
    pub fn apply_move(&self, mov: Move) -> Result<Board, ChessError> {
        let legal = self.legal_moves(self.side_to_move);
        if legal.contains(&mov) {
            let next = self.make_unchecked(mov);
            trace!("applied {}, position is now {}", mov, next.as_fen());
            return Ok(next);
        }

        let promotes_here = !mov.is_promotion()
            && legal.iter().any(|m| {
                m.is_promotion()
                    && m.source() == mov.source()
                    && m.destination() == mov.destination()
            });
        if promotes_here {
            debug!("rejecting {}: promotion piece not given", mov);
            return Err(ChessError::AmbiguousPromotion(mov));
        }

        debug!("rejecting {}: not legal in {}", mov, self.as_fen());
        Err(ChessError::IllegalMove(mov))
    }

    /// Looks up the legal move between two squares, for callers that only know
    /// where a piece was picked up and dropped. Castling is found by the king's
    /// two-square step and en passant by the capturing pawn's destination.
    pub fn find_move(
        &self,
        source: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        self.legal_moves_from(source).into_iter().find(|m| {
            m.destination() == destination && m.promotion_piece() == promotion
        })
    }

    /// Produces the board after `mov` without checking legality. The move must
    /// have been generated against this board.
    pub(crate) fn make_unchecked(&self, mov: Move) -> Board {
        let mut next = self.clone();
        let moving = self
            .piece_at(mov.source())
            .expect("invalid move: no piece at source square");
        let color = moving.color;

        // En-passant is the only capture whose victim is not on the destination square.
        let capture_square = if mov.is_en_passant() {
            Square::of(mov.source().rank(), mov.destination().file())
        } else {
            mov.destination()
        };
        let captured = next.squares[capture_square.as_index()].take();

        next.squares[mov.source().as_index()] = None;
        let placed = match mov.promotion_piece() {
            Some(kind) => Piece::new(kind, color),
            None => moving,
        };
        next.squares[mov.destination().as_index()] = Some(placed);

        if mov.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(color, mov.is_kingside_castle());
            let rook = next.squares[rook_from.as_index()].take();
            next.squares[rook_to.as_index()] = rook;
        }

        // Anything leaving or landing on a king or rook home square ends the
        // corresponding castling rights, which covers rooks captured at home.
        next.castle_status.remove(CastleStatus::revoked_by(mov.source()));
        next.castle_status.remove(CastleStatus::revoked_by(mov.destination()));

        next.en_passant_square = if mov.is_double_pawn_push() {
            mov.source().offset(0, color.forward())
        } else {
            None
        };

        if captured.is_some() || moving.kind == PieceKind::Pawn {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }

        if color == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        next.side_to_move = color.toggle();
        next
    }
}

//
// Board analysis (attacks, check detection, legal moves)
//

impl Board {
    /// Every square attacked by a piece of `by`. Pawns attack diagonally whether
    /// or not there is anything to capture; kings and sliders include the
    /// squares of the pieces that block them.
    pub fn attack_map(&self, by: Color) -> Bitboard {
        let occupancy = self.occupancy();
        let mut map = Bitboard::none();
        for (sq, piece) in self.occupied().filter(|(_, piece)| piece.color == by) {
            map |= attacks::attacks(piece.kind, piece.color, sq, occupancy);
        }

        map
    }

    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.attack_map(by).test(square)
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.king_square(color)
            .map_or(false, |king| self.is_square_attacked(king, color.toggle()))
    }

    /// All legal moves for `side`, scanning origin squares from a1 to h8.
    pub fn legal_moves(&self, side: Color) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().legal_moves(self, side, &mut moves);
        moves
    }

    /// Legal moves of the piece on `square`, empty if the square is empty.
    pub fn legal_moves_from(&self, square: Square) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().legal_moves_from(self, square, &mut moves);
        moves
    }

    /// Returns whether playing `mov` would capture something, en passant included.
    pub fn is_capture(&self, mov: Move) -> bool {
        mov.is_en_passant() || self.piece_at(mov.destination()).is_some()
    }

    /// The piece `mov` would remove from the board, if any.
    pub fn captured_piece(&self, mov: Move) -> Option<Piece> {
        if mov.is_en_passant() {
            self.piece_at(Square::of(mov.source().rank(), mov.destination().file()))
        } else {
            self.piece_at(mov.destination())
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::start_position()
    }
}

/// Home and destination squares of the rook that accompanies a castle.
pub(crate) fn castle_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    let rank = color.back_rank();
    if kingside {
        (Square::of(rank, File::H), Square::of(rank, File::F))
    } else {
        (Square::of(rank, File::A), Square::of(rank, File::D))
    }
}
