// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::board::{castle_rook_squares, Board};
use crate::moves::Move;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{PROMOTION_KINDS, SQUARES};

/// Moves for a whole side. FEN input can describe positions that no game
/// reaches, so the number of moves for a side has no useful upper bound.
pub type MoveVec = Vec<Move>;

/// Moves of a single piece. A queen in the centre of an empty board has 27;
/// a pawn capturing and pushing into promotion has 12.
type PieceMoves = ArrayVec<[Move; 32]>;

/// Generates moves one origin square at a time, in a1..h8 scan order.
///
/// Pseudo-legal moves obey the movement rules of each piece but may leave the
/// mover's own king attacked; legal moves are the pseudo-legal moves that do
/// not. No generated move ever captures a king.
#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Pseudo-legal moves for the piece on `square`, for whichever side owns it.
    pub fn pseudo_legal_moves_from(&self, board: &Board, square: Square, moves: &mut MoveVec) {
        let mut candidates = PieceMoves::new();
        self.piece_moves(board, square, &mut candidates);
        moves.extend(candidates);
    }

    /// Every pseudo-legal move for `side`.
    pub fn pseudo_legal_moves(&self, board: &Board, side: Color, moves: &mut MoveVec) {
        for &square in SQUARES.iter() {
            if board.piece_at(square).map(|p| p.color) == Some(side) {
                self.pseudo_legal_moves_from(board, square, moves);
            }
        }
    }

    /// Legal moves for the piece on `square`.
    pub fn legal_moves_from(&self, board: &Board, square: Square, moves: &mut MoveVec) {
        let color = match board.piece_at(square) {
            Some(piece) => piece.color,
            None => return,
        };

        let mut candidates = PieceMoves::new();
        self.piece_moves(board, square, &mut candidates);
        moves.extend(
            candidates
                .into_iter()
                .filter(|&mov| self.leaves_king_safe(board, mov, color)),
        );
    }

    /// Every legal move for `side`.
    pub fn legal_moves(&self, board: &Board, side: Color, moves: &mut MoveVec) {
        for &square in SQUARES.iter() {
            if board.piece_at(square).map(|p| p.color) == Some(side) {
                self.legal_moves_from(board, square, moves);
            }
        }
    }

    fn piece_moves(&self, board: &Board, square: Square, moves: &mut PieceMoves) {
        let piece = match board.piece_at(square) {
            Some(piece) => piece,
            None => return,
        };

        let own = board.pieces(piece.color);
        let enemy = board.pieces(piece.color.toggle());
        let enemy_king = board.pieces_of_kind(piece.color.toggle(), PieceKind::King);
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(board, square, piece.color, moves),
            kind => {
                let occupancy = own | enemy;
                for target in attacks::attacks(kind, piece.color, square, occupancy) {
                    if own.test(target) || enemy_king.test(target) {
                        continue;
                    }

                    moves.push(Move::quiet(square, target));
                }

                if kind == PieceKind::King {
                    self.castle_moves(board, square, piece.color, moves);
                }
            }
        }
    }

    fn leaves_king_safe(&self, board: &Board, mov: Move, color: Color) -> bool {
        let next = board.make_unchecked(mov);
        match next.king_square(color) {
            Some(king) => !next.is_square_attacked(king, color.toggle()),
            None => true,
        }
    }

    fn pawn_moves(&self, board: &Board, square: Square, color: Color, moves: &mut PieceMoves) {
        let enemy = board.pieces(color.toggle());
        let enemy_king = board.pieces_of_kind(color.toggle(), PieceKind::King);
        let occupancy = board.occupancy();
        let starting_rank = match color {
            Color::White => Rank::Two,
            Color::Black => Rank::Seven,
        };

        // non-capturing moves
        if let Some(target) = square.offset(0, color.forward()) {
            if !occupancy.test(target) {
                push_pawn_move(square, target, color, moves);

                // double-pawn pushes, for pawns still on their starting square
                if square.rank() == starting_rank {
                    if let Some(two) = target.offset(0, color.forward()) {
                        if !occupancy.test(two) {
                            moves.push(Move::double_pawn_push(square, two));
                        }
                    }
                }
            }
        }

        for target in attacks::pawn_attacks(square, color) {
            if enemy.test(target) && !enemy_king.test(target) {
                push_pawn_move(square, target, color, moves);
            } else if self.is_en_passant_target(board, square, target, color) {
                moves.push(Move::en_passant(square, target));
            }
        }
    }

    /// En passant is only available to the side to move, onto the empty
    /// square directly behind an enemy pawn that stands beside this one.
    fn is_en_passant_target(&self, board: &Board, square: Square, target: Square, color: Color) -> bool {
        if board.side_to_move() != color || board.en_passant_square() != Some(target) {
            return false;
        }

        let victim = Square::of(square.rank(), target.file());
        board.piece_at(victim) == Some(Piece::new(PieceKind::Pawn, color.toggle()))
            && board.piece_at(target).is_none()
    }

    fn castle_moves(&self, board: &Board, king: Square, color: Color, moves: &mut PieceMoves) {
        let home = Square::of(color.back_rank(), File::E);
        if king != home {
            return;
        }

        let kingside = board.can_castle_kingside(color);
        let queenside = board.can_castle_queenside(color);
        if !kingside && !queenside {
            return;
        }

        let attacked = board.attack_map(color.toggle());
        if attacked.test(king) {
            // can't castle out of check
            return;
        }

        let occupancy = board.occupancy();
        let rook = Some(Piece::new(PieceKind::Rook, color));
        let rank = color.back_rank();
        let clear = |files: &[File]| files.iter().all(|&f| !occupancy.test(Square::of(rank, f)));
        let safe = |files: &[File]| files.iter().all(|&f| !attacked.test(Square::of(rank, f)));

        let (kingside_rook, _) = castle_rook_squares(color, true);
        if kingside
            && board.piece_at(kingside_rook) == rook
            && clear(&[File::F, File::G])
            && safe(&[File::F, File::G])
        {
            moves.push(Move::kingside_castle(king, Square::of(rank, File::G)));
        }

        // b1/b8 must be empty but may be attacked; the king never crosses it.
        let (queenside_rook, _) = castle_rook_squares(color, false);
        if queenside
            && board.piece_at(queenside_rook) == rook
            && clear(&[File::B, File::C, File::D])
            && safe(&[File::C, File::D])
        {
            moves.push(Move::queenside_castle(king, Square::of(rank, File::C)));
        }
    }
}

fn push_pawn_move(source: Square, target: Square, color: Color, moves: &mut PieceMoves) {
    if target.rank() == color.toggle().back_rank() {
        for &kind in PROMOTION_KINDS.iter() {
            moves.push(Move::promotion(source, target, kind));
        }
    } else {
        moves.push(Move::quiet(source, target));
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveGenerator, MoveVec};
    use crate::board::Board;
    use crate::moves::Move;
    use crate::types::{Color, PieceKind, Square};

    fn pseudo_legal(fen: &str) -> MoveVec {
        let pos = Board::from_fen(fen).unwrap();
        let mut moves = MoveVec::new();
        MoveGenerator::new().pseudo_legal_moves(&pos, pos.side_to_move(), &mut moves);
        moves
    }

    fn legal(fen: &str) -> MoveVec {
        let pos = Board::from_fen(fen).unwrap();
        pos.legal_moves(pos.side_to_move())
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let moves = legal("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(20, moves.len());
        // scan order puts the b1 knight first.
        assert_eq!(Move::quiet(Square::B1, Square::A3), moves[0]);
    }

    #[test]
    fn pawn_pushes() {
        let moves = pseudo_legal("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert!(moves.contains(&Move::quiet(Square::E2, Square::E3)));
        assert!(moves.contains(&Move::double_pawn_push(Square::E2, Square::E4)));
    }

    #[test]
    fn blocked_pawn_has_no_push() {
        let moves = pseudo_legal("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|m| m.source() == Square::E2));
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let moves = pseudo_legal("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        assert!(moves.contains(&Move::quiet(Square::E2, Square::E3)));
        assert!(!moves.contains(&Move::double_pawn_push(Square::E2, Square::E4)));
    }

    #[test]
    fn promotions_in_order() {
        let moves = pseudo_legal("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let promos: Vec<_> = moves
            .iter()
            .filter(|m| m.source() == Square::B7)
            .map(|m| m.promotion_piece())
            .collect();
        assert_eq!(
            vec![
                Some(PieceKind::Queen),
                Some(PieceKind::Rook),
                Some(PieceKind::Bishop),
                Some(PieceKind::Knight)
            ],
            promos
        );
    }

    #[test]
    fn en_passant_generated() {
        let moves = pseudo_legal("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(moves.contains(&Move::en_passant(Square::E5, Square::D6)));
    }

    #[test]
    fn en_passant_only_for_side_to_move() {
        let pos = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let black = pos.legal_moves(Color::Black);
        assert!(!black.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn kings_are_never_captured() {
        // Black is to move but White's queen attacks the black king: it would
        // be a king capture if White were to move, so it is not generated.
        let pos = Board::from_fen("4k3/8/8/8/8/8/4Q3/4K3 b - - 0 1").unwrap();
        let white = pos.legal_moves(Color::White);
        assert!(!white.iter().any(|m| m.destination() == Square::E8));
    }

    #[test]
    fn castling_both_sides() {
        let moves = legal("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&Move::kingside_castle(Square::E1, Square::G1)));
        assert!(moves.contains(&Move::queenside_castle(Square::E1, Square::C1)));
    }

    #[test]
    fn no_castling_through_attack() {
        // the rook on f8 covers f1.
        let moves = legal("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.contains(&Move::kingside_castle(Square::E1, Square::G1)));
        assert!(moves.contains(&Move::queenside_castle(Square::E1, Square::C1)));
    }

    #[test]
    fn queenside_castling_ignores_attacks_on_b_file() {
        let moves = legal("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.contains(&Move::queenside_castle(Square::E1, Square::C1)));
    }

    #[test]
    fn no_castling_out_of_check() {
        let moves = legal("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn no_castling_through_pieces() {
        let moves = legal("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn crowded_position_keeps_every_move() {
        // more queens than any game can produce, and more moves than 256.
        let pos =
            Board::from_fen("knQQQQQQ/ppQ4Q/QQ5Q/Q6Q/Q6Q/Q6Q/Q6Q/QQQQQQQK w - - 0 1").unwrap();
        let moves = pos.legal_moves(Color::White);
        assert_eq!(263, moves.len());
        assert!(moves.contains(&Move::quiet(Square::G8, Square::G7)));

        let mut pseudo = MoveVec::new();
        MoveGenerator::new().pseudo_legal_moves(&pos, Color::White, &mut pseudo);
        assert!(pseudo.len() >= moves.len());
    }

    #[test]
    fn legal_moves_escape_check() {
        // back-rank mate: every flight square is covered or blocked.
        let pos = Board::from_fen("4k3/8/8/8/8/8/5PPP/r5K1 w - - 0 1").unwrap();
        let moves = pos.legal_moves(Color::White);
        assert!(moves.is_empty());
        assert!(pos.is_check(Color::White));
    }
}
