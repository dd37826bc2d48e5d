// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use caissa::{Board, ChessError, Color, Move, PieceKind, Square};

fn play(uci: &[&str]) -> Board {
    let mut pos = Board::start_position();
    for text in uci {
        let mov = caissa::notation::parse_move(&pos, text).unwrap();
        pos = pos.apply_move(mov).unwrap();
    }

    pos
}

#[test]
fn scholars_mate_sequence_applies() {
    let pos = play(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
    assert_eq!(Color::Black, pos.side_to_move());
    assert_eq!(4, pos.fullmove_number());
    assert_eq!(0, pos.halfmove_clock());
    assert!(pos.is_check(Color::Black));
    assert!(pos.legal_moves(Color::Black).is_empty());
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let pos = play(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(Some(Square::D6), pos.en_passant_square());

    let ep = Move::en_passant(Square::E5, Square::D6);
    assert!(pos.legal_moves(Color::White).contains(&ep));

    let after = pos.apply_move(ep).unwrap();
    assert!(after.piece_at(Square::D5).is_none());
    assert!(after.piece_at(Square::E5).is_none());
    assert_eq!(Some(PieceKind::Pawn), after.piece_at(Square::D6).map(|p| p.kind));
    assert_eq!(None, after.en_passant_square());
}

#[test]
fn en_passant_expires_after_one_move() {
    let pos = play(&["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "a6a5"]);
    let ep = Move::en_passant(Square::E5, Square::D6);
    assert_eq!(Err(ChessError::IllegalMove(ep)), pos.apply_move(ep));
}

#[test]
fn reversible_moves_restore_placement() {
    let start = Board::start_position();
    let pos = play(&["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(start.as_fen().split(' ').next(), pos.as_fen().split(' ').next());
    assert_eq!(start.side_to_move(), pos.side_to_move());
    assert_eq!(4, pos.halfmove_clock());
    assert_ne!(start, pos);
}

#[test]
fn illegal_moves_leave_board_unchanged() {
    let pos = Board::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
    let before = pos.clone();

    // the rook on e2 gives check and covers the second rank.
    let into_check = Move::quiet(Square::E1, Square::F2);
    assert!(pos.apply_move(Move::quiet(Square::E1, Square::D2)).is_err());
    assert_eq!(Err(ChessError::IllegalMove(into_check)), pos.apply_move(into_check));

    // castling out of check is not allowed either.
    let castle = Move::kingside_castle(Square::E1, Square::G1);
    assert_eq!(Err(ChessError::IllegalMove(castle)), pos.apply_move(castle));
    assert_eq!(before, pos);
}

#[test]
fn castle_moves_rook_and_clears_rights() {
    let pos = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10").unwrap();
    let pos = pos
        .apply_move(Move::queenside_castle(Square::E8, Square::C8))
        .unwrap();

    assert_eq!(Some(PieceKind::Rook), pos.piece_at(Square::D8).map(|p| p.kind));
    assert_eq!(Some(PieceKind::King), pos.piece_at(Square::C8).map(|p| p.kind));
    assert!(!pos.can_castle_kingside(Color::Black));
    assert!(!pos.can_castle_queenside(Color::Black));
    assert!(pos.can_castle_kingside(Color::White));
    assert_eq!(4, pos.halfmove_clock());
    assert_eq!(11, pos.fullmove_number());
    assert_eq!("2kr3r/8/8/8/8/8/8/R3K2R w KQ - 4 11", pos.as_fen());
}

#[test]
fn black_promotion() {
    let pos = Board::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
    let mov = Move::promotion(Square::A2, Square::A1, PieceKind::Rook);
    let pos = pos.apply_move(mov).unwrap();
    let rook = pos.piece_at(Square::A1).unwrap();
    assert_eq!(PieceKind::Rook, rook.kind);
    assert_eq!(Color::Black, rook.color);
    assert!(pos.is_check(Color::White));
}

#[test]
fn missing_promotion_piece_is_ambiguous() {
    let pos = Board::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
    let mov = Move::quiet(Square::A2, Square::A1);
    assert_eq!(Err(ChessError::AmbiguousPromotion(mov)), pos.apply_move(mov));

    let queen = pos
        .find_move(Square::A2, Square::A1, Some(PieceKind::Queen))
        .unwrap();
    assert!(pos.apply_move(queen).is_ok());
}
