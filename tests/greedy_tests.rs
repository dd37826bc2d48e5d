// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use caissa::eval::{capture_gain, choose_greedy_move, material_score};
use caissa::{Board, Color, Game, Move, Square};

#[test]
fn takes_the_queen_over_the_pawn() {
    // the d2 rook can take a queen on d7 or a pawn on b2.
    let board = Board::from_fen("4k3/3q4/8/8/8/8/1p1R4/7K w - - 0 1").unwrap();
    let mov = choose_greedy_move(&board, Color::White).unwrap();
    assert_eq!(Move::quiet(Square::D2, Square::D7), mov);
    assert_eq!(9, capture_gain(&board, mov));
}

#[test]
fn ties_go_to_the_lowest_origin_square() {
    // both knights can take a pawn; b1 is scanned before g1.
    let board = Board::from_fen("4k3/8/8/8/8/p6p/8/1N2K1N1 w - - 0 1").unwrap();
    assert_eq!(
        Some(Move::quiet(Square::B1, Square::A3)),
        choose_greedy_move(&board, Color::White)
    );
}

#[test]
fn greedy_never_gives_up_material_it_could_win() {
    let board = Board::from_fen("r3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let mov = choose_greedy_move(&board, Color::White).unwrap();
    let next = board.apply_move(mov).unwrap();
    assert_eq!(5, material_score(&next, Color::White));
}

#[test]
fn self_play_is_reproducible() {
    let play = || {
        let mut game = Game::new();
        for _ in 0..40 {
            let board = game.board().clone();
            match choose_greedy_move(&board, board.side_to_move()) {
                Some(mov) => {
                    if game.play(mov).unwrap().is_over() {
                        break;
                    }
                }
                None => break,
            }
        }

        game.moves().to_vec()
    };

    let first = play();
    assert!(!first.is_empty());
    assert_eq!(first, play());
}
