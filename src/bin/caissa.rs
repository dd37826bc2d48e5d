// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::process;
use std::time::Instant;

use caissa::eval;
use caissa::notation;
use caissa::{divide, perft, Analysis, Board, ChessError, Color, Game, RepetitionTable};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn fen_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position, or \"startpos\"")
        .required(required)
        .index(1)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg(true))
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("d")
                        .long("depth")
                        .default_value("4")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print node counts below each root move")
                        .long("divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of a position")
                .arg(fen_arg(true))
                .arg(
                    Arg::with_name("json")
                        .help("Print a JSON snapshot of the position instead")
                        .long("json"),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Report whether the game is over")
                .arg(fen_arg(true)),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Material, structure and suggestions for a position, as JSON")
                .arg(fen_arg(true)),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game against itself, always taking the biggest capture")
                .arg(fen_arg(false))
                .arg(
                    Arg::with_name("max-plies")
                        .help("Stop after this many half-moves")
                        .value_name("PLIES")
                        .short("n")
                        .long("max-plies")
                        .default_value("200")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("status", Some(matches)) => run_status(matches),
        ("analyze", Some(matches)) => run_analyze(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => unreachable!(),
    }
}

fn load_board(matches: &ArgMatches) -> Board {
    match matches.value_of("FEN") {
        None | Some("startpos") => Board::start_position(),
        Some(fen) => match Board::from_fen(fen) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("invalid fen: {}", e);
                process::exit(1);
            }
        },
    }
}

fn run_perft(matches: &ArgMatches) {
    let board = load_board(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);

    println!("fen:   {}", board.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    if matches.is_present("divide") {
        let mut total = 0;
        for (mov, nodes) in divide(&board, depth) {
            println!("{}: {}", mov, nodes);
            total += nodes;
        }

        println!();
        println!("total: {}", total);
        return;
    }

    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&board, i);
        println!(
            "perft({}) = {} ({} ms)",
            i,
            results,
            start.elapsed().as_millis()
        );
    }
}

fn run_moves(matches: &ArgMatches) {
    let board = load_board(matches);
    if matches.is_present("json") {
        let snapshot = Game::from_board(board).snapshot();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize snapshot: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    for mov in board.legal_moves(board.side_to_move()) {
        match notation::move_to_san(&board, mov) {
            Ok(san) => println!("{:<6} {}", mov, san),
            Err(e) => println!("{:<6} ({})", mov, e),
        }
    }
}

fn run_status(matches: &ArgMatches) {
    let board = load_board(matches);
    println!("{}", caissa::status(&board, &RepetitionTable::new()));
}

fn run_analyze(matches: &ArgMatches) {
    let board = load_board(matches);
    let report = Analysis::new(&board).report();
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("failed to serialize analysis: {}", e);
            process::exit(1);
        }
    }

    for suggestion in &report.suggestions {
        eprintln!("{}", suggestion);
    }
}

fn run_play(matches: &ArgMatches) {
    let start = load_board(matches);
    let mut game = Game::from_board(start.clone());
    let max_plies = value_t_or_exit!(matches, "max-plies", u32);
    if let Err(e) = self_play(&mut game, max_plies) {
        eprintln!("engine produced a bad move: {}", e);
        process::exit(1);
    }

    println!("{}", movetext(&start, game.san_history()));
    println!();
    println!("{}", game.board());
    println!("{}", game.board().as_fen());
    println!("{}", game.status());
}

/// Plays greedy moves for both sides until the game ends or `max_plies`
/// half-moves have been played. A game that is already over is left alone.
fn self_play(game: &mut Game, max_plies: u32) -> Result<(), ChessError> {
    for _ in 0..max_plies {
        if game.status().is_over() {
            break;
        }

        let board = game.board().clone();
        match eval::choose_greedy_move(&board, board.side_to_move()) {
            Some(mov) => game.play(mov)?,
            None => break,
        };
    }

    Ok(())
}

/// Numbers `san` as a game continuing from `start`, e.g. `12... Nf6 13. Bg5`.
fn movetext(start: &Board, san: &[String]) -> String {
    let mut number = start.fullmove_number();
    let mut side = start.side_to_move();
    let mut text = String::new();
    for (i, mov) in san.iter().enumerate() {
        match side {
            Color::White => {
                text.push_str(&format!("{}{}. ", if i == 0 { "" } else { " " }, number));
            }
            Color::Black => {
                if i == 0 {
                    text.push_str(&format!("{}... ", number));
                } else {
                    text.push(' ');
                }

                number = number.saturating_add(1);
            }
        }

        text.push_str(mov);
        side = side.toggle();
    }

    text
}
