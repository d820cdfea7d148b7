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

use clap::{App, Arg, ArgMatches, SubCommand};
use minerva::eval::StandardEvaluator;
use minerva::search::Minimax;
use minerva::{square_at, Move, Position, Square};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("search")
                .about("Search a position for the strongest move")
                .arg(
                    Arg::with_name("MOVES")
                        .help("Coordinate moves played from the standard start, e.g. \"e2e4 e7e5\"")
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search, in plies")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("workers")
                        .help("Number of parallel root search workers")
                        .value_name("WORKERS")
                        .short("-w")
                        .long("--workers")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of the side to move")
                .arg(
                    Arg::with_name("MOVES")
                        .help("Coordinate moves played from the standard start, e.g. \"e2e4 e7e5\"")
                        .index(1),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("search") {
        run_search(matches);
    }

    if let Some(matches) = matches.subcommand_matches("moves") {
        run_moves(matches);
    }

    eprintln!("{}", matches.usage());
    process::exit(1);
}

fn run_search(matches: &ArgMatches) -> ! {
    let position = replay(matches.value_of("MOVES"));
    let depth = if matches.is_present("depth") {
        value_t_or_exit!(matches, "depth", u32)
    } else {
        4
    };
    let workers = if matches.is_present("workers") {
        value_t_or_exit!(matches, "workers", usize)
    } else {
        4
    };

    println!("{}", position);
    let player = position.current_player();
    if player.is_in_checkmate() {
        println!("{} is checkmated", player.alliance());
        process::exit(0);
    }
    if player.is_in_stalemate() {
        println!("{} is stalemated", player.alliance());
        process::exit(0);
    }

    let searcher: Minimax<StandardEvaluator> = Minimax::new(depth, workers);
    let result = searcher.execute(&position);
    println!("best move: {}", result.best_move);
    println!("    score: {}", result.score);
    println!("    nodes: {}", result.nodes_searched);
    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let position = replay(matches.value_of("MOVES"));
    println!("{}", position);
    let player = position.current_player();
    if player.is_in_checkmate() {
        println!("{} is checkmated", player.alliance());
    } else if player.is_in_stalemate() {
        println!("{} is stalemated", player.alliance());
    }
    for mov in player.legal_moves() {
        println!("{}", mov);
    }
    process::exit(0);
}

fn replay(line: Option<&str>) -> Position {
    let mut position = Position::standard();
    for token in line.unwrap_or("").split_whitespace() {
        let (from, to) = match parse_coordinates(token) {
            Some(pair) => pair,
            None => {
                eprintln!("malformed move: {}", token);
                process::exit(1);
            }
        };
        let mov = match Move::resolve(&position, from, to) {
            Some(mov) => mov,
            None => {
                eprintln!("no legal move: {}", token);
                process::exit(1);
            }
        };
        let transition = position.make_move(&mov);
        if !transition.is_done() {
            eprintln!("illegal move: {}", token);
            process::exit(1);
        }
        position = transition.into_position();
    }
    position
}

fn parse_coordinates(token: &str) -> Option<(Square, Square)> {
    if token.len() != 4 {
        return None;
    }
    Some((square_at(token.get(..2)?)?, square_at(token.get(2..)?)?))
}
