// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use minerva::search::best_move;
use minerva::{Alliance, Move, Piece, PieceKind, Position, PositionBuilder, Square};

fn play(position: &Position, from: Square, to: Square) -> Position {
    let mov = Move::resolve(position, from, to).expect("no such legal move");
    let transition = position.make_move(&mov);
    assert!(transition.is_done());
    transition.into_position()
}

#[test]
fn fools_mate() {
    let mut position = Position::standard();
    position = play(&position, Square::F2, Square::F3);
    position = play(&position, Square::E7, Square::E5);
    position = play(&position, Square::G2, Square::G4);

    // black to move has mate in one; a depth-4 search must find it
    let mov = best_move(&position, 4, 4);
    assert_eq!(Square::D8, mov.from());
    assert_eq!(Square::H4, mov.to());

    let mated = position.make_move(&mov).into_position();
    assert!(mated.current_player().is_in_checkmate());
}

#[test]
fn finds_a_back_rank_mate() {
    // white mates with Re1-e8; the black king is boxed in by its pawns
    let mut builder = PositionBuilder::new();
    builder
        .set_piece(Piece::new(PieceKind::King, Alliance::White, Square::A1))
        .set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::E1).having_moved())
        .set_piece(Piece::new(PieceKind::King, Alliance::Black, Square::H8))
        .set_piece(Piece::new(PieceKind::Pawn, Alliance::Black, Square::G7))
        .set_piece(Piece::new(PieceKind::Pawn, Alliance::Black, Square::H7))
        .set_move_maker(Alliance::White);
    let position = builder.build();

    let mov = best_move(&position, 2, 2);
    assert_eq!(Square::E1, mov.from());
    assert_eq!(Square::E8, mov.to());
    assert!(position
        .make_move(&mov)
        .into_position()
        .current_player()
        .is_in_checkmate());
}

#[test]
fn prefers_winning_the_hanging_queen() {
    // the black queen on d5 is undefended and attacked by the c4 pawn
    let mut builder = PositionBuilder::new();
    builder
        .set_piece(Piece::new(PieceKind::King, Alliance::White, Square::E1))
        .set_piece(Piece::new(PieceKind::Pawn, Alliance::White, Square::C4).having_moved())
        .set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::A1))
        .set_piece(Piece::new(PieceKind::Queen, Alliance::Black, Square::D5).having_moved())
        .set_piece(Piece::new(PieceKind::King, Alliance::Black, Square::E8))
        .set_piece(Piece::new(PieceKind::Rook, Alliance::Black, Square::H8))
        .set_move_maker(Alliance::White);
    let position = builder.build();

    let mov = best_move(&position, 2, 1);
    assert_eq!(Square::C4, mov.from());
    assert_eq!(Square::D5, mov.to());
    assert!(mov.is_capture());
}
