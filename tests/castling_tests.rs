// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use minerva::{Alliance, Move, Piece, PieceKind, Position, PositionBuilder, Square};

// white king and both rooks at home and unmoved, black king tucked away
fn castle_ready() -> PositionBuilder {
    let mut builder = PositionBuilder::new();
    builder
        .set_piece(Piece::new(PieceKind::King, Alliance::White, Square::E1))
        .set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::A1))
        .set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::H1))
        .set_piece(Piece::new(PieceKind::King, Alliance::Black, Square::H8))
        .set_move_maker(Alliance::White);
    builder
}

fn castle_to(position: &Position, to: Square) -> Option<Move> {
    position
        .current_player()
        .legal_moves()
        .iter()
        .find(|mov| mov.is_castle() && mov.to() == to)
        .cloned()
}

#[test]
fn both_castles_legal_with_clear_unattacked_path() {
    let position = castle_ready().build();
    assert!(castle_to(&position, Square::G1).is_some());
    assert!(castle_to(&position, Square::C1).is_some());
}

#[test]
fn kingside_castle_moves_king_and_rook() {
    let position = castle_ready().build();
    let castle = castle_to(&position, Square::G1).unwrap();
    let transition = position.make_move(&castle);
    assert!(transition.is_done());
    let successor = transition.position();

    let king = successor.piece_at(Square::G1).unwrap();
    assert_eq!(PieceKind::King, king.kind());
    assert!(king.has_moved());
    let rook = successor.piece_at(Square::F1).unwrap();
    assert_eq!(PieceKind::Rook, rook.kind());
    assert!(rook.has_moved());
    assert!(successor.piece_at(Square::E1).is_none());
    assert!(successor.piece_at(Square::H1).is_none());

    assert!(successor.has_castled(Alliance::White));
    assert!(successor.player(Alliance::White).is_castled());
    assert!(!successor.has_castled(Alliance::Black));
}

#[test]
fn queenside_castle_moves_king_and_rook() {
    let position = castle_ready().build();
    let castle = castle_to(&position, Square::C1).unwrap();
    let successor = position.make_move(&castle).into_position();

    assert_eq!(
        PieceKind::King,
        successor.piece_at(Square::C1).unwrap().kind()
    );
    assert_eq!(
        PieceKind::Rook,
        successor.piece_at(Square::D1).unwrap().kind()
    );
    assert!(successor.piece_at(Square::A1).is_none());
    assert!(successor.has_castled(Alliance::White));
}

#[test]
fn attacked_transit_square_forbids_castling() {
    // a rook on f8 covers f1, the kingside transit square
    let mut builder = castle_ready();
    builder.set_piece(Piece::new(PieceKind::Rook, Alliance::Black, Square::F8).having_moved());
    let position = builder.build();

    assert!(castle_to(&position, Square::G1).is_none());
    // the queenside path is untouched
    assert!(castle_to(&position, Square::C1).is_some());
}

#[test]
fn occupied_square_between_forbids_castling() {
    let mut builder = castle_ready();
    builder.set_piece(Piece::new(PieceKind::Bishop, Alliance::White, Square::F1));
    let position = builder.build();

    assert!(castle_to(&position, Square::G1).is_none());
    assert!(castle_to(&position, Square::C1).is_some());
}

#[test]
fn moved_rook_forbids_its_castle() {
    let mut builder = castle_ready();
    builder.set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::H1).having_moved());
    let position = builder.build();

    assert!(castle_to(&position, Square::G1).is_none());
    assert!(castle_to(&position, Square::C1).is_some());
}

#[test]
fn checked_king_cannot_castle() {
    // a rook on e8 checks the king down the open e-file
    let mut builder = castle_ready();
    builder.set_piece(Piece::new(PieceKind::Rook, Alliance::Black, Square::E8).having_moved());
    let position = builder.build();

    assert!(position.current_player().is_in_check());
    assert!(castle_to(&position, Square::G1).is_none());
    assert!(castle_to(&position, Square::C1).is_none());
}

#[test]
fn standard_castling_line_reaches_a_castled_position() {
    // 1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O
    let mut position = Position::standard();
    for &(from, to) in &[
        (Square::E2, Square::E4),
        (Square::E7, Square::E5),
        (Square::G1, Square::F3),
        (Square::B8, Square::C6),
        (Square::F1, Square::C4),
        (Square::F8, Square::C5),
    ] {
        let mov = Move::resolve(&position, from, to).expect("no such legal move");
        position = position.make_move(&mov).into_position();
    }

    let castle = castle_to(&position, Square::G1).expect("kingside castle should be legal");
    let successor = position.make_move(&castle).into_position();
    assert!(successor.has_castled(Alliance::White));
    assert_eq!(
        PieceKind::King,
        successor.piece_at(Square::G1).unwrap().kind()
    );
}
