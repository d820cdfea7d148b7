// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Write};

use crate::moves::Move;
use crate::piece::Piece;
use crate::player::{MoveStatus, MoveTransition, Player};
use crate::types::{Alliance, CastleStatus, PieceKind, Square, TableIndex, SQUARES};

/// An immutable chess position: 64 squares, the side to move, the pawn
/// (if any) currently vulnerable to en passant, and which sides have
/// castled. A position is only ever created through a
/// [`PositionBuilder`] — either the standard setup or the application
/// of a move — and is never mutated afterwards, so positions can be
/// shared freely across search workers.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    side_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
    castle_status: CastleStatus,
}

impl Position {
    /// The standard chess starting position, White to move.
    pub fn standard() -> Position {
        let mut builder = PositionBuilder::new();
        builder
            .set_piece(Piece::new(PieceKind::Rook, Alliance::Black, Square::A8))
            .set_piece(Piece::new(PieceKind::Knight, Alliance::Black, Square::B8))
            .set_piece(Piece::new(PieceKind::Bishop, Alliance::Black, Square::C8))
            .set_piece(Piece::new(PieceKind::Queen, Alliance::Black, Square::D8))
            .set_piece(Piece::new(PieceKind::King, Alliance::Black, Square::E8))
            .set_piece(Piece::new(PieceKind::Bishop, Alliance::Black, Square::F8))
            .set_piece(Piece::new(PieceKind::Knight, Alliance::Black, Square::G8))
            .set_piece(Piece::new(PieceKind::Rook, Alliance::Black, Square::H8));
        for &square in &SQUARES[8..16] {
            builder.set_piece(Piece::new(PieceKind::Pawn, Alliance::Black, square));
        }
        for &square in &SQUARES[48..56] {
            builder.set_piece(Piece::new(PieceKind::Pawn, Alliance::White, square));
        }
        builder
            .set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::A1))
            .set_piece(Piece::new(PieceKind::Knight, Alliance::White, Square::B1))
            .set_piece(Piece::new(PieceKind::Bishop, Alliance::White, Square::C1))
            .set_piece(Piece::new(PieceKind::Queen, Alliance::White, Square::D1))
            .set_piece(Piece::new(PieceKind::King, Alliance::White, Square::E1))
            .set_piece(Piece::new(PieceKind::Bishop, Alliance::White, Square::F1))
            .set_piece(Piece::new(PieceKind::Knight, Alliance::White, Square::G1))
            .set_piece(Piece::new(PieceKind::Rook, Alliance::White, Square::H1))
            .set_move_maker(Alliance::White);
        builder.build()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// The active pieces of one alliance, in square-scan order.
    pub fn pieces(&self, alliance: Alliance) -> impl Iterator<Item = Piece> + '_ {
        self.squares
            .iter()
            .flatten()
            .cloned()
            .filter(move |piece| piece.alliance() == alliance)
    }

    pub fn side_to_move(&self) -> Alliance {
        self.side_to_move
    }

    /// The pawn vulnerable to en passant, set for exactly one ply after
    /// a double pawn push.
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn has_castled(&self, alliance: Alliance) -> bool {
        self.castle_status.contains(CastleStatus::castled(alliance))
    }

    /// The square of `alliance`'s king. Exactly one king per alliance
    /// exists on any reachable position; a missing king is a contract
    /// violation and panics.
    pub fn king_square(&self, alliance: Alliance) -> Square {
        self.pieces(alliance)
            .find(|piece| piece.kind().is_king())
            .map(|piece| piece.square())
            .unwrap_or_else(|| panic!("no {} king on the board", alliance))
    }

    /// The union of every pseudo-legal move of `alliance`'s pieces, in
    /// square-scan order. Castling is not included here; it is a
    /// player-level candidate, not a piece move.
    pub fn pseudo_legal_moves(&self, alliance: Alliance) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces(alliance) {
            moves.extend(piece.pseudo_legal_moves(self));
        }
        moves
    }

    /// Whether `square` is in `alliance`'s pseudo-legal attack set,
    /// recomputed from scratch on this position.
    pub fn attacked_by(&self, square: Square, alliance: Alliance) -> bool {
        self.pseudo_legal_moves(alliance)
            .iter()
            .any(|mov| mov.to() == square)
    }

    /// Derives `alliance`'s view of this position: its filtered legal
    /// moves and game status.
    pub fn player(&self, alliance: Alliance) -> Player {
        Player::derive(self, alliance)
    }

    pub fn current_player(&self) -> Player {
        self.player(self.side_to_move)
    }

    /// Applies `mov`, producing the transition result. On success the
    /// transition holds the successor position with the opponent to
    /// move; a move that would leave the mover's own king attacked
    /// yields `MoveStatus::IllegalMove` and the original position.
    pub fn make_move(&self, mov: &Move) -> MoveTransition {
        debug_assert_eq!(
            Some(mov.piece()),
            self.piece_at(mov.from()),
            "move references a piece that is not on the board"
        );
        let successor = self.apply(mov);
        let king_square = successor.king_square(self.side_to_move);
        if successor.attacked_by(king_square, self.side_to_move.toggle()) {
            MoveTransition::new(self.clone(), mov.clone(), MoveStatus::IllegalMove)
        } else {
            MoveTransition::new(successor, mov.clone(), MoveStatus::Done)
        }
    }

    /// Builds the candidate successor: every piece but the mover (and
    /// the captured piece, which for en passant is not on the
    /// destination square) carries over, the moved piece lands with its
    /// moved flag set, castles relocate the rook, and en-passant
    /// vulnerability is set for double pushes and cleared otherwise.
    fn apply(&self, mov: &Move) -> Position {
        let mover = mov.piece();
        let captured_square = mov.captured().map(|piece| piece.square());
        let castle_rook_square = mov.castle_rook().map(|(rook, _)| rook.square());

        let mut builder = PositionBuilder::new();
        for piece in self.squares.iter().flatten() {
            if piece.square() == mover.square()
                || Some(piece.square()) == captured_square
                || Some(piece.square()) == castle_rook_square
            {
                continue;
            }
            builder.set_piece(*piece);
        }

        match mov {
            Move::Promotion { inner } => {
                builder.set_piece(
                    Piece::new(PieceKind::Queen, mover.alliance(), inner.to()).having_moved(),
                );
            }
            Move::KingsideCastle { king, to, rook, rook_to }
            | Move::QueensideCastle { king, to, rook, rook_to } => {
                builder.set_piece(king.moved_to(*to));
                builder.set_piece(rook.moved_to(*rook_to));
            }
            _ => {
                builder.set_piece(mover.moved_to(mov.to()));
            }
        }

        if let Move::DoublePawnPush { piece, to } = mov {
            builder.set_en_passant_pawn(piece.moved_to(*to));
        }

        let mut castle_status = self.castle_status;
        if mov.is_castle() {
            castle_status |= CastleStatus::castled(mover.alliance());
        }
        builder
            .set_castle_status(castle_status)
            .set_move_maker(self.side_to_move.toggle());
        builder.build()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, square) in self.squares.iter().enumerate() {
            match square {
                Some(piece) => write!(f, "{:>3}", piece.to_string())?,
                None => write!(f, "{:>3}", "-")?,
            }
            if (idx + 1) % 8 == 0 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

/// The sole construction path for positions. Mirrors move application:
/// place pieces, name the side to move, optionally mark a pawn as
/// en-passant vulnerable, and carry the castled flags forward.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    squares: [Option<Piece>; 64],
    side_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
    castle_status: CastleStatus,
}

impl PositionBuilder {
    pub fn new() -> PositionBuilder {
        PositionBuilder {
            squares: [None; 64],
            side_to_move: Alliance::White,
            en_passant_pawn: None,
            castle_status: CastleStatus::NONE,
        }
    }

    /// Places a piece on the square it carries. A piece already on
    /// that square is replaced.
    pub fn set_piece(&mut self, piece: Piece) -> &mut PositionBuilder {
        self.squares[piece.square().as_index()] = Some(piece);
        self
    }

    pub fn set_move_maker(&mut self, alliance: Alliance) -> &mut PositionBuilder {
        self.side_to_move = alliance;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut PositionBuilder {
        self.en_passant_pawn = Some(pawn);
        self
    }

    pub fn set_castle_status(&mut self, castle_status: CastleStatus) -> &mut PositionBuilder {
        self.castle_status = castle_status;
        self
    }

    pub fn build(&self) -> Position {
        Position {
            squares: self.squares,
            side_to_move: self.side_to_move,
            en_passant_pawn: self.en_passant_pawn,
            castle_status: self.castle_status,
        }
    }
}

impl Default for PositionBuilder {
    fn default() -> PositionBuilder {
        PositionBuilder::new()
    }
}
