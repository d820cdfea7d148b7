// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Display};

use crate::moves::Move;
use crate::position::Position;
use crate::types::{Alliance, PieceKind, Square};

// Offsets are (rank delta, file delta) pairs; `Square::try_offset`
// rejects any candidate that would leave the grid, so none of these can
// wrap around a board edge.
static KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

static KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

static BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
static ROOK_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
static QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A piece on the board. Pieces are immutable values: moving one
/// produces a new `Piece` at the destination with the moved flag set,
/// and the old value is discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    alliance: Alliance,
    square: Square,
    has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, alliance: Alliance, square: Square) -> Piece {
        Piece {
            kind,
            alliance,
            square,
            has_moved: false,
        }
    }

    pub fn kind(self) -> PieceKind {
        self.kind
    }

    pub fn alliance(self) -> Alliance {
        self.alliance
    }

    pub fn square(self) -> Square {
        self.square
    }

    /// Whether this piece has moved at any point in the game. Gates the
    /// pawn double step and castling.
    pub fn has_moved(self) -> bool {
        self.has_moved
    }

    pub fn value(self) -> i32 {
        self.kind.value()
    }

    /// The successor of this piece after a move to `square`.
    pub fn moved_to(self, square: Square) -> Piece {
        Piece {
            square,
            has_moved: true,
            ..self
        }
    }

    /// This piece with its moved flag already set, for building
    /// positions mid-game.
    pub fn having_moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    /// Computes this piece's pseudo-legal moves: every move its movement
    /// rules allow, with no regard for whether the mover's own king is
    /// left attacked. Moves are returned in a fixed scan order, which
    /// callers rely on as a deterministic tie-break.
    pub fn pseudo_legal_moves(&self, position: &Position) -> Vec<Move> {
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(position),
            PieceKind::Knight => self.step_moves(position, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.sliding_moves(position, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.sliding_moves(position, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.sliding_moves(position, &QUEEN_DIRECTIONS),
            PieceKind::King => self.step_moves(position, &KING_OFFSETS),
        }
    }

    fn step_moves(&self, position: &Position, offsets: &[(i32, i32)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(rank_delta, file_delta) in offsets {
            let to = match self.square.try_offset(rank_delta, file_delta) {
                Some(to) => to,
                None => continue,
            };
            match position.piece_at(to) {
                None => moves.push(Move::Quiet { piece: *self, to }),
                Some(occupant) if occupant.alliance != self.alliance => {
                    moves.push(Move::Capture {
                        piece: *self,
                        to,
                        captured: occupant,
                    });
                }
                Some(_) => {}
            }
        }
        moves
    }

    fn sliding_moves(&self, position: &Position, directions: &[(i32, i32)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(rank_delta, file_delta) in directions {
            let mut current = self.square;
            while let Some(to) = current.try_offset(rank_delta, file_delta) {
                match position.piece_at(to) {
                    None => {
                        moves.push(Move::Quiet { piece: *self, to });
                        current = to;
                    }
                    Some(occupant) => {
                        if occupant.alliance != self.alliance {
                            moves.push(Move::Capture {
                                piece: *self,
                                to,
                                captured: occupant,
                            });
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    fn pawn_moves(&self, position: &Position) -> Vec<Move> {
        let mut moves = Vec::new();
        let direction = self.alliance.direction();

        if let Some(to) = self.square.try_offset(direction, 0) {
            if position.piece_at(to).is_none() {
                moves.push(self.pawn_advance(to));
                // double step, from the start rank over two empty squares
                if !self.has_moved && self.square.rank() == self.alliance.pawn_start_rank() {
                    if let Some(jump) = to.try_offset(direction, 0) {
                        if position.piece_at(jump).is_none() {
                            moves.push(Move::DoublePawnPush {
                                piece: *self,
                                to: jump,
                            });
                        }
                    }
                }
            }
        }

        for &file_delta in &[-1, 1] {
            let to = match self.square.try_offset(direction, file_delta) {
                Some(to) => to,
                None => continue,
            };
            match position.piece_at(to) {
                Some(target) if target.alliance != self.alliance => {
                    moves.push(self.pawn_capture(to, target));
                }
                None => {
                    // the en-passant pawn sits beside this one, on the
                    // file of the capture square
                    if let Some(vulnerable) = position.en_passant_pawn() {
                        if vulnerable.alliance != self.alliance
                            && Some(vulnerable.square) == self.square.try_offset(0, file_delta)
                        {
                            moves.push(Move::EnPassant {
                                piece: *self,
                                to,
                                captured: vulnerable,
                            });
                        }
                    }
                }
                Some(_) => {}
            }
        }

        moves
    }

    fn pawn_advance(&self, to: Square) -> Move {
        let push = Move::Quiet { piece: *self, to };
        if to.rank() == self.alliance.promotion_rank() {
            Move::Promotion {
                inner: Box::new(push),
            }
        } else {
            push
        }
    }

    fn pawn_capture(&self, to: Square, captured: Piece) -> Move {
        let capture = Move::Capture {
            piece: *self,
            to,
            captured,
        };
        if to.rank() == self.alliance.promotion_rank() {
            Move::Promotion {
                inner: Box::new(capture),
            }
        } else {
            capture
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        if self.alliance.is_white() {
            write!(f, "{}", chr.to_ascii_uppercase())
        } else {
            write!(f, "{}", chr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::PositionBuilder;

    fn lone_piece(kind: PieceKind, square: Square) -> (Position, Piece) {
        let piece = Piece::new(kind, Alliance::White, square);
        let mut builder = PositionBuilder::new();
        builder.set_piece(piece);
        (builder.build(), piece)
    }

    #[test]
    fn knight_move_counts() {
        let (position, knight) = lone_piece(PieceKind::Knight, Square::D4);
        assert_eq!(8, knight.pseudo_legal_moves(&position).len());

        let (position, knight) = lone_piece(PieceKind::Knight, Square::A1);
        assert_eq!(2, knight.pseudo_legal_moves(&position).len());
    }

    #[test]
    fn sliding_ray_stops_at_blockers() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, Square::A1);
        let friendly = Piece::new(PieceKind::Pawn, Alliance::White, Square::A3);
        let enemy = Piece::new(PieceKind::Pawn, Alliance::Black, Square::C1);
        let mut builder = PositionBuilder::new();
        builder.set_piece(rook).set_piece(friendly).set_piece(enemy);
        let position = builder.build();

        let moves = rook.pseudo_legal_moves(&position);
        // a2 below the friendly pawn, b1, and the capture on c1
        assert_eq!(3, moves.len());
        assert_eq!(1, moves.iter().filter(|m| m.is_capture()).count());
    }

    #[test]
    fn pawn_promotes_on_the_far_rank() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, Square::A7).having_moved();
        let mut builder = PositionBuilder::new();
        builder.set_piece(pawn);
        let position = builder.build();

        let moves = pawn.pseudo_legal_moves(&position);
        assert_eq!(1, moves.len());
        match &moves[0] {
            Move::Promotion { inner } => assert_eq!(Square::A8, inner.to()),
            other => panic!("expected a promotion, got {:?}", other),
        }
    }
}
