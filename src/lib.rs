// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! minerva is a chess rules engine and adversarial move-search library.
//! Positions are immutable: applying a move produces a new [`Position`]
//! through a builder, so any number of search workers may read the same
//! position concurrently without locking.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate num_derive;

pub mod eval;
mod moves;
mod piece;
mod player;
mod position;
pub mod search;
mod types;

pub use moves::Move;
pub use piece::Piece;
pub use player::{MoveStatus, MoveTransition, Player};
pub use position::{Position, PositionBuilder};
pub use types::{square_at, Alliance, CastleStatus, File, PieceKind, Rank, Square};
pub use types::{ALLIANCES, FILES, PIECE_KINDS, RANKS, SQUARES};
