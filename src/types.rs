// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// One of the two sides of a chess game. An alliance is a process-wide
/// constant; everything direction-sensitive about a side (pawn advance
/// direction, promotion rank, double-step rank) hangs off of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    pub fn toggle(self) -> Alliance {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// The forward rank step for this alliance's pawns: White advances
    /// toward rank eight, Black toward rank one.
    pub fn direction(self) -> i32 {
        match self {
            Alliance::White => 1,
            Alliance::Black => -1,
        }
    }

    /// The rank a pawn of this alliance promotes on.
    pub fn promotion_rank(self) -> Rank {
        match self {
            Alliance::White => Rank::Eight,
            Alliance::Black => Rank::One,
        }
    }

    /// The rank this alliance's pawns start on, from which the double
    /// step is available.
    pub fn pawn_start_rank(self) -> Rank {
        match self {
            Alliance::White => Rank::Two,
            Alliance::Black => Rank::Seven,
        }
    }

    pub fn is_white(self) -> bool {
        self == Alliance::White
    }

    pub fn is_black(self) -> bool {
        self == Alliance::Black
    }
}

impl Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Alliance::White => 'w',
            Alliance::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static ALLIANCES: [Alliance; 2] = [Alliance::White, Alliance::Black];

/// A square of the position grid. Squares are addressed row-major with
/// rank eight first: A8 is index 0 and H1 is index 63.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Square {
    A8,
    B8,
    C8,
    D8,
    E8,
    F8,
    G8,
    H8,
    A7,
    B7,
    C7,
    D7,
    E7,
    F7,
    G7,
    H7,
    A6,
    B6,
    C6,
    D6,
    E6,
    F6,
    G6,
    H6,
    A5,
    B5,
    C5,
    D5,
    E5,
    F5,
    G5,
    H5,
    A4,
    B4,
    C4,
    D4,
    E4,
    F4,
    G4,
    H4,
    A3,
    B3,
    C3,
    D3,
    E3,
    F3,
    G3,
    H3,
    A2,
    B2,
    C2,
    D2,
    E2,
    F2,
    G2,
    H2,
    A1,
    B1,
    C1,
    D1,
    E1,
    F1,
    G1,
    H1,
}

impl Square {
    pub fn of(rank: Rank, file: File) -> Square {
        let rank = rank.to_u32().unwrap();
        let file = file.to_u32().unwrap();
        FromPrimitive::from_u32((7 - rank) * 8 + file).unwrap()
    }

    pub fn rank(self) -> Rank {
        FromPrimitive::from_u32(7 - (self.to_u32().unwrap() >> 3)).unwrap()
    }

    pub fn file(self) -> File {
        FromPrimitive::from_u32(self.to_u32().unwrap() & 7).unwrap()
    }

    /// Steps from this square by the given rank and file deltas, where a
    /// positive rank delta moves toward rank eight. Returns `None` when
    /// the step leaves the grid, so candidate offsets can never wrap
    /// around a board edge.
    pub fn try_offset(self, rank_delta: i32, file_delta: i32) -> Option<Square> {
        let rank = self.rank().to_i32().unwrap() + rank_delta;
        let file = self.file().to_i32().unwrap() + file_delta;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::of(
                Rank::from_index(rank as usize),
                File::from_index(file as usize),
            ))
        } else {
            None
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

pub static SQUARES: [Square; 64] = [
    Square::A8,
    Square::B8,
    Square::C8,
    Square::D8,
    Square::E8,
    Square::F8,
    Square::G8,
    Square::H8,
    Square::A7,
    Square::B7,
    Square::C7,
    Square::D7,
    Square::E7,
    Square::F7,
    Square::G7,
    Square::H7,
    Square::A6,
    Square::B6,
    Square::C6,
    Square::D6,
    Square::E6,
    Square::F6,
    Square::G6,
    Square::H6,
    Square::A5,
    Square::B5,
    Square::C5,
    Square::D5,
    Square::E5,
    Square::F5,
    Square::G5,
    Square::H5,
    Square::A4,
    Square::B4,
    Square::C4,
    Square::D4,
    Square::E4,
    Square::F4,
    Square::G4,
    Square::H4,
    Square::A3,
    Square::B3,
    Square::C3,
    Square::D3,
    Square::E3,
    Square::F3,
    Square::G3,
    Square::H3,
    Square::A2,
    Square::B2,
    Square::C2,
    Square::D2,
    Square::E2,
    Square::F2,
    Square::G2,
    Square::H2,
    Square::A1,
    Square::B1,
    Square::C1,
    Square::D1,
    Square::E1,
    Square::F1,
    Square::G1,
    Square::H1,
];

lazy_static! {
    static ref NAME_TO_SQUARE: HashMap<String, Square> = {
        let mut map = HashMap::new();
        for &sq in SQUARES.iter() {
            map.insert(sq.to_string(), sq);
        }
        map
    };
}

/// Looks up a square by its algebraic coordinate, e.g. "e4". The inverse
/// direction is `Square`'s `Display` impl; the two compose to the
/// identity over all 64 squares.
pub fn square_at(name: &str) -> Option<Square> {
    NAME_TO_SQUARE.get(name).cloned()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Rank::One => '1',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            '1' => Rank::One,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            File::A => 'a',
            File::B => 'b',
            File::C => 'c',
            File::D => 'd',
            File::E => 'e',
            File::F => 'f',
            File::G => 'g',
            File::H => 'h',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The material value of this kind of piece, in centipawns.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10000,
        }
    }

    pub fn is_king(self) -> bool {
        self == PieceKind::King
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

bitflags! {
    /// Records which sides have castled, carried forward through position
    /// construction. Castling *rights* are not tracked here; they derive
    /// from the king and rook `has_moved` flags.
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_CASTLED = 0b0000_0001;
        const BLACK_CASTLED = 0b0000_0010;
    }
}

impl CastleStatus {
    pub fn castled(alliance: Alliance) -> CastleStatus {
        match alliance {
            Alliance::White => CastleStatus::WHITE_CASTLED,
            Alliance::Black => CastleStatus::BLACK_CASTLED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_round_trip() {
        for &sq in SQUARES.iter() {
            assert_eq!(Some(sq), square_at(&sq.to_string()));
        }
    }

    #[test]
    fn square_addressing() {
        assert_eq!(Square::A8.as_index(), 0);
        assert_eq!(Square::H1.as_index(), 63);
        assert_eq!(Square::E1, Square::of(Rank::One, File::E));
        assert_eq!(Rank::Four, Square::E4.rank());
        assert_eq!(File::E, Square::E4.file());
    }

    #[test]
    fn offsets_respect_board_edges() {
        assert_eq!(Some(Square::E4), Square::E2.try_offset(2, 0));
        assert_eq!(None, Square::A4.try_offset(0, -1));
        assert_eq!(None, Square::H4.try_offset(0, 1));
        assert_eq!(None, Square::E8.try_offset(1, 0));
        assert_eq!(None, Square::E1.try_offset(-1, 0));
    }

    #[test]
    fn alliance_semantics() {
        assert_eq!(Alliance::Black, Alliance::White.toggle());
        assert_eq!(1, Alliance::White.direction());
        assert_eq!(-1, Alliance::Black.direction());
        assert_eq!(Rank::Eight, Alliance::White.promotion_rank());
        assert_eq!(Rank::Seven, Alliance::Black.pawn_start_rank());
    }

    #[test]
    fn unknown_coordinate_is_none() {
        assert_eq!(None, square_at("i9"));
        assert_eq!(None, square_at("e99"));
    }
}
