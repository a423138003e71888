//! The fixed terrain-piece catalogue from the base game.
//!
//! The physical game ships six double-sided 6x3 map pieces. Each piece is
//! transcribed here column by column exactly as printed; a piece placed
//! "south side up" is the 180-degree rotation of its northern side. This is
//! immutable game data, not something the engine derives.

use crate::board::{Animal, Biome, BoardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of terrain pieces a map layout must name.
pub const MAP_PIECE_COUNT: usize = 6;

/// Columns per terrain piece.
pub(crate) const PIECE_WIDTH: usize = 6;

/// Rows per terrain piece.
pub(crate) const PIECE_HEIGHT: usize = 3;

/// A single cell of a terrain piece: its biome and optional animal territory.
pub(crate) type PieceCell = (Biome, Option<Animal>);

/// A terrain piece laid out as `PIECE_WIDTH` columns of `PIECE_HEIGHT` cells.
pub(crate) type PieceGrid = [[PieceCell; PIECE_HEIGHT]; PIECE_WIDTH];

const fn cell(biome: Biome) -> PieceCell {
    (biome, None)
}

const fn den(biome: Biome, animal: Animal) -> PieceCell {
    (biome, Some(animal))
}

use Animal::{Bear, Cougar};
use Biome::{Desert, Forest, Mountain, Swamp, Water};

const PIECE_1: PieceGrid = [
    [cell(Water), cell(Swamp), cell(Swamp)],
    [cell(Water), cell(Swamp), cell(Swamp)],
    [cell(Water), cell(Water), cell(Desert)],
    [cell(Water), cell(Desert), den(Desert, Bear)],
    [cell(Forest), cell(Forest), den(Desert, Bear)],
    [cell(Forest), cell(Forest), den(Forest, Bear)],
];

const PIECE_2: PieceGrid = [
    [den(Swamp, Cougar), cell(Swamp), cell(Swamp)],
    [den(Forest, Cougar), cell(Swamp), cell(Mountain)],
    [den(Forest, Cougar), cell(Forest), cell(Mountain)],
    [cell(Forest), cell(Desert), cell(Mountain)],
    [cell(Forest), cell(Desert), cell(Mountain)],
    [cell(Forest), cell(Desert), cell(Desert)],
];

const PIECE_3: PieceGrid = [
    [cell(Swamp), den(Swamp, Cougar), den(Mountain, Cougar)],
    [cell(Swamp), den(Swamp, Cougar), cell(Mountain)],
    [cell(Forest), cell(Forest), cell(Mountain)],
    [cell(Forest), cell(Mountain), cell(Mountain)],
    [cell(Forest), cell(Water), cell(Water)],
    [cell(Water), cell(Water), cell(Water)],
];

const PIECE_4: PieceGrid = [
    [cell(Desert), cell(Desert), cell(Desert)],
    [cell(Desert), cell(Desert), cell(Desert)],
    [cell(Mountain), cell(Mountain), cell(Desert)],
    [cell(Mountain), cell(Water), cell(Forest)],
    [cell(Mountain), cell(Water), cell(Forest)],
    [cell(Mountain), den(Water, Cougar), den(Forest, Cougar)],
];

const PIECE_5: PieceGrid = [
    [cell(Swamp), cell(Swamp), cell(Desert)],
    [cell(Swamp), cell(Desert), cell(Desert)],
    [cell(Swamp), cell(Desert), cell(Water)],
    [cell(Mountain), cell(Water), cell(Water)],
    [cell(Mountain), cell(Mountain), den(Water, Bear)],
    [cell(Mountain), den(Mountain, Bear), den(Water, Bear)],
];

const PIECE_6: PieceGrid = [
    [den(Desert, Bear), den(Mountain, Bear), cell(Mountain)],
    [cell(Desert), cell(Mountain), cell(Water)],
    [cell(Swamp), cell(Swamp), cell(Water)],
    [cell(Swamp), cell(Swamp), cell(Water)],
    [cell(Swamp), cell(Forest), cell(Water)],
    [cell(Forest), cell(Forest), cell(Forest)],
];

/// Look up a piece grid by its printed number (1..=6).
pub(crate) fn piece_grid(id: u8) -> Option<&'static PieceGrid> {
    match id {
        1 => Some(&PIECE_1),
        2 => Some(&PIECE_2),
        3 => Some(&PIECE_3),
        4 => Some(&PIECE_4),
        5 => Some(&PIECE_5),
        6 => Some(&PIECE_6),
        _ => None,
    }
}

/// Which side of a terrain piece faces up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The piece as printed in the catalogue
    North,
    /// Rotated 180 degrees
    South,
}

/// A terrain piece reference in a map layout: piece number plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceDescriptor {
    /// Printed piece number, 1..=6
    pub id: u8,
    /// Which side faces up
    pub orientation: Orientation,
}

impl PieceDescriptor {
    /// Whether the piece number names a catalogue piece
    pub fn is_valid(&self) -> bool {
        piece_grid(self.id).is_some()
    }

    /// The cell of this piece at local coordinates, orientation applied.
    pub(crate) fn cell_at(&self, column: usize, row: usize) -> PieceCell {
        let grid = piece_grid(self.id).expect("descriptor id validated by board assembly");
        match self.orientation {
            Orientation::North => grid[column][row],
            Orientation::South => grid[PIECE_WIDTH - 1 - column][PIECE_HEIGHT - 1 - row],
        }
    }
}

impl FromStr for PieceDescriptor {
    type Err = BoardError;

    /// Parse a descriptor like `"3N"` or `"1s"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || BoardError::BadPieceDescriptor(s.to_string());

        let mut chars = s.chars();
        let (id_char, heading) = match (chars.next(), chars.next(), chars.next()) {
            (Some(id), Some(heading), None) => (id, heading),
            _ => return Err(bad()),
        };

        let id = id_char.to_digit(10).ok_or_else(bad)? as u8;
        if piece_grid(id).is_none() {
            return Err(bad());
        }

        let orientation = match heading.to_ascii_uppercase() {
            'N' => Orientation::North,
            'S' => Orientation::South,
            _ => return Err(bad()),
        };

        Ok(PieceDescriptor { id, orientation })
    }
}

impl fmt::Display for PieceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = match self.orientation {
            Orientation::North => 'N',
            Orientation::South => 'S',
        };
        write!(f, "{}{}", self.id, heading)
    }
}
