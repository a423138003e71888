//! Game board representation: biomes, animals, structures and the tile grid.
//!
//! This module contains:
//! - The biome, animal and structure enumerations
//! - `Structure` markers overlaid on the terrain
//! - `Tile` - one hex of the assembled map
//! - `Board` - the full 12x9 grid assembled from terrain pieces
//!
//! A board is assembled once from six terrain-piece descriptors plus the
//! structure overlay and is immutable afterwards; every other component
//! borrows it read-only for the lifetime of a game.

use crate::clue::{CacheStats, ClueCache, TileSet};
use crate::hex::{Position, MAP_HEIGHT, MAP_WIDTH};
use crate::pieces::{PieceDescriptor, MAP_PIECE_COUNT, PIECE_HEIGHT, PIECE_WIDTH};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Structure count for the standard game
const STANDARD_STRUCTURE_COUNT: usize = 6;

/// Structure count for the advanced game (adds the black structures)
const ADVANCED_STRUCTURE_COUNT: usize = 8;

/// Terrain type of a tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Biome {
    Forest,
    Desert,
    Water,
    Swamp,
    Mountain,
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Biome::Forest => "forest",
            Biome::Desert => "desert",
            Biome::Water => "water",
            Biome::Swamp => "swamp",
            Biome::Mountain => "mountain",
        };
        write!(f, "{name}")
    }
}

/// Animal territory printed on some tiles
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Animal {
    Bear,
    Cougar,
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Animal::Bear => "bear",
            Animal::Cougar => "cougar",
        };
        write!(f, "{name}")
    }
}

/// Color of a structure marker
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StructureColor {
    Blue,
    Green,
    White,
    /// Only present in the advanced game
    Black,
}

impl FromStr for StructureColor {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blue" => Ok(StructureColor::Blue),
            "green" => Ok(StructureColor::Green),
            "white" => Ok(StructureColor::White),
            "black" => Ok(StructureColor::Black),
            _ => Err(BoardError::UnknownColor(s.to_string())),
        }
    }
}

impl fmt::Display for StructureColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureColor::Blue => "Blue",
            StructureColor::Green => "Green",
            StructureColor::White => "White",
            StructureColor::Black => "Black",
        };
        write!(f, "{name}")
    }
}

/// Shape of a structure marker
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StructureShape {
    StandingStone,
    AbandonedShack,
}

impl FromStr for StructureShape {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stone" | "standing_stone" => Ok(StructureShape::StandingStone),
            "shack" | "abandoned_shack" => Ok(StructureShape::AbandonedShack),
            _ => Err(BoardError::UnknownShape(s.to_string())),
        }
    }
}

impl fmt::Display for StructureShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureShape::StandingStone => "Standing Stone",
            StructureShape::AbandonedShack => "Abandoned Shack",
        };
        write!(f, "{name}")
    }
}

/// A structure marker placed on a specific tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Structure {
    pub color: StructureColor,
    pub shape: StructureShape,
    pub pos: Position,
}

impl Structure {
    /// Create a structure, validating that its coordinates are on the map.
    pub fn new(
        color: StructureColor,
        shape: StructureShape,
        x: i32,
        y: i32,
    ) -> Result<Self, BoardError> {
        let pos = Position::new(x, y);
        if !pos.in_bounds() {
            return Err(BoardError::OutOfBounds { x, y });
        }
        Ok(Self { color, shape, pos })
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.shape)
    }
}

/// A single hex tile of the assembled map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the map
    pub pos: Position,
    /// Terrain type
    pub biome: Biome,
    /// Animal territory, if any
    pub animal: Option<Animal>,
    /// Structure marker, if any
    pub structure: Option<Structure>,
}

// Tile identity is coordinate-based: two tiles with the same position are
// the same tile for set-membership purposes.
impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Tile {}

impl std::hash::Hash for Tile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.pos, self.biome)?;
        match (self.animal, self.structure) {
            (Some(animal), Some(structure)) => write!(f, " with {animal} and {structure}"),
            (Some(animal), None) => write!(f, " with {animal}"),
            (None, Some(structure)) => write!(f, " with {structure}"),
            (None, None) => Ok(()),
        }
    }
}

/// Which rule set the board was assembled for, derived from structure count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Six structures, no black structures, no inverted clues
    Standard,
    /// Eight structures including black; inverted clues are in play
    Advanced,
}

/// Errors raised while assembling a board
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardError {
    #[error("map layout requires exactly {MAP_PIECE_COUNT} terrain pieces, got {0}")]
    PieceCount(usize),

    #[error(
        "game requires {STANDARD_STRUCTURE_COUNT} or {ADVANCED_STRUCTURE_COUNT} structures, got {0}"
    )]
    StructureCount(usize),

    #[error("coordinates ({x}, {y}) are outside the {MAP_WIDTH}x{MAP_HEIGHT} map")]
    OutOfBounds { x: i32, y: i32 },

    #[error("two structures occupy ({x}, {y})")]
    DuplicateStructure { x: i32, y: i32 },

    #[error("unrecognized piece descriptor '{0}'")]
    BadPieceDescriptor(String),

    #[error("unrecognized structure color '{0}'")]
    UnknownColor(String),

    #[error("unrecognized structure shape '{0}'")]
    UnknownShape(String),
}

/// The complete, immutable game board.
#[derive(Debug, Clone)]
pub struct Board {
    /// All tiles in column-major order: index `(x - 1) * MAP_HEIGHT + (y - 1)`
    tiles: Vec<Tile>,
    mode: GameMode,
    /// Memoized accepted-tile sets; a fresh board is a fresh cache by construction
    clue_cache: ClueCache,
}

impl Board {
    /// Assemble a board from piece descriptors like `"3N"` plus the
    /// structure overlay.
    ///
    /// The layout names the pieces column-major: the left half of the map
    /// top to bottom, then the right half top to bottom.
    pub fn new(layout: &[&str], structures: &[Structure]) -> Result<Self, BoardError> {
        if layout.len() != MAP_PIECE_COUNT {
            return Err(BoardError::PieceCount(layout.len()));
        }
        let descriptors = layout
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<PieceDescriptor>, _>>()?;
        Self::from_descriptors(&descriptors, structures)
    }

    /// Assemble a board from already-parsed piece descriptors.
    pub fn from_descriptors(
        pieces: &[PieceDescriptor],
        structures: &[Structure],
    ) -> Result<Self, BoardError> {
        if pieces.len() != MAP_PIECE_COUNT {
            return Err(BoardError::PieceCount(pieces.len()));
        }
        for descriptor in pieces {
            if !descriptor.is_valid() {
                return Err(BoardError::BadPieceDescriptor(descriptor.to_string()));
            }
        }
        let mode = match structures.len() {
            STANDARD_STRUCTURE_COUNT => GameMode::Standard,
            ADVANCED_STRUCTURE_COUNT => GameMode::Advanced,
            count => return Err(BoardError::StructureCount(count)),
        };

        let mut overlay: FxHashMap<Position, Structure> = FxHashMap::default();
        for structure in structures {
            if !structure.pos.in_bounds() {
                return Err(BoardError::OutOfBounds {
                    x: structure.pos.x,
                    y: structure.pos.y,
                });
            }
            if overlay.insert(structure.pos, *structure).is_some() {
                return Err(BoardError::DuplicateStructure {
                    x: structure.pos.x,
                    y: structure.pos.y,
                });
            }
        }

        // Pieces tile the board in 2x3 blocks of 6x3 cells each; the block
        // and in-piece cell of a coordinate follow directly from its x, y.
        let mut tiles = Vec::with_capacity((MAP_WIDTH * MAP_HEIGHT) as usize);
        for x in 1..=MAP_WIDTH {
            for y in 1..=MAP_HEIGHT {
                let column = (x - 1) as usize;
                let row = (y - 1) as usize;
                let piece_index = column / PIECE_WIDTH * 3 + row / PIECE_HEIGHT;
                let (biome, animal) =
                    pieces[piece_index].cell_at(column % PIECE_WIDTH, row % PIECE_HEIGHT);

                let pos = Position::new(x, y);
                tiles.push(Tile {
                    pos,
                    biome,
                    animal,
                    structure: overlay.get(&pos).copied(),
                });
            }
        }

        Ok(Self {
            tiles,
            mode,
            clue_cache: ClueCache::default(),
        })
    }

    // ==================== Query Methods ====================

    /// The rule set this board was assembled for
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Get the tile at a position, or `None` when out of bounds
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !pos.in_bounds() {
            return None;
        }
        self.tiles
            .get(((pos.x - 1) * MAP_HEIGHT + (pos.y - 1)) as usize)
    }

    /// All tiles in scan order: columns left to right, each top to bottom
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// The tiles reachable from `origin` in at most `distance` neighbor
    /// hops, origin included. `distance` 0 yields only the origin tile.
    pub fn tiles_within_distance(&self, origin: Position, distance: u8) -> TileSet {
        let mut reached: FxHashSet<Position> = FxHashSet::default();
        reached.insert(origin);
        let mut frontier = vec![origin];

        for _ in 0..distance {
            let mut next = Vec::new();
            for pos in frontier {
                for neighbor in pos.neighbors() {
                    if reached.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            frontier = next;
        }

        reached
            .into_iter()
            .filter_map(|pos| self.tile(pos))
            .copied()
            .collect()
    }

    /// Counters for the accepted-tiles cache (see [`crate::clue::Clue::accepted_tiles`])
    pub fn cache_stats(&self) -> CacheStats {
        self.clue_cache.stats()
    }

    pub(crate) fn clue_cache(&self) -> &ClueCache {
        &self.clue_cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LAYOUT: [&str; 6] = ["3N", "1S", "5S", "4S", "2N", "6S"];

    fn reference_structures() -> Vec<Structure> {
        use StructureColor::*;
        use StructureShape::*;
        vec![
            Structure::new(Green, StandingStone, 12, 2).unwrap(),
            Structure::new(Green, AbandonedShack, 7, 3).unwrap(),
            Structure::new(White, StandingStone, 8, 6).unwrap(),
            Structure::new(White, AbandonedShack, 10, 8).unwrap(),
            Structure::new(Blue, StandingStone, 9, 1).unwrap(),
            Structure::new(Blue, AbandonedShack, 7, 4).unwrap(),
        ]
    }

    fn reference_board() -> Board {
        Board::new(&LAYOUT, &reference_structures()).unwrap()
    }

    fn biome_at(board: &Board, x: i32, y: i32) -> Biome {
        board.tile(Position::new(x, y)).unwrap().biome
    }

    #[test]
    fn test_board_has_one_tile_per_coordinate() {
        let board = reference_board();
        assert_eq!(board.tiles().count(), 108);
        for x in 1..=MAP_WIDTH {
            for y in 1..=MAP_HEIGHT {
                let tile = board.tile(Position::new(x, y)).unwrap();
                assert_eq!(tile.pos, Position::new(x, y));
            }
        }
    }

    #[test]
    fn test_rejects_wrong_piece_count() {
        let result = Board::new(&["3N", "1S", "5S"], &reference_structures());
        assert_eq!(result.unwrap_err(), BoardError::PieceCount(3));
    }

    #[test]
    fn test_rejects_wrong_structure_count() {
        let structures = &reference_structures()[..5];
        let result = Board::new(&LAYOUT, structures);
        assert_eq!(result.unwrap_err(), BoardError::StructureCount(5));
    }

    #[test]
    fn test_rejects_structure_off_the_map() {
        assert_eq!(
            Structure::new(StructureColor::Blue, StructureShape::StandingStone, 13, 1),
            Err(BoardError::OutOfBounds { x: 13, y: 1 })
        );
        assert_eq!(
            Structure::new(StructureColor::Blue, StructureShape::StandingStone, 1, 0),
            Err(BoardError::OutOfBounds { x: 1, y: 0 })
        );
    }

    #[test]
    fn test_rejects_duplicate_structure_coordinates() {
        let mut structures = reference_structures();
        structures[1] =
            Structure::new(StructureColor::Black, StructureShape::AbandonedShack, 12, 2)
                .unwrap();
        let result = Board::new(&LAYOUT, &structures);
        assert_eq!(
            result.unwrap_err(),
            BoardError::DuplicateStructure { x: 12, y: 2 }
        );
    }

    #[test]
    fn test_rejects_bad_descriptor() {
        let result = Board::new(&["3N", "1S", "5S", "4S", "2N", "9S"], &reference_structures());
        assert_eq!(
            result.unwrap_err(),
            BoardError::BadPieceDescriptor("9S".to_string())
        );
    }

    #[test]
    fn test_mode_follows_structure_count() {
        assert_eq!(reference_board().mode(), GameMode::Standard);

        let mut structures = reference_structures();
        structures.push(
            Structure::new(StructureColor::Black, StructureShape::StandingStone, 2, 3).unwrap(),
        );
        structures.push(
            Structure::new(StructureColor::Black, StructureShape::AbandonedShack, 8, 7).unwrap(),
        );
        let board = Board::new(&LAYOUT, &structures).unwrap();
        assert_eq!(board.mode(), GameMode::Advanced);
    }

    #[test]
    fn test_north_piece_lands_as_printed() {
        // Piece 3 north occupies the top-left block
        let board = reference_board();
        assert_eq!(biome_at(&board, 1, 1), Biome::Swamp);
        assert_eq!(biome_at(&board, 1, 2), Biome::Swamp);
        assert_eq!(biome_at(&board, 1, 3), Biome::Mountain);
        let tile = board.tile(Position::new(1, 2)).unwrap();
        assert_eq!(tile.animal, Some(Animal::Cougar));
    }

    #[test]
    fn test_south_piece_is_rotated() {
        // Piece 1 south occupies the middle-left block: its printed
        // bottom-right corner (forest with bear) lands at (1, 4).
        let board = reference_board();
        let tile = board.tile(Position::new(1, 4)).unwrap();
        assert_eq!(tile.biome, Biome::Forest);
        assert_eq!(tile.animal, Some(Animal::Bear));

        // Piece 6 south sits bottom-right: its printed top-left corner
        // (desert with bear) lands at (12, 9).
        let tile = board.tile(Position::new(12, 9)).unwrap();
        assert_eq!(tile.biome, Biome::Desert);
        assert_eq!(tile.animal, Some(Animal::Bear));
        assert_eq!(biome_at(&board, 12, 7), Biome::Mountain);
    }

    #[test]
    fn test_right_half_blocks() {
        let board = reference_board();
        // Piece 4 south leads the right half
        assert_eq!(biome_at(&board, 7, 1), Biome::Forest);
        assert_eq!(
            board.tile(Position::new(7, 1)).unwrap().animal,
            Some(Animal::Cougar)
        );
        // Piece 2 north fills the middle-right block
        assert_eq!(biome_at(&board, 7, 4), Biome::Swamp);
        assert_eq!(
            board.tile(Position::new(7, 4)).unwrap().animal,
            Some(Animal::Cougar)
        );
    }

    #[test]
    fn test_structures_overlay_matching_tiles() {
        let board = reference_board();

        let tile = board.tile(Position::new(8, 6)).unwrap();
        assert_eq!(tile.biome, Biome::Mountain);
        let structure = tile.structure.unwrap();
        assert_eq!(structure.color, StructureColor::White);
        assert_eq!(structure.shape, StructureShape::StandingStone);

        let tile = board.tile(Position::new(7, 4)).unwrap();
        let structure = tile.structure.unwrap();
        assert_eq!(structure.color, StructureColor::Blue);
        assert_eq!(structure.shape, StructureShape::AbandonedShack);

        let without = board.tile(Position::new(5, 5)).unwrap();
        assert!(without.structure.is_none());
    }

    #[test]
    fn test_tiles_within_distance_zero_is_origin_only() {
        let board = reference_board();
        let origin = Position::new(4, 4);
        let tiles = board.tiles_within_distance(origin, 0);
        assert_eq!(tiles.len(), 1);
        assert!(tiles.contains(board.tile(origin).unwrap()));
    }

    #[test]
    fn test_tiles_within_distance_one_is_origin_plus_neighbors() {
        let board = reference_board();
        let origin = Position::new(4, 4);
        let tiles = board.tiles_within_distance(origin, 1);
        assert_eq!(tiles.len(), 7);
        for neighbor in origin.neighbors() {
            assert!(tiles.contains(board.tile(neighbor).unwrap()));
        }
    }

    #[test]
    fn test_tiles_within_distance_clips_at_map_edge() {
        let board = reference_board();
        // (1, 1) has two neighbors; one more hop reaches four further tiles
        assert_eq!(board.tiles_within_distance(Position::new(1, 1), 1).len(), 3);
        assert_eq!(board.tiles_within_distance(Position::new(1, 1), 2).len(), 7);
    }

    #[test]
    fn test_tile_display() {
        let board = reference_board();
        let tile = board.tile(Position::new(7, 4)).unwrap();
        assert_eq!(
            tile.to_string(),
            "(7, 4) - swamp with cougar and Blue Abandoned Shack"
        );
    }
}
