//! Offset hex-grid coordinates for the 12x9 game map.
//!
//! The board game numbers its columns 1..=12 left to right and its rows
//! 1..=9 top to bottom, and prints the hexes in an offset layout rather
//! than an axial one. Adjacency therefore depends on column parity: odd
//! columns take their diagonal neighbors from the row above, even columns
//! from the row below. Every clue evaluation ultimately reduces to this
//! neighbor relation, so it has to match the printed map exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns on the map.
pub const MAP_WIDTH: i32 = 12;

/// Number of rows on the map.
pub const MAP_HEIGHT: i32 = 9;

/// Diagonal and vertical offsets for odd columns (diagonals in the row above).
const ODD_COLUMN_OFFSETS: [(i32, i32); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Diagonal and vertical offsets for even columns (diagonals in the row below).
const EVEN_COLUMN_OFFSETS: [(i32, i32); 6] =
    [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// A 1-indexed map coordinate: `x` is the column, `y` the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Column, left-most being 1
    pub x: i32,
    /// Row, top-most being 1
    pub y: i32,
}

impl Position {
    /// Create a new position (no bounds check; see [`Position::in_bounds`])
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this position lies on the map
    pub const fn in_bounds(&self) -> bool {
        1 <= self.x && self.x <= MAP_WIDTH && 1 <= self.y && self.y <= MAP_HEIGHT
    }

    /// The in-bounds neighboring positions, up to 6 of them.
    ///
    /// Corner and edge positions have fewer neighbors; the position itself
    /// is never included.
    pub fn neighbors(&self) -> Vec<Position> {
        let offsets = if self.x % 2 == 1 {
            &ODD_COLUMN_OFFSETS
        } else {
            &EVEN_COLUMN_OFFSETS
        };

        offsets
            .iter()
            .map(|(dx, dy)| Position::new(self.x + dx, self.y + dy))
            .filter(Position::in_bounds)
            .collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn neighbor_set(x: i32, y: i32) -> HashSet<(i32, i32)> {
        Position::new(x, y)
            .neighbors()
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn test_interior_position_has_six_neighbors() {
        assert_eq!(neighbor_set(2, 2).len(), 6);
        assert_eq!(neighbor_set(3, 5).len(), 6);
    }

    #[test]
    fn test_odd_column_diagonals_are_in_row_above() {
        let neighbors = neighbor_set(3, 5);
        let expected: HashSet<(i32, i32)> =
            [(2, 4), (2, 5), (3, 4), (3, 6), (4, 4), (4, 5)].into();
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_even_column_diagonals_are_in_row_below() {
        let neighbors = neighbor_set(2, 2);
        let expected: HashSet<(i32, i32)> =
            [(1, 2), (1, 3), (2, 1), (2, 3), (3, 2), (3, 3)].into();
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_top_left_corner_has_two_neighbors() {
        let expected: HashSet<(i32, i32)> = [(1, 2), (2, 1)].into();
        assert_eq!(neighbor_set(1, 1), expected);
    }

    #[test]
    fn test_bottom_right_corner_has_two_neighbors() {
        let expected: HashSet<(i32, i32)> = [(11, 9), (12, 8)].into();
        assert_eq!(neighbor_set(12, 9), expected);
    }

    #[test]
    fn test_top_edge_even_column() {
        let expected: HashSet<(i32, i32)> =
            [(5, 1), (5, 2), (6, 2), (7, 1), (7, 2)].into();
        assert_eq!(neighbor_set(6, 1), expected);
    }

    #[test]
    fn test_neighbors_never_include_self() {
        for x in 1..=MAP_WIDTH {
            for y in 1..=MAP_HEIGHT {
                let pos = Position::new(x, y);
                assert!(!pos.neighbors().contains(&pos));
            }
        }
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        for x in 1..=MAP_WIDTH {
            for y in 1..=MAP_HEIGHT {
                let pos = Position::new(x, y);
                for neighbor in pos.neighbors() {
                    assert!(
                        neighbor.neighbors().contains(&pos),
                        "{neighbor} is a neighbor of {pos} but not vice versa"
                    );
                }
            }
        }
    }
}
