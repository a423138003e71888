//! Clue predicates and their memoized tile-acceptance evaluation.
//!
//! A clue reads "the habitat is within N of ..." and accepts a tile when
//! some tile in its distance-N neighborhood matches the clue's feature set.
//! Inverted clues ("the habitat is NOT within N of ...") accept a tile only
//! when every tile in the neighborhood fails the match.
//!
//! Computing the accepted set walks the whole board and expands a
//! neighborhood per tile, so results are memoized per board: the cache
//! lives on the [`Board`] itself, which makes a fresh board a fresh cache
//! key and keeps invalidation a non-issue while a game runs.

use crate::board::{Animal, Biome, Board, StructureColor, StructureShape, Tile};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Not;
use std::rc::Rc;

/// Set of tiles, hashed by coordinates
pub type TileSet = FxHashSet<Tile>;

/// Which tile attribute a clue tests
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ClueKind {
    Biome,
    Animal,
    Structure,
}

/// One feature a clue may name.
///
/// Structure clues name either a color or a shape; a tile with a structure
/// matches when either attribute is named.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Feature {
    Biome(Biome),
    Animal(Animal),
    Color(StructureColor),
    Shape(StructureShape),
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Biome(biome) => write!(f, "{biome}"),
            Feature::Animal(animal) => write!(f, "{animal}"),
            Feature::Color(color) => {
                let name = match color {
                    StructureColor::Blue => "blue",
                    StructureColor::Green => "green",
                    StructureColor::White => "white",
                    StructureColor::Black => "black",
                };
                write!(f, "{name}")
            }
            Feature::Shape(shape) => {
                let name = match shape {
                    StructureShape::StandingStone => "standing stone",
                    StructureShape::AbandonedShack => "abandoned shack",
                };
                write!(f, "{name}")
            }
        }
    }
}

/// A clue: distance bound, feature set, tested attribute and polarity.
///
/// Equality and hashing cover all four fields and are independent of the
/// order features were supplied in; clues are usable as map keys and set
/// members. Values are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clue {
    distance: u8,
    features: BTreeSet<Feature>,
    kind: ClueKind,
    inverted: bool,
}

impl Clue {
    /// Create a clue over arbitrary features
    pub fn new(
        distance: u8,
        kind: ClueKind,
        features: impl IntoIterator<Item = Feature>,
    ) -> Self {
        Self {
            distance,
            features: features.into_iter().collect(),
            kind,
            inverted: false,
        }
    }

    /// Create a biome clue ("within `distance` of one of these biomes")
    pub fn biome(distance: u8, biomes: impl IntoIterator<Item = Biome>) -> Self {
        Self::new(distance, ClueKind::Biome, biomes.into_iter().map(Feature::Biome))
    }

    /// Create an animal-territory clue
    pub fn animal(distance: u8, animals: impl IntoIterator<Item = Animal>) -> Self {
        Self::new(
            distance,
            ClueKind::Animal,
            animals.into_iter().map(Feature::Animal),
        )
    }

    /// Create a structure clue over colors and/or shapes
    pub fn structure(distance: u8, features: impl IntoIterator<Item = Feature>) -> Self {
        Self::new(distance, ClueKind::Structure, features)
    }

    // ==================== Accessors ====================

    pub fn distance(&self) -> u8 {
        self.distance
    }

    pub fn kind(&self) -> ClueKind {
        self.kind
    }

    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.features
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    // ==================== Evaluation ====================

    /// Whether this tile itself carries one of the clue's features.
    ///
    /// A tile without a structure never matches a structure clue.
    pub fn tile_matches(&self, tile: &Tile) -> bool {
        match self.kind {
            ClueKind::Biome => self.features.contains(&Feature::Biome(tile.biome)),
            ClueKind::Animal => tile
                .animal
                .is_some_and(|animal| self.features.contains(&Feature::Animal(animal))),
            ClueKind::Structure => tile.structure.is_some_and(|structure| {
                self.features.contains(&Feature::Color(structure.color))
                    || self.features.contains(&Feature::Shape(structure.shape))
            }),
        }
    }

    /// The set of tiles this clue accepts on the given board.
    ///
    /// A non-inverted clue accepts a tile when any tile of its distance-N
    /// neighborhood matches; an inverted clue accepts a tile when every
    /// tile of the neighborhood fails to match.
    ///
    /// Results are memoized on the board; repeated queries are cache hits.
    /// Catalogue clues accept at least one tile on any legally assembled
    /// board - an empty result means the board or the clue tables are
    /// corrupt, and the engine treats that as fatal.
    pub fn accepted_tiles(&self, board: &Board) -> Rc<TileSet> {
        board.clue_cache().get_or_compute(self, || {
            let accepted: TileSet = board
                .tiles()
                .filter(|tile| {
                    let neighborhood = board.tiles_within_distance(tile.pos, self.distance);
                    if self.inverted {
                        neighborhood.iter().all(|near| !self.tile_matches(near))
                    } else {
                        neighborhood.iter().any(|near| self.tile_matches(near))
                    }
                })
                .copied()
                .collect();

            assert!(
                !accepted.is_empty(),
                "clue '{self}' accepts no tiles - board or clue tables are inconsistent"
            );
            accepted
        })
    }
}

/// `!clue` flips the polarity and nothing else; `!!clue == clue`.
impl Not for Clue {
    type Output = Clue;

    fn not(mut self) -> Clue {
        self.inverted = !self.inverted;
        self
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "Not distance {} from {{", self.distance)?;
        } else {
            write!(f, "Distance {} from {{", self.distance)?;
        }
        for (index, feature) in self.features.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{feature}")?;
        }
        write!(f, "}}")
    }
}

// ==================== Cache ====================

/// Counters exposing the accepted-tiles cache behavior for tests and
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Accepted-tile sets memoized by clue value.
///
/// Owned by a [`Board`], so the effective cache key is (clue value, board
/// identity). Purely additive: the board never changes once assembled, so
/// entries are never invalidated during a game. Interior mutability keeps
/// lookups usable through shared board references in the single-threaded
/// engine.
#[derive(Debug, Clone, Default)]
pub struct ClueCache {
    entries: RefCell<FxHashMap<Clue, Rc<TileSet>>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl ClueCache {
    pub(crate) fn get_or_compute(
        &self,
        clue: &Clue,
        compute: impl FnOnce() -> TileSet,
    ) -> Rc<TileSet> {
        if let Some(cached) = self.entries.borrow().get(clue) {
            self.hits.set(self.hits.get() + 1);
            return Rc::clone(cached);
        }

        self.misses.set(self.misses.get() + 1);
        let computed = Rc::new(compute());
        self.entries
            .borrow_mut()
            .insert(clue.clone(), Rc::clone(&computed));
        computed
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }
}
