//! The fixed clue catalogue from the game rules.
//!
//! The 24 clues below are a closed enumeration - game logic never invents
//! clues at runtime. `THREE_FROM_BLACK` only exists in the advanced game,
//! so [`base_clues`] excludes it.

use crate::board::{Animal, Biome, StructureColor, StructureShape};
use crate::clue::{Clue, Feature};
use std::sync::LazyLock;

macro_rules! biome_clue {
    ($name:ident, $distance:expr, [$($biome:ident),+]) => {
        pub static $name: LazyLock<Clue> =
            LazyLock::new(|| Clue::biome($distance, [$(Biome::$biome),+]));
    };
}

biome_clue!(FOREST_OR_DESERT, 0, [Forest, Desert]);
biome_clue!(FOREST_OR_WATER, 0, [Forest, Water]);
biome_clue!(FOREST_OR_SWAMP, 0, [Forest, Swamp]);
biome_clue!(FOREST_OR_MOUNTAIN, 0, [Forest, Mountain]);
biome_clue!(DESERT_OR_WATER, 0, [Desert, Water]);
biome_clue!(DESERT_OR_SWAMP, 0, [Desert, Swamp]);
biome_clue!(DESERT_OR_MOUNTAIN, 0, [Desert, Mountain]);
biome_clue!(WATER_OR_SWAMP, 0, [Water, Swamp]);
biome_clue!(WATER_OR_MOUNTAIN, 0, [Water, Mountain]);
biome_clue!(SWAMP_OR_MOUNTAIN, 0, [Swamp, Mountain]);

biome_clue!(ONE_FROM_FOREST, 1, [Forest]);
biome_clue!(ONE_FROM_DESERT, 1, [Desert]);
biome_clue!(ONE_FROM_SWAMP, 1, [Swamp]);
biome_clue!(ONE_FROM_MOUNTAIN, 1, [Mountain]);
biome_clue!(ONE_FROM_WATER, 1, [Water]);

pub static ONE_FROM_ANIMAL: LazyLock<Clue> =
    LazyLock::new(|| Clue::animal(1, [Animal::Cougar, Animal::Bear]));
pub static TWO_FROM_COUGAR: LazyLock<Clue> =
    LazyLock::new(|| Clue::animal(2, [Animal::Cougar]));
pub static TWO_FROM_BEAR: LazyLock<Clue> = LazyLock::new(|| Clue::animal(2, [Animal::Bear]));

pub static TWO_FROM_STANDING_STONE: LazyLock<Clue> =
    LazyLock::new(|| Clue::structure(2, [Feature::Shape(StructureShape::StandingStone)]));
pub static TWO_FROM_ABANDONED_SHACK: LazyLock<Clue> =
    LazyLock::new(|| Clue::structure(2, [Feature::Shape(StructureShape::AbandonedShack)]));

pub static THREE_FROM_BLUE: LazyLock<Clue> =
    LazyLock::new(|| Clue::structure(3, [Feature::Color(StructureColor::Blue)]));
pub static THREE_FROM_WHITE: LazyLock<Clue> =
    LazyLock::new(|| Clue::structure(3, [Feature::Color(StructureColor::White)]));
pub static THREE_FROM_GREEN: LazyLock<Clue> =
    LazyLock::new(|| Clue::structure(3, [Feature::Color(StructureColor::Green)]));
pub static THREE_FROM_BLACK: LazyLock<Clue> =
    LazyLock::new(|| Clue::structure(3, [Feature::Color(StructureColor::Black)]));

static NAMED_CLUES: [(&str, &LazyLock<Clue>); 24] = [
    ("FOREST_OR_DESERT", &FOREST_OR_DESERT),
    ("FOREST_OR_WATER", &FOREST_OR_WATER),
    ("FOREST_OR_SWAMP", &FOREST_OR_SWAMP),
    ("FOREST_OR_MOUNTAIN", &FOREST_OR_MOUNTAIN),
    ("DESERT_OR_WATER", &DESERT_OR_WATER),
    ("DESERT_OR_SWAMP", &DESERT_OR_SWAMP),
    ("DESERT_OR_MOUNTAIN", &DESERT_OR_MOUNTAIN),
    ("WATER_OR_SWAMP", &WATER_OR_SWAMP),
    ("WATER_OR_MOUNTAIN", &WATER_OR_MOUNTAIN),
    ("SWAMP_OR_MOUNTAIN", &SWAMP_OR_MOUNTAIN),
    ("ONE_FROM_FOREST", &ONE_FROM_FOREST),
    ("ONE_FROM_DESERT", &ONE_FROM_DESERT),
    ("ONE_FROM_SWAMP", &ONE_FROM_SWAMP),
    ("ONE_FROM_MOUNTAIN", &ONE_FROM_MOUNTAIN),
    ("ONE_FROM_WATER", &ONE_FROM_WATER),
    ("ONE_FROM_ANIMAL", &ONE_FROM_ANIMAL),
    ("TWO_FROM_STANDING_STONE", &TWO_FROM_STANDING_STONE),
    ("TWO_FROM_ABANDONED_SHACK", &TWO_FROM_ABANDONED_SHACK),
    ("TWO_FROM_COUGAR", &TWO_FROM_COUGAR),
    ("TWO_FROM_BEAR", &TWO_FROM_BEAR),
    ("THREE_FROM_BLUE", &THREE_FROM_BLUE),
    ("THREE_FROM_WHITE", &THREE_FROM_WHITE),
    ("THREE_FROM_GREEN", &THREE_FROM_GREEN),
    ("THREE_FROM_BLACK", &THREE_FROM_BLACK),
];

/// Every clue in the catalogue, advanced-game clues included
pub fn all_clues() -> impl Iterator<Item = &'static Clue> {
    NAMED_CLUES.iter().map(|(_, clue)| &***clue)
}

/// The clues available in the standard six-structure game
pub fn base_clues() -> impl Iterator<Item = &'static Clue> {
    all_clues().filter(|clue| *clue != &*THREE_FROM_BLACK)
}

/// Look up a catalogue clue by its name, case-insensitively
pub fn by_name(name: &str) -> Option<&'static Clue> {
    NAMED_CLUES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, clue)| &***clue)
}

/// The catalogue name of a clue, if it has one
pub fn name_of(clue: &Clue) -> Option<&'static str> {
    NAMED_CLUES
        .iter()
        .find(|(_, candidate)| &***candidate == clue)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_has_24_distinct_clues() {
        let clues: std::collections::HashSet<&Clue> = all_clues().collect();
        assert_eq!(clues.len(), 24);
    }

    #[test]
    fn test_base_game_excludes_three_from_black() {
        let clues: Vec<&Clue> = base_clues().collect();
        assert_eq!(clues.len(), 23);
        assert!(!clues.contains(&&*THREE_FROM_BLACK));
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(by_name("TWO_FROM_BEAR"), Some(&*TWO_FROM_BEAR));
        assert_eq!(by_name("two_from_bear"), Some(&*TWO_FROM_BEAR));
        assert_eq!(by_name("TWO_FROM_YETI"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for clue in all_clues() {
            let name = name_of(clue).expect("catalogue clue has a name");
            assert_eq!(by_name(name), Some(clue));
        }
    }

    #[test]
    fn test_no_catalogue_clue_is_inverted() {
        assert!(all_clues().all(|clue| !clue.is_inverted()));
    }
}
