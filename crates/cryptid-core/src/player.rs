//! Player state: identity, known clue and placed tokens.
//!
//! Cubes mark tiles a player's clue rejects, disks mark tiles it accepts.
//! Token lists only grow during real play; the advisor evaluates "what if"
//! placements on disposable copies (see [`Player::with_cube`]) or through
//! the scoped hypothesis helper on `Game`.

use crate::board::{Board, GameMode};
use crate::catalogue;
use crate::clue::Clue;
use crate::game::GameError;
use crate::hex::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Player identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Orange,
    Cyan,
    Purple,
    Green,
}

impl FromStr for PlayerColor {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(PlayerColor::Red),
            "orange" => Ok(PlayerColor::Orange),
            "cyan" => Ok(PlayerColor::Cyan),
            "purple" => Ok(PlayerColor::Purple),
            "green" => Ok(PlayerColor::Green),
            _ => Err(GameError::UnknownPlayerColor(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerColor::Red => "Red",
            PlayerColor::Orange => "Orange",
            PlayerColor::Cyan => "Cyan",
            PlayerColor::Purple => "Purple",
            PlayerColor::Green => "Green",
        };
        write!(f, "{name}")
    }
}

/// One player's visible state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub color: PlayerColor,
    /// The player's clue when it is known to the solver
    pub clue: Option<Clue>,
    /// Placed rejection tokens, in placement order
    pub cubes: Vec<Position>,
    /// Placed acceptance tokens, in placement order
    pub disks: Vec<Position>,
}

impl Player {
    /// A player whose clue is unknown
    pub fn new(color: PlayerColor) -> Self {
        Self {
            color,
            clue: None,
            cubes: Vec::new(),
            disks: Vec::new(),
        }
    }

    /// A player whose clue the solver knows
    pub fn with_clue(color: PlayerColor, clue: Clue) -> Self {
        Self {
            clue: Some(clue),
            ..Self::new(color)
        }
    }

    /// The catalogue clues consistent with this player's placed tokens.
    ///
    /// A clue is retained when it accepts every disk tile and rejects every
    /// cube tile. The candidates are the base catalogue, or just the known
    /// clue when there is one - so a known-clue player with honestly placed
    /// tokens always yields a singleton. With no tokens and no known clue
    /// this is the whole base catalogue.
    ///
    /// Advanced-game inference would have to consider inverted counterparts
    /// of every clue and is not supported.
    pub fn possible_clues(&self, board: &Board) -> Result<HashSet<Clue>, GameError> {
        if board.mode() == GameMode::Advanced {
            return Err(GameError::InvertedCluesUnsupported);
        }

        let candidates: Vec<&Clue> = match &self.clue {
            Some(clue) => vec![clue],
            None => catalogue::base_clues().collect(),
        };

        Ok(candidates
            .into_iter()
            .filter(|clue| self.tokens_consistent_with(clue, board))
            .cloned()
            .collect())
    }

    fn tokens_consistent_with(&self, clue: &Clue, board: &Board) -> bool {
        let accepted = clue.accepted_tiles(board);

        self.disks
            .iter()
            .all(|pos| board.tile(*pos).is_some_and(|tile| accepted.contains(tile)))
            && self
                .cubes
                .iter()
                .all(|pos| !board.tile(*pos).is_some_and(|tile| accepted.contains(tile)))
    }

    /// A disposable copy of this player with one extra cube
    pub fn with_cube(&self, pos: Position) -> Player {
        let mut hypothetical = self.clone();
        hypothetical.cubes.push(pos);
        hypothetical
    }

    /// A disposable copy of this player with one extra disk
    pub fn with_disk(&self, pos: Position) -> Player {
        let mut hypothetical = self.clone();
        hypothetical.disks.push(pos);
        hypothetical
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} player", self.color)
    }
}
