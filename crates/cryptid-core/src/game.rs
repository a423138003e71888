//! Game state and the combinatorial location solver.
//!
//! `Game` owns the board, the seated players and the turn counter, and is
//! the only place turn progression happens. Its heavy operation is
//! [`Game::possible_tiles`]: the cross-player enumeration of clue
//! combinations that fuses everyone's uncertainty into a probability
//! distribution over the hidden tile.

use crate::board::{Board, BoardError, Structure, Tile};
use crate::clue::TileSet;
use crate::hex::Position;
use crate::player::Player;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised by game operations
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("a cube already occupies ({x}, {y})")]
    CubeOccupied { x: i32, y: i32 },

    #[error("coordinates ({x}, {y}) are outside the map")]
    OutOfBounds { x: i32, y: i32 },

    #[error("inverted-clue inference is not supported")]
    InvertedCluesUnsupported,

    #[error("unrecognized player color '{0}'")]
    UnknownPlayerColor(String),

    #[error("no opponent with an unknown clue to question")]
    NoEligibleOpponent,

    #[error("no free tile to place a cube on")]
    NoPlacementCandidate,
}

/// The two token kinds a player can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Rejection marker
    Cube,
    /// Acceptance marker
    Disk,
}

/// A running game: seated players, the assembled board and the turn counter.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    board: Board,
    tick: u32,
}

impl Game {
    /// Start a game on a board assembled from the given layout and
    /// structures. Player order is turn order.
    pub fn new(
        layout: &[&str],
        players: Vec<Player>,
        structures: &[Structure],
    ) -> Result<Self, GameError> {
        let board = Board::new(layout, structures)?;
        Ok(Self {
            players,
            board,
            tick: 0,
        })
    }

    // ==================== Query Methods ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Turns played so far
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn current_player_index(&self) -> usize {
        self.tick as usize % self.players.len()
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index()]
    }

    /// Whether a cube may be placed at the position. Cubes are rejected on
    /// tiles that already hold a cube from any player.
    pub fn accepts_cube(&self, x: i32, y: i32) -> bool {
        let pos = Position::new(x, y);
        self.players
            .iter()
            .all(|player| !player.cubes.contains(&pos))
    }

    // ==================== Placement ====================

    /// Place a cube for the acting player and advance the turn.
    ///
    /// Fails without advancing the turn when the coordinates are off the
    /// map or any player already has a cube there.
    pub fn place_cube(&mut self, x: i32, y: i32) -> Result<(&Player, Tile), GameError> {
        let pos = Position::new(x, y);
        let tile = *self
            .board
            .tile(pos)
            .ok_or(GameError::OutOfBounds { x, y })?;
        if !self.accepts_cube(x, y) {
            return Err(GameError::CubeOccupied { x, y });
        }

        let index = self.current_player_index();
        self.players[index].cubes.push(pos);
        self.tick += 1;
        Ok((&self.players[index], tile))
    }

    /// Place a disk for the acting player and advance the turn.
    ///
    /// Always succeeds for in-bounds coordinates.
    pub fn place_disk(&mut self, x: i32, y: i32) -> Result<(&Player, Tile), GameError> {
        let pos = Position::new(x, y);
        let tile = *self
            .board
            .tile(pos)
            .ok_or(GameError::OutOfBounds { x, y })?;

        let index = self.current_player_index();
        self.players[index].disks.push(pos);
        self.tick += 1;
        Ok((&self.players[index], tile))
    }

    /// Run `eval` with one hypothetical token appended to a player's list,
    /// removing it again before returning.
    ///
    /// The append/remove pair brackets the evaluation even when `eval`
    /// returns an error value, so a candidate scan can never leave a
    /// hypothesis behind. Does not touch the turn counter.
    pub fn with_hypothetical_token<R>(
        &mut self,
        player_index: usize,
        token: TokenKind,
        pos: Position,
        eval: impl FnOnce(&Game) -> R,
    ) -> R {
        match token {
            TokenKind::Cube => self.players[player_index].cubes.push(pos),
            TokenKind::Disk => self.players[player_index].disks.push(pos),
        }

        let result = eval(self);

        match token {
            TokenKind::Cube => {
                self.players[player_index].cubes.pop();
            }
            TokenKind::Disk => {
                self.players[player_index].disks.pop();
            }
        }

        result
    }

    // ==================== Location Inference ====================

    /// Vote counts over candidate hidden-tile locations.
    ///
    /// Enumerates the Cartesian product of every player's clue-possibility
    /// set; each combination whose accepted-tile intersection is exactly
    /// one tile casts a vote for that tile. Also returns the total number
    /// of voting combinations. Cost is multiplicative in the possibility
    /// set sizes, so branches whose partial intersection is already empty
    /// are pruned without expanding the remaining players.
    pub fn tile_votes(&self) -> Result<(FxHashMap<Tile, u32>, u64), GameError> {
        let mut clue_sets: Vec<Vec<Rc<TileSet>>> = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let clues = player.possible_clues(&self.board)?;
            clue_sets.push(
                clues
                    .iter()
                    .map(|clue| clue.accepted_tiles(&self.board))
                    .collect(),
            );
        }

        let all_tiles: TileSet = self.board.tiles().copied().collect();
        let mut votes = FxHashMap::default();
        let mut total = 0;
        count_votes(&clue_sets, all_tiles, &mut votes, &mut total);
        Ok((votes, total))
    }

    /// Probability distribution over the hidden tile's location.
    ///
    /// Vote counts normalized by the number of voting combinations. Tiles
    /// without votes are absent. An empty map is a valid state: not enough
    /// information yet, not a failure.
    pub fn possible_tiles(&self) -> Result<HashMap<Tile, f64>, GameError> {
        let (votes, total) = self.tile_votes()?;
        Ok(votes
            .into_iter()
            .map(|(tile, count)| (tile, f64::from(count) / total as f64))
            .collect())
    }
}

/// Walk the clue-combination tree, intersecting accepted-tile sets along
/// the way and pruning any branch whose running intersection is empty.
fn count_votes(
    remaining: &[Vec<Rc<TileSet>>],
    current: TileSet,
    votes: &mut FxHashMap<Tile, u32>,
    total: &mut u64,
) {
    if current.is_empty() {
        return;
    }

    match remaining.split_first() {
        None => {
            if current.len() == 1 {
                let tile = *current.iter().next().expect("set has one element");
                *votes.entry(tile).or_insert(0) += 1;
                *total += 1;
            }
        }
        Some((choices, rest)) => {
            for accepted in choices {
                let narrowed: TileSet = current
                    .iter()
                    .filter(|tile| accepted.contains(*tile))
                    .copied()
                    .collect();
                count_votes(rest, narrowed, votes, total);
            }
        }
    }
}
