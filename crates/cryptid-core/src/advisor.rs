//! Action recommendation heuristics.
//!
//! Two kinds of advice:
//! - where the acting player should put their own forced cube so it leaks
//!   as little as possible about their clue, and
//! - which (opponent, tile) question is expected to shrink the candidate
//!   location space the most.
//!
//! Both scans evaluate hypothetical placements reversibly: cube scoring
//! runs on a disposable copy of the acting player, question scoring
//! brackets each candidate with an append/remove on the real game state so
//! nothing observable survives the evaluation.

use crate::board::Tile;
use crate::game::{Game, GameError, TokenKind};
use crate::hex::Position;
use crate::player::PlayerColor;
use rustc_hash::FxHashSet;

/// Sentinel for degenerate post-answer states: nothing left, or a single
/// surviving combination that still cannot name the tile.
pub const DEGENERATE_FITNESS: f64 = -1_000_000.0;

/// A recommended cube placement for the acting player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubePlacement {
    pub pos: Position,
    /// Candidate clues the placement would eliminate from the acting
    /// player's possibility set
    pub eliminated: usize,
}

/// A recommended question to an opponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub player: PlayerColor,
    pub pos: Position,
    /// Expected fitness of the solution state, averaged over both answers
    pub fitness: f64,
}

/// Score a solution state by how close it is to naming the hidden tile.
///
/// Zero means solved (exactly one candidate location). Otherwise fewer
/// locations score higher, and more surviving combinations for the same
/// location count score lower. Collapsed or contradictory states get the
/// [`DEGENERATE_FITNESS`] sentinel.
pub fn fitness(n_locations: usize, n_combinations: u64) -> f64 {
    if n_locations == 1 {
        return 0.0;
    }
    if n_locations == 0 || n_combinations == 0 {
        return DEGENERATE_FITNESS;
    }
    if n_combinations == 1 {
        return DEGENERATE_FITNESS;
    }
    (1.0 - n_locations as f64) * (n_combinations as f64).sqrt()
}

/// The cube placement that tells opponents the least.
///
/// The acting player must place a cube unaided, so the advisor proposes
/// the placement eliminating the fewest clues from the acting player's own
/// possibility set. Tiles already holding any cube are skipped; ties go to
/// the first candidate in board scan order.
pub fn best_cube_placement(game: &Game) -> Result<CubePlacement, GameError> {
    let board = game.board();
    let acting = game.current_player();
    let before = acting.possible_clues(board)?.len();
    let occupied = cube_positions(game);

    let mut best: Option<CubePlacement> = None;
    for tile in board.tiles() {
        if occupied.contains(&tile.pos) {
            continue;
        }

        let hypothetical = acting.with_cube(tile.pos);
        let after = hypothetical.possible_clues(board)?.len();
        let eliminated = before - after;

        if best.is_none_or(|b| eliminated < b.eliminated) {
            best = Some(CubePlacement {
                pos: tile.pos,
                eliminated,
            });
        }
    }

    best.ok_or(GameError::NoPlacementCandidate)
}

/// The question expected to shrink the solution space the most.
///
/// Every opponent with an unknown clue is a candidate target; for each
/// cube-free tile the advisor imagines both answers - a cube for "no", a
/// disk for "yes" - recomputes the location distribution under each, and
/// averages their fitness. Returns the (player, tile) pair with the
/// highest average; ties go to the earliest candidate.
pub fn best_question(game: &mut Game) -> Result<Question, GameError> {
    let acting = game.current_player_index();
    let occupied = cube_positions(game);
    let positions: Vec<Position> = game.board().tiles().map(|tile| tile.pos).collect();

    let mut best: Option<Question> = None;
    for index in 0..game.players().len() {
        let player = &game.players()[index];
        if index == acting || player.clue.is_some() {
            continue;
        }
        let color = player.color;

        for &pos in &positions {
            if occupied.contains(&pos) {
                continue;
            }

            let no_answer =
                game.with_hypothetical_token(index, TokenKind::Cube, pos, Game::tile_votes)?;
            let yes_answer =
                game.with_hypothetical_token(index, TokenKind::Disk, pos, Game::tile_votes)?;

            let average = (state_fitness(no_answer) + state_fitness(yes_answer)) / 2.0;
            if best.is_none_or(|b| average > b.fitness) {
                best = Some(Question {
                    player: color,
                    pos,
                    fitness: average,
                });
            }
        }
    }

    best.ok_or(GameError::NoEligibleOpponent)
}

fn state_fitness((votes, total): (rustc_hash::FxHashMap<Tile, u32>, u64)) -> f64 {
    fitness(votes.len(), total)
}

fn cube_positions(game: &Game) -> FxHashSet<Position> {
    game.players()
        .iter()
        .flat_map(|player| player.cubes.iter().copied())
        .collect()
}
