//! Integration tests for the deduction engine.
//!
//! These tests run complete solver flows: seating players, placing tokens
//! through the game, fusing clue uncertainty into a location distribution
//! and asking the advisor for the next move.

use cryptid_core::*;

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

#[test]
fn four_player_session_narrows_to_a_single_tile() {
    let mut game = Game::new(
        &LAYOUT,
        vec![
            Player::with_clue(PlayerColor::Red, catalogue::ONE_FROM_ANIMAL.clone()),
            Player::new(PlayerColor::Cyan),
            Player::with_clue(PlayerColor::Orange, catalogue::DESERT_OR_SWAMP.clone()),
            Player::new(PlayerColor::Purple),
        ],
        &reference_structures(),
    )
    .unwrap();

    // One round of play
    let (player, _) = game.place_cube(11, 2).unwrap();
    assert_eq!(player.color, PlayerColor::Red);
    game.place_cube(1, 1).unwrap(); // cyan
    game.place_cube(12, 9).unwrap(); // orange
    let (player, tile) = game.place_disk(6, 1).unwrap(); // purple
    assert_eq!(player.color, PlayerColor::Purple);
    assert_eq!(tile.biome, Biome::Water);
    assert_eq!(game.tick(), 4);

    // Tokens narrowed the unknown players' candidate clues
    let cyan = &game.players()[1];
    assert_eq!(cyan.possible_clues(game.board()).unwrap().len(), 16);
    let purple = &game.players()[3];
    let purple_clues = purple.possible_clues(game.board()).unwrap();
    assert_eq!(purple_clues.len(), 11);
    assert!(purple_clues.contains(&*catalogue::WATER_OR_SWAMP));
    assert!(!purple_clues.contains(&*catalogue::ONE_FROM_DESERT));

    // Every surviving clue combination now points at the same tile
    let distribution = game.possible_tiles().unwrap();
    assert_eq!(distribution.len(), 1);
    let (tile, probability) = distribution.into_iter().next().unwrap();
    assert_eq!(tile.pos, Position::new(4, 4));
    assert_eq!(probability, 1.0);
}

#[test]
fn advisor_recommends_the_reference_question() {
    let mut game = Game::new(
        &LAYOUT,
        vec![
            Player::with_clue(PlayerColor::Red, catalogue::TWO_FROM_BEAR.clone()),
            Player::new(PlayerColor::Cyan),
            Player::new(PlayerColor::Purple),
        ],
        &reference_structures(),
    )
    .unwrap();

    let tick_before = game.tick();
    let tokens_before: Vec<(usize, usize)> = game
        .players()
        .iter()
        .map(|player| (player.cubes.len(), player.disks.len()))
        .collect();

    let question = best_question(&mut game).unwrap();

    assert_eq!(question.player, PlayerColor::Cyan);
    assert_eq!(question.pos, Position::new(10, 4));
    assert!(
        (question.fitness - (-8.717797887081348)).abs() < 1e-9,
        "unexpected fitness {}",
        question.fitness
    );

    // The candidate scan must leave no trace on the game
    assert_eq!(game.tick(), tick_before);
    let tokens_after: Vec<(usize, usize)> = game
        .players()
        .iter()
        .map(|player| (player.cubes.len(), player.disks.len()))
        .collect();
    assert_eq!(tokens_after, tokens_before);
}

#[test]
fn advisor_cube_recommendation_matches_reference() {
    let mut game = Game::new(
        &LAYOUT,
        vec![
            Player::with_clue(PlayerColor::Red, catalogue::TWO_FROM_BEAR.clone()),
            Player::new(PlayerColor::Cyan),
            Player::new(PlayerColor::Purple),
        ],
        &reference_structures(),
    )
    .unwrap();
    game.place_cube(1, 1).unwrap();

    let placement = best_cube_placement(&game).unwrap();
    assert_eq!(placement.pos, Position::new(2, 9));
    assert_eq!(placement.eliminated, 6);
}

#[test]
fn solver_reuses_the_accepted_tiles_cache() {
    let game = Game::new(
        &LAYOUT,
        vec![
            Player::with_clue(PlayerColor::Red, catalogue::TWO_FROM_BEAR.clone()),
            Player::new(PlayerColor::Cyan),
            Player::new(PlayerColor::Purple),
        ],
        &reference_structures(),
    )
    .unwrap();

    let first = game.possible_tiles().unwrap();
    let stats = game.board().cache_stats();
    // One evaluation per distinct clue at most; everything else is served
    // from the cache.
    assert!(stats.misses <= 24, "unexpected miss count {}", stats.misses);

    let second = game.possible_tiles().unwrap();
    let stats_after = game.board().cache_stats();
    assert_eq!(first.len(), second.len());
    assert_eq!(stats_after.misses, stats.misses);
    assert!(stats_after.hits > stats.hits);
}

#[test]
fn placement_errors_leave_the_game_untouched() {
    let mut game = Game::new(
        &LAYOUT,
        vec![
            Player::new(PlayerColor::Cyan),
            Player::new(PlayerColor::Purple),
        ],
        &reference_structures(),
    )
    .unwrap();

    game.place_cube(3, 3).unwrap();
    assert_eq!(game.tick(), 1);

    assert_eq!(
        game.place_cube(3, 3).unwrap_err(),
        GameError::CubeOccupied { x: 3, y: 3 }
    );
    assert_eq!(
        game.place_cube(0, 5).unwrap_err(),
        GameError::OutOfBounds { x: 0, y: 5 }
    );
    assert_eq!(game.tick(), 1);
    assert!(game.players()[1].cubes.is_empty());

    // A disk on the cubed tile is still legal
    game.place_disk(3, 3).unwrap();
    assert_eq!(game.tick(), 2);
}
