//! Interactive Cryptid solver.
//!
//! Reads the game setup from command-line flags, then runs a line-oriented
//! command loop against the deduction engine:
//!
//! ```text
//! place c 3 4       place a cube for the acting player
//! place d 3 4       place a disk for the acting player
//! possible clues    list each player's surviving candidate clues
//! location prob     print the hidden-tile probability distribution
//! question          recommend the most informative question
//! best cube         recommend the least revealing cube placement
//! quit              exit
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cryptid_core::{
    best_cube_placement, best_question, catalogue, Game, Player, PlayerColor, Structure,
    StructureColor, StructureShape,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Interactive Cryptid solver")]
struct Cli {
    /// Map layout as six pieces, columnar from the top left, e.g. 3N 1S 5S 4S 2N 6S
    #[arg(long = "map", num_args = 6, required = true)]
    map: Vec<String>,

    /// Players in turn order as 'color' or 'color=CLUE_NAME', e.g. red=TWO_FROM_BEAR cyan
    #[arg(long = "player", required = true)]
    players: Vec<String>,

    /// Structures as 'color_shape_x,y', e.g. green_stone_12,2 (six or eight of them)
    #[arg(long = "structure", required = true)]
    structures: Vec<String>,

    /// Emit the probability distribution as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn parse_player(input: &str) -> Result<Player> {
    let (color, clue) = match input.split_once('=') {
        Some((color, clue_name)) => {
            let clue = catalogue::by_name(clue_name)
                .ok_or_else(|| anyhow!("unknown clue '{clue_name}'"))?;
            (color, Some(clue.clone()))
        }
        None => (input, None),
    };

    let color: PlayerColor = color
        .parse()
        .with_context(|| format!("bad player '{input}'"))?;
    Ok(match clue {
        Some(clue) => Player::with_clue(color, clue),
        None => Player::new(color),
    })
}

fn parse_structure(input: &str) -> Result<Structure> {
    let parts: Vec<&str> = input.splitn(3, '_').collect();
    let [color, shape, location] = parts.as_slice() else {
        bail!("bad structure '{input}', expected color_shape_x,y");
    };

    let color: StructureColor = color
        .parse()
        .with_context(|| format!("bad structure '{input}'"))?;
    let shape: StructureShape = shape
        .parse()
        .with_context(|| format!("bad structure '{input}'"))?;

    let (x, y) = location
        .split_once(',')
        .ok_or_else(|| anyhow!("bad structure location in '{input}'"))?;
    let x: i32 = x.trim().parse().context("structure x coordinate")?;
    let y: i32 = y.trim().parse().context("structure y coordinate")?;

    Ok(Structure::new(color, shape, x, y)?)
}

#[derive(Serialize)]
struct LocationProbability {
    x: i32,
    y: i32,
    biome: String,
    probability: f64,
}

fn print_distribution(game: &Game, as_json: bool) -> Result<()> {
    let distribution = game.possible_tiles()?;

    let mut locations: Vec<LocationProbability> = distribution
        .iter()
        .map(|(tile, probability)| LocationProbability {
            x: tile.pos.x,
            y: tile.pos.y,
            biome: tile.biome.to_string(),
            probability: *probability,
        })
        .collect();
    locations.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .expect("probabilities are finite")
            .then_with(|| (a.x, a.y).cmp(&(b.x, b.y)))
    });

    if as_json {
        println!("{}", serde_json::to_string_pretty(&locations)?);
        return Ok(());
    }

    if locations.is_empty() {
        println!("No location can be pinned down yet.");
        return Ok(());
    }
    for location in locations {
        println!(
            "({:>2}, {}) {:9} {:.3}",
            location.x, location.y, location.biome, location.probability
        );
    }
    Ok(())
}

fn run_command(game: &mut Game, line: &str, as_json: bool) -> Result<bool> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["place", kind @ ("c" | "d"), x, y] => {
            let x: i32 = x.parse().context("x coordinate")?;
            let y: i32 = y.parse().context("y coordinate")?;
            let (player, tile) = if *kind == "c" {
                game.place_cube(x, y)?
            } else {
                game.place_disk(x, y)?
            };
            let token = if *kind == "c" { "cube" } else { "disk" };
            println!("{player} placed {token} on {tile}");
        }
        ["possible", "clues"] => {
            for player in game.players() {
                println!("{player}'s possible clues");
                println!("----------");
                let mut clues: Vec<String> = player
                    .possible_clues(game.board())?
                    .iter()
                    .map(|clue| match catalogue::name_of(clue) {
                        Some(name) => format!("{name} ({clue})"),
                        None => clue.to_string(),
                    })
                    .collect();
                clues.sort();
                for clue in clues {
                    println!("{clue}");
                }
                println!();
            }
        }
        ["location", "prob"] => print_distribution(game, as_json)?,
        ["question"] => {
            let question = best_question(game)?;
            println!(
                "Ask the {} player about {} (expected fitness {:.3})",
                question.player, question.pos, question.fitness
            );
        }
        ["best", "cube"] => {
            let placement = best_cube_placement(game)?;
            println!(
                "Place your cube on {} (eliminates {} candidate clues)",
                placement.pos, placement.eliminated
            );
        }
        ["quit"] | ["exit"] => return Ok(false),
        _ => {
            println!(
                "Did not quite catch that. Use one of:\n\
                 - place [c/d] x y : place a cube or disk for the acting player\n\
                 - possible clues  : list every player's surviving clues\n\
                 - location prob   : print the hidden-tile distribution\n\
                 - question        : recommend the best question to ask\n\
                 - best cube       : recommend the least revealing cube\n\
                 - quit            : exit"
            );
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let players = cli
        .players
        .iter()
        .map(|p| parse_player(p))
        .collect::<Result<Vec<_>>>()?;
    let structures = cli
        .structures
        .iter()
        .map(|s| parse_structure(s))
        .collect::<Result<Vec<_>>>()?;
    let layout: Vec<&str> = cli.map.iter().map(String::as_str).collect();

    let mut game = Game::new(&layout, players, &structures)?;
    info!(
        players = game.players().len(),
        mode = ?game.board().mode(),
        "game ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim().to_ascii_lowercase();
        if line.is_empty() {
            continue;
        }

        match run_command(&mut game, &line, cli.json) {
            Ok(true) => {}
            Ok(false) => break,
            // Domain errors (occupied tile, unsupported inference) are
            // reported and the loop continues.
            Err(error) => println!("error: {error}"),
        }
    }

    info!("session over after {} turns", game.tick());
    Ok(())
}
