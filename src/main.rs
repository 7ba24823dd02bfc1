use docopt::Docopt;
use error_chain::bail;
use log::{debug, info};
use serde_derive::Deserialize;
use theseus::{
    cells::Direction,
    config::{self, MazeConfig},
    errors::*,
    generators::CheckpointPlacement,
    maze::Maze,
    pathing,
};

const USAGE: &str = "Theseus

Generates a maze and walks a headless player from the start to the goal, clearing every
checkpoint met on the way.

Usage:
    theseus_driver -h | --help
    theseus_driver [--rows=<r>] [--columns=<c>] [--seed=<s>] [--checkpoints=<n> | --classic]

Options:
    -h --help            Show this screen.
    --rows=<r>           Number of grid rows [default: 30].
    --columns=<c>        Number of grid columns [default: 40].
    --seed=<s>           Seed for the random source. A fresh seed is drawn when absent.
    --checkpoints=<n>    Place n checkpoints on random cells [default: 7].
    --classic            Use the classic fixed checkpoint layout, for 30 x 40 grids.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_checkpoints: usize,
    flag_classic: bool,
}

impl MazeArgs {
    fn maze_config(&self) -> MazeConfig {
        let checkpoints = if self.flag_classic {
            config::classic_checkpoints()
        } else {
            CheckpointPlacement::Random { count: self.flag_checkpoints }
        };
        let maze_config = MazeConfig::new(self.flag_rows, self.flag_columns).with_checkpoints(checkpoints);
        match self.flag_seed {
            Some(seed) => maze_config.with_seed(seed),
            None => maze_config,
        }
    }
}

/// What the walk from start to goal ran into.
#[derive(Debug, Default)]
struct WalkSummary {
    moves: usize,
    checkpoints_cleared: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let mut maze = Maze::new(&args.maze_config()).chain_err(|| "Failed to build the maze")?;
    let checkpoints_placed = maze.checkpoints().len();

    let summary = walk_to_goal(&mut maze)?;

    let exit = maze.exit();
    println!("seed: {}", maze.seed());
    println!("grid: {} x {}", maze.grid().rows().0, maze.grid().columns().0);
    println!("passages: {}", maze.grid().links_count());
    println!("exit: {:?} wall of {}", exit.direction, exit.coordinate);
    println!("moves from start to goal: {}", summary.moves);
    println!("checkpoints cleared on the way: {} of {}",
             summary.checkpoints_cleared, checkpoints_placed);
    println!("checkpoints remaining: {}", maze.checkpoints().len());

    Ok(())
}

/// Play the maze as a game session would: ask about the wall before every move and clear
/// any checkpoint stepped on, treating its challenge as passed.
fn walk_to_goal(maze: &mut Maze) -> Result<WalkSummary> {
    let distances = pathing::Distances::new(maze.grid(), maze.start())
        .ok_or("Start cell is not on the grid")?;
    let route = pathing::shortest_path(maze.grid(), &distances, maze.goal())
        .ok_or("The goal cannot be reached from the start")?;

    let mut summary = WalkSummary::default();
    let mut position = maze.start();

    for next in route.into_iter().skip(1) {
        let direction: Direction = Direction::between(position, next)
            .ok_or("Route steps between cells that are not adjacent")?;
        if maze.is_wall(position, direction) {
            bail!(format!("Walked into a wall going {:?} from {}", direction, position));
        }
        position = next;
        summary.moves += 1;

        if maze.is_checkpoint(position) {
            debug!("challenge at checkpoint {} passed", position);
            maze.remove_checkpoint(position);
            summary.checkpoints_cleared += 1;
        }
    }

    if maze.is_goal(position) {
        info!("goal reached after {} moves", summary.moves);
    }

    Ok(summary)
}
