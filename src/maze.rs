use log::info;
use rand::Rng;

use crate::cells::{Direction, GridCoordinate};
use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators::{Exit, MazeGenerator};
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

/// A generated maze as owned by one game session.
///
/// After generation only the checkpoints change, as the player resolves them.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    exit: Exit,
    seed: u64,
}

impl Maze {
    /// Validate the configuration, then build and generate the maze.
    ///
    /// Without a configured seed a fresh one is drawn; `seed()` reports it so the maze can be
    /// reproduced.
    pub fn new(config: &MazeConfig) -> Result<Maze> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut grid = Grid::new(RowsCount(config.rows), ColumnsCount(config.columns))?;
        let generation = MazeGenerator::from_seed(seed)
            .with_checkpoints(config.checkpoints.clone())
            .generate(&mut grid);

        info!("maze {} x {} from seed {}, exit {:?} at {}",
              config.rows, config.columns, seed, generation.exit.direction,
              generation.exit.coordinate);

        Ok(Maze {
            grid,
            exit: generation.exit,
            seed,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn exit(&self) -> Exit {
        self.exit
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.grid.start_coordinate()
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.grid.goal_coordinate()
    }

    #[inline]
    pub fn is_goal(&self, coord: GridCoordinate) -> bool {
        coord == self.goal()
    }

    #[inline]
    pub fn is_wall(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.grid.is_wall(coord, direction)
    }

    #[inline]
    pub fn is_checkpoint(&self, coord: GridCoordinate) -> bool {
        self.grid.is_checkpoint(coord)
    }

    #[inline]
    pub fn remove_checkpoint(&mut self, coord: GridCoordinate) {
        self.grid.remove_checkpoint(coord)
    }

    pub fn checkpoints(&self) -> Vec<GridCoordinate> {
        self.grid.checkpoints()
    }
}
