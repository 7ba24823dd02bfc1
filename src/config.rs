use error_chain::bail;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::CheckpointPlacement;

pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLUMNS: usize = 40;

/// The checkpoint layout of the classic 30 x 40 maze, as (row, column) pairs.
pub const CLASSIC_CHECKPOINTS: [(isize, isize); 7] =
    [(8, 22), (13, 15), (7, 0), (15, 7), (29, 11), (21, 39), (22, 27)];

pub fn classic_checkpoints() -> CheckpointPlacement {
    CheckpointPlacement::Fixed(CLASSIC_CHECKPOINTS.iter()
                                                  .cloned()
                                                  .map(GridCoordinate::from)
                                                  .collect())
}

/// Everything the host chooses about a maze before it is generated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    pub checkpoints: CheckpointPlacement,
    /// None draws a fresh seed for every maze.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            checkpoints: classic_checkpoints(),
            seed: None,
        }
    }
}

impl MazeConfig {
    /// A grid of the given size with no checkpoints.
    pub fn new(rows: usize, columns: usize) -> MazeConfig {
        MazeConfig {
            rows,
            columns,
            checkpoints: CheckpointPlacement::None,
            seed: None,
        }
    }

    pub fn with_checkpoints(mut self, checkpoints: CheckpointPlacement) -> MazeConfig {
        self.checkpoints = checkpoints;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> MazeConfig {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration can produce a maze, before any generation work starts.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            bail!(ErrorKind::InvalidDimensions(self.rows, self.columns));
        }

        let start = GridCoordinate::new(0, 0);
        let goal = GridCoordinate::new(self.rows as isize - 1, self.columns as isize - 1);

        match self.checkpoints {
            CheckpointPlacement::None => {}

            CheckpointPlacement::Fixed(ref positions) => {
                let bad_position = positions.iter().find(|coord| {
                    coord.row < 0 || coord.col < 0 || coord.row as usize >= self.rows ||
                    coord.col as usize >= self.columns || **coord == start ||
                    **coord == goal
                });
                if let Some(coord) = bad_position {
                    bail!(ErrorKind::InvalidCheckpoint(coord.row, coord.col));
                }
            }

            CheckpointPlacement::Random { count } => {
                let reserved = if start == goal { 1 } else { 2 };
                let available = self.rows * self.columns - reserved;
                if count > available {
                    bail!(ErrorKind::TooManyCheckpoints(count, available));
                }
            }
        }

        Ok(())
    }
}
