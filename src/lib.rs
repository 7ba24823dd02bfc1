//! **theseus** generates perfect mazes with an exit and checkpoints, and answers the wall and
//! checkpoint queries a game session needs as the player moves.

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod maze;
pub mod pathing;
pub mod units;
mod utils;

pub use crate::cells::{Direction, GridCoordinate};
pub use crate::config::MazeConfig;
pub use crate::generators::{CheckpointPlacement, Exit, MazeGenerator};
pub use crate::grid::Grid;
pub use crate::maze::Maze;
