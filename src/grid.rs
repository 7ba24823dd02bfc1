use std::fmt;

use error_chain::bail;
use log::trace;

use crate::cells::{Cell, CoordinateOptionSmallVec, CoordinateSmallVec, Direction, GridCoordinate};
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// A fixed size rectangle of cells, addressed in row major order.
///
/// Every wall starts present. Carving removes walls in symmetric pairs so that the wall
/// state seen from either side of a shared edge always agrees.
#[derive(Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    columns: usize,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveError {
    InvalidGridCoordinate,
    NotAdjacent,
    NotOnBoundary,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, links: {:?}, checkpoints: {:?}",
               self.rows, self.columns, self.links_count(), self.checkpoints_remaining())
    }
}

impl Grid {
    /// Creates a fully enclosed grid.
    ///
    /// Zero rows or zero columns is a configuration error.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        if rows == 0 || columns == 0 {
            bail!(ErrorKind::InvalidDimensions(rows, columns));
        }

        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(Cell::new(row, col));
            }
        }

        Ok(Grid { cells, rows, columns })
    }

    /// Put every cell back to its freshly constructed state.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::new(cell.row(), cell.col());
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Node count and an upper bound on the passages a grid of this size can hold.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let internal_edges = self.rows * (self.columns - 1) + self.columns * (self.rows - 1);
        (NodesCount(self.size()), EdgesCount(internal_edges))
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub(crate) fn cell_at_index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// The cell every maze is generated from and every player starts on.
    #[inline]
    pub fn start_coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// The corner opposite the start.
    #[inline]
    pub fn goal_coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(self.rows as isize - 1, self.columns as isize - 1)
    }

    /// Is the grid coordinate within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row >= 0 && coord.col >= 0 && (coord.row as usize) < self.rows &&
        (coord.col as usize) < self.columns
    }

    /// Row major index of a coordinate: `row * columns + col`.
    ///
    /// Only meaningful for valid coordinates, check with `is_valid_coordinate` first
    /// or use `grid_coordinate_to_index`.
    #[inline]
    pub fn index(&self, coord: GridCoordinate) -> usize {
        debug_assert!(self.is_valid_coordinate(coord), "invalid coordinate {}", coord);
        coord.row as usize * self.columns + coord.col as usize
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(self.index(coord))
        } else {
            None
        }
    }

    #[inline]
    pub fn coordinate_of(&self, index: usize) -> GridCoordinate {
        index_to_grid_coordinate(self.columns, index)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: Direction)
                                  -> Option<GridCoordinate> {
        let neighbour_coord = coord.offset(direction);
        if self.is_valid_coordinate(neighbour_coord) {
            Some(neighbour_coord)
        } else {
            None
        }
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[Direction])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    /// Cells that are Up, Right, Down or Left of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Cells that are linked to a particular cell by a carved passage.
    /// Returns None for an invalid coordinate.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        let cell = self.cell(coord)?;
        let linked = Direction::ALL
            .iter()
            .filter(|dir| !cell.has_wall(**dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect();
        Some(linked)
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (self.cell(a), self.cell(b), Direction::between(a, b)) {
            (Some(a_cell), Some(_), Some(direction)) => !a_cell.has_wall(direction),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Number of carved passages between two cells of the grid.
    /// Openings in the outer boundary are not counted, see `boundary_openings`.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every carved passage between two cells, each reported once from its upper or left end.
    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            grid: self,
            cell_index: 0,
            direction_index: 0,
        }
    }

    /// Border walls that have been removed, as (cell, outward direction) pairs.
    pub fn boundary_openings(&self) -> Vec<(GridCoordinate, Direction)> {
        let mut openings = vec![];
        for cell in &self.cells {
            let coord = cell.coordinate();
            for dir in Direction::ALL.iter() {
                if !cell.has_wall(*dir) && self.neighbour_at_direction(coord, *dir).is_none() {
                    openings.push((coord, *dir));
                }
            }
        }
        openings
    }

    /// Remove the wall between two adjacent cells, on both sides.
    pub fn carve(&mut self, a: GridCoordinate, b: GridCoordinate) -> ::std::result::Result<(), CarveError> {
        let a_index = self.grid_coordinate_to_index(a).ok_or(CarveError::InvalidGridCoordinate)?;
        let b_index = self.grid_coordinate_to_index(b).ok_or(CarveError::InvalidGridCoordinate)?;
        let direction = Direction::between(a, b).ok_or(CarveError::NotAdjacent)?;
        self.open_passage(a_index, b_index, direction);
        Ok(())
    }

    /// Remove the outward facing wall of a cell on the edge of the grid.
    /// There is no cell on the other side, so only one flag changes.
    pub fn carve_boundary(&mut self,
                          coord: GridCoordinate,
                          direction: Direction)
                          -> ::std::result::Result<(), CarveError> {
        let index = self.grid_coordinate_to_index(coord).ok_or(CarveError::InvalidGridCoordinate)?;
        if self.neighbour_at_direction(coord, direction).is_some() {
            return Err(CarveError::NotOnBoundary);
        }
        self.open_boundary(index, direction);
        Ok(())
    }

    /// The cell at `index` must have no neighbour in `direction`.
    pub(crate) fn open_boundary(&mut self, index: usize, direction: Direction) {
        trace!("opening boundary wall {:?} of {}", direction, self.coordinate_of(index));
        self.cells[index].walls.remove(direction);
    }

    /// `b` must be the neighbour of `a` in `direction`.
    pub(crate) fn open_passage(&mut self, a_index: usize, b_index: usize, direction: Direction) {
        trace!("carving {:?} from {} to {}",
               direction, self.coordinate_of(a_index), self.coordinate_of(b_index));
        self.cells[a_index].walls.remove(direction);
        self.cells[b_index].walls.remove(direction.opposite());
    }

    /// Is there a wall on the given side of a cell?
    ///
    /// Anything off the grid is solid: every direction reports a wall.
    pub fn is_wall(&self, coord: GridCoordinate, direction: Direction) -> bool {
        self.cell(coord).map_or(true, |cell| cell.has_wall(direction))
    }

    /// Off grid coordinates never hold a checkpoint.
    pub fn is_checkpoint(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).map_or(false, Cell::is_checkpoint)
    }

    /// Clear a checkpoint once it has been resolved. Does nothing if there is no checkpoint
    /// at the coordinate or the coordinate is off the grid.
    pub fn remove_checkpoint(&mut self, coord: GridCoordinate) {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.cells[index].checkpoint = false;
        }
    }

    pub fn checkpoints(&self) -> Vec<GridCoordinate> {
        self.cells
            .iter()
            .filter(|cell| cell.is_checkpoint())
            .map(Cell::coordinate)
            .collect()
    }

    pub fn checkpoints_remaining(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_checkpoint()).count()
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns,
            cells_count: self.size(),
        }
    }
}

// Converting the Grid into an iterator (CellIter - the default most sensible)
impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(self.columns, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

pub struct LinksIter<'a> {
    grid: &'a Grid,
    cell_index: usize,
    direction_index: usize,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        // Only look Right and Down so each shared edge is reported once.
        const FORWARD: [Direction; 2] = [Direction::Right, Direction::Down];

        while self.cell_index < self.grid.size() {
            let cell = &self.grid.cells[self.cell_index];
            while self.direction_index < FORWARD.len() {
                let dir = FORWARD[self.direction_index];
                self.direction_index += 1;
                if !cell.has_wall(dir) {
                    if let Some(neighbour) = self.grid.neighbour_at_direction(cell.coordinate(), dir) {
                        return Some((cell.coordinate(), neighbour));
                    }
                }
            }
            self.cell_index += 1;
            self.direction_index = 0;
        }
        None
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: cell_index: {:?}, direction_index: {:?}",
               self.cell_index, self.direction_index)
    }
}

fn index_to_grid_coordinate(columns: usize, one_dimensional_index: usize) -> GridCoordinate {
    let row = one_dimensional_index / columns;
    let col = one_dimensional_index - (row * columns);
    GridCoordinate::new(row as isize, col as isize)
}
