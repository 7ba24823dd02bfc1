use std::fmt;

use smallvec::SmallVec;

/// Position of a cell on the grid.
///
/// The components are signed so that probes off the grid (e.g. one step left of column 0)
/// can be expressed and answered.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: isize,
    pub col: isize,
}

impl GridCoordinate {
    pub fn new(row: isize, col: isize) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    /// The coordinate one step away in the given direction. May lie outside any grid.
    #[inline]
    pub fn offset(&self, direction: Direction) -> GridCoordinate {
        let (d_row, d_col) = direction.delta();
        GridCoordinate::new(self.row.wrapping_add(d_row), self.col.wrapping_add(d_col))
    }
}

impl From<(isize, isize)> for GridCoordinate {
    fn from(row_col_pair: (isize, isize)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

/// The four sides of a square cell, in the fixed order used to address its walls.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// (row delta, column delta) of a single step in this direction.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// The direction leading from `a` to an adjacent `b`, decided by the sign of the row
    /// and column deltas. None if the cells are not orthogonally adjacent.
    pub fn between(a: GridCoordinate, b: GridCoordinate) -> Option<Direction> {
        let d_col = b.col.wrapping_sub(a.col);
        let d_row = b.row.wrapping_sub(a.row);
        match (d_row, d_col) {
            (0, 1) => Some(Direction::Right),
            (0, -1) => Some(Direction::Left),
            (1, 0) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Up),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The walls standing around one cell, as a 4 bit set addressed by `Direction`.
#[derive(Hash, Eq, PartialEq, Copy, Clone)]
pub struct Walls(u8);

impl Walls {
    pub const ALL: Walls = Walls(0b1111);
    pub const NONE: Walls = Walls(0);

    #[inline]
    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    #[inline]
    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> {
        let walls = *self;
        Direction::ALL.iter().cloned().filter(move |dir| walls.contains(*dir))
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::ALL
    }
}

impl fmt::Debug for Walls {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One position of the maze.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    row: usize,
    col: usize,
    pub(crate) visited: bool,
    pub(crate) walls: Walls,
    pub(crate) checkpoint: bool,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            visited: false,
            walls: Walls::ALL,
            checkpoint: false,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(self.row as isize, self.col as isize)
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction)
    }

    #[inline]
    pub fn is_checkpoint(&self) -> bool {
        self.checkpoint
    }
}
