use itertools::Itertools;
use log::{debug, warn};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::cells::{Direction, GridCoordinate};
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

/// The single boundary wall removed after the maze is carved, letting the player out of the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Exit {
    pub coordinate: GridCoordinate,
    pub direction: Direction,
}

/// Where checkpoints go once the maze is carved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckpointPlacement {
    None,
    Fixed(Vec<GridCoordinate>),
    Random { count: usize },
}

impl Default for CheckpointPlacement {
    fn default() -> CheckpointPlacement {
        CheckpointPlacement::None
    }
}

/// What a generation pass produced besides the carved passages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Generation {
    pub exit: Exit,
    pub checkpoints: Vec<GridCoordinate>,
}

/// Carves a perfect maze, its exit and its checkpoints from one random source.
///
/// Two generators built with the same seed produce identical mazes on equally sized grids.
#[derive(Debug, Clone)]
pub struct MazeGenerator<R: Rng = XorShiftRng> {
    rng: R,
    checkpoints: CheckpointPlacement,
}

impl MazeGenerator<XorShiftRng> {
    pub fn from_seed(seed: u64) -> MazeGenerator<XorShiftRng> {
        MazeGenerator::new(XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(rng: R) -> MazeGenerator<R> {
        MazeGenerator {
            rng,
            checkpoints: CheckpointPlacement::None,
        }
    }

    pub fn with_checkpoints(mut self, placement: CheckpointPlacement) -> MazeGenerator<R> {
        self.checkpoints = placement;
        self
    }

    /// Run the whole generation pass over the grid.
    ///
    /// The grid is reset first, so any earlier carving or checkpoints are discarded.
    pub fn generate(&mut self, grid: &mut Grid) -> Generation {
        grid.reset();
        recursive_backtracker(grid, &mut self.rng);
        let exit = carve_exit(grid, &mut self.rng);
        let checkpoints = place_checkpoints(grid, &self.checkpoints, &mut self.rng);

        debug!("generated {:?} x {:?} maze: {} passages, exit {:?} at {}, {} checkpoints",
               grid.rows().0, grid.columns().0, grid.links_count(), exit.direction,
               exit.coordinate, checkpoints.len());

        Generation { exit, checkpoints }
    }
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A randomised depth first walk from the start cell: step into a random unvisited neighbour,
/// carving the wall between, until the walk is boxed in by visited cells. Then back up to the
/// most recent cell that still has an unvisited neighbour and carry on from there.
/// Every cell is entered exactly once, so the passages form a spanning tree of the grid: there
/// is exactly one route between any two cells and `size - 1` passages in total.
///
/// The stack only holds the cells we may need to back up to, as indices, not every cell walked.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let start = grid.index(grid.start_coordinate());
    let mut stack: Vec<usize> = Vec::with_capacity(grid.size());
    let mut current = start;
    grid.cell_at_index_mut(current).visited = true;

    loop {
        let unvisited = unvisited_neighbours(grid, current);

        if !unvisited.is_empty() {
            let (direction, next) = unvisited[rng.gen_range(0..unvisited.len())];
            grid.open_passage(current, next, direction);
            stack.push(current);
            grid.cell_at_index_mut(next).visited = true;
            current = next;
        } else if let Some(backtrack) = stack.pop() {
            current = backtrack;
        } else {
            break;
        }
    }
}

/// Unvisited cells around `index` with the direction leading to each, in Up, Right, Down, Left order.
fn unvisited_neighbours(grid: &Grid, index: usize) -> SmallVec<[(Direction, usize); 4]> {
    let coord = grid.coordinate_of(index);
    Direction::ALL
        .iter()
        .filter_map(|dir| {
            grid.neighbour_at_direction(coord, *dir)
                .map(|neighbour| (*dir, grid.index(neighbour)))
        })
        .filter(|&(_, neighbour_index)| !grid.cells()[neighbour_index].is_visited())
        .collect()
}

/// Open one wall of the grid's outer boundary.
///
/// The side is picked uniformly, then a cell uniformly along that side. The cell loses its
/// outward facing wall; there is no neighbour on the other side to update.
pub fn carve_exit<R: Rng>(grid: &mut Grid, rng: &mut R) -> Exit {
    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    let side = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];

    let coordinate = match side {
        Direction::Up => GridCoordinate::new(0, rng.gen_range(0..columns) as isize),
        Direction::Down => {
            GridCoordinate::new(rows as isize - 1, rng.gen_range(0..columns) as isize)
        }
        Direction::Left => GridCoordinate::new(rng.gen_range(0..rows) as isize, 0),
        Direction::Right => {
            GridCoordinate::new(rng.gen_range(0..rows) as isize, columns as isize - 1)
        }
    };

    let index = grid.index(coordinate);
    grid.open_boundary(index, side);

    Exit {
        coordinate,
        direction: side,
    }
}

/// Mark checkpoint cells on the grid, returning where they were placed.
///
/// The start and goal cells never hold a checkpoint. Fixed positions that are off the grid or
/// reserved are skipped. A random count larger than the cells available is clamped.
pub fn place_checkpoints<R: Rng>(grid: &mut Grid,
                                 placement: &CheckpointPlacement,
                                 rng: &mut R)
                                 -> Vec<GridCoordinate> {
    let start = grid.start_coordinate();
    let goal = grid.goal_coordinate();
    let is_reserved = |coord: GridCoordinate| coord == start || coord == goal;

    let chosen: Vec<GridCoordinate> = match *placement {
        CheckpointPlacement::None => vec![],

        CheckpointPlacement::Fixed(ref positions) => {
            positions.iter()
                .cloned()
                .unique()
                .filter(|&coord| {
                    let usable = grid.is_valid_coordinate(coord) && !is_reserved(coord);
                    if !usable {
                        warn!("skipping checkpoint at {}: off the grid or on the start/goal cell",
                              coord);
                    }
                    usable
                })
                .collect()
        }

        CheckpointPlacement::Random { count } => {
            let candidates = grid.iter()
                .filter(|&coord| !is_reserved(coord))
                .collect::<Vec<GridCoordinate>>();

            let amount = if count > candidates.len() {
                warn!("{} random checkpoints requested, only {} cells available",
                      count, candidates.len());
                candidates.len()
            } else {
                count
            };

            if amount == 0 {
                vec![]
            } else {
                index::sample(rng, candidates.len(), amount)
                    .into_iter()
                    .map(|i| candidates[i])
                    .collect()
            }
        }
    };

    for coord in &chosen {
        let index = grid.index(*coord);
        grid.cell_at_index_mut(index).checkpoint = true;
    }

    chosen
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::pathing;
    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::mock::StepRng;

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    fn walls_are_symmetric(g: &Grid) -> bool {
        g.iter().all(|coord| {
            Direction::ALL.iter().all(|dir| {
                g.neighbour_at_direction(coord, *dir)
                    .map_or(true, |neighbour| {
                        g.is_wall(coord, *dir) == g.is_wall(neighbour, dir.opposite())
                    })
            })
        })
    }

    #[test]
    fn backtracker_visits_every_cell() {
        let mut g = grid(12, 17);
        let mut rng = XorShiftRng::seed_from_u64(7);
        recursive_backtracker(&mut g, &mut rng);

        assert!(g.cells().iter().all(|cell| cell.is_visited()));
        assert_eq!(g.links_count(), g.size() - 1);
        assert!(walls_are_symmetric(&g));
        assert!(pathing::is_perfect(&g));
        assert!(g.boundary_openings().is_empty());
    }

    #[test]
    fn backtracker_on_single_cell_and_single_row() {
        let mut single = grid(1, 1);
        recursive_backtracker(&mut single, &mut XorShiftRng::seed_from_u64(1));
        assert_eq!(single.links_count(), 0);
        assert!(single.cells()[0].is_visited());

        let mut corridor = grid(1, 6);
        recursive_backtracker(&mut corridor, &mut XorShiftRng::seed_from_u64(1));
        assert_eq!(corridor.links_count(), 5);
        assert!(pathing::is_perfect(&corridor));
    }

    // A random source that always answers zero makes every choice pick the first option,
    // so the carve order is known: always the first unvisited neighbour in Up, Right, Down, Left.
    #[test]
    fn known_carve_order_three_by_three() {
        let mut g = grid(3, 3);
        let mut generator = MazeGenerator::new(StepRng::new(0, 0));
        let generation = generator.generate(&mut g);

        let gc = |r, c| GridCoordinate::new(r, c);
        let links = g.iter_links().collect::<Vec<_>>();
        assert_eq!(links,
                   vec![(gc(0, 0), gc(0, 1)),
                        (gc(0, 1), gc(0, 2)),
                        (gc(0, 2), gc(1, 2)),
                        (gc(1, 0), gc(1, 1)),
                        (gc(1, 0), gc(2, 0)),
                        (gc(1, 1), gc(2, 1)),
                        (gc(1, 2), gc(2, 2)),
                        (gc(2, 1), gc(2, 2))]);
        assert!(pathing::is_perfect(&g));

        assert_eq!(generation.exit,
                   Exit {
                       coordinate: gc(0, 0),
                       direction: Direction::Up,
                   });
        assert_eq!(g.boundary_openings(), vec![(gc(0, 0), Direction::Up)]);

        // the left edge of the grid is a wall whatever was carved
        assert!(g.is_wall(gc(0, 0), Direction::Left));
        assert!(generation.checkpoints.is_empty());
    }

    #[test]
    fn exit_is_a_single_boundary_opening() {
        for seed in 0..50 {
            let mut g = grid(5, 8);
            let mut rng = XorShiftRng::seed_from_u64(seed);
            recursive_backtracker(&mut g, &mut rng);
            let links_before = g.links_count();

            let exit = carve_exit(&mut g, &mut rng);

            assert_eq!(g.links_count(), links_before);
            assert_eq!(g.boundary_openings(), vec![(exit.coordinate, exit.direction)]);
            assert!(g.neighbour_at_direction(exit.coordinate, exit.direction).is_none());
            assert!(!g.is_wall(exit.coordinate, exit.direction));
        }
    }

    #[test]
    fn exit_covers_every_side() {
        let mut sides = vec![];
        let mut rng = XorShiftRng::seed_from_u64(99);
        for _ in 0..200 {
            let mut g = grid(4, 4);
            sides.push(carve_exit(&mut g, &mut rng).direction);
        }
        for dir in &Direction::ALL {
            assert!(sides.contains(dir), "no exit ever carved on side {:?}", dir);
        }
    }

    #[test]
    fn fixed_checkpoints_skip_reserved_and_invalid_cells() {
        let mut g = grid(4, 4);
        let gc = |r, c| GridCoordinate::new(r, c);
        let placement = CheckpointPlacement::Fixed(vec![gc(0, 0),
                                                        gc(1, 2),
                                                        gc(3, 3),
                                                        gc(4, 0),
                                                        gc(-1, 2),
                                                        gc(2, 0),
                                                        gc(1, 2)]);
        let placed = place_checkpoints(&mut g, &placement, &mut XorShiftRng::seed_from_u64(3));

        assert_eq!(placed, vec![gc(1, 2), gc(2, 0)]);
        assert_eq!(g.checkpoints(), vec![gc(1, 2), gc(2, 0)]);
        assert!(!g.is_checkpoint(g.start_coordinate()));
        assert!(!g.is_checkpoint(g.goal_coordinate()));
    }

    #[test]
    fn random_checkpoints_are_distinct_and_never_reserved() {
        for seed in 0..30 {
            let mut g = grid(5, 5);
            let placement = CheckpointPlacement::Random { count: 7 };
            let placed = place_checkpoints(&mut g, &placement, &mut XorShiftRng::seed_from_u64(seed));

            assert_eq!(placed.len(), 7);
            assert_eq!(placed.iter().unique().count(), 7);
            assert_eq!(g.checkpoints_remaining(), 7);
            assert!(!g.is_checkpoint(g.start_coordinate()));
            assert!(!g.is_checkpoint(g.goal_coordinate()));
        }
    }

    #[test]
    fn random_checkpoints_clamped_to_available_cells() {
        let mut g = grid(2, 2);
        let placement = CheckpointPlacement::Random { count: 10 };
        let placed = place_checkpoints(&mut g, &placement, &mut XorShiftRng::seed_from_u64(0));
        assert_eq!(placed.len(), 2);

        let mut single = grid(1, 1);
        let placed = place_checkpoints(&mut single, &placement, &mut XorShiftRng::seed_from_u64(0));
        assert!(placed.is_empty());
    }

    #[test]
    fn same_seed_same_maze() {
        let placement = CheckpointPlacement::Random { count: 5 };
        let mut a = grid(15, 20);
        let mut b = grid(15, 20);
        let gen_a = MazeGenerator::from_seed(1234).with_checkpoints(placement.clone()).generate(&mut a);
        let gen_b = MazeGenerator::from_seed(1234).with_checkpoints(placement).generate(&mut b);

        assert_eq!(gen_a, gen_b);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mut a = grid(15, 20);
        let mut b = grid(15, 20);
        MazeGenerator::from_seed(1).generate(&mut a);
        MazeGenerator::from_seed(2).generate(&mut b);
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn regenerating_starts_from_a_fresh_grid() {
        let mut g = grid(6, 6);
        let mut generator = MazeGenerator::from_seed(5)
            .with_checkpoints(CheckpointPlacement::Random { count: 3 });
        generator.generate(&mut g);
        generator.generate(&mut g);

        assert_eq!(g.links_count(), g.size() - 1);
        assert_eq!(g.boundary_openings().len(), 1);
        assert_eq!(g.checkpoints_remaining(), 3);
        assert!(pathing::is_perfect(&g));
    }

    #[test]
    fn generated_mazes_are_perfect_with_one_exit() {

        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 16, columns as usize % 16);
            if rows == 0 || columns == 0 {
                return TestResult::discard();
            }

            let mut g = grid(rows, columns);
            let generation = MazeGenerator::from_seed(seed)
                .with_checkpoints(CheckpointPlacement::Random { count: 3 })
                .generate(&mut g);

            let start = g.start_coordinate();
            let goal = g.goal_coordinate();
            TestResult::from_bool(g.links_count() == g.size() - 1 &&
                                  pathing::is_perfect(&g) &&
                                  walls_are_symmetric(&g) &&
                                  g.cells().iter().all(|cell| cell.is_visited()) &&
                                  g.boundary_openings().len() == 1 &&
                                  !generation.checkpoints.contains(&start) &&
                                  !generation.checkpoints.contains(&goal))
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
