use itertools::Itertools;
use petgraph::algo;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};


/// Passage graph of a grid: one node per cell in row major order, one edge per carved passage.
pub type PassageGraph = Graph<GridCoordinate, (), Undirected, u32>;

/// Breadth first flood fill over carved passages from one start cell.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if the start coordinate is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every step is one passage from the previous cell, so the first distance recorded for
        // a cell is already its shortest. The map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None when the coordinate is unreachable from the start or off the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells can be reached from the start, including the start itself.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a
/// linked neighbour that is closer to the start.
///
/// None if the end point cannot be reached.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_coord != start {

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord)
                                    .map(|distance| (*coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // We have not got any closer to the start, the distances do not belong to this grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest route through a perfect maze.
///
/// The furthest cell from any start is one end of the longest path, the furthest cell from
/// that end is the other.
pub fn longest_path(grid: &Grid) -> Option<Vec<GridCoordinate>> {
    let first_distances = Distances::new(grid, grid.start_coordinate())?;
    let long_path_start_coordinate = first_distances.furthest_points_on_grid()[0];

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_points_on_grid()[0];

    shortest_path(grid, &distances_from_start, end_point)
}

/// Build the undirected passage graph. Boundary openings have no cell on the far side and
/// are not edges.
pub fn passage_graph(grid: &Grid) -> PassageGraph {
    let (nodes, edges) = grid.graph_size();
    let mut graph = PassageGraph::with_capacity(nodes.0, edges.0);
    for coord in grid.iter() {
        let _ = graph.add_node(coord);
    }
    for (a, b) in grid.iter_links() {
        let a_index = NodeIndex::new(grid.index(a));
        let b_index = NodeIndex::new(grid.index(b));
        let _ = graph.add_edge(a_index, b_index, ());
    }
    graph
}

/// A perfect maze's passages form a spanning tree: connected, with one fewer passage than cells.
pub fn is_perfect(grid: &Grid) -> bool {
    let graph = passage_graph(grid);
    graph.edge_count() == graph.node_count() - 1 &&
    algo::connected_components(&graph) == 1 &&
    !algo::is_cyclic_undirected(&graph)
}
