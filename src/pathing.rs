use std::collections::VecDeque;

use log::{debug, warn};

use crate::cells::Coordinate;
use crate::errors::{MazeError, Result};
use crate::grid::Grid;
use crate::utils;

/// Step counts from a start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Coordinate,
    // Indexed by row-major cell index, None for cells out of reach.
    distances: Vec<Option<u32>>,
    max_distance: u32,
    width: u32,
}

impl Distances {
    /// Flood fill outwards from `start`, one passage step per ring.
    ///
    /// There are no weights on the passages so the first time a cell is reached is by
    /// the shortest route, and the distances vec doubles as the visited set.
    pub fn new(grid: &Grid, start: Coordinate) -> Result<Distances> {
        let start_index = grid.coordinate_to_index(start)
            .ok_or(MazeError::InvalidCoordinate(start))?;

        let mut distances = vec![None; grid.size()];
        distances[start_index] = Some(0);
        let mut max = 0;

        let mut frontier = vec![start];
        let mut distance = 0;
        while !frontier.is_empty() {
            distance += 1;
            let mut new_frontier = vec![];

            for cell_coord in &frontier {
                for linked in grid.links(*cell_coord).unwrap_or_default() {
                    if let Some(index) = grid.coordinate_to_index(linked) {
                        if distances[index].is_none() {
                            distances[index] = Some(distance);
                            max = distance;
                            new_frontier.push(linked);
                        }
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start_coordinate: start,
            distances,
            max_distance: max,
            width: grid.width().0 as u32,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Coordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    pub fn distance_from_start_to(&self, coord: Coordinate) -> Option<u32> {
        if coord.x >= self.width {
            return None;
        }
        let index = coord.y as usize * self.width as usize + coord.x as usize;
        self.distances.get(index).cloned().and_then(|d| d)
    }

    /// All the cells that are the maximum distance away from the start.
    pub fn furthest_points_on_grid(&self) -> Vec<Coordinate> {
        let width = self.width as usize;
        self.distances
            .iter()
            .enumerate()
            .filter(|&(_, d)| *d == Some(self.max_distance))
            .map(|(index, _)| Coordinate::new((index % width) as u32, (index / width) as u32))
            .collect()
    }
}

/// The shortest route between two cells through open passages, `start` and `end` included.
///
/// Breadth first search, stopping as soon as `end` comes off the queue. Works on any
/// passage layout, not only perfect mazes; where no route exists the result is
/// `MazeError::Unreachable`.
pub fn shortest_path(grid: &Grid, start: Coordinate, end: Coordinate) -> Result<Vec<Coordinate>> {
    let start_index = grid.coordinate_to_index(start)
        .ok_or(MazeError::InvalidCoordinate(start))?;
    let end_index = grid.coordinate_to_index(end)
        .ok_or(MazeError::InvalidCoordinate(end))?;

    let mut visited = utils::cell_bitset(grid.size());
    let mut predecessors: Vec<Option<usize>> = vec![None; grid.size()];
    let mut queue = VecDeque::new();
    visited.insert(start_index);
    queue.push_back(start);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if current == end {
            found = true;
            break;
        }
        let current_index = match grid.coordinate_to_index(current) {
            Some(index) => index,
            None => continue,
        };
        for linked in grid.links(current).unwrap_or_default() {
            if let Some(linked_index) = grid.coordinate_to_index(linked) {
                if visited.insert(linked_index) {
                    predecessors[linked_index] = Some(current_index);
                    queue.push_back(linked);
                }
            }
        }
    }

    if !found {
        warn!("No route from {} to {}", start, end);
        return Err(MazeError::Unreachable { start, end });
    }

    let mut path = vec![end];
    let mut current_index = end_index;
    while current_index != start_index {
        current_index = predecessors[current_index].ok_or(MazeError::Unreachable { start, end })?;
        path.push(grid.index_to_coordinate(current_index)
            .ok_or(MazeError::Unreachable { start, end })?);
    }
    path.reverse();

    debug!("Shortest path {} -> {} visits {} cells", start, end, path.len());
    Ok(path)
}
