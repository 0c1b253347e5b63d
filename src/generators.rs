use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Coordinate, CoordinateSmallVec};
use crate::episode::MazeEpisode;
use crate::errors::{MazeError, Result};
use crate::grid::Grid;
use crate::perimeter::random_perimeter_cell;
use crate::units::{cells_count, Height, NodesCount, Width};
use crate::utils;

/// Apply the recursive backtracker maze generation algorithm to a grid, starting at `origin`.
///
/// A random walk that never steps onto a visited cell, carving a passage with every step.
/// When the walk is boxed in it backs up along its own trail until it reaches a cell that
/// still has an unvisited neighbour and sets off again from there, finishing once it has
/// backed all the way up to the origin. Every cell joins the maze exactly once, so the passages
/// form a spanning tree: a perfect maze with long twisty corridors and few dead ends.
///
/// The trail is an explicit stack rather than the call stack so large grids cannot overflow it.
pub fn recursive_backtracker<R>(grid: &mut Grid, origin: Coordinate, rng: &mut R) -> Result<()>
    where R: Rng + ?Sized
{
    let origin_index = grid.coordinate_to_index(origin)
        .ok_or(MazeError::InvalidCoordinate(origin))?;

    let mut visited = utils::cell_bitset(grid.size());
    visited.insert(origin_index);
    let mut stack = Vec::with_capacity(grid.size());
    stack.push(origin);

    while let Some(&current) = stack.last() {

        let unvisited_neighbours = grid.neighbours(current)
            .into_iter()
            .filter(|&neighbour| {
                grid.coordinate_to_index(neighbour).map_or(false, |index| !visited.contains(index))
            })
            .collect::<CoordinateSmallVec>();

        if let Some(&next) = unvisited_neighbours.choose(rng) {
            grid.remove_wall(current, next)?;
            if let Some(next_index) = grid.coordinate_to_index(next) {
                visited.insert(next_index);
            }
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    Ok(())
}

/// Generate a fresh perfect maze with distinct perimeter entry and exit points.
pub fn generate(width: Width, height: Height) -> Result<MazeEpisode> {
    generate_with_rng(width, height, &mut rand::thread_rng())
}

/// As `generate`, drawing all randomness from `rng` so a seeded generator reproduces a maze.
pub fn generate_with_rng<R>(width: Width, height: Height, rng: &mut R) -> Result<MazeEpisode>
    where R: Rng + ?Sized
{
    // Distinct start and end points need at least two cells.
    let has_room_for_end_points = cells_count(width, height)
        .map_or(false, |NodesCount(count)| count >= 2);
    if !has_room_for_end_points {
        return Err(MazeError::InvalidDimensions {
            width: width.0,
            height: height.0,
        });
    }

    let mut grid = Grid::new(width, height)?;
    let start = random_perimeter_cell(rng, width, height, None)?;
    let end = random_perimeter_cell(rng, width, height, Some(start))?;

    recursive_backtracker(&mut grid, start, rng)?;
    debug!("Generated {}x{} maze, start {} end {}, {} passages",
           width.0,
           height.0,
           start,
           end,
           grid.links_count());

    MazeEpisode::new(grid, start, end)
}
