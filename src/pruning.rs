//! Dead end pruning: solve a maze without searching it.
//!
//! Every cell with a single open passage is a dead end, and no route between two other cells
//! passes through it. Strip all dead ends at once, recount the passages of their neighbours,
//! and repeat. Whatever survives once no dead ends remain is the trunk joining the end
//! points. On a perfect maze that is precisely the cells of the unique route between them.

use log::{debug, trace};

use crate::cells::{Coordinate, Side};
use crate::errors::{MazeError, Result};
use crate::grid::Grid;
use crate::utils::{self, FnvHashSet};

/// Added to the passage count of both end points so they never read as dead ends.
/// Larger than the most passages any cell can have.
pub const PROTECTED_DEGREE_BOOST: u32 = 10;

/// The set of cells left once dead ends have been repeatedly pruned away, `start` and `end`
/// being protected from pruning. The result is unordered.
pub fn trunk_region(grid: &Grid,
                    start: Coordinate,
                    end: Coordinate)
                    -> Result<FnvHashSet<Coordinate>> {
    if grid.size() < 2 {
        return Err(MazeError::InvalidDimensions {
            width: grid.width().0,
            height: grid.height().0,
        });
    }
    let start_index = grid.coordinate_to_index(start)
        .ok_or(MazeError::InvalidCoordinate(start))?;
    let end_index = grid.coordinate_to_index(end)
        .ok_or(MazeError::InvalidCoordinate(end))?;
    if start_index == end_index {
        return Err(MazeError::CoincidentEndpoints(start));
    }

    let mut degrees = grid.iter()
        .map(|coord| grid.cell(coord).map_or(0, |cell| cell.open_sides_count()))
        .collect::<Vec<u32>>();
    degrees[start_index] += PROTECTED_DEGREE_BOOST;
    degrees[end_index] += PROTECTED_DEGREE_BOOST;

    let mut active = utils::cell_bitset(grid.size());
    for index in 0..grid.size() {
        active.insert(index);
    }

    // A cell can only become a dead end in a round when one of its neighbours was pruned in
    // the round before, so after the first full scan only those neighbours are re-examined.
    let mut candidates = (0..grid.size()).collect::<Vec<usize>>();
    let mut round = 0;
    loop {
        let dead_ends = candidates.iter()
            .cloned()
            .filter(|&index| active.contains(index) && degrees[index] == 1)
            .collect::<Vec<usize>>();
        if dead_ends.is_empty() {
            break;
        }
        round += 1;
        trace!("Pruning round {}: {} dead ends", round, dead_ends.len());

        candidates.clear();
        for &dead_end in &dead_ends {
            let _ = active.remove(dead_end);

            let coord = match grid.index_to_coordinate(dead_end) {
                Some(coord) => coord,
                None => continue,
            };
            let cell = match grid.cell(coord) {
                Some(cell) => *cell,
                None => continue,
            };
            for side in Side::ALL.iter().filter(|side| cell.is_open(**side)) {
                let neighbour_index = grid.neighbour_at_side(coord, *side)
                    .and_then(|neighbour| grid.coordinate_to_index(neighbour));
                if let Some(neighbour_index) = neighbour_index {
                    if active.contains(neighbour_index) {
                        degrees[neighbour_index] -= 1;
                        candidates.push(neighbour_index);
                    }
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
    }

    let mut trunk = utils::fnv_hashset(active.len());
    trunk.extend(active.iter().filter_map(|index| grid.index_to_coordinate(index)));
    debug!("Pruned to a trunk of {} cells from {} to {} in {} rounds",
           trunk.len(),
           start,
           end,
           round);
    Ok(trunk)
}
