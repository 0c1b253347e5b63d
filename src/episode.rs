use log::{debug, warn};
use rand::Rng;

use crate::cells::{Coordinate, Side};
use crate::errors::{MazeError, Result};
use crate::generators;
use crate::grid::Grid;
use crate::pathing;
use crate::pruning;
use crate::units::{Height, Width};
use crate::utils::FnvHashSet;

/// A carved maze together with its entry and exit cells.
///
/// Read only once built: solvers borrow the grid, they never change it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MazeEpisode {
    grid: Grid,
    start: Coordinate,
    end: Coordinate,
}

impl MazeEpisode {
    /// Both end points must lie in the grid and differ.
    pub fn new(grid: Grid, start: Coordinate, end: Coordinate) -> Result<MazeEpisode> {
        for coord in &[start, end] {
            if !grid.is_valid_coordinate(*coord) {
                return Err(MazeError::InvalidCoordinate(*coord));
            }
        }
        if start == end {
            return Err(MazeError::CoincidentEndpoints(start));
        }
        Ok(MazeEpisode { grid, start, end })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Coordinate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// The outer wall the entrance is cut into, when the start lies on the perimeter.
    pub fn entrance_side(&self) -> Option<Side> {
        self.grid.perimeter_side(self.start)
    }

    /// The outer wall the exit is cut into, when the end lies on the perimeter.
    pub fn exit_side(&self) -> Option<Side> {
        self.grid.perimeter_side(self.end)
    }

    pub fn into_parts(self) -> (Grid, Coordinate, Coordinate) {
        (self.grid, self.start, self.end)
    }

    pub fn solve_shortest_path(&self) -> Result<Vec<Coordinate>> {
        pathing::shortest_path(&self.grid, self.start, self.end)
    }

    pub fn solve_region(&self) -> Result<FnvHashSet<Coordinate>> {
        pruning::trunk_region(&self.grid, self.start, self.end)
    }

    pub fn solve(&self, strategy: SolveStrategy) -> Result<Solution> {
        match strategy {
            SolveStrategy::ShortestPath => self.solve_shortest_path().map(Solution::Path),
            SolveStrategy::Trunk => self.solve_region().map(Solution::Region),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveStrategy {
    /// Breadth first search for the ordered route from start to end.
    ShortestPath,
    /// Dead end pruning down to the unordered set of trunk cells.
    Trunk,
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum Solution {
    Path(Vec<Coordinate>),
    Region(FnvHashSet<Coordinate>),
}

impl Solution {
    pub fn len(&self) -> usize {
        match *self {
            Solution::Path(ref path) => path.len(),
            Solution::Region(ref region) => region.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        match *self {
            Solution::Path(ref path) => path.contains(&coord),
            Solution::Region(ref region) => region.contains(&coord),
        }
    }

    /// The solution cells, in route order for a path and sorted row by row for a region.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        match *self {
            Solution::Path(ref path) => path.clone(),
            Solution::Region(ref region) => {
                let mut cells = region.iter().cloned().collect::<Vec<_>>();
                cells.sort_by_key(|coord| (coord.y, coord.x));
                cells
            }
        }
    }
}

/// Holds the most recent maze between a generate request and any number of solve requests.
#[derive(Debug, Default)]
pub struct MazeSession {
    episode: Option<MazeEpisode>,
}

impl MazeSession {
    pub fn new() -> MazeSession {
        MazeSession { episode: None }
    }

    pub fn episode(&self) -> Option<&MazeEpisode> {
        self.episode.as_ref()
    }

    /// Replace the current maze with a new one. On failure the previous maze is kept.
    pub fn generate(&mut self, width: Width, height: Height) -> Result<&MazeEpisode> {
        self.generate_with_rng(width, height, &mut rand::thread_rng())
    }

    pub fn generate_with_rng<R>(&mut self,
                                width: Width,
                                height: Height,
                                rng: &mut R)
                                -> Result<&MazeEpisode>
        where R: Rng + ?Sized
    {
        let episode = generators::generate_with_rng(width, height, rng)?;
        Ok(&*self.episode.insert(episode))
    }

    pub fn solve(&self, strategy: SolveStrategy) -> Result<Solution> {
        match self.episode {
            Some(ref episode) => episode.solve(strategy),
            None => {
                warn!("Solve requested with no maze to solve");
                Err(MazeError::NoActiveMaze)
            }
        }
    }

    /// Forget the current maze, returning it if there was one.
    pub fn clear(&mut self) -> Option<MazeEpisode> {
        let cleared = self.episode.take();
        if cleared.is_some() {
            debug!("Cleared maze episode");
        }
        cleared
    }
}
