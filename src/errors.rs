use thiserror::Error;

use crate::cells::Coordinate;

/// Everything that can go wrong building or solving a maze.
#[derive(Error, Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// A maze needs non-zero dimensions, and at least two cells to hold distinct end points.
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Walls only exist between two in-bounds, 4-directionally adjacent cells.
    #[error("cells {a} and {b} are not adjacent in the grid")]
    InvalidAdjacency { a: Coordinate, b: Coordinate },

    #[error("no perimeter cell left to choose from")]
    EmptyPerimeter,

    #[error("coordinate {0} lies outside the grid")]
    InvalidCoordinate(Coordinate),

    #[error("start and end are the same cell {0}")]
    CoincidentEndpoints(Coordinate),

    #[error("no passage connects {start} to {end}")]
    Unreachable { start: Coordinate, end: Coordinate },

    #[error("no maze has been generated yet")]
    NoActiveMaze,
}

pub type Result<T> = ::std::result::Result<T, MazeError>;
