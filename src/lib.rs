//! **maze_trunk** generates perfect mazes on rectangular grids and solves them, either by a
//! breadth first shortest path search or by pruning dead ends down to the trunk joining the
//! entry and exit.

pub mod cells;
pub mod episode;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod perimeter;
pub mod pruning;
pub mod units;
mod utils;

pub use crate::episode::{MazeEpisode, MazeSession, Solution, SolveStrategy};
pub use crate::errors::MazeError;
pub use crate::generators::{generate, generate_with_rng};
pub use crate::pathing::shortest_path as solve_shortest_path;
pub use crate::pruning::trunk_region as solve_region;
pub use crate::utils::FnvHashSet;
