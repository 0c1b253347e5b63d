use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::Coordinate;
use crate::errors::{MazeError, Result};
use crate::units::{Height, Width};

/// The cells of the outer ring of a `width * height` grid, each exactly once.
///
/// A single row or column grid has every cell on its ring. Zero sized grids have none.
pub fn perimeter_cells(width: Width, height: Height) -> Vec<Coordinate> {
    let (Width(w), Height(h)) = (width, height);
    if w == 0 || h == 0 {
        return vec![];
    }
    let (w, h) = (w as u32, h as u32);

    let mut ring = Vec::with_capacity(2 * (w as usize + h as usize));
    ring.extend((0..w).map(|x| Coordinate::new(x, 0)));
    if h > 1 {
        ring.extend((0..w).map(|x| Coordinate::new(x, h - 1)));
    }
    for y in 1..h.saturating_sub(1) {
        ring.push(Coordinate::new(0, y));
        if w > 1 {
            ring.push(Coordinate::new(w - 1, y));
        }
    }
    ring
}

/// Pick a cell on the outer ring of the grid uniformly at random, never choosing `exclude`.
pub fn random_perimeter_cell<R>(rng: &mut R,
                                width: Width,
                                height: Height,
                                exclude: Option<Coordinate>)
                                -> Result<Coordinate>
    where R: Rng + ?Sized
{
    let mut candidates = perimeter_cells(width, height);
    if let Some(excluded) = exclude {
        candidates.retain(|&coord| coord != excluded);
    }
    candidates.choose(rng).cloned().ok_or(MazeError::EmptyPerimeter)
}
