use std::fmt;

use petgraph::{Graph, Undirected};

use crate::cells::{Cell, Coordinate, CoordinateSmallVec, Side};
use crate::errors::{MazeError, Result};
use crate::units::{cells_count, Height, NodesCount, Width};

/// Undirected graph of the open passages, one node per cell in row-major order.
pub type PassageGraph = Graph<Coordinate, (), Undirected, u32>;

/// A rectangular grid of walled cells stored in row-major order.
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: width: {}, height: {}, open passages: {}",
               self.width.0,
               self.height.0,
               self.links_count())
    }
}

impl Grid {
    /// A fully walled `width * height` grid.
    ///
    /// Fails if either dimension is zero or the cells cannot be addressed by `u32` coordinates.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let invalid = MazeError::InvalidDimensions {
            width: width.0,
            height: height.0,
        };
        let max_axis_length = u32::MAX as usize;
        if width.0 == 0 || height.0 == 0 || width.0 > max_axis_length ||
           height.0 > max_axis_length {
            return Err(invalid);
        }
        let NodesCount(size) = cells_count(width, height).ok_or(invalid)?;

        Ok(Grid {
            width,
            height,
            cells: vec![Cell::enclosed(); size],
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<Coordinate> {
        if index < self.size() {
            let x = index % self.width.0;
            let y = index / self.width.0;
            Some(Coordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        self.coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// The in-bounds cell next to `coord` on the given side, linked or not.
    pub fn neighbour_at_side(&self, coord: Coordinate, side: Side) -> Option<Coordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(side).filter(|&neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Cells that are above, right, below or left of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        Side::ALL
            .iter()
            .filter_map(|side| self.neighbour_at_side(coord, *side))
            .collect()
    }

    /// The side of `a` facing `b` when both are in the grid and 4-directionally adjacent.
    pub fn side_between(&self, a: Coordinate, b: Coordinate) -> Option<Side> {
        if self.is_valid_coordinate(a) && self.is_valid_coordinate(b) {
            a.side_facing(b)
        } else {
            None
        }
    }

    /// Knock down the wall shared by two adjacent cells, opening a passage between them.
    pub fn remove_wall(&mut self, a: Coordinate, b: Coordinate) -> Result<()> {
        let side = self.side_between(a, b)
            .ok_or(MazeError::InvalidAdjacency { a, b })?;
        let (a_index, b_index) = match (self.coordinate_to_index(a), self.coordinate_to_index(b)) {
            (Some(a_index), Some(b_index)) => (a_index, b_index),
            _ => return Err(MazeError::InvalidAdjacency { a, b }),
        };
        self.cells[a_index].open(side);
        self.cells[b_index].open(side.opposite());
        Ok(())
    }

    /// Are two cells in the grid joined by an open passage?
    pub fn is_linked(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.side_between(a, b), self.cell(a)) {
            (Some(side), Some(cell)) => cell.is_open(side),
            _ => false,
        }
    }

    /// Cells reachable in one step from a particular cell through an open passage.
    /// Returns None if the coordinate is invalid.
    pub fn links(&self, coord: Coordinate) -> Option<CoordinateSmallVec> {
        self.cell(coord).map(|cell| {
            cell.open_sides()
                .iter()
                .filter_map(|side| self.neighbour_at_side(coord, *side))
                .collect()
        })
    }

    /// Number of open wall pairs in the grid.
    pub fn links_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.is_open(Side::Right) as usize + cell.is_open(Side::Bottom) as usize)
            .sum()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_index: 0,
            width: self.width.0,
            cells_count: self.size(),
        }
    }

    /// Every open passage exactly once, as (cell, cell to its right or below).
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (Coordinate, Coordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            [Side::Right, Side::Bottom]
                .iter()
                .filter_map(|side| {
                    if self.cell(coord).map_or(false, |cell| cell.is_open(*side)) {
                        self.neighbour_at_side(coord, *side).map(|linked| (coord, linked))
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
        })
    }

    pub fn is_perimeter(&self, coord: Coordinate) -> bool {
        self.perimeter_side(coord).is_some()
    }

    /// The outer face a perimeter cell lies against, checking the top row, bottom row,
    /// left column and right column in that order. None for interior or invalid cells.
    pub fn perimeter_side(&self, coord: Coordinate) -> Option<Side> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if y == 0 {
            Some(Side::Top)
        } else if y == self.height.0 - 1 {
            Some(Side::Bottom)
        } else if x == 0 {
            Some(Side::Left)
        } else if x == self.width.0 - 1 {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Build an undirected petgraph of the open passages, node indices matching
    /// `coordinate_to_index`.
    pub fn passage_graph(&self) -> PassageGraph {
        let mut graph = PassageGraph::with_capacity(self.size(), self.links_count());
        let node_indices = self.iter().map(|coord| graph.add_node(coord)).collect::<Vec<_>>();

        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.coordinate_to_index(a),
                                                     self.coordinate_to_index(b)) {
                let _ = graph.add_edge(node_indices[a_index], node_indices[b_index], ());
            }
        }
        graph
    }
}

/// Row-major walk over all the coordinates of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_index: usize,
    width: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.cells_count {
            let x = self.current_index % self.width;
            let y = self.current_index / self.width;
            self.current_index += 1;
            Some(Coordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use petgraph::algo;

    use super::*;

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("valid grid dimensions")
    }

    fn gc(x: u32, y: u32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(Grid::new(Width(0), Height(3)),
                   Err(MazeError::InvalidDimensions { width: 0, height: 3 }));
        assert_eq!(Grid::new(Width(3), Height(0)),
                   Err(MazeError::InvalidDimensions { width: 3, height: 0 }));
        assert!(Grid::new(Width(1), Height(1)).is_ok());
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let g = grid(4, 3);
        assert_eq!(g.size(), 12);
        assert_eq!(g.links_count(), 0);
        assert!(g.iter().all(|coord| g.cell(coord).unwrap().is_enclosed()));
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Coordinate]| {
            let neighbours = g.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();
            let expected = expected_neighbours.iter().cloned().sorted().collect::<Vec<_>>();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 8), &[gc(1, 8), gc(0, 7), gc(0, 9)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // Off the grid entirely
        check_expected_neighbours(gc(10, 10), &[]);
    }

    #[test]
    fn neighbour_at_side() {
        let g = grid(2, 2);
        let check_neighbour = |coord, side, expected| {
            assert_eq!(g.neighbour_at_side(coord, side), expected);
        };
        check_neighbour(gc(0, 0), Side::Top, None);
        check_neighbour(gc(0, 0), Side::Bottom, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), Side::Right, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), Side::Left, None);

        check_neighbour(gc(1, 1), Side::Top, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), Side::Bottom, None);
        check_neighbour(gc(1, 1), Side::Right, None);
        check_neighbour(gc(1, 1), Side::Left, Some(gc(0, 1)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = grid(3, 3);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.coordinate_to_index(gc(u32::MAX, u32::MAX)), None);

        for (index, coord) in coords.iter().enumerate() {
            assert_eq!(g.index_to_coordinate(index), Some(*coord));
        }
        assert_eq!(g.index_to_coordinate(9), None);
    }

    #[test]
    fn cell_iter() {
        let g = grid(2, 2);
        let iter = g.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<Coordinate>>(),
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn removing_walls_opens_both_sides() {
        let mut g = grid(4, 4);
        let a = gc(0, 1);
        let b = gc(0, 2);
        let c = gc(1, 2);

        assert!(!g.is_linked(a, b));
        assert!(g.links(a).unwrap().is_empty());

        g.remove_wall(a, b).expect("adjacent cells");
        assert!(g.is_linked(a, b) && g.is_linked(b, a));
        assert!(g.cell(a).unwrap().is_open(Side::Bottom));
        assert!(g.cell(b).unwrap().is_open(Side::Top));
        assert_eq!(&*g.links(a).unwrap(), &[b]);
        assert_eq!(&*g.links(b).unwrap(), &[a]);
        assert_eq!(g.links_count(), 1);

        g.remove_wall(c, b).expect("adjacent cells");
        assert!(g.is_linked(b, c));
        assert!(!g.is_linked(a, c));
        assert_eq!(g.links(b).unwrap().iter().cloned().sorted().collect::<Vec<_>>(),
                   vec![a, c]);
        assert_eq!(g.links_count(), 2);

        // Removing an already open wall changes nothing
        g.remove_wall(a, b).expect("adjacent cells");
        assert_eq!(g.links_count(), 2);
        assert_eq!(g.links(gc(3, 3)), Some(CoordinateSmallVec::new()));
        assert_eq!(g.links(gc(4, 4)), None);
    }

    #[test]
    fn removing_walls_requires_adjacency() {
        let mut g = grid(3, 3);
        let check_invalid = |g: &mut Grid, a, b| {
            assert_eq!(g.remove_wall(a, b), Err(MazeError::InvalidAdjacency { a, b }));
        };
        check_invalid(&mut g, gc(0, 0), gc(0, 0));
        check_invalid(&mut g, gc(0, 0), gc(1, 1));
        check_invalid(&mut g, gc(0, 0), gc(2, 0));
        check_invalid(&mut g, gc(2, 0), gc(3, 0));
        check_invalid(&mut g, gc(2, 2), gc(2, 3));
        assert_eq!(g.links_count(), 0);
        assert!(g.iter().all(|coord| g.cell(coord).unwrap().is_enclosed()));
    }

    #[test]
    fn links_iter_reports_each_passage_once() {
        let mut g = grid(3, 2);
        g.remove_wall(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_wall(gc(1, 1), gc(1, 0)).unwrap();
        g.remove_wall(gc(2, 1), gc(1, 1)).unwrap();
        let links = g.iter_links().collect::<Vec<_>>();
        assert_eq!(links,
                   vec![(gc(0, 0), gc(1, 0)), (gc(1, 0), gc(1, 1)), (gc(1, 1), gc(2, 1))]);
        assert_eq!(links.len(), g.links_count());
    }

    #[test]
    fn perimeter_sides() {
        let g = grid(4, 3);
        assert_eq!(g.perimeter_side(gc(0, 0)), Some(Side::Top));
        assert_eq!(g.perimeter_side(gc(3, 0)), Some(Side::Top));
        assert_eq!(g.perimeter_side(gc(2, 2)), Some(Side::Bottom));
        assert_eq!(g.perimeter_side(gc(0, 2)), Some(Side::Bottom));
        assert_eq!(g.perimeter_side(gc(0, 1)), Some(Side::Left));
        assert_eq!(g.perimeter_side(gc(3, 1)), Some(Side::Right));
        assert_eq!(g.perimeter_side(gc(1, 1)), None);
        assert_eq!(g.perimeter_side(gc(4, 1)), None);
        assert!(g.is_perimeter(gc(3, 2)));
        assert!(!g.is_perimeter(gc(2, 1)));
    }

    #[test]
    fn passage_graph_mirrors_open_walls() {
        let mut g = grid(2, 2);
        g.remove_wall(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_wall(gc(0, 1), gc(1, 1)).unwrap();

        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(algo::connected_components(&graph), 2);

        g.remove_wall(gc(0, 0), gc(0, 1)).unwrap();
        let graph = g.passage_graph();
        assert_eq!(algo::connected_components(&graph), 1);
        assert!(!algo::is_cyclic_undirected(&graph));

        for node in graph.node_indices() {
            assert_eq!(g.coordinate_to_index(graph[node]), Some(node.index()));
        }
    }
}
