use std::fmt;

use smallvec::SmallVec;

pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;
pub type SideSmallVec = SmallVec<[Side; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    /// The coordinate one step away towards `side`, if it is representable.
    /// Says nothing about whether the coordinate lies inside any particular grid.
    pub fn offset(self, side: Side) -> Option<Coordinate> {
        let Coordinate { x, y } = self;
        match side {
            Side::Top => y.checked_sub(1).map(|y| Coordinate::new(x, y)),
            Side::Right => x.checked_add(1).map(|x| Coordinate::new(x, y)),
            Side::Bottom => y.checked_add(1).map(|y| Coordinate::new(x, y)),
            Side::Left => x.checked_sub(1).map(|x| Coordinate::new(x, y)),
        }
    }

    /// The side of `self` that faces `other`, when the two are 4-directionally adjacent.
    pub fn side_facing(self, other: Coordinate) -> Option<Side> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        match (dx, dy) {
            (0, -1) => Some(Side::Top),
            (1, 0) => Some(Side::Right),
            (0, 1) => Some(Side::Bottom),
            (-1, 0) => Some(Side::Left),
            _ => None,
        }
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from(x_y_pair: (u32, u32)) -> Coordinate {
        Coordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    #[inline]
    fn wall_bit(self) -> u8 {
        match self {
            Side::Top => 0b0001,
            Side::Right => 0b0010,
            Side::Bottom => 0b0100,
            Side::Left => 0b1000,
        }
    }
}

const ALL_WALLS: u8 = 0b1111;

/// One grid cell: a wall flag for each of its four sides, set while the wall stands.
#[derive(Eq, PartialEq, Copy, Clone)]
pub struct Cell {
    walls: u8,
}

impl Cell {
    /// A cell with all four walls standing.
    pub fn enclosed() -> Cell {
        Cell { walls: ALL_WALLS }
    }

    #[inline]
    pub fn has_wall(&self, side: Side) -> bool {
        self.walls & side.wall_bit() != 0
    }

    #[inline]
    pub fn is_open(&self, side: Side) -> bool {
        !self.has_wall(side)
    }

    pub fn is_enclosed(&self) -> bool {
        self.walls == ALL_WALLS
    }

    /// Number of open sides, 0 to 4.
    #[inline]
    pub fn open_sides_count(&self) -> u32 {
        (!self.walls & ALL_WALLS).count_ones()
    }

    pub fn open_sides(&self) -> SideSmallVec {
        Side::ALL.iter().cloned().filter(|side| self.is_open(*side)).collect()
    }

    // Only the grid may knock walls down, and always in pairs.
    #[inline]
    pub(crate) fn open(&mut self, side: Side) {
        self.walls &= !side.wall_bit();
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::enclosed()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Cell :: top: {}, right: {}, bottom: {}, left: {}",
               self.has_wall(Side::Top),
               self.has_wall(Side::Right),
               self.has_wall(Side::Bottom),
               self.has_wall(Side::Left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_fully_walled() {
        let cell = Cell::enclosed();
        for side in &Side::ALL {
            assert!(cell.has_wall(*side));
        }
        assert!(cell.is_enclosed());
        assert_eq!(cell.open_sides_count(), 0);
        assert!(cell.open_sides().is_empty());
    }

    #[test]
    fn opening_walls_is_per_side() {
        let mut cell = Cell::enclosed();
        cell.open(Side::Right);
        assert!(cell.is_open(Side::Right));
        assert!(cell.has_wall(Side::Top));
        assert!(cell.has_wall(Side::Bottom));
        assert!(cell.has_wall(Side::Left));
        assert_eq!(cell.open_sides_count(), 1);

        cell.open(Side::Left);
        cell.open(Side::Left);
        assert_eq!(cell.open_sides_count(), 2);
        assert_eq!(&*cell.open_sides(), &[Side::Right, Side::Left]);
        assert!(!cell.is_enclosed());
    }

    #[test]
    fn opposite_sides() {
        for side in &Side::ALL {
            assert_ne!(side.opposite(), *side);
            assert_eq!(side.opposite().opposite(), *side);
        }
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }

    #[test]
    fn offsets() {
        let c = Coordinate::new(1, 1);
        assert_eq!(c.offset(Side::Top), Some(Coordinate::new(1, 0)));
        assert_eq!(c.offset(Side::Right), Some(Coordinate::new(2, 1)));
        assert_eq!(c.offset(Side::Bottom), Some(Coordinate::new(1, 2)));
        assert_eq!(c.offset(Side::Left), Some(Coordinate::new(0, 1)));

        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.offset(Side::Top), None);
        assert_eq!(origin.offset(Side::Left), None);
        assert_eq!(Coordinate::new(u32::MAX, 0).offset(Side::Right), None);
    }

    #[test]
    fn side_facing_adjacent_cells_only() {
        let c = Coordinate::new(3, 3);
        for side in &Side::ALL {
            let adjacent = c.offset(*side).unwrap();
            assert_eq!(c.side_facing(adjacent), Some(*side));
            assert_eq!(adjacent.side_facing(c), Some(side.opposite()));
        }
        assert_eq!(c.side_facing(c), None);
        assert_eq!(c.side_facing(Coordinate::new(4, 4)), None);
        assert_eq!(c.side_facing(Coordinate::new(5, 3)), None);
    }

    #[test]
    fn coordinate_from_pair() {
        assert_eq!(Coordinate::from((4, 2)), Coordinate::new(4, 2));
        assert_eq!(format!("{}", Coordinate::new(4, 2)), "(4, 2)");
    }
}
