#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Height(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);

/// Cell count of a `width * height` grid, `None` on overflow.
pub fn cells_count(width: Width, height: Height) -> Option<NodesCount> {
    width.0.checked_mul(height.0).map(NodesCount)
}
