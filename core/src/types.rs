use ndarray::Array2;

/// Single coordinate axis used for board width and height.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Board size as `(width, height)`.
pub type Coord2 = (Coord, Coord);

/// Row-major linear cell index, `row * width + col`.
pub type CellIndex = usize;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// `ndarray` index `[row, col]` for a linear index on a board `width` cells wide.
pub const fn to_nd_index(index: CellIndex, width: Coord) -> [usize; 2] {
    let width = width as usize;
    [index / width, index % width]
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: CellIndex) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: CellIndex) -> NeighborIter {
        let (rows, cols) = self.dim();
        NeighborIter::new(index, (cols, rows))
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to the cell at `(col, row)`, returning its linear index only when it remains in bounds.
fn apply_delta(
    (col, row): (usize, usize),
    (dx, dy): (isize, isize),
    (width, height): (usize, usize),
) -> Option<CellIndex> {
    let next_col = col.checked_add_signed(dx)?;
    if next_col >= width {
        return None;
    }

    let next_row = row.checked_add_signed(dy)?;
    if next_row >= height {
        return None;
    }

    Some(next_row * width + next_col)
}

/// Iterates the up-to-8 cells around a center cell, clamped at the board edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: (usize, usize),
    bounds: (usize, usize),
    index: u8,
}

impl NeighborIter {
    pub fn new(center: CellIndex, bounds: (usize, usize)) -> Self {
        let width = bounds.0.max(1);
        Self {
            center: (center % width, center / width),
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
