/// Single coordinate axis used for board width, height, rows and columns.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `a` and `b` are distinct cells at Chebyshev distance 1.
pub fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    a != b && a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

pub fn squared_distance(a: Coord2, b: Coord2) -> u32 {
    let dr = u32::from(a.0.abs_diff(b.0));
    let dc = u32::from(a.1.abs_diff(b.1));
    dr * dr + dc * dc
}

/// The 3x3 block centered on `center` clipped to `bounds`, center included, in row-major order.
pub fn iter_block(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let (rows, cols) = bounds;
    let row_end = row.saturating_add(1).min(rows.saturating_sub(1));
    let col_end = col.saturating_add(1).min(cols.saturating_sub(1));
    let col_start = col.saturating_sub(1);

    (row.saturating_sub(1)..=row_end).flat_map(move |r| (col_start..=col_end).map(move |c| (r, c)))
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Whether all eight neighbors of `coords` exist on the board and satisfy `inside`.
pub fn neighborhood_within(
    coords: Coord2,
    bounds: Coord2,
    mut inside: impl FnMut(Coord2) -> bool,
) -> bool {
    DISPLACEMENTS
        .iter()
        .all(|&delta| apply_delta(coords, delta, bounds).is_some_and(&mut inside))
}

/// Iterates the in-bounds Chebyshev neighbors of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

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
