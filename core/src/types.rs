/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Coin balance.
pub type Coins = u32;

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

/// Iterates every `(x, y)` of a `size`-by-`size` square, column by column.
pub fn iter_square(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |x| (0..size).map(move |y| (x, y)))
}

/// Offsets `origin` by `delta`, wrapping each axis modulo `span`.
pub const fn wrap_offset(origin: Coord2, delta: Coord2, span: Coord) -> Coord2 {
    let x = (origin.0 as CellCount + delta.0 as CellCount) % span as CellCount;
    let y = (origin.1 as CellCount + delta.1 as CellCount) % span as CellCount;
    (x as Coord, y as Coord)
}
