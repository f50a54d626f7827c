/// Single grid axis used for row and column positions.
pub type Coord = u8;

/// Linear index of a tile in the reveal grid.
pub type TileIndex = u16;

/// Count type used for revealed-tile totals.
pub type TileCount = u16;

/// Score values, both per-round potential and the session total.
pub type Points = u32;

pub const fn mult(a: Coord, b: Coord) -> TileCount {
    let a = a as TileCount;
    let b = b as TileCount;
    a.saturating_mul(b)
}

/// The photo is hidden behind a square grid of this many tiles per side.
pub const GRID_SIZE: Coord = 6;
pub const TILES: TileCount = mult(GRID_SIZE, GRID_SIZE);

/// Cadence of the automatic tile reveal, in milliseconds.
pub const REVEAL_INTERVAL_MS: u32 = 1100;
/// How long the full image stays visible before the next round starts.
pub const ROUND_END_DELAY_MS: u32 = 2000;

pub const STARTING_POINTS: Points = 1000;
pub const POINTS_PER_TILE_REVEALED: Points = 25;
pub const WRONG_GUESS_PENALTY: Points = 100;
pub const MIN_ROUND_POINTS: Points = 100;

pub trait ToRowCol {
    fn to_row_col(self) -> (Coord, Coord);
}

impl ToRowCol for TileIndex {
    fn to_row_col(self) -> (Coord, Coord) {
        let row = self / GRID_SIZE as TileIndex;
        let col = self % GRID_SIZE as TileIndex;
        (row as Coord, col as Coord)
    }
}
