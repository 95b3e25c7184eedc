//! Hex grid: coordinate -> cell mapping

use crate::cell::{Cell, Terrain};
use crate::hex::Hex;
use rustc_hash::FxHashMap;

/// Cells keyed by coordinate, exactly one per hex
#[derive(Clone, Debug, Default)]
pub struct HexGrid {
    cells: FxHashMap<Hex, Cell>,
}

impl HexGrid {
    /// Build an all-open grid from a coordinate generator
    pub fn from_coords(coords: impl IntoIterator<Item = Hex>) -> Self {
        let cells = coords
            .into_iter()
            .map(|hex| (hex, Cell::open(hex)))
            .collect();
        Self { cells }
    }

    /// All-open disk holding every hex closer than `radius` to `center`
    pub fn disk(center: Hex, radius: u32) -> Self {
        Self::from_coords(Hex::disk(center, 0, radius))
    }

    /// Cell at `hex`, `None` when off-board
    pub fn get(&self, hex: Hex) -> Option<&Cell> {
        self.cells.get(&hex)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.cells.contains_key(&hex)
    }

    /// Install or replace the cell at its own coordinate
    pub fn set(&mut self, cell: Cell) {
        self.cells.insert(cell.hex(), cell);
    }

    /// Change terrain of an existing cell; off-board hexes are ignored
    pub(crate) fn set_terrain(&mut self, hex: Hex, terrain: Terrain) {
        if let Some(cell) = self.cells.get_mut(&hex) {
            cell.terrain = terrain;
        }
    }

    /// Iterate cells (order unspecified)
    pub fn iter(&self) -> impl Iterator<Item = (Hex, &Cell)> + '_ {
        self.cells.iter().map(|(&hex, cell)| (hex, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_pathable(&self, hex: Hex) -> bool {
        self.get(hex).is_some_and(Cell::is_pathable)
    }

    /// Adjacent cells present on the board, in direction order
    pub fn neighbors(&self, hex: Hex) -> impl Iterator<Item = &Cell> + '_ {
        hex.neighbors().into_iter().filter_map(move |n| self.get(n))
    }

    /// Cells within `radius` of `center` (inclusive), nearest first.
    ///
    /// Scans the board rather than the disk, so any radius is fine.
    pub fn circle(&self, center: Hex, radius: u32) -> Vec<&Cell> {
        let mut cells: Vec<(u32, &Cell)> = self
            .cells
            .values()
            .filter_map(|cell| {
                let d = offset_len(cell.hex(), center)?;
                (d <= radius).then_some((d, cell))
            })
            .collect();
        cells.sort_unstable_by_key(|&(d, cell)| (d, cell.hex()));
        cells.into_iter().map(|(_, cell)| cell).collect()
    }

    /// Cells along the line from `a` to `b`, stopping before the first hex
    /// that is off-board or not pathable.
    pub fn line(&self, a: Hex, b: Hex) -> Vec<&Cell> {
        Hex::line(a, b)
            .into_iter()
            .map_while(|hex| self.get(hex).filter(|cell| cell.is_pathable()))
            .collect()
    }
}

/// Hex distance computed in i64; `None` if it does not fit a u32
fn offset_len(a: Hex, b: Hex) -> Option<u32> {
    let dq = (a.q as i64 - b.q as i64).abs();
    let dr = (a.r as i64 - b.r as i64).abs();
    let ds = (a.s as i64 - b.s as i64).abs();
    u32::try_from((dq + dr + ds) / 2).ok()
}
