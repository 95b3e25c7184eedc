//! Board tiles and their terrain

use crate::hex::Hex;
use serde::{Deserialize, Serialize};

/// Terrain marker of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Open,
    Barrier,
}

/// A board tile.
///
/// Occupancy is not stored here; it is derived from the game's player and
/// enemy positions (see [`crate::Game::is_empty`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    hex: Hex,
    pub(crate) terrain: Terrain,
}

impl Cell {
    pub fn new(hex: Hex, terrain: Terrain) -> Self {
        Self { hex, terrain }
    }

    pub fn open(hex: Hex) -> Self {
        Self::new(hex, Terrain::Open)
    }

    pub fn hex(&self) -> Hex {
        self.hex
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Barriers block pathing unconditionally
    pub fn is_pathable(&self) -> bool {
        self.terrain == Terrain::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pathable() {
        let hex = Hex::new(1, -1, 0);
        assert!(Cell::open(hex).is_pathable());
        assert!(!Cell::new(hex, Terrain::Barrier).is_pathable());
        assert_eq!(Cell::open(hex).hex(), hex);
    }
}
