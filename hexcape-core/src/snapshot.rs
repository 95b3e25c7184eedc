//! Read-only board projection for renderers

use serde::{Deserialize, Serialize};

use crate::cell::Terrain;
use crate::game::{Game, GameStatus};
use crate::hex::Hex;

/// One drawable cell with derived occupancy flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub hex: Hex,
    pub terrain: Terrain,
    pub is_player: bool,
    pub is_exit: bool,
    pub is_enemy: bool,
}

/// Everything a host needs to draw the board and branch on the outcome
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub level: u32,
    pub status: GameStatus,
    pub teleports: u32,
    pub player: Hex,
    pub exit: Hex,
    /// Sorted by coordinate
    pub cells: Vec<CellView>,
}

impl BoardSnapshot {
    pub fn get(&self, hex: Hex) -> Option<&CellView> {
        self.cells
            .binary_search_by(|view| view.hex.cmp(&hex))
            .ok()
            .map(|i| &self.cells[i])
    }
}

impl Game {
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells: Vec<CellView> = self
            .cells()
            .map(|cell| {
                let hex = cell.hex();
                CellView {
                    hex,
                    terrain: cell.terrain(),
                    is_player: hex == self.player(),
                    is_exit: hex == self.exit(),
                    is_enemy: self.is_enemy(hex),
                }
            })
            .collect();
        cells.sort_unstable_by_key(|view| view.hex);

        BoardSnapshot {
            level: self.level(),
            status: self.status(),
            teleports: self.teleports(),
            player: self.player(),
            exit: self.exit(),
            cells,
        }
    }
}
