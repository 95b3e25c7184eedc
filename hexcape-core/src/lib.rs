//! HEXCAPE Core - Hex grid model and turn engine
//!
//! This crate provides the core game logic for HEXCAPE:
//! - Hex geometry (cube coordinates, rings, disks, lines)
//! - Board grid and cell terrain
//! - Uniform-cost pathfinding over the grid
//! - Game state, player abilities and turn resolution
//! - Read-only board snapshots and pixel layout for hosts
//! - Greedy autopilot player

pub mod hex;
pub mod grid;
pub mod cell;
pub mod pathfind;
pub mod config;
pub mod game;
pub mod snapshot;
pub mod session;
pub mod layout;
pub mod ai;

// Re-exports for convenient access
pub use hex::{Hex, DIRECTIONS};
pub use grid::HexGrid;
pub use cell::{Cell, Terrain};
pub use pathfind::{find_path, reachable};
pub use config::{GameConfig, SetupError, MAX_BOARD_RADIUS};
pub use game::{ActionOutcome, Enemy, Game, GameStatus, Ignored};
pub use snapshot::{BoardSnapshot, CellView};
pub use session::{AbilityMode, Session};
pub use layout::{Layout, Orientation, Point};
pub use ai::{Action, Autopilot};
