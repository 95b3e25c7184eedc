//! Game configuration and setup errors

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex::Hex;

/// Largest accepted `board_radius`
pub const MAX_BOARD_RADIUS: u32 = 64;

/// Board and difficulty parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board covers every hex closer than this to the origin
    pub board_radius: u32,
    /// Ring of permanent barriers around the origin
    pub mountain_radius: u32,
    pub player_start: Hex,
    pub exit: Hex,
    /// Maximum teleport distance (inclusive)
    pub teleport_radius: u32,
    /// Teleport charges granted at each level start
    pub teleport_charges: u32,
    /// Enemies added per level
    pub enemies_per_level: usize,
    /// RNG seed for enemy placement (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_radius: 7,
            mountain_radius: 2,
            player_start: Hex::new(-3, 6, -3),
            exit: Hex::new(3, -6, 3),
            teleport_radius: 6,
            teleport_charges: 1,
            enemies_per_level: 1,
            seed: None,
        }
    }
}

/// Invariant violations detected while setting up a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{what} {hex} is not a cube coordinate")]
    NotCube { what: &'static str, hex: Hex },

    #[error("{what} {hex} is outside a board of radius {radius}")]
    OffBoard { what: &'static str, hex: Hex, radius: u32 },

    #[error("{what} {hex} sits on the mountain ring")]
    OnMountain { what: &'static str, hex: Hex },

    #[error("player start and exit share hex {0}")]
    PlayerOnExit(Hex),

    #[error("{what} radius {value} must be below {limit}")]
    BadRadius { what: &'static str, value: u32, limit: u32 },

    #[error("enemy placement {hex} rejected: {reason}")]
    BadEnemy { hex: Hex, reason: &'static str },

    #[error("barrier placement {hex} rejected: {reason}")]
    BadBarrier { hex: Hex, reason: &'static str },
}

impl GameConfig {
    /// Number of enemies placed on a level
    pub fn enemy_count(&self, level: u32) -> usize {
        level as usize * self.enemies_per_level
    }

    pub fn on_board(&self, hex: Hex) -> bool {
        ring_index(hex) < self.board_radius
    }

    pub fn on_mountain(&self, hex: Hex) -> bool {
        ring_index(hex) == self.mountain_radius
    }

    /// Check radii, then that player and exit land on distinct open cells
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.board_radius == 0 || self.board_radius > MAX_BOARD_RADIUS {
            return Err(SetupError::BadRadius {
                what: "board",
                value: self.board_radius,
                limit: MAX_BOARD_RADIUS + 1,
            });
        }
        if self.mountain_radius >= self.board_radius {
            return Err(SetupError::BadRadius {
                what: "mountain",
                value: self.mountain_radius,
                limit: self.board_radius,
            });
        }
        for (what, hex) in [("player start", self.player_start), ("exit", self.exit)] {
            if !hex.is_valid() {
                return Err(SetupError::NotCube { what, hex });
            }
            if !self.on_board(hex) {
                return Err(SetupError::OffBoard {
                    what,
                    hex,
                    radius: self.board_radius,
                });
            }
            if self.on_mountain(hex) {
                return Err(SetupError::OnMountain { what, hex });
            }
        }
        if self.player_start == self.exit {
            return Err(SetupError::PlayerOnExit(self.exit));
        }
        Ok(())
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Distance from the origin, without overflow on unchecked coordinates
fn ring_index(hex: Hex) -> u32 {
    hex.q.unsigned_abs().max(hex.r.unsigned_abs()).max(hex.s.unsigned_abs())
}
