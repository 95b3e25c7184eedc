//! Ability selection on top of a game
//!
//! Hosts usually translate clicks into actions: which action a click means
//! depends on the selected ability, and a barrier needs two clicks. `Session`
//! keeps that bookkeeping out of [`Game`].

use serde::{Deserialize, Serialize};

use crate::game::{ActionOutcome, Game, Ignored};
use crate::hex::Hex;

/// Action a click triggers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityMode {
    #[default]
    Move,
    Barrier,
    Teleport,
}

/// A game plus the host's current selection
#[derive(Clone, Debug)]
pub struct Session {
    game: Game,
    mode: AbilityMode,
    barrier_start: Option<Hex>,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            mode: AbilityMode::Move,
            barrier_start: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn mode(&self) -> AbilityMode {
        self.mode
    }

    /// First endpoint of a barrier being drawn
    pub fn barrier_start(&self) -> Option<Hex> {
        self.barrier_start
    }

    /// Select `mode`, or go back to moving if it is already selected
    pub fn toggle_ability_mode(&mut self, mode: AbilityMode) {
        self.mode = if self.mode == mode {
            AbilityMode::Move
        } else {
            mode
        };
        self.barrier_start = None;
    }

    /// Cells to highlight while hovering `hex`
    pub fn preview(&self, hex: Hex) -> Vec<Hex> {
        match (self.mode, self.barrier_start) {
            (AbilityMode::Move, _) => self.game.move_preview(hex).unwrap_or_default(),
            (AbilityMode::Barrier, Some(start)) => self.game.barrier_preview(start, hex),
            (AbilityMode::Barrier, None) => self.game.barrier_preview(hex, hex),
            (AbilityMode::Teleport, _) => self.game.teleport_targets(),
        }
    }

    /// Select `mode` unconditionally
    pub fn select_mode(&mut self, mode: AbilityMode) {
        self.mode = mode;
        self.barrier_start = None;
    }

    /// Pass the turn without acting
    pub fn end_turn(&mut self) -> ActionOutcome {
        self.barrier_start = None;
        self.game.end_turn()
    }

    /// Apply the selected ability to `hex`.
    ///
    /// Returns `None` when the click only recorded a barrier start point.
    /// A first barrier click off the board, or after the game ended, records
    /// nothing and reports why.
    pub fn click(&mut self, hex: Hex) -> Option<ActionOutcome> {
        let outcome = match self.mode {
            AbilityMode::Move => self.game.move_player_toward(hex),
            AbilityMode::Teleport => self.game.teleport_to(hex),
            AbilityMode::Barrier => match self.barrier_start.take() {
                None if self.game.status().is_terminal() => {
                    ActionOutcome::Ignored(Ignored::GameOver)
                }
                None if !self.game.grid().contains(hex) => {
                    ActionOutcome::Ignored(Ignored::OffBoard)
                }
                None => {
                    self.barrier_start = Some(hex);
                    return None;
                }
                Some(start) => self.game.place_barrier(start, hex),
            },
        };

        if outcome.is_applied() {
            self.mode = AbilityMode::Move;
        }
        Some(outcome)
    }

    pub fn next_level(&mut self) {
        self.game.next_level();
        self.mode = AbilityMode::Move;
        self.barrier_start = None;
    }
}
