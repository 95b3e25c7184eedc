//! Greedy one-ply autopilot
//!
//! Tries every candidate action on a clone of the game and keeps the one
//! whose resulting position scores best. Used by the CLI for demos and
//! difficulty benchmarks.

use serde::{Deserialize, Serialize};

use crate::game::{ActionOutcome, Game, GameStatus};
use crate::hex::Hex;
use crate::pathfind::find_path;

// ============================================================================
// CONSTANTS
// ============================================================================

const WIN_SCORE: i32 = 1_000_000;
const LOSS_SCORE: i32 = -1_000_000;
const STUCK_SCORE: i32 = -900_000;

/// Penalty for each enemy standing next to the player
const ADJACENT_ENEMY_PENALTY: i32 = 50;

/// Penalty for each enemy two steps away
const NEAR_ENEMY_PENALTY: i32 = 5;

/// Cost of spending a teleport charge
const TELEPORT_COST: i32 = 8;

/// Cost of spending a turn on a barrier
const BARRIER_COST: i32 = 2;

/// Route length assumed when the exit is cut off
const NO_ROUTE_LENGTH: i32 = 200;

// ============================================================================
// ACTIONS
// ============================================================================

/// A player action the autopilot can choose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move(Hex),
    Teleport(Hex),
    Barrier(Hex, Hex),
    Wait,
}

impl Action {
    pub fn apply(self, game: &mut Game) -> ActionOutcome {
        match self {
            Action::Move(target) => game.move_player_toward(target),
            Action::Teleport(target) => game.teleport_to(target),
            Action::Barrier(start, end) => game.place_barrier(start, end),
            Action::Wait => game.end_turn(),
        }
    }
}

// ============================================================================
// AUTOPILOT
// ============================================================================

/// Greedy player
#[derive(Clone, Debug)]
pub struct Autopilot {
    /// Give up on a level after this many turns
    pub max_turns: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { max_turns: 200 }
    }
}

impl Autopilot {
    pub fn new(max_turns: u32) -> Self {
        Self { max_turns }
    }

    /// Best action for the current position, `None` once the level is over
    pub fn best_action(&self, game: &Game) -> Option<Action> {
        if game.status().is_terminal() {
            return None;
        }

        let mut best: Option<(i32, Action)> = None;
        for action in candidates(game) {
            let mut trial = game.clone();
            if !action.apply(&mut trial).is_applied() {
                continue;
            }
            let score = evaluate(&trial) - action_cost(action);
            // Earlier candidates win ties
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, action));
            }
        }

        best.map(|(_, action)| action)
    }

    /// Play the current level to its end (or the turn limit).
    ///
    /// Returns the final status and the actions taken.
    pub fn play_level(&self, game: &mut Game) -> (GameStatus, Vec<Action>) {
        let mut history = Vec::new();

        while history.len() < self.max_turns as usize {
            let Some(action) = self.best_action(game) else {
                break;
            };
            action.apply(game);
            history.push(action);
        }

        (game.status(), history)
    }
}

// ============================================================================
// CANDIDATES & EVALUATION
// ============================================================================

/// Actions worth trying: head for the exit, block each enemy's next step,
/// teleport anywhere legal, or wait.
fn candidates(game: &Game) -> Vec<Action> {
    let mut actions = vec![Action::Move(game.exit())];

    for enemy in game.enemies() {
        if let Some(&step) = find_path(game.grid(), enemy.hex(), game.player())
            .as_deref()
            .and_then(|path| path.first())
        {
            if game.is_empty(step) && step != game.exit() {
                actions.push(Action::Barrier(step, step));
            }
        }
    }

    actions.extend(game.teleport_targets().into_iter().map(Action::Teleport));
    actions.push(Action::Wait);
    actions
}

fn action_cost(action: Action) -> i32 {
    match action {
        Action::Teleport(_) => TELEPORT_COST,
        Action::Barrier(..) => BARRIER_COST,
        Action::Move(_) | Action::Wait => 0,
    }
}

/// Score a position from the player's point of view (higher is better)
pub fn evaluate(game: &Game) -> i32 {
    match game.status() {
        GameStatus::Success => return WIN_SCORE,
        GameStatus::Failure => return LOSS_SCORE,
        GameStatus::Stuck => return STUCK_SCORE,
        GameStatus::InProgress => {}
    }

    let player = game.player();
    let route = find_path(game.grid(), player, game.exit())
        .map_or(NO_ROUTE_LENGTH, |path| path.len() as i32);

    let danger: i32 = game
        .enemies()
        .iter()
        .map(|enemy| match enemy.hex().distance(player) {
            1 => ADJACENT_ENEMY_PENALTY,
            2 => NEAR_ENEMY_PENALTY,
            _ => 0,
        })
        .sum();

    -route * 10 - danger
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(17),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_moves_toward_exit_without_charges() {
        let config = GameConfig {
            teleport_charges: 0,
            ..config()
        };
        let game = Game::with_placements(config, 1, &[], &[]).unwrap();
        assert_eq!(
            Autopilot::default().best_action(&game),
            Some(Action::Move(game.exit()))
        );
    }

    #[test]
    fn test_clears_empty_board() {
        let mut game = Game::with_placements(config(), 1, &[], &[]).unwrap();
        let (status, history) = Autopilot::default().play_level(&mut game);
        assert_eq!(status, GameStatus::Success);
        assert!(!history.is_empty());
        assert!(history.len() <= 14);
    }

    #[test]
    fn test_no_action_when_over() {
        let config = GameConfig {
            player_start: Hex::new(3, -5, 2),
            ..config()
        };
        let mut game = Game::with_placements(config, 1, &[], &[]).unwrap();
        game.move_player_toward(game.exit());
        assert_eq!(game.status(), GameStatus::Success);
        assert_eq!(Autopilot::default().best_action(&game), None);
    }

    #[test]
    fn test_evaluate_prefers_shorter_route() {
        let near = GameConfig {
            player_start: Hex::new(3, -4, 1),
            ..config()
        };
        let near = Game::with_placements(near, 1, &[], &[]).unwrap();
        let far = Game::with_placements(config(), 1, &[], &[]).unwrap();
        assert!(evaluate(&near) > evaluate(&far));
    }
}
