//! Game state, player abilities and turn resolution

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cell::{Cell, Terrain};
use crate::config::{GameConfig, SetupError};
use crate::grid::HexGrid;
use crate::hex::Hex;
use crate::pathfind::{find_path, reachable};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game status; everything except `InProgress` is terminal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    Success,
    Failure,
    Stuck,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// An enemy token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: usize,
    hex: Hex,
}

impl Enemy {
    pub fn hex(&self) -> Hex {
        self.hex
    }
}

/// Why a player action left the game untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ignored {
    /// Status is already terminal
    GameOver,
    /// Target hex is not on the board
    OffBoard,
    /// No route to the target, or target is the player's own cell
    NoPath,
    /// First step of the route is occupied
    Blocked,
    /// No teleport charges left
    NoCharges,
    /// Teleport target beyond the teleport radius
    OutOfRange,
    /// Teleport target is a barrier or occupied
    Occupied,
    /// Barrier line would cover no cell
    EmptyLine,
}

/// Result of a player action. Rejections are not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Action applied and the turn resolved to this status
    Applied(GameStatus),
    Ignored(Ignored),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Per-level board, rebuilt wholesale at every level setup
#[derive(Clone, Debug)]
struct Board {
    grid: HexGrid,
    player: Hex,
    exit: Hex,
    enemies: Vec<Enemy>,
}

impl Board {
    /// Terrain only: open disk with the mountain ring, no enemies yet
    fn terrain(config: &GameConfig) -> Self {
        let mut grid = HexGrid::disk(Hex::ORIGIN, config.board_radius);
        for hex in Hex::ring(Hex::ORIGIN, config.mountain_radius) {
            grid.set_terrain(hex, Terrain::Barrier);
        }

        debug_assert!(grid.is_pathable(config.player_start), "player start must be open");
        debug_assert!(grid.is_pathable(config.exit), "exit must be open");

        Self {
            grid,
            player: config.player_start,
            exit: config.exit,
            enemies: Vec::new(),
        }
    }

    /// Full level: terrain plus `count` enemies sampled without replacement
    /// from open cells that are not the exit and not next to the player.
    fn generate(config: &GameConfig, count: usize, rng: &mut ChaCha8Rng) -> Self {
        let mut board = Self::terrain(config);

        let mut eligible: Vec<Hex> = board
            .grid
            .iter()
            .filter(|&(hex, cell)| {
                cell.is_pathable() && hex != board.exit && hex.distance(board.player) > 1
            })
            .map(|(hex, _)| hex)
            .collect();

        // Map iteration order is not part of the seed
        eligible.sort_unstable();
        eligible.shuffle(rng);
        eligible.truncate(count);

        if eligible.len() < count {
            debug!(requested = count, placed = eligible.len(), "ran out of enemy cells");
        }

        board.enemies = eligible
            .into_iter()
            .enumerate()
            .map(|(id, hex)| Enemy { id, hex })
            .collect();
        board
    }

    fn has_enemy(&self, hex: Hex) -> bool {
        self.enemies.iter().any(|e| e.hex == hex)
    }

    fn is_empty(&self, hex: Hex) -> bool {
        self.grid.is_pathable(hex) && hex != self.player && !self.has_enemy(hex)
    }
}

// ============================================================================
// GAME
// ============================================================================

/// Aggregate root: board, level progression, charges and status.
///
/// All mutation goes through the action methods so the board invariants hold
/// after every call.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    rng: ChaCha8Rng,
    board: Board,
    level: u32,
    teleports: u32,
    status: GameStatus,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Start at level 1 with randomly placed enemies
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        Self::at_level(config, 1)
    }

    /// Start at `level` with randomly placed enemies
    pub fn at_level(config: GameConfig, level: u32) -> Result<Self, SetupError> {
        config.validate()?;
        let level = level.max(1);
        let mut rng = create_rng(config.seed);
        let board = Board::generate(&config, config.enemy_count(level), &mut rng);

        let game = Self {
            teleports: config.teleport_charges,
            config,
            rng,
            board,
            level,
            status: GameStatus::InProgress,
        };
        game.log_level_start();
        Ok(game)
    }

    /// Start a level with explicit enemy and extra barrier placements.
    ///
    /// Used for scripted boards; later levels fall back to random setup.
    pub fn with_placements(
        config: GameConfig,
        level: u32,
        enemies: &[Hex],
        barriers: &[Hex],
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let mut board = Board::terrain(&config);

        for &hex in barriers {
            if !board.grid.contains(hex) {
                return Err(SetupError::BadBarrier { hex, reason: "off board" });
            }
            if hex == board.player || hex == board.exit {
                return Err(SetupError::BadBarrier { hex, reason: "covers player or exit" });
            }
            board.grid.set_terrain(hex, Terrain::Barrier);
        }

        for (id, &hex) in enemies.iter().enumerate() {
            if !board.grid.contains(hex) {
                return Err(SetupError::BadEnemy { hex, reason: "off board" });
            }
            if hex == board.exit {
                return Err(SetupError::BadEnemy { hex, reason: "on the exit" });
            }
            if hex.distance(board.player) <= 1 {
                return Err(SetupError::BadEnemy { hex, reason: "next to the player" });
            }
            if !board.is_empty(hex) {
                return Err(SetupError::BadEnemy { hex, reason: "not an empty cell" });
            }
            board.enemies.push(Enemy { id, hex });
        }

        let game = Self {
            rng: create_rng(config.seed),
            teleports: config.teleport_charges,
            config,
            board,
            level: level.max(1),
            status: GameStatus::InProgress,
        };
        game.log_level_start();
        Ok(game)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Remaining teleport charges
    pub fn teleports(&self) -> u32 {
        self.teleports
    }

    pub fn player(&self) -> Hex {
        self.board.player
    }

    pub fn exit(&self) -> Hex {
        self.board.exit
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.board.enemies
    }

    pub fn grid(&self) -> &HexGrid {
        &self.board.grid
    }

    /// Iterate all cells (order unspecified)
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.board.grid.iter().map(|(_, cell)| cell)
    }

    /// Coordinates of the mountain ring
    pub fn ring_hexes(&self) -> Vec<Hex> {
        Hex::ring(Hex::ORIGIN, self.config.mountain_radius)
            .into_iter()
            .filter(|&hex| self.board.grid.contains(hex))
            .collect()
    }

    pub fn is_enemy(&self, hex: Hex) -> bool {
        self.board.has_enemy(hex)
    }

    /// Pathable and holding neither the player nor an enemy
    pub fn is_empty(&self, hex: Hex) -> bool {
        self.board.is_empty(hex)
    }

    // ========================================================================
    // PREVIEWS
    // ========================================================================

    /// Full route the player would follow toward `target`
    pub fn move_preview(&self, target: Hex) -> Option<Vec<Hex>> {
        find_path(&self.board.grid, self.board.player, target)
    }

    /// Hexes a barrier from `start` to `end` would cover.
    ///
    /// Follows the grid line up to the first obstruction, and also stops
    /// before the player, an enemy or the exit. Empty if either end is
    /// off-board.
    pub fn barrier_preview(&self, start: Hex, end: Hex) -> Vec<Hex> {
        if !self.board.grid.contains(start) || !self.board.grid.contains(end) {
            return Vec::new();
        }
        self.board
            .grid
            .line(start, end)
            .into_iter()
            .map(Cell::hex)
            .take_while(|&hex| self.board.is_empty(hex) && hex != self.board.exit)
            .collect()
    }

    /// Empty cells the player could teleport to right now
    pub fn teleport_targets(&self) -> Vec<Hex> {
        if self.teleports == 0 || self.status.is_terminal() {
            return Vec::new();
        }
        self.board
            .grid
            .circle(self.board.player, self.config.teleport_radius)
            .into_iter()
            .map(Cell::hex)
            .filter(|&hex| self.board.is_empty(hex))
            .collect()
    }

    // ========================================================================
    // PLAYER ACTIONS
    // ========================================================================

    /// Step once along the shortest route toward `target`
    pub fn move_player_toward(&mut self, target: Hex) -> ActionOutcome {
        if let Some(reason) = self.check_target(target) {
            return self.ignore("move", reason);
        }

        let step = match self.move_preview(target).and_then(|path| path.first().copied()) {
            Some(step) => step,
            None => return self.ignore("move", Ignored::NoPath),
        };
        if !self.board.is_empty(step) {
            return self.ignore("move", Ignored::Blocked);
        }

        debug!(from = %self.board.player, to = %step, "player moves");
        self.board.player = step;
        ActionOutcome::Applied(self.resolve_turn())
    }

    /// Jump straight to an empty cell within the teleport radius
    pub fn teleport_to(&mut self, target: Hex) -> ActionOutcome {
        if let Some(reason) = self.check_target(target) {
            return self.ignore("teleport", reason);
        }
        if self.teleports == 0 {
            return self.ignore("teleport", Ignored::NoCharges);
        }
        if self.board.player.distance(target) as u32 > self.config.teleport_radius {
            return self.ignore("teleport", Ignored::OutOfRange);
        }
        if !self.board.is_empty(target) {
            return self.ignore("teleport", Ignored::Occupied);
        }

        debug!(from = %self.board.player, to = %target, "player teleports");
        self.board.player = target;
        self.teleports -= 1;
        ActionOutcome::Applied(self.resolve_turn())
    }

    /// Turn every cell of [`Game::barrier_preview`] into a barrier
    pub fn place_barrier(&mut self, start: Hex, end: Hex) -> ActionOutcome {
        if let Some(reason) = self.check_target(start).or_else(|| self.check_target(end)) {
            return self.ignore("barrier", reason);
        }

        let hexes = self.barrier_preview(start, end);
        if hexes.is_empty() {
            return self.ignore("barrier", Ignored::EmptyLine);
        }

        debug!(%start, %end, cells = hexes.len(), "barrier placed");
        for hex in hexes {
            self.board.grid.set_terrain(hex, Terrain::Barrier);
        }
        ActionOutcome::Applied(self.resolve_turn())
    }

    /// Pass: resolve a turn without acting
    pub fn end_turn(&mut self) -> ActionOutcome {
        if self.status.is_terminal() {
            return self.ignore("end turn", Ignored::GameOver);
        }
        ActionOutcome::Applied(self.resolve_turn())
    }

    /// Advance after a success, otherwise restart from level 1
    pub fn next_level(&mut self) {
        self.level = if self.status == GameStatus::Success {
            self.level + 1
        } else {
            1
        };
        self.teleports = self.config.teleport_charges;
        self.status = GameStatus::InProgress;
        let count = self.config.enemy_count(self.level);
        self.board = Board::generate(&self.config, count, &mut self.rng);
        self.log_level_start();
    }

    // ========================================================================
    // TURN RESOLUTION
    // ========================================================================

    fn resolve_turn(&mut self) -> GameStatus {
        let player = self.board.player;

        if player == self.board.exit {
            return self.finish(GameStatus::Success);
        }

        for i in 0..self.board.enemies.len() {
            let from = self.board.enemies[i].hex;
            let step = match find_path(&self.board.grid, from, player)
                .and_then(|path| path.first().copied())
            {
                Some(step) => step,
                None => continue,
            };

            if step != player && !self.board.is_empty(step) {
                continue;
            }

            debug!(enemy = self.board.enemies[i].id, %from, to = %step, "enemy moves");
            self.board.enemies[i].hex = step;

            if step == player {
                return self.finish(GameStatus::Failure);
            }
        }

        if self.teleports == 0 && !reachable(&self.board.grid, player, self.board.exit) {
            return self.finish(GameStatus::Stuck);
        }

        self.status
    }

    fn finish(&mut self, status: GameStatus) -> GameStatus {
        info!(level = self.level, ?status, "level finished");
        self.status = status;
        status
    }

    fn check_target(&self, target: Hex) -> Option<Ignored> {
        if self.status.is_terminal() {
            Some(Ignored::GameOver)
        } else if !self.board.grid.contains(target) {
            Some(Ignored::OffBoard)
        } else {
            None
        }
    }

    fn ignore(&self, action: &str, reason: Ignored) -> ActionOutcome {
        debug!(action, ?reason, "action ignored");
        ActionOutcome::Ignored(reason)
    }

    fn log_level_start(&self) {
        info!(
            level = self.level,
            enemies = self.board.enemies.len(),
            teleports = self.teleports,
            "level start"
        );
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> GameConfig {
        GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    /// Level with no enemies, for testing actions in isolation
    fn quiet_game() -> Game {
        Game::with_placements(seeded(1), 1, &[], &[]).unwrap()
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new(seeded(42)).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.level(), 1);
        assert_eq!(game.teleports(), 1);
        assert_eq!(game.player(), Hex::new(-3, 6, -3));
        assert_eq!(game.exit(), Hex::new(3, -6, 3));
        assert_eq!(game.enemies().len(), 1);
        // 1 + 6 + ... + 36 = 127 cells
        assert_eq!(game.grid().len(), 127);
    }

    #[test]
    fn test_mountain_ring_is_barrier() {
        let game = Game::new(seeded(42)).unwrap();
        let ring = game.ring_hexes();
        assert_eq!(ring.len(), 12);
        for hex in ring {
            assert_eq!(game.grid().get(hex).unwrap().terrain(), Terrain::Barrier);
        }
    }

    #[test]
    fn test_enemy_placement_invariants() {
        for seed in 0..20 {
            let mut game = Game::new(seeded(seed)).unwrap();
            // Push enemy counts up through a few levels
            for _ in 0..4 {
                game.status = GameStatus::Success;
                game.next_level();
            }
            let enemies = game.enemies();
            assert_eq!(enemies.len(), 5);
            for (i, enemy) in enemies.iter().enumerate() {
                assert!(game.grid().is_pathable(enemy.hex()));
                assert_ne!(enemy.hex(), game.exit());
                assert!(enemy.hex().distance(game.player()) > 1);
                assert!(enemies[i + 1..].iter().all(|o| o.hex() != enemy.hex()));
            }
        }
    }

    #[test]
    fn test_at_level_scales_enemies() {
        let game = Game::at_level(seeded(8), 3).unwrap();
        assert_eq!(game.level(), 3);
        assert_eq!(game.enemies().len(), 3);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Game::new(seeded(7)).unwrap();
        let b = Game::new(seeded(7)).unwrap();
        assert_eq!(a.enemies(), b.enemies());
    }

    #[test]
    fn test_fewer_enemies_when_cells_run_out() {
        let config = GameConfig {
            enemies_per_level: 500,
            ..seeded(3)
        };
        let game = Game::new(config).unwrap();
        // 127 cells - 12 mountain - exit - player and its 4 on-board neighbors
        assert_eq!(game.enemies().len(), 127 - 12 - 1 - 5);
    }

    #[test]
    fn test_move_off_board_ignored() {
        let mut game = quiet_game();
        let outcome = game.move_player_toward(Hex::new(10, -5, -5));
        assert_eq!(outcome, ActionOutcome::Ignored(Ignored::OffBoard));
        assert_eq!(game.player(), Hex::new(-3, 6, -3));
    }

    #[test]
    fn test_move_to_self_ignored() {
        let mut game = quiet_game();
        let player = game.player();
        assert_eq!(
            game.move_player_toward(player),
            ActionOutcome::Ignored(Ignored::NoPath)
        );
    }

    #[test]
    fn test_move_is_single_step() {
        let mut game = quiet_game();
        let start = game.player();
        let outcome = game.move_player_toward(game.exit());
        assert_eq!(outcome, ActionOutcome::Applied(GameStatus::InProgress));
        assert_eq!(start.distance(game.player()), 1);
    }

    #[test]
    fn test_move_blocked_by_enemy() {
        let config = GameConfig {
            teleport_charges: 0,
            ..seeded(1)
        };
        // Two steps out; after one turn the enemy stands on the only cell
        // between the player and its starting point.
        let start = Hex::new(-1, 4, -3);
        let mut game = Game::with_placements(config, 1, &[start], &[]).unwrap();
        assert_eq!(game.end_turn(), ActionOutcome::Applied(GameStatus::InProgress));
        let blocker = Hex::new(-2, 5, -3);
        assert_eq!(game.enemies()[0].hex(), blocker);

        // The enemy is not a terrain obstacle so the path runs through it
        let outcome = game.move_player_toward(start);
        assert_eq!(outcome, ActionOutcome::Ignored(Ignored::Blocked));
        assert_eq!(game.enemies()[0].hex(), blocker);
        assert_eq!(game.player(), Hex::new(-3, 6, -3));
    }

    fn enemy_rejection(enemies: &[Hex], barriers: &[Hex]) -> Option<&'static str> {
        match Game::with_placements(seeded(1), 1, enemies, barriers) {
            Err(SetupError::BadEnemy { reason, .. }) => Some(reason),
            _ => None,
        }
    }

    fn barrier_rejection(barriers: &[Hex]) -> Option<&'static str> {
        match Game::with_placements(seeded(1), 1, &[], barriers) {
            Err(SetupError::BadBarrier { reason, .. }) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn test_placed_enemy_next_to_player_rejected() {
        assert_eq!(enemy_rejection(&[Hex::new(-2, 5, -3)], &[]), Some("next to the player"));
        assert_eq!(enemy_rejection(&[Hex::new(-3, 6, -3)], &[]), Some("next to the player"));
        // Two steps away is fine
        assert!(Game::with_placements(seeded(1), 1, &[Hex::new(-1, 4, -3)], &[]).is_ok());
    }

    #[test]
    fn test_placed_enemy_on_exit_rejected() {
        assert_eq!(enemy_rejection(&[Hex::new(3, -6, 3)], &[]), Some("on the exit"));
    }

    #[test]
    fn test_placed_enemy_off_board_rejected() {
        assert_eq!(enemy_rejection(&[Hex::new(7, -7, 0)], &[]), Some("off board"));
        assert_eq!(
            enemy_rejection(&[Hex { q: i32::MIN, r: i32::MAX, s: 1 }], &[]),
            Some("off board")
        );
    }

    #[test]
    fn test_placed_enemy_on_barrier_rejected() {
        // Mountain cell
        assert_eq!(enemy_rejection(&[Hex::new(2, 0, -2)], &[]), Some("not an empty cell"));
        // Scripted barrier
        let hex = Hex::new(4, 0, -4);
        assert_eq!(enemy_rejection(&[hex], &[hex]), Some("not an empty cell"));
    }

    #[test]
    fn test_duplicate_enemies_rejected() {
        let hex = Hex::new(4, 0, -4);
        assert_eq!(enemy_rejection(&[hex, hex], &[]), Some("not an empty cell"));
    }

    #[test]
    fn test_placed_barrier_rejections() {
        assert_eq!(barrier_rejection(&[Hex::new(0, 7, -7)]), Some("off board"));
        assert_eq!(barrier_rejection(&[Hex::new(-3, 6, -3)]), Some("covers player or exit"));
        assert_eq!(barrier_rejection(&[Hex::new(3, -6, 3)]), Some("covers player or exit"));
    }

    #[test]
    fn test_scripted_barrier_applied() {
        let hex = Hex::new(4, 0, -4);
        let game = Game::with_placements(seeded(1), 1, &[], &[hex]).unwrap();
        assert!(!game.grid().is_pathable(hex));
    }

    #[test]
    fn test_huge_teleport_radius() {
        let config = GameConfig {
            teleport_radius: u32::MAX,
            ..seeded(1)
        };
        let mut game = Game::with_placements(config, 1, &[], &[]).unwrap();
        // Every open cell except the player's own
        assert_eq!(game.teleport_targets().len(), 127 - 12 - 1);
        let far = Hex::new(3, -5, 2);
        assert!(game.teleport_to(far).is_applied());
        assert_eq!(game.player(), far);
    }

    #[test]
    fn test_barrier_preview_off_board_end() {
        let game = quiet_game();
        assert!(game.barrier_preview(Hex::new(3, 0, -3), Hex::new(40, 0, -40)).is_empty());
        let extreme = Hex { q: i32::MAX, r: i32::MIN, s: 1 };
        assert!(game.barrier_preview(Hex::new(3, 0, -3), extreme).is_empty());
        assert!(game.barrier_preview(extreme, extreme).is_empty());
    }

    #[test]
    fn test_teleport_consumes_charge() {
        let mut game = quiet_game();
        let target = Hex::new(0, 4, -4);
        assert_eq!(game.teleport_to(target), ActionOutcome::Applied(GameStatus::InProgress));
        assert_eq!(game.player(), target);
        assert_eq!(game.teleports(), 0);

        let again = game.teleport_to(Hex::new(1, 3, -4));
        assert_eq!(again, ActionOutcome::Ignored(Ignored::NoCharges));
        assert_eq!(game.player(), target);
    }

    #[test]
    fn test_teleport_out_of_range() {
        let mut game = quiet_game();
        assert_eq!(
            game.teleport_to(Hex::new(3, -3, 0)),
            ActionOutcome::Ignored(Ignored::OutOfRange)
        );
        assert_eq!(game.teleports(), 1);
    }

    #[test]
    fn test_teleport_onto_barrier_ignored() {
        let mut game = quiet_game();
        assert_eq!(
            game.teleport_to(Hex::new(0, 2, -2)),
            ActionOutcome::Ignored(Ignored::Occupied)
        );
    }

    #[test]
    fn test_teleport_targets_are_empty_and_in_range() {
        let game = Game::new(seeded(5)).unwrap();
        let targets = game.teleport_targets();
        assert!(!targets.is_empty());
        for hex in targets {
            assert!(game.is_empty(hex));
            assert!(game.player().distance(hex) <= 6);
        }
    }

    #[test]
    fn test_barrier_line_marks_cells() {
        let mut game = quiet_game();
        let start = Hex::new(3, 0, -3);
        let end = Hex::new(5, 0, -5);
        assert!(game.place_barrier(start, end).is_applied());
        for q in 3..=5 {
            assert!(!game.grid().is_pathable(Hex::new(q, 0, -q)));
        }
    }

    #[test]
    fn test_barrier_stops_at_existing_barrier() {
        let mut game = quiet_game();
        // Line crosses the mountain at (2, 0, -2)
        let preview = game.barrier_preview(Hex::new(4, 0, -4), Hex::new(0, 0, 0));
        assert_eq!(preview, vec![Hex::new(4, 0, -4), Hex::new(3, 0, -3)]);
        assert!(game.place_barrier(Hex::new(4, 0, -4), Hex::new(0, 0, 0)).is_applied());
        assert!(game.grid().is_pathable(Hex::ORIGIN));
    }

    #[test]
    fn test_barrier_never_covers_player() {
        let mut game = quiet_game();
        let player = game.player();
        let outcome = game.place_barrier(player, Hex::new(-3, 3, 0));
        assert_eq!(outcome, ActionOutcome::Ignored(Ignored::EmptyLine));
        assert!(game.grid().is_pathable(player));
    }

    #[test]
    fn test_actions_ignored_after_game_over() {
        let mut game = quiet_game();
        game.status = GameStatus::Failure;
        let player = game.player();
        assert_eq!(
            game.move_player_toward(game.exit()),
            ActionOutcome::Ignored(Ignored::GameOver)
        );
        assert_eq!(
            game.teleport_to(Hex::new(0, 4, -4)),
            ActionOutcome::Ignored(Ignored::GameOver)
        );
        assert_eq!(
            game.place_barrier(Hex::new(3, 0, -3), Hex::new(4, 0, -4)),
            ActionOutcome::Ignored(Ignored::GameOver)
        );
        assert_eq!(game.end_turn(), ActionOutcome::Ignored(Ignored::GameOver));
        assert_eq!(game.player(), player);
        assert_eq!(game.teleports(), 1);
    }

    #[test]
    fn test_next_level_after_failure_resets() {
        let mut game = Game::new(seeded(9)).unwrap();
        game.level = 4;
        game.teleports = 0;
        game.status = GameStatus::Failure;
        game.next_level();
        assert_eq!(game.level(), 1);
        assert_eq!(game.teleports(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.enemies().len(), 1);
    }

    #[test]
    fn test_enemies_do_not_stack() {
        // Rear enemy trails the front one; they must never share a cell
        let front = Hex::new(3, 3, -6);
        let rear = Hex::new(4, 2, -6);
        let config = GameConfig {
            player_start: Hex::new(0, 5, -5),
            ..seeded(1)
        };
        let mut game = Game::with_placements(config, 1, &[front, rear], &[]).unwrap();
        game.end_turn();
        let hexes: Vec<_> = game.enemies().iter().map(|e| e.hex()).collect();
        assert_ne!(hexes[0], hexes[1]);
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}
