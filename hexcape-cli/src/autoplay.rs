//! Autoplay command - the autopilot plays consecutive levels
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_run(), report_results()
//! - Level 3: compute_run_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use hexcape_core::{Autopilot, Game, GameConfig, GameStatus};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AutoplayArgs {
    /// Number of levels to attempt
    #[arg(long, default_value = "5")]
    pub levels: usize,

    /// Give up on a level after this many turns
    #[arg(long, default_value = "200")]
    pub max_turns: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single level attempt
#[derive(Clone, Debug, serde::Serialize)]
pub struct LevelRecord {
    pub attempt: usize,
    pub level: u32,
    pub enemies: usize,
    pub status: GameStatus,
    pub turns: usize,
}

/// Aggregated run results
#[derive(Clone, Debug, serde::Serialize)]
pub struct RunResults {
    pub levels: Vec<LevelRecord>,
    pub successes: usize,
    pub failures: usize,
    pub stuck: usize,
    /// Attempts that hit the turn limit
    pub unfinished: usize,
    pub highest_level: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run autoplay command
///
/// 1. Build the game from config
/// 2. Let the autopilot play each level
/// 3. Report results
pub fn run(args: AutoplayArgs, config: GameConfig) -> Result<()> {
    tracing::info!(
        "Starting autoplay: {} levels, {} turns max, seed {:?}",
        args.levels,
        args.max_turns,
        config.seed
    );

    let game = Game::new(config)?;
    let results = play_run(game, args.levels, &Autopilot::new(args.max_turns));

    report_results(&results, args.json);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play `attempts` levels back to back; a loss restarts from level 1
pub fn play_run(mut game: Game, attempts: usize, autopilot: &Autopilot) -> RunResults {
    let mut levels = Vec::with_capacity(attempts);

    for attempt in 1..=attempts {
        if attempt > 1 {
            game.next_level();
        }

        let level = game.level();
        let enemies = game.enemies().len();
        let (status, history) = autopilot.play_level(&mut game);

        tracing::info!(
            "Attempt {}: level {} with {} enemies -> {:?} in {} turns",
            attempt,
            level,
            enemies,
            status,
            history.len()
        );

        levels.push(LevelRecord {
            attempt,
            level,
            enemies,
            status,
            turns: history.len(),
        });
    }

    compute_run_statistics(levels)
}

fn report_results(results: &RunResults, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(results) {
            println!("{}", text);
        }
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

pub fn compute_run_statistics(levels: Vec<LevelRecord>) -> RunResults {
    let count = |status: GameStatus| levels.iter().filter(|l| l.status == status).count();

    RunResults {
        successes: count(GameStatus::Success),
        failures: count(GameStatus::Failure),
        stuck: count(GameStatus::Stuck),
        unfinished: count(GameStatus::InProgress),
        highest_level: levels
            .iter()
            .filter(|l| l.status == GameStatus::Success)
            .map(|l| l.level)
            .max()
            .unwrap_or(0),
        levels,
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn print_text_results(results: &RunResults) {
    println!("\n=== Autoplay Results ===");
    println!("Attempts:      {}", results.levels.len());
    println!("Successes:     {}", results.successes);
    println!("Failures:      {}", results.failures);
    println!("Stuck:         {}", results.stuck);
    println!("Unfinished:    {}", results.unfinished);
    println!("Highest level: {}", results.highest_level);

    println!("\nAttempt details:");
    for record in &results.levels {
        println!(
            "  #{} level {} ({} enemies): {:?} in {} turns",
            record.attempt, record.level, record.enemies, record.status, record.turns
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(attempt: usize, level: u32, status: GameStatus) -> LevelRecord {
        LevelRecord {
            attempt,
            level,
            enemies: level as usize,
            status,
            turns: 10,
        }
    }

    #[test]
    fn test_compute_run_statistics_empty() {
        let results = compute_run_statistics(vec![]);
        assert_eq!(results.successes, 0);
        assert_eq!(results.highest_level, 0);
    }

    #[test]
    fn test_compute_run_statistics() {
        let results = compute_run_statistics(vec![
            record(1, 1, GameStatus::Success),
            record(2, 2, GameStatus::Success),
            record(3, 3, GameStatus::Failure),
            record(4, 1, GameStatus::Stuck),
            record(5, 1, GameStatus::InProgress),
        ]);
        assert_eq!(results.successes, 2);
        assert_eq!(results.failures, 1);
        assert_eq!(results.stuck, 1);
        assert_eq!(results.unfinished, 1);
        assert_eq!(results.highest_level, 2);
    }

    #[test]
    fn test_play_run_levels_follow_outcomes() {
        let config = GameConfig {
            seed: Some(21),
            ..GameConfig::default()
        };
        let results = play_run(Game::new(config).unwrap(), 4, &Autopilot::new(100));
        assert_eq!(results.levels.len(), 4);
        for pair in results.levels.windows(2) {
            let expected = if pair[0].status == GameStatus::Success {
                pair[0].level + 1
            } else {
                1
            };
            assert_eq!(pair[1].level, expected);
            assert_eq!(pair[1].enemies, expected as usize);
        }
    }
}
