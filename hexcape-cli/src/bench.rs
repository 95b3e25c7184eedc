//! Bench command - seeded autopilot games in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: seeding, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use hexcape_core::{Autopilot, Game, GameConfig};

use crate::autoplay::play_run;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Number of games (one seed each)
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Level attempts per game
    #[arg(long, default_value = "5")]
    pub levels: usize,

    /// Give up on a level after this many turns
    #[arg(long, default_value = "200")]
    pub max_turns: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one seeded game
#[derive(Clone, Debug)]
struct GameSummary {
    successes: usize,
    failures: usize,
    stuck: usize,
    unfinished: usize,
    highest_level: u32,
}

/// All bench results
#[derive(Clone, Debug, serde::Serialize)]
struct BenchResults {
    games: usize,
    attempts: usize,
    success_rate: f32,
    failure_rate: f32,
    stuck_rate: f32,
    unfinished: usize,
    avg_highest_level: f32,
    best_level: u32,
    elapsed_ms: u128,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: BenchArgs, config: GameConfig) -> Result<()> {
    let base_seed = create_rng(config.seed).gen::<u64>();

    tracing::info!(
        "Starting bench: {} games x {} levels (base seed {})",
        args.games,
        args.levels,
        base_seed
    );

    let start = Instant::now();
    let summaries = run_games(&args, &config, base_seed)?;
    let results = compute_statistics(&summaries, args.levels, start.elapsed());

    report_results(&results, args.json);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Execute games in parallel using rayon
fn run_games(args: &BenchArgs, config: &GameConfig, base_seed: u64) -> Result<Vec<GameSummary>> {
    let autopilot = Autopilot::new(args.max_turns);

    (0..args.games)
        .into_par_iter()
        .map(|index| {
            let seed = base_seed.wrapping_add(index as u64);
            play_single_game(config, seed, args.levels, &autopilot)
        })
        .collect()
}

fn report_results(results: &BenchResults, json: bool) {
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

fn play_single_game(
    config: &GameConfig,
    seed: u64,
    levels: usize,
    autopilot: &Autopilot,
) -> Result<GameSummary> {
    let config = GameConfig {
        seed: Some(seed),
        ..config.clone()
    };
    let game = Game::new(config)?;
    let run = play_run(game, levels, autopilot);

    Ok(GameSummary {
        successes: run.successes,
        failures: run.failures,
        stuck: run.stuck,
        unfinished: run.unfinished,
        highest_level: run.highest_level,
    })
}

fn compute_statistics(summaries: &[GameSummary], levels: usize, elapsed: Duration) -> BenchResults {
    let attempts = summaries.len() * levels;
    let rate = |n: usize| {
        if attempts > 0 {
            n as f32 / attempts as f32
        } else {
            0.0
        }
    };
    let total = |f: fn(&GameSummary) -> usize| summaries.iter().map(f).sum::<usize>();

    BenchResults {
        games: summaries.len(),
        attempts,
        success_rate: rate(total(|s| s.successes)),
        failure_rate: rate(total(|s| s.failures)),
        stuck_rate: rate(total(|s| s.stuck)),
        unfinished: total(|s| s.unfinished),
        avg_highest_level: if summaries.is_empty() {
            0.0
        } else {
            summaries.iter().map(|s| s.highest_level as f32).sum::<f32>() / summaries.len() as f32
        },
        best_level: summaries.iter().map(|s| s.highest_level).max().unwrap_or(0),
        elapsed_ms: elapsed.as_millis(),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_text_results(results: &BenchResults) {
    println!("\n=== Bench Results ===");
    println!("Games:          {}", results.games);
    println!("Level attempts: {}", results.attempts);
    println!("Success rate:   {:.1}%", results.success_rate * 100.0);
    println!("Failure rate:   {:.1}%", results.failure_rate * 100.0);
    println!("Stuck rate:     {:.1}%", results.stuck_rate * 100.0);
    println!("Unfinished:     {}", results.unfinished);
    println!("Avg best level: {:.2}", results.avg_highest_level);
    println!("Best level:     {}", results.best_level);
    println!("Elapsed:        {} ms", results.elapsed_ms);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(&[], 5, Duration::ZERO);
        assert_eq!(results.games, 0);
        assert_eq!(results.success_rate, 0.0);
        assert_eq!(results.avg_highest_level, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let summaries = vec![
            GameSummary { successes: 2, failures: 0, stuck: 0, unfinished: 0, highest_level: 2 },
            GameSummary { successes: 0, failures: 1, stuck: 1, unfinished: 0, highest_level: 0 },
        ];
        let results = compute_statistics(&summaries, 2, Duration::from_millis(5));
        assert_eq!(results.attempts, 4);
        assert_eq!(results.success_rate, 0.5);
        assert_eq!(results.failure_rate, 0.25);
        assert_eq!(results.stuck_rate, 0.25);
        assert_eq!(results.avg_highest_level, 1.0);
        assert_eq!(results.best_level, 2);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_single_game_is_reproducible() {
        let config = GameConfig::default();
        let autopilot = Autopilot::new(60);
        let a = play_single_game(&config, 99, 2, &autopilot).unwrap();
        let b = play_single_game(&config, 99, 2, &autopilot).unwrap();
        assert_eq!(a.highest_level, b.highest_level);
        assert_eq!(a.successes, b.successes);
    }
}
