// Replay module for analyzing logged ticks and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the engine on historical snapshots with the logged history
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::engine::{DecisionEngine, DecisionOutcome};
use crate::types::{BoardSnapshot, Direction};

/// Represents a single line of the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub tick: u32,
    pub agent: String,
    pub chosen_move: Direction,
    /// Move history before this tick's choice, oldest first
    pub history: Vec<Direction>,
    pub board: BoardSnapshot,
    pub timestamp: String,
}

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tick: u32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub outcome: DecisionOutcome,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub fallbacks: usize,
    pub boxed: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    ///
    /// Each entry is replayed on a fresh engine seeded with the logged
    /// history, so entries can be replayed independently and out of order.
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying tick {}...", entry.tick);
        }

        let start_time = Instant::now();
        let mut engine = DecisionEngine::with_history(
            self.config.scoring.clone(),
            self.config.history.length,
            entry.history.iter().copied(),
        );
        let decision = engine
            .decide(&entry.board, &entry.agent)
            .map_err(|e| format!("Tick {}: {}", entry.tick, e))?;
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = decision.direction == entry.chosen_move;
        let result = ReplayResult {
            tick: entry.tick,
            original_move: entry.chosen_move,
            replayed_move: decision.direction,
            matches,
            outcome: decision.outcome,
            computation_time_us,
        };

        if self.verbose {
            if matches {
                info!(
                    "Tick {}: ✓ MATCH - {} ({:?}, time: {}us)",
                    entry.tick, decision.direction, decision.outcome, computation_time_us
                );
            } else {
                warn!(
                    "Tick {}: ✗ MISMATCH - Original: {}, Replayed: {} ({:?}, time: {}us)",
                    entry.tick,
                    entry.chosen_move,
                    decision.direction,
                    decision.outcome,
                    computation_time_us
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", entry.tick, e);
                }
            }
        }

        results
    }

    /// Replays specific ticks from a log file
    pub fn replay_ticks(
        &self,
        entries: &[LogEntry],
        ticks: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for tick in ticks {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log file", tick))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", tick, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let fallbacks = results
            .iter()
            .filter(|r| r.outcome == DecisionOutcome::Fallback)
            .count();
        let boxed = results
            .iter()
            .filter(|r| r.outcome == DecisionOutcome::Boxed)
            .count();
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_ticks,
            matches,
            mismatches: total_ticks - matches,
            fallbacks,
            boxed,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Ticks:    {}", stats.total_ticks);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Fallbacks:      {}", stats.fallbacks);
        println!("Boxed:          {}", stats.boxed);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Tick {}: {} → {} ({:?})",
                    result.tick, result.original_move, result.replayed_move, result.outcome
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (tick, acceptable_moves)
    ) -> Result<(), String> {
        for (tick, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Tick {}: Expected one of {:?}, but got {}",
                    tick,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}
