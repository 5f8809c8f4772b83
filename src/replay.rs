// Replay module for auditing logged turns
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-check each logged move against the board it was chosen on
// 3. Summarize how often the fallback was needed or an unsafe move slipped through

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::types::{Battlesnake, Direction};

/// Outcome of re-checking a single logged turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The logged move was on the board and unoccupied
    Safe,
    /// Nothing was safe, the logged move was the configured fallback
    Fallback,
    /// Nothing was safe and the logged move was not the fallback
    UnexpectedFallback,
    /// The logged move was unsafe although a safe move existed
    Unsafe,
}

/// Result of auditing a single turn
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub turn: i32,
    pub logged_move: Direction,
    pub safe_moves: Vec<Direction>,
    pub verdict: Verdict,
}

/// Statistics for a complete audit session
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AuditStats {
    pub total_turns: usize,
    pub safe: usize,
    pub fallback: usize,
    pub unexpected_fallback: usize,
    pub unsafe_moves: usize,
}

impl AuditStats {
    /// True when every logged move was safe or a legitimate fallback
    pub fn is_clean(&self) -> bool {
        self.unsafe_moves == 0 && self.unexpected_fallback == 0
    }
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
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let entries = Self::parse_lines(BufReader::new(file))?;
        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Parses JSONL from any buffered reader, skipping blank lines
    pub fn parse_lines<R: BufRead>(reader: R) -> Result<Vec<DebugLogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Re-checks one logged move against the board it was made on
    pub fn audit_entry(&self, entry: &DebugLogEntry) -> Result<AuditResult, String> {
        let you = Self::find_snake(entry)?;
        let safe_moves = Bot::safe_moves(&entry.board, you);
        let fallback = self.config.selection.fallback_direction;

        let verdict = if safe_moves.contains(&entry.chosen_move) {
            Verdict::Safe
        } else if !safe_moves.is_empty() {
            Verdict::Unsafe
        } else if entry.chosen_move == fallback {
            Verdict::Fallback
        } else {
            Verdict::UnexpectedFallback
        };

        if self.verbose {
            match verdict {
                Verdict::Safe | Verdict::Fallback => info!(
                    "Turn {}: {} ({:?}, safe: {:?})",
                    entry.turn,
                    entry.chosen_move.as_str(),
                    verdict,
                    safe_moves
                ),
                _ => warn!(
                    "Turn {}: {} ({:?}, safe: {:?})",
                    entry.turn,
                    entry.chosen_move.as_str(),
                    verdict,
                    safe_moves
                ),
            }
        }

        Ok(AuditResult {
            turn: entry.turn,
            logged_move: entry.chosen_move,
            safe_moves,
            verdict,
        })
    }

    /// Audits every entry in parallel, keeping log order in the results
    pub fn audit_all(
        &self,
        entries: &[DebugLogEntry],
    ) -> Result<(Vec<AuditResult>, AuditStats), String> {
        let results = entries
            .par_iter()
            .map(|entry| self.audit_entry(entry))
            .collect::<Result<Vec<_>, String>>()?;

        let stats = Self::calculate_stats(&results);
        Ok((results, stats))
    }

    /// Tallies verdicts
    pub fn calculate_stats(results: &[AuditResult]) -> AuditStats {
        let mut stats = AuditStats {
            total_turns: results.len(),
            ..AuditStats::default()
        };

        for result in results {
            match result.verdict {
                Verdict::Safe => stats.safe += 1,
                Verdict::Fallback => stats.fallback += 1,
                Verdict::UnexpectedFallback => stats.unexpected_fallback += 1,
                Verdict::Unsafe => stats.unsafe_moves += 1,
            }
        }

        stats
    }

    /// Prints a summary report
    pub fn print_report(&self, results: &[AuditResult], stats: &AuditStats) {
        println!("\n========== AUDIT REPORT ==========");
        println!("Total turns audited: {}", stats.total_turns);
        println!("Safe moves:          {}", stats.safe);
        println!("Fallback moves:      {}", stats.fallback);
        println!("Unexpected fallback: {}", stats.unexpected_fallback);
        println!("Unsafe moves:        {}", stats.unsafe_moves);

        let flagged: Vec<&AuditResult> = results
            .iter()
            .filter(|r| matches!(r.verdict, Verdict::Unsafe | Verdict::UnexpectedFallback))
            .collect();

        if !flagged.is_empty() {
            println!("\n---------- Flagged turns ----------");
            for result in flagged {
                let safe: Vec<&str> = result.safe_moves.iter().map(|d| d.as_str()).collect();
                println!(
                    "Turn {:4}: logged {:5} safe [{}] {:?}",
                    result.turn,
                    result.logged_move.as_str(),
                    safe.join(", "),
                    result.verdict
                );
            }
        }

        println!("==================================\n");
    }

    /// Looks up the snake that made the logged move
    fn find_snake(entry: &DebugLogEntry) -> Result<&Battlesnake, String> {
        entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .ok_or_else(|| {
                format!(
                    "Turn {}: snake with id '{}' not found in board state",
                    entry.turn, entry.you_id
                )
            })
    }
}
