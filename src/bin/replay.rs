// Standalone audit tool for Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --turns <turn1,turn2>  Audit specific turns only (comma-separated)
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)
//
// Exits with status 1 when any logged move was unsafe while a safe one existed.

use std::env;
use std::process;

use wary_snake::config::Config;
use wary_snake::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --turns <T1,T2,...>     Audit specific turns (comma-separated)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay battlesnake_debug.jsonl");
    eprintln!("  replay battlesnake_debug.jsonl --turns 5,10,15 --verbose");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let wants_help = args.iter().any(|a| a == "--help");

    if args.len() < 2 || wants_help {
        print_usage();
        process::exit(if wants_help { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut turns: Option<Vec<i32>> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--turns" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --turns requires an argument");
                    process::exit(1);
                };
                match parse_turns(value) {
                    Ok(t) => turns = Some(t),
                    Err(e) => {
                        eprintln!("Error parsing turns: {}", e);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                };
                config_path = value.clone();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, verbose);

    let mut entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if let Some(turns) = &turns {
        entries.retain(|entry| turns.contains(&entry.turn));
    }

    if entries.is_empty() {
        eprintln!("Error: No log entries to audit");
        process::exit(1);
    }

    println!("Auditing {} turn(s) from {}...", entries.len(), log_file);

    match engine.audit_all(&entries) {
        Ok((results, stats)) => {
            engine.print_report(&results, &stats);
            if !stats.is_clean() {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error during audit: {}", e);
            process::exit(1);
        }
    }
}
