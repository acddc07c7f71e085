use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use sn_engine::{JsonFileStore, MemoryStore, SettingsStore, SlasherSession};

pub fn run(
    scenario: &str,
    seed: Option<u64>,
    settings: Option<&Path>,
    windows: Option<&Path>,
) -> Result<(), String> {
    let (config, seed) = super::build_config(scenario, seed, windows)?;

    let store: Box<dyn SettingsStore> = match settings {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };
    let mut session = SlasherSession::new(config, store)
        .map_err(|e| format!("failed to start session: {e}"))?;

    let engine = session.engine();
    println!("  {} Slasher Night ({scenario})", "Starting".bold());
    println!(
        "  Time: {} | Logic: {} | Seed: {seed}",
        engine.clock(),
        if engine.is_enabled() { "enabled" } else { "disabled" }
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}\n", paint(&output));
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}

/// Colour narration lines by what they announce.
fn paint(output: &str) -> String {
    output
        .lines()
        .map(|line| {
            if line.starts_with("[Slasher]") {
                line.red().to_string()
            } else if line.contains("has disappeared") {
                line.red().bold().to_string()
            } else if line.starts_with("Time advanced") {
                line.dimmed().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
