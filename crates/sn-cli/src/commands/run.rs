use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sn_engine::{Elimination, StoryEngine};

pub fn run(
    scenario: &str,
    characters: &str,
    ticks: u64,
    kill_every: Option<u64>,
    seed: Option<u64>,
    windows: Option<&Path>,
    verbose: bool,
) -> Result<(), String> {
    let (config, seed) = super::build_config(scenario, seed, windows)?;
    let mut engine = StoryEngine::new(config).map_err(|e| e.to_string())?;
    engine.enable();

    let names: Vec<&str> = characters.split(',').collect();
    let intro = engine
        .initialize(names)
        .map_err(|e| e.to_string())?
        .ok_or("engine refused to start")?;

    println!(
        "  {} '{scenario}' {}",
        "Night".bold(),
        format!("({ticks} messages, seed={seed})").dimmed()
    );
    println!("  {}", intro.text.italic());
    println!("  Starting at {}", engine.clock());
    println!();

    let mut events = 0;
    for n in 1..=ticks {
        let Some(tick) = engine.advance() else {
            break;
        };
        if verbose {
            println!("  {}", format!("[msg {n:>3}] {tick}").dimmed());
        }
        if let Some(event) = &tick.event {
            events += 1;
            println!("  {}", event.to_string().red());
        }
        if kill_every.is_some_and(|k| k > 0 && n % k == 0)
            && let Some(outcome) = engine.eliminate()
        {
            match outcome {
                Elimination::Disappeared { .. } => {
                    println!("  {} {outcome}", "GONE".red().bold());
                }
                Elimination::FinalSurvivor { .. } => {
                    println!("  {}  {outcome}", "LAST".yellow().bold());
                }
            }
        }
    }
    if events == 0 {
        println!("  {}", "(nothing stirred)".dimmed());
    }
    println!();

    println!("  {}", "Survivors".bold().underline());
    println!();

    let roster = engine.roster();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Character", "Status"]);
    for name in roster.all() {
        let status = if roster.is_active(name) {
            "present"
        } else {
            "missing"
        };
        table.add_row(vec![name.as_str(), status]);
    }
    println!("{table}");
    println!();
    println!(
        "  Ended at {} with {} of {} still here, {events} events",
        engine.clock(),
        roster.active_count(),
        roster.all().len()
    );

    Ok(())
}
