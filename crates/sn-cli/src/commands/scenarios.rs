use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sn_engine::{Scenario, TriggerChance, format_time};

pub fn run() -> Result<(), String> {
    for scenario in Scenario::ALL {
        let config = scenario.config().map_err(|e| e.to_string())?;
        println!(
            "  {} {}",
            scenario.to_string().bold(),
            format!("(starts {}, {} per message)", format_time(config.start_time), config.step)
                .dimmed()
        );

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Window", "Time", "Chance", "Messages"]);
        for window in &config.windows {
            let chance = match window.chance {
                Some(TriggerChance::Fixed(p)) => format!("{:.0}%", p * 100.0),
                Some(TriggerChance::Ramp { at_start, at_end }) => {
                    format!("{:.0}% -> {:.0}%", at_start * 100.0, at_end * 100.0)
                }
                None => format!("{:.0}%", config.default_chance * 100.0),
            };
            table.add_row(vec![
                window.label.clone(),
                window.span(),
                chance,
                window.templates.len().to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }
    Ok(())
}
