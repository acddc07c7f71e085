pub mod play;
pub mod run;
pub mod scenarios;
pub mod time;

use std::path::Path;

use sn_engine::{Scenario, SlasherConfig, windows_from_json};

/// Build an engine configuration from CLI options.
///
/// A missing seed is drawn at random so each night differs.
fn build_config(
    scenario: &str,
    seed: Option<u64>,
    windows: Option<&Path>,
) -> Result<(SlasherConfig, u64), String> {
    let scenario: Scenario = scenario.parse()?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut config = scenario
        .config()
        .map_err(|e| format!("scenario {scenario}: {e}"))?
        .with_seed(seed);

    if let Some(path) = windows {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let table = windows_from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
        tracing::debug!(count = table.len(), path = %path.display(), "loaded event windows");
        config = config.with_windows(table);
    }

    Ok((config, seed))
}
