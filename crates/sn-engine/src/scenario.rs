//! Built-in scenarios: ready-made window tables, clocks and step policies.

use crate::clock::hm;
use crate::config::{SlasherConfig, StepPolicy};
use crate::error::SlasherResult;
use crate::window::{EventWindow, TriggerChance};

const NINE_PM: &[&str] = &[
    "A window slams shut. No wind.",
    "[CHAR] hears faint whispers from the woods.",
    "A shadow moves outside, but when [CHAR] looks, it's gone.",
    "The lights flicker, then return to normal.",
    "[CHAR]'s phone vibrates. It's an unknown number.",
];

const ELEVEN_PM: &[&str] = &[
    "Someone's phone rings. Unknown Caller.",
    "Footsteps creak upstairs... but everyone is here.",
    "A painting on the wall is now crooked, though no one touched it.",
    "[CHAR] swears they just heard their name whispered in their ear.",
];

const AFTER_MIDNIGHT: &[&str] = &[
    "A loud THUMP echoes from the upper floor.",
    "[CHAR] glances around. 'Wait... where's [CHAR2]?'",
    "A smear of blood appears on the floor.",
    "You hear scratching at the door, but there's nothing outside.",
];

const CHILL: &[&str] = &["A sudden chill sweeps through the room. A window slams shut by itself..."];

const THUMP: &[&str] =
    &["An eerie thump echoes from upstairs... Something (or someone) is moving in the dark."];

/// A named, pre-built night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Friends at a lake house from 6 PM. Three pooled windows, each firing
    /// half the time, and 10-15 minutes per message.
    #[default]
    LakeHouse,
    /// An old farmhouse from 7:30 PM. Two short windows whose chance ramps
    /// up to certainty, and 15 minutes per message.
    Farmhouse,
}

impl Scenario {
    /// All scenarios, for listings.
    pub const ALL: [Scenario; 2] = [Scenario::LakeHouse, Scenario::Farmhouse];

    /// Parse a scenario name (case-insensitive, `-`/`_`/space agnostic).
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "lakehouse" | "lake" => Some(Self::LakeHouse),
            "farmhouse" | "farm" => Some(Self::Farmhouse),
            _ => None,
        }
    }

    /// Event windows in priority order.
    pub fn windows(self) -> SlasherResult<Vec<EventWindow>> {
        match self {
            Self::LakeHouse => Ok(vec![
                EventWindow::new("9PM", hm(21, 0), NINE_PM)?.until(hm(23, 0)),
                EventWindow::new("11PM", hm(23, 0), ELEVEN_PM)?.until(hm(24, 0)),
                EventWindow::new("12:30AM", hm(24, 0), AFTER_MIDNIGHT)?,
            ]),
            Self::Farmhouse => Ok(vec![
                EventWindow::new("Chill", hm(20, 45), CHILL)?
                    .through(hm(21, 15))
                    .with_chance(TriggerChance::Ramp {
                        at_start: 0.1,
                        at_end: 1.0,
                    }),
                EventWindow::new("Upstairs", hm(23, 0), THUMP)?
                    .through(hm(23, 30))
                    .with_chance(TriggerChance::Ramp {
                        at_start: 0.3,
                        at_end: 1.0,
                    }),
            ]),
        }
    }

    /// A full engine configuration for this scenario.
    pub fn config(self) -> SlasherResult<SlasherConfig> {
        let base = SlasherConfig::default().with_windows(self.windows()?);
        Ok(match self {
            Self::LakeHouse => base
                .with_start_time(hm(18, 0))
                .with_step(StepPolicy::Uniform { min: 10, max: 15 })
                .with_intro(
                    "The night is quiet as you and your friends arrive at the lake house. \
                     The air is crisp, the moon high. Nothing seems wrong... yet.",
                ),
            Self::Farmhouse => base.with_intro(
                "The farmhouse creaks as the last light fades. Somewhere a door swings on its hinges.",
            ),
        })
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LakeHouse => write!(f, "lake-house"),
            Self::Farmhouse => write!(f, "farmhouse"),
        }
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown scenario '{s}', use: lake-house, farmhouse"))
    }
}
