//! Event windows: time ranges that carry a pool of horror messages.

use serde::{Deserialize, Serialize};

use crate::clock::format_time;
use crate::error::{SlasherError, SlasherResult};
use crate::template::Template;

/// How likely a matched window is to fire on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerChance {
    /// The same probability everywhere in the window.
    Fixed(f64),
    /// Linear ramp from the window start to its end.
    Ramp {
        /// Probability exactly at `start`.
        at_start: f64,
        /// Probability exactly at `end`.
        at_end: f64,
    },
}

/// A labelled span of story time with a message pool.
///
/// Windows are half-open `[start, end)` unless `inclusive_end` is set, and
/// unbounded when `end` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWindow {
    /// Display label, e.g. `"11PM"`.
    pub label: String,
    /// First minute of the window.
    pub start: u32,
    /// Last minute (see `inclusive_end`), or open-ended.
    #[serde(default)]
    pub end: Option<u32>,
    /// Whether `end` itself belongs to the window.
    #[serde(default)]
    pub inclusive_end: bool,
    /// Trigger policy; the engine default applies when absent.
    #[serde(default)]
    pub chance: Option<TriggerChance>,
    /// Message pool.
    pub templates: Vec<Template>,
}

impl EventWindow {
    /// Create an open-ended window starting at `start` with the given pool.
    pub fn new(label: impl Into<String>, start: u32, pool: &[&str]) -> SlasherResult<Self> {
        let templates = pool
            .iter()
            .map(|raw| Template::parse(raw))
            .collect::<SlasherResult<Vec<_>>>()?;
        Ok(Self {
            label: label.into(),
            start,
            end: None,
            inclusive_end: false,
            chance: None,
            templates,
        })
    }

    /// Close the window before `end`.
    pub fn until(mut self, end: u32) -> Self {
        self.end = Some(end);
        self.inclusive_end = false;
        self
    }

    /// Close the window after `end`.
    pub fn through(mut self, end: u32) -> Self {
        self.end = Some(end);
        self.inclusive_end = true;
        self
    }

    /// Set the trigger policy.
    pub fn with_chance(mut self, chance: TriggerChance) -> Self {
        self.chance = Some(chance);
        self
    }

    /// Whether the given time falls inside this window.
    pub fn contains(&self, minutes: u32) -> bool {
        if minutes < self.start {
            return false;
        }
        match self.end {
            None => true,
            Some(end) if self.inclusive_end => minutes <= end,
            Some(end) => minutes < end,
        }
    }

    /// Trigger probability at `minutes`, falling back to `default` for
    /// windows without their own policy.
    pub fn probability_at(&self, minutes: u32, default: f64) -> f64 {
        match self.chance.unwrap_or(TriggerChance::Fixed(default)) {
            TriggerChance::Fixed(p) => p,
            TriggerChance::Ramp { at_start, at_end } => {
                let Some(end) = self.end.filter(|e| *e > self.start) else {
                    return at_start;
                };
                let elapsed = f64::from(minutes.saturating_sub(self.start));
                let fraction = (elapsed / f64::from(end - self.start)).clamp(0.0, 1.0);
                at_start + fraction * (at_end - at_start)
            }
        }
    }

    /// Check the window is usable by the engine.
    pub fn validate(&self) -> SlasherResult<()> {
        let fail = |reason: &str| {
            Err(SlasherError::InvalidWindow {
                label: self.label.clone(),
                reason: reason.to_string(),
            })
        };

        if self.label.trim().is_empty() {
            return fail("label is empty");
        }
        if self.templates.is_empty() {
            return fail("message pool is empty");
        }
        if let Some(end) = self.end
            && end <= self.start
        {
            return fail("end must be after start");
        }
        match self.chance {
            Some(TriggerChance::Fixed(p)) if !is_probability(p) => {
                fail("probability must be within 0..=1")
            }
            Some(TriggerChance::Ramp { at_start, at_end }) => {
                if !is_probability(at_start) || !is_probability(at_end) {
                    fail("probability must be within 0..=1")
                } else if self.end.is_none() {
                    fail("a ramped chance needs a bounded end")
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Human-readable span, e.g. `8:45 PM - 9:15 PM`.
    pub fn span(&self) -> String {
        match self.end {
            Some(end) => format!("{} - {}", format_time(self.start), format_time(end)),
            None => format!("{} onward", format_time(self.start)),
        }
    }
}

pub(crate) fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// First window, in configured order, that contains `minutes`.
pub fn time_window(windows: &[EventWindow], minutes: u32) -> Option<&EventWindow> {
    windows.iter().find(|w| w.contains(minutes))
}

/// Parse and validate a JSON array of windows.
pub fn windows_from_json(json: &str) -> SlasherResult<Vec<EventWindow>> {
    let windows: Vec<EventWindow> = serde_json::from_str(json)?;
    for window in &windows {
        window.validate()?;
    }
    Ok(windows)
}
