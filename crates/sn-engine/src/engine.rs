//! The story clock and horror event engine.
//!
//! `StoryEngine` owns everything a night needs: the enabled flag, the clock,
//! the roster and the RNG. Hosts drive it one call per external trigger
//! (typically one call to [`StoryEngine::advance`] per user message) and
//! render whatever narration comes back. A multi-threaded host should wrap
//! the whole engine in a single mutex.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{StoryClock, format_time};
use crate::config::{SlasherConfig, StepPolicy, clamp_increment};
use crate::error::SlasherResult;
use crate::roster::{NOBODY, Roster};
use crate::settings::Settings;
use crate::window::{EventWindow, time_window};

/// Narration emitted when a new game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introduction {
    /// The cast, in turn order.
    pub participants: Vec<String>,
    /// The scene-setting line.
    pub text: String,
}

impl std::fmt::Display for Introduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slasher Night initialized with characters: {}\n{}",
            self.participants.join(", "),
            self.text
        )
    }
}

/// A horror event that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorrorEvent {
    /// Label of the window it came from.
    pub window: String,
    /// Clock value when it fired.
    pub time: u32,
    /// The resolved message.
    pub text: String,
}

impl std::fmt::Display for HorrorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[Slasher] [{}] {}", format_time(self.time), self.text)
    }
}

/// Result of one clock advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Minutes added.
    pub step: u32,
    /// Clock value after the step.
    pub time: u32,
    /// The event that fired on this tick, if any.
    pub event: Option<HorrorEvent>,
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time advanced by {} minutes. Current time: {}",
            self.step,
            format_time(self.time)
        )
    }
}

/// Outcome of an elimination attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Elimination {
    /// Someone was removed from the active set.
    Disappeared {
        /// Who vanished.
        name: String,
        /// How many are still in play.
        remaining: usize,
    },
    /// Nobody was removed because one or fewer remain.
    FinalSurvivor {
        /// The last one standing, if the game has a cast at all.
        survivor: Option<String>,
    },
}

impl std::fmt::Display for Elimination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disappeared { name, .. } => write!(f, "{name} has disappeared..."),
            Self::FinalSurvivor { survivor: Some(name) } => write!(
                f,
                "Not enough characters to kill. {name}, the final survivor, remains."
            ),
            Self::FinalSurvivor { survivor: None } => {
                write!(f, "Not enough characters to kill. The final survivor remains.")
            }
        }
    }
}

/// Story clock, roster and event windows for one night.
#[derive(Debug, Clone)]
pub struct StoryEngine {
    enabled: bool,
    clock: StoryClock,
    roster: Roster,
    step: StepPolicy,
    default_chance: f64,
    windows: Vec<EventWindow>,
    intro: String,
    rng: StdRng,
}

impl StoryEngine {
    /// Build an engine from a validated configuration. Starts disabled.
    pub fn new(config: SlasherConfig) -> SlasherResult<Self> {
        config.validate()?;
        Ok(Self {
            enabled: false,
            clock: StoryClock::new(config.start_time),
            roster: Roster::default(),
            step: config.step,
            default_chance: config.default_chance,
            windows: config.windows,
            intro: config.intro,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Whether the engine reacts to calls.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the engine on.
    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Turn the engine off. State is kept.
    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    /// Set the enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!(enabled, "slasher logic toggled");
        }
        self.enabled = enabled;
    }

    /// The story clock.
    pub fn clock(&self) -> &StoryClock {
        &self.clock
    }

    /// The roster of the current game.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Configured event windows.
    pub fn windows(&self) -> &[EventWindow] {
        &self.windows
    }

    /// Current step policy.
    pub fn step(&self) -> StepPolicy {
        self.step
    }

    /// Start a new game with the given cast.
    ///
    /// Replaces the roster, resets the clock and returns the introduction.
    /// Does nothing while disabled.
    pub fn initialize<I, S>(&mut self, participants: I) -> SlasherResult<Option<Introduction>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.enabled {
            return Ok(None);
        }
        self.roster = Roster::new(participants)?;
        self.clock.reset();
        info!(
            participants = self.roster.all().len(),
            time = %self.clock,
            "game initialized"
        );
        Ok(Some(Introduction {
            participants: self.roster.all().to_vec(),
            text: self.intro.clone(),
        }))
    }

    /// Move the clock forward one step and roll for an event.
    pub fn advance(&mut self) -> Option<Tick> {
        if !self.enabled {
            return None;
        }
        let step = self.step.draw(&mut self.rng);
        let time = self.clock.advance(step);
        debug!(step, time = %self.clock, "clock advanced");
        let event = self.check_for_event();
        Some(Tick { step, time, event })
    }

    /// Roll for an event at the current time.
    ///
    /// The first window containing the clock decides the probability; one
    /// uniform draw below it fires a random message from that window.
    pub fn check_for_event(&mut self) -> Option<HorrorEvent> {
        if !self.enabled {
            return None;
        }
        let now = self.clock.minutes();
        let index = self.windows.iter().position(|w| w.contains(now))?;
        let chance = self.windows[index].probability_at(now, self.default_chance);
        let roll: f64 = self.rng.random();
        debug!(
            window = %self.windows[index].label,
            chance,
            roll,
            "event roll"
        );
        if roll >= chance {
            return None;
        }
        self.perform_event(index)
    }

    /// Fire a message from a random window, ignoring time and probability.
    pub fn force_event(&mut self) -> Option<HorrorEvent> {
        if !self.enabled || self.windows.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.windows.len());
        self.perform_event(index)
    }

    fn perform_event(&mut self, index: usize) -> Option<HorrorEvent> {
        let window = &self.windows[index];
        if window.templates.is_empty() {
            return None;
        }
        let template = &window.templates[self.rng.random_range(0..window.templates.len())];

        let needs_cast = template.uses_primary() || template.uses_secondary();
        let primary = if needs_cast {
            self.roster.pick(&mut self.rng).unwrap_or(NOBODY)
        } else {
            NOBODY
        };
        let secondary = if template.uses_secondary() {
            self.roster
                .pick_excluding(&mut self.rng, primary)
                .unwrap_or(NOBODY)
        } else {
            NOBODY
        };

        let event = HorrorEvent {
            window: window.label.clone(),
            time: self.clock.minutes(),
            text: template.render(primary, secondary),
        };
        info!(window = %event.window, time = %self.clock, "horror event fired");
        Some(event)
    }

    /// Make one random active participant disappear.
    ///
    /// With one or fewer left, nothing is removed and the final-survivor
    /// notice is returned instead. Does nothing while disabled.
    pub fn eliminate(&mut self) -> Option<Elimination> {
        if !self.enabled {
            return None;
        }
        match self.roster.eliminate_random(&mut self.rng) {
            Some(name) => {
                let remaining = self.roster.active_count();
                info!(%name, remaining, "participant disappeared");
                Some(Elimination::Disappeared { name, remaining })
            }
            None => {
                debug!("elimination refused, final survivor");
                Some(Elimination::FinalSurvivor {
                    survivor: self.roster.survivor().map(str::to_string),
                })
            }
        }
    }

    /// Label of the window the clock currently sits in.
    pub fn current_window(&self) -> Option<&EventWindow> {
        time_window(&self.windows, self.clock.minutes())
    }

    /// Put the clock back to its start time.
    pub fn reset_time(&mut self) {
        self.clock.reset();
        info!(time = %self.clock, "clock reset");
    }

    /// Switch to a fixed per-advance increment, clamped to 1-180 minutes.
    /// Returns the value actually applied.
    pub fn set_time_increment(&mut self, minutes: u32) -> u32 {
        let minutes = clamp_increment(minutes);
        self.step = StepPolicy::Fixed(minutes);
        debug!(minutes, "time increment set");
        minutes
    }

    /// Snapshot of the host-visible settings.
    ///
    /// Only a fixed step is reported as `time_increment`.
    pub fn settings(&self) -> Settings {
        Settings {
            enabled: self.enabled,
            time_increment: match self.step {
                StepPolicy::Fixed(n) => Some(n),
                StepPolicy::Uniform { .. } => None,
            },
            current_time: self.clock.minutes(),
        }
    }

    /// Apply persisted host settings.
    ///
    /// A saved increment pins the step to that fixed value; without one the
    /// configured step policy is kept.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.enabled = settings.enabled;
        if let Some(minutes) = settings.time_increment {
            self.step = StepPolicy::Fixed(clamp_increment(minutes));
        }
        self.clock.restore(settings.current_time);
        debug!(?settings, "settings applied");
    }
}
