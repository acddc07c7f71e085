//! Story clock and horror event engine for Slasher Night.
//!
//! Advances an in-story clock one step per user message, rolls for
//! time-windowed horror events whose messages name random participants, and
//! makes participants disappear one at a time until a final survivor
//! remains. Also provides the host-facing pieces: a settings bag, slash
//! commands, built-in scenarios and a line-oriented session.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod roster;
pub mod scenario;
pub mod session;
pub mod settings;
pub mod template;
pub mod window;

pub use clock::{StoryClock, format_time, hm};
pub use command::{CommandOutput, CommandRegistry, SlashCommand};
pub use config::{SlasherConfig, StepPolicy};
pub use engine::{Elimination, HorrorEvent, Introduction, StoryEngine, Tick};
pub use error::{SlasherError, SlasherResult};
pub use roster::Roster;
pub use scenario::Scenario;
pub use session::SlasherSession;
pub use settings::{JsonFileStore, MemoryStore, Settings, SettingsStore};
pub use template::Template;
pub use window::{EventWindow, TriggerChance, time_window, windows_from_json};
