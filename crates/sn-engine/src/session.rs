//! Line-oriented host session.
//!
//! `SlasherSession` plays the role of the chat host: it feeds user lines to
//! the engine, dispatches slash commands through the registry, and writes
//! settings back to the store after every mutation. Keywords are commands only
//! when they stand alone (`init` and `increment` take an argument); every
//! other line counts as a user message and advances the clock once.

use crate::clock::format_time;
use crate::command::CommandRegistry;
use crate::config::{DEFAULT_INCREMENT, SlasherConfig};
use crate::engine::StoryEngine;
use crate::error::SlasherResult;
use crate::settings::{MemoryStore, SettingsStore};

const DISABLED_NOTICE: &str = "Slasher logic is disabled. Type 'enable' first.";

/// An interactive slasher night backed by a settings store.
pub struct SlasherSession<S: SettingsStore = MemoryStore> {
    engine: StoryEngine,
    registry: CommandRegistry,
    store: S,
}

impl<S: SettingsStore> SlasherSession<S> {
    /// Create a session, restoring any settings the store already holds.
    pub fn new(config: SlasherConfig, store: S) -> SlasherResult<Self> {
        let mut engine = StoryEngine::new(config)?;
        if let Some(saved) = store.load()? {
            engine.apply_settings(&saved);
        }
        Ok(Self {
            engine,
            registry: CommandRegistry::with_builtins(),
            store,
        })
    }

    /// The engine.
    pub fn engine(&self) -> &StoryEngine {
        &self.engine
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut StoryEngine {
        &mut self.engine
    }

    /// Registered slash commands.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process one line of input and return the text to show.
    pub fn process(&mut self, input: &str) -> SlasherResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        if trimmed.starts_with('/') {
            return self.do_slash(trimmed);
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        // Only `init` and `increment` take an argument. Any other keyword
        // followed by more words is ordinary chat.
        match (cmd.as_str(), rest.is_empty()) {
            ("init", _) => self.do_init(rest),
            ("increment", _) => self.do_increment(rest),
            ("enable" | "on", true) => self.do_toggle(true),
            ("disable" | "off", true) => self.do_toggle(false),
            ("advance" | "next", true) => self.do_advance(),
            ("kill", true) => self.do_kill(),
            ("event", true) => self.do_event(),
            ("reset", true) => self.do_reset(),
            ("time", true) => Ok(self.time_line()),
            ("status", true) => Ok(self.do_status()),
            ("windows", true) => Ok(self.do_windows()),
            ("help", true) => Ok(self.do_help()),
            ("quit" | "q", true) => Ok("Goodbye!".to_string()),
            // `say <text>` and anything else is a chat message from the user.
            _ => self.do_advance(),
        }
    }

    fn persist(&mut self) -> SlasherResult<()> {
        self.store.save(&self.engine.settings())
    }

    fn do_toggle(&mut self, enabled: bool) -> SlasherResult<String> {
        self.engine.set_enabled(enabled);
        self.persist()?;
        Ok(if enabled {
            "Slasher Night enabled. Let the horror begin.".to_string()
        } else {
            "Slasher Night disabled.".to_string()
        })
    }

    fn do_init(&mut self, rest: &str) -> SlasherResult<String> {
        let names: Vec<&str> = rest.split(',').collect();
        let output = match self.engine.initialize(names)? {
            Some(intro) => intro.to_string(),
            None => DISABLED_NOTICE.to_string(),
        };
        self.persist()?;
        Ok(output)
    }

    fn do_advance(&mut self) -> SlasherResult<String> {
        let Some(tick) = self.engine.advance() else {
            return Ok(String::new());
        };
        self.persist()?;
        let mut out = tick.to_string();
        if let Some(event) = &tick.event {
            out.push('\n');
            out.push_str(&event.to_string());
        }
        Ok(out)
    }

    fn do_kill(&mut self) -> SlasherResult<String> {
        Ok(self
            .engine
            .eliminate()
            .map(|outcome| outcome.to_string())
            .unwrap_or_default())
    }

    fn do_event(&mut self) -> SlasherResult<String> {
        if !self.engine.is_enabled() {
            return Ok(String::new());
        }
        Ok(match self.engine.force_event() {
            Some(event) => event.to_string(),
            None => "No event windows configured.".to_string(),
        })
    }

    fn do_slash(&mut self, line: &str) -> SlasherResult<String> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let output = self.registry.run(name, &mut self.engine, &args)?;
        self.persist()?;
        Ok(match output.narration {
            Some(narration) => format!("{narration}\n{}", output.status),
            None => output.status,
        })
    }

    fn do_increment(&mut self, rest: &str) -> SlasherResult<String> {
        let requested = rest.parse::<u32>().unwrap_or(DEFAULT_INCREMENT);
        let applied = self.engine.set_time_increment(requested);
        self.persist()?;
        Ok(format!("Time increment set to {applied} minutes."))
    }

    fn do_reset(&mut self) -> SlasherResult<String> {
        self.engine.reset_time();
        self.persist()?;
        Ok(format!("Time reset to {}.", self.engine.clock()))
    }

    fn time_line(&self) -> String {
        let mut out = format!("Current in-story time: {}", self.engine.clock());
        if let Some(window) = self.engine.current_window() {
            out.push_str(&format!(" ({} window)", window.label));
        }
        out
    }

    fn do_status(&self) -> String {
        let engine = &self.engine;
        let roster = engine.roster();
        let mut out = format!(
            "Slasher logic: {}\n",
            if engine.is_enabled() { "enabled" } else { "disabled" }
        );
        out.push_str(&self.time_line());
        out.push('\n');
        out.push_str(&format!("Time step: {}\n", engine.step()));
        if roster.is_empty() {
            out.push_str("No game initialized.");
            return out;
        }
        out.push_str(&format!(
            "Active: {}/{} ({})\n",
            roster.active_count(),
            roster.all().len(),
            roster.active().join(", ")
        ));
        let gone = roster.eliminated();
        if gone.is_empty() {
            out.push_str("Missing: none");
        } else {
            out.push_str(&format!("Missing: {}", gone.join(", ")));
        }
        out
    }

    fn do_windows(&self) -> String {
        let windows = self.engine.windows();
        if windows.is_empty() {
            return "No event windows configured.".to_string();
        }
        let mut out = format!("Event windows ({}):\n", windows.len());
        for (i, w) in windows.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} [{}] {} messages\n",
                i + 1,
                w.label,
                w.span(),
                w.templates.len()
            ));
        }
        out.trim_end().to_string()
    }

    fn do_help(&self) -> String {
        let mut out = String::from(
            "\
Slasher Night Commands:
  enable | disable              Toggle slasher logic
  init <name, name, ...>        Start a new night with these characters
  say <text> | advance          Send a message (advances the clock)
  kill                          Make a random character disappear
  event                         Force a random horror event
  increment <minutes>           Minutes per message (1-180)
  reset                         Reset the clock to ",
        );
        out.push_str(&format_time(self.engine.clock().start()));
        out.push_str(
            "
  time                          Show the in-story time
  status                        Show the state of the night
  windows                       List event windows
  help                          Show this help
  quit                          Exit

Slash commands:",
        );
        for command in self.registry.commands() {
            out.push_str(&format!("\n  /{:<28} {}", command.name, command.help));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::hm;
    use crate::scenario::Scenario;
    use crate::settings::Settings;

    fn session() -> SlasherSession {
        SlasherSession::new(SlasherConfig::default(), MemoryStore::new()).unwrap()
    }

    fn lake_house() -> SlasherSession {
        let mut s =
            SlasherSession::new(Scenario::LakeHouse.config().unwrap(), MemoryStore::new()).unwrap();
        s.process("enable").unwrap();
        s.process("init Jess, Mike, Ana").unwrap();
        s
    }

    #[test]
    fn empty_input() {
        let mut s = session();
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn init_requires_enable() {
        let mut s = session();
        let out = s.process("init A, B").unwrap();
        assert!(out.contains("disabled"));
        assert!(s.engine().roster().is_empty());
    }

    #[test]
    fn init_after_enable() {
        let s = lake_house();
        assert_eq!(s.engine().roster().active(), ["Jess", "Mike", "Ana"]);
        assert_eq!(s.engine().clock().minutes(), hm(18, 0));
    }

    #[test]
    fn init_empty_list_is_error() {
        let mut s = session();
        s.process("enable").unwrap();
        assert!(s.process("init  , ").is_err());
    }

    #[test]
    fn chat_line_advances_clock() {
        let mut s = lake_house();
        let out = s.process("Did anyone else hear that?").unwrap();
        assert!(out.starts_with("Time advanced by "));
        let now = s.engine().clock().minutes();
        assert!((hm(18, 10)..=hm(18, 15)).contains(&now));
    }

    #[test]
    fn chat_starting_with_a_keyword_is_still_chat() {
        let mut s = lake_house();
        let out = s.process("Kill the lights, Mike!").unwrap();
        assert!(out.starts_with("Time advanced by "));
        assert_eq!(s.engine().roster().active(), ["Jess", "Mike", "Ana"]);
        assert!(s.engine().clock().minutes() > hm(18, 0));

        let before = s.engine().clock().minutes();
        s.process("Start the car, hurry").unwrap();
        s.process("Time to go").unwrap();
        s.process("event horizon is a great movie").unwrap();
        assert_eq!(s.engine().roster().all(), ["Jess", "Mike", "Ana"]);
        assert!(s.engine().clock().minutes() >= before + 30);
    }

    #[test]
    fn bare_keywords_ignore_case() {
        let mut s = lake_house();
        assert!(s.process("KILL").unwrap().contains("has disappeared"));
        assert_eq!(s.engine().roster().active_count(), 2);
        assert_eq!(s.process("Time").unwrap(), "Current in-story time: 6:00 PM");
    }

    #[test]
    fn disabled_advance_is_silent() {
        let mut s = lake_house();
        s.process("disable").unwrap();
        let before = s.engine().clock().minutes();
        assert_eq!(s.process("say hello").unwrap(), "");
        assert_eq!(s.engine().clock().minutes(), before);
    }

    #[test]
    fn kill_until_final_survivor() {
        let mut s = lake_house();
        assert!(s.process("kill").unwrap().contains("has disappeared"));
        assert!(s.process("kill").unwrap().contains("has disappeared"));
        assert!(s.process("kill").unwrap().contains("final survivor"));
        assert_eq!(s.engine().roster().active_count(), 1);
        let status = s.process("status").unwrap();
        assert!(status.contains("Active: 1/3"));
        assert!(status.contains("Missing: "));
    }

    #[test]
    fn slash_killnext() {
        let mut s = lake_house();
        let out = s.process("/killnext").unwrap();
        assert!(out.contains("ominous shift"));
        assert!(out.ends_with("Initiated disappearance event."));
        assert_eq!(s.engine().roster().active_count(), 2);
    }

    #[test]
    fn unknown_slash_command() {
        let mut s = lake_house();
        assert!(s.process("/summon").is_err());
    }

    #[test]
    fn forced_event_uses_cast() {
        let mut s = lake_house();
        let out = s.process("event").unwrap();
        assert!(out.starts_with("[Slasher] [6:00 PM] "));
    }

    #[test]
    fn increment_clamps_and_falls_back() {
        let mut s = session();
        assert_eq!(
            s.process("increment 500").unwrap(),
            "Time increment set to 180 minutes."
        );
        assert_eq!(
            s.process("increment soon").unwrap(),
            "Time increment set to 15 minutes."
        );
    }

    #[test]
    fn reset_and_time() {
        let mut s = lake_house();
        s.process("advance").unwrap();
        assert_eq!(s.process("reset").unwrap(), "Time reset to 6:00 PM.");
        assert_eq!(s.process("time").unwrap(), "Current in-story time: 6:00 PM");
    }

    #[test]
    fn time_reports_window() {
        let mut s = lake_house();
        s.engine_mut().apply_settings(&Settings {
            enabled: true,
            time_increment: Some(15),
            current_time: hm(21, 30),
        });
        assert_eq!(
            s.process("time").unwrap(),
            "Current in-story time: 9:30 PM (9PM window)"
        );
    }

    #[test]
    fn mutations_are_persisted() {
        let mut s = session();
        s.process("enable").unwrap();
        s.process("increment 20").unwrap();
        s.process("advance").unwrap();
        assert_eq!(s.store().writes(), 3);
        let saved = s.store().load().unwrap().unwrap();
        assert!(saved.enabled);
        assert_eq!(saved.time_increment, Some(20));
        assert_eq!(saved.current_time, hm(19, 50));
    }

    #[test]
    fn restores_saved_settings() {
        let store = MemoryStore::with(Settings {
            enabled: true,
            time_increment: Some(45),
            current_time: hm(22, 0),
        });
        let s = SlasherSession::new(SlasherConfig::default(), store).unwrap();
        assert!(s.engine().is_enabled());
        assert_eq!(s.engine().clock().minutes(), hm(22, 0));
    }

    #[test]
    fn windows_and_help() {
        let mut s = lake_house();
        let windows = s.process("windows").unwrap();
        assert!(windows.contains("9PM [9:00 PM - 11:00 PM] 5 messages"));
        let help = s.process("help").unwrap();
        assert!(help.contains("Reset the clock to 6:00 PM"));
        assert!(help.contains("/killnext"));
    }

    #[test]
    fn quit() {
        let mut s = session();
        assert_eq!(s.process("quit").unwrap(), "Goodbye!");
    }
}
