//! Slash commands a host can expose to its users.

use std::collections::BTreeMap;

use tracing::debug;

use crate::engine::StoryEngine;
use crate::error::{SlasherError, SlasherResult};

/// What a command hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Short status line for the command caller.
    pub status: String,
    /// Narration to show in the story, if any.
    pub narration: Option<String>,
}

/// Command handler: receives the engine and the unnamed arguments.
pub type CommandHandler = fn(&mut StoryEngine, &[&str]) -> CommandOutput;

/// A named command with help text.
#[derive(Debug, Clone)]
pub struct SlashCommand {
    /// Name without the leading slash.
    pub name: String,
    /// One-line help.
    pub help: String,
    handler: CommandHandler,
}

impl SlashCommand {
    /// Create a command.
    pub fn new(name: impl Into<String>, help: impl Into<String>, handler: CommandHandler) -> Self {
        Self {
            name: name.into().to_lowercase(),
            help: help.into(),
            handler,
        }
    }
}

/// Name-to-command table.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, SlashCommand>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the engine's built-in commands.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Add or replace a command.
    pub fn register(&mut self, command: SlashCommand) {
        debug!(name = %command.name, "slash command registered");
        self.commands.insert(command.name.clone(), command);
    }

    /// Look up a command by name; a leading `/` is ignored.
    pub fn get(&self, name: &str) -> Option<&SlashCommand> {
        self.commands
            .get(&name.trim_start_matches('/').to_lowercase())
    }

    /// Registered commands, sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &SlashCommand> {
        self.commands.values()
    }

    /// Run a command against the engine.
    pub fn run(
        &self,
        name: &str,
        engine: &mut StoryEngine,
        args: &[&str],
    ) -> SlasherResult<CommandOutput> {
        let command = self
            .get(name)
            .ok_or_else(|| SlasherError::UnknownCommand(name.to_string()))?;
        Ok((command.handler)(engine, args))
    }
}

/// Register the built-in `killnext` command.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(SlashCommand::new(
        "killnext",
        "Force the next disappearance or death in the Slasher scenario.",
        kill_next,
    ));
}

fn kill_next(engine: &mut StoryEngine, _args: &[&str]) -> CommandOutput {
    match engine.eliminate() {
        Some(outcome) => CommandOutput {
            status: "Initiated disappearance event.".to_string(),
            narration: Some(format!(
                "[Slasher] You sense an ominous shift... {outcome}"
            )),
        },
        None => CommandOutput {
            status: "Slasher logic is disabled.".to_string(),
            narration: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlasherConfig;

    fn enabled_engine() -> StoryEngine {
        let mut e = StoryEngine::new(SlasherConfig::default()).unwrap();
        e.enable();
        e.initialize(["A", "B"]).unwrap();
        e
    }

    #[test]
    fn builtins_registers_exactly_killnext() {
        let registry = CommandRegistry::with_builtins();
        let names: Vec<&str> = registry.commands().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["killnext"]);
        assert!(registry.get("/KillNext").is_some());
    }

    #[test]
    fn killnext_removes_someone() {
        let registry = CommandRegistry::with_builtins();
        let mut engine = enabled_engine();
        let out = registry.run("/killnext", &mut engine, &[]).unwrap();
        assert_eq!(out.status, "Initiated disappearance event.");
        assert!(out.narration.unwrap().contains("has disappeared"));
        assert_eq!(engine.roster().active_count(), 1);

        let out = registry.run("killnext", &mut engine, &[]).unwrap();
        assert!(out.narration.unwrap().contains("final survivor"));
        assert_eq!(engine.roster().active_count(), 1);
    }

    #[test]
    fn killnext_while_disabled() {
        let registry = CommandRegistry::with_builtins();
        let mut engine = enabled_engine();
        engine.disable();
        let out = registry.run("killnext", &mut engine, &[]).unwrap();
        assert!(out.narration.is_none());
        assert_eq!(engine.roster().active_count(), 2);
    }

    #[test]
    fn unknown_command() {
        let registry = CommandRegistry::with_builtins();
        let mut engine = enabled_engine();
        assert!(matches!(
            registry.run("/summon", &mut engine, &[]),
            Err(SlasherError::UnknownCommand(_))
        ));
    }

    #[test]
    fn custom_command_can_be_added() {
        fn whisper(_: &mut StoryEngine, args: &[&str]) -> CommandOutput {
            CommandOutput {
                status: "ok".to_string(),
                narration: Some(args.join(" ")),
            }
        }
        let mut registry = CommandRegistry::with_builtins();
        registry.register(SlashCommand::new("Whisper", "Say something.", whisper));
        let mut engine = enabled_engine();
        let out = registry
            .run("/whisper", &mut engine, &["behind", "you"])
            .unwrap();
        assert_eq!(out.narration.as_deref(), Some("behind you"));
    }
}
