//! Participant roster and the active (not yet eliminated) subset.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{SlasherError, SlasherResult};

/// Stand-in name used when a template needs a participant but nobody is left.
pub const NOBODY: &str = "Nobody";

/// The full cast of a game and the participants still in play.
///
/// Both lists keep the original turn order. The active list only ever
/// shrinks, and never below one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    all: Vec<String>,
    active: Vec<String>,
}

impl Roster {
    /// Build a roster from caller-supplied names.
    ///
    /// Names are trimmed and blank entries dropped. Fails if nothing remains
    /// or if a name appears twice.
    pub fn new<I, S>(participants: I) -> SlasherResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let all: Vec<String> = participants
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if all.is_empty() {
            return Err(SlasherError::InvalidArgument(
                "at least one participant is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = all.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(SlasherError::InvalidArgument(format!(
                "participant '{dup}' is listed more than once"
            )));
        }
        Ok(Self {
            active: all.clone(),
            all,
        })
    }

    /// Everyone who started the game.
    pub fn all(&self) -> &[String] {
        &self.all
    }

    /// Participants not yet eliminated.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Number of participants still in play.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// True before any game has been initialized.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Whether `name` is still in play.
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|p| p == name)
    }

    /// Participants that have been eliminated, in original turn order.
    pub fn eliminated(&self) -> Vec<&str> {
        let mut remaining = self.active.iter().peekable();
        let mut out = Vec::new();
        for name in &self.all {
            if remaining.peek().is_some_and(|a| *a == name) {
                remaining.next();
            } else {
                out.push(name.as_str());
            }
        }
        out
    }

    /// Pick an active participant uniformly at random.
    pub fn pick(&self, rng: &mut StdRng) -> Option<&str> {
        if self.active.is_empty() {
            return None;
        }
        Some(self.active[rng.random_range(0..self.active.len())].as_str())
    }

    /// Pick an active participant other than `exclude`.
    ///
    /// Falls back to the whole active set when `exclude` is the only one left.
    pub fn pick_excluding(&self, rng: &mut StdRng, exclude: &str) -> Option<&str> {
        let viable: Vec<&String> = self.active.iter().filter(|p| *p != exclude).collect();
        if viable.is_empty() {
            return self.pick(rng);
        }
        Some(viable[rng.random_range(0..viable.len())].as_str())
    }

    /// Remove one random active participant and return their name.
    ///
    /// Returns `None` without touching the roster when one or fewer remain.
    pub fn eliminate_random(&mut self, rng: &mut StdRng) -> Option<String> {
        if self.active.len() <= 1 {
            return None;
        }
        let index = rng.random_range(0..self.active.len());
        Some(self.active.remove(index))
    }

    /// The last one standing, if only one remains.
    pub fn survivor(&self) -> Option<&str> {
        match self.active.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}
