//! Engine configuration.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::clock::hm;
use crate::error::{SlasherError, SlasherResult};
use crate::window::{EventWindow, is_probability};

/// Smallest per-message time increment a host may configure.
pub const MIN_INCREMENT: u32 = 1;
/// Largest per-message time increment a host may configure.
pub const MAX_INCREMENT: u32 = 180;
/// Increment used when none is configured or a host sends garbage.
pub const DEFAULT_INCREMENT: u32 = 15;
/// Default story start: 7:30 PM.
pub const DEFAULT_START: u32 = hm(19, 30);
/// Trigger probability for windows without their own policy.
pub const DEFAULT_CHANCE: f64 = 0.5;

const DEFAULT_INTRO: &str = "The night is quiet. Nothing seems wrong... yet.";

/// How far the clock moves on each advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// Always the same number of minutes.
    Fixed(u32),
    /// Uniformly drawn from `min..=max` minutes.
    Uniform {
        /// Smallest step.
        min: u32,
        /// Largest step.
        max: u32,
    },
}

impl StepPolicy {
    /// Draw the next step size.
    pub fn draw(&self, rng: &mut StdRng) -> u32 {
        match *self {
            Self::Fixed(n) => n,
            Self::Uniform { min, max } => rng.random_range(min..=max),
        }
    }

    /// Inclusive bounds of possible steps.
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            Self::Fixed(n) => (n, n),
            Self::Uniform { min, max } => (min, max),
        }
    }

    fn validate(&self) -> SlasherResult<()> {
        let (min, max) = self.bounds();
        if min == 0 {
            return Err(SlasherError::InvalidArgument(
                "time step must be at least one minute".to_string(),
            ));
        }
        if min > max {
            return Err(SlasherError::InvalidArgument(format!(
                "time step range {min}..={max} is empty"
            )));
        }
        Ok(())
    }
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_INCREMENT)
    }
}

impl std::fmt::Display for StepPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n} min"),
            Self::Uniform { min, max } => write!(f, "{min}-{max} min"),
        }
    }
}

/// Configuration for a story engine.
#[derive(Debug, Clone)]
pub struct SlasherConfig {
    /// RNG seed for reproducible nights.
    pub seed: u64,
    /// Clock value at initialization and reset.
    pub start_time: u32,
    /// Step size policy for `advance`.
    pub step: StepPolicy,
    /// Trigger probability for windows without their own policy.
    pub default_chance: f64,
    /// Event windows in priority order.
    pub windows: Vec<EventWindow>,
    /// Narration emitted when a game is initialized.
    pub intro: String,
}

impl Default for SlasherConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_time: DEFAULT_START,
            step: StepPolicy::default(),
            default_chance: DEFAULT_CHANCE,
            windows: Vec::new(),
            intro: DEFAULT_INTRO.to_string(),
        }
    }
}

impl SlasherConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the start (and reset) time in minutes.
    pub fn with_start_time(mut self, minutes: u32) -> Self {
        self.start_time = minutes;
        self
    }

    /// Set the step policy.
    pub fn with_step(mut self, step: StepPolicy) -> Self {
        self.step = step;
        self
    }

    /// Set the fallback trigger probability (clamped to 0-1).
    pub fn with_default_chance(mut self, chance: f64) -> Self {
        self.default_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Replace the event windows.
    pub fn with_windows(mut self, windows: Vec<EventWindow>) -> Self {
        self.windows = windows;
        self
    }

    /// Set the introduction narration.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }

    /// Check the step policy, the fallback chance and every window.
    pub fn validate(&self) -> SlasherResult<()> {
        self.step.validate()?;
        if !is_probability(self.default_chance) {
            return Err(SlasherError::InvalidArgument(format!(
                "default chance {} is not a probability",
                self.default_chance
            )));
        }
        for window in &self.windows {
            window.validate()?;
        }
        Ok(())
    }
}

/// Clamp a host-supplied increment into the accepted range.
pub fn clamp_increment(minutes: u32) -> u32 {
    minutes.clamp(MIN_INCREMENT, MAX_INCREMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn default_config() {
        let cfg = SlasherConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.start_time, hm(19, 30));
        assert_eq!(cfg.step, StepPolicy::Fixed(15));
        assert!(cfg.windows.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = SlasherConfig::default()
            .with_seed(7)
            .with_start_time(hm(18, 0))
            .with_step(StepPolicy::Uniform { min: 10, max: 15 })
            .with_default_chance(3.0)
            .with_intro("Hello.");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.start_time, 1080);
        assert_eq!(cfg.step.bounds(), (10, 15));
        assert!((cfg.default_chance - 1.0).abs() < f64::EPSILON);
        assert_eq!(cfg.intro, "Hello.");
    }

    #[test]
    fn uniform_step_stays_in_bounds() {
        let step = StepPolicy::Uniform { min: 10, max: 15 };
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let n = step.draw(&mut rng);
            assert!((10..=15).contains(&n));
            seen.insert(n);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn invalid_steps_rejected() {
        let zero = SlasherConfig::default().with_step(StepPolicy::Fixed(0));
        assert!(zero.validate().is_err());
        let empty = SlasherConfig::default().with_step(StepPolicy::Uniform { min: 5, max: 2 });
        assert!(empty.validate().is_err());
    }

    #[test]
    fn default_chance_must_be_a_probability() {
        let nan = SlasherConfig::default().with_default_chance(f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(SlasherError::InvalidArgument(_))
        ));

        let mut above = SlasherConfig::default();
        above.default_chance = 1.5;
        assert!(above.validate().is_err());

        let mut below = SlasherConfig::default();
        below.default_chance = -0.1;
        assert!(below.validate().is_err());
    }

    #[test]
    fn increment_clamped() {
        assert_eq!(clamp_increment(0), 1);
        assert_eq!(clamp_increment(30), 30);
        assert_eq!(clamp_increment(999), 180);
    }

    #[test]
    fn step_display() {
        assert_eq!(StepPolicy::Fixed(15).to_string(), "15 min");
        assert_eq!(StepPolicy::Uniform { min: 10, max: 15 }.to_string(), "10-15 min");
    }
}
