//! In-story clock.
//!
//! Time is tracked as whole minutes since midnight of the night the story
//! starts on. The value keeps counting past 24h (1:00 AM the next morning is
//! 1500), so event windows after midnight compare correctly. Wrapping only
//! happens when the value is rendered for display.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Minutes in one in-story day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Build a minute value from an hour and minute (24-hour clock).
pub const fn hm(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

/// Monotonic story clock with a configured reset point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryClock {
    minutes: u32,
    start: u32,
}

impl StoryClock {
    /// Create a clock at `start` minutes. Resets return here.
    pub fn new(start: u32) -> Self {
        Self {
            minutes: start,
            start,
        }
    }

    /// Current time in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// The reset point.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Move the clock forward by `step` minutes. Returns the new time.
    pub fn advance(&mut self, step: u32) -> u32 {
        self.minutes = self.minutes.saturating_add(step);
        self.minutes
    }

    /// Jump back to the reset point.
    pub fn reset(&mut self) {
        self.minutes = self.start;
    }

    /// Restore a persisted time without touching the reset point.
    pub(crate) fn restore(&mut self, minutes: u32) {
        self.minutes = minutes;
    }

    /// Current time rendered as a 12-hour clock string.
    pub fn formatted(&self) -> String {
        format_time(self.minutes)
    }
}

impl std::fmt::Display for StoryClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Render minutes since midnight as `H:MM AM|PM`.
///
/// Values past one day wrap, so `1500` renders as `1:00 AM`.
pub fn format_time(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    let Some(time) = NaiveTime::from_hms_opt(wrapped / 60, wrapped % 60, 0) else {
        return format!("{minutes}m");
    };
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_midnight_and_noon() {
        assert_eq!(format_time(0), "12:00 AM");
        assert_eq!(format_time(720), "12:00 PM");
    }

    #[test]
    fn format_evening() {
        assert_eq!(format_time(1170), "7:30 PM");
        assert_eq!(format_time(hm(20, 45)), "8:45 PM");
        assert_eq!(format_time(hm(11, 59)), "11:59 AM");
        assert_eq!(format_time(hm(12, 5)), "12:05 PM");
    }

    #[test]
    fn format_wraps_past_midnight() {
        assert_eq!(format_time(hm(24, 30)), "12:30 AM");
        assert_eq!(format_time(hm(25, 0)), "1:00 AM");
        assert_eq!(format_time(MINUTES_PER_DAY * 2 + 61), "1:01 AM");
    }

    #[test]
    fn advance_and_reset() {
        let mut clock = StoryClock::new(hm(18, 0));
        assert_eq!(clock.advance(15), hm(18, 15));
        assert_eq!(clock.advance(45), hm(19, 0));
        clock.reset();
        assert_eq!(clock.minutes(), hm(18, 0));
        assert_eq!(clock.start(), hm(18, 0));
    }

    #[test]
    fn clock_keeps_counting_past_midnight() {
        let mut clock = StoryClock::new(hm(23, 50));
        clock.advance(20);
        assert_eq!(clock.minutes(), hm(24, 10));
        assert_eq!(clock.to_string(), "12:10 AM");
    }
}
