//! # Clock
//!
//! Time source for message and contact timestamps. Everything the user sees
//! is `HH:MM` local time, so the capability only hands out a `NaiveTime`.

use chrono::{Local, NaiveTime};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;

    /// Current time formatted for display.
    fn stamp(&self) -> String {
        format_hm(self.now())
    }
}

/// Formats a time as two-digit 24-hour `HH:MM`.
pub fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Wall-clock local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    time: Mutex<NaiveTime>,
}

impl ManualClock {
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    /// Convenience constructor; out-of-range values fall back to midnight.
    pub fn at(hour: u32, minute: u32) -> Self {
        Self::new(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default())
    }

    pub fn set(&self, time: NaiveTime) {
        match self.time.lock() {
            Ok(mut guard) => *guard = time,
            Err(poisoned) => *poisoned.into_inner() = time,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveTime {
        match self.time.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hm_pads_both_fields() {
        let t = NaiveTime::from_hms_opt(9, 5, 59).unwrap();
        assert_eq!(format_hm(t), "09:05");
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::at(12, 30);
        assert_eq!(clock.stamp(), "12:30");
        clock.set(NaiveTime::from_hms_opt(23, 1, 0).unwrap());
        assert_eq!(clock.stamp(), "23:01");
    }

    #[test]
    fn test_manual_clock_out_of_range_is_midnight() {
        assert_eq!(ManualClock::at(25, 0).stamp(), "00:00");
    }
}
