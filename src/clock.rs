//! Wall-clock time sources.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveTime};

use crate::ClockReading;

/// Something that can tell the current local time of day.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> NaiveTime;

    fn reading(&self) -> ClockReading {
        ClockReading::from(self.now())
    }
}

/// The system clock in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// A clock that reports whatever it was last set to. Used by tests and by
/// `--time` on the command line.
#[derive(Clone, Debug)]
pub struct FixedClock {
    time: Arc<Mutex<NaiveTime>>,
}

impl FixedClock {
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time: Arc::new(Mutex::new(time)),
        }
    }

    /// Change the reported time; clones share the change.
    pub fn set(&self, time: NaiveTime) {
        if let Ok(mut guard) = self.time.lock() {
            *guard = time;
        }
    }
}

impl TimeSource for FixedClock {
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
    fn test_fixed_clock() {
        let clock = FixedClock::new(NaiveTime::from_hms_opt(9, 5, 1).unwrap());
        assert_eq!(clock.reading(), ClockReading::new(9, 5, 1));

        let shared = clock.clone();
        shared.set(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(clock.reading(), ClockReading::new(23, 59, 59));
    }

    #[test]
    fn test_system_clock_in_range() {
        let reading = SystemClock.reading();
        assert!(reading.hour < 24);
        assert!(reading.minute < 60);
        assert!(reading.second < 60);
    }
}
