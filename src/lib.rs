//! # HV Clocks Core Library
//!
//! Renders a clock face onto a 2D drawing surface, either as an analog dial
//! with hands or as a seven-segment style LED readout, redrawn once per second.
//!
//! ## Design Philosophy
//!
//! ### Structured lookups
//! - **Digit map**: each decimal digit indexes a fixed slice of lit segments
//! - **Coordinate tables**: each segment id indexes a fixed line in one of four
//!   layout tables, one per (denomination, slot) pair
//! - Nothing is resolved by building identifiers at runtime
//!
//! ### Pure geometry, explicit painting
//! - [`geometry::build_segment_shape`] turns a line into an LED bar shape and
//!   never draws
//! - The face renderers issue every fill and stroke through the
//!   [`surface::Surface`] trait, so the same frame can be rasterized into a
//!   [`framebuffer::Framebuffer`] or recorded for inspection
//!
//! ### One tick source
//! The [`controller::ClockFaceController`] owns the only repeating timer.
//! Switching faces cancels the running timer before a new one is armed.
//!
//! ## Data Flow
//! 1. Tick fires → controller reads a [`ClockReading`] from its time source
//! 2. Digital mode splits hours and minutes into tens/units digits
//! 3. Each digit resolves to segments, each segment to a line, each line to a bar
//! 4. The surface paints the bars (or the dial and hands in analog mode)

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

pub mod analog;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod controller;
pub mod digital;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod segments;
pub mod surface;

pub use error::ClockError;

/// Which time field a pair of digits displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Denomination {
    Hours,
    Minutes,
}

impl Denomination {
    /// Largest value the field can hold.
    pub fn max_value(self) -> u8 {
        match self {
            Denomination::Hours => 23,
            Denomination::Minutes => 59,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::Hours => write!(f, "hours"),
            Denomination::Minutes => write!(f, "minutes"),
        }
    }
}

impl FromStr for Denomination {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOURS" | "hours" => Ok(Denomination::Hours),
            "MINS" | "MINUTES" | "mins" | "minutes" => Ok(Denomination::Minutes),
            other => Err(ClockError::InvalidSelector(format!(
                "unknown denomination {other:?}"
            ))),
        }
    }
}

/// Position of a digit inside a two-digit field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Tens,
    Units,
}

impl TryFrom<u8> for Slot {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Slot::Tens),
            1 => Ok(Slot::Units),
            other => Err(ClockError::InvalidSelector(format!("unknown slot {other}"))),
        }
    }
}

/// The face currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Idle,
    Analog,
    Digital,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Idle => "idle",
            DisplayMode::Analog => "analog",
            DisplayMode::Digital => "digital",
        };
        f.write_str(name)
    }
}

/// Wall-clock fields captured once per tick.
///
/// Every part of a frame is drawn from the same reading, so the hands and the
/// digits can never disagree about which second is being shown.
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use hv_clocks::ClockReading;
///
/// let time = NaiveTime::from_hms_opt(17, 7, 42).unwrap();
/// let reading = ClockReading::from(time);
/// assert_eq!((reading.hour, reading.minute, reading.second), (17, 7, 42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl ClockReading {
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl<T: Timelike> From<T> for ClockReading {
    fn from(time: T) -> Self {
        // chrono reports a leap second as second 59 with nanos >= 1e9,
        // so every field already fits its range.
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
        }
    }
}
