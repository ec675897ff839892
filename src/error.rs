//! # Clock Rendering Errors
//!
//! Apart from a poisoned surface lock, every failure here is a caller passing
//! a value outside its domain. The render call that hits one returns before
//! painting anything.

use std::time::Duration;

use crate::Denomination;
use thiserror::Error;

/// Errors raised while resolving or painting clock digits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The value handed to the segment map is not in `0..=9`.
    #[error("invalid digit {0}: expected 0-9")]
    InvalidDigit(u8),

    /// Unknown digit slot or denomination selector.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// A whole time field is outside the range its denomination allows.
    #[error("{denomination} value {value} is out of range")]
    FieldOutOfRange {
        denomination: Denomination,
        value: u8,
    },

    /// The redraw tick is zero, or the blink delay does not fit inside it.
    #[error("invalid timing: tick {tick:?}, blink {blink:?}")]
    InvalidTiming { tick: Duration, blink: Duration },

    /// The shared drawing surface lock was poisoned by a panicking frame.
    #[error("drawing surface is unavailable")]
    SurfaceUnavailable,
}
