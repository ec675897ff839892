//! # Seven-Segment Data Model
//!
//! Static lookup data for the digital face:
//! - [`segments_for`]: decimal digit → lit segments
//! - [`coordinate_table`]: (denomination, slot) → segment lines on the surface
//!
//! Segment ids follow the usual a-g labelling, numbered clockwise from the top:
//!
//! ```text
//!      1
//!    6   2
//!      7
//!    5   3
//!      4
//! ```

use embedded_graphics::{prelude::Point, primitives::Line};

use crate::{ClockError, Denomination, Slot};

/// One of the seven bars of a digit, by its conventional id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentPosition {
    Top = 1,
    UpperRight = 2,
    LowerRight = 3,
    Bottom = 4,
    LowerLeft = 5,
    UpperLeft = 6,
    Middle = 7,
}

/// Axis a segment runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl SegmentPosition {
    const ALL: [SegmentPosition; 7] = [
        SegmentPosition::Top,
        SegmentPosition::UpperRight,
        SegmentPosition::LowerRight,
        SegmentPosition::Bottom,
        SegmentPosition::LowerLeft,
        SegmentPosition::UpperLeft,
        SegmentPosition::Middle,
    ];

    /// Segment id, 1-7.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Top, middle and bottom bars run horizontally; the rest vertically.
    pub fn orientation(self) -> Orientation {
        match self {
            SegmentPosition::Top | SegmentPosition::Middle | SegmentPosition::Bottom => {
                Orientation::Horizontal
            }
            _ => Orientation::Vertical,
        }
    }

    fn index(self) -> usize {
        usize::from(self.id() - 1)
    }
}

use SegmentPosition::{Bottom, LowerLeft, LowerRight, Middle, Top, UpperLeft, UpperRight};

/// Lit segments per digit. The order inside each entry is the paint order.
const DIGIT_SEGMENTS: [&[SegmentPosition]; 10] = [
    &[Top, UpperRight, LowerRight, Bottom, LowerLeft, UpperLeft],
    &[UpperRight, LowerRight],
    &[Top, UpperRight, Middle, LowerLeft, Bottom],
    &[Top, UpperRight, Middle, LowerRight, Bottom],
    &[UpperLeft, Middle, UpperRight, LowerRight],
    &[Top, UpperLeft, Middle, LowerRight, Bottom],
    &[Top, UpperLeft, LowerLeft, Bottom, LowerRight, Middle],
    &[Top, UpperRight, LowerRight],
    &[Top, UpperRight, LowerRight, Bottom, LowerLeft, UpperLeft, Middle],
    &[Middle, UpperLeft, Top, UpperRight, LowerRight, Bottom],
];

/// Segments to light for `digit`.
///
/// Fails with [`ClockError::InvalidDigit`] for anything above 9.
///
/// # Example
/// ```
/// use hv_clocks::segments::{segments_for, SegmentPosition};
///
/// let one = segments_for(1).unwrap();
/// assert_eq!(one, &[SegmentPosition::UpperRight, SegmentPosition::LowerRight]);
/// assert!(segments_for(10).is_err());
/// ```
pub fn segments_for(digit: u8) -> Result<&'static [SegmentPosition], ClockError> {
    DIGIT_SEGMENTS
        .get(usize::from(digit))
        .copied()
        .ok_or(ClockError::InvalidDigit(digit))
}

/// Where each of the seven segments of one digit sits on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentCoordinateTable {
    lines: [Line; 7],
}

impl SegmentCoordinateTable {
    /// Layout of a 15 x 80 digit whose left edge is at `left`.
    ///
    /// Vertical bars stop 2 units short of the horizontals so adjacent caps
    /// do not merge.
    const fn at(left: i32) -> Self {
        const TOP: i32 = 110;
        const MID: i32 = 150;
        const BOTTOM: i32 = 190;
        let right = left + 15;
        Self {
            lines: [
                Line::new(Point::new(left, TOP), Point::new(right, TOP)),
                Line::new(Point::new(right, TOP + 2), Point::new(right, MID)),
                Line::new(Point::new(right, MID + 2), Point::new(right, BOTTOM - 2)),
                Line::new(Point::new(left, BOTTOM), Point::new(right, BOTTOM)),
                Line::new(Point::new(left, MID + 2), Point::new(left, BOTTOM - 2)),
                Line::new(Point::new(left, TOP + 2), Point::new(left, MID)),
                Line::new(Point::new(left, MID), Point::new(right, MID)),
            ],
        }
    }

    pub fn line(&self, position: SegmentPosition) -> Line {
        self.lines[position.index()]
    }
}

pub const HOURS_TENS: SegmentCoordinateTable = SegmentCoordinateTable::at(100);
pub const HOURS_UNITS: SegmentCoordinateTable = SegmentCoordinateTable::at(125);
pub const MINUTES_TENS: SegmentCoordinateTable = SegmentCoordinateTable::at(160);
pub const MINUTES_UNITS: SegmentCoordinateTable = SegmentCoordinateTable::at(185);

/// The layout table for one digit position.
pub fn coordinate_table(denomination: Denomination, slot: Slot) -> &'static SegmentCoordinateTable {
    match (denomination, slot) {
        (Denomination::Hours, Slot::Tens) => &HOURS_TENS,
        (Denomination::Hours, Slot::Units) => &HOURS_UNITS,
        (Denomination::Minutes, Slot::Tens) => &MINUTES_TENS,
        (Denomination::Minutes, Slot::Units) => &MINUTES_UNITS,
    }
}
