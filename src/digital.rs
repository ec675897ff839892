//! # Digital Face
//!
//! A rounded panel with four seven-segment digits (`HH MM`) and a pair of
//! blinking seconds dots between them.
//!
//! Each digit is painted by [`DigitRenderer`]: the digit resolves to its lit
//! segments, each segment to a line in the coordinate table for its
//! (denomination, slot), and each line to an LED bar from
//! [`build_segment_shape`]. All lookups happen before the first paint call,
//! so an invalid digit or field leaves the surface untouched.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Point, RgbColor, Size},
    primitives::{Rectangle, RoundedRectangle},
};
use tracing::trace;

use crate::geometry::build_segment_shape;
use crate::segments::{coordinate_table, segments_for};
use crate::surface::{Paint, Shape, Surface, FACE_AREA, GRAY, LED_RED};
use crate::{ClockError, ClockReading, Denomination, Slot};

/// Stroke width of an LED bar body.
pub const SEGMENT_WIDTH: u32 = 6;
/// Rim width of the panel outline.
const RIM_WIDTH: u32 = 8;

const BLINKER_CENTER: Point = Point::new(150, 150);
const BLINKER_GAP: i32 = 10;
const BLINKER_DIAMETER: u32 = 5;

/// Split a field value into its tens and units digits. `7` becomes `(0, 7)`.
pub fn split_field(value: u8) -> (u8, u8) {
    (value / 10, value % 10)
}

/// The two `(slot, digit)` pairs that display `value` for `denomination`.
///
/// Fails with [`ClockError::FieldOutOfRange`] when `value` does not fit the
/// denomination.
pub fn digit_plan(denomination: Denomination, value: u8) -> Result<[(Slot, u8); 2], ClockError> {
    if value > denomination.max_value() {
        return Err(ClockError::FieldOutOfRange {
            denomination,
            value,
        });
    }
    let (tens, units) = split_field(value);
    Ok([(Slot::Tens, tens), (Slot::Units, units)])
}

/// Paints seven-segment digits onto a surface.
pub struct DigitRenderer<'a, S: Surface> {
    surface: &'a mut S,
    color: Rgb888,
}

impl<'a, S: Surface> DigitRenderer<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            color: LED_RED,
        }
    }

    /// Paint `digit` in `slot` of the `denomination` field.
    ///
    /// Every lit segment becomes a filled start cap, a stroked body and a
    /// filled end cap, in that order.
    pub fn render_digit(
        &mut self,
        slot: Slot,
        denomination: Denomination,
        digit: u8,
    ) -> Result<(), ClockError> {
        let segments = segments_for(digit)?;
        let table = coordinate_table(denomination, slot);
        trace!(?slot, %denomination, digit, "rendering digit");

        let paint = Paint::Solid(self.color);
        for &position in segments {
            let line = table.line(position);
            let shape = build_segment_shape(line.start, line.end, position.orientation());
            self.surface.fill(&Shape::from(shape.start_cap), &paint);
            self.surface
                .stroke(&Shape::from(shape.body), self.color, SEGMENT_WIDTH);
            self.surface.fill(&Shape::from(shape.end_cap), &paint);
        }
        Ok(())
    }

    /// Paint both digits of a field, tens first. Values below 10 get a leading zero.
    pub fn render_field(&mut self, denomination: Denomination, value: u8) -> Result<(), ClockError> {
        let plan = digit_plan(denomination, value)?;
        for (_, digit) in plan {
            segments_for(digit)?;
        }
        for (slot, digit) in plan {
            self.render_digit(slot, denomination, digit)?;
        }
        Ok(())
    }
}

/// Panel outline: a stadium centered on the face, 200 x 100 with
/// semicircular ends.
fn panel() -> Shape {
    Shape::RoundedRectangle(RoundedRectangle::with_equal_corners(
        Rectangle::with_center(Point::new(150, 150), Size::new(201, 101)),
        Size::new(50, 50),
    ))
}

/// Draw the gradient panel behind the digits.
pub fn draw_body<S: Surface>(surface: &mut S) {
    let body = panel();
    surface.fill(
        &body,
        &Paint::LinearGradient {
            start: Point::new(0, 0),
            end: Point::new(150, 0),
            from: GRAY,
            to: Rgb888::BLACK,
        },
    );
    surface.stroke(&body, Rgb888::BLACK, RIM_WIDTH);
}

/// Paint the seconds dots lit (`true`) or dark.
pub fn draw_blinker<S: Surface>(surface: &mut S, lit: bool) {
    let color = if lit { LED_RED } else { Rgb888::BLACK };
    let upper = Point::new(BLINKER_CENTER.x, BLINKER_CENTER.y - BLINKER_GAP);
    let lower = Point::new(BLINKER_CENTER.x, BLINKER_CENTER.y + BLINKER_GAP);
    for center in [upper, lower] {
        surface.fill(&Shape::circle(center, BLINKER_DIAMETER), &Paint::Solid(color));
    }
}

/// Draw one complete digital frame with the seconds dots lit.
///
/// Both fields are validated first; on error nothing is drawn.
pub fn render_face<S: Surface>(surface: &mut S, reading: ClockReading) -> Result<(), ClockError> {
    digit_plan(Denomination::Minutes, reading.minute)?;
    digit_plan(Denomination::Hours, reading.hour)?;

    surface.clear(FACE_AREA);
    draw_body(surface);
    draw_blinker(surface, true);

    let mut digits = DigitRenderer::new(surface);
    digits.render_field(Denomination::Minutes, reading.minute)?;
    digits.render_field(Denomination::Hours, reading.hour)?;
    Ok(())
}
