//! Analog face: a gradient dial with four numerals and three hands.

use std::f32::consts::{PI, TAU};

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Point, RgbColor},
    primitives::Line,
};

use crate::surface::{Paint, Shape, Surface, FACE_AREA, GRAY, LED_RED, SILVER};
use crate::ClockReading;

pub const CENTER: Point = Point::new(150, 150);
const DIAL_DIAMETER: u32 = 250;
const RIM_WIDTH: u32 = 8;
const HUB_DIAMETER: u32 = 10;

pub const HOUR_HAND_LENGTH: f32 = 70.0;
pub const MINUTE_HAND_LENGTH: f32 = 100.0;
pub const SECOND_HAND_LENGTH: f32 = 100.0;

const NUMERALS: [(&str, Point); 4] = [
    ("12", Point::new(140, 45)),
    ("3", Point::new(255, 155)),
    ("6", Point::new(150, 265)),
    ("9", Point::new(35, 155)),
];

/// Angle of 12 o'clock: angles are measured clockwise from 3 o'clock.
const TWELVE: f32 = 3.0 * PI / 2.0;

pub fn second_angle(second: u8) -> f32 {
    f32::from(second % 60) * TAU / 60.0 + TWELVE
}

pub fn minute_angle(minute: u8) -> f32 {
    f32::from(minute % 60) * TAU / 60.0 + TWELVE
}

/// The hour hand steps forward one minute-mark every 12 minutes.
pub fn hour_angle(hour: u8, minute: u8) -> f32 {
    f32::from(hour % 12) * TAU / 12.0 + TWELVE + f32::from(minute / 12) * TAU / 60.0
}

/// Tip of a hand of `length` pointing at `angle`.
pub fn hand_tip(angle: f32, length: f32) -> Point {
    Point::new(
        CENTER.x + (angle.cos() * length).round() as i32,
        CENTER.y + (angle.sin() * length).round() as i32,
    )
}

pub fn draw_body<S: Surface>(surface: &mut S) {
    let dial = Shape::circle(CENTER, DIAL_DIAMETER);
    surface.fill(
        &dial,
        &Paint::RadialGradient {
            inner_center: Point::new(75, 50),
            inner_radius: 5.0,
            outer_center: Point::new(90, 60),
            outer_radius: 100.0,
            from: GRAY,
            to: Rgb888::BLACK,
        },
    );
    surface.stroke(&dial, Rgb888::BLACK, RIM_WIDTH);
    for (label, position) in NUMERALS {
        surface.fill_text(label, position, LED_RED);
    }
}

fn draw_hand<S: Surface>(surface: &mut S, angle: f32, length: f32, color: Rgb888, width: u32) {
    let hand = Line::new(CENTER, hand_tip(angle, length));
    surface.stroke(&Shape::from(hand), color, width);
}

/// Second hand with the center hub drawn over it.
pub fn draw_second_hand<S: Surface>(surface: &mut S, second: u8) {
    draw_hand(surface, second_angle(second), SECOND_HAND_LENGTH, SILVER, 2);
    surface.fill(
        &Shape::circle(CENTER, HUB_DIAMETER),
        &Paint::Solid(Rgb888::WHITE),
    );
}

pub fn draw_minute_hand<S: Surface>(surface: &mut S, minute: u8) {
    draw_hand(
        surface,
        minute_angle(minute),
        MINUTE_HAND_LENGTH,
        Rgb888::WHITE,
        4,
    );
}

pub fn draw_hour_hand<S: Surface>(surface: &mut S, hour: u8, minute: u8) {
    draw_hand(
        surface,
        hour_angle(hour, minute),
        HOUR_HAND_LENGTH,
        Rgb888::WHITE,
        4,
    );
}

/// Draw one complete analog frame: dial, then second, minute and hour hands.
pub fn render_face<S: Surface>(surface: &mut S, reading: ClockReading) {
    surface.clear(FACE_AREA);
    draw_body(surface);
    draw_second_hand(surface, reading.second);
    draw_minute_hand(surface, reading.minute);
    draw_hour_hand(surface, reading.hour, reading.minute);
}
