//! # Render Surface
//!
//! The drawing capabilities the faces need, and nothing more: clear a
//! region, fill or stroke an embedded-graphics primitive, and place a short
//! label. Styles travel with each call instead of living in shared drawing
//! state, so one face can never leak a fill color or line width into the
//! next draw.
//!
//! Two implementations ship with the crate:
//! - [`crate::canvas::Canvas`] rasterizes onto any embedded-graphics target
//! - [`RecordingSurface`] keeps the calls for inspection

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Dimensions, Point, RgbColor, Size},
    primitives::{Circle, Line, Rectangle, RoundedRectangle, Triangle},
};

pub const GRAY: Rgb888 = Rgb888::new(128, 128, 128);
pub const LED_RED: Rgb888 = Rgb888::new(0xFF, 0x00, 0x00);
pub const SILVER: Rgb888 = Rgb888::new(0xDD, 0xDD, 0xDD);

/// Region cleared at the start of every frame.
pub const FACE_AREA: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(300, 300));

/// An embedded-graphics primitive the faces fill or stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Line(Line),
    Triangle(Triangle),
    Circle(Circle),
    RoundedRectangle(RoundedRectangle),
}

impl Shape {
    /// Circle of `diameter` pixels centered on `center`.
    pub fn circle(center: Point, diameter: u32) -> Self {
        Shape::Circle(Circle::with_center(center, diameter))
    }

    /// Smallest rectangle containing the shape's geometry, stroke excluded.
    pub fn bounding_box(&self) -> Rectangle {
        match self {
            Shape::Line(line) => line.bounding_box(),
            Shape::Triangle(triangle) => triangle.bounding_box(),
            Shape::Circle(circle) => circle.bounding_box(),
            Shape::RoundedRectangle(rect) => rect.bounding_box(),
        }
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// How a filled shape is colored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgb888),
    /// Blend `from` → `to` along the line `start` → `end`, clamped past either end.
    LinearGradient {
        start: Point,
        end: Point,
        from: Rgb888,
        to: Rgb888,
    },
    /// Blend `from` → `to` between two circles, clamped inside the inner
    /// circle and outside the outer one.
    RadialGradient {
        inner_center: Point,
        inner_radius: f32,
        outer_center: Point,
        outer_radius: f32,
        from: Rgb888,
        to: Rgb888,
    },
}

impl Paint {
    /// Color of the paint at `point`.
    pub fn color_at(&self, point: Point) -> Rgb888 {
        match *self {
            Paint::Solid(color) => color,
            Paint::LinearGradient {
                start,
                end,
                from,
                to,
            } => {
                let axis = end - start;
                let length_sq = (axis.x * axis.x + axis.y * axis.y) as f32;
                if length_sq == 0.0 {
                    return to;
                }
                let rel = point - start;
                let t = (rel.x * axis.x + rel.y * axis.y) as f32 / length_sq;
                lerp_color(from, to, t)
            }
            Paint::RadialGradient {
                inner_center,
                inner_radius,
                outer_center,
                outer_radius,
                from,
                to,
            } => {
                // 0 on the inner circle, 1 on the outer one.
                let d_inner = distance(point, inner_center) - inner_radius;
                let d_outer = distance(point, outer_center) - outer_radius;
                let span = d_inner - d_outer;
                if span <= 0.0 {
                    return to;
                }
                lerp_color(from, to, d_inner / span)
            }
        }
    }
}

fn distance(a: Point, b: Point) -> f32 {
    let d = a - b;
    ((d.x * d.x + d.y * d.y) as f32).sqrt()
}

/// Linear blend of two colors, `t` clamped to `0.0..=1.0`.
pub fn lerp_color(from: Rgb888, to: Rgb888, t: f32) -> Rgb888 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb888::new(mix(from.r(), to.r()), mix(from.g(), to.g()), mix(from.b(), to.b()))
}

/// Drawing primitives consumed by the face renderers.
pub trait Surface {
    /// Reset `area` to the background.
    fn clear(&mut self, area: Rectangle);

    /// Fill the interior of `shape`.
    fn fill(&mut self, shape: &Shape, paint: &Paint);

    /// Stroke the outline of `shape`, centered on its edge.
    fn stroke(&mut self, shape: &Shape, color: Rgb888, width: u32);

    /// Draw `text` with its baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: Point, color: Rgb888);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, area: Rectangle) {
        (**self).clear(area)
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        (**self).fill(shape, paint)
    }

    fn stroke(&mut self, shape: &Shape, color: Rgb888, width: u32) {
        (**self).stroke(shape, color, width)
    }

    fn fill_text(&mut self, text: &str, position: Point, color: Rgb888) {
        (**self).fill_text(text, position, color)
    }
}

/// A surface call as recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rectangle),
    Fill(Shape, Paint),
    Stroke(Shape, Rgb888, u32),
    Text(String, Point, Rgb888),
}

/// Surface that keeps every call in order instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `clear` calls, one per frame for the faces in this crate.
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, area: Rectangle) {
        self.commands.push(DrawCommand::Clear(area));
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(*shape, *paint));
    }

    fn stroke(&mut self, shape: &Shape, color: Rgb888, width: u32) {
        self.commands.push(DrawCommand::Stroke(*shape, color, width));
    }

    fn fill_text(&mut self, text: &str, position: Point, color: Rgb888) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), position, color));
    }
}
