//! # Primitive Renderer
//!
//! [`Canvas`] implements [`Surface`] on top of any embedded-graphics
//! [`DrawTarget`]. Solid fills and strokes go straight through
//! [`PrimitiveStyle`]; gradient fills walk the primitive's interior points and
//! color each one from the [`Paint`].
//!
//! Draw errors from the target are ignored, as with any best-effort display.

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PointsIter, PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::surface::{Paint, Shape, Surface};

/// Surface that rasterizes onto an embedded-graphics draw target.
pub struct Canvas<D> {
    target: D,
    background: Rgb888,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: D) -> Self {
        Self::with_background(target, Rgb888::BLACK)
    }

    pub fn with_background(target: D, background: Rgb888) -> Self {
        Self { target, background }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw_styled(&mut self, shape: &Shape, style: PrimitiveStyle<Rgb888>) {
        let target = &mut self.target;
        match *shape {
            Shape::Line(line) => line.into_styled(style).draw(target),
            Shape::Triangle(triangle) => triangle.into_styled(style).draw(target),
            Shape::Circle(circle) => circle.into_styled(style).draw(target),
            Shape::RoundedRectangle(rect) => rect.into_styled(style).draw(target),
        }
        .ok();
    }

    fn draw_shaded<I>(&mut self, points: I, paint: &Paint)
    where
        I: Iterator<Item = Point>,
    {
        let pixels = points.map(|point| Pixel(point, paint.color_at(point)));
        self.target.draw_iter(pixels).ok();
    }
}

impl<D> Surface for Canvas<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    fn clear(&mut self, area: Rectangle) {
        self.target.fill_solid(&area, self.background).ok();
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        match (*paint, *shape) {
            // A line has no interior, so it fills as its one-pixel trace.
            (Paint::Solid(color), Shape::Line(_)) => {
                self.draw_styled(shape, PrimitiveStyle::with_stroke(color, 1))
            }
            (Paint::Solid(color), _) => self.draw_styled(shape, PrimitiveStyle::with_fill(color)),
            (_, Shape::Line(line)) => self.draw_shaded(line.points(), paint),
            (_, Shape::Triangle(triangle)) => self.draw_shaded(triangle.points(), paint),
            (_, Shape::Circle(circle)) => self.draw_shaded(circle.points(), paint),
            (_, Shape::RoundedRectangle(rect)) => self.draw_shaded(rect.points(), paint),
        }
    }

    fn stroke(&mut self, shape: &Shape, color: Rgb888, width: u32) {
        self.draw_styled(shape, PrimitiveStyle::with_stroke(color, width));
    }

    fn fill_text(&mut self, text: &str, position: Point, color: Rgb888) {
        let style = MonoTextStyle::new(&FONT_10X20, color);
        Text::new(text, position, style).draw(&mut self.target).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::surface::GRAY;
    use embedded_graphics::{
        mock_display::MockDisplay,
        primitives::{Line, RoundedRectangle, Triangle},
    };

    fn canvas() -> Canvas<Framebuffer> {
        Canvas::new(Framebuffer::new(64, 64))
    }

    #[test]
    fn test_fill_circle() {
        let mut canvas = canvas();
        canvas.fill(&Shape::circle(Point::new(32, 32), 21), &Paint::Solid(Rgb888::WHITE));
        let area = canvas.target().count(Rgb888::WHITE) as f32;
        let expected = std::f32::consts::PI * 10.5 * 10.5;
        assert!(
            (area - expected).abs() < expected * 0.1,
            "circle area {area} too far from {expected}"
        );
        assert_eq!(canvas.target().pixel(32, 32), Some(Rgb888::WHITE));
        assert_eq!(canvas.target().pixel(32, 45), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_fill_cap_triangle() {
        let mut canvas = canvas();
        let triangle = Triangle::new(Point::new(10, 30), Point::new(16, 24), Point::new(16, 36));
        canvas.fill(&Shape::from(triangle), &Paint::Solid(Rgb888::RED));
        let fb = canvas.into_inner();
        assert!(fb.count(Rgb888::RED) > 20);
        assert_eq!(fb.pixel(14, 30), Some(Rgb888::RED));
        assert_eq!(fb.pixel(9, 30), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut canvas = canvas();
        canvas.fill(&Shape::circle(Point::new(0, 0), 41), &Paint::Solid(Rgb888::WHITE));
        assert!(canvas.target().count(Rgb888::WHITE) > 0);
        assert_eq!(canvas.target().pixel(0, 0), Some(Rgb888::WHITE));
    }

    #[test]
    fn test_gradient_fill_covers_shape() {
        let mut canvas = canvas();
        let panel = RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(0, 0), Size::new(64, 32)),
            Size::new(16, 16),
        );
        canvas.fill(
            &Shape::RoundedRectangle(panel),
            &Paint::LinearGradient {
                start: Point::new(0, 0),
                end: Point::new(60, 0),
                from: GRAY,
                to: Rgb888::BLACK,
            },
        );
        let fb = canvas.into_inner();
        assert_eq!(fb.pixel(16, 16), Some(Rgb888::new(94, 94, 94)));
        assert_eq!(fb.pixel(30, 16), Some(Rgb888::new(64, 64, 64)));
        // Rounded corner stays background
        assert_eq!(fb.pixel(0, 0), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(30, 40), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_solid_and_gradient_cover_same_pixels() {
        let dot = Shape::circle(Point::new(20, 20), 9);

        let mut solid = canvas();
        solid.fill(&dot, &Paint::Solid(Rgb888::WHITE));
        let mut shaded = canvas();
        shaded.fill(
            &dot,
            &Paint::LinearGradient {
                start: Point::new(0, 0),
                end: Point::new(0, 0),
                from: GRAY,
                to: Rgb888::WHITE,
            },
        );
        assert_eq!(
            solid.target().count(Rgb888::WHITE),
            shaded.target().count(Rgb888::WHITE)
        );
    }

    #[test]
    fn test_stroke_line_on_mock_display() {
        let mut display = MockDisplay::<Rgb888>::new();
        display.set_allow_overdraw(true);
        let mut canvas = Canvas::new(display);
        canvas.stroke(
            &Shape::from(Line::new(Point::new(1, 1), Point::new(10, 1))),
            Rgb888::RED,
            1,
        );
        let display = canvas.into_inner();
        assert_eq!(display.affected_area().size, Size::new(10, 1));
    }

    #[test]
    fn test_stroke_circle_leaves_interior() {
        let mut canvas = canvas();
        canvas.stroke(&Shape::circle(Point::new(32, 32), 41), Rgb888::WHITE, 2);
        assert_eq!(canvas.target().pixel(32, 32), Some(Rgb888::BLACK));
        assert!(canvas.target().count(Rgb888::WHITE) > 100);
    }

    #[test]
    fn test_clear_region() {
        let mut canvas = Canvas::with_background(Framebuffer::new(8, 8), Rgb888::BLACK);
        canvas.target_mut().fill_all(Rgb888::WHITE);
        canvas.clear(Rectangle::new(Point::zero(), Size::new(4, 8)));
        assert_eq!(canvas.target().count(Rgb888::BLACK), 32);
    }

    #[test]
    fn test_text_draws_pixels() {
        let mut canvas = canvas();
        canvas.fill_text("12", Point::new(5, 30), Rgb888::RED);
        assert!(canvas.target().count(Rgb888::RED) > 0);
    }
}
