//! LED bar geometry.
//!
//! A lit segment is drawn as two pointed caps joined by a thick stroke,
//! which reads as a tapered bar. Only axis-aligned segments are supported:
//! the cap spread is applied along the axis perpendicular to the segment's
//! [`Orientation`], not perpendicular to an arbitrary line.

use embedded_graphics::{
    prelude::Point,
    primitives::{Line, Triangle},
};

use crate::segments::Orientation;

/// Half-width of a bar and length of each cap.
pub const TIP_OFFSET: i32 = 3;

/// Drawable pieces of one lit segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentShape {
    /// Filled triangle with its apex at the segment start.
    pub start_cap: Triangle,
    /// Centerline between the caps, stroked.
    pub body: Line,
    /// Filled triangle with its apex at the segment end.
    pub end_cap: Triangle,
}

/// Build the LED bar for the segment running from `start` to `end`.
///
/// Each cap's apex sits on the segment endpoint and its base lies
/// [`TIP_OFFSET`] further into the bar, spread by the same amount to either
/// side. The body is inset from both ends by the cap length so the stroke
/// meets the cap bases without overlapping the tips.
///
/// # Example
/// ```
/// use embedded_graphics::prelude::Point;
/// use hv_clocks::{geometry::build_segment_shape, segments::Orientation};
///
/// let shape = build_segment_shape(Point::new(100, 110), Point::new(115, 110), Orientation::Horizontal);
/// assert_eq!(shape.body.start, Point::new(103, 110));
/// assert_eq!(shape.body.end, Point::new(112, 110));
/// ```
pub fn build_segment_shape(start: Point, end: Point, orientation: Orientation) -> SegmentShape {
    let (along, across) = match orientation {
        Orientation::Horizontal => (Point::new(TIP_OFFSET, 0), Point::new(0, TIP_OFFSET)),
        Orientation::Vertical => (Point::new(0, TIP_OFFSET), Point::new(TIP_OFFSET, 0)),
    };

    SegmentShape {
        start_cap: Triangle::new(start, start + along - across, start + along + across),
        body: Line::new(start + along, end - along),
        end_cap: Triangle::new(end, end - along + across, end - along - across),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_bar() {
        let shape = build_segment_shape(
            Point::new(100, 110),
            Point::new(115, 110),
            Orientation::Horizontal,
        );
        assert_eq!(
            shape.start_cap.vertices,
            [Point::new(100, 110), Point::new(103, 107), Point::new(103, 113)]
        );
        assert_eq!(
            shape.body,
            Line::new(Point::new(103, 110), Point::new(112, 110))
        );
        assert_eq!(
            shape.end_cap.vertices,
            [Point::new(115, 110), Point::new(112, 113), Point::new(112, 107)]
        );
    }

    #[test]
    fn test_vertical_bar() {
        let shape = build_segment_shape(
            Point::new(115, 112),
            Point::new(115, 150),
            Orientation::Vertical,
        );
        assert_eq!(
            shape.start_cap.vertices,
            [Point::new(115, 112), Point::new(112, 115), Point::new(118, 115)]
        );
        assert_eq!(
            shape.body,
            Line::new(Point::new(115, 115), Point::new(115, 147))
        );
        assert_eq!(
            shape.end_cap.vertices,
            [Point::new(115, 150), Point::new(118, 147), Point::new(112, 147)]
        );
    }

    #[test]
    fn test_horizontal_spread_is_vertical_only() {
        let (p0, p1) = (Point::new(160, 190), Point::new(175, 190));
        let shape = build_segment_shape(p0, p1, Orientation::Horizontal);

        // Apexes sit exactly on the endpoints.
        assert_eq!(shape.start_cap.vertices[0], p0);
        assert_eq!(shape.end_cap.vertices[0], p1);

        // Base points share one x and differ only in y.
        let [_, a, b] = shape.start_cap.vertices;
        assert_eq!(a.x, b.x);
        assert_eq!((a.y - p0.y).abs(), TIP_OFFSET);
        assert_eq!(a.y + b.y, 2 * p0.y);
        let [_, c, d] = shape.end_cap.vertices;
        assert_eq!(c.x, d.x);
        assert_eq!(c.y + d.y, 2 * p1.y);

        // The body stays on the segment's own line.
        assert_eq!(shape.body.start.y, p0.y);
        assert_eq!(shape.body.end.y, p1.y);
    }

    #[test]
    fn test_vertical_spread_is_horizontal_only() {
        let (p0, p1) = (Point::new(185, 152), Point::new(185, 188));
        let shape = build_segment_shape(p0, p1, Orientation::Vertical);

        assert_eq!(shape.start_cap.vertices[0], p0);
        assert_eq!(shape.end_cap.vertices[0], p1);

        let [_, a, b] = shape.start_cap.vertices;
        assert_eq!(a.y, b.y);
        assert_eq!(a.x + b.x, 2 * p0.x);
        let [_, c, d] = shape.end_cap.vertices;
        assert_eq!(c.y, d.y);
        assert_eq!(c.x + d.x, 2 * p1.x);

        assert_eq!(shape.body.start.x, p0.x);
        assert_eq!(shape.body.end.x, p1.x);
    }

    #[test]
    fn test_deterministic() {
        let p0 = Point::new(125, 150);
        let p1 = Point::new(140, 150);
        assert_eq!(
            build_segment_shape(p0, p1, Orientation::Horizontal),
            build_segment_shape(p0, p1, Orientation::Horizontal)
        );
    }
}
