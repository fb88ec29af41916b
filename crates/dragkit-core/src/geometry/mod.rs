//! Geometry value types shared by collision detection and modifiers.

mod rectangle;

pub use rectangle::Rectangle;

pub use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Cumulative positional offset applied to a dragged entity since drag start.
pub type Transform = Vec2;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Per-axis factor between a shape's coordinate space and a transformed ancestor space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    /// Identity scale.
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    /// Create a scale from per-axis factors.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The factor mapping back from the ancestor space.
    pub fn inverse(self) -> Self {
        Self {
            x: 1.0 / self.x,
            y: 1.0 / self.y,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Plain edge/size snapshot of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRectangle {
    /// Build a bounding rectangle from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Bounding rectangle of a viewport of the given client size, anchored at the origin.
    pub fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

impl From<kurbo::Rect> for BoundingRectangle {
    fn from(rect: kurbo::Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<BoundingRectangle> for kurbo::Rect {
    fn from(rect: BoundingRectangle) -> Self {
        kurbo::Rect::new(rect.left, rect.top, rect.left + rect.width, rect.top + rect.height)
    }
}

/// Capabilities every shape variant provides.
pub trait ShapeTrait {
    /// Edge/size snapshot of the shape.
    fn bounding_rectangle(&self) -> BoundingRectangle;

    /// Geometric center.
    fn center(&self) -> Point;

    /// Area, never negative.
    fn area(&self) -> f64;

    /// Structural equality with another shape of any variant.
    fn equals(&self, other: &Shape) -> bool;

    /// Whether `point` lies inside the shape or on its boundary.
    fn contains_point(&self, point: Point) -> bool;

    /// Area shared with `other`. Edge or corner contact yields zero.
    fn intersection_area(&self, other: &Shape) -> f64;

    /// Intersection over union with `other`, in `[0, 1]`.
    fn intersection_ratio(&self, other: &Shape) -> f64 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union > 0.0 { intersection / union } else { 0.0 }
    }

    /// A copy of this shape moved by `(dx, dy)`.
    fn translate(&self, dx: f64, dy: f64) -> Shape;

    /// Factor to the ancestor coordinate space this shape was measured in.
    fn scale(&self) -> Scale;

    /// Factor from the ancestor coordinate space back to this shape's own space.
    fn inverse_scale(&self) -> Scale {
        self.scale().inverse()
    }
}

/// Closed set of shape variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
}

impl Shape {
    /// Translate by a transform vector.
    pub fn translated_by(&self, transform: Transform) -> Shape {
        self.translate(transform.x, transform.y)
    }

    /// Whether the shape has only finite coordinates. Non-finite shapes never collide.
    pub fn is_finite(&self) -> bool {
        match self {
            Shape::Rectangle(s) => s.is_finite(),
        }
    }

    /// Corner points in clockwise order starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        let rect = self.bounding_rectangle();
        [
            Point::new(rect.left, rect.top),
            Point::new(rect.right, rect.top),
            Point::new(rect.right, rect.bottom),
            Point::new(rect.left, rect.bottom),
        ]
    }
}

impl ShapeTrait for Shape {
    fn bounding_rectangle(&self) -> BoundingRectangle {
        match self {
            Shape::Rectangle(s) => s.bounding_rectangle(),
        }
    }

    fn center(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.center(),
        }
    }

    fn area(&self) -> f64 {
        match self {
            Shape::Rectangle(s) => s.area(),
        }
    }

    fn equals(&self, other: &Shape) -> bool {
        match self {
            Shape::Rectangle(s) => s.equals(other),
        }
    }

    fn contains_point(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains_point(point),
        }
    }

    fn intersection_area(&self, other: &Shape) -> f64 {
        match self {
            Shape::Rectangle(s) => s.intersection_area(other),
        }
    }

    fn translate(&self, dx: f64, dy: f64) -> Shape {
        match self {
            Shape::Rectangle(s) => s.translate(dx, dy),
        }
    }

    fn scale(&self) -> Scale {
        match self {
            Shape::Rectangle(s) => s.scale(),
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_subtraction() {
        let delta = Point::new(7.0, 3.0) - Point::new(2.0, 1.0);
        assert_eq!(delta, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn test_scale_inverse() {
        let scale = Scale::new(2.0, 0.5);
        assert_eq!(scale.inverse(), Scale::new(0.5, 2.0));
        assert_eq!(Scale::default(), Scale::IDENTITY);
    }

    #[test]
    fn test_viewport_rectangle() {
        let viewport = BoundingRectangle::viewport(800.0, 600.0);
        assert_eq!(viewport.top, 0.0);
        assert_eq!(viewport.left, 0.0);
        assert_eq!(viewport.right, 800.0);
        assert_eq!(viewport.bottom, 600.0);
    }

    #[test]
    fn test_bounding_rectangle_from_kurbo() {
        let rect: BoundingRectangle = kurbo::Rect::new(30.0, 40.0, 10.0, 20.0).into();
        assert_eq!(rect, BoundingRectangle::new(10.0, 20.0, 20.0, 20.0));

        let back: kurbo::Rect = rect.into();
        assert_eq!(back, kurbo::Rect::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_shape_finiteness() {
        assert!(Shape::from(Rectangle::new(1.0, 2.0, 3.0, 4.0)).is_finite());
        assert!(!Shape::from(Rectangle::new(f64::NAN, 2.0, 3.0, 4.0)).is_finite());
        assert!(!Shape::from(Rectangle::new(1.0, 2.0, f64::INFINITY, 4.0)).is_finite());
    }

    #[test]
    fn test_shape_serde_tag() {
        let shape: Shape = Rectangle::new(1.0, 2.0, 3.0, 4.0).into();
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rectangle");
        let back: Shape = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_corners() {
        let shape: Shape = Rectangle::new(0.0, 0.0, 10.0, 5.0).into();
        let corners = shape.corners();
        assert_eq!(corners[0], Point::new(0.0, 0.0));
        assert_eq!(corners[2], Point::new(10.0, 5.0));
    }
}
