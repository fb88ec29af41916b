//! Axis-aligned rectangle shape.

use super::{BoundingRectangle, Point, Scale, Shape, ShapeTrait};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle measured in some coordinate space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge position.
    pub left: f64,
    /// Top edge position.
    pub top: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Factor to the ancestor coordinate space this rectangle was measured in.
    #[serde(default)]
    pub scale: Scale,
}

impl Rectangle {
    /// Create a new rectangle with identity scale.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            scale: Scale::IDENTITY,
        }
    }

    /// Attach a coordinate-space scale factor.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Right edge position.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge position.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether every edge and size is a finite number.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Intersection ratio of two raw bounding rectangles.
    pub fn ratio_of(a: BoundingRectangle, b: BoundingRectangle) -> f64 {
        Rectangle::from(a).intersection_ratio(&Shape::Rectangle(Rectangle::from(b)))
    }
}

impl From<BoundingRectangle> for Rectangle {
    fn from(rect: BoundingRectangle) -> Self {
        Self::new(rect.left, rect.top, rect.width, rect.height)
    }
}

impl ShapeTrait for Rectangle {
    fn bounding_rectangle(&self) -> BoundingRectangle {
        BoundingRectangle {
            top: self.top,
            left: self.left,
            right: self.right(),
            bottom: self.bottom(),
            width: self.width,
            height: self.height,
        }
    }

    fn center(&self) -> Point {
        Point::new(
            (self.left + self.right()) / 2.0,
            (self.top + self.bottom()) / 2.0,
        )
    }

    fn area(&self) -> f64 {
        (self.width * self.height).max(0.0)
    }

    fn equals(&self, other: &Shape) -> bool {
        match other {
            Shape::Rectangle(r) => {
                self.left == r.left
                    && self.top == r.top
                    && self.width == r.width
                    && self.height == r.height
            }
        }
    }

    fn contains_point(&self, point: Point) -> bool {
        self.top <= point.y
            && point.y <= self.bottom()
            && self.left <= point.x
            && point.x <= self.right()
    }

    fn intersection_area(&self, other: &Shape) -> f64 {
        match other {
            Shape::Rectangle(r) => rectangle_intersection(self, r),
        }
    }

    fn translate(&self, dx: f64, dy: f64) -> Shape {
        Shape::Rectangle(Rectangle {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        })
    }

    fn scale(&self) -> Scale {
        self.scale
    }
}

/// Overlapping area of two rectangles; zero for disjoint or merely touching rectangles.
///
/// A rectangle with a non-finite edge overlaps nothing.
fn rectangle_intersection(a: &Rectangle, b: &Rectangle) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }
    let top = a.top.max(b.top);
    let left = a.left.max(b.left);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());

    if left < right && top < bottom {
        (right - left) * (bottom - top)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(left, top, width, height))
    }

    #[test]
    fn test_rectangle_edges() {
        let r = Rectangle::new(10.0, 20.0, 100.0, 50.0);
        assert!((r.right() - 110.0).abs() < f64::EPSILON);
        assert!((r.bottom() - 70.0).abs() < f64::EPSILON);
        let bounds = r.bounding_rectangle();
        assert_eq!(bounds, BoundingRectangle::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_center_and_area() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 4.0);
        assert_eq!(r.center(), Point::new(5.0, 2.0));
        assert!((r.area() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intersection_area() {
        let a = rect(5.0, 5.0, 10.0, 10.0);
        let b = rect(8.0, 8.0, 10.0, 10.0);
        assert!((a.intersection_area(&b) - 49.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translated_ratio() {
        // 10x10 centered on the origin, moved by (5, 5) onto a 10x10 at (8, 8).
        let dragged = rect(-5.0, -5.0, 10.0, 10.0).translate(5.0, 5.0);
        let droppable = rect(8.0, 8.0, 10.0, 10.0);
        assert!((dragged.intersection_area(&droppable) - 4.0).abs() < f64::EPSILON);

        let moved_further = dragged.translate(5.0, 5.0);
        let ratio = moved_further.intersection_ratio(&droppable);
        assert!((ratio - 49.0 / 151.0).abs() < 1e-12);

        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 8.0, 10.0, 10.0);
        assert!((a.intersection_area(&b) - 4.0).abs() < f64::EPSILON);
        assert!((a.intersection_ratio(&b) - 4.0 / 196.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let pairs = [
            (rect(0.0, 0.0, 10.0, 10.0), rect(3.0, 4.0, 20.0, 7.0)),
            (rect(-5.0, 2.0, 1.5, 30.0), rect(-4.0, 0.0, 6.0, 6.0)),
            (rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0)),
            (rect(0.0, 0.0, 4.0, 4.0), rect(100.0, 100.0, 4.0, 4.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.intersection_ratio(&b), b.intersection_ratio(&a));
        }
    }

    #[test]
    fn test_edge_and_corner_contact_is_not_intersection() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let edge = rect(10.0, 0.0, 10.0, 10.0);
        let corner = rect(10.0, 10.0, 5.0, 5.0);
        assert_eq!(a.intersection_area(&edge), 0.0);
        assert_eq!(a.intersection_area(&corner), 0.0);
        assert_eq!(a.intersection_ratio(&edge), 0.0);
    }

    #[test]
    fn test_non_finite_rectangle_overlaps_nothing() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let nan = rect(f64::NAN, 0.0, 10.0, 10.0);
        let infinite = rect(0.0, 0.0, f64::INFINITY, 10.0);
        assert_eq!(a.intersection_area(&nan), 0.0);
        assert_eq!(nan.intersection_area(&a), 0.0);
        assert_eq!(a.intersection_ratio(&nan), 0.0);
        assert_eq!(a.intersection_area(&infinite), 0.0);
    }

    #[test]
    fn test_zero_area_ratio() {
        let a = rect(0.0, 0.0, 0.0, 0.0);
        let b = rect(0.0, 0.0, 0.0, 0.0);
        assert_eq!(a.intersection_ratio(&b), 0.0);
    }

    #[test]
    fn test_identical_ratio_is_one() {
        let a = rect(2.0, 2.0, 6.0, 6.0);
        assert!((a.intersection_ratio(&a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate_zero_equals_self() {
        let a = rect(3.5, -2.0, 7.0, 9.0);
        assert!(a.translate(0.0, 0.0).equals(&a));
    }

    #[test]
    fn test_translate_preserves_scale() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0).with_scale(Scale::new(2.0, 2.0));
        let moved = r.translate(4.0, -1.0);
        assert_eq!(moved.scale(), Scale::new(2.0, 2.0));
        assert_eq!(moved.inverse_scale(), Scale::new(0.5, 0.5));
        // The original is untouched.
        assert_eq!(r.left, 0.0);
    }

    #[test]
    fn test_equals_ignores_scale() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Shape::Rectangle(a.with_scale(Scale::new(3.0, 3.0)));
        assert!(a.equals(&b));
        assert!(!a.equals(&rect(0.0, 0.0, 10.0, 11.0)));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Point::new(5.0, 5.0)));
        assert!(r.contains_point(Point::new(10.0, 10.0)));
        assert!(r.contains_point(Point::new(0.0, 7.0)));
        assert!(!r.contains_point(Point::new(10.5, 5.0)));
    }

    #[test]
    fn test_ratio_of_bounding_rectangles() {
        let a = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingRectangle::new(5.0, 0.0, 10.0, 10.0);
        assert!((Rectangle::ratio_of(a, b) - 50.0 / 150.0).abs() < 1e-12);
    }
}
