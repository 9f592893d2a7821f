//! Geometric primitives and the vector math used by the drag classifier.
//!
//! All values are plain `Copy` types. Points double as 2D vectors: the drag
//! classifier works in a normalized grid where the card spans `[-1, 1]` on
//! both axes, while frames and translations are expressed in pixels.

use std::ops::{Add, Mul, Neg, Sub};

/// A point (or vector) in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component. Grows downwards, like screen coordinates.
    pub y: f64,
}

impl Point {
    /// The origin, which is also the center of the normalized grid.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Multiply both components by a scalar.
    pub fn scale(self, k: f64) -> Self {
        Self::new(k * self.x, k * self.y)
    }

    /// Component-wise product of two points.
    pub fn multiply_components(self, other: Point) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Map a pixel translation into the `[-1, 1]` grid of a view of `size`.
    ///
    /// The grid spans two units per axis, hence the factor of two. A zero-sized
    /// view yields non-finite components; callers treat those as degenerate.
    pub fn normalize(self, size: Size) -> Self {
        Self::new(2.0 * (self.x / size.width), 2.0 * (self.y / size.height))
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Dot product of two vectors.
    pub fn scalar_product(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Project this vector onto the axis of `vector`.
    ///
    /// ```text
    ///          w . v
    /// proj = ------- * v
    ///          v . v
    /// ```
    pub fn scalar_projection(self, vector: Point) -> Self {
        let r = self.scalar_product(vector) / vector.scalar_product(vector);
        Self::new(vector.x * r, vector.y * r)
    }

    /// Length of the vector.
    pub fn module(self) -> f64 {
        self.scalar_product(self).sqrt()
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Point, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        rhs.scale(self)
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The size as a vector, for component-wise math.
    pub fn to_point(self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Check whether the size has positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A line through two points.
///
/// Intersections treat the line as infinite, not as a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// First point on the line.
    pub start: Point,
    /// Second point on the line.
    pub end: Point,
}

impl Line {
    /// Create a line through `start` and `end`.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Intersection point of two lines, or `None` when they are parallel.
    pub fn intersection(self, other: Line) -> Option<Point> {
        let (p1, p2) = (self.start, self.end);
        let (p3, p4) = (other.start, other.end);

        let mut d = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
        let mut ua = (p4.x - p3.x) * (p1.y - p4.y) - (p4.y - p3.y) * (p1.x - p3.x);
        if d < 0.0 {
            ua = -ua;
            d = -d;
        }

        if d == 0.0 {
            return None;
        }
        Some(Point::new(
            p1.x + ua / d * (p2.x - p1.x),
            p1.y + ua / d * (p2.y - p1.y),
        ))
    }
}

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent of the rectangle.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// A rectangle anchored at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(Point::ZERO, size)
    }

    /// Linear interpolation of origin and size towards `other`.
    pub fn lerp(self, other: Rect, t: f64) -> Self {
        let size = self.size.to_point().lerp(other.size.to_point(), t);
        Self::new(
            self.origin.lerp(other.origin, t),
            Size::new(size.x, size.y),
        )
    }
}
