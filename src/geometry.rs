//! Integer pixel geometry shared by the rasterizer, clipper and transforms

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Largest coordinate magnitude a [`Point`] built from floats can hold
///
/// Differences and sums of two bounded coordinates stay within `i32`.
pub const COORD_LIMIT: i32 = 1 << 24;

/// Round a floating coordinate to the nearest pixel, clamped to
/// `[-COORD_LIMIT, COORD_LIMIT]`
#[inline]
pub fn round_px(v: f64) -> i32 {
    let limit = f64::from(COORD_LIMIT);
    (v + 0.5).floor().clamp(-limit, limit) as i32
}

/// A pixel position (or an integer displacement) on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a point from floating coordinates, rounding to the nearest pixel
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(round_px(x), round_px(y))
    }

    /// Vector of the given length pointing `degrees` clockwise from +x (y grows down)
    pub fn from_polar(length: f64, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::from_f64(length * cos, length * sin)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> i64 {
        i64::from(self.x) * i64::from(other.x) + i64::from(self.y) * i64::from(other.y)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn as_f64(&self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::from_f64(f64::from(self.x) * scalar, f64::from(self.y) * scalar)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A line segment between two pixels
///
/// A zero-length segment is the clipper's "nothing visible" result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn direction(&self) -> Point {
        self.end - self.start
    }
}

/// Linear interpolation between two floating points
#[inline]
pub fn lerp(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    ((1.0 - t) * a.0 + t * b.0, (1.0 - t) * a.1 + t * b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_px_halves_round_up() {
        assert_eq!(round_px(10.5), 11);
        assert_eq!(round_px(10.49), 10);
        assert_eq!(round_px(-0.5), 0);
        assert_eq!(round_px(-0.51), -1);
    }

    #[test]
    fn test_huge_coordinates_are_clamped() {
        assert_eq!(round_px(1e12), COORD_LIMIT);
        assert_eq!(round_px(-1e12), -COORD_LIMIT);
        assert_eq!(round_px(f64::INFINITY), COORD_LIMIT);
        let far = Point::from_f64(1e15, -1e15);
        assert_eq!(far, Point::new(COORD_LIMIT, -COORD_LIMIT));
        assert_eq!(Point::new(i32::MAX, 0) + Point::new(1, 0), Point::new(i32::MAX, 0));
        assert_eq!(Point::new(i32::MIN, 0) - Point::new(1, 0), Point::new(i32::MIN, 0));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3, 4);
        let b = Point::new(1, -2);
        assert_eq!(a + b, Point::new(4, 2));
        assert_eq!(a - b, Point::new(2, 6));
        assert_eq!(-a, Point::new(-3, -4));
        assert_eq!(a * 2.5, Point::new(8, 10));
        assert_eq!(a.dot(&b), -5);
        assert!((Point::new(0, 0).distance_to(&a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_polar_points_down_at_90_degrees() {
        assert_eq!(Point::from_polar(150.0, 90.0), Point::new(0, 150));
        assert_eq!(Point::from_polar(10.0, 0.0), Point::new(10, 0));
        assert_eq!(Point::from_polar(10.0, 180.0), Point::new(-10, 0));
    }

    #[test]
    fn test_segment_degenerate() {
        assert!(Segment::default().is_degenerate());
        assert!(!Segment::new(Point::new(0, 0), Point::new(1, 0)).is_degenerate());
    }
}
