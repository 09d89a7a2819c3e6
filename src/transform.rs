//! Affine point operators
//!
//! Every operator takes its pivot explicitly and rounds the result back to
//! the pixel grid. Angles follow the math convention on the y-down canvas:
//! clockwise rotation negates the angle before it enters the rotation matrix.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Rotation sense
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "ccw")]
    CounterClockwise,
    #[serde(alias = "cw")]
    Clockwise,
}

/// An angle, stored in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Angle(f64);

impl Angle {
    pub fn degrees(deg: f64) -> Self {
        Self(deg.to_radians())
    }

    pub const fn radians(rad: f64) -> Self {
        Self(rad)
    }

    pub fn as_radians(self) -> f64 {
        self.0
    }

    /// Signed radians for the given rotation sense
    fn signed(self, direction: Direction) -> f64 {
        match direction {
            Direction::CounterClockwise => self.0,
            Direction::Clockwise => -self.0,
        }
    }
}

pub fn translate(p: Point, offset: Point) -> Point {
    p + offset
}

pub fn scale(p: Point, origin: Point, sx: f64, sy: f64) -> Point {
    origin + scale_vector(p - origin, sx, sy)
}

pub fn scale_vector(v: Point, sx: f64, sy: f64) -> Point {
    Point::from_f64(f64::from(v.x) * sx, f64::from(v.y) * sy)
}

pub fn rotate(p: Point, origin: Point, angle: Angle, direction: Direction) -> Point {
    origin + rotate_vector(p - origin, angle, direction)
}

pub fn rotate_vector(v: Point, angle: Angle, direction: Direction) -> Point {
    let (sin, cos) = angle.signed(direction).sin_cos();
    let (x, y) = v.as_f64();
    Point::from_f64(x * cos - y * sin, x * sin + y * cos)
}

/// Horizontal shear: x moves by `factor` times the height above `pivot`
pub fn shear(p: Point, pivot: Point, factor: f64) -> Point {
    pivot + shear_vector(p - pivot, factor)
}

pub fn shear_vector(v: Point, factor: f64) -> Point {
    let (x, y) = v.as_f64();
    Point::from_f64(x + y * factor, y)
}

/// Mirror `p` across the infinite line through `a1` and `a2`
///
/// A degenerate axis (`a1 == a2`) leaves the point unchanged.
pub fn reflect(p: Point, a1: Point, a2: Point) -> Point {
    let d = a2 - a1;
    let a = f64::from(-d.y);
    let b = f64::from(d.x);
    let norm = a * a + b * b;
    if norm == 0.0 {
        return p;
    }
    let c = -(a * f64::from(a1.x) + b * f64::from(a1.y));
    let (x, y) = p.as_f64();
    let k = 2.0 * (a * x + b * y + c) / norm;
    Point::from_f64(x - k * a, y - k * b)
}

/// Mirror a direction vector across an axis parallel to `a1`-`a2`
pub fn reflect_vector(v: Point, a1: Point, a2: Point) -> Point {
    reflect(v, Point::default(), a2 - a1)
}

/// One affine operation with its pivot bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Affine {
    Translate(Point),
    Scale { origin: Point, sx: f64, sy: f64 },
    Rotate { origin: Point, angle: Angle, direction: Direction },
    Shear { pivot: Point, factor: f64 },
    Reflect { a1: Point, a2: Point },
}

impl Affine {
    /// Map a position
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Self::Translate(offset) => translate(p, offset),
            Self::Scale { origin, sx, sy } => scale(p, origin, sx, sy),
            Self::Rotate {
                origin,
                angle,
                direction,
            } => rotate(p, origin, angle, direction),
            Self::Shear { pivot, factor } => shear(p, pivot, factor),
            Self::Reflect { a1, a2 } => reflect(p, a1, a2),
        }
    }

    /// Map a free vector (tangent): no translation, no pivot
    pub fn apply_vector(&self, v: Point) -> Point {
        match *self {
            Self::Translate(_) => v,
            Self::Scale { sx, sy, .. } => scale_vector(v, sx, sy),
            Self::Rotate {
                angle, direction, ..
            } => rotate_vector(v, angle, direction),
            Self::Shear { factor, .. } => shear_vector(v, factor),
            Self::Reflect { a1, a2 } => reflect_vector(v, a1, a2),
        }
    }

    /// Rebind the pivot of a pivoted operation; translation and
    /// reflection are returned unchanged
    pub fn with_pivot(self, pivot: Point) -> Self {
        match self {
            Self::Scale { sx, sy, .. } => Self::Scale {
                origin: pivot,
                sx,
                sy,
            },
            Self::Rotate {
                angle, direction, ..
            } => Self::Rotate {
                origin: pivot,
                angle,
                direction,
            },
            Self::Shear { factor, .. } => Self::Shear { pivot, factor },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::COORD_LIMIT;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_scale_about_origin() {
        assert_eq!(scale(pt(30, 40), pt(10, 20), 2.0, 0.5), pt(50, 30));
        assert_eq!(scale(pt(10, 20), pt(10, 20), 3.0, 3.0), pt(10, 20));
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let o = pt(100, 100);
        let quarter = Angle::degrees(90.0);
        assert_eq!(rotate(pt(150, 100), o, quarter, Direction::CounterClockwise), pt(100, 150));
        assert_eq!(rotate(pt(150, 100), o, quarter, Direction::Clockwise), pt(100, 50));
    }

    #[test]
    fn test_rotate_round_trip_within_one_pixel() {
        let o = pt(200, 150);
        for deg in (0..360).step_by(7) {
            for &p in &[pt(260, 150), pt(123, 321), pt(10, 12), pt(480, 77)] {
                let angle = Angle::degrees(f64::from(deg));
                let there = rotate(p, o, angle, Direction::Clockwise);
                let back = rotate(there, o, angle, Direction::CounterClockwise);
                assert!(
                    (back.x - p.x).abs() <= 1 && (back.y - p.y).abs() <= 1,
                    "{:?} -> {:?} -> {:?} at {} deg",
                    p,
                    there,
                    back,
                    deg
                );
            }
        }
    }

    #[test]
    fn test_rotation_uses_unrotated_x_for_y() {
        // y must be computed from the unrotated x
        let r = rotate_vector(pt(100, 0), Angle::degrees(45.0), Direction::CounterClockwise);
        assert_eq!(r, pt(71, 71));
    }

    #[test]
    fn test_shear_relative_to_pivot() {
        let pivot = pt(50, 50);
        assert_eq!(shear(pt(50, 50), pivot, 0.5), pt(50, 50));
        assert_eq!(shear(pt(60, 90), pivot, 0.5), pt(80, 90));
        assert_eq!(shear(pt(60, 10), pivot, 0.5), pt(40, 10));
    }

    #[test]
    fn test_extreme_factors_stay_in_range() {
        let o = pt(100, 100);
        let far = scale(pt(200, 100), o, 1e12, 1e12);
        assert_eq!(far, pt(100 + COORD_LIMIT, 100));
        assert_eq!(scale(far, o, 1e12, 1e12).x, 100 + COORD_LIMIT);
        assert_eq!(shear(pt(100, 200), o, -1e12).x, 100 - COORD_LIMIT);
        let huge = Angle::degrees(1e300);
        let r = rotate(pt(i32::MAX, i32::MIN), o, huge, Direction::Clockwise);
        assert!(r.x.abs() <= COORD_LIMIT + 100 && r.y.abs() <= COORD_LIMIT + 100);
    }

    #[test]
    fn test_reflect_across_axes() {
        // Vertical axis x = 100
        assert_eq!(reflect(pt(130, 40), pt(100, 0), pt(100, 200)), pt(70, 40));
        // Diagonal y = x swaps coordinates
        assert_eq!(reflect(pt(30, 80), pt(0, 0), pt(10, 10)), pt(80, 30));
        // Points on the axis stay put
        assert_eq!(reflect(pt(50, 50), pt(0, 0), pt(10, 10)), pt(50, 50));
        // Degenerate axis
        assert_eq!(reflect(pt(3, 4), pt(9, 9), pt(9, 9)), pt(3, 4));
    }

    #[test]
    fn test_reflect_is_an_involution() {
        let (a1, a2) = (pt(20, 30), pt(200, 90));
        let p = pt(140, 220);
        let once = reflect(p, a1, a2);
        let twice = reflect(once, a1, a2);
        assert!((twice.x - p.x).abs() <= 1 && (twice.y - p.y).abs() <= 1);
    }

    #[test]
    fn test_vectors_ignore_translation_and_pivot() {
        let v = pt(0, 150);
        assert_eq!(Affine::Translate(pt(40, 40)).apply_vector(v), v);
        let s = Affine::Scale {
            origin: pt(300, 300),
            sx: 2.0,
            sy: 2.0,
        };
        assert_eq!(s.apply_vector(v), pt(0, 300));
        let m = Affine::Reflect {
            a1: pt(100, 0),
            a2: pt(100, 200),
        };
        assert_eq!(m.apply_vector(pt(30, 40)), pt(-30, 40));
    }

    #[test]
    fn test_with_pivot_rebinds_origin() {
        let op = Affine::Scale {
            origin: Point::default(),
            sx: 2.0,
            sy: 2.0,
        }
        .with_pivot(pt(10, 10));
        assert_eq!(op.apply(pt(20, 10)), pt(30, 10));
        let t = Affine::Translate(pt(1, 2));
        assert_eq!(t.with_pivot(pt(9, 9)), t);
    }
}
