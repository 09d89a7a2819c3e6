//! Parametric curve samplers
//!
//! Each sampler turns control data into a polyline of rounded pixel
//! positions; the rasterizer draws consecutive samples as line segments.
//! Below its minimum point count a sampler returns an empty polyline.

use crate::geometry::{lerp, Point};
use serde::{Deserialize, Serialize};

/// Parameter step for Hermite segments
pub const HERMITE_STEP: f64 = 0.05;
/// Parameter step for B-spline segments
pub const COONS_STEP: f64 = 0.05;
/// Bezier curves take `BEZIER_SAMPLES_PER_POINT * n` steps for `n` controls
pub const BEZIER_SAMPLES_PER_POINT: usize = 10;

/// Anchor of a cubic Hermite spline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HermiteAnchor {
    pub point: Point,
    /// Tangent vector, relative to `point`
    pub tangent: Point,
}

impl HermiteAnchor {
    pub const fn new(point: Point, tangent: Point) -> Self {
        Self { point, tangent }
    }

    /// End of the tangent guide handle
    pub fn handle(&self) -> Point {
        self.point + self.tangent
    }
}

/// Number of steps covering `[0, 1]` with the given step size
fn steps(dt: f64) -> usize {
    (1.0 / dt).round() as usize
}

/// Append a sample, skipping it if it repeats the previous pixel
fn push_sample(out: &mut Vec<Point>, p: Point) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

/// Cubic Hermite spline through `anchors`
pub fn hermite(anchors: &[HermiteAnchor]) -> Vec<Point> {
    if anchors.len() < 2 {
        return Vec::new();
    }
    let n = steps(HERMITE_STEP);
    let mut out = Vec::with_capacity((anchors.len() - 1) * n + 1);

    for pair in anchors.windows(2) {
        let (p0, t0) = (pair[0].point.as_f64(), pair[0].tangent.as_f64());
        let (p1, t1) = (pair[1].point.as_f64(), pair[1].tangent.as_f64());
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = -2.0 * t3 + 3.0 * t2;
            let h01 = t3 - 2.0 * t2 + t;
            let h11 = t3 - t2;
            let x = p0.0 * h00 + p1.0 * h10 + t0.0 * h01 + t1.0 * h11;
            let y = p0.1 * h00 + p1.1 * h10 + t0.1 * h01 + t1.1 * h11;
            push_sample(&mut out, Point::from_f64(x, y));
        }
    }
    out
}

/// Point at parameter `t` by repeated linear interpolation
pub fn de_casteljau(controls: &[Point], t: f64) -> Option<(f64, f64)> {
    let mut work: Vec<(f64, f64)> = controls.iter().map(Point::as_f64).collect();
    while work.len() > 1 {
        for i in 0..work.len() - 1 {
            work[i] = lerp(work[i], work[i + 1], t);
        }
        work.pop();
    }
    work.first().copied()
}

/// Single Bezier curve over all `controls`
pub fn bezier(controls: &[Point]) -> Vec<Point> {
    if controls.len() < 2 {
        return Vec::new();
    }
    let n = BEZIER_SAMPLES_PER_POINT * controls.len();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let t = i as f64 / n as f64;
        if let Some((x, y)) = de_casteljau(controls, t) {
            push_sample(&mut out, Point::from_f64(x, y));
        }
    }
    out
}

/// Uniform cubic B-spline, one segment per window of four controls
pub fn coons(controls: &[Point]) -> Vec<Point> {
    if controls.len() < 4 {
        return Vec::new();
    }
    let n = steps(COONS_STEP);
    let mut out = Vec::with_capacity((controls.len() - 3) * n + 1);

    for window in controls.windows(4) {
        let p: Vec<(f64, f64)> = window.iter().map(Point::as_f64).collect();
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let b0 = (-t3 + 3.0 * t2 - 3.0 * t + 1.0) / 6.0;
            let b1 = (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0;
            let b2 = (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0;
            let b3 = t3 / 6.0;
            let x = p[0].0 * b0 + p[1].0 * b1 + p[2].0 * b2 + p[3].0 * b3;
            let y = p[0].1 * b0 + p[1].1 * b1 + p[2].1 * b2 + p[3].1 * b3;
            push_sample(&mut out, Point::from_f64(x, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_hermite_interpolates_anchors() {
        let anchors = [
            HermiteAnchor::new(pt(50, 200), pt(0, 150)),
            HermiteAnchor::new(pt(200, 100), pt(0, 150)),
            HermiteAnchor::new(pt(350, 220), pt(100, 0)),
        ];
        let curve = hermite(&anchors);
        assert_eq!(curve.first(), Some(&pt(50, 200)));
        assert_eq!(curve.last(), Some(&pt(350, 220)));
        assert!(curve.contains(&pt(200, 100)));
    }

    #[test]
    fn test_hermite_zero_tangents_stay_on_chord() {
        let anchors = [
            HermiteAnchor::new(pt(0, 0), Point::default()),
            HermiteAnchor::new(pt(100, 0), Point::default()),
        ];
        let curve = hermite(&anchors);
        assert!(curve.iter().all(|p| p.y == 0));
        assert!(curve.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn test_hermite_needs_two_anchors() {
        assert!(hermite(&[HermiteAnchor::new(pt(1, 1), pt(0, 150))]).is_empty());
    }

    #[test]
    fn test_bezier_endpoints_and_midpoint() {
        let controls = [pt(0, 0), pt(100, 200), pt(200, 0)];
        let curve = bezier(&controls);
        assert_eq!(curve.first(), Some(&pt(0, 0)));
        assert_eq!(curve.last(), Some(&pt(200, 0)));
        // Quadratic peak at t = 0.5 is half the control height
        assert!(curve.contains(&pt(100, 100)));
        assert_eq!(de_casteljau(&controls, 0.5), Some((100.0, 100.0)));
    }

    #[test]
    fn test_bezier_two_points_is_a_line() {
        let curve = bezier(&[pt(10, 10), pt(30, 50)]);
        assert_eq!(curve.first(), Some(&pt(10, 10)));
        assert_eq!(curve.last(), Some(&pt(30, 50)));
        assert!(curve.iter().all(|p| (p.y - 10) == 2 * (p.x - 10)));
        assert!(bezier(&[pt(1, 1)]).is_empty());
    }

    #[test]
    fn test_coons_segment_ends_at_weighted_averages() {
        let controls = [pt(0, 0), pt(60, 120), pt(120, 0), pt(180, 120), pt(240, 0)];
        let curve = coons(&controls);
        // (P0 + 4 P1 + P2) / 6 and (P2 + 4 P3 + P4) / 6
        assert_eq!(curve.first(), Some(&pt(60, 80)));
        assert_eq!(curve.last(), Some(&pt(180, 80)));
        // Second window starts where the first ends
        assert!(curve.contains(&pt(120, 40)));
    }

    #[test]
    fn test_coons_needs_four_points() {
        assert!(coons(&[pt(0, 0), pt(1, 1), pt(2, 2)]).is_empty());
    }
}
