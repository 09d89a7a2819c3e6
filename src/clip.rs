//! Clipping against the inset canvas viewport
//!
//! Lines use Cyrus-Beck parametric clipping, polygons use Sutherland-Hodgman.
//! Both clip to the same inclusive rectangle `[margin, size - margin - 1]`,
//! so anything drawn exactly on the canvas edge is excluded.

use crate::geometry::{round_px, Point, Segment};

/// Default inset of the clip viewport from every canvas edge
pub const DEFAULT_MARGIN: u32 = 10;

/// Inclusive clip rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Viewport {
    /// Viewport of a `width` x `height` canvas inset by `margin` on every side
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        let margin = margin as i32;
        Self {
            min_x: margin,
            min_y: margin,
            max_x: width as i32 - margin - 1,
            max_y: height as i32 - margin - 1,
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// True if at least one vertex lies inside
    pub fn contains_any(&self, points: &[Point]) -> bool {
        points.iter().any(|&p| self.contains(p))
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Corners walked so that each edge's `(e.y, -e.x)` normal points inward
    fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.max_x, self.min_y),
        ]
    }

    /// Cyrus-Beck line clipping
    ///
    /// Both endpoints inside: returned unchanged. Both outside: a zero-length
    /// segment, even if the line crosses the viewport. Otherwise the outside
    /// endpoint is moved onto the viewport border.
    pub fn clip_line(&self, start: Point, end: Point) -> Segment {
        let start_inside = self.contains(start);
        let end_inside = self.contains(end);
        if start_inside && end_inside {
            return Segment::new(start, end);
        }
        if !start_inside && !end_inside {
            return Segment::default();
        }

        let d = end - start;
        let corners = self.corners();
        let mut tl = 0.0_f64;
        let mut tu = 1.0_f64;

        for i in 0..4 {
            let edge = corners[(i + 1) % 4] - corners[i];
            let normal = Point::new(edge.y, -edge.x);
            let dn = normal.dot(&d) as f64;
            if dn == 0.0 {
                continue;
            }
            let wn = normal.dot(&(start - corners[i])) as f64;
            let t = -wn / dn;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            if dn > 0.0 {
                tl = tl.max(t);
            } else {
                tu = tu.min(t);
            }
        }

        if tl < tu {
            let (dx, dy) = d.as_f64();
            let at = |t: f64| start + Point::from_f64(dx * t, dy * t);
            Segment::new(at(tl), at(tu))
        } else {
            Segment::default()
        }
    }

    /// Sutherland-Hodgman polygon clipping
    ///
    /// `polygon` is a closed ring (last vertex repeats the first). Returns a
    /// closed ring, or an empty vector when no vertex lies inside.
    pub fn clip_polygon(&self, polygon: &[Point]) -> Vec<Point> {
        if !self.contains_any(polygon) {
            return Vec::new();
        }

        // Left edge first; each rotation brings the next side into the
        // "keep x >= x_min" position.
        let mut corners = [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ];
        let mut result = polygon.to_vec();

        for i in 0..4 {
            result = clip_against_left(&result, corners[i].x);
            if result.is_empty() {
                return result;
            }
            result.iter_mut().for_each(|p| *p = rotate_quarter(*p));
            corners.iter_mut().for_each(|p| *p = rotate_quarter(*p));
        }

        result
    }
}

/// (x, y) -> (y, -x); four applications are the identity
#[inline]
fn rotate_quarter(p: Point) -> Point {
    Point::new(p.y, p.x.saturating_neg())
}

/// One Sutherland-Hodgman pass keeping the half-plane `x >= x_min`
pub fn clip_against_left(polygon: &[Point], x_min: i32) -> Vec<Point> {
    let ring = match polygon {
        [] => return Vec::new(),
        [first, .., last] if first == last => &polygon[..polygon.len() - 1],
        _ => polygon,
    };

    let crossing = |s: Point, p: Point| {
        let (sx, sy) = s.as_f64();
        let (px, py) = p.as_f64();
        let t = (f64::from(x_min) - sx) / (px - sx);
        Point::new(x_min, s.y.saturating_add(round_px((py - sy) * t)))
    };

    let mut result = Vec::with_capacity(ring.len() + 2);
    let mut s = ring[ring.len() - 1];
    for &p in ring {
        match (p.x >= x_min, s.x >= x_min) {
            (true, true) => result.push(p),
            (true, false) => {
                result.push(crossing(s, p));
                result.push(p);
            },
            (false, true) => result.push(crossing(s, p)),
            (false, false) => {},
        }
        s = p;
    }

    if let Some(&first) = result.first() {
        result.push(first);
    }
    result
}
