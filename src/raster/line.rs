//! DDA and Bresenham line stepping
//!
//! Both walk from the start pixel through the end pixel inclusive, one pixel
//! per step along the major axis. A line is x-major when `-1 < m < 1`
//! (vertical lines count as `m = +inf`), otherwise y-major; the endpoints are
//! swapped so the major coordinate always increases.

use crate::geometry::{round_px, Point};

/// Slope and major axis of a segment, with endpoints ordered along that axis
fn classify(start: Point, end: Point) -> (bool, f64, Point, Point) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let m = if dx == 0 {
        f64::INFINITY
    } else {
        f64::from(dy) / f64::from(dx)
    };

    let x_major = -1.0 < m && m < 1.0;
    let (s, e) = if x_major {
        if start.x <= end.x { (start, end) } else { (end, start) }
    } else if start.y <= end.y {
        (start, end)
    } else {
        (end, start)
    };
    (x_major, m, s, e)
}

/// Digital differential analyzer
pub fn dda(start: Point, end: Point, mut plot: impl FnMut(i32, i32)) {
    let (x_major, m, s, e) = classify(start, end);
    plot(s.x, s.y);

    if x_major {
        let mut y = f64::from(s.y);
        for x in s.x + 1..=e.x {
            y += m;
            plot(x, round_px(y));
        }
    } else {
        // 1 / inf == 0 for vertical lines
        let w = 1.0 / m;
        let mut x = f64::from(s.x);
        for y in s.y + 1..=e.y {
            x += w;
            plot(round_px(x), y);
        }
    }
}

/// Integer midpoint (Bresenham) algorithm
pub fn bresenham(start: Point, end: Point, mut plot: impl FnMut(i32, i32)) {
    let (x_major, _, s, e) = classify(start, end);
    let (mut x, mut y) = (s.x, s.y);
    plot(x, y);

    if x_major {
        let dx = e.x - s.x;
        let dy = e.y - s.y;
        let k1 = 2 * dy;
        if dy >= 0 {
            let k2 = k1 - 2 * dx;
            let mut p = k1 - dx;
            while x < e.x {
                x += 1;
                if p > 0 {
                    y += 1;
                    p += k2;
                } else {
                    p += k1;
                }
                plot(x, y);
            }
        } else {
            let k2 = k1 + 2 * dx;
            let mut p = k1 + dx;
            while x < e.x {
                x += 1;
                if p < 0 {
                    y -= 1;
                    p += k2;
                } else {
                    p += k1;
                }
                plot(x, y);
            }
        }
    } else {
        let dx = e.x - s.x;
        let dy = e.y - s.y;
        let k1 = 2 * dx;
        if dx >= 0 {
            let k2 = k1 - 2 * dy;
            let mut p = k1 - dy;
            while y < e.y {
                y += 1;
                if p > 0 {
                    x += 1;
                    p += k2;
                } else {
                    p += k1;
                }
                plot(x, y);
            }
        } else {
            let k2 = k1 + 2 * dy;
            let mut p = k1 + dy;
            while y < e.y {
                y += 1;
                if p < 0 {
                    x -= 1;
                    p += k2;
                } else {
                    p += k1;
                }
                plot(x, y);
            }
        }
    }
}
