use super::Rasterizer;
use crate::display::Color;
use crate::geometry::Point;

/// Round half up in 64-bit, for radii that may exceed the clamped pixel range
fn round_wide(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Major-axis offset of the circle pixel at minor offset `a`
fn octant_offset(radius: i64, a: i64) -> i64 {
    let (r, a) = (radius as f64, a as f64);
    round_wide((r * r - a * a).sqrt())
}

impl Rasterizer<'_> {
    /// Outline of the circle centered at `center` passing through `rim`
    ///
    /// Only octant steps whose minor offset lands on a viewport row or
    /// column are visited, so the cost is bounded by the viewport size
    /// rather than the radius.
    pub fn draw_circle(&mut self, center: Point, rim: Point, color: Color) {
        let radius = round_wide(center.distance_to(&rim));
        if radius == 0 {
            self.plot(center, color);
            return;
        }

        let vp = self.viewport;
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        let (min_x, max_x) = (i64::from(vp.min_x), i64::from(vp.max_x));
        let (min_y, max_y) = (i64::from(vp.min_y), i64::from(vp.max_y));
        let misses_x = cx + radius < min_x || cx - radius > max_x;
        let misses_y = cy + radius < min_y || cy - radius > max_y;
        if misses_x || misses_y {
            return;
        }

        // Minor offsets that put a pixel on a visible column or row
        let ranges = [
            (min_x - cx, max_x - cx),
            (cx - max_x, cx - min_x),
            (min_y - cy, max_y - cy),
            (cy - max_y, cy - min_y),
        ];
        for (lo, hi) in ranges {
            for a in lo.max(0)..=hi.min(radius) {
                let b = octant_offset(radius, a);
                if b < a {
                    break;
                }
                let octants = [
                    (b, a),
                    (a, b),
                    (-a, b),
                    (-b, a),
                    (-b, -a),
                    (-a, -b),
                    (a, -b),
                    (b, -a),
                ];
                for (dx, dy) in octants {
                    if let (Ok(x), Ok(y)) = (i32::try_from(cx + dx), i32::try_from(cy + dy)) {
                        self.plot(Point::new(x, y), color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Viewport, DEFAULT_MARGIN};
    use crate::display::PixelBuffer;

    #[test]
    fn test_circle_pixels_lie_on_radius() {
        let mut buf = PixelBuffer::with_size(200, 200);
        buf.clear(Color::WHITE);
        let vp = Viewport::new(200, 200, DEFAULT_MARGIN);
        let mut ras = Rasterizer::new(&mut buf, vp);
        ras.draw_circle(Point::new(100, 100), Point::new(130, 140), Color::RED);

        let mut count = 0;
        for y in 0..200 {
            for x in 0..200 {
                if buf.get_pixel(x, y) == Some(Color::RED) {
                    let d = Point::new(x, y).distance_to(&Point::new(100, 100));
                    assert!((d - 50.0).abs() < 1.0, "({}, {}) at distance {}", x, y, d);
                    count += 1;
                }
            }
        }
        assert!(count > 250);
        assert_eq!(buf.get_pixel(150, 100), Some(Color::RED));
        assert_eq!(buf.get_pixel(100, 50), Some(Color::RED));
    }

    #[test]
    fn test_circle_is_cut_by_viewport() {
        let mut buf = PixelBuffer::with_size(100, 100);
        let vp = Viewport::new(100, 100, DEFAULT_MARGIN);
        let mut ras = Rasterizer::new(&mut buf, vp);
        ras.draw_circle(Point::new(20, 50), Point::new(50, 50), Color::RED);
        assert_eq!(buf.get_pixel(50, 50), Some(Color::RED));
        assert_eq!(buf.get_pixel(-10, 50), None);
        for y in 0..100 {
            for x in 0..DEFAULT_MARGIN as i32 {
                assert_ne!(buf.get_pixel(x, y), Some(Color::RED));
            }
        }
    }

    #[test]
    fn test_circle_matches_midpoint_octant() {
        let mut buf = PixelBuffer::with_size(100, 100);
        let vp = Viewport::new(100, 100, DEFAULT_MARGIN);
        let mut ras = Rasterizer::new(&mut buf, vp);
        ras.draw_circle(Point::new(50, 50), Point::new(60, 50), Color::RED);
        // r = 10: offsets (10,0) (10,1) (10,2) (10,3) (9,4) (9,5) (8,6) (7,7)
        for (dx, dy) in [(10, 0), (10, 3), (9, 4), (8, 6), (7, 7), (0, 10), (-6, -8)] {
            assert_eq!(buf.get_pixel(50 + dx, 50 + dy), Some(Color::RED), "({}, {})", dx, dy);
        }
        assert_eq!(buf.count_color(Color::RED), 8 * 8 - 8);
    }

    #[test]
    fn test_huge_circle_draws_only_its_visible_arc() {
        let mut buf = PixelBuffer::with_size(200, 200);
        let vp = Viewport::new(200, 200, DEFAULT_MARGIN);
        let center = Point::new(100, 100 + 50_000_000);
        let rim = Point::new(100, 100);
        Rasterizer::new(&mut buf, vp).draw_circle(center, rim, Color::RED);

        // The top of the circle crosses the viewport as a nearly flat arc
        assert_eq!(buf.get_pixel(100, 100), Some(Color::RED));
        assert_eq!(buf.get_pixel(10, 100), Some(Color::RED));
        assert_eq!(buf.get_pixel(189, 100), Some(Color::RED));
        assert_eq!(buf.count_color(Color::RED), 180);

        // Fully outside: nothing
        let mut buf = PixelBuffer::with_size(200, 200);
        let far = Point::new(-5_000_000, -5_000_000);
        let rim = Point::new(-4_999_000, -5_000_000);
        Rasterizer::new(&mut buf, vp).draw_circle(far, rim, Color::RED);
        assert_eq!(buf.count_color(Color::RED), 0);
    }
}
