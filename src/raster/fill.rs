//! Scanline polygon fill with an active edge table

use super::Rasterizer;
use crate::display::Color;
use crate::error::{Error, Result};
use crate::geometry::{round_px, Point};
use std::ops::Range;

/// One non-horizontal polygon side, oriented top to bottom
#[derive(Debug, Clone, Copy)]
struct Edge {
    /// Current x at the scanline being filled
    x: f64,
    /// x increment per scanline
    w: f64,
    /// Scanlines remaining after the current one
    dy: i32,
}

impl Edge {
    /// Build the edge for side `a`-`b`, or `None` if it is horizontal.
    ///
    /// The last scanline of each edge (largest y) is excluded, and the
    /// increment is taken over the shortened height so the edge reaches
    /// `end.x` on its final row. A one-row edge never steps.
    fn from_side(a: Point, b: Point) -> Option<(i32, Self)> {
        if a.y == b.y {
            return None;
        }
        let (start, end) = if a.y < b.y { (a, b) } else { (b, a) };
        let dy = end.y - 1 - start.y;
        let w = if dy == 0 {
            0.0
        } else {
            f64::from(end.x - start.x) / f64::from(dy)
        };
        Some((
            start.y,
            Self {
                x: f64::from(start.x),
                w,
                dy,
            },
        ))
    }
}

impl Rasterizer<'_> {
    /// Fill a closed ring (last point repeats the first)
    ///
    /// Rings with fewer than three distinct vertices fill nothing, a triangle
    /// takes the flat-top/flat-bottom fast path. Spans cover the left edge
    /// and stop one pixel short of the right edge. An odd number of active
    /// edges on any scanline aborts the fill with [`Error::OddActiveEdges`];
    /// rows already drawn stay drawn.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if points.len() < 4 {
            return Ok(());
        }
        if points.len() == 4 {
            self.fill_triangle([points[0], points[1], points[2]], color);
            return Ok(());
        }

        let edges: Vec<(i32, Edge)> = points
            .windows(2)
            .filter_map(|side| Edge::from_side(side[0], side[1]))
            .collect();
        let Some(y_min) = edges.iter().map(|(y, _)| *y).min() else {
            return Ok(());
        };
        let y_max = edges.iter().map(|(y, _)| *y).max().unwrap_or(y_min);

        let mut table: Vec<Vec<Edge>> = vec![Vec::new(); (y_max - y_min + 1) as usize];
        for (start_y, edge) in edges {
            table[(start_y - y_min) as usize].push(edge);
        }

        let mut active: Vec<Edge> = Vec::new();
        let mut y = y_min;
        loop {
            if let Some(bucket) = table.get_mut((y - y_min) as usize) {
                active.append(bucket);
            }
            if active.is_empty() {
                if y >= y_max {
                    break;
                }
                y += 1;
                continue;
            }

            if active.len() % 2 != 0 {
                tracing::error!(
                    scanline = y,
                    count = active.len(),
                    "odd active edge count, aborting fill"
                );
                return Err(Error::OddActiveEdges {
                    scanline: y,
                    count: active.len(),
                });
            }

            active.sort_by(|a, b| a.x.total_cmp(&b.x));
            for pair in active.chunks_exact(2) {
                self.draw_span(round_px(pair[0].x), round_px(pair[1].x), y, color);
            }

            active.retain_mut(|edge| {
                edge.x += edge.w;
                edge.dy -= 1;
                edge.dy >= 0
            });
            y += 1;
        }

        Ok(())
    }

    /// Fill a triangle by splitting it into flat-top and flat-bottom halves
    ///
    /// Each half covers the scanlines from its top row down to, but not
    /// including, its bottom row.
    pub fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) {
        let mut v = vertices;
        v.sort_by_key(|p| (p.y, p.x));
        let [v0, v1, v2] = v;

        if v0.y == v1.y {
            self.fill_flat_top(v0, v1, v2, color);
        } else if v1.y == v2.y {
            self.fill_flat_bottom(v0, v1, v2, color);
        } else {
            let t = f64::from(v1.y - v0.y) / f64::from(v2.y - v0.y);
            let split = Point::new(v0.x + round_px(t * f64::from(v2.x - v0.x)), v1.y);
            self.fill_triangle([v0, v1, split], color);
            self.fill_triangle([v1, split, v2], color);
        }
    }

    /// Apex `top`, base `left`-`right` on one scanline below it
    fn fill_flat_bottom(&mut self, top: Point, left: Point, right: Point, color: Color) {
        let w1 = f64::from(left.x - top.x) / f64::from(left.y - top.y);
        let w2 = f64::from(right.x - top.x) / f64::from(right.y - top.y);
        let x = f64::from(top.x);
        self.sweep((x, w1), (x, w2), top.y..left.y, color);
    }

    /// Base `left`-`right` on one scanline, apex `bottom` below it
    fn fill_flat_top(&mut self, left: Point, right: Point, bottom: Point, color: Color) {
        if bottom.y == left.y {
            return;
        }
        let w1 = f64::from(bottom.x - left.x) / f64::from(bottom.y - left.y);
        let w2 = f64::from(bottom.x - right.x) / f64::from(bottom.y - right.y);
        let rows = left.y..bottom.y;
        self.sweep((f64::from(left.x), w1), (f64::from(right.x), w2), rows, color);
    }

    fn sweep(
        &mut self,
        (mut x1, w1): (f64, f64),
        (mut x2, w2): (f64, f64),
        rows: Range<i32>,
        color: Color,
    ) {
        for y in rows {
            self.draw_span(round_px(x1), round_px(x2), y, color);
            x1 += w1;
            x2 += w2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Viewport, DEFAULT_MARGIN};
    use crate::display::PixelBuffer;

    fn canvas() -> PixelBuffer {
        let mut buf = PixelBuffer::with_size(500, 500);
        buf.clear(Color::WHITE);
        buf
    }

    fn fill(buf: &mut PixelBuffer, points: &[Point]) -> Result<()> {
        let vp = Viewport::new(buf.width(), buf.height(), DEFAULT_MARGIN);
        Rasterizer::new(buf, vp).fill_polygon(points, Color::GREEN)
    }

    fn ring(coords: &[(i32, i32)]) -> Vec<Point> {
        let mut points: Vec<Point> = coords.iter().map(|&c| Point::from(c)).collect();
        points.push(points[0]);
        points
    }

    fn row(buf: &PixelBuffer, y: i32) -> Vec<i32> {
        (0..buf.width() as i32)
            .filter(|&x| buf.get_pixel(x, y) == Some(Color::GREEN))
            .collect()
    }

    #[test]
    fn test_rectangle_fill_pixel_count() {
        let mut buf = canvas();
        fill(&mut buf, &ring(&[(10, 10), (100, 10), (100, 100), (10, 100)])).unwrap();
        // Bottom scanline and right column belong to no span
        assert_eq!(buf.count_color(Color::GREEN), 90 * 90);
        assert!(row(&buf, 100).is_empty());
        let top = row(&buf, 10);
        assert_eq!((top.first(), top.last(), top.len()), (Some(&10), Some(&99), 90));
        assert!((0..500).all(|y| buf.get_pixel(100, y) != Some(Color::GREEN)));
    }

    #[test]
    fn test_slanted_edge_reaches_its_end_x_on_last_row() {
        let mut buf = canvas();
        // Right side (50,10)-(80,40) steps 30 columns over 29 rows
        fill(&mut buf, &ring(&[(10, 10), (50, 10), (80, 40), (10, 40)])).unwrap();
        assert_eq!(row(&buf, 10).last(), Some(&49));
        assert_eq!(row(&buf, 24).last(), Some(&63));
        assert_eq!(row(&buf, 39).last(), Some(&79));
        assert!(row(&buf, 40).is_empty());
    }

    #[test]
    fn test_one_row_edges_do_not_step() {
        let mut buf = canvas();
        // Both slanted sides span a single scanline
        fill(&mut buf, &ring(&[(20, 50), (60, 50), (90, 51), (10, 51)])).unwrap();
        let only = row(&buf, 50);
        assert_eq!((only.first(), only.last()), (Some(&20), Some(&59)));
        assert_eq!(buf.count_color(Color::GREEN), 40);
    }

    #[test]
    fn test_flat_bottom_triangle_fills_between_edges() {
        let mut buf = canvas();
        fill(&mut buf, &ring(&[(50, 20), (30, 60), (70, 60)])).unwrap();

        // Zero width at the apex, base row excluded
        assert!(row(&buf, 20).is_empty());
        assert!(row(&buf, 60).is_empty());

        let mid = row(&buf, 40);
        assert_eq!(mid.first(), Some(&40));
        assert_eq!(mid.last(), Some(&59));
        assert_eq!(mid.len(), 20);

        for y in 21..60 {
            let pixels = row(&buf, y);
            let half = f64::from(y - 20) * 0.5;
            let left = round_px(50.0 - half);
            let right = round_px(50.0 + half);
            let inside = pixels.iter().all(|&x| x >= left && x < right);
            assert!(inside, "row {} leaks: {:?}", y, pixels);
            assert!(pixels.windows(2).all(|w| w[1] == w[0] + 1), "row {} has holes", y);
        }
    }

    #[test]
    fn test_general_triangle_is_split_at_middle_vertex() {
        let mut buf = canvas();
        fill(&mut buf, &ring(&[(100, 40), (40, 100), (160, 160)])).unwrap();
        // Rows on both sides of the split are filled, the split row once
        assert!(!row(&buf, 70).is_empty());
        assert!(!row(&buf, 100).is_empty());
        assert!(!row(&buf, 130).is_empty());
        assert!(row(&buf, 160).is_empty());
        let split = row(&buf, 100);
        assert_eq!(split.first(), Some(&40));
        assert_eq!(split.last(), Some(&129));
    }

    #[test]
    fn test_fill_area_tracks_shoelace_and_scales_quadratically() {
        let quad = [(20, 20), (80, 30), (70, 90), (30, 70)];
        let doubled: Vec<(i32, i32)> = quad.iter().map(|&(x, y)| (x * 2, y * 2)).collect();

        let mut small = canvas();
        fill(&mut small, &ring(&quad)).unwrap();
        let mut large = canvas();
        fill(&mut large, &ring(&doubled)).unwrap();

        let a1 = small.count_color(Color::GREEN) as f64;
        let a2 = large.count_color(Color::GREEN) as f64;
        // shoelace area 2750, perimeter about 217
        assert!((a1 - 2750.0).abs() < 217.0, "area {}", a1);
        let ratio = a2 / a1;
        assert!((3.5..4.5).contains(&ratio), "ratio {}", ratio);
    }

    #[test]
    fn test_open_ring_reports_odd_parity() {
        let mut buf = canvas();
        let points: Vec<Point> = [(10, 10), (100, 10), (100, 100), (10, 100), (50, 50)]
            .iter()
            .map(|&c| Point::from(c))
            .collect();
        let err = fill(&mut buf, &points).unwrap_err();
        assert_eq!(err, Error::OddActiveEdges { scanline: 10, count: 1 });
    }

    #[test]
    fn test_short_rings_fill_nothing() {
        let mut buf = canvas();
        fill(&mut buf, &[]).unwrap();
        fill(&mut buf, &ring(&[(20, 20), (80, 80)])).unwrap();
        assert_eq!(buf.count_color(Color::GREEN), 0);
    }
}
