//! Scan conversion into a [`PixelBuffer`]
//!
//! Every write goes through the viewport: lines are clipped with
//! [`Viewport::clip_line`] before stepping, single pixels are dropped when
//! they fall outside, so the buffer is only touched inside the inset rectangle.

mod circle;
mod fill;
pub mod line;

use crate::clip::Viewport;
use crate::display::{Color, PixelBuffer};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line scan-conversion algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    /// Floating point digital differential analyzer
    #[default]
    Dda,
    /// Integer midpoint algorithm
    Bresenham,
}

impl LineAlgorithm {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dda => Self::Bresenham,
            Self::Bresenham => Self::Dda,
        }
    }
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dda => write!(f, "dda"),
            Self::Bresenham => write!(f, "bresenham"),
        }
    }
}

impl FromStr for LineAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dda" | "0" => Ok(Self::Dda),
            "bresenham" | "midpoint" | "1" => Ok(Self::Bresenham),
            other => Err(format!("unknown line algorithm '{}'", other)),
        }
    }
}

/// Drawing configuration passed explicitly into every rasterizer call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub algorithm: LineAlgorithm,
}

impl Style {
    pub const fn new(color: Color, algorithm: LineAlgorithm) -> Self {
        Self { color, algorithm }
    }
}

/// Borrowed view of a buffer plus the viewport every write is clipped to
pub struct Rasterizer<'a> {
    buffer: &'a mut PixelBuffer,
    viewport: Viewport,
}

impl<'a> Rasterizer<'a> {
    pub fn new(buffer: &'a mut PixelBuffer, viewport: Viewport) -> Self {
        Self { buffer, viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Plot one pixel if it lies inside the viewport
    #[inline]
    pub fn plot(&mut self, p: Point, color: Color) {
        if self.viewport.contains(p) {
            self.buffer.set_pixel(p.x, p.y, color);
        }
    }

    /// Draw a segment with the style's algorithm
    ///
    /// Zero-length segments and segments with both ends outside the
    /// viewport draw nothing; a segment with one end outside is clipped first.
    pub fn draw_line(&mut self, start: Point, end: Point, style: Style) {
        if start == end {
            return;
        }
        let seg = self.viewport.clip_line(start, end);
        if seg.is_degenerate() {
            return;
        }

        let buffer = &mut *self.buffer;
        let color = style.color;
        let plot = |x: i32, y: i32| buffer.set_pixel(x, y, color);
        match style.algorithm {
            LineAlgorithm::Dda => line::dda(seg.start, seg.end, plot),
            LineAlgorithm::Bresenham => line::bresenham(seg.start, seg.end, plot),
        }
    }

    /// Draw consecutive segments through `points`
    pub fn draw_polyline(&mut self, points: &[Point], style: Style) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], style);
        }
    }

    /// Horizontal fill span from the smaller x up to, not including, the
    /// larger one; always scan-converted with DDA
    fn draw_span(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        match right - left {
            0 => {},
            1 => self.plot(Point::new(left, y), color),
            _ => self.draw_line(
                Point::new(left, y),
                Point::new(right - 1, y),
                Style::new(color, LineAlgorithm::Dda),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::DEFAULT_MARGIN;

    #[test]
    fn test_algorithm_parse_and_toggle() {
        assert_eq!("DDA".parse::<LineAlgorithm>(), Ok(LineAlgorithm::Dda));
        assert_eq!("bresenham".parse::<LineAlgorithm>(), Ok(LineAlgorithm::Bresenham));
        assert!("wu".parse::<LineAlgorithm>().is_err());
        assert_eq!(LineAlgorithm::Dda.toggled(), LineAlgorithm::Bresenham);
    }

    #[test]
    fn test_draw_line_respects_viewport() {
        let mut buf = PixelBuffer::with_size(100, 100);
        buf.clear(Color::WHITE);
        let vp = Viewport::new(100, 100, DEFAULT_MARGIN);
        let mut ras = Rasterizer::new(&mut buf, vp);
        let style = Style::new(Color::RED, LineAlgorithm::Bresenham);
        ras.draw_line(Point::new(50, 50), Point::new(150, 50), style);
        // Clipped at x = 89
        assert_eq!(buf.count_color(Color::RED), 40);
        assert_eq!(buf.get_pixel(89, 50), Some(Color::RED));
        assert_eq!(buf.get_pixel(90, 50), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_line_degenerate_cases_draw_nothing() {
        let mut buf = PixelBuffer::with_size(100, 100);
        let vp = Viewport::new(100, 100, DEFAULT_MARGIN);
        let mut ras = Rasterizer::new(&mut buf, vp);
        let style = Style::new(Color::RED, LineAlgorithm::Dda);
        ras.draw_line(Point::new(40, 40), Point::new(40, 40), style);
        ras.draw_line(Point::new(0, 50), Point::new(99, 50), style);
        ras.plot(Point::new(5, 5), Color::RED);
        assert_eq!(buf.count_color(Color::RED), 0);
    }
}
