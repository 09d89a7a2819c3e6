use super::Color;
use crate::error::{Error, Result};

// ============================================================================
// Utility Functions
// ============================================================================

const BYTES_PER_PIXEL: usize = 4;

/// Write a BGRA pixel to slice (ARGB8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], color: Color) {
    dest.copy_from_slice(&color.to_bgra());
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// BGRA8888 pixel buffer for software rendering
/// This is the canvas every primitive rasterizes into; writes overwrite, never blend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer filled with transparent black
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    /// Create a buffer from tightly packed RGBA bytes (decoded image data)
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if rgba.len() != expected {
            return Err(Error::ImageSize {
                expected,
                actual: rgba.len(),
            });
        }
        let mut pixels = Vec::with_capacity(expected);
        for px in rgba.chunks_exact(BYTES_PER_PIXEL) {
            pixels.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * BYTES_PER_PIXEL
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Color) {
        let bgra = color.to_bgra();
        for chunk in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&bgra);
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + BYTES_PER_PIXEL], color);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            let px = &self.pixels[idx..idx + BYTES_PER_PIXEL];
            Some(Color::from_bgra([px[0], px[1], px[2], px[3]]))
        } else {
            None
        }
    }

    /// Number of pixels holding exactly `color`
    pub fn count_color(&self, color: Color) -> usize {
        let bgra = color.to_bgra();
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| *px == bgra)
            .count()
    }

    /// Raw BGRA bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Tightly packed RGBA copy for image encoders
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(BYTES_PER_PIXEL) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_layout_is_bgra_row_major() {
        let mut buf = PixelBuffer::with_size(3, 2);
        buf.set_pixel(2, 1, Color::rgba(10, 20, 30, 40));
        let idx = buf.stride() + 2 * 4;
        assert_eq!(&buf.as_bytes()[idx..idx + 4], &[30, 20, 10, 40]);
        assert_eq!(buf.get_pixel(2, 1), Some(Color::rgba(10, 20, 30, 40)));
    }

    #[test]
    fn test_out_of_bounds_writes_are_dropped() {
        let mut buf = PixelBuffer::with_size(4, 4);
        buf.clear(Color::WHITE);
        buf.set_pixel(-1, 0, Color::RED);
        buf.set_pixel(4, 0, Color::RED);
        buf.set_pixel(0, 4, Color::RED);
        assert_eq!(buf.count_color(Color::RED), 0);
        assert_eq!(buf.count_color(Color::WHITE), 16);
        assert_eq!(buf.get_pixel(4, 0), None);
    }

    #[test]
    fn test_rgba_round_trip() {
        let rgba = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let buf = PixelBuffer::from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(buf.get_pixel(1, 0), Some(Color::rgba(5, 6, 7, 8)));
        assert_eq!(buf.to_rgba(), rgba);
    }

    #[test]
    fn test_from_rgba_rejects_wrong_length() {
        let err = PixelBuffer::from_rgba(2, 2, &[0; 12]).unwrap_err();
        assert_eq!(
            err,
            Error::ImageSize {
                expected: 16,
                actual: 12
            }
        );
    }
}
