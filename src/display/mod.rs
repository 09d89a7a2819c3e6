mod color;
mod pixel_buffer;
#[cfg(feature = "shell")]
mod window;

pub use color::{hsv_to_rgb, make_palette, Color, ParseColorError};
pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "shell")]
pub use window::{Display, InputEvent, Key, RenderTarget};
