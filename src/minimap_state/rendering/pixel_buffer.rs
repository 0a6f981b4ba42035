//! # Pixel Buffer
//!
//! The CPU-side RGBA target the minimap is composited into. The buffer is
//! cached between frames and only repainted when a scan or camera change
//! invalidates it, so reads vastly outnumber writes.

use image::RgbaImage;

use crate::minimap_state::classification::color::Rgba;

/// A width x height grid of RGBA pixels, row-major from the top-left.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Creates a buffer filled with fully transparent pixels.
    pub fn new(width: u32, height: u32) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// Reads the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Writes the pixel at `(x, y)`. Writes outside the buffer are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// The raw pixel data as bytes, in RGBA order row by row.
    ///
    /// Suitable for texture upload or image encoding without copying.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copies the buffer into an [`RgbaImage`] for encoding to disk.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.get(x, y).unwrap_or(Rgba::TRANSPARENT);
            image::Rgba([color.r, color.g, color.b, color.a])
        })
    }
}
