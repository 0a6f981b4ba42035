//! # Color Module
//!
//! This module defines the RGBA color type used throughout the minimap pipeline,
//! from material classification through to the composited pixel buffer.

/// An 8-bit-per-channel RGBA color.
///
/// The `#[repr(C)]` layout keeps the channel order fixed at `[r, g, b, a]` so a
/// pixel buffer of these can be reinterpreted as raw bytes with `bytemuck`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, used as the backdrop of a cleared pixel buffer.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Creates a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    ///
    /// This is the packing convention the material table is written in.
    ///
    /// # Arguments
    /// * `packed` - The color as a single `u32` in ARGB channel order
    ///
    /// # Returns
    /// The unpacked `Rgba` color.
    pub const fn from_argb(packed: u32) -> Self {
        Rgba {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
            a: (packed >> 24) as u8,
        }
    }

    /// Scales the RGB channels by `factor`, clamping each to [0, 255].
    ///
    /// The alpha channel is preserved unchanged. Used to apply per-face
    /// directional brightness to a material's base color.
    ///
    /// # Arguments
    /// * `factor` - The brightness multiplier (1.0 leaves the color unchanged)
    ///
    /// # Returns
    /// The brightness-adjusted color.
    pub fn adjust_brightness(self, factor: f32) -> Self {
        Rgba {
            r: (self.r as f32 * factor).clamp(0.0, 255.0) as u8,
            g: (self.g as f32 * factor).clamp(0.0, 255.0) as u8,
            b: (self.b as f32 * factor).clamp(0.0, 255.0) as u8,
            a: self.a,
        }
    }

    /// Returns the Manhattan distance between two colors' RGB channels.
    ///
    /// Alpha is ignored. This is the cheap perceptual difference used by the
    /// face visibility rules to decide whether two adjacent materials contrast
    /// enough to warrant a boundary face.
    pub fn manhattan_distance(self, other: Rgba) -> u32 {
        let dr = (self.r as i32 - other.r as i32).unsigned_abs();
        let dg = (self.g as i32 - other.g as i32).unsigned_abs();
        let db = (self.b as i32 - other.b as i32).unsigned_abs();
        dr + dg + db
    }
}
