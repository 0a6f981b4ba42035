//! # Scanline Rasterizer
//!
//! Software-fills projected faces into the pixel buffer using the painter's
//! algorithm. Faces are sorted by material priority first and depth second,
//! so a high-priority material (a river under a bridge, say) stays visible on
//! the map even when geometry sits closer to the camera.

use crate::minimap_state::classification::color::Rgba;

use super::face_builder::ProjectedFace;
use super::pixel_buffer::PixelBuffer;

/// Composites faces into the buffer, back to front.
///
/// The sort is stable: within a priority band, farther faces paint first and
/// nearer faces overwrite them. Across bands, higher priority paints later
/// and therefore wins regardless of depth.
pub fn composite(mut faces: Vec<ProjectedFace>, buffer: &mut PixelBuffer) {
    faces.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.average_depth.total_cmp(&a.average_depth))
    });

    for face in &faces {
        fill_face(face, buffer);
    }
}

/// Scanline-fills one quad.
///
/// Each buffer row inside the quad's vertical span is sampled at the pixel
/// center. Edges crossing the sample line contribute an x intercept, and
/// pixels between successive intercept pairs are filled. Degenerate quads
/// (collapsed to an edge or a point) cross no sample line and paint nothing.
fn fill_face(face: &ProjectedFace, buffer: &mut PixelBuffer) {
    let min_y = face.screen_ys.iter().copied().fold(f32::INFINITY, f32::min);
    let max_y = face
        .screen_ys
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);

    let first_row = min_y.floor().max(0.0) as u32;
    let last_row = max_y.ceil().min(buffer.height() as f32) as u32;

    let mut intercepts: Vec<f32> = Vec::with_capacity(4);
    for row in first_row..last_row {
        let sample_y = row as f32 + 0.5;

        intercepts.clear();
        for i in 0..4 {
            let j = (i + 1) % 4;
            let (y_i, y_j) = (face.screen_ys[i], face.screen_ys[j]);
            if (y_i <= sample_y) != (y_j <= sample_y) {
                let t = (sample_y - y_i) / (y_j - y_i);
                intercepts.push(face.screen_xs[i] + t * (face.screen_xs[j] - face.screen_xs[i]));
            }
        }

        intercepts.sort_by(|a, b| a.total_cmp(b));
        for pair in intercepts.chunks_exact(2) {
            fill_span(buffer, row, pair[0], pair[1], face.color);
        }
    }
}

/// Fills the pixels of one row between two x intercepts, inclusive.
fn fill_span(buffer: &mut PixelBuffer, row: u32, x_start: f32, x_end: f32, color: Rgba) {
    let start = (x_start.round() as i32).max(0);
    let end = (x_end.round() as i32).min(buffer.width() as i32 - 1);

    for x in start..=end {
        blend_pixel(buffer, x as u32, row, color);
    }
}

/// Writes a pixel if the incoming color is allowed to replace what is there.
///
/// Empty pixels always accept paint; occupied pixels only yield to paint of
/// equal or higher alpha, so translucent faces never punch holes into opaque
/// ones that were painted earlier.
fn blend_pixel(buffer: &mut PixelBuffer, x: u32, y: u32, color: Rgba) {
    if let Some(existing) = buffer.get(x, y) {
        if existing.a == 0 || color.a >= existing.a {
            buffer.put(x, y, color);
        }
    }
}
