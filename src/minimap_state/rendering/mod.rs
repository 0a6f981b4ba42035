//! # Minimap Rendering
//!
//! This module owns the pixel-space half of the pipeline: projecting a scan
//! snapshot into faces, compositing them with the software rasterizer, and
//! caching the result. The expensive repaint only happens when something
//! upstream (a new snapshot or a camera move) invalidates the cache; every
//! other frame returns the cached pixels untouched.

use log::debug;

use crate::minimap_state::camera_state::orbit_camera::OrbitCamera;
use crate::minimap_state::camera_state::ViewportSize;
use crate::minimap_state::voxels::snapshot::ScanSnapshot;

use face_builder::build_faces;
use pixel_buffer::PixelBuffer;

pub mod face_builder;
pub mod pixel_buffer;
pub mod rasterizer;

/// Renders scan snapshots into a cached pixel buffer.
///
/// # Fields
/// - `buffer`: The composited RGBA pixels, kept between frames
/// - `stale`: Whether the buffer must be repainted before the next read
/// - `rebuild_count`: Number of repaints since creation, for cache diagnostics
pub struct MinimapRenderer {
    buffer: PixelBuffer,
    stale: bool,
    rebuild_count: u64,
}

impl MinimapRenderer {
    /// Creates a renderer with an empty, stale buffer of the given size.
    pub fn new(viewport: ViewportSize) -> Self {
        MinimapRenderer {
            buffer: PixelBuffer::new(viewport.width, viewport.height),
            stale: true,
            rebuild_count: 0,
        }
    }

    /// Marks the cached pixels as out of date.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether the next [`render`](Self::render) call will repaint.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of repaints performed so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// The current pixels, possibly stale.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Returns the composited pixels for the snapshot, repainting only when
    /// the cache is stale or the viewport changed size.
    pub fn render(
        &mut self,
        snapshot: &ScanSnapshot,
        camera: &OrbitCamera,
        viewport: ViewportSize,
    ) -> &PixelBuffer {
        if viewport.width != self.buffer.width() || viewport.height != self.buffer.height() {
            self.buffer = PixelBuffer::new(viewport.width, viewport.height);
            self.stale = true;
        }

        if self.stale {
            self.buffer.clear();
            let faces = build_faces(snapshot, camera, viewport);
            let face_count = faces.len();
            rasterizer::composite(faces, &mut self.buffer);
            self.rebuild_count += 1;
            self.stale = false;
            debug!(
                "Repainted minimap: {} faces into {}x{} pixels",
                face_count, viewport.width, viewport.height
            );
        }

        &self.buffer
    }
}
