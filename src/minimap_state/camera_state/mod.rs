//! # Camera State Management
//!
//! This module owns the minimap's orbit camera and the dirty flag that links
//! camera movement to the renderer's cache. The camera is one of the two
//! invalidation sources for the composited image (the other is a freshly
//! published scan snapshot), so any yaw change that rebuilds the matrix must
//! be observable by the frame loop.

use orbit_camera::OrbitCamera;

pub mod orbit_camera;

/// Pixel dimensions of the target the minimap is rendered into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewportSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ViewportSize {
    /// Creates a viewport size from a width and height.
    pub fn new(width: u32, height: u32) -> Self {
        ViewportSize { width, height }
    }

    /// Creates a square viewport, the common case for a HUD minimap.
    pub fn square(size: u32) -> Self {
        ViewportSize {
            width: size,
            height: size,
        }
    }
}

/// Owns the orbit camera and records whether it has moved since the renderer
/// last looked.
///
/// # Fields
/// - `camera`: The smoothed orbit camera
/// - `dirty`: Set when an update rebuilt the view-projection matrix; cleared
///   when the frame loop consumes it via [`CameraState::take_dirty`]
pub struct CameraState {
    camera: OrbitCamera,
    dirty: bool,
}

impl CameraState {
    /// Creates the camera state with the camera at yaw 0 and no pending
    /// invalidation.
    pub fn new() -> Self {
        CameraState {
            camera: OrbitCamera::new(),
            dirty: false,
        }
    }

    /// Feeds the observer's facing yaw to the camera, once per frame.
    ///
    /// If the camera moved, the dirty flag latches until taken so an
    /// invalidation is never lost between frames.
    ///
    /// # Arguments
    /// * `observer_yaw` - The observer's facing yaw in degrees
    pub fn update(&mut self, observer_yaw: f32) {
        if self.camera.update(observer_yaw) {
            self.dirty = true;
        }
    }

    /// Returns and clears the pending invalidation.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The orbit camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
}
