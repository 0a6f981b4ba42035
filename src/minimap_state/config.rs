//! # Minimap Configuration
//!
//! Runtime-tunable settings for the minimap, deserializable from JSON so a
//! host application can ship them in its config files. Every field has a
//! default, so partial configs (or none at all) are fine.

use serde::{Deserialize, Serialize};

/// Settings controlling scan extents, worker count, and overlay placement.
///
/// Scan extents are requests, not guarantees: the scanner clamps them to its
/// supported range. Defaults favor map fidelity over scan cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    /// Requested horizontal scan radius, in voxels.
    pub horizontal_radius: u32,
    /// Requested vertical scan range, in voxels.
    pub vertical_range: u32,
    /// Gap between the overlay and the screen edges, in pixels.
    pub overlay_padding: u32,
    /// Upper bound on the overlay's edge length, in pixels.
    pub overlay_max_size: u32,
    /// Worker threads for the scan pool.
    pub worker_threads: usize,
    /// Whether the minimap renders at all.
    pub enabled: bool,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        MinimapConfig {
            horizontal_radius: 24,
            vertical_range: 32,
            overlay_padding: 8,
            overlay_max_size: 200,
            worker_threads: 4,
            enabled: true,
        }
    }
}

impl MinimapConfig {
    /// Parses a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Computes where the minimap overlay sits on a screen of the given size.
    ///
    /// The overlay is square, anchored to the bottom-right corner, padded off
    /// both edges, and shrunk when the screen is too small to honor
    /// [`overlay_max_size`](Self::overlay_max_size).
    pub fn overlay_rect(&self, screen_width: u32, screen_height: u32) -> OverlayRect {
        let padded_extent = screen_width
            .min(screen_height)
            .saturating_sub(2 * self.overlay_padding);
        let size = self.overlay_max_size.min(padded_extent);

        OverlayRect {
            x: screen_width.saturating_sub(size + self.overlay_padding),
            y: screen_height.saturating_sub(size + self.overlay_padding),
            size,
        }
    }
}

/// Screen-space placement of the minimap overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OverlayRect {
    /// Left edge, in pixels from the left of the screen.
    pub x: u32,
    /// Top edge, in pixels from the top of the screen.
    pub y: u32,
    /// Edge length of the square overlay, in pixels.
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = MinimapConfig::default();
        assert_eq!(config.horizontal_radius, 24);
        assert_eq!(config.vertical_range, 32);
        assert_eq!(config.overlay_padding, 8);
        assert_eq!(config.overlay_max_size, 200);
        assert_eq!(config.worker_threads, 4);
        assert!(config.enabled);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = MinimapConfig::from_json(r#"{"horizontal_radius": 16, "enabled": false}"#)
            .expect("valid json");
        assert_eq!(config.horizontal_radius, 16);
        assert!(!config.enabled);
        assert_eq!(config.vertical_range, 32);
        assert_eq!(config.worker_threads, 4);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(MinimapConfig::from_json("{not json").is_err());
    }

    #[test]
    fn the_overlay_hugs_the_bottom_right_corner() {
        let config = MinimapConfig::default();
        let rect = config.overlay_rect(800, 600);
        assert_eq!(rect, OverlayRect { x: 592, y: 392, size: 200 });
    }

    #[test]
    fn small_screens_shrink_the_overlay() {
        let config = MinimapConfig::default();
        let rect = config.overlay_rect(100, 40);
        assert_eq!(rect.size, 24, "40 - 2 * 8 leaves 24 pixels");
        assert_eq!(rect.x, 100 - 24 - 8);
        assert_eq!(rect.y, 40 - 24 - 8);

        let tiny = config.overlay_rect(10, 10);
        assert_eq!(tiny.size, 0, "no room inside the padding");
    }
}
