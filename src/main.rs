//! # Voxel Minimap Demo Entry Point
//!
//! This is the main entry point for the standalone demo binary. It simply
//! calls into the library's `run()` function, which scans a procedurally
//! generated world and writes the composited minimap to `minimap.png`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! cargo run --release -- my-config.json
//! ```

fn main() {
    voxel_minimap::run();
}
