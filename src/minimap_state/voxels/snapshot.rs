//! # Scan Snapshot Module
//!
//! This module provides the dense voxel grid a terrain scan fills in and the
//! immutable snapshot wrapper that gets published to the renderer.

use cgmath::Point3;

use super::ScannedVoxel;

/// A dense 3D grid of scanned voxels with an explicit empty state per cell.
///
/// Cells are stored in one flat `Vec` indexed x-fastest, so bounds and
/// emptiness are checked uniformly on every access. An empty cell means the
/// scan either excluded the position (deep air) or never sampled it.
#[derive(Debug)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<Option<ScannedVoxel>>,
}

impl VoxelGrid {
    /// Creates a grid of the given dimensions with every cell empty.
    ///
    /// # Arguments
    /// * `width` - Extent along x
    /// * `height` - Extent along y
    /// * `depth` - Extent along z
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        VoxelGrid {
            width,
            height,
            depth,
            cells: vec![None; width * height * depth],
        }
    }

    /// Extent along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Extent along z.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x < self.width && y < self.height && z < self.depth {
            Some(x + self.width * (y + self.height * z))
        } else {
            None
        }
    }

    /// Returns the voxel at the given cell, if the cell is in range and filled.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&ScannedVoxel> {
        self.index(x, y, z)
            .and_then(|i| self.cells[i].as_ref())
    }

    /// Fills a cell. Writes to out-of-range cells are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, voxel: ScannedVoxel) {
        if let Some(i) = self.index(x, y, z) {
            self.cells[i] = Some(voxel);
        }
    }

    /// Iterates over the filled cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = &ScannedVoxel> {
        self.cells.iter().filter_map(|cell| cell.as_ref())
    }

    /// Returns the number of filled cells.
    pub fn populated_len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

/// The immutable result of one terrain scan.
///
/// A snapshot is constructed entirely inside the scan task and then swapped
/// whole into the shared scan state; nothing mutates it afterward. The
/// previous snapshot is dropped on publish, never merged.
#[derive(Debug)]
pub struct ScanSnapshot {
    origin: Point3<i32>,
    horizontal_radius: u32,
    vertical_range: u32,
    grid: VoxelGrid,
}

impl ScanSnapshot {
    /// Wraps a filled grid together with the scan parameters that produced it.
    ///
    /// # Arguments
    /// * `origin` - The observer position the scan was centered on
    /// * `horizontal_radius` - The clamped horizontal radius used by the scan
    /// * `vertical_range` - The clamped vertical range used by the scan
    /// * `grid` - The filled voxel grid
    pub fn new(
        origin: Point3<i32>,
        horizontal_radius: u32,
        vertical_range: u32,
        grid: VoxelGrid,
    ) -> Self {
        ScanSnapshot {
            origin,
            horizontal_radius,
            vertical_range,
            grid,
        }
    }

    /// The observer position the scan was centered on.
    pub fn origin(&self) -> Point3<i32> {
        self.origin
    }

    /// The clamped horizontal radius used by the scan.
    pub fn horizontal_radius(&self) -> u32 {
        self.horizontal_radius
    }

    /// The clamped vertical range used by the scan.
    pub fn vertical_range(&self) -> u32 {
        self.vertical_range
    }

    /// The voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The number of voxels the scan retained.
    pub fn voxel_count(&self) -> usize {
        self.grid.populated_len()
    }
}
