//! # Shared Scan State
//!
//! The handoff point between scan workers and the frame thread. Workers
//! publish finished snapshots here; the frame thread polls for readiness and
//! a dirty flag that tells it the cached pixels are out of date.
//!
//! Publishes carry a generation number so that a slow scan finishing after a
//! newer one cannot roll the map backward.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::minimap_state::voxels::snapshot::ScanSnapshot;

/// Fields guarded by the mutex.
#[derive(Default)]
struct Inner {
    snapshot: Option<Arc<ScanSnapshot>>,
    ready: bool,
    map_dirty: bool,
    applied_generation: u64,
}

/// Scan results shared between worker threads and the frame thread.
pub struct SharedScanState {
    inner: Mutex<Inner>,
    next_generation: AtomicU64,
}

impl SharedScanState {
    /// Creates an empty state: no snapshot, not ready, not dirty.
    pub fn new() -> Self {
        SharedScanState {
            inner: Mutex::new(Inner::default()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Reserves the generation number for a scan about to be issued.
    ///
    /// Generations start at 1 and only ever grow, including across
    /// [`reset`](Self::reset).
    pub fn next_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publishes a finished snapshot.
    ///
    /// The snapshot is installed only when `generation` is newer than the
    /// last applied one; a stale publish is dropped whole.
    ///
    /// # Returns
    /// `true` when the snapshot was installed, `false` when it was stale.
    pub fn publish(&self, generation: u64, snapshot: ScanSnapshot) -> bool {
        let mut inner = self.lock();
        if generation <= inner.applied_generation {
            return false;
        }
        inner.snapshot = Some(Arc::new(snapshot));
        inner.ready = true;
        inner.map_dirty = true;
        inner.applied_generation = generation;
        true
    }

    /// Returns the current snapshot, if any scan has completed.
    pub fn current_snapshot(&self) -> Option<Arc<ScanSnapshot>> {
        self.lock().snapshot.clone()
    }

    /// Whether a snapshot is available to render.
    pub fn is_ready(&self) -> bool {
        self.lock().ready
    }

    /// Whether the cached pixels no longer match the current snapshot.
    pub fn is_dirty(&self) -> bool {
        self.lock().map_dirty
    }

    /// Flags the cached pixels as out of date.
    pub fn mark_dirty(&self) {
        self.lock().map_dirty = true;
    }

    /// Acknowledges the dirty flag after a rebuild.
    pub fn clear_dirty(&self) {
        self.lock().map_dirty = false;
    }

    /// Drops the snapshot and returns to the not-ready state.
    ///
    /// The applied generation is kept, so scans already in flight at reset
    /// time can still land (they carry newer generations than anything
    /// published before the reset).
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.snapshot = None;
        inner.ready = false;
        inner.map_dirty = true;
    }

    /// A panicking worker must not wedge the frame thread; recover the data
    /// from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedScanState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::minimap_state::voxels::snapshot::VoxelGrid;

    fn snapshot_with_radius(horizontal_radius: u32) -> ScanSnapshot {
        let size = (2 * horizontal_radius + 1) as usize;
        ScanSnapshot::new(
            Point3::new(0, 0, 0),
            horizontal_radius,
            8,
            VoxelGrid::new(size, 8, size),
        )
    }

    #[test]
    fn publish_makes_the_state_ready_and_dirty() {
        let state = SharedScanState::new();
        assert!(!state.is_ready());
        assert!(!state.is_dirty());
        assert!(state.current_snapshot().is_none());

        let generation = state.next_generation();
        assert!(state.publish(generation, snapshot_with_radius(8)));

        assert!(state.is_ready());
        assert!(state.is_dirty());
        let snapshot = state.current_snapshot().unwrap();
        assert_eq!(snapshot.horizontal_radius(), 8);
    }

    #[test]
    fn stale_publish_is_dropped() {
        let state = SharedScanState::new();
        let old_generation = state.next_generation();
        let new_generation = state.next_generation();

        assert!(state.publish(new_generation, snapshot_with_radius(16)));
        assert!(!state.publish(old_generation, snapshot_with_radius(8)));

        let snapshot = state.current_snapshot().unwrap();
        assert_eq!(snapshot.horizontal_radius(), 16, "newer snapshot survives");
    }

    #[test]
    fn dirty_flag_round_trips() {
        let state = SharedScanState::new();
        state.mark_dirty();
        assert!(state.is_dirty());
        state.clear_dirty();
        assert!(!state.is_dirty());
    }

    #[test]
    fn reset_clears_the_snapshot_but_not_the_generation_floor() {
        let state = SharedScanState::new();
        let first = state.next_generation();
        assert!(state.publish(first, snapshot_with_radius(8)));

        state.reset();
        assert!(!state.is_ready());
        assert!(state.is_dirty(), "reset leaves the cached pixels stale");
        assert!(state.current_snapshot().is_none());

        // A publish predating the reset is still stale afterward.
        assert!(!state.publish(first, snapshot_with_radius(8)));

        let next = state.next_generation();
        assert!(state.publish(next, snapshot_with_radius(12)));
        assert!(state.is_ready());
    }
}
