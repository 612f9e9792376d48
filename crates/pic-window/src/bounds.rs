//! Patch bounds stored as initial placement plus window displacement.

use crate::collab::DomainBounds;

const STREAMING: usize = 0;

/// Bounds of one patch.
///
/// The streaming-axis values are always `initial + moved`, whether `moved`
/// was accumulated step by step or overwritten in one go, so both paths
/// produce the same bits for the same displacement.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchBounds {
    initial_index: i64,
    initial_min: [f64; 3],
    initial_max: [f64; 3],
    moved_cells: i64,
    moved_distance: f64,
}

impl PatchBounds {
    pub fn new(starting_global_index: i64, min: [f64; 3], max: [f64; 3]) -> Self {
        Self {
            initial_index: starting_global_index,
            initial_min: min,
            initial_max: max,
            moved_cells: 0,
            moved_distance: 0.0,
        }
    }

    /// Cells the window has moved this patch by.
    pub fn moved_cells(&self) -> i64 {
        self.moved_cells
    }

    pub fn moved_distance(&self) -> f64 {
        self.moved_distance
    }

    /// Whether `x` lies in `[min, max)` along the streaming axis.
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.local_min(STREAMING) && x < self.local_max(STREAMING)
    }
}

impl DomainBounds for PatchBounds {
    fn starting_global_index(&self) -> i64 {
        self.initial_index + self.moved_cells
    }

    fn local_min(&self, axis: usize) -> f64 {
        if axis == STREAMING {
            self.initial_min[axis] + self.moved_distance
        } else {
            self.initial_min[axis]
        }
    }

    fn local_max(&self, axis: usize) -> f64 {
        if axis == STREAMING {
            self.initial_max[axis] + self.moved_distance
        } else {
            self.initial_max[axis]
        }
    }

    fn advance_starting_global_index(&mut self, cells: usize) {
        self.moved_cells += cells as i64;
    }

    fn advance_local_bounds(&mut self, distance: f64) {
        self.moved_distance += distance;
    }

    fn update_window_limits(&mut self, x_moved: f64, idx_moved: i64) {
        self.moved_distance = x_moved;
        self.moved_cells = idx_moved;
    }
}
