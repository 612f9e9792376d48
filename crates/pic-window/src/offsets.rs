//! Domain offset kept by interpolators and projectors.

use crate::collab::OffsetCache;

/// First global cell index of the local domain, as cached by an
/// interpolation or projection operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainOffsets {
    label: &'static str,
    start_index: i64,
}

impl DomainOffsets {
    pub fn new(label: &'static str, start_index: i64) -> Self {
        Self { label, start_index }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    /// Local index of a global cell.
    pub fn local_index(&self, global: i64) -> i64 {
        global - self.start_index
    }
}

impl OffsetCache for DomainOffsets {
    fn shift_window(&mut self, clrw: usize) {
        self.start_index += clrw as i64;
    }

    fn set_window_limits(&mut self, starting_global_index: i64) {
        self.start_index = starting_global_index;
    }
}
