//! Contracts the moving window drives when it shifts.
//!
//! All of them address the streaming axis (axis 0) only.

/// Local sub-domain bookkeeping of one patch.
pub trait DomainBounds {
    /// Global index of the first local cell along the streaming axis.
    fn starting_global_index(&self) -> i64;

    fn local_min(&self, axis: usize) -> f64;

    fn local_max(&self, axis: usize) -> f64;

    fn advance_starting_global_index(&mut self, cells: usize);

    fn advance_local_bounds(&mut self, distance: f64);

    /// Overwrite the accumulated window displacement with `x_moved`
    /// (distance) and `idx_moved` (cells).
    fn update_window_limits(&mut self, x_moved: f64, idx_moved: i64);
}

/// Particle bookkeeping of one species.
pub trait WindowSpecies {
    /// Cells grouped together when particles are sorted and shifted.
    fn cluster_width(&self) -> usize;

    /// Drop particles that left through the Min face, inject particles in the
    /// newly exposed cells and re-index local buffers. `bounds` already
    /// holds the shifted domain.
    fn shift_window<B: DomainBounds + ?Sized>(&mut self, clrw: usize, bounds: &B);

    /// Re-derive the species' window limits from the total displacement.
    fn set_window_limits(&mut self, x_moved: f64);
}

/// Cached domain offset of an interpolator or projector.
pub trait OffsetCache {
    fn shift_window(&mut self, clrw: usize);

    fn set_window_limits(&mut self, starting_global_index: i64);
}

/// Field state that follows the window.
pub trait WindowFields {
    /// Move field data by `clrw` cells toward the Min face and re-register
    /// the grid origin from `bounds`.
    fn shift_window<B: DomainBounds + ?Sized>(&mut self, clrw: usize, bounds: &B);
}

/// Collective agreement on the shift width of one move.
///
/// Every cooperating worker must shift by the same width in the same step.
pub trait ShiftAgreement {
    /// Width all workers agreed on, given this worker's local width.
    fn agreed_width(&self, local: usize) -> usize;
}

/// Single-worker agreement: the local width is the agreed width.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalAgreement;

impl ShiftAgreement for LocalAgreement {
    fn agreed_width(&self, local: usize) -> usize {
        local
    }
}

/// Width settled beforehand by a driver that gathered every worker's width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgreedWidth(pub usize);

impl ShiftAgreement for AgreedWidth {
    fn agreed_width(&self, _local: usize) -> usize {
        self.0
    }
}
