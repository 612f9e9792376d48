//! Moving-window kinematics and the ordered shift of every collaborator.

use pic_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::collab::{DomainBounds, OffsetCache, ShiftAgreement, WindowFields, WindowSpecies};
use crate::error::{WindowError, WindowResult};

/// Window kinematics as configured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window width in cells; 0 disables the window.
    pub nspace_win_x: usize,
    /// Cell length along the streaming axis.
    pub cell_length: f64,
    pub vx_win: f64,
    pub t_move_win: f64,
}

/// What one `operate` call did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowShift {
    pub clrw: usize,
    pub distance: f64,
    pub moved_distance: f64,
    pub starting_global_index: i64,
    /// False when no species were present and the offset caches were left
    /// untouched.
    pub offsets_shifted: bool,
}

/// Moving-window state of one worker.
///
/// Everything but `moved_distance` is fixed at construction; the whole
/// state can be rebuilt from the configuration and `moved_distance`.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingWindow {
    width: usize,
    cell_length: f64,
    velocity: f64,
    start_time: f64,
    moved_distance: f64,
}

impl MovingWindow {
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let cell_length = ensure_positive(config.cell_length, "window cell_length")?;
        let velocity = ensure_finite(config.vx_win, "vx_win")?;
        let start_time = ensure_finite(config.t_move_win, "t_move_win")?;
        Ok(Self {
            width: config.nspace_win_x,
            cell_length,
            velocity,
            start_time,
            moved_distance: 0.0,
        })
    }

    /// A window that never moves.
    pub fn disabled(cell_length: f64) -> WindowResult<Self> {
        Self::new(&WindowConfig {
            nspace_win_x: 0,
            cell_length,
            vx_win: 0.0,
            t_move_win: 0.0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_enabled(&self) -> bool {
        self.width != 0
    }

    pub fn cell_length(&self) -> f64 {
        self.cell_length
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn moved_distance(&self) -> f64 {
        self.moved_distance
    }

    /// Whole cells moved so far.
    pub fn moved_cells(&self) -> i64 {
        (self.moved_distance / self.cell_length).round() as i64
    }

    /// True iff the window is enabled and has fallen behind its trajectory.
    /// Equality does not trigger a move.
    pub fn is_moving(&self, time: f64) -> bool {
        self.width != 0 && (time - self.start_time) * self.velocity > self.moved_distance
    }

    /// Shift every collaborator by one cluster width, in this order:
    /// bounds index, bounds extent, species (then offset caches), fields.
    ///
    /// The width is the first species' cluster width, or `clrw_fallback`
    /// when there are no species. Without species the offset caches are not
    /// shifted.
    ///
    /// # Panics
    ///
    /// If `agreement` reports a width different from the local one; workers
    /// shifting by different widths cannot be reconciled.
    #[allow(clippy::too_many_arguments)]
    pub fn operate<S, F, I, P, B, A>(
        &mut self,
        species: &mut [S],
        fields: &mut F,
        interpolation: &mut I,
        projection: &mut P,
        bounds: &mut B,
        clrw_fallback: usize,
        agreement: &A,
    ) -> WindowShift
    where
        S: WindowSpecies,
        F: WindowFields + ?Sized,
        I: OffsetCache + ?Sized,
        P: OffsetCache + ?Sized,
        B: DomainBounds + ?Sized,
        A: ShiftAgreement + ?Sized,
    {
        let clrw = local_shift_width(species, clrw_fallback);
        let agreed = agreement.agreed_width(clrw);
        assert_eq!(
            agreed, clrw,
            "moving window desynchronized: local shift width {clrw}, agreed width {agreed}"
        );

        let distance = clrw as f64 * self.cell_length;
        bounds.advance_starting_global_index(clrw);
        bounds.advance_local_bounds(distance);

        let offsets_shifted = !species.is_empty();
        if offsets_shifted {
            for s in species.iter_mut() {
                s.shift_window(clrw, &*bounds);
            }
            interpolation.shift_window(clrw);
            projection.shift_window(clrw);
        }

        fields.shift_window(clrw, &*bounds);
        self.moved_distance += distance;

        info!(
            clrw,
            moved_distance = self.moved_distance,
            start = bounds.starting_global_index(),
            "moving window shifted"
        );
        WindowShift {
            clrw,
            distance,
            moved_distance: self.moved_distance,
            starting_global_index: bounds.starting_global_index(),
            offsets_shifted,
        }
    }

    /// Push the state implied by `moved_distance` into every collaborator.
    ///
    /// Depends only on `moved_distance`, so it may be called at start-up,
    /// after `restore`, or at any point between moves.
    pub fn set_operators<S, I, P, B>(
        &self,
        species: &mut [S],
        interpolation: &mut I,
        projection: &mut P,
        bounds: &mut B,
    ) where
        S: WindowSpecies,
        I: OffsetCache + ?Sized,
        P: OffsetCache + ?Sized,
        B: DomainBounds + ?Sized,
    {
        let idx_moved = self.moved_cells();
        bounds.update_window_limits(self.moved_distance, idx_moved);
        for s in species.iter_mut() {
            s.set_window_limits(self.moved_distance);
        }
        let start = bounds.starting_global_index();
        interpolation.set_window_limits(start);
        projection.set_window_limits(start);
        debug!(
            moved_distance = self.moved_distance,
            idx_moved, start, "window limits resynchronized"
        );
    }

    /// Reset the displacement from a checkpoint. Follow with
    /// [`set_operators`](Self::set_operators).
    pub fn restore(&mut self, moved_distance: f64) -> WindowResult<()> {
        let moved_distance = ensure_finite(moved_distance, "moved_distance")?;
        if moved_distance < 0.0 {
            return Err(WindowError::InvalidKinematics {
                what: "moved_distance cannot be negative",
            });
        }
        self.moved_distance = moved_distance;
        Ok(())
    }
}

/// Shift width this worker would use: the first species' cluster width, or
/// the fallback without species.
pub fn local_shift_width<S: WindowSpecies>(species: &[S], clrw_fallback: usize) -> usize {
    let Some(first) = species.first() else {
        warn!(
            clrw = clrw_fallback,
            "no particle species: shifting by the configured cluster width"
        );
        return clrw_fallback;
    };
    let clrw = first.cluster_width();
    if species.iter().any(|s| s.cluster_width() != clrw) {
        let widths: Vec<usize> = species.iter().map(WindowSpecies::cluster_width).collect();
        warn!(?widths, clrw, "species disagree on cluster width; using the first");
    }
    clrw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::PatchBounds;
    use crate::collab::{AgreedWidth, LocalAgreement};
    use crate::offsets::DomainOffsets;

    #[derive(Debug, Default)]
    struct Tally {
        width: usize,
        shifts: Vec<(usize, i64)>,
        limits: Vec<f64>,
    }

    impl WindowSpecies for Tally {
        fn cluster_width(&self) -> usize {
            self.width
        }

        fn shift_window<B: DomainBounds + ?Sized>(&mut self, clrw: usize, bounds: &B) {
            self.shifts.push((clrw, bounds.starting_global_index()));
        }

        fn set_window_limits(&mut self, x_moved: f64) {
            self.limits.push(x_moved);
        }
    }

    #[derive(Debug, Default)]
    struct FieldLog(Vec<(usize, i64)>);

    impl WindowFields for FieldLog {
        fn shift_window<B: DomainBounds + ?Sized>(&mut self, clrw: usize, bounds: &B) {
            self.0.push((clrw, bounds.starting_global_index()));
        }
    }

    fn window(width: usize) -> MovingWindow {
        MovingWindow::new(&WindowConfig {
            nspace_win_x: width,
            cell_length: 0.5,
            vx_win: 1.0,
            t_move_win: 2.0,
        })
        .unwrap()
    }

    fn bounds() -> PatchBounds {
        PatchBounds::new(0, [0.0; 3], [8.0, 0.0, 0.0])
    }

    #[test]
    fn disabled_window_never_moves() {
        let w = window(0);
        for t in [0.0, 2.0, 10.0, 1e9] {
            assert!(!w.is_moving(t));
        }
    }

    #[test]
    fn moves_strictly_after_trajectory_overtakes() {
        let w = window(16);
        assert!(!w.is_moving(1.0));
        assert!(!w.is_moving(2.0));
        assert!(w.is_moving(2.25));
    }

    #[test]
    fn operate_uses_first_species_width_and_order() {
        let mut w = window(16);
        let mut species = vec![
            Tally {
                width: 2,
                ..Tally::default()
            },
            Tally {
                width: 2,
                ..Tally::default()
            },
        ];
        let mut fields = FieldLog::default();
        let mut interp = DomainOffsets::new("interp", 0);
        let mut proj = DomainOffsets::new("proj", 0);
        let mut b = bounds();

        let shift = w.operate(
            &mut species,
            &mut fields,
            &mut interp,
            &mut proj,
            &mut b,
            7,
            &LocalAgreement,
        );

        assert_eq!(shift.clrw, 2);
        assert_eq!(shift.distance, 1.0);
        assert!(shift.offsets_shifted);
        // species and fields see the already-advanced bounds
        assert_eq!(species[0].shifts, vec![(2, 2)]);
        assert_eq!(species[1].shifts, vec![(2, 2)]);
        assert_eq!(fields.0, vec![(2, 2)]);
        assert_eq!(interp.start_index(), 2);
        assert_eq!(proj.start_index(), 2);
        assert_eq!(b.local_min(0), 1.0);
        assert_eq!(w.moved_distance(), 1.0);
    }

    #[test]
    fn without_species_offsets_stay_put_but_fields_shift() {
        let mut w = window(16);
        let mut species: Vec<Tally> = Vec::new();
        let mut fields = FieldLog::default();
        let mut interp = DomainOffsets::new("interp", 0);
        let mut proj = DomainOffsets::new("proj", 0);
        let mut b = bounds();

        let shift = w.operate(
            &mut species,
            &mut fields,
            &mut interp,
            &mut proj,
            &mut b,
            3,
            &LocalAgreement,
        );

        assert_eq!(shift.clrw, 3);
        assert!(!shift.offsets_shifted);
        assert_eq!(interp.start_index(), 0);
        assert_eq!(proj.start_index(), 0);
        assert_eq!(fields.0, vec![(3, 3)]);
        assert_eq!(b.starting_global_index(), 3);
        assert_eq!(w.moved_distance(), 1.5);
    }

    #[test]
    fn divergent_species_widths_use_the_first() {
        let species = vec![
            Tally {
                width: 4,
                ..Tally::default()
            },
            Tally {
                width: 1,
                ..Tally::default()
            },
        ];
        assert_eq!(local_shift_width(&species, 9), 4);
    }

    #[test]
    #[should_panic(expected = "desynchronized")]
    fn disagreeing_width_is_fatal() {
        let mut w = window(16);
        let mut species = vec![Tally {
            width: 2,
            ..Tally::default()
        }];
        let mut fields = FieldLog::default();
        let mut interp = DomainOffsets::new("interp", 0);
        let mut proj = DomainOffsets::new("proj", 0);
        let mut b = bounds();
        w.operate(
            &mut species,
            &mut fields,
            &mut interp,
            &mut proj,
            &mut b,
            1,
            &AgreedWidth(4),
        );
    }

    #[test]
    fn set_operators_pushes_moved_distance() {
        let mut w = window(16);
        w.restore(2.5).unwrap();
        let mut species = vec![Tally {
            width: 1,
            ..Tally::default()
        }];
        let mut interp = DomainOffsets::new("interp", 0);
        let mut proj = DomainOffsets::new("proj", 0);
        let mut b = bounds();
        w.set_operators(&mut species, &mut interp, &mut proj, &mut b);

        assert_eq!(b.starting_global_index(), 5);
        assert_eq!(b.local_min(0), 2.5);
        assert_eq!(species[0].limits, vec![2.5]);
        assert_eq!(interp.start_index(), 5);
        assert_eq!(proj.start_index(), 5);
    }

    #[test]
    fn restore_rejects_bad_distances() {
        let mut w = window(16);
        assert!(w.restore(-1.0).is_err());
        assert!(w.restore(f64::NAN).is_err());
        assert_eq!(w.moved_distance(), 0.0);
    }

    #[test]
    fn construction_validates_kinematics() {
        let bad = WindowConfig {
            nspace_win_x: 4,
            cell_length: 0.0,
            vx_win: 1.0,
            t_move_win: 0.0,
        };
        assert!(MovingWindow::new(&bad).is_err());
        let bad = WindowConfig {
            cell_length: 1.0,
            vx_win: f64::INFINITY,
            ..bad
        };
        assert!(matches!(
            MovingWindow::new(&bad),
            Err(WindowError::NonFinite { .. })
        ));
    }
}
