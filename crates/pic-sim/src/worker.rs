//! One worker: a patch with its fields, boundaries, species and window.

use std::sync::Arc;

use pic_bc::{BoundaryConditionSet, BoundaryFactory};
use pic_core::{Axis, Geometry, Side, Slot};
use pic_fields::{EmFields, GridLayout};
use pic_params::SimParams;
use pic_window::{
    DomainBounds, DomainOffsets, LocalAgreement, MovingWindow, PatchBounds, ShiftAgreement,
    WindowConfig, WindowShift, local_shift_width,
};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::species::ParticleSpecies;

/// A patch of the domain, split along x, and everything it owns.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    n_workers: usize,
    geometry: Geometry,
    layout: Arc<GridLayout>,
    bounds: PatchBounds,
    fields: EmFields,
    boundaries: BoundaryConditionSet,
    species: Vec<ParticleSpecies>,
    interpolation: DomainOffsets,
    projection: DomainOffsets,
    window: MovingWindow,
    clrw_fallback: usize,
}

impl Worker {
    /// Build patch `id` of `n_workers` from validated parameters.
    pub fn new(params: &SimParams, id: usize, n_workers: usize) -> SimResult<Self> {
        if n_workers == 0 || id >= n_workers {
            return Err(SimError::InvalidArg {
                what: "worker id outside the worker count",
            });
        }
        pic_params::validate_params(params)?;
        let geometry: Geometry = params
            .geometry
            .parse()
            .map_err(|_| pic_bc::BcError::UnknownGeometry {
                token: params.geometry.clone(),
            })?;

        let nx = params.n_space[0];
        if nx % n_workers != 0 {
            return Err(SimError::InvalidArg {
                what: "worker count must divide n_space[0]",
            });
        }
        let local_nx = nx / n_workers;
        let widths = std::iter::once(params.clrw)
            .chain(params.species.iter().map(|s| s.cluster_width));
        for width in widths {
            if width == 0 || local_nx % width != 0 {
                return Err(SimError::InvalidArg {
                    what: "cluster widths must divide the cells per worker along x",
                });
            }
        }
        let mut n_space = params.n_space.clone();
        n_space[0] = local_nx;

        let layout = Arc::new(
            GridLayout::new(
                geometry,
                &n_space,
                &params.cell_length,
                params.timestep,
                params.oversize,
            )?
            .with_modes(params.number_of_modes)?,
        );
        let boundaries =
            BoundaryFactory::create(geometry, &params.em_boundary_conditions, &layout)?;
        let fields = EmFields::new(&layout)?;

        let dx = params.cell_length[0];
        let start = (id * local_nx) as i64;
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        min[0] = start as f64 * dx;
        max[0] = (start + local_nx as i64) as f64 * dx;
        for axis in 1..geometry.n_dim_field() {
            max[axis] = params.n_space[axis] as f64 * params.cell_length[axis];
        }
        let bounds = PatchBounds::new(start, min, max);

        let injects = id + 1 == n_workers;
        let species = params
            .species
            .iter()
            .map(|def| ParticleSpecies::new(def, dx, local_nx, min[0], injects))
            .collect();

        let window = match &params.moving_window {
            Some(w) => MovingWindow::new(&WindowConfig {
                nspace_win_x: w.nspace_win_x,
                cell_length: dx,
                vx_win: w.vx_win,
                t_move_win: w.t_move_win,
            })?,
            None => MovingWindow::disabled(dx)?,
        };

        let mut worker = Self {
            id,
            n_workers,
            geometry,
            layout,
            bounds,
            fields,
            boundaries,
            species,
            interpolation: DomainOffsets::new("interpolation", start),
            projection: DomainOffsets::new("projection", start),
            window,
            clrw_fallback: params.clrw,
        };
        worker.resync();
        debug!(id, n_workers, start, local_nx, "worker built");
        Ok(worker)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn bounds(&self) -> &PatchBounds {
        &self.bounds
    }

    pub fn fields(&self) -> &EmFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EmFields {
        &mut self.fields
    }

    pub fn boundaries(&self) -> &BoundaryConditionSet {
        &self.boundaries
    }

    pub fn species(&self) -> &[ParticleSpecies] {
        &self.species
    }

    pub fn interpolation(&self) -> &DomainOffsets {
        &self.interpolation
    }

    pub fn projection(&self) -> &DomainOffsets {
        &self.projection
    }

    pub fn window(&self) -> &MovingWindow {
        &self.window
    }

    pub fn particle_count(&self) -> usize {
        self.species.iter().map(ParticleSpecies::len).sum()
    }

    /// Whether this patch owns the face at `slot`. Faces along x between two
    /// patches are internal.
    pub fn owns_face(&self, slot: Slot) -> bool {
        if slot.axis() != Axis::X {
            return true;
        }
        match slot.side() {
            Side::Min => self.id == 0,
            Side::Max => self.id + 1 == self.n_workers,
        }
    }

    /// Apply every boundary this patch owns.
    pub fn apply_boundaries(&mut self) -> SimResult<()> {
        for bc in self.boundaries.iter() {
            let slot = bc.slot();
            if self.owns_face(slot) {
                bc.apply(&mut self.fields)?;
            }
        }
        Ok(())
    }

    /// Shift width this patch would move by.
    pub fn local_shift_width(&self) -> usize {
        local_shift_width(&self.species, self.clrw_fallback)
    }

    /// Move the window by one cluster width.
    pub fn shift<A: ShiftAgreement + ?Sized>(&mut self, agreement: &A) -> WindowShift {
        self.window.operate(
            &mut self.species,
            &mut self.fields,
            &mut self.interpolation,
            &mut self.projection,
            &mut self.bounds,
            self.clrw_fallback,
            agreement,
        )
    }

    /// Boundary phase, then a window move if the window is behind at `time`.
    pub fn step(&mut self, time: f64) -> SimResult<Option<WindowShift>> {
        self.apply_boundaries()?;
        if self.window.is_moving(time) {
            Ok(Some(self.shift(&LocalAgreement)))
        } else {
            Ok(None)
        }
    }

    /// Particles that left through this patch's Min face, per species.
    pub fn take_outgoing(&mut self) -> Vec<Vec<f64>> {
        self.species.iter_mut().map(ParticleSpecies::take_outgoing).collect()
    }

    /// Adopt particles from the next patch, per species.
    pub fn receive(&mut self, incoming: &[Vec<f64>]) {
        for (species, positions) in self.species.iter_mut().zip(incoming) {
            species.receive(positions);
        }
    }

    /// Restart from a checkpointed window displacement.
    pub fn restore_window(&mut self, moved_distance: f64) -> SimResult<()> {
        self.window.restore(moved_distance)?;
        self.resync();
        Ok(())
    }

    fn resync(&mut self) {
        self.window.set_operators(
            &mut self.species,
            &mut self.interpolation,
            &mut self.projection,
            &mut self.bounds,
        );
        self.fields
            .set_origin_index(self.bounds.starting_global_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(yaml: &str) -> SimParams {
        pic_params::from_yaml_str(yaml).unwrap()
    }

    const WINDOW_1D: &str = r#"
version: 1
name: unit
geometry: 1Dcartesian
n_space: [16]
cell_length: [0.5]
timestep: 0.25
sim_time: 4.0
clrw: 2
em_boundary_conditions:
  - [silver-muller, silver-muller]
moving_window:
  nspace_win_x: 16
  vx_win: 1.0
  t_move_win: 1.0
species:
  - name: electron
    cluster_width: 2
    particles_per_cell: 1
"#;

    #[test]
    fn patch_placement() {
        let p = params(WINDOW_1D);
        let w = Worker::new(&p, 1, 2).unwrap();
        assert_eq!(w.bounds().starting_global_index(), 8);
        assert_eq!(w.bounds().local_min(0), 4.0);
        assert_eq!(w.bounds().local_max(0), 8.0);
        assert_eq!(w.interpolation().start_index(), 8);
        assert_eq!(w.fields().origin_index(), 8);
        assert_eq!(w.particle_count(), 8);
        assert!(!w.owns_face(Slot::from_index(0)));
        assert!(w.owns_face(Slot::from_index(1)));
    }

    #[test]
    fn step_moves_only_after_start_time() {
        let p = params(WINDOW_1D);
        let mut w = Worker::new(&p, 0, 1).unwrap();
        assert_eq!(w.step(0.5).unwrap(), None);
        assert_eq!(w.step(1.0).unwrap(), None);
        let shift = w.step(1.25).unwrap().unwrap();
        assert_eq!(shift.clrw, 2);
        assert_eq!(shift.moved_distance, 1.0);
        assert_eq!(w.bounds().starting_global_index(), 2);
        assert_eq!(w.particle_count(), 16);
    }

    #[test]
    fn restore_matches_replayed_moves() {
        let p = params(WINDOW_1D);
        let mut replayed = Worker::new(&p, 0, 1).unwrap();
        replayed.shift(&LocalAgreement);
        replayed.shift(&LocalAgreement);

        let mut restored = Worker::new(&p, 0, 1).unwrap();
        restored.restore_window(replayed.window().moved_distance()).unwrap();

        assert_eq!(restored.bounds(), replayed.bounds());
        assert_eq!(restored.interpolation(), replayed.interpolation());
        assert_eq!(restored.projection(), replayed.projection());
        assert_eq!(
            restored.species()[0].min_loc(),
            replayed.species()[0].min_loc()
        );
    }

    #[test]
    fn bad_worker_index() {
        let p = params(WINDOW_1D);
        assert!(matches!(
            Worker::new(&p, 2, 2),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn cluster_width_must_tile_every_worker() {
        let p = params(WINDOW_1D);
        // 16 cells over 4 workers: 4 cells each, width 2 fits
        Worker::new(&p, 0, 4).unwrap();
        // 16 cells over 16 workers: 1 cell each, width 2 does not
        assert!(matches!(
            Worker::new(&p, 0, 16),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn illegal_boundary_surfaces_as_boundary_error() {
        let p = params(&WINDOW_1D.replace("[silver-muller, silver-muller]", "[silver-muller, Buneman]"));
        assert!(matches!(
            Worker::new(&p, 0, 1),
            Err(SimError::Boundary(pic_bc::BcError::IllegalBoundary { .. }))
        ));
    }
}
