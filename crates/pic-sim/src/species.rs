//! Particle species bookkeeping along the streaming axis.

use pic_params::SpeciesDef;
use pic_window::{DomainBounds, WindowSpecies};

/// Uniformly loaded particles of one species in one patch.
///
/// Only positions along x are tracked. Particles are kept sorted and grouped
/// in clusters of `cluster_width` cells starting at the local domain min.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpecies {
    name: String,
    cluster_width: usize,
    particles_per_cell: usize,
    cell_length: f64,
    n_cells: usize,
    initial_min: f64,
    min_loc: f64,
    /// Whether this patch sits on the leading edge and loads fresh plasma.
    injects: bool,
    x: Vec<f64>,
    cluster_start: Vec<usize>,
    outgoing: Vec<f64>,
}

impl ParticleSpecies {
    pub fn new(def: &SpeciesDef, cell_length: f64, n_cells: usize, min: f64, injects: bool) -> Self {
        let mut species = Self {
            name: def.name.clone(),
            cluster_width: def.cluster_width.max(1),
            particles_per_cell: def.particles_per_cell,
            cell_length,
            n_cells,
            initial_min: min,
            min_loc: min,
            injects,
            x: Vec::with_capacity(n_cells * def.particles_per_cell),
            cluster_start: Vec::new(),
            outgoing: Vec::new(),
        };
        species.load_cells(min, n_cells);
        species.reindex();
        species
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn positions(&self) -> &[f64] {
        &self.x
    }

    /// Local domain min as last seen by this species.
    pub fn min_loc(&self) -> f64 {
        self.min_loc
    }

    /// Particles per cluster, in cluster order.
    pub fn cluster_counts(&self) -> Vec<usize> {
        self.cluster_start.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Particles that left through the Min face since the last call.
    pub fn take_outgoing(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.outgoing)
    }

    /// Adopt particles handed over by the neighbouring patch.
    pub fn receive(&mut self, positions: &[f64]) {
        if positions.is_empty() {
            return;
        }
        self.x.extend_from_slice(positions);
        self.reindex();
    }

    fn load_cells(&mut self, first: f64, cells: usize) {
        let ppc = self.particles_per_cell;
        for cell in 0..cells {
            for k in 0..ppc {
                let offset = cell as f64 + (k as f64 + 0.5) / ppc as f64;
                self.x.push(first + offset * self.cell_length);
            }
        }
    }

    fn reindex(&mut self) {
        self.x.sort_by(f64::total_cmp);
        let cluster_len = self.cluster_width as f64 * self.cell_length;
        let n_clusters = self.n_cells.div_ceil(self.cluster_width);
        self.cluster_start.clear();
        for c in 0..n_clusters {
            let edge = self.min_loc + c as f64 * cluster_len;
            self.cluster_start.push(self.x.partition_point(|&x| x < edge));
        }
        self.cluster_start.push(self.x.len());
    }
}

impl WindowSpecies for ParticleSpecies {
    fn cluster_width(&self) -> usize {
        self.cluster_width
    }

    fn shift_window<B: DomainBounds + ?Sized>(&mut self, clrw: usize, bounds: &B) {
        let min = bounds.local_min(0);
        let max = bounds.local_max(0);
        let cut = self.x.partition_point(|&x| x < min);
        self.outgoing.extend(self.x.drain(..cut));
        self.min_loc = min;
        if self.injects {
            self.load_cells(max - clrw as f64 * self.cell_length, clrw);
        }
        self.reindex();
    }

    fn set_window_limits(&mut self, x_moved: f64) {
        self.min_loc = self.initial_min + x_moved;
    }
}
