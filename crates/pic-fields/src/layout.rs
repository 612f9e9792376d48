//! Grid layout shared by field storage and boundary conditions.

use pic_core::{Geometry, PicError, PicResult, ensure_positive};

/// Sizes and spacings of one patch's field grid.
///
/// Absent axes (y/z in lower-dimensional cartesian runs, θ in cylindrical
/// runs) have `n_space = 0`, unit cell length and no ghost cells; every
/// field has extent 1 along them.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub geometry: Geometry,
    /// Number of cells per axis, without ghost cells.
    pub n_space: [usize; 3],
    pub cell_length: [f64; 3],
    pub timestep: f64,
    /// Ghost cells on each side of each present axis.
    pub oversize: [usize; 3],
    /// Azimuthal modes (cylindrical only, 1 otherwise).
    pub n_modes: usize,
}

impl GridLayout {
    pub fn new(
        geometry: Geometry,
        n_space: &[usize],
        cell_length: &[f64],
        timestep: f64,
        oversize: usize,
    ) -> PicResult<Self> {
        let n_dim = geometry.n_dim_field();
        if n_space.len() != n_dim {
            return Err(PicError::IndexOob {
                what: "n_space entries for geometry",
                index: n_space.len(),
                len: n_dim,
            });
        }
        if cell_length.len() != n_dim {
            return Err(PicError::IndexOob {
                what: "cell_length entries for geometry",
                index: cell_length.len(),
                len: n_dim,
            });
        }
        ensure_positive(timestep, "timestep")?;

        let mut layout = Self {
            geometry,
            n_space: [0; 3],
            cell_length: [1.0; 3],
            timestep,
            oversize: [0; 3],
            n_modes: 1,
        };
        for axis in 0..n_dim {
            if n_space[axis] == 0 {
                return Err(PicError::InvalidArg {
                    what: "n_space must be positive on every axis",
                });
            }
            layout.n_space[axis] = n_space[axis];
            layout.cell_length[axis] = ensure_positive(cell_length[axis], "cell_length")?;
            layout.oversize[axis] = oversize;
        }
        Ok(layout)
    }

    /// Set the number of azimuthal modes (cylindrical geometry).
    pub fn with_modes(mut self, n_modes: usize) -> PicResult<Self> {
        if n_modes == 0 {
            return Err(PicError::InvalidArg {
                what: "number_of_modes must be at least 1",
            });
        }
        self.n_modes = n_modes;
        Ok(self)
    }

    pub fn is_present(&self, axis: usize) -> bool {
        axis < self.geometry.n_dim_field()
    }

    /// Primal points along `axis`, ghost cells included.
    pub fn n_primal(&self, axis: usize) -> usize {
        if self.is_present(axis) {
            self.n_space[axis] + 1 + 2 * self.oversize[axis]
        } else {
            1
        }
    }

    /// Dual points along `axis`, ghost cells included.
    pub fn n_dual(&self, axis: usize) -> usize {
        if self.is_present(axis) {
            self.n_primal(axis) + 1
        } else {
            1
        }
    }

    /// Array extents for a field with the given per-axis staggering.
    pub fn dims(&self, dual: [bool; 3]) -> [usize; 3] {
        let mut dims = [1; 3];
        for (axis, d) in dims.iter_mut().enumerate() {
            *d = if dual[axis] {
                self.n_dual(axis)
            } else {
                self.n_primal(axis)
            };
        }
        dims
    }

    pub fn dt_over_dx(&self, axis: usize) -> f64 {
        self.timestep / self.cell_length[axis]
    }

    /// Primal radial row sitting on r = 0.
    pub fn axis_row(&self) -> usize {
        self.oversize[1]
    }

    /// Radius of primal radial row `j`.
    pub fn radius_primal(&self, j: usize) -> f64 {
        (j as f64 - self.oversize[1] as f64) * self.cell_length[1]
    }

    /// Radius of dual radial row `j` (half a cell below primal row `j`).
    pub fn radius_dual(&self, j: usize) -> f64 {
        (j as f64 - 0.5 - self.oversize[1] as f64) * self.cell_length[1]
    }
}
