//! Parameter document schema.

use serde::{Deserialize, Serialize};

fn default_oversize() -> usize {
    2
}

fn default_one() -> usize {
    1
}

/// Fully resolved simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimParams {
    pub version: u32,
    pub name: String,
    /// Geometry token, e.g. `2Dcartesian` or `AMcylindrical`.
    pub geometry: String,
    /// Cells per axis for the whole domain.
    pub n_space: Vec<usize>,
    pub cell_length: Vec<f64>,
    pub timestep: f64,
    pub sim_time: f64,
    #[serde(default = "default_oversize")]
    pub oversize: usize,
    #[serde(default = "default_one")]
    pub number_of_modes: usize,
    /// Patches the domain is split into along x.
    #[serde(default = "default_one")]
    pub number_of_patches: usize,
    /// Cluster width used when no species is defined.
    #[serde(default = "default_one")]
    pub clrw: usize,
    /// `[min, max]` boundary tokens per axis.
    pub em_boundary_conditions: Vec<[String; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_window: Option<MovingWindowDef>,
    #[serde(default)]
    pub species: Vec<SpeciesDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovingWindowDef {
    /// Window width in cells; 0 disables the window.
    pub nspace_win_x: usize,
    pub vx_win: f64,
    #[serde(default)]
    pub t_move_win: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesDef {
    pub name: String,
    #[serde(default = "default_one")]
    pub cluster_width: usize,
    #[serde(default)]
    pub particles_per_cell: usize,
}

impl SimParams {
    /// Number of timesteps covering `sim_time`.
    pub fn n_steps(&self) -> usize {
        if self.timestep > 0.0 && self.sim_time > 0.0 {
            (self.sim_time / self.timestep).round() as usize
        } else {
            0
        }
    }
}
