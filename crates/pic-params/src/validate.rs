//! Structural validation of parameter documents.
//!
//! Boundary tokens are not checked here; their legality depends on geometry
//! and axis and is decided when the boundary set is built.

use std::collections::HashSet;

use pic_core::Geometry;

use crate::schema::SimParams;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Length mismatch: {field} has {found} entries, {geometry} needs {expected}")]
    LengthMismatch {
        field: String,
        geometry: String,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_params(params: &SimParams) -> Result<(), ValidationError> {
    if params.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: params.version,
        });
    }

    if !(params.timestep.is_finite() && params.timestep > 0.0) {
        return Err(invalid("timestep", params.timestep, "must be positive"));
    }
    if !(params.sim_time.is_finite() && params.sim_time >= 0.0) {
        return Err(invalid("sim_time", params.sim_time, "must be non-negative"));
    }
    if params.number_of_modes == 0 {
        return Err(invalid("number_of_modes", 0, "must be at least 1"));
    }
    if params.clrw == 0 {
        return Err(invalid("clrw", 0, "must be at least 1"));
    }
    if params.number_of_patches == 0 {
        return Err(invalid("number_of_patches", 0, "must be at least 1"));
    }

    // An unknown token is reported by the boundary factory with its own error.
    if let Ok(geometry) = params.geometry.parse::<Geometry>() {
        validate_extents(params, geometry)?;
    }

    for (i, &dx) in params.cell_length.iter().enumerate() {
        if !(dx.is_finite() && dx > 0.0) {
            return Err(invalid(&format!("cell_length[{i}]"), dx, "must be positive"));
        }
    }

    if let Some(window) = &params.moving_window {
        if !window.vx_win.is_finite() {
            return Err(invalid("moving_window.vx_win", window.vx_win, "must be finite"));
        }
        if !window.t_move_win.is_finite() {
            return Err(invalid(
                "moving_window.t_move_win",
                window.t_move_win,
                "must be finite",
            ));
        }
    }

    let mut names = HashSet::new();
    for species in &params.species {
        if !names.insert(&species.name) {
            return Err(ValidationError::DuplicateId {
                id: species.name.clone(),
                context: "species".to_string(),
            });
        }
        if species.cluster_width == 0 {
            return Err(invalid(
                &format!("species.{}.cluster_width", species.name),
                0,
                "must be at least 1",
            ));
        }
    }

    Ok(())
}

fn validate_extents(params: &SimParams, geometry: Geometry) -> Result<(), ValidationError> {
    let n_dim = geometry.n_dim_field();
    let lengths = [
        ("n_space", params.n_space.len()),
        ("cell_length", params.cell_length.len()),
        ("em_boundary_conditions", params.em_boundary_conditions.len()),
    ];
    for (field, found) in lengths {
        if found != n_dim {
            return Err(ValidationError::LengthMismatch {
                field: field.to_string(),
                geometry: geometry.to_string(),
                expected: n_dim,
                found,
            });
        }
    }
    for (i, &n) in params.n_space.iter().enumerate() {
        if n == 0 {
            return Err(invalid(&format!("n_space[{i}]"), n, "must be positive"));
        }
    }

    let nx = params.n_space[0];
    if nx % params.number_of_patches != 0 {
        return Err(invalid(
            "number_of_patches",
            params.number_of_patches,
            "must divide n_space[0]",
        ));
    }
    let patch_cells = nx / params.number_of_patches;
    let widths = std::iter::once(("clrw".to_string(), params.clrw)).chain(
        params
            .species
            .iter()
            .map(|s| (format!("species.{}.cluster_width", s.name), s.cluster_width)),
    );
    for (field, width) in widths {
        if width != 0 && patch_cells % width != 0 {
            return Err(invalid(&field, width, "must divide the cells per patch along x"));
        }
    }
    if !geometry.is_cylindrical() && params.number_of_modes != 1 {
        return Err(invalid(
            "number_of_modes",
            params.number_of_modes,
            "only cylindrical geometry has azimuthal modes",
        ));
    }
    Ok(())
}
