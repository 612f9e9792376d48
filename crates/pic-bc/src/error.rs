//! Error types for boundary-condition construction and application.

use pic_core::{Axis, BoundaryKind, Geometry, PicError, Side};
use thiserror::Error;

/// Configuration errors raised while building a boundary set, plus the one
/// runtime misuse a boundary can detect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BcError {
    #[error("Unknown geometry: {token}")]
    UnknownGeometry { token: String },

    #[error("Unknown EM boundary condition `{token}` for {geometry} axis {axis} ({side} face)")]
    IllegalBoundary {
        geometry: Geometry,
        axis: Axis,
        side: Side,
        token: String,
    },

    #[error("Missing EM boundary conditions for {geometry} axis {axis}")]
    MissingAxis { geometry: Geometry, axis: Axis },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{kind} boundary expects {expected} fields")]
    FieldMismatch {
        kind: BoundaryKind,
        expected: &'static str,
    },
}

pub type BcResult<T> = Result<T, BcError>;

impl From<BcError> for PicError {
    fn from(e: BcError) -> Self {
        match e {
            BcError::UnknownGeometry { token } => PicError::UnknownGeometry { token },
            BcError::InvalidArg { what } => PicError::InvalidArg { what },
            other => PicError::Configuration {
                message: other.to_string(),
            },
        }
    }
}
