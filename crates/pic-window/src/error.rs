//! Error types for moving-window construction.

use pic_core::PicError;
use thiserror::Error;

/// Invalid window kinematics. Moving the window itself cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    #[error("Invalid window kinematics: {what}")]
    InvalidKinematics { what: &'static str },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type WindowResult<T> = Result<T, WindowError>;

impl From<PicError> for WindowError {
    fn from(e: PicError) -> Self {
        match e {
            PicError::NonFinite { what, value } => WindowError::NonFinite { what, value },
            PicError::InvalidArg { what } => WindowError::InvalidKinematics { what },
            _ => WindowError::InvalidKinematics {
                what: "window kinematics",
            },
        }
    }
}
