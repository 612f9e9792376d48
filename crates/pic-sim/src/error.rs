//! Error types for simulation setup and the lockstep driver.

use thiserror::Error;

/// Errors encountered while building or stepping workers.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid parameters: {0}")]
    Params(#[from] pic_params::ValidationError),

    #[error("Boundary error: {0}")]
    Boundary(#[from] pic_bc::BcError),

    #[error("Window error: {0}")]
    Window(#[from] pic_window::WindowError),

    #[error("Setup error: {0}")]
    Core(#[from] pic_core::PicError),

    #[error("Workers disagree on the window shift width at step {step}: {widths:?}")]
    Desynchronized { step: usize, widths: Vec<usize> },
}

pub type SimResult<T> = Result<T, SimError>;
