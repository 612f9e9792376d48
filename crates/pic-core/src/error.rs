use thiserror::Error;

pub type PicResult<T> = Result<T, PicError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PicError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown geometry: {token}")]
    UnknownGeometry { token: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}
