use crate::PicError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PicError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PicError::NonFinite { what, value: v })
    }
}

/// Require a finite, strictly positive value (cell lengths, timesteps).
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PicError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PicError::InvalidArg { what })
    }
}
