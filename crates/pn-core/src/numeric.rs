use crate::CoreError;

/// Floating point type for coordinates, distances and radii.
pub type Real = f64;

/// Pass `v` through if it is finite. `what` names the value in the error.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}
