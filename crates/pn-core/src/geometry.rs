//! Planar positions of base stations.

use core::fmt;

use crate::error::CoreResult;
use crate::numeric::{Real, ensure_finite};

/// A point on the expedition map.
///
/// Equality is exact: two positions are equal only if both coordinates
/// compare equal as floats.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: Real,
    pub y: Real,
}

impl Position {
    /// Build a position, rejecting NaN and infinite coordinates.
    pub fn new(x: Real, y: Real) -> CoreResult<Self> {
        Ok(Self {
            x: ensure_finite(x, "x coordinate")?,
            y: ensure_finite(y, "y coordinate")?,
        })
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> Real {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_four_five() {
        let a = Position::new(0.0, 0.0).unwrap();
        let b = Position::new(3.0, 4.0).unwrap();
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Position::new(Real::NAN, 0.0).is_err());
        assert!(Position::new(0.0, Real::NEG_INFINITY).is_err());
    }

    #[test]
    fn display_is_tuple_like() {
        let p = Position::new(2.0, -1.5).unwrap();
        assert_eq!(p.to_string(), "(2, -1.5)");
    }
}
