//! Proximity threshold configuration.

use crate::error::{GraphError, GraphResult};

/// The distance below which two part surfaces count as touching.
///
/// There is deliberately no default: observed pipelines used anything from
/// `1e-3` absolute units to `0.02×` the object's overall scale, so the
/// threshold is a mandatory input everywhere.
///
/// # Example
///
/// ```
/// use part_graph::ProximityThreshold;
///
/// // 2% of an object whose bounding-box diagonal is 5 units long.
/// let eps = ProximityThreshold::RelativeToScale(0.02).resolve(5.0).unwrap();
/// assert!((eps - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProximityThreshold {
    /// A fixed distance in mesh units.
    Absolute(f64),
    /// A fraction of the object's overall scale (bounding-box diagonal).
    RelativeToScale(f64),
}

impl ProximityThreshold {
    /// Resolve to an absolute distance for an object of the given scale.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidThreshold`] when the threshold or the
    /// resolved distance is not finite and positive (a relative threshold
    /// against a degenerate, zero-scale object resolves to zero and is
    /// rejected here).
    pub fn resolve(self, object_scale: f64) -> GraphResult<f64> {
        let resolved = match self {
            Self::Absolute(value) => value,
            Self::RelativeToScale(factor) => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(GraphError::invalid_threshold(format!(
                        "relative factor must be finite and positive, got {factor}"
                    )));
                }
                factor * object_scale
            }
        };

        if !resolved.is_finite() || resolved <= 0.0 {
            return Err(GraphError::invalid_threshold(format!(
                "resolved distance must be finite and positive, got {resolved}"
            )));
        }

        Ok(resolved)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn absolute_ignores_scale() {
        let eps = ProximityThreshold::Absolute(1e-3).resolve(100.0).unwrap();
        assert!((eps - 1e-3).abs() < f64::EPSILON);
    }

    #[test]
    fn relative_scales() {
        let eps = ProximityThreshold::RelativeToScale(0.005)
            .resolve(10.0)
            .unwrap();
        assert!((eps - 0.05).abs() < 1e-12);
    }

    #[test]
    fn zero_scale_rejected_for_relative() {
        assert!(ProximityThreshold::RelativeToScale(0.02)
            .resolve(0.0)
            .is_err());
    }

    #[test]
    fn non_positive_and_non_finite_rejected() {
        assert!(ProximityThreshold::Absolute(0.0).resolve(1.0).is_err());
        assert!(ProximityThreshold::Absolute(-1.0).resolve(1.0).is_err());
        assert!(ProximityThreshold::Absolute(f64::NAN).resolve(1.0).is_err());
        assert!(ProximityThreshold::RelativeToScale(f64::INFINITY)
            .resolve(1.0)
            .is_err());
    }
}
