//! Error types for sharp edge analysis.

use thiserror::Error;

use crate::edge::{Edge, EdgeViolation};

/// Result type alias for sharpness operations.
pub type SharpnessResult<T> = Result<T, SharpnessError>;

/// Errors that abort a sharp edge analysis.
///
/// Degenerate geometry is not an error: it is reported as a finding so the
/// rest of the mesh can still be scored.
#[derive(Debug, Error)]
pub enum SharpnessError {
    /// At least one edge is not shared by exactly two triangles.
    #[error(
        "mesh is not manifold: edge {edge} is shared by {incident} triangle(s), expected 2 ({} violating edge(s))",
        .violations.len()
    )]
    ManifoldViolation {
        /// First offending edge in index order.
        edge: Edge,
        /// Number of triangles incident to `edge`.
        incident: usize,
        /// Every offending edge, in index order.
        violations: Vec<EdgeViolation>,
    },
}

impl SharpnessError {
    /// Create a manifold violation error from the offending edges.
    ///
    /// Returns `None` when `violations` is empty.
    #[must_use]
    pub fn manifold_violation(violations: Vec<EdgeViolation>) -> Option<Self> {
        let first = violations.first()?;
        Some(Self::ManifoldViolation {
            edge: first.edge,
            incident: first.incident_count(),
            violations,
        })
    }

    /// The offending edges carried by this error.
    #[must_use]
    pub fn violations(&self) -> &[EdgeViolation] {
        match self {
            Self::ManifoldViolation { violations, .. } => violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Point3;

    fn violation(incident: usize) -> EdgeViolation {
        EdgeViolation {
            edge: Edge::new(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 0.0)),
            triangles: (0..incident).collect(),
        }
    }

    #[test]
    fn test_error_display() {
        let err = SharpnessError::manifold_violation(vec![violation(3), violation(1)]);
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("not manifold"));
        assert!(msg.contains("shared by 3 triangle(s)"));
        assert!(msg.contains("(2 violating edge(s))"));
    }

    #[test]
    fn test_empty_violations_is_not_an_error() {
        assert!(SharpnessError::manifold_violation(Vec::new()).is_none());
    }

    #[test]
    fn test_violations_accessor() {
        let err = SharpnessError::manifold_violation(vec![violation(1)]);
        assert_eq!(err.map(|e| e.violations().len()), Some(1));
    }
}
