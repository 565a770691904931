//! Per-edge findings produced by angle analysis.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edge::Edge;

/// Direction of a fold between two faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fold {
    /// The faces bend inward, forming a valley.
    Concave,
    /// The faces bend outward, forming a ridge.
    Convex,
}

impl Fold {
    /// Lower-case name of the fold.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Concave => "concave",
            Self::Convex => "convex",
        }
    }
}

impl std::fmt::Display for Fold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an edge could not be measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegenerateGeometry {
    /// A triangle's normal has zero or non-finite length.
    ZeroNormal {
        /// Source index of the triangle.
        triangle: usize,
    },
    /// The angle between the normals is not a number.
    NonFiniteAngle,
    /// The second triangle has no vertex off the shared edge.
    NoOppositeVertex {
        /// Source index of the triangle.
        triangle: usize,
    },
}

impl std::fmt::Display for DegenerateGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroNormal { triangle } => {
                write!(f, "triangle {triangle} has a zero-length normal")
            }
            Self::NonFiniteAngle => write!(f, "angle between normals is not finite"),
            Self::NoOppositeVertex { triangle } => {
                write!(f, "triangle {triangle} has no vertex off the shared edge")
            }
        }
    }
}

/// What was found on an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FindingKind {
    /// The dihedral angle is below the threshold.
    Sharp {
        /// Dihedral angle in degrees (180 means coplanar).
        dihedral_angle: f64,
        /// Fold direction.
        fold: Fold,
    },
    /// The edge could not be measured.
    Degenerate(DegenerateGeometry),
}

/// A flagged edge and the two triangles that meet there.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SharpEdgeFinding {
    /// The edge.
    pub edge: Edge,
    /// Source indices of the first and second incident triangle.
    pub triangles: [usize; 2],
    /// What was found.
    pub kind: FindingKind,
}

impl SharpEdgeFinding {
    /// Whether this is a sharp edge finding.
    #[must_use]
    pub const fn is_sharp(&self) -> bool {
        matches!(self.kind, FindingKind::Sharp { .. })
    }

    /// Whether this is a degenerate geometry finding.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self.kind, FindingKind::Degenerate(_))
    }

    /// Dihedral angle in degrees, for sharp findings.
    #[must_use]
    pub fn dihedral_angle(&self) -> Option<f64> {
        match self.kind {
            FindingKind::Sharp { dihedral_angle, .. } => Some(dihedral_angle),
            FindingKind::Degenerate(_) => None,
        }
    }

    /// Fold direction, for sharp findings.
    #[must_use]
    pub const fn fold(&self) -> Option<Fold> {
        match self.kind {
            FindingKind::Sharp { fold, .. } => Some(fold),
            FindingKind::Degenerate(_) => None,
        }
    }
}
