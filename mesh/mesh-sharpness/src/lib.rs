//! Manifold validation and sharp edge detection for triangle meshes.
//!
//! This crate checks a triangle list in three stages:
//!
//! 1. **Edge indexing**: every triangle side is keyed by its exact endpoint
//!    coordinates, and the mesh is rejected unless every edge is shared by
//!    exactly two triangles.
//! 2. **Angle analysis**: each edge's dihedral angle is computed from the
//!    two face normals. Edges below the threshold are flagged and classified
//!    as concave or convex.
//! 3. **Reporting**: findings are summarized into a pass/fail verdict and the
//!    ordered list of offending triangle indices for highlighting.
//!
//! # Dihedral Angle
//!
//! The dihedral angle is `180 - angle_between_normals` in degrees. Coplanar
//! faces measure 180, a cube edge measures 90, and a knife edge approaches 0.
//!
//! # Degenerate Geometry
//!
//! Triangles with zero-length or non-finite normals never abort the
//! analysis. They are reported as [`FindingKind::Degenerate`] findings and
//! fail the check alongside sharp edges.
//!
//! The manifold check runs first. A sliver with two identical vertices adds
//! a zero-length edge and a doubled side to the index, so inside an
//! otherwise closed mesh it usually fails with
//! [`SharpnessError::ManifoldViolation`] before any angle is measured. Only
//! slivers whose edges still pair up exactly are reported as degenerate.
//!
//! # Example
//!
//! ```
//! use mesh_types::{regular_tetrahedron, unit_cube};
//! use mesh_sharpness::{check_sharp_edges, SharpnessParams};
//!
//! let params = SharpnessParams::default();
//!
//! let report = check_sharp_edges(&unit_cube(), &params).unwrap();
//! assert!(report.passed);
//!
//! let report = check_sharp_edges(&regular_tetrahedron(), &params).unwrap();
//! assert!(!report.passed);
//! println!("{report}");
//! ```
//!
//! # Threshold
//!
//! [`SharpnessParams`] clamps the threshold to `[0, 89]` degrees. The lower
//! level [`analyze_edges`] takes the threshold as given.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod analysis;
mod angle;
mod edge;
mod error;
mod params;
mod report;
mod result;

// Re-export main types and functions
pub use analysis::{analyze_mesh_edges, check_sharp_edges};
pub use angle::{analyze_edges, angle_between_normals, classify_fold, dihedral_angle};
pub use edge::{Edge, EdgeIndex, EdgeRecord, EdgeViolation, VertexKey};
pub use error::{SharpnessError, SharpnessResult};
pub use params::{
    clamp_threshold, FoldFilter, SharpnessParams, DEFAULT_THRESHOLD_DEGREES,
    MAX_THRESHOLD_DEGREES,
};
pub use report::{offending_triangle_indices, summarize, SharpnessReport};
pub use result::{DegenerateGeometry, FindingKind, Fold, SharpEdgeFinding};
