//! Core geometry types for mesh analysis.
//!
//! This crate provides the foundational types shared by the analysis crates:
//!
//! - [`Triangle`] - Three vertex positions with their source normal and index
//! - [`Aabb`] - Axis-aligned bounding box of a triangle list
//! - [`unit_cube`], [`subdivided_cube`], [`regular_tetrahedron`] - Closed
//!   reference meshes for tests and benchmarks
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Vertex Sharing
//!
//! Triangles carry their own vertex positions. Downstream crates identify a
//! shared vertex by exact coordinate equality, so loaders must emit
//! bit-identical coordinates for every occurrence of a vertex.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Point3, Triangle};
//!
//! let tri = Triangle::from_winding(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     0,
//! );
//!
//! assert!((tri.normal.z - 1.0).abs() < 1e-12);
//! assert!(!tri.is_degenerate());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod primitives;
mod triangle;

pub use bounds::Aabb;
pub use primitives::{regular_tetrahedron, subdivided_cube, unit_cube};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
