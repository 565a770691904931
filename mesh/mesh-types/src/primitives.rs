//! Closed reference meshes.
//!
//! Every mesh produced here is a closed 2-manifold whose shared vertices are
//! bit-identical across triangles, with outward-facing normals and indices
//! numbered from zero in emission order.

// Grid coordinates are small integers; the casts are exact.
#![allow(clippy::cast_precision_loss)]

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// An axis-aligned unit cube spanning `[0, 1]^3`, two triangles per side.
///
/// Every cube edge has a 90 degree dihedral angle and every face diagonal a
/// 180 degree one.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.len(), 12);
/// assert!(cube.iter().all(|t| (t.normal.norm() - 1.0).abs() < 1e-12));
/// ```
#[must_use]
pub fn unit_cube() -> Vec<Triangle> {
    subdivided_cube(1)
}

/// A unit cube whose sides are split into an `n` x `n` grid of quads.
///
/// Produces `12 * n * n` triangles. `n == 0` is treated as 1. Normals are the
/// exact unit axis vectors of each side.
///
/// # Example
///
/// ```
/// use mesh_types::subdivided_cube;
///
/// assert_eq!(subdivided_cube(4).len(), 12 * 16);
/// ```
#[must_use]
pub fn subdivided_cube(n: usize) -> Vec<Triangle> {
    let n = n.max(1);
    let coord = |i: usize| i as f64 / n as f64;
    let mut triangles = Vec::with_capacity(12 * n * n);

    for axis in 0..3 {
        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
        for side in [0, n] {
            let mut outward = Vector3::zeros();
            outward[axis] = if side == 0 { -1.0 } else { 1.0 };

            let point = |i: usize, j: usize| {
                let mut p = Point3::origin();
                p[axis] = coord(side);
                p[u] = coord(i);
                p[v] = coord(j);
                p
            };

            for i in 0..n {
                for j in 0..n {
                    let (p00, p10) = (point(i, j), point(i + 1, j));
                    let (p11, p01) = (point(i + 1, j + 1), point(i, j + 1));
                    for [a, b, c] in [[p00, p10, p11], [p00, p11, p01]] {
                        let index = triangles.len();
                        let tri = oriented(a, b, c, &outward, index);
                        triangles.push(Triangle::new(tri.vertices, outward, index));
                    }
                }
            }
        }
    }

    triangles
}

/// A regular tetrahedron inscribed in the cube `[-1, 1]^3`.
///
/// Every edge has a dihedral angle of `acos(1/3)`, about 70.53 degrees.
/// Normals are computed from the winding and are not unit length.
#[must_use]
pub fn regular_tetrahedron() -> Vec<Triangle> {
    let p = [
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
    ];
    let faces = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

    faces
        .iter()
        .enumerate()
        .map(|(index, &[a, b, c])| {
            let outward = (p[a].coords + p[b].coords + p[c].coords) / 3.0;
            oriented(p[a], p[b], p[c], &outward, index)
        })
        .collect()
}

/// Winding-derived triangle, flipped if needed so its normal faces `outward`.
fn oriented(
    a: Point3<f64>,
    b: Point3<f64>,
    c: Point3<f64>,
    outward: &Vector3<f64>,
    index: usize,
) -> Triangle {
    let tri = Triangle::from_winding(a, b, c, index);
    if tri.normal.dot(outward) < 0.0 {
        Triangle::from_winding(a, c, b, index)
    } else {
        tri
    }
}
