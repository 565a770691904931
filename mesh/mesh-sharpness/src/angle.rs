//! Dihedral angle measurement and fold classification.
//!
//! The dihedral angle of an edge is `180 - angle_between_normals`, so two
//! coplanar faces measure 180 degrees and a cube edge measures 90.

use mesh_types::{Triangle, Vector3};
use rayon::prelude::*;

use crate::edge::{Edge, EdgeIndex, EdgeRecord};
use crate::result::{DegenerateGeometry, FindingKind, Fold, SharpEdgeFinding};

/// Cosines within this distance of `1` or `-1` are treated as exactly
/// parallel, so normals of a flat surface measure 180 degrees.
const PARALLEL_COS_TOLERANCE: f64 = 1e-12;

/// Angle between two normals in degrees, in `[0, 180]`.
///
/// Returns `None` if either normal has zero or non-finite length.
///
/// # Example
///
/// ```
/// use mesh_sharpness::angle_between_normals;
/// use mesh_types::Vector3;
///
/// let a = angle_between_normals(&Vector3::x(), &Vector3::y()).unwrap();
/// assert!((a - 90.0).abs() < 1e-10);
///
/// assert!(angle_between_normals(&Vector3::zeros(), &Vector3::y()).is_none());
/// ```
#[must_use]
pub fn angle_between_normals(n1: &Vector3<f64>, n2: &Vector3<f64>) -> Option<f64> {
    let (u1, u2) = (unit(n1)?, unit(n2)?);
    // Rounding can push the dot product of unit vectors just outside [-1, 1].
    let cos = snap_parallel(u1.dot(&u2).clamp(-1.0, 1.0));
    let angle = cos.acos().to_degrees();
    angle.is_finite().then_some(angle)
}

/// Dihedral angle in degrees between faces with normals `n1` and `n2`.
///
/// Symmetric in its arguments. Returns `None` if either normal has zero or
/// non-finite length.
///
/// # Example
///
/// ```
/// use mesh_sharpness::dihedral_angle;
/// use mesh_types::Vector3;
///
/// // Coplanar faces.
/// let flat = dihedral_angle(&Vector3::z(), &Vector3::z()).unwrap();
/// assert!((flat - 180.0).abs() < 1e-10);
///
/// // Perpendicular faces.
/// let corner = dihedral_angle(&Vector3::z(), &Vector3::y()).unwrap();
/// assert!((corner - 90.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn dihedral_angle(n1: &Vector3<f64>, n2: &Vector3<f64>) -> Option<f64> {
    angle_between_normals(n1, n2).map(|angle| 180.0 - angle)
}

/// Classify the fold at `edge` between a face with normal `n1` and `t2`.
///
/// Takes the vertex of `t2` that is not an endpoint of `edge` and measures
/// it from the edge start against `n1`. A vertex behind the first face's
/// plane means the surface turns away from the normal (convex); otherwise
/// it turns toward it (concave).
///
/// # Errors
///
/// Returns [`DegenerateGeometry::NoOppositeVertex`] if every vertex of `t2`
/// lies on the edge, and [`DegenerateGeometry::NonFiniteAngle`] if the
/// measurement is not a number.
pub fn classify_fold(
    n1: &Vector3<f64>,
    edge: &Edge,
    t2: &Triangle,
) -> Result<Fold, DegenerateGeometry> {
    let opposite = t2
        .vertices
        .iter()
        .find(|v| !edge.contains(v))
        .ok_or(DegenerateGeometry::NoOppositeVertex { triangle: t2.index })?;

    let side = n1.dot(&(*opposite - edge.start()));
    if side.is_nan() {
        return Err(DegenerateGeometry::NonFiniteAngle);
    }

    Ok(if side < 0.0 {
        Fold::Convex
    } else {
        Fold::Concave
    })
}

/// Analyze every edge shared by exactly two triangles.
///
/// Edges whose dihedral angle is below `threshold_degrees` become
/// [`FindingKind::Sharp`] findings. Edges that cannot be measured become
/// [`FindingKind::Degenerate`] findings. Records with any other triangle
/// count are skipped; use [`EdgeIndex::validate`] first to reject them.
///
/// The threshold is used as given. Findings are returned in index order.
///
/// # Example
///
/// ```
/// use mesh_sharpness::{analyze_edges, EdgeIndex};
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// let index = EdgeIndex::build_manifold(&cube).unwrap();
///
/// assert!(analyze_edges(&index, 80.0).is_empty());
/// assert_eq!(analyze_edges(&index, 95.0).len(), 12);
/// ```
#[must_use]
pub fn analyze_edges(index: &EdgeIndex<'_>, threshold_degrees: f64) -> Vec<SharpEdgeFinding> {
    index
        .records()
        .par_iter()
        .filter_map(|record| analyze_record(record, threshold_degrees))
        .collect()
}

fn analyze_record(record: &EdgeRecord<'_>, threshold_degrees: f64) -> Option<SharpEdgeFinding> {
    let (t1, t2) = record.pair()?;
    let finding = |kind| SharpEdgeFinding {
        edge: record.edge,
        triangles: [t1.index, t2.index],
        kind,
    };

    let dihedral = match measure(t1, t2) {
        Ok(angle) => angle,
        Err(reason) => return Some(finding(FindingKind::Degenerate(reason))),
    };

    if dihedral < threshold_degrees {
        let kind = match classify_fold(&t1.normal, &record.edge, t2) {
            Ok(fold) => FindingKind::Sharp {
                dihedral_angle: dihedral,
                fold,
            },
            Err(reason) => FindingKind::Degenerate(reason),
        };
        Some(finding(kind))
    } else {
        None
    }
}

fn measure(t1: &Triangle, t2: &Triangle) -> Result<f64, DegenerateGeometry> {
    for tri in [t1, t2] {
        if unit(&tri.normal).is_none() {
            return Err(DegenerateGeometry::ZeroNormal {
                triangle: tri.index,
            });
        }
    }
    dihedral_angle(&t1.normal, &t2.normal).ok_or(DegenerateGeometry::NonFiniteAngle)
}

fn snap_parallel(cos: f64) -> f64 {
    if 1.0 - cos.abs() <= PARALLEL_COS_TOLERANCE {
        cos.signum()
    } else {
        cos
    }
}

fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let len = v.norm();
    (len.is_finite() && len > 0.0).then(|| v / len)
}
