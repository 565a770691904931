//! Canonical edges and the edge-to-triangle index.
//!
//! Vertices are identified by exact coordinate equality. No welding or
//! tolerance is applied: two triangles share an edge only if both endpoints
//! carry identical coordinates in both triangles.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use hashbrown::HashMap;
use mesh_types::{Point3, Triangle};
use smallvec::SmallVec;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SharpnessError, SharpnessResult};

/// Exact key for a vertex position.
///
/// Equality and hashing use the IEEE bit patterns of the coordinates, with
/// `-0.0` folded into `+0.0`. Ordering is lexicographic on `(x, y, z)` under
/// [`f64::total_cmp`], which agrees with equality and is total even for NaN.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexKey([f64; 3]);

impl VertexKey {
    /// Key for `point`.
    #[must_use]
    pub fn new(point: &Point3<f64>) -> Self {
        // -0.0 + 0.0 == +0.0; every other value is unchanged.
        Self([point.x + 0.0, point.y + 0.0, point.z + 0.0])
    }

    /// The keyed position.
    #[must_use]
    pub fn point(&self) -> Point3<f64> {
        Point3::new(self.0[0], self.0[1], self.0[2])
    }

    fn bits(&self) -> [u64; 3] {
        self.0.map(f64::to_bits)
    }
}

impl PartialEq for VertexKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for VertexKey {}

impl Hash for VertexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl Ord for VertexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0[0]
            .total_cmp(&other.0[0])
            .then_with(|| self.0[1].total_cmp(&other.0[1]))
            .then_with(|| self.0[2].total_cmp(&other.0[2]))
    }
}

impl PartialOrd for VertexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An undirected edge with its endpoints in canonical order.
///
/// The lexicographically smaller endpoint comes first, so the same geometric
/// edge yields the same key whichever triangle or winding produced it.
///
/// # Example
///
/// ```
/// use mesh_sharpness::Edge;
/// use mesh_types::Point3;
///
/// let p = Point3::new(1.0, 0.0, 0.0);
/// let q = Point3::new(0.0, 5.0, 0.0);
///
/// assert_eq!(Edge::new(&p, &q), Edge::new(&q, &p));
/// assert_eq!(Edge::new(&p, &q).start(), q);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    start: VertexKey,
    end: VertexKey,
}

impl Edge {
    /// Canonical edge between `v1` and `v2`.
    ///
    /// When the endpoints are identical the pair is taken as `(v2, v1)`.
    #[must_use]
    pub fn new(v1: &Point3<f64>, v2: &Point3<f64>) -> Self {
        let (k1, k2) = (VertexKey::new(v1), VertexKey::new(v2));
        match k1.cmp(&k2) {
            Ordering::Less => Self { start: k1, end: k2 },
            Ordering::Greater | Ordering::Equal => Self { start: k2, end: k1 },
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub fn start(&self) -> Point3<f64> {
        self.start.point()
    }

    /// The larger endpoint.
    #[must_use]
    pub fn end(&self) -> Point3<f64> {
        self.end.point()
    }

    /// Whether `point` is exactly one of the two endpoints.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let key = VertexKey::new(point);
        key == self.start || key == self.end
    }

    /// Whether both endpoints are the same point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end() - self.start()).norm()
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (s, e) = (self.start.0, self.end.0);
        write!(
            f,
            "({}, {}, {})-({}, {}, {})",
            s[0], s[1], s[2], e[0], e[1], e[2]
        )
    }
}

/// An edge and the triangles that contain it, in first-seen order.
#[derive(Debug, Clone)]
pub struct EdgeRecord<'a> {
    /// The canonical edge.
    pub edge: Edge,
    /// Incident triangles in the order they were indexed.
    pub triangles: SmallVec<[&'a Triangle; 2]>,
}

impl<'a> EdgeRecord<'a> {
    fn new(edge: Edge) -> Self {
        Self {
            edge,
            triangles: SmallVec::new(),
        }
    }

    /// Number of incident triangle entries.
    #[must_use]
    pub fn incident_count(&self) -> usize {
        self.triangles.len()
    }

    /// The two incident triangles, if there are exactly two.
    #[must_use]
    pub fn pair(&self) -> Option<(&'a Triangle, &'a Triangle)> {
        match self.triangles.as_slice() {
            [t1, t2] => Some((*t1, *t2)),
            _ => None,
        }
    }

    /// Source indices of the incident triangles.
    #[must_use]
    pub fn triangle_indices(&self) -> Vec<usize> {
        self.triangles.iter().map(|t| t.index).collect()
    }
}

/// An edge whose incident triangle count is not two.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeViolation {
    /// The offending edge.
    pub edge: Edge,
    /// Source indices of its incident triangles.
    pub triangles: Vec<usize>,
}

impl EdgeViolation {
    /// Number of incident triangle entries.
    #[must_use]
    pub fn incident_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the edge lies on an open boundary (one incident triangle).
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.triangles.len() == 1
    }
}

impl std::fmt::Display for EdgeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "edge {} is shared by {} triangle(s) {:?}",
            self.edge,
            self.triangles.len(),
            self.triangles
        )
    }
}

/// Mapping from canonical edge to the triangles containing it.
///
/// Built once from an immutable triangle slice and read-only afterwards.
/// Records are kept in the order their edges were first seen, which makes
/// everything derived from the index deterministic.
///
/// # Example
///
/// ```
/// use mesh_sharpness::EdgeIndex;
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// let index = EdgeIndex::build_manifold(&cube).unwrap();
///
/// // 12 cube edges plus one diagonal per side.
/// assert_eq!(index.edge_count(), 18);
/// assert!(index.is_manifold());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex<'a> {
    records: Vec<EdgeRecord<'a>>,
    lookup: HashMap<Edge, usize>,
    triangle_count: usize,
}

impl<'a> EdgeIndex<'a> {
    /// Index every side of every triangle without validating the result.
    ///
    /// Each triangle contributes its `AB`, `AC` and `BC` sides.
    #[must_use]
    pub fn build(triangles: &'a [Triangle]) -> Self {
        let mut records: Vec<EdgeRecord<'a>> = Vec::with_capacity(triangles.len() * 3 / 2);
        let mut lookup: HashMap<Edge, usize> = HashMap::with_capacity(triangles.len() * 3 / 2);

        for tri in triangles {
            for (v1, v2) in tri.edges() {
                let edge = Edge::new(v1, v2);
                let slot = *lookup.entry(edge).or_insert_with(|| {
                    records.push(EdgeRecord::new(edge));
                    records.len() - 1
                });
                records[slot].triangles.push(tri);
            }
        }

        debug!(
            triangles = triangles.len(),
            edges = records.len(),
            "Built edge index"
        );

        Self {
            records,
            lookup,
            triangle_count: triangles.len(),
        }
    }

    /// Build the index and require every edge to have exactly two triangles.
    ///
    /// # Errors
    ///
    /// Returns [`SharpnessError::ManifoldViolation`] if any edge has an
    /// incident count other than two.
    pub fn build_manifold(triangles: &'a [Triangle]) -> SharpnessResult<Self> {
        let index = Self::build(triangles);
        index.validate()?;
        Ok(index)
    }

    /// Check that every edge is shared by exactly two triangles.
    ///
    /// # Errors
    ///
    /// Returns [`SharpnessError::ManifoldViolation`] naming the first
    /// offending edge and listing all of them.
    pub fn validate(&self) -> SharpnessResult<()> {
        let violations = self.violations();
        match SharpnessError::manifold_violation(violations) {
            None => Ok(()),
            Some(err) => {
                warn!(
                    violating_edges = err.violations().len(),
                    boundary_edges = self.boundary_edge_count(),
                    non_manifold_edges = self.non_manifold_edge_count(),
                    "Mesh is not manifold"
                );
                Err(err)
            }
        }
    }

    /// Every edge whose incident count is not two, in index order.
    #[must_use]
    pub fn violations(&self) -> Vec<EdgeViolation> {
        self.records
            .iter()
            .filter(|r| r.incident_count() != 2)
            .map(|r| EdgeViolation {
                edge: r.edge,
                triangles: r.triangle_indices(),
            })
            .collect()
    }

    /// Look up the record for an edge.
    #[must_use]
    pub fn get(&self, edge: &Edge) -> Option<&EdgeRecord<'a>> {
        self.lookup.get(edge).map(|&slot| &self.records[slot])
    }

    /// All records in first-seen order.
    #[must_use]
    pub fn records(&self) -> &[EdgeRecord<'a>] {
        &self.records
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.records.len()
    }

    /// Number of triangles that were indexed.
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Number of edges with a single incident triangle.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.incident_count() == 1)
            .count()
    }

    /// Number of edges with more than two incident triangles.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.incident_count() > 2)
            .count()
    }

    /// Whether every edge has exactly two incident triangles.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.records.iter().all(|r| r.incident_count() == 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{regular_tetrahedron, unit_cube, Vector3};

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    fn tri(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, index: usize) -> Triangle {
        Triangle::new([a, b, c], Vector3::z(), index)
    }

    #[test]
    fn ordering_compares_x_then_y_then_z() {
        let e = Edge::new(&p(1.0, 0.0, 0.0), &p(0.0, 9.0, 9.0));
        assert_eq!(e.start(), p(0.0, 9.0, 9.0));

        let e = Edge::new(&p(0.0, 2.0, 0.0), &p(0.0, 1.0, 9.0));
        assert_eq!(e.start(), p(0.0, 1.0, 9.0));

        let e = Edge::new(&p(0.0, 0.0, 3.0), &p(0.0, 0.0, 2.0));
        assert_eq!(e.start(), p(0.0, 0.0, 2.0));
        assert_eq!(e.end(), p(0.0, 0.0, 3.0));
    }

    #[test]
    fn ordering_is_symmetric() {
        let a = p(0.5, -1.0, 2.0);
        let b = p(0.5, -1.0, -2.0);
        assert_eq!(Edge::new(&a, &b), Edge::new(&b, &a));
    }

    #[test]
    fn identical_endpoints_form_degenerate_edge() {
        let a = p(1.0, 1.0, 1.0);
        let e = Edge::new(&a, &a);
        assert!(e.is_degenerate());
        assert!(e.length().abs() < f64::EPSILON);
    }

    #[test]
    fn negative_zero_matches_positive_zero() {
        let e1 = Edge::new(&p(-0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0));
        let e2 = Edge::new(&p(0.0, 0.0, -0.0), &p(1.0, 0.0, 0.0));
        assert_eq!(e1, e2);
    }

    #[test]
    fn nearly_equal_points_are_distinct() {
        let a = p(0.1 + 0.2, 0.0, 0.0);
        let b = p(0.3, 0.0, 0.0);
        assert_ne!(VertexKey::new(&a), VertexKey::new(&b));
    }

    #[test]
    fn nan_coordinates_canonicalize_symmetrically() {
        let a = p(f64::NAN, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        assert_eq!(Edge::new(&a, &b), Edge::new(&b, &a));
    }

    #[test]
    fn contains_uses_exact_equality() {
        let e = Edge::new(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0));
        assert!(e.contains(&p(1.0, 0.0, 0.0)));
        assert!(!e.contains(&p(1.0 + 1e-12, 0.0, 0.0)));
    }

    #[test]
    fn display_lists_both_endpoints() {
        let e = Edge::new(&p(1.0, 0.0, 0.0), &p(0.0, 0.0, 0.0));
        assert_eq!(e.to_string(), "(0, 0, 0)-(1, 0, 0)");
    }

    #[test]
    fn each_triangle_contributes_three_edges() {
        let cube = unit_cube();
        let index = EdgeIndex::build(&cube);
        let entries: usize = index.records().iter().map(EdgeRecord::incident_count).sum();
        assert_eq!(entries, 3 * cube.len());
        assert_eq!(index.triangle_count(), 12);
    }

    #[test]
    fn records_keep_first_seen_order() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        let d = p(1.0, 1.0, 0.0);
        let tris = [tri(a, b, c, 0), tri(b, d, c, 1)];
        let index = EdgeIndex::build(&tris);

        let order: Vec<Edge> = index.records().iter().map(|r| r.edge).collect();
        assert_eq!(
            order,
            vec![
                Edge::new(&a, &b),
                Edge::new(&a, &c),
                Edge::new(&b, &c),
                Edge::new(&b, &d),
                Edge::new(&d, &c),
            ]
        );

        let shared = index.get(&Edge::new(&c, &b));
        assert_eq!(shared.map(EdgeRecord::triangle_indices), Some(vec![0, 1]));
    }

    #[test]
    fn closed_meshes_are_manifold() {
        let cube = unit_cube();
        assert!(EdgeIndex::build_manifold(&cube).is_ok());

        let tet = regular_tetrahedron();
        let index = EdgeIndex::build_manifold(&tet);
        assert_eq!(index.map(|i| i.edge_count()).ok(), Some(6));
    }

    #[test]
    fn open_mesh_reports_boundary_edges() {
        let mut cube = unit_cube();
        cube.pop();
        let index = EdgeIndex::build(&cube);
        assert_eq!(index.boundary_edge_count(), 3);
        assert_eq!(index.non_manifold_edge_count(), 0);
        assert!(!index.is_manifold());

        match index.validate() {
            Err(SharpnessError::ManifoldViolation {
                incident,
                violations,
                ..
            }) => {
                assert_eq!(incident, 1);
                assert_eq!(violations.len(), 3);
                assert!(violations.iter().all(EdgeViolation::is_boundary));
            }
            Ok(()) => panic!("open cube must not validate"),
        }
    }

    #[test]
    fn fin_triangle_makes_edge_non_manifold() {
        let mut cube = unit_cube();
        let fin = tri(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.5, -1.0, 0.5), 12);
        cube.push(fin);
        let index = EdgeIndex::build(&cube);
        assert_eq!(index.non_manifold_edge_count(), 1);

        let err = index.validate().err();
        let violations = err.as_ref().map(SharpnessError::violations).unwrap_or(&[]);
        // The fin's own two outer sides are open boundaries.
        assert_eq!(violations.len(), 3);
        assert!(violations
            .iter()
            .any(|v| v.edge == Edge::new(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0))
                && v.incident_count() == 3));
    }

    #[test]
    fn empty_input_is_vacuously_manifold() {
        let index = EdgeIndex::build_manifold(&[]);
        assert_eq!(index.map(|i| i.edge_count()).ok(), Some(0));
    }
}
