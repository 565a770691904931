//! Triangle record with its source normal and index.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle as delivered by a mesh loader.
///
/// Stores the three vertex positions in winding order together with the
/// normal read from (or computed for) the source mesh and the triangle's
/// position in that mesh. Keeping the three together avoids any alignment
/// between separate vertex, normal and index arrays.
///
/// The normal is not required to be unit length. It may even be zero for a
/// degenerate triangle; analysis code is expected to handle that.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle, Vector3};
///
/// let tri = Triangle::new(
///     [
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     Vector3::new(0.0, 0.0, 1.0),
///     7,
/// );
///
/// assert_eq!(tri.index, 7);
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Vertices `[A, B, C]` in winding order.
    pub vertices: [Point3<f64>; 3],
    /// Outward face normal (unit or non-unit).
    pub normal: Vector3<f64>,
    /// Stable position of this triangle in the source mesh.
    pub index: usize,
}

impl Triangle {
    /// Create a triangle from its vertices, normal and source index.
    #[inline]
    #[must_use]
    pub const fn new(vertices: [Point3<f64>; 3], normal: Vector3<f64>, index: usize) -> Self {
        Self {
            vertices,
            normal,
            index,
        }
    }

    /// Create a triangle whose normal is derived from the winding order.
    ///
    /// The normal is `(B - A) x (C - A)`, unnormalized. Collinear or
    /// coincident vertices produce a zero normal.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Point3, Triangle};
    ///
    /// let tri = Triangle::from_winding(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    ///     Point3::new(0.0, 2.0, 0.0),
    ///     0,
    /// );
    /// assert!((tri.normal.z - 4.0).abs() < 1e-10);
    ///
    /// let needle = Triangle::from_winding(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     1,
    /// );
    /// assert!(needle.is_degenerate());
    /// ```
    #[must_use]
    pub fn from_winding(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, index: usize) -> Self {
        let normal = (b - a).cross(&(c - a));
        Self::new([a, b, c], normal, index)
    }

    /// First vertex.
    #[inline]
    #[must_use]
    pub const fn a(&self) -> &Point3<f64> {
        &self.vertices[0]
    }

    /// Second vertex.
    #[inline]
    #[must_use]
    pub const fn b(&self) -> &Point3<f64> {
        &self.vertices[1]
    }

    /// Third vertex.
    #[inline]
    #[must_use]
    pub const fn c(&self) -> &Point3<f64> {
        &self.vertices[2]
    }

    /// The three sides as vertex pairs, in the order `AB`, `AC`, `BC`.
    #[must_use]
    pub fn edges(&self) -> [(&Point3<f64>, &Point3<f64>); 3] {
        let [a, b, c] = &self.vertices;
        [(a, b), (a, c), (b, c)]
    }

    /// Area computed from the vertex positions (ignores the stored normal).
    #[must_use]
    pub fn area(&self) -> f64 {
        (self.b() - self.a()).cross(&(self.c() - self.a())).norm() * 0.5
    }

    /// Centroid of the three vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Whether the triangle has no usable orientation.
    ///
    /// True when the vertices span zero area or the stored normal is zero
    /// length or non-finite.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let len_sq = self.normal.norm_squared();
        !(len_sq.is_finite() && len_sq > 0.0) || self.area() <= f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::from_winding(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
            2,
        )
    }

    #[test]
    fn winding_normal_follows_right_hand_rule() {
        let tri = right_triangle();
        assert_relative_eq!(tri.normal, Vector3::new(0.0, 0.0, 12.0));
        assert_eq!(tri.index, 2);
    }

    #[test]
    fn edges_are_ab_ac_bc() {
        let tri = right_triangle();
        let [ab, ac, bc] = tri.edges();
        assert_eq!((ab.0, ab.1), (tri.a(), tri.b()));
        assert_eq!((ac.0, ac.1), (tri.a(), tri.c()));
        assert_eq!((bc.0, bc.1), (tri.b(), tri.c()));
    }

    #[test]
    fn area_and_centroid() {
        let tri = right_triangle();
        assert_relative_eq!(tri.area(), 6.0);
        assert_relative_eq!(tri.centroid(), Point3::new(1.0, 4.0 / 3.0, 0.0));
    }

    #[test]
    fn collinear_triangle_is_degenerate() {
        let tri = Triangle::from_winding(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            0,
        );
        assert!(tri.is_degenerate());
        assert_relative_eq!(tri.normal.norm(), 0.0);
    }

    #[test]
    fn nan_normal_is_degenerate() {
        let mut tri = right_triangle();
        tri.normal = Vector3::new(f64::NAN, 0.0, 1.0);
        assert!(tri.is_degenerate());
    }

    #[test]
    fn explicit_normal_is_kept_verbatim() {
        let tri = Triangle::new(right_triangle().vertices, Vector3::new(0.0, 0.0, -1.0), 9);
        assert_relative_eq!(tri.normal.z, -1.0);
        assert!(!tri.is_degenerate());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let tri = right_triangle();
        let json = serde_json::to_string(&tri).ok();
        assert!(json.is_some());
        let parsed: Result<Triangle, _> = serde_json::from_str(&json.unwrap_or_default());
        assert_eq!(parsed.ok(), Some(tri));
    }
}
