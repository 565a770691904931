//! Axis-aligned bounds of a triangle list.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Triangle;

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, Aabb, Point3};
///
/// let bounds = Aabb::from_triangles(&unit_cube());
/// assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
/// assert_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create an empty box (min > max on every axis).
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Bounds of every vertex of every triangle.
    ///
    /// Returns an empty box for an empty slice.
    #[must_use]
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut aabb = Self::empty();
        for point in triangles.iter().flat_map(|t| t.vertices.iter()) {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Grow the box to contain `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Whether the box contains no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Width, depth and height of the box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Center of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Aabb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        write!(
            f,
            "[{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regular_tetrahedron;
    use approx::assert_relative_eq;

    #[test]
    fn empty_slice_gives_empty_box() {
        let aabb = Aabb::from_triangles(&[]);
        assert!(aabb.is_empty());
        assert_relative_eq!(aabb.size(), Vector3::zeros());
        assert_eq!(format!("{aabb}"), "(empty)");
    }

    #[test]
    fn tetrahedron_bounds() {
        let aabb = Aabb::from_triangles(&regular_tetrahedron());
        assert_relative_eq!(aabb.min, Point3::new(-1.0, -1.0, -1.0));
        assert_relative_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(aabb.center(), Point3::origin());
        assert_relative_eq!(aabb.size(), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn expand_is_monotonic() {
        let mut aabb = Aabb::default();
        aabb.expand_to_include(&Point3::new(1.0, -2.0, 3.0));
        aabb.expand_to_include(&Point3::new(-1.0, 2.0, 0.0));
        assert_relative_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_relative_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
        assert!(format!("{aabb}").contains("-2.000"));
    }
}
