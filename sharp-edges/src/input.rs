//! JSON triangle list loading.
//!
//! The input is a JSON array of facets:
//!
//! ```json
//! [
//!   { "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "normal": [0, 0, 1] },
//!   { "vertices": [[0, 0, 0], [0, 1, 0], [0, 0, 1]] }
//! ]
//! ```
//!
//! A missing normal is computed from the vertex winding. Triangle indices are
//! the positions in the array.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_types::{Point3, Triangle, Vector3};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Facet {
    vertices: [[f64; 3]; 3],
    #[serde(default)]
    normal: Option<[f64; 3]>,
}

impl Facet {
    fn into_triangle(self, index: usize) -> Triangle {
        let [a, b, c] = self.vertices.map(Point3::from);
        match self.normal {
            Some(normal) => Triangle::new([a, b, c], Vector3::from(normal), index),
            None => Triangle::from_winding(a, b, c, index),
        }
    }
}

/// Parse a JSON facet list.
pub fn parse_triangles(json: &str) -> Result<Vec<Triangle>> {
    let facets: Vec<Facet> = serde_json::from_str(json).context("invalid facet list")?;
    Ok(facets
        .into_iter()
        .enumerate()
        .map(|(index, facet)| facet.into_triangle(index))
        .collect())
}

/// Read and parse a JSON facet list from `path`.
pub fn load_triangles(path: &Path) -> Result<Vec<Triangle>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_triangles(&json).with_context(|| format!("failed to parse {}", path.display()))
}
