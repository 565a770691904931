//! Sharp edge check pipeline: index, validate, analyze, summarize.

use mesh_types::Triangle;
use tracing::{debug, info, warn};

use crate::angle::analyze_edges;
use crate::edge::EdgeIndex;
use crate::error::SharpnessResult;
use crate::params::SharpnessParams;
use crate::report::{summarize, SharpnessReport};
use crate::result::SharpEdgeFinding;

/// Find sharp and degenerate edges of a manifold triangle list.
///
/// Findings are filtered by `params.fold_filter` and returned in edge order.
///
/// # Errors
///
/// Returns [`crate::SharpnessError::ManifoldViolation`] if any edge is not
/// shared by exactly two triangles.
pub fn analyze_mesh_edges(
    triangles: &[Triangle],
    params: &SharpnessParams,
) -> SharpnessResult<Vec<SharpEdgeFinding>> {
    let index = EdgeIndex::build_manifold(triangles)?;
    Ok(filtered_findings(&index, params))
}

/// Check a triangle list for sharp edges.
///
/// Builds the edge index, rejects non-manifold input, measures every edge
/// against [`SharpnessParams::effective_threshold`] and summarizes the result.
/// An empty triangle list passes.
///
/// # Errors
///
/// Returns [`crate::SharpnessError::ManifoldViolation`] if any edge is not
/// shared by exactly two triangles.
///
/// # Example
///
/// ```
/// use mesh_sharpness::{check_sharp_edges, SharpnessParams};
/// use mesh_types::{regular_tetrahedron, unit_cube};
///
/// let report = check_sharp_edges(&unit_cube(), &SharpnessParams::default()).unwrap();
/// assert!(report.passed);
///
/// // Tetrahedron edges meet at about 70.5 degrees.
/// let report = check_sharp_edges(&regular_tetrahedron(), &SharpnessParams::default()).unwrap();
/// assert_eq!(report.sharp_count(), 6);
/// assert_eq!(report.offending_triangles.len(), 4);
/// ```
pub fn check_sharp_edges(
    triangles: &[Triangle],
    params: &SharpnessParams,
) -> SharpnessResult<SharpnessReport> {
    let threshold = params.effective_threshold();
    info!(
        triangles = triangles.len(),
        threshold,
        fold_filter = ?params.fold_filter,
        "Starting sharp edge analysis"
    );

    if triangles.is_empty() {
        debug!("Empty triangle list, nothing to analyze");
    }

    let index = EdgeIndex::build_manifold(triangles)?;
    let findings = filtered_findings(&index, params);
    let report =
        summarize(findings, threshold).with_mesh_stats(index.triangle_count(), index.edge_count());

    if report.sharp_count() > 0 {
        warn!(
            sharp = report.sharp_count(),
            concave = report.concave_count(),
            convex = report.convex_count(),
            threshold,
            "Sharp edges found"
        );
    }
    if report.degenerate_count() > 0 {
        warn!(
            degenerate = report.degenerate_count(),
            "Edges with degenerate geometry found"
        );
    }

    info!(
        passed = report.passed,
        edges = report.edge_count,
        findings = report.findings.len(),
        offending_triangles = report.offending_triangles.len(),
        "Sharp edge analysis complete"
    );

    Ok(report)
}

fn filtered_findings(index: &EdgeIndex<'_>, params: &SharpnessParams) -> Vec<SharpEdgeFinding> {
    let mut findings = analyze_edges(index, params.effective_threshold());
    findings.retain(|f| params.fold_filter.admits(f));
    findings
}
