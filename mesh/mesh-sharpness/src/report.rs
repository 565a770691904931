//! Pass/fail report built from analysis findings.

use hashbrown::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::result::{FindingKind, Fold, SharpEdgeFinding};

/// Outcome of a sharp edge check.
///
/// # Example
///
/// ```
/// use mesh_sharpness::summarize;
///
/// let report = summarize(Vec::new(), 80.0);
/// assert!(report.passed);
/// assert_eq!(
///     report.summary(),
///     "Shape passed! Edges aren't too sharp. (All are greater than 80 degrees)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SharpnessReport {
    /// True iff there are no findings.
    pub passed: bool,
    /// Threshold the findings were measured against, in degrees.
    pub threshold: f64,
    /// Every finding, in edge order.
    pub findings: Vec<SharpEdgeFinding>,
    /// Triangles touching a finding, deduplicated in order of first appearance.
    pub offending_triangles: Vec<usize>,
    /// Number of triangles checked.
    pub triangle_count: usize,
    /// Number of distinct edges checked.
    pub edge_count: usize,
}

impl SharpnessReport {
    /// Attach mesh statistics.
    #[must_use]
    pub fn with_mesh_stats(mut self, triangle_count: usize, edge_count: usize) -> Self {
        self.triangle_count = triangle_count;
        self.edge_count = edge_count;
        self
    }

    /// Number of edges below the threshold.
    #[must_use]
    pub fn sharp_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_sharp()).count()
    }

    /// Number of edges that could not be measured.
    #[must_use]
    pub fn degenerate_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_degenerate()).count()
    }

    /// Number of sharp concave edges.
    #[must_use]
    pub fn concave_count(&self) -> usize {
        self.fold_count(Fold::Concave)
    }

    /// Number of sharp convex edges.
    #[must_use]
    pub fn convex_count(&self) -> usize {
        self.fold_count(Fold::Convex)
    }

    fn fold_count(&self, fold: Fold) -> usize {
        self.findings
            .iter()
            .filter(|f| f.fold() == Some(fold))
            .count()
    }

    /// One-line pass/fail status.
    ///
    /// A report failing only on degenerate edges states their count instead.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed {
            format!(
                "Shape passed! Edges aren't too sharp. (All are greater than {} degrees)",
                self.threshold
            )
        } else if self.sharp_count() > 0 {
            format!(
                "ERROR: {} edges are too sharp! (Are less than {} degrees)",
                self.sharp_count(),
                self.threshold
            )
        } else {
            self.degenerate_summary()
        }
    }

    fn degenerate_summary(&self) -> String {
        format!(
            "ERROR: {} edges have degenerate geometry! (Angle could not be measured)",
            self.degenerate_count()
        )
    }

    /// One line per finding.
    #[must_use]
    pub fn detail_lines(&self) -> Vec<String> {
        self.findings
            .iter()
            .map(|finding| {
                let [t1, t2] = finding.triangles;
                match finding.kind {
                    FindingKind::Sharp {
                        dihedral_angle,
                        fold,
                    } => format!(
                        "{dihedral_angle:.2} degree angle found! (Angle less than {} degrees)  /  Triangle Indices: {t1}, {t2}  /  {fold}",
                        self.threshold
                    ),
                    FindingKind::Degenerate(reason) => format!(
                        "Degenerate edge {}: {reason}  /  Triangle Indices: {t1}, {t2}",
                        finding.edge
                    ),
                }
            })
            .collect()
    }
}

impl std::fmt::Display for SharpnessReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.detail_lines() {
            writeln!(f, "{line}")?;
        }
        if !self.findings.is_empty() {
            writeln!(f)?;
        }
        writeln!(f, "{}", self.summary())?;
        if self.sharp_count() > 0 && self.degenerate_count() > 0 {
            writeln!(f, "{}", self.degenerate_summary())?;
        }
        Ok(())
    }
}

/// Triangle indices of every finding, deduplicated in order of first appearance.
#[must_use]
pub fn offending_triangle_indices(findings: &[SharpEdgeFinding]) -> Vec<usize> {
    let mut seen = HashSet::new();
    findings
        .iter()
        .flat_map(|f| f.triangles)
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Aggregate findings into a report.
///
/// The report passes iff `findings` is empty, so degenerate geometry fails
/// the check as well as sharp edges.
#[must_use]
pub fn summarize(findings: Vec<SharpEdgeFinding>, threshold: f64) -> SharpnessReport {
    let offending_triangles = offending_triangle_indices(&findings);
    SharpnessReport {
        passed: findings.is_empty(),
        threshold,
        findings,
        offending_triangles,
        ..SharpnessReport::default()
    }
}
