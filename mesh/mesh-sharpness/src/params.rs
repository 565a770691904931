//! Parameters for sharp edge analysis.

use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::result::{FindingKind, Fold, SharpEdgeFinding};

/// Threshold used when none is given, in degrees.
pub const DEFAULT_THRESHOLD_DEGREES: f64 = 80.0;

/// Largest accepted threshold, in degrees.
///
/// Larger values would flag edges of 90 degrees and more, which are not
/// folds in the sense this analysis cares about.
pub const MAX_THRESHOLD_DEGREES: f64 = 89.0;

/// Clamp a threshold into `[0, MAX_THRESHOLD_DEGREES]`.
///
/// NaN falls back to [`DEFAULT_THRESHOLD_DEGREES`].
///
/// # Example
///
/// ```
/// use mesh_sharpness::clamp_threshold;
///
/// assert_eq!(clamp_threshold(45.0), 45.0);
/// assert_eq!(clamp_threshold(120.0), 89.0);
/// assert_eq!(clamp_threshold(-5.0), 0.0);
/// assert_eq!(clamp_threshold(f64::NAN), 80.0);
/// ```
#[must_use]
pub fn clamp_threshold(degrees: f64) -> f64 {
    if degrees.is_nan() {
        warn!(
            default = DEFAULT_THRESHOLD_DEGREES,
            "Threshold is NaN, using default"
        );
        return DEFAULT_THRESHOLD_DEGREES;
    }
    degrees.clamp(0.0, MAX_THRESHOLD_DEGREES)
}

/// Which sharp edges to keep in the report.
///
/// Degenerate findings are always kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FoldFilter {
    /// Keep every sharp edge.
    #[default]
    Any,
    /// Keep only convex (ridge) edges.
    ConvexOnly,
    /// Keep only concave (valley) edges.
    ConcaveOnly,
}

impl FoldFilter {
    /// Whether `finding` passes the filter.
    #[must_use]
    pub fn admits(&self, finding: &SharpEdgeFinding) -> bool {
        match (self, finding.kind) {
            (Self::Any, _) | (_, FindingKind::Degenerate(_)) => true,
            (Self::ConvexOnly, FindingKind::Sharp { fold, .. }) => matches!(fold, Fold::Convex),
            (Self::ConcaveOnly, FindingKind::Sharp { fold, .. }) => matches!(fold, Fold::Concave),
        }
    }
}

/// Parameters for sharp edge analysis.
///
/// # Example
///
/// ```
/// use mesh_sharpness::{FoldFilter, SharpnessParams};
///
/// let params = SharpnessParams::default();
/// assert!((params.effective_threshold() - 80.0).abs() < 1e-10);
///
/// // Thresholds above 89 degrees are clamped.
/// let params = SharpnessParams::with_threshold(120.0);
/// assert!((params.effective_threshold() - 89.0).abs() < 1e-10);
///
/// let params = SharpnessParams::default()
///     .threshold(60.0)
///     .fold_filter(FoldFilter::ConcaveOnly);
/// assert_eq!(params.fold_filter, FoldFilter::ConcaveOnly);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SharpnessParams {
    /// Edges whose dihedral angle is below this many degrees are flagged.
    /// Clamped to `[0, 89]` when used.
    pub threshold_degrees: f64,

    /// Which sharp edges to report.
    pub fold_filter: FoldFilter,
}

impl Default for SharpnessParams {
    fn default() -> Self {
        Self {
            threshold_degrees: DEFAULT_THRESHOLD_DEGREES,
            fold_filter: FoldFilter::Any,
        }
    }
}

impl SharpnessParams {
    /// Params with a custom threshold, clamped to `[0, 89]`.
    #[must_use]
    pub fn with_threshold(degrees: f64) -> Self {
        Self::default().threshold(degrees)
    }

    /// Legacy checker selection: 80 degrees, convex edges only.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            threshold_degrees: DEFAULT_THRESHOLD_DEGREES,
            fold_filter: FoldFilter::ConvexOnly,
        }
    }

    /// Set the threshold, clamped to `[0, 89]`.
    #[must_use]
    pub fn threshold(mut self, degrees: f64) -> Self {
        self.threshold_degrees = clamp_threshold(degrees);
        self
    }

    /// Set the fold filter.
    #[must_use]
    pub const fn fold_filter(mut self, filter: FoldFilter) -> Self {
        self.fold_filter = filter;
        self
    }

    /// The threshold actually used by the analysis.
    #[must_use]
    pub fn effective_threshold(&self) -> f64 {
        clamp_threshold(self.threshold_degrees)
    }
}
