/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Points, centroids and the two geometric primitives the engine needs.
//!
//! - [`distance`]: Euclidean distance between anything [`Planar`].
//! - [`clamp`]: keeps a centroid inside `[margin, 1 - margin]` on both axes.
//!
//! # Invariants
//!
//! - **Unit domain**: points live in `[0, 1]²`, checked by [`in_unit_square`].
//! - **Margin**: `0 <= margin < 0.5`, checked by [`validate_margin`]. With a
//!   larger margin the lower bound would exceed the upper bound.
//! - **Clamp idempotence**: `clamp(clamp(c, m), m) == clamp(c, m)`.

use crate::error::{KMeansError, Result};

// ─── Planar ─────────────────────────────────────────────────────────────────

/// Anything with a position in the unit square.
///
/// Lets [`distance`] mix points and centroids without conversions.
pub trait Planar {
    /// Horizontal coordinate.
    fn x(&self) -> f64;
    /// Vertical coordinate.
    fn y(&self) -> f64;
}

// ─── Point ──────────────────────────────────────────────────────────────────

/// A data point and the cluster it was last assigned to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate in [0.0, 1.0].
    pub x: f64,
    /// Vertical coordinate in [0.0, 1.0].
    pub y: f64,
    /// Index of the nearest centroid as of the last assignment pass.
    ///
    /// `None` until the first pass runs, and again after a soft reset.
    pub cluster: Option<usize>,
}

impl Point {
    /// Construct an unassigned point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, cluster: None }
    }

    /// Copy of this point assigned to `cluster`.
    pub fn with_cluster(self, cluster: usize) -> Self {
        Self {
            cluster: Some(cluster),
            ..self
        }
    }
}

impl Planar for Point {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

// ─── Centroid ───────────────────────────────────────────────────────────────

/// A cluster centre.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centroid {
    /// Horizontal coordinate in [margin, 1 - margin].
    pub x: f64,
    /// Vertical coordinate in [margin, 1 - margin].
    pub y: f64,
}

impl Centroid {
    /// Construct a centroid. No clamping happens here; see [`clamp`].
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Planar for Centroid {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

impl From<&Point> for Centroid {
    fn from(p: &Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

// ─── Distance ───────────────────────────────────────────────────────────────

/// Squared Euclidean distance. Used for k-means++ weights and inertia.
pub fn squared_distance<A: Planar, B: Planar>(a: &A, b: &B) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}

/// Euclidean distance `sqrt((x1 - x2)² + (y1 - y2)²)`.
pub fn distance<A: Planar, B: Planar>(a: &A, b: &B) -> f64 {
    squared_distance(a, b).sqrt()
}

// ─── Clamp ──────────────────────────────────────────────────────────────────

/// Clamp a centroid into `[margin, 1 - margin]` on both axes.
///
/// Callers must have validated `margin` with [`validate_margin`].
pub fn clamp(centroid: Centroid, margin: f64) -> Centroid {
    let hi = 1.0 - margin;
    Centroid {
        x: centroid.x.max(margin).min(hi),
        y: centroid.y.max(margin).min(hi),
    }
}

/// Reject margins that would collapse or invert the clamp bounds.
pub fn validate_margin(margin: f64) -> Result<()> {
    if !margin.is_finite() || !(0.0..0.5).contains(&margin) {
        return Err(KMeansError::invalid_configuration(format!(
            "margin must be finite and in [0, 0.5), got {margin}"
        )));
    }
    Ok(())
}

/// True when `p` is finite and inside the unit square.
pub fn in_unit_square<P: Planar>(p: &P) -> bool {
    (0.0..=1.0).contains(&p.x()) && (0.0..=1.0).contains(&p.y())
}

/// Number of distinct positions in `points`, ignoring cluster labels.
///
/// Coordinates are compared exactly; `-0.0` is folded into `0.0`.
pub fn distinct_positions(points: &[Point]) -> usize {
    let mut xy: Vec<(f64, f64)> = points.iter().map(|p| (p.x + 0.0, p.y + 0.0)).collect();
    xy.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    xy.dedup_by(|a, b| a == b);
    xy.len()
}

/// True when `c` sits inside the clamp bounds for `margin`.
pub fn within_bounds(c: &Centroid, margin: f64) -> bool {
    let hi = 1.0 - margin;
    (margin..=hi).contains(&c.x) && (margin..=hi).contains(&c.y)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
