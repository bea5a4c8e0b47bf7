/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! One Lloyd pass: assign every point to its nearest centroid, then move each
//! centroid to the mean of its points.
//!
//! # Invariants
//!
//! - All points in a pass are assigned against the same centroid snapshot.
//! - Assignment ties go to the lowest centroid index.
//! - An empty cluster keeps its previous centroid instead of producing `NaN`.
//! - Every output centroid is clamped to `[margin, 1 - margin]`.
//! - Inertia is non-increasing across consecutive passes (up to clamping).

use crate::error::{KMeansError, Result};
use crate::geometry::{clamp, distance, squared_distance, Centroid, Planar, Point};

/// Index of the centroid nearest to `p`, lowest index on ties.
///
/// Returns `None` only when `centroids` is empty.
pub fn assign_nearest<P: Planar>(p: &P, centroids: &[Centroid]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in centroids.iter().enumerate() {
        let d = distance(p, c);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Perform one assignment + update pass.
///
/// Returns fresh vectors; the inputs are not modified. Fails with
/// `PreconditionFailed` when there are no centroids and with
/// `DegenerateUpdate` if an updated centroid is not finite.
pub fn step(
    points: &[Point],
    centroids: &[Centroid],
    margin: f64,
) -> Result<(Vec<Point>, Vec<Centroid>)> {
    if centroids.is_empty() {
        return Err(KMeansError::precondition_failed(
            "a Lloyd pass needs at least one centroid",
        ));
    }
    let k = centroids.len();

    // ── Assignment ─────────────────────────────────────────────────────────
    let mut updated_points = Vec::with_capacity(points.len());
    let mut sums = vec![(0.0_f64, 0.0_f64, 0_usize); k];
    for p in points {
        // Non-empty centroids always yield an index.
        let i = assign_nearest(p, centroids).unwrap_or(0);
        let s = &mut sums[i];
        s.0 += p.x;
        s.1 += p.y;
        s.2 += 1;
        updated_points.push(p.with_cluster(i));
    }

    // ── Update ─────────────────────────────────────────────────────────────
    let mut updated_centroids = Vec::with_capacity(k);
    for (index, (&(sx, sy, count), prev)) in sums.iter().zip(centroids).enumerate() {
        let raw = if count == 0 {
            *prev
        } else {
            let n = count as f64;
            Centroid::new(sx / n, sy / n)
        };
        // Checked before clamping: f64::max swallows NaN.
        if !raw.is_finite() {
            return Err(KMeansError::DegenerateUpdate { index });
        }
        updated_centroids.push(clamp(raw, margin));
    }

    Ok((updated_points, updated_centroids))
}

/// True when every centroid moved less than `epsilon` on both axes.
///
/// Sequences of different length never count as converged.
pub fn has_converged(old: &[Centroid], new: &[Centroid], epsilon: f64) -> bool {
    old.len() == new.len()
        && old
            .iter()
            .zip(new)
            .all(|(a, b)| (a.x - b.x).abs() < epsilon && (a.y - b.y).abs() < epsilon)
}

/// Sum of squared distances from each assigned point to its centroid.
///
/// Unassigned points and out-of-range assignments contribute nothing.
pub fn inertia(points: &[Point], centroids: &[Centroid]) -> f64 {
    points
        .iter()
        .filter_map(|p| p.cluster.and_then(|i| centroids.get(i)).map(|c| squared_distance(p, c)))
        .sum()
}

/// Number of points assigned to each of the `k` clusters.
pub fn cluster_sizes(points: &[Point], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for i in points.iter().filter_map(|p| p.cluster) {
        if let Some(s) = sizes.get_mut(i) {
            *s += 1;
        }
    }
    sizes
}

// ─── Tests ──────────────────────────────────────────────────────────────────
