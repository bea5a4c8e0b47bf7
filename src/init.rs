/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Centroid seeding.
//!
//! - [`InitMethod::Random`]: shuffle, take the first `k`.
//! - [`InitMethod::Farthest`]: farthest-first traversal.
//! - [`InitMethod::KMeansPlusPlus`]: squared-distance weighted sampling.
//!
//! [`InitMethod::Manual`] is not handled here; manual centroids arrive one at
//! a time through [`crate::controller::KMeansController::place_centroid`].
//!
//! # Invariants
//!
//! - Output length is exactly `k`.
//! - Every centroid is clamped to `[margin, 1 - margin]`.
//! - Farthest-first and k-means++ never select the same point index twice.
//! - Ties in farthest-first go to the lowest point index.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{validate_k_for, InitMethod};
use crate::error::{KMeansError, Result};
use crate::geometry::{clamp, distance, squared_distance, validate_margin, Centroid, Point};

/// Compute `k` starting centroids from `points` using `method`.
///
/// Fails with `InvalidConfiguration` before producing anything when `k` is
/// zero or exceeds the number of distinct points, or when `margin` is invalid.
pub fn initialize_centroids<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    method: InitMethod,
    margin: f64,
    rng: &mut R,
) -> Result<Vec<Centroid>> {
    validate_k_for(k, points)?;
    validate_margin(margin)?;

    let seeds = match method {
        InitMethod::Random => random_indices(points.len(), k, rng),
        InitMethod::Farthest => farthest_first_indices(points, k, rng),
        InitMethod::KMeansPlusPlus => kmeans_plus_plus_indices(points, k, rng),
        InitMethod::Manual => {
            return Err(KMeansError::precondition_failed(
                "manual centroids are placed by the caller, not computed",
            ))
        }
    };

    Ok(seeds
        .into_iter()
        .map(|i| clamp(Centroid::from(&points[i]), margin))
        .collect())
}

// ─── Random ─────────────────────────────────────────────────────────────────

/// Shuffle all indices and keep the first `k`.
fn random_indices<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(rng);
    idx.truncate(k);
    idx
}

// ─── Farthest-first ─────────────────────────────────────────────────────────

/// Farthest-first traversal over point indices.
///
/// Keeps a running `nearest[i]` = distance from point `i` to its closest
/// chosen seed, so each round costs O(n).
pub fn farthest_first_indices<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = points.len();
    let mut chosen = vec![false; n];
    let mut seeds = Vec::with_capacity(k);
    let mut nearest = vec![f64::INFINITY; n];

    let mut next = rng.gen_range(0..n);
    while seeds.len() < k {
        chosen[next] = true;
        seeds.push(next);
        for (i, p) in points.iter().enumerate() {
            let d = distance(p, &points[next]);
            if d < nearest[i] {
                nearest[i] = d;
            }
        }
        if seeds.len() == k {
            break;
        }

        // Strict comparison keeps the first maximum.
        let mut best: Option<(usize, f64)> = None;
        for i in (0..n).filter(|&i| !chosen[i]) {
            if best.map_or(true, |(_, d)| nearest[i] > d) {
                best = Some((i, nearest[i]));
            }
        }
        match best {
            Some((i, _)) => next = i,
            None => break,
        }
    }
    seeds
}

// ─── k-means++ ──────────────────────────────────────────────────────────────

/// k-means++ seeding over point indices.
///
/// Weights are squared distances to the nearest chosen seed. A draw `r` in
/// `[0, total)` selects the first index whose running sum exceeds `r`, so
/// zero-weight (already chosen or coincident) points are never drawn.
pub fn kmeans_plus_plus_indices<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = points.len();
    let mut chosen = vec![false; n];
    let mut seeds = Vec::with_capacity(k);
    let mut weights = vec![f64::INFINITY; n];

    let mut next = rng.gen_range(0..n);
    while seeds.len() < k {
        chosen[next] = true;
        seeds.push(next);
        for (i, p) in points.iter().enumerate() {
            let w = if chosen[i] { 0.0 } else { squared_distance(p, &points[next]) };
            if w < weights[i] {
                weights[i] = w;
            }
        }
        if seeds.len() == k {
            break;
        }

        let total: f64 = weights.iter().sum();
        next = if total > 0.0 && total.is_finite() {
            weighted_draw(&weights, total, rng)
        } else {
            // Every remaining point coincides with a seed.
            let remaining: Vec<usize> = (0..n).filter(|&i| !chosen[i]).collect();
            match remaining.choose(rng) {
                Some(&i) => i,
                None => break,
            }
        };
    }
    seeds
}

/// Cumulative-sum sampling against a draw in `[0, total)`.
fn weighted_draw<R: Rng + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let r = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if cumulative > r {
            return i;
        }
    }
    // Rounding left the running sum just short of r.
    last_positive
}

// ─── Tests ──────────────────────────────────────────────────────────────────
