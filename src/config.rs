//! Clustering configuration: cluster count, seeding strategy, margin and
//! run limits.
//!
//! The defaults reproduce the interactive visualiser this engine drives: three
//! clusters over one hundred points, random seeding, a 50 px margin on a
//! 600 px canvas and a one second animation cadence.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use crate::error::{KMeansError, Result};
use crate::geometry::{distinct_positions, in_unit_square, validate_margin, Point};

/// Convergence threshold on per-axis centroid movement.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Iteration cap for a single run.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Number of points in a freshly generated cloud.
pub const DEFAULT_NUM_POINTS: usize = 100;

/// Boundary clamp fraction: 50 px on a 600 px canvas.
pub const DEFAULT_MARGIN: f64 = 50.0 / 600.0;

// ─── InitMethod ─────────────────────────────────────────────────────────────

/// Centroid seeding strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InitMethod {
    /// Shuffle the points and take the first `k`.
    #[default]
    Random,
    /// Farthest-first traversal.
    Farthest,
    /// Squared-distance weighted sampling.
    #[cfg_attr(feature = "serde", serde(rename = "kmeans++"))]
    KMeansPlusPlus,
    /// Centroids are placed one at a time by the caller.
    Manual,
}

impl InitMethod {
    /// All strategies, in menu order.
    pub const ALL: [InitMethod; 4] = [
        InitMethod::Random,
        InitMethod::Farthest,
        InitMethod::KMeansPlusPlus,
        InitMethod::Manual,
    ];

    /// Canonical lowercase name (`random`, `farthest`, `kmeans++`, `manual`).
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::Farthest => "farthest",
            InitMethod::KMeansPlusPlus => "kmeans++",
            InitMethod::Manual => "manual",
        }
    }

    /// True for strategies the automatic initializer can compute.
    pub fn is_automatic(&self) -> bool {
        !matches!(self, InitMethod::Manual)
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(InitMethod::Random),
            "farthest" | "farthest-first" => Ok(InitMethod::Farthest),
            "kmeans++" | "kmeans_plus_plus" | "k-means++" => Ok(InitMethod::KMeansPlusPlus),
            "manual" => Ok(InitMethod::Manual),
            other => Err(KMeansError::invalid_configuration(format!(
                "unknown init method '{other}' (expected random, farthest, kmeans++ or manual)"
            ))),
        }
    }
}

// ─── ClusterConfig ──────────────────────────────────────────────────────────

/// Parameters read at the start of every run.
///
/// The controller refuses changes while a run is active, so a run always sees
/// one consistent configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterConfig {
    /// Desired number of clusters. Must be in `1..=num_points`.
    pub k: usize,
    /// Seeding strategy.
    pub init_method: InitMethod,
    /// Boundary clamp fraction in [0.0, 0.5).
    pub margin: f64,
    /// Per-axis movement below which a centroid counts as settled.
    pub epsilon: f64,
    /// Maximum passes per run before giving up with `DidNotConverge`.
    pub max_iterations: usize,
    /// Suggested delay between stepwise ticks for an external driver.
    pub interval: Duration,
    /// Size of a generated point cloud.
    pub num_points: usize,
}

impl ClusterConfig {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with a different cluster count and strategy.
    pub fn with_k(k: usize, init_method: InitMethod) -> Self {
        Self {
            k,
            init_method,
            ..Self::default()
        }
    }

    /// Check the parameters that do not depend on the point set.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(KMeansError::invalid_configuration("k must be at least 1"));
        }
        validate_margin(self.margin)?;
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(KMeansError::invalid_configuration(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(KMeansError::invalid_configuration(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }

    /// Check the parameters against a concrete point set.
    pub fn validate_for(&self, points: &[Point]) -> Result<()> {
        self.validate()?;
        validate_k_for(self.k, points)
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 3,
            init_method: InitMethod::Random,
            margin: DEFAULT_MARGIN,
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            interval: Duration::from_millis(1000),
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

/// Validate a cluster count against the number of points available.
pub fn validate_k(k: usize, n_points: usize) -> Result<()> {
    if n_points == 0 {
        return Err(KMeansError::invalid_configuration(
            "clustering requires at least 1 point",
        ));
    }
    if k == 0 {
        return Err(KMeansError::invalid_configuration("k must be at least 1"));
    }
    if k > n_points {
        return Err(KMeansError::invalid_configuration(format!(
            "k={k} exceeds number of points {n_points}"
        )));
    }
    Ok(())
}

/// Validate a cluster count against a concrete point set.
///
/// Beyond the plain count, `k` may not exceed the number of distinct
/// positions: coincident seeds would leave a cluster empty for good.
pub fn validate_k_for(k: usize, points: &[Point]) -> Result<()> {
    validate_k(k, points.len())?;
    let distinct = distinct_positions(points);
    if k > distinct {
        return Err(KMeansError::invalid_configuration(format!(
            "k={k} exceeds number of distinct points {distinct}"
        )));
    }
    Ok(())
}

/// Reject points outside the unit square or with non-finite coordinates.
pub fn validate_points(points: &[Point]) -> Result<()> {
    match points.iter().position(|p| !in_unit_square(p)) {
        Some(i) => Err(KMeansError::invalid_configuration(format!(
            "point {i} at ({}, {}) lies outside [0, 1]²",
            points[i].x, points[i].y
        ))),
        None => Ok(()),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let c = ClusterConfig::default();
        assert_eq!(c.k, 3);
        assert_eq!(c.init_method, InitMethod::Random);
        assert!((c.margin - 50.0 / 600.0).abs() < f64::EPSILON);
        assert!((c.epsilon - 1e-3).abs() < f64::EPSILON);
        assert_eq!(c.max_iterations, 300);
        assert_eq!(c.interval, Duration::from_secs(1));
        assert_eq!(c.num_points, 100);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_init_method_round_trips_through_names() {
        for m in InitMethod::ALL {
            assert_eq!(m.as_str().parse::<InitMethod>().unwrap(), m);
            assert_eq!(m.to_string(), m.as_str());
        }
        assert_eq!("KMeans++".parse::<InitMethod>().unwrap(), InitMethod::KMeansPlusPlus);
        assert!("spectral".parse::<InitMethod>().unwrap_err().is_configuration());
    }

    #[test]
    fn test_only_manual_is_not_automatic() {
        let automatic: Vec<_> = InitMethod::ALL.iter().filter(|m| m.is_automatic()).collect();
        assert_eq!(automatic.len(), 3);
        assert!(!InitMethod::Manual.is_automatic());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let cases = [
            ClusterConfig { k: 0, ..ClusterConfig::default() },
            ClusterConfig { margin: 0.5, ..ClusterConfig::default() },
            ClusterConfig { epsilon: 0.0, ..ClusterConfig::default() },
            ClusterConfig { epsilon: f64::INFINITY, ..ClusterConfig::default() },
            ClusterConfig { max_iterations: 0, ..ClusterConfig::default() },
        ];
        for c in &cases {
            assert!(c.validate().unwrap_err().is_configuration(), "{:?}", c);
        }
    }

    #[test]
    fn test_validate_k_against_point_count() {
        assert!(validate_k(1, 1).is_ok());
        assert!(validate_k(3, 100).is_ok());
        assert!(validate_k(3, 2).is_err());
        assert!(validate_k(0, 2).is_err());
        assert!(validate_k(1, 0).is_err());

        let grid: Vec<Point> = (0..5).map(|i| Point::new(0.2 * i as f64, 0.5)).collect();
        let c = ClusterConfig::with_k(5, InitMethod::Farthest);
        assert!(c.validate_for(&grid).is_ok());
        assert!(c.validate_for(&grid[..4]).is_err());
    }

    #[test]
    fn test_validate_k_counts_distinct_positions() {
        let points = vec![
            Point::new(0.3, 0.3),
            Point::new(0.3, 0.3),
            Point::new(0.7, 0.7),
            Point::new(0.7, 0.7),
        ];
        assert!(validate_k_for(2, &points).is_ok());
        let err = validate_k_for(3, &points).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("distinct"), "{err}");
    }

    #[test]
    fn test_validate_points_rejects_out_of_domain() {
        assert!(validate_points(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_ok());
        assert!(validate_points(&[]).is_ok());
        for bad in [
            Point::new(f64::NAN, 0.5),
            Point::new(0.5, f64::NEG_INFINITY),
            Point::new(1.5, 0.5),
            Point::new(0.5, -0.01),
        ] {
            let points = [Point::new(0.5, 0.5), bad];
            let err = validate_points(&points).unwrap_err();
            assert!(err.is_configuration(), "{bad:?}");
            assert!(err.to_string().contains("point 1"), "{err}");
        }
    }
}
