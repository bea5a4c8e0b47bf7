//! The clustering state threaded through every pass, and the observer
//! contract renderers implement to follow it.

use crate::geometry::{Centroid, Point};
use crate::lloyd;

// ─── ClusterState ───────────────────────────────────────────────────────────

/// Points plus centroids: everything a renderer needs to draw one frame.
///
/// Once initialised, `centroids.len() == k`. After at least one pass every
/// point's `cluster` is in `0..k`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterState {
    /// The data points, in generation order.
    pub points: Vec<Point>,
    /// The current centroids, indexed by cluster.
    pub centroids: Vec<Centroid>,
}

impl ClusterState {
    /// Fresh state over `points` with no centroids.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            centroids: Vec::new(),
        }
    }

    /// Drop the centroids and forget every assignment, keeping positions.
    pub fn soft_reset(&mut self) {
        self.centroids.clear();
        for p in &mut self.points {
            p.cluster = None;
        }
    }

    /// True once every point carries a cluster index.
    pub fn is_assigned(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.cluster.is_some())
    }

    /// Sum of squared distances to assigned centroids.
    pub fn inertia(&self) -> f64 {
        lloyd::inertia(&self.points, &self.centroids)
    }

    /// Point count per cluster index.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        lloyd::cluster_sizes(&self.points, self.centroids.len())
    }
}

// ─── Observer ───────────────────────────────────────────────────────────────

/// Summary handed out when a run ends.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Number of Lloyd passes performed.
    pub iterations: usize,
    /// Inertia of the final state.
    pub inertia: f64,
}

/// Receives state after every published pass.
///
/// Implementations get a shared borrow only; they cannot mutate the
/// controller's state.
pub trait ClusterObserver {
    /// Called with the initial state of a stepwise run, after every tick, after
    /// manual placement and resets, and once at the end of a convergence run.
    fn on_state_update(&mut self, state: &ClusterState);

    /// Called when a run halts because the centroids stopped moving.
    fn on_converged(&mut self, _summary: &RunSummary) {}
}
