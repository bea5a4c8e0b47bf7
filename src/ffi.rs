//! Python FFI bindings via PyO3.
//!
//! Exposes the clustering controller to Python so a notebook or a
//! matplotlib/pygame front end can drive the animation. Python callers poll
//! `points()` / `centroids()` after each call instead of registering
//! observers.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from kmeans_core import KMeans
//!
//! km = KMeans(k=3, init_method="kmeans++", num_points=100, seed=7)
//! km.start()
//! while km.is_running():
//!     iteration, converged = km.step()
//!     draw(km.points(), km.centroids())   # [(x, y, cluster)], [(x, y)]
//! ```

#![allow(non_snake_case)]

use core::time::Duration;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::{ClusterConfig, InitMethod};
use crate::controller::KMeansController;
use crate::error::KMeansError;

fn to_py_err(e: KMeansError) -> PyErr {
    if e.is_configuration() {
        PyValueError::new_err(e.to_string())
    } else {
        PyRuntimeError::new_err(e.to_string())
    }
}

fn parse_method(name: &str) -> PyResult<InitMethod> {
    name.parse::<InitMethod>().map_err(to_py_err)
}

// ── KMeans ────────────────────────────────────────────────────────────────────

/// Interactive K-means session over a random 2D point cloud.
///
/// Args:
///     k:           number of clusters (default 3)
///     init_method: "random", "farthest", "kmeans++" or "manual" (default "random")
///     num_points:  size of the generated cloud (default 100)
///     seed:        optional RNG seed for reproducible runs
#[pyclass(name = "KMeans", unsendable)]
pub struct PyKMeans {
    inner: KMeansController,
}

#[pymethods]
impl PyKMeans {
    /// Create a new session with a freshly generated point cloud.
    #[new]
    #[pyo3(signature = (k=3, init_method="random", num_points=100, seed=None))]
    pub fn new(k: usize, init_method: &str, num_points: usize, seed: Option<u64>) -> PyResult<Self> {
        let config = ClusterConfig {
            k,
            init_method: parse_method(init_method)?,
            num_points,
            ..ClusterConfig::default()
        };
        let inner = match seed {
            Some(s) => KMeansController::seeded(config, s),
            None => KMeansController::new(config),
        }
        .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Number of clusters.
    #[getter]
    pub fn k(&self) -> usize {
        self.inner.config().k
    }

    /// Set the number of clusters. Raises while a run is active.
    #[setter]
    pub fn set_k(&mut self, k: usize) -> PyResult<()> {
        self.inner.set_k(k).map_err(to_py_err)
    }

    /// Seeding strategy name.
    #[getter]
    pub fn init_method(&self) -> &'static str {
        self.inner.config().init_method.as_str()
    }

    /// Set the seeding strategy by name. Raises while a run is active.
    #[setter]
    pub fn set_init_method(&mut self, name: &str) -> PyResult<()> {
        let method = parse_method(name)?;
        self.inner.set_init_method(method).map_err(to_py_err)
    }

    /// Suggested delay between ticks, in seconds.
    #[getter]
    pub fn interval(&self) -> f64 {
        self.inner.interval().as_secs_f64()
    }

    /// Set the suggested delay between ticks, in seconds.
    #[setter]
    pub fn set_interval(&mut self, seconds: f64) -> PyResult<()> {
        let interval = Duration::try_from_secs_f64(seconds)
            .map_err(|e| PyValueError::new_err(format!("interval: {e}")))?;
        self.inner.set_interval(interval).map_err(to_py_err)
    }

    /// Place a centroid at (x, y) in manual mode. Returns the number placed.
    pub fn place_centroid(&mut self, x: f64, y: f64) -> PyResult<usize> {
        self.inner.place_centroid(x, y).map_err(to_py_err)
    }

    /// Begin a stepwise run.
    pub fn start(&mut self) -> PyResult<()> {
        self.inner.start().map_err(to_py_err)
    }

    /// Perform one pass. Returns (iteration, converged).
    pub fn step(&mut self) -> PyResult<(usize, bool)> {
        let outcome = self.inner.step().map_err(to_py_err)?;
        Ok((outcome.iteration, outcome.converged))
    }

    /// Stop the active stepwise run. Returns False if none was active.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel()
    }

    /// True while a stepwise run is active.
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Run passes until convergence. Returns (iterations, inertia).
    pub fn run_to_convergence(&mut self) -> PyResult<(usize, f64)> {
        let summary = self.inner.run_to_convergence().map_err(to_py_err)?;
        Ok((summary.iterations, summary.inertia))
    }

    /// Discard centroids and regenerate the point cloud.
    pub fn reset_data(&mut self) -> PyResult<()> {
        self.inner.reset_data().map_err(to_py_err)
    }

    /// Discard centroids and assignments, keeping point positions.
    pub fn clear_centroids(&mut self) -> PyResult<()> {
        self.inner.clear_centroids().map_err(to_py_err)
    }

    /// Points as a list of (x, y, cluster) tuples; cluster is None if unassigned.
    pub fn points(&self) -> Vec<(f64, f64, Option<usize>)> {
        self.inner
            .state()
            .points
            .iter()
            .map(|p| (p.x, p.y, p.cluster))
            .collect()
    }

    /// Centroids as a list of (x, y) tuples.
    pub fn centroids(&self) -> Vec<(f64, f64)> {
        self.inner
            .state()
            .centroids
            .iter()
            .map(|c| (c.x, c.y))
            .collect()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "KMeans(k={}, init_method='{}', num_points={}, running={})",
            config.k,
            config.init_method,
            self.inner.state().points.len(),
            if self.inner.is_running() { "True" } else { "False" },
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Interactive 2D K-means clustering engine.
#[pymodule]
pub fn kmeans_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKMeans>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "INIT_METHODS",
        InitMethod::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
    )?;
    Ok(())
}
