//! # kmeans-core
//!
//! Interactive K-means clustering over a 2D point set — the engine behind an
//! animated clustering visualiser, with no rendering attached.
//!
//! ---
//!
//! ## What the engine does
//!
//! **Seeding** — four ways to choose the starting centroids: a random sample of
//! the points, farthest-first traversal, k-means++ weighted sampling, or
//! centroids placed one click at a time by the user.
//!
//! **The Lloyd pass** — every point moves to its nearest centroid, every
//! centroid moves to the mean of its points. Empty clusters keep their
//! centroid. Centroids stay clamped inside a margin so they never touch the
//! edge of the canvas.
//!
//! **The controller** — drives passes either one tick at a time (an external
//! timer calls [`KMeansController::step`] and the renderer animates each
//! published frame) or in a tight loop until the centroids stop moving.
//!
//! The crate exposes plain data: points, centroids, assignments. Drawing is
//! somebody else's job.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! generate_points → initialize_centroids → lloyd::step ⟲ → has_converged
//!                          ↑                     ↑
//!                  place_centroid         KMeansController
//!                  (manual mode)       (start / step / run_to_convergence)
//!                                                ↓
//!                                        ClusterObserver
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`geometry`] | [`Point`], [`Centroid`] | Euclidean distance, margin clamp |
//! | [`config`] | [`ClusterConfig`], [`InitMethod`] | Cluster count, seeding strategy, limits |
//! | [`data`] | — | Uniform random point clouds |
//! | [`init`] | — | Random, farthest-first and k-means++ seeding |
//! | [`lloyd`] | — | One assignment + update pass, convergence test, inertia |
//! | [`state`] | [`ClusterState`], [`ClusterObserver`] | The state threaded through passes; observer contract |
//! | [`controller`] | [`KMeansController`] | Run lifecycle, resets, manual placement |
//! | [`error`] | [`KMeansError`] | Recoverable error kinds |
//!
//! ## Example
//!
//! ```rust
//! use kmeans_core::{ClusterConfig, InitMethod, KMeansController};
//!
//! let config = ClusterConfig::with_k(3, InitMethod::KMeansPlusPlus);
//! let mut controller = KMeansController::seeded(config, 7).unwrap();
//!
//! controller.start().unwrap();
//! while controller.is_running() {
//!     // A renderer would sleep `controller.interval()` here.
//!     controller.step().unwrap();
//! }
//! assert_eq!(controller.state().centroids.len(), 3);
//! ```
//!
//! ## Features
//!
//! - `serde` — `Serialize`/`Deserialize` on the data model, for shipping
//!   frames to a renderer in another process.
//! - `python-ffi` — PyO3 bindings (`ffi` module).
//!
//! ## License
//!
//! Business Source License 1.1.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod geometry;
pub mod init;
pub mod lloyd;
pub mod state;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use config::{ClusterConfig, InitMethod};
pub use controller::{KMeansController, StepOutcome};
pub use error::{KMeansError, Result};
pub use geometry::{clamp, distance, Centroid, Planar, Point};
pub use init::initialize_centroids;
pub use state::{ClusterObserver, ClusterState, RunSummary};
