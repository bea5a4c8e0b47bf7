/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Run lifecycle: seeding, stepwise and run-to-convergence execution, resets
//! and manual centroid placement.
//!
//! # Execution modes
//!
//! ```text
//! stepwise:     start() ─► step() ─► step() ─► … ─► converged (run ends)
//!                  │          │                        │
//!               publish    publish                on_converged
//!
//! convergence:  run_to_convergence() ─► loop passes silently ─► publish once
//! ```
//!
//! The cadence between `step()` calls belongs to the caller: a timer, an
//! animation frame, or a plain loop. [`ClusterConfig::interval`] is the
//! suggested delay.
//!
//! # Invariants
//!
//! - At most one run is active per controller.
//! - Configuration and resets are refused while a run is active.
//! - A manual run never starts with fewer than `k` placed centroids.
//! - Observers see complete passes only.

use core::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{validate_k_for, validate_points, ClusterConfig, InitMethod};
use crate::data::generate_points;
use crate::error::{KMeansError, Result};
use crate::geometry::{clamp, validate_margin, Centroid, Point};
use crate::init::initialize_centroids;
use crate::lloyd;
use crate::state::{ClusterObserver, ClusterState, RunSummary};

/// Result of a single stepwise tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// 1-based pass number within the current run.
    pub iteration: usize,
    /// True when this pass moved no centroid by `epsilon` or more. The run
    /// has ended.
    pub converged: bool,
    /// Inertia after this pass.
    pub inertia: f64,
}

/// Book-keeping for an active stepwise run.
#[derive(Clone, Copy, Debug)]
struct ActiveRun {
    iterations: usize,
}

// ─── KMeansController ───────────────────────────────────────────────────────

/// Owns the clustering state and drives Lloyd passes over it.
///
/// Generic over the random source so tests can seed it; [`KMeansController::new`]
/// uses an entropy-seeded [`StdRng`].
pub struct KMeansController<R: Rng = StdRng> {
    config: ClusterConfig,
    state: ClusterState,
    rng: R,
    active: Option<ActiveRun>,
    observers: Vec<Box<dyn ClusterObserver>>,
}

impl KMeansController<StdRng> {
    /// Controller over a freshly generated cloud of `config.num_points` points.
    pub fn new(config: ClusterConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic controller seeded from `seed`.
    pub fn seeded(config: ClusterConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> KMeansController<R> {
    /// Controller over a generated cloud, drawing all randomness from `rng`.
    pub fn with_rng(config: ClusterConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let points = generate_points(config.num_points, &mut rng);
        Self::with_points(config, points, rng)
    }

    /// Controller over caller-supplied points.
    ///
    /// Every point must lie in the unit square. `config.num_points` is
    /// overwritten with `points.len()` so that a full reset regenerates a
    /// cloud of the same size.
    pub fn with_points(mut config: ClusterConfig, points: Vec<Point>, rng: R) -> Result<Self> {
        validate_points(&points)?;
        config.validate_for(&points)?;
        config.num_points = points.len();
        Ok(Self {
            config,
            state: ClusterState::new(points),
            rng,
            active: None,
            observers: Vec::new(),
        })
    }

    // ── Observers ──────────────────────────────────────────────────────────

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe<O: ClusterObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    fn publish(&mut self) {
        let state = &self.state;
        for o in self.observers.iter_mut() {
            o.on_state_update(state);
        }
    }

    fn notify_converged(&mut self, summary: &RunSummary) {
        for o in self.observers.iter_mut() {
            o.on_converged(summary);
        }
    }

    // ── Read accessors ─────────────────────────────────────────────────────

    /// Current configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Current state, borrowed.
    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> ClusterState {
        self.state.clone()
    }

    /// True while a stepwise run is active.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Passes performed so far in the active stepwise run.
    pub fn iteration(&self) -> Option<usize> {
        self.active.map(|r| r.iterations)
    }

    /// Suggested delay between stepwise ticks.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    // ── Configuration ──────────────────────────────────────────────────────

    fn ensure_idle(&self, what: &str) -> Result<()> {
        if self.active.is_some() {
            return Err(KMeansError::precondition_failed(format!(
                "cannot {what} while a run is active"
            )));
        }
        Ok(())
    }

    /// Change the cluster count.
    ///
    /// Centroids beyond the new `k` are dropped, newest first, and points
    /// assigned to them lose their assignment.
    pub fn set_k(&mut self, k: usize) -> Result<()> {
        self.ensure_idle("change k")?;
        validate_k_for(k, &self.state.points)?;
        self.config.k = k;
        self.trim_surplus_centroids();
        Ok(())
    }

    /// Change the seeding strategy.
    ///
    /// Existing centroids are kept; switching to manual resumes them.
    pub fn set_init_method(&mut self, method: InitMethod) -> Result<()> {
        self.ensure_idle("change the init method")?;
        self.config.init_method = method;
        Ok(())
    }

    /// Change the suggested stepwise cadence.
    pub fn set_interval(&mut self, interval: Duration) -> Result<()> {
        self.ensure_idle("change the interval")?;
        self.config.interval = interval;
        Ok(())
    }

    /// Change the boundary margin. Existing centroids are re-clamped.
    pub fn set_margin(&mut self, margin: f64) -> Result<()> {
        self.ensure_idle("change the margin")?;
        validate_margin(margin)?;
        self.config.margin = margin;
        for c in self.state.centroids.iter_mut() {
            *c = clamp(*c, margin);
        }
        Ok(())
    }

    fn trim_surplus_centroids(&mut self) {
        let k = self.config.k;
        if self.state.centroids.len() <= k {
            return;
        }
        debug!(placed = self.state.centroids.len(), k, "dropping surplus centroids");
        self.state.centroids.truncate(k);
        for p in self.state.points.iter_mut() {
            if p.cluster.is_some_and(|c| c >= k) {
                p.cluster = None;
            }
        }
    }

    // ── Manual placement ───────────────────────────────────────────────────

    /// Place one centroid at `(x, y)` in domain coordinates.
    ///
    /// Only valid in manual mode, with no run active and fewer than `k`
    /// centroids placed. The position is clamped on receipt. Returns how many
    /// centroids are now placed.
    pub fn place_centroid(&mut self, x: f64, y: f64) -> Result<usize> {
        self.ensure_idle("place a centroid")?;
        if self.config.init_method != InitMethod::Manual {
            return Err(KMeansError::precondition_failed(format!(
                "centroids can only be placed in manual mode (current: {})",
                self.config.init_method
            )));
        }
        if self.state.centroids.len() >= self.config.k {
            return Err(KMeansError::precondition_failed(format!(
                "all {} centroids are already placed",
                self.config.k
            )));
        }
        if !(x.is_finite() && y.is_finite()) {
            return Err(KMeansError::invalid_configuration(format!(
                "centroid position must be finite, got ({x}, {y})"
            )));
        }
        self.state
            .centroids
            .push(clamp(Centroid::new(x, y), self.config.margin));
        let placed = self.state.centroids.len();
        debug!(placed, k = self.config.k, "manual centroid placed");
        self.publish();
        Ok(placed)
    }

    // ── Seeding ────────────────────────────────────────────────────────────

    fn seed_centroids(&mut self) -> Result<Vec<Centroid>> {
        let k = self.config.k;
        let method = self.config.init_method;
        self.config.validate_for(&self.state.points)?;
        if !method.is_automatic() {
            let placed = self.state.centroids.len();
            if placed < k {
                return Err(KMeansError::precondition_failed(format!(
                    "{method} mode needs {k} centroids, {placed} placed"
                )));
            }
            return Ok(self.state.centroids.clone());
        }
        initialize_centroids(&self.state.points, k, method, self.config.margin, &mut self.rng)
    }

    // ── Stepwise run ───────────────────────────────────────────────────────

    /// Begin a stepwise run and publish the initial state.
    ///
    /// Automatic strategies compute fresh centroids; manual mode resumes the
    /// placed ones.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_idle("start a run")?;
        let centroids = self.seed_centroids()?;
        self.state.centroids = centroids;
        self.active = Some(ActiveRun { iterations: 0 });
        info!(
            k = self.config.k,
            method = %self.config.init_method,
            points = self.state.points.len(),
            "stepwise run started"
        );
        self.publish();
        Ok(())
    }

    /// Perform one pass of the active stepwise run and publish it.
    ///
    /// Ends the run on convergence (notifying `on_converged`), on error, or
    /// with `DidNotConverge` once `max_iterations` passes have been spent.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let Some(run) = self.active else {
            return Err(KMeansError::precondition_failed(
                "no stepwise run is active; call start() first",
            ));
        };

        let (points, centroids) =
            match lloyd::step(&self.state.points, &self.state.centroids, self.config.margin) {
                Ok(next) => next,
                Err(e) => {
                    self.active = None;
                    warn!(error = %e, "stepwise run aborted");
                    return Err(e);
                }
            };

        let iteration = run.iterations + 1;
        let converged = lloyd::has_converged(&self.state.centroids, &centroids, self.config.epsilon);
        self.state = ClusterState { points, centroids };
        let inertia = self.state.inertia();
        debug!(iteration, inertia, converged, "stepwise pass");
        self.publish();

        if converged {
            self.active = None;
            let summary = RunSummary { iterations: iteration, inertia };
            info!(iterations = iteration, inertia, "stepwise run converged");
            self.notify_converged(&summary);
        } else if iteration >= self.config.max_iterations {
            self.active = None;
            warn!(iterations = iteration, "stepwise run hit the iteration cap");
            return Err(KMeansError::DidNotConverge { iterations: iteration });
        } else {
            self.active = Some(ActiveRun { iterations: iteration });
        }

        Ok(StepOutcome {
            iteration,
            converged,
            inertia,
        })
    }

    /// Stop the active stepwise run between ticks, keeping the state reached.
    ///
    /// Returns `false` if no run was active.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(run) => {
                info!(iterations = run.iterations, "stepwise run cancelled");
                true
            }
            None => false,
        }
    }

    // ── Run to convergence ─────────────────────────────────────────────────

    /// Seed, then loop passes without publishing until the centroids settle.
    ///
    /// Publishes the final state once and notifies `on_converged`. When the
    /// cap is reached the state reached so far is kept and published, and
    /// `DidNotConverge` is returned.
    pub fn run_to_convergence(&mut self) -> Result<RunSummary> {
        self.ensure_idle("start a run")?;
        let mut centroids = self.seed_centroids()?;
        let mut points = self.state.points.clone();
        let margin = self.config.margin;
        let epsilon = self.config.epsilon;

        for iteration in 1..=self.config.max_iterations {
            let (next_points, next_centroids) = lloyd::step(&points, &centroids, margin)?;
            let converged = lloyd::has_converged(&centroids, &next_centroids, epsilon);
            points = next_points;
            centroids = next_centroids;

            if converged {
                self.state = ClusterState { points, centroids };
                let summary = RunSummary {
                    iterations: iteration,
                    inertia: self.state.inertia(),
                };
                info!(
                    iterations = summary.iterations,
                    inertia = summary.inertia,
                    method = %self.config.init_method,
                    "run converged"
                );
                self.publish();
                self.notify_converged(&summary);
                return Ok(summary);
            }
        }

        let iterations = self.config.max_iterations;
        self.state = ClusterState { points, centroids };
        warn!(iterations, "run hit the iteration cap without converging");
        self.publish();
        Err(KMeansError::DidNotConverge { iterations })
    }

    // ── Resets ─────────────────────────────────────────────────────────────

    /// Full reset: discard centroids and regenerate the point cloud.
    pub fn reset_data(&mut self) -> Result<()> {
        self.ensure_idle("reset the data")?;
        let points = generate_points(self.config.num_points, &mut self.rng);
        self.state = ClusterState::new(points);
        info!(points = self.config.num_points, "point cloud regenerated");
        self.publish();
        Ok(())
    }

    /// Soft reset: discard centroids and assignments, keep point positions.
    pub fn clear_centroids(&mut self) -> Result<()> {
        self.ensure_idle("clear centroids")?;
        self.state.soft_reset();
        info!("centroids cleared");
        self.publish();
        Ok(())
    }
}

impl<R: Rng> core::fmt::Debug for KMeansController<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KMeansController")
            .field("config", &self.config)
            .field("points", &self.state.points.len())
            .field("centroids", &self.state.centroids.len())
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // ── Helpers ──────────────────────────────────────────────────────────

    #[derive(Default)]
    struct Log {
        updates: usize,
        converged: Vec<RunSummary>,
        last: Option<ClusterState>,
    }

    struct Recorder(Rc<RefCell<Log>>);

    impl ClusterObserver for Recorder {
        fn on_state_update(&mut self, state: &ClusterState) {
            let mut log = self.0.borrow_mut();
            log.updates += 1;
            log.last = Some(state.clone());
        }
        fn on_converged(&mut self, summary: &RunSummary) {
            self.0.borrow_mut().converged.push(*summary);
        }
    }

    fn controller(k: usize, method: InitMethod) -> KMeansController {
        KMeansController::seeded(ClusterConfig::with_k(k, method), 99).unwrap()
    }

    fn recorded(c: &mut KMeansController) -> Rc<RefCell<Log>> {
        let log = Rc::new(RefCell::new(Log::default()));
        c.subscribe(Recorder(log.clone()));
        log
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn test_new_generates_configured_cloud() {
        let c = controller(3, InitMethod::Random);
        assert_eq!(c.state().points.len(), 100);
        assert!(c.state().centroids.is_empty());
        assert!(!c.is_running());
    }

    #[test]
    fn test_with_points_rejects_k_above_point_count() {
        let points = vec![Point::new(0.2, 0.2), Point::new(0.8, 0.8)];
        let err = KMeansController::with_points(
            ClusterConfig::with_k(3, InitMethod::Random),
            points,
            StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_with_points_counts_distinct_positions() {
        let points = vec![
            Point::new(0.3, 0.3),
            Point::new(0.3, 0.3),
            Point::new(0.7, 0.7),
            Point::new(0.7, 0.7),
        ];
        let err = KMeansController::with_points(
            ClusterConfig::with_k(3, InitMethod::Farthest),
            points.clone(),
            StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(err.is_configuration());

        let mut c = KMeansController::with_points(
            ClusterConfig::with_k(2, InitMethod::Farthest),
            points,
            StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert!(c.set_k(3).unwrap_err().is_configuration());
        assert_eq!(c.config().k, 2);
    }

    #[test]
    fn test_with_points_rejects_points_outside_unit_square() {
        for bad in [
            Point::new(f64::NAN, 0.5),
            Point::new(0.5, f64::INFINITY),
            Point::new(1.2, 0.5),
            Point::new(0.5, -0.3),
        ] {
            let points = vec![Point::new(0.2, 0.2), Point::new(0.8, 0.8), bad];
            let err = KMeansController::with_points(
                ClusterConfig::with_k(2, InitMethod::KMeansPlusPlus),
                points,
                StdRng::seed_from_u64(0),
            )
            .unwrap_err();
            assert!(err.is_configuration(), "{bad:?}: {err}");
        }
    }

    // ── Stepwise ─────────────────────────────────────────────────────────

    #[test]
    fn test_stepwise_run_publishes_and_converges() {
        let mut c = controller(3, InitMethod::KMeansPlusPlus);
        let log = recorded(&mut c);

        c.start().unwrap();
        assert!(c.is_running());
        assert_eq!(c.state().centroids.len(), 3);
        assert_eq!(log.borrow().updates, 1, "initial state is published");

        let mut ticks = 0;
        loop {
            let outcome = c.step().unwrap();
            ticks += 1;
            assert_eq!(outcome.iteration, ticks);
            if outcome.converged {
                break;
            }
        }
        assert!(!c.is_running());
        assert_eq!(log.borrow().updates, 1 + ticks);
        assert_eq!(log.borrow().converged.len(), 1);
        assert_eq!(log.borrow().converged[0].iterations, ticks);
        assert!(c.state().is_assigned());
    }

    #[test]
    fn test_step_without_start_is_precondition_failure() {
        let mut c = controller(2, InitMethod::Random);
        assert!(matches!(c.step(), Err(KMeansError::PreconditionFailed { .. })));
    }

    #[test]
    fn test_active_run_rejects_configuration_and_second_run() {
        let mut c = controller(3, InitMethod::Farthest);
        c.start().unwrap();
        for err in [
            c.set_k(4).unwrap_err(),
            c.set_init_method(InitMethod::Random).unwrap_err(),
            c.set_interval(Duration::from_millis(10)).unwrap_err(),
            c.set_margin(0.1).unwrap_err(),
            c.start().unwrap_err(),
            c.run_to_convergence().unwrap_err(),
            c.reset_data().unwrap_err(),
            c.clear_centroids().unwrap_err(),
        ] {
            assert!(matches!(err, KMeansError::PreconditionFailed { .. }), "{err}");
        }
        assert_eq!(c.config().k, 3);
    }

    #[test]
    fn test_cancel_stops_between_ticks() {
        let mut c = controller(4, InitMethod::Random);
        c.start().unwrap();
        c.step().unwrap();
        let before = c.snapshot();
        assert!(c.cancel());
        assert!(!c.is_running());
        assert!(!c.cancel());
        assert_eq!(c.snapshot(), before);
        assert!(c.step().is_err());
    }

    #[test]
    fn test_stepwise_cap_ends_run_with_did_not_converge() {
        let mut config = ClusterConfig::with_k(5, InitMethod::Random);
        config.max_iterations = 1;
        let mut c = KMeansController::seeded(config, 4).unwrap();
        c.start().unwrap();
        match c.step() {
            // A single pass can only settle if the seeds were already means.
            Ok(outcome) => assert!(outcome.converged),
            Err(e) => assert_eq!(e, KMeansError::DidNotConverge { iterations: 1 }),
        }
        assert!(!c.is_running());
    }

    #[test]
    fn test_degenerate_update_ends_run_and_keeps_last_state() {
        let mut c = controller(3, InitMethod::Farthest);
        let log = recorded(&mut c);
        c.start().unwrap();
        // Corrupt a point behind the validation so the next mean is NaN.
        c.state.points[0].x = f64::NAN;
        let centroids = c.state().centroids.clone();

        let err = c.step().unwrap_err();
        assert_eq!(err, KMeansError::DegenerateUpdate { index: 0 });
        assert!(!c.is_running());
        assert_eq!(c.iteration(), None);
        assert_eq!(c.state().centroids, centroids);
        assert!(c.state().points.iter().all(|p| p.cluster.is_none()));
        assert_eq!(log.borrow().updates, 1, "a failed pass is not published");
        assert!(log.borrow().converged.is_empty());
        assert!(matches!(c.step(), Err(KMeansError::PreconditionFailed { .. })));
    }

    // ── Run to convergence ───────────────────────────────────────────────

    #[test]
    fn test_run_to_convergence_publishes_once() {
        let mut c = controller(3, InitMethod::Random);
        let log = recorded(&mut c);
        let summary = c.run_to_convergence().unwrap();
        assert!(summary.iterations >= 1);
        assert_eq!(log.borrow().updates, 1);
        assert_eq!(log.borrow().converged, vec![summary]);
        assert_eq!(log.borrow().last.as_ref(), Some(c.state()));
        assert!((summary.inertia - c.state().inertia()).abs() < 1e-12);
    }

    // ── Manual mode ──────────────────────────────────────────────────────

    #[test]
    fn test_manual_placement_clamps_and_caps_at_k() {
        let mut c = controller(2, InitMethod::Manual);
        assert_eq!(c.place_centroid(0.0, 0.5).unwrap(), 1);
        assert_eq!(c.place_centroid(0.7, 1.0).unwrap(), 2);
        let m = c.config().margin;
        assert_eq!(c.state().centroids[0], Centroid::new(m, 0.5));
        assert_eq!(c.state().centroids[1], Centroid::new(0.7, 1.0 - m));
        assert!(matches!(
            c.place_centroid(0.5, 0.5),
            Err(KMeansError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn test_manual_placement_outside_manual_mode_fails() {
        let mut c = controller(2, InitMethod::Random);
        assert!(c.place_centroid(0.5, 0.5).is_err());
        assert!(c.state().centroids.is_empty());
    }

    #[test]
    fn test_manual_run_resumes_placed_centroids() {
        let mut c = controller(2, InitMethod::Manual);
        c.place_centroid(0.25, 0.25).unwrap();
        c.place_centroid(0.75, 0.75).unwrap();
        c.start().unwrap();
        assert_eq!(
            c.state().centroids,
            vec![Centroid::new(0.25, 0.25), Centroid::new(0.75, 0.75)]
        );
    }

    #[test]
    fn test_lowering_k_drops_surplus_manual_centroids() {
        let mut c = controller(3, InitMethod::Manual);
        for i in 0..3 {
            c.place_centroid(0.2 + 0.2 * i as f64, 0.5).unwrap();
        }
        c.set_k(2).unwrap();
        assert_eq!(c.state().centroids.len(), 2);
        assert!(c.start().is_ok());
    }

    #[test]
    fn test_lowering_k_unassigns_points_of_dropped_clusters() {
        let mut c = controller(5, InitMethod::Farthest);
        c.run_to_convergence().unwrap();
        assert!(c.state().points.iter().any(|p| p.cluster.is_some_and(|i| i >= 2)));

        c.set_init_method(InitMethod::Manual).unwrap();
        c.set_k(2).unwrap();
        let state = c.state();
        assert_eq!(state.centroids.len(), 2);
        for p in &state.points {
            if let Some(i) = p.cluster {
                assert!(i < state.centroids.len(), "point still in dropped cluster {i}");
            }
        }
        // Survivors keep their labels.
        assert!(state.points.iter().any(|p| p.cluster.is_some()));
    }

    #[test]
    fn test_lowering_k_in_automatic_mode_keeps_state_consistent() {
        let mut c = controller(4, InitMethod::Random);
        c.run_to_convergence().unwrap();
        c.set_k(1).unwrap();
        assert_eq!(c.state().centroids.len(), 1);
        assert!(c.state().points.iter().all(|p| p.cluster.map_or(true, |i| i == 0)));
        c.run_to_convergence().unwrap();
        assert!(c.state().points.iter().all(|p| p.cluster == Some(0)));
    }

    // ── Resets ───────────────────────────────────────────────────────────

    #[test]
    fn test_soft_reset_keeps_positions() {
        let mut c = controller(3, InitMethod::Farthest);
        c.run_to_convergence().unwrap();
        let positions: Vec<(f64, f64)> = c.state().points.iter().map(|p| (p.x, p.y)).collect();
        c.clear_centroids().unwrap();
        assert!(c.state().centroids.is_empty());
        assert!(c.state().points.iter().all(|p| p.cluster.is_none()));
        let after: Vec<(f64, f64)> = c.state().points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_full_reset_regenerates_points() {
        let mut c = controller(3, InitMethod::Random);
        c.run_to_convergence().unwrap();
        let before = c.snapshot();
        c.reset_data().unwrap();
        assert_eq!(c.state().points.len(), before.points.len());
        assert_ne!(c.state().points, before.points);
        assert!(c.state().centroids.is_empty());
    }

    // ── Configuration ────────────────────────────────────────────────────

    #[test]
    fn test_set_margin_reclamps_centroids() {
        let mut c = controller(1, InitMethod::Manual);
        c.place_centroid(0.1, 0.9).unwrap();
        c.set_margin(0.2).unwrap();
        assert_eq!(c.state().centroids[0], Centroid::new(0.2, 0.8));
        assert!(c.set_margin(0.5).unwrap_err().is_configuration());
    }

    #[test]
    fn test_set_k_validates_against_points() {
        let mut c = controller(3, InitMethod::Random);
        assert!(c.set_k(0).unwrap_err().is_configuration());
        assert!(c.set_k(101).unwrap_err().is_configuration());
        c.set_k(100).unwrap();
        assert_eq!(c.config().k, 100);
    }
}
