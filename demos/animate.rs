//! # Animated K-means in the terminal
//!
//! Drives the stepwise controller on a timer, the way a browser front end
//! would, and draws each published frame as an ASCII scatter plot. Then
//! compares the four seeding strategies with run-to-convergence.
//!
//! ```bash
//! cargo run --example animate
//! RUST_LOG=kmeans_core=debug cargo run --example animate
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use kmeans_core::{
    ClusterConfig, ClusterObserver, ClusterState, InitMethod, KMeansController, RunSummary,
};
use tracing_subscriber::EnvFilter;

const COLS: usize = 48;
const ROWS: usize = 20;
const GLYPHS: [char; 10] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

// ── Display helpers ───────────────────────────────────────────────────────────

fn render(state: &ClusterState) -> String {
    let mut grid = vec![vec![' '; COLS]; ROWS];
    let cell = |x: f64, y: f64| {
        let c = ((x * COLS as f64) as usize).min(COLS - 1);
        let r = ((y * ROWS as f64) as usize).min(ROWS - 1);
        (r, c)
    };
    for p in &state.points {
        let (r, c) = cell(p.x, p.y);
        grid[r][c] = p.cluster.map_or('.', |i| GLYPHS[i % GLYPHS.len()]);
    }
    for ctr in &state.centroids {
        let (r, c) = cell(ctr.x, ctr.y);
        grid[r][c] = '@';
    }
    let border = format!("+{}+", "-".repeat(COLS));
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in grid {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

// ── Renderer ──────────────────────────────────────────────────────────────────

struct TerminalRenderer {
    frames: Rc<RefCell<usize>>,
}

impl ClusterObserver for TerminalRenderer {
    fn on_state_update(&mut self, state: &ClusterState) {
        *self.frames.borrow_mut() += 1;
        println!("\x1b[2J\x1b[H{}", render(state));
        println!("sizes: {:?}   inertia: {:.4}", state.cluster_sizes(), state.inertia());
    }

    fn on_converged(&mut self, summary: &RunSummary) {
        println!(
            "converged after {} passes (inertia {:.4})",
            summary.iterations, summary.inertia
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ── Part 1: stepwise animation ────────────────────────────────────────────

    let mut config = ClusterConfig::with_k(4, InitMethod::Farthest);
    config.interval = Duration::from_millis(400);
    let mut controller = KMeansController::seeded(config, 2026)?;

    let frames = Rc::new(RefCell::new(0));
    controller.subscribe(TerminalRenderer { frames: frames.clone() });

    controller.start()?;
    while controller.is_running() {
        thread::sleep(controller.interval());
        controller.step()?;
    }
    println!("{} frames published", frames.borrow());

    // ── Part 2: manual seeding ────────────────────────────────────────────────

    controller.clear_centroids()?;
    controller.set_init_method(InitMethod::Manual)?;
    for (x, y) in [(0.02, 0.02), (0.98, 0.02), (0.5, 0.98), (0.5, 0.5)] {
        controller.place_centroid(x, y)?;
    }
    let summary = controller.run_to_convergence()?;
    println!("manual seeding: {} passes", summary.iterations);

    // ── Part 3: strategy comparison ───────────────────────────────────────────

    println!("\n{:<10} {:>8} {:>10}", "method", "passes", "inertia");
    for method in [InitMethod::Random, InitMethod::Farthest, InitMethod::KMeansPlusPlus] {
        let mut c = KMeansController::seeded(ClusterConfig::with_k(4, method), 2026)?;
        let s = c.run_to_convergence()?;
        println!("{:<10} {:>8} {:>10.4}", method, s.iterations, s.inertia);
    }

    Ok(())
}
