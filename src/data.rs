//! Uniform random point clouds.

use rand::Rng;

use crate::geometry::Point;

/// Generate `n` unassigned points uniformly distributed over `[0, 1)²`.
pub fn generate_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}
