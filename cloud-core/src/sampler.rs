//! Random point clouds around a cluster center.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand_distr::StandardNormal;

/// How the points of one cluster are spread around its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClusterShape {
    /// Uniform by volume inside a solid sphere of the given radius.
    Ball { radius: f32 },
    /// Independent normal noise per axis with the given standard deviation.
    Gaussian { sigma: f32 },
}

impl ClusterShape {
    pub fn sample(&self, center: Vec3, count: usize, rng: &mut impl Rng) -> Vec<Vec3> {
        match *self {
            ClusterShape::Ball { radius } => sample_in_ball(center, count, radius, rng),
            ClusterShape::Gaussian { sigma } => sample_gaussian(center, count, sigma, rng),
        }
    }
}

/// Draws `count` points uniformly distributed inside the ball of `radius`
/// around `center`.
///
/// The distance from the center is `radius * u^(1/3)`: taking the cube
/// root makes the radial density grow with `r²`, which is what uniform
/// volume density requires. Directions come from a uniform `cos θ` and a
/// uniform azimuth.
pub fn sample_in_ball(center: Vec3, count: usize, radius: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let u: f32 = rng.random();
            let cos_theta: f32 = rng.random_range(-1.0..=1.0);
            let theta: f32 = rng.random_range(0.0..TAU);

            let r = radius * u.cbrt();
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            center + Vec3::new(r * sin_theta * theta.cos(), r * sin_theta * theta.sin(), r * cos_theta)
        })
        .collect()
}

/// Draws `count` points with per-axis normal noise of deviation `sigma`.
pub fn sample_gaussian(center: Vec3, count: usize, sigma: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let x: f32 = rng.sample(StandardNormal);
            let y: f32 = rng.sample(StandardNormal);
            let z: f32 = rng.sample(StandardNormal);
            center + Vec3::new(x, y, z) * sigma
        })
        .collect()
}

/// Draws `count` independent phase offsets from `[0, 2π)`.
pub fn random_phase_offsets(count: usize, rng: &mut impl Rng) -> Vec<f32> {
    (0..count).map(|_| rng.random_range(0.0..TAU)).collect()
}
