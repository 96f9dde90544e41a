//! Cross-model attraction: each cluster drifts toward the centroid of the
//! model that its own model generates.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Strength and breathing rates of the attraction pull.
///
/// ### Fields
/// - `enabled` - Whether the pull is applied at all.
/// - `base_influence` - Largest fraction of the remaining distance a
///   particle may cover in one tick. Must lie in `[0, 1)`.
/// - `global_freq` - Rate of the slow breathing shared by every particle.
/// - `particle_freq` - Rate of the per-particle breathing, desynchronized
///   by each particle's phase offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractionParams {
    pub enabled: bool,
    pub base_influence: f32,
    pub global_freq: f32,
    pub particle_freq: f32,
}

impl Default for AttractionParams {
    fn default() -> Self {
        Self {
            enabled: true,
            base_influence: 0.1,
            global_freq: 0.2,
            particle_freq: 0.3,
        }
    }
}

impl AttractionParams {
    /// Same constants, but switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..1.0).contains(&self.base_influence) {
            Ok(())
        } else {
            Err(ConfigError::InvalidInfluence(self.base_influence))
        }
    }

    /// Pull fraction for one particle, always within `[0, base_influence]`.
    #[inline]
    pub fn influence(&self, phase: f32, offset: f32) -> f32 {
        let global = 0.5 * (1.0 + (phase * self.global_freq).sin());
        let local = 0.5 * (1.0 + (phase * self.particle_freq + offset).sin());
        self.base_influence * global * local
    }
}

/// Mean of a set of points, or `None` when there are none.
pub fn centroid(points: &[Vec3]) -> Option<Vec3> {
    if points.is_empty() {
        None
    } else {
        Some(points.iter().copied().sum::<Vec3>() / points.len() as f32)
    }
}

/// Moves every particle a breathing fraction of the way toward `target`.
///
/// Each particle covers `influence(phase, offset)` of its remaining
/// distance, so it never reaches or passes the target in one call.
pub fn attract(
    positions: &mut [Vec3],
    offsets: &[f32],
    target: Vec3,
    phase: f32,
    params: &AttractionParams,
) {
    for (p, &o) in positions.iter_mut().zip(offsets) {
        let k = params.influence(phase, o);
        *p += (target - *p) * k;
    }
}
