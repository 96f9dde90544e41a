//! Per-frame phases of the point-cloud animation.
//!
//! One tick runs:
//! 1. [`centroid_phase`] — average the most recent positions of every
//!    cluster per motion model into a [`ModelCentroids`] snapshot.
//! 2. [`motion_phase`] — displace each cluster's base positions with its
//!    motion model.
//! 3. [`attraction_phase`] — pull each cluster toward the snapshot
//!    centroid of the model its own model generates.
//!
//! [`update_cluster`] chains steps 2 and 3 for one cluster.

use glam::Vec3;

use crate::{
    attraction::{AttractionParams, attract},
    centroid_buffer::{CentroidBuffer, ModelCentroids},
    error::ArgumentError,
    motion::{Element, Motion},
    registry::CycleTable,
};

fn check_lengths(base: &[Vec3], offsets: &[f32]) -> Result<(), ArgumentError> {
    if base.len() == offsets.len() {
        Ok(())
    } else {
        Err(ArgumentError::LengthMismatch {
            positions: base.len(),
            offsets: offsets.len(),
        })
    }
}

/// Builds the centroid-by-model snapshot for one tick.
///
/// Every particle counts once, so a model shared by several clusters
/// gets the mean over all of their particles.
///
/// ### Parameters
/// - `clusters` - `(model, positions)` for every cluster, typically the
///   positions shown on the previous tick.
pub fn centroid_phase<'a>(clusters: impl IntoIterator<Item = (Element, &'a [Vec3])>) -> ModelCentroids {
    let mut acc = CentroidBuffer::new();
    for (element, positions) in clusters {
        acc.add_cluster(element, positions);
    }
    acc.freeze()
}

/// Applies a cluster's motion model to its base positions.
///
/// ### Parameters
/// - `base` - Base positions of the cluster; left untouched.
/// - `offsets` - One phase offset per base position.
/// - `phase` - Global animation phase.
/// - `motion` - Motion model and constants of the cluster.
///
/// ### Returns
/// Freshly displaced positions, or [`ArgumentError::LengthMismatch`] if
/// `base` and `offsets` differ in length.
pub fn motion_phase(
    base: &[Vec3],
    offsets: &[f32],
    phase: f32,
    motion: &Motion,
) -> Result<Vec<Vec3>, ArgumentError> {
    check_lengths(base, offsets)?;
    Ok(motion.displace(base, offsets, phase))
}

/// Pulls displaced positions toward the centroid of the successor model.
///
/// Does nothing when attraction is disabled or when the successor model
/// has no particles in `centroids`.
///
/// ### Parameters
/// - `positions` - Displaced positions of one cluster, updated in place.
/// - `offsets` - Phase offsets of the same cluster.
/// - `phase` - Global animation phase.
/// - `element` - Motion model of the cluster.
/// - `cycle` - Successor relation between models.
/// - `centroids` - Snapshot built by [`centroid_phase`] for this tick.
/// - `params` - Attraction strength and breathing rates.
pub fn attraction_phase(
    positions: &mut [Vec3],
    offsets: &[f32],
    phase: f32,
    element: Element,
    cycle: &CycleTable,
    centroids: &ModelCentroids,
    params: &AttractionParams,
) {
    if !params.enabled {
        return;
    }
    if let Some(target) = centroids.get(cycle.next_model(element)) {
        attract(positions, offsets, target, phase, params);
    }
}

/// Computes the displayed positions of one cluster for one tick.
///
/// Pure: the same inputs always produce the same output, and `base` is
/// never modified.
///
/// ### Parameters
/// - `base` - Base positions of the cluster.
/// - `offsets` - One phase offset per base position.
/// - `phase` - Global animation phase.
/// - `motion` - Motion model and constants of the cluster; its model picks
///   the attraction target through `cycle`.
/// - `cycle` - Successor relation between models.
/// - `centroids` - Snapshot built by [`centroid_phase`] for this tick.
/// - `params` - Attraction strength and breathing rates.
pub fn update_cluster(
    base: &[Vec3],
    offsets: &[f32],
    phase: f32,
    motion: &Motion,
    cycle: &CycleTable,
    centroids: &ModelCentroids,
    params: &AttractionParams,
) -> Result<Vec<Vec3>, ArgumentError> {
    let mut positions = motion_phase(base, offsets, phase, motion)?;
    attraction_phase(
        &mut positions,
        offsets,
        phase,
        motion.element(),
        cycle,
        centroids,
        params,
    );
    Ok(positions)
}
