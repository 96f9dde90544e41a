//! Animation state and the tick driver.
//!
//! [`AnimationState`] owns the sampled clusters, the global phase and the
//! positions shown on the last tick. A renderer calls
//! [`AnimationState::advance_and_render`] on its own timer; nothing here
//! depends on wall-clock time.
//!
//! The attraction step uses centroids of the *previous* tick's positions
//! (base positions before the first tick). The one-tick lag keeps every
//! cluster's update independent of the others within a tick.

use std::path::Path;

use glam::Vec3;
use rand::Rng;

use crate::{
    attraction::AttractionParams,
    centroid_buffer::ModelCentroids,
    cluster::{Cluster, ClusterSet},
    config::{AnimationConfig, SceneConfig},
    error::{ArgumentError, Result},
    motion::{Element, MotionParams},
    phases,
    registry::{CategoryRegistry, CycleTable},
    types::{ClusterId, ClusterKey, Rgba},
};

/// Everything the per-frame update needs besides the clusters themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dynamics {
    pub motion: MotionParams,
    pub attraction: AttractionParams,
    pub cycle: CycleTable,
}

/// Positions and color of one cluster after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterFrame {
    pub key: ClusterKey,
    pub element: Element,
    pub color: Rgba,
    pub positions: Vec<Vec3>,
}

/// Output of one tick, handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub phase: f32,
    pub clusters: Vec<ClusterFrame>,
}

/// Receives each frame produced by the tick driver.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame);
}

/// Sink that keeps only the most recent frame.
#[derive(Debug, Default)]
pub struct LatestFrame(pub Option<Frame>);

impl FrameSink for LatestFrame {
    fn present(&mut self, frame: &Frame) {
        self.0 = Some(frame.clone());
    }
}

/// Computes the displayed positions of every cluster at `phase`.
///
/// Pure: reads only its arguments. `centroids` is the snapshot the
/// attraction step pulls toward.
pub fn compute_frame(
    clusters: &[Cluster],
    phase: f32,
    centroids: &ModelCentroids,
    dynamics: &Dynamics,
) -> Result<Vec<Vec<Vec3>>, ArgumentError> {
    clusters
        .iter()
        .map(|c| {
            phases::update_cluster(
                c.base_positions(),
                c.phase_offsets(),
                phase,
                &dynamics.motion.motion_for(c.element),
                &dynamics.cycle,
                centroids,
                &dynamics.attraction,
            )
        })
        .collect()
}

#[derive(Debug)]
pub struct AnimationState {
    clusters: Vec<Cluster>,
    /// Positions shown on the last tick, parallel to `clusters`.
    current: Vec<Vec<Vec3>>,
    dynamics: Dynamics,
    phase: f32,
    phase_step: f32,
    tick: u64,
    enabled: bool,
}

impl AnimationState {
    pub fn new(clusters: ClusterSet, dynamics: Dynamics, animation: &AnimationConfig) -> Self {
        let clusters = clusters.clusters;
        let current = clusters.iter().map(|c| c.base_positions().to_vec()).collect();
        Self {
            clusters,
            current,
            dynamics,
            phase: 0.0,
            phase_step: animation.phase_step,
            tick: 0,
            enabled: animation.enabled,
        }
    }

    /// Resolves the registry, samples every cluster and wraps them in a
    /// fresh state at phase 0.
    ///
    /// Palette paths are resolved against `base_dir`.
    pub fn build(scene: &SceneConfig, base_dir: &Path, rng: &mut impl Rng) -> Result<Self> {
        scene.validate()?;
        let registry = CategoryRegistry::from_scene(scene, base_dir)?;
        let clusters = ClusterSet::sample(&registry, &scene.geometry, rng);
        let dynamics = Dynamics {
            motion: scene.motion,
            attraction: scene.attraction,
            cycle: *registry.cycle(),
        };
        log::info!(
            "scene `{}`: {} categories, {} clusters",
            scene.title,
            registry.len(),
            clusters.len()
        );
        Ok(Self::new(clusters, dynamics, &scene.animation))
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_animated(&self) -> bool {
        self.enabled
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn dynamics(&self) -> &Dynamics {
        &self.dynamics
    }

    /// Positions shown on the last tick.
    pub fn positions(&self, id: ClusterId) -> Option<&[Vec3]> {
        self.current.get(id).map(Vec::as_slice)
    }

    /// Centroid of every model over the positions shown on the last tick.
    pub fn model_centroids(&self) -> ModelCentroids {
        phases::centroid_phase(
            self.clusters
                .iter()
                .zip(&self.current)
                .map(|(c, pos)| (c.element, pos.as_slice())),
        )
    }

    /// Advances the clock by one step and recomputes every cluster.
    ///
    /// A frozen scene returns its current frame unchanged.
    pub fn advance(&mut self) -> Result<Frame, ArgumentError> {
        if !self.enabled {
            return Ok(self.snapshot());
        }

        self.phase += self.phase_step;
        self.tick += 1;

        let centroids = self.model_centroids();
        self.current = compute_frame(&self.clusters, self.phase, &centroids, &self.dynamics)?;
        Ok(self.snapshot())
    }

    /// Advances once and hands the resulting frame to `sink`.
    pub fn advance_and_render(&mut self, sink: &mut impl FrameSink) -> Result<(), ArgumentError> {
        let frame = self.advance()?;
        sink.present(&frame);
        Ok(())
    }

    /// Current frame without advancing.
    pub fn snapshot(&self) -> Frame {
        Frame {
            tick: self.tick,
            phase: self.phase,
            clusters: self
                .clusters
                .iter()
                .zip(&self.current)
                .map(|(c, pos)| ClusterFrame {
                    key: c.key.clone(),
                    element: c.element,
                    color: c.color,
                    positions: pos.clone(),
                })
                .collect(),
        }
    }

    /// Rewinds the clock to 0 and shows the base positions again.
    ///
    /// The sampled clusters are kept.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.tick = 0;
        self.current = self
            .clusters
            .iter()
            .map(|c| c.base_positions().to_vec())
            .collect();
    }
}
