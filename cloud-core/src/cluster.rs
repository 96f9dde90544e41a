use crate::attraction::centroid;
use crate::config::GeometryConfig;
use crate::directions::direction_table;
use crate::motion::Element;
use crate::registry::CategoryRegistry;
use crate::sampler::{ClusterShape, random_phase_offsets};
use crate::types::{ClusterKey, Rgba, rgba_from_u8};
use glam::Vec3;
use rand::Rng;

/// One colored group of particles with fixed base positions.
///
/// `base` and `offsets` are sampled together, always have the same
/// length and never change afterwards; animated positions are derived
/// from them.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub key: ClusterKey,
    pub element: Element,
    pub color: Rgba,
    base: Vec<Vec3>,
    offsets: Vec<f32>,
}

impl Cluster {
    /// Samples `count` particles of `shape` around `center`, each with a
    /// random phase offset.
    pub fn sample(
        key: ClusterKey,
        element: Element,
        color: Rgba,
        shape: ClusterShape,
        center: Vec3,
        count: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let base = shape.sample(center, count, rng);
        let offsets = random_phase_offsets(count, rng);
        Self {
            key,
            element,
            color,
            base,
            offsets,
        }
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base
    }

    pub fn phase_offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn base_centroid(&self) -> Option<Vec3> {
        centroid(&self.base)
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ClusterSet {
    pub clusters: Vec<Cluster>,
}

impl ClusterSet {
    /// Samples every cluster of `registry`.
    ///
    /// Categories without a fixed center are placed on the direction
    /// sphere in registry order. A category with palette items gets one
    /// cluster per item, all sharing the category center; otherwise it
    /// gets a single cluster in the category color.
    pub fn sample(registry: &CategoryRegistry, geometry: &GeometryConfig, rng: &mut impl Rng) -> Self {
        let names: Vec<&str> = registry.categories().iter().map(|c| c.name.as_str()).collect();
        let directions = direction_table(&names);
        let shape = geometry.shape();
        let n = geometry.points_per_cluster;

        let mut clusters = Vec::new();
        for cat in registry.categories() {
            let center = cat
                .center
                .unwrap_or_else(|| directions[&cat.name] * geometry.center_distance());

            if cat.has_palette() {
                for item in &cat.items {
                    clusters.push(Cluster::sample(
                        ClusterKey::item(&cat.name, &item.name),
                        cat.element,
                        rgba_from_u8(item.rgb, cat.alpha),
                        shape,
                        center,
                        n,
                        rng,
                    ));
                }
            } else {
                clusters.push(Cluster::sample(
                    ClusterKey::category(&cat.name),
                    cat.element,
                    cat.color,
                    shape,
                    center,
                    n,
                    rng,
                ));
            }
        }

        log::info!(
            "sampled {} clusters from {} categories ({} points each)",
            clusters.len(),
            registry.len(),
            n
        );
        Self { clusters }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
