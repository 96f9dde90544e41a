use crate::motion::Element;
use glam::Vec3;

/// A temporary buffer that accumulates particle positions per motion model.
///
/// For each [`Element`], this buffer stores:
///
/// - The sum of all positions added for that model.
/// - The number of positions that were added.
///
/// This lets one pass over every cluster produce the centroid of each
/// model, no matter how many clusters share it. Once filled, the buffer
/// is frozen into an immutable [`ModelCentroids`] snapshot for the tick.
#[derive(Debug, Default)]
pub struct CentroidBuffer {
    /// Accumulated positions, indexed by [`Element::index`].
    sum: [Vec3; 5],
    /// Number of contributions per model.
    count: [u32; 5],
}

impl CentroidBuffer {
    /// Creates an empty buffer with every sum at `Vec3::ZERO` and every
    /// count at `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one particle position for the given model.
    #[inline]
    pub fn add(&mut self, element: Element, pos: Vec3) {
        let i = element.index();
        self.sum[i] += pos;
        self.count[i] += 1;
    }

    /// Adds every position of one cluster for the given model.
    pub fn add_cluster(&mut self, element: Element, positions: &[Vec3]) {
        for &p in positions {
            self.add(element, p);
        }
    }

    /// Returns the mean position for a model, or `None` if nothing was
    /// added for it.
    #[inline]
    pub fn mean(&self, element: Element) -> Option<Vec3> {
        let i = element.index();
        let c = self.count[i];
        if c == 0 {
            None
        } else {
            Some(self.sum[i] / c as f32)
        }
    }

    /// Freezes the current means into a snapshot.
    pub fn freeze(&self) -> ModelCentroids {
        ModelCentroids {
            centers: Element::ALL.map(|e| self.mean(e)),
        }
    }
}

/// Centroid of every motion model for one tick.
///
/// Built once per tick and only read afterwards; a model with no
/// particles has no entry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelCentroids {
    centers: [Option<Vec3>; 5],
}

impl ModelCentroids {
    #[inline]
    pub fn get(&self, element: Element) -> Option<Vec3> {
        self.centers[element.index()]
    }
}
