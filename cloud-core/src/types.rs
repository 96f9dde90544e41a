use std::fmt;

/// Index of a cluster inside an [`crate::animation::AnimationState`].
///
/// Only meaningful for the state that produced it; clusters are never
/// added or removed after setup, so ids stay stable for its lifetime.
pub type ClusterId = usize;

/// RGBA color with every channel in `[0, 1]`.
pub type Rgba = glam::Vec4;

/// Identifies one cluster: a category, optionally narrowed to one palette item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    pub category: String,
    pub item: Option<String>,
}

impl ClusterKey {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            item: None,
        }
    }

    pub fn item(category: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            item: Some(item.into()),
        }
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{}-{}", self.category, item),
            None => f.write_str(&self.category),
        }
    }
}

/// Converts an 8-bit RGB triple plus alpha into an [`Rgba`].
pub fn rgba_from_u8(rgb: [u8; 3], alpha: f32) -> Rgba {
    Rgba::new(
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
        alpha,
    )
}
