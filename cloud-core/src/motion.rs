//! The five motion models and their numeric constants.
//!
//! [`Element`] is the bare tag a category is assigned. [`Motion`] pairs a
//! tag with its constant bundle and does the actual displacement. Adding a
//! sixth model means adding a variant to both and a match arm here.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::attraction::centroid;
use crate::error::ConfigError;

/// Motion-model tag of a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// All tags, in generation-cycle order starting at wood.
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// Dense index in `0..5`, matching the position in [`Element::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }

    /// Successor in the generation cycle wood → fire → earth → metal → water → wood.
    pub fn generates(self) -> Element {
        Element::ALL[(self.index() + 1) % Element::ALL.len()]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Element::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ConfigError::UnknownMotionModel(tag.to_owned()))
    }
}

/// Expansion about the cluster centroid plus per-particle vertical flicker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireParams {
    pub scale_amp: f32,
    pub scale_freq: f32,
    pub jitter_amp: f32,
    pub jitter_freq: f32,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            scale_amp: 0.08,
            scale_freq: 0.5,
            jitter_amp: 1.2,
            jitter_freq: 5.0,
        }
    }
}

/// Horizontal vortex in the x–z plane plus a small vertical wave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    pub spiral_radius: f32,
    pub flow_speed: f32,
    pub drift_amp: f32,
    pub wave_amp: f32,
    pub wave_freq: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            spiral_radius: 5.0,
            flow_speed: 1.2,
            drift_amp: 0.8,
            wave_amp: 0.2,
            wave_freq: 1.0,
        }
    }
}

/// Vertical growth with a per-particle wobble and a slight horizontal sway.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WoodParams {
    pub growth: f32,
    pub wobble_amp: f32,
    pub wobble_freq: f32,
    pub sway: f32,
}

impl Default for WoodParams {
    fn default() -> Self {
        Self {
            growth: 5.5,
            wobble_amp: 1.2,
            wobble_freq: 2.0,
            sway: 0.25,
        }
    }
}

/// Points riding a breathing ring in the x–z plane around their base.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetalParams {
    pub ring_radius: f32,
    pub ring_amp: f32,
    pub rot_speed: f32,
}

impl Default for MetalParams {
    fn default() -> Self {
        Self {
            ring_radius: 2.5,
            ring_amp: 0.3,
            rot_speed: 1.0,
        }
    }
}

/// Slow radial pulsation of every position about the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthParams {
    pub pulse_amp: f32,
    pub damping: f32,
}

impl Default for EarthParams {
    fn default() -> Self {
        Self {
            pulse_amp: 0.8,
            damping: 0.1,
        }
    }
}

/// One constant bundle per model, as stored in a scene file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub fire: FireParams,
    pub water: WaterParams,
    pub wood: WoodParams,
    pub metal: MetalParams,
    pub earth: EarthParams,
}

impl MotionParams {
    /// Picks the bundle for `element`.
    pub fn motion_for(&self, element: Element) -> Motion {
        match element {
            Element::Fire => Motion::Fire(self.fire),
            Element::Water => Motion::Water(self.water),
            Element::Wood => Motion::Wood(self.wood),
            Element::Metal => Motion::Metal(self.metal),
            Element::Earth => Motion::Earth(self.earth),
        }
    }
}

/// A motion model together with its constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Fire(FireParams),
    Water(WaterParams),
    Wood(WoodParams),
    Metal(MetalParams),
    Earth(EarthParams),
}

impl Motion {
    pub fn element(&self) -> Element {
        match self {
            Motion::Fire(_) => Element::Fire,
            Motion::Water(_) => Element::Water,
            Motion::Wood(_) => Element::Wood,
            Motion::Metal(_) => Element::Metal,
            Motion::Earth(_) => Element::Earth,
        }
    }

    /// Displaces `base` for the given global `phase`.
    ///
    /// `offsets` must be as long as `base`; callers check this through
    /// [`crate::phases::motion_phase`].
    pub(crate) fn displace(&self, base: &[Vec3], offsets: &[f32], phase: f32) -> Vec<Vec3> {
        debug_assert_eq!(base.len(), offsets.len());

        match *self {
            Motion::Fire(p) => {
                let Some(c) = centroid(base) else {
                    return Vec::new();
                };
                // c + (b - c)·(1 + g), written so that g = 0 returns b bit-for-bit.
                let growth = p.scale_amp * (phase * p.scale_freq).sin();
                base.iter()
                    .zip(offsets)
                    .map(|(&b, &o)| {
                        let mut q = b + (b - c) * growth;
                        q.z += p.jitter_amp * (p.jitter_freq * phase + o).sin();
                        q
                    })
                    .collect()
            }

            Motion::Water(p) => base
                .iter()
                .zip(offsets)
                .map(|(&b, &o)| {
                    let phi = phase + o;
                    let swirl = p.flow_speed * phi;
                    let drift = 0.5 * phase + phi;
                    Vec3::new(
                        b.x + p.spiral_radius * swirl.cos() + p.drift_amp * drift.sin(),
                        b.y + p.wave_amp * (p.wave_freq * phase + phi).sin(),
                        b.z + p.spiral_radius * swirl.sin() + p.drift_amp * drift.cos(),
                    )
                })
                .collect(),

            Motion::Wood(p) => {
                let rise = p.growth * (0.5 * phase).sin();
                base.iter()
                    .zip(ramp(base.len()))
                    .map(|(&b, rho)| {
                        let sway = 0.5 * phase + rho;
                        Vec3::new(
                            b.x + p.sway * sway.sin(),
                            b.y + rise + p.wobble_amp * (p.wobble_freq * phase + rho).sin(),
                            b.z + p.sway * sway.cos(),
                        )
                    })
                    .collect()
            }

            Motion::Metal(p) => {
                let radius = p.ring_radius + p.ring_amp * phase.sin();
                base.iter()
                    .zip(ramp(base.len()))
                    .map(|(&b, rho)| {
                        let theta = p.rot_speed * phase + rho;
                        Vec3::new(b.x + radius * theta.cos(), b.y, b.z + radius * theta.sin())
                    })
                    .collect()
            }

            Motion::Earth(p) => {
                let pulse = p.pulse_amp * (0.5 * phase).sin();
                let factor = 1.0 + pulse * p.damping;
                base.iter().map(|&b| b * factor).collect()
            }
        }
    }
}

/// Evenly spaced per-particle angles over `[0, 2π)`.
fn ramp(n: usize) -> impl Iterator<Item = f32> {
    (0..n).map(move |i| TAU * i as f32 / n as f32)
}
