//! Scene configuration: categories, geometry, motion constants and view hints.
//!
//! A scene is a JSON document mirroring [`SceneConfig`]. Only `categories`
//! is required; every other group falls back to the defaults of the
//! five-colour legend scene.
//!
//! ```json
//! {
//!   "title": "Five-colour Legend",
//!   "categories": [
//!     { "name": "Red",  "element": "fire",  "palette": "data/red.csv" },
//!     { "name": "Gold", "element": "metal", "color": [255, 214, 0] }
//!   ],
//!   "geometry":   { "sphere_radius": 5.0, "cluster_radius": 30.0, "points_per_cluster": 5 },
//!   "animation":  { "phase_step": 0.05, "tick_interval_ms": 30 },
//!   "attraction": { "base_influence": 0.1 },
//!   "cycle": [["wood", "fire"], ["fire", "earth"], ["earth", "metal"],
//!             ["metal", "water"], ["water", "wood"]],
//!   "seed": 7
//! }
//! ```
//!
//! The three built-in scenes are available through [`SceneConfig::preset`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::attraction::AttractionParams;
use crate::error::ConfigError;
use crate::motion::{
    EarthParams, Element, FireParams, MetalParams, MotionParams, WaterParams, WoodParams,
};
use crate::registry::CycleTable;
use crate::sampler::ClusterShape;

fn default_title() -> String {
    "Five-colour Legend".into()
}

fn default_alpha() -> f32 {
    1.0
}

/// Complete scene description.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub motion: MotionParams,
    #[serde(default)]
    pub attraction: AttractionParams,
    /// `(from, to)` tag pairs; the generation cycle when absent.
    #[serde(default)]
    pub cycle: Option<Vec<(String, String)>>,
    /// Fixed seed for sampling; a fresh random scene when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub view: ViewConfig,
}

/// One category as written in a scene file.
///
/// The motion model stays a string here so that an unknown tag surfaces
/// as [`ConfigError::UnknownMotionModel`] rather than a parse failure.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(alias = "model")]
    pub element: String,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default)]
    pub palette: Option<PathBuf>,
    #[serde(default)]
    pub center: Option<[f32; 3]>,
}

/// Where clusters sit and how their points are spread.
///
/// ### Fields
/// - `sphere_radius` - Radius of the inner datum sphere.
/// - `cluster_radius` - Radius of each cluster ball. Cluster centers lie at
///   `sphere_radius + cluster_radius` along their category direction.
/// - `points_per_cluster` - Number of particles sampled per cluster.
/// - `gaussian_sigma` - Use a normal blob with this deviation instead of a
///   uniform ball.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryConfig {
    pub sphere_radius: f32,
    pub cluster_radius: f32,
    pub points_per_cluster: usize,
    pub gaussian_sigma: Option<f32>,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 5.0,
            cluster_radius: 30.0,
            points_per_cluster: 5,
            gaussian_sigma: None,
        }
    }
}

impl GeometryConfig {
    pub fn shape(&self) -> ClusterShape {
        match self.gaussian_sigma {
            Some(sigma) => ClusterShape::Gaussian { sigma },
            None => ClusterShape::Ball {
                radius: self.cluster_radius,
            },
        }
    }

    /// Distance of a sphere-placed cluster center from the origin.
    pub fn center_distance(&self) -> f32 {
        self.sphere_radius + self.cluster_radius
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// `false` freezes the scene at its base positions.
    pub enabled: bool,
    pub phase_step: f32,
    pub tick_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phase_step: 0.05,
            tick_interval_ms: 30,
        }
    }
}

/// Hints for the renderer; the core never reads them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub point_size: f32,
    pub camera_distance: f32,
    pub elevation_deg: f32,
    pub azimuth_deg: f32,
    pub window_size: [f32; 2],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            point_size: 10.0,
            camera_distance: 100.0,
            elevation_deg: 40.0,
            azimuth_deg: 30.0,
            window_size: [1920.0, 1080.0],
        }
    }
}

impl SceneConfig {
    /// Names accepted by [`SceneConfig::preset`].
    pub const PRESETS: [&'static str; 3] = ["legend", "model-test", "tangent"];

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "legend" => Some(Self::legend()),
            "model-test" => Some(Self::model_test()),
            "tangent" => Some(Self::tangent()),
            _ => None,
        }
    }

    /// Five palette-driven categories on the direction sphere, animated and
    /// coupled through the generation cycle.
    pub fn legend() -> Self {
        let cat = |name: &str, element: Element, file: &str| CategoryConfig {
            name: name.into(),
            element: element.as_str().into(),
            color: None,
            alpha: 1.0,
            palette: Some(PathBuf::from("data").join(file)),
            center: None,
        };

        Self {
            title: default_title(),
            categories: vec![
                cat("Cyan", Element::Wood, "cyan.csv"),
                cat("Red", Element::Fire, "red.csv"),
                cat("Yellow", Element::Earth, "yellow.csv"),
                cat("White", Element::Metal, "white.csv"),
                cat("Black", Element::Water, "black.csv"),
            ],
            geometry: GeometryConfig::default(),
            animation: AnimationConfig::default(),
            motion: MotionParams::default(),
            attraction: AttractionParams::default(),
            cycle: None,
            seed: None,
            view: ViewConfig::default(),
        }
    }

    /// The legend palettes spread over a wide sphere and left static.
    pub fn tangent() -> Self {
        let mut scene = Self::legend();
        scene.title = "Five-colour Point Cloud".into();
        for c in &mut scene.categories {
            c.alpha = 0.9;
        }
        scene.geometry = GeometryConfig {
            sphere_radius: 10.0,
            cluster_radius: 100.0,
            ..GeometryConfig::default()
        };
        scene.animation.enabled = false;
        scene.attraction = AttractionParams::disabled();
        scene.view = ViewConfig {
            point_size: 2.0,
            camera_distance: 80.0,
            ..ViewConfig::default()
        };
        scene
    }

    /// One dense blob per model at fixed positions, no palettes and no
    /// coupling, for inspecting the motion models side by side.
    pub fn model_test() -> Self {
        let cat = |name: &str, element: Element, color: [u8; 3], center: [f32; 3]| {
            CategoryConfig {
                name: name.into(),
                element: element.as_str().into(),
                color: Some(color),
                alpha: 1.0,
                palette: None,
                center: Some(center),
            }
        };

        Self {
            title: "Five Elements Motion Test".into(),
            categories: vec![
                cat("Metal", Element::Metal, [255, 214, 0], [5.0, 0.0, 0.0]),
                cat("Wood", Element::Wood, [0, 255, 0], [-5.0, 0.0, 0.0]),
                cat("Water", Element::Water, [0, 128, 255], [0.0, 0.0, 5.0]),
                cat("Fire", Element::Fire, [255, 51, 0], [0.0, 0.0, -5.0]),
                cat("Earth", Element::Earth, [178, 102, 51], [0.0, -5.0, 0.0]),
            ],
            geometry: GeometryConfig {
                points_per_cluster: 200,
                gaussian_sigma: Some(1.5),
                ..GeometryConfig::default()
            },
            animation: AnimationConfig::default(),
            motion: MotionParams {
                fire: FireParams {
                    scale_amp: 0.02,
                    scale_freq: 0.3,
                    jitter_amp: 0.5,
                    jitter_freq: 7.0,
                },
                water: WaterParams {
                    spiral_radius: 2.0,
                    flow_speed: 0.2,
                    drift_amp: 0.8,
                    wave_amp: 0.2,
                    wave_freq: 0.7,
                },
                wood: WoodParams {
                    growth: 1.0,
                    wobble_amp: 0.8,
                    wobble_freq: 2.0,
                    sway: 0.25,
                },
                metal: MetalParams {
                    rot_speed: 0.8,
                    ..MetalParams::default()
                },
                earth: EarthParams {
                    pulse_amp: 0.4,
                    damping: 0.1,
                },
            },
            attraction: AttractionParams::disabled(),
            cycle: None,
            seed: None,
            view: ViewConfig {
                point_size: 6.0,
                camera_distance: 30.0,
                elevation_deg: 12.0,
                azimuth_deg: 45.0,
                ..ViewConfig::default()
            },
        }
    }

    /// Loads and validates a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scene.validate()?;
        Ok(scene)
    }

    /// Checks everything that does not need palette files.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attraction.validate()?;
        self.cycle_table()?;
        for c in &self.categories {
            c.element.parse::<Element>()?;
        }
        Ok(())
    }

    pub fn cycle_table(&self) -> Result<CycleTable, ConfigError> {
        match &self.cycle {
            Some(pairs) => CycleTable::from_pairs(pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))),
            None => Ok(CycleTable::generation()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for name in SceneConfig::PRESETS {
            let scene = SceneConfig::preset(name).unwrap();
            scene.validate().unwrap();
            assert_eq!(scene.categories.len(), 5);
        }
        assert!(SceneConfig::preset("nope").is_none());
    }

    #[test]
    fn legend_assigns_every_model_once() {
        let scene = SceneConfig::legend();
        let mut models: Vec<Element> = scene
            .categories
            .iter()
            .map(|c| c.element.parse().unwrap())
            .collect();
        models.sort();
        assert_eq!(models, Element::ALL.to_vec());
    }

    #[test]
    fn minimal_json_fills_in_defaults() {
        let json = r#"{ "categories": [ { "name": "Red", "model": "fire", "color": [255, 0, 0] } ] }"#;
        let scene: SceneConfig = serde_json::from_str(json).unwrap();

        assert_eq!(scene.title, "Five-colour Legend");
        assert_eq!(scene.categories[0].element, "fire");
        assert_eq!(scene.categories[0].alpha, 1.0);
        assert_eq!(scene.geometry, GeometryConfig::default());
        assert_eq!(scene.motion, MotionParams::default());
        assert!(scene.animation.enabled);
        scene.validate().unwrap();
    }

    #[test]
    fn partial_groups_keep_remaining_defaults() {
        let json = r#"{
            "categories": [],
            "motion": { "fire": { "jitter_amp": 0.0 } },
            "geometry": { "gaussian_sigma": 2.0 }
        }"#;
        let scene: SceneConfig = serde_json::from_str(json).unwrap();

        assert_eq!(scene.motion.fire.jitter_amp, 0.0);
        assert_eq!(scene.motion.fire.scale_freq, FireParams::default().scale_freq);
        assert_eq!(scene.geometry.shape(), ClusterShape::Gaussian { sigma: 2.0 });
        assert_eq!(scene.geometry.points_per_cluster, 5);
    }

    #[test]
    fn validate_reports_unknown_model_and_bad_cycle() {
        let mut scene = SceneConfig::legend();
        scene.categories[0].element = "thunder".into();
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::UnknownMotionModel(t)) if t == "thunder"
        ));

        let mut scene = SceneConfig::legend();
        scene.cycle = Some(vec![("wood".into(), "fire".into())]);
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::MissingCycleEntry(_))
        ));

        let mut scene = SceneConfig::legend();
        scene.attraction.base_influence = 1.0;
        assert!(matches!(
            scene.validate(),
            Err(ConfigError::InvalidInfluence(_))
        ));
    }

    #[test]
    fn save_load_roundtrip_through_a_file() {
        let scene = SceneConfig::model_test();
        let path = std::env::temp_dir().join(format!("cloud-core-scene-{}.json", std::process::id()));
        fs::write(&path, serde_json::to_string_pretty(&scene).unwrap()).unwrap();

        let loaded = SceneConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, scene);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        assert!(matches!(
            SceneConfig::load("/nonexistent/scene.json"),
            Err(ConfigError::Io { .. })
        ));

        let path = std::env::temp_dir().join(format!("cloud-core-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = SceneConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
