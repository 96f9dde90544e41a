use std::fs;
use std::path::{Path, PathBuf};

use cloud_core::animation::AnimationState;
use cloud_core::attraction::centroid;
use cloud_core::config::{CategoryConfig, GeometryConfig, SceneConfig};
use cloud_core::error::{DataFormatError, Error};
use cloud_core::motion::Element;
use cloud_core::types::ClusterKey;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Five single-color categories on the direction sphere, one per model.
fn five_category_scene(points: usize) -> SceneConfig {
    let cat = |name: &str, element: Element, color: [u8; 3]| CategoryConfig {
        name: name.into(),
        element: element.as_str().into(),
        color: Some(color),
        alpha: 1.0,
        palette: None,
        center: None,
    };

    let mut scene = SceneConfig::legend();
    scene.categories = vec![
        cat("Cyan", Element::Wood, [0, 255, 255]),
        cat("Red", Element::Fire, [255, 0, 0]),
        cat("Yellow", Element::Earth, [255, 255, 0]),
        cat("White", Element::Metal, [255, 255, 255]),
        cat("Black", Element::Water, [0, 0, 0]),
    ];
    scene.geometry = GeometryConfig {
        points_per_cluster: points,
        ..GeometryConfig::default()
    };
    scene
}

/// Scratch directory unique to this test process and `name`.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cloud-core-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ==================================================================================
// End-to-end animation
// ==================================================================================

#[test]
fn ten_ticks_of_five_clusters_stay_finite_and_bounded() {
    let scene = five_category_scene(5);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut state = AnimationState::build(&scene, Path::new("."), &mut rng).unwrap();

    let fire_id = state
        .clusters()
        .iter()
        .position(|c| c.element == Element::Fire)
        .unwrap();
    let fire_base = state.clusters()[fire_id].base_centroid().unwrap();

    // Base points lie within sphere_radius + 2·cluster_radius of the origin;
    // fire and earth stretch that by under 10%, plus the fire jitter. The
    // fire centroid can move by its jitter plus a base_influence fraction
    // of the widest possible gap.
    let extent = (scene.geometry.sphere_radius + 2.0 * scene.geometry.cluster_radius) * 1.1
        + scene.motion.fire.jitter_amp;
    let bound = scene.motion.fire.jitter_amp + scene.attraction.base_influence * 2.0 * extent;

    for tick in 1..=10 {
        let frame = state.advance().unwrap();
        assert_eq!(frame.tick, tick);
        assert_eq!(frame.clusters.len(), 5);

        for c in &frame.clusters {
            assert_eq!(c.positions.len(), 5, "{} has wrong shape", c.key);
            assert!(c.positions.iter().all(|p| p.is_finite()), "{} has NaN/Inf", c.key);
        }

        let fire = centroid(&frame.clusters[fire_id].positions).unwrap();
        assert!(
            fire.distance(fire_base) <= bound,
            "tick {tick}: fire centroid drifted {} > {bound}",
            fire.distance(fire_base)
        );
    }
}

#[test]
fn same_seed_gives_the_same_animation() {
    let scene = five_category_scene(8);
    let mut a = AnimationState::build(&scene, Path::new("."), &mut StdRng::seed_from_u64(9)).unwrap();
    let mut b = AnimationState::build(&scene, Path::new("."), &mut StdRng::seed_from_u64(9)).unwrap();

    for _ in 0..5 {
        assert_eq!(a.advance().unwrap(), b.advance().unwrap());
    }
}

#[test]
fn frame_colors_come_from_the_categories() {
    let scene = five_category_scene(3);
    let mut rng = StdRng::seed_from_u64(1);
    let state = AnimationState::build(&scene, Path::new("."), &mut rng).unwrap();

    let frame = state.snapshot();
    let red = frame
        .clusters
        .iter()
        .find(|c| c.key == ClusterKey::category("Red"))
        .unwrap();
    assert_eq!(red.color.to_array(), [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(red.element, Element::Fire);
}

// ==================================================================================
// Palette-driven scenes
// ==================================================================================

#[test]
fn palette_rows_become_clusters() {
    let dir = scratch_dir("palette");
    fs::write(dir.join("red.csv"), "Name,R,G,B\n Crimson ,220,20,60\nVermilion,227,66,52\n").unwrap();
    fs::write(dir.join("cyan.csv"), "Name,R,G,B\nTeal,0,128,128\n").unwrap();

    let mut scene = five_category_scene(4);
    scene.categories.truncate(2);
    scene.categories[0].palette = Some("cyan.csv".into());
    scene.categories[0].color = None;
    scene.categories[1].palette = Some("red.csv".into());

    let mut rng = StdRng::seed_from_u64(3);
    let state = AnimationState::build(&scene, &dir, &mut rng).unwrap();
    let keys: Vec<String> = state.clusters().iter().map(|c| c.key.to_string()).collect();
    assert_eq!(keys, vec!["Cyan-Teal", "Red-Crimson", "Red-Vermilion"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_palette_row_aborts_the_load() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("red.csv"), "Name,R,G,B\nCrimson,220,20,60\nBroken,220,x,60\n").unwrap();

    let mut scene = five_category_scene(4);
    scene.categories[1].palette = Some("red.csv".into());

    let mut rng = StdRng::seed_from_u64(3);
    let err = AnimationState::build(&scene, &dir, &mut rng).unwrap_err();
    match err {
        Error::Data(DataFormatError::BadChannel { category, row, .. }) => {
            assert_eq!(category, "Red");
            assert_eq!(row, 2);
        }
        other => panic!("expected a palette error, got {other}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn repeated_palette_item_aborts_the_load() {
    let dir = scratch_dir("duplicate");
    fs::write(dir.join("red.csv"), "Name,R,G,B\nCrimson,220,20,60\n\n\"Crimson\",1,2,3\n").unwrap();

    let mut scene = five_category_scene(4);
    scene.categories[1].palette = Some("red.csv".into());

    let mut rng = StdRng::seed_from_u64(3);
    let err = AnimationState::build(&scene, &dir, &mut rng).unwrap_err();
    match err {
        Error::Data(DataFormatError::DuplicateName { category, row, name }) => {
            assert_eq!(category, "Red");
            assert_eq!(row, 3);
            assert_eq!(name, "Crimson");
        }
        other => panic!("expected a duplicate item error, got {other}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_model_aborts_the_build() {
    let mut scene = five_category_scene(4);
    scene.categories[2].element = "plasma".into();

    let mut rng = StdRng::seed_from_u64(3);
    let err = AnimationState::build(&scene, Path::new("."), &mut rng).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err}");
}

#[test]
fn shipped_legend_palettes_load() {
    // Palettes live in the workspace `data/` directory.
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let scene = SceneConfig::legend();
    let mut rng = StdRng::seed_from_u64(4);
    let mut state = AnimationState::build(&scene, &root, &mut rng).unwrap();

    assert!(state.clusters().len() >= 5);
    let frame = state.advance().unwrap();
    assert!(frame.clusters.iter().all(|c| c.positions.len() == 5));
}
