//! Application entry point for the five-colour point-cloud viewer.
//!
//! This binary loads a scene (a built-in preset or a JSON file), samples
//! its clusters and delegates all interactive logic and rendering to
//! [`Viewer`] from the `viewer` module.
//!
//! Usage: `five_colour_cloud [SCENE]`, where `SCENE` is one of
//! `legend` (default), `model-test`, `tangent` or a path to a scene file.

mod viewer;

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use cloud_core::{animation::AnimationState, config::SceneConfig};
use rand::{SeedableRng, rngs::StdRng};
use viewer::Viewer;

/// Resolves the command-line scene argument.
///
/// ### Returns
/// The scene and the directory its palette paths are relative to: the
/// working directory for presets, the file's own directory otherwise.
fn load_scene(arg: Option<&str>) -> anyhow::Result<(SceneConfig, PathBuf)> {
    let name = arg.unwrap_or("legend");
    if let Some(scene) = SceneConfig::preset(name) {
        return Ok((scene, PathBuf::from(".")));
    }

    let path = Path::new(name);
    let scene = SceneConfig::load(path).with_context(|| {
        format!(
            "`{name}` is neither a preset ({}) nor a readable scene file",
            SceneConfig::PRESETS.join(", ")
        )
    })?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((scene, base_dir))
}

/// Builds the animation state and runs the native eframe application.
fn run() -> anyhow::Result<()> {
    let arg = std::env::args().nth(1);
    let (scene, base_dir) = load_scene(arg.as_deref())?;

    let state = match scene.seed {
        Some(seed) => AnimationState::build(&scene, &base_dir, &mut StdRng::seed_from_u64(seed)),
        None => AnimationState::build(&scene, &base_dir, &mut rand::rng()),
    }
    .with_context(|| format!("building scene `{}`", scene.title))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(scene.view.window_size)
            .with_title(scene.title.clone()),
        ..Default::default()
    };

    let title = scene.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new(state, &scene)))
        }),
    )
    .map_err(|e| anyhow!("eframe failed: {e}"))
}

/// Starts the viewer, logging any setup failure.
///
/// ### Returns
/// Exits with status 1 if the scene cannot be loaded or the native
/// window cannot be created.
fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
