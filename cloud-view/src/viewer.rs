//! Interactive 3D point-cloud viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`AnimationState`] and
//! acts as its rendering collaborator: it drives the tick timer, receives
//! each [`Frame`] through a [`FrameSink`], and paints the clusters with a
//! simple perspective orbit camera.

use cloud_core::{
    animation::{AnimationState, Frame, FrameSink, LatestFrame},
    config::SceneConfig,
    types::Rgba,
};
use eframe::App;
use glam::{Vec2, Vec3};

/// Perspective camera orbiting the origin with `z` pointing up.
///
/// Angles are in degrees: `elevation_deg` above the x–y plane,
/// `azimuth_deg` around the `z` axis from `+x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub elevation_deg: f32,
    pub azimuth_deg: f32,
    pub fov_deg: f32,
}

impl OrbitCamera {
    const NEAR: f32 = 0.1;

    fn from_scene(scene: &SceneConfig) -> Self {
        Self {
            distance: scene.view.camera_distance,
            elevation_deg: scene.view.elevation_deg,
            azimuth_deg: scene.view.azimuth_deg,
            fov_deg: 60.0,
        }
    }

    fn eye(&self) -> Vec3 {
        let (el, az) = (self.elevation_deg.to_radians(), self.azimuth_deg.to_radians());
        self.distance * Vec3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin())
    }

    /// Projects a world point to normalized image coordinates.
    ///
    /// `y` grows upward and `±1` spans the vertical field of view.
    ///
    /// ### Returns
    /// The image position and the depth along the view axis, or `None`
    /// for points at or behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<(Vec2, f32)> {
        let eye = self.eye();
        let forward = (-eye).try_normalize()?;
        let right = forward.cross(Vec3::Z).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);

        let rel = p - eye;
        let depth = rel.dot(forward);
        if depth <= Self::NEAR {
            return None;
        }

        let half = (self.fov_deg.to_radians() * 0.5).tan();
        Some((Vec2::new(rel.dot(right), rel.dot(up)) / (depth * half), depth))
    }

    fn orbit(&mut self, delta: egui::Vec2) {
        self.azimuth_deg -= delta.x * 0.3;
        self.elevation_deg = (self.elevation_deg + delta.y * 0.3).clamp(-89.0, 89.0);
    }

    fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * 0.001).clamp(0.5, 2.0);
        self.distance = (self.distance * factor).clamp(1.0, 5000.0);
    }
}

fn to_color32(c: Rgba) -> egui::Color32 {
    let [r, g, b, a] = (c.clamp(Rgba::ZERO, Rgba::ONE) * 255.0).round().to_array();
    egui::Color32::from_rgba_unmultiplied(r as u8, g as u8, b as u8, a as u8)
}

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions (orbit, zoom, buttons).
/// 2. If `running` is `true` and `step_interval` has passed, call
///    [`Viewer::step_once`].
/// 3. Paint the most recent [`Frame`].
///
/// ### Fields
/// - `state` - Animation state producing a frame per tick.
/// - `latest` - Sink holding the most recent frame.
/// - `title` - Scene title shown in the legend panel.
///
/// - `running` - Whether ticks are issued automatically.
/// - `camera` - Current orbit camera.
/// - `home` - Camera the scene started with, restored by "Reset view".
/// - `point_size` - Point diameter in pixels.
///
/// - `step_interval` - Target time between ticks (seconds).
/// - `last_step_time` - Time stamp of the last tick (egui time).
/// - `last_step_dt` - Actual time between the last two ticks (display only).
/// - `error` - Update error that stopped the animation, if any.
pub struct Viewer {
    state: AnimationState,
    latest: LatestFrame,
    title: String,

    running: bool,
    camera: OrbitCamera,
    home: OrbitCamera,
    point_size: f32,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
    error: Option<String>,
}

impl Viewer {
    /// Wraps a built animation state, taking camera and timing from `scene`.
    ///
    /// Animated scenes start running; frozen scenes only show their base
    /// positions.
    pub fn new(state: AnimationState, scene: &SceneConfig) -> Self {
        let camera = OrbitCamera::from_scene(scene);
        let latest = LatestFrame(Some(state.snapshot()));
        let running = state.is_animated();

        Self {
            state,
            latest,
            title: scene.title.clone(),
            running,
            camera,
            home: camera,
            point_size: scene.view.point_size,
            step_interval: scene.animation.tick_interval_ms as f64 / 1000.0,
            last_step_time: 0.0,
            last_step_dt: 0.0,
            error: None,
        }
    }

    fn frame(&self) -> Option<&Frame> {
        self.latest.0.as_ref()
    }

    /// Issues one tick and stores the resulting frame.
    ///
    /// An update error stops the animation and is kept for display.
    fn step_once(&mut self) {
        if let Err(e) = self.state.advance_and_render(&mut self.latest) {
            log::error!("animation stopped: {e}");
            self.error = Some(e.to_string());
            self.running = false;
        }
    }

    /// Rewinds the animation to phase 0 and shows the base positions.
    fn reset(&mut self) {
        self.state.reset();
        self.latest.present(&self.state.snapshot());
        self.last_step_time = 0.0;
        self.last_step_dt = 0.0;
        self.error = None;
    }

    /// Converts a world-space position to screen-space.
    ///
    /// ### Returns
    /// The screen position and depth, or `None` if the point is behind
    /// the camera.
    fn world_to_screen(&self, p: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let (ndc, depth) = self.camera.project(p)?;
        let center = rect.center();
        let scale = rect.height() * 0.5;
        Some((
            egui::pos2(center.x + ndc.x * scale, center.y - ndc.y * scale),
            depth,
        ))
    }

    /// Builds the top panel UI (run controls, stepping, reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(self.state.is_animated(), |ui| {
                    if ui
                        .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                        .clicked()
                    {
                        self.running = !self.running;
                    }

                    ui.add(
                        egui::DragValue::new(&mut self.step_interval)
                            .prefix("dt target = ")
                            .range(0.01..=1.0)
                            .speed(0.01),
                    );

                    if ui.button("Step").clicked() {
                        let now = ctx.input(|i| i.time);
                        if self.last_step_time > 0.0 {
                            self.last_step_dt = now - self.last_step_time;
                        }
                        self.step_once();
                        self.last_step_time = now;
                    }

                    if ui.button("Reset").clicked() {
                        self.reset();
                    }
                });

                ui.separator();
                if ui.button("Reset view").clicked() {
                    self.camera = self.home;
                }
                ui.add(egui::Slider::new(&mut self.point_size, 1.0..=20.0).text("Point size"));
            });
        });
    }

    /// Builds the bottom status bar (tick, phase, counts, timing).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt target = {:.3} s", self.step_interval));
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                if let Some(frame) = self.frame() {
                    let points: usize = frame.clusters.iter().map(|c| c.positions.len()).sum();
                    ui.label(format!("points = {points}"));
                    ui.label(format!("clusters = {}", frame.clusters.len()));
                    ui.label(format!("phase = {:.2}", frame.phase));
                    ui.label(format!("tick = {}", frame.tick));
                }
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    /// Builds the right-hand legend: one row per cluster, grouped by category.
    fn ui_legend_panel(&self, ctx: &egui::Context) {
        egui::SidePanel::right("legend_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading(&self.title);
                ui.separator();

                let Some(frame) = self.frame() else {
                    return;
                };
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut current: Option<&str> = None;
                    for c in &frame.clusters {
                        if current != Some(c.key.category.as_str()) {
                            current = Some(c.key.category.as_str());
                            ui.add_space(4.0);
                            ui.strong(format!("{} ({})", c.key.category, c.element));
                        }
                        let label = c.key.item.as_deref().unwrap_or(c.key.category.as_str());
                        ui.colored_label(to_color32(c.color), format!("● {label}"));
                    }
                });
            });
    }

    /// Builds the central panel where the clusters are painted and the
    /// camera is controlled.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));

            // Orbit with drag.
            if response.dragged() {
                self.camera.orbit(response.drag_delta());
            }

            // Dolly with scroll.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 && response.hovered() {
                self.camera.zoom(scroll);
            }

            // Paint far points first so near ones stay on top.
            if let Some(frame) = self.frame() {
                let mut points: Vec<(f32, egui::Pos2, egui::Color32)> = Vec::new();
                for c in &frame.clusters {
                    let color = to_color32(c.color);
                    for &p in &c.positions {
                        if let Some((pos, depth)) = self.world_to_screen(p, rect) {
                            points.push((depth, pos, color));
                        }
                    }
                }
                points.sort_by(|a, b| b.0.total_cmp(&a.0));

                let r = self.point_size * 0.5;
                for (_, pos, color) in points {
                    painter.circle_filled(pos, r, color);
                }
            }

            // Auto-run the animation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_legend_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::path::Path;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn test_viewer(scene: SceneConfig) -> Viewer {
        let mut rng = StdRng::seed_from_u64(17);
        let state = AnimationState::build(&scene, Path::new("."), &mut rng).unwrap();
        Viewer::new(state, &scene)
    }

    fn side_camera() -> OrbitCamera {
        OrbitCamera {
            distance: 50.0,
            elevation_deg: 0.0,
            azimuth_deg: 0.0,
            fov_deg: 60.0,
        }
    }

    #[test]
    fn origin_projects_to_the_screen_center() {
        let viewer = test_viewer(SceneConfig::model_test());
        let rect = test_rect();
        let (pos, depth) = viewer.world_to_screen(Vec3::ZERO, rect).unwrap();

        assert!((pos - rect.center()).length() < 1e-3, "pos={pos:?}");
        assert!((depth - viewer.camera.distance).abs() < 1e-3);
    }

    #[test]
    fn z_up_and_y_right_from_the_side() {
        let cam = side_camera();
        let (up, _) = cam.project(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        let (right, _) = cam.project(Vec3::new(0.0, 5.0, 0.0)).unwrap();

        assert!(up.y > 0.0 && up.x.abs() < 1e-5);
        assert!(right.x > 0.0 && right.y.abs() < 1e-5);
    }

    #[test]
    fn nearer_points_appear_larger_offsets() {
        let cam = side_camera();
        let (near, d_near) = cam.project(Vec3::new(20.0, 0.0, 5.0)).unwrap();
        let (far, d_far) = cam.project(Vec3::new(-20.0, 0.0, 5.0)).unwrap();

        assert!(d_near < d_far);
        assert!(near.y > far.y);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let cam = side_camera();
        assert!(cam.project(Vec3::new(60.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn orbit_clamps_elevation() {
        let mut cam = side_camera();
        cam.orbit(egui::vec2(0.0, 10_000.0));
        assert_eq!(cam.elevation_deg, 89.0);
        assert!(cam.project(Vec3::ZERO).is_some());
    }

    #[test]
    fn step_once_advances_and_stores_the_frame() {
        let mut viewer = test_viewer(SceneConfig::model_test());
        assert_eq!(viewer.frame().map(|f| f.tick), Some(0));

        viewer.step_once();
        viewer.step_once();

        let frame = viewer.frame().unwrap();
        assert_eq!(frame.tick, 2);
        assert_eq!(frame.clusters.len(), 5);
        assert!(viewer.error.is_none());
    }

    #[test]
    fn reset_restores_base_frame() {
        let mut viewer = test_viewer(SceneConfig::model_test());
        let initial = viewer.frame().cloned().unwrap();

        viewer.step_once();
        assert_ne!(viewer.frame(), Some(&initial));

        viewer.reset();
        assert_eq!(viewer.frame(), Some(&initial));
        assert_eq!(viewer.last_step_time, 0.0);
    }

    #[test]
    fn frozen_scene_starts_paused() {
        let mut scene = SceneConfig::model_test();
        scene.animation.enabled = false;
        let mut viewer = test_viewer(scene);
        assert!(!viewer.running);

        viewer.step_once();
        assert_eq!(viewer.frame().map(|f| f.tick), Some(0));
    }

    #[test]
    fn colors_convert_to_bytes() {
        let c = to_color32(Rgba::new(1.0, 0.0, 0.5, 1.0));
        assert_eq!(c, egui::Color32::from_rgba_unmultiplied(255, 0, 128, 255));
    }
}
