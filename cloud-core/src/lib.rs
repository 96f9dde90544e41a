//! Core library for animated five-element point clouds.
//!
//! Main components:
//! - [`directions`] — even cluster directions on the unit sphere.
//! - [`sampler`] — random point clouds inside a cluster.
//! - [`palette`] — per-category `(name, R, G, B)` palette files.
//! - [`registry`] — categories and the cycle between motion models.
//! - [`cluster`] — sampled clusters with fixed base positions.
//! - [`motion`] — the five motion models and their constants.
//! - [`attraction`] — the pull toward the successor model's centroid.
//! - [`centroid_buffer`] — per-model centroid accumulation.
//! - [`phases`] — the per-frame update pipeline.
//! - [`animation`] — animation state and tick driver.
//! - [`config`] — scene configuration and presets.
//! - [`error`] — error types.
//! - [`types`] — shared type aliases and keys.

pub mod animation;
pub mod attraction;
pub mod centroid_buffer;
pub mod cluster;
pub mod config;
pub mod directions;
pub mod error;
pub mod motion;
pub mod palette;
pub mod phases;
pub mod registry;
pub mod sampler;
pub mod types;
