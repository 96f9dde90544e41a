//! Error types for scene setup and per-frame updates.
//!
//! Three families, all fatal to the operation that raised them:
//! - [`ConfigError`] — the scene description itself is wrong.
//! - [`DataFormatError`] — a palette file could not be turned into colors.
//! - [`ArgumentError`] — a caller passed inconsistent arrays to the update.
//!
//! [`Error`] wraps all three so setup code can use `?` throughout.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::motion::Element;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown motion model `{0}` (expected fire, water, wood, metal or earth)")]
    UnknownMotionModel(String),

    #[error("cycle table has no successor for `{0}`")]
    MissingCycleEntry(Element),

    #[error("cycle table lists `{0}` more than once")]
    DuplicateCycleEntry(Element),

    #[error("cycle table maps `{0}` to itself")]
    CycleFixedPoint(Element),

    #[error("cycle table starting at `{start}` closes after {len} steps instead of 5")]
    ShortCycle { start: Element, len: usize },

    #[error("category `{0}` is listed more than once")]
    DuplicateCategory(String),

    #[error("category `{0}` has neither a color nor any palette rows")]
    MissingColor(String),

    #[error("base attraction strength {0} is outside [0, 1)")]
    InvalidInfluence(f32),

    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse scene file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("palette for `{category}` could not be read from {path}: {source}")]
    Io {
        category: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("palette for `{category}` has no `{column}` column")]
    MissingColumn {
        category: String,
        column: &'static str,
    },

    #[error("palette for `{category}`, row {row}: no value in column `{column}`")]
    MissingField {
        category: String,
        row: usize,
        column: &'static str,
    },

    #[error(
        "palette for `{category}`, row {row}: channel {channel} value `{value}` is not an integer in 0..=255"
    )]
    BadChannel {
        category: String,
        row: usize,
        channel: &'static str,
        value: String,
    },

    #[error("palette for `{category}`, row {row}: empty name")]
    EmptyName { category: String, row: usize },

    #[error("palette for `{category}`, row {row}: item `{name}` is already listed")]
    DuplicateName {
        category: String,
        row: usize,
        name: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("{positions} base positions but {offsets} phase offsets")]
    LengthMismatch { positions: usize, offsets: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataFormatError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
