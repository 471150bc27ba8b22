// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for schedule generation: one enum per concern, composed into
//! [`ScheduleError`] via `#[from]`.

use thiserror::Error;

/// Errors encountered while validating a [`crate::config::WorkConfig`] before
/// it is used to generate a schedule.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// `subgrid_workers == 0` while the observation has visibilities
    /// (`time_count > 0`).
    #[error("subgrid_workers must be greater than 0 when the observation has visibilities")]
    NoSubgridWorkers,

    /// The field of view is too large for the small-angle approximation the
    /// gridder relies on (`fov/2` must be strictly less than 0.5 radians).
    #[error("field of view {fov} is too large (fov/2 must be < 0.5 radians)")]
    InvalidFov {
        /// The offending field of view, in radians.
        fov: f64,
    },

    /// The recombination geometry (`image_size`, `xA_size`, `yB_size`) was
    /// never configured, so `sg_step` cannot be derived.
    #[error("recombination geometry was not configured before generating a schedule")]
    RecombineNotConfigured,

    /// A config file's extension wasn't one of the supported formats.
    #[error("unrecognised config file extension {extension:?} (expected toml, json, or yaml/yml)")]
    UnknownConfigFormat {
        /// The offending extension, if the path had one.
        extension: Option<String>,
    },

    /// Failed to read a config file from disk.
    #[error("failed to read config file: {0}")]
    Io(String),

    /// Failed to parse a TOML config file.
    #[error("failed to parse TOML config: {0}")]
    Toml(String),

    /// Failed to parse a JSON config file.
    #[error("failed to parse JSON config: {0}")]
    Json(String),

    /// Failed to parse a YAML config file.
    #[error("failed to parse YAML config: {0}")]
    Yaml(String),
}

/// The top-level error returned by [`crate::schedule::Schedule::generate`].
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// An error validating configuration.
    #[error("{0}")]
    Config(#[from] ConfigError),
}
