// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain, `serde`-round-trippable configuration structs: the
//! antenna count, the recombination geometry and the work-assignment knobs.
//! [`WorkConfig::from_file`]/[`WorkConfig::to_string`] round-trip these
//! through TOML/JSON/YAML for batch or reproducible runs; interactive use
//! goes through `crate::cli` instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::ceil_div;
use crate::error::ConfigError;

/// The file formats [`WorkConfig`] can be round-tripped through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
    /// `.yaml`/`.yml`
    Yaml,
}

impl ConfigFormat {
    fn from_extension(extension: Option<&str>) -> Result<Self, ConfigError> {
        match extension {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            other => Err(ConfigError::UnknownConfigFormat {
                extension: other.map(str::to_string),
            }),
        }
    }
}

/// The antenna count the core needs; positions and other metadata belong to
/// an out-of-scope collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntennaConfig {
    /// Number of antennas in the array.
    pub antenna_count: usize,
}

impl AntennaConfig {
    /// Number of distinct baselines `a1 < a2`.
    pub fn baseline_count(&self) -> usize {
        self.antenna_count * self.antenna_count.saturating_sub(1) / 2
    }
}

/// The recombination geometry: pixel sizes that determine how subgrids and
/// facets tile the image grid. Read-only to the core; owned by the
/// gridder/recombination collaborator in a full pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecombineConfig {
    /// Full image size, in pixels, on one axis.
    pub image_size: usize,
    /// Subgrid facet-overlap size (`xA`), in pixels; the subgrid index step.
    pub xa_size: usize,
    /// Facet size (`yB`), in pixels; the facet index step.
    pub yb_size: usize,
}

impl RecombineConfig {
    /// Pixel offset per subgrid index step, `subgrid_off_u/v = sg_step * iu/iv`.
    pub fn sg_step(&self) -> i64 {
        self.xa_size as i64
    }

    /// Pixel offset per facet index step, `facet_off_l/m = facet_step * il/im`.
    pub fn facet_step(&self) -> i64 {
        self.yb_size as i64
    }

    /// `yB`, the facet size as a fraction of the full image.
    fn yb_fraction(&self) -> f64 {
        self.yb_size as f64 / self.image_size as f64
    }

    /// Number of facets per axis for the normal (visibilities-present) path:
    /// `nfacet = 2·⌈1/(2·yB) − 0.5⌉ + 1`.
    pub fn nfacet(&self) -> usize {
        let yb = self.yb_fraction();
        let half = (1.0 / (2.0 * yb) - 0.5).ceil().max(0.0) as i64;
        (2 * half + 1) as usize
    }

    /// Number of subgrids per axis used by the full-redistribute fallback:
    /// `nsubgrid = image_size / sg_step`.
    pub fn fallback_nsubgrid(&self) -> usize {
        ceil_div(self.image_size, self.xa_size.max(1))
    }

    /// Number of facets per axis used by the full-redistribute fallback:
    /// `nfacet = image_size / yB_size`.
    pub fn fallback_nfacet(&self) -> usize {
        ceil_div(self.image_size, self.yb_size.max(1))
    }
}

/// The work-assignment knobs: worker counts, subgrid cube sizing, and
/// diagnostic toggles. Fields belonging exclusively to
/// out-of-scope collaborators (statsd, gridder kernels, vis I/O paths,
/// source-simulation counts) are deliberately not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkConfig {
    /// Antenna configuration.
    pub antenna: AntennaConfig,
    /// Recombination geometry. `None` until the gridder has configured it;
    /// required before a schedule can be generated.
    pub recombine: Option<RecombineConfig>,
    /// Number of subgrid workers.
    pub subgrid_workers: usize,
    /// Number of facet workers.
    pub facet_workers: usize,
    /// Subgrid cube size in u/v, in wavelengths.
    pub lam_sg: f64,
    /// Subgrid cube size in w, in wavelengths.
    pub wstep_sg: f64,
    /// Field of view, in radians.
    pub fov: f64,
    /// Emit a `crate::binning::dump_baseline_bins` table.
    #[serde(default)]
    pub dump_baseline_bins: bool,
    /// Emit a per-worker work list.
    #[serde(default)]
    pub dump_subgrid_work: bool,
}

impl WorkConfig {
    /// Validate the configuration against a concrete `time_count`.
    pub fn validate(&self, time_count: usize) -> Result<(), ConfigError> {
        if self.subgrid_workers == 0 && time_count > 0 {
            return Err(ConfigError::NoSubgridWorkers);
        }
        if self.fov / 2.0 >= 0.5 {
            return Err(ConfigError::InvalidFov { fov: self.fov });
        }
        Ok(())
    }

    /// The recombination geometry, or an error if it hasn't been configured.
    pub fn recombine(&self) -> Result<&RecombineConfig, ConfigError> {
        self.recombine.as_ref().ok_or(ConfigError::RecombineNotConfigured)
    }

    /// Parse a config from a TOML, JSON, or YAML file, dispatching on its
    /// extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|e| e.to_str());
        let format = ConfigFormat::from_extension(extension)?;
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&contents, format)
    }

    /// Parse a config from a string in the given format.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Toml(e.to_string())),
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| ConfigError::Json(e.to_string())),
            ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| ConfigError::Yaml(e.to_string())),
        }
    }

    /// Serialize this config to a string in the given format.
    pub fn to_string_in(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string(self).map_err(|e| ConfigError::Toml(e.to_string())),
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string())),
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| ConfigError::Yaml(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recombine() -> RecombineConfig {
        RecombineConfig {
            image_size: 64,
            xa_size: 16,
            yb_size: 8,
        }
    }

    #[test]
    fn baseline_count_matches_n_choose_2() {
        let a = AntennaConfig { antenna_count: 5 };
        assert_eq!(a.baseline_count(), 10);
    }

    #[test]
    fn fallback_sizing_divides_image_by_step() {
        let r = recombine();
        assert_eq!(r.fallback_nsubgrid(), 4);
        assert_eq!(r.fallback_nfacet(), 8);
        assert_eq!(r.sg_step(), 16);
        assert_eq!(r.facet_step(), 8);
    }

    #[test]
    fn validate_rejects_zero_workers_with_visibilities() {
        let cfg = WorkConfig {
            antenna: AntennaConfig { antenna_count: 3 },
            recombine: None,
            subgrid_workers: 0,
            facet_workers: 1,
            lam_sg: 1.0,
            wstep_sg: 1.0,
            fov: 0.1,
            dump_baseline_bins: false,
            dump_subgrid_work: false,
        };
        assert_eq!(cfg.validate(4), Err(ConfigError::NoSubgridWorkers));
        assert_eq!(cfg.validate(0), Ok(()));
    }

    #[test]
    fn validate_rejects_too_large_a_fov() {
        let mut cfg = WorkConfig {
            antenna: AntennaConfig { antenna_count: 3 },
            recombine: None,
            subgrid_workers: 1,
            facet_workers: 1,
            lam_sg: 1.0,
            wstep_sg: 1.0,
            fov: 2.5,
            dump_baseline_bins: false,
            dump_subgrid_work: false,
        };
        assert_eq!(cfg.validate(4), Err(ConfigError::InvalidFov { fov: 2.5 }));
        cfg.fov = 1.2;
        assert_eq!(cfg.validate(4), Err(ConfigError::InvalidFov { fov: 1.2 }));
        cfg.fov = 0.5;
        assert_eq!(cfg.validate(4), Ok(()));
    }

    #[test]
    fn recombine_accessor_reports_when_unconfigured() {
        let cfg = WorkConfig {
            antenna: AntennaConfig { antenna_count: 3 },
            recombine: None,
            subgrid_workers: 1,
            facet_workers: 1,
            lam_sg: 1.0,
            wstep_sg: 1.0,
            fov: 0.1,
            dump_baseline_bins: false,
            dump_subgrid_work: false,
        };
        assert_eq!(cfg.recombine(), Err(ConfigError::RecombineNotConfigured));
    }

    fn sample() -> WorkConfig {
        WorkConfig {
            antenna: AntennaConfig { antenna_count: 3 },
            recombine: Some(recombine()),
            subgrid_workers: 2,
            facet_workers: 2,
            lam_sg: 1.0,
            wstep_sg: 1.0,
            fov: 0.2,
            dump_baseline_bins: true,
            dump_subgrid_work: false,
        }
    }

    #[test]
    fn toml_round_trips() {
        let cfg = sample();
        let s = cfg.to_string_in(ConfigFormat::Toml).unwrap();
        assert_eq!(WorkConfig::parse(&s, ConfigFormat::Toml).unwrap(), cfg);
    }

    #[test]
    fn json_round_trips() {
        let cfg = sample();
        let s = cfg.to_string_in(ConfigFormat::Json).unwrap();
        assert_eq!(WorkConfig::parse(&s, ConfigFormat::Json).unwrap(), cfg);
    }

    #[test]
    fn yaml_round_trips() {
        let cfg = sample();
        let s = cfg.to_string_in(ConfigFormat::Yaml).unwrap();
        assert_eq!(WorkConfig::parse(&s, ConfigFormat::Yaml).unwrap(), cfg);
    }

    #[test]
    fn unrecognised_extension_is_an_error() {
        let err = ConfigFormat::from_extension(Some("ini")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownConfigFormat {
                extension: Some("ini".to_string())
            }
        );
    }
}
