// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line arguments for the `subgrid-scheduler` binary.

use clap::Parser;

use crate::config::{AntennaConfig, RecombineConfig, WorkConfig};
use crate::geometry::VisSpec;

/// Generate a subgrid and facet work assignment for one observation.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Number of antennas.
    #[clap(long, default_value_t = 2)]
    pub antenna_count: usize,

    /// Number of time samples. 0 selects the full-redistribute fallback.
    #[clap(long, default_value_t = 1)]
    pub time_count: usize,
    /// Hour angle of the first time sample, in radians.
    #[clap(long, default_value_t = 0.0)]
    pub time_start: f64,
    /// Hour-angle spacing between time samples, in radians.
    #[clap(long, default_value_t = 0.01)]
    pub time_step: f64,
    /// Number of time samples per binning chunk.
    #[clap(long, default_value_t = 1)]
    pub time_chunk: usize,

    /// Number of frequency channels.
    #[clap(long, default_value_t = 1)]
    pub freq_count: usize,
    /// Frequency of the first channel, in Hz.
    #[clap(long, default_value_t = 150e6)]
    pub freq_start: f64,
    /// Spacing between frequency channels, in Hz.
    #[clap(long, default_value_t = 40e3)]
    pub freq_step: f64,
    /// Number of frequency channels per binning chunk.
    #[clap(long, default_value_t = 1)]
    pub freq_chunk: usize,

    /// Declination of the pointing, in radians.
    #[clap(long, default_value_t = -0.4)]
    pub dec: f64,
    /// Field of view, in radians.
    #[clap(long, default_value_t = 0.2)]
    pub fov: f64,

    /// Subgrid cube size in u/v, in wavelengths.
    #[clap(long, default_value_t = 1.0)]
    pub lam_sg: f64,
    /// Subgrid cube size in w, in wavelengths.
    #[clap(long, default_value_t = 1.0)]
    pub wstep_sg: f64,

    /// Full image size, in pixels.
    #[clap(long, default_value_t = 512)]
    pub image_size: usize,
    /// Subgrid index step, in pixels.
    #[clap(long, default_value_t = 64)]
    pub xa_size: usize,
    /// Facet index step, in pixels.
    #[clap(long, default_value_t = 32)]
    pub yb_size: usize,

    /// Number of subgrid workers.
    #[clap(long, default_value_t = 4)]
    pub subgrid_workers: usize,
    /// Number of facet workers.
    #[clap(long, default_value_t = 4)]
    pub facet_workers: usize,

    /// Emit a per-cube baseline-bin table.
    #[clap(long)]
    pub dump_baseline_bins: bool,
    /// Emit a per-worker work list.
    #[clap(long)]
    pub dump_subgrid_work: bool,

    /// Spacing between antennas in the demo linear array, in metres.
    #[clap(long, default_value_t = 10.0)]
    pub antenna_spacing_m: f64,

    /// Increase logging verbosity. Pass more than once for more detail.
    #[clap(short, long, parse(from_occurrences))]
    pub verbosity: u8,
}

impl Args {
    /// Build the work-assignment configuration from these arguments.
    pub fn work_config(&self) -> WorkConfig {
        WorkConfig {
            antenna: AntennaConfig {
                antenna_count: self.antenna_count,
            },
            recombine: Some(RecombineConfig {
                image_size: self.image_size,
                xa_size: self.xa_size,
                yb_size: self.yb_size,
            }),
            subgrid_workers: self.subgrid_workers,
            facet_workers: self.facet_workers,
            lam_sg: self.lam_sg,
            wstep_sg: self.wstep_sg,
            fov: self.fov,
            dump_baseline_bins: self.dump_baseline_bins,
            dump_subgrid_work: self.dump_subgrid_work,
        }
    }

    /// Build the observation specification from these arguments.
    pub fn vis_spec(&self) -> VisSpec {
        let time_start = self.time_start;
        let time_step = self.time_step;
        VisSpec::new(
            self.time_count,
            self.time_start,
            self.time_step,
            self.time_chunk,
            self.freq_count,
            self.freq_start,
            self.freq_step,
            self.freq_chunk,
            self.dec,
            self.fov,
            move |i| time_start + time_step * i as f64,
        )
    }
}
