// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The top-level entry point: [`Schedule::generate`] ties the geometry
//! cache, bounding-box engine, chunk counter, bin collector, splitter and
//! balancer together (or takes the full-redistribute fallback), and reports
//! relevant diagnostics as it goes.

use log::{info, warn};

use crate::balance::{balance, deal};
use crate::binning::{collect_baselines, dump_baseline_bins};
use crate::config::WorkConfig;
use crate::error::ScheduleError;
use crate::facet::generate_facet_work_assignment;
use crate::fallback::generate_full_redistribute_assignment;
use crate::geometry::{BaselineMatrix, VisSpec};
use crate::split::{split_cubes, work_max_nbl};
use crate::work::{FacetWork, SubgridWork};

/// A complete subgrid + facet work assignment, ready to hand to downstream
/// workers.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// `[subgrid_workers][subgrid_max_work]` dense matrix of subgrid work.
    pub subgrid_work: Vec<Vec<SubgridWork>>,
    /// `[facet_workers][facet_max_work]` dense matrix of facet work.
    pub facet_work: Vec<Vec<FacetWork>>,
    /// Smallest populated `iu` across the subgrid schedule.
    pub iu_min: i64,
    /// Largest populated `iu` across the subgrid schedule.
    pub iu_max: i64,
    /// Smallest populated `iv` across the subgrid schedule.
    pub iv_min: i64,
    /// Largest populated `iv` across the subgrid schedule.
    pub iv_max: i64,
    /// The per-item chunk cap used by the splitter (0 on the fallback path).
    pub work_max_nbl: usize,
    /// Number of swaps the balancer performed (0 on the fallback path).
    pub swaps: usize,
}

impl Schedule {
    /// Generate a schedule for one observation. Follows the normal
    /// bin → split → balance pipeline when `vis.time_count > 0`, otherwise
    /// takes the full-redistribute fallback.
    pub fn generate(
        config: &WorkConfig,
        vis: &VisSpec,
        matrix: &BaselineMatrix,
    ) -> Result<Schedule, ScheduleError> {
        config.validate(vis.time_count)?;

        if vis.time_count == 0 {
            return Ok(Self::generate_fallback(config)?);
        }

        let recombine = config.recombine()?;
        let binning = collect_baselines(vis, matrix, config.lam_sg, config.wstep_sg, false);

        if config.dump_baseline_bins {
            info!("baseline bins:\n{}", dump_baseline_bins(&binning));
        }

        let total_chunks: usize = binning.cubes.iter().map(|c| c.total_chunks()).sum();
        info!(
            "binning complete: {} populated cubes, {} total chunks",
            binning.cubes.len(),
            total_chunks
        );

        let cap = work_max_nbl(&binning.cubes, config.subgrid_workers);
        let items = split_cubes(&binning.cubes, cap, recombine.sg_step());
        info!("splitter produced {} work items (work_max_nbl={})", items.len(), cap);

        let (iu_min, iu_max, iv_min, iv_max) = bounds(&items);
        if iu_max > (binning.nsubgrid / 2) as i64 {
            warn!(
                "max_sg_u {} exceeds nsubgrid/2 {}: bounding-box underestimates were clipped",
                iu_max,
                binning.nsubgrid / 2
            );
        }

        let mut subgrid_work = deal(items, config.subgrid_workers);
        let swaps = balance(&mut subgrid_work);
        info!("balancer performed {} swap(s)", swaps);

        let nfacet = recombine.nfacet();
        let facet_work = generate_facet_work_assignment(nfacet, config.facet_workers.max(1), recombine.facet_step());
        if facet_work.iter().any(|row| row.len() > 1) {
            warn!("facet_max_work > 1: downstream send queues may deadlock");
        }

        Ok(Schedule {
            subgrid_work,
            facet_work,
            iu_min,
            iu_max,
            iv_min,
            iv_max,
            work_max_nbl: cap,
            swaps,
        })
    }

    fn generate_fallback(config: &WorkConfig) -> Result<Schedule, ScheduleError> {
        let recombine = config.recombine()?;
        let workers = config.subgrid_workers.max(1);
        let facet_workers = config.facet_workers.max(1);

        info!("time_count == 0: using the full-redistribute fallback");
        let subgrid_work =
            generate_full_redistribute_assignment(recombine.fallback_nsubgrid(), workers, recombine.sg_step());
        let facet_work =
            generate_facet_work_assignment(recombine.fallback_nfacet(), facet_workers, recombine.facet_step());

        let (iu_min, iu_max, iv_min, iv_max) = bounds(&subgrid_work.iter().flatten().cloned().collect::<Vec<_>>());

        Ok(Schedule {
            subgrid_work,
            facet_work,
            iu_min,
            iu_max,
            iv_min,
            iv_max,
            work_max_nbl: 0,
            swaps: 0,
        })
    }

    /// Total number of populated subgrid work items across the whole schedule.
    pub fn subgrid_work_count(&self) -> usize {
        self.subgrid_work.iter().flatten().filter(|w| !w.is_empty()).count()
    }
}

fn bounds(items: &[SubgridWork]) -> (i64, i64, i64, i64) {
    if items.is_empty() {
        return (0, 0, 0, 0);
    }
    let iu_min = items.iter().map(|w| w.iu).min().unwrap();
    let iu_max = items.iter().map(|w| w.iu).max().unwrap();
    let iv_min = items.iter().map(|w| w.iv).min().unwrap();
    let iv_max = items.iter().map(|w| w.iv).max().unwrap();
    (iu_min, iu_max, iv_min, iv_max)
}
