// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CLI entry point: parse arguments, build a schedule, report diagnostics.

use clap::Parser;
use log::info;

use subgrid_scheduler::cli::Args;
use subgrid_scheduler::demo::LinearArray;
use subgrid_scheduler::geometry::BaselineMatrix;
use subgrid_scheduler::schedule::Schedule;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    subgrid_scheduler::cli::logging::setup_logging(args.verbosity)?;

    let config = args.work_config();
    let vis = args.vis_spec();
    let array = LinearArray {
        spacing_m: args.antenna_spacing_m,
    };
    let matrix = BaselineMatrix::build(args.antenna_count, &vis, &array);

    let schedule = Schedule::generate(&config, &vis, &matrix)?;

    info!(
        "schedule: {} populated subgrid work items across {} worker(s), {} swap(s), bounds iu=[{}, {}] iv=[{}, {}]",
        schedule.subgrid_work_count(),
        schedule.subgrid_work.len(),
        schedule.swaps,
        schedule.iu_min,
        schedule.iu_max,
        schedule.iv_min,
        schedule.iv_max,
    );

    if config.dump_subgrid_work {
        for (w, row) in schedule.subgrid_work.iter().enumerate() {
            for (s, item) in row.iter().enumerate() {
                if !item.is_empty() {
                    println!(
                        "worker {w} slot {s}: (iu={}, iv={}, iw={}) nbl={}",
                        item.iu, item.iv, item.iw, item.nbl
                    );
                }
            }
        }
    }

    Ok(())
}
