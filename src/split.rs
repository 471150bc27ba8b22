// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The splitter (component E): turn each populated cube into one or more
//! [`SubgridWork`] items, breaking up cubes whose baseline list has grown
//! well past average rather than letting one worker carry it all.

use crate::binning::Cube;
use crate::constants::{ceil_div, WORK_SPLIT_THRESHOLD};
use crate::work::SubgridWork;

/// A reasonable default per-item chunk cap for production use: the larger of
/// `WORK_SPLIT_THRESHOLD` times the average chunk count per populated cube,
/// and the per-worker share of the fullest cube. Callers that already
/// know the cap they want (e.g. a fixed test fixture) can bypass this and
/// pass it straight to [`split_cubes`].
pub fn work_max_nbl(cubes: &[Cube], subgrid_workers: usize) -> usize {
    if cubes.is_empty() {
        return 0;
    }
    let total: usize = cubes.iter().map(|c| c.total_chunks()).sum();
    let populated = cubes.len();
    let scaled_average = WORK_SPLIT_THRESHOLD * total / populated;
    let nbl_max = cubes.iter().map(|c| c.total_chunks()).max().unwrap_or(0);
    let per_worker_ceiling = if subgrid_workers > 0 {
        ceil_div(nbl_max, subgrid_workers)
    } else {
        nbl_max
    };
    scaled_average.max(per_worker_ceiling).max(1)
}

/// Split every populated cube into work items, in the cubes' existing
/// nested `(iw, iu, iv)` order. `sg_step` converts a cube's centred
/// index on any axis into a pixel offset into the image grid.
pub fn split_cubes(cubes: &[Cube], work_max_nbl: usize, sg_step: i64) -> Vec<SubgridWork> {
    cubes.iter().flat_map(|cube| split_cube(cube, work_max_nbl, sg_step)).collect()
}

fn split_cube(cube: &Cube, work_max_nbl: usize, sg_step: i64) -> Vec<SubgridWork> {
    let mut items = Vec::new();
    let mut remaining = &cube.bls[..];
    while !remaining.is_empty() {
        let mut nbl = 0usize;
        let mut idx = 0usize;
        while idx < remaining.len() {
            let next_chunks = remaining[idx].chunks;
            if idx > 0 && nbl + next_chunks > work_max_nbl {
                break;
            }
            nbl += next_chunks;
            idx += 1;
        }
        let (chunk, rest) = remaining.split_at(idx);
        items.push(make_item(cube, chunk.to_vec(), nbl, sg_step));
        remaining = rest;
    }
    items
}

fn make_item(cube: &Cube, bls: Vec<crate::work::SubgridWorkBl>, nbl: usize, sg_step: i64) -> SubgridWork {
    SubgridWork {
        iu: cube.iu,
        iv: cube.iv,
        iw: cube.iw,
        subgrid_off_u: cube.iu * sg_step,
        subgrid_off_v: cube.iv * sg_step,
        subgrid_off_w: cube.iw * sg_step,
        nbl,
        bls,
    }
}
