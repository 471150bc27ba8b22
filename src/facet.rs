// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Facet work assignment (component H): the dual image-domain decomposition
//! is independent of the subgrid schedule, so its work items are simply
//! tiled and dealt round-robin across the facet workers. There is no
//! balancing phase: every facet costs the same to produce.

use crate::constants::ceil_div;
use crate::work::FacetWork;

/// Tile the `nfacet × nfacet` facet plane and deal the tiles round-robin
/// across `workers`.
pub fn generate_facet_work_assignment(nfacet: usize, workers: usize, facet_step: i64) -> Vec<Vec<FacetWork>> {
    assert!(workers > 0, "facet work assignment requires at least one worker");
    let half = (nfacet / 2) as i64;
    let mut items = Vec::with_capacity(nfacet * nfacet);
    for il in 0..nfacet {
        for im in 0..nfacet {
            let il_c = il as i64 - half;
            let im_c = im as i64 - half;
            items.push(FacetWork {
                il: il_c,
                im: im_c,
                facet_off_l: il_c * facet_step,
                facet_off_m: im_c * facet_step,
                set: true,
            });
        }
    }

    let slots = ceil_div(items.len(), workers);
    let mut rows: Vec<Vec<FacetWork>> = (0..workers).map(|_| vec![FacetWork::empty(); slots]).collect();
    for (i, item) in items.into_iter().enumerate() {
        rows[i % workers][i / workers] = item;
    }
    rows
}
