// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The full-redistribute fallback (component G): when an observation has no
//! visibilities at all (`time_count == 0`), there is nothing to bin — every
//! subgrid in a single w-plane is dealt round-robin across the workers
//! instead, each carrying a placeholder baseline so it isn't mistaken for an
//! empty slot.

use crate::balance::deal;
use crate::work::{SubgridWork, SubgridWorkBl};

/// Tile the `nsubgrid × nsubgrid` image plane (a single w-plane, `iw == 0`)
/// and deal the tiles round-robin across `workers`. Indices run `0..nsubgrid`
/// uncentred, unlike the subgrid indices the normal binning path produces.
/// No swap phase: a fallback schedule carries no real baseline data to
/// balance by.
pub fn generate_full_redistribute_assignment(
    nsubgrid: usize,
    workers: usize,
    sg_step: i64,
) -> Vec<Vec<SubgridWork>> {
    let mut items = Vec::with_capacity(nsubgrid * nsubgrid);
    for iu in 0..nsubgrid {
        for iv in 0..nsubgrid {
            let iu = iu as i64;
            let iv = iv as i64;
            items.push(SubgridWork {
                iu,
                iv,
                iw: 0,
                subgrid_off_u: iu * sg_step,
                subgrid_off_v: iv * sg_step,
                subgrid_off_w: 0,
                nbl: 1,
                bls: vec![SubgridWorkBl::dummy()],
            });
        }
    }
    deal(items, workers)
}
