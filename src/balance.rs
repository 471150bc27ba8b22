// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The balancer (component F): deal work items round-robin across workers,
//! then iteratively swap same-slot pairs between the two most unequal
//! workers until no swap brings their totals closer together.

use crate::constants::ceil_div;
use crate::work::{swap_cells, SubgridWork};

/// Deal `items` round-robin across `workers` rows: item `i` goes to worker
/// `i % workers`, slot `i / workers`. The resulting matrix is rectangular,
/// padded with empty slots so every row has the same length.
pub fn deal(items: Vec<SubgridWork>, workers: usize) -> Vec<Vec<SubgridWork>> {
    assert!(workers > 0, "deal requires at least one worker");
    let slots = ceil_div(items.len(), workers);
    let mut rows: Vec<Vec<SubgridWork>> = (0..workers).map(|_| vec![SubgridWork::empty(); slots]).collect();
    for (i, item) in items.into_iter().enumerate() {
        rows[i % workers][i / workers] = item;
    }
    rows
}

fn row_total(row: &[SubgridWork]) -> usize {
    row.iter().map(|w| w.nbl).sum()
}

/// Iteratively rebalance worker totals by swapping same-slot work items.
/// Returns the number of swaps made.
///
/// Each sweep sorts the workers ascending by total and walks two pointers
/// `lo`/`hi` in from the extremes. For the current `(lo, hi)` pair, find the
/// slot `s` minimising `|diff - 2*wdiff|`, where `diff` is the gap between
/// the two workers' totals and `wdiff` is the gap between their items at
/// slot `s` — the swap that brings the two totals closest to equal. The
/// swap is only taken if that minimum is strictly below `diff`; taking it
/// restarts the sweep from a fresh sort. Otherwise, whichever pointer is
/// further from the mean advances, and the walk continues until `lo >= hi`.
/// A sweep that makes no swap at all ends the balance.
pub fn balance(rows: &mut [Vec<SubgridWork>]) -> usize {
    let workers = rows.len();
    if workers < 2 {
        return 0;
    }
    let slots = rows[0].len();
    if slots == 0 {
        return 0;
    }

    let mut swaps = 0;
    loop {
        let totals: Vec<i64> = rows.iter().map(|r| row_total(r) as i64).collect();
        let mut order: Vec<usize> = (0..workers).collect();
        order.sort_by_key(|&w| totals[w]);
        let avg = totals.iter().sum::<i64>() as f64 / workers as f64;

        let mut lo = 0usize;
        let mut hi = workers - 1;
        let mut swapped = false;

        while lo < hi {
            let w_lo = order[lo];
            let w_hi = order[hi];
            let diff = totals[w_hi] - totals[w_lo];

            let mut best_slot = 0usize;
            let mut best_val = i64::MAX;
            for s in 0..slots {
                let wdiff = rows[w_hi][s].nbl as i64 - rows[w_lo][s].nbl as i64;
                let val = (diff - 2 * wdiff).abs();
                if val < best_val {
                    best_val = val;
                    best_slot = s;
                }
            }

            if best_val < diff {
                swap_cells(rows, w_hi, best_slot, w_lo, best_slot);
                swaps += 1;
                swapped = true;
                break;
            }

            let dist_hi = (totals[w_hi] as f64 - avg).abs();
            let dist_lo = (totals[w_lo] as f64 - avg).abs();
            if dist_hi > dist_lo {
                lo += 1;
            } else {
                hi -= 1;
            }
        }

        if !swapped {
            break;
        }
    }
    swaps
}
