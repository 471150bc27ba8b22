// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The data types produced by binning, splitting and balancing: a baseline's
//! contribution to one subgrid cube, a work item assigned to one worker slot,
//! and the analogous facet work item.

/// One baseline's contribution to a single subgrid cube: how many
/// time×frequency chunks of this baseline overlap the cube, and the smallest
/// w-coordinate (wavelengths) touched by any of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubgridWorkBl {
    /// First antenna of the baseline (`a1 < a2`).
    pub a1: usize,
    /// Second antenna of the baseline.
    pub a2: usize,
    /// Number of overlapping time×frequency chunks.
    pub chunks: usize,
    /// Smallest w-coordinate (wavelengths) touched by any of this
    /// baseline's chunks in this cube.
    pub min_w: f64,
}

impl SubgridWorkBl {
    /// A placeholder record used by the full-redistribute fallback to
    /// make an otherwise-empty work item non-empty.
    pub(crate) fn dummy() -> Self {
        SubgridWorkBl {
            a1: 0,
            a2: 0,
            chunks: 1,
            min_w: 0.0,
        }
    }
}

/// One work item: a subgrid cube together with (at most `work_max_nbl`
/// chunks' worth of) the baselines that overlap it. Assigned to exactly one
/// worker's slot in the schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct SubgridWork {
    /// Subgrid index on the u axis, centred at 0.
    pub iu: i64,
    /// Subgrid index on the v axis, centred at 0.
    pub iv: i64,
    /// Subgrid index on the w axis, centred at 0.
    pub iw: i64,
    /// Offset into the image grid on the u axis.
    pub subgrid_off_u: i64,
    /// Offset into the image grid on the v axis.
    pub subgrid_off_v: i64,
    /// Offset into the image grid on the w axis.
    pub subgrid_off_w: i64,
    /// Total number of chunks carried by `bls`.
    pub nbl: usize,
    /// The baseline-work records making up this item, in ascending `min_w`
    /// order.
    pub bls: Vec<SubgridWorkBl>,
}

impl SubgridWork {
    /// An empty slot: `nbl == 0` is the sole definition of "empty".
    pub fn empty() -> Self {
        SubgridWork {
            iu: 0,
            iv: 0,
            iw: 0,
            subgrid_off_u: 0,
            subgrid_off_v: 0,
            subgrid_off_w: 0,
            nbl: 0,
            bls: Vec::new(),
        }
    }

    /// Whether this slot carries no work.
    pub fn is_empty(&self) -> bool {
        self.nbl == 0
    }
}

/// One work item in the dual image-domain (facet) decomposition, independent
/// of the subgrid schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetWork {
    /// Facet index on the l axis, centred at 0.
    pub il: i64,
    /// Facet index on the m axis, centred at 0.
    pub im: i64,
    /// Offset into the image grid on the l axis.
    pub facet_off_l: i64,
    /// Offset into the image grid on the m axis.
    pub facet_off_m: i64,
    /// Whether this slot actually carries a facet (vs. being unused padding
    /// in the `[facet_workers][facet_max_work]` matrix).
    pub set: bool,
}

impl FacetWork {
    /// An empty (unset) slot.
    pub fn empty() -> Self {
        FacetWork {
            il: 0,
            im: 0,
            facet_off_l: 0,
            facet_off_m: 0,
            set: false,
        }
    }
}

/// Swap the elements at `(i, s)` and `(j, s)` of two distinct rows of a
/// `[workers][slots]` matrix represented as `Vec<Vec<T>>`.
///
/// Used by the balancer (`crate::balance`) to exchange work items between two
/// different workers' rows without falling back to unsafe code.
pub(crate) fn swap_rows<T>(matrix: &mut [Vec<T>], i: usize, j: usize, s: usize) {
    swap_cells(matrix, i, s, j, s)
}

/// Swap `matrix[i][si]` and `matrix[j][sj]` of a `[workers][slots]` matrix
/// represented as `Vec<Vec<T>>`, where `i != j` but `si`/`sj` may differ.
///
/// Used by the balancer (`crate::balance`) to exchange the heaviest item on
/// one worker with the lightest item on another, without unsafe code.
pub(crate) fn swap_cells<T>(matrix: &mut [Vec<T>], i: usize, si: usize, j: usize, sj: usize) {
    assert_ne!(i, j);
    let (lo, lo_s, hi, hi_s) = if i < j { (i, si, j, sj) } else { (j, sj, i, si) };
    let (left, right) = matrix.split_at_mut(hi);
    std::mem::swap(&mut left[lo][lo_s], &mut right[0][hi_s]);
}
