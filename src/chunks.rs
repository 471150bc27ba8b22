// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chunk counter (component C): for one baseline and one subgrid cube,
//! count how many time×frequency chunks overlap the cube, using an adaptive
//! step size on the frequency axis.

use crate::bbox::bounding_box;
use crate::geometry::{BaselineData, VisSpec};

/// The result of binning one baseline against one cube: how many chunks
/// overlap, and the smallest w-coordinate any of them touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkCount {
    /// Number of overlapping (time-chunk, freq-chunk) pairs.
    pub chunks: usize,
    /// Smallest w-coordinate (wavelengths) touched by an overlapping chunk.
    /// Meaningless (left at the cube's own upper w bound) if `chunks == 0`.
    pub min_w: f64,
}

/// Count how many time×frequency chunks of baseline `bl` overlap the cube
/// `(iu, iv, iw)` of a `nsubgrid × nsubgrid × nwlevels` grid with per-axis
/// sizes `lam_sg`/`lam_sg`/`wstep_sg`.
pub fn bin_baseline(
    spec: &VisSpec,
    bl: &BaselineData,
    lam_sg: f64,
    wstep_sg: f64,
    nsubgrid: usize,
    nwlevels: usize,
    iu: usize,
    iv: usize,
    iw: usize,
) -> ChunkCount {
    debug_assert!(iu < nsubgrid);
    debug_assert!(iv < nsubgrid);
    debug_assert!(iw < nwlevels);

    let cu = iu as i64 - (nsubgrid / 2) as i64;
    let cv = iv as i64 - (nsubgrid / 2) as i64;
    let cw = iw as i64 - (nwlevels / 2) as i64;

    let sg_min_u = lam_sg * cu as f64 - lam_sg / 2.0;
    let sg_max_u = lam_sg * cu as f64 + lam_sg / 2.0;
    let sg_min_v = lam_sg * cv as f64 - lam_sg / 2.0;
    let sg_max_v = lam_sg * cv as f64 + lam_sg / 2.0;
    let sg_min_w = wstep_sg * cw as f64 - wstep_sg / 2.0;
    let sg_max_w = wstep_sg * cw as f64 + wstep_sg / 2.0;

    let ntchunk = spec.time_chunks();
    let nfchunk = spec.freq_chunks();
    let mut chunks = 0usize;
    let mut min_w = sg_max_w;

    for tchunk in 0..ntchunk {
        let t0 = tchunk * spec.time_chunk;
        let t1 = ((tchunk + 1) * spec.time_chunk).min(spec.time_count) - 1;
        let tstep_mid = (tchunk * spec.time_chunk + spec.time_chunk / 2).min(spec.time_count - 1);
        let positive_u = bl.uvw_m[tstep_mid][0] >= 0.0;

        let mut fchunk: i64 = 0;
        let mut fstep: i64 = 1;
        while (fchunk as usize) < nfchunk {
            let f0 = fchunk as usize * spec.freq_chunk;
            let f1 = (((fchunk + fstep) as usize) * spec.freq_chunk).min(spec.freq_count) - 1;

            let (uvw_l_min, uvw_l_max) = bounding_box(bl, !positive_u, t0, t1, f0, f1);

            let overlaps = uvw_l_min[0] < sg_max_u
                && uvw_l_max[0] > sg_min_u
                && uvw_l_min[1] < sg_max_v
                && uvw_l_max[1] > sg_min_v
                && uvw_l_min[2] < sg_max_w
                && uvw_l_max[2] > sg_min_w;

            if overlaps {
                if fstep == 1 {
                    chunks += 1;
                    min_w = min_w.min(uvw_l_min[2]);
                    fchunk += 1;
                } else {
                    fstep /= 2;
                    fchunk -= fstep;
                }
            } else {
                fchunk -= fstep;
                fstep *= 2;
            }
        }
    }

    ChunkCount { chunks, min_w }
}
