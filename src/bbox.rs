// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The bounding-box engine (component B): the axis-aligned (u, v, w) extent
//! in wavelengths swept by one baseline between two time steps and two
//! frequency channels.

use crate::constants::m_to_l;
use crate::geometry::BaselineData;

/// Approximate the (u, v, w) extent (in wavelengths) that baseline `bl`
/// sweeps between time steps `t0`/`t1` and frequency channels `f0`/`f1`, by
/// taking only the four corner points of that range. If `negate`,
/// the sign of every coordinate is flipped (complex-conjugate symmetry:
/// either a baseline or its negation may be used).
///
/// Returns `(min, max)`, the component-wise bounds of the four corners.
pub fn bounding_box(
    bl: &BaselineData,
    negate: bool,
    t0: usize,
    t1: usize,
    f0: usize,
    f1: usize,
) -> ([f64; 3], [f64; 3]) {
    let uvw0 = bl.uvw_m[t0];
    let uvw1 = bl.uvw_m[t1];

    let mut scale0 = m_to_l(1.0, bl.freq[f0]);
    let mut scale1 = m_to_l(1.0, bl.freq[f1]);
    if negate {
        scale0 = -scale0;
        scale1 = -scale1;
    }

    let mut min = [0.0; 3];
    let mut max = [0.0; 3];
    for i in 0..3 {
        let corners = [uvw0[i] * scale0, uvw0[i] * scale1, uvw1[i] * scale0, uvw1[i] * scale1];
        min[i] = corners.iter().copied().fold(f64::INFINITY, f64::min);
        max[i] = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    }
    (min, max)
}

/// Round a baseline's full time×frequency bounding box (in wavelengths) down
/// into integer subgrid indices, per axis step sizes `lam_sg`/`lam_sg`/
/// `wstep_sg`.
pub fn bounding_subgrids(bl: &BaselineData, lam_sg: f64, wstep_sg: f64) -> ([i64; 3], [i64; 3]) {
    let (uvw_l_min, uvw_l_max) = bounding_box(
        bl,
        false,
        0,
        bl.time_count() - 1,
        0,
        bl.freq_count() - 1,
    );
    let steps = [lam_sg, lam_sg, wstep_sg];
    let mut sg_min = [0i64; 3];
    let mut sg_max = [0i64; 3];
    for i in 0..3 {
        sg_min[i] = (uvw_l_min[i] / steps[i]).round() as i64;
        sg_max[i] = (uvw_l_max[i] / steps[i]).round() as i64;
    }
    (sg_min, sg_max)
}
