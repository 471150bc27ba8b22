// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal, illustrative [`HaToUvw`] implementation for anyone wiring up
//! this crate without their own antenna-position/precession pipeline. Not
//! part of the core: a real deployment injects its own geometry collaborator
//! instead.

use crate::geometry::HaToUvw;

/// Antennas laid out along a straight East-West line, for demonstration and
/// CLI use. Antenna `i` sits at East-North-Up offset `(spacing_m * i, 0, 0)`.
pub struct LinearArray {
    /// Spacing between adjacent antennas, in metres.
    pub spacing_m: f64,
}

impl HaToUvw for LinearArray {
    fn ha_to_uvw(
        &self,
        a1: usize,
        a2: usize,
        ha_sin: f64,
        ha_cos: f64,
        dec_sin: f64,
        dec_cos: f64,
    ) -> [f64; 3] {
        let dx = self.spacing_m * (a2 as f64 - a1 as f64);
        let (dy, dz) = (0.0, 0.0);

        // The classical East-North-Up -> (u, v, w) rotation (Thompson, Moran
        // & Swenson, "Interferometry and Synthesis in Radio Astronomy").
        let u = dx * ha_sin + dy * ha_cos;
        let v = -dx * dec_sin * ha_cos + dy * dec_sin * ha_sin + dz * dec_cos;
        let w = dx * dec_cos * ha_cos - dy * dec_cos * ha_sin + dz * dec_sin;
        [u, v, w]
    }
}
