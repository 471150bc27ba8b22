// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. This crate should do as many
calculations as possible in double precision before converting to a lower
precision, if it is ever required.
 */

/// Speed of light, in metres per second.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Multiplier on the average chunk count per populated subgrid used by the
/// splitter's default `work_max_nbl` heuristic. See `crate::split` for how
/// this is used.
pub const WORK_SPLIT_THRESHOLD: usize = 3;

/// Ceiling division for non-negative integers.
pub(crate) fn ceil_div(a: usize, b: usize) -> usize {
    if b == 0 {
        0
    } else {
        (a + b - 1) / b
    }
}

/// Convert a baseline coordinate in metres to wavelengths at the given
/// frequency (Hz).
pub(crate) fn m_to_l(metres: f64, freq_hz: f64) -> f64 {
    metres * freq_hz / SPEED_OF_LIGHT
}
