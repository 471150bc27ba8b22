// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The observation specification and the per-baseline UVW-vs-time geometry
//! cache (component A).
//!
//! The actual `ha_to_uvw` coordinate transform is an out-of-scope
//! collaborator: this module only caches the
//! hour-angle/declination trigonometry and asks an injected [`HaToUvw`]
//! implementor to turn that into metres. A simple, illustrative
//! implementation is provided in [`crate::demo`] for anyone wiring up this
//! crate without their own geometry routine.

use crate::constants::m_to_l;

/// The pure geometry collaborator that turns cached hour-angle/declination
/// trigonometry into a baseline vector in metres. This is deliberately a
/// trait rather than a concrete dependency: the real implementation (antenna
/// positions, precession, etc.) lives outside this crate's scope.
pub trait HaToUvw: Sync {
    /// Compute the `(u, v, w)` baseline vector in metres for antennas `a1`
    /// and `a2` at one time step.
    fn ha_to_uvw(
        &self,
        a1: usize,
        a2: usize,
        ha_sin: f64,
        ha_cos: f64,
        dec_sin: f64,
        dec_cos: f64,
    ) -> [f64; 3];
}

/// The observation specification: how many time steps and frequency
/// channels there are, how they're chunked, and the declination and field of
/// view of the pointing.
#[derive(Debug, Clone)]
pub struct VisSpec {
    /// Number of time samples.
    pub time_count: usize,
    /// Time of the first sample (hours, in whatever units `ha_to_uvw`
    /// expects the hour angle).
    pub time_start: f64,
    /// Spacing between time samples (hours).
    pub time_step: f64,
    /// Number of time samples per chunk (must be at least 1).
    pub time_chunk: usize,

    /// Number of frequency channels.
    pub freq_count: usize,
    /// Frequency of the first channel (Hz).
    pub freq_start: f64,
    /// Spacing between frequency channels (Hz).
    pub freq_step: f64,
    /// Number of frequency channels per chunk (must be at least 1).
    pub freq_chunk: usize,

    /// Declination of the pointing (radians).
    pub dec: f64,
    /// Field of view (radians).
    pub fov: f64,

    ha_sin: Vec<f64>,
    ha_cos: Vec<f64>,
    dec_sin: f64,
    dec_cos: f64,
}

impl VisSpec {
    /// Construct a new specification, caching hour-angle and declination
    /// trigonometry up front.
    ///
    /// `hour_angle_at` converts a time sample index into an hour angle in
    /// radians; this is typically `time_start + time_step * i`, scaled into
    /// radians by whatever convention the caller's `ha_to_uvw` expects.
    pub fn new(
        time_count: usize,
        time_start: f64,
        time_step: f64,
        time_chunk: usize,
        freq_count: usize,
        freq_start: f64,
        freq_step: f64,
        freq_chunk: usize,
        dec: f64,
        fov: f64,
        hour_angle_at: impl Fn(usize) -> f64,
    ) -> Self {
        let (ha_sin, ha_cos) = (0..time_count)
            .map(|i| {
                let ha = hour_angle_at(i);
                (ha.sin(), ha.cos())
            })
            .unzip();
        VisSpec {
            time_count,
            time_start,
            time_step,
            time_chunk: time_chunk.max(1),
            freq_count,
            freq_start,
            freq_step,
            freq_chunk: freq_chunk.max(1),
            dec,
            fov,
            ha_sin,
            ha_cos,
            dec_sin: dec.sin(),
            dec_cos: dec.cos(),
        }
    }

    /// Number of time chunks, `⌈time_count/time_chunk⌉`.
    pub fn time_chunks(&self) -> usize {
        crate::constants::ceil_div(self.time_count, self.time_chunk)
    }

    /// Number of frequency chunks, `⌈freq_count/freq_chunk⌉`.
    pub fn freq_chunks(&self) -> usize {
        crate::constants::ceil_div(self.freq_count, self.freq_chunk)
    }
}

/// One baseline's (u, v, w) trajectory in metres over the observation's time
/// range, and its channel frequencies.
#[derive(Debug, Clone)]
pub struct BaselineData {
    /// First antenna (`antenna1 < antenna2`).
    pub antenna1: usize,
    /// Second antenna.
    pub antenna2: usize,
    /// Baseline vector in metres, one per time sample.
    pub uvw_m: Vec<[f64; 3]>,
    /// Channel frequencies in Hz.
    pub freq: Vec<f64>,
}

impl BaselineData {
    /// Number of time samples.
    pub fn time_count(&self) -> usize {
        self.uvw_m.len()
    }

    /// Number of frequency channels.
    pub fn freq_count(&self) -> usize {
        self.freq.len()
    }

    /// Convert the baseline vector at time index `t` and frequency index `f`
    /// from metres to wavelengths.
    pub(crate) fn uvw_l(&self, t: usize, f: usize) -> [f64; 3] {
        let uvw = self.uvw_m[t];
        let freq = self.freq[f];
        [m_to_l(uvw[0], freq), m_to_l(uvw[1], freq), m_to_l(uvw[2], freq)]
    }
}

/// All per-baseline geometry for an observation, stored as a flat matrix
/// indexed by `a1 + ant_count * a2` (only `a1 < a2` entries are populated),
/// matching the source's `struct bl_data *` array layout.
#[derive(Debug, Clone)]
pub struct BaselineMatrix {
    ant_count: usize,
    data: Vec<Option<BaselineData>>,
}

impl BaselineMatrix {
    /// Build the geometry cache for every baseline `a1 < a2` from the
    /// observation specification, using `ha_to_uvw` to turn cached
    /// trigonometry into metres.
    pub fn build(ant_count: usize, spec: &VisSpec, ha_to_uvw: &dyn HaToUvw) -> Self {
        let mut data: Vec<Option<BaselineData>> = (0..ant_count * ant_count).map(|_| None).collect();
        let freq: Vec<f64> = (0..spec.freq_count)
            .map(|i| spec.freq_start + spec.freq_step * i as f64)
            .collect();
        for a1 in 0..ant_count {
            for a2 in (a1 + 1)..ant_count {
                let uvw_m = (0..spec.time_count)
                    .map(|i| {
                        ha_to_uvw.ha_to_uvw(
                            a1,
                            a2,
                            spec.ha_sin[i],
                            spec.ha_cos[i],
                            spec.dec_sin,
                            spec.dec_cos,
                        )
                    })
                    .collect();
                data[a1 + ant_count * a2] = Some(BaselineData {
                    antenna1: a1,
                    antenna2: a2,
                    uvw_m,
                    freq: freq.clone(),
                });
            }
        }
        BaselineMatrix { ant_count, data }
    }

    /// Number of antennas.
    pub fn ant_count(&self) -> usize {
        self.ant_count
    }

    /// Fetch the geometry for baseline `(a1, a2)`, `a1 < a2`.
    pub fn get(&self, a1: usize, a2: usize) -> &BaselineData {
        self.data[a1 + self.ant_count * a2]
            .as_ref()
            .expect("baseline (a1, a2) with a1 < a2 must be populated")
    }

    /// Iterate over every baseline in canonical `(a1, a2)` order, `a1 < a2` —
    /// the order that makes list construction deterministic.
    pub fn baselines(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.ant_count;
        (0..n).flat_map(move |a1| ((a1 + 1)..n).map(move |a2| (a1, a2)))
    }
}
