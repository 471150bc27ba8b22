// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{criterion_group, criterion_main, Criterion};

use subgrid_scheduler::binning::collect_baselines;
use subgrid_scheduler::geometry::{BaselineMatrix, HaToUvw, VisSpec};

/// A 32-antenna east-west array, synthesized so every baseline has a
/// distinct, non-degenerate UVW track, giving the sweep a realistic spread
/// of cube occupancy.
struct SyntheticArray;

impl HaToUvw for SyntheticArray {
    fn ha_to_uvw(&self, a1: usize, a2: usize, ha_sin: f64, ha_cos: f64, dec_sin: f64, dec_cos: f64) -> [f64; 3] {
        let spacing = 10.0 * (a2 - a1) as f64;
        let u = spacing * ha_cos;
        let v = spacing * ha_sin * dec_sin;
        let w = spacing * ha_sin * dec_cos;
        [u, v, w]
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let spec = VisSpec::new(
        16,
        0.0,
        0.02,
        2,
        24,
        150e6,
        40e3,
        4,
        -0.46,
        0.2,
        |i| i as f64 * 0.02 - 0.16,
    );
    let matrix = BaselineMatrix::build(32, &spec, &SyntheticArray);

    c.bench_function("collect_baselines 32 antennas", |b| {
        b.iter(|| collect_baselines(&spec, &matrix, 1.0, 1.0, false))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
