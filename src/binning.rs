// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The bin collector (component D): size the subgrid cube grid from every
//! baseline's envelope, then sweep every cube against every baseline in
//! parallel to collect the baselines that actually overlap it.

use std::fmt::Write as _;

use indexmap::IndexMap;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::bbox::bounding_subgrids;
use crate::chunks::bin_baseline;
use crate::geometry::{BaselineMatrix, VisSpec};
use crate::work::SubgridWorkBl;

/// One subgrid cube's collected baseline bins, indexed by centred `(iu, iv,
/// iw)`.
#[derive(Debug, Clone)]
pub struct Cube {
    /// Subgrid index on the u axis, centred at 0.
    pub iu: i64,
    /// Subgrid index on the v axis, centred at 0.
    pub iv: i64,
    /// Subgrid index on the w axis, centred at 0.
    pub iw: i64,
    /// Baselines overlapping this cube, sorted ascending by `min_w`.
    pub bls: Vec<SubgridWorkBl>,
}

impl Cube {
    /// Total number of time×frequency chunks carried by this cube, summed
    /// over every contributing baseline.
    pub fn total_chunks(&self) -> usize {
        self.bls.iter().map(|b| b.chunks).sum()
    }
}

/// The sized cube grid and its populated cubes, in `(iw, iu, iv)` nested
/// order (outer to inner) — the order the splitter (`crate::split`) relies
/// on to produce its diagonal-stripe deal pattern.
#[derive(Debug, Clone)]
pub struct BinningResult {
    /// Side length of the square `(iu, iv)` grid.
    pub nsubgrid: usize,
    /// Number of w-planes.
    pub nwlevels: usize,
    /// Non-empty cubes only, in `(iw, iu, iv)` nested order.
    pub cubes: Vec<Cube>,
}

/// Phase 1: scan every baseline's full-range bounding box to size the cube
/// grid symmetrically about the origin.
fn size_grid(spec: &VisSpec, matrix: &BaselineMatrix, lam_sg: f64, wstep_sg: f64) -> (usize, usize) {
    let mut half_uv: i64 = 0;
    let mut half_w: i64 = 0;
    for (a1, a2) in matrix.baselines() {
        let bl = matrix.get(a1, a2);
        let (sg_min, sg_max) = bounding_subgrids(bl, lam_sg, wstep_sg);
        for axis in [0usize, 1] {
            half_uv = half_uv.max(sg_min[axis].abs()).max(sg_max[axis].abs());
        }
        half_w = half_w.max(sg_min[2].abs()).max(sg_max[2].abs());
    }
    let _ = spec;
    ((2 * half_uv + 1) as usize, (2 * half_w + 1) as usize)
}

/// Sweep every cube of a `nsubgrid × nsubgrid × nwlevels` grid against every
/// baseline, in parallel, collecting the baselines that overlap each cube
/// Pass `show_progress` to render an `indicatif` progress bar
/// while the sweep runs.
pub fn collect_baselines(
    spec: &VisSpec,
    matrix: &BaselineMatrix,
    lam_sg: f64,
    wstep_sg: f64,
    show_progress: bool,
) -> BinningResult {
    let (nsubgrid, nwlevels) = size_grid(spec, matrix, lam_sg, wstep_sg);

    let half_u = (nsubgrid / 2) as i64;
    let half_w = (nwlevels / 2) as i64;

    let mut cube_coords = Vec::with_capacity(nwlevels * nsubgrid * nsubgrid);
    for iw in 0..nwlevels {
        for iu in 0..nsubgrid {
            for iv in 0..nsubgrid {
                cube_coords.push((iu, iv, iw));
            }
        }
    }

    let build_cube = |&(iu, iv, iw): &(usize, usize, usize)| -> Cube {
        let mut bls: Vec<SubgridWorkBl> = matrix
            .baselines()
            .filter_map(|(a1, a2)| {
                let bl = matrix.get(a1, a2);
                let count = bin_baseline(spec, bl, lam_sg, wstep_sg, nsubgrid, nwlevels, iu, iv, iw);
                (count.chunks > 0).then_some(SubgridWorkBl {
                    a1,
                    a2,
                    chunks: count.chunks,
                    min_w: count.min_w,
                })
            })
            .collect();
        bls.sort_by(|a, b| a.min_w.partial_cmp(&b.min_w).unwrap());
        Cube {
            iu: iu as i64 - half_u,
            iv: iv as i64 - half_u,
            iw: iw as i64 - half_w,
            bls,
        }
    };

    let mut cubes: Vec<Cube> = if show_progress {
        let pb = ProgressBar::new(cube_coords.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} cubes ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let result = cube_coords.par_iter().progress_with(pb.clone()).map(build_cube).collect();
        pb.finish_and_clear();
        result
    } else {
        cube_coords.par_iter().map(build_cube).collect()
    };

    cubes.retain(|c| !c.bls.is_empty());

    BinningResult {
        nsubgrid,
        nwlevels,
        cubes,
    }
}

/// Sum each baseline's chunk count across every cube it appears in, built in
/// parallel and folded into an insertion-ordered map so a diagnostic report
/// lists baselines in a stable, reproducible order regardless of how the
/// parallel sweep happened to interleave.
pub fn baseline_chunk_totals(result: &BinningResult) -> IndexMap<(usize, usize), usize> {
    result
        .cubes
        .par_iter()
        .fold(IndexMap::new, |mut acc, cube| {
            for bl in &cube.bls {
                *acc.entry((bl.a1, bl.a2)).or_insert(0) += bl.chunks;
            }
            acc
        })
        .reduce(IndexMap::new, |mut a, b| {
            for (key, chunks) in b {
                *a.entry(key).or_insert(0) += chunks;
            }
            a
        })
}

/// Render a plain-text table of every populated cube and its baseline bins,
/// for `--dump-baseline-bins` diagnostics.
pub fn dump_baseline_bins(result: &BinningResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "grid: {}x{}x{} cubes, {} populated",
        result.nsubgrid,
        result.nsubgrid,
        result.nwlevels,
        result.cubes.len()
    );
    for cube in &result.cubes {
        let _ = writeln!(
            out,
            "cube (iu={:>4}, iv={:>4}, iw={:>4}): {} baseline(s), {} chunk(s)",
            cube.iu,
            cube.iv,
            cube.iw,
            cube.bls.len(),
            cube.total_chunks()
        );
        for bl in &cube.bls {
            let _ = writeln!(
                out,
                "    bl ({:>3}, {:>3}): chunks={:<4} min_w={:.3}",
                bl.a1, bl.a2, bl.chunks, bl.min_w
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HaToUvw;

    struct FixedUvw(f64, f64, f64);
    impl HaToUvw for FixedUvw {
        fn ha_to_uvw(&self, _: usize, _: usize, _: f64, _: f64, _: f64, _: f64) -> [f64; 3] {
            [self.0, self.1, self.2]
        }
    }

    #[test]
    fn single_baseline_single_time_single_freq_has_one_populated_cube() {
        let c = crate::constants::SPEED_OF_LIGHT;
        let spec = VisSpec::new(1, 0.0, 1.0, 1, 1, c, 1.0, 1, 0.0, 0.1, |_| 0.0);
        let ha_to_uvw = FixedUvw(0.3, -0.2, 0.1);
        let matrix = BaselineMatrix::build(2, &spec, &ha_to_uvw);
        let result = collect_baselines(&spec, &matrix, 1.0, 1.0, false);
        assert_eq!(result.cubes.len(), 1);
        assert_eq!(result.cubes[0].bls.len(), 1);
        assert_eq!(result.cubes[0].total_chunks(), 1);
    }

    #[test]
    fn cubes_are_emitted_in_iw_iu_iv_nested_order() {
        let c = crate::constants::SPEED_OF_LIGHT;
        let spec = VisSpec::new(4, 0.0, 1.0, 1, 4, c, 0.0, 1, 0.0, 0.3, |i| i as f64 * 0.2 - 0.3);
        let ha_to_uvw = FixedUvw(3.0, 2.0, 1.0);
        let matrix = BaselineMatrix::build(2, &spec, &ha_to_uvw);
        let result = collect_baselines(&spec, &matrix, 0.5, 0.5, false);
        let mut prev: Option<(i64, i64, i64)> = None;
        for cube in &result.cubes {
            if let Some((piw, piu, _piv)) = prev {
                assert!((cube.iw, cube.iu) >= (piw, piu));
            }
            prev = Some((cube.iw, cube.iu, cube.iv));
        }
    }

    #[test]
    fn baseline_chunk_totals_sums_across_cubes() {
        let bl = |a1: usize, a2: usize, chunks: usize| SubgridWorkBl {
            a1,
            a2,
            chunks,
            min_w: 0.0,
        };
        let result = BinningResult {
            nsubgrid: 1,
            nwlevels: 1,
            cubes: vec![
                Cube { iu: 0, iv: 0, iw: 0, bls: vec![bl(0, 1, 2), bl(0, 2, 1)] },
                Cube { iu: 1, iv: 0, iw: 0, bls: vec![bl(0, 1, 3)] },
            ],
        };
        let totals = baseline_chunk_totals(&result);
        assert_eq!(totals.get(&(0, 1)), Some(&5));
        assert_eq!(totals.get(&(0, 2)), Some(&1));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn dump_baseline_bins_reports_every_cube() {
        let c = crate::constants::SPEED_OF_LIGHT;
        let spec = VisSpec::new(1, 0.0, 1.0, 1, 1, c, 1.0, 1, 0.0, 0.1, |_| 0.0);
        let ha_to_uvw = FixedUvw(0.3, -0.2, 0.1);
        let matrix = BaselineMatrix::build(2, &spec, &ha_to_uvw);
        let result = collect_baselines(&spec, &matrix, 1.0, 1.0, false);
        let dump = dump_baseline_bins(&result);
        assert!(dump.contains("1 populated"));
        assert!(dump.contains("bl (  0,   1)"));
    }
}
