// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end schedule generation scenarios, exercised through the public
//! `Schedule::generate` entry point and the component APIs it's built from.

use assert_cmd::Command;
use subgrid_scheduler::balance::{balance, deal};
use subgrid_scheduler::binning::{dump_baseline_bins, BinningResult, Cube};
use subgrid_scheduler::config::{AntennaConfig, RecombineConfig, WorkConfig};
use subgrid_scheduler::constants::SPEED_OF_LIGHT;
use subgrid_scheduler::geometry::{BaselineMatrix, HaToUvw, VisSpec};
use subgrid_scheduler::schedule::Schedule;
use subgrid_scheduler::split::split_cubes;
use subgrid_scheduler::work::SubgridWorkBl;

struct FixedUvw(f64, f64, f64);
impl HaToUvw for FixedUvw {
    fn ha_to_uvw(&self, _: usize, _: usize, _: f64, _: f64, _: f64, _: f64) -> [f64; 3] {
        [self.0, self.1, self.2]
    }
}

fn recombine() -> RecombineConfig {
    RecombineConfig {
        image_size: 64,
        xa_size: 16,
        yb_size: 8,
    }
}

/// S1: a single baseline, single time, single frequency sample produces
/// exactly one populated cube with one chunk.
#[test]
fn s1_single_baseline_single_sample() {
    let vis = VisSpec::new(1, 0.0, 1.0, 1, 1, SPEED_OF_LIGHT, 1.0, 1, 0.0, 0.2, |_| 0.0);
    let matrix = BaselineMatrix::build(2, &vis, &FixedUvw(1.0, 0.0, 0.0));
    let config = WorkConfig {
        antenna: AntennaConfig { antenna_count: 2 },
        recombine: Some(recombine()),
        subgrid_workers: 1,
        facet_workers: 1,
        lam_sg: 1.0,
        wstep_sg: 1.0,
        fov: 0.2,
        dump_baseline_bins: false,
        dump_subgrid_work: false,
    };
    let schedule = Schedule::generate(&config, &vis, &matrix).unwrap();
    assert_eq!(schedule.subgrid_work_count(), 1);
    let item = schedule
        .subgrid_work
        .iter()
        .flatten()
        .find(|w| !w.is_empty())
        .unwrap();
    assert_eq!(item.nbl, 1);
    assert_eq!(item.bls.len(), 1);
    assert_eq!(item.bls[0].chunks, 1);
}

/// S2: a single worker never needs to swap.
#[test]
fn s2_single_worker_needs_no_swaps() {
    let vis = VisSpec::new(4, 0.0, 0.3, 2, 4, SPEED_OF_LIGHT, 1e6, 2, 0.0, 0.2, |i| i as f64 * 0.3);
    let matrix = BaselineMatrix::build(3, &vis, &FixedUvw(5.0, 3.0, 1.0));
    let config = WorkConfig {
        antenna: AntennaConfig { antenna_count: 3 },
        recombine: Some(recombine()),
        subgrid_workers: 1,
        facet_workers: 1,
        lam_sg: 1.0,
        wstep_sg: 1.0,
        fov: 0.2,
        dump_baseline_bins: false,
        dump_subgrid_work: false,
    };
    let schedule = Schedule::generate(&config, &vis, &matrix).unwrap();
    assert_eq!(schedule.subgrid_work.len(), 1);
    assert_eq!(schedule.swaps, 0);
}

/// S3: a cube with a pathologically large baseline list splits into exactly
/// the items the soft chunk cap dictates, and dealing them round-robin
/// across 2 workers already balances their totals.
#[test]
fn s3_pathological_cube_splits_and_balances() {
    let bl = |a2: usize, min_w: f64| SubgridWorkBl {
        a1: 0,
        a2,
        chunks: 3,
        min_w,
    };
    let cube = Cube {
        iu: 0,
        iv: 0,
        iw: 0,
        bls: vec![bl(1, 0.0), bl(2, 1.0), bl(3, 2.0), bl(4, 3.0)],
    };
    assert_eq!(cube.total_chunks(), 12);

    let items = split_cubes(&[cube], 3, 16);
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|w| w.nbl == 3));

    let mut rows = deal(items, 2);
    let swaps = balance(&mut rows);
    let totals: Vec<usize> = rows.iter().map(|r| r.iter().map(|w| w.nbl).sum()).collect();
    assert_eq!(totals, vec![6, 6]);
    let _ = swaps;
}

/// S4: with no visibilities, the full-redistribute fallback tiles the image
/// plane and deals it round-robin, one dummy baseline per subgrid.
#[test]
fn s4_no_visibilities_takes_the_fallback_path() {
    let vis = VisSpec::new(0, 0.0, 1.0, 1, 1, SPEED_OF_LIGHT, 1.0, 1, 0.0, 0.2, |_| 0.0);
    let matrix = BaselineMatrix::build(2, &vis, &FixedUvw(0.0, 0.0, 0.0));
    let config = WorkConfig {
        antenna: AntennaConfig { antenna_count: 2 },
        recombine: Some(recombine()),
        subgrid_workers: 4,
        facet_workers: 4,
        lam_sg: 1.0,
        wstep_sg: 1.0,
        fov: 0.2,
        dump_baseline_bins: false,
        dump_subgrid_work: false,
    };
    let schedule = Schedule::generate(&config, &vis, &matrix).unwrap();
    assert_eq!(schedule.subgrid_work.len(), 4);
    assert_eq!(schedule.subgrid_work_count(), 16);
    for item in schedule.subgrid_work.iter().flatten() {
        assert_eq!(item.nbl, 1);
    }
    assert_eq!(schedule.swaps, 0);
}

/// S5: `dump_baseline_bins` reports the pathological cube's true chunk total.
#[test]
fn s5_dump_baseline_bins_reports_total_chunks() {
    let bl = |a2: usize, min_w: f64| SubgridWorkBl {
        a1: 0,
        a2,
        chunks: 3,
        min_w,
    };
    let result = BinningResult {
        nsubgrid: 1,
        nwlevels: 1,
        cubes: vec![Cube {
            iu: 0,
            iv: 0,
            iw: 0,
            bls: vec![bl(1, 0.0), bl(2, 1.0), bl(3, 2.0), bl(4, 3.0)],
        }],
    };
    let dump = dump_baseline_bins(&result);
    assert!(dump.contains("12 chunk(s)"));
}

/// S6: the balancer converges from (10, 2) to (6, 6) in one swap, then a
/// second sweep is a no-op.
#[test]
fn s6_balancer_converges_then_stops() {
    let work = |nbl: usize| {
        let mut w = subgrid_scheduler::work::SubgridWork::empty();
        w.nbl = nbl;
        w
    };
    let mut rows = vec![vec![work(6), work(4)], vec![work(2), work(0)]];
    let swaps = balance(&mut rows);
    assert_eq!(swaps, 1);
    let totals: Vec<usize> = rows.iter().map(|r| r.iter().map(|w| w.nbl).sum()).collect();
    assert_eq!(totals, vec![6, 6]);
    assert_eq!(balance(&mut rows), 0);
}

/// The CLI binary runs end-to-end on its defaults and reports a schedule
/// summary without panicking.
#[test]
fn cli_runs_on_defaults_and_reports_a_summary() {
    let output = Command::cargo_bin("subgrid-scheduler")
        .unwrap()
        .arg("--antenna-count")
        .arg("4")
        .arg("--time-count")
        .arg("2")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("schedule:"));
}
