//! Paging Scenario Tests
//!
//! Known fault counts for FIFO and Optimal, and the bounds relating them.

use core_types::{AccessOutcome, PageTrace};
use sim_kernel::{fifo_paging, optimal_paging};
use tests_scenarios::generated_trace;

fn scenario_trace() -> PageTrace<u64> {
    PageTrace::new(3, vec![1, 2, 3, 4, 1, 2, 5]).unwrap()
}

/// Test: FIFO with 3 frames faults on every reference of 1 2 3 4 1 2 5
#[test]
fn test_scenario_c_fifo() {
    let report = fifo_paging(&scenario_trace());
    assert_eq!(report.faults, 7);
    assert_eq!(report.hits, 0);

    let evicted: Vec<Option<u64>> = report.log.iter().map(|a| a.evicted).collect();
    assert_eq!(
        evicted,
        vec![None, None, None, Some(1), Some(2), Some(3), Some(4)]
    );
}

/// Test: Optimal on the same trace never does worse than FIFO
#[test]
fn test_scenario_d_optimal() {
    let optimal = optimal_paging(&scenario_trace());
    let fifo = fifo_paging(&scenario_trace());
    assert!(optimal.faults <= fifo.faults);
    assert_eq!(optimal.faults, 5);
    assert_eq!(optimal.hits, 2);
}

/// Test: counters add up and the frame set stays within capacity
#[test]
fn test_counters_and_capacity() {
    for frames in 1..=5 {
        for seed in 0..20 {
            let trace = generated_trace(seed, frames, 40, 8);
            for report in [fifo_paging(&trace), optimal_paging(&trace)] {
                assert_eq!(report.faults + report.hits, trace.len());
                assert_eq!(report.log.len(), trace.len());
                for (access, page) in report.log.iter().zip(trace.pages()) {
                    assert_eq!(&access.page, page);
                    assert!(access.frames.len() <= frames);
                    assert!(access.frames.contains(page));
                    if access.outcome == AccessOutcome::Hit {
                        assert!(access.evicted.is_none());
                    }
                }
            }
        }
    }
}

/// Test: Optimal is a lower bound on FIFO faults
#[test]
fn test_optimal_never_exceeds_fifo() {
    for frames in 1..=6 {
        for seed in 0..40 {
            let trace = generated_trace(seed, frames, 60, 10);
            let optimal = optimal_paging(&trace);
            let fifo = fifo_paging(&trace);
            assert!(
                optimal.faults <= fifo.faults,
                "frames {} seed {}: optimal {} > fifo {}",
                frames,
                seed,
                optimal.faults,
                fifo.faults
            );
        }
    }
}

/// Test: FIFO shows Belady's anomaly on the classic trace
#[test]
fn test_fifo_belady_anomaly() {
    let pages = vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];
    let three = fifo_paging(&PageTrace::new(3, pages.clone()).unwrap());
    let four = fifo_paging(&PageTrace::new(4, pages.clone()).unwrap());
    assert_eq!(three.faults, 9);
    assert_eq!(four.faults, 10);

    let optimal_three = optimal_paging(&PageTrace::new(3, pages.clone()).unwrap());
    let optimal_four = optimal_paging(&PageTrace::new(4, pages).unwrap());
    assert!(optimal_four.faults <= optimal_three.faults);
}

/// Test: compulsory faults only when the frames hold every distinct page
#[test]
fn test_enough_frames_means_only_cold_misses() {
    let trace = generated_trace(7, 10, 50, 10);
    let distinct: std::collections::HashSet<_> = trace.pages().iter().collect();
    assert_eq!(fifo_paging(&trace).faults, distinct.len());
    assert_eq!(optimal_paging(&trace).faults, distinct.len());
}

/// Test: replaying the same trace yields identical reports
#[test]
fn test_determinism() {
    let trace = generated_trace(3, 4, 30, 7);
    assert_eq!(fifo_paging(&trace), fifo_paging(&trace));
    assert_eq!(optimal_paging(&trace), optimal_paging(&trace));
}

/// Test: an empty trace yields an empty log
#[test]
fn test_empty_trace() {
    let trace = PageTrace::new(3, Vec::<u64>::new()).unwrap();
    let report = fifo_paging(&trace);
    assert!(report.log.is_empty());
    assert_eq!((report.faults, report.hits), (0, 0));
}

/// Test: reports serialize with upper-case outcomes
#[test]
fn test_report_json_shape() {
    let report = fifo_paging(&PageTrace::new(1, vec![4u64, 4]).unwrap());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["log"][0]["outcome"], "FAULT");
    assert_eq!(json["log"][1]["outcome"], "HIT");
    assert_eq!(json["faults"], 1);
}
