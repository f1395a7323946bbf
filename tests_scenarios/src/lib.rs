//! Scenario Test Utilities
//!
//! Shared helpers for the integration suites under `tests/`.
//!
//! ## Test Philosophy
//!
//! - **Known answers**: Hand-computed schedules and fault counts pin exact behavior
//! - **Invariants over many inputs**: Generated workloads and traces check the
//!   properties every run must satisfy
//! - **Reproducible generation**: Inputs come from a seeded generator, never
//!   from the wall clock

use core_types::{PageTrace, Process, ProcessSpec, Workload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_kernel::ScheduleOutcome;
use std::collections::HashMap;

/// Builds a workload from `(name, arrival, burst, priority)` tuples
pub fn workload(rows: &[(&str, u64, u64, i64)]) -> Workload {
    let specs = rows
        .iter()
        .map(|&(name, arrival, burst, priority)| {
            ProcessSpec::new(name, arrival, burst).with_priority(priority)
        })
        .collect();
    Workload::new(specs).expect("test workload must be valid")
}

/// Generated workload of `count` processes
pub fn generated_workload(seed: u64, count: usize) -> Workload {
    let mut rng = StdRng::seed_from_u64(seed);
    let specs = (0..count)
        .map(|i| {
            ProcessSpec::new(format!("P{}", i + 1), rng.gen_range(0..=15), rng.gen_range(1..=9))
                .with_priority(rng.gen_range(0..=4))
        })
        .collect();
    Workload::new(specs).expect("generated workload must be valid")
}

/// Generated trace over `distinct` page ids
pub fn generated_trace(seed: u64, frames: usize, len: usize, distinct: u64) -> PageTrace<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pages = (0..len).map(|_| rng.gen_range(0..distinct)).collect();
    PageTrace::new(frames, pages).expect("generated trace must be valid")
}

/// Total CPU time granted to each process, from the Gantt timeline
pub fn cpu_time_by_process(outcome: &ScheduleOutcome) -> HashMap<String, u64> {
    let mut totals = HashMap::new();
    for slice in outcome.gantt() {
        if let Some(name) = &slice.process {
            *totals.entry(name.clone()).or_insert(0) += slice.len();
        }
    }
    totals
}

/// Checks the timing invariants every finished record must satisfy
pub fn assert_timing_invariants(processes: &[Process]) {
    for p in processes {
        assert!(p.is_complete(), "{} did not complete", p.name);
        assert_eq!(p.turnaround_time, p.completion_time - p.arrival_time, "{}", p.name);
        assert_eq!(p.waiting_time, p.turnaround_time - p.burst_time, "{}", p.name);
        assert!(
            p.completion_time >= p.arrival_time + p.burst_time,
            "{} completed too early",
            p.name
        );
    }
}

/// Checks that the timeline never overlaps and never runs a process early
pub fn assert_valid_timeline(outcome: &ScheduleOutcome) {
    let gantt = outcome.gantt();
    for pair in gantt.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "overlapping slices {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
    for slice in &gantt {
        assert!(!slice.is_empty(), "empty slice {:?}", slice);
        if let Some(name) = &slice.process {
            let p = outcome.process(name).expect("slice names a known process");
            assert!(slice.start >= p.arrival_time, "{} ran before arrival", name);
            assert!(slice.end <= p.completion_time, "{} ran after completion", name);
        }
    }
}
