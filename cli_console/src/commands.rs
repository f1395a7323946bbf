//! Simulation commands and result rendering
//!
//! Runs the engine on parsed input and renders its output as text tables.
//! Averages and rates are computed here, never inside the engine.

use core_types::{PageTrace, PagingReport, Process, Workload};
use serde::Serialize;
use sim_kernel::{
    fifo_paging, optimal_paging, run_policy, ScheduleOutcome, SchedulerConfig, SchedulerError,
    SchedulingPolicy,
};
use std::fmt::{self, Display, Write as _};
use std::hash::Hash;

const RULE_WIDTH: usize = 80;

/// Page replacement algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PagingAlgorithm {
    Fifo,
    Optimal,
}

impl PagingAlgorithm {
    pub const ALL: [PagingAlgorithm; 2] = [PagingAlgorithm::Fifo, PagingAlgorithm::Optimal];

    pub fn title(&self) -> &'static str {
        match self {
            PagingAlgorithm::Fifo => "FIFO Page Replacement",
            PagingAlgorithm::Optimal => "Optimal Page Replacement",
        }
    }

    /// Replays `trace` with this algorithm
    pub fn run<P: Clone + Eq + Hash>(&self, trace: &PageTrace<P>) -> PagingReport<P> {
        match self {
            PagingAlgorithm::Fifo => fifo_paging(trace),
            PagingAlgorithm::Optimal => optimal_paging(trace),
        }
    }
}

impl fmt::Display for PagingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Mean waiting and turnaround time of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub average_waiting: f64,
    pub average_turnaround: f64,
}

/// Averages over `processes`; `None` when there are none
pub fn summarize(processes: &[Process]) -> Option<ScheduleSummary> {
    if processes.is_empty() {
        return None;
    }
    let count = processes.len() as f64;
    let waiting: u64 = processes.iter().map(|p| p.waiting_time).sum();
    let turnaround: u64 = processes.iter().map(|p| p.turnaround_time).sum();
    Some(ScheduleSummary {
        average_waiting: waiting as f64 / count,
        average_turnaround: turnaround as f64 / count,
    })
}

/// Fault and hit rates in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PagingSummary {
    pub total: usize,
    pub failure_rate: f64,
    pub success_rate: f64,
}

/// Rates over a report; both are 0 for an empty trace
pub fn paging_summary<P>(report: &PagingReport<P>) -> PagingSummary {
    let total = report.total();
    let rate = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    };
    PagingSummary {
        total,
        failure_rate: rate(report.faults),
        success_rate: rate(report.hits),
    }
}

/// Runs `policy` on fresh records built from `workload`
pub fn run_schedule(
    policy: SchedulingPolicy,
    config: &SchedulerConfig,
    workload: &Workload,
) -> Result<ScheduleOutcome, SchedulerError> {
    run_policy(policy, config, workload.fresh_processes())
}

/// Renders the process table, averages and Gantt line
pub fn render_schedule(title: &str, outcome: &ScheduleOutcome) -> String {
    let mut out = String::new();
    write_banner(&mut out, title);

    let _ = writeln!(
        out,
        "{:<8}{:<10}{:<10}{:<12}{:<12}{:<12}",
        "PID", "Arrival", "Burst", "Completion", "Waiting", "Turnaround"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for p in &outcome.processes {
        let _ = writeln!(
            out,
            "{:<8}{:<10}{:<10}{:<12}{:<12}{:<12}",
            p.name, p.arrival_time, p.burst_time, p.completion_time, p.waiting_time,
            p.turnaround_time
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    match summarize(&outcome.processes) {
        Some(summary) => {
            let _ = writeln!(
                out,
                "Average Waiting: {:.2}  |  Average Turnaround: {:.2}",
                summary.average_waiting, summary.average_turnaround
            );
        }
        None => {
            let _ = writeln!(out, "No processes");
        }
    }

    let gantt = outcome.gantt();
    if !gantt.is_empty() {
        let _ = write!(out, "Gantt: |");
        for slice in &gantt {
            let label = slice.process.as_deref().unwrap_or("idle");
            let _ = write!(out, " {} {}-{} |", label, slice.start, slice.end);
        }
        let _ = writeln!(out);
    }

    out
}

/// Renders the per-access table and fault/hit totals
pub fn render_paging<P: Display>(title: &str, report: &PagingReport<P>) -> String {
    let mut out = String::new();
    write_banner(&mut out, title);

    let _ = writeln!(out, "{:<8}{:<10}{:<50}", "Page", "Result", "Memory");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for access in &report.log {
        let memory = format!(
            "[{}]",
            access
                .frames
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let _ = writeln!(
            out,
            "{:<8}{:<10}{:<50}",
            access.page.to_string(),
            access.outcome.to_string(),
            memory
        );
    }

    let summary = paging_summary(report);
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Total Pages Accessed: {}", summary.total);
    let _ = writeln!(
        out,
        "Page Faults: {}  |  Failure Rate: {:.2}%",
        report.faults, summary.failure_rate
    );
    let _ = writeln!(
        out,
        "Page Hits: {}  |  Success Rate: {:.2}%",
        report.hits, summary.success_rate
    );

    out
}

fn write_banner(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}
