//! Preemptive priority scheduling
//!
//! At every time unit the CPU belongs to the ready process with the
//! numerically smallest priority. Ties go to the earliest arrival, then to
//! input order.
//!
//! The simulation is event-driven rather than tick-by-tick. Between two
//! arrivals the ready set only shrinks when the running process completes,
//! so the chosen process keeps the CPU until it finishes or the next
//! arrival, whichever comes first. Preemption points are the same as a
//! per-tick rescan would produce.

use crate::scheduler::{arrival_order, PreemptionReason, ScheduleAuditLog, ScheduleOutcome};
use core_types::Process;

/// Preemptive priority, lowest priority value first
///
/// Records are returned in input order.
pub fn preemptive_priority(mut processes: Vec<Process>) -> ScheduleOutcome {
    let order = arrival_order(&processes);
    let mut audit = ScheduleAuditLog::new();
    let mut time = 0;
    let mut remaining = processes.len();
    let mut running: Option<usize> = None;

    while remaining > 0 {
        let selected = order
            .iter()
            .copied()
            .filter(|&i| processes[i].is_ready_at(time))
            .min_by_key(|&i| processes[i].priority);

        let Some(index) = selected else {
            let arrival = next_arrival_after(&processes, &order, None).unwrap_or(time);
            audit.idle(time, arrival);
            time = arrival;
            continue;
        };

        if running != Some(index) {
            if let Some(previous) = running {
                audit.preempted(&processes[previous], PreemptionReason::HigherPriority, time);
            }
            audit.dispatched(&processes[index], time);
            running = Some(index);
        }

        let left = processes[index].remaining_time;
        let budget = match next_arrival_after(&processes, &order, Some(time)) {
            Some(arrival) => (arrival - time).min(left),
            None => left,
        };

        let process = &mut processes[index];
        time += process.run_for(budget);
        if process.is_complete() {
            process.complete_at(time);
            audit.completed(process, time);
            running = None;
            remaining -= 1;
        }
    }

    ScheduleOutcome { processes, audit }
}

/// Earliest arrival among unfinished processes, strictly after `after` if given
fn next_arrival_after(processes: &[Process], order: &[usize], after: Option<u64>) -> Option<u64> {
    order
        .iter()
        .map(|&i| &processes[i])
        .filter(|p| !p.is_complete())
        .map(|p| p.arrival_time)
        .find(|&arrival| after.map_or(true, |t| arrival > t))
}
