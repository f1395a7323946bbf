//! Non-preemptive schedulers
//!
//! Once a process gets the CPU it runs its whole burst.
//!
//! [`shortest_job_first`] and [`non_preemptive_priority`] keep their
//! historical behavior: both run processes strictly in arrival order and
//! consult neither burst length nor priority. [`shortest_burst_first`] and
//! [`ready_priority`] are the corrected variants, choosing among arrived
//! processes at every completion point.

use crate::scheduler::{arrival_order, ScheduleAuditLog, ScheduleOutcome};
use core_types::Process;

/// Historical SJF: first-come first-served by arrival time
///
/// Returns the records in arrival order (ties keep input order).
pub fn shortest_job_first(processes: Vec<Process>) -> ScheduleOutcome {
    run_in_arrival_order(processes)
}

/// Historical non-preemptive priority: identical to [`shortest_job_first`]
///
/// Priority values are accepted but not consulted.
pub fn non_preemptive_priority(processes: Vec<Process>) -> ScheduleOutcome {
    run_in_arrival_order(processes)
}

/// Non-preemptive shortest burst among arrived processes
///
/// Ties go to the earlier arrival, then to input order. Records are
/// returned in input order.
pub fn shortest_burst_first(processes: Vec<Process>) -> ScheduleOutcome {
    run_by_key(processes, |p| p.burst_time)
}

/// Non-preemptive best priority (lowest value) among arrived processes
///
/// Ties go to the earlier arrival, then to input order. Records are
/// returned in input order.
pub fn ready_priority(processes: Vec<Process>) -> ScheduleOutcome {
    run_by_key(processes, |p| p.priority)
}

fn run_in_arrival_order(mut processes: Vec<Process>) -> ScheduleOutcome {
    processes.sort_by_key(|p| p.arrival_time);

    let mut audit = ScheduleAuditLog::new();
    let mut time = 0;

    for process in processes.iter_mut() {
        if time < process.arrival_time {
            audit.idle(time, process.arrival_time);
            time = process.arrival_time;
        }
        audit.dispatched(process, time);
        let burst = process.remaining_time;
        time += process.run_for(burst);
        process.complete_at(time);
        audit.completed(process, time);
    }

    ScheduleOutcome { processes, audit }
}

fn run_by_key<K, F>(mut processes: Vec<Process>, key: F) -> ScheduleOutcome
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let order = arrival_order(&processes);
    let mut audit = ScheduleAuditLog::new();
    let mut time = 0;
    let mut remaining = processes.len();

    while remaining > 0 {
        // `order` is arrival-sorted, so min_by_key keeps the earliest arrival on ties
        let next = order
            .iter()
            .copied()
            .filter(|&i| processes[i].is_ready_at(time))
            .min_by_key(|&i| key(&processes[i]));

        let Some(index) = next else {
            let arrival = order
                .iter()
                .map(|&i| &processes[i])
                .filter(|p| !p.is_complete())
                .map(|p| p.arrival_time)
                .min()
                .unwrap_or(time);
            audit.idle(time, arrival);
            time = arrival;
            continue;
        };

        let process = &mut processes[index];
        audit.dispatched(process, time);
        let burst = process.remaining_time;
        time += process.run_for(burst);
        process.complete_at(time);
        audit.completed(process, time);
        remaining -= 1;
    }

    ScheduleOutcome { processes, audit }
}
