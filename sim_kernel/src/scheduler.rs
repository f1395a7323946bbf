//! CPU scheduling foundation
//!
//! Shared types for every scheduling algorithm: configuration, the audit
//! trail of scheduling decisions, and the outcome returned to callers.
//!
//! ## Philosophy
//!
//! - **Determinism first**: Same records in => same schedule out, every run.
//! - **Owned state**: A run takes ownership of its records and hands them
//!   back annotated. Nothing is retained between runs.
//! - **Explicit timeline**: Every dispatch, preemption, completion and idle
//!   gap is recorded, so the exact CPU timeline can be rebuilt.
//!
//! The algorithms themselves live in [`crate::batch`], [`crate::preemptive`]
//! and [`crate::round_robin`]; [`run_policy`] dispatches by name.

use core_types::Process;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default round-robin time slice
pub const DEFAULT_QUANTUM: u64 = 2;

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Ticks a round-robin turn may last before the process is requeued
    pub quantum_ticks: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quantum_ticks: DEFAULT_QUANTUM,
        }
    }
}

/// Scheduler configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("Round robin quantum must be greater than zero")]
    ZeroQuantum,
}

/// Scheduling algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulingPolicy {
    /// Historical "SJF": runs in arrival order, non-preemptive
    ShortestJobFirst,
    /// Historical non-preemptive priority: runs in arrival order, ignores priority
    NonPreemptivePriority,
    /// Preemptive priority, lowest value first
    PreemptivePriority,
    /// Round robin with a fixed quantum
    RoundRobin,
    /// Corrected SJF: shortest burst among arrived processes at each completion
    ShortestBurstFirst,
    /// Corrected non-preemptive priority: best priority among arrived processes
    ReadyPriority,
}

impl SchedulingPolicy {
    /// All policies, in menu order
    pub const ALL: [SchedulingPolicy; 6] = [
        SchedulingPolicy::ShortestJobFirst,
        SchedulingPolicy::NonPreemptivePriority,
        SchedulingPolicy::PreemptivePriority,
        SchedulingPolicy::RoundRobin,
        SchedulingPolicy::ShortestBurstFirst,
        SchedulingPolicy::ReadyPriority,
    ];

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            SchedulingPolicy::ShortestJobFirst => "Shortest Job First (SJF)",
            SchedulingPolicy::NonPreemptivePriority => "Non-Preemptive Priority",
            SchedulingPolicy::PreemptivePriority => "Pre-emptive Priority",
            SchedulingPolicy::RoundRobin => "Round Robin",
            SchedulingPolicy::ShortestBurstFirst => "Shortest Burst First (corrected SJF)",
            SchedulingPolicy::ReadyPriority => "Ready-Queue Priority (corrected)",
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Reason for preemption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreemptionReason {
    /// Round-robin time slice used up
    QuantumExpired,
    /// A process with better priority became ready
    HigherPriority,
}

/// Scheduling event for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEvent {
    /// Process was given the CPU
    Dispatched { process: String, timestamp_ticks: u64 },
    /// Process lost the CPU before finishing
    Preempted {
        process: String,
        reason: PreemptionReason,
        timestamp_ticks: u64,
    },
    /// Process finished its burst
    Completed { process: String, timestamp_ticks: u64 },
    /// Nothing was ready; the clock jumped forward
    Idle { from_ticks: u64, until_ticks: u64 },
}

/// Audit log of scheduling decisions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAuditLog {
    events: Vec<ScheduleEvent>,
}

impl ScheduleAuditLog {
    /// Creates a new empty audit log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records an event
    pub fn record(&mut self, event: ScheduleEvent) {
        trace!("{:?}", event);
        self.events.push(event);
    }

    pub(crate) fn dispatched(&mut self, process: &Process, timestamp_ticks: u64) {
        self.record(ScheduleEvent::Dispatched {
            process: process.name.clone(),
            timestamp_ticks,
        });
    }

    pub(crate) fn preempted(
        &mut self,
        process: &Process,
        reason: PreemptionReason,
        timestamp_ticks: u64,
    ) {
        self.record(ScheduleEvent::Preempted {
            process: process.name.clone(),
            reason,
            timestamp_ticks,
        });
    }

    pub(crate) fn completed(&mut self, process: &Process, timestamp_ticks: u64) {
        self.record(ScheduleEvent::Completed {
            process: process.name.clone(),
            timestamp_ticks,
        });
    }

    pub(crate) fn idle(&mut self, from_ticks: u64, until_ticks: u64) {
        if until_ticks > from_ticks {
            self.record(ScheduleEvent::Idle {
                from_ticks,
                until_ticks,
            });
        }
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    /// Checks if an event matching the predicate exists
    pub fn has_event<F>(&self, predicate: F) -> bool
    where
        F: Fn(&ScheduleEvent) -> bool,
    {
        self.events.iter().any(predicate)
    }

    /// Counts events matching the predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ScheduleEvent) -> bool,
    {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

/// One contiguous stretch of the CPU timeline
///
/// `process` is `None` for idle time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSlice {
    pub process: Option<String>,
    pub start: u64,
    pub end: u64,
}

impl CpuSlice {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn is_idle(&self) -> bool {
        self.process.is_none()
    }
}

/// Result of a scheduling run
///
/// The caller owns the records; results are tagged by process name, and
/// the order of `processes` is algorithm-defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub processes: Vec<Process>,
    pub audit: ScheduleAuditLog,
}

impl ScheduleOutcome {
    /// Looks up a record by name
    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Rebuilds the CPU timeline from the audit trail
    pub fn gantt(&self) -> Vec<CpuSlice> {
        let mut slices = Vec::new();
        let mut running: Option<(&str, u64)> = None;

        for event in self.audit.events() {
            match event {
                ScheduleEvent::Dispatched {
                    process,
                    timestamp_ticks,
                } => running = Some((process.as_str(), *timestamp_ticks)),
                ScheduleEvent::Preempted {
                    timestamp_ticks, ..
                }
                | ScheduleEvent::Completed {
                    timestamp_ticks, ..
                } => {
                    if let Some((name, start)) = running.take() {
                        slices.push(CpuSlice {
                            process: Some(name.to_string()),
                            start,
                            end: *timestamp_ticks,
                        });
                    }
                }
                ScheduleEvent::Idle {
                    from_ticks,
                    until_ticks,
                } => slices.push(CpuSlice {
                    process: None,
                    start: *from_ticks,
                    end: *until_ticks,
                }),
            }
        }

        slices
    }

    /// Names in the order processes finished
    pub fn completion_order(&self) -> Vec<&str> {
        self.audit
            .events()
            .iter()
            .filter_map(|event| match event {
                ScheduleEvent::Completed { process, .. } => Some(process.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Runs the selected policy over `processes`
pub fn run_policy(
    policy: SchedulingPolicy,
    config: &SchedulerConfig,
    processes: Vec<Process>,
) -> Result<ScheduleOutcome, SchedulerError> {
    debug!("{}: scheduling {} processes", policy, processes.len());
    let outcome = match policy {
        SchedulingPolicy::ShortestJobFirst => crate::batch::shortest_job_first(processes),
        SchedulingPolicy::NonPreemptivePriority => {
            crate::batch::non_preemptive_priority(processes)
        }
        SchedulingPolicy::PreemptivePriority => crate::preemptive::preemptive_priority(processes),
        SchedulingPolicy::RoundRobin => {
            crate::round_robin::round_robin(processes, config.quantum_ticks)?
        }
        SchedulingPolicy::ShortestBurstFirst => crate::batch::shortest_burst_first(processes),
        SchedulingPolicy::ReadyPriority => crate::batch::ready_priority(processes),
    };
    debug!(
        "{}: finished at tick {}",
        policy,
        outcome
            .processes
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or(0)
    );
    Ok(outcome)
}

/// Indices of `processes` sorted by arrival time, ties in input order
pub(crate) fn arrival_order(processes: &[Process]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by_key(|&i| processes[i].arrival_time);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 3).with_priority(2),
            Process::new("P2", 5, 2).with_priority(1),
        ]
    }

    #[test]
    fn test_default_quantum() {
        assert_eq!(SchedulerConfig::default().quantum_ticks, 2);
    }

    #[test]
    fn test_arrival_order_is_stable() {
        let processes = vec![
            Process::new("A", 3, 1),
            Process::new("B", 1, 1),
            Process::new("C", 3, 1),
            Process::new("D", 0, 1),
        ];
        assert_eq!(arrival_order(&processes), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_run_policy_rejects_zero_quantum() {
        let config = SchedulerConfig { quantum_ticks: 0 };
        assert_eq!(
            run_policy(SchedulingPolicy::RoundRobin, &config, sample()).unwrap_err(),
            SchedulerError::ZeroQuantum
        );
    }

    #[test]
    fn test_every_policy_handles_empty_input() {
        let config = SchedulerConfig::default();
        for policy in SchedulingPolicy::ALL {
            let outcome = run_policy(policy, &config, Vec::new()).unwrap();
            assert!(outcome.processes.is_empty());
            assert!(outcome.audit.events().is_empty());
            assert!(outcome.gantt().is_empty());
        }
    }

    #[test]
    fn test_gantt_includes_idle_gap() {
        let outcome = run_policy(
            SchedulingPolicy::ShortestJobFirst,
            &SchedulerConfig::default(),
            sample(),
        )
        .unwrap();

        let gantt = outcome.gantt();
        assert_eq!(gantt.len(), 3);
        assert_eq!(gantt[0].process.as_deref(), Some("P1"));
        assert_eq!((gantt[0].start, gantt[0].end), (0, 3));
        assert!(gantt[1].is_idle());
        assert_eq!((gantt[1].start, gantt[1].end), (3, 5));
        assert_eq!((gantt[2].start, gantt[2].end), (5, 7));
    }

    #[test]
    fn test_audit_log_queries() {
        let outcome = run_policy(
            SchedulingPolicy::PreemptivePriority,
            &SchedulerConfig::default(),
            sample(),
        )
        .unwrap();

        assert_eq!(
            outcome
                .audit
                .count_events(|e| matches!(e, ScheduleEvent::Completed { .. })),
            2
        );
        assert!(outcome
            .audit
            .has_event(|e| matches!(e, ScheduleEvent::Idle { from_ticks: 3, until_ticks: 5 })));
        assert_eq!(outcome.completion_order(), vec!["P1", "P2"]);
    }
}
