//! # Workload Model
//!
//! A [`ProcessSpec`] is the immutable description a user supplies: name,
//! arrival time, burst time and priority. A [`Process`] is the per-run
//! record built from it, carrying the mutable remaining burst and the
//! timing results a scheduling algorithm fills in.
//!
//! Records are never shared between runs. [`Workload::fresh_processes`]
//! builds a new set every time an algorithm is invoked.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// User-supplied description of a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Identifier, unique within a workload
    pub name: String,
    /// Time unit at which the process becomes eligible
    pub arrival_time: u64,
    /// Total CPU time required
    pub burst_time: u64,
    /// Lower value = higher priority
    #[serde(default)]
    pub priority: i64,
}

impl ProcessSpec {
    /// Creates a spec with default priority 0
    pub fn new(name: impl Into<String>, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }
}

/// Simulation record for one scheduled process
///
/// `completion_time`, `waiting_time` and `turnaround_time` are only
/// meaningful once [`Process::is_complete`] returns true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub arrival_time: u64,
    pub burst_time: u64,
    pub priority: i64,
    /// CPU time still owed; reaches 0 exactly once
    pub remaining_time: u64,
    pub completion_time: u64,
    pub waiting_time: u64,
    pub turnaround_time: u64,
}

impl Process {
    /// Creates a fresh record with `remaining_time == burst_time`
    pub fn new(name: impl Into<String>, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: 0,
            remaining_time: burst_time,
            completion_time: 0,
            waiting_time: 0,
            turnaround_time: 0,
        }
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Returns true once all CPU time has been granted
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Returns true if the process has arrived by `time` and still needs CPU
    pub fn is_ready_at(&self, time: u64) -> bool {
        self.arrival_time <= time && self.remaining_time > 0
    }

    /// Grants up to `ticks` units of CPU time
    ///
    /// Returns the time actually consumed, which is capped at the remaining burst.
    pub fn run_for(&mut self, ticks: u64) -> u64 {
        let used = ticks.min(self.remaining_time);
        self.remaining_time -= used;
        used
    }

    /// Records completion at `time` and derives turnaround and waiting time
    pub fn complete_at(&mut self, time: u64) {
        debug_assert!(time >= self.arrival_time + self.burst_time);
        self.remaining_time = 0;
        self.completion_time = time;
        self.turnaround_time = time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }
}

impl From<&ProcessSpec> for Process {
    fn from(spec: &ProcessSpec) -> Self {
        Process::new(spec.name.clone(), spec.arrival_time, spec.burst_time)
            .with_priority(spec.priority)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (arrival {}, burst {}, priority {})",
            self.name, self.arrival_time, self.burst_time, self.priority
        )
    }
}

/// Workload validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkloadError {
    #[error("Process name must not be empty")]
    EmptyName,

    #[error("Duplicate process name: {0}")]
    DuplicateName(String),

    #[error("Process {0} has zero burst time")]
    ZeroBurst(String),

    #[error("Workload does not fit the simulation clock: latest arrival plus total burst exceeds {}", u64::MAX)]
    TimeOverflow,
}

/// A validated set of process specs
///
/// Names are non-empty and unique, every burst is positive, and the latest
/// arrival plus the total burst fits in a `u64`, so every scheduling
/// algorithm terminates on the records this produces without its clock
/// overflowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Workload {
    specs: Vec<ProcessSpec>,
}

impl Workload {
    /// Validates and wraps the given specs, keeping their order
    pub fn new(specs: Vec<ProcessSpec>) -> Result<Self, WorkloadError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.name.is_empty() {
                return Err(WorkloadError::EmptyName);
            }
            if spec.burst_time == 0 {
                return Err(WorkloadError::ZeroBurst(spec.name.clone()));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(WorkloadError::DuplicateName(spec.name.clone()));
            }
        }

        // No schedule can end later than the last arrival plus all the work.
        let latest_arrival = specs.iter().map(|s| s.arrival_time).max().unwrap_or(0);
        specs
            .iter()
            .try_fold(latest_arrival, |end, s| end.checked_add(s.burst_time))
            .ok_or(WorkloadError::TimeOverflow)?;

        Ok(Self { specs })
    }

    /// Returns the specs in input order
    pub fn specs(&self) -> &[ProcessSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Builds a fresh record per spec, in input order
    pub fn fresh_processes(&self) -> Vec<Process> {
        self.specs.iter().map(Process::from).collect()
    }
}

impl<'de> Deserialize<'de> for Workload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let specs = Vec::<ProcessSpec>::deserialize(deserializer)?;
        Workload::new(specs).map_err(serde::de::Error::custom)
    }
}
