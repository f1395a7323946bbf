//! # Simulated Kernel
//!
//! The OSSim simulation engine: CPU scheduling and page replacement.
//!
//! ## Purpose
//!
//! Given a workload or a page trace, compute the exact timeline and the
//! derived metrics a textbook policy would produce:
//! - Runs under `cargo test`
//! - Deterministic (no randomness, no wall clock)
//! - Single-threaded; every call owns its state
//! - Inspectable (every scheduling decision lands in an audit log)
//!
//! ## Scheduling
//!
//! Each algorithm consumes fresh [`core_types::Process`] records and returns
//! them annotated in a [`ScheduleOutcome`]. See [`SchedulingPolicy`] for the
//! full list and [`run_policy`] to select one at runtime.
//!
//! ## Paging
//!
//! [`fifo_paging`] and [`optimal_paging`] replay a [`core_types::PageTrace`]
//! and return a [`core_types::PagingReport`].

pub mod batch;
pub mod paging;
pub mod preemptive;
pub mod round_robin;
pub mod scheduler;

pub use batch::{non_preemptive_priority, ready_priority, shortest_burst_first, shortest_job_first};
pub use paging::{fifo_paging, optimal_paging, simulate, Fifo, Optimal, ReplacementPolicy};
pub use preemptive::preemptive_priority;
pub use round_robin::round_robin;
pub use scheduler::{
    run_policy, CpuSlice, PreemptionReason, ScheduleAuditLog, ScheduleEvent, ScheduleOutcome,
    SchedulerConfig, SchedulerError, SchedulingPolicy, DEFAULT_QUANTUM,
};
