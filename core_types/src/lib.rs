//! # Core Types
//!
//! This crate defines the data model shared by the OSSim scheduling and
//! paging simulators.
//!
//! ## Philosophy
//!
//! - **Fresh state per run**: Scheduling records are consumed by the run they
//!   are passed to and never reused.
//! - **Validate at the edge**: [`Workload`] and [`PageTrace`] reject input the
//!   algorithms cannot terminate on, so the algorithms themselves are total.
//! - **Serializable results**: Every type round-trips through serde so the
//!   shell can read JSON workloads and emit JSON results.
//!
//! ## Key Types
//!
//! - [`ProcessSpec`] / [`Workload`]: user-supplied process descriptions
//! - [`Process`]: per-run scheduling record with timing results
//! - [`PageTrace`]: frame count and page reference string
//! - [`FrameSet`]: resident pages in insertion order
//! - [`PagingReport`]: per-access log with fault and hit counters

pub mod memory;
pub mod process;

pub use memory::{AccessOutcome, FrameSet, PageAccess, PageTrace, PagingReport, TraceError};
pub use process::{Process, ProcessSpec, Workload, WorkloadError};
