//! # CLI Console
//!
//! The thin shell around the simulation engine. It turns user text into
//! validated workloads and traces, calls exactly one algorithm, and renders
//! the result.
//!
//! ## Modules
//!
//! - [`workload_script`]: process-line and page-list parsing, file loading
//! - [`commands`]: running a policy, averages and rates, table rendering
//! - [`interactive`]: the menu-driven console

pub mod commands;
pub mod interactive;
pub mod workload_script;

pub use commands::{
    paging_summary, render_paging, render_schedule, run_schedule, summarize, PagingAlgorithm,
    PagingSummary, ScheduleSummary,
};
pub use interactive::InteractiveConsole;
pub use workload_script::{
    load_workload, parse_pages, parse_process_line, parse_trace, parse_workload,
    parse_workload_json, ScriptError,
};
