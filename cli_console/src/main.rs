//! # OSSim
//!
//! Command-line entry point for the scheduling and paging simulators.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cli_console::{
    load_workload, parse_trace, parse_workload, render_paging, render_schedule, run_schedule,
    InteractiveConsole, PagingAlgorithm,
};
use log::{debug, info};
use sim_kernel::{SchedulerConfig, SchedulingPolicy, DEFAULT_QUANTUM};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// ossim: CPU scheduling and page replacement simulator
///
/// Computes the exact timeline and metrics a textbook policy produces for a
/// workload (NAME ARRIVAL BURST [PRIORITY] per line) or a page reference
/// string.
#[derive(Debug, Parser)]
#[clap(name = "ossim", version)]
struct Opts {
    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a CPU scheduling algorithm over a workload.
    Cpu {
        /// Scheduling algorithm.
        #[clap(short = 'a', long, value_enum, default_value = "all")]
        algorithm: CpuAlgorithm,

        /// Round robin time slice.
        #[clap(short = 'q', long, default_value_t = DEFAULT_QUANTUM)]
        quantum: u64,

        /// Workload file (text, or JSON when ending in .json). Reads stdin if absent.
        #[clap(short = 'w', long)]
        workload: Option<PathBuf>,

        /// Print the engine output as JSON instead of tables.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Run a page replacement algorithm over a reference string.
    Paging {
        /// Replacement algorithm.
        #[clap(short = 'a', long, value_enum, default_value = "both")]
        algorithm: PagingChoice,

        /// Number of physical frames.
        #[clap(short = 'f', long)]
        frames: usize,

        /// Space-separated page numbers.
        #[clap(short = 'p', long, conflicts_with = "trace")]
        pages: Option<String>,

        /// File holding the page numbers. Reads stdin if neither this nor --pages is given.
        #[clap(short = 't', long)]
        trace: Option<PathBuf>,

        /// Print the engine output as JSON instead of tables.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Start the menu-driven console.
    Interactive {
        /// Round robin time slice.
        #[clap(short = 'q', long, default_value_t = DEFAULT_QUANTUM)]
        quantum: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CpuAlgorithm {
    Sjf,
    NpPriority,
    Priority,
    Rr,
    Sbf,
    ReadyPriority,
    All,
}

impl CpuAlgorithm {
    fn policies(self) -> Vec<SchedulingPolicy> {
        match self {
            CpuAlgorithm::Sjf => vec![SchedulingPolicy::ShortestJobFirst],
            CpuAlgorithm::NpPriority => vec![SchedulingPolicy::NonPreemptivePriority],
            CpuAlgorithm::Priority => vec![SchedulingPolicy::PreemptivePriority],
            CpuAlgorithm::Rr => vec![SchedulingPolicy::RoundRobin],
            CpuAlgorithm::Sbf => vec![SchedulingPolicy::ShortestBurstFirst],
            CpuAlgorithm::ReadyPriority => vec![SchedulingPolicy::ReadyPriority],
            CpuAlgorithm::All => SchedulingPolicy::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PagingChoice {
    Fifo,
    Optimal,
    Both,
}

impl PagingChoice {
    fn algorithms(self) -> Vec<PagingAlgorithm> {
        match self {
            PagingChoice::Fifo => vec![PagingAlgorithm::Fifo],
            PagingChoice::Optimal => vec![PagingAlgorithm::Optimal],
            PagingChoice::Both => PagingAlgorithm::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    match opts.command {
        Command::Cpu {
            algorithm,
            quantum,
            workload,
            json,
        } => run_cpu(algorithm, quantum, workload, json),
        Command::Paging {
            algorithm,
            frames,
            pages,
            trace,
            json,
        } => run_paging(algorithm, frames, pages, trace, json),
        Command::Interactive { quantum } => {
            let config = SchedulerConfig {
                quantum_ticks: quantum,
            };
            let stdin = io::stdin();
            let mut console = InteractiveConsole::with_config(stdin.lock(), io::stdout(), config);
            console.run().context("Interactive console failed")
        }
    }
}

fn run_cpu(
    algorithm: CpuAlgorithm,
    quantum: u64,
    path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let workload = match path {
        Some(path) => load_workload(&path)
            .with_context(|| format!("Failed to load workload {}", path.display()))?,
        None => parse_workload(&read_stdin()?).context("Failed to parse workload from stdin")?,
    };
    if workload.is_empty() {
        bail!("No processes");
    }
    info!("Loaded {} processes", workload.len());

    let config = SchedulerConfig {
        quantum_ticks: quantum,
    };
    let mut outcomes = Vec::new();
    for policy in algorithm.policies() {
        let outcome = run_schedule(policy, &config, &workload)
            .with_context(|| format!("{} failed", policy))?;
        outcomes.push((policy, outcome));
    }

    if json {
        let value: Vec<_> = outcomes
            .iter()
            .map(|(policy, outcome)| serde_json::json!({ "policy": policy, "outcome": outcome }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (policy, outcome) in &outcomes {
            print!("{}", render_schedule(policy.title(), outcome));
        }
    }
    Ok(())
}

fn run_paging(
    choice: PagingChoice,
    frames: usize,
    pages: Option<String>,
    path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let text = match (pages, path) {
        (Some(pages), _) => pages,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read trace {}", path.display()))?,
        (None, None) => read_stdin()?,
    };
    let trace = parse_trace(frames, &text).context("Invalid page trace")?;
    debug!("Trace of {} references over {} frames", trace.len(), frames);

    let reports: Vec<_> = choice
        .algorithms()
        .into_iter()
        .map(|algorithm| (algorithm, algorithm.run(&trace)))
        .collect();

    if json {
        let value: Vec<_> = reports
            .iter()
            .map(|(algorithm, report)| {
                serde_json::json!({ "algorithm": algorithm, "report": report })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (algorithm, report) in &reports {
            print!("{}", render_paging(algorithm.title(), report));
        }
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}
