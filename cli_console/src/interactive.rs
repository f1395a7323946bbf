//! Interactive Console
//!
//! The menu-driven front end: pick CPU scheduling or virtual memory, pick an
//! algorithm, enter the input, read the table.
//!
//! The console is generic over its input and output so tests can drive it
//! with a scripted session. End of input behaves like choosing exit.

use crate::commands::{render_paging, render_schedule, run_schedule, PagingAlgorithm};
use crate::workload_script::{parse_process_line, parse_trace};
use core_types::{ProcessSpec, Workload};
use log::debug;
use sim_kernel::{SchedulerConfig, SchedulingPolicy};
use std::io::{self, BufRead, Write};

/// Interactive console session
pub struct InteractiveConsole<R, W> {
    input: R,
    output: W,
    config: SchedulerConfig,
}

impl<R: BufRead, W: Write> InteractiveConsole<R, W> {
    /// Creates a console with the default scheduler configuration
    pub fn new(input: R, output: W) -> Self {
        Self::with_config(input, output, SchedulerConfig::default())
    }

    /// Creates a console with a custom scheduler configuration
    pub fn with_config(input: R, output: W, config: SchedulerConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Consumes the console and returns its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the main menu until exit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", "=".repeat(40))?;
            writeln!(self.output, "{:^40}", ">>> OS SIMULATOR <<<")?;
            writeln!(self.output, "{}", "=".repeat(40))?;
            writeln!(self.output, "1. CPU Scheduling")?;
            writeln!(self.output, "2. Virtual Memory")?;
            writeln!(self.output, "3. Exit\n")?;

            let Some(choice) = self.prompt("Select: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    if !self.cpu_menu()? {
                        break;
                    }
                }
                "2" => {
                    if !self.paging_menu()? {
                        break;
                    }
                }
                "3" => break,
                _ => writeln!(self.output, "Invalid\n")?,
            }
        }

        writeln!(self.output, "\nDone!\n")?;
        self.output.flush()
    }

    /// Returns false when input ran out
    fn cpu_menu(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "\n>>> CPU SCHEDULING")?;
            for (index, policy) in SchedulingPolicy::ALL.iter().enumerate() {
                writeln!(self.output, "{}. {}", index + 1, policy)?;
            }
            writeln!(self.output, "0. Back\n")?;

            let Some(choice) = self.prompt("Select: ")? else {
                return Ok(false);
            };
            if choice == "0" {
                return Ok(true);
            }

            let policy = match choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| SchedulingPolicy::ALL.get(i))
            {
                Some(policy) => *policy,
                None => {
                    writeln!(self.output, "Invalid\n")?;
                    continue;
                }
            };

            let Some(workload) = self.read_processes()? else {
                return Ok(false);
            };
            if workload.is_empty() {
                writeln!(self.output, "No processes\n")?;
                continue;
            }

            debug!("interactive: {} over {} processes", policy, workload.len());
            match run_schedule(policy, &self.config, &workload) {
                Ok(outcome) => write!(self.output, "{}", render_schedule(policy.title(), &outcome))?,
                Err(e) => writeln!(self.output, "Error: {}\n", e)?,
            }
        }
    }

    /// Returns false when input ran out
    fn paging_menu(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "\n>>> VIRTUAL MEMORY")?;
            writeln!(self.output, "1. FIFO")?;
            writeln!(self.output, "2. Optimal")?;
            writeln!(self.output, "0. Back\n")?;

            let Some(choice) = self.prompt("Select: ")? else {
                return Ok(false);
            };
            let algorithm = match choice.as_str() {
                "0" => return Ok(true),
                "1" => PagingAlgorithm::Fifo,
                "2" => PagingAlgorithm::Optimal,
                _ => {
                    writeln!(self.output, "Invalid\n")?;
                    continue;
                }
            };

            writeln!(self.output, "\n--- ENTER PAGE DATA ---")?;
            let Some(frames) = self.prompt("Frames: ")? else {
                return Ok(false);
            };
            let Some(pages) = self.prompt("Pages: ")? else {
                return Ok(false);
            };

            let trace = frames
                .parse::<usize>()
                .map_err(|_| "Use numbers".to_string())
                .and_then(|frames| parse_trace(frames, &pages).map_err(|e| e.to_string()));
            match trace {
                Ok(trace) => {
                    let report = algorithm.run(&trace);
                    write!(self.output, "{}", render_paging(algorithm.title(), &report))?;
                }
                Err(message) => writeln!(self.output, "Error: {}\n", message)?,
            }
        }
    }

    /// Reads process lines until `stop`; `None` when input ran out
    fn read_processes(&mut self) -> io::Result<Option<Workload>> {
        writeln!(self.output, "\n--- ENTER PROCESSES ---")?;
        writeln!(self.output, "Format: NAME ARRIVAL BURST [PRIORITY]  (1=highest)")?;
        writeln!(self.output, "Example: P1 0 8 1")?;
        writeln!(self.output, "(Type 'stop' to finish entering processes)\n")?;

        let mut specs: Vec<ProcessSpec> = Vec::new();
        loop {
            let Some(line) = self.prompt(&format!("Process {}: ", specs.len() + 1))? else {
                return Ok(None);
            };
            if line.eq_ignore_ascii_case("stop") {
                break;
            }

            let spec = match parse_process_line(&line, specs.len() + 1) {
                Ok(Some(spec)) => spec,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.output, "Error: {}\n", e)?;
                    continue;
                }
            };
            if specs.iter().any(|s| s.name == spec.name) {
                writeln!(self.output, "Error: {} already entered\n", spec.name)?;
                continue;
            }
            if spec.burst_time == 0 {
                writeln!(self.output, "Error: burst time must be positive\n")?;
                continue;
            }

            writeln!(self.output, "Added {}", spec.name)?;
            specs.push(spec);
            let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
            writeln!(self.output, "Queue: {:?}\n", names)?;
        }

        match Workload::new(specs) {
            Ok(workload) => Ok(Some(workload)),
            Err(e) => {
                writeln!(self.output, "Error: {}\n", e)?;
                Ok(Some(Workload::default()))
            }
        }
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
