//! CPU Scheduling Scenario Tests
//!
//! Known-answer schedules plus the properties every scheduling run must hold.

use core_types::Process;
use sim_kernel::{
    non_preemptive_priority, preemptive_priority, round_robin, run_policy, shortest_job_first,
    ScheduleEvent, SchedulerConfig, SchedulingPolicy,
};
use tests_scenarios::{
    assert_timing_invariants, assert_valid_timeline, cpu_time_by_process, generated_workload,
    workload,
};

fn scenario_a() -> Vec<Process> {
    workload(&[("P1", 0, 8, 0), ("P2", 1, 4, 0), ("P3", 2, 9, 0), ("P4", 3, 5, 0)]).fresh_processes()
}

/// Test: SJF on the textbook workload runs first-come first-served
#[test]
fn test_scenario_a_sjf() {
    let outcome = shortest_job_first(scenario_a());

    let completions: Vec<u64> = outcome.processes.iter().map(|p| p.completion_time).collect();
    let waits: Vec<u64> = outcome.processes.iter().map(|p| p.waiting_time).collect();
    assert_eq!(completions, vec![8, 12, 21, 26]);
    assert_eq!(waits, vec![0, 7, 10, 18]);
}

/// Test: non-preemptive priority reproduces SJF exactly, whatever the priorities
#[test]
fn test_non_preemptive_priority_matches_sjf() {
    for seed in 0..20 {
        let w = generated_workload(seed, 6);
        let sjf = shortest_job_first(w.fresh_processes());
        let npp = non_preemptive_priority(w.fresh_processes());
        assert_eq!(sjf.processes, npp.processes, "seed {}", seed);
    }
}

/// Test: round robin with quantum 2 on two overlapping processes
#[test]
fn test_scenario_b_round_robin() {
    let w = workload(&[("P1", 0, 10, 0), ("P2", 1, 5, 0)]);
    let outcome = round_robin(w.fresh_processes(), 2).unwrap();

    assert_eq!(outcome.process("P1").unwrap().completion_time, 15);
    assert_eq!(outcome.process("P2").unwrap().completion_time, 11);
    assert_eq!(outcome.completion_order(), vec!["P2", "P1"]);
}

/// Test: arrival-order schedules pack back to back without overlap
#[test]
fn test_arrival_order_schedule_is_valid_packing() {
    for seed in 0..30 {
        let outcome = shortest_job_first(generated_workload(seed, 8).fresh_processes());
        assert_timing_invariants(&outcome.processes);
        assert_valid_timeline(&outcome);

        for p in &outcome.processes {
            assert_eq!(p.completion_time, p.arrival_time + p.waiting_time + p.burst_time);
        }

        // one contiguous slice per process, in arrival order
        let order: Vec<String> = outcome
            .gantt()
            .into_iter()
            .filter_map(|s| s.process)
            .collect();
        let arrival_names: Vec<String> = outcome.processes.iter().map(|p| p.name.clone()).collect();
        assert_eq!(order, arrival_names, "seed {}", seed);
        for pair in outcome.processes.windows(2) {
            assert!(pair[0].arrival_time <= pair[1].arrival_time);
        }
    }
}

/// Test: every unit of CPU goes to the best-priority ready process
#[test]
fn test_preemptive_priority_grants_each_unit_to_best_ready() {
    for seed in 0..30 {
        let w = generated_workload(seed, 7);
        let outcome = preemptive_priority(w.fresh_processes());
        assert_timing_invariants(&outcome.processes);
        assert_valid_timeline(&outcome);

        let mut remaining: Vec<u64> = w.specs().iter().map(|s| s.burst_time).collect();
        for slice in outcome.gantt() {
            for t in slice.start..slice.end {
                let ready: Vec<usize> = (0..remaining.len())
                    .filter(|&i| w.specs()[i].arrival_time <= t && remaining[i] > 0)
                    .collect();
                match &slice.process {
                    None => assert!(ready.is_empty(), "idle at {} with work ready", t),
                    Some(name) => {
                        let index = w.specs().iter().position(|s| &s.name == name).unwrap();
                        let best = ready.iter().map(|&i| w.specs()[i].priority).min().unwrap();
                        assert_eq!(w.specs()[index].priority, best, "seed {} tick {}", seed, t);
                        remaining[index] -= 1;
                    }
                }
            }
        }
        assert!(remaining.iter().all(|&r| r == 0));
    }
}

/// Literal per-tick rescan used as a reference for the event-driven scheduler
fn per_tick_priority(mut processes: Vec<Process>) -> Vec<Process> {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by_key(|&i| processes[i].arrival_time);
    let mut time = 0;
    let mut done = 0;

    while done < processes.len() {
        let ready: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| processes[i].is_ready_at(time))
            .collect();
        if ready.is_empty() {
            time = order
                .iter()
                .map(|&i| &processes[i])
                .filter(|p| !p.is_complete())
                .map(|p| p.arrival_time)
                .min()
                .unwrap();
            continue;
        }
        let current = ready
            .into_iter()
            .min_by_key(|&i| processes[i].priority)
            .unwrap();
        time += 1;
        processes[current].remaining_time -= 1;
        if processes[current].remaining_time == 0 {
            processes[current].complete_at(time);
            done += 1;
        }
    }
    processes
}

/// Test: event-driven preemptive priority matches the per-tick rescan
#[test]
fn test_preemptive_priority_matches_per_tick_reference() {
    for seed in 0..50 {
        let w = generated_workload(seed, 6);
        let outcome = preemptive_priority(w.fresh_processes());
        let reference = per_tick_priority(w.fresh_processes());
        assert_eq!(outcome.processes, reference, "seed {}", seed);
    }
}

/// Test: round robin turns never exceed the quantum and sum to the burst
#[test]
fn test_round_robin_turns() {
    for quantum in 1..=4 {
        for seed in 0..20 {
            let w = generated_workload(seed, 6);
            let outcome = round_robin(w.fresh_processes(), quantum).unwrap();
            assert_timing_invariants(&outcome.processes);
            assert_valid_timeline(&outcome);

            for slice in outcome.gantt().iter().filter(|s| !s.is_idle()) {
                assert!(slice.len() <= quantum);
            }
            let totals = cpu_time_by_process(&outcome);
            for spec in w.specs() {
                assert_eq!(totals[&spec.name], spec.burst_time);
            }

            // completion order follows the clock
            let order = outcome.completion_order();
            for pair in order.windows(2) {
                let a = outcome.process(pair[0]).unwrap().completion_time;
                let b = outcome.process(pair[1]).unwrap().completion_time;
                assert!(a <= b);
            }
        }
    }
}

/// Test: a turn shorter than the quantum only happens on completion
#[test]
fn test_round_robin_short_turn_means_completion() {
    let w = workload(&[("A", 0, 5, 0), ("B", 0, 3, 0)]);
    let outcome = round_robin(w.fresh_processes(), 2).unwrap();

    let events = outcome.audit.events();
    for (i, event) in events.iter().enumerate() {
        if let ScheduleEvent::Preempted {
            timestamp_ticks, ..
        } = event
        {
            let ScheduleEvent::Dispatched {
                timestamp_ticks: start,
                ..
            } = &events[i - 1]
            else {
                panic!("preemption must follow a dispatch");
            };
            assert_eq!(timestamp_ticks - start, 2);
        }
    }
    // A 0-2, B 2-4, A 4-6, B 6-7, A 7-8
    assert_eq!(outcome.process("B").unwrap().completion_time, 7);
    assert_eq!(outcome.process("A").unwrap().completion_time, 8);
}

/// Test: every policy satisfies the timing invariants and is deterministic
#[test]
fn test_all_policies_invariants_and_determinism() {
    let config = SchedulerConfig::default();
    for policy in SchedulingPolicy::ALL {
        for seed in 0..15 {
            let w = generated_workload(seed, 7);
            let first = run_policy(policy, &config, w.fresh_processes()).unwrap();
            let second = run_policy(policy, &config, w.fresh_processes()).unwrap();

            assert_timing_invariants(&first.processes);
            assert_valid_timeline(&first);
            assert_eq!(first, second, "{} seed {}", policy, seed);

            let totals = cpu_time_by_process(&first);
            for spec in w.specs() {
                assert_eq!(totals[&spec.name], spec.burst_time, "{} {}", policy, spec.name);
            }
        }
    }
}

/// Test: results stay tagged by name whatever order the policy returns
#[test]
fn test_results_tagged_by_name() {
    let w = workload(&[("late", 4, 2, 0), ("early", 0, 3, 1)]);
    let config = SchedulerConfig::default();
    for policy in SchedulingPolicy::ALL {
        let outcome = run_policy(policy, &config, w.fresh_processes()).unwrap();
        assert_eq!(outcome.process("early").unwrap().completion_time, 3, "{}", policy);
        assert_eq!(outcome.process("late").unwrap().completion_time, 6, "{}", policy);
    }
}
