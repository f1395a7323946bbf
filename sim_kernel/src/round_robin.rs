//! Round-robin scheduling
//!
//! Processes take turns of at most one quantum from a FIFO run queue.
//! Arrivals are admitted in arrival order as the clock reaches them. A
//! process whose quantum expires goes to the tail of the queue after every
//! process that arrived during its slice.

use crate::scheduler::{
    arrival_order, PreemptionReason, ScheduleAuditLog, ScheduleOutcome, SchedulerError,
};
use core_types::Process;
use std::collections::VecDeque;

/// Run queue for round robin
///
/// Simple FIFO of indices into the record list. Enqueue at the back,
/// dequeue from the front.
#[derive(Debug, Default)]
struct RunQueue {
    queue: VecDeque<usize>,
}

impl RunQueue {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    fn enqueue(&mut self, index: usize) {
        self.queue.push_back(index);
    }

    fn dequeue(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }
}

/// Cursor over processes not yet admitted, in arrival order
struct Arrivals {
    order: Vec<usize>,
    next: usize,
}

impl Arrivals {
    /// Moves every process that has arrived by `time` into the run queue
    fn admit(&mut self, processes: &[Process], time: u64, run_queue: &mut RunQueue) {
        while let Some(&index) = self.order.get(self.next) {
            if processes[index].arrival_time > time {
                break;
            }
            run_queue.enqueue(index);
            self.next += 1;
        }
    }

    /// Arrival time of the next process not yet admitted
    fn peek_arrival(&self, processes: &[Process]) -> Option<u64> {
        self.order
            .get(self.next)
            .map(|&index| processes[index].arrival_time)
    }
}

/// Round robin with the given quantum
///
/// Records are returned in input order.
pub fn round_robin(
    mut processes: Vec<Process>,
    quantum: u64,
) -> Result<ScheduleOutcome, SchedulerError> {
    if quantum == 0 {
        return Err(SchedulerError::ZeroQuantum);
    }

    let mut audit = ScheduleAuditLog::new();
    let mut run_queue = RunQueue::new();
    let mut arrivals = Arrivals {
        order: arrival_order(&processes),
        next: 0,
    };
    let mut time = 0;

    loop {
        arrivals.admit(&processes, time, &mut run_queue);

        let Some(index) = run_queue.dequeue() else {
            match arrivals.peek_arrival(&processes) {
                Some(arrival) => {
                    audit.idle(time, arrival);
                    time = arrival;
                    continue;
                }
                None => break,
            }
        };

        let process = &mut processes[index];
        audit.dispatched(process, time);
        time += process.run_for(quantum);

        if process.is_complete() {
            process.complete_at(time);
            audit.completed(process, time);
        } else {
            audit.preempted(process, PreemptionReason::QuantumExpired, time);
            arrivals.admit(&processes, time, &mut run_queue);
            run_queue.enqueue(index);
        }
    }

    Ok(ScheduleOutcome { processes, audit })
}
