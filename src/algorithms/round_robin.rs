//! Round Robin (quantum-based preemption).
//!
//! # Algorithm
//!
//! 1. Enqueue every process that has arrived by t=0, in arrival order.
//! 2. If the ready queue is empty, jump to the next arrival (idle block)
//!    and enqueue everything that has arrived by then.
//! 3. Dequeue the head and run it for `min(quantum, remaining)` units.
//! 4. Enqueue processes that arrived up to the end of that slice, THEN
//!    requeue the preempted process if it still has work left.
//!
//! The arrivals-before-requeue order in step 4 decides who runs next when
//! an arrival coincides with the end of a slice; changing it changes the
//! schedule.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.3.3

use std::collections::VecDeque;

use log::warn;

use super::working::WorkingSet;
use super::{Algorithm, ScheduleParams, Scheduler};
use crate::models::{Process, Timeline};

/// Quantum-based preemptive FIFO scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl Scheduler for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn schedule(&self, processes: &[Process], params: &ScheduleParams) -> Timeline {
        let quantum = if params.quantum < 1 {
            warn!(
                "round robin quantum {} is below 1; running with quantum 1",
                params.quantum
            );
            1
        } else {
            params.quantum
        };

        let mut set = WorkingSet::new(processes);
        let mut timeline = Timeline::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        // Items are in arrival order, so arrivals are admitted by a cursor.
        let mut cursor = 0;
        let mut time = 0;

        admit_arrivals(&set, &mut cursor, time, &mut queue);

        while !set.all_completed() {
            let Some(idx) = queue.pop_front() else {
                let Some(item) = set.items.get(cursor) else {
                    break;
                };
                let next = item.process.arrival;
                timeline.push_idle(time, next);
                time = time.max(next);
                admit_arrivals(&set, &mut cursor, time, &mut queue);
                continue;
            };

            let item = &set.items[idx];
            let (process, slice) = (item.process, item.remaining.min(quantum));
            let start = time;
            let finish = start + slice;
            timeline.push(&process.pid, start, finish);
            set.consume(idx, slice);
            time = finish;

            admit_arrivals(&set, &mut cursor, time, &mut queue);
            if !set.items[idx].completed {
                queue.push_back(idx);
            }
        }

        timeline
    }
}

/// Enqueues every not-yet-admitted item with `arrival <= time`.
fn admit_arrivals(
    set: &WorkingSet<'_>,
    cursor: &mut usize,
    time: i64,
    queue: &mut VecDeque<usize>,
) {
    while let Some(item) = set.items.get(*cursor) {
        if item.process.arrival > time {
            break;
        }
        queue.push_back(*cursor);
        *cursor += 1;
    }
}
