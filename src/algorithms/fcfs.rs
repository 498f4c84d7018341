//! First-Come-First-Served.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival (stable; simultaneous arrivals keep input order).
//! 2. Run each to completion in that order.
//! 3. If the CPU frees up before the next arrival, emit an idle block for the gap.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the dispatch pass.

use super::working::WorkingSet;
use super::{Algorithm, ScheduleParams, Scheduler};
use crate::models::{Process, Timeline};

/// Non-preemptive arrival-order scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn schedule(&self, processes: &[Process], _params: &ScheduleParams) -> Timeline {
        let set = WorkingSet::new(processes);
        let mut timeline = Timeline::new();
        let mut time = 0;

        for item in &set.items {
            let p = item.process;
            if time < p.arrival {
                timeline.push_idle(time, p.arrival);
                time = p.arrival;
            }
            timeline.push(&p.pid, time, time + p.burst);
            time += p.burst;
        }

        timeline
    }
}
