//! Shortest Remaining Time First (preemptive SJF).
//!
//! # Algorithm
//!
//! Unit-time simulation. At every time unit, the arrived, unfinished
//! process with the least remaining time runs for one unit. Consecutive
//! units of the same process extend one block; a switch starts a new one.
//!
//! When no process is ready, time jumps straight to the next arrival and
//! the gap becomes a single idle block (no stepping through empty units).
//!
//! Equal remaining times go to the process that comes first in arrival
//! order (input order for simultaneous arrivals), the same rule as SJF.
//!
//! # Complexity
//! O(B * n) where B = total burst, n = processes.

use super::working::WorkingSet;
use super::{Algorithm, ScheduleParams, Scheduler};
use crate::models::{Process, Timeline};

/// Preemptive shortest-remaining-time scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srtf;

impl Scheduler for Srtf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Srtf
    }

    fn schedule(&self, processes: &[Process], _params: &ScheduleParams) -> Timeline {
        let mut set = WorkingSet::new(processes);
        let mut timeline = Timeline::new();
        let mut time = 0;

        while !set.all_completed() {
            match set.select_min_by(time, |item| item.remaining) {
                Some(idx) => {
                    let process = set.items[idx].process;
                    timeline.push(&process.pid, time, time + 1);
                    set.consume(idx, 1);
                    time += 1;
                }
                None => {
                    let Some(next) = set.next_arrival() else {
                        break;
                    };
                    timeline.push_idle(time, next);
                    time = time.max(next);
                }
            }
        }

        timeline
    }
}
