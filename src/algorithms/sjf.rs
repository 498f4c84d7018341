//! Shortest Job First (non-preemptive).
//!
//! # Algorithm
//!
//! At each decision point, among arrived and unfinished processes, dispatch
//! the one with the shortest burst and run it to completion. When nothing
//! has arrived yet, jump to the earliest pending arrival (idle block).
//!
//! Equal bursts go to the process that comes first in arrival order
//! (input order for simultaneous arrivals).
//!
//! # Reference
//! Smith (1956), SPT is optimal for mean flow time on a single machine
//! when all jobs are available at t=0.

use super::working::run_to_completion;
use super::{Algorithm, ScheduleParams, Scheduler};
use crate::models::{Process, Timeline};

/// Non-preemptive shortest-burst-first scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Scheduler for Sjf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn schedule(&self, processes: &[Process], _params: &ScheduleParams) -> Timeline {
        run_to_completion(processes, |item| item.process.burst)
    }
}
