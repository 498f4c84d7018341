//! Priority scheduling (non-preemptive).
//!
//! Same dispatch loop as SJF with a different ranking key: the lowest
//! priority value wins. An absent priority ranks as 0. A process, once
//! dispatched, runs to completion even if a more urgent one arrives.

use super::working::run_to_completion;
use super::{Algorithm, ScheduleParams, Scheduler};
use crate::models::{Process, Timeline};

/// Non-preemptive lowest-priority-value-first scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority;

impl Scheduler for Priority {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn schedule(&self, processes: &[Process], _params: &ScheduleParams) -> Timeline {
        run_to_completion(processes, |item| item.process.priority_or_default())
    }
}
