//! Per-process status at a virtual time.
//!
//! Derives what a live process queue should show at time `t` from the
//! timeline itself: how much CPU each process has received so far and
//! whether it is the one on the CPU right now.

use serde::{Deserialize, Serialize};

use crate::models::{Process, Timeline};

/// Lifecycle state of a process at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// Not yet arrived.
    NotArrived,
    /// Arrived, waiting for the CPU.
    Ready,
    /// On the CPU.
    Running,
    /// All CPU time received.
    Finished,
}

/// One process's queue entry at a virtual time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Process identifier.
    pub pid: String,
    /// State at the queried time.
    pub status: ProcessStatus,
    /// CPU time still needed.
    pub remaining: i64,
}

/// Status of every process at time `t`, in input order.
///
/// Time already executed counts only the part of each block before `t`,
/// so a process whose last block ends exactly at `t` is `Finished`.
pub fn queue_status(processes: &[Process], timeline: &Timeline, t: i64) -> Vec<QueueEntry> {
    let running = timeline
        .block_at(t)
        .filter(|b| !b.is_idle())
        .map(|b| b.pid.as_str());

    processes
        .iter()
        .map(|p| {
            let executed: i64 = timeline
                .blocks_for(&p.pid)
                .iter()
                .map(|b| (b.finish.min(t) - b.start).max(0))
                .sum();
            let remaining = (p.burst - executed).max(0);

            let status = if remaining == 0 {
                ProcessStatus::Finished
            } else if running == Some(p.pid.as_str()) {
                ProcessStatus::Running
            } else if p.arrival <= t {
                ProcessStatus::Ready
            } else {
                ProcessStatus::NotArrived
            };

            QueueEntry {
                pid: p.pid.clone(),
                status,
                remaining,
            }
        })
        .collect()
}
