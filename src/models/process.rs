//! Process model.
//!
//! A process is the unit of work handed to a CPU scheduling algorithm:
//! an identifier, the time it becomes schedulable, the CPU time it needs,
//! and an optional priority.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A process to be scheduled on a single CPU.
///
/// # Time Representation
/// All times are integer time units relative to t=0. The engine does not
/// assign a physical meaning to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (e.g., "P1").
    pub pid: String,
    /// Time unit at which the process becomes schedulable.
    pub arrival: i64,
    /// Total CPU time required.
    pub burst: i64,
    /// Scheduling priority (lower = more urgent). `None` = 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Process {
    /// Creates a process arriving at `arrival` that needs `burst` units.
    pub fn new(pid: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival,
            burst,
            priority: None,
        }
    }

    /// Sets the priority (lower value = dispatched first).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Effective priority; an absent priority ranks as 0.
    #[inline]
    pub fn priority_or_default(&self) -> i32 {
        self.priority.unwrap_or(0)
    }
}

/// Numeric part of a pid: all its digits, in order ("P12" → 12).
///
/// Returns `None` when the pid has no digits or the number overflows.
pub fn pid_number(pid: &str) -> Option<u64> {
    let digits: String = pid.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Orders pids by their numeric part ("P2" < "P10"), falling back to a
/// lexical comparison when either pid has no number or the numbers tie.
pub fn compare_pids(a: &str, b: &str) -> Ordering {
    match (pid_number(a), pid_number(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Suggests the next free pid of the form `P{n}`.
///
/// Starts one past the largest numbered pid in the set and skips any
/// candidate that is already taken. When the largest number is
/// `u64::MAX`, the search wraps around and starts again from 1.
pub fn next_pid(processes: &[Process]) -> String {
    let max = processes
        .iter()
        .filter_map(|p| pid_number(&p.pid))
        .max()
        .unwrap_or(0);
    let first = max.checked_add(1).unwrap_or(1);

    (first..=u64::MAX)
        .chain(1..first)
        .map(|n| format!("P{n}"))
        .find(|candidate| !processes.iter().any(|p| &p.pid == candidate))
        .unwrap_or_else(|| format!("P{first}"))
}
