//! Derived per-process and per-algorithm result rows.

use serde::{Deserialize, Serialize};

use super::process::compare_pids;
use crate::algorithms::Algorithm;

/// Per-process outcome of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Process identifier.
    pub pid: String,
    /// First dispatch time.
    pub start: i64,
    /// Completion time.
    pub finish: i64,
    /// `finish - arrival - burst`, never negative.
    pub waiting: i64,
    /// `finish - arrival`, never negative.
    pub turnaround: i64,
}

/// Average metrics of one algorithm over a process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    /// Algorithm that produced the schedule.
    pub algorithm: Algorithm,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
}

impl ComparisonRow {
    /// Creates a comparison row.
    pub fn new(algorithm: Algorithm, avg_waiting: f64, avg_turnaround: f64) -> Self {
        Self {
            algorithm,
            avg_waiting,
            avg_turnaround,
        }
    }
}

/// Sorts result rows by pid number ("P2" before "P10").
pub fn sort_rows_by_pid(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| compare_pids(&a.pid, &b.pid));
}
