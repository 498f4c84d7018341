//! Run quality metrics (KPIs).
//!
//! Computes the summary indicators shown next to a single algorithm run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | mean(finish - arrival - burst) |
//! | Avg Turnaround | mean(finish - arrival) |
//! | Makespan | Latest block finish |
//! | Idle Time | Total length of idle blocks |
//! | Utilization | Busy time / makespan |
//! | Throughput | Completed processes / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::NormalizedRun;
use crate::models::{ResultRow, Timeline};

/// Summary indicators of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunKpi {
    /// Mean waiting time (0 when there are no rows).
    pub avg_waiting: f64,
    /// Mean turnaround time (0 when there are no rows).
    pub avg_turnaround: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Total idle time inside `[0, makespan)`.
    pub idle_time: i64,
    /// Fraction of the makespan the CPU was busy (0.0..1.0).
    pub utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
}

impl RunKpi {
    /// Computes KPIs from a timeline and its normalized rows.
    pub fn calculate(timeline: &Timeline, run: &NormalizedRun) -> Self {
        let (avg_waiting, avg_turnaround) = averages(&run.rows);
        let makespan = timeline.makespan();
        let throughput = if makespan > 0 {
            run.rows.len() as f64 / makespan as f64
        } else {
            0.0
        };

        Self {
            avg_waiting,
            avg_turnaround,
            makespan,
            idle_time: timeline.idle_time(),
            utilization: timeline.utilization().unwrap_or(0.0),
            throughput,
        }
    }
}

/// Arithmetic means of waiting and turnaround; `(0.0, 0.0)` for no rows.
pub fn averages(rows: &[ResultRow]) -> (f64, f64) {
    if rows.is_empty() {
        return (0.0, 0.0);
    }
    let n = rows.len() as f64;
    let waiting: i64 = rows.iter().map(|r| r.waiting).sum();
    let turnaround: i64 = rows.iter().map(|r| r.turnaround).sum();
    (waiting as f64 / n, turnaround as f64 / n)
}
