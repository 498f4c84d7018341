//! Timeline normalization into per-process result rows.
//!
//! Aggregates every non-idle block of a process (preemptive algorithms
//! emit several) into one row:
//!
//! | Field | Definition |
//! |-------|-----------|
//! | start | min start over the process's blocks |
//! | finish | max finish over the process's blocks |
//! | turnaround | finish - arrival |
//! | waiting | finish - arrival - burst |
//!
//! Arrival and burst come from the original process, looked up by pid,
//! never from the blocks. A negative metric means the timeline and the
//! process set disagree; it is clamped to 0, logged, and reported as an
//! [`IntegrityWarning`].

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::{Process, ResultRow, Timeline};

/// Kind of data-integrity problem found while normalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityWarningKind {
    /// Waiting time came out negative (raw value attached) and was clamped.
    NegativeWaiting(i64),
    /// Turnaround came out negative (raw value attached) and was clamped.
    NegativeTurnaround(i64),
    /// Blocks reference a pid missing from the process set.
    UnknownPid,
}

/// A data-integrity warning for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityWarning {
    /// Affected pid.
    pub pid: String,
    /// What went wrong.
    pub kind: IntegrityWarningKind,
}

/// Result rows plus any integrity warnings raised while computing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRun {
    /// One row per non-idle pid, in order of first appearance.
    pub rows: Vec<ResultRow>,
    /// Problems found (empty for a well-formed run).
    pub warnings: Vec<IntegrityWarning>,
}

impl NormalizedRun {
    /// Whether no integrity problem was found.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Row for `pid`.
    pub fn row(&self, pid: &str) -> Option<&ResultRow> {
        self.rows.iter().find(|r| r.pid == pid)
    }
}

#[derive(Debug)]
struct Span {
    start: i64,
    finish: i64,
    busy: i64,
}

/// Converts a (possibly fragmented) timeline into per-process rows.
///
/// Row order follows first appearance in the timeline; callers that need
/// pid order should use [`sort_rows_by_pid`](crate::models::sort_rows_by_pid).
///
/// A pid absent from `processes` is still reported, using its first
/// start as arrival and its total block time as burst.
pub fn normalize(timeline: &Timeline, processes: &[Process]) -> NormalizedRun {
    let by_pid: HashMap<&str, &Process> = processes.iter().map(|p| (p.pid.as_str(), p)).collect();

    let mut order: Vec<&str> = Vec::new();
    let mut spans: HashMap<&str, Span> = HashMap::new();
    for b in timeline.blocks.iter().filter(|b| !b.is_idle()) {
        let span = spans.entry(b.pid.as_str()).or_insert_with(|| {
            order.push(b.pid.as_str());
            Span {
                start: b.start,
                finish: b.finish,
                busy: 0,
            }
        });
        span.start = span.start.min(b.start);
        span.finish = span.finish.max(b.finish);
        span.busy += b.duration();
    }

    let mut run = NormalizedRun::default();
    for pid in order {
        let span = &spans[pid];
        let (arrival, burst) = match by_pid.get(pid) {
            Some(p) => (p.arrival, p.burst),
            None => {
                warn!("timeline references unknown pid '{pid}'; deriving arrival and burst from its blocks");
                run.warnings.push(IntegrityWarning {
                    pid: pid.to_string(),
                    kind: IntegrityWarningKind::UnknownPid,
                });
                (span.start, span.busy)
            }
        };

        let turnaround = span.finish - arrival;
        let waiting = turnaround - burst;

        if turnaround < 0 {
            warn!("negative turnaround {turnaround} for '{pid}' clamped to 0");
            run.warnings.push(IntegrityWarning {
                pid: pid.to_string(),
                kind: IntegrityWarningKind::NegativeTurnaround(turnaround),
            });
        }
        if waiting < 0 {
            warn!("negative waiting time {waiting} for '{pid}' clamped to 0");
            run.warnings.push(IntegrityWarning {
                pid: pid.to_string(),
                kind: IntegrityWarningKind::NegativeWaiting(waiting),
            });
        }

        run.rows.push(ResultRow {
            pid: pid.to_string(),
            start: span.start,
            finish: span.finish,
            waiting: waiting.max(0),
            turnaround: turnaround.max(0),
        });
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Algorithm, ScheduleParams};
    use crate::models::GanttBlock;

    fn textbook_processes() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
        ]
    }

    #[test]
    fn test_normalize_fcfs_textbook() {
        let processes = textbook_processes();
        let t = Algorithm::Fcfs.run(&processes, &ScheduleParams::default());
        let run = normalize(&t, &processes);

        assert!(run.is_clean());
        let waiting: Vec<i64> = run.rows.iter().map(|r| r.waiting).collect();
        let turnaround: Vec<i64> = run.rows.iter().map(|r| r.turnaround).collect();
        assert_eq!(waiting, [0, 4, 6]);
        assert_eq!(turnaround, [5, 7, 14]);
    }

    #[test]
    fn test_normalize_merges_fragments() {
        let processes = vec![Process::new("P1", 0, 3), Process::new("P2", 1, 1)];
        let t = Timeline::from_blocks(vec![
            GanttBlock::new("P1", 0, 1),
            GanttBlock::new("P2", 1, 2),
            GanttBlock::new("P1", 2, 4),
        ]);
        let run = normalize(&t, &processes);

        let p1 = run.row("P1").unwrap();
        assert_eq!(p1.start, 0);
        assert_eq!(p1.finish, 4);
        assert_eq!(p1.turnaround, 4);
        assert_eq!(p1.waiting, 1);
        assert_eq!(run.rows.len(), 2);
    }

    #[test]
    fn test_normalize_skips_idle() {
        let processes = vec![Process::new("P1", 5, 2)];
        let t = Timeline::from_blocks(vec![GanttBlock::idle(0, 5), GanttBlock::new("P1", 5, 7)]);
        let run = normalize(&t, &processes);
        assert_eq!(run.rows.len(), 1);
        assert_eq!(run.rows[0].waiting, 0);
        assert_eq!(run.rows[0].turnaround, 2);
    }

    #[test]
    fn test_normalize_uses_declared_arrival() {
        // Start at 4 but declared arrival 1 → waiting 3, not 0
        let processes = vec![Process::new("P1", 1, 2)];
        let t = Timeline::from_blocks(vec![GanttBlock::idle(0, 4), GanttBlock::new("P1", 4, 6)]);
        let run = normalize(&t, &processes);
        assert_eq!(run.rows[0].waiting, 3);
        assert_eq!(run.rows[0].turnaround, 5);
    }

    #[test]
    fn test_negative_waiting_clamped_and_flagged() {
        // Declared burst 5 but only 3 units scheduled
        let processes = vec![Process::new("P1", 0, 5)];
        let t = Timeline::from_blocks(vec![GanttBlock::new("P1", 0, 3)]);
        let run = normalize(&t, &processes);

        assert_eq!(run.rows[0].waiting, 0);
        assert_eq!(
            run.warnings,
            vec![IntegrityWarning {
                pid: "P1".into(),
                kind: IntegrityWarningKind::NegativeWaiting(-2),
            }]
        );
    }

    #[test]
    fn test_negative_turnaround_clamped_and_flagged() {
        let processes = vec![Process::new("P1", 10, 2)];
        let t = Timeline::from_blocks(vec![GanttBlock::new("P1", 0, 2)]);
        let run = normalize(&t, &processes);

        assert_eq!(run.rows[0].turnaround, 0);
        assert_eq!(run.rows[0].waiting, 0);
        assert!(run
            .warnings
            .iter()
            .any(|w| w.kind == IntegrityWarningKind::NegativeTurnaround(-8)));
        assert!(run
            .warnings
            .iter()
            .any(|w| w.kind == IntegrityWarningKind::NegativeWaiting(-10)));
    }

    #[test]
    fn test_unknown_pid_derived_from_blocks() {
        let t = Timeline::from_blocks(vec![
            GanttBlock::new("ghost", 2, 4),
            GanttBlock::new("ghost", 6, 7),
        ]);
        let run = normalize(&t, &[]);

        let row = run.row("ghost").unwrap();
        // arrival = 2, burst = 3 → turnaround 5, waiting 2
        assert_eq!(row.turnaround, 5);
        assert_eq!(row.waiting, 2);
        assert_eq!(run.warnings[0].kind, IntegrityWarningKind::UnknownPid);
    }

    #[test]
    fn test_normalize_empty() {
        let run = normalize(&Timeline::new(), &textbook_processes());
        assert!(run.rows.is_empty());
        assert!(run.is_clean());
    }
}
