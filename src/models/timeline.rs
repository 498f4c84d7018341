//! Gantt block and timeline models.
//!
//! A timeline is the output of every scheduling algorithm: an ordered
//! sequence of half-open execution intervals `[start, finish)` on the
//! single CPU. Gaps in which no process runs are represented by explicit
//! blocks carrying the [`IDLE_PID`] sentinel.
//!
//! # Invariants
//! For a timeline produced by an algorithm in this crate:
//! - blocks are ordered by `start`,
//! - `blocks[i].finish == blocks[i + 1].start` (no gaps, no overlaps),
//! - the first block starts at 0.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::process::compare_pids;

/// Pid sentinel marking a block in which the CPU is idle.
pub const IDLE_PID: &str = "IDLE";

/// A contiguous execution interval `[start, finish)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttBlock {
    /// Executing process, or [`IDLE_PID`].
    pub pid: String,
    /// First time unit of the interval.
    pub start: i64,
    /// First time unit after the interval.
    pub finish: i64,
}

impl GanttBlock {
    /// Creates a block for `pid`.
    pub fn new(pid: impl Into<String>, start: i64, finish: i64) -> Self {
        Self {
            pid: pid.into(),
            start,
            finish,
        }
    }

    /// Creates an idle block.
    pub fn idle(start: i64, finish: i64) -> Self {
        Self::new(IDLE_PID, start, finish)
    }

    /// Whether this block is an idle gap.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid == IDLE_PID
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.finish - self.start
    }

    /// Half-open containment: `start <= t < finish`.
    #[inline]
    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t < self.finish
    }
}

/// One process's row in a stacked Gantt view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessLane {
    /// Process identifier.
    pub pid: String,
    /// The process's blocks, sorted by start.
    pub blocks: Vec<GanttBlock>,
}

/// An ordered sequence of Gantt blocks.
///
/// Serializes as a bare array of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    /// Blocks in emission order.
    pub blocks: Vec<GanttBlock>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing block sequence without modifying it.
    pub fn from_blocks(blocks: Vec<GanttBlock>) -> Self {
        Self { blocks }
    }

    /// Appends `[start, finish)` for `pid`.
    ///
    /// Extends the last block instead when it has the same pid and ends
    /// exactly at `start`. Empty intervals are ignored.
    pub fn push(&mut self, pid: &str, start: i64, finish: i64) {
        if finish <= start {
            return;
        }
        if let Some(last) = self.blocks.last_mut() {
            if last.pid == pid && last.finish == start {
                last.finish = finish;
                return;
            }
        }
        self.blocks.push(GanttBlock::new(pid, start, finish));
    }

    /// Appends an idle interval (merged with a preceding idle block).
    pub fn push_idle(&mut self, start: i64, finish: i64) {
        self.push(IDLE_PID, start, finish);
    }

    /// Consumes the timeline, returning its blocks.
    pub fn into_blocks(self) -> Vec<GanttBlock> {
        self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the timeline has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Makespan: latest finish across all blocks (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.blocks.iter().map(|b| b.finish).max().unwrap_or(0)
    }

    /// Blocks belonging to `pid`, in emission order.
    pub fn blocks_for(&self, pid: &str) -> Vec<&GanttBlock> {
        self.blocks.iter().filter(|b| b.pid == pid).collect()
    }

    /// Total time `pid` spends on the CPU.
    pub fn busy_time_for(&self, pid: &str) -> i64 {
        self.blocks_for(pid).iter().map(|b| b.duration()).sum()
    }

    /// Total time spent in idle blocks.
    pub fn idle_time(&self) -> i64 {
        self.blocks
            .iter()
            .filter(|b| b.is_idle())
            .map(GanttBlock::duration)
            .sum()
    }

    /// CPU utilization: non-idle time / makespan.
    ///
    /// Returns `None` if the makespan is zero.
    pub fn utilization(&self) -> Option<f64> {
        let makespan = self.makespan();
        if makespan <= 0 {
            return None;
        }
        let busy: i64 = self
            .blocks
            .iter()
            .filter(|b| !b.is_idle())
            .map(GanttBlock::duration)
            .sum();
        Some(busy as f64 / makespan as f64)
    }

    /// The block executing at time `t` (`start <= t < finish`).
    pub fn block_at(&self, t: i64) -> Option<&GanttBlock> {
        self.blocks.iter().find(|b| b.contains(t))
    }

    /// Whether the blocks cover `[0, makespan)` with no gaps or overlaps.
    ///
    /// An empty timeline is trivially contiguous.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 0;
        for b in &self.blocks {
            if b.start != expected || b.finish <= b.start {
                return false;
            }
            expected = b.finish;
        }
        true
    }

    /// Display form of the timeline.
    ///
    /// Sorts blocks by start, fills the span before the first block and
    /// any gap with idle blocks, and merges adjacent blocks that share a
    /// pid and touch.
    pub fn coalesced(&self) -> Timeline {
        let mut sorted: Vec<&GanttBlock> = self.blocks.iter().collect();
        sorted.sort_by_key(|b| b.start);

        let mut out = Timeline::new();
        let mut last = 0;
        for b in sorted {
            if b.start > last {
                out.push_idle(last, b.start);
            }
            out.push(&b.pid, b.start, b.finish);
            last = last.max(b.finish);
        }
        out
    }

    /// Stacked view: one lane per process (idle excluded), lanes ordered
    /// by pid number and blocks within a lane by start.
    pub fn lanes(&self) -> Vec<ProcessLane> {
        let mut by_pid: HashMap<&str, Vec<GanttBlock>> = HashMap::new();
        for b in self.blocks.iter().filter(|b| !b.is_idle()) {
            by_pid.entry(b.pid.as_str()).or_default().push(b.clone());
        }

        let mut lanes: Vec<ProcessLane> = by_pid
            .into_iter()
            .map(|(pid, mut blocks)| {
                blocks.sort_by_key(|b| b.start);
                ProcessLane {
                    pid: pid.to_string(),
                    blocks,
                }
            })
            .collect();
        lanes.sort_by(|a, b| compare_pids(&a.pid, &b.pid));
        lanes
    }
}

impl From<Vec<GanttBlock>> for Timeline {
    fn from(blocks: Vec<GanttBlock>) -> Self {
        Self::from_blocks(blocks)
    }
}
