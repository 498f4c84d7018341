//! Mutable working state shared by the algorithm implementations.
//!
//! Each run builds a `WorkingSet` over borrowed input processes. The
//! caller's process list is never mutated: remaining CPU time and
//! completion live in the working items, addressed by index.
//!
//! # Canonical Order
//! Items are stably sorted by arrival, so processes arriving at the same
//! time keep their input order. Every "first encountered" tie-break in
//! this crate refers to this order.

use crate::models::{Process, Timeline};

/// Per-process scheduling state.
#[derive(Debug, Clone)]
pub(crate) struct WorkItem<'a> {
    pub process: &'a Process,
    pub remaining: i64,
    pub completed: bool,
}

impl WorkItem<'_> {
    #[inline]
    pub fn is_ready(&self, time: i64) -> bool {
        !self.completed && self.process.arrival <= time
    }
}

/// Index-addressed working copies of a process set in canonical order.
#[derive(Debug, Clone)]
pub(crate) struct WorkingSet<'a> {
    pub items: Vec<WorkItem<'a>>,
}

impl<'a> WorkingSet<'a> {
    pub fn new(processes: &'a [Process]) -> Self {
        let mut items: Vec<WorkItem<'a>> = processes
            .iter()
            .map(|p| WorkItem {
                process: p,
                remaining: p.burst,
                completed: false,
            })
            .collect();
        // sort_by_key is stable
        items.sort_by_key(|item| item.process.arrival);
        Self { items }
    }

    pub fn all_completed(&self) -> bool {
        self.items.iter().all(|item| item.completed)
    }

    /// Earliest arrival among processes not yet completed.
    pub fn next_arrival(&self) -> Option<i64> {
        self.items
            .iter()
            .filter(|item| !item.completed)
            .map(|item| item.process.arrival)
            .min()
    }

    /// Index of the ready item with the smallest key at `time`.
    ///
    /// Ties go to the item that comes first in canonical order.
    pub fn select_min_by<K, F>(&self, time: i64, key: F) -> Option<usize>
    where
        K: Ord,
        F: Fn(&WorkItem<'a>) -> K,
    {
        let mut best: Option<(usize, K)> = None;
        for (idx, item) in self.items.iter().enumerate() {
            if !item.is_ready(time) {
                continue;
            }
            let k = key(item);
            // strict comparison keeps the first-encountered item on ties
            let better = match &best {
                Some((_, best_key)) => k < *best_key,
                None => true,
            };
            if better {
                best = Some((idx, k));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Marks `idx` as having run for `amount` units.
    pub fn consume(&mut self, idx: usize, amount: i64) {
        let item = &mut self.items[idx];
        item.remaining -= amount;
        if item.remaining <= 0 {
            item.remaining = 0;
            item.completed = true;
        }
    }
}

/// Non-preemptive dispatch loop shared by SJF and Priority.
///
/// At every decision point the ready item with the smallest `key` runs to
/// completion in a single block. When nothing is ready, time jumps to the
/// next arrival and the gap becomes an idle block.
pub(crate) fn run_to_completion<K, F>(processes: &[Process], key: F) -> Timeline
where
    K: Ord,
    F: Fn(&WorkItem<'_>) -> K,
{
    let mut set = WorkingSet::new(processes);
    let mut timeline = Timeline::new();
    let mut time = 0;

    while !set.all_completed() {
        match set.select_min_by(time, &key) {
            Some(idx) => {
                let item = &set.items[idx];
                let (process, burst) = (item.process, item.remaining);
                let finish = time + burst;
                timeline.push(&process.pid, time, finish);
                set.consume(idx, burst);
                time = finish;
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
