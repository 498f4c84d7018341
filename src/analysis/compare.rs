//! Cross-algorithm comparison and "best algorithm" suggestion.
//!
//! # Algorithm
//!
//! 1. Run every selected algorithm on the same process set.
//! 2. Normalize each timeline and average waiting and turnaround.
//! 3. Skip algorithms that yield no rows (an empty set would otherwise
//!    score 0 and look best).
//! 4. Rank ascending by average waiting, then by average turnaround.
//!    Full ties keep registry order (the sort is stable).
//!
//! The top row is a heuristic suggestion, not an optimality claim.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::kpi::averages;
use super::normalize::normalize;
use crate::algorithms::{Algorithm, ScheduleParams};
use crate::models::{ComparisonRow, Process};
use crate::validation::{validate_processes, validate_quantum, ValidationError};

/// Ranked comparison rows, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comparison {
    rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Ranked rows, best first.
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Suggested algorithm; `None` when nothing could be scored.
    pub fn best(&self) -> Option<&ComparisonRow> {
        self.rows.first()
    }

    /// Row for a specific algorithm.
    pub fn row_for(&self, algorithm: Algorithm) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.algorithm == algorithm)
    }

    /// Whether no algorithm was scored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the comparison, returning its rows.
    pub fn into_rows(self) -> Vec<ComparisonRow> {
        self.rows
    }
}

/// Runs several algorithms on one process set and ranks them.
///
/// # Example
/// ```
/// use u_cpusched::analysis::Comparator;
/// use u_cpusched::algorithms::Algorithm;
/// use u_cpusched::models::Process;
///
/// let processes = vec![
///     Process::new("P1", 0, 8),
///     Process::new("P2", 1, 4),
///     Process::new("P3", 2, 9),
///     Process::new("P4", 3, 5),
/// ];
/// let comparison = Comparator::new().with_quantum(2).compare(&processes);
/// assert_eq!(comparison.best().unwrap().algorithm, Algorithm::Srtf);
/// ```
#[derive(Debug, Clone)]
pub struct Comparator {
    params: ScheduleParams,
    algorithms: Vec<Algorithm>,
}

impl Comparator {
    /// Creates a comparator over all five algorithms with the default quantum.
    pub fn new() -> Self {
        Self {
            params: ScheduleParams::new(),
            algorithms: Algorithm::ALL.to_vec(),
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.params = self.params.with_quantum(quantum);
        self
    }

    /// Restricts the comparison to the given algorithms.
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Validates the input, then runs and ranks like [`compare`](Self::compare).
    ///
    /// The quantum is only checked when Round Robin is among the
    /// configured algorithms.
    pub fn try_compare(
        &self,
        processes: &[Process],
    ) -> Result<Comparison, Vec<ValidationError>> {
        let mut errors = validate_processes(processes).err().unwrap_or_default();
        if self.algorithms.contains(&Algorithm::RoundRobin) {
            if let Err(mut quantum_errors) = validate_quantum(self.params.quantum) {
                errors.append(&mut quantum_errors);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.compare(processes))
    }

    /// Runs the configured algorithms and ranks them.
    ///
    /// Expects input that passes
    /// [`validate_processes`](crate::validation::validate_processes);
    /// invalid bursts or arrivals yield meaningless rankings. Use
    /// [`try_compare`](Self::try_compare) for unchecked data.
    pub fn compare(&self, processes: &[Process]) -> Comparison {
        debug_assert!(
            validate_processes(processes).is_ok(),
            "Comparator::compare called with an invalid process set"
        );
        let rows = self
            .algorithms
            .iter()
            .filter_map(|&algo| self.score(algo, processes))
            .collect();
        let ranked = rank(rows);
        if let Some(best) = ranked.first() {
            debug!(
                "best of {} algorithms: {} (avg waiting {:.2}, avg turnaround {:.2})",
                ranked.len(),
                best.algorithm,
                best.avg_waiting,
                best.avg_turnaround
            );
        }
        Comparison { rows: ranked }
    }

    /// Like [`compare`](Self::compare) but selects algorithms by key.
    ///
    /// Unknown keys are logged and skipped; they never abort the run.
    pub fn compare_keys(&self, keys: &[&str], processes: &[Process]) -> Comparison {
        let algorithms = keys
            .iter()
            .filter_map(|key| {
                let algo = Algorithm::from_key(key);
                if algo.is_none() {
                    warn!("unknown scheduling algorithm '{key}' skipped in comparison");
                }
                algo
            })
            .collect();
        Self {
            params: self.params,
            algorithms,
        }
        .compare(processes)
    }

    fn score(&self, algorithm: Algorithm, processes: &[Process]) -> Option<ComparisonRow> {
        let timeline = algorithm.run(processes, &self.params);
        let run = normalize(&timeline, processes);
        if run.rows.is_empty() {
            return None;
        }
        let (avg_waiting, avg_turnaround) = averages(&run.rows);
        Some(ComparisonRow::new(algorithm, avg_waiting, avg_turnaround))
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts rows ascending by average waiting, ties by average turnaround.
///
/// Stable: rows that tie on both keep their input order.
pub fn rank(mut rows: Vec<ComparisonRow>) -> Vec<ComparisonRow> {
    rows.sort_by(|a, b| {
        a.avg_waiting
            .total_cmp(&b.avg_waiting)
            .then_with(|| a.avg_turnaround.total_cmp(&b.avg_turnaround))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn textbook_processes() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 8),
        ]
    }

    #[test]
    fn test_compare_ranks_all_five() {
        let comparison = Comparator::new().with_quantum(2).compare(&textbook_processes());
        let order: Vec<Algorithm> = comparison.rows().iter().map(|r| r.algorithm).collect();
        // SRTF 3.0 < FCFS = SJF = PRIORITY 3.33 (stable) < RR 6.0
        assert_eq!(
            order,
            [
                Algorithm::Srtf,
                Algorithm::Fcfs,
                Algorithm::Sjf,
                Algorithm::Priority,
                Algorithm::RoundRobin,
            ]
        );
        let best = comparison.best().unwrap();
        assert!((best.avg_waiting - 3.0).abs() < 1e-10);

        let rr = comparison.row_for(Algorithm::RoundRobin).unwrap();
        assert!((rr.avg_waiting - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_rank_tie_broken_by_turnaround() {
        let rows = vec![
            ComparisonRow::new(Algorithm::Fcfs, 4.0, 9.0),
            ComparisonRow::new(Algorithm::Sjf, 4.0, 7.5),
            ComparisonRow::new(Algorithm::RoundRobin, 5.0, 1.0),
        ];
        let ranked = rank(rows);
        assert_eq!(ranked[0].algorithm, Algorithm::Sjf);
        assert_eq!(ranked[1].algorithm, Algorithm::Fcfs);
        assert_eq!(ranked[2].algorithm, Algorithm::RoundRobin);
    }

    #[test]
    fn test_rank_deterministic_on_full_tie() {
        let rows = vec![
            ComparisonRow::new(Algorithm::Priority, 2.0, 3.0),
            ComparisonRow::new(Algorithm::Fcfs, 2.0, 3.0),
        ];
        for _ in 0..3 {
            let ranked = rank(rows.clone());
            assert_eq!(ranked[0].algorithm, Algorithm::Priority);
        }
    }

    #[test]
    fn test_try_compare_rejects_invalid_processes() {
        let processes = vec![Process::new("P1", 0, -3), Process::new("P2", 0, 2)];
        let errors = Comparator::new().try_compare(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
    }

    #[test]
    fn test_try_compare_checks_quantum_only_with_round_robin() {
        let processes = textbook_processes();
        let errors = Comparator::new()
            .with_quantum(0)
            .try_compare(&processes)
            .unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);

        let comparison = Comparator::new()
            .with_quantum(0)
            .with_algorithms(vec![Algorithm::Fcfs, Algorithm::Srtf])
            .try_compare(&processes)
            .unwrap();
        assert_eq!(comparison.best().unwrap().algorithm, Algorithm::Srtf);
    }

    #[test]
    fn test_try_compare_matches_compare_on_valid_input() {
        let processes = textbook_processes();
        let comparator = Comparator::new().with_quantum(2);
        assert_eq!(
            comparator.try_compare(&processes).unwrap(),
            comparator.compare(&processes)
        );
    }

    #[test]
    fn test_empty_process_set_has_no_best() {
        let comparison = Comparator::new().compare(&[]);
        assert!(comparison.is_empty());
        assert!(comparison.best().is_none());
    }

    #[test]
    fn test_compare_keys_skips_unknown() {
        let comparison =
            Comparator::new().compare_keys(&["fcfs", "lottery", "rr"], &textbook_processes());
        assert_eq!(comparison.rows().len(), 2);
        assert!(comparison.row_for(Algorithm::Fcfs).is_some());
        assert!(comparison.row_for(Algorithm::RoundRobin).is_some());
    }

    #[test]
    fn test_with_algorithms_subset() {
        let comparison = Comparator::new()
            .with_algorithms(vec![Algorithm::Fcfs, Algorithm::Srtf])
            .compare(&textbook_processes());
        assert_eq!(comparison.rows().len(), 2);
        assert_eq!(comparison.best().unwrap().algorithm, Algorithm::Srtf);
    }

    #[test]
    fn test_comparison_json_is_array() {
        let comparison = Comparator::new()
            .with_algorithms(vec![Algorithm::Fcfs])
            .compare(&[Process::new("P1", 0, 2)]);
        let json = serde_json::to_value(&comparison).unwrap();
        assert_eq!(json[0]["algorithm"], "FCFS");
        assert_eq!(json[0]["avgWaiting"], 0.0);
    }
}
