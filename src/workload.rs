//! Random process-set generation.
//!
//! Produces valid process sets (`P1..Pn`) for demos, exercises, and
//! invariant testing. Pass a seeded RNG for reproducible sets.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use u_cpusched::workload::WorkloadGenerator;
//! use u_cpusched::validation::validate_processes;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let processes = WorkloadGenerator::new(5).generate(&mut rng);
//! assert_eq!(processes.len(), 5);
//! assert!(validate_processes(&processes).is_ok());
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Generator of random process sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes to generate.
    pub count: usize,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: i64,
    /// Smallest burst (clamped to >= 1).
    pub min_burst: i64,
    /// Largest burst.
    pub max_burst: i64,
    /// Priorities are drawn from `0..=max_priority`; `None` = no priorities.
    pub max_priority: Option<i32>,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with arrivals in `0..=10`,
    /// bursts in `1..=10`, and priorities in `0..=5`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            max_priority: Some(5),
        }
    }

    /// Sets the latest possible arrival.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range (inclusive).
    pub fn with_burst_range(mut self, min_burst: i64, max_burst: i64) -> Self {
        self.min_burst = min_burst;
        self.max_burst = max_burst;
        self
    }

    /// Sets the largest priority value.
    pub fn with_max_priority(mut self, max_priority: i32) -> Self {
        self.max_priority = Some(max_priority);
        self
    }

    /// Generates processes without priorities.
    pub fn without_priority(mut self) -> Self {
        self.max_priority = None;
        self
    }

    /// Draws a process set.
    ///
    /// Ranges are normalized so the result always passes validation:
    /// arrivals are >= 0 and bursts >= 1.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Process> {
        let max_arrival = self.max_arrival.max(0);
        let min_burst = self.min_burst.max(1);
        let max_burst = self.max_burst.max(min_burst);

        (1..=self.count)
            .map(|n| {
                let arrival = rng.random_range(0..=max_arrival);
                let burst = rng.random_range(min_burst..=max_burst);
                let mut process = Process::new(format!("P{n}"), arrival, burst);
                if let Some(max_priority) = self.max_priority {
                    process = process.with_priority(rng.random_range(0..=max_priority.max(0)));
                }
                process
            })
            .collect()
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_processes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = WorkloadGenerator::new(50)
            .with_max_arrival(4)
            .with_burst_range(2, 3)
            .with_max_priority(1);
        let processes = generator.generate(&mut rng);

        assert_eq!(processes.len(), 50);
        for p in &processes {
            assert!((0..=4).contains(&p.arrival));
            assert!((2..=3).contains(&p.burst));
            assert!(matches!(p.priority, Some(0) | Some(1)));
        }
        assert!(validate_processes(&processes).is_ok());
    }

    #[test]
    fn test_generate_pids_sequential() {
        let mut rng = StdRng::seed_from_u64(1);
        let processes = WorkloadGenerator::new(3).generate(&mut rng);
        let pids: Vec<&str> = processes.iter().map(|p| p.pid.as_str()).collect();
        assert_eq!(pids, ["P1", "P2", "P3"]);
    }

    #[test]
    fn test_generate_is_reproducible() {
        let generator = WorkloadGenerator::new(8);
        let a = generator.generate(&mut StdRng::seed_from_u64(99));
        let b = generator.generate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_normalizes_bad_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        let processes = WorkloadGenerator::new(10)
            .with_max_arrival(-3)
            .with_burst_range(0, -1)
            .without_priority()
            .generate(&mut rng);
        for p in &processes {
            assert_eq!(p.arrival, 0);
            assert_eq!(p.burst, 1);
            assert_eq!(p.priority, None);
        }
    }

    #[test]
    fn test_generate_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(WorkloadGenerator::new(0).generate(&mut rng).is_empty());
    }
}
