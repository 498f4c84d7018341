//! CPU scheduling algorithms.
//!
//! Five single-CPU algorithms, each a pure function from a process set
//! to a gapless [`Timeline`]:
//!
//! | Algorithm | Preemptive | Ranking key |
//! |-----------|-----------|-------------|
//! | FCFS | no | arrival |
//! | SJF | no | burst |
//! | SRTF | yes (per unit) | remaining time |
//! | PRIORITY | no | priority value (lower first) |
//! | RR | yes (per quantum) | FIFO ready queue |
//!
//! # Usage
//!
//! ```
//! use u_cpusched::algorithms::{Algorithm, ScheduleParams};
//! use u_cpusched::models::Process;
//!
//! let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
//! let timeline = Algorithm::RoundRobin.run(&processes, &ScheduleParams::new().with_quantum(2));
//! assert_eq!(timeline.makespan(), 8);
//! ```
//!
//! # Tie-breaking
//! Every algorithm breaks ties by canonical order: arrival ascending,
//! then input order. Output is therefore fully reproducible.

mod fcfs;
mod priority;
mod round_robin;
mod sjf;
mod srtf;
mod working;

pub use fcfs::Fcfs;
pub use priority::Priority;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;

use std::fmt::{self, Debug};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{Process, Timeline};

/// Round Robin quantum used by the analysis view when none is given.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Parameters shared by all schedulers.
///
/// Only Round Robin reads `quantum`; the other algorithms ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Round Robin time slice (>= 1).
    pub quantum: i64,
}

impl ScheduleParams {
    /// Creates parameters with [`DEFAULT_QUANTUM`].
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self::new()
    }
}

/// A scheduling algorithm.
///
/// Implementations are pure: the same input always yields the same
/// timeline, and the input slice is never modified.
pub trait Scheduler: Send + Sync + Debug {
    /// Identifier of the implemented algorithm.
    fn algorithm(&self) -> Algorithm;

    /// Builds the timeline for `processes`.
    ///
    /// The result covers `[0, makespan)` with no gaps (idle blocks fill
    /// them). An empty process set yields an empty timeline.
    fn schedule(&self, processes: &[Process], params: &ScheduleParams) -> Timeline;
}

/// The closed set of supported algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest Remaining Time First (preemptive).
    #[serde(rename = "SRTF")]
    Srtf,
    /// Priority (non-preemptive).
    #[serde(rename = "PRIORITY")]
    Priority,
    /// Round Robin.
    #[serde(rename = "RR")]
    RoundRobin,
}

static FCFS: Fcfs = Fcfs;
static SJF: Sjf = Sjf;
static SRTF: Srtf = Srtf;
static PRIORITY: Priority = Priority;
static ROUND_ROBIN: RoundRobin = RoundRobin;

impl Algorithm {
    /// All algorithms, in the order the comparison view lists them.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Short display name ("FCFS", "RR", ...).
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::Priority => "PRIORITY",
            Algorithm::RoundRobin => "RR",
        }
    }

    /// Lowercase key used by the presentation layer ("fcfs", "rr", ...).
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Srtf => "srtf",
            Algorithm::Priority => "priority",
            Algorithm::RoundRobin => "rr",
        }
    }

    /// Long description.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come-First-Served",
            Algorithm::Sjf => "Shortest Job First (non-preemptive)",
            Algorithm::Srtf => "Shortest Remaining Time First (preemptive)",
            Algorithm::Priority => "Priority (non-preemptive)",
            Algorithm::RoundRobin => "Round Robin",
        }
    }

    /// Whether a running process can lose the CPU before finishing.
    pub fn is_preemptive(self) -> bool {
        matches!(self, Algorithm::Srtf | Algorithm::RoundRobin)
    }

    /// Looks up an algorithm by key, case-insensitively.
    ///
    /// Accepts the short keys plus `round_robin`/`roundrobin`.
    pub fn from_key(key: &str) -> Option<Algorithm> {
        match key.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Some(Algorithm::Fcfs),
            "sjf" => Some(Algorithm::Sjf),
            "srtf" => Some(Algorithm::Srtf),
            "priority" => Some(Algorithm::Priority),
            "rr" | "round_robin" | "roundrobin" => Some(Algorithm::RoundRobin),
            _ => None,
        }
    }

    /// The registered scheduler for this algorithm.
    pub fn scheduler(self) -> &'static dyn Scheduler {
        match self {
            Algorithm::Fcfs => &FCFS,
            Algorithm::Sjf => &SJF,
            Algorithm::Srtf => &SRTF,
            Algorithm::Priority => &PRIORITY,
            Algorithm::RoundRobin => &ROUND_ROBIN,
        }
    }

    /// Runs this algorithm over `processes`.
    ///
    /// `processes` must pass
    /// [`validate_processes`](crate::validation::validate_processes); the
    /// validated entry points are [`RunRequest::run`](crate::analysis::RunRequest::run)
    /// and [`Comparator::try_compare`](crate::analysis::Comparator::try_compare).
    pub fn run(self, processes: &[Process], params: &ScheduleParams) -> Timeline {
        let timeline = self.scheduler().schedule(processes, params);
        debug!(
            "{} scheduled {} processes into {} blocks (makespan {})",
            self.name(),
            processes.len(),
            timeline.len(),
            timeline.makespan()
        );
        timeline
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    /// The rejected key.
    pub key: String,
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scheduling algorithm '{}'", self.key)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::from_key(s).ok_or_else(|| ParseAlgorithmError { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::WorkloadGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_workloads(seed: u64, rounds: usize) -> Vec<Vec<Process>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let generator = WorkloadGenerator::new(6)
            .with_max_arrival(12)
            .with_burst_range(1, 7)
            .with_max_priority(4);
        (0..rounds).map(|_| generator.generate(&mut rng)).collect()
    }

    fn params() -> ScheduleParams {
        ScheduleParams::new().with_quantum(3)
    }

    #[test]
    fn test_registry_matches_algorithm() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.scheduler().algorithm(), algo);
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Algorithm::from_key("fcfs"), Some(Algorithm::Fcfs));
        assert_eq!(Algorithm::from_key("SRTF"), Some(Algorithm::Srtf));
        assert_eq!(Algorithm::from_key(" rr "), Some(Algorithm::RoundRobin));
        assert_eq!(
            Algorithm::from_key("round_robin"),
            Some(Algorithm::RoundRobin)
        );
        assert_eq!(Algorithm::from_key("lottery"), None);
        for algo in Algorithm::ALL {
            assert_eq!(Algorithm::from_key(algo.key()), Some(algo));
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "mlfq".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.key, "mlfq");
        assert!(err.to_string().contains("mlfq"));
        assert_eq!("priority".parse::<Algorithm>().unwrap(), Algorithm::Priority);
    }

    #[test]
    fn test_preemptive_flags() {
        assert!(Algorithm::Srtf.is_preemptive());
        assert!(Algorithm::RoundRobin.is_preemptive());
        assert!(!Algorithm::Fcfs.is_preemptive());
        assert!(!Algorithm::Sjf.is_preemptive());
        assert!(!Algorithm::Priority.is_preemptive());
    }

    #[test]
    fn test_algorithm_serde_names() {
        let json = serde_json::to_string(&Algorithm::RoundRobin).unwrap();
        assert_eq!(json, "\"RR\"");
        let back: Algorithm = serde_json::from_str("\"PRIORITY\"").unwrap();
        assert_eq!(back, Algorithm::Priority);
    }

    #[test]
    fn test_coverage_invariant() {
        for processes in random_workloads(7, 40) {
            for algo in Algorithm::ALL {
                let t = algo.run(&processes, &params());
                assert!(t.is_contiguous(), "{algo} left a gap: {:?}", t.blocks);
                assert!(!t.is_empty());
            }
        }
    }

    #[test]
    fn test_conservation_invariant() {
        for processes in random_workloads(11, 40) {
            for algo in Algorithm::ALL {
                let t = algo.run(&processes, &params());
                for p in &processes {
                    assert_eq!(t.busy_time_for(&p.pid), p.burst, "{algo} on {}", p.pid);
                }
            }
        }
    }

    #[test]
    fn test_no_block_before_arrival() {
        for processes in random_workloads(13, 40) {
            for algo in Algorithm::ALL {
                let t = algo.run(&processes, &params());
                for p in &processes {
                    for b in t.blocks_for(&p.pid) {
                        assert!(b.start >= p.arrival, "{algo} ran {} early", p.pid);
                    }
                }
            }
        }
    }

    #[test]
    fn test_determinism() {
        for processes in random_workloads(17, 20) {
            for algo in Algorithm::ALL {
                let a = algo.run(&processes, &params());
                let b = algo.run(&processes, &params());
                assert_eq!(
                    serde_json::to_string(&a).unwrap(),
                    serde_json::to_string(&b).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_non_preemptive_single_block_per_process() {
        for processes in random_workloads(19, 30) {
            for algo in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::Priority] {
                let t = algo.run(&processes, &params());
                for p in &processes {
                    assert_eq!(t.blocks_for(&p.pid).len(), 1);
                }
            }
        }
    }

    #[test]
    fn test_fcfs_dispatch_follows_arrival_order() {
        for processes in random_workloads(23, 30) {
            let t = Algorithm::Fcfs.run(&processes, &params());
            let arrivals: Vec<i64> = t
                .blocks
                .iter()
                .filter(|b| !b.is_idle())
                .map(|b| {
                    processes
                        .iter()
                        .find(|p| p.pid == b.pid)
                        .map(|p| p.arrival)
                        .unwrap()
                })
                .collect();
            assert!(arrivals.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_input_untouched_by_every_algorithm() {
        let processes = random_workloads(29, 1).remove(0);
        let before = processes.clone();
        for algo in Algorithm::ALL {
            let _ = algo.run(&processes, &params());
        }
        assert_eq!(processes, before);
    }

    #[test]
    fn test_empty_input_all_algorithms() {
        for algo in Algorithm::ALL {
            assert!(algo.run(&[], &params()).is_empty());
        }
    }
}
