//! Validated single-run entry point.
//!
//! `RunRequest` mirrors the payload the presentation layer passes between
//! its analysis and simulation views:
//!
//! ```json
//! { "processes": [{"pid": "P1", "arrival": 0, "burst": 5}],
//!   "selectedAlgorithm": "rr",
//!   "timeQuantum": 2 }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use super::kpi::RunKpi;
use super::normalize::{normalize, IntegrityWarning};
use crate::algorithms::{Algorithm, ScheduleParams};
use crate::models::{sort_rows_by_pid, Process, ResultRow, Timeline};
use crate::validation::{validate_processes, validate_quantum, ValidationError};

/// Quantum assumed when a simulation payload omits `timeQuantum`.
pub const DEFAULT_SIMULATION_QUANTUM: i64 = 4;

fn default_quantum() -> i64 {
    DEFAULT_SIMULATION_QUANTUM
}

/// A request to run one algorithm on one process set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    /// Processes to schedule.
    pub processes: Vec<Process>,
    /// Algorithm key ("fcfs", "sjf", "srtf", "priority", "rr").
    pub selected_algorithm: String,
    /// Round Robin quantum.
    #[serde(default = "default_quantum")]
    pub time_quantum: i64,
}

/// Everything a results view needs from one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Algorithm that ran; `None` when the key was unknown.
    pub algorithm: Option<Algorithm>,
    /// Raw timeline as emitted by the algorithm.
    pub timeline: Timeline,
    /// Per-process rows sorted by pid number.
    pub rows: Vec<ResultRow>,
    /// Summary metrics; `None` when nothing ran.
    pub kpi: Option<RunKpi>,
    /// Integrity warnings raised during normalization.
    pub warnings: Vec<IntegrityWarning>,
}

impl RunRequest {
    /// Creates a request with [`DEFAULT_SIMULATION_QUANTUM`].
    pub fn new(processes: Vec<Process>, algorithm: Algorithm) -> Self {
        Self {
            processes,
            selected_algorithm: algorithm.key().to_string(),
            time_quantum: DEFAULT_SIMULATION_QUANTUM,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = quantum;
        self
    }

    /// The parsed algorithm, if the key is known.
    pub fn algorithm(&self) -> Option<Algorithm> {
        Algorithm::from_key(&self.selected_algorithm)
    }

    /// Validates the request.
    ///
    /// The quantum is only checked when Round Robin is selected.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = validate_processes(&self.processes).err().unwrap_or_default();
        if self.algorithm() == Some(Algorithm::RoundRobin) {
            if let Err(mut quantum_errors) = validate_quantum(self.time_quantum) {
                errors.append(&mut quantum_errors);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates, schedules, and normalizes.
    ///
    /// An unknown algorithm key yields an empty outcome and a warning
    /// rather than an error.
    pub fn run(&self) -> Result<RunOutcome, Vec<ValidationError>> {
        self.validate()?;

        let Some(algorithm) = self.algorithm() else {
            warn!(
                "unknown scheduling algorithm '{}'; returning an empty run",
                self.selected_algorithm
            );
            return Ok(RunOutcome::default());
        };

        let params = ScheduleParams::new().with_quantum(self.time_quantum);
        let timeline = algorithm.run(&self.processes, &params);
        let normalized = normalize(&timeline, &self.processes);
        let kpi = RunKpi::calculate(&timeline, &normalized);

        let mut rows = normalized.rows;
        sort_rows_by_pid(&mut rows);

        Ok(RunOutcome {
            algorithm: Some(algorithm),
            timeline,
            rows,
            kpi: Some(kpi),
            warnings: normalized.warnings,
        })
    }
}
