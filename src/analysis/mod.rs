//! Normalization, metrics, and comparison of algorithm runs.
//!
//! Turns raw timelines into per-process statistics and ranks algorithms
//! against each other.
//!
//! # Data Flow
//!
//! ```text
//! processes → Algorithm::run → Timeline → normalize → ResultRow[] → RunKpi
//!                                                  ↘ Comparator → Comparison
//! ```
//!
//! # Entry Points
//!
//! - [`normalize`]: timeline + processes → rows and integrity warnings
//! - [`RunKpi`]: averages, makespan, utilization, throughput of one run
//! - [`Comparator`]: all algorithms on one process set, ranked best-first
//! - [`RunRequest`]: validated one-shot run from a UI payload

mod compare;
mod kpi;
mod normalize;
mod request;

pub use compare::{rank, Comparator, Comparison};
pub use kpi::{averages, RunKpi};
pub use normalize::{normalize, IntegrityWarning, IntegrityWarningKind, NormalizedRun};
pub use request::{RunOutcome, RunRequest, DEFAULT_SIMULATION_QUANTUM};
