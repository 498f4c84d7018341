//! CPU scheduling algorithms, metrics, and step-through simulation.
//!
//! Computes single-CPU schedules for a set of processes under five classic
//! policies, turns the resulting Gantt timelines into per-process metrics,
//! ranks the policies against each other, and replays a timeline one time
//! unit at a time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `GanttBlock`, `Timeline`,
//!   `ResultRow`, `ComparisonRow`
//! - **`algorithms`**: `Algorithm` registry and the FCFS, SJF, SRTF,
//!   Priority, and Round Robin schedulers
//! - **`analysis`**: Normalization, `RunKpi`, `Comparator`, `RunRequest`
//! - **`simulation`**: `Playback` state machine, `Speed`, queue status
//! - **`validation`**: Input integrity checks (pids, arrival, burst, quantum)
//! - **`workload`**: Seeded random process sets
//!
//! # Time Model
//!
//! Time is an integer count of abstract units starting at 0. Blocks are
//! half-open intervals `[start, finish)`; the CPU may idle, and idle gaps
//! are emitted as blocks with pid `"IDLE"`.
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", ch. 5
//! - Tanenbaum, Bos (2014), "Modern Operating Systems", §2.4

pub mod algorithms;
pub mod analysis;
pub mod models;
pub mod simulation;
pub mod validation;
pub mod workload;
