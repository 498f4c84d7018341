//! CPU scheduling domain models.
//!
//! Provides the data contracts exchanged with the presentation layer:
//! the input `Process`, the output `GanttBlock`/`Timeline`, and the
//! derived `ResultRow` and `ComparisonRow`.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Textbook | Gantt chart view |
//! |------------|----------|------------------|
//! | Process | Job / PCB | Row label |
//! | GanttBlock | CPU burst slice | Bar segment |
//! | Timeline | Schedule | Whole chart |
//! | ResultRow | Per-process statistics | Results table row |

mod metrics;
mod process;
mod timeline;

pub use metrics::{sort_rows_by_pid, ComparisonRow, ResultRow};
pub use process::{compare_pids, next_pid, pid_number, Process};
pub use timeline::{GanttBlock, ProcessLane, Timeline, IDLE_PID};
