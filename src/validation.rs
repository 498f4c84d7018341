//! Input validation for process sets.
//!
//! Checks the boundary contract before processes reach an algorithm.
//! Detects:
//! - Empty, reserved, or duplicate pids
//! - Negative arrival times
//! - Bursts shorter than one time unit
//! - Negative priorities
//! - Round Robin quanta shorter than one time unit
//! - Process sets whose schedule would run past `i64::MAX`
//!
//! The algorithms themselves assume validated input; callers that accept
//! user data should run [`validate_processes`] first (as
//! [`RunRequest::run`](crate::analysis::RunRequest::run) does).

use std::collections::HashSet;
use std::fmt;

use crate::models::{Process, IDLE_PID};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process has an empty pid.
    EmptyPid,
    /// A process uses the idle sentinel as its pid.
    ReservedPid,
    /// Two processes share the same pid.
    DuplicatePid,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs less than one unit of CPU time.
    NonPositiveBurst,
    /// A process has a priority below 0.
    NegativePriority,
    /// A Round Robin quantum is less than one time unit.
    InvalidQuantum,
    /// The latest arrival plus the total burst does not fit in `i64`.
    TimeOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a process set.
///
/// Checks:
/// 1. Every pid is non-empty and is not the idle sentinel
/// 2. No duplicate pids
/// 3. `arrival >= 0`
/// 4. `burst >= 1`
/// 5. `priority >= 0` when present
/// 6. `max(arrival) + sum(burst)` fits in `i64` (every schedule ends by then)
///
/// An empty set is valid: it schedules to an empty timeline.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for (index, p) in processes.iter().enumerate() {
        if p.pid.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPid,
                format!("Process #{index} has an empty pid"),
            ));
        } else if p.pid == IDLE_PID {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedPid,
                format!("Process #{index} uses the reserved pid '{IDLE_PID}'"),
            ));
        } else if !pids.insert(p.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' arrives at {} (must be >= 0)", p.pid, p.arrival),
            ));
        }

        if p.burst < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has burst {} (must be >= 1)", p.pid, p.burst),
            ));
        }

        if let Some(priority) = p.priority {
            if priority < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativePriority,
                    format!("Process '{}' has priority {priority} (must be >= 0)", p.pid),
                ));
            }
        }
    }

    if horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst exceeds the representable time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on the makespan of any schedule: `max(arrival) + sum(burst)`.
///
/// Negative fields are counted as 0 (they are reported separately).
/// `None` on overflow.
fn horizon(processes: &[Process]) -> Option<i64> {
    let latest_arrival = processes.iter().map(|p| p.arrival.max(0)).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst.max(0)))
}

/// Validates a Round Robin time quantum (`quantum >= 1`).
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum < 1 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Time quantum {quantum} must be >= 1"),
        )]);
    }
    Ok(())
}
