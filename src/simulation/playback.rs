//! Step-through playback over a precomputed timeline.
//!
//! # State Machine
//!
//! ```text
//!            start()                  tick / poll reaches makespan
//! Stopped ───────────▶ Running ──────────────────────────────▶ Stopped (Done)
//!    ▲                   │  │
//!    └──── pause() ──────┘  └── reset(): time = 0, Stopped
//! ```
//!
//! # Timer Discipline
//!
//! At most one timer is armed per playback. Every arm (on `start` or on a
//! speed change while running) issues a fresh [`TimerHandle`] and
//! invalidates the previous one, so a late callback from an old timer is
//! reported as [`TickOutcome::Stale`] and never advances time. `pause`
//! and `reset` are idempotent.
//!
//! The host drives time either by calling [`Playback::tick`] from its own
//! timer with the handle it was given, or by calling [`Playback::poll`]
//! from a cooperative loop with the elapsed wall time.

use std::time::Duration;

use log::trace;
use serde::{Deserialize, Serialize};

use super::speed::Speed;
use crate::models::{Timeline, IDLE_PID};

/// Label shown once playback has reached the makespan.
pub const DONE_LABEL: &str = "Done";

/// Token for one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    interval: Duration,
}

impl TimerHandle {
    /// Wall-clock interval between ticks for this timer.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// What occupies the CPU at the current virtual time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Execution {
    /// A process is running.
    Process(String),
    /// No process is running.
    Idle,
    /// Playback reached the end of the timeline.
    Done,
}

impl Execution {
    /// Display label: the pid, `"IDLE"`, or `"Done"`.
    pub fn label(&self) -> &str {
        match self {
            Execution::Process(pid) => pid,
            Execution::Idle => IDLE_PID,
            Execution::Done => DONE_LABEL,
        }
    }
}

/// Result of delivering one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Virtual time advanced to the given value.
    Advanced(i64),
    /// Virtual time reached the makespan; the timer was cancelled.
    Finished(i64),
    /// The handle is not the armed timer; nothing changed.
    Stale,
}

/// Observable playback state for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Current virtual time.
    pub time: i64,
    /// Whether a timer is armed.
    pub running: bool,
    /// What is on the CPU at `time`.
    pub execution: Execution,
    /// `time / makespan` (0.0..1.0).
    pub progress: f64,
}

/// Playback engine over one timeline.
#[derive(Debug, Clone)]
pub struct Playback {
    timeline: Timeline,
    makespan: i64,
    time: i64,
    speed: Speed,
    timer: Option<TimerHandle>,
    next_timer_id: u64,
    carry: Duration,
}

impl Playback {
    /// Creates a stopped playback at t=0.
    pub fn new(timeline: Timeline) -> Self {
        let makespan = timeline.makespan();
        Self {
            timeline,
            makespan,
            time: 0,
            speed: Speed::default(),
            timer: None,
            next_timer_id: 0,
            carry: Duration::ZERO,
        }
    }

    /// Sets the initial speed.
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// The timeline being played.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current virtual time.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// End of the timeline.
    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    /// Current speed.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Whether a timer is armed.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether virtual time has reached the makespan.
    pub fn is_finished(&self) -> bool {
        !self.timeline.is_empty() && self.time >= self.makespan
    }

    /// Starts (or restarts) ticking.
    ///
    /// Cancels any armed timer and arms a new one. Returns `None` without
    /// arming when there is nothing left to play.
    pub fn start(&mut self) -> Option<TimerHandle> {
        self.cancel_timer();
        if self.timeline.is_empty() || self.time >= self.makespan {
            return None;
        }
        Some(self.arm_timer())
    }

    /// Stops ticking, keeping the current time. Safe to call when stopped.
    pub fn pause(&mut self) {
        self.cancel_timer();
    }

    /// Stops ticking and rewinds to t=0. Safe to call when stopped.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.time = 0;
    }

    /// Changes the speed.
    ///
    /// While running, the timer is re-armed at the new interval and the
    /// new handle is returned; the old handle becomes stale.
    pub fn set_speed(&mut self, speed: Speed) -> Option<TimerHandle> {
        self.speed = speed;
        if self.timer.is_none() {
            return None;
        }
        self.cancel_timer();
        Some(self.arm_timer())
    }

    /// Delivers one tick from the timer identified by `handle`.
    pub fn tick(&mut self, handle: TimerHandle) -> TickOutcome {
        if self.timer != Some(handle) {
            trace!("ignoring stale playback timer {}", handle.id);
            return TickOutcome::Stale;
        }
        self.advance()
    }

    /// Advances by elapsed wall time, firing as many whole ticks as fit.
    ///
    /// Leftover time carries over to the next call. Returns the number of
    /// ticks fired; 0 when stopped.
    pub fn poll(&mut self, elapsed: Duration) -> u32 {
        let Some(handle) = self.timer else {
            return 0;
        };
        self.carry += elapsed;
        let mut fired = 0;
        while self.carry >= handle.interval {
            self.carry -= handle.interval;
            fired += 1;
            if let TickOutcome::Finished(_) = self.advance() {
                break;
            }
        }
        fired
    }

    /// Moves one unit forward without a timer (manual stepping).
    ///
    /// Returns the new time, or `None` when already at the end.
    pub fn step(&mut self) -> Option<i64> {
        if self.time >= self.makespan {
            return None;
        }
        self.time += 1;
        if self.time >= self.makespan {
            self.cancel_timer();
        }
        Some(self.time)
    }

    /// What is on the CPU at the current time.
    pub fn execution(&self) -> Execution {
        if self.is_finished() {
            return Execution::Done;
        }
        match self.timeline.block_at(self.time) {
            Some(b) if !b.is_idle() => Execution::Process(b.pid.clone()),
            _ => Execution::Idle,
        }
    }

    /// Snapshot for rendering.
    pub fn frame(&self) -> Frame {
        Frame {
            time: self.time,
            running: self.is_running(),
            execution: self.execution(),
            progress: self.time as f64 / self.makespan.max(1) as f64,
        }
    }

    fn advance(&mut self) -> TickOutcome {
        self.time += 1;
        trace!("playback tick t={}", self.time);
        if self.time >= self.makespan {
            self.time = self.makespan;
            self.cancel_timer();
            return TickOutcome::Finished(self.time);
        }
        TickOutcome::Advanced(self.time)
    }

    fn arm_timer(&mut self) -> TimerHandle {
        self.next_timer_id += 1;
        let handle = TimerHandle {
            id: self.next_timer_id,
            interval: self.speed.tick_interval(),
        };
        trace!(
            "armed playback timer {} every {:?}",
            handle.id,
            handle.interval
        );
        self.timer = Some(handle);
        self.carry = Duration::ZERO;
        handle
    }

    fn cancel_timer(&mut self) {
        if let Some(old) = self.timer.take() {
            trace!("cancelled playback timer {}", old.id);
        }
        self.carry = Duration::ZERO;
    }
}
