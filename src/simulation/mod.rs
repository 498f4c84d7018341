//! Step-through simulation of a precomputed schedule.
//!
//! The timeline is computed once by an algorithm; the simulator only moves
//! a virtual clock across it and reports what a live view should show.
//!
//! # Components
//!
//! - [`Playback`]: start/pause/reset state machine with handle-checked ticks
//! - [`Speed`]: slider value → tick interval and displayed multiplier
//! - [`queue_status`]: per-process status and remaining time at a given `t`

mod playback;
mod speed;
mod status;

pub use playback::{Execution, Frame, Playback, TickOutcome, TimerHandle, DONE_LABEL};
pub use speed::Speed;
pub use status::{queue_status, ProcessStatus, QueueEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Algorithm;
    use crate::analysis::RunRequest;
    use crate::models::Process;

    #[test]
    fn test_playback_over_request_outcome() {
        let processes = vec![
            Process::new("P1", 0, 8),
            Process::new("P2", 1, 4),
            Process::new("P3", 2, 9),
            Process::new("P4", 3, 5),
        ];
        let outcome = RunRequest::new(processes.clone(), Algorithm::Srtf).run().unwrap();
        let mut playback = Playback::new(outcome.timeline.clone()).with_speed(Speed::MAX);
        let handle = playback.start().unwrap();

        for _ in 0..3 {
            playback.tick(handle);
        }
        assert_eq!(playback.execution().label(), "P2");

        let queue = queue_status(&processes, playback.timeline(), playback.time());
        assert_eq!(queue[0].status, ProcessStatus::Ready);
        assert_eq!(queue[0].remaining, 7);
        assert_eq!(queue[1].status, ProcessStatus::Running);
        assert_eq!(queue[1].remaining, 2);

        while let TickOutcome::Advanced(_) = playback.tick(handle) {}
        assert_eq!(playback.time(), 26);
        assert_eq!(playback.execution(), Execution::Done);
        let queue = queue_status(&processes, playback.timeline(), playback.time());
        assert!(queue.iter().all(|e| e.status == ProcessStatus::Finished));
    }
}
