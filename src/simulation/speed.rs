//! Playback speed setting.
//!
//! The speed is a slider value in `[100, 1000]` (right = faster). It maps
//! to a tick interval of `1100 - speed` milliseconds (1000 ms down to
//! 100 ms) and to a displayed multiplier of `speed / 100` (1.0x to 10.0x).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Playback speed slider value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(u32);

impl Speed {
    /// Slowest setting.
    pub const MIN: Speed = Speed(100);
    /// Fastest setting.
    pub const MAX: Speed = Speed(1000);
    /// Slider increment.
    pub const STEP: u32 = 100;

    const INTERVAL_BASE_MS: u64 = 1100;

    /// Creates a speed, clamping `value` into `[MIN, MAX]`.
    pub fn new(value: u32) -> Self {
        Speed(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Raw slider value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Wall-clock time between two virtual time units.
    pub fn tick_interval(self) -> Duration {
        // value is clamped to [100, 1000], so this stays in [100, 1000] ms
        Duration::from_millis(Self::INTERVAL_BASE_MS.saturating_sub(u64::from(self.0)))
    }

    /// Displayed multiplier (e.g. 5.0 for "5.0x").
    pub fn multiplier(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// One slider step faster (saturating).
    pub fn faster(self) -> Self {
        Speed::new(self.0.saturating_add(Self::STEP))
    }

    /// One slider step slower (saturating).
    pub fn slower(self) -> Self {
        Speed::new(self.0.saturating_sub(Self::STEP))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(500)
    }
}
