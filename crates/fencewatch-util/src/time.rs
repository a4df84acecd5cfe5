//! Time utilities for fencewatch
//!
//! The run deadline and retry pacing use monotonic time, which is immune to
//! wall-clock steps while the watchdog is running.

use std::time::{Duration, Instant};

/// Represents a point in monotonic time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonotonicInstant(Instant);

impl MonotonicInstant {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    pub fn duration_since(&self, earlier: MonotonicInstant) -> Duration {
        self.0.duration_since(earlier.0)
    }

    /// Returns duration until `self`, or zero if `self` is in the past
    pub fn saturating_duration_until(&self, from: MonotonicInstant) -> Duration {
        if self.0 > from.0 {
            self.0.duration_since(from.0)
        } else {
            Duration::ZERO
        }
    }
}

impl std::ops::Add<Duration> for MonotonicInstant {
    type Output = MonotonicInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        MonotonicInstant(self.0 + rhs)
    }
}

/// A fixed point in monotonic time at which the monitor run ends.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: MonotonicInstant,
}

impl Deadline {
    /// Deadline `run_for` from now.
    pub fn after(run_for: Duration) -> Self {
        Self {
            at: MonotonicInstant::now() + run_for,
        }
    }

    pub fn is_reached(&self) -> bool {
        MonotonicInstant::now() >= self.at
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_until(MonotonicInstant::now())
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
