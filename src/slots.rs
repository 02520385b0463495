//! Window → slot expansion.
//!
//! Expands each candidate window into the discrete slots a meeting can
//! occupy. Granularity is a recorded configuration value ([`SlotPolicy`]),
//! not a hidden constant: the default steps by the meeting duration
//! (non-overlapping sibling slots), while [`SlotPolicy::half_hourly`]
//! reproduces finer 30-minute stepping with overlapping siblings.
//!
//! # Alignment
//! When `align` is set, the first slot start inside a window is rounded up
//! to the next whole multiple of `step`, measured from the Unix epoch. For
//! 30- and 60-minute steps this lands slots on :00/:30 UTC boundaries, the
//! way meeting invitations are conventionally placed.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{Slot, TimeRange, Window};

/// Slot generation policy.
///
/// Meeting duration is fixed at one hour by default; `step` controls the
/// spacing between successive slot starts within a window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotPolicy {
    /// Meeting duration in minutes. Zero is treated as one minute.
    pub duration_minutes: u32,
    /// Spacing between slot starts in minutes. Zero is treated as one minute.
    pub step_minutes: u32,
    /// Round the first slot of each window up to a step boundary.
    pub align: bool,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self::hourly()
    }
}

impl SlotPolicy {
    /// One-hour slots stepped by one hour: non-overlapping siblings.
    pub fn hourly() -> Self {
        Self {
            duration_minutes: 60,
            step_minutes: 60,
            align: true,
        }
    }

    /// One-hour slots stepped by 30 minutes: overlapping siblings, giving
    /// the optimizer flexible start times at the cost of a larger model.
    pub fn half_hourly() -> Self {
        Self {
            duration_minutes: 60,
            step_minutes: 30,
            align: true,
        }
    }

    /// Overrides the stepping interval.
    pub fn with_step_minutes(mut self, minutes: u32) -> Self {
        self.step_minutes = minutes;
        self
    }

    /// Enables or disables alignment of slot starts to step boundaries.
    pub fn with_alignment(mut self, align: bool) -> Self {
        self.align = align;
        self
    }

    /// Meeting duration as a `TimeDelta`.
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.duration_minutes.max(1)))
    }

    /// Stepping interval as a `TimeDelta`.
    pub fn step(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.step_minutes.max(1)))
    }
}

/// Rounds an instant up to the next whole multiple of `step` from the epoch.
fn align_up(t: DateTime<Utc>, step: TimeDelta) -> DateTime<Utc> {
    let step_secs = step.num_seconds().max(1);
    let nanos = i64::from(t.timestamp_subsec_nanos());
    let whole = t - TimeDelta::nanoseconds(nanos);
    let rem = whole.timestamp().rem_euclid(step_secs);
    let mut pad = if rem == 0 { 0 } else { step_secs - rem };
    if pad == 0 && nanos > 0 {
        pad = step_secs;
    }
    whole + TimeDelta::seconds(pad)
}

/// Expands one window into the ordered slots fully contained in it.
///
/// A well-formed window shorter than the meeting duration contributes zero
/// slots; a window whose end is not after its start is an error.
pub fn expand_window(window: &Window, policy: &SlotPolicy) -> Result<Vec<Slot>> {
    if !window.range.is_well_formed() {
        return Err(ScheduleError::InvalidWindow {
            window_id: window.id.clone(),
            reason: "end is not after start".into(),
        });
    }

    let duration = policy.duration();
    let step = policy.step();

    let mut slots = Vec::new();
    let mut start = if policy.align {
        align_up(window.range.start, step)
    } else {
        window.range.start
    };

    while start + duration <= window.range.end {
        slots.push(
            Slot::new(window.id.as_str(), TimeRange::new(start, start + duration))
                .with_location(window.location.clone()),
        );
        start = start + step;
    }

    Ok(slots)
}

/// Expands all windows, dropping malformed ones with a warning.
///
/// This is the recoverable path for [`ScheduleError::InvalidWindow`]: one
/// bad source event should not abort the whole run.
pub fn expand_windows(windows: &[Window], policy: &SlotPolicy) -> Vec<Slot> {
    let mut all = Vec::new();
    for window in windows {
        match expand_window(window, policy) {
            Ok(slots) => all.extend(slots),
            Err(e) => warn!(window = %window.id, "dropping window: {e}"),
        }
    }
    debug!(
        windows = windows.len(),
        slots = all.len(),
        "expanded candidate windows"
    );
    all
}
