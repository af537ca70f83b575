//! Timing window and per-cycle buffer scheduling
//!
//! The scheduler decides how many frames the next render cycle may produce so
//! that no cycle straddles a timing boundary: pre-roll cycles are truncated
//! to land exactly on the start offset, bounded cycles to land exactly on the
//! stop time. Boundary decisions are returned to the caller; track sequencing
//! and sink swapping stay outside this module.

use crate::audio::AudioConfig;

/// Active timing boundaries of the current track.
///
/// `stop_ms == 0` means unbounded. While `armed` the window is in pre-roll:
/// emulation runs from time zero but output is discarded until the start
/// offset is reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingWindow {
    start_ms: u32,
    stop_ms: u32,
    current_ms: u32,
    armed: bool,
}

impl TimingWindow {
    /// Build the window for a new track.
    ///
    /// An explicit `length_ms` is relative to the start offset (an explicit 0
    /// means unbounded); otherwise `default_length_ms` bounds the stop time
    /// absolutely and the start offset must fall inside it. A recording must
    /// have a bounded stop time.
    pub fn for_track(
        start_ms: u32,
        length_ms: Option<u32>,
        default_length_ms: u32,
        recording: bool,
    ) -> Result<Self, String> {
        let stop_ms = match length_ms {
            Some(0) => 0,
            Some(length) => start_ms.saturating_add(length),
            None => default_length_ms,
        };

        if length_ms.is_none() && stop_ms != 0 && start_ms >= stop_ms {
            return Err("start time exceeds the song's duration".to_string());
        }
        if recording && stop_ms == 0 {
            return Err("recording requires a bounded stop time".to_string());
        }

        Ok(TimingWindow {
            start_ms,
            stop_ms,
            current_ms: 0,
            armed: true,
        })
    }

    /// Window for a fast restart that skips the pre-roll: the start boundary
    /// is treated as already passed.
    pub fn disarmed(self) -> Self {
        TimingWindow {
            armed: false,
            current_ms: 0,
            ..self
        }
    }

    /// Record the engine position; returns the previous position.
    pub fn update(&mut self, now_ms: u32) -> u32 {
        std::mem::replace(&mut self.current_ms, now_ms)
    }

    /// Leave the pre-roll phase.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Whether the start boundary is still pending.
    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Start offset in milliseconds.
    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    /// Absolute stop time in milliseconds; 0 is unbounded.
    pub fn stop_ms(&self) -> u32 {
        self.stop_ms
    }

    /// Last recorded playback position.
    pub fn current_ms(&self) -> u32 {
        self.current_ms
    }

    /// Whether a stop time is set.
    pub fn bounded(&self) -> bool {
        self.stop_ms != 0
    }
}

/// Decision for the next render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The start offset has been reached: swap from the discard sink to the
    /// device, clear stale samples, drop fast-forward to 1x, then reschedule.
    BeginAudible,
    /// The bounded stop time has been reached: zero frames; the caller
    /// resolves looping/next-track/exit before any further scheduling.
    TrackEnd,
    /// Render this many frames.
    Render(u32),
}

/// Compute the frame count for the next cycle.
pub fn next_cycle(window: &TimingWindow, config: &AudioConfig) -> Cycle {
    let capacity = u64::from(config.buf_frames);

    if window.armed() {
        if window.current_ms() >= window.start_ms() {
            return Cycle::BeginAudible;
        }
        // Truncate the pre-roll so this cycle lands exactly on the offset.
        // At least one frame per cycle, or sub-millisecond remainders would
        // stall the loop.
        let until_start = config.frames_for_ms(window.start_ms() - window.current_ms());
        return Cycle::Render(until_start.clamp(1, capacity) as u32);
    }

    if window.bounded() {
        if window.current_ms() >= window.stop_ms() {
            return Cycle::TrackEnd;
        }
        let remaining = config.frames_for_ms(window.stop_ms() - window.current_ms());
        return Cycle::Render(remaining.clamp(1, capacity) as u32);
    }

    Cycle::Render(capacity as u32)
}
