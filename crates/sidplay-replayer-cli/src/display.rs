//! Minimal stderr status output.
//!
//! A `mm:ss` time readout refreshed once per second plus the pause marker.
//! Anything fancier (ANSI tables, register dumps) belongs to a real display
//! layer, not here.

use std::io::Write;

/// Print the elapsed time when the second changed, overwriting in place.
pub fn show_elapsed(previous_ms: u32, now_ms: u32) {
    let seconds = now_ms / 1000;
    if seconds == previous_ms / 1000 {
        return;
    }
    eprint!("{:02}:{:02}", (seconds / 60) % 100, seconds % 60);
    // Back the cursor up so the next update overwrites the readout
    eprint!("\x08\x08\x08\x08\x08");
    let _ = std::io::stderr().flush();
}

/// Show the pause marker next to the time readout.
pub fn show_pause_marker() {
    eprint!(" (paused)");
    let _ = std::io::stderr().flush();
}

/// Wipe the pause marker after resuming.
pub fn clear_pause_marker() {
    const MARKER_LEN: usize = " (paused)".len();
    for _ in 0..MARKER_LEN {
        eprint!("\x08");
    }
    for _ in 0..MARKER_LEN {
        eprint!(" ");
    }
    for _ in 0..MARKER_LEN {
        eprint!("\x08");
    }
    let _ = std::io::stderr().flush();
}
