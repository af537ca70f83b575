//! Subtune selection and sequencing
//!
//! Owns which subtune plays, the single/loop semantics, and the wraparound
//! arithmetic over `[1, songs]`. When the state machine reports a track-end
//! boundary, `resolve_boundary` decides whether the session restarts or
//! exits.

/// How a track-end boundary resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAction {
    /// Reopen on the (possibly advanced) selected track.
    Restart,
    /// The sequence is complete; leave the play loop.
    Exit,
}

/// Subtune selection state.
#[derive(Debug, Clone)]
pub struct TrackSequencer {
    first: u16,
    selected: u16,
    songs: u16,
    loop_mode: bool,
    single: bool,
}

impl TrackSequencer {
    /// Create a sequencer for `songs` subtunes starting at `start`
    /// (0 picks track 1 until the tune's default is known).
    pub fn new(songs: u16, start: u16, loop_mode: bool, single: bool) -> Self {
        let songs = songs.max(1);
        let selected = if start == 0 { 0 } else { start.min(songs) };
        TrackSequencer {
            first: selected,
            selected,
            songs,
            loop_mode,
            single,
        }
    }

    /// Currently selected track (1-based; 0 until the engine resolved the
    /// tune's default).
    pub fn selected(&self) -> u16 {
        self.selected
    }

    /// Number of subtunes.
    pub fn songs(&self) -> u16 {
        self.songs
    }

    /// Track the sequence started on.
    pub fn first(&self) -> u16 {
        self.first
    }

    /// Whether single-track mode is active.
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Whether loop mode is active.
    pub fn is_loop(&self) -> bool {
        self.loop_mode
    }

    /// Adopt the track the engine actually selected; the first call also
    /// pins the sequence's starting track.
    pub fn note_started(&mut self, actual: u16) {
        self.selected = actual;
        if self.first == 0 {
            self.first = actual;
        }
    }

    /// Update the subtune count reported by the tune.
    pub fn set_songs(&mut self, songs: u16) {
        self.songs = songs.max(1);
        if self.selected > self.songs {
            self.selected = self.songs;
        }
    }

    /// Select a track if it is in range.
    pub fn select(&mut self, track: u16) -> bool {
        if (1..=self.songs).contains(&track) {
            self.selected = track;
            true
        } else {
            false
        }
    }

    /// Advance to the next track, wrapping to 1 past the end.
    pub fn next(&mut self) {
        self.selected += 1;
        if self.selected > self.songs {
            self.selected = 1;
        }
    }

    /// Step to the previous track, wrapping to the last one below 1.
    pub fn previous(&mut self) {
        if self.selected <= 1 {
            self.selected = self.songs;
        } else {
            self.selected -= 1;
        }
    }

    /// Resolve a track-end boundary.
    ///
    /// Priority: loop mode restarts the same track; single-track mode exits;
    /// otherwise the selection advances (wrapping to 1) and the session exits
    /// once it is back at the starting track.
    pub fn resolve_boundary(&mut self) -> BoundaryAction {
        if self.loop_mode {
            return BoundaryAction::Restart;
        }
        if self.single {
            return BoundaryAction::Exit;
        }

        self.next();
        if self.selected == self.first {
            BoundaryAction::Exit
        } else {
            BoundaryAction::Restart
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraparound_closure() {
        // next() applied `songs` times returns to the original track.
        for songs in 1..=7u16 {
            let mut tracks = TrackSequencer::new(songs, 1, false, false);
            for _ in 0..songs {
                tracks.next();
            }
            assert_eq!(tracks.selected(), 1, "{songs} steps must close the cycle");
        }
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut tracks = TrackSequencer::new(4, 1, false, false);
        tracks.previous();
        assert_eq!(tracks.selected(), 4);
        tracks.previous();
        assert_eq!(tracks.selected(), 3);
    }

    #[test]
    fn select_validates_range() {
        let mut tracks = TrackSequencer::new(3, 1, false, false);
        assert!(tracks.select(3));
        assert_eq!(tracks.selected(), 3);
        assert!(!tracks.select(4));
        assert!(!tracks.select(0));
        assert_eq!(tracks.selected(), 3, "failed selection must not move");
    }

    #[test]
    fn loop_mode_always_restarts_the_same_track() {
        let mut tracks = TrackSequencer::new(5, 2, true, false);
        for _ in 0..10 {
            assert_eq!(tracks.resolve_boundary(), BoundaryAction::Restart);
            assert_eq!(tracks.selected(), 2);
        }
    }

    #[test]
    fn single_mode_always_exits_even_with_loop_unset() {
        let mut tracks = TrackSequencer::new(5, 2, false, true);
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Exit);
    }

    #[test]
    fn loop_takes_priority_over_single() {
        let mut tracks = TrackSequencer::new(5, 2, true, true);
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Restart);
    }

    #[test]
    fn sequence_exits_when_back_at_the_starting_track() {
        // Three tracks from track 1: restart into 2, restart into 3, then
        // the wrap back to 1 ends the sequence without replaying it.
        let mut tracks = TrackSequencer::new(3, 1, false, false);
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Restart);
        assert_eq!(tracks.selected(), 2);
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Restart);
        assert_eq!(tracks.selected(), 3);
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Exit);
        assert_eq!(tracks.selected(), 1);
    }

    #[test]
    fn sequence_from_a_middle_track_wraps_through_one() {
        let mut tracks = TrackSequencer::new(3, 2, false, false);
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Restart); // -> 3
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Restart); // -> 1
        assert_eq!(tracks.resolve_boundary(), BoundaryAction::Exit); // back at 2
    }

    #[test]
    fn note_started_pins_the_first_track_once() {
        let mut tracks = TrackSequencer::new(1, 0, false, false);
        tracks.set_songs(4);
        tracks.note_started(3);
        assert_eq!(tracks.first(), 3);
        tracks.note_started(4);
        assert_eq!(tracks.first(), 3, "starting track is pinned by the first open");
    }
}
