//! Playback state machine
//!
//! The authoritative playback state plus the orthogonal fast flag. Restart
//! and Exit are intents: the outer driver loop detects them and reopens or
//! tears down before the next cycle; the state machine never loops on its
//! own. Other components request transitions through the methods here and
//! never set the state directly.

/// Playback state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// A fatal engine or sink failure ended the session.
    Error,
    /// Rendering and writing audio.
    Running,
    /// Suspended; cycles sleep instead of rendering.
    Paused,
    /// Not playing (initial state, and after teardown).
    #[default]
    Stopped,
    /// Intent: reopen on the (possibly changed) selected track.
    Restart,
    /// Intent: tear down and leave the play loop.
    Exit,
}

/// State holder enforcing the transition rules.
#[derive(Debug, Default)]
pub struct StateMachine {
    state: PlaybackState,
    fast: bool,
}

impl StateMachine {
    /// Create a machine in the Stopped state.
    pub fn new() -> Self {
        StateMachine::default()
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the pending Restart/Exit intent skips the inter-track reset.
    pub fn is_fast(&self) -> bool {
        self.fast
    }

    /// Stopped -> Running after a successful open. Clears the fast flag so
    /// the finished transition cannot leak into the next one.
    pub fn start(&mut self) {
        self.state = PlaybackState::Running;
        self.fast = false;
    }

    /// Running -> Paused.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
        }
    }

    /// Paused -> Running.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Running;
        }
    }

    /// External stop request (signal-style): back to Stopped.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Request a restart intent, optionally fast.
    pub fn request_restart(&mut self, fast: bool) {
        self.state = PlaybackState::Restart;
        self.fast = fast;
    }

    /// Request an exit intent, optionally fast.
    pub fn request_exit(&mut self, fast: bool) {
        self.state = PlaybackState::Exit;
        self.fast = fast;
    }

    /// A fatal failure; terminal for the session.
    pub fn error(&mut self) {
        self.state = PlaybackState::Error;
    }

    /// Acknowledge a Restart intent at the top of open(); the fast flag is
    /// left for the caller to inspect until `start()` clears it.
    pub fn begin_reopen(&mut self) {
        if self.state == PlaybackState::Restart {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Teardown at close: back to Stopped with the fast flag cleared so a
    /// subsequent cold start behaves normally.
    pub fn teardown(&mut self) {
        self.state = PlaybackState::Stopped;
        self.fast = false;
    }
}
