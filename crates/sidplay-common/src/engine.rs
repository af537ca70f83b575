//! The engine-side playback contract.
//!
//! A SID emulation backend implements [`SidEngine`]; the console player drives
//! it one buffer at a time and never touches emulation internals. The trait is
//! object-safe so the player can hold a `Box<dyn SidEngine>` selected at
//! startup.

use crate::settings::{ClockModel, FilterSettings, SidModel};
use crate::Result;

/// Channel layout negotiated with the audio sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    /// Single-channel output.
    #[default]
    Mono,
    /// Interleaved two-channel output.
    Stereo,
}

impl Playback {
    /// Number of interleaved samples per frame.
    pub fn channels(self) -> u8 {
        match self {
            Playback::Mono => 1,
            Playback::Stereo => 2,
        }
    }
}

/// Static description of the loaded tune.
#[derive(Debug, Clone, Default)]
pub struct TuneInfo {
    /// Number of subtunes in the file (>= 1).
    pub songs: u16,
    /// Subtune the file designates as its default (1-based).
    pub start_song: u16,
    /// Number of SID chips the tune addresses (1-3).
    pub sid_chips: u8,
    /// Tune title, when the format carries one.
    pub title: Option<String>,
    /// Tune author, when the format carries one.
    pub author: Option<String>,
}

/// Configuration pushed to the engine after sink negotiation.
///
/// The sample rate and channel layout are the *negotiated* sink values, which
/// may differ from what was requested; the engine must render for exactly
/// these.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel layout.
    pub playback: Playback,
    /// Filter emulation settings.
    pub filter: FilterSettings,
    /// SID model to use when the tune does not force one.
    pub default_model: SidModel,
    /// Ignore the tune's model hint and always use `default_model`.
    pub force_model: bool,
    /// Machine clock to use when the tune does not force one.
    pub default_clock: ClockModel,
    /// Ignore the tune's clock hint and always use `default_clock`.
    pub force_clock: bool,
}

/// Read-only snapshot for a display layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStatus {
    /// Emulated playback position in milliseconds.
    pub position_ms: u32,
    /// Currently selected subtune (1-based).
    pub track: u16,
    /// Active fast-forward multiplier.
    pub fast_forward: u8,
}

/// Object-safe contract for a sample-producing SID engine.
///
/// Every call is made from the player's single render loop; implementations
/// need `Send` only so the player itself can be moved across threads.
pub trait SidEngine: Send {
    /// Get static information about the loaded tune.
    fn tune_info(&self) -> TuneInfo;

    /// Select a subtune and reset the engine to its beginning.
    ///
    /// Track 0 selects the tune's default subtune. Returns the track that is
    /// actually active afterwards.
    fn select_track(&mut self, track: u16) -> Result<u16>;

    /// Apply negotiated output parameters and emulation settings.
    ///
    /// Called after the audio sink has negotiated its configuration and again
    /// on every reopen; the engine must accept reconfiguration between tracks.
    fn configure(&mut self, config: &EngineConfig) -> Result<()>;

    /// Render interleaved samples into `buffer`, filling it completely.
    ///
    /// Returns the number of samples rendered. Anything short of
    /// `buffer.len()` is treated by the caller as a fatal engine failure;
    /// engines must not paper over internal errors with silence.
    fn produce(&mut self, buffer: &mut [i16]) -> Result<usize>;

    /// Emulated position of the current track in milliseconds.
    fn position_ms(&self) -> u32;

    /// Set the fast-forward multiplier (1 = normal speed).
    fn set_fast_forward(&mut self, multiplier: u8) -> Result<()>;

    /// Mute or unmute one voice. Voice index 3 addresses the chip's digi
    /// sample channel.
    fn set_voice_mute(&mut self, chip: u8, voice: u8, mute: bool);

    /// Enable or disable filter emulation.
    ///
    /// Default does nothing; engines without a filter stage may ignore it.
    fn set_filter(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Stop emulation for the current track.
    fn stop(&mut self);

    /// Snapshot for display purposes.
    fn status(&self) -> EngineStatus {
        EngineStatus {
            position_ms: self.position_ms(),
            ..EngineStatus::default()
        }
    }
}
