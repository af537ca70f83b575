//! Audio sink abstraction and output driver selection.
//!
//! Everything the player writes audio to implements [`AudioSink`]: the
//! hardware device (rodio over a sample ring buffer), a WAV file, or the
//! null sink that discards its input. The [`OutputDriver`] pairs the chosen
//! sink with an always-open null sink so pre-roll audio can be discarded
//! before the start offset is reached.

// Allow unused methods - these are part of a complete sink API
#![allow(dead_code)]

pub mod device;
pub mod null;
pub mod ring_buffer;
pub mod wav;

pub use device::DeviceSink;
pub use null::NullSink;
pub use ring_buffer::RingBuffer;
pub use wav::WavSink;

/// Default sample rate (48 kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Buffer size in frames used by sinks that don't negotiate their own
pub const DEFAULT_BUF_FRAMES: u32 = 4096;

/// Error type for audio sink operations
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// Device-level failure (open, negotiation or write)
    #[error("audio device error: {0}")]
    Device(String),

    /// Operation on a sink that is not open
    #[error("audio sink is not open")]
    NotOpen,

    /// Sink cannot handle the requested format
    #[error("unsupported audio format: {0}")]
    Format(String),

    /// File sink failure
    #[error("file sink error: {0}")]
    File(String),

    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Requested-then-negotiated audio parameters.
///
/// A sink's `open()` may adjust these in place; all subsequent timing math
/// must use the values left behind by the sink, not the requested ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bit depth of a single sample
    pub bit_depth: u8,
    /// Interleaved channel count
    pub channels: u8,
    /// Frames per render cycle; 0 asks the sink to pick
    pub buf_frames: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: 16,
            channels: 1,
            buf_frames: 0,
        }
    }
}

impl AudioConfig {
    /// Interleaved samples in one full buffer.
    pub fn samples_per_buffer(&self) -> usize {
        self.buf_frames as usize * self.channels as usize
    }

    /// Frames needed to cover `ms` milliseconds at the negotiated rate.
    pub fn frames_for_ms(&self, ms: u32) -> u64 {
        u64::from(ms) * u64::from(self.sample_rate) / 1000
    }

    /// Duration of one full buffer in milliseconds.
    pub fn buffer_ms(&self) -> u32 {
        if self.sample_rate == 0 {
            return 0;
        }
        (u64::from(self.buf_frames) * 1000 / u64::from(self.sample_rate)) as u32
    }
}

/// Destination for rendered audio frames.
///
/// The sink owns the interleaved frame buffer the engine renders into;
/// `write()` consumes exactly the given number of frames from the front of
/// that buffer. `close()` is idempotent.
pub trait AudioSink {
    /// Open the sink, negotiating (and possibly adjusting) `config`.
    fn open(&mut self, config: &mut AudioConfig) -> Result<()>;

    /// The sink-owned interleaved sample buffer to render into.
    fn buffer(&mut self) -> &mut [i16];

    /// Consume `frames` frames from the front of the buffer.
    ///
    /// May block until the underlying destination accepts the data; for the
    /// hardware sink this is the natural pacing of real-time playback.
    fn write(&mut self, frames: u32) -> Result<()>;

    /// Discard any queued audio (used when skipping or restarting).
    fn reset(&mut self);

    /// Best-effort pause; sinks without native support may no-op.
    fn pause(&mut self);

    /// Release resources. Closing an already-closed sink is a no-op.
    fn close(&mut self);
}

/// Output destination selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// Discard all audio (length probing, tests).
    Null,
    /// System audio device via the fallback chain.
    #[default]
    Soundcard,
    /// WAV file recording.
    Wav,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    Null,
    Device,
}

/// The opened output pair: the device sink plus the always-open null sink.
///
/// Exactly one of the two is selected at a time. The null sink doubles as the
/// pre-roll discard target and as the mandatory fallback when no hardware
/// device can be opened.
pub struct OutputDriver {
    device: Box<dyn AudioSink>,
    null: NullSink,
    selected: Selected,
    config: AudioConfig,
    device_is_null: bool,
}

impl OutputDriver {
    /// Open the requested output, falling back to the null sink when no
    /// hardware device is available.
    ///
    /// `wav_path` must be given when `kind` is [`OutputKind::Wav`]. The
    /// negotiated configuration is readable via [`OutputDriver::config`]
    /// afterwards; the companion null sink is opened with the same negotiated
    /// values so its buffer matches the device's.
    pub fn open(
        kind: OutputKind,
        mut config: AudioConfig,
        wav_path: Option<&std::path::Path>,
    ) -> Result<Self> {
        let mut device_is_null = kind == OutputKind::Null;
        let mut device: Box<dyn AudioSink> = match kind {
            OutputKind::Null => Box::new(NullSink::new()),
            OutputKind::Soundcard => Box::new(DeviceSink::new()),
            OutputKind::Wav => {
                let path = wav_path.ok_or_else(|| {
                    AudioError::File("no output path for WAV recording".into())
                })?;
                Box::new(WavSink::new(path))
            }
        };

        match device.open(&mut config) {
            Ok(()) => {}
            Err(err) if kind == OutputKind::Soundcard => {
                // Mandatory last link of the fallback chain. Whether silent
                // playback is acceptable is the caller's call; we only keep
                // startup alive.
                eprintln!("sidplay-replayer: audio device unavailable ({err}); using null output");
                device = Box::new(NullSink::new());
                device.open(&mut config)?;
                device_is_null = true;
            }
            Err(err) => return Err(err),
        }

        let mut null = NullSink::new();
        null.open(&mut config)?;

        Ok(OutputDriver {
            device,
            null,
            selected: Selected::Null,
            config,
            device_is_null,
        })
    }

    /// The negotiated configuration all timing math must use.
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Whether the device slot ended up on the null fallback.
    pub fn device_is_null(&self) -> bool {
        self.device_is_null
    }

    /// Route audio to the null sink (pre-roll discard).
    pub fn select_null(&mut self) {
        self.selected = Selected::Null;
    }

    /// Route audio to the device sink.
    pub fn select_device(&mut self) {
        self.selected = Selected::Device;
    }

    /// Whether the device sink is the selected destination.
    pub fn device_selected(&self) -> bool {
        self.selected == Selected::Device
    }

    /// The currently selected sink.
    pub fn selected(&mut self) -> &mut dyn AudioSink {
        match self.selected {
            Selected::Null => &mut self.null,
            Selected::Device => self.device.as_mut(),
        }
    }

    /// Close both sinks and fall back to the null selection.
    pub fn close(&mut self) {
        self.device.close();
        self.null.close();
        self.selected = Selected::Null;
    }
}
