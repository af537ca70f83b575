//! Engine backend selection.
//!
//! The workspace ships a single built-in backend: a three-voice test-tone
//! source that exercises every part of the playback surface (subtunes,
//! fast-forward, per-voice mutes) without any chip emulation. Real SID
//! engines plug in by implementing [`SidEngine`] and being returned from
//! [`create_engine`].

use sidplay_common::{
    EngineConfig, EngineError, EngineStatus, PlayerSettings, Result, SidEngine, TuneInfo,
};

/// Output level per voice; three voices stay clear of clipping.
const VOICE_AMPLITUDE: i32 = 6000;

/// Voice frequencies (Hz) per subtune: three chords over a low A.
const SUBTUNE_CHORDS: [[f32; 3]; 3] = [
    [220.0, 277.2, 329.6],
    [196.0, 246.9, 293.7],
    [174.6, 220.0, 261.6],
];

/// Create the engine backend for this session.
pub fn create_engine(settings: &PlayerSettings) -> Box<dyn SidEngine> {
    Box::new(TestToneEngine::new(settings.sample_rate))
}

/// Built-in square-wave source standing in for a SID emulation.
pub struct TestToneEngine {
    sample_rate: u32,
    channels: u8,
    track: u16,
    frames_done: u64,
    fast_forward: u8,
    muted: [[bool; 4]; 3],
    filter: bool,
    phases: [f32; 3],
}

impl TestToneEngine {
    /// Create the tone source at the given rate; reconfigured on open.
    pub fn new(sample_rate: u32) -> Self {
        TestToneEngine {
            sample_rate: sample_rate.max(1),
            channels: 1,
            track: 0,
            frames_done: 0,
            fast_forward: 1,
            muted: [[false; 4]; 3],
            filter: true,
            phases: [0.0; 3],
        }
    }

    fn render_frame(&mut self) -> i16 {
        let chord = &SUBTUNE_CHORDS[usize::from(self.track.saturating_sub(1)) % 3];
        let step = f32::from(self.fast_forward);
        let mut mixed = 0i32;
        for (voice, freq) in chord.iter().enumerate() {
            let phase = &mut self.phases[voice];
            *phase = (*phase + freq * step / self.sample_rate as f32).fract();
            if self.muted[0][voice] {
                continue;
            }
            let level = if *phase < 0.5 {
                VOICE_AMPLITUDE
            } else {
                -VOICE_AMPLITUDE
            };
            mixed += level;
        }
        mixed.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    }
}

impl SidEngine for TestToneEngine {
    fn tune_info(&self) -> TuneInfo {
        TuneInfo {
            songs: SUBTUNE_CHORDS.len() as u16,
            start_song: 1,
            sid_chips: 1,
            title: Some("Built-in test tone".to_string()),
            author: None,
        }
    }

    fn select_track(&mut self, track: u16) -> Result<u16> {
        let songs = SUBTUNE_CHORDS.len() as u16;
        let selected = if track == 0 { 1 } else { track };
        if selected > songs {
            return Err(EngineError::TrackOutOfRange(selected));
        }
        self.track = selected;
        self.frames_done = 0;
        self.phases = [0.0; 3];
        Ok(selected)
    }

    fn configure(&mut self, config: &EngineConfig) -> Result<()> {
        if config.sample_rate == 0 {
            return Err(EngineError::Config("sample rate must be non-zero".into()));
        }
        self.sample_rate = config.sample_rate;
        self.channels = config.playback.channels();
        self.filter = config.filter.enabled;
        Ok(())
    }

    fn produce(&mut self, buffer: &mut [i16]) -> Result<usize> {
        let channels = usize::from(self.channels);
        for frame in buffer.chunks_mut(channels) {
            let sample = self.render_frame();
            frame.fill(sample);
            self.frames_done += u64::from(self.fast_forward);
        }
        Ok(buffer.len())
    }

    fn position_ms(&self) -> u32 {
        (self.frames_done * 1000 / u64::from(self.sample_rate)) as u32
    }

    fn set_fast_forward(&mut self, multiplier: u8) -> Result<()> {
        if multiplier == 0 {
            return Err(EngineError::Config("fast-forward multiplier must be >= 1".into()));
        }
        self.fast_forward = multiplier;
        Ok(())
    }

    fn set_voice_mute(&mut self, chip: u8, voice: u8, mute: bool) {
        if chip < 3 && voice < 4 {
            self.muted[usize::from(chip)][usize::from(voice)] = mute;
        }
    }

    fn set_filter(&mut self, enabled: bool) {
        self.filter = enabled;
    }

    fn stop(&mut self) {}

    fn status(&self) -> EngineStatus {
        EngineStatus {
            position_ms: self.position_ms(),
            track: self.track,
            fast_forward: self.fast_forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidplay_common::{ClockModel, FilterSettings, Playback, SidModel};

    fn config(sample_rate: u32, playback: Playback) -> EngineConfig {
        EngineConfig {
            sample_rate,
            playback,
            filter: FilterSettings::default(),
            default_model: SidModel::default(),
            force_model: false,
            default_clock: ClockModel::default(),
            force_clock: false,
        }
    }

    #[test]
    fn position_tracks_rendered_frames() {
        let mut engine = TestToneEngine::new(48_000);
        engine.select_track(1).unwrap();
        engine.configure(&config(48_000, Playback::Mono)).unwrap();

        let mut buffer = vec![0i16; 4800];
        assert_eq!(engine.produce(&mut buffer).unwrap(), 4800);
        assert_eq!(engine.position_ms(), 100);
    }

    #[test]
    fn fast_forward_advances_position_faster() {
        let mut engine = TestToneEngine::new(48_000);
        engine.select_track(1).unwrap();
        engine.configure(&config(48_000, Playback::Mono)).unwrap();
        engine.set_fast_forward(4).unwrap();

        let mut buffer = vec![0i16; 4800];
        engine.produce(&mut buffer).unwrap();
        assert_eq!(engine.position_ms(), 400, "4x speed covers 4x the emulated time");
    }

    #[test]
    fn stereo_frames_duplicate_the_sample() {
        let mut engine = TestToneEngine::new(48_000);
        engine.select_track(1).unwrap();
        engine.configure(&config(48_000, Playback::Stereo)).unwrap();

        let mut buffer = vec![0i16; 64];
        engine.produce(&mut buffer).unwrap();
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn muting_all_voices_silences_the_output() {
        let mut engine = TestToneEngine::new(48_000);
        engine.select_track(1).unwrap();
        engine.configure(&config(48_000, Playback::Mono)).unwrap();
        for voice in 0..3 {
            engine.set_voice_mute(0, voice, true);
        }

        let mut buffer = vec![1i16; 256];
        engine.produce(&mut buffer).unwrap();
        assert!(buffer.iter().all(|&s| s == 0));
    }

    #[test]
    fn track_selection_validates_range() {
        let mut engine = TestToneEngine::new(48_000);
        assert_eq!(engine.select_track(0).unwrap(), 1, "0 picks the default subtune");
        assert_eq!(engine.select_track(3).unwrap(), 3);
        assert!(engine.select_track(4).is_err());
    }
}
