//! The playback core: state machine, scheduler and cycle driver.
//!
//! One render cycle = schedule -> fill -> write -> poll input, executed
//! synchronously; the only blocking operations are the sink write (the
//! pacing mechanism) and the goto-track prompt. All state is owned here and
//! mutated between cycles only.

pub mod speed;
pub mod state;
pub mod timing;
pub mod track;

pub use speed::SpeedState;
pub use state::{PlaybackState, StateMachine};
pub use timing::{Cycle, TimingWindow};
pub use track::{BoundaryAction, TrackSequencer};

use crate::audio::{wav, AudioConfig, AudioError, OutputDriver, OutputKind};
use crate::control::{self, Command};
use crate::display;
use sidplay_common::{EngineConfig, EngineError, Playback, SidEngine, TuneInfo};
use sidplay_common::{FilterSettings, PlayerSettings};
use std::time::Duration;

/// Sleep per cycle while paused instead of spinning.
const PAUSE_POLL_MS: u64 = 100;

/// Error type for player operations
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// Engine backend failure
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Audio sink failure
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Invalid configuration detected before playback
    #[error("{0}")]
    Config(String),
}

/// Session options resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Output destination.
    pub output: OutputKind,
    /// Explicit recording file name (`None` derives one from the tune).
    pub wav_path: Option<String>,
    /// Subtune to start with; 0 uses the tune's default.
    pub start_track: u16,
    /// Start offset in milliseconds.
    pub start_ms: u32,
    /// Explicit play length, relative to the start offset; `Some(0)` forces
    /// unbounded play.
    pub length_ms: Option<u32>,
    /// Repeat the current track forever.
    pub loop_mode: bool,
    /// Play only the selected track.
    pub single: bool,
    /// 0 = full display, 1 = no time, 2 = no track gaps, 3+ = no keyboard.
    pub quiet: u8,
}

/// Per-voice and per-sample-channel mute bookkeeping.
///
/// Indexed by (chip, voice) over three chips of three voices each, plus one
/// digi sample channel per chip. Kept here so mutes survive track changes
/// and can be reapplied on every engine reload.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuteMap {
    voices: [[bool; 3]; 3],
    samples: [bool; 3],
}

impl MuteMap {
    /// Flip one voice; returns the new mute state.
    pub fn toggle_voice(&mut self, chip: u8, voice: u8) -> bool {
        let flag = &mut self.voices[usize::from(chip)][usize::from(voice)];
        *flag = !*flag;
        *flag
    }

    /// Flip one chip's sample channel; returns the new mute state.
    pub fn toggle_sample(&mut self, chip: u8) -> bool {
        let flag = &mut self.samples[usize::from(chip)];
        *flag = !*flag;
        *flag
    }

    /// Whether a voice is muted.
    pub fn voice_muted(&self, chip: u8, voice: u8) -> bool {
        self.voices[usize::from(chip)][usize::from(voice)]
    }

    /// Push the whole map to the engine.
    pub fn apply(&self, engine: &mut dyn SidEngine) {
        for chip in 0..3u8 {
            for voice in 0..3u8 {
                engine.set_voice_mute(chip, voice, self.voice_muted(chip, voice));
            }
            engine.set_voice_mute(chip, 3, self.samples[usize::from(chip)]);
        }
    }
}

/// The console player core.
///
/// Owns the engine, the output driver and all playback state; the outer
/// driver loop calls `open()`, then `run_cycle()` until it returns false,
/// then inspects `state()` to decide between reopen and teardown.
pub struct Player {
    engine: Box<dyn SidEngine>,
    driver: OutputDriver,
    driver_open: bool,
    machine: StateMachine,
    timing: TimingWindow,
    tracks: TrackSequencer,
    speed: SpeedState,
    mutes: MuteMap,
    settings: PlayerSettings,
    options: PlayOptions,
    filter_enabled: bool,
}

impl Player {
    /// Create a player around an engine backend.
    pub fn new(
        engine: Box<dyn SidEngine>,
        settings: PlayerSettings,
        options: PlayOptions,
    ) -> Result<Self, PlayerError> {
        // A null output pair exists from the start so there is always a sink
        // to discard into; the real output is created on open().
        let initial = AudioConfig {
            sample_rate: settings.sample_rate,
            bit_depth: settings.bit_depth,
            channels: if settings.channels == 0 { 1 } else { settings.channels },
            buf_frames: 0,
        };
        let driver = OutputDriver::open(OutputKind::Null, initial, None)?;

        let tracks = TrackSequencer::new(
            1,
            options.start_track,
            options.loop_mode,
            options.single,
        );
        let speed = SpeedState::new(settings.max_speed);
        let filter_enabled = settings.filter.enabled;

        Ok(Player {
            engine,
            driver,
            driver_open: false,
            machine: StateMachine::new(),
            timing: TimingWindow::default(),
            tracks,
            speed,
            mutes: MuteMap::default(),
            settings,
            options,
            filter_enabled,
        })
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    /// Active timing boundaries (read-only, for a display layer).
    pub fn timing(&self) -> &TimingWindow {
        &self.timing
    }

    /// Track selection state (read-only, for a display layer).
    pub fn tracks(&self) -> &TrackSequencer {
        &self.tracks
    }

    /// Fast-forward state (read-only, for a display layer).
    pub fn speed(&self) -> &SpeedState {
        &self.speed
    }

    /// Open the selected track and enter the Running state.
    ///
    /// On a Restart intent this either performs a fast track switch (sink
    /// kept, pre-roll skipped) or a cold reopen with the inter-track gap.
    pub fn open(&mut self) -> Result<(), PlayerError> {
        let fast = self.machine.state() == PlaybackState::Restart && self.machine.is_fast();
        if self.machine.state() == PlaybackState::Restart {
            if fast {
                self.driver.selected().reset();
            } else if self.options.quiet < 2 {
                eprintln!();
            }
            self.machine.begin_reopen();
        }

        // Select the required subtune and load it into the engine
        let selected = self.engine.select_track(self.tracks.selected())?;
        self.tracks.note_started(selected);
        let info = self.engine.tune_info();
        if !self.options.single {
            self.tracks.set_songs(info.songs);
        }

        // A fast restart reuses the open sinks; recording sessions always
        // reopen because every track records to its own file.
        let reuse = fast && self.driver_open && self.options.output != OutputKind::Wav;
        if !reuse {
            self.create_output(&info)?;
        }

        let config = *self.driver.config();
        let playback = match config.channels {
            1 => Playback::Mono,
            2 => Playback::Stereo,
            n => {
                return Err(PlayerError::Config(format!(
                    "{n} audio channels not supported"
                )))
            }
        };

        self.engine.configure(&EngineConfig {
            sample_rate: config.sample_rate,
            playback,
            filter: FilterSettings {
                enabled: self.filter_enabled,
                ..self.settings.filter.clone()
            },
            default_model: self.settings.default_model,
            force_model: self.settings.force_model,
            default_clock: self.settings.default_clock,
            force_clock: self.settings.force_clock,
        })?;

        let recording = self.options.output == OutputKind::Wav;
        let default_length = if recording {
            self.settings.default_record_length_ms
        } else {
            self.settings.default_play_length_ms
        };
        let window = TimingWindow::for_track(
            self.options.start_ms,
            self.options.length_ms,
            default_length,
            recording,
        )
        .map_err(PlayerError::Config)?;

        if reuse {
            // Fast track switch: keep the device selected, skip the pre-roll.
            self.timing = window.disarmed();
            self.driver.select_device();
        } else {
            // Start by rendering through the discard sink until the offset.
            self.timing = window;
            self.driver.select_null();
        }
        self.engine.set_fast_forward(self.speed.current())?;

        self.mutes.apply(self.engine.as_mut());
        self.engine.set_filter(self.filter_enabled);

        self.machine.start();
        Ok(())
    }

    fn create_output(&mut self, info: &TuneInfo) -> Result<(), PlayerError> {
        self.driver.close();
        self.driver_open = false;

        let tune_channels = if info.sid_chips > 1 { 2 } else { 1 };
        let config = AudioConfig {
            sample_rate: self.settings.sample_rate,
            bit_depth: self.settings.bit_depth,
            channels: if self.settings.channels != 0 {
                self.settings.channels
            } else {
                tune_channels
            },
            buf_frames: 0,
        };

        let wav_path = if self.options.output == OutputKind::Wav {
            Some(wav::wav_file_name(
                self.options.wav_path.as_deref(),
                info,
                self.tracks.selected(),
            ))
        } else {
            None
        };

        self.driver = OutputDriver::open(self.options.output, config, wav_path.as_deref())?;
        self.driver_open = true;
        Ok(())
    }

    /// Execute one cooperative cycle.
    ///
    /// Returns true while the loop should continue; false once a Restart,
    /// Exit or Error intent must be handled by the caller.
    pub fn run_cycle(&mut self) -> bool {
        match self.machine.state() {
            PlaybackState::Running => {
                let previous = self.timing.update(self.engine.position_ms());
                if self.options.quiet == 0 {
                    display::show_elapsed(previous, self.timing.current_ms());
                }

                let frames = loop {
                    match timing::next_cycle(&self.timing, self.driver.config()) {
                        Cycle::BeginAudible => {
                            // The start offset is reached: make output
                            // audible, drop pre-roll remnants, back to 1x.
                            self.driver.select_device();
                            self.driver.selected().reset();
                            self.timing.disarm();
                            self.speed.reset();
                            if let Err(err) = self.engine.set_fast_forward(1) {
                                eprintln!("sidplay-replayer: {err}");
                                self.machine.error();
                                break 0;
                            }
                        }
                        Cycle::TrackEnd => {
                            match self.tracks.resolve_boundary() {
                                BoundaryAction::Restart => self.machine.request_restart(false),
                                BoundaryAction::Exit => self.machine.request_exit(false),
                            }
                            break 0;
                        }
                        Cycle::Render(frames) => break frames,
                    }
                };

                if frames > 0 && !self.render_and_write(frames) {
                    return false;
                }
            }
            PlaybackState::Paused => {
                std::thread::sleep(Duration::from_millis(PAUSE_POLL_MS));
            }
            _ => {}
        }

        match self.machine.state() {
            PlaybackState::Running | PlaybackState::Paused => {
                // Poll rate follows the buffer size naturally. High quiet
                // levels skip polling; chances are we are under remote
                // control.
                if self.options.quiet < 3 {
                    for command in control::poll_commands() {
                        self.handle_command(command);
                    }
                }
                true
            }
            _ => {
                if self.options.quiet < 3 {
                    eprintln!();
                }
                self.engine.stop();
                false
            }
        }
    }

    fn render_and_write(&mut self, frames: u32) -> bool {
        let channels = usize::from(self.driver.config().channels);
        let wanted = frames as usize * channels;

        let sink = self.driver.selected();
        match self.engine.produce(&mut sink.buffer()[..wanted]) {
            Ok(produced) if produced == wanted => {}
            Ok(produced) => {
                let err = EngineError::ShortRead {
                    requested: wanted,
                    produced,
                };
                eprintln!("sidplay-replayer: {err}");
                self.machine.error();
                return false;
            }
            Err(err) => {
                eprintln!("sidplay-replayer: {err}");
                self.machine.error();
                return false;
            }
        }

        if let Err(err) = sink.write(frames) {
            eprintln!("sidplay-replayer: {err}");
            self.machine.error();
            return false;
        }
        true
    }

    /// External stop request (e.g. a signal): back to Stopped immediately.
    pub fn stop(&mut self) {
        self.machine.stop();
        self.engine.stop();
    }

    /// Tear the session down.
    pub fn close(&mut self) {
        self.engine.stop();
        if self.machine.state() == PlaybackState::Exit {
            if self.options.output == OutputKind::Wav && self.options.quiet < 2 {
                eprint!("\x07"); // ring the bell when the recording is done
            }
        } else {
            // Aborted session: destroy whatever is still queued
            self.driver.selected().reset();
        }
        self.driver.close();
        self.driver_open = false;
        self.machine.teardown();
        if self.options.quiet < 2 {
            eprintln!();
        }
    }

    /// Apply one live control command between cycles.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::NextTrack => {
                if !self.options.single {
                    self.tracks.next();
                }
                self.machine.request_restart(true);
            }
            Command::PrevTrack => {
                if !self.options.single {
                    self.tracks.previous();
                }
                self.machine.request_restart(true);
            }
            Command::FirstTrack => {
                self.tracks.select(1);
                self.machine.request_restart(true);
            }
            Command::LastTrack => {
                let last = self.tracks.songs();
                self.tracks.select(last);
                self.machine.request_restart(true);
            }
            Command::Replay => self.machine.request_restart(true),
            Command::Faster => {
                let multiplier = self.speed.double();
                self.push_speed(multiplier);
            }
            Command::Slower => {
                let multiplier = self.speed.halve();
                self.push_speed(multiplier);
            }
            Command::RestoreSpeed => {
                let multiplier = self.speed.reset();
                self.push_speed(multiplier);
            }
            Command::TogglePause => match self.machine.state() {
                PlaybackState::Paused => {
                    if self.options.quiet == 0 {
                        display::clear_pause_marker();
                    }
                    self.machine.resume();
                }
                PlaybackState::Running => {
                    if self.options.quiet == 0 {
                        display::show_pause_marker();
                    }
                    self.machine.pause();
                    self.driver.selected().pause();
                }
                _ => {}
            },
            Command::GotoTrack => {
                if self.options.single || self.tracks.songs() == 1 {
                    return;
                }
                let request = control::read_track_number();
                self.apply_goto(request);
            }
            Command::ToggleVoice(index) => {
                if index < 9 {
                    let (chip, voice) = (index / 3, index % 3);
                    let mute = self.mutes.toggle_voice(chip, voice);
                    self.engine.set_voice_mute(chip, voice, mute);
                }
            }
            Command::ToggleSampleChannel(chip) => {
                if chip < 3 {
                    let mute = self.mutes.toggle_sample(chip);
                    self.engine.set_voice_mute(chip, 3, mute);
                }
            }
            Command::ToggleFilter => {
                self.filter_enabled = !self.filter_enabled;
                self.engine.set_filter(self.filter_enabled);
            }
            Command::Quit => self.machine.request_exit(true),
        }
    }

    fn apply_goto(&mut self, request: Option<u16>) {
        match request {
            Some(track) if self.tracks.select(track) => {
                self.machine.request_restart(true);
            }
            Some(track) => {
                eprintln!("Subtune #{track} not found!");
                std::thread::sleep(Duration::from_secs(1));
            }
            None => {}
        }
    }

    fn push_speed(&mut self, multiplier: u8) {
        if let Err(err) = self.engine.set_fast_forward(multiplier) {
            eprintln!("sidplay-replayer: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidplay_common::{EngineStatus, Result as EngineResult, TuneInfo};

    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Engine double: advances position by the frames it renders, scaled by
    /// the fast-forward multiplier like a real emulation core.
    struct ScriptedEngine {
        songs: u16,
        track: u16,
        sample_rate: u32,
        channels: u8,
        frames_done: u64,
        fast_forward: u8,
        fail_produce: bool,
        short_produce: bool,
        mute_calls: Arc<Mutex<Vec<(u8, u8, bool)>>>,
    }

    impl ScriptedEngine {
        fn new(songs: u16) -> Self {
            ScriptedEngine {
                songs,
                track: 0,
                sample_rate: 48_000,
                channels: 1,
                frames_done: 0,
                fast_forward: 1,
                fail_produce: false,
                short_produce: false,
                mute_calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl SidEngine for ScriptedEngine {
        fn tune_info(&self) -> TuneInfo {
            TuneInfo {
                songs: self.songs,
                start_song: 1,
                sid_chips: 1,
                title: Some("scripted".into()),
                author: None,
            }
        }

        fn select_track(&mut self, track: u16) -> EngineResult<u16> {
            self.track = if track == 0 { 1 } else { track };
            self.frames_done = 0;
            Ok(self.track)
        }

        fn configure(&mut self, config: &EngineConfig) -> EngineResult<()> {
            self.sample_rate = config.sample_rate;
            self.channels = config.playback.channels();
            Ok(())
        }

        fn produce(&mut self, buffer: &mut [i16]) -> EngineResult<usize> {
            if self.fail_produce {
                return Err("emulation fault".into());
            }
            buffer.fill(0);
            let frames = buffer.len() / usize::from(self.channels);
            self.frames_done += frames as u64 * u64::from(self.fast_forward);
            if self.short_produce {
                return Ok(buffer.len() / 2);
            }
            Ok(buffer.len())
        }

        fn position_ms(&self) -> u32 {
            (self.frames_done * 1000 / u64::from(self.sample_rate)) as u32
        }

        fn set_fast_forward(&mut self, multiplier: u8) -> EngineResult<()> {
            self.fast_forward = multiplier;
            Ok(())
        }

        fn set_voice_mute(&mut self, chip: u8, voice: u8, mute: bool) {
            self.mute_calls.lock().push((chip, voice, mute));
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

    fn player(engine: ScriptedEngine, options: PlayOptions) -> Player {
        Player::new(Box::new(engine), PlayerSettings::default(), options).unwrap()
    }

    fn quiet_options() -> PlayOptions {
        PlayOptions {
            output: OutputKind::Null,
            length_ms: Some(300),
            quiet: 3,
            ..PlayOptions::default()
        }
    }

    /// Drive open/run_cycle like the outer loop does; returns the number of
    /// Restart intents seen before the loop ended.
    fn drive(player: &mut Player, max_cycles: usize) -> usize {
        let mut restarts = 0;
        let mut cycles = 0;
        loop {
            player.open().expect("open must succeed");
            while player.run_cycle() {
                cycles += 1;
                assert!(cycles < max_cycles, "player did not reach a boundary in time");
            }
            if player.state() == PlaybackState::Restart {
                restarts += 1;
                continue;
            }
            break;
        }
        restarts
    }

    #[test]
    fn three_track_sequence_exits_after_revisiting_start() {
        let mut player = player(ScriptedEngine::new(3), quiet_options());
        let restarts = drive(&mut player, 200);
        assert_eq!(restarts, 2, "tracks 2 and 3 each arrive via a Restart intent");
        assert_eq!(player.state(), PlaybackState::Exit);
        assert_eq!(player.tracks().selected(), 1);
        player.close();
        assert_eq!(player.state(), PlaybackState::Stopped);
    }

    #[test]
    fn loop_mode_restarts_the_same_track() {
        let options = PlayOptions {
            loop_mode: true,
            ..quiet_options()
        };
        let mut player = player(ScriptedEngine::new(3), options);
        player.open().unwrap();
        while player.run_cycle() {}
        assert_eq!(player.state(), PlaybackState::Restart);
        assert_eq!(player.tracks().selected(), 1);
    }

    #[test]
    fn single_mode_exits_without_advancing() {
        let options = PlayOptions {
            single: true,
            ..quiet_options()
        };
        let mut player = player(ScriptedEngine::new(3), options);
        let restarts = drive(&mut player, 200);
        assert_eq!(restarts, 0);
        assert_eq!(player.state(), PlaybackState::Exit);
        assert_eq!(player.tracks().selected(), 1);
    }

    #[test]
    fn preroll_swaps_to_the_device_exactly_once() {
        let options = PlayOptions {
            start_ms: 50,
            length_ms: Some(0),
            ..quiet_options()
        };
        let mut player = player(ScriptedEngine::new(1), options);
        player.open().unwrap();
        assert!(!player.driver.device_selected(), "pre-roll goes through the null sink");

        let mut swapped_at = None;
        for cycle in 0..10 {
            assert!(player.run_cycle());
            if player.driver.device_selected() && swapped_at.is_none() {
                swapped_at = Some(cycle);
            }
        }
        assert!(swapped_at.is_some(), "start offset must trigger the sink swap");
        assert!(!player.timing().armed(), "the boundary disarms after the swap");
        assert_eq!(player.speed().current(), 1);
    }

    #[test]
    fn external_stop_request_halts_the_loop() {
        let mut player = player(ScriptedEngine::new(1), quiet_options());
        player.open().unwrap();
        assert!(player.run_cycle());
        player.stop();
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(!player.run_cycle(), "a stopped player must leave the loop");
    }

    #[test]
    fn engine_failure_is_terminal() {
        let mut engine = ScriptedEngine::new(1);
        engine.fail_produce = true;
        let mut player = player(engine, quiet_options());
        player.open().unwrap();
        assert!(!player.run_cycle(), "a failed cycle must stop the loop");
        assert_eq!(player.state(), PlaybackState::Error);
    }

    #[test]
    fn short_read_is_terminal() {
        let mut engine = ScriptedEngine::new(1);
        engine.short_produce = true;
        let mut player = player(engine, quiet_options());
        player.open().unwrap();
        assert!(!player.run_cycle());
        assert_eq!(player.state(), PlaybackState::Error);
    }

    #[test]
    fn quit_command_requests_a_fast_exit() {
        let mut player = player(ScriptedEngine::new(3), quiet_options());
        player.open().unwrap();
        player.handle_command(Command::Quit);
        assert_eq!(player.state(), PlaybackState::Exit);
        assert!(player.machine.is_fast());
    }

    #[test]
    fn seek_commands_wrap_and_request_fast_restart() {
        let mut player = player(ScriptedEngine::new(3), quiet_options());
        player.open().unwrap();
        player.handle_command(Command::PrevTrack);
        assert_eq!(player.tracks().selected(), 3, "previous from track 1 wraps to the last");
        assert_eq!(player.state(), PlaybackState::Restart);
        assert!(player.machine.is_fast());
    }

    #[test]
    fn goto_out_of_range_keeps_state_and_selection() {
        let mut player = player(ScriptedEngine::new(3), quiet_options());
        player.open().unwrap();
        player.apply_goto(Some(7));
        assert_eq!(player.state(), PlaybackState::Running, "invalid goto must not transition");
        assert_eq!(player.tracks().selected(), 1);

        player.apply_goto(Some(2));
        assert_eq!(player.state(), PlaybackState::Restart);
        assert_eq!(player.tracks().selected(), 2);
    }

    #[test]
    fn speed_commands_reach_the_engine_clamped() {
        let mut player = player(ScriptedEngine::new(1), quiet_options());
        player.open().unwrap();
        for _ in 0..8 {
            player.handle_command(Command::Faster);
        }
        assert_eq!(player.speed().current(), 32);
        player.handle_command(Command::RestoreSpeed);
        assert_eq!(player.speed().current(), 1);
    }

    #[test]
    fn pause_and_resume_round_trip() {
        let mut player = player(ScriptedEngine::new(1), quiet_options());
        player.open().unwrap();
        player.handle_command(Command::TogglePause);
        assert_eq!(player.state(), PlaybackState::Paused);
        player.handle_command(Command::TogglePause);
        assert_eq!(player.state(), PlaybackState::Running);
    }

    #[test]
    fn voice_mutes_are_reapplied_on_reopen() {
        let engine = ScriptedEngine::new(2);
        let mute_log = Arc::clone(&engine.mute_calls);
        let mut player = player(engine, quiet_options());
        player.open().unwrap();
        player.handle_command(Command::ToggleVoice(4)); // chip 1, voice 1
        player.handle_command(Command::NextTrack);
        assert_eq!(player.state(), PlaybackState::Restart);
        player.open().unwrap();

        assert!(player.mutes.voice_muted(1, 1));
        let applied = mute_log
            .lock()
            .iter()
            .filter(|call| **call == (1, 1, true))
            .count();
        assert!(
            applied >= 2,
            "the reopen must push the surviving mute to the engine again"
        );
    }

    #[test]
    fn recording_with_unbounded_stop_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.wav");
        let options = PlayOptions {
            output: OutputKind::Wav,
            wav_path: Some(path.to_string_lossy().into_owned()),
            length_ms: Some(0),
            quiet: 3,
            ..PlayOptions::default()
        };
        let mut player = player(ScriptedEngine::new(1), options);
        let err = player.open().expect_err("unbounded recording must be rejected");
        assert!(matches!(err, PlayerError::Config(_)));
        assert_eq!(player.state(), PlaybackState::Stopped);
    }
}
