//! Command-line argument parsing for the SID replayer CLI.
//!
//! Handles parsing and validation of:
//! - Subtune selection and loop/single mode
//! - Timing options (start offset, play length)
//! - Output selection (soundcard, WAV recording, null)
//! - Quiet levels and help text

use crate::audio::OutputKind;
use crate::player::PlayOptions;
use std::env;

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Subtune to start with (0 = tune default)
    pub track: u16,
    /// Start offset in milliseconds
    pub start_ms: u32,
    /// Explicit play length; `Some(0)` forces unbounded play
    pub length_ms: Option<u32>,
    /// Record to a WAV file instead of playing
    pub wav: bool,
    /// Explicit output file name for the recording
    pub output_name: Option<String>,
    /// Discard all audio (length probing)
    pub null_output: bool,
    /// Repeat the selected track forever
    pub loop_mode: bool,
    /// Play only the selected track
    pub single: bool,
    /// Requested sample rate override
    pub sample_rate: Option<u32>,
    /// Requested channel count override (1 or 2)
    pub channels: Option<u8>,
    /// Quiet level (each -q raises it)
    pub quiet: u8,
    /// Whether help was requested
    pub show_help: bool,
    /// Whether parsing hit an error
    pub parse_error: bool,
}

impl CliArgs {
    /// Parse arguments from the command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments from an iterator (testable entry point).
    pub fn parse_from<I: Iterator<Item = String>>(mut iter: I) -> Self {
        let mut args = Self::default();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    args.show_help = true;
                }
                "--track" | "-t" => match iter.next().and_then(|v| v.parse().ok()) {
                    Some(track) => args.track = track,
                    None => args.fail("--track requires a subtune number"),
                },
                "--begin" | "-b" => match iter.next().as_deref().and_then(parse_time_ms) {
                    Some(ms) => args.start_ms = ms,
                    None => args.fail("--begin requires a time ([mm:]ss)"),
                },
                "--length" | "-l" => match iter.next().as_deref().and_then(parse_time_ms) {
                    Some(ms) => args.length_ms = Some(ms),
                    None => args.fail("--length requires a time ([mm:]ss, 0 = unbounded)"),
                },
                "--wav" | "-w" => {
                    args.wav = true;
                }
                _ if arg.starts_with("--wav=") => {
                    args.wav = true;
                    args.output_name = Some(arg["--wav=".len()..].to_string());
                }
                "--output" | "-o" => match iter.next() {
                    Some(name) => args.output_name = Some(name),
                    None => args.fail("--output requires a file name"),
                },
                "--null" => {
                    args.null_output = true;
                }
                "--loop" => {
                    args.loop_mode = true;
                }
                "--single" | "-s" => {
                    args.single = true;
                }
                "--rate" | "-f" => match iter.next().and_then(|v| v.parse().ok()) {
                    Some(rate) if rate > 0 => args.sample_rate = Some(rate),
                    _ => args.fail("--rate requires a sample rate in Hz"),
                },
                "--mono" => {
                    args.channels = Some(1);
                }
                "--stereo" => {
                    args.channels = Some(2);
                }
                "--quiet" | "-q" => {
                    args.quiet = args.quiet.saturating_add(1);
                }
                _ if arg.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    args.fail("");
                }
                _ => {
                    eprintln!(
                        "Unexpected argument: {} (tunes are loaded by the engine backend)",
                        arg
                    );
                    args.fail("");
                }
            }
        }

        args
    }

    fn fail(&mut self, message: &str) {
        if !message.is_empty() {
            eprintln!("{}", message);
        }
        self.show_help = true;
        self.parse_error = true;
    }

    /// Translate to the player's session options.
    pub fn to_options(&self) -> PlayOptions {
        let output = if self.wav {
            OutputKind::Wav
        } else if self.null_output {
            OutputKind::Null
        } else {
            OutputKind::Soundcard
        };

        PlayOptions {
            output,
            wav_path: self.output_name.clone(),
            start_track: self.track,
            start_ms: self.start_ms,
            length_ms: self.length_ms,
            loop_mode: self.loop_mode,
            single: self.single,
            quiet: self.quiet,
        }
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  sidplay-replayer [options]\n\n\
             Options:\n\
             \x20 -t, --track <n>      Start with subtune n (default: the tune's own)\n\
             \x20 -b, --begin <time>   Start offset as [mm:]ss\n\
             \x20 -l, --length <time>  Play length as [mm:]ss (0 = play until stopped)\n\
             \x20 -w, --wav[=name]     Record to a WAV file instead of playing\n\
             \x20 -o, --output <name>  Recording file name\n\
             \x20     --null           Discard audio (length probing)\n\
             \x20     --loop           Repeat the selected subtune\n\
             \x20 -s, --single         Play only the selected subtune\n\
             \x20 -f, --rate <hz>      Output sample rate (default 48000)\n\
             \x20     --mono           Force single-channel output\n\
             \x20     --stereo         Force two-channel output\n\
             \x20 -q, --quiet          Less output (repeat for less still)\n\
             \x20 -h, --help           Show this help\n\n\
             Keys:\n\
             \x20 left/right  previous/next subtune      home/end  first/last subtune\n\
             \x20 up/down     speed up/down              bksp      normal speed\n\
             \x20 p, space    pause/resume               r         replay subtune\n\
             \x20 g           go to subtune              f         toggle filter\n\
             \x20 1-9         toggle voice               x/c/v     toggle sample channel\n\
             \x20 q, esc      quit\n"
        );
    }
}

/// Parse a `[mm:]ss` or plain-seconds time into milliseconds.
pub fn parse_time_ms(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Some((minutes, seconds)) = value.split_once(':') {
        let minutes: u32 = minutes.parse().ok()?;
        let seconds: u32 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        Some((minutes * 60 + seconds) * 1000)
    } else {
        value.parse::<u32>().ok().map(|seconds| seconds * 1000)
    }
}
