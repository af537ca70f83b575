//! WAV file sink
//!
//! Records rendered frames to a 16-bit integer WAV file via hound. The file
//! is finalized (header patched with the real length) on close.

use super::{AudioConfig, AudioError, AudioSink, Result, DEFAULT_BUF_FRAMES};
use sidplay_common::TuneInfo;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Audio sink writing frames to a WAV file.
pub struct WavSink {
    path: PathBuf,
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    buffer: Vec<i16>,
    channels: u8,
}

impl WavSink {
    /// Create a closed WAV sink targeting `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        WavSink {
            path: path.as_ref().to_path_buf(),
            writer: None,
            buffer: Vec::new(),
            channels: 1,
        }
    }

    /// Target path of the recording.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioSink for WavSink {
    fn open(&mut self, config: &mut AudioConfig) -> Result<()> {
        if self.writer.is_some() {
            return Err(AudioError::File(format!(
                "{} is already being written",
                self.path.display()
            )));
        }

        config.bit_depth = 16;
        if config.buf_frames == 0 {
            config.buf_frames = DEFAULT_BUF_FRAMES;
        }

        let spec = hound::WavSpec {
            channels: u16::from(config.channels),
            sample_rate: config.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(&self.path, spec).map_err(|err| {
            AudioError::File(format!("cannot create {}: {err}", self.path.display()))
        })?;

        self.buffer = vec![0; config.samples_per_buffer()];
        self.channels = config.channels;
        self.writer = Some(writer);
        Ok(())
    }

    fn buffer(&mut self) -> &mut [i16] {
        &mut self.buffer
    }

    fn write(&mut self, frames: u32) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(AudioError::NotOpen)?;
        let wanted = frames as usize * usize::from(self.channels);
        for &sample in &self.buffer[..wanted] {
            writer.write_sample(sample).map_err(|err| {
                AudioError::File(format!("write to {} failed: {err}", self.path.display()))
            })?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        // Nothing queued to discard; samples go straight to the file.
    }

    fn pause(&mut self) {}

    fn close(&mut self) {
        if let Some(writer) = self.writer.take() {
            if let Err(err) = writer.finalize() {
                eprintln!(
                    "sidplay-replayer: failed to finalize {}: {err}",
                    self.path.display()
                );
            }
        }
        self.buffer = Vec::new();
    }
}

/// Derive the recording file name.
///
/// An explicit output name is used as given, with the extension appended when
/// it has none. Otherwise the name comes from the tune title, suffixed with
/// the subtune number when the tune has more than one.
pub fn wav_file_name(outfile: Option<&str>, info: &TuneInfo, track: u16) -> PathBuf {
    if let Some(name) = outfile {
        let mut title = name.to_string();
        if !title.contains('.') {
            title.push_str(".wav");
        }
        return PathBuf::from(title);
    }

    let mut title = info
        .title
        .clone()
        .unwrap_or_else(|| "tune".to_string())
        .replace(['/', '\\'], "_");
    if info.songs > 1 {
        title.push_str(&format!("[{track}]"));
    }
    title.push_str(".wav");
    PathBuf::from(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tune(title: Option<&str>, songs: u16) -> TuneInfo {
        TuneInfo {
            songs,
            start_song: 1,
            sid_chips: 1,
            title: title.map(str::to_string),
            author: None,
        }
    }

    #[test]
    fn records_written_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let mut sink = WavSink::new(&path);
        let mut config = AudioConfig {
            sample_rate: 8000,
            bit_depth: 16,
            channels: 2,
            buf_frames: 0,
        };
        sink.open(&mut config).unwrap();
        assert_eq!(config.buf_frames, DEFAULT_BUF_FRAMES);

        let buffer = sink.buffer();
        buffer[0] = 11;
        buffer[1] = -11;
        buffer[2] = 22;
        buffer[3] = -22;
        sink.write(2).unwrap();
        sink.close();
        sink.close(); // idempotent

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![11, -11, 22, -22]);
    }

    #[test]
    fn write_requires_open() {
        let mut sink = WavSink::new("nope.wav");
        assert!(matches!(sink.write(1), Err(AudioError::NotOpen)));
    }

    #[test]
    fn explicit_name_gets_extension_when_missing() {
        let info = tune(Some("Ode"), 1);
        assert_eq!(
            wav_file_name(Some("take1"), &info, 1),
            PathBuf::from("take1.wav")
        );
        assert_eq!(
            wav_file_name(Some("take1.wave"), &info, 1),
            PathBuf::from("take1.wave")
        );
    }

    #[test]
    fn derived_name_tags_subtune_only_for_multi_song_tunes() {
        assert_eq!(
            wav_file_name(None, &tune(Some("Commando"), 3), 2),
            PathBuf::from("Commando[2].wav")
        );
        assert_eq!(
            wav_file_name(None, &tune(Some("Commando"), 1), 1),
            PathBuf::from("Commando.wav")
        );
        assert_eq!(
            wav_file_name(None, &tune(None, 1), 1),
            PathBuf::from("tune.wav")
        );
    }
}
