//! Null audio sink
//!
//! Always opens, discards every write. Serves as the pre-roll discard target
//! before the start offset is reached, as the mandatory last link of the
//! device fallback chain, and as the output for length probing.

use super::{AudioConfig, AudioError, AudioSink, Result, DEFAULT_BUF_FRAMES};

/// Audio sink that accepts and discards everything.
#[derive(Debug, Default)]
pub struct NullSink {
    is_open: bool,
    buffer: Vec<i16>,
}

impl NullSink {
    /// Create a closed null sink.
    pub fn new() -> Self {
        NullSink::default()
    }
}

impl AudioSink for NullSink {
    fn open(&mut self, config: &mut AudioConfig) -> Result<()> {
        if config.buf_frames == 0 {
            config.buf_frames = DEFAULT_BUF_FRAMES;
        }
        self.buffer = vec![0; config.samples_per_buffer()];
        self.is_open = true;
        Ok(())
    }

    fn buffer(&mut self) -> &mut [i16] {
        &mut self.buffer
    }

    fn write(&mut self, _frames: u32) -> Result<()> {
        if !self.is_open {
            return Err(AudioError::NotOpen);
        }
        Ok(())
    }

    fn reset(&mut self) {}

    fn pause(&mut self) {}

    fn close(&mut self) {
        self.is_open = false;
        self.buffer = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_always_succeeds_and_negotiates() {
        let mut sink = NullSink::new();
        let mut config = AudioConfig::default();
        sink.open(&mut config).expect("null sink must always open");
        assert_eq!(config.buf_frames, DEFAULT_BUF_FRAMES);
        assert_eq!(sink.buffer().len(), config.samples_per_buffer());
    }

    #[test]
    fn keeps_caller_buffer_size() {
        let mut sink = NullSink::new();
        let mut config = AudioConfig {
            buf_frames: 1234,
            ..AudioConfig::default()
        };
        sink.open(&mut config).unwrap();
        assert_eq!(config.buf_frames, 1234, "negotiated sizes must be preserved");
    }

    #[test]
    fn write_requires_open() {
        let mut sink = NullSink::new();
        assert!(sink.write(16).is_err());

        let mut config = AudioConfig::default();
        sink.open(&mut config).unwrap();
        assert!(sink.write(16).is_ok());

        sink.close();
        assert!(sink.write(16).is_err());
        // Closing twice is a no-op, never an error
        sink.close();
    }
}
