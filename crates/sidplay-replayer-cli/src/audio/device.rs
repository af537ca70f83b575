//! Hardware audio sink backed by rodio
//!
//! Opening probes the available backend hosts in the platform's priority
//! order and takes the first output device that yields a working stream. The
//! sink feeds the device through a sample ring buffer; the producer-side
//! write blocks with a micro-backoff while the device drains, which is the
//! pacing mechanism of the whole render loop.

use super::ring_buffer::RingBuffer;
use super::{AudioConfig, AudioError, AudioSink, Result};
use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::{cpal, OutputStream, Sink, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Backoff between write retries while the device drains
const BUFFER_BACKOFF_MICROS: u64 = 100;

/// Retries before a stalled device is reported as a write error (~2s)
const WRITE_MAX_RETRIES: u32 = 20_000;

/// Audio source draining the ring buffer into the device stream.
struct RingSource {
    ring: Arc<RingBuffer>,
    chunk: Vec<i16>,
    valid: usize,
    pos: usize,
    sample_rate: u32,
    channels: u16,
    finished: Arc<AtomicBool>,
}

impl RingSource {
    fn new(
        ring: Arc<RingBuffer>,
        sample_rate: u32,
        channels: u16,
        finished: Arc<AtomicBool>,
    ) -> Self {
        RingSource {
            ring,
            chunk: vec![0; 1024],
            valid: 0,
            pos: 0,
            sample_rate,
            channels,
            finished,
        }
    }
}

impl Iterator for RingSource {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.finished.load(Ordering::Relaxed) {
            return None;
        }

        if self.pos >= self.valid {
            let read = self.ring.read(&mut self.chunk);
            if read > 0 {
                self.valid = read;
            } else {
                // Underrun: keep the stream alive with silence
                self.chunk.fill(0);
                self.valid = self.chunk.len();
            }
            self.pos = 0;
        }

        let sample = self.chunk[self.pos];
        self.pos += 1;
        Some(sample)
    }
}

impl Source for RingSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

struct OpenStream {
    // Dropping the stream tears the device connection down
    _stream: OutputStream,
    sink: Sink,
    ring: Arc<RingBuffer>,
    finished: Arc<AtomicBool>,
    label: String,
}

/// Hardware device sink selected by ordered backend probing.
#[derive(Default)]
pub struct DeviceSink {
    stream: Option<OpenStream>,
    frame_buf: Vec<i16>,
    channels: u8,
    paused: bool,
}

impl DeviceSink {
    /// Create a closed device sink.
    pub fn new() -> Self {
        DeviceSink::default()
    }

    /// Human-readable name of the opened host/device pair.
    pub fn label(&self) -> Option<&str> {
        self.stream.as_ref().map(|s| s.label.as_str())
    }

    /// Probe backend hosts in platform order and open the first usable
    /// output device. The default device of each host is tried first.
    fn open_stream() -> Result<(OutputStream, rodio::OutputStreamHandle, String)> {
        let mut last_error: Option<String> = None;

        for host_id in cpal::available_hosts() {
            let host = match cpal::host_from_id(host_id) {
                Ok(host) => host,
                Err(err) => {
                    last_error = Some(format!("{}: {err}", host_id.name()));
                    continue;
                }
            };

            let mut candidates: Vec<cpal::Device> = Vec::new();
            if let Some(default) = host.default_output_device() {
                candidates.push(default);
            }
            if let Ok(outputs) = host.output_devices() {
                candidates.extend(outputs);
            }

            for device in candidates {
                let name = device
                    .name()
                    .unwrap_or_else(|_| "unnamed output".to_string());
                match OutputStream::try_from_device(&device) {
                    Ok((stream, handle)) => {
                        return Ok((stream, handle, format!("{}/{name}", host_id.name())));
                    }
                    Err(err) => {
                        last_error = Some(format!("{}/{name}: {err}", host_id.name()));
                    }
                }
            }
        }

        Err(AudioError::Device(last_error.unwrap_or_else(|| {
            "no audio output devices detected".to_string()
        })))
    }
}

impl AudioSink for DeviceSink {
    fn open(&mut self, config: &mut AudioConfig) -> Result<()> {
        if self.stream.is_some() {
            return Err(AudioError::Device("device already in use".into()));
        }

        // The device pipeline is 16-bit; negotiate the depth down if needed.
        config.bit_depth = 16;
        if config.buf_frames == 0 {
            config.buf_frames = config.sample_rate / 5;
        }

        let (stream, handle, label) = Self::open_stream()?;
        let sink = Sink::try_new(&handle)
            .map_err(|err| AudioError::Device(format!("{label}: {err}")))?;

        // Two buffers of headroom so a full render cycle never blocks on an
        // almost-full ring.
        let ring = Arc::new(
            RingBuffer::new(config.samples_per_buffer() * 2)
                .map_err(|err| AudioError::Device(err.to_string()))?,
        );
        let finished = Arc::new(AtomicBool::new(false));

        sink.append(RingSource::new(
            Arc::clone(&ring),
            config.sample_rate,
            u16::from(config.channels),
            Arc::clone(&finished),
        ));

        self.frame_buf = vec![0; config.samples_per_buffer()];
        self.channels = config.channels;
        self.paused = false;
        self.stream = Some(OpenStream {
            _stream: stream,
            sink,
            ring,
            finished,
            label,
        });

        Ok(())
    }

    fn buffer(&mut self) -> &mut [i16] {
        &mut self.frame_buf
    }

    fn write(&mut self, frames: u32) -> Result<()> {
        let open = self.stream.as_ref().ok_or(AudioError::NotOpen)?;

        if self.paused {
            open.sink.play();
            self.paused = false;
        }

        let wanted = frames as usize * usize::from(self.channels);
        let mut remaining = &self.frame_buf[..wanted];
        let mut retries = 0u32;

        while !remaining.is_empty() {
            let written = open.ring.write(remaining);
            if written == 0 {
                retries += 1;
                if retries > WRITE_MAX_RETRIES {
                    return Err(AudioError::Device(format!(
                        "{}: device stalled with {} samples unwritten",
                        open.label,
                        remaining.len()
                    )));
                }
                std::thread::sleep(Duration::from_micros(BUFFER_BACKOFF_MICROS));
            } else {
                remaining = &remaining[written..];
                retries = 0;
            }
        }

        Ok(())
    }

    fn reset(&mut self) {
        if let Some(open) = self.stream.as_ref() {
            open.ring.clear();
        }
        self.frame_buf.fill(0);
    }

    fn pause(&mut self) {
        if let Some(open) = self.stream.as_ref() {
            open.sink.pause();
            self.paused = true;
        }
    }

    fn close(&mut self) {
        if let Some(open) = self.stream.take() {
            open.finished.store(true, Ordering::Relaxed);
            open.sink.stop();
        }
        self.frame_buf = Vec::new();
        self.paused = false;
    }
}
