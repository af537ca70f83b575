//! Ring buffer between the render loop and the audio device
//!
//! The producer side is the player's render cycle writing interleaved i16
//! samples; the consumer side is the rodio source draining them into the
//! device callback. Memory consumption is fixed at the buffer capacity
//! regardless of playback duration. Uses mutex-based synchronization with
//! atomic position tracking for visibility.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Error type for ring buffer operations
#[derive(Debug, Clone)]
pub struct RingBufferError(pub String);

impl std::fmt::Display for RingBufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RingBufferError {}

/// Ring buffer for streaming interleaved audio samples
///
/// # Thread Safety
/// - One producer (render loop), one consumer (audio callback)
/// - Buffer access goes through a parking_lot::Mutex; positions are atomics
///   so availability checks don't need the lock
#[derive(Debug)]
pub struct RingBuffer {
    /// Shared sample storage
    buffer: Mutex<Vec<i16>>,
    /// Write position (producer)
    write_pos: AtomicUsize,
    /// Read position (consumer)
    read_pos: AtomicUsize,
    /// Capacity (power of 2 for cheap modulo)
    capacity: usize,
    /// Capacity mask: `pos & mask == pos % capacity`
    mask: usize,
}

impl RingBuffer {
    /// Create a new ring buffer
    /// Capacity is rounded up to the next power of 2
    ///
    /// # Errors
    ///
    /// Returns an error if the requested capacity is 0 or would exceed the
    /// maximum safe allocation (256 MB of samples).
    pub fn new(requested_capacity: usize) -> Result<Self, RingBufferError> {
        if requested_capacity == 0 {
            return Err(RingBufferError(
                "Ring buffer capacity must be greater than 0".into(),
            ));
        }

        let capacity = requested_capacity.next_power_of_two();

        const MAX_CAPACITY: usize = 256 * 1024 * 1024 / std::mem::size_of::<i16>();
        if capacity > MAX_CAPACITY {
            return Err(RingBufferError(format!(
                "Ring buffer capacity {capacity} exceeds maximum safe size {MAX_CAPACITY}"
            )));
        }

        let mask = capacity - 1;

        Ok(RingBuffer {
            buffer: Mutex::new(vec![0; capacity]),
            write_pos: AtomicUsize::new(0),
            read_pos: AtomicUsize::new(0),
            capacity,
            mask,
        })
    }

    /// Get the capacity of the buffer
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples available to read without blocking
    pub fn available_read(&self) -> usize {
        let write = self.write_pos.load(Ordering::Acquire);
        let read = self.read_pos.load(Ordering::Acquire);

        if write >= read {
            write - read
        } else {
            self.capacity - (read - write)
        }
    }

    /// Write samples to the buffer (producer)
    /// Returns the number of samples successfully written; 0 when full
    pub fn write(&self, samples: &[i16]) -> usize {
        let mut buf = self.buffer.lock();

        // Calculate available space while holding the lock (prevents TOCTOU race)
        let write_pos = self.write_pos.load(Ordering::Acquire);
        let read_pos = self.read_pos.load(Ordering::Acquire);

        let available = if write_pos >= read_pos {
            self.capacity - (write_pos - read_pos) - 1
        } else {
            (read_pos - write_pos) - 1
        };

        let to_write = samples.len().min(available);

        if to_write == 0 {
            return 0;
        }

        let write_idx = write_pos & self.mask;

        if write_idx + to_write <= self.capacity {
            // Single contiguous chunk
            buf[write_idx..write_idx + to_write].copy_from_slice(&samples[..to_write]);
        } else {
            // Wrap-around write
            let first_part = self.capacity - write_idx;
            buf[write_idx..].copy_from_slice(&samples[..first_part]);
            buf[..to_write - first_part].copy_from_slice(&samples[first_part..to_write]);
        }

        drop(buf); // Release lock before updating position

        self.write_pos
            .store(write_pos + to_write, Ordering::Release);

        to_write
    }

    /// Read samples from the buffer (consumer)
    /// Returns the number of samples successfully read
    pub fn read(&self, dest: &mut [i16]) -> usize {
        let buf = self.buffer.lock();

        // Calculate available data while holding the lock (prevents TOCTOU race)
        let write_pos = self.write_pos.load(Ordering::Acquire);
        let read_pos = self.read_pos.load(Ordering::Acquire);

        let available = if write_pos >= read_pos {
            write_pos - read_pos
        } else {
            self.capacity - (read_pos - write_pos)
        };

        let to_read = dest.len().min(available);

        if to_read == 0 {
            return 0;
        }

        let read_idx = read_pos & self.mask;

        if read_idx + to_read <= self.capacity {
            // Single contiguous chunk
            dest[..to_read].copy_from_slice(&buf[read_idx..read_idx + to_read]);
        } else {
            // Wrap-around read
            let first_part = self.capacity - read_idx;
            dest[..first_part].copy_from_slice(&buf[read_idx..]);
            dest[first_part..to_read].copy_from_slice(&buf[..to_read - first_part]);
        }

        drop(buf); // Release lock before updating position

        self.read_pos.store(read_pos + to_read, Ordering::Release);

        to_read
    }

    /// Drop all queued samples (sink reset when skipping or restarting)
    pub fn clear(&self) {
        let _buf = self.buffer.lock();
        let write_pos = self.write_pos.load(Ordering::Acquire);
        self.read_pos.store(write_pos, Ordering::Release);
    }

    /// Check if the buffer has any samples to read
    pub fn is_empty(&self) -> bool {
        self.available_read() == 0
    }

    /// Get fill percentage (0.0 to 1.0)
    pub fn fill_percentage(&self) -> f32 {
        (self.available_read() as f32) / (self.capacity as f32)
    }
}
