//! Circular buffer delay lines.
//!
//! Two read policies share the same storage layout (a `Vec<f32>` plus a write
//! cursor that always points at the next slot to overwrite):
//!
//! - [`DelayLine`] - combined write-then-read. Used by the single-tap delay and
//!   by the batch scheduler to smear each grain into its neighbours.
//! - [`RingBuffer`] - separate `write` / `read`. Used by the streaming
//!   scheduler, where many grains read the same channel history.
//!
//! # Read Positions
//!
//! | Type | Offset 0 reads | Offset `>= capacity` |
//! |------|----------------|----------------------|
//! | [`DelayLine`] | the sample written by this call | silence |
//! | [`RingBuffer`] | the oldest slot (next to be overwritten) | silence |

use alloc::vec;
use alloc::vec::Vec;

/// Wrapping delay line: write the input, then read `delay` slots behind it.
///
/// # Example
///
/// ```rust
/// use grano_core::DelayLine;
///
/// let mut delay = DelayLine::new(4);
/// assert_eq!(delay.process(1.0, 2), 0.0);
/// assert_eq!(delay.process(2.0, 2), 0.0);
/// assert_eq!(delay.process(3.0, 2), 1.0);
///
/// // Offset 0 hands back the sample that was just written
/// assert_eq!(delay.process(4.0, 0), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Creates a delay line holding `capacity` samples.
    ///
    /// A capacity of 0 is raised to 1 so the line always has a slot to write.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    /// Write `input` at the cursor, read `delay` slots behind it, advance.
    ///
    /// The read happens after the write, so `delay == 0` returns `input`
    /// itself and `delay == capacity - 1` returns the sample written
    /// `capacity - 1` calls ago. Offsets of `capacity` or more read silence;
    /// the write and cursor advance still happen.
    #[inline]
    pub fn process(&mut self, input: f32, delay: usize) -> f32 {
        let len = self.buffer.len();
        self.buffer[self.write_pos] = input;

        let output = if delay < len {
            self.buffer[(self.write_pos + len - delay) % len]
        } else {
            0.0
        };

        self.write_pos = (self.write_pos + 1) % len;
        output
    }

    /// Sets all samples to 0 and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Slot the next `process` call will write.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}

/// Ring buffer with independent writes and clamped reads.
///
/// `read(offset)` looks `offset` slots behind the write cursor *without*
/// writing first, and returns 0.0 for any `offset >= capacity` instead of
/// wrapping around.
///
/// # Example
///
/// ```rust
/// use grano_core::RingBuffer;
///
/// let mut ring = RingBuffer::new(3);
/// ring.write(1.0);
/// ring.write(2.0);
///
/// assert_eq!(ring.read(1), 2.0); // most recent write
/// assert_eq!(ring.read(2), 1.0);
/// assert_eq!(ring.read(3), 0.0); // past capacity
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl RingBuffer {
    /// Creates a ring buffer holding `capacity` samples.
    ///
    /// A zero-capacity ring ignores writes and reads silence.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Creates a ring buffer from sample rate and length in seconds.
    pub fn from_time(sample_rate: f32, seconds: f32) -> Self {
        Self::new(crate::seconds_to_frames(seconds, sample_rate))
    }

    /// Write a sample at the cursor and advance.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        let len = self.buffer.len();
        if len == 0 {
            return;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % len;
    }

    /// Read the slot `offset` positions behind the write cursor.
    ///
    /// Returns 0.0 for `offset >= capacity`.
    #[inline]
    pub fn read(&self, offset: usize) -> f32 {
        let len = self.buffer.len();
        if offset >= len {
            return 0.0;
        }
        self.buffer[(self.write_pos + len - offset) % len]
    }

    /// Sets all samples to 0 and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Slot the next `write` will overwrite.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}
