//! Buffered reader over an arbitrary [`ByteSource`].
//!
//! Overview
//! - The reader owns a fixed-capacity buffer plus a cursor (`pos`) and a fill
//!   length (`filled`). Bytes in `[pos, filled)` are unread, bytes before
//!   `pos` were already handed out, bytes past `filled` are stale.
//! - The source is touched only when the buffer is drained and the caller
//!   still wants data. Each such event issues exactly one source call: either
//!   a capacity-sized refill, or, for requests at least as large as the
//!   buffer, a direct read into the caller's span.
//! - Short reads are surfaced as they come. Nothing is retried, errors
//!   included.
//! - End-of-stream is remembered. Once the source has reported it and the
//!   buffer is drained, every read returns [`ReadOutcome::END`] without
//!   calling the source again.

use std::{fmt, io};

use tracing::{debug, trace};

use crate::{
    error::ConfigError,
    options::{DEFAULT_CAPACITY, ReaderOptions},
    source::{ByteSource, ReadOutcome},
    stats::ReaderStats,
};

/// Wraps a [`ByteSource`] and amortizes calls to it over a fixed-size
/// buffer.
///
/// The number of calls made to the source while consuming `N` bytes is at
/// most `ceil(N / capacity) + 1`, however small the individual requests are.
///
/// The reader owns its source; borrow-only use is spelled
/// `BufferedReader<&mut S>`. Dropping the reader drops (and so closes) an
/// owned source. Use [`into_inner`](Self::into_inner) or
/// [`into_parts`](Self::into_parts) to take the source back.
///
/// # Examples
///
/// ```rust
/// use readbuf::{BufferedReader, ReadOutcome};
///
/// let mut reader = BufferedReader::new(&b"abc"[..]);
/// let mut byte = [0u8; 1];
/// let mut out = Vec::new();
/// loop {
///     let outcome = reader.read_some(&mut byte).unwrap();
///     if outcome.end_of_stream {
///         break;
///     }
///     out.extend_from_slice(&byte[..outcome.len]);
/// }
/// assert_eq!(out, b"abc");
/// assert_eq!(reader.read_some(&mut byte).unwrap(), ReadOutcome::END);
/// ```
pub struct BufferedReader<S> {
    buf: Box<[u8]>,
    pos: usize,
    filled: usize,
    eof: bool,
    stats: ReaderStats,
    source: S,
}

impl<S> BufferedReader<S> {
    /// Wrap `source` with a buffer of [`DEFAULT_CAPACITY`] bytes.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::build(source, DEFAULT_CAPACITY)
    }

    /// Wrap `source` with a buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize, source: S) -> Result<Self, ConfigError> {
        Self::with_options(source, ReaderOptions { capacity })
    }

    /// Wrap `source` using `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`ReaderOptions::validate`].
    pub fn with_options(source: S, options: ReaderOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self::build(source, options.capacity))
    }

    fn build(source: S, capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
            filled: 0,
            eof: false,
            stats: ReaderStats::default(),
            source,
        }
    }

    /// Size of the internal buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Unread bytes currently held in the buffer.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buf[self.pos..self.filled]
    }

    /// Number of unread bytes currently held in the buffer.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.filled - self.pos
    }

    /// Whether the source has ended and every buffered byte was delivered.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.eof && self.pos == self.filled
    }

    /// Counters for the traffic sent to the source so far.
    #[must_use]
    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// Shared access to the source.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Exclusive access to the source.
    ///
    /// Reading from the source directly skips whatever is buffered.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// End the session and return the source. Unread buffered bytes are
    /// lost.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.source
    }

    /// End the session and return the source together with the unread
    /// buffered bytes.
    #[must_use]
    pub fn into_parts(self) -> (S, Vec<u8>) {
        let unread = self.buf[self.pos..self.filled].to_vec();
        (self.source, unread)
    }

    fn copy_out(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.filled - self.pos);
        dst[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}

impl<S: ByteSource> BufferedReader<S> {
    /// Fill the front of `dst` with the next bytes of the stream.
    ///
    /// Buffered bytes are served without touching the source. When the
    /// buffer is empty the source is called once: directly into `dst` if
    /// `dst` is at least [`capacity`](Self::capacity) bytes, otherwise into
    /// the buffer. A zero-length `dst` returns [`ReadOutcome::EMPTY`].
    ///
    /// A direct read returns the source's outcome unchanged, so it may carry
    /// bytes and the end signal together. Reads served from the buffer report
    /// the end only once the buffer is drained.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged. The reader should not be used
    /// after an error.
    pub fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        if dst.is_empty() {
            return Ok(ReadOutcome::EMPTY);
        }
        if self.pos < self.filled {
            return Ok(ReadOutcome::data(self.copy_out(dst)));
        }
        if self.eof {
            return Ok(ReadOutcome::END);
        }
        if dst.len() >= self.buf.len() {
            return self.read_direct(dst);
        }
        if self.refill()? == 0 {
            return Ok(ReadOutcome::END);
        }
        Ok(ReadOutcome::data(self.copy_out(dst)))
    }

    /// Read one byte, or `None` at end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pos == self.filled && (self.eof || self.refill()? == 0) {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Return up to `n` unread bytes without consuming them.
    ///
    /// The source is called at most once, and only when the buffer is empty,
    /// so fewer than `n` bytes may come back even before end-of-stream. An
    /// empty slice means end-of-stream (or `n == 0`).
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        if n == 0 {
            return Ok(&[]);
        }
        if self.pos == self.filled && !self.eof {
            self.refill()?;
        }
        let end = self.pos + n.min(self.filled - self.pos);
        Ok(&self.buf[self.pos..end])
    }

    /// Skip up to `n` bytes and return how many were skipped.
    ///
    /// Fewer than `n` are skipped only when the stream ends first.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged. Bytes skipped before the error
    /// stay skipped.
    pub fn discard(&mut self, n: usize) -> io::Result<usize> {
        let mut skipped = 0;
        while skipped < n {
            if self.pos == self.filled && (self.eof || self.refill()? == 0) {
                break;
            }
            let step = (n - skipped).min(self.filled - self.pos);
            self.pos += step;
            skipped += step;
        }
        Ok(skipped)
    }

    fn read_direct(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        let requested = dst.len();
        let outcome = match self.source.read_some(dst) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.record_failure();
                debug!(requested, error = %err, "direct read failed");
                return Err(err);
            }
        };
        debug_assert!(outcome.len <= requested, "source overfilled the span");
        let len = outcome.len.min(requested);
        self.stats.record_bypass(len);
        trace!(requested, len, end = outcome.end_of_stream, "direct read");

        if len == 0 {
            self.eof = true;
            return Ok(ReadOutcome::END);
        }
        // The caller sees the source's answer as-is, end signal included.
        self.eof |= outcome.end_of_stream;
        Ok(ReadOutcome {
            len,
            end_of_stream: outcome.end_of_stream,
        })
    }

    /// Refill the drained buffer with one source call. Returns the number of
    /// bytes obtained; zero means end-of-stream.
    fn refill(&mut self) -> io::Result<usize> {
        debug_assert_eq!(self.pos, self.filled);
        self.pos = 0;
        self.filled = 0;

        let capacity = self.buf.len();
        let outcome = match self.source.read_some(&mut self.buf) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.record_failure();
                debug!(capacity, error = %err, "refill failed");
                return Err(err);
            }
        };
        debug_assert!(outcome.len <= capacity, "source overfilled the buffer");
        self.filled = outcome.len.min(capacity);
        self.eof = outcome.end_of_stream || self.filled == 0;
        self.stats.record_refill(self.filled);
        trace!(capacity, len = self.filled, end = self.eof, "refill");
        Ok(self.filled)
    }
}

impl<S: ByteSource> ByteSource for BufferedReader<S> {
    #[inline]
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        Self::read_some(self, dst)
    }
}

impl<S: ByteSource> io::Read for BufferedReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_some(buf).map(|outcome| outcome.len)
    }
}

impl<S: ByteSource> io::BufRead for BufferedReader<S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos == self.filled && !self.eof {
            self.refill()?;
        }
        Ok(self.buffer())
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.filled);
    }
}

impl<S: fmt::Debug> fmt::Debug for BufferedReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedReader")
            .field("source", &self.source)
            .field(
                "buffer",
                &format_args!("{}/{}", self.filled - self.pos, self.buf.len()),
            )
            .field("eof", &self.eof)
            .finish_non_exhaustive()
    }
}
