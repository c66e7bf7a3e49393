//! The "fill a span" capability shared by raw sources and buffered readers.
//!
//! A [`ByteSource`] is anything that can be asked to write some bytes into a
//! caller-provided span. It answers with a [`ReadOutcome`]: how many bytes it
//! wrote and whether it will ever produce more. Raw sources (files, sockets,
//! in-memory slices) and [`BufferedReader`](crate::BufferedReader) expose the
//! same operation, so one can stand in for the other.

use std::io;

/// Result of a single [`ByteSource::read_some`] call.
///
/// `len` bytes at the front of the destination span are valid. When
/// `end_of_stream` is set the source will never produce another byte; `len`
/// may still be non-zero if the final bytes arrived with the end signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOutcome {
    /// Number of bytes written to the front of the destination.
    pub len: usize,
    /// Whether the source is exhausted.
    pub end_of_stream: bool,
}

impl ReadOutcome {
    /// Terminal outcome: no bytes, and none will follow.
    pub const END: Self = Self {
        len: 0,
        end_of_stream: true,
    };

    /// Outcome of a zero-length request.
    pub const EMPTY: Self = Self {
        len: 0,
        end_of_stream: false,
    };

    /// `len` bytes were written and more may follow.
    #[must_use]
    pub const fn data(len: usize) -> Self {
        Self {
            len,
            end_of_stream: false,
        }
    }

    /// `len` bytes were written and they are the last the source will
    /// produce.
    #[must_use]
    pub const fn last(len: usize) -> Self {
        Self {
            len,
            end_of_stream: true,
        }
    }
}

/// A producer of bytes that fills caller-provided spans.
///
/// Implementations write at most `dst.len()` bytes to the front of `dst`. A
/// call with an empty `dst` must return [`ReadOutcome::EMPTY`] (or an error)
/// and must not report end-of-stream. Errors are reported as-is; callers
/// decide whether to retry.
pub trait ByteSource {
    /// Attempt to fill `dst`, returning how many bytes were obtained and
    /// whether more may follow.
    ///
    /// # Errors
    ///
    /// Returns the source's own I/O error when it cannot produce bytes.
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        (**self).read_some(dst)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        (**self).read_some(dst)
    }
}

/// In-memory source: hands out its prefix and advances past it.
impl ByteSource for &[u8] {
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        if dst.is_empty() {
            return Ok(ReadOutcome::EMPTY);
        }
        if self.is_empty() {
            return Ok(ReadOutcome::END);
        }
        let n = dst.len().min(self.len());
        let (head, tail) = self.split_at(n);
        dst[..n].copy_from_slice(head);
        *self = tail;
        Ok(ReadOutcome::data(n))
    }
}

/// Adapter presenting any [`std::io::Read`] as a [`ByteSource`].
///
/// `Ok(0)` for a non-empty destination is translated into end-of-stream.
/// Every error, [`io::ErrorKind::Interrupted`] included, is passed through
/// unchanged.
#[derive(Debug, Default)]
pub struct IoSource<R> {
    inner: R,
}

impl<R> IoSource<R> {
    /// Wrap `inner`.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Shared access to the wrapped reader.
    #[must_use]
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Exclusive access to the wrapped reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the adapter.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteSource for IoSource<R> {
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        if dst.is_empty() {
            return Ok(ReadOutcome::EMPTY);
        }
        match self.inner.read(dst)? {
            0 => Ok(ReadOutcome::END),
            n => Ok(ReadOutcome::data(n)),
        }
    }
}
