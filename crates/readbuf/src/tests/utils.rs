use std::io;

use crate::{BufferedReader, ByteSource, ReadOutcome};

/// In-memory source that records every call made to it.
///
/// It can be told to return short reads, to fail on a given call, or to
/// deliver its final bytes together with the end signal.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    data: Vec<u8>,
    offset: usize,
    /// Requested span length of each call, in order.
    pub(crate) calls: Vec<usize>,
    max_chunk: Option<usize>,
    fail_on_call: Option<usize>,
    end_with_data: bool,
}

impl ScriptedSource {
    pub(crate) fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Never return more than `max` bytes from one call.
    pub(crate) fn short_reads(mut self, max: usize) -> Self {
        self.max_chunk = Some(max);
        self
    }

    /// Fail the `n`th call (1-based).
    pub(crate) fn fail_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    /// Report end-of-stream alongside the last bytes instead of on a
    /// separate empty call.
    pub(crate) fn end_with_data(mut self) -> Self {
        self.end_with_data = true;
        self
    }
}

impl ByteSource for ScriptedSource {
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        self.calls.push(dst.len());
        if self.fail_on_call == Some(self.calls.len()) {
            return Err(io::Error::other("scripted failure"));
        }
        if dst.is_empty() {
            return Ok(ReadOutcome::EMPTY);
        }
        let remaining = &self.data[self.offset..];
        if remaining.is_empty() {
            return Ok(ReadOutcome::END);
        }
        let mut n = dst.len().min(remaining.len());
        if let Some(max) = self.max_chunk {
            n = n.min(max);
        }
        dst[..n].copy_from_slice(&remaining[..n]);
        self.offset += n;
        if self.end_with_data && self.offset == self.data.len() {
            Ok(ReadOutcome::last(n))
        } else {
            Ok(ReadOutcome::data(n))
        }
    }
}

/// `len` bytes counting up from zero, wrapping at 256.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn counting_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Drain `reader` with fixed-size requests until end-of-stream.
pub(crate) fn drain<S: ByteSource>(reader: &mut BufferedReader<S>, request: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut chunk = vec![0u8; request];
    loop {
        let outcome = reader.read_some(&mut chunk).unwrap();
        out.extend_from_slice(&chunk[..outcome.len]);
        if outcome.end_of_stream {
            break;
        }
    }
    out
}
