#![allow(missing_docs, dead_code)]

use std::io::{self, Read, Write};

use tempfile::NamedTempFile;

/// Write `len` bytes counting up from zero (wrapping) to a fresh temp file.
#[expect(clippy::cast_possible_truncation)]
pub fn counting_file(len: usize) -> NamedTempFile {
    let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(&data).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

/// `io::Read` wrapper that counts calls to the wrapped reader.
pub struct CountingRead<R> {
    pub inner: R,
    pub calls: usize,
}

impl<R> CountingRead<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, calls: 0 }
    }
}

impl<R: Read> Read for CountingRead<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        self.inner.read(buf)
    }
}
