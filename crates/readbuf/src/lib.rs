//! A buffered byte-stream reader.
//!
//! [`BufferedReader`] wraps any [`ByteSource`] (a raw file, a socket, an
//! in-memory slice, or another reader) and serves small reads out of a
//! fixed-size buffer, so the source sees one call per buffer's worth of data
//! instead of one call per request.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use readbuf::{BufferedReader, IoSource};
//!
//! let data: Vec<u8> = (0..=255).collect();
//! let mut reader = BufferedReader::new(IoSource::new(Cursor::new(data)));
//! let mut total = 0usize;
//! while let Some(byte) = reader.read_byte().unwrap() {
//!     total += usize::from(byte);
//! }
//! assert_eq!(total, 255 * 256 / 2);
//! assert_eq!(reader.stats().source_reads, 2);
//! ```

mod error;
mod options;
mod reader;
mod source;
mod stats;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use options::{DEFAULT_CAPACITY, ReaderOptions};
pub use reader::BufferedReader;
pub use source::{ByteSource, IoSource, ReadOutcome};
pub use stats::ReaderStats;
