use crate::error::ConfigError;

/// Capacity used by [`BufferedReader::new`](crate::BufferedReader::new).
pub const DEFAULT_CAPACITY: usize = 4096;

/// Configuration options for a [`BufferedReader`](crate::BufferedReader).
///
/// # Examples
///
/// ```rust
/// use readbuf::{BufferedReader, ReaderOptions};
///
/// let options = ReaderOptions {
///     capacity: 64 * 1024,
/// };
/// let reader = BufferedReader::with_options(&b"hello"[..], options).unwrap();
/// assert_eq!(reader.capacity(), 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Size of the internal buffer in bytes.
    ///
    /// Each refill asks the underlying source for this many bytes, and
    /// requests at least this large skip the internal buffer entirely when
    /// it is empty. Must be non-zero.
    ///
    /// # Default
    ///
    /// `4096`
    pub capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ReaderOptions {
    /// Check the options before a reader is built from them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
