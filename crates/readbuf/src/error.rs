use thiserror::Error;

/// Rejected reader configuration.
///
/// Read failures are reported as [`std::io::Error`] straight from the
/// underlying source; this type only covers construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The internal buffer must hold at least one byte.
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,
}
