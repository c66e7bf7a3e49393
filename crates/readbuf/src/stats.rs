/// Counters describing traffic to the underlying source.
///
/// Every invocation of the source bumps `source_reads` exactly once. A
/// successful one also counts as either a refill or a bypass read; a failed
/// one counts only in `source_reads`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderStats {
    /// Total calls made to the underlying source.
    pub source_reads: u64,
    /// Total bytes the source produced.
    pub bytes_from_source: u64,
    /// Capacity-sized reads into the internal buffer.
    pub refills: u64,
    /// Reads made directly into the caller's span.
    pub bypass_reads: u64,
}

impl ReaderStats {
    pub(crate) fn record_refill(&mut self, len: usize) {
        self.source_reads += 1;
        self.refills += 1;
        self.bytes_from_source += len as u64;
    }

    pub(crate) fn record_bypass(&mut self, len: usize) {
        self.source_reads += 1;
        self.bypass_reads += 1;
        self.bytes_from_source += len as u64;
    }

    pub(crate) fn record_failure(&mut self) {
        self.source_reads += 1;
    }
}
