#![no_main]
use std::io::{self, BufRead};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use readbuf::{BufferedReader, ByteSource, ReadOutcome};

/// Source that hands out `data` in chunks of at most `max_chunk` bytes.
struct ChunkedSource<'a> {
    data: &'a [u8],
    max_chunk: usize,
    end_with_data: bool,
    calls: usize,
}

impl ByteSource for ChunkedSource<'_> {
    fn read_some(&mut self, dst: &mut [u8]) -> io::Result<ReadOutcome> {
        self.calls += 1;
        if dst.is_empty() {
            return Ok(ReadOutcome::EMPTY);
        }
        if self.data.is_empty() {
            return Ok(ReadOutcome::END);
        }
        let n = dst.len().min(self.data.len()).min(self.max_chunk);
        let (head, tail) = self.data.split_at(n);
        dst[..n].copy_from_slice(head);
        self.data = tail;
        if self.end_with_data && self.data.is_empty() {
            Ok(ReadOutcome::last(n))
        } else {
            Ok(ReadOutcome::data(n))
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Read(u16),
    ReadByte,
    Peek(u8),
    Discard(u16),
    FillBuf(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u16,
    max_chunk: u16,
    end_with_data: bool,
    ops: Vec<Op>,
    data: Vec<u8>,
}

fn run(input: Input) {
    let Input {
        capacity,
        max_chunk,
        end_with_data,
        ops,
        data,
    } = input;
    let capacity = usize::from(capacity % 1024) + 1;
    let source = ChunkedSource {
        data: &data,
        max_chunk: usize::from(max_chunk) + 1,
        end_with_data,
        calls: 0,
    };
    let mut reader = BufferedReader::with_capacity(capacity, source).unwrap();
    let expected = &data[..];
    let mut offset = 0usize;

    for op in ops {
        match op {
            Op::Read(len) => {
                let mut dst = vec![0u8; usize::from(len)];
                let outcome = reader.read_some(&mut dst).unwrap();
                assert!(outcome.len <= dst.len());
                // Only a direct read can carry bytes and the end together.
                if outcome.end_of_stream && outcome.len > 0 {
                    assert!(dst.len() >= capacity);
                }
                assert_eq!(&dst[..outcome.len], &expected[offset..offset + outcome.len]);
                offset += outcome.len;
                if outcome.end_of_stream {
                    assert_eq!(offset, expected.len());
                }
            }
            Op::ReadByte => match reader.read_byte().unwrap() {
                Some(byte) => {
                    assert_eq!(byte, expected[offset]);
                    offset += 1;
                }
                None => assert_eq!(offset, expected.len()),
            },
            Op::Peek(n) => {
                let peeked = reader.peek(usize::from(n)).unwrap();
                assert!(peeked.len() <= usize::from(n));
                assert_eq!(peeked, &expected[offset..offset + peeked.len()]);
            }
            Op::Discard(n) => {
                let skipped = reader.discard(usize::from(n)).unwrap();
                assert!(skipped == usize::from(n) || offset + skipped == expected.len());
                offset += skipped;
            }
            Op::FillBuf(n) => {
                let window = reader.fill_buf().unwrap();
                assert_eq!(window, &expected[offset..offset + window.len()]);
                let amt = usize::from(n).min(window.len());
                reader.consume(amt);
                offset += amt;
            }
        }
        assert!(reader.buffered() <= reader.capacity());
    }

    let stats = reader.stats();
    assert_eq!(stats.source_reads, stats.refills + stats.bypass_reads);
    assert_eq!(reader.get_ref().calls as u64, stats.source_reads);
}

fuzz_target!(|input: Input| run(input));
