//! # Index Parsing
//!
//! A `.zdx` index is a flat array of 12-byte entries, one per slot:
//!
//! ```text
//! ┌────────────┬────────────┬──────────────────────┐
//! │ offset u32 │ length u32 │ compressed_len u32   │  (little-endian)
//! └────────────┴────────────┴──────────────────────┘
//! ```
//!
//! There is no header and no entry count; the number of slots is implied by
//! the buffer length.

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

use crate::sword::types::error::{Result, SwordError};
use crate::sword::types::models::IndexRecord;

/// Parses an in-memory index into its records.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexReader {
    limit: Option<usize>,
    expect_records: bool,
}

impl IndexReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only parse the first `limit` records.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Treat a buffer with no complete record as a format error.
    pub fn expect_records(mut self, expect: bool) -> Self {
        self.expect_records = expect;
        self
    }

    /// Splits `bytes` into index records, ignoring a trailing partial block.
    ///
    /// # Errors
    /// Returns [`SwordError::Format`] only when records are expected and the
    /// buffer holds none.
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<IndexRecord>> {
        let chunks = bytes.chunks_exact(IndexRecord::ENCODED_LEN);

        let remainder = chunks.remainder().len();
        if remainder != 0 {
            warn!(
                "Index has {} trailing bytes that do not form a complete entry; ignoring them",
                remainder
            );
        }

        let available = chunks.len();
        if available == 0 && self.expect_records {
            return Err(SwordError::Format(format!(
                "index of {} bytes holds no complete {}-byte entry",
                bytes.len(),
                IndexRecord::ENCODED_LEN
            )));
        }

        let take = self.limit.map_or(available, |limit| limit.min(available));
        let records: Vec<IndexRecord> = chunks.take(take).map(parse_entry).collect();

        debug!("Parsed {} of {} index entries", records.len(), available);
        Ok(records)
    }
}

fn parse_entry(chunk: &[u8]) -> IndexRecord {
    IndexRecord {
        offset: LittleEndian::read_u32(&chunk[0..4]),
        length: LittleEndian::read_u32(&chunk[4..8]),
        compressed_length: LittleEndian::read_u32(&chunk[8..12]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(records: &[(u32, u32, u32)]) -> Vec<u8> {
        let mut out = Vec::new();
        for &(offset, length, compressed) in records {
            out.extend_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&length.to_le_bytes());
            out.extend_from_slice(&compressed.to_le_bytes());
        }
        out
    }

    #[test]
    fn record_count_is_floor_of_len_over_twelve() {
        let mut bytes = encode(&[(4, 5, 6), (0, 0, 0), (100, 20, 18)]);
        for _ in 0..IndexRecord::ENCODED_LEN {
            let records = IndexReader::new().parse(&bytes).unwrap();
            assert_eq!(records.len(), bytes.len() / 12);
            bytes.push(0xAA);
        }
    }

    #[test]
    fn fields_are_little_endian() {
        let bytes = encode(&[(0x0102_0304, 7, 9)]);
        assert_eq!(bytes[0], 0x04);
        let records = IndexReader::new().parse(&bytes).unwrap();
        assert_eq!(
            records,
            vec![IndexRecord {
                offset: 0x0102_0304,
                length: 7,
                compressed_length: 9
            }]
        );
    }

    #[test]
    fn empty_buffer_is_zero_records() {
        assert!(IndexReader::new().parse(&[]).unwrap().is_empty());
        assert!(IndexReader::new().parse(&[1, 2, 3]).unwrap().is_empty());
    }

    #[test]
    fn empty_buffer_fails_when_records_expected() {
        let err = IndexReader::new().expect_records(true).parse(&[]).unwrap_err();
        assert!(matches!(err, SwordError::Format(_)));
    }

    #[test]
    fn limit_samples_a_prefix() {
        let bytes = encode(&[(1, 1, 1), (2, 2, 2), (3, 3, 3)]);
        let records = IndexReader::new().with_limit(Some(2)).parse(&bytes).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].offset, 2);

        let all = IndexReader::new().with_limit(Some(10)).parse(&bytes).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn zero_offset_or_length_is_empty() {
        assert!(IndexRecord { offset: 0, length: 0, compressed_length: 0 }.is_empty());
        assert!(IndexRecord { offset: 0, length: 5, compressed_length: 5 }.is_empty());
        assert!(IndexRecord { offset: 5, length: 0, compressed_length: 5 }.is_empty());
        assert!(!IndexRecord { offset: 5, length: 5, compressed_length: 5 }.is_empty());
    }
}
