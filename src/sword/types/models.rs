//! Core data structures for compressed module components.
//!
//! This module defines the fundamental types used throughout the library:
//! - Index records and their on-disk width
//! - References and decoded entries
//! - Per-slot outcomes and aggregate decode statistics

use std::fmt;

use encoding_rs::Encoding;

use super::error::RecordError;

/// One fixed-width entry of a `.zdx` index.
///
/// Each entry describes where the compressed payload of a single slot lives
/// inside the companion `.zdt` data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexRecord {
    /// Absolute byte offset of the payload in the data file.
    pub offset: u32,
    /// Size of the payload once inflated (bytes).
    pub length: u32,
    /// Size of the payload as stored in the data file (bytes).
    pub compressed_length: u32,
}

impl IndexRecord {
    /// On-disk size of one index entry: three little-endian `u32` fields.
    pub const ENCODED_LEN: usize = 12;

    /// Returns `true` if this entry marks an unused slot.
    pub fn is_empty(&self) -> bool {
        self.offset == 0 || self.length == 0
    }
}

/// A canonical `work.subdivision.unit` address, e.g. `Gen.1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub work: String,
    /// 1-based subdivision (chapter) number.
    pub subdivision: u32,
    /// 1-based unit (verse) number.
    pub unit: u32,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.work, self.subdivision, self.unit)
    }
}

/// A successfully decoded slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Position of the originating entry in the index.
    pub slot: usize,
    pub reference: Reference,
    pub text: String,
}

/// Result of processing a single slot.
///
/// Only `Decoded` carries output; the other variants are tallied by the
/// caller so a bad slot never interrupts the scan.
#[derive(Debug)]
pub enum SlotOutcome {
    Decoded(DecodedRecord),
    Empty,
    OutOfRange(usize),
    Failed { slot: usize, error: RecordError },
}

/// Aggregate counters for one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub attempted: usize,
    pub decoded: usize,
    pub empty: usize,
    pub failed: usize,
    pub out_of_range: usize,
}

impl DecodeStats {
    /// Folds one slot outcome into the counters.
    pub fn record(&mut self, outcome: &SlotOutcome) {
        self.attempted += 1;
        match outcome {
            SlotOutcome::Decoded(_) => self.decoded += 1,
            SlotOutcome::Empty => self.empty += 1,
            SlotOutcome::OutOfRange(_) => self.out_of_range += 1,
            SlotOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Slots that produced no record for any reason.
    pub fn skipped(&self) -> usize {
        self.empty + self.failed + self.out_of_range
    }
}

/// Caller policy for a decode pass.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Stop after this many slots have been attempted.
    pub max_slots: Option<usize>,
    /// Truncate each decoded text to this many characters.
    pub max_text_chars: Option<usize>,
    /// Reject references whose subdivision exceeds the work's declared count.
    pub strict: bool,
    /// Text encoding of the inflated payloads.
    pub encoding: &'static Encoding,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_slots: None,
            max_text_chars: None,
            strict: false,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Everything a decode pass produced.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub records: Vec<DecodedRecord>,
    pub stats: DecodeStats,
}
