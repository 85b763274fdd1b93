//! Custom error types for the sword-reader crate.

use thiserror::Error;

/// The primary error type for all module-level operations in this crate.
///
/// `Configuration` and `Format` abort the module being processed. `Record`
/// and `OutOfRange` are per-slot conditions that the decoder folds into its
/// statistics; they only surface as errors through the single-slot APIs.
#[derive(Debug, Error)]
pub enum SwordError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The module descriptor, data directory or index files are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The index buffer cannot be divided into records.
    #[error("Invalid index format: {0}")]
    Format(String),

    /// A single slot could not be read or decoded.
    #[error("Slot {slot}: {source}")]
    Record {
        slot: usize,
        #[source]
        source: RecordError,
    },

    /// A slot index lies beyond the addressable capacity of the catalog.
    #[error("Slot {slot} is outside the catalog's addressable range")]
    OutOfRange { slot: usize },
}

/// Recoverable failure while fetching or inflating one slot's payload.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Seeking to the payload offset failed.
    #[error("seek to offset {offset:#x} failed: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// Reading the payload failed.
    #[error("read at offset {offset:#x} failed: {source}")]
    Read {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// Fewer payload bytes were available than the index declared.
    #[error("short read at offset {offset:#x}: expected {expected} bytes, found {found}")]
    ShortRead { offset: u64, expected: u64, found: u64 },

    /// The payload is not a valid zlib stream.
    #[error("decompression failed: {0}")]
    Decompression(String),
}

/// A convenience `Result` type alias using the crate's `SwordError` type.
pub type Result<T> = std::result::Result<T, SwordError>;
