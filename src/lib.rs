//! # sword-reader
//!
//! A reader for compressed SWORD commentary modules (`.zdx` index + `.zdt`
//! data) that recovers reference-keyed entries and exports them as OSIS XML.
//!
//! **Note:** Only zlib-compressed modules are supported; uncompressed
//! `.idx/.dat` modules and other codecs are not.
pub mod sword;

// Re-export the main types for convenience
pub use sword::{
    convert_batch, convert_module, decode_module,
    BatchReport, ConvertOptions, DecodeOptions, DecodeReport, DecodeStats, DecodedRecord,
    IndexReader, IndexRecord, ModuleDecoder, ModuleDescriptor, ModuleSummary, OsisWriter,
    RecordError, Reference, SlotIterator, SlotOutcome, SwordError, WorkCatalog, WorkEntry,
};
