//! Core reader for compressed SWORD modules.
//!
//! # Architecture
//!
//! The library is organized into distinct layers:
//!
//! - **[`types`]**: Core data structures, the work catalog, and error types
//! - **[`codec`]**: Zlib inflation of slot payloads
//! - **[`format`]**: Index parsing and per-slot content decoding
//! - **[`versification`]**: Slot number to `work.subdivision.unit` mapping
//! - **[`iter`]** / **[`decoder`]**: Per-slot outcomes and their aggregation
//! - **[`osis`]**: OSIS XML output
//! - **[`config`]** / **[`convert`]**: Module descriptors and directory-level conversion

pub mod codec;
pub mod config;
pub mod convert;
pub mod decoder;
pub mod format;
pub mod iter;
pub mod osis;
pub mod types;
pub mod utils;
pub mod versification;

pub use config::ModuleDescriptor;
pub use convert::{convert_batch, convert_module, BatchReport, ConvertOptions, ModuleSummary};
pub use decoder::{decode_module, ModuleDecoder};
pub use format::index::IndexReader;
pub use iter::SlotIterator;
pub use osis::OsisWriter;
pub use types::catalog::{WorkCatalog, WorkEntry};
pub use types::error::{RecordError, Result, SwordError};
pub use types::models::*;
