//! File format parsing layer for compressed modules.
//!
//! # Module Organization
//!
//! - [`index`]: Parses the fixed-width `.zdx` index
//! - [`content`]: Fetches and decodes individual slot payloads from `.zdt`
//!
//! # Architecture
//!
//! ```text
//!   .zdx (index)                 .zdt (data)
//! ┌──────────────┐            ┌────────────────┐
//! │ slot 0 entry │──offset──▶ │ zlib stream 0  │
//! │ slot 1 entry │──────────▶ │ zlib stream 1  │ ← content::read_text()
//! │     ...      │            │      ...       │
//! └──────────────┘            └────────────────┘
//!   IndexReader::parse()
//! ```

pub mod content;
pub mod index;
