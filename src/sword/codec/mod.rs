//! Codec layer for payload decompression.
//!
//! # Submodules
//!
//! - [`compression`][]: Zlib inflation of individual slot payloads

pub mod compression;
