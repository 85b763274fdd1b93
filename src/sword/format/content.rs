//! # Slot Content Decoding
//!
//! Turns one index entry into text: fetch the compressed bytes from the
//! data file, inflate them, and decode the result.
//!
//! Every failure here is a [`RecordError`]; the caller decides whether it is
//! fatal (it never is during a module scan).

use std::io::{Read, Seek, SeekFrom};

use log::trace;

use crate::sword::codec::compression;
use crate::sword::types::error::RecordError;
use crate::sword::types::models::{DecodeOptions, IndexRecord};
use crate::sword::utils;

/// Reads exactly `record.compressed_length` bytes at `record.offset` into `buf`.
pub fn read_payload_into<R: Read + Seek>(
    blob: &mut R,
    record: &IndexRecord,
    buf: &mut Vec<u8>,
) -> Result<(), RecordError> {
    let offset = record.offset as u64;
    let expected = record.compressed_length as u64;

    blob.seek(SeekFrom::Start(offset))
        .map_err(|source| RecordError::Seek { offset, source })?;

    buf.clear();
    buf.reserve((expected as usize).min(1 << 20));
    let found = blob
        .by_ref()
        .take(expected)
        .read_to_end(buf)
        .map_err(|source| RecordError::Read { offset, source })? as u64;

    if found != expected {
        return Err(RecordError::ShortRead { offset, expected, found });
    }

    trace!("Read {} payload bytes at offset {:#x}", found, offset);
    Ok(())
}

/// Inflates and decodes a raw payload into display text.
pub fn decode_payload(
    raw: &[u8],
    record: &IndexRecord,
    options: &DecodeOptions,
    scratch: &mut Vec<u8>,
) -> Result<String, RecordError> {
    compression::decompress_payload_into(scratch, raw, record.length as u64)?;

    let mut text = utils::decode_text(scratch, options.encoding);
    if let Some(max_chars) = options.max_text_chars {
        utils::truncate_chars(&mut text, max_chars);
    }
    Ok(text)
}

/// Fetches and decodes the text of a single non-empty slot.
pub fn read_text<R: Read + Seek>(
    blob: &mut R,
    record: &IndexRecord,
    options: &DecodeOptions,
) -> Result<String, RecordError> {
    let mut raw = Vec::new();
    let mut scratch = Vec::new();
    read_payload_into(blob, record, &mut raw)?;
    decode_payload(&raw, record, options, &mut scratch)
}
