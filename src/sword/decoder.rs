//! Whole-module decoding: runs every slot and aggregates the outcomes.

use std::io::{Read, Seek};

use log::info;

use super::format::content;
use super::iter::SlotIterator;
use super::types::catalog::WorkCatalog;
use super::types::error::{Result, SwordError};
use super::types::models::*;
use super::versification;

/// Drives an index over its data file.
///
/// Holds the catalog and policy; the index and data are supplied per call so
/// a decoder can be reused across modules.
#[derive(Debug, Clone)]
pub struct ModuleDecoder<'c> {
    catalog: &'c WorkCatalog,
    options: DecodeOptions,
}

impl<'c> ModuleDecoder<'c> {
    pub fn new(catalog: &'c WorkCatalog, options: DecodeOptions) -> Self {
        Self { catalog, options }
    }

    /// Returns the lazy per-slot iterator over `index`.
    pub fn iter_slots<'a, R: Read + Seek>(
        &'a self,
        index: &'a [IndexRecord],
        blob: &'a mut R,
    ) -> SlotIterator<'a, R> {
        SlotIterator::new(index, blob, self.catalog, self.options)
    }

    /// Decodes every slot, collecting records in slot order plus counters.
    pub fn decode<R: Read + Seek>(&self, index: &[IndexRecord], blob: &mut R) -> DecodeReport {
        let mut report = DecodeReport::default();
        for outcome in self.iter_slots(index, blob) {
            report.stats.record(&outcome);
            if let SlotOutcome::Decoded(record) = outcome {
                report.records.push(record);
            }
        }

        info!(
            "Decoded {} of {} slots ({} empty, {} failed, {} out of range)",
            report.stats.decoded,
            report.stats.attempted,
            report.stats.empty,
            report.stats.failed,
            report.stats.out_of_range
        );
        report
    }

    /// Decodes a single slot, surfacing its failure as an error.
    ///
    /// Returns `Ok(None)` for an empty slot.
    pub fn decode_slot<R: Read + Seek>(
        &self,
        slot: usize,
        entry: &IndexRecord,
        blob: &mut R,
    ) -> Result<Option<DecodedRecord>> {
        if entry.is_empty() {
            return Ok(None);
        }
        let text = content::read_text(blob, entry, &self.options)
            .map_err(|source| SwordError::Record { slot, source })?;
        let reference = if self.options.strict {
            versification::map_strict(slot, self.catalog)?
        } else {
            versification::map(slot, self.catalog)?
        };
        Ok(Some(DecodedRecord { slot, reference, text }))
    }
}

/// Convenience wrapper: decode `index` against `blob` in one call.
pub fn decode_module<R: Read + Seek>(
    index: &[IndexRecord],
    blob: &mut R,
    catalog: &WorkCatalog,
    options: DecodeOptions,
) -> DecodeReport {
    ModuleDecoder::new(catalog, options).decode(index, blob)
}
