//! Sequential, per-slot access to a module's contents.
//!
//! [`SlotIterator`] walks the index in slot order and yields one
//! [`SlotOutcome`] per slot. A slot that cannot be read, inflated or mapped
//! yields a non-`Decoded` outcome instead of ending the iteration, so a
//! single damaged entry never hides the rest of the module.
//!
//! # Example
//! ```no_run
//! # use std::fs::File;
//! # use sword_reader::{IndexReader, SlotIterator, SlotOutcome, WorkCatalog, DecodeOptions};
//! let index = IndexReader::new().parse(&std::fs::read("mhc.zdx").unwrap()).unwrap();
//! let mut data = File::open("mhc.zdt").unwrap();
//! let catalog = WorkCatalog::kjv();
//! for outcome in SlotIterator::new(&index, &mut data, &catalog, DecodeOptions::default()) {
//!     if let SlotOutcome::Decoded(record) = outcome {
//!         println!("{}: {}", record.reference, record.text);
//!     }
//! }
//! ```

use std::io::{Read, Seek};
use std::iter::{Enumerate, Take};
use std::slice::Iter;

use log::debug;

use super::format::content;
use super::types::catalog::WorkCatalog;
use super::types::error::RecordError;
use super::types::models::{DecodeOptions, DecodedRecord, IndexRecord, SlotOutcome};
use super::versification;

/// Iterator over the outcomes of decoding each slot of an index.
///
/// Created by [`SlotIterator::new`]. Reuses its payload buffers across slots.
pub struct SlotIterator<'a, R: Read + Seek> {
    entries: Take<Enumerate<Iter<'a, IndexRecord>>>,
    blob: &'a mut R,
    catalog: &'a WorkCatalog,
    options: DecodeOptions,
    raw: Vec<u8>,
    inflated: Vec<u8>,
}

impl<'a, R: Read + Seek> SlotIterator<'a, R> {
    pub fn new(
        index: &'a [IndexRecord],
        blob: &'a mut R,
        catalog: &'a WorkCatalog,
        options: DecodeOptions,
    ) -> Self {
        let limit = options.max_slots.unwrap_or(index.len());
        Self {
            entries: index.iter().enumerate().take(limit),
            blob,
            catalog,
            options,
            raw: Vec::new(),
            inflated: Vec::new(),
        }
    }

    /// Keeps only the successfully decoded records.
    pub fn records(self) -> impl Iterator<Item = DecodedRecord> + 'a
    where
        R: 'a,
    {
        self.filter_map(|outcome| match outcome {
            SlotOutcome::Decoded(record) => Some(record),
            _ => None,
        })
    }

    fn decode_slot(&mut self, slot: usize, entry: &IndexRecord) -> SlotOutcome {
        if entry.is_empty() {
            return SlotOutcome::Empty;
        }

        let text = match self.fetch_text(entry) {
            Ok(text) => text,
            Err(error) => {
                debug!("Skipping slot {}: {}", slot, error);
                return SlotOutcome::Failed { slot, error };
            }
        };

        let mapped = if self.options.strict {
            versification::map_strict(slot, self.catalog)
        } else {
            versification::map(slot, self.catalog)
        };
        match mapped {
            Ok(reference) => SlotOutcome::Decoded(DecodedRecord { slot, reference, text }),
            Err(_) => {
                debug!("Skipping slot {}: outside the catalog's addressable range", slot);
                SlotOutcome::OutOfRange(slot)
            }
        }
    }

    fn fetch_text(&mut self, entry: &IndexRecord) -> Result<String, RecordError> {
        content::read_payload_into(&mut *self.blob, entry, &mut self.raw)?;
        content::decode_payload(&self.raw, entry, &self.options, &mut self.inflated)
    }
}

impl<'a, R: Read + Seek> Iterator for SlotIterator<'a, R> {
    type Item = SlotOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let (slot, entry) = self.entries.next()?;
        Some(self.decode_slot(slot, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}
