//! Slot-number to reference mapping.
//!
//! Slots are laid out linearly: every work owns a block of
//! `subdivisions_per_work * units_per_subdivision` slots, regardless of how
//! many subdivisions it really has. Within a block, slots run through units
//! first, then subdivisions.
//!
//! ```text
//! slot = work_ordinal * (S * U) + (subdivision - 1) * U + (unit - 1)
//! ```
//!
//! This is an approximation of the real versification and may attribute text
//! to a subdivision the work does not have; [`map_strict`] filters those out.

use crate::sword::types::catalog::WorkCatalog;
use crate::sword::types::error::{Result, SwordError};
use crate::sword::types::models::Reference;

/// Maps `slot` to its reference under the linear layout.
///
/// # Errors
/// Returns [`SwordError::OutOfRange`] if the slot lies past the last work.
pub fn map(slot: usize, catalog: &WorkCatalog) -> Result<Reference> {
    let per_work = catalog.slots_per_work();
    let units = catalog.units_per_subdivision() as u64;
    let slot_u64 = slot as u64;

    let work_ordinal = slot_u64 / per_work;
    let work = catalog
        .works()
        .get(work_ordinal as usize)
        .ok_or(SwordError::OutOfRange { slot })?;

    let remainder = slot_u64 % per_work;
    Ok(Reference {
        work: work.code.clone(),
        subdivision: (remainder / units) as u32 + 1,
        unit: (remainder % units) as u32 + 1,
    })
}

/// Like [`map`], but also rejects subdivisions beyond the work's real count.
pub fn map_strict(slot: usize, catalog: &WorkCatalog) -> Result<Reference> {
    let reference = map(slot, catalog)?;
    let work_ordinal = (slot as u64 / catalog.slots_per_work()) as usize;
    match catalog.works().get(work_ordinal) {
        Some(work) if reference.subdivision <= work.subdivision_count => Ok(reference),
        _ => Err(SwordError::OutOfRange { slot }),
    }
}
