//! The ordered table of works used to turn slot numbers into references.

use std::collections::HashSet;

use super::error::{Result, SwordError};

/// Units per subdivision assumed by the linear slot layout.
pub const DEFAULT_UNITS_PER_SUBDIVISION: u32 = 200;

/// Subdivisions reserved for every work by the linear slot layout.
pub const DEFAULT_SUBDIVISIONS_PER_WORK: u32 = 50;

/// KJV book order with chapter counts.
#[rustfmt::skip]
const KJV: &[(&str, u32)] = &[
    ("Gen", 50), ("Exod", 40), ("Lev", 27), ("Num", 36), ("Deut", 34),
    ("Josh", 24), ("Judg", 21), ("Ruth", 4), ("1Sam", 31), ("2Sam", 24),
    ("1Kgs", 22), ("2Kgs", 25), ("1Chr", 29), ("2Chr", 36), ("Ezra", 10),
    ("Neh", 13), ("Esth", 10), ("Job", 42), ("Ps", 150), ("Prov", 31),
    ("Eccl", 12), ("Song", 8), ("Isa", 66), ("Jer", 52), ("Lam", 5),
    ("Ezek", 48), ("Dan", 12), ("Hos", 14), ("Joel", 3), ("Amos", 9),
    ("Obad", 1), ("Jonah", 4), ("Mic", 7), ("Nah", 3), ("Hab", 3),
    ("Zeph", 3), ("Hag", 2), ("Zech", 14), ("Mal", 4),
    ("Matt", 28), ("Mark", 16), ("Luke", 24), ("John", 21), ("Acts", 28),
    ("Rom", 16), ("1Cor", 16), ("2Cor", 13), ("Gal", 6), ("Eph", 6),
    ("Phil", 4), ("Col", 4), ("1Thess", 5), ("2Thess", 3), ("1Tim", 6),
    ("2Tim", 4), ("Titus", 3), ("Phlm", 1), ("Heb", 13), ("Jas", 5),
    ("1Pet", 5), ("2Pet", 3), ("1John", 5), ("2John", 1), ("3John", 1),
    ("Jude", 1), ("Rev", 22),
];

/// A single work and the number of subdivisions it really has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkEntry {
    pub code: String,
    pub subdivision_count: u32,
}

/// Read-only, ordered catalog of works plus the fixed addressing capacities.
#[derive(Debug, Clone)]
pub struct WorkCatalog {
    works: Vec<WorkEntry>,
    units_per_subdivision: u32,
    subdivisions_per_work: u32,
}

impl WorkCatalog {
    /// Builds a catalog, validating that codes are unique and all counts positive.
    pub fn new(
        works: Vec<WorkEntry>,
        units_per_subdivision: u32,
        subdivisions_per_work: u32,
    ) -> Result<Self> {
        if units_per_subdivision == 0 || subdivisions_per_work == 0 {
            return Err(SwordError::Configuration(
                "catalog capacities must be positive".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(works.len());
        for work in &works {
            if work.subdivision_count == 0 {
                return Err(SwordError::Configuration(format!(
                    "work '{}' declares zero subdivisions",
                    work.code
                )));
            }
            if !seen.insert(work.code.as_str()) {
                return Err(SwordError::Configuration(format!(
                    "duplicate work code '{}' in catalog",
                    work.code
                )));
            }
        }

        Ok(Self {
            works,
            units_per_subdivision,
            subdivisions_per_work,
        })
    }

    /// The 66-book KJV catalog with the default 50 x 200 slot layout.
    pub fn kjv() -> Self {
        let works = KJV
            .iter()
            .map(|&(code, subdivision_count)| WorkEntry {
                code: code.to_string(),
                subdivision_count,
            })
            .collect();
        Self {
            works,
            units_per_subdivision: DEFAULT_UNITS_PER_SUBDIVISION,
            subdivisions_per_work: DEFAULT_SUBDIVISIONS_PER_WORK,
        }
    }

    pub fn works(&self) -> &[WorkEntry] {
        &self.works
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    pub fn units_per_subdivision(&self) -> u32 {
        self.units_per_subdivision
    }

    pub fn subdivisions_per_work(&self) -> u32 {
        self.subdivisions_per_work
    }

    /// Number of slots reserved for each work.
    pub fn slots_per_work(&self) -> u64 {
        self.subdivisions_per_work as u64 * self.units_per_subdivision as u64
    }

    /// Total number of slots that resolve to a reference.
    pub fn capacity(&self) -> u64 {
        self.slots_per_work() * self.works.len() as u64
    }
}
