//! Per-claim overlap bookkeeping.
//!
//! A cell only remembers the last claim to touch it, so a cell claimed three
//! times can't tell us afterwards who the first two were. Instead, every time
//! a claim lands on an already-owned cell, both it and the cell's previous
//! owner are flagged here, and the flags are what the solo search reads.

use itertools::Itertools;
use std::cmp::min;

use claim::ClaimId;

/// The largest claim id the table will hold.
pub const MAX_CLAIM_ID: ClaimId = 1 << 24;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// No claim with this id has been plotted.
    Absent,
    /// Plotted, and nothing has landed on any of its cells.
    Clear,
    /// Shares at least one cell with some other claim.
    Overlapping,
}

impl Default for Status {
    fn default() -> Status {
        Status::Absent
    }
}

/// A dense table from claim id to `Status`. Index zero is the "unclaimed"
/// sentinel and always stays `Absent`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClaimFlags {
    status: Vec<Status>,
}

impl ClaimFlags {
    pub fn new() -> ClaimFlags {
        ClaimFlags::default()
    }

    /// Return an empty table with room for ids up to and including `max_id`,
    /// or `MAX_CLAIM_ID` if that's smaller.
    pub fn with_max_id(max_id: ClaimId) -> ClaimFlags {
        ClaimFlags {
            status: vec![Status::Absent; min(max_id, MAX_CLAIM_ID) + 1],
        }
    }

    /// Callers must check `id` against `MAX_CLAIM_ID` first.
    fn entry(&mut self, id: ClaimId) -> &mut Status {
        assert!(id <= MAX_CLAIM_ID, "claim id {} out of range", id);
        if id >= self.status.len() {
            self.status.resize(id + 1, Status::Absent);
        }
        &mut self.status[id]
    }

    pub fn get(&self, id: ClaimId) -> Status {
        self.status.get(id).cloned().unwrap_or_default()
    }

    /// Record that `id` has been plotted. Return false if it already was.
    pub(crate) fn enroll(&mut self, id: ClaimId) -> bool {
        debug_assert!(id != 0);
        let status = self.entry(id);
        if *status != Status::Absent {
            return false;
        }
        *status = Status::Clear;
        true
    }

    /// Flag `id` as sharing a cell with some other claim. Flags are never
    /// cleared.
    pub(crate) fn mark_overlapping(&mut self, id: ClaimId) {
        debug_assert!(id != 0);
        *self.entry(id) = Status::Overlapping;
    }

    /// Return every plotted claim id that overlaps nothing, in increasing
    /// order.
    pub fn solos<'a>(&'a self) -> impl Iterator<Item=ClaimId> + 'a {
        self.status.iter().positions(|&status| status == Status::Clear)
    }

    /// Return the smallest plotted claim id that overlaps nothing, if any.
    pub fn solo(&self) -> Option<ClaimId> {
        self.solos().next()
    }

    /// Return the number of plotted claims.
    pub fn enrolled(&self) -> usize {
        self.status.iter().filter(|&&status| status != Status::Absent).count()
    }
}

#[test]
fn test_flags() {
    let mut flags = ClaimFlags::with_max_id(4);
    assert_eq!(flags.solo(), None);

    assert!(flags.enroll(2));
    assert!(flags.enroll(4));
    assert!(!flags.enroll(2));
    assert_eq!(flags.get(1), Status::Absent);
    assert_eq!(flags.get(2), Status::Clear);
    assert_eq!(flags.get(1000), Status::Absent);
    assert_eq!(flags.solos().collect::<Vec<_>>(), vec![2, 4]);

    flags.mark_overlapping(2);
    assert_eq!(flags.solo(), Some(4));
    flags.mark_overlapping(4);
    assert_eq!(flags.solo(), None);
    assert_eq!(flags.enrolled(), 2);
}

#[test]
fn test_flags_capped() {
    let flags = ClaimFlags::with_max_id(usize::max_value());
    assert_eq!(flags.status.len(), MAX_CLAIM_ID + 1);
    assert_eq!(flags.get(usize::max_value()), Status::Absent);
}

#[test]
fn test_flags_grow() {
    let mut flags = ClaimFlags::new();
    assert!(flags.enroll(17));
    assert_eq!(flags.solo(), Some(17));

    assert!(flags.enroll(30));
    flags.mark_overlapping(30);
    assert!(!flags.enroll(30));
    assert_eq!(flags.get(30), Status::Overlapping);
    assert_eq!(flags.solos().collect::<Vec<_>>(), vec![17]);
    assert_eq!(flags.enrolled(), 2);
}
