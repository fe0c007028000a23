use ndarray::{Array2, Axis};
use std::fmt;

use claim::{Claim, ClaimId};
use error::ClaimError;
use flags::{ClaimFlags, MAX_CLAIM_ID};

/// The largest fabric side we'll allocate.
pub const MAX_DIMENSION: usize = 4096;

/// One square inch of fabric.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    /// How many claims cover this cell.
    pub claims: usize,
    /// The last claim plotted over this cell, or zero if none has been.
    pub owner: ClaimId,
}

/// A square sheet of fabric, indexed by `[row, column]`, that claims are
/// plotted onto.
#[derive(Clone, PartialEq)]
pub struct Fabric(Array2<Cell>);

impl Fabric {
    /// Return a blank `dimension` by `dimension` fabric. Panics if
    /// `dimension` exceeds `MAX_DIMENSION`.
    pub fn new(dimension: usize) -> Fabric {
        assert!(dimension <= MAX_DIMENSION, "fabric too large: {}", dimension);
        Fabric(Array2::from_elem((dimension, dimension), Cell::default()))
    }

    pub fn dimension(&self) -> usize {
        self.0.len_of(Axis(0))
    }

    /// Return the cell at column `x`, row `y`, or `None` if that's off the
    /// edge.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.0.get((y, x))
    }

    /// Return true if `claim` lies entirely on this fabric.
    pub fn contains(&self, claim: &Claim) -> bool {
        let dimension = self.dimension();
        match (claim.right(), claim.bottom()) {
            (Some(right), Some(bottom)) => right <= dimension && bottom <= dimension,
            _ => false,
        }
    }

    /// Plot `claim` onto the fabric, recording in `flags` which claims now
    /// share cells.
    ///
    /// If `claim`'s id is zero or too large, it doesn't fit, or its id has
    /// already been plotted, return an error and leave both the fabric and
    /// `flags` untouched.
    pub fn plot(&mut self, claim: &Claim, flags: &mut ClaimFlags) -> Result<(), ClaimError> {
        if claim.id == 0 || claim.id > MAX_CLAIM_ID {
            return Err(ClaimError::BadClaimId {
                id: claim.id,
                limit: MAX_CLAIM_ID,
            });
        }
        if !self.contains(claim) {
            return Err(ClaimError::OutOfBounds {
                id: claim.id,
                dimension: self.dimension(),
            });
        }
        if !flags.enroll(claim.id) {
            return Err(ClaimError::DuplicateClaim { id: claim.id });
        }

        let mut contested = 0;
        for (row, col) in claim.cells() {
            let cell = &mut self.0[[row, col]];
            let previous = cell.owner;
            cell.claims += 1;
            cell.owner = claim.id;

            if previous != 0 {
                flags.mark_overlapping(previous);
                flags.mark_overlapping(claim.id);
                contested += 1;
            }
        }

        trace!("plotted {}: {} of {} cells already claimed", claim, contested, claim.area());
        Ok(())
    }

    /// Return the number of cells covered by more than one claim.
    pub fn overlap_count(&self) -> usize {
        self.0.iter().filter(|cell| cell.claims > 1).count()
    }

    /// Return the number of cells covered by at least one claim.
    pub fn claimed_count(&self) -> usize {
        self.0.iter().filter(|cell| cell.claims > 0).count()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.claims {
            0 => f.write_str("."),
            n @ 1..=9 => write!(f, "{}", n),
            _ => f.write_str("+"),
        }
    }
}

impl fmt::Display for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for row in self.0.genrows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "Fabric({}x{})", self.dimension(), self.dimension())?;
        <Fabric as fmt::Display>::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use flags::MAX_CLAIM_ID;
    use std::str::FromStr;

    fn claim(s: &str) -> Claim {
        Claim::from_str(s).unwrap()
    }

    #[test]
    fn plot_counts_coverage() {
        let mut fabric = Fabric::new(8);
        let mut flags = ClaimFlags::new();

        fabric.plot(&claim("#1 @ 0,0: 3x3"), &mut flags).unwrap();
        fabric.plot(&claim("#2 @ 1,1: 3x3"), &mut flags).unwrap();
        fabric.plot(&claim("#3 @ 2,2: 3x3"), &mut flags).unwrap();

        assert_eq!(fabric.get(0, 0), Some(&Cell { claims: 1, owner: 1 }));
        assert_eq!(fabric.get(1, 1), Some(&Cell { claims: 2, owner: 2 }));
        assert_eq!(fabric.get(2, 2), Some(&Cell { claims: 3, owner: 3 }));
        assert_eq!(fabric.get(4, 4), Some(&Cell { claims: 1, owner: 3 }));
        assert_eq!(fabric.get(7, 7), Some(&Cell::default()));
        assert_eq!(fabric.get(8, 0), None);

        // Every cell's count is exactly the number of claims over it.
        let claims = [claim("#1 @ 0,0: 3x3"), claim("#2 @ 1,1: 3x3"), claim("#3 @ 2,2: 3x3")];
        for y in 0..8 {
            for x in 0..8 {
                let covering = claims
                    .iter()
                    .filter(|c| c.columns().contains(&x) && c.rows().contains(&y))
                    .count();
                assert_eq!(fabric.get(x, y).unwrap().claims, covering);
            }
        }

        assert_eq!(fabric.overlap_count(), 7);
        assert_eq!(fabric.claimed_count(), 9 + 5 + 5);
        assert_eq!(flags.solo(), None);
    }

    #[test]
    fn three_way_overlap_flags_everyone() {
        // The last claim only sees the second as the cell's owner; the first
        // must already have been flagged when the second arrived.
        let mut fabric = Fabric::new(4);
        let mut flags = ClaimFlags::new();
        fabric.plot(&claim("#1 @ 0,0: 1x1"), &mut flags).unwrap();
        fabric.plot(&claim("#2 @ 0,0: 1x1"), &mut flags).unwrap();
        fabric.plot(&claim("#3 @ 0,0: 1x1"), &mut flags).unwrap();
        fabric.plot(&claim("#4 @ 3,3: 1x1"), &mut flags).unwrap();

        assert_eq!(fabric.overlap_count(), 1);
        assert_eq!(flags.solos().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn first_claim_flagged_by_later_one() {
        let mut fabric = Fabric::new(10);
        let mut flags = ClaimFlags::new();
        fabric.plot(&claim("#5 @ 0,0: 5x5"), &mut flags).unwrap();
        assert_eq!(flags.solo(), Some(5));

        // Touches only the last cell #5 covers.
        fabric.plot(&claim("#6 @ 4,4: 5x5"), &mut flags).unwrap();
        assert_eq!(flags.solo(), None);
        assert_eq!(fabric.overlap_count(), 1);
    }

    #[test]
    fn plot_at_edge() {
        let mut fabric = Fabric::new(1000);
        let mut flags = ClaimFlags::new();

        fabric.plot(&claim("#1 @ 999,999: 1x1"), &mut flags).unwrap();
        assert_eq!(fabric.claimed_count(), 1);
        assert_eq!(fabric.get(999, 999), Some(&Cell { claims: 1, owner: 1 }));

        match fabric.plot(&claim("#2 @ 999,999: 2x1"), &mut flags) {
            Err(ClaimError::OutOfBounds { id: 2, dimension: 1000 }) => (),
            other => panic!("expected out-of-bounds error, got {:?}", other),
        }
        match fabric.plot(&claim("#3 @ 999,999: 2x2"), &mut flags) {
            Err(ClaimError::OutOfBounds { id: 3, .. }) => (),
            other => panic!("expected out-of-bounds error, got {:?}", other),
        }
        match fabric.plot(&claim("#4 @ 0,999: 1x2"), &mut flags) {
            Err(ClaimError::OutOfBounds { id: 4, .. }) => (),
            other => panic!("expected out-of-bounds error, got {:?}", other),
        }

        // Rejected claims leave no trace.
        assert_eq!(fabric.claimed_count(), 1);
        assert_eq!(flags.enrolled(), 1);
        assert_eq!(flags.solo(), Some(1));
    }

    #[test]
    fn plot_bad_id() {
        let mut fabric = Fabric::new(10);
        let mut flags = ClaimFlags::new();
        for &id in &[0, MAX_CLAIM_ID + 1, usize::max_value()] {
            let claim = Claim { id, x: 0, y: 0, width: 1, height: 1 };
            match fabric.plot(&claim, &mut flags) {
                Err(ClaimError::BadClaimId { id: bad, limit: MAX_CLAIM_ID }) => assert_eq!(bad, id),
                other => panic!("expected bad claim id error, got {:?}", other),
            }
        }
        assert_eq!(fabric.claimed_count(), 0);
        assert_eq!(flags.enrolled(), 0);
    }

    #[test]
    fn plot_duplicate_id() {
        let mut fabric = Fabric::new(10);
        let mut flags = ClaimFlags::new();
        fabric.plot(&claim("#1 @ 0,0: 2x2"), &mut flags).unwrap();
        match fabric.plot(&claim("#1 @ 5,5: 2x2"), &mut flags) {
            Err(ClaimError::DuplicateClaim { id: 1 }) => (),
            other => panic!("expected duplicate claim error, got {:?}", other),
        }
        assert_eq!(fabric.claimed_count(), 4);
    }

    #[test]
    fn zero_area_claim_is_solo() {
        let mut fabric = Fabric::new(3);
        let mut flags = ClaimFlags::new();
        fabric.plot(&claim("#1 @ 0,0: 3x3"), &mut flags).unwrap();
        fabric.plot(&claim("#2 @ 1,1: 0x2"), &mut flags).unwrap();
        assert_eq!(fabric.claimed_count(), 9);
        assert_eq!(flags.solos().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn display() {
        let mut fabric = Fabric::new(4);
        let mut flags = ClaimFlags::new();
        fabric.plot(&claim("#1 @ 0,0: 2x2"), &mut flags).unwrap();
        fabric.plot(&claim("#2 @ 1,1: 2x2"), &mut flags).unwrap();
        assert_eq!(fabric.to_string(), "11..\n121.\n.11.\n....\n");
    }
}
