use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use cartesian_product;
use error::MalformedClaim;
use flags::MAX_CLAIM_ID;

/// Claim ids are positive; zero marks a cell nobody has claimed.
pub type ClaimId = usize;

/// One elf's request for a rectangle of fabric. `x` is the distance from the
/// left edge, `y` from the top.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Claim {
    pub id: ClaimId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Claim {
    /// One past the rightmost column this claim covers, or `None` if that
    /// doesn't fit in a `usize`.
    pub fn right(&self) -> Option<usize> {
        self.x.checked_add(self.width)
    }

    /// One past the bottom row this claim covers.
    pub fn bottom(&self) -> Option<usize> {
        self.y.checked_add(self.height)
    }

    /// The columns this claim covers. A claim running off the end of `usize`
    /// is cut short there.
    pub fn columns(&self) -> Range<usize> {
        self.x..self.x.saturating_add(self.width)
    }

    pub fn rows(&self) -> Range<usize> {
        self.y..self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Every `(row, column)` this claim covers, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item=(usize, usize)> {
        cartesian_product(self.rows(), self.columns())
    }
}

impl FromStr for Claim {
    type Err = MalformedClaim;

    /// Parse a line like `#1 @ 35,93: 11x13`.
    fn from_str(s: &str) -> Result<Claim, MalformedClaim> {
        lazy_static! {
            static ref CLAIM: Regex =
                Regex::new(r"^#([0-9]+) @ ([0-9]+),([0-9]+): ([0-9]+)x([0-9]+)$").unwrap();
        }

        let line = s.trim_end();
        let caps = CLAIM
            .captures(line)
            .ok_or_else(|| MalformedClaim::new(s, "expected `#<id> @ <x>,<y>: <w>x<h>`"))?;
        let field = |i: usize| {
            usize::from_str(&caps[i]).map_err(|_| MalformedClaim::new(s, "number too large"))
        };

        let claim = Claim {
            id: field(1)?,
            x: field(2)?,
            y: field(3)?,
            width: field(4)?,
            height: field(5)?,
        };
        if claim.id == 0 {
            return Err(MalformedClaim::new(s, "claim id 0 is reserved"));
        }
        if claim.id > MAX_CLAIM_ID {
            return Err(MalformedClaim::new(s, "claim id too large"));
        }
        if claim.right().is_none() || claim.bottom().is_none() {
            return Err(MalformedClaim::new(s, "claim extends past any fabric"));
        }

        Ok(claim)
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "#{} @ {},{}: {}x{}", self.id, self.x, self.y, self.width, self.height)
    }
}

#[test]
fn test_claim_fromstr() {
    assert_eq!(Claim::from_str("#3 @ 5,5: 2x2"),
               Ok(Claim { id: 3, x: 5, y: 5, width: 2, height: 2 }));
    assert_eq!(Claim::from_str("#1 @ 35,93: 11x13\r"),
               Ok(Claim { id: 1, x: 35, y: 93, width: 11, height: 13 }));
    assert_eq!(Claim::from_str("#1295 @ 0,0: 0x7"),
               Ok(Claim { id: 1295, x: 0, y: 0, width: 0, height: 7 }));

    assert!(Claim::from_str("").is_err());
    assert!(Claim::from_str("#3 @ 5,5").is_err());
    assert!(Claim::from_str("#3 @ 5,5: 2x").is_err());
    assert!(Claim::from_str("3 @ 5,5: 2x2").is_err());
    assert!(Claim::from_str("#3 @ -5,5: 2x2").is_err());
    assert!(Claim::from_str("#3 @ 5,5: 2x2 and more").is_err());
    assert!(Claim::from_str(" #3 @ 5,5: 2x2").is_err());
}

#[test]
fn test_claim_rejects() {
    let err = Claim::from_str("#0 @ 5,5: 2x2").unwrap_err();
    assert_eq!(err.reason, "claim id 0 is reserved");
    assert_eq!(err.text, "#0 @ 5,5: 2x2");

    let err = Claim::from_str("#1 @ 5,5: 99999999999999999999999x2").unwrap_err();
    assert_eq!(err.reason, "number too large");

    let huge = format!("#1 @ {},0: 1x1", usize::max_value());
    let err = Claim::from_str(&huge).unwrap_err();
    assert_eq!(err.reason, "claim extends past any fabric");

    let huge = format!("#{} @ 0,0: 1x1", usize::max_value());
    let err = Claim::from_str(&huge).unwrap_err();
    assert_eq!(err.reason, "claim id too large");
    let err = Claim::from_str(&format!("#{} @ 0,0: 1x1", MAX_CLAIM_ID + 1)).unwrap_err();
    assert_eq!(err.reason, "claim id too large");
    assert!(Claim::from_str(&format!("#{} @ 0,0: 1x1", MAX_CLAIM_ID)).is_ok());
}

#[test]
fn test_claim_display() {
    let claim = Claim::from_str("#3 @ 5,5: 2x2").unwrap();
    assert_eq!(claim.to_string(), "#3 @ 5,5: 2x2");
    assert_eq!(Claim::from_str(&claim.to_string()), Ok(claim));

    let claim = Claim { id: 123, x: 3, y: 2, width: 5, height: 4 };
    assert_eq!(Claim::from_str(&claim.to_string()), Ok(claim));
}

#[test]
fn test_claim_cells() {
    let claim = Claim { id: 9, x: 3, y: 2, width: 2, height: 3 };
    assert_eq!(claim.right(), Some(5));
    assert_eq!(claim.bottom(), Some(5));
    assert_eq!(claim.area(), 6);
    assert_eq!(claim.cells().collect::<Vec<_>>(),
               vec![(2, 3), (2, 4), (3, 3), (3, 4), (4, 3), (4, 4)]);

    let empty = Claim { id: 10, x: 3, y: 2, width: 0, height: 3 };
    assert_eq!(empty.cells().count(), 0);

    // Built by hand, past the end of `usize`.
    let max = usize::max_value();
    let edge = Claim { id: 11, x: max - 1, y: max, width: 5, height: 5 };
    assert_eq!(edge.right(), None);
    assert_eq!(edge.columns(), max - 1..max);
    assert_eq!(edge.rows(), max..max);
    assert_eq!(edge.cells().count(), 0);
    assert_eq!(edge.area(), 25);
    assert_eq!(Claim { id: 12, x: 0, y: 0, width: max, height: 2 }.area(), max);
}
