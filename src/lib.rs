//! Plotting rectangular claims onto a shared square of fabric, and asking which
//! parts of it are contested.

#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate ndarray;
extern crate regex;

mod claim;
mod error;
mod fabric;
mod flags;
mod survey;

pub use claim::{Claim, ClaimId};
pub use error::{ClaimError, MalformedClaim};
pub use fabric::{Cell, Fabric, MAX_DIMENSION};
pub use flags::{ClaimFlags, Status, MAX_CLAIM_ID};
pub use survey::{read_claims, survey, FabricSize, Survey};

/// Return every pairing of an element of `a` with an element of `b`, with `a`
/// varying slowest.
pub fn cartesian_product<A, B>(a: A, b: B) -> impl Iterator<Item=(A::Item, B::Item)>
where A: IntoIterator,
      B: IntoIterator,
      A::Item: Clone,
      B::IntoIter: Clone,
{
    let a = a.into_iter();
    let b = b.into_iter();
    a.flat_map(move |i| b.clone().map(move |j| (i.clone(), j)))
}

#[test]
fn test_cartesian_product() {
    let pairs: Vec<_> = cartesian_product(0..2, 5..8).collect();
    assert_eq!(pairs, vec![(0, 5), (0, 6), (0, 7), (1, 5), (1, 6), (1, 7)]);
    assert_eq!(cartesian_product(0..0, 0..3).count(), 0);
    assert_eq!(cartesian_product(0..3, 0..0).count(), 0);
}
