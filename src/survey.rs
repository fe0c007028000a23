use std::cmp::max;
use std::io::BufRead;
use std::str::FromStr;

use claim::{Claim, ClaimId};
use error::ClaimError;
use fabric::{Fabric, MAX_DIMENSION};
use flags::ClaimFlags;

/// How big a sheet of fabric to plot claims on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FabricSize {
    /// A square with the given side. Claims that don't fit are errors.
    Fixed(usize),
    /// The smallest square that holds every claim. A claim that would need
    /// more than `MAX_DIMENSION` is out of bounds.
    Fit,
}

impl FabricSize {
    /// Return the side of the square to use for `claims`.
    pub fn dimension(self, claims: &[Claim]) -> Result<usize, ClaimError> {
        match self {
            FabricSize::Fixed(dimension) if dimension > MAX_DIMENSION => {
                Err(ClaimError::FabricTooLarge { dimension, limit: MAX_DIMENSION })
            }
            FabricSize::Fixed(dimension) => Ok(dimension),
            FabricSize::Fit => {
                let mut dimension = 0;
                for claim in claims {
                    match (claim.right(), claim.bottom()) {
                        (Some(right), Some(bottom))
                            if right <= MAX_DIMENSION && bottom <= MAX_DIMENSION =>
                        {
                            dimension = max(dimension, max(right, bottom));
                        }
                        _ => {
                            return Err(ClaimError::OutOfBounds {
                                id: claim.id,
                                dimension: MAX_DIMENSION,
                            });
                        }
                    }
                }
                Ok(dimension)
            }
        }
    }
}

/// Read one claim per line from `input`, skipping blank lines. `path` names
/// the input in error messages.
pub fn read_claims<R: BufRead>(input: R, path: &str) -> Result<Vec<Claim>, ClaimError> {
    let mut claims = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.map_err(|e| ClaimError::config(path, e))?;
        if line.trim().is_empty() {
            debug!("{}:{}: skipping blank line", path, i + 1);
            continue;
        }
        let claim = Claim::from_str(&line)
            .map_err(|cause| ClaimError::Parse { line: i + 1, cause })?;
        claims.push(claim);
    }
    Ok(claims)
}

/// The results of plotting a set of claims.
#[derive(Debug)]
pub struct Survey {
    /// The number of cells covered by more than one claim.
    pub overlaps: usize,
    /// The claim that shares no cells with any other, if there is one.
    pub solo: Option<ClaimId>,
    pub fabric: Fabric,
    pub flags: ClaimFlags,
}

/// Plot every claim in `claims` onto a fresh fabric of the given size.
pub fn survey(claims: &[Claim], size: FabricSize) -> Result<Survey, ClaimError> {
    let dimension = size.dimension(claims)?;
    let max_id = claims.iter().map(|c| c.id).max().unwrap_or(0);
    info!("plotting {} claims on a {}x{} fabric", claims.len(), dimension, dimension);

    let mut fabric = Fabric::new(dimension);
    let mut flags = ClaimFlags::with_max_id(max_id);
    for claim in claims {
        fabric.plot(claim, &mut flags)?;
    }

    let overlaps = fabric.overlap_count();
    let solo = flags.solo();
    debug!("{} of {} cells claimed, {} contested",
           fabric.claimed_count(), dimension * dimension, overlaps);

    Ok(Survey { overlaps, solo, fabric, flags })
}
