use std::io;

use claim::ClaimId;

/// Everything that can go wrong while surveying a set of claims. None of these
/// are recoverable: the survey is abandoned at the first one.
#[derive(Debug, Fail)]
pub enum ClaimError {
    #[fail(display = "line {}: {}", line, cause)]
    Parse {
        line: usize,
        #[cause]
        cause: MalformedClaim,
    },

    #[fail(display = "claim #{} extends past the edge of the {}x{} fabric", id, dimension, dimension)]
    OutOfBounds { id: ClaimId, dimension: usize },

    #[fail(display = "claim #{} appears more than once", id)]
    DuplicateClaim { id: ClaimId },

    #[fail(display = "claim id {} is not between 1 and {}", id, limit)]
    BadClaimId { id: ClaimId, limit: ClaimId },

    #[fail(display = "a {}x{} fabric is larger than the {}x{} limit", dimension, dimension, limit, limit)]
    FabricTooLarge { dimension: usize, limit: usize },

    #[fail(display = "can't read claims from {}: {}", path, cause)]
    Config {
        path: String,
        #[cause]
        cause: io::Error,
    },

    #[fail(display = "{}", message)]
    Usage { message: String },
}

/// A line of text that isn't a claim.
#[derive(Debug, Fail, PartialEq, Eq)]
#[fail(display = "{}: {:?}", reason, text)]
pub struct MalformedClaim {
    pub text: String,
    pub reason: &'static str,
}

impl MalformedClaim {
    pub(crate) fn new(text: &str, reason: &'static str) -> MalformedClaim {
        MalformedClaim {
            text: text.to_owned(),
            reason,
        }
    }
}

impl ClaimError {
    pub fn config(path: &str, cause: io::Error) -> ClaimError {
        ClaimError::Config {
            path: path.to_owned(),
            cause,
        }
    }

    pub fn usage<S: Into<String>>(message: S) -> ClaimError {
        ClaimError::Usage {
            message: message.into(),
        }
    }
}

#[test]
fn test_error_display() {
    let err = ClaimError::Parse {
        line: 7,
        cause: MalformedClaim::new("#7 @ 1,2", "expected `#<id> @ <x>,<y>: <w>x<h>`"),
    };
    assert_eq!(
        err.to_string(),
        "line 7: expected `#<id> @ <x>,<y>: <w>x<h>`: \"#7 @ 1,2\""
    );

    let err = ClaimError::OutOfBounds { id: 12, dimension: 10 };
    assert_eq!(err.to_string(), "claim #12 extends past the edge of the 10x10 fabric");

    let err = ClaimError::FabricTooLarge { dimension: 5000, limit: 4096 };
    assert_eq!(err.to_string(), "a 5000x5000 fabric is larger than the 4096x4096 limit");

    let err = ClaimError::config("no/such/file", io::Error::new(io::ErrorKind::NotFound, "gone"));
    assert_eq!(err.to_string(), "can't read claims from no/such/file: gone");
}
