//! Various types related to trust screening.

use derive_more::Display;

/// The vertex id type.
///
/// Account tokens are interned into dense ids when the index is built.
pub type VId = u32;

/// The verdict written for one predicate.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Trust {
    #[display(fmt = "trusted")]
    Trusted,
    #[display(fmt = "unverified")]
    Unverified,
}

impl From<bool> for Trust {
    fn from(trusted: bool) -> Self {
        if trusted {
            Trust::Trusted
        } else {
            Trust::Unverified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_display() {
        assert_eq!(Trust::from(true).to_string(), "trusted");
        assert_eq!(Trust::from(false).to_string(), "unverified");
    }
}
