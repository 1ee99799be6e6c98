use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identity anchor number owning a set of devices.
///
/// Anchors are unbounded unsigned integers, so they are kept as a `BigUint`
/// and travel as decimal strings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor(#[serde_as(as = "DisplayFromStr")] BigUint);

impl Anchor {
    pub fn new(number: BigUint) -> Self {
        Self(number)
    }

    pub fn number(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl Display for Anchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Anchor {
    fn from(number: u64) -> Self {
        Self(BigUint::from(number))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid anchor number: {0:?}")]
pub struct ParseAnchorError(pub String);

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAnchorError(s.to_string()));
        }
        BigUint::from_str(trimmed)
            .map(Self)
            .map_err(|_| ParseAnchorError(s.to_string()))
    }
}
