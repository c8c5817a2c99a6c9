//! Identifier types for encoded agent states.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Bit-packed state key produced by the state encoder.
///
/// Two different world situations may share a `StateId` when the active
/// layout ignores the fields that tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(u32);

impl StateId {
    /// Create a state identifier from its raw value.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus_agent::identifiers::StateId;
    ///
    /// let state = StateId::new(9);
    /// assert_eq!(state.value(), 9);
    /// ```
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StateId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(StateId)
            .map_err(|err| Error::InvalidParameter {
                name: "state id".to_string(),
                value: s.to_string(),
                reason: err.to_string(),
            })
    }
}
