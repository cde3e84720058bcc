//! ID types for OpenDota entities.

use crate::error::{OpenDotaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Dota 2 match IDs.
///
/// # Examples
///
/// ```rust
/// use opendota::MatchId;
///
/// let match_id = MatchId::new(8461956309);
/// assert_eq!(match_id.as_u64(), 8461956309);
/// assert_eq!(match_id.to_string(), "8461956309");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// 32-bit Steam account ID, as used by OpenDota's `players/{account_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HeroId(pub u32);

impl HeroId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

macro_rules! id_conversions {
    ($ty:ident, $inner:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $ty {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl FromStr for $ty {
            type Err = OpenDotaError;

            fn from_str(s: &str) -> Result<Self> {
                s.trim()
                    .parse()
                    .map(Self)
                    .map_err(|e| OpenDotaError::InvalidConfig {
                        message: format!("invalid {} '{}': {}", stringify!($ty), s, e),
                    })
            }
        }
    };
}

id_conversions!(MatchId, u64);
id_conversions!(AccountId, u64);
id_conversions!(HeroId, u32);
