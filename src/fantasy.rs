//! Fantasy Dota 2 scoring weights.
//!
//! The client only carries these values around for callers; nothing in the
//! crate scores matches with them. Keys ending in `_base` are base values,
//! all others are per-unit multipliers.

use crate::{OpenDotaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// Standard fantasy weights used when no overrides are given.
pub const FANTASY: &[(&str, f64)] = &[
    ("kills", 0.3),
    ("deaths", -0.3),
    ("deaths_base", 3.0),
    ("last_hits", 0.003),
    ("denies", 0.003),
    ("gold_per_min", 0.002),
    ("towers_killed", 1.0),
    ("roshans_killed", 1.0),
    ("teamfight_participation", 3.0),
    ("observers_placed", 0.5),
    ("camps_stacked", 0.5),
    ("rune_pickups", 0.25),
    ("firstblood_claimed", 4.0),
    ("stuns", 0.05),
];

/// A full set of fantasy weights keyed by stat name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyWeights(BTreeMap<String, f64>);

impl Default for FantasyWeights {
    fn default() -> Self {
        Self(
            FANTASY
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }
}

impl FantasyWeights {
    /// Start from the standard weights and apply `overrides`.
    ///
    /// Every override key must already exist in [`FANTASY`].
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Result<Self> {
        let mut weights = Self::default();
        for (key, value) in overrides {
            match weights.0.get_mut(key) {
                Some(slot) => *slot = *value,
                None => {
                    return Err(OpenDotaError::InvalidFantasyKey { key: key.clone() });
                }
            }
        }
        Ok(weights)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Weights whose key ends in `_base`.
    pub fn base_values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0
            .iter()
            .filter(|(k, _)| k.ends_with("_base"))
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// Weights used as multipliers (everything that isn't a base value).
    pub fn multipliers(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0
            .iter()
            .filter(|(k, _)| !k.ends_with("_base"))
            .map(|(k, v)| (k.as_str(), *v))
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.0
    }
}
