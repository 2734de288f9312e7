use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tier::Tier;

/// A table of per-tier values, e.g. column counts or paddings.
///
/// Tiers without an entry are resolved through
/// [`use_responsive_value`](crate::use_responsive_value).
#[derive(Clone, PartialEq, Eq)]
pub struct ResponsiveValues<T> {
    values: [Option<T>; Tier::ALL.len()],
}

impl<T> Default for ResponsiveValues<T> {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|_| None),
        }
    }
}

impl<T> ResponsiveValues<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, tier: Tier, value: T) -> Self {
        self.insert(tier, value);
        self
    }

    pub fn insert(&mut self, tier: Tier, value: T) -> Option<T> {
        self.values[tier.index()].replace(value)
    }

    pub fn get(&self, tier: Tier) -> Option<&T> {
        self.values[tier.index()].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL
            .into_iter()
            .zip(&self.values)
            .filter_map(|(tier, value)| value.as_ref().map(|value| (tier, value)))
    }
}

impl<T> FromIterator<(Tier, T)> for ResponsiveValues<T> {
    fn from_iter<I: IntoIterator<Item = (Tier, T)>>(iter: I) -> Self {
        let mut values = Self::default();
        for (tier, value) in iter {
            values.insert(tier, value);
        }
        values
    }
}

impl<T: fmt::Debug> fmt::Debug for ResponsiveValues<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T: Serialize> Serialize for ResponsiveValues<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ResponsiveValues<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<Tier, T>::deserialize(deserializer).map(Self::from_iter)
    }
}
