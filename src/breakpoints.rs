use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{error::BreakpointError, tier::Tier};

/// Returns the tier whose threshold is the largest one not above `width`.
///
/// Widths below every threshold resolve to the lowest-threshold tier. When two
/// entries share a threshold the one declared last wins. Only an empty slice
/// yields `None`.
pub fn classify(entries: &[(Tier, u32)], width: u32) -> Option<Tier> {
    let mut best: Option<(Tier, u32)> = None;
    let mut lowest: Option<(Tier, u32)> = None;

    for &(tier, threshold) in entries {
        if threshold <= width && best.is_none_or(|(_, t)| threshold >= t) {
            best = Some((tier, threshold));
        }
        if lowest.is_none_or(|(_, t)| threshold <= t) {
            lowest = Some((tier, threshold));
        }
    }

    best.or(lowest).map(|(tier, _)| tier)
}

/// Width breakpoints in pixels, in declaration order.
///
/// Thresholds are strictly increasing, so every width maps to exactly one
/// tier and wider viewports never map to a narrower tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<Tier, u32>",
    into = "IndexMap<Tier, u32>"
)]
pub struct BreakpointTable {
    entries: SmallVec<[(Tier, u32); Tier::ALL.len()]>,
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            entries: SmallVec::from_buf([
                (Tier::Mobile, 0),
                (Tier::Tablet, 768),
                (Tier::Desktop, 1024),
                (Tier::WideDesktop, 1440),
                (Tier::UltraWide, 1920),
                (Tier::SuperUltraWide, 2560),
                (Tier::ExtremeWide, 3440),
            ]),
        }
    }
}

impl BreakpointTable {
    pub fn new(entries: impl IntoIterator<Item = (Tier, u32)>) -> Result<Self, BreakpointError> {
        let entries: SmallVec<[(Tier, u32); Tier::ALL.len()]> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(BreakpointError::Empty);
        }

        for (i, &(tier, threshold)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(seen, _)| *seen == tier) {
                return Err(BreakpointError::DuplicateTier(tier));
            }
            if let Some(&(previous_tier, previous)) = i.checked_sub(1).map(|p| &entries[p])
                && threshold <= previous
            {
                return Err(BreakpointError::NonIncreasing {
                    tier,
                    threshold,
                    previous_tier,
                    previous,
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn classify(&self, width: u32) -> Tier {
        classify(&self.entries, width).unwrap_or(self.lowest())
    }

    /// The tier every width below the first threshold falls back to.
    pub fn lowest(&self) -> Tier {
        self.entries.first().map_or(Tier::Mobile, |(tier, _)| *tier)
    }

    pub fn threshold(&self, tier: Tier) -> Option<u32> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, threshold)| *threshold)
    }

    pub fn entries(&self) -> &[(Tier, u32)] {
        &self.entries
    }

    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.entries.iter().map(|(tier, _)| *tier)
    }
}

impl TryFrom<IndexMap<Tier, u32>> for BreakpointTable {
    type Error = BreakpointError;

    fn try_from(map: IndexMap<Tier, u32>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<BreakpointTable> for IndexMap<Tier, u32> {
    fn from(table: BreakpointTable) -> Self {
        table.entries.into_iter().collect()
    }
}
