use std::ops::{Bound, RangeBounds};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A discrete classification of the viewport width, ordered from the
/// narrowest to the widest layout.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Tier {
    Mobile,
    Tablet,
    Desktop,
    WideDesktop,
    UltraWide,
    SuperUltraWide,
    ExtremeWide,
}

impl Tier {
    pub const ALL: [Tier; Tier::COUNT] = [
        Tier::Mobile,
        Tier::Tablet,
        Tier::Desktop,
        Tier::WideDesktop,
        Tier::UltraWide,
        Tier::SuperUltraWide,
        Tier::ExtremeWide,
    ];

    /// Position of the tier in [`Tier::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn set(self) -> TierSet {
        TierSet::from_bits_retain(1 << self as u8)
    }

    pub fn next(self) -> Option<Tier> {
        Tier::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Tier> {
        self.index().checked_sub(1).map(|i| Tier::ALL[i])
    }
}

bitflags! {
    /// A set of tiers, used to decide whether something renders at the
    /// current tier.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[must_use]
    pub struct TierSet: u8 {
        const MOBILE = 1;
        const TABLET = 1 << 1;
        const DESKTOP = 1 << 2;
        const WIDE_DESKTOP = 1 << 3;
        const ULTRA_WIDE = 1 << 4;
        const SUPER_ULTRA_WIDE = 1 << 5;
        const EXTREME_WIDE = 1 << 6;
    }
}

impl TierSet {
    pub const fn not(set: TierSet) -> TierSet {
        TierSet::all().difference(set)
    }

    pub const fn contains_tier(&self, tier: Tier) -> bool {
        self.contains(tier.set())
    }

    /// Tiers in the set, narrowest first.
    pub fn tiers(&self) -> Vec<Tier> {
        Tier::ALL
            .into_iter()
            .filter(|tier| self.contains_tier(*tier))
            .collect()
    }
}

impl From<Tier> for TierSet {
    fn from(tier: Tier) -> Self {
        tier.set()
    }
}

/// Builds the set of every tier inside `range`.
///
/// `tier_range(Tier::Tablet..Tier::UltraWide)` covers tablet up to and
/// including wide-desktop. An empty range yields an empty set.
pub fn tier_range<R: RangeBounds<Tier>>(range: R) -> TierSet {
    let start = match range.start_bound() {
        Bound::Included(tier) => Some(*tier),
        Bound::Excluded(tier) => tier.next(),
        Bound::Unbounded => Some(Tier::Mobile),
    };
    let end = match range.end_bound() {
        Bound::Included(tier) => Some(*tier),
        Bound::Excluded(tier) => tier.prev(),
        Bound::Unbounded => Some(Tier::ExtremeWide),
    };
    let (Some(start), Some(end)) = (start, end) else {
        return TierSet::empty();
    };

    Tier::ALL[start.index()..]
        .iter()
        .take_while(|tier| **tier <= end)
        .fold(TierSet::empty(), |set, tier| set | tier.set())
}
