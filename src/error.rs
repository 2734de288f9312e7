use thiserror::Error;

use crate::tier::Tier;

/// A breakpoint table that cannot classify widths unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointError {
    #[error("breakpoint table has no entries")]
    Empty,
    #[error("tier `{0}` is declared more than once")]
    DuplicateTier(Tier),
    #[error(
        "threshold {threshold}px for `{tier}` must be greater than {previous}px of `{previous_tier}`"
    )]
    NonIncreasing {
        tier: Tier,
        threshold: u32,
        previous_tier: Tier,
        previous: u32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid layout config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Breakpoints(#[from] BreakpointError),
    #[error("max_grid_columns must be at least 1")]
    ZeroGridColumns,
}
