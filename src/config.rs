use std::time::Duration;

use serde::Deserialize;

use crate::{
    breakpoints::BreakpointTable, error::ConfigError, tier::Tier, values::ResponsiveValues,
};

/// Upper bound applied by [`use_responsive_grid`](crate::use_responsive_grid)
/// unless configured otherwise.
pub const DEFAULT_MAX_GRID_COLUMNS: u16 = 8;

/// Settings the application's composition root hands to the
/// [`LayoutManager`](crate::LayoutManager).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub(crate) breakpoints: BreakpointTable,
    pub(crate) fallback_tier: Tier,
    pub(crate) debounce: Duration,
    pub(crate) columns: ResponsiveValues<u16>,
    pub(crate) max_grid_columns: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::default(),
            fallback_tier: Tier::Desktop,
            debounce: Duration::ZERO,
            columns: default_columns(),
            max_grid_columns: DEFAULT_MAX_GRID_COLUMNS,
        }
    }
}

fn default_columns() -> ResponsiveValues<u16> {
    ResponsiveValues::new()
        .with(Tier::Mobile, 1)
        .with(Tier::Tablet, 2)
        .with(Tier::Desktop, 3)
        .with(Tier::WideDesktop, 4)
        .with(Tier::UltraWide, 6)
        .with(Tier::SuperUltraWide, 8)
        .with(Tier::ExtremeWide, 10)
}

impl LayoutConfig {
    pub fn breakpoints(mut self, breakpoints: BreakpointTable) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Validates `entries` and uses them as the breakpoint table.
    pub fn breakpoint_entries(
        self,
        entries: impl IntoIterator<Item = (Tier, u32)>,
    ) -> Result<Self, ConfigError> {
        Ok(self.breakpoints(BreakpointTable::new(entries)?))
    }

    /// The tier reported before the first sample and whenever the viewport
    /// cannot be read.
    pub fn fallback_tier(mut self, tier: Tier) -> Self {
        self.fallback_tier = tier;
        self
    }

    /// Quiet period before a burst of viewport events is classified. Zero
    /// classifies every event immediately.
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn columns(mut self, columns: ResponsiveValues<u16>) -> Self {
        self.columns = columns;
        self
    }

    pub fn max_grid_columns(mut self, max: u16) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::ZeroGridColumns);
        }
        self.max_grid_columns = max;
        Ok(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: LayoutConfigFile = serde_json::from_str(json)?;
        file.try_into()
    }

    pub fn breakpoint_table(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    pub fn default_tier(&self) -> Tier {
        self.fallback_tier
    }

    pub fn debounce_period(&self) -> Duration {
        self.debounce
    }

    pub fn column_table(&self) -> &ResponsiveValues<u16> {
        &self.columns
    }

    pub fn grid_column_limit(&self) -> u16 {
        self.max_grid_columns
    }
}

/// On-disk form of [`LayoutConfig`]; every field is optional.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LayoutConfigFile {
    breakpoints: BreakpointTable,
    fallback_tier: Tier,
    debounce_ms: u64,
    columns: ResponsiveValues<u16>,
    max_grid_columns: u16,
}

impl Default for LayoutConfigFile {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self {
            breakpoints: config.breakpoints,
            fallback_tier: config.fallback_tier,
            debounce_ms: 0,
            columns: config.columns,
            max_grid_columns: config.max_grid_columns,
        }
    }
}

impl TryFrom<LayoutConfigFile> for LayoutConfig {
    type Error = ConfigError;

    fn try_from(file: LayoutConfigFile) -> Result<Self, Self::Error> {
        LayoutConfig::default()
            .breakpoints(file.breakpoints)
            .fallback_tier(file.fallback_tier)
            .debounce(Duration::from_millis(file.debounce_ms))
            .columns(file.columns)
            .max_grid_columns(file.max_grid_columns)
    }
}
