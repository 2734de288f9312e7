//! # Floem Responsive
//!
//! Classifies the viewport into a discrete layout [`Tier`] and tells the rest
//! of the UI when that tier changes.
//!
//! ```rust
//! use floem_responsive::prelude::*;
//!
//! // The host forwards window resizes into the sampler.
//! let sampler = ManualSampler::with_size(375, 812);
//! let manager = LayoutManager::new(sampler.clone(), LayoutConfig::default());
//! assert_eq!(manager.current_layout(), Tier::Mobile);
//!
//! // A view binds on mount and drops the binding on unmount.
//! let binding = use_layout(&manager);
//! sampler.set_size((1280, 800));
//! assert!(binding.take_dirty());
//! assert_eq!(binding.tier(), Tier::Desktop);
//! assert_eq!(binding.grid_columns(&ResponsiveGrid::default()), 3);
//! ```
//!
//! ## Pieces
//!
//! - [`BreakpointTable`] maps widths to tiers. Thresholds are validated to be
//!   strictly increasing, so classification is total and monotonic.
//! - [`ViewportSampler`] reads the viewport. [`ManualSampler`] is fed by the
//!   host's event loop and [`HeadlessSampler`] stands in where there is no
//!   viewport at all.
//! - [`LayoutManager`] is the single owner of the current tier. It notifies
//!   subscribers only when the tier changes.
//! - [`use_layout`], [`use_responsive_value`] and [`use_responsive_grid`] are
//!   the consumer side.
//!
//! Everything here is single threaded and meant to live on the UI thread.

pub mod breakpoints;
pub mod config;
pub mod error;
pub mod hooks;
pub mod manager;
pub mod tier;
pub mod values;
pub mod viewport;

pub use breakpoints::{BreakpointTable, classify};
pub use config::{DEFAULT_MAX_GRID_COLUMNS, LayoutConfig};
pub use error::{BreakpointError, ConfigError};
pub use hooks::{
    LayoutBinding, ResponsiveGrid, use_layout, use_responsive_grid, use_responsive_value,
};
pub use manager::{LayoutManager, SubscriberId, Subscription};
pub use tier::{Tier, TierSet, tier_range};
pub use values::ResponsiveValues;
pub use viewport::{
    HeadlessSampler, ManualSampler, Orientation, SamplerSubscription, ViewportEvent,
    ViewportSampler, ViewportSize,
};

pub mod prelude {
    pub use crate::{
        BreakpointTable, LayoutBinding, LayoutConfig, LayoutManager, ManualSampler,
        ResponsiveGrid, ResponsiveValues, Subscription, Tier, TierSet, ViewportSampler,
        ViewportSize, tier_range, use_layout, use_responsive_grid, use_responsive_value,
    };
}
