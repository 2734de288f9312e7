//! Per-consumer bindings to the [`LayoutManager`].
//!
//! A view calls [`use_layout`] when it mounts and keeps the returned
//! [`LayoutBinding`] for as long as it lives. The binding holds the view's
//! own copy of the tier and marks itself dirty when the manager reports a
//! change, so only that view re-renders. Dropping the binding on unmount
//! unregisters it from the manager.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    config::{DEFAULT_MAX_GRID_COLUMNS, LayoutConfig},
    manager::{LayoutManager, Subscription},
    tier::{Tier, TierSet},
    values::ResponsiveValues,
};

type RenderFn = Rc<dyn Fn(Tier)>;

struct BindingState {
    tier: Cell<Tier>,
    dirty: Cell<bool>,
    on_render: RefCell<Option<RenderFn>>,
}

impl BindingState {
    fn update(&self, tier: Tier) {
        self.tier.set(tier);
        self.dirty.set(true);
        let on_render = self.on_render.borrow().clone();
        if let Some(on_render) = on_render {
            on_render(tier);
        }
    }
}

/// One consumer's view of the layout tier.
#[must_use = "dropping a LayoutBinding unregisters it"]
pub struct LayoutBinding {
    state: Rc<BindingState>,
    subscription: Subscription,
}

/// Binds a consumer to `manager`: reads the current tier and subscribes to
/// changes until the binding is dropped.
pub fn use_layout(manager: &LayoutManager) -> LayoutBinding {
    let state = Rc::new(BindingState {
        tier: Cell::new(manager.current_layout()),
        dirty: Cell::new(false),
        on_render: RefCell::new(None),
    });
    let subscription = manager.on_layout_change({
        let state = state.clone();
        move |tier| state.update(tier)
    });
    LayoutBinding {
        state,
        subscription,
    }
}

impl LayoutBinding {
    /// Re-render callback for this consumer, run on every tier change.
    pub fn on_render(self, f: impl Fn(Tier) + 'static) -> Self {
        let f: RenderFn = Rc::new(f);
        *self.state.on_render.borrow_mut() = Some(f);
        self
    }

    pub fn tier(&self) -> Tier {
        self.state.tier.get()
    }

    /// Returns whether the tier changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.state.dirty.replace(false)
    }

    /// Whether content gated on `tiers` should render right now.
    pub fn matches(&self, tiers: impl Into<TierSet>) -> bool {
        tiers.into().contains_tier(self.tier())
    }

    pub fn is_ultra_wide(&self) -> bool {
        self.tier() >= Tier::UltraWide
    }

    pub fn value<'a, T>(&self, values: &'a ResponsiveValues<T>) -> Option<&'a T> {
        use_responsive_value(self.tier(), values)
    }

    pub fn grid_columns(&self, grid: &ResponsiveGrid) -> u16 {
        use_responsive_grid(self.tier(), grid)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }
}

/// Picks the value for `tier`, falling back to the desktop value and then the
/// mobile value.
pub fn use_responsive_value<T>(tier: Tier, values: &ResponsiveValues<T>) -> Option<&T> {
    values
        .get(tier)
        .or_else(|| values.get(Tier::Desktop))
        .or_else(|| values.get(Tier::Mobile))
}

/// Column counts per tier with an upper bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponsiveGrid {
    pub columns: ResponsiveValues<u16>,
    pub max_columns: u16,
}

impl Default for ResponsiveGrid {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl ResponsiveGrid {
    pub fn new(columns: ResponsiveValues<u16>) -> Self {
        Self {
            columns,
            max_columns: DEFAULT_MAX_GRID_COLUMNS,
        }
    }

    pub fn max_columns(mut self, max: u16) -> Self {
        self.max_columns = max;
        self
    }

    /// Uses the manager's optimal column table and grid limit.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            max_columns: config.max_grid_columns,
        }
    }
}

/// Column count for `tier`, clamped to `1..=grid.max_columns`.
pub fn use_responsive_grid(tier: Tier, grid: &ResponsiveGrid) -> u16 {
    use_responsive_value(tier, &grid.columns)
        .copied()
        .unwrap_or(1)
        .clamp(1, grid.max_columns.max(1))
}
