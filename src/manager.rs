//! The layout manager owns the current [`Tier`] and notifies subscribers when
//! it changes.
//!
//! There is exactly one manager per application. The composition root builds
//! it with [`LayoutManager::new`] and passes clones of the handle to whatever
//! needs the tier; clones share state.
//!
//! A refresh samples the viewport, classifies the width and compares the
//! result with the stored tier. Subscribers only run when the tier actually
//! changed, and they run synchronously on the thread that delivered the
//! viewport event. A panicking subscriber is logged and skipped; the
//! remaining subscribers are still called.

use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    rc::{Rc, Weak},
};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    breakpoints::BreakpointTable,
    config::LayoutConfig,
    hooks::use_responsive_value,
    tier::Tier,
    viewport::{SamplerSubscription, ViewportEvent, ViewportSampler, ViewportSize},
};

new_key_type! {
    /// Identifies a registered layout subscriber.
    pub struct SubscriberId;
}

type Subscriber = Rc<dyn Fn(Tier)>;

struct ManagerState {
    config: LayoutConfig,
    sampler: Box<dyn ViewportSampler>,
    current: Cell<Tier>,
    /// The tier subscribers last heard, which stays put while the viewport
    /// is unreadable.
    broadcast: Cell<Tier>,
    last_sample: Cell<Option<ViewportSize>>,
    subscribers: RefCell<SlotMap<SubscriberId, Subscriber>>,
    notifying: Cell<bool>,
    refresh_requested: Cell<bool>,
    pending_since: Cell<Option<Instant>>,
    sampler_subscription: RefCell<Option<SamplerSubscription>>,
}

/// Shared handle to the application's layout manager.
#[derive(Clone)]
pub struct LayoutManager {
    state: Rc<ManagerState>,
}

impl LayoutManager {
    /// Creates the manager, takes the first sample and starts listening to
    /// `sampler`.
    pub fn new(sampler: impl ViewportSampler + 'static, config: LayoutConfig) -> Self {
        let state = Rc::new(ManagerState {
            current: Cell::new(config.fallback_tier),
            broadcast: Cell::new(config.fallback_tier),
            config,
            sampler: Box::new(sampler),
            last_sample: Cell::new(None),
            subscribers: RefCell::new(SlotMap::with_key()),
            notifying: Cell::new(false),
            refresh_requested: Cell::new(false),
            pending_since: Cell::new(None),
            sampler_subscription: RefCell::new(None),
        });

        let weak: Weak<ManagerState> = Rc::downgrade(&state);
        let subscription = state.sampler.on_change(Rc::new(move |event| {
            if let Some(state) = weak.upgrade() {
                LayoutManager { state }.viewport_changed(event);
            }
        }));
        *state.sampler_subscription.borrow_mut() = Some(subscription);

        let manager = Self { state };
        manager.refresh();
        manager
    }

    /// The current tier. This is a snapshot; it may be stale by the time it
    /// is used, so hold a subscription to follow changes.
    pub fn current_layout(&self) -> Tier {
        self.state.current.get()
    }

    /// Registers `callback` to run with the new tier whenever it changes.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or [`LayoutManager::off`] is called with its id.
    pub fn on_layout_change(&self, callback: impl Fn(Tier) + 'static) -> Subscription {
        let id = self
            .state
            .subscribers
            .borrow_mut()
            .insert(Rc::new(callback));
        trace!(?id, "layout subscriber registered");
        Subscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn off(&self, id: SubscriberId) -> bool {
        self.state.remove_subscriber(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.borrow().len()
    }

    pub fn is_ultra_wide(&self) -> bool {
        self.current_layout() >= Tier::UltraWide
    }

    /// The configured column count for the current tier, never below one.
    pub fn optimal_columns(&self) -> u16 {
        use_responsive_value(self.current_layout(), &self.state.config.columns)
            .copied()
            .unwrap_or(1)
            .max(1)
    }

    /// The size used for the last classification, if the viewport was
    /// readable.
    pub fn last_sample(&self) -> Option<ViewportSize> {
        self.state.last_sample.get()
    }

    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.state.config.breakpoints
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.state.config
    }

    /// Re-samples the viewport and notifies subscribers if the tier changed.
    ///
    /// Called from inside a subscriber, the refresh is deferred until the
    /// current notification round has finished.
    pub fn refresh(&self) {
        if self.state.notifying.get() {
            self.state.refresh_requested.set(true);
            return;
        }
        loop {
            self.refresh_once();
            if !self.state.refresh_requested.replace(false) {
                break;
            }
        }
    }

    /// Handles a viewport event from the sampler. With a debounce configured
    /// the event only starts or extends the quiet period.
    pub fn viewport_changed(&self, event: ViewportEvent) {
        let debounce = self.state.config.debounce;
        if debounce.is_zero() {
            trace!(?event, "viewport event");
            self.refresh();
        } else {
            trace!(?event, ?debounce, "viewport event deferred");
            self.state.pending_since.set(Some(Instant::now()));
        }
    }

    pub fn has_pending(&self) -> bool {
        self.state.pending_since.get().is_some()
    }

    /// Refreshes if the quiet period has elapsed since the last deferred
    /// event. Returns whether a refresh ran. Hosts call this from their frame
    /// or timer loop.
    pub fn poll(&self, now: Instant) -> bool {
        let Some(since) = self.state.pending_since.get() else {
            return false;
        };
        if now.saturating_duration_since(since) < self.state.config.debounce {
            return false;
        }
        self.flush();
        true
    }

    /// Drops any pending quiet period and refreshes immediately.
    pub fn flush(&self) {
        self.state.pending_since.set(None);
        self.refresh();
    }

    fn refresh_once(&self) {
        let state = &self.state;
        let Some(size) = state.sampler.current_size() else {
            let fallback = state.config.fallback_tier;
            debug!(%fallback, "viewport size unavailable, using fallback tier");
            state.last_sample.set(None);
            state.current.set(fallback);
            return;
        };

        state.last_sample.set(Some(size));
        let next = state.config.breakpoints.classify(size.width);
        let previous = state.current.replace(next);
        // Consumers bound during an outage hold the fallback, older ones hold
        // the last broadcast tier. Both must end up on `next`.
        let heard = state.broadcast.replace(next);
        if previous == next && heard == next {
            trace!(width = size.width, tier = %next, "layout tier unchanged");
            return;
        }

        debug!(width = size.width, from = %heard, to = %next, "layout tier changed");
        self.notify(next);
    }

    fn notify(&self, tier: Tier) {
        let subscribers: SmallVec<[(SubscriberId, Subscriber); 8]> = self
            .state
            .subscribers
            .borrow()
            .iter()
            .map(|(id, subscriber)| (id, subscriber.clone()))
            .collect();
        trace!(subscribers = subscribers.len(), %tier, "notifying layout subscribers");

        self.state.notifying.set(true);
        for (id, subscriber) in subscribers {
            // Skip anything unsubscribed earlier in this round.
            if !self.state.subscribers.borrow().contains_key(id) {
                continue;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| subscriber(tier))).is_err() {
                warn!(?id, %tier, "layout subscriber panicked");
            }
        }
        self.state.notifying.set(false);
    }
}

impl ManagerState {
    fn remove_subscriber(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.borrow_mut().remove(id).is_some();
        if removed {
            trace!(?id, "layout subscriber removed");
        }
        removed
    }
}

/// A registered layout subscriber. Dropping it unregisters the callback.
#[must_use = "dropping a Subscription unregisters the callback"]
pub struct Subscription {
    id: SubscriberId,
    state: Weak<ManagerState>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Whether the callback is still registered with a live manager.
    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.subscribers.borrow().contains_key(self.id))
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.remove_subscriber(self.id);
        }
    }
}
