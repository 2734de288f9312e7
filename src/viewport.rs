//! Viewport sampling.
//!
//! The layout manager never talks to a windowing system directly. It reads
//! sizes through a [`ViewportSampler`], which lets a host event loop feed
//! resize events in through a [`ManualSampler`] and lets tests drive the
//! manager without a display.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use dpi::{LogicalSize, PhysicalSize};
use slotmap::{SlotMap, new_key_type};
use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Converts a logical size to device pixels.
    pub fn from_logical(size: LogicalSize<f64>, scale_factor: f64) -> Self {
        size.to_physical::<u32>(scale_factor).into()
    }

    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl From<PhysicalSize<u32>> for ViewportSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<(u32, u32)> for ViewportSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
    Resized,
    OrientationChanged,
}

/// Unregisters a sampler listener when dropped.
#[must_use = "dropping a SamplerSubscription unregisters the listener"]
pub struct SamplerSubscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl SamplerSubscription {
    pub fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// A subscription for samplers that never fire.
    pub fn noop() -> Self {
        Self { remove: None }
    }
}

impl Drop for SamplerSubscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

/// Reads viewport dimensions from the host environment.
pub trait ViewportSampler {
    /// The current size, or `None` when the host cannot report one.
    fn current_size(&self) -> Option<ViewportSize>;

    /// Calls `callback` whenever the viewport is resized or rotated.
    fn on_change(&self, callback: Rc<dyn Fn(ViewportEvent)>) -> SamplerSubscription;
}

new_key_type! {
    struct ListenerId;
}

#[derive(Default)]
struct ManualState {
    size: Cell<Option<ViewportSize>>,
    listeners: RefCell<SlotMap<ListenerId, Rc<dyn Fn(ViewportEvent)>>>,
}

/// A sampler whose size is pushed in by the embedding event loop.
///
/// Forward window resize events with [`ManualSampler::set_size`]. Clones share
/// the same state, so the host keeps one clone and hands another to the
/// [`LayoutManager`](crate::LayoutManager).
#[derive(Clone, Default)]
pub struct ManualSampler {
    state: Rc<ManualState>,
}

impl ManualSampler {
    /// A sampler with no size yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        let sampler = Self::default();
        sampler.state.size.set(Some(ViewportSize::new(width, height)));
        sampler
    }

    pub fn set_size(&self, size: impl Into<ViewportSize>) {
        let size = size.into();
        let previous = self.state.size.replace(Some(size));
        let event = match previous {
            Some(previous) if previous == size => return,
            Some(previous) if previous.orientation() != size.orientation() => {
                ViewportEvent::OrientationChanged
            }
            _ => ViewportEvent::Resized,
        };
        trace!(width = size.width, height = size.height, ?event, "viewport changed");
        self.emit(event);
    }

    pub fn set_physical_size(&self, size: PhysicalSize<u32>) {
        self.set_size(size);
    }

    pub fn set_logical_size(&self, size: LogicalSize<f64>, scale_factor: f64) {
        self.set_size(ViewportSize::from_logical(size, scale_factor));
    }

    /// Marks the viewport as unreadable, e.g. while the window is gone.
    pub fn set_unavailable(&self) {
        if self.state.size.take().is_some() {
            trace!("viewport became unavailable");
            self.emit(ViewportEvent::Resized);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    fn emit(&self, event: ViewportEvent) {
        // Listeners may register or drop subscriptions while being called.
        let listeners: Vec<_> = self.state.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl ViewportSampler for ManualSampler {
    fn current_size(&self) -> Option<ViewportSize> {
        self.state.size.get()
    }

    fn on_change(&self, callback: Rc<dyn Fn(ViewportEvent)>) -> SamplerSubscription {
        let id = self.state.listeners.borrow_mut().insert(callback);
        let state: Weak<ManualState> = Rc::downgrade(&self.state);
        SamplerSubscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.listeners.borrow_mut().remove(id);
            }
        })
    }
}

/// A sampler for contexts without a viewport, such as tests of server-side
/// rendering paths. It never reports a size and never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessSampler;

impl ViewportSampler for HeadlessSampler {
    fn current_size(&self) -> Option<ViewportSize> {
        None
    }

    fn on_change(&self, _callback: Rc<dyn Fn(ViewportEvent)>) -> SamplerSubscription {
        SamplerSubscription::noop()
    }
}
