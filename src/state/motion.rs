//! Motion Module - live pointer/scroll signal for decorative transforms
//!
//! Raw events arrive through a [`MotionSource`], a listener registry one
//! host feeds. A [`PointerMotionField`] registers one listener of each kind
//! on its source and folds them into a single latest-value [`MotionSample`]
//! signal. It is the only writer; readers get a [`MotionReader`] that can't
//! mutate.
//!
//! Each page owns its own source, so pages never see each other's input.
//! The free functions (`dispatch_pointer_move`, `dispatch_scroll`, ...) go
//! to the thread's host source, for fields attached with
//! [`PointerMotionField::attach`].
//!
//! No queueing: every event overwrites the previous sample.
//!
//! # API
//!
//! - `MotionSource::new()` - a private source; `MotionSource::host()` - the thread's
//! - `on_pointer_move(fn)` / `on_scroll(fn)` - raw listeners, return cleanup
//! - `dispatch_pointer_move(pos)` / `dispatch_scroll(y)` - event entry points
//! - `PointerMotionField::attach_to(&source, region)` - start sampling
//! - `reader()` / `subscribe(fn)` - read side
//! - `detach()` - unregister listeners (also on drop)
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::state::motion::{MotionSource, PointerMotionField};
//!
//! let source = MotionSource::new();
//! let field = PointerMotionField::attach_to(&source, hero_rect);
//! let stop = field.subscribe(|sample| println!("{:?}", sample));
//!
//! source.dispatch_pointer_move(Vec2::new(640.0, 360.0));
//! source.dispatch_scroll(120.0);
//!
//! stop();
//! drop(field); // listeners removed
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::types::{MotionSample, Rect, Vec2};

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

type PointerHandler = Rc<dyn Fn(Vec2)>;
type ScrollHandler = Rc<dyn Fn(f32)>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    pointer: Vec<(u64, PointerHandler)>,
    scroll: Vec<(u64, ScrollHandler)>,
}

impl ListenerRegistry {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Pointer and scroll listeners fed by one host.
///
/// Clones share the same listeners.
#[derive(Clone, Default)]
pub struct MotionSource {
    registry: Rc<RefCell<ListenerRegistry>>,
}

thread_local! {
    static HOST: MotionSource = MotionSource::new();
}

impl MotionSource {
    /// A fresh source with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// The thread's host source, the one the free functions use.
    pub fn host() -> Self {
        HOST.with(MotionSource::clone)
    }

    /// Listen to raw pointer moves (viewport coordinates). Returns cleanup.
    pub fn on_pointer_move<F>(&self, handler: F) -> Box<dyn FnOnce()>
    where
        F: Fn(Vec2) + 'static,
    {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id();
            reg.pointer.push((id, Rc::new(handler)));
            id
        };

        let registry = Rc::downgrade(&self.registry);
        Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().pointer.retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    /// Listen to raw scroll position changes. Returns cleanup.
    pub fn on_scroll<F>(&self, handler: F) -> Box<dyn FnOnce()>
    where
        F: Fn(f32) + 'static,
    {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id();
            reg.scroll.push((id, Rc::new(handler)));
            id
        };

        let registry = Rc::downgrade(&self.registry);
        Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().scroll.retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    /// The pointer moved to `position` (viewport px).
    pub fn dispatch_pointer_move(&self, position: Vec2) {
        // Clone out before calling so handlers may (un)register listeners.
        let handlers: Vec<PointerHandler> =
            self.registry.borrow().pointer.iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(position);
        }
    }

    /// The page scrolled to `position` (px from top).
    pub fn dispatch_scroll(&self, position: f32) {
        let handlers: Vec<ScrollHandler> =
            self.registry.borrow().scroll.iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(position);
        }
    }

    /// Number of registered (pointer, scroll) listeners.
    pub fn listener_count(&self) -> (usize, usize) {
        let reg = self.registry.borrow();
        (reg.pointer.len(), reg.scroll.len())
    }

    /// Drop every listener.
    pub fn clear(&self) {
        *self.registry.borrow_mut() = ListenerRegistry::default();
    }
}

impl std::fmt::Debug for MotionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionSource")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Listen to raw pointer moves on the host source. Returns cleanup.
pub fn on_pointer_move<F>(handler: F) -> impl FnOnce()
where
    F: Fn(Vec2) + 'static,
{
    HOST.with(|host| host.on_pointer_move(handler))
}

/// Listen to raw scroll position changes on the host source. Returns cleanup.
pub fn on_scroll<F>(handler: F) -> impl FnOnce()
where
    F: Fn(f32) + 'static,
{
    HOST.with(|host| host.on_scroll(handler))
}

/// Host entry point: the pointer moved to `position` (viewport px).
pub fn dispatch_pointer_move(position: Vec2) {
    MotionSource::host().dispatch_pointer_move(position);
}

/// Host entry point: the page scrolled to `position` (px from top).
pub fn dispatch_scroll(position: f32) {
    MotionSource::host().dispatch_scroll(position);
}

/// Number of (pointer, scroll) listeners on the host source.
pub fn listener_count() -> (usize, usize) {
    HOST.with(MotionSource::listener_count)
}

/// Drop every host listener (for testing).
pub fn reset_listeners() {
    HOST.with(MotionSource::clear);
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Pointer position relative to `region`: center = (0, 0), edges = ±0.5.
///
/// Not clamped. Returns `None` for a degenerate region.
pub fn normalize_pointer(position: Vec2, region: &Rect) -> Option<Vec2> {
    if region.width <= 0.0 || region.height <= 0.0 {
        return None;
    }
    let center = region.center();
    Some(Vec2::new(
        (position.x - center.x) / region.width,
        (position.y - center.y) / region.height,
    ))
}

// =============================================================================
// MOTION FIELD
// =============================================================================

/// Read-only view of a motion field's sample.
#[derive(Clone)]
pub struct MotionReader {
    sample: Signal<MotionSample>,
}

impl MotionReader {
    /// Latest sample. Reading inside a derived/effect tracks it.
    pub fn get(&self) -> MotionSample {
        self.sample.get()
    }
}

/// Owns the page-scope [`MotionSample`] and its two host listeners.
pub struct PointerMotionField {
    sample: Signal<MotionSample>,
    region: Rc<Cell<Rect>>,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl PointerMotionField {
    /// Start sampling host pointer moves relative to `region` (viewport px)
    /// and host scroll.
    pub fn attach(region: Rect) -> Self {
        Self::attach_to(&MotionSource::host(), region)
    }

    /// Start sampling the events of `source`.
    pub fn attach_to(source: &MotionSource, region: Rect) -> Self {
        let sample = signal(MotionSample::REST);
        let region = Rc::new(Cell::new(region));

        let pointer_sample = sample.clone();
        let pointer_region = region.clone();
        let stop_pointer = source.on_pointer_move(move |position| {
            let Some(pointer) = normalize_pointer(position, &pointer_region.get()) else {
                log::trace!("pointer ignored, reference region is empty");
                return;
            };
            let current = pointer_sample.get();
            pointer_sample.set(MotionSample { pointer, ..current });
        });

        let scroll_sample = sample.clone();
        let stop_scroll = source.on_scroll(move |position| {
            let current = scroll_sample.get();
            scroll_sample.set(MotionSample {
                // Overscroll bounce can report negative positions
                scroll_offset: position.max(0.0),
                ..current
            });
        });

        log::debug!("motion field attached");
        Self {
            sample,
            region,
            cleanups: vec![stop_pointer, stop_scroll],
        }
    }

    /// Move the reference region (e.g. after layout or scroll).
    pub fn set_region(&self, region: Rect) {
        self.region.set(region);
    }

    pub fn region(&self) -> Rect {
        self.region.get()
    }

    pub fn sample(&self) -> MotionSample {
        self.sample.get()
    }

    pub fn reader(&self) -> MotionReader {
        MotionReader {
            sample: self.sample.clone(),
        }
    }

    /// Run `f` now and after every sample change. Returns a stop closure.
    pub fn subscribe<F>(&self, f: F) -> Box<dyn FnOnce()>
    where
        F: Fn(MotionSample) + 'static,
    {
        let sample = self.sample.clone();
        let stop = effect(move || f(sample.get()));
        Box::new(stop)
    }

    pub fn is_attached(&self) -> bool {
        !self.cleanups.is_empty()
    }

    /// Unregister both listeners. The last sample stays readable.
    pub fn detach(&mut self) {
        if self.cleanups.is_empty() {
            return;
        }
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        log::debug!("motion field detached");
    }
}

impl Drop for PointerMotionField {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for PointerMotionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerMotionField")
            .field("sample", &self.sample.get())
            .field("region", &self.region.get())
            .field("attached", &self.is_attached())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
