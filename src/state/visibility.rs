//! Visibility Module - one-way "revealed" flags for page regions
//!
//! A [`VisibilityTrigger`] watches one region. The first time the visible
//! fraction of the region reaches its threshold it flips `revealed` to true,
//! stops observing, and never flips back.
//!
//! If the host can't report intersections at all, the trigger starts out
//! revealed so content is never stuck hidden.
//!
//! # API
//!
//! - `intersection_ratio(region, viewport)` - visible fraction of a region
//! - `VisibilityTrigger::new(threshold, support)` - create a trigger
//! - `observe(ratio)` - feed an intersection ratio
//! - `on_reveal(fn)` - one-shot callback, returns an unsubscribe closure
//! - `disconnect()` - stop observing without revealing
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::state::visibility::{VisibilityTrigger, ObservationSupport};
//!
//! let mut trigger = VisibilityTrigger::new(0.2, ObservationSupport::Available);
//! let unsubscribe = trigger.on_reveal(|| println!("start typing"));
//!
//! trigger.observe(0.05); // still hidden
//! trigger.observe(0.25); // revealed, callback fired, observation released
//! unsubscribe();         // no-op now
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::Rect;

// =============================================================================
// INTERSECTION
// =============================================================================

/// Fraction of `region`'s area that lies inside `viewport`, in `[0, 1]`.
///
/// A zero-area region counts as fully visible when it sits inside the
/// viewport, and invisible otherwise.
pub fn intersection_ratio(region: &Rect, viewport: &Rect) -> f32 {
    let area = region.area();
    if area <= 0.0 {
        let inside = region.y >= viewport.y
            && region.y <= viewport.bottom()
            && region.x >= viewport.x
            && region.x <= viewport.right();
        return if inside { 1.0 } else { 0.0 };
    }

    match region.intersection(viewport) {
        Some(overlap) => (overlap.area() / area).clamp(0.0, 1.0),
        None => 0.0,
    }
}

// =============================================================================
// TRIGGER
// =============================================================================

/// Whether the host can report region intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObservationSupport {
    #[default]
    Available,
    Unavailable,
}

type RevealCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    pending: Vec<(u64, RevealCallback)>,
}

/// One-shot visibility detector for a single region.
pub struct VisibilityTrigger {
    threshold: f32,
    revealed: Signal<bool>,
    observing: bool,
    listeners: Rc<RefCell<Listeners>>,
}

impl VisibilityTrigger {
    /// Create a trigger.
    ///
    /// `threshold` is clamped to `[0, 1]`; 0 means "any overlap at all".
    pub fn new(threshold: f32, support: ObservationSupport) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };

        let fallback = support == ObservationSupport::Unavailable;
        if fallback {
            log::warn!("intersection observation unavailable, region revealed immediately");
        }

        Self {
            threshold,
            revealed: signal(fallback),
            observing: !fallback,
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    /// A trigger that is revealed from the start (e.g. the hero).
    pub fn revealed() -> Self {
        let mut trigger = Self::new(0.0, ObservationSupport::Available);
        trigger.reveal();
        trigger
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Reactive handle to the flag.
    pub fn revealed_signal(&self) -> Signal<bool> {
        self.revealed.clone()
    }

    /// Still waiting for the first qualifying intersection.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Feed the current visible fraction of the region.
    ///
    /// Returns `true` only on the call that flips the flag.
    pub fn observe(&mut self, ratio: f32) -> bool {
        if !self.observing {
            return false;
        }

        let qualifies = ratio > 0.0 && ratio >= self.threshold;
        if !qualifies {
            log::trace!("region at {:.3} below threshold {:.3}", ratio, self.threshold);
            return false;
        }

        log::debug!("region revealed at ratio {:.3} (threshold {:.3})", ratio, self.threshold);
        self.reveal();
        true
    }

    /// Stop observing without revealing (region torn down).
    pub fn disconnect(&mut self) {
        if self.observing {
            log::debug!("visibility observation disconnected");
        }
        self.observing = false;
        self.listeners.borrow_mut().pending.clear();
    }

    /// Register a callback to run once, when the region is revealed.
    ///
    /// If the region is already revealed the callback runs immediately.
    /// The returned closure deregisters it if it hasn't fired yet.
    pub fn on_reveal<F>(&mut self, callback: F) -> Box<dyn FnOnce()>
    where
        F: FnOnce() + 'static,
    {
        let id = if self.is_revealed() {
            callback();
            None
        } else {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.pending.push((id, Box::new(callback)));
            Some(id)
        };

        let listeners = Rc::downgrade(&self.listeners);
        Box::new(move || {
            let (Some(id), Some(listeners)) = (id, listeners.upgrade()) else {
                return;
            };
            listeners.borrow_mut().pending.retain(|(pending_id, _)| *pending_id != id);
        })
    }

    fn reveal(&mut self) {
        self.observing = false;
        self.revealed.set(true);

        // Take the callbacks out before calling them so a callback may
        // register another one without a double borrow.
        let pending = std::mem::take(&mut self.listeners.borrow_mut().pending);
        for (_, callback) in pending {
            callback();
        }
    }
}

impl std::fmt::Debug for VisibilityTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityTrigger")
            .field("threshold", &self.threshold)
            .field("revealed", &self.revealed.get())
            .field("observing", &self.observing)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn test_intersection_ratio() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(intersection_ratio(&Rect::new(0.0, 0.0, 100.0, 50.0), &viewport), 1.0);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 50.0, 100.0, 100.0), &viewport), 0.5);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 200.0, 100.0, 100.0), &viewport), 0.0);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 10.0, 100.0, 0.0), &viewport), 1.0);
    }

    #[test]
    fn test_reveals_once_at_threshold() {
        let mut trigger = VisibilityTrigger::new(0.2, ObservationSupport::Available);
        assert!(!trigger.is_revealed());
        assert!(trigger.is_observing());

        assert!(!trigger.observe(0.1));
        assert!(!trigger.is_revealed());

        assert!(trigger.observe(0.2));
        assert!(trigger.is_revealed());
        assert!(!trigger.is_observing());

        // Never transitions back, never fires again
        assert!(!trigger.observe(0.0));
        assert!(!trigger.observe(1.0));
        assert!(trigger.is_revealed());
    }

    #[test]
    fn test_zero_ratio_never_reveals() {
        let mut trigger = VisibilityTrigger::new(0.0, ObservationSupport::Available);
        assert!(!trigger.observe(0.0));
        assert!(trigger.observe(0.001));
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(VisibilityTrigger::new(3.0, ObservationSupport::Available).threshold(), 1.0);
        assert_eq!(VisibilityTrigger::new(-1.0, ObservationSupport::Available).threshold(), 0.0);
        assert_eq!(VisibilityTrigger::new(f32::NAN, ObservationSupport::Available).threshold(), 0.0);
    }

    #[test]
    fn test_unavailable_support_reveals_immediately() {
        let mut trigger = VisibilityTrigger::new(0.5, ObservationSupport::Unavailable);
        assert!(trigger.is_revealed());
        assert!(!trigger.is_observing());
        assert!(!trigger.observe(1.0));
    }

    #[test]
    fn test_instances_independent() {
        let mut a = VisibilityTrigger::new(0.2, ObservationSupport::Available);
        let b = VisibilityTrigger::new(0.2, ObservationSupport::Available);

        a.observe(0.9);
        assert!(a.is_revealed());
        assert!(!b.is_revealed());
    }

    #[test]
    fn test_on_reveal_fires_once() {
        let mut trigger = VisibilityTrigger::new(0.2, ObservationSupport::Available);
        let (count, callback) = counter();
        let _unsub = trigger.on_reveal(callback);

        trigger.observe(0.1);
        assert_eq!(count.get(), 0);

        trigger.observe(0.5);
        assert_eq!(count.get(), 1);

        trigger.observe(0.9);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_on_reveal_after_reveal_runs_immediately() {
        let mut trigger = VisibilityTrigger::revealed();
        let (count, callback) = counter();
        let unsub = trigger.on_reveal(callback);
        assert_eq!(count.get(), 1);
        unsub();
    }

    #[test]
    fn test_unsubscribe_before_reveal() {
        let mut trigger = VisibilityTrigger::new(0.2, ObservationSupport::Available);
        let (count, callback) = counter();
        let unsub = trigger.on_reveal(callback);

        unsub();
        trigger.observe(1.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_disconnect_stops_observation() {
        let mut trigger = VisibilityTrigger::new(0.2, ObservationSupport::Available);
        let (count, callback) = counter();
        let _unsub = trigger.on_reveal(callback);

        trigger.disconnect();
        assert!(!trigger.observe(1.0));
        assert!(!trigger.is_revealed());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_signal_tracks_flag() {
        let mut trigger = VisibilityTrigger::new(0.2, ObservationSupport::Available);
        let sig = trigger.revealed_signal();
        assert!(!sig.get());
        trigger.observe(0.3);
        assert!(sig.get());
    }
}
