//! Caret blink - the pulsing cursor after typed text.
//!
//! Same clock shape as a cursor blink: the phase toggles every half-period,
//! and the host asks for the next deadline to know how long it may sleep.
//! Time is injected (`Duration` since mount) so the clock never reads a
//! wall clock itself.

use std::time::Duration;

use spark_signals::{signal, Signal};

/// Blink clock for one caret.
pub struct CaretBlink {
    /// Half-period. Zero disables blinking.
    interval: Duration,
    last_toggle: Duration,
    phase: Signal<bool>,
}

impl CaretBlink {
    /// Create a clock that first toggles `interval` after `now`.
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            last_toggle: now,
            phase: signal(true), // Start visible
        }
    }

    /// Current phase: true = visible.
    pub fn is_visible(&self) -> bool {
        self.phase.get()
    }

    pub fn phase_signal(&self) -> Signal<bool> {
        self.phase.clone()
    }

    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// Toggle if a half-period has elapsed. Returns true if the phase changed.
    ///
    /// After a long sleep the phase lands where an uninterrupted clock would
    /// be, not just one toggle further.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.is_enabled() || now < self.last_toggle + self.interval {
            return false;
        }

        let elapsed = (now - self.last_toggle).as_nanos() / self.interval.as_nanos();
        let toggles = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.last_toggle += self.interval.saturating_mul(toggles);

        if toggles % 2 == 1 {
            self.phase.set(!self.phase.get());
            true
        } else {
            false
        }
    }

    /// Show the caret and restart the half-period (e.g. while typing).
    pub fn reset(&mut self, now: Duration) {
        self.last_toggle = now;
        self.phase.set(true);
    }

    /// When the next toggle is due, or `None` if blinking is disabled.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.is_enabled().then(|| self.last_toggle + self.interval)
    }
}

impl std::fmt::Debug for CaretBlink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaretBlink")
            .field("interval", &self.interval)
            .field("last_toggle", &self.last_toggle)
            .field("visible", &self.phase.get())
            .finish()
    }
}
