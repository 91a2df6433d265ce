//! Staged Text Reveal - typewriter disclosure on a fixed cadence.
//!
//! This is the one place where timing enters a section. The host calls
//! [`StagedTextRevealer::advance_to`] with the current time (any monotonic
//! `Duration`, usually time since mount) whenever it wakes; the revealer
//! applies every tick that has come due since the last call.
//!
//! # Pattern
//!
//! - `start(text, interval, now)` resets to 0 and arms the timer
//! - the timer only runs while the owning region is revealed (the gate)
//! - one character per tick; stops at the end of the text
//! - `cancel()` disarms the timer for good, no further mutation
//!
//! Exactly `len(text)` ticks take a reveal from 0 to complete.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use spark_reveal::state::reveal::StagedTextRevealer;
//!
//! let mut revealer = StagedTextRevealer::new();
//! revealer.set_gate(true, Duration::ZERO);
//! revealer.start("AB", Duration::from_millis(30), Duration::ZERO);
//!
//! revealer.advance_to(Duration::from_millis(30)); // "A"
//! revealer.advance_to(Duration::from_millis(60)); // "AB", complete
//! ```

use std::time::Duration;

use spark_signals::{signal, Signal};

// =============================================================================
// REVEAL STATE
// =============================================================================

/// Plain reveal progress over one source text.
///
/// `0 <= revealed_len <= total_len`, counted in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    source_text: String,
    total_len: usize,
    revealed_len: usize,
    tick_interval: Duration,
}

/// Where a reveal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Revealing,
    Complete,
}

impl RevealState {
    pub fn new(source_text: impl Into<String>, tick_interval: Duration) -> Self {
        let source_text = source_text.into();
        let total_len = source_text.chars().count();
        Self {
            source_text,
            total_len,
            revealed_len: 0,
            tick_interval,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed_len
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn phase(&self) -> RevealPhase {
        if self.revealed_len >= self.total_len {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == RevealPhase::Complete
    }

    /// State after `ticks` more characters, saturating at the end.
    pub fn advanced(&self, ticks: usize) -> Self {
        Self {
            revealed_len: self.revealed_len.saturating_add(ticks).min(self.total_len),
            ..self.clone()
        }
    }

    /// The revealed prefix.
    pub fn revealed_text(&self) -> &str {
        let end = self
            .source_text
            .char_indices()
            .nth(self.revealed_len)
            .map(|(byte, _)| byte)
            .unwrap_or(self.source_text.len());
        &self.source_text[..end]
    }
}

// =============================================================================
// REVEALER
// =============================================================================

/// The single periodic timer of one reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RevealTimer {
    next_due: Duration,
}

/// Drives one [`RevealState`] on a timer, gated by region visibility.
///
/// At most one timer is armed per revealer; `start` replaces it.
pub struct StagedTextRevealer {
    state: Option<RevealState>,
    timer: Option<RevealTimer>,
    gate_open: bool,
    torn_down: bool,
    revealed_len: Signal<usize>,
}

impl StagedTextRevealer {
    pub fn new() -> Self {
        Self {
            state: None,
            timer: None,
            gate_open: false,
            torn_down: false,
            revealed_len: signal(0),
        }
    }

    /// Begin (or restart) revealing `text`, one char every `tick_interval`.
    ///
    /// Any running timer is cancelled first and progress resets to 0. A zero
    /// interval reveals the whole text at once, as soon as the gate is open.
    pub fn start(&mut self, text: impl Into<String>, tick_interval: Duration, now: Duration) {
        if self.torn_down {
            log::warn!("start() on a torn-down revealer ignored");
            return;
        }

        self.timer = None;
        let state = RevealState::new(text, tick_interval);
        log::debug!(
            "reveal started: {} chars every {}ms",
            state.total_len(),
            tick_interval.as_millis()
        );

        self.state = Some(state);
        self.revealed_len.set(0);
        self.arm(now);
    }

    /// Open or close the visibility gate.
    ///
    /// Opening arms the timer (first tick one interval from `now`); closing
    /// pauses it without losing progress.
    pub fn set_gate(&mut self, open: bool, now: Duration) {
        if self.gate_open == open {
            return;
        }
        self.gate_open = open;

        if open {
            self.arm(now);
        } else if self.timer.take().is_some() {
            log::debug!("reveal paused at {}", self.revealed_len());
        }
    }

    pub fn is_gate_open(&self) -> bool {
        self.gate_open
    }

    /// Apply every tick that has come due by `now`.
    ///
    /// Returns the number of characters revealed by this call.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let (Some(state), Some(timer)) = (self.state.as_ref(), self.timer.as_mut()) else {
            return 0;
        };
        if now < timer.next_due {
            return 0;
        }

        let interval = state.tick_interval();
        let remaining = state.total_len() - state.revealed_len();

        // Ticks due = 1 + whole intervals elapsed after the first due time.
        let overdue = (now - timer.next_due).as_nanos() / interval.as_nanos();
        let due = usize::try_from(overdue).unwrap_or(usize::MAX).saturating_add(1);
        let ticks = due.min(remaining);

        let next = state.advanced(ticks);
        let revealed = next.revealed_len();
        timer.next_due += interval.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX));

        log::trace!("reveal +{} -> {}/{}", ticks, revealed, next.total_len());

        if next.is_complete() {
            log::debug!("reveal complete ({} chars)", revealed);
            self.timer = None;
        }
        self.state = Some(next);
        self.revealed_len.set(revealed);
        ticks
    }

    /// Stop the timer permanently (owner torn down).
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("reveal cancelled at {}", self.revealed_len());
        }
        self.torn_down = true;
    }

    /// When the next tick is due, if a timer is armed.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.map(|t| t.next_due)
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.state.as_ref().is_some_and(RevealState::is_complete)
    }

    pub fn state(&self) -> Option<&RevealState> {
        self.state.as_ref()
    }

    pub fn revealed_len(&self) -> usize {
        self.state.as_ref().map(RevealState::revealed_len).unwrap_or(0)
    }

    pub fn revealed_text(&self) -> &str {
        self.state.as_ref().map(RevealState::revealed_text).unwrap_or("")
    }

    /// Reactive handle to the revealed length.
    pub fn revealed_len_signal(&self) -> Signal<usize> {
        self.revealed_len.clone()
    }

    fn arm(&mut self, now: Duration) {
        if !self.gate_open || self.torn_down || self.timer.is_some() {
            return;
        }
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.is_complete() {
            return;
        }
        if state.tick_interval().is_zero() {
            let done = state.advanced(state.total_len());
            log::debug!("reveal complete ({} chars, no delay)", done.revealed_len());
            self.revealed_len.set(done.revealed_len());
            self.state = Some(done);
            return;
        }
        self.timer = Some(RevealTimer {
            next_due: now + state.tick_interval(),
        });
    }
}

impl std::fmt::Debug for StagedTextRevealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedTextRevealer")
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("gate_open", &self.gate_open)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl Default for StagedTextRevealer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn running(text: &str, tick: u64) -> StagedTextRevealer {
        let mut r = StagedTextRevealer::new();
        r.set_gate(true, Duration::ZERO);
        r.start(text, ms(tick), Duration::ZERO);
        r
    }

    #[test]
    fn test_ab_at_30ms() {
        let mut r = running("AB", 30);
        assert_eq!(r.revealed_len(), 0);

        r.advance_to(ms(29));
        assert_eq!(r.revealed_len(), 0);

        r.advance_to(ms(30));
        assert_eq!(r.revealed_len(), 1);
        assert_eq!(r.revealed_text(), "A");

        r.advance_to(ms(60));
        assert_eq!(r.revealed_len(), 2);
        assert_eq!(r.revealed_text(), "AB");
        assert!(r.is_complete());
        assert!(!r.is_running());

        r.advance_to(ms(90));
        assert_eq!(r.revealed_len(), 2);
    }

    #[test]
    fn test_exactly_len_ticks_to_complete() {
        let text = "public class Neo {}";
        let len = text.chars().count() as u64;
        let mut r = running(text, 7);

        r.advance_to(ms(7 * (len - 1)));
        assert!(!r.is_complete());

        r.advance_to(ms(7 * len));
        assert!(r.is_complete());
        assert_eq!(r.revealed_len(), len as usize);

        r.advance_to(ms(7 * len * 10));
        assert_eq!(r.revealed_len(), len as usize);
    }

    #[test]
    fn test_catches_up_after_long_sleep() {
        let mut r = running("abcdef", 10);
        assert_eq!(r.advance_to(ms(35)), 3);
        assert_eq!(r.next_deadline(), Some(ms(40)));
        assert_eq!(r.advance_to(ms(40)), 1);
    }

    #[test]
    fn test_gate_closed_does_not_advance() {
        let mut r = StagedTextRevealer::new();
        r.start("hello", ms(10), Duration::ZERO);
        assert!(!r.is_running());

        r.advance_to(ms(1000));
        assert_eq!(r.revealed_len(), 0);

        // Timer starts from the moment the gate opens
        r.set_gate(true, ms(1000));
        r.advance_to(ms(1009));
        assert_eq!(r.revealed_len(), 0);
        r.advance_to(ms(1010));
        assert_eq!(r.revealed_len(), 1);
    }

    #[test]
    fn test_gate_pause_keeps_progress() {
        let mut r = running("abcdef", 10);
        assert_eq!(r.advance_to(ms(20)), 2);

        r.set_gate(false, ms(25));
        assert!(!r.is_running());
        assert_eq!(r.next_deadline(), None);
        assert_eq!(r.advance_to(ms(500)), 0);
        assert_eq!(r.revealed_text(), "ab");

        // Resuming counts a full interval from the reopen, not from the pause
        r.set_gate(true, ms(500));
        assert_eq!(r.next_deadline(), Some(ms(510)));
        assert_eq!(r.advance_to(ms(509)), 0);
        assert_eq!(r.advance_to(ms(510)), 1);
        assert_eq!(r.revealed_text(), "abc");

        r.advance_to(ms(540));
        assert!(r.is_complete());
        assert_eq!(r.revealed_text(), "abcdef");
    }

    #[test]
    fn test_restart_resets_and_uses_new_text() {
        let mut r = running("first text", 10);
        r.advance_to(ms(40));
        assert_eq!(r.revealed_len(), 4);

        r.start("XY", ms(10), ms(40));
        assert_eq!(r.revealed_len(), 0);
        assert_eq!(r.state().map(RevealState::source_text), Some("XY"));

        // Old timer's due time (50ms) is gone; new one is 40 + 10
        assert_eq!(r.next_deadline(), Some(ms(50)));
        r.advance_to(ms(70));
        assert_eq!(r.revealed_text(), "XY");
    }

    #[test]
    fn test_cancel_stops_mutation() {
        let mut r = running("abc", 10);
        r.advance_to(ms(10));
        r.cancel();

        assert_eq!(r.advance_to(ms(1000)), 0);
        assert_eq!(r.revealed_len(), 1);
        assert!(r.next_deadline().is_none());

        // Nor can it be restarted
        r.start("zzz", ms(10), ms(1000));
        assert_eq!(r.state().map(RevealState::source_text), Some("abc"));
    }

    #[test]
    fn test_zero_interval_reveals_at_once() {
        let mut r = running("instant", 0);
        assert!(r.is_complete());
        assert_eq!(r.revealed_text(), "instant");
        assert!(r.next_deadline().is_none());
    }

    #[test]
    fn test_zero_interval_still_gated() {
        let mut r = StagedTextRevealer::new();
        r.start("instant", Duration::ZERO, Duration::ZERO);
        assert_eq!(r.revealed_len(), 0);

        r.set_gate(true, ms(5));
        assert!(r.is_complete());
    }

    #[test]
    fn test_empty_text_is_complete() {
        let r = running("", 30);
        assert!(r.is_complete());
        assert!(!r.is_running());
    }

    #[test]
    fn test_multibyte_chars() {
        let mut r = running("héllo", 1);
        r.advance_to(ms(2));
        assert_eq!(r.revealed_text(), "hé");
    }

    #[test]
    fn test_signal_follows_progress() {
        let mut r = running("abc", 5);
        let sig = r.revealed_len_signal();
        r.advance_to(ms(10));
        assert_eq!(sig.get(), 2);
    }

    #[test]
    fn test_reveal_state_is_pure() {
        let s = RevealState::new("abc", ms(1));
        let t = s.advanced(2);
        assert_eq!(s.revealed_len(), 0);
        assert_eq!(t.revealed_len(), 2);
        assert_eq!(t.advanced(100).revealed_len(), 3);
        assert_eq!(t.advanced(100).phase(), RevealPhase::Complete);
    }
}
