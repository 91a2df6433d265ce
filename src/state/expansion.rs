//! Exclusive expansion and hover over a fixed set of cards.
//!
//! At most one card is expanded at a time. Toggling the expanded card
//! collapses it; toggling another card moves the expansion there.
//! Out-of-range indices are ignored.
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::state::expansion::ExclusiveExpansionSet;
//!
//! let mut pillars = ExclusiveExpansionSet::new(4);
//! pillars.toggle(2); // Some(2)
//! pillars.toggle(2); // None
//! pillars.toggle(0); // Some(0)
//! ```

use spark_signals::{signal, Signal};

// =============================================================================
// EXPANSION STATE
// =============================================================================

/// Which card (if any) is expanded. Plain value with pure transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpansionState {
    pub expanded: Option<usize>,
}

impl ExpansionState {
    pub const COLLAPSED: Self = Self { expanded: None };

    /// State after clicking card `index` in a set of `len` cards.
    pub fn toggled(self, index: usize, len: usize) -> Self {
        if index >= len {
            return self;
        }
        let expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        Self { expanded }
    }
}

// =============================================================================
// EXPANSION SET
// =============================================================================

/// Reactive wrapper around [`ExpansionState`] for one card collection.
pub struct ExclusiveExpansionSet {
    len: usize,
    expanded: Signal<Option<usize>>,
}

impl ExclusiveExpansionSet {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            expanded: signal(None),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded.get()
    }

    pub fn expanded_signal(&self) -> Signal<Option<usize>> {
        self.expanded.clone()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded_index() == Some(index)
    }

    pub fn state(&self) -> ExpansionState {
        ExpansionState {
            expanded: self.expanded_index(),
        }
    }

    /// Click card `index`. Returns true if the state changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        let before = self.state();
        let after = before.toggled(index, self.len);
        if after == before {
            log::warn!("toggle({}) ignored, set has {} cards", index, self.len);
            return false;
        }

        log::debug!("expansion {:?} -> {:?}", before.expanded, after.expanded);
        self.expanded.set(after.expanded);
        true
    }

    /// Collapse whatever is expanded.
    pub fn collapse(&mut self) -> bool {
        if self.expanded_index().is_none() {
            return false;
        }
        self.expanded.set(None);
        true
    }
}

impl std::fmt::Debug for ExclusiveExpansionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusiveExpansionSet")
            .field("len", &self.len)
            .field("expanded", &self.expanded.get())
            .finish()
    }
}

// =============================================================================
// HOVER SET
// =============================================================================

/// Which card the pointer is over. Enter/leave pairs, at most one hovered.
pub struct HoverSet {
    len: usize,
    hovered: Signal<Option<usize>>,
}

impl HoverSet {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            hovered: signal(None),
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered.get()
    }

    pub fn hovered_signal(&self) -> Signal<Option<usize>> {
        self.hovered.clone()
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered() == Some(index)
    }

    /// Pointer entered card `index`. Returns true if hover moved.
    pub fn enter(&mut self, index: usize) -> bool {
        if index >= self.len || self.is_hovered(index) {
            return false;
        }
        self.hovered.set(Some(index));
        true
    }

    /// Pointer left card `index`. Only clears if `index` is the hovered card.
    pub fn leave(&mut self, index: usize) -> bool {
        if !self.is_hovered(index) {
            return false;
        }
        self.hovered.set(None);
        true
    }

    /// Move hover to `target` (or nowhere), emitting leave/enter as needed.
    pub fn hover(&mut self, target: Option<usize>) -> bool {
        match (self.hovered(), target) {
            (current, next) if current == next => false,
            (Some(current), None) => self.leave(current),
            (_, Some(next)) => self.enter(next),
            (None, None) => false,
        }
    }

    pub fn clear(&mut self) -> bool {
        self.hover(None)
    }
}

impl std::fmt::Debug for HoverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoverSet")
            .field("len", &self.len)
            .field("hovered", &self.hovered.get())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
