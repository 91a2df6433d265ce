//! Page Pipeline
//!
//! Connects the state machines to a host.
//!
//! # Pipeline Architecture
//!
//! ```text
//! host events → Intent → Page::dispatch ─┐
//! host timer  → Page::tick ───────────────┼→ signals → Page::view → paint
//! ```
//!
//! ## Data Flow
//!
//! 1. **dispatch** - Pointer, scroll, click, step and resize intents mutate
//!    section state and return a [`Changed`] set
//! 2. **tick** - Advances the reveal timer and caret clock to `now`
//! 3. **view** - Reads every signal (hero transforms through a derived) into
//!    a plain [`PageView`] snapshot
//!
//! ## Key Design Principles
//!
//! - **Injected Time**: all timing takes `now` as a `Duration` since mount
//! - **Single Writer**: only the page writes its signals; views are copies
//! - **Explicit Teardown**: `teardown` (or drop) cancels timers and listeners

pub mod intent;
pub mod page;
pub mod view;

// Re-exports
pub use intent::{Changed, Intent};
pub use page::Page;
pub use view::{CardView, CodeView, LayerView, PageView, SectionView};
