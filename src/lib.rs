//! # spark-reveal
//!
//! Reactive disclosure and motion controller for a scroll-driven teaching
//! page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! The page is four sections. Each section reveals once when enough of it
//! scrolls into view; the code walkthrough types its source out on a timer
//! and highlights the part named by the active step; pillar cards expand one
//! at a time; decorative hero layers follow the pointer and scroll.
//!
//! ```text
//! Intent / tick → state machines (signals) → derived hero transforms → PageView
//! ```
//!
//! All state transitions are infallible. Loading config/content and
//! computing layout are the only operations that return [`Result`].
//!
//! ## Modules
//!
//! - [`types`] - Core value types (Vec2, Rect, MotionSample, TransformParams, etc.)
//! - [`state`] - Visibility, reveal, highlight, expansion and motion state machines
//! - [`transform`] - Pure motion math and hero layer presets
//! - [`layout`] - Taffy page layout, hit testing and scroll bounds
//! - [`pipeline`] - The `Page` controller, intents and view snapshots
//! - [`input`] - Crossterm event adapter
//! - [`config`] / [`content`] - TOML-loaded tuning and page data

pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod transform;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::Config;
pub use content::{Icon, PageContent};
pub use error::{Error, Result};

pub use layout::{compute_page_layout, CardCounts, PageLayout};

pub use pipeline::{Changed, Intent, Page, PageView};

pub use state::{
    // Visibility
    intersection_ratio, ObservationSupport, VisibilityTrigger,
    // Reveal
    CaretBlink, RevealPhase, RevealState, StagedTextRevealer,
    // Highlight
    HighlightWindowMap, StepSelector,
    // Expansion
    ExclusiveExpansionSet, ExpansionState, HoverSet,
    // Motion
    MotionReader, MotionSource, PointerMotionField,
};

pub use transform::{compose, Coefficients, Direction, HeroLayer, RotationOrder};
