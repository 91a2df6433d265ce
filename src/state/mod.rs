//! State Module - Runtime state for reveal and motion
//!
//! This module contains the reactive state machines behind the page:
//!
//! - **Visibility** - one-shot threshold triggers for sections
//! - **Reveal** - staged typewriter reveal, gated and timer-driven
//! - **Caret** - blink clock for the typing caret
//! - **Highlight** - per-step highlight windows and the step selector
//! - **Expansion** - exclusive expand/collapse and hover over card sets
//! - **Motion** - page-scope pointer/scroll sample

pub mod caret;
pub mod expansion;
pub mod highlight;
pub mod motion;
pub mod reveal;
pub mod visibility;

pub use caret::CaretBlink;
pub use expansion::{ExclusiveExpansionSet, ExpansionState, HoverSet};
pub use highlight::{HighlightWindowMap, StepSelector};
pub use motion::{MotionReader, MotionSource, PointerMotionField};
pub use reveal::{RevealPhase, RevealState, StagedTextRevealer};
pub use visibility::{intersection_ratio, ObservationSupport, VisibilityTrigger};
