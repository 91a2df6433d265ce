//! Page intents and change flags.

use bitflags::bitflags;

use crate::types::SectionId;

/// Something the host (or a user) asks the page to do.
///
/// Pointer coordinates are viewport px; scroll offsets are page px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Pointer moved to `(x, y)` in the viewport.
    PointerMoved { x: f32, y: f32 },
    /// Primary button pressed at `(x, y)`. Hit-tested into `CardClicked`.
    PointerDown { x: f32, y: f32 },
    /// Page scrolled to absolute `offset`.
    Scrolled { offset: f32 },
    CardClicked { section: SectionId, index: usize },
    StepSelected { index: usize },
    /// An external observer measured `section` at `ratio` visible.
    RegionBecameVisible { section: SectionId, ratio: f32 },
    Resized { width: f32, height: f32 },
}

bitflags! {
    /// Which parts of the view changed after a dispatch or tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Changed: u16 {
        const VISIBILITY = 1 << 0;
        const REVEAL = 1 << 1;
        const STEP = 1 << 2;
        const EXPANSION = 1 << 3;
        const HOVER = 1 << 4;
        const MOTION = 1 << 5;
        const LAYOUT = 1 << 6;
        const CARET = 1 << 7;
    }
}

impl Changed {
    /// True if anything needs a repaint.
    pub fn needs_repaint(self) -> bool {
        !self.is_empty()
    }
}
