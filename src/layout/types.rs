//! Layout output types.

use crate::types::{Rect, SectionId, Vec2};

/// How many cards each section lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardCounts {
    pub avengers: usize,
    pub pillars: usize,
    pub steps: usize,
}

impl CardCounts {
    pub fn get(&self, section: SectionId) -> usize {
        match section {
            SectionId::Hero => 0,
            SectionId::Avengers => self.avengers,
            SectionId::Pillars => self.pillars,
            SectionId::JavaStructure => self.steps,
        }
    }
}

/// One section's region and its card rectangles, in page coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionLayout {
    pub region: Rect,
    pub cards: Vec<Rect>,
}

/// Computed page geometry. All rects are absolute page coordinates
/// (y = 0 is the top of the page, not of the viewport).
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub(super) viewport: Vec2,
    pub(super) sections: [SectionLayout; 4],
    pub(super) editor: Rect,
    pub(super) content_height: f32,
}

impl PageLayout {
    /// Viewport size the layout was computed for.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn section(&self, id: SectionId) -> &SectionLayout {
        &self.sections[id.ordinal()]
    }

    pub fn region(&self, id: SectionId) -> Rect {
        self.section(id).region
    }

    pub fn cards(&self, id: SectionId) -> &[Rect] {
        &self.section(id).cards
    }

    /// The walkthrough code editor.
    pub fn editor(&self) -> Rect {
        self.editor
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.y).max(0.0)
    }

    /// Scroll offset that puts the top of `id` at the top of the viewport.
    pub fn section_offset(&self, id: SectionId) -> f32 {
        self.region(id).y.clamp(0.0, self.max_scroll())
    }

    /// The visible page rectangle at scroll offset `scroll`.
    pub fn viewport_rect(&self, scroll: f32) -> Rect {
        Rect::new(0.0, scroll, self.viewport.x, self.viewport.y)
    }

    /// Which card (if any) contains `point` (page coordinates).
    pub fn hit_card(&self, point: Vec2) -> Option<(SectionId, usize)> {
        SectionId::ALL.into_iter().find_map(|id| {
            self.cards(id)
                .iter()
                .position(|card| card.contains(point))
                .map(|index| (id, index))
        })
    }
}
