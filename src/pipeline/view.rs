//! View snapshot - everything a presentation layer needs to paint one frame.
//!
//! A `PageView` is a plain value computed from the page's signals. It holds
//! no reactive handles, so it can be diffed, logged or sent elsewhere.

use std::ops::Range;

use crate::transform::{CardTilt, EntranceParams, HeroLayer};
use crate::types::{Rect, SectionId, StyledSpan, TransformParams};

/// One decorative hero element.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerView {
    pub layer: HeroLayer,
    pub transform: TransformParams,
    /// CSS `transform` value for web hosts.
    pub css: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Page coordinates.
    pub rect: Rect,
    pub hovered: bool,
    pub expanded: bool,
    /// Walkthrough steps only: this step drives the highlight.
    pub active: bool,
    pub tilt: CardTilt,
    pub entrance: EntranceParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub id: SectionId,
    /// Page coordinates.
    pub region: Rect,
    pub revealed: bool,
    pub header: EntranceParams,
    pub cards: Vec<CardView>,
}

/// The typed-out code editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeView {
    pub source: String,
    pub revealed_len: usize,
    pub total_len: usize,
    pub complete: bool,
    pub active_step: usize,
    /// Style runs covering the whole source, in chars.
    pub spans: Vec<StyledSpan>,
    pub caret_visible: bool,
    /// Page coordinates of the editor.
    pub rect: Rect,
}

impl CodeView {
    /// The slice of `source` covered by a char range.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let mut indices = self.source.char_indices().map(|(byte, _)| byte);
        let start = indices.clone().nth(range.start).unwrap_or(self.source.len());
        let end = indices.nth(range.end).unwrap_or(self.source.len());
        &self.source[start..end.max(start)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub scroll_offset: f32,
    pub viewport: Rect,
    pub hero: Vec<LayerView>,
    /// In [`SectionId::ALL`] order.
    pub sections: Vec<SectionView>,
    pub code: CodeView,
}

impl PageView {
    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn layer(&self, layer: HeroLayer) -> Option<&LayerView> {
        self.hero.iter().find(|l| l.layer == layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(source: &str) -> CodeView {
        CodeView {
            source: source.to_string(),
            revealed_len: 0,
            total_len: source.chars().count(),
            complete: false,
            active_step: 0,
            spans: Vec::new(),
            caret_visible: true,
            rect: Rect::default(),
        }
    }

    #[test]
    fn test_slice_by_chars() {
        let view = code("héllo wörld");
        assert_eq!(view.slice(0..5), "héllo");
        assert_eq!(view.slice(6..11), "wörld");
        assert_eq!(view.slice(9..40), "ld");
        assert_eq!(view.slice(40..50), "");
    }
}
