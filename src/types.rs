//! Core types for spark-reveal.
//!
//! These are the plain values that flow between the state machines and the
//! presentation layer. Nothing here owns reactive state; the `state` module
//! wraps these in signals.

use std::ops::Range;

// =============================================================================
// Geometry
// =============================================================================

/// A 2D vector in CSS-pixel space (or normalized space for pointer samples).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise product.
    #[inline]
    pub fn scale(self, factor: Vec2) -> Self {
        Self::new(self.x * factor.x, self.y * factor.y)
    }

    /// Uniform product.
    #[inline]
    pub fn times(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// True if both components are zero (negative zero included).
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Axis-aligned rectangle. `y` grows downward, matching page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Half-open containment: left/top edges inside, right/bottom outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Overlapping rectangle, or `None` when the two don't overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Same rectangle shifted by `dy` (used to move page rects into viewport space).
    pub fn offset_y(&self, dy: f32) -> Rect {
        Rect::new(self.x, self.y + dy, self.width, self.height)
    }
}

// =============================================================================
// Motion
// =============================================================================

/// Latest pointer/scroll sample.
///
/// `pointer` is normalized to the reference region: (0, 0) is the center,
/// the edges sit at ±0.5. Values slightly beyond ±0.5 are legal when the
/// pointer is outside the region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub pointer: Vec2,
    pub scroll_offset: f32,
}

impl MotionSample {
    /// Pointer never moved, page at the top.
    pub const REST: Self = Self {
        pointer: Vec2::ZERO,
        scroll_offset: 0.0,
    };

    pub const fn new(pointer: Vec2, scroll_offset: f32) -> Self {
        Self {
            pointer,
            scroll_offset,
        }
    }
}

/// Rotation in degrees around the X (pitch) and Y (yaw) axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x_deg: f32,
    pub y_deg: f32,
}

impl Rotation {
    pub const NONE: Self = Self {
        x_deg: 0.0,
        y_deg: 0.0,
    };

    pub const fn new(x_deg: f32, y_deg: f32) -> Self {
        Self { x_deg, y_deg }
    }
}

/// Layered transform derived from a [`MotionSample`]. Never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Pointer-driven translation in px.
    pub translate: Vec2,
    /// Pointer-driven tilt.
    pub rotate: Rotation,
    /// Scroll-driven vertical parallax in px.
    pub parallax_y: f32,
    /// Scroll-driven fade, in `[0, 1]`.
    pub opacity: f32,
}

impl TransformParams {
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        rotate: Rotation::NONE,
        parallax_y: 0.0,
        opacity: 1.0,
    };

    /// True if this transform leaves the element where it is, fully opaque.
    pub fn is_identity(&self) -> bool {
        self.translate.is_zero()
            && self.rotate.x_deg == 0.0
            && self.rotate.y_deg == 0.0
            && self.parallax_y == 0.0
            && self.opacity == 1.0
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// Text reveal
// =============================================================================

/// Character range `[start, end)` styled distinctly while its step is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
pub struct HighlightWindow {
    pub start: usize,
    pub end: usize,
}

impl HighlightWindow {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// How one character of a staged reveal is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStyle {
    /// Not typed yet (dimmed).
    Pending,
    /// Typed, outside the active window.
    Revealed,
    /// Typed and inside the active highlight window.
    Highlighted,
}

/// A run of consecutive characters sharing one style. Ranges are in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub style: CharStyle,
}

// =============================================================================
// Sections
// =============================================================================

/// The sections of the page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    Avengers,
    Pillars,
    JavaStructure,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Hero,
        SectionId::Avengers,
        SectionId::Pillars,
        SectionId::JavaStructure,
    ];

    /// DOM-style anchor id.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Hero => "hero-section",
            SectionId::Avengers => "avengers-section",
            SectionId::Pillars => "pillars-section",
            SectionId::JavaStructure => "java-structure-section",
        }
    }

    /// Position in [`SectionId::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }
}
