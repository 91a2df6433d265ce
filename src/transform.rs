//! Transform Composer - pure motion math.
//!
//! Turns a [`MotionSample`] plus per-element [`Coefficients`] into
//! [`TransformParams`]. Everything here is a pure function: no state, no
//! side effects, identical inputs give bitwise-identical outputs.
//!
//! A zero sample (pointer at the region center, page at the top) always
//! composes to [`TransformParams::IDENTITY`].
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::transform::{compose, HeroLayer};
//!
//! let coeffs = config.motion.get(HeroLayer::OrbPrimary);
//! let params = compose(&sample, coeffs);
//! let css = params.css(coeffs);
//! ```

use std::fmt::Write as _;
use std::time::Duration;

use serde::Deserialize;

use crate::config::HeroMotionConfig;
use crate::types::{MotionSample, Rotation, TransformParams, Vec2};

// =============================================================================
// COEFFICIENTS
// =============================================================================

/// Whether pointer translation follows the pointer or moves against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Follow,
    Oppose,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Follow => 1.0,
            Direction::Oppose => -1.0,
        }
    }
}

/// Order of the two tilt rotations in the rendered transform.
///
/// CSS rotations don't commute, so a layer keeps the order it was designed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationOrder {
    /// `rotateY() rotateX()`
    #[default]
    YawFirst,
    /// `rotateX() rotateY()`
    PitchFirst,
}

/// Static per-element motion coefficients.
///
/// `yaw`/`pitch` are signed independently: yaw multiplies pointer x into a
/// rotation about Y, pitch multiplies pointer y into a rotation about X.
/// `direction` only affects translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coefficients {
    /// Translation in px per unit of normalized pointer.
    pub amplitude: f32,
    pub direction: Direction,
    /// Degrees around Y per unit of pointer x.
    pub yaw: f32,
    /// Degrees around X per unit of pointer y.
    pub pitch: f32,
    pub rotation_order: RotationOrder,
    /// Static `translateZ` in px. 0 = flat.
    pub depth: f32,
    /// Perspective distance in px. 0 = none.
    pub perspective: f32,
    /// Vertical px per px of scroll.
    pub parallax: f32,
    /// Scroll distance over which the element fades out. `None` = never fades.
    pub fade_distance: Option<f32>,
}

// =============================================================================
// COMPOSE
// =============================================================================

/// Compose the transform for one element.
pub fn compose(sample: &MotionSample, coeffs: &Coefficients) -> TransformParams {
    let amplitude = coeffs.amplitude * coeffs.direction.sign();
    let pointer = sample.pointer;

    TransformParams {
        translate: Vec2::new(
            unsigned_zero(pointer.x * amplitude),
            unsigned_zero(pointer.y * amplitude),
        ),
        rotate: Rotation::new(
            unsigned_zero(pointer.y * coeffs.pitch),
            unsigned_zero(pointer.x * coeffs.yaw),
        ),
        parallax_y: unsigned_zero(sample.scroll_offset * coeffs.parallax),
        opacity: fade(sample.scroll_offset, coeffs.fade_distance),
    }
}

/// `max(0, 1 - scroll / distance)`, or fully opaque without a fade distance.
pub fn fade(scroll_offset: f32, fade_distance: Option<f32>) -> f32 {
    match fade_distance {
        Some(distance) if distance > 0.0 => (1.0 - scroll_offset / distance).clamp(0.0, 1.0),
        // A zero distance means "gone as soon as the page moves".
        Some(_) if scroll_offset > 0.0 => 0.0,
        _ => 1.0,
    }
}

/// Fold -0.0 into 0.0 so rendered values never read "-0".
#[inline]
fn unsigned_zero(value: f32) -> f32 {
    value + 0.0
}

// =============================================================================
// CSS
// =============================================================================

impl TransformParams {
    /// Render as a CSS `transform` value.
    ///
    /// Tilted elements render as `perspective() rotateY() rotateX() translateZ()`
    /// (rotations swapped for [`RotationOrder::PitchFirst`]), everything else
    /// as `translate3d() translateY()`. Identity renders as `none`.
    pub fn css(&self, coeffs: &Coefficients) -> String {
        let mut out = String::new();

        if coeffs.perspective > 0.0 {
            let _ = write!(out, "perspective({}px) ", fmt_num(coeffs.perspective));
        }
        if coeffs.yaw != 0.0 || coeffs.pitch != 0.0 {
            let yaw = fmt_num(self.rotate.y_deg);
            let pitch = fmt_num(self.rotate.x_deg);
            let _ = match coeffs.rotation_order {
                RotationOrder::YawFirst => write!(out, "rotateY({yaw}deg) rotateX({pitch}deg) "),
                RotationOrder::PitchFirst => write!(out, "rotateX({pitch}deg) rotateY({yaw}deg) "),
            };
        }
        if coeffs.depth != 0.0 {
            let _ = write!(out, "translateZ({}px) ", fmt_num(coeffs.depth));
        }
        if coeffs.amplitude != 0.0 {
            let _ = write!(
                out,
                "translate3d({}px, {}px, 0) ",
                fmt_num(self.translate.x),
                fmt_num(self.translate.y)
            );
        }
        if coeffs.parallax != 0.0 {
            let _ = write!(out, "translateY({}px) ", fmt_num(self.parallax_y));
        }

        let trimmed = out.trim_end();
        if trimmed.is_empty() {
            "none".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Up to 3 decimals, trailing zeros dropped.
fn fmt_num(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", unsigned_zero(rounded))
}

// =============================================================================
// HERO LAYERS
// =============================================================================

/// Decorative hero elements that follow the motion field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroLayer {
    OrbPrimary,
    OrbSecondary,
    CodeCardLeft,
    CodeCardRight,
    Headline,
    Badge,
    Lede,
    ScrollHint,
}

impl HeroLayer {
    pub const ALL: [HeroLayer; 8] = [
        HeroLayer::OrbPrimary,
        HeroLayer::OrbSecondary,
        HeroLayer::CodeCardLeft,
        HeroLayer::CodeCardRight,
        HeroLayer::Headline,
        HeroLayer::Badge,
        HeroLayer::Lede,
        HeroLayer::ScrollHint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeroLayer::OrbPrimary => "orb_primary",
            HeroLayer::OrbSecondary => "orb_secondary",
            HeroLayer::CodeCardLeft => "code_card_left",
            HeroLayer::CodeCardRight => "code_card_right",
            HeroLayer::Headline => "headline",
            HeroLayer::Badge => "badge",
            HeroLayer::Lede => "lede",
            HeroLayer::ScrollHint => "scroll_hint",
        }
    }

    /// This layer's preset in `motion`.
    pub fn coefficients(self, motion: &HeroMotionConfig) -> &Coefficients {
        motion.get(self)
    }
}

// =============================================================================
// ENTRANCE TRANSITIONS
// =============================================================================

/// Resting state of an element that slides in when its section is revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceParams {
    pub opacity: f32,
    pub translate: Vec2,
    /// Transition delay before the element starts moving.
    pub delay: Duration,
}

/// Hidden at `offset` with opacity 0 until revealed; at rest afterwards.
pub fn entrance(revealed: bool, offset: Vec2, delay: Duration) -> EntranceParams {
    if revealed {
        EntranceParams {
            opacity: 1.0,
            translate: Vec2::ZERO,
            delay,
        }
    } else {
        EntranceParams {
            opacity: 0.0,
            translate: offset,
            delay,
        }
    }
}

/// Card `index` in a grid starts `index * step` after the first.
pub fn stagger_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

// =============================================================================
// CARD TILT
// =============================================================================

/// Hover tilt of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTilt {
    pub rotate: Rotation,
    pub scale: f32,
}

impl CardTilt {
    pub const NEUTRAL: Self = Self {
        rotate: Rotation::NONE,
        scale: 1.0,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Pillar cards lean away from the center column: even indices yaw +5°,
/// odd −5°, both pitch 3°. Expanded cards stay flat.
pub fn pillar_tilt(index: usize, hovered: bool, expanded: bool) -> CardTilt {
    if !hovered || expanded {
        return CardTilt::NEUTRAL;
    }
    let yaw = if index % 2 == 0 { 5.0 } else { -5.0 };
    CardTilt {
        rotate: Rotation::new(3.0, yaw),
        scale: 1.0,
    }
}

/// Concept cards flip slightly toward the viewer while hovered.
pub fn concept_tilt(hovered: bool) -> CardTilt {
    if !hovered {
        return CardTilt::NEUTRAL;
    }
    CardTilt {
        rotate: Rotation::new(-5.0, 10.0),
        scale: 1.05,
    }
}

// =============================================================================
// TESTS
// =============================================================================
