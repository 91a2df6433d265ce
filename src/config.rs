//! Configuration - timing, thresholds, motion coefficients and geometry.
//!
//! Every table and field is optional in TOML; missing values fall back to
//! the defaults below, which reproduce the original page.
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::config::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     [reveal]
//!     tick_ms = 20
//!
//!     [motion.orb_primary]
//!     amplitude = 80.0
//! "#)?;
//! assert_eq!(config.reveal.tick_ms, 20);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{self, Result};
use crate::transform::{Coefficients, Direction, HeroLayer, RotationOrder};
use crate::types::SectionId;

// =============================================================================
// ROOT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reveal: RevealConfig,
    pub visibility: VisibilityConfig,
    pub entrance: EntranceConfig,
    pub motion: HeroMotionConfig,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        log::debug!("loaded config: tick {}ms, caret {}ms", config.reveal.tick_ms, config.reveal.caret_blink_ms);
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = error::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }
}

// =============================================================================
// REVEAL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Milliseconds per revealed character.
    pub tick_ms: u64,
    /// Caret half-period. 0 disables blinking.
    pub caret_blink_ms: u64,
}

impl RevealConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn caret_interval(&self) -> Duration {
        Duration::from_millis(self.caret_blink_ms)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            tick_ms: 30,
            caret_blink_ms: 500,
        }
    }
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Intersection thresholds per section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    pub avengers: f32,
    pub pillars: f32,
    pub java_structure: f32,
}

impl VisibilityConfig {
    /// Threshold for a section. The hero has none: it is visible on mount.
    pub fn threshold(&self, section: SectionId) -> Option<f32> {
        match section {
            SectionId::Hero => None,
            SectionId::Avengers => Some(self.avengers),
            SectionId::Pillars => Some(self.pillars),
            SectionId::JavaStructure => Some(self.java_structure),
        }
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            avengers: 0.2,
            pillars: 0.1,
            java_structure: 0.2,
        }
    }
}

// =============================================================================
// ENTRANCE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Delay between consecutive cards of one grid.
    pub stagger_ms: u64,
    /// Resting offset of section headers before reveal, px.
    pub header_offset: f32,
    /// Resting offset of cards before reveal, px.
    pub card_offset: f32,
}

impl EntranceConfig {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 150,
            header_offset: 40.0,
            card_offset: 80.0,
        }
    }
}

// =============================================================================
// HERO MOTION
// =============================================================================

/// Coefficients for each decorative hero layer.
///
/// A layer table in TOML is merged over that layer's preset, so
/// `[motion.headline] yaw = 6.0` keeps the headline's pitch and perspective.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "HeroMotionOverrides")]
pub struct HeroMotionConfig {
    pub orb_primary: Coefficients,
    pub orb_secondary: Coefficients,
    pub code_card_left: Coefficients,
    pub code_card_right: Coefficients,
    pub headline: Coefficients,
    pub badge: Coefficients,
    pub lede: Coefficients,
    pub scroll_hint: Coefficients,
}

impl HeroMotionConfig {
    pub fn get(&self, layer: HeroLayer) -> &Coefficients {
        match layer {
            HeroLayer::OrbPrimary => &self.orb_primary,
            HeroLayer::OrbSecondary => &self.orb_secondary,
            HeroLayer::CodeCardLeft => &self.code_card_left,
            HeroLayer::CodeCardRight => &self.code_card_right,
            HeroLayer::Headline => &self.headline,
            HeroLayer::Badge => &self.badge,
            HeroLayer::Lede => &self.lede,
            HeroLayer::ScrollHint => &self.scroll_hint,
        }
    }
}

impl Default for HeroMotionConfig {
    fn default() -> Self {
        let none = Coefficients::default();
        Self {
            orb_primary: Coefficients {
                amplitude: 50.0,
                parallax: 0.3,
                ..none
            },
            orb_secondary: Coefficients {
                amplitude: 40.0,
                direction: Direction::Oppose,
                parallax: 0.2,
                ..none
            },
            code_card_left: Coefficients {
                yaw: 15.0,
                pitch: -15.0,
                depth: 50.0,
                perspective: 1000.0,
                ..none
            },
            code_card_right: Coefficients {
                yaw: -12.0,
                pitch: -12.0,
                depth: 30.0,
                perspective: 1000.0,
                ..none
            },
            headline: Coefficients {
                yaw: 3.0,
                pitch: 3.0,
                rotation_order: RotationOrder::PitchFirst,
                perspective: 1000.0,
                ..none
            },
            badge: Coefficients {
                parallax: 0.1,
                ..none
            },
            lede: Coefficients {
                parallax: 0.05,
                ..none
            },
            scroll_hint: Coefficients {
                fade_distance: Some(200.0),
                ..none
            },
        }
    }
}

/// Fields named in one `[motion.<layer>]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CoefficientOverrides {
    amplitude: Option<f32>,
    direction: Option<Direction>,
    yaw: Option<f32>,
    pitch: Option<f32>,
    rotation_order: Option<RotationOrder>,
    depth: Option<f32>,
    perspective: Option<f32>,
    parallax: Option<f32>,
    fade_distance: Option<f32>,
}

impl CoefficientOverrides {
    fn over(self, preset: Coefficients) -> Coefficients {
        Coefficients {
            amplitude: self.amplitude.unwrap_or(preset.amplitude),
            direction: self.direction.unwrap_or(preset.direction),
            yaw: self.yaw.unwrap_or(preset.yaw),
            pitch: self.pitch.unwrap_or(preset.pitch),
            rotation_order: self.rotation_order.unwrap_or(preset.rotation_order),
            depth: self.depth.unwrap_or(preset.depth),
            perspective: self.perspective.unwrap_or(preset.perspective),
            parallax: self.parallax.unwrap_or(preset.parallax),
            fade_distance: self.fade_distance.or(preset.fade_distance),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeroMotionOverrides {
    orb_primary: CoefficientOverrides,
    orb_secondary: CoefficientOverrides,
    code_card_left: CoefficientOverrides,
    code_card_right: CoefficientOverrides,
    headline: CoefficientOverrides,
    badge: CoefficientOverrides,
    lede: CoefficientOverrides,
    scroll_hint: CoefficientOverrides,
}

impl From<HeroMotionOverrides> for HeroMotionConfig {
    fn from(overrides: HeroMotionOverrides) -> Self {
        let preset = HeroMotionConfig::default();
        Self {
            orb_primary: overrides.orb_primary.over(preset.orb_primary),
            orb_secondary: overrides.orb_secondary.over(preset.orb_secondary),
            code_card_left: overrides.code_card_left.over(preset.code_card_left),
            code_card_right: overrides.code_card_right.over(preset.code_card_right),
            headline: overrides.headline.over(preset.headline),
            badge: overrides.badge.over(preset.badge),
            lede: overrides.lede.over(preset.lede),
            scroll_hint: overrides.scroll_hint.over(preset.scroll_hint),
        }
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Geometry used to lay the page out. Units are CSS px.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical padding of each non-hero section.
    pub section_padding: f32,
    /// Height reserved for a section's title block.
    pub header_height: f32,
    /// Height reserved below a section's cards.
    pub footer_height: f32,
    /// Concept and pillar card height.
    pub card_height: f32,
    /// Walkthrough step card height.
    pub step_height: f32,
    /// Gap between cards.
    pub card_gap: f32,
    /// Height of the code editor above the steps.
    pub editor_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            section_padding: 96.0,
            header_height: 220.0,
            footer_height: 120.0,
            card_height: 320.0,
            step_height: 140.0,
            card_gap: 24.0,
            editor_height: 360.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_page() {
        let config = Config::default();

        assert_eq!(config.reveal.tick_interval(), Duration::from_millis(30));
        assert_eq!(config.visibility.threshold(SectionId::Hero), None);
        assert_eq!(config.visibility.threshold(SectionId::Avengers), Some(0.2));
        assert_eq!(config.visibility.threshold(SectionId::Pillars), Some(0.1));
        assert_eq!(config.entrance.stagger(), Duration::from_millis(150));
        assert_eq!(config.motion.orb_primary.amplitude, 50.0);
        assert_eq!(config.motion.orb_secondary.direction, Direction::Oppose);
        assert_eq!(config.motion.scroll_hint.fade_distance, Some(200.0));
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let config = Config::from_toml_str(
            r#"
            [reveal]
            tick_ms = 10

            [motion.headline]
            yaw = 6.0
            "#,
        )
        .unwrap();

        assert_eq!(config.reveal.tick_ms, 10);
        assert_eq!(config.reveal.caret_blink_ms, 500);
        assert_eq!(config.motion.headline.yaw, 6.0);
        // The rest of the headline preset survives
        assert_eq!(config.motion.headline.pitch, 3.0);
        assert_eq!(config.motion.headline.perspective, 1000.0);
        assert_eq!(config.motion.headline.rotation_order, RotationOrder::PitchFirst);
        assert_eq!(config.motion.orb_primary.amplitude, 50.0);
    }

    #[test]
    fn test_motion_table_merges_over_preset() {
        let config = Config::from_toml_str(
            r#"
            [motion.orb_secondary]
            parallax = 0.5

            [motion.code_card_left]
            rotation_order = "pitch_first"
            "#,
        )
        .unwrap();

        let defaults = HeroMotionConfig::default();
        let orb = config.motion.orb_secondary;
        assert_eq!(orb.parallax, 0.5);
        assert_eq!(orb.amplitude, 40.0);
        assert_eq!(orb.direction, Direction::Oppose);

        let card = config.motion.code_card_left;
        assert_eq!(card.rotation_order, RotationOrder::PitchFirst);
        assert_eq!(card.depth, defaults.code_card_left.depth);
        assert_eq!(card.yaw, 15.0);

        assert_eq!(config.motion.scroll_hint, defaults.scroll_hint);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = Config::from_toml_str("[reveal\ntick_ms = 1").unwrap_err();
        assert!(matches!(err, crate::Error::Toml(_)));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_layer_lookup() {
        let motion = HeroMotionConfig::default();
        assert_eq!(motion.get(HeroLayer::CodeCardLeft).depth, 50.0);
        assert_eq!(motion.get(HeroLayer::Lede).parallax, 0.05);
    }
}
