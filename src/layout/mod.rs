//! Layout Module - Page geometry
//!
//! Flexbox layout of the page using Taffy.
//!
//! # Architecture
//!
//! The page is a column of four sections. The hero fills the first viewport;
//! every other section is a padded column of a header, its cards and a
//! footer. The computed geometry drives:
//!
//! 1. Visibility - each region's intersection with the scrolled viewport
//! 2. Hit testing - which card a pointer event lands on
//! 3. Scroll bounds and scroll-to-section targets
//! 4. The motion field's reference region (the hero)
//!
//! Layout is recomputed only on resize; it does not depend on expansion or
//! hover state.
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::layout::{compute_page_layout, CardCounts};
//!
//! let counts = CardCounts { avengers: 4, pillars: 4, steps: 4 };
//! let layout = compute_page_layout(1280.0, 800.0, &counts, &config.layout)?;
//! let hit = layout.hit_card(Vec2::new(300.0, 1400.0));
//! ```

mod taffy_bridge;
mod types;

pub use taffy_bridge::{compute_page_layout, TWO_COLUMN_MIN_WIDTH};
pub use types::*;
