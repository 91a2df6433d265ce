//! Page API - the controller that owns every section's state.
//!
//! `Page::mount` wires the state machines together; the host then feeds it
//! [`Intent`]s and timer ticks, and paints from [`Page::view`].
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::pipeline::{Intent, Page};
//!
//! let mut page = Page::mount(content, config, Vec2::new(1280.0, 800.0), ObservationSupport::Available)?;
//!
//! loop {
//!     let now = started.elapsed();
//!     let mut changed = page.tick(now);
//!     if let Some(intent) = next_intent() {
//!         changed |= page.dispatch(intent, now);
//!     }
//!     if changed.needs_repaint() {
//!         paint(&page.view());
//!     }
//! }
//!
//! page.teardown();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{derived, Derived};

use crate::config::Config;
use crate::content::PageContent;
use crate::error::Result;
use crate::layout::{compute_page_layout, CardCounts, PageLayout};
use crate::state::motion::{MotionSource, PointerMotionField};
use crate::state::{
    intersection_ratio, CaretBlink, ExclusiveExpansionSet, HighlightWindowMap, HoverSet,
    ObservationSupport, StagedTextRevealer, StepSelector, VisibilityTrigger,
};
use crate::transform::{
    compose, concept_tilt, entrance, pillar_tilt, stagger_delay, CardTilt, HeroLayer,
};
use crate::types::{MotionSample, SectionId, TransformParams, Vec2};

use super::intent::{Changed, Intent};
use super::view::{CardView, CodeView, LayerView, PageView, SectionView};

type HeroTransforms = [TransformParams; 8];
type HeroDerived = Derived<HeroTransforms>;

// =============================================================================
// CODE WALKTHROUGH
// =============================================================================

/// Revealer, highlight windows, active step and caret of the Java section.
struct CodeWalkthrough {
    revealer: StagedTextRevealer,
    highlights: HighlightWindowMap,
    steps: StepSelector,
    caret: CaretBlink,
}

impl CodeWalkthrough {
    fn new(content: &PageContent, config: &Config, now: Duration) -> Self {
        let java = &content.java_structure;
        let mut revealer = StagedTextRevealer::new();
        revealer.start(java.source.clone(), config.reveal.tick_interval(), now);

        Self {
            revealer,
            highlights: java.highlight_map(),
            steps: StepSelector::new(java.steps.len()),
            caret: CaretBlink::new(config.reveal.caret_interval(), now),
        }
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// The mounted page.
pub struct Page {
    config: Config,
    content: PageContent,
    layout: PageLayout,
    scroll_offset: f32,
    /// Last pointer position (viewport px), for re-hit-testing on scroll.
    pointer: Option<Vec2>,
    triggers: [VisibilityTrigger; 4],
    /// Sections revealed since the last drain, filled by `on_reveal`.
    newly_revealed: Rc<RefCell<Vec<SectionId>>>,
    /// This page's pointer/scroll listeners; the motion field is their only writer.
    motion_source: MotionSource,
    motion: PointerMotionField,
    hero: HeroDerived,
    pillars: ExclusiveExpansionSet,
    pillar_hover: HoverSet,
    concept_hover: HoverSet,
    code: CodeWalkthrough,
    cleanups: Vec<Box<dyn FnOnce()>>,
    torn_down: bool,
}

impl Page {
    /// Mount the page for a `viewport` (px) at time zero.
    ///
    /// Sets up:
    /// 1. Page layout
    /// 2. One visibility trigger per section (the hero starts revealed)
    /// 3. The motion field over the hero and the derived hero transforms
    /// 4. Expansion/hover sets and the code walkthrough (reveal armed,
    ///    gated on the Java section becoming visible)
    pub fn mount(
        content: PageContent,
        config: Config,
        viewport: Vec2,
        support: ObservationSupport,
    ) -> Result<Self> {
        let counts = CardCounts {
            avengers: content.avengers.concepts.len(),
            pillars: content.pillars.len(),
            steps: content.java_structure.steps.len(),
        };
        let layout = compute_page_layout(viewport.x, viewport.y, &counts, &config.layout)?;

        let triggers = SectionId::ALL.map(|id| match config.visibility.threshold(id) {
            Some(threshold) => VisibilityTrigger::new(threshold, support),
            None => VisibilityTrigger::revealed(),
        });

        let motion_source = MotionSource::new();
        let motion = PointerMotionField::attach_to(&motion_source, layout.region(SectionId::Hero));
        let hero = hero_derived(&motion, &config);
        let code = CodeWalkthrough::new(&content, &config, Duration::ZERO);

        let mut page = Self {
            pillars: ExclusiveExpansionSet::new(counts.pillars),
            pillar_hover: HoverSet::new(counts.pillars),
            concept_hover: HoverSet::new(counts.avengers),
            config,
            content,
            layout,
            scroll_offset: 0.0,
            pointer: None,
            triggers,
            newly_revealed: Rc::new(RefCell::new(Vec::new())),
            motion_source,
            motion,
            hero,
            code,
            cleanups: Vec::new(),
            torn_down: false,
        };

        for id in SectionId::ALL {
            let queue = page.newly_revealed.clone();
            let cleanup = page.triggers[id.ordinal()].on_reveal(move || queue.borrow_mut().push(id));
            page.cleanups.push(cleanup);
        }

        page.observe_viewport();
        page.drain_reveals(Duration::ZERO);

        log::debug!(
            "page mounted: {}x{}, content height {}",
            viewport.x,
            viewport.y,
            page.layout.content_height()
        );
        Ok(page)
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    /// Apply one intent at time `now`. Returns what changed.
    pub fn dispatch(&mut self, intent: Intent, now: Duration) -> Changed {
        if self.torn_down {
            log::trace!("{:?} ignored, page torn down", intent);
            return Changed::empty();
        }

        let mut changed = match intent {
            Intent::PointerMoved { x, y } => self.pointer_moved(Vec2::new(x, y)),
            Intent::PointerDown { x, y } => {
                let point = self.to_page(Vec2::new(x, y));
                match self.layout.hit_card(point) {
                    Some((section, index)) => self.card_clicked(section, index),
                    None => Changed::empty(),
                }
            }
            Intent::Scrolled { offset } => self.scrolled(offset),
            Intent::CardClicked { section, index } => self.card_clicked(section, index),
            Intent::StepSelected { index } => {
                if self.code.steps.select(index) {
                    Changed::STEP
                } else {
                    Changed::empty()
                }
            }
            Intent::RegionBecameVisible { section, ratio } => {
                self.triggers[section.ordinal()].observe(ratio);
                Changed::empty()
            }
            Intent::Resized { width, height } => self.resized(width, height),
        };

        changed |= self.drain_reveals(now);
        changed
    }

    /// Advance timers to `now`. Returns what changed.
    pub fn tick(&mut self, now: Duration) -> Changed {
        if self.torn_down {
            return Changed::empty();
        }

        let mut changed = Changed::empty();
        if self.code.revealer.advance_to(now) > 0 {
            changed |= Changed::REVEAL;
        }
        if self.caret_active() && self.code.caret.tick(now) {
            changed |= Changed::CARET;
        }
        changed
    }

    /// Earliest time `tick` has work to do, or `None` if idle.
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.torn_down {
            return None;
        }
        let reveal = self.code.revealer.next_deadline();
        let caret = self
            .caret_active()
            .then(|| self.code.caret.next_deadline())
            .flatten();
        match (reveal, caret) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel timers, stop observing and detach listeners. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.code.revealer.cancel();
        for trigger in &mut self.triggers {
            trigger.disconnect();
        }
        self.motion.detach();
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        log::debug!("page torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Scroll offset that brings `section` to the top of the viewport.
    pub fn scroll_target(&self, section: SectionId) -> f32 {
        self.layout.section_offset(section)
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.triggers[section.ordinal()].is_revealed()
    }

    pub fn expanded_pillar(&self) -> Option<usize> {
        self.pillars.expanded_index()
    }

    pub fn hovered_card(&self, section: SectionId) -> Option<usize> {
        match section {
            SectionId::Avengers => self.concept_hover.hovered(),
            SectionId::Pillars => self.pillar_hover.hovered(),
            _ => None,
        }
    }

    pub fn active_step(&self) -> usize {
        self.code.steps.active()
    }

    pub fn revealed_len(&self) -> usize {
        self.code.revealer.revealed_len()
    }

    pub fn revealed_text(&self) -> &str {
        self.code.revealer.revealed_text()
    }

    pub fn motion_sample(&self) -> MotionSample {
        self.motion.sample()
    }

    pub fn hero_transform(&self, layer: HeroLayer) -> TransformParams {
        let transforms = self.hero.get();
        HeroLayer::ALL
            .iter()
            .position(|&l| l == layer)
            .map(|i| transforms[i])
            .unwrap_or(TransformParams::IDENTITY)
    }

    /// The listeners behind this page's motion sample.
    pub fn motion_source(&self) -> &MotionSource {
        &self.motion_source
    }

    /// Run `f` on every motion sample change. Returns a stop closure.
    pub fn subscribe_motion<F>(&self, f: F) -> Box<dyn FnOnce()>
    where
        F: Fn(MotionSample) + 'static,
    {
        self.motion.subscribe(f)
    }

    /// Snapshot for painting.
    pub fn view(&self) -> PageView {
        let transforms = self.hero.get();
        let hero = HeroLayer::ALL
            .into_iter()
            .zip(transforms)
            .map(|(layer, transform)| LayerView {
                layer,
                transform,
                css: transform.css(layer.coefficients(&self.config.motion)),
            })
            .collect();

        PageView {
            scroll_offset: self.scroll_offset,
            viewport: self.layout.viewport_rect(self.scroll_offset),
            hero,
            sections: SectionId::ALL.into_iter().map(|id| self.section_view(id)).collect(),
            code: self.code_view(),
        }
    }

    // -------------------------------------------------------------------------
    // Intent handlers
    // -------------------------------------------------------------------------

    fn pointer_moved(&mut self, at: Vec2) -> Changed {
        self.pointer = Some(at);

        let before = self.motion.sample();
        self.motion_source.dispatch_pointer_move(at);

        let mut changed = self.update_hover();
        if self.motion.sample() != before {
            changed |= Changed::MOTION;
        }
        changed
    }

    fn scrolled(&mut self, offset: f32) -> Changed {
        let offset = offset.clamp(0.0, self.layout.max_scroll());
        if offset == self.scroll_offset {
            return Changed::empty();
        }
        self.scroll_offset = offset;
        log::trace!("scrolled to {}", offset);

        let before = self.motion.sample();
        self.motion
            .set_region(self.layout.region(SectionId::Hero).offset_y(-offset));
        self.motion_source.dispatch_scroll(offset);

        let mut changed = self.update_hover();
        if self.motion.sample() != before {
            changed |= Changed::MOTION;
        }
        self.observe_viewport();
        changed
    }

    fn card_clicked(&mut self, section: SectionId, index: usize) -> Changed {
        let moved = match section {
            SectionId::Pillars => self.pillars.toggle(index),
            SectionId::JavaStructure => self.code.steps.select(index),
            // Concept cards are hover-only
            SectionId::Avengers | SectionId::Hero => {
                log::trace!("click on {:?} card {} ignored", section, index);
                false
            }
        };
        match (moved, section) {
            (true, SectionId::Pillars) => Changed::EXPANSION,
            (true, _) => Changed::STEP,
            (false, _) => Changed::empty(),
        }
    }

    fn resized(&mut self, width: f32, height: f32) -> Changed {
        let counts = CardCounts {
            avengers: self.content.avengers.concepts.len(),
            pillars: self.content.pillars.len(),
            steps: self.content.java_structure.steps.len(),
        };
        match compute_page_layout(width, height, &counts, &self.config.layout) {
            Ok(layout) => self.layout = layout,
            Err(err) => {
                log::warn!("resize ignored: {}", err);
                return Changed::empty();
            }
        }

        self.scroll_offset = self.scroll_offset.clamp(0.0, self.layout.max_scroll());
        self.motion
            .set_region(self.layout.region(SectionId::Hero).offset_y(-self.scroll_offset));
        self.observe_viewport();
        Changed::LAYOUT | self.update_hover()
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn to_page(&self, viewport_point: Vec2) -> Vec2 {
        Vec2::new(viewport_point.x, viewport_point.y + self.scroll_offset)
    }

    /// Feed every section its current intersection ratio.
    fn observe_viewport(&mut self) {
        let viewport = self.layout.viewport_rect(self.scroll_offset);
        for id in SectionId::ALL {
            let ratio = intersection_ratio(&self.layout.region(id), &viewport);
            self.triggers[id.ordinal()].observe(ratio);
        }
    }

    /// Act on sections revealed since the last call.
    fn drain_reveals(&mut self, now: Duration) -> Changed {
        let revealed = std::mem::take(&mut *self.newly_revealed.borrow_mut());
        if revealed.is_empty() {
            return Changed::empty();
        }

        let mut changed = Changed::VISIBILITY;
        for &id in &revealed {
            log::debug!("section {:?} revealed", id);
            if id == SectionId::JavaStructure {
                let before = self.code.revealer.revealed_len();
                self.code.revealer.set_gate(true, now);
                self.code.caret.reset(now);
                if self.code.revealer.revealed_len() != before {
                    changed |= Changed::REVEAL;
                }
            }
        }
        changed
    }

    fn update_hover(&mut self) -> Changed {
        let hit = self
            .pointer
            .and_then(|at| self.layout.hit_card(self.to_page(at)));

        let concept = hit.and_then(|(s, i)| (s == SectionId::Avengers).then_some(i));
        let pillar = hit.and_then(|(s, i)| (s == SectionId::Pillars).then_some(i));

        let moved = self.concept_hover.hover(concept) | self.pillar_hover.hover(pillar);
        if moved {
            Changed::HOVER
        } else {
            Changed::empty()
        }
    }

    fn caret_active(&self) -> bool {
        self.is_revealed(SectionId::JavaStructure)
    }

    fn section_view(&self, id: SectionId) -> SectionView {
        let revealed = self.is_revealed(id);
        let entrance_cfg = &self.config.entrance;
        let stagger = entrance_cfg.stagger();
        let card_offset = Vec2::new(0.0, entrance_cfg.card_offset);

        let cards = self
            .layout
            .cards(id)
            .iter()
            .enumerate()
            .map(|(i, &rect)| {
                let (hovered, expanded, active, tilt, offset, delay) = match id {
                    SectionId::Avengers => {
                        let hovered = self.concept_hover.is_hovered(i);
                        (hovered, false, false, concept_tilt(hovered), card_offset, stagger_delay(i, stagger))
                    }
                    SectionId::Pillars => {
                        let hovered = self.pillar_hover.is_hovered(i);
                        let expanded = self.pillars.is_expanded(i);
                        let tilt = pillar_tilt(i, hovered, expanded);
                        (hovered, expanded, false, tilt, card_offset, stagger_delay(i, stagger))
                    }
                    SectionId::JavaStructure => {
                        let offset = Vec2::new(entrance_cfg.header_offset, 0.0);
                        let active = self.code.steps.is_active(i);
                        (false, false, active, CardTilt::NEUTRAL, offset, Duration::ZERO)
                    }
                    SectionId::Hero => (false, false, false, CardTilt::NEUTRAL, Vec2::ZERO, Duration::ZERO),
                };
                CardView {
                    rect,
                    hovered,
                    expanded,
                    active,
                    tilt,
                    entrance: entrance(revealed, offset, delay),
                }
            })
            .collect();

        SectionView {
            id,
            region: self.layout.region(id),
            revealed,
            header: entrance(
                revealed,
                Vec2::new(0.0, entrance_cfg.header_offset),
                Duration::ZERO,
            ),
            cards,
        }
    }

    fn code_view(&self) -> CodeView {
        let revealer = &self.code.revealer;
        let source = self.content.java_structure.source.clone();
        let total_len = revealer
            .state()
            .map(|s| s.total_len())
            .unwrap_or_else(|| source.chars().count());
        let revealed_len = revealer.revealed_len();
        let active_step = self.code.steps.active();

        CodeView {
            spans: self.code.highlights.spans(total_len, revealed_len, active_step),
            source,
            revealed_len,
            total_len,
            complete: revealer.is_complete(),
            active_step,
            caret_visible: self.code.caret.is_visible(),
            rect: self.layout.editor(),
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("scroll_offset", &self.scroll_offset)
            .field("triggers", &self.triggers)
            .field("motion", &self.motion)
            .field("pillars", &self.pillars)
            .field("revealer", &self.code.revealer)
            .field("steps", &self.code.steps)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

/// Hero layer transforms, recomputed whenever the motion sample changes.
fn hero_derived(motion: &PointerMotionField, config: &Config) -> HeroDerived {
    let reader = motion.reader();
    let coeffs = config.motion.clone();
    let compute: Box<dyn Fn() -> HeroTransforms> = Box::new(move || {
        let sample = reader.get();
        HeroLayer::ALL.map(|layer| compose(&sample, layer.coefficients(&coeffs)))
    });
    derived(compute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharStyle;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

    fn setup() -> Page {
        let content = PageContent::builtin().unwrap();
        Page::mount(content, Config::default(), VIEWPORT, ObservationSupport::Available).unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_mount_initial_state() {
        let page = setup();
        assert!(page.is_revealed(SectionId::Hero));
        assert!(!page.is_revealed(SectionId::JavaStructure));
        assert_eq!(page.expanded_pillar(), None);
        assert_eq!(page.active_step(), 0);
        assert_eq!(page.revealed_len(), 0);
        // Reveal is gated, caret parked: nothing to wake for
        assert_eq!(page.next_deadline(), None);
    }

    #[test]
    fn test_mount_rejects_empty_viewport() {
        let content = PageContent::builtin().unwrap();
        let page = Page::mount(content, Config::default(), Vec2::ZERO, ObservationSupport::Available);
        assert!(page.is_err());
    }

    #[test]
    fn test_reveal_waits_for_java_section() {
        let mut page = setup();
        page.tick(ms(3000));
        assert_eq!(page.revealed_len(), 0);

        let target = page.scroll_target(SectionId::JavaStructure);
        let changed = page.dispatch(Intent::Scrolled { offset: target }, ms(3000));
        assert!(changed.contains(Changed::VISIBILITY));
        assert!(page.is_revealed(SectionId::JavaStructure));
        assert_eq!(page.next_deadline(), Some(ms(3030)));

        assert!(page.tick(ms(3030)).contains(Changed::REVEAL));
        assert_eq!(page.revealed_len(), 1);
        page.tick(ms(3090));
        assert_eq!(page.revealed_text(), "imp");
    }

    #[test]
    fn test_fallback_reveals_everything() {
        let content = PageContent::builtin().unwrap();
        let mut page =
            Page::mount(content, Config::default(), VIEWPORT, ObservationSupport::Unavailable).unwrap();
        for id in SectionId::ALL {
            assert!(page.is_revealed(id));
        }
        page.tick(ms(30));
        assert_eq!(page.revealed_len(), 1);
    }

    #[test]
    fn test_pillar_click_toggles() {
        let mut page = setup();
        let card = page.layout().cards(SectionId::Pillars)[2];
        let offset = page.scroll_target(SectionId::Pillars);
        page.dispatch(Intent::Scrolled { offset }, ms(0));

        let at = card.center();
        let down = Intent::PointerDown { x: at.x, y: at.y - page.scroll_offset() };
        assert_eq!(page.dispatch(down, ms(10)), Changed::EXPANSION);
        assert_eq!(page.expanded_pillar(), Some(2));

        page.dispatch(down, ms(20));
        assert_eq!(page.expanded_pillar(), None);
    }

    #[test]
    fn test_avengers_click_ignored() {
        let mut page = setup();
        let changed = page.dispatch(Intent::CardClicked { section: SectionId::Avengers, index: 0 }, ms(0));
        assert!(changed.is_empty());
    }

    #[test]
    fn test_step_click_selects() {
        let mut page = setup();
        let changed =
            page.dispatch(Intent::CardClicked { section: SectionId::JavaStructure, index: 2 }, ms(0));
        assert_eq!(changed, Changed::STEP);
        assert_eq!(page.active_step(), 2);
        assert!(page.dispatch(Intent::StepSelected { index: 2 }, ms(0)).is_empty());
        assert!(page.dispatch(Intent::StepSelected { index: 9 }, ms(0)).is_empty());
    }

    #[test]
    fn test_pointer_drives_hero_and_hover() {
        let mut page = setup();
        let changed = page.dispatch(Intent::PointerMoved { x: 1280.0, y: 400.0 }, ms(0));
        assert!(changed.contains(Changed::MOTION));
        assert_eq!(page.motion_sample().pointer, Vec2::new(0.5, 0.0));
        assert_eq!(
            page.hero_transform(HeroLayer::OrbPrimary).translate,
            Vec2::new(25.0, 0.0)
        );

        let card = page.layout().cards(SectionId::Avengers)[1];
        let offset = page.scroll_target(SectionId::Avengers);
        page.dispatch(Intent::Scrolled { offset }, ms(0));
        let at = card.center();
        let changed = page.dispatch(Intent::PointerMoved { x: at.x, y: at.y - offset }, ms(0));
        assert!(changed.contains(Changed::HOVER));
        assert_eq!(page.hovered_card(SectionId::Avengers), Some(1));

        let view = page.view();
        let concepts = view.section(SectionId::Avengers).unwrap();
        assert!(concepts.cards[1].hovered);
        assert_eq!(concepts.cards[1].tilt.scale, 1.05);
    }

    #[test]
    fn test_scroll_clamped_and_fades_hint() {
        let mut page = setup();
        page.dispatch(Intent::Scrolled { offset: -50.0 }, ms(0));
        assert_eq!(page.scroll_offset(), 0.0);

        page.dispatch(Intent::Scrolled { offset: 100.0 }, ms(0));
        assert_eq!(page.hero_transform(HeroLayer::ScrollHint).opacity, 0.5);

        page.dispatch(Intent::Scrolled { offset: 1.0e9 }, ms(0));
        assert_eq!(page.scroll_offset(), page.layout().max_scroll());
    }

    #[test]
    fn test_view_code_spans() {
        let mut page = setup();
        page.dispatch(Intent::RegionBecameVisible { section: SectionId::JavaStructure, ratio: 0.5 }, ms(0));
        page.tick(ms(30 * 30));

        let code = page.view().code;
        assert_eq!(code.revealed_len, 30);
        assert_eq!(code.spans[0].style, CharStyle::Highlighted);
        assert_eq!(code.spans[0].range, 0..27);
        assert_eq!(code.spans.last().map(|s| s.style), Some(CharStyle::Pending));
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut page = setup();
        page.dispatch(Intent::RegionBecameVisible { section: SectionId::JavaStructure, ratio: 1.0 }, ms(0));
        let source = page.motion_source().clone();
        assert_eq!(source.listener_count(), (1, 1));

        page.teardown();
        assert_eq!(source.listener_count(), (0, 0));
        assert_eq!(page.next_deadline(), None);
        assert!(page.tick(ms(10_000)).is_empty());
        assert_eq!(page.revealed_len(), 0);
        assert!(page.dispatch(Intent::StepSelected { index: 1 }, ms(0)).is_empty());
    }

    #[test]
    fn test_pages_do_not_share_motion() {
        let mut a = setup();
        let b = setup();

        a.dispatch(Intent::Scrolled { offset: 100.0 }, ms(0));
        a.dispatch(Intent::PointerMoved { x: 1280.0, y: 400.0 }, ms(0));
        assert_eq!(a.motion_sample().scroll_offset, 100.0);

        assert_eq!(b.scroll_offset(), 0.0);
        assert_eq!(b.motion_sample(), MotionSample::REST);
        assert_eq!(b.hero_transform(HeroLayer::ScrollHint).opacity, 1.0);
        assert_eq!(b.motion_source().listener_count(), (1, 1));
    }

    #[test]
    fn test_resize_relayouts() {
        let mut page = setup();
        let changed = page.dispatch(Intent::Resized { width: 480.0, height: 600.0 }, ms(0));
        assert!(changed.contains(Changed::LAYOUT));
        assert_eq!(page.layout().viewport(), Vec2::new(480.0, 600.0));

        assert!(page.dispatch(Intent::Resized { width: 0.0, height: 600.0 }, ms(0)).is_empty());
        assert_eq!(page.layout().viewport(), Vec2::new(480.0, 600.0));
    }
}
