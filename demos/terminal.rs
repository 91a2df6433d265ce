//! Terminal Demo - the whole page in a terminal
//!
//! This demo drives a `Page` from crossterm events:
//! - Mouse moves tilt and shift the hero layers, hover concept cards
//! - Wheel / arrows / PageUp / PageDown / Home / End scroll
//! - Clicking a pillar expands it; clicking a step (or pressing 1-4) selects it
//! - Enter jumps to the first section ("Start Learning")
//! - q / Esc quits
//!
//! Run with: cargo run --example terminal [page.toml]
//! Logs go to stderr: RUST_LOG=spark_reveal=debug cargo run --example terminal 2>log.txt

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use spark_reveal::input::{disable_mouse, enable_mouse, poll_event, InputAdapter};
use spark_reveal::pipeline::{CodeView, PageView, SectionView};
use spark_reveal::{
    Changed, CharStyle, Config, HeroLayer, ObservationSupport, Page, PageContent, Rect, SectionId,
    Vec2,
};

/// Page px per terminal cell.
const CELL: Vec2 = Vec2::new(8.0, 16.0);

/// Geometry scaled down for a terminal.
const TERMINAL_LAYOUT: &str = r#"
[layout]
section_padding = 32.0
header_height = 48.0
footer_height = 16.0
card_height = 80.0
step_height = 48.0
card_gap = 16.0
editor_height = 160.0
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let content = match std::env::args().nth(1) {
        Some(path) => PageContent::load(path)?,
        None => PageContent::builtin()?,
    };
    let config = Config::from_toml_str(TERMINAL_LAYOUT)?;

    let (cols, rows) = terminal::size()?;
    let viewport = Vec2::new(f32::from(cols) * CELL.x, f32::from(rows) * CELL.y);
    let mut page = Page::mount(content, config, viewport, ObservationSupport::Available)?;
    let mut input = InputAdapter::new(CELL, viewport.y, page.layout().max_scroll());

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
    enable_mouse()?;

    let result = run(&mut page, &mut input);

    page.teardown();
    let _ = disable_mouse();
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(page: &mut Page, input: &mut InputAdapter) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    let mut out = io::stdout();
    paint(&mut out, &page.view())?;

    loop {
        let now = started.elapsed();
        let timeout = page
            .next_deadline()
            .map(|due| due.saturating_sub(now))
            .unwrap_or(Duration::from_millis(250));

        let mut changed = Changed::empty();
        if let Some(event) = poll_event(timeout)? {
            if is_quit(&event) {
                return Ok(());
            }

            let intent = if is_enter(&event) {
                input.scroll_to(page.scroll_target(SectionId::Avengers))
            } else {
                input.translate(&event)
            };
            if let Some(intent) = intent {
                changed |= page.dispatch(intent, started.elapsed());
            }
            if changed.contains(Changed::LAYOUT) {
                let layout = page.layout();
                input.set_bounds(layout.viewport().y, layout.max_scroll());
            }
        }

        changed |= page.tick(started.elapsed());
        if changed.needs_repaint() {
            paint(&mut out, &page.view())?;
        }
    }
}

fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        }
        _ => false,
    }
}

fn is_enter(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press && key.code == KeyCode::Enter)
}

// =============================================================================
// PAINTING
// =============================================================================

/// Maps page px to screen cells for one frame.
struct Screen {
    scroll: f32,
    cols: u16,
    rows: u16,
}

impl Screen {
    fn new(view: &PageView) -> Self {
        Self {
            scroll: view.scroll_offset,
            cols: (view.viewport.width / CELL.x) as u16,
            rows: (view.viewport.height / CELL.y) as u16,
        }
    }

    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / CELL.x).floor();
        let row = ((y - self.scroll) / CELL.y).floor();
        let visible = col >= 0.0 && row >= 0.0 && col < f32::from(self.cols) && row < f32::from(self.rows);
        visible.then_some((col as u16, row as u16))
    }

    fn text(&self, out: &mut impl Write, x: f32, y: f32, text: &str, color: Color) -> io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let room = usize::from(self.cols - col);
        let clipped: String = text.chars().take(room).collect();
        queue!(out, cursor::MoveTo(col, row), SetForegroundColor(color), Print(clipped), ResetColor)
    }

    fn frame(&self, out: &mut impl Write, rect: Rect, color: Color) -> io::Result<()> {
        let width = (rect.width / CELL.x) as usize;
        if width < 2 {
            return Ok(());
        }
        let bar = "─".repeat(width - 2);
        self.text(out, rect.x, rect.y, &format!("┌{bar}┐"), color)?;
        self.text(out, rect.x, rect.bottom() - CELL.y, &format!("└{bar}┘"), color)
    }
}

fn paint(out: &mut impl Write, view: &PageView) -> io::Result<()> {
    let screen = Screen::new(view);
    queue!(out, Clear(ClearType::All))?;

    paint_hero(out, &screen, view)?;
    for section in view.sections.iter().filter(|s| s.id != SectionId::Hero) {
        paint_section(out, &screen, section)?;
    }
    if view.section(SectionId::JavaStructure).is_some_and(|s| s.revealed) {
        paint_code(out, &screen, &view.code)?;
    }

    out.flush()
}

fn paint_hero(out: &mut impl Write, screen: &Screen, view: &PageView) -> io::Result<()> {
    let Some(hero) = view.section(SectionId::Hero) else {
        return Ok(());
    };
    let center = hero.region.center();

    // Orbs drift with the pointer and sink with the scroll
    for (layer, glyph, color) in [
        (HeroLayer::OrbPrimary, "●", Color::Cyan),
        (HeroLayer::OrbSecondary, "○", Color::Magenta),
    ] {
        if let Some(l) = view.layer(layer) {
            let t = l.transform;
            let x = center.x + t.translate.x;
            let y = center.y - 3.0 * CELL.y + t.translate.y + t.parallax_y;
            screen.text(out, x, y, glyph, color)?;
        }
    }

    let headline = view.layer(HeroLayer::Headline).map(|l| l.transform.rotate.y_deg).unwrap_or(0.0);
    let lean = if headline > 1.0 { "  ⟩" } else if headline < -1.0 { "⟨  " } else { "   " };
    screen.text(out, CELL.x * 2.0, center.y, &format!("{lean} Object-Oriented Programming Basics"), Color::White)?;

    if let Some(hint) = view.layer(HeroLayer::ScrollHint) {
        if hint.transform.opacity > 0.5 {
            screen.text(out, center.x - 4.0 * CELL.x, hero.region.bottom() - 2.0 * CELL.y, "scroll ↓", Color::DarkGrey)?;
        }
    }
    Ok(())
}

fn paint_section(out: &mut impl Write, screen: &Screen, section: &SectionView) -> io::Result<()> {
    if section.header.opacity == 0.0 {
        return Ok(());
    }
    let region = section.region;
    let title = match section.id {
        SectionId::Avengers => "The Avengers Assembly: OOP in Action",
        SectionId::Pillars => "The Four Pillars",
        SectionId::JavaStructure => "Program Structure in Java",
        SectionId::Hero => "",
    };
    queue!(out, SetAttribute(Attribute::Bold))?;
    screen.text(out, region.x + 2.0 * CELL.x, region.y + 2.0 * CELL.y, title, Color::White)?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    for (i, card) in section.cards.iter().enumerate() {
        let color = if card.expanded || card.active {
            Color::Green
        } else if card.hovered {
            Color::Yellow
        } else {
            Color::DarkGrey
        };
        screen.frame(out, card.rect, color)?;

        let mut label = format!(" #{} ", i + 1);
        if !card.tilt.is_neutral() {
            label.push_str(&format!("tilt {:+.0}°", card.tilt.rotate.y_deg));
        }
        if card.expanded {
            label.push_str(" [expanded]");
        }
        screen.text(out, card.rect.x + CELL.x, card.rect.y + CELL.y, &label, color)?;
    }
    Ok(())
}

fn paint_code(out: &mut impl Write, screen: &Screen, code: &CodeView) -> io::Result<()> {
    let origin = Vec2::new(code.rect.x + CELL.x, code.rect.y + CELL.y);
    let mut col = 0.0;
    let mut row = 0.0;

    for span in &code.spans {
        let color = match span.style {
            CharStyle::Pending => Color::DarkGrey,
            CharStyle::Revealed => Color::Grey,
            CharStyle::Highlighted => Color::Green,
        };
        for ch in code.slice(span.range.clone()).chars() {
            if ch == '\n' {
                col = 0.0;
                row += 1.0;
                continue;
            }
            let x = origin.x + col * CELL.x;
            let y = origin.y + row * CELL.y;
            screen.text(out, x, y, &ch.to_string(), color)?;
            col += 1.0;
        }
    }

    if code.caret_visible {
        let typed = code.slice(0..code.revealed_len);
        let line = typed.matches('\n').count() as f32;
        let column = typed.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) as f32;
        screen.text(out, origin.x + column * CELL.x, origin.y + line * CELL.y, "|", Color::Green)?;
    }
    Ok(())
}
