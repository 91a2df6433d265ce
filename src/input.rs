//! Input Module - Terminal event conversion
//!
//! Bridges crossterm's event system with page intents. Terminal cells are
//! mapped to page px through a fixed cell size, so the same page logic runs
//! in a terminal as in any pixel host.
//!
//! # API
//!
//! - `InputAdapter::translate` - Convert one crossterm `Event` to an `Intent`
//! - `ScrollTracker` - Absolute, clamped scroll offset fed by wheel and keys
//! - `poll_event` / `read_event` - Event polling helpers
//! - `enable_mouse` / `disable_mouse` - Control mouse capture
//!
//! # Example
//!
//! ```ignore
//! use spark_reveal::input::{poll_event, InputAdapter};
//!
//! let mut input = InputAdapter::new(Vec2::new(8.0, 16.0), 384.0, page.layout().max_scroll());
//! if let Some(event) = poll_event(Duration::from_millis(16))? {
//!     if let Some(intent) = input.translate(&event) {
//!         page.dispatch(intent, now);
//!     }
//! }
//! ```

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;

use crate::pipeline::Intent;
use crate::types::Vec2;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Rows scrolled per arrow key press.
pub const LINE_SCROLL: u16 = 1;

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_SCROLL: u16 = 3;

/// Fraction of the viewport scrolled by PageUp/PageDown.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// SCROLL TRACKER
// =============================================================================

/// Absolute scroll position clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTracker {
    offset: f32,
    max: f32,
}

impl ScrollTracker {
    pub fn new(max: f32) -> Self {
        Self {
            offset: 0.0,
            max: max.max(0.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Change the bound, pulling the offset back inside it.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.offset = self.offset.min(self.max);
    }

    /// Jump to `offset`. Returns the new offset if it moved.
    pub fn scroll_to(&mut self, offset: f32) -> Option<f32> {
        let clamped = offset.clamp(0.0, self.max);
        if clamped == self.offset {
            return None;
        }
        self.offset = clamped;
        Some(clamped)
    }

    /// Move by `delta` px. Returns the new offset if it moved.
    pub fn scroll_by(&mut self, delta: f32) -> Option<f32> {
        self.scroll_to(self.offset + delta)
    }
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Converts crossterm events into page intents.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    /// Page px per terminal cell.
    cell: Vec2,
    viewport_height: f32,
    scroll: ScrollTracker,
}

impl InputAdapter {
    pub fn new(cell: Vec2, viewport_height: f32, max_scroll: f32) -> Self {
        Self {
            cell,
            viewport_height,
            scroll: ScrollTracker::new(max_scroll),
        }
    }

    /// Update bounds after a relayout.
    pub fn set_bounds(&mut self, viewport_height: f32, max_scroll: f32) {
        self.viewport_height = viewport_height;
        self.scroll.set_max(max_scroll);
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    /// Page px at the center of cell `(column, row)`.
    pub fn cell_to_px(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (f32::from(column) + 0.5) * self.cell.x,
            (f32::from(row) + 0.5) * self.cell.y,
        )
    }

    /// Jump to an absolute offset (e.g. a section), as an intent.
    pub fn scroll_to(&mut self, offset: f32) -> Option<Intent> {
        self.scroll.scroll_to(offset).map(|offset| Intent::Scrolled { offset })
    }

    /// Translate one terminal event. Unhandled events map to `None`.
    pub fn translate(&mut self, event: &Event) -> Option<Intent> {
        match event {
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            Event::Key(key) => self.translate_key(key),
            Event::Resize(columns, rows) => {
                let width = f32::from(*columns) * self.cell.x;
                let height = f32::from(*rows) * self.cell.y;
                self.viewport_height = height;
                Some(Intent::Resized { width, height })
            }
            _ => None,
        }
    }

    fn translate_mouse(&mut self, event: &MouseEvent) -> Option<Intent> {
        let at = self.cell_to_px(event.column, event.row);
        let wheel = f32::from(WHEEL_SCROLL) * self.cell.y;

        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                Some(Intent::PointerMoved { x: at.x, y: at.y })
            }
            MouseEventKind::Down(MouseButton::Left) => Some(Intent::PointerDown { x: at.x, y: at.y }),
            MouseEventKind::ScrollDown => self.scroll_by(wheel),
            MouseEventKind::ScrollUp => self.scroll_by(-wheel),
            _ => None,
        }
    }

    fn translate_key(&mut self, event: &KeyEvent) -> Option<Intent> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let line = f32::from(LINE_SCROLL) * self.cell.y;
        let page = self.viewport_height * PAGE_SCROLL_FACTOR;

        match event.code {
            KeyCode::Down => self.scroll_by(line),
            KeyCode::Up => self.scroll_by(-line),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Home => self.scroll_to(0.0),
            KeyCode::End => self.scroll_to(self.scroll.max()),
            KeyCode::Char(c @ '1'..='9') if event.kind == KeyEventKind::Press => {
                let index = c.to_digit(10).map(|d| d as usize - 1)?;
                Some(Intent::StepSelected { index })
            }
            _ => None,
        }
    }

    fn scroll_by(&mut self, delta: f32) -> Option<Intent> {
        self.scroll.scroll_by(delta).map(|offset| Intent::Scrolled { offset })
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Non-blocking event check. Returns `None` on timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if poll(timeout)? {
        read().map(Some)
    } else {
        Ok(None)
    }
}

/// Blocking event read.
pub fn read_event() -> std::io::Result<Event> {
    read()
}

/// Enable mouse capture (required for pointer and wheel events).
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable mouse capture.
pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn adapter() -> InputAdapter {
        // 8x16 px cells, 24 rows visible, 1000 px of scroll
        InputAdapter::new(Vec2::new(8.0, 16.0), 384.0, 1000.0)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_scroll_tracker_clamps() {
        let mut scroll = ScrollTracker::new(100.0);
        assert_eq!(scroll.scroll_by(-10.0), None);
        assert_eq!(scroll.scroll_by(60.0), Some(60.0));
        assert_eq!(scroll.scroll_by(60.0), Some(100.0));
        assert_eq!(scroll.scroll_by(1.0), None);

        scroll.set_max(40.0);
        assert_eq!(scroll.offset(), 40.0);
    }

    #[test]
    fn test_mouse_move_maps_to_cell_center() {
        let mut input = adapter();
        let intent = input.translate(&mouse(MouseEventKind::Moved, 10, 2));
        assert_eq!(intent, Some(Intent::PointerMoved { x: 84.0, y: 40.0 }));
    }

    #[test]
    fn test_left_down_is_pointer_down() {
        let mut input = adapter();
        let intent = input.translate(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(intent, Some(Intent::PointerDown { x: 4.0, y: 8.0 }));

        let right = input.translate(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        assert_eq!(right, None);
    }

    #[test]
    fn test_wheel_scrolls_three_rows() {
        let mut input = adapter();
        let intent = input.translate(&mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(intent, Some(Intent::Scrolled { offset: 48.0 }));

        input.translate(&mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(input.scroll_offset(), 0.0);
        // Already at the top
        assert_eq!(input.translate(&mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn test_keys_scroll() {
        let mut input = adapter();
        assert_eq!(input.translate(&key(KeyCode::Down)), Some(Intent::Scrolled { offset: 16.0 }));
        assert_eq!(
            input.translate(&key(KeyCode::PageDown)),
            Some(Intent::Scrolled { offset: 16.0 + 384.0 * PAGE_SCROLL_FACTOR })
        );
        assert_eq!(input.translate(&key(KeyCode::End)), Some(Intent::Scrolled { offset: 1000.0 }));
        assert_eq!(input.translate(&key(KeyCode::Home)), Some(Intent::Scrolled { offset: 0.0 }));
    }

    #[test]
    fn test_digits_select_steps() {
        let mut input = adapter();
        assert_eq!(input.translate(&key(KeyCode::Char('1'))), Some(Intent::StepSelected { index: 0 }));
        assert_eq!(input.translate(&key(KeyCode::Char('4'))), Some(Intent::StepSelected { index: 3 }));
        assert_eq!(input.translate(&key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_resize() {
        let mut input = adapter();
        let intent = input.translate(&Event::Resize(100, 30));
        assert_eq!(intent, Some(Intent::Resized { width: 800.0, height: 480.0 }));
    }
}
