//! Highlight windows over revealed text, selected by the active step.
//!
//! A character `i` is highlighted iff it has been revealed
//! (`i < revealed_len`) and falls inside the window of the active step.
//! An unknown step means "nothing highlighted", never an error.

use spark_signals::{signal, Signal};

use crate::types::{CharStyle, HighlightWindow, StyledSpan};

// =============================================================================
// WINDOW MAP
// =============================================================================

/// Ordered list of windows, one per step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightWindowMap {
    windows: Vec<HighlightWindow>,
}

impl HighlightWindowMap {
    pub fn new(windows: Vec<HighlightWindow>) -> Self {
        Self { windows }
    }

    /// Build a map for `text`, clamping every window into `0..=len(text)`
    /// with `start <= end`.
    pub fn for_text(text: &str, windows: &[HighlightWindow]) -> Self {
        let len = text.chars().count();
        let windows = windows
            .iter()
            .map(|w| {
                let end = w.end.min(len);
                let start = w.start.min(end);
                if start != w.start || end != w.end {
                    log::warn!("highlight window {}..{} clamped to {}..{}", w.start, w.end, start, end);
                }
                HighlightWindow::new(start, end)
            })
            .collect();
        Self { windows }
    }

    /// Derive windows by locating each snippet in `text`.
    ///
    /// Offsets are in chars. A snippet that doesn't occur gets an empty
    /// window, so its step highlights nothing.
    pub fn from_snippets<S: AsRef<str>>(text: &str, snippets: &[S]) -> Self {
        let windows = snippets
            .iter()
            .map(|snippet| {
                let snippet = snippet.as_ref();
                match text.find(snippet) {
                    Some(byte) if !snippet.is_empty() => {
                        let start = text[..byte].chars().count();
                        HighlightWindow::new(start, start + snippet.chars().count())
                    }
                    _ => {
                        log::warn!("snippet {:?} not found, step will not highlight", snippet);
                        HighlightWindow::default()
                    }
                }
            })
            .collect();
        Self { windows }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The window for `step`, or `None` when the step is out of range.
    pub fn window(&self, step: usize) -> Option<HighlightWindow> {
        self.windows.get(step).copied()
    }

    pub fn is_highlighted(&self, index: usize, revealed_len: usize, step: usize) -> bool {
        index < revealed_len && self.window(step).is_some_and(|w| w.contains(index))
    }

    pub fn char_style(&self, index: usize, revealed_len: usize, step: usize) -> CharStyle {
        if index >= revealed_len {
            CharStyle::Pending
        } else if self.is_highlighted(index, revealed_len, step) {
            CharStyle::Highlighted
        } else {
            CharStyle::Revealed
        }
    }

    /// Style runs covering `0..total_len`, merged so adjacent chars with the
    /// same style form one span.
    pub fn spans(&self, total_len: usize, revealed_len: usize, step: usize) -> Vec<StyledSpan> {
        let revealed_len = revealed_len.min(total_len);
        let mut spans: Vec<StyledSpan> = Vec::new();

        let mut push = |start: usize, end: usize, style: CharStyle| {
            if start >= end {
                return;
            }
            match spans.last_mut() {
                Some(last) if last.style == style && last.range.end == start => last.range.end = end,
                _ => spans.push(StyledSpan {
                    range: start..end,
                    style,
                }),
            }
        };

        match self.window(step) {
            Some(w) => {
                let hl_start = w.start.min(revealed_len);
                let hl_end = w.end.min(revealed_len);
                push(0, hl_start, CharStyle::Revealed);
                push(hl_start, hl_end, CharStyle::Highlighted);
                push(hl_end.max(hl_start), revealed_len, CharStyle::Revealed);
            }
            None => push(0, revealed_len, CharStyle::Revealed),
        }
        push(revealed_len, total_len, CharStyle::Pending);

        spans
    }
}

// =============================================================================
// STEP SELECTOR
// =============================================================================

/// Which step of a walkthrough is active. Select semantics, not toggle.
pub struct StepSelector {
    count: usize,
    active: Signal<usize>,
}

impl StepSelector {
    /// Step 0 is active initially.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            active: signal(0),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> usize {
        self.active.get()
    }

    pub fn active_signal(&self) -> Signal<usize> {
        self.active.clone()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active() == index
    }

    /// Make `index` active. Returns true if the active step changed.
    ///
    /// Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.count {
            log::warn!("step {} out of range ({} steps)", index, self.count);
            return false;
        }
        if self.active() == index {
            return false;
        }
        log::debug!("step {} selected", index);
        self.active.set(index);
        true
    }
}

impl std::fmt::Debug for StepSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSelector")
            .field("count", &self.count)
            .field("active", &self.active.get())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NEO: &str = "import java.util.Scanner;\n\npublic class Neo {\n    public static void main(String[] args) {\n        System.out.println(\"Wake up, Neo...\");\n        System.out.println(\"The Matrix has you.\");\n    }\n}";

    fn neo_map() -> HighlightWindowMap {
        HighlightWindowMap::new(vec![
            HighlightWindow::new(0, 27),
            HighlightWindow::new(29, 47),
            HighlightWindow::new(53, 96),
            HighlightWindow::new(106, 180),
        ])
    }

    #[test]
    fn test_window_lookup() {
        let map = neo_map();
        assert_eq!(map.window(1), Some(HighlightWindow::new(29, 47)));
        assert_eq!(map.window(4), None);
    }

    #[test]
    fn test_highlight_requires_reveal() {
        let map = neo_map();
        assert!(!map.is_highlighted(10, 5, 0));
        assert!(map.is_highlighted(4, 5, 0));
        assert!(!map.is_highlighted(28, 100, 1));
        assert!(map.is_highlighted(29, 100, 1));
        assert!(!map.is_highlighted(47, 100, 1));
    }

    #[test]
    fn test_out_of_range_step_highlights_nothing() {
        let map = neo_map();
        for i in 0..50 {
            assert!(!map.is_highlighted(i, 50, 9));
        }
        assert_eq!(map.char_style(3, 50, 9), CharStyle::Revealed);
        assert_eq!(map.char_style(60, 50, 9), CharStyle::Pending);
    }

    #[test]
    fn test_spans_partition_text() {
        let map = neo_map();
        let spans = map.spans(100, 40, 1);

        assert_eq!(
            spans,
            vec![
                StyledSpan { range: 0..29, style: CharStyle::Revealed },
                StyledSpan { range: 29..40, style: CharStyle::Highlighted },
                StyledSpan { range: 40..100, style: CharStyle::Pending },
            ]
        );
    }

    #[test]
    fn test_spans_match_char_style() {
        let map = neo_map();
        let total = NEO.chars().count();
        for &(revealed, step) in &[(0, 0), (30, 0), (60, 2), (total, 3), (total, 7)] {
            for span in map.spans(total, revealed, step) {
                for i in span.range.clone() {
                    assert_eq!(map.char_style(i, revealed, step), span.style, "char {i}");
                }
            }
        }
    }

    #[test]
    fn test_spans_no_window() {
        let map = HighlightWindowMap::default();
        let spans = map.spans(10, 10, 0);
        assert_eq!(spans, vec![StyledSpan { range: 0..10, style: CharStyle::Revealed }]);
    }

    #[test]
    fn test_for_text_clamps() {
        let map = HighlightWindowMap::for_text("abcdef", &[HighlightWindow::new(4, 20), HighlightWindow::new(9, 12)]);
        assert_eq!(map.window(0), Some(HighlightWindow::new(4, 6)));
        assert_eq!(map.window(1), Some(HighlightWindow::new(6, 6)));
    }

    #[test]
    fn test_from_snippets() {
        let map = HighlightWindowMap::from_snippets(
            NEO,
            &["import java.util.Scanner;", "public class Neo", "missing", ""],
        );
        assert_eq!(map.window(0), Some(HighlightWindow::new(0, 25)));
        assert_eq!(map.window(1), Some(HighlightWindow::new(27, 43)));
        assert_eq!(map.window(2), Some(HighlightWindow::default()));
        assert_eq!(map.window(3), Some(HighlightWindow::default()));
    }

    #[test]
    fn test_step_selector() {
        let mut steps = StepSelector::new(4);
        assert_eq!(steps.active(), 0);

        assert!(steps.select(2));
        assert!(steps.is_active(2));

        // Selecting again keeps it (no toggle)
        assert!(!steps.select(2));
        assert_eq!(steps.active(), 2);

        assert!(!steps.select(4));
        assert_eq!(steps.active(), 2);
    }
}
