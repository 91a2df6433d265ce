//! Page content records.
//!
//! Immutable data the page renders: hero copy, the Avengers concept cards,
//! the four pillars and the Java walkthrough. Loaded from TOML; every field
//! is optional so a partial file still loads.
//!
//! Icons are an enumerated set. A missing or unknown icon name loads as
//! `None` ("render no icon") rather than failing the whole file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::{read_to_string, Result};
use crate::state::HighlightWindowMap;
use crate::types::HighlightWindow;

/// The page shipped with the crate.
const BUILTIN_PAGE: &str = include_str!("../assets/page.toml");

// =============================================================================
// ICONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    User,
    Settings,
    Zap,
    FileText,
    Eye,
    Shuffle,
    GitBranch,
    Shield,
    Code,
    BookOpen,
    Key,
    Tag,
    Hash,
    Plus,
    Braces,
}

impl Icon {
    pub const ALL: [Icon; 15] = [
        Icon::User,
        Icon::Settings,
        Icon::Zap,
        Icon::FileText,
        Icon::Eye,
        Icon::Shuffle,
        Icon::GitBranch,
        Icon::Shield,
        Icon::Code,
        Icon::BookOpen,
        Icon::Key,
        Icon::Tag,
        Icon::Hash,
        Icon::Plus,
        Icon::Braces,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::User => "User",
            Icon::Settings => "Settings",
            Icon::Zap => "Zap",
            Icon::FileText => "FileText",
            Icon::Eye => "Eye",
            Icon::Shuffle => "Shuffle",
            Icon::GitBranch => "GitBranch",
            Icon::Shield => "Shield",
            Icon::Code => "Code",
            Icon::BookOpen => "BookOpen",
            Icon::Key => "Key",
            Icon::Tag => "Tag",
            Icon::Hash => "Hash",
            Icon::Plus => "Plus",
            Icon::Braces => "Braces",
        }
    }

    /// Single-cell glyph for terminal rendering.
    pub fn glyph(self) -> char {
        match self {
            Icon::User => '☺',
            Icon::Settings => '⚙',
            Icon::Zap => 'ϟ',
            Icon::FileText => '▤',
            Icon::Eye => '◉',
            Icon::Shuffle => '⇄',
            Icon::GitBranch => '⑂',
            Icon::Shield => '⛨',
            Icon::Code => '⌘',
            Icon::BookOpen => '▯',
            Icon::Key => '⚷',
            Icon::Tag => '⌗',
            Icon::Hash => '#',
            Icon::Plus => '+',
            Icon::Braces => '{',
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown icon {0:?}")]
pub struct UnknownIcon(pub String);

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

fn lenient_icon<'de, D>(deserializer: D) -> std::result::Result<Option<Icon>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|name| match name.parse() {
        Ok(icon) => Some(icon),
        Err(err) => {
            log::warn!("{}, rendering without icon", err);
            None
        }
    }))
}

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Concept {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_icon")]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AvengersContent {
    pub title: String,
    pub intro: String,
    pub concepts: Vec<Concept>,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HeroExample {
    pub hero: String,
    pub explanation: String,
    pub lesson: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CodeExample {
    pub language: String,
    pub title: String,
    pub code: String,
}

/// One of the four OOP pillars. `color` and `gradient` are opaque strings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Pillar {
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub color: String,
    pub gradient: String,
    #[serde(deserialize_with = "lenient_icon")]
    pub icon: Option<Icon>,
    pub analogy: String,
    pub keyword: String,
    pub short_desc: String,
    pub hero_example: HeroExample,
    pub code_example: CodeExample,
    pub exam_definition: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct JavaStep {
    /// Display label, e.g. "01".
    pub step: String,
    pub title: String,
    pub code: String,
    pub analogy: String,
}

/// The code walkthrough: a source text typed out, plus steps that each
/// highlight a part of it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct JavaStructureContent {
    pub title: String,
    pub subtitle: String,
    pub intro: String,
    pub source: String,
    pub steps: Vec<JavaStep>,
    /// Literal char windows, one per step. Derived from step snippets
    /// when absent.
    pub highlights: Option<Vec<HighlightWindow>>,
}

impl JavaStructureContent {
    /// Highlight windows for the walkthrough.
    pub fn highlight_map(&self) -> HighlightWindowMap {
        match &self.highlights {
            Some(windows) => {
                if windows.len() != self.steps.len() {
                    log::warn!(
                        "{} highlight windows for {} steps",
                        windows.len(),
                        self.steps.len()
                    );
                }
                HighlightWindowMap::for_text(&self.source, windows)
            }
            None => {
                let snippets: Vec<&str> = self.steps.iter().map(|s| snippet_key(&s.code)).collect();
                HighlightWindowMap::from_snippets(&self.source, &snippets)
            }
        }
    }
}

/// Drop a trailing `{ ... }` placeholder so the snippet matches real source.
fn snippet_key(code: &str) -> &str {
    code.trim_end().trim_end_matches("{ ... }").trim_end()
}

/// Everything the page renders.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageContent {
    pub hero: HeroContent,
    pub avengers: AvengersContent,
    pub pillars: Vec<Pillar>,
    pub java_structure: JavaStructureContent,
}

impl PageContent {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// The bundled page.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_page_loads() {
        let page = PageContent::builtin().unwrap();
        assert_eq!(page.avengers.concepts.len(), 4);
        assert_eq!(page.pillars.len(), 4);
        assert_eq!(page.java_structure.steps.len(), 4);
        assert_eq!(page.pillars[3].icon, Some(Icon::Shield));
        assert!(page.java_structure.source.starts_with("import java.util.Scanner;"));
    }

    #[test]
    fn test_builtin_highlights_are_literal() {
        let page = PageContent::builtin().unwrap();
        let map = page.java_structure.highlight_map();
        assert_eq!(map.window(0), Some(HighlightWindow::new(0, 27)));
        assert_eq!(map.window(3), Some(HighlightWindow::new(106, 180)));
    }

    #[test]
    fn test_icon_parse() {
        assert_eq!("GitBranch".parse::<Icon>(), Ok(Icon::GitBranch));
        assert_eq!("Sword".parse::<Icon>(), Err(UnknownIcon("Sword".into())));
        for icon in Icon::ALL {
            assert_eq!(icon.name().parse::<Icon>(), Ok(icon));
        }
    }

    #[test]
    fn test_unknown_or_missing_icon_is_none() {
        let page = PageContent::from_toml_str(
            r#"
            [[avengers.concepts]]
            title = "A"
            icon = "Sword"

            [[avengers.concepts]]
            title = "B"

            [[avengers.concepts]]
            title = "C"
            icon = "Zap"
            "#,
        )
        .unwrap();
        let icons: Vec<_> = page.avengers.concepts.iter().map(|c| c.icon).collect();
        assert_eq!(icons, vec![None, None, Some(Icon::Zap)]);
    }

    #[test]
    fn test_highlights_from_snippets_when_absent() {
        let page = PageContent::from_toml_str(
            r#"
            [java_structure]
            source = "import a;\n\npublic class Neo {\n}"

            [[java_structure.steps]]
            code = "import a;"

            [[java_structure.steps]]
            code = "public class Neo { ... }"

            [[java_structure.steps]]
            code = "not there"
            "#,
        )
        .unwrap();
        let map = page.java_structure.highlight_map();
        assert_eq!(map.window(0), Some(HighlightWindow::new(0, 9)));
        assert_eq!(map.window(1), Some(HighlightWindow::new(11, 27)));
        assert_eq!(map.window(2), Some(HighlightWindow::default()));
    }

    #[test]
    fn test_empty_file_is_empty_page() {
        let page = PageContent::from_toml_str("").unwrap();
        assert_eq!(page, PageContent::default());
    }
}
