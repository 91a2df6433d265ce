//! Taffy Bridge - Page geometry via the Taffy layout engine
//!
//! Builds a flexbox tree for the page (a column of sections, each section a
//! padded column of header, cards and footer), runs Taffy, and extracts
//! absolute rectangles back into a [`PageLayout`].
//!
//! Taffy reports each node's location relative to its parent, so extraction
//! walks the tree accumulating offsets.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, FlexWrap, LengthPercentage, NodeId,
    Rect as Edges, Size, Style, TaffyTree,
};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::types::{Rect, SectionId, Vec2};

use super::types::{CardCounts, PageLayout, SectionLayout};

/// Below this content width the card grids collapse to one column.
pub const TWO_COLUMN_MIN_WIDTH: f32 = 640.0;

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn length(px: f32) -> Dimension {
    Dimension::Length(px.max(0.0))
}

fn gap(px: f32) -> Size<LengthPercentage> {
    Size {
        width: LengthPercentage::Length(px),
        height: LengthPercentage::Length(px),
    }
}

fn fixed(width: f32, height: f32) -> Style {
    Style {
        size: Size {
            width: length(width),
            height: length(height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn column(width: Dimension, gap_px: f32) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        size: Size {
            width,
            height: Dimension::Auto,
        },
        gap: gap(gap_px),
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn section_style(config: &LayoutConfig) -> Style {
    Style {
        padding: Edges {
            top: LengthPercentage::Length(config.section_padding),
            bottom: LengthPercentage::Length(config.section_padding),
            left: LengthPercentage::Length(config.card_gap),
            right: LengthPercentage::Length(config.card_gap),
        },
        ..column(Dimension::Percent(1.0), config.card_gap)
    }
}

fn grid_style(content_width: f32, config: &LayoutConfig) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::Wrap,
        size: Size {
            width: length(content_width),
            height: Dimension::Auto,
        },
        gap: gap(config.card_gap),
        flex_shrink: 0.0,
        ..Default::default()
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

/// Node handles needed to read the layout back.
struct PageNodes {
    root: NodeId,
    sections: [NodeId; 4],
    cards: [Vec<NodeId>; 4],
    editor: NodeId,
}

fn card_width(content_width: f32, gap: f32) -> f32 {
    if content_width < TWO_COLUMN_MIN_WIDTH {
        content_width
    } else {
        // Floor so two cards plus the gap never exceed the row
        ((content_width - gap) / 2.0).floor()
    }
}

fn build_tree(
    tree: &mut TaffyTree<()>,
    viewport: Vec2,
    counts: &CardCounts,
    config: &LayoutConfig,
) -> Result<PageNodes> {
    let content_width = (viewport.x - 2.0 * config.card_gap).max(0.0);
    let card_w = card_width(content_width, config.card_gap);

    let hero = tree.new_leaf(fixed(viewport.x, viewport.y))?;

    let mut grid_section = |count: usize| -> Result<(NodeId, Vec<NodeId>)> {
        let header = tree.new_leaf(fixed(content_width, config.header_height))?;
        let cards = (0..count)
            .map(|_| tree.new_leaf(fixed(card_w, config.card_height)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let grid = tree.new_with_children(grid_style(content_width, config), &cards)?;
        let footer = tree.new_leaf(fixed(content_width, config.footer_height))?;
        let section = tree.new_with_children(section_style(config), &[header, grid, footer])?;
        Ok((section, cards))
    };

    let (avengers, avenger_cards) = grid_section(counts.avengers)?;
    let (pillars, pillar_cards) = grid_section(counts.pillars)?;

    let header = tree.new_leaf(fixed(content_width, config.header_height))?;
    let editor = tree.new_leaf(fixed(content_width, config.editor_height))?;
    let steps = (0..counts.steps)
        .map(|_| tree.new_leaf(fixed(content_width, config.step_height)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let step_list = tree.new_with_children(column(length(content_width), config.card_gap), &steps)?;
    let footer = tree.new_leaf(fixed(content_width, config.footer_height))?;
    let java = tree.new_with_children(section_style(config), &[header, editor, step_list, footer])?;

    let root = tree.new_with_children(
        column(length(viewport.x), 0.0),
        &[hero, avengers, pillars, java],
    )?;

    Ok(PageNodes {
        root,
        sections: [hero, avengers, pillars, java],
        cards: [Vec::new(), avenger_cards, pillar_cards, steps],
        editor,
    })
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Absolute rect of `node`: its own location plus every ancestor's.
fn absolute(tree: &TaffyTree<()>, node: NodeId) -> Result<Rect> {
    let layout = tree.layout(node)?;
    let mut x = layout.location.x;
    let mut y = layout.location.y;

    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        let parent_layout = tree.layout(parent)?;
        x += parent_layout.location.x;
        y += parent_layout.location.y;
        current = parent;
    }

    Ok(Rect::new(x, y, layout.size.width, layout.size.height))
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute page geometry for a `width` x `height` viewport.
///
/// The hero fills the first viewport; the other sections stack below it in
/// [`SectionId::ALL`] order.
pub fn compute_page_layout(
    width: f32,
    height: f32,
    counts: &CardCounts,
    config: &LayoutConfig,
) -> Result<PageLayout> {
    if !(width > 0.0 && height > 0.0) {
        return Err(Error::EmptyViewport { width, height });
    }
    let viewport = Vec2::new(width, height);

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let nodes = build_tree(&mut tree, viewport, counts, config)?;

    let available = Size {
        width: AvailableSpace::Definite(width),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(nodes.root, available)?;

    let mut sections: [SectionLayout; 4] = Default::default();
    for id in SectionId::ALL {
        let i = id.ordinal();
        sections[i] = SectionLayout {
            region: absolute(&tree, nodes.sections[i])?,
            cards: nodes.cards[i]
                .iter()
                .map(|&card| absolute(&tree, card))
                .collect::<Result<Vec<_>>>()?,
        };
    }

    let content_height = tree.layout(nodes.root)?.size.height;
    log::debug!(
        "page layout {}x{}: content height {}",
        width,
        height,
        content_height
    );

    Ok(PageLayout {
        viewport,
        sections,
        editor: absolute(&tree, nodes.editor)?,
        content_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> CardCounts {
        CardCounts {
            avengers: 4,
            pillars: 4,
            steps: 4,
        }
    }

    fn compute(width: f32, height: f32) -> PageLayout {
        compute_page_layout(width, height, &counts(), &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_viewport_is_error() {
        let err = compute_page_layout(0.0, 600.0, &counts(), &LayoutConfig::default());
        assert!(matches!(err, Err(Error::EmptyViewport { .. })));
        let err = compute_page_layout(f32::NAN, 600.0, &counts(), &LayoutConfig::default());
        assert!(matches!(err, Err(Error::EmptyViewport { .. })));
    }

    #[test]
    fn test_hero_fills_first_viewport() {
        let layout = compute(1280.0, 800.0);
        assert_eq!(layout.region(SectionId::Hero), Rect::new(0.0, 0.0, 1280.0, 800.0));
        assert!(layout.cards(SectionId::Hero).is_empty());
    }

    #[test]
    fn test_sections_stack_in_order() {
        let layout = compute(1280.0, 800.0);
        let mut bottom = 0.0;
        for id in SectionId::ALL {
            let region = layout.region(id);
            assert_eq!(region.y, bottom, "{:?}", id);
            assert_eq!(region.width, 1280.0);
            bottom = region.bottom();
        }
        assert_eq!(layout.content_height(), bottom);
    }

    #[test]
    fn test_cards_inside_their_section() {
        let layout = compute(1280.0, 800.0);
        for id in SectionId::ALL {
            let region = layout.region(id);
            assert_eq!(layout.cards(id).len(), counts().get(id));
            for card in layout.cards(id) {
                assert!(card.y >= region.y && card.bottom() <= region.bottom());
                assert!(card.x >= region.x && card.right() <= region.right());
            }
        }
    }

    #[test]
    fn test_wide_viewport_uses_two_columns() {
        let layout = compute(1280.0, 800.0);
        let cards = layout.cards(SectionId::Pillars);
        assert_eq!(cards[0].y, cards[1].y);
        assert!(cards[1].x > cards[0].right());
        assert!(cards[2].y > cards[0].bottom());
    }

    #[test]
    fn test_narrow_viewport_uses_one_column() {
        let layout = compute(480.0, 800.0);
        let cards = layout.cards(SectionId::Avengers);
        assert_eq!(cards[0].x, cards[1].x);
        assert!(cards[1].y > cards[0].bottom());
    }

    #[test]
    fn test_editor_above_steps() {
        let layout = compute(1280.0, 800.0);
        let editor = layout.editor();
        let java = layout.region(SectionId::JavaStructure);
        assert!(editor.y > java.y);
        assert!(layout.cards(SectionId::JavaStructure)[0].y > editor.bottom());
    }

    #[test]
    fn test_hit_card() {
        let layout = compute(1280.0, 800.0);
        let card = layout.cards(SectionId::Pillars)[3];
        assert_eq!(layout.hit_card(card.center()), Some((SectionId::Pillars, 3)));
        assert_eq!(layout.hit_card(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_scroll_bounds() {
        let layout = compute(1280.0, 800.0);
        assert_eq!(layout.max_scroll(), layout.content_height() - 800.0);
        assert_eq!(layout.section_offset(SectionId::Hero), 0.0);
        assert_eq!(
            layout.section_offset(SectionId::Avengers),
            layout.region(SectionId::Avengers).y
        );
        assert!(layout.section_offset(SectionId::JavaStructure) <= layout.max_scroll());
    }
}
