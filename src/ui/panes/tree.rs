//! AST pane rendering
//!
//! Draws the visible rows of an [`AstTree`] as an indented outline with
//! expand/collapse markers, the selected row highlighted, and scrolling that
//! keeps the selection on screen.

use crate::ui::theme::DEFAULT_THEME;
use crate::ui::tree::{AstTree, NodeKind, TreeRow};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the tree pane
pub struct TreeScrollState {
    pub offset: usize,
}

fn kind_style(kind: NodeKind) -> Style {
    match kind {
        NodeKind::Program => Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
        NodeKind::Function => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        NodeKind::Argument => Style::default().fg(DEFAULT_THEME.type_name),
        NodeKind::Statement => Style::default().fg(DEFAULT_THEME.keyword),
        NodeKind::Expression => Style::default().fg(DEFAULT_THEME.fg),
        NodeKind::Literal => Style::default().fg(DEFAULT_THEME.number),
        NodeKind::Error => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    }
}

fn row_line(row: &TreeRow) -> Line<'static> {
    let marker = if row.node.children.is_empty() {
        "  "
    } else if row.collapsed {
        "▸ "
    } else {
        "▾ "
    };

    let mut spans = vec![
        Span::raw("  ".repeat(row.depth)),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
    ];

    if let Some(role) = &row.node.role {
        spans.push(Span::styled(
            format!("{}: ", role),
            Style::default().fg(DEFAULT_THEME.role),
        ));
    }

    spans.push(Span::styled(row.node.label.clone(), kind_style(row.node.kind)));

    if let Some(detail) = &row.node.detail {
        spans.push(Span::styled(
            format!("  {}", detail),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    Line::from(spans)
}

/// Render the AST pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &AstTree,
    selected: usize,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = tree.rows();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the selection inside the window
    if selected < scroll_state.offset {
        scroll_state.offset = selected;
    } else if selected >= scroll_state.offset + visible_height {
        scroll_state.offset = selected + 1 - visible_height;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let item = ListItem::new(row_line(row));
            if idx == selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
