// Explorer pane rendering.
// Draws the flattened tree with indentation, chevrons, and the selection.

use ratatui::{prelude::*, widgets::*};

use crate::state::{ExplorerState, Node, TreeStore};

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Leading marker for a node: chevron for folders, padding for files.
fn marker(node: &Node) -> &'static str {
    match node {
        Node::Folder {
            is_expanded: true, ..
        } => "▾ ",
        Node::Folder {
            is_expanded: false,
            ..
        } => "▸ ",
        Node::File { .. } => "  ",
    }
}

fn name_style(node: &Node) -> Style {
    match node {
        Node::Folder { .. } => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Node::File { .. } => Style::default().fg(Color::White),
    }
}

/// Render the explorer list.
pub fn render_explorer(
    frame: &mut Frame,
    tree: &TreeStore,
    explorer: &mut ExplorerState,
    focused: bool,
    area: Rect,
) {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Explorer ");

    if explorer.rows().is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_empty(frame, inner, "No files yet. Press n or N to create one.");
        return;
    }

    let items: Vec<ListItem> = explorer
        .rows()
        .iter()
        .filter_map(|row| {
            let node = tree.get(row.id)?;
            Some(ListItem::new(Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(marker(node), Style::default().fg(Color::DarkGray)),
                Span::styled(node.name().to_string(), name_style(node)),
            ])))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut explorer.list_state);
}
