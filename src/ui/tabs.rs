// Tab bar rendering for open files.
// The active tab is highlighted; a dangling active id highlights nothing.

use ratatui::{prelude::*, widgets::*};

use crate::state::SessionState;

/// Draw the tab bar above the editor pane.
pub fn draw_tabs(frame: &mut Frame, state: &SessionState, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" arbor ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    if state.tabs().is_empty() {
        let empty = Paragraph::new(Span::styled(
            " No open tabs",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let active = state.tabs.active_tab_id();
    let mut spans = Vec::with_capacity(state.tabs().len() * 2);
    for (i, tab) in state.tabs().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }
        let style = if Some(tab.id) == active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", tab.file_name), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
