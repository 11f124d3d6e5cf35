// Modal UI components.
// Name prompt for creating files and folders.

use ratatui::{prelude::*, widgets::*};

use crate::app::Prompt;

/// Draw the naming prompt on top of the current view.
pub fn draw_prompt_modal(frame: &mut Frame, prompt: &Prompt) {
    let area = frame.area();

    let modal_width = 50.min(area.width);
    let modal_height = 6.min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let location = match &prompt.parent_name {
        Some(name) => format!("in {}", name),
        None => "at root".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(prompt.title())
        .title_bottom(Line::from(format!(" {} ", location)).right_aligned());

    let lines = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::DarkGray)),
            Span::raw(prompt.input.as_str()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" = Create  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), modal_area);
}
