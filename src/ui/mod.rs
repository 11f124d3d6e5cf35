// UI module for rendering the TUI.
// Lays out the explorer, tab bar, editor pane, status bar, and overlays.

mod editor;
mod explorer;
mod modal;
mod tabs;

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(app.explorer_width), Constraint::Min(1)])
        .split(rows[0]);

    let editor_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(1),    // Editor
        ])
        .split(panes[1]);

    let focused = app.focus == Focus::Explorer;
    explorer::render_explorer(
        frame,
        &app.store.state().nodes,
        &mut app.explorer,
        focused,
        panes[0],
    );

    tabs::draw_tabs(frame, app.store.state(), editor_area[0]);
    editor::draw_editor(frame, app, editor_area[1]);

    draw_status_bar(frame, app, rows[1]);

    if let Some(prompt) = &app.prompt {
        modal::draw_prompt_modal(frame, prompt);
    }

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Draw the status bar with key hints for the focused pane.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![Span::styled(
        format!(" {} ", app.focus.title()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    match app.focus {
        Focus::Explorer => hints.extend([
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Open/Toggle", Style::default().fg(Color::DarkGray)),
            Span::raw("  a/A "),
            Span::styled("New here", Style::default().fg(Color::DarkGray)),
            Span::raw("  n/N "),
            Span::styled("New at root", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]),
        Focus::Editor => hints.extend([
            Span::raw(" Esc "),
            Span::styled("Explorer", Style::default().fg(Color::DarkGray)),
            Span::raw("  ^W "),
            Span::styled("Close tab", Style::default().fg(Color::DarkGray)),
            Span::raw("  ^Q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]),
    }

    let state = app.state();
    hints.push(Span::styled(
        format!("  {} nodes, {} tabs", state.nodes().len(), state.tabs().len()),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(saved_at) = &app.restored_at {
        hints.push(Span::styled(
            format!("  restored from {}", format_relative_time(saved_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 52.min(area.width);
    let popup_height = 21.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Explorer",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("  ↑/↓ or k/j    ", "Move selection"),
        key("  Enter         ", "Toggle folder / open file"),
        key("  a / A         ", "New file / folder here"),
        key("  n / N         ", "New file / folder at root"),
        key("  [ / ]         ", "Previous / next tab"),
        key("  x             ", "Close active tab"),
        key("  Tab / l       ", "Focus editor"),
        key("  q             ", "Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Editor",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("  Arrows        ", "Move cursor"),
        key("  Home / End    ", "Start / end of line"),
        key("  Ctrl+W        ", "Close active tab"),
        key("  Esc / Tab     ", "Focus explorer"),
        key("  Ctrl+Q        ", "Quit from anywhere"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Command, Store};
    use ratatui::backend::TestBackend;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_empty_session() {
        let mut app = App::new(Store::default());
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("No file selected"));
        assert!(text.contains("No open tabs"));
    }

    #[test]
    fn test_draw_open_file() {
        let mut store = Store::default();
        let file = store
            .dispatch(Command::CreateFile {
                name: "notes".to_string(),
                parent_id: None,
            })
            .created
            .unwrap();
        store.dispatch(Command::UpdateFileContent {
            file_id: file,
            content: "hello arbor".to_string(),
        });
        store.dispatch(Command::OpenTab {
            file_id: file,
            file_name: "notes.txt".to_string(),
        });

        let mut app = App::new(store);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("hello arbor"));
        assert!(text.contains("notes.txt"));
        assert!(!text.contains("No file selected"));
    }
}
