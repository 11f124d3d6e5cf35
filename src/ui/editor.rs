// Editor pane rendering.
// Shows the active file's content with a cursor, or a placeholder.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};

/// Vertical scroll that keeps `line` inside a viewport of `height` rows.
fn scroll_for(line: usize, height: u16) -> u16 {
    let height = height.max(1) as usize;
    line.saturating_sub(height - 1).min(u16::MAX as usize) as u16
}

/// Horizontal scroll that keeps screen column `column` inside `width` cells.
fn hscroll_for(column: usize, width: u16) -> u16 {
    let width = width.max(1) as usize;
    column.saturating_sub(width - 1).min(u16::MAX as usize) as u16
}

pub fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let Some(file) = app.state().active_file() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Editor ");
        let text = Paragraph::new("No file selected")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    };

    let content = file.content().unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", file.name()));
    let inner = block.inner(area);

    if content.is_empty() {
        let placeholder = Paragraph::new("Start typing...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        if focused {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    // The buffer mirrors the active file once the app has loaded it.
    let (line, column) = if app.editor.file_id() == Some(file.id()) {
        let (line, _) = app.editor.position();
        (line, app.editor.display_column())
    } else {
        (0, 0)
    };
    let scroll_y = scroll_for(line, inner.height);
    let scroll_x = hscroll_for(column, inner.width);

    let paragraph = Paragraph::new(content)
        .style(Style::default().fg(Color::White))
        .scroll((scroll_y, scroll_x))
        .block(block);
    frame.render_widget(paragraph, area);

    if focused {
        let x = inner.x + (column as u16).saturating_sub(scroll_x);
        let y = inner.y + (line as u16).saturating_sub(scroll_y);
        frame.set_cursor_position((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Command, Store};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;

    fn app_with_file(content: &str) -> App {
        let mut store = Store::default();
        let file = store
            .dispatch(Command::CreateFile {
                name: "wide".to_string(),
                parent_id: None,
            })
            .created
            .unwrap();
        store.dispatch(Command::UpdateFileContent {
            file_id: file,
            content: content.to_string(),
        });
        store.dispatch(Command::OpenTab {
            file_id: file,
            file_name: "wide.txt".to_string(),
        });
        let mut app = App::new(store);
        app.focus = Focus::Editor;
        app
    }

    fn cursor_after_draw(app: &mut App) -> Position {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| crate::ui::draw(frame, app))
            .unwrap();
        terminal.get_cursor_position().unwrap()
    }

    #[test]
    fn test_cursor_after_wide_glyphs() {
        let mut app = app_with_file("日本");
        // Explorer (30) + border (1) + two double-width glyphs.
        assert_eq!(cursor_after_draw(&mut app), Position::new(35, 3));
    }

    #[test]
    fn test_cursor_follows_ascii_and_lines() {
        let mut app = app_with_file("ab
cd");
        assert_eq!(cursor_after_draw(&mut app), Position::new(33, 4));

        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Home,
            crossterm::event::KeyModifiers::NONE,
        ));
        assert_eq!(cursor_after_draw(&mut app), Position::new(31, 4));
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        assert_eq!(scroll_for(0, 10), 0);
        assert_eq!(scroll_for(9, 10), 0);
        assert_eq!(scroll_for(10, 10), 1);
        assert_eq!(scroll_for(3, 0), 3);

        assert_eq!(hscroll_for(5, 80), 0);
        assert_eq!(hscroll_for(100, 80), 21);
    }
}
