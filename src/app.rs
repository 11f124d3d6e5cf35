// App state and main event loop.
// Owns the session store and pane state, and maps keys to commands.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tracing::debug;

use crate::state::{
    Command, DispatchResult, EditorState, ExplorerState, Node, NodeId, NodeKind, SessionState,
    Store,
};
use crate::ui;

/// Pane receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Explorer,
    Editor,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Explorer => "Explorer",
            Focus::Editor => "Editor",
        }
    }
}

/// Pending name input for a new file or folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: NodeKind,
    pub parent_id: Option<NodeId>,
    /// Name of the parent folder, for the prompt title.
    pub parent_name: Option<String>,
    pub input: String,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self.kind {
            NodeKind::File => " New File ",
            NodeKind::Folder => " New Folder ",
        }
    }

    fn command(&self) -> Option<Command> {
        let name = self.input.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        Some(match self.kind {
            NodeKind::File => Command::CreateFile {
                name,
                parent_id: self.parent_id,
            },
            NodeKind::Folder => Command::CreateFolder {
                name,
                parent_id: self.parent_id,
            },
        })
    }
}

/// Main application state.
pub struct App {
    pub store: Store,
    pub explorer: ExplorerState,
    pub editor: EditorState,
    pub focus: Focus,
    /// Open naming prompt, drawn as a modal.
    pub prompt: Option<Prompt>,
    pub show_help: bool,
    /// When the restored session was last saved.
    pub restored_at: Option<DateTime<Utc>>,
    /// Explorer pane width in columns.
    pub explorer_width: u16,
    pub should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(store: Store) -> Self {
        let mut app = Self {
            store,
            explorer: ExplorerState::new(),
            editor: EditorState::new(),
            focus: Focus::default(),
            prompt: None,
            show_help: false,
            restored_at: None,
            explorer_width: 30,
            should_quit: false,
            tick_rate: Duration::from_millis(100),
        };
        app.explorer.sync(&app.store.state().nodes);
        app.reset_cursor();
        app
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
        } else if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
        } else {
            match self.focus {
                Focus::Explorer => self.handle_explorer_key(key),
                Focus::Editor => self.handle_editor_key(key),
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                let command = prompt.command();
                self.prompt = None;
                if let Some(command) = command {
                    let result = self.dispatch(command);
                    if let Some(id) = result.created {
                        self.explorer.select_id(id);
                    }
                }
            }
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                prompt.input.push(c)
            }
            _ => {}
        }
    }

    fn handle_explorer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => self.explorer.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.explorer.select_next(),
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Char('a') => self.begin_create(NodeKind::File, false),
            KeyCode::Char('A') => self.begin_create(NodeKind::Folder, false),
            KeyCode::Char('n') => self.begin_create(NodeKind::File, true),
            KeyCode::Char('N') => self.begin_create(NodeKind::Folder, true),
            KeyCode::Char('[') => self.cycle_tab(-1),
            KeyCode::Char(']') => self.cycle_tab(1),
            KeyCode::Char('x') => self.close_active_tab(),
            KeyCode::Tab | KeyCode::Char('l') => self.focus = Focus::Editor,
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Explorer,
            KeyCode::Char('w') if ctrl => self.close_active_tab(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.edit_active(|editor| {
                editor.insert(c);
                true
            }),
            KeyCode::Enter => self.edit_active(|editor| {
                editor.insert('\n');
                true
            }),
            KeyCode::Backspace => self.edit_active(EditorState::backspace),
            KeyCode::Delete => self.edit_active(EditorState::delete),
            KeyCode::Left => self.move_cursor(EditorState::move_left),
            KeyCode::Right => self.move_cursor(EditorState::move_right),
            KeyCode::Up => self.move_cursor(EditorState::move_up),
            KeyCode::Down => self.move_cursor(EditorState::move_down),
            KeyCode::Home => self.move_cursor(EditorState::move_home),
            KeyCode::End => self.move_cursor(EditorState::move_end),
            _ => {}
        }
    }

    fn dispatch(&mut self, command: Command) -> DispatchResult {
        let result = self.store.dispatch(command);
        if result.state_changed {
            self.explorer.sync(&self.store.state().nodes);
        }
        result
    }

    /// Enter on the explorer: toggle a folder or open a file.
    fn activate_selected(&mut self) {
        let Some(id) = self.explorer.selected_id() else {
            return;
        };
        let command = match self.state().nodes.get(id) {
            Some(Node::Folder { .. }) => Command::ToggleFolder(id),
            Some(Node::File { name, .. }) => Command::OpenTab {
                file_id: id,
                file_name: name.clone(),
            },
            None => return,
        };
        let opens_tab = matches!(command, Command::OpenTab { .. });
        self.dispatch(command);
        if opens_tab {
            self.reset_cursor();
            self.focus = Focus::Editor;
        }
    }

    /// Open the naming prompt. Without `at_root` the new node goes into
    /// the selected folder, or next to the selected file.
    fn begin_create(&mut self, kind: NodeKind, at_root: bool) {
        let parent_id = if at_root {
            None
        } else {
            self.explorer
                .selected_id()
                .and_then(|id| self.state().nodes.get(id))
                .and_then(|node| match node {
                    Node::Folder { id, .. } => Some(*id),
                    Node::File { parent_id, .. } => *parent_id,
                })
        };
        let parent_name = parent_id
            .and_then(|id| self.state().nodes.get(id))
            .map(|node| node.name().to_string());

        debug!(kind = kind.label(), ?parent_id, "create prompt opened");
        self.prompt = Some(Prompt {
            kind,
            parent_id,
            parent_name,
            input: String::new(),
        });
    }

    /// Activate the previous (`-1`) or next (`1`) tab, wrapping around.
    fn cycle_tab(&mut self, delta: isize) {
        let tabs = self.state().tabs();
        if tabs.is_empty() {
            return;
        }
        let len = tabs.len() as isize;
        let next = match self.state().tabs.active_index() {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        let id = tabs[next as usize].id;
        self.dispatch(Command::SetActiveTab(id));
        self.reset_cursor();
    }

    fn close_active_tab(&mut self) {
        if let Some(id) = self.state().tabs.active_tab_id() {
            self.dispatch(Command::CloseTab(id));
            self.reset_cursor();
        }
    }

    /// Reload the editor buffer from the active file, cursor at the end.
    fn reset_cursor(&mut self) {
        let file = self.store.state().active_file();
        let file_id = file.map(|node| node.id());
        let text = file.and_then(|node| node.content()).unwrap_or_default();
        self.editor.load(file_id, text);
    }

    /// Id of the active file, with the editor buffer loaded from it.
    fn sync_editor(&mut self) -> Option<NodeId> {
        let file_id = self.state().active_file()?.id();
        if self.editor.file_id() != Some(file_id) {
            self.reset_cursor();
        }
        Some(file_id)
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut EditorState) -> bool) {
        let Some(file_id) = self.sync_editor() else {
            return;
        };
        if edit(&mut self.editor) {
            let content = self.editor.text();
            self.dispatch(Command::UpdateFileContent { file_id, content });
        }
    }

    fn move_cursor(&mut self, movement: impl FnOnce(&mut EditorState)) {
        if self.sync_editor().is_some() {
            movement(&mut self.editor);
        }
    }
}
