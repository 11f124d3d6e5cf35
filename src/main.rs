// Entry point: load config and session, then run the terminal UI.

use std::io;
use std::time::Duration;

use ratatui::prelude::*;
use tracing::{info, warn};

use arbor::app::App;
use arbor::config::Config;
use arbor::error::Result;
use arbor::state::Store;
use arbor::terminal::{self, TerminalGuard};
use arbor::{logging, storage};

fn main() -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    let _logging = logging::init(&storage::log_dir(&data_dir), &config.log_filter);

    let session_path = storage::session_path(&data_dir);
    let restored = match storage::load_session(&session_path) {
        Ok(session) => session,
        Err(e) => {
            warn!(path = %session_path.display(), error = %e, "unreadable session, starting fresh");
            None
        }
    };

    let mut store = Store::default();
    store.subscribe(storage::persist_on_change(session_path));
    let restored_at = restored.map(|session| {
        store.replace(session.state);
        session.saved_at
    });

    let mut app = App::new(store).with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    app.explorer_width = config.explorer_width;
    app.restored_at = restored_at;

    let guard = TerminalGuard::new()?;
    let restorer = guard.restorer();
    terminal::install_panic_hook(guard.restorer());
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = app.run(&mut terminal);

    restorer.restore()?;
    drop(guard);

    result?;
    info!("exiting");
    Ok(())
}
