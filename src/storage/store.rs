// Session store for reading and writing the persisted blob.
// Handles the keyed JSON envelope, atomic writes, and write-on-change.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::state::SessionState;

/// Version key of the persisted layout. A blob with any other key is
/// ignored; there is no migration.
pub const SESSION_KEY: &str = "arbor:session:v1";

/// Session state plus the metadata needed to trust it on reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub key: String,
    /// When the blob was written.
    pub saved_at: DateTime<Utc>,
    pub state: SessionState,
}

impl PersistedSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            key: SESSION_KEY.to_string(),
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Load the session blob. Returns `None` when the file is absent or was
/// written under a different key.
pub fn load_session(path: &Path) -> Result<Option<PersistedSession>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    let key = value.get("key").and_then(|k| k.as_str()).unwrap_or("");
    if key != SESSION_KEY {
        warn!(
            path = %path.display(),
            found = key,
            expected = SESSION_KEY,
            "ignoring session with unknown key"
        );
        return Ok(None);
    }

    let session: PersistedSession = serde_json::from_value(value)?;
    info!(
        path = %path.display(),
        nodes = session.state.nodes.len(),
        tabs = session.state.tabs.len(),
        "session restored"
    );
    Ok(Some(session))
}

/// Write the session blob atomically.
pub fn save_session(path: &Path, state: &SessionState) -> Result<()> {
    let persisted = PersistedSession::new(state.clone());
    let json = serde_json::to_string_pretty(&persisted)?;
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Subscriber that persists every state change. Failures are logged and
/// never interrupt the session.
pub fn persist_on_change(path: PathBuf) -> impl FnMut(&SessionState) + 'static {
    move |state: &SessionState| {
        if let Err(e) = save_session(&path, state) {
            warn!(path = %path.display(), error = %e, "failed to persist session");
        }
    }
}
