// Storage module for the persisted session.
// Rehydrate on start, write on every change.

pub mod paths;
pub mod store;

pub use paths::{config_path, default_data_dir, log_dir, session_path};
pub use store::{
    PersistedSession, SESSION_KEY, load_session, persist_on_change, save_session,
};
