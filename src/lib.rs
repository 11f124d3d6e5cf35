//! arbor: a terminal file-tree explorer with a tabbed text editor.
//!
//! - state: session core (tree store, tab manager, reducer, store)
//! - storage: persisted session blob and on-disk paths
//! - config / logging / error: ambient setup for the binary
//! - app / ui / terminal: terminal host that owns the store and renders it

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod storage;
pub mod terminal;
pub mod ui;
