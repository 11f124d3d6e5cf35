// Storage path utilities.
// Resolves where the config, session blob, and logs live on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::store::SESSION_KEY;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "arbor")
}

/// Default data directory (~/.local/share/arbor on Linux).
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the optional config file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Path to the session blob, named after the session key.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{}.json", sanitize_name(SESSION_KEY)))
}

/// Directory for rolling log files.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("arbor:session"), "arbor_session");
    }

    #[test]
    fn test_paths_under_data_dir() {
        let data_dir = Path::new("/tmp/arbor-data");

        let session = session_path(data_dir);
        assert!(session.starts_with(data_dir));
        assert_eq!(
            session.file_name().unwrap().to_str().unwrap(),
            format!("{}.json", sanitize_name(SESSION_KEY))
        );

        assert!(log_dir(data_dir).ends_with("arbor-data/logs"));
    }
}
