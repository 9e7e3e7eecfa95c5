//! Common filesystem paths used by pathsieve.

use std::path::PathBuf;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pathsieve.toml";

/// Path to the pathsieve configuration file.
///
/// Defaults to `./pathsieve.toml`, but can be overridden via
/// `PATHSIEVE_CONFIG` for testing or multi-project setups.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PATHSIEVE_CONFIG") {
        return PathBuf::from(path);
    }

    PathBuf::from(CONFIG_FILE_NAME)
}
