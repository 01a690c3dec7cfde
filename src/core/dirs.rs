use crate::core::error::GitwappError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, GitwappError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or(GitwappError::ConfigDirectoryNotFound)
            })?,
        "macos" => dirs::home_dir()
            .ok_or(GitwappError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(GitwappError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("gitwapp"))
}

/// Registry files live here unless `--data-dir` overrides it
pub fn get_data_directory() -> Result<PathBuf, GitwappError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".local/share"))
                    .ok_or(GitwappError::ConfigDirectoryNotFound)
            })?,
        _ => dirs::data_dir().ok_or(GitwappError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("gitwapp"))
}

/// Home directory used to locate per-user SSH keys
pub fn get_home_directory() -> Option<PathBuf> {
    dirs::home_dir()
}
