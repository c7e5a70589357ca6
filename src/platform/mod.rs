// BrewBrowser platform abstraction
// Resolves where settings and the local database live on each OS.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "BREWBROWSER_DATA_DIR";

/// Returns the platform-specific configuration directory for BrewBrowser.
///
/// - **Linux**: `~/.config/brewbrowser` (or `$XDG_CONFIG_HOME/brewbrowser`)
/// - **macOS**: `~/Library/Application Support/BrewBrowser`
/// - **Windows**: `%APPDATA%/BrewBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for BrewBrowser.
///
/// - **Linux**: `~/.local/share/brewbrowser` (or `$XDG_DATA_HOME/brewbrowser`)
/// - **macOS**: `~/Library/Application Support/BrewBrowser`
/// - **Windows**: `%APPDATA%/BrewBrowser`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Full path of the local database file.
///
/// `BREWBROWSER_DATA_DIR` wins over the platform data directory.
pub fn database_path(file_name: &str) -> PathBuf {
    match env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(file_name),
        _ => get_data_dir().join(file_name),
    }
}
