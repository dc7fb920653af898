//! Configuration paths for token-markdown
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/token-markdown/`
//! - Windows: `%APPDATA%\token-markdown\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "token-markdown";

/// Base config directory
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/token-markdown`
///   - Else: `~/.config/token-markdown`
///
/// Windows:
///   - `%APPDATA%\token-markdown`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/token-markdown/styles/`
pub fn styles_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("styles"))
}

/// `~/.config/token-markdown/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdirs_live_under_config_dir() {
        let Some(base) = config_dir() else {
            return;
        };
        assert!(base.ends_with(APP_DIR));
        assert_eq!(styles_dir(), Some(base.join("styles")));
        assert_eq!(logs_dir(), Some(base.join("logs")));
    }
}
