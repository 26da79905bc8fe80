//! Directory layout for fusion-ctl.
//!
//! - Config: `~/.config/fusion-ctl/config.toml` (XDG-style on every platform)
//! - Logs:   `~/Library/Logs/fusion-ctl/` on macOS, the XDG data dir elsewhere

use std::path::{Path, PathBuf};

use tracing::info;

const APP_NAME: &str = "fusion-ctl";
const CONFIG_FILE: &str = "config.toml";

/// Resolved application directories.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config: PathBuf,
    pub logs: PathBuf,
}

impl AppPaths {
    /// Resolve all paths from the user's home directory.
    /// Does not create any directories; call `ensure()` for that.
    pub fn resolve() -> Option<Self> {
        let home = std::env::var("HOME").ok().map(PathBuf::from)?;
        Some(Self {
            config: resolve_config_dir(&home),
            logs: resolve_log_dir(&home),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config.join(CONFIG_FILE)
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.logs] {
            std::fs::create_dir_all(dir)?;
            info!("ensured directory: {}", dir.display());
        }
        Ok(())
    }
}

fn resolve_config_dir(home: &Path) -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join(APP_NAME)
    } else {
        home.join(".config").join(APP_NAME)
    }
}

#[cfg(target_os = "macos")]
fn resolve_log_dir(home: &Path) -> PathBuf {
    home.join("Library").join("Logs").join(APP_NAME)
}

#[cfg(not(target_os = "macos"))]
fn resolve_log_dir(home: &Path) -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join(APP_NAME).join("logs")
    } else {
        home.join(".local").join("share").join(APP_NAME).join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_produces_app_scoped_paths() {
        let paths = AppPaths::resolve().expect("HOME should be set in tests");
        assert!(paths.config.to_string_lossy().contains("fusion-ctl"));
        assert!(paths.logs.to_string_lossy().contains("fusion-ctl"));
        assert!(paths.config_file().ends_with("config.toml"));
    }

    #[test]
    fn ensure_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = AppPaths {
            config: tmp.path().join("config"),
            logs: tmp.path().join("logs"),
        };

        paths.ensure().expect("ensure should succeed");

        assert!(paths.config.is_dir());
        assert!(paths.logs.is_dir());
    }
}
