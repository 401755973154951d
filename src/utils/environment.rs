use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Directory name used under the platform data directory
const APP_DIR_NAME: &str = "code-copilot";
/// Directory name used under `$HOME` when the platform has no data directory
const HOME_DIR_NAME: &str = ".code-copilot";

/// Default location of persisted session state.
///
/// Prefers the platform data directory (e.g. `~/.local/share/code-copilot`),
/// falling back to `$HOME/.code-copilot`.
pub fn default_data_dir() -> Result<PathBuf> {
    resolve_data_dir(dirs::data_dir().as_deref(), env::var("HOME").ok().as_deref())
}

pub(crate) fn resolve_data_dir(platform_dir: Option<&Path>, home: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = platform_dir {
        return Ok(dir.join(APP_DIR_NAME));
    }
    match home {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home).join(HOME_DIR_NAME)),
        _ => bail!("Cannot determine data directory: no platform data dir and HOME is not set"),
    }
}
