//! Runtime configuration resolved from command-line options and the environment

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::utils::default_data_dir;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the generation backend; requests go to `{backend_url}/generate`
    pub backend_url: String,
    /// Directory holding `history.json` and `darkMode.json`
    pub data_dir: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Fill in defaults for anything not given explicitly.
    ///
    /// Only the data directory lookup can fail (no home directory at all).
    pub fn resolve(
        backend_url: Option<String>,
        data_dir: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let backend_url = backend_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1));

        Ok(Self { backend_url, data_dir, timeout })
    }
}
