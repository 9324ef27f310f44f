// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use plancal_rest::RestConfig;

use crate::content::MAX_TIMELINE_DAYS;
use crate::{Platform, WeekStart};

/// The name of the application.
pub const APP_NAME: &str = "plancal";

const DB_FILENAME: &str = "plancal.db";
const SESSION_FILENAME: &str = "session.json";

/// Configuration for the planner.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Preparation window for new content items, in days.
    #[serde(default = "default_timeline_days")]
    pub default_timeline_days: u32,

    /// Platform for new content items.
    #[serde(default)]
    pub default_platform: Platform,

    /// First weekday of the month grid.
    #[serde(default)]
    pub week_start: WeekStart,

    /// Where categories and content items are stored.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            default_timeline_days: default_timeline_days(),
            default_platform: Platform::default(),
            week_start: WeekStart::default(),
            backend: BackendConfig::default(),
        }
    }
}

const fn default_timeline_days() -> u32 {
    1
}

/// Storage backend for categories and content items.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// SQLite database in the state directory.
    #[default]
    Local,

    /// Hosted table API.
    Remote(RestConfig),
}

impl Config {
    /// Normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be expanded or a value is out of range.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                );
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        if !(1..=MAX_TIMELINE_DAYS).contains(&self.default_timeline_days) {
            return Err(format!(
                "default_timeline_days must be between 1 and {MAX_TIMELINE_DAYS}, got {}",
                self.default_timeline_days
            )
            .into());
        }

        if let BackendConfig::Remote(rest) = &mut self.backend {
            let base_url = rest.base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                return Err("backend.base_url must not be empty".into());
            }
            rest.base_url = base_url.to_string();
        }

        Ok(())
    }

    /// Path of the SQLite database, `None` for an in-memory database.
    #[must_use]
    pub fn db_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|a| a.join(DB_FILENAME))
    }

    /// Path of the saved sign-in session of the remote backend.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|a| a.join(SESSION_FILENAME))
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}
