// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use plancal_core::{APP_NAME, Config as CoreConfig};
use tokio::fs;

const PLANCAL_CONFIG_ENV: &str = "PLANCAL_CONFIG";
const PLANCAL_DEV_ENV: &str = "PLANCAL_DEV";

const PLANCAL_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const PLANCAL_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Loads the planner configuration.
///
/// The path given on the command line wins over `$PLANCAL_CONFIG`, which wins
/// over the per-user config file. A missing per-user file means defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if no path was
/// given while `PLANCAL_DEV` is set.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(PLANCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({PLANCAL_DEV_ENV} is set): config must be explicitly specified via --config or {PLANCAL_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::info!(path = %config.display(), "no config file, using defaults");
            return Ok(CoreConfig::default());
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {e}", path.display()))?
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Failed to parse config file at {}: {e}", path.display()))?;
    Ok(raw.core)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(PLANCAL_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if PLANCAL_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if PLANCAL_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {PLANCAL_DEV_ENV}: '{val}'. Expected one of: true: {}, false: {}. Treating as unset.",
            PLANCAL_DEV_VALID_TRUE.join(", "),
            PLANCAL_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
