// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::io;
use std::path::Path;

use plancal_rest::{AuthMethod, RestClient, RestConfig, Session};
use tokio::fs;

use crate::{BackendConfig, Config};

/// Signs in to the remote backend and saves the session in the state directory.
///
/// # Errors
///
/// Returns an error if the backend is not remote, the credentials are rejected,
/// or the session cannot be saved.
pub async fn login(mut config: Config, email: &str, password: &str) -> Result<Session, Box<dyn Error>> {
    config.normalize()?;
    let rest = remote_config(&config)?;
    let path = config
        .session_path()
        .ok_or("No state directory configured to keep the session in")?;

    let mut client = RestClient::new(rest.clone())?;
    let session = client
        .sign_in(email, password)
        .await
        .map_err(|e| format!("Failed to sign in: {e}"))?;

    save_session(&path, &session).await?;
    Ok(session)
}

/// Signs out of the remote backend and forgets the saved session.
///
/// Returns whether a session was saved.
///
/// # Errors
///
/// Returns an error if the backend is not remote or the session file cannot be removed.
pub async fn logout(mut config: Config) -> Result<bool, Box<dyn Error>> {
    config.normalize()?;
    let rest = remote_config(&config)?;
    let Some(path) = config.session_path() else {
        return Ok(false);
    };
    let Some(session) = load_session(&path).await? else {
        return Ok(false);
    };

    let mut client = RestClient::new(rest.clone())?.with_session(&session);
    if let Err(err) = client.sign_out().await {
        tracing::warn!(%err, "failed to revoke session, forgetting it anyway");
    }

    fs::remove_file(&path)
        .await
        .map_err(|e| format!("Failed to remove session file {}: {e}", path.display()))?;
    Ok(true)
}

/// Creates a client for the remote backend, reusing the saved session and
/// signing in with configured credentials when there is none.
///
/// An expired session is refreshed with its refresh token. If that fails it is
/// dropped, and the configured password is used instead.
pub(crate) async fn connect(
    rest: &RestConfig,
    session_path: Option<&Path>,
) -> Result<RestClient, Box<dyn Error>> {
    let mut client = RestClient::new(rest.clone())?;

    let saved = match session_path {
        Some(path) => load_session(path).await?,
        None => None,
    };
    let mut stale = false;
    match saved {
        Some(session) if !session.is_expired() => {
            tracing::debug!("using saved session");
            client = client.with_session(&session);
        }
        Some(session) => {
            tracing::info!("saved session has expired");
            stale = true;
            if let Some(token) = &session.refresh_token {
                match client.refresh_session(token).await {
                    Ok(fresh) => {
                        stale = false;
                        if let Some(path) = session_path {
                            save_session(path, &fresh).await?;
                        }
                    }
                    Err(err) => tracing::warn!(%err, "failed to refresh session"),
                }
            }
        }
        None => {}
    }

    let session = client
        .authenticate()
        .await
        .map_err(|e| format!("Failed to sign in: {e}"))?;
    match (session, session_path) {
        (Some(session), Some(path)) => save_session(path, &session).await?,
        (None, Some(path)) if stale => {
            forget_session(path).await?;
            if matches!(rest.auth, AuthMethod::None) {
                return Err("Saved session has expired, sign in again".into());
            }
        }
        _ => {}
    }

    Ok(client)
}

fn remote_config(config: &Config) -> Result<&RestConfig, Box<dyn Error>> {
    match &config.backend {
        BackendConfig::Remote(rest) => Ok(rest),
        BackendConfig::Local => Err("Sign-in is only available with the remote backend".into()),
    }
}

async fn load_session(path: &Path) -> Result<Option<Session>, Box<dyn Error>> {
    match fs::read_to_string(path).await {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %path.display(), err = %e, "ignoring unreadable session");
                Ok(None)
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(format!("Failed to read session file {}: {e}", path.display()).into()),
    }
}

async fn forget_session(path: &Path) -> Result<(), Box<dyn Error>> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("Failed to remove session file {}: {e}", path.display()).into()),
    }
}

async fn save_session(path: &Path, session: &Session) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(session)?;
    fs::write(path, content)
        .await
        .map_err(|e| format!("Failed to write session file {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved session");
    Ok(())
}
