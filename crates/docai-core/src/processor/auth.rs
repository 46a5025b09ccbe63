//! Bearer tokens for the Document AI REST API.
//!
//! Tokens are always issued outside this crate: either handed in directly
//! or printed by the Google Cloud SDK for the active application default
//! credentials.

use tokio::process::Command;
use tracing::debug;

use crate::error::RemoteCallError;

/// Source of the bearer token attached to each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProvider {
    /// A token supplied up front.
    Static(String),

    /// Ask `gcloud` for an application default token on every call.
    Gcloud,
}

impl TokenProvider {
    /// Use the given token if any, otherwise fall back to `gcloud`.
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) => TokenProvider::Static(token),
            None => TokenProvider::Gcloud,
        }
    }

    /// Obtain a bearer token.
    pub async fn token(&self) -> Result<String, RemoteCallError> {
        match self {
            TokenProvider::Static(token) => Ok(token.clone()),
            TokenProvider::Gcloud => gcloud_token().await,
        }
    }
}

async fn gcloud_token() -> Result<String, RemoteCallError> {
    debug!("Requesting access token from gcloud");

    let output = Command::new("gcloud")
        .args(["auth", "application-default", "print-access-token"])
        .output()
        .await
        .map_err(|e| RemoteCallError::Auth(format!("failed to run gcloud: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RemoteCallError::Auth(format!(
            "gcloud exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(RemoteCallError::Auth("gcloud printed an empty token".into()));
    }

    Ok(token)
}
