//! Processor configuration and its resolution from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Path to the service account JSON file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Processor identifier, preferred over the fallback file.
pub const PROCESSOR_ID_ENV: &str = "DOCAI_PROCESSOR_ID";
/// Processor location.
pub const LOCATION_ENV: &str = "DOCAI_LOCATION";
/// Overrides the API base URL.
pub const ENDPOINT_ENV: &str = "DOCAI_ENDPOINT";
/// Externally issued bearer token, used instead of asking `gcloud`.
pub const ACCESS_TOKEN_ENV: &str = "DOCAI_ACCESS_TOKEN";
/// Fallback file holding the processor identifier, relative to the project root.
pub const PROCESSOR_ID_FILE: &str = "docai_processor_id.txt";
/// Location used when none is configured.
pub const DEFAULT_LOCATION: &str = "us";

/// Fully resolved processor configuration.
///
/// Built once at startup and passed to the drivers; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocAiConfig {
    /// Service account JSON file.
    pub credential_path: PathBuf,

    /// Google Cloud project owning the processor.
    pub project_id: String,

    /// Processor identifier.
    pub processor_id: String,

    /// Processor location (e.g. `us`, `eu`).
    pub location: String,

    /// API base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Pre-issued bearer token.
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl DocAiConfig {
    /// Fully qualified processor resource name.
    pub fn processor_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/processors/{}",
            self.project_id, self.location, self.processor_id
        )
    }

    /// Base URL of the regional Document AI endpoint.
    pub fn api_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}-documentai.googleapis.com", self.location),
        }
    }
}

/// Where the processor identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorIdSource {
    Env,
    File,
}

impl ProcessorIdSource {
    pub fn label(&self) -> &'static str {
        match self {
            ProcessorIdSource::Env => "from env",
            ProcessorIdSource::File => "from file",
        }
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves [`DocAiConfig`] from environment variables and the fallback file.
///
/// Each step is exposed separately so callers can report progress between
/// them; [`ConfigResolver::resolve`] runs them all.
pub struct ConfigResolver {
    root: PathBuf,
    env: EnvLookup,
}

impl ConfigResolver {
    /// Create a resolver reading the process environment.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            env: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Replace the environment lookup.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Location of the processor identifier fallback file.
    pub fn processor_id_path(&self) -> PathBuf {
        self.root.join(PROCESSOR_ID_FILE)
    }

    /// Raw value of the credential variable, if any.
    pub fn credential_env(&self) -> Option<String> {
        self.var(CREDENTIALS_ENV)
    }

    /// Validate the credential path variable and the file it names.
    pub fn credential_path(&self) -> Result<PathBuf, ConfigError> {
        let raw = self
            .credential_env()
            .ok_or(ConfigError::MissingCredentialEnv { var: CREDENTIALS_ENV })?;

        let path = PathBuf::from(raw);
        if !path.is_file() {
            return Err(ConfigError::CredentialFileNotFound {
                path,
                var: CREDENTIALS_ENV,
            });
        }

        debug!("Credentials file exists: {}", path.display());
        Ok(path)
    }

    /// Read `project_id` from the service account JSON.
    pub fn project_id(&self, credential_path: &Path) -> Result<String, ConfigError> {
        let content = fs::read_to_string(credential_path).map_err(|e| {
            ConfigError::InvalidCredentialFormat {
                path: credential_path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let data: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidCredentialFormat {
                path: credential_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let project_id = data
            .get("project_id")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigError::MissingProjectId {
                path: credential_path.to_path_buf(),
            })?;

        info!("Project ID: {}", project_id);
        Ok(project_id.to_string())
    }

    /// Processor identifier from the environment, else the fallback file.
    pub fn processor_id(&self) -> Result<(String, ProcessorIdSource), ConfigError> {
        if let Some(id) = self.var(PROCESSOR_ID_ENV) {
            info!("Processor ID (from env): {}", id);
            return Ok((id, ProcessorIdSource::Env));
        }

        let fallback = self.processor_id_path();
        if fallback.is_file() {
            match fs::read_to_string(&fallback) {
                Ok(content) => {
                    let id = content.trim();
                    if !id.is_empty() {
                        info!("Processor ID (from file): {}", id);
                        return Ok((id.to_string(), ProcessorIdSource::File));
                    }
                    debug!("Processor ID file is empty: {}", fallback.display());
                }
                Err(e) => warn!("Failed to read {}: {}", fallback.display(), e),
            }
        }

        Err(ConfigError::MissingProcessorId {
            var: PROCESSOR_ID_ENV,
            fallback,
        })
    }

    /// Processor location, defaulting to `us`.
    pub fn location(&self) -> String {
        self.var(LOCATION_ENV)
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string())
    }

    /// API base URL override, if configured.
    pub fn endpoint(&self) -> Option<String> {
        self.var(ENDPOINT_ENV)
    }

    /// Pre-issued bearer token, if configured.
    pub fn access_token(&self) -> Option<String> {
        self.var(ACCESS_TOKEN_ENV)
    }

    /// Run every resolution step.
    pub fn resolve(&self) -> Result<DocAiConfig, ConfigError> {
        let credential_path = self.credential_path()?;
        let project_id = self.project_id(&credential_path)?;
        let (processor_id, _) = self.processor_id()?;

        Ok(DocAiConfig {
            credential_path,
            project_id,
            processor_id,
            location: self.location(),
            endpoint: self.endpoint(),
            access_token: self.access_token(),
        })
    }

    /// Trimmed, non-empty environment value.
    fn var(&self, key: &str) -> Option<String> {
        (self.env)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
