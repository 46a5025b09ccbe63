//! Error types for the docai-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the docai library.
#[derive(Error, Debug)]
pub enum DocAiError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input file was rejected before submission.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The document processing service failed.
    #[error("Document AI processing failed: {0}")]
    Remote(#[from] RemoteCallError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while resolving credentials and processor settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The credential path variable is unset or empty.
    #[error(
        "{var} not set.\n\
         Set it to your service account JSON file path:\n  \
         Windows: $env:{var} = 'C:\\path\\to\\docai.json'\n  \
         Linux:   export {var}=/path/to/docai.json"
    )]
    MissingCredentialEnv { var: &'static str },

    /// The credential path does not point at a regular file.
    #[error(
        "Google OCR credentials not found.\n\
         File does not exist: {}\n\
         Check your {var} environment variable.",
        .path.display()
    )]
    CredentialFileNotFound { path: PathBuf, var: &'static str },

    /// The credential file is not valid JSON.
    #[error("Invalid JSON in credentials file {}: {reason}", .path.display())]
    InvalidCredentialFormat { path: PathBuf, reason: String },

    /// The credential file has no usable `project_id`.
    #[error("project_id not found in credentials file {}", .path.display())]
    MissingProjectId { path: PathBuf },

    /// Neither the environment nor the fallback file named a processor.
    #[error(
        "Processor ID not found.\n\
         Set {var} env var or create: {}",
        .fallback.display()
    )]
    MissingProcessorId { var: &'static str, fallback: PathBuf },
}

/// Errors about the documents handed to the drivers.
#[derive(Error, Debug)]
pub enum InputError {
    /// Input file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Extension does not map to a supported MIME type.
    #[error("Unsupported file type: {}", .path.display())]
    UnsupportedMimeType { path: PathBuf },

    /// Batch input directory is missing.
    #[error("Input directory not found: {}", .path.display())]
    InputDirNotFound { path: PathBuf },

    /// Batch input directory holds nothing we can submit.
    #[error("No supported files in {}", .path.display())]
    NoSupportedFiles { path: PathBuf },

    /// No path was given on the command line or at the prompt.
    #[error("No input file given")]
    Empty,
}

/// Opaque failures from the remote document processor.
#[derive(Error, Debug)]
pub enum RemoteCallError {
    /// No bearer token could be obtained.
    #[error("could not obtain access token: {0}")]
    Auth(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The response carried no document.
    #[error("response contained no document")]
    EmptyResponse,
}

impl From<reqwest::Error> for RemoteCallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteCallError::Decode(err.to_string())
        } else {
            RemoteCallError::Transport(err.to_string())
        }
    }
}

/// Result type for the docai library.
pub type Result<T> = std::result::Result<T, DocAiError>;
