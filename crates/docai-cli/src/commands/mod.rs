//! Subcommands and the steps they share.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use docai_core::models::config::CREDENTIALS_ENV;
use docai_core::{ConfigResolver, DocAiConfig, DocAiError};

use crate::report::Reporter;

/// Resolve the processor configuration, reporting each value as it is found.
pub fn resolve_config(root: &Path, reporter: &Reporter) -> Result<DocAiConfig, DocAiError> {
    let resolver = ConfigResolver::new(root);

    reporter.info(format!(
        "{} = {}",
        CREDENTIALS_ENV,
        resolver.credential_env().as_deref().unwrap_or("None")
    ));
    let credential_path = resolver.credential_path()?;
    reporter.ok(format!("Credentials file exists: {}", credential_path.display()));

    let project_id = resolver.project_id(&credential_path)?;
    reporter.ok(format!("Project ID: {}", project_id));

    let (processor_id, source) = resolver.processor_id()?;
    reporter.ok(format!("Processor ID ({}): {}", source.label(), processor_id));

    let location = resolver.location();
    reporter.ok(format!("Location: {}", location));

    Ok(DocAiConfig {
        credential_path,
        project_id,
        processor_id,
        location,
        endpoint: resolver.endpoint(),
        access_token: resolver.access_token(),
    })
}

/// Spinner shown while waiting on the remote processor.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
