//! Config command - inspect and store processor settings.

use std::fs;
use std::path::Path;

use clap::{Args, Subcommand};
use console::style;

use docai_core::ConfigResolver;

use crate::report::Reporter;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Resolve and print the current configuration
    Show,

    /// Store a processor ID in the project's fallback file
    SetProcessor {
        /// Processor ID
        id: String,
    },

    /// Show the processor ID file path
    Path,
}

pub async fn run(args: ConfigArgs, root: &Path, reporter: &Reporter) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(root, reporter),
        ConfigCommand::SetProcessor { id } => set_processor(root, &id),
        ConfigCommand::Path => show_path(root),
    }
}

fn show_config(root: &Path, reporter: &Reporter) -> anyhow::Result<()> {
    let config = super::resolve_config(root, reporter)?;

    let mut json = serde_json::to_value(&config)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("processor_name".into(), config.processor_name().into());
        obj.insert("api_endpoint".into(), config.api_endpoint().into());
        obj.insert(
            "access_token".into(),
            if config.access_token.is_some() { "<set>" } else { "gcloud" }.into(),
        );
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn set_processor(root: &Path, id: &str) -> anyhow::Result<()> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("Processor ID must not be empty");
    }

    let path = ConfigResolver::new(root).processor_id_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, format!("{}\n", id))?;

    println!(
        "{} Processor ID written to {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn show_path(root: &Path) -> anyhow::Result<()> {
    let path = ConfigResolver::new(root).processor_id_path();

    println!("Processor ID file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'docai config set-processor <ID>' or set DOCAI_PROCESSOR_ID.");
    }

    Ok(())
}
