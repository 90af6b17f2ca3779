mod config;
mod gallery;
mod init;
mod precache;
mod search;
mod submit;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use storefront::services::{ConfigService, FormValues, SiteConfig};

/// Parse form field key=value pairs from command line arguments
pub fn parse_fields(pairs: &[String]) -> Result<FormValues> {
    let mut map = FormValues::new();
    for pair in pairs {
        let parts: Vec<&str> = pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid field format: {}", pair));
        }
        map.insert(parts[0].to_string(), parts[1].to_string());
    }
    Ok(map)
}

/// Site configuration for the current directory, defaults when not initialized
pub fn load_config() -> Result<SiteConfig> {
    ConfigService::new(Path::new(".")).load()
}

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Form validation, catalog search and submission feedback for Brew & Sculpt", long_about = None)]
pub struct Cli {
    /// Enable verbose output (info logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default site configuration
    Init(init::InitArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Validate a single field value
    Validate(validate::ValidateArgs),

    /// Filter the product catalog
    Search(search::SearchArgs),

    /// Submit the enquiry or contact form
    Submit(submit::SubmitArgs),

    /// Navigate a lightbox gallery
    Gallery(gallery::GalleryArgs),

    /// Precache the offline asset manifest
    Precache(precache::PrecacheArgs),
}

/// Execute the CLI command
pub async fn execute(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Init(args) => init::execute(args).await.map(|_| ExitCode::SUCCESS),
        Commands::Config(args) => config::execute(args).await.map(|_| ExitCode::SUCCESS),
        Commands::Validate(args) => validate::execute(args).await,
        Commands::Search(args) => search::execute(args).await.map(|_| ExitCode::SUCCESS),
        Commands::Submit(args) => submit::execute(args).await,
        Commands::Gallery(args) => gallery::execute(args).await.map(|_| ExitCode::SUCCESS),
        Commands::Precache(args) => precache::execute(args).await.map(|_| ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fields_splits_on_first_equals() {
        let fields = parse_fields(&[
            "name=Lerato".to_string(),
            "message=a=b".to_string(),
        ])
        .unwrap();
        assert_eq!(fields["name"], "Lerato");
        assert_eq!(fields["message"], "a=b");
    }

    #[test]
    fn parse_fields_rejects_missing_equals() {
        assert!(parse_fields(&["name".to_string()]).is_err());
    }

    #[test]
    fn empty_value_is_allowed() {
        let fields = parse_fields(&["phone=".to_string()]).unwrap();
        assert_eq!(fields["phone"], "");
    }
}
