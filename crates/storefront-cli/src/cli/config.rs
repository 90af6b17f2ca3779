use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use storefront::services::ConfigService;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

pub async fn execute(args: ConfigArgs) -> Result<()> {
    let project_root = PathBuf::from(".");
    let config_service = ConfigService::new(&project_root);

    if !config_service.exists() {
        return Err(anyhow::anyhow!(
            "Storefront not initialized. Run 'storefront init' first."
        ));
    }

    match args.command {
        ConfigCommands::Show => {
            let config = config_service.load()?;
            let rendered =
                serde_json::to_string_pretty(&config).context("Failed to render config")?;
            println!("{}", rendered);
        },

        ConfigCommands::Get { key } => {
            let value = config_service.get(&key)?;
            println!("{}", value);
        },

        ConfigCommands::Set { key, value } => {
            config_service.set(&key, value.clone())?;
            println!("Set {} = {}", key, value);
        },
    }

    Ok(())
}
