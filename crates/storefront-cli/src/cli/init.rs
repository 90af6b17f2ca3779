use anyhow::Result;
use clap::Args;
use storefront::services::ConfigService;
use std::path::PathBuf;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,

    /// Project root directory
    #[arg(default_value = ".")]
    path: PathBuf,
}

pub async fn execute(args: InitArgs) -> Result<()> {
    let project_root = args.path;
    let config_service = ConfigService::new(&project_root);

    if config_service.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Storefront already initialized at {}. Use --force to overwrite.",
            config_service.config_path().display()
        ));
    }

    let config = config_service.init()?;

    println!("Initialized storefront at {}", project_root.display());
    println!("  Config: {}", config_service.config_path().display());
    println!("  Contact: {}", config.contact_email);
    println!("  Locations: {}", config.locations.len());
    println!("  Offline cache: {}", config.offline.cache_name);

    Ok(())
}
