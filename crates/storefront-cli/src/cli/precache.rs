use super::load_config;
use anyhow::Result;
use clap::Args;
use storefront::offline::{CacheManifest, HttpFetcher, OfflineCache};

#[derive(Args)]
pub struct PrecacheArgs {
    /// Site origin the manifest paths are resolved against
    #[arg(long)]
    base_url: String,
}

pub async fn execute(args: PrecacheArgs) -> Result<()> {
    let config = load_config()?;
    let fetcher = HttpFetcher::new(&args.base_url)?;
    let cache = OfflineCache::new(CacheManifest::from(&config.offline));

    let count = cache.install(&fetcher).await?;
    cache.activate();

    println!(
        "Cached {} files in {} from {}",
        count,
        cache.manifest().cache_name,
        args.base_url
    );
    Ok(())
}
