use super::load_config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use storefront::debounce::Debouncer;
use storefront::services::{Catalog, FilterOutcome, SearchService};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct SearchArgs {
    /// Search query (empty shows everything)
    #[arg(default_value = "")]
    query: String,

    /// Catalog file (.json, .yaml or .yml); defaults to the configured products
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Read queries from stdin, one per line, debounced like keystrokes
    #[arg(long)]
    interactive: bool,
}

fn print_outcome(service: &SearchService, outcome: &FilterOutcome) {
    if let Some(message) = service.indicator().message() {
        println!("{}", message);
        return;
    }

    for item in service.visible(outcome) {
        match &item.price {
            Some(price) => println!("{}  {}  ({})", item.id, item.title, price),
            None => println!("{}  {}", item.id, item.title),
        }
    }
    println!("{} matching", outcome.match_count);
}

pub async fn execute(args: SearchArgs) -> Result<()> {
    let config = load_config()?;
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::from_products(&config.products),
    };
    let mut service = SearchService::new(catalog);

    if !args.interactive {
        let outcome = service.search(&args.query);
        print_outcome(&service, &outcome);
        return Ok(());
    }

    let service = Arc::new(Mutex::new(service));
    let debouncer = {
        let service = Arc::clone(&service);
        Debouncer::new(config.search.debounce(), move |query: String| {
            let mut service = service.lock().unwrap_or_else(PoisonError::into_inner);
            let outcome = service.search(&query);
            println!("> {}", query.trim());
            print_outcome(&service, &outcome);
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debouncer.schedule(line);
    }

    // Let the trailing call fire once input ends
    while debouncer.is_pending() {
        tokio::time::sleep(debouncer.wait()).await;
    }

    Ok(())
}
