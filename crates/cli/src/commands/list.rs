//! List command - ordered terms per taxonomy

use anyhow::{Context, Result};
use std::path::PathBuf;
use taxonomy_index_domain::usecases::{Lister, TaxonomyListing};

use crate::args::ListArgs;
use crate::commands::{build_index, format_dates};
use crate::config::AppConfig;

pub async fn execute(args: ListArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let index = build_index(&config, args.content.as_deref()).await?;

    let mut listing_config = config.listing_config();
    if let Some(order) = args.order {
        listing_config.order = order.into();
    }
    if args.reverse {
        listing_config.reverse = true;
    }
    if args.limit.is_some() {
        listing_config.limit = args.limit;
    }

    let lister = Lister::new(listing_config);
    let listings = match args.taxonomy.as_deref() {
        Some(plural) => vec![lister.list(&index, plural)?],
        None => lister.list_all(&index),
    };

    if args.json {
        let output = serde_json::json!({
            "generation": index.generation(),
            "fingerprint": index.taxonomies().fingerprint(),
            "items": index.item_count(),
            "taxonomies": listings,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize listing")?
        );
    } else {
        for listing in &listings {
            print_listing(listing);
        }
    }

    Ok(())
}

fn print_listing(listing: &TaxonomyListing) {
    let (date, lastmod) = format_dates(&listing.dates);
    println!(
        "{} ({}) - {} terms, date {}, lastmod {}",
        listing.plural,
        listing.singular,
        listing.terms.len(),
        date,
        lastmod
    );

    for term in &listing.terms {
        let (date, lastmod) = format_dates(&term.dates);
        println!(
            "  {:<24} {:>5}  {}  {}  ({})",
            term.key, term.count, date, lastmod, term.term
        );
    }
    println!();
}
