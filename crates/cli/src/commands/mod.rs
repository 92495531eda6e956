//! Command implementations

pub mod config;
pub mod list;
pub mod terms;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use taxonomy_index_adapters::content::JsonManifestSource;
use taxonomy_index_domain::{
    ClassifiedItem, ContentSource, Dates, Page,
    usecases::{IndexBuilder, TaxonomyIndex},
};
use time::format_description::well_known::Rfc3339;

use crate::config::AppConfig;

/// Load the manifest and run one build generation over it
pub(crate) async fn build_index(
    config: &AppConfig,
    content: Option<&Path>,
) -> Result<TaxonomyIndex<Arc<Page>>> {
    let path = content.unwrap_or(config.general.content_path.as_path());

    let source =
        JsonManifestSource::new(path).context("Failed to initialize content source")?;
    let pages = source.load().await.context("Failed to load content")?;

    let builder = IndexBuilder::new(&config.build_config(), config.normalizer());
    let batch: Vec<ClassifiedItem<Arc<Page>>> = pages.into_iter().map(Into::into).collect();

    tracing::info!(
        generation = %builder.generation(),
        items = batch.len(),
        "Classifying content"
    );

    // Classification is CPU-bound; keep it off the async workers
    let index = tokio::task::spawn_blocking(move || {
        builder.classify_all(batch)?;
        builder.freeze()
    })
    .await
    .context("Classification task failed")??;

    Ok(index)
}

/// Format dates for text output, `-` when unset
pub(crate) fn format_dates(dates: &Dates) -> (String, String) {
    let fmt = |date: Option<time::OffsetDateTime>| {
        date.and_then(|d| d.format(&Rfc3339).ok())
            .unwrap_or_else(|| "-".to_string())
    };
    (fmt(dates.date), fmt(dates.lastmod))
}
