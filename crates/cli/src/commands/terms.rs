//! Terms command - bind term pages and show every taxonomy node

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use taxonomy_index_domain::{
    PageId, TaxonomyNodeRegistry, TermPage, usecases::bind_term_pages,
};

use crate::args::TermsArgs;
use crate::commands::{build_index, format_dates};
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct NodeView<'a> {
    key: String,
    plural: &'a str,
    singular: &'a str,
    term: &'a str,
    parent: Option<String>,
    owner: Option<PageId>,
    page: &'a TermPage,
}

pub async fn execute(args: TermsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let mut index = build_index(&config, args.content.as_deref()).await?;

    let pages = bind_term_pages(&mut index, 0);
    let nodes = index.nodes();

    // Pages were assigned in node creation order
    let views: Vec<NodeView<'_>> = nodes
        .nodes()
        .zip(pages.iter())
        .map(|((_, node), page)| NodeView {
            key: TaxonomyNodeRegistry::key(&[node.plural(), node.term_key()]),
            plural: node.plural(),
            singular: node.singular(),
            term: node.term(),
            parent: node.parent().map(|parent| {
                let parent = nodes.node(parent);
                TaxonomyNodeRegistry::key(&[parent.plural(), parent.term_key()])
            }),
            owner: node.owner(),
            page,
        })
        .collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("Failed to serialize nodes")?
        );
    } else {
        println!("Taxonomy nodes ({} found)", views.len());
        println!("========================");
        println!();

        for view in &views {
            let (date, lastmod) = format_dates(&view.page.dates);
            println!("{}", view.key);
            println!("  Singular: {}", view.singular);
            if !view.term.is_empty() {
                println!("  Term: {}", view.term);
            }
            if let Some(ref parent) = view.parent {
                println!("  Parent: {}", parent);
            }
            if let Some(owner) = view.owner {
                println!("  Page: {} ({})", owner, view.page.title);
            }
            println!("  Date: {}", date);
            println!("  Lastmod: {}", lastmod);
            println!();
        }
    }

    Ok(())
}
