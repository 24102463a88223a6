//! Reference data summary.
//!
//! Loads the configured data directory exactly as `serve` would and prints
//! what was found. A load error makes the command fail, so `shop-search
//! stats` doubles as a validator for new reference files.

use anyhow::Result;
use shop_search_core::ReferenceStore;

use crate::config::Config;
use crate::data;

/// Number of tags listed in the "top tags" table.
const TOP_TAGS: usize = 10;

pub fn run_stats(config: &Config) -> Result<()> {
    let store = data::load_store(&config.data)?;

    println!("Shop Search — Reference Data");
    println!("============================");
    println!();
    println!("  Data dir:    {}", config.data.dir.display());
    println!();
    println!("  Products:    {}", store.products().len());
    println!("  Shops:       {}", store.shops().len());
    println!("  Tags:        {}", store.tags().len());

    if let (Some(top), Some(bottom)) = (store.products().first(), store.products().last()) {
        println!(
            "  Popularity:  {:.4} .. {:.4}",
            bottom.popularity, top.popularity
        );
    }

    let tags = top_tags(&store, TOP_TAGS);
    if !tags.is_empty() {
        println!();
        println!("  Top tags:");
        println!("  {:<32} {:>6}", "TAG", "SHOPS");
        println!("  {}", "-".repeat(39));
        for (name, shops) in &tags {
            println!("  {:<32} {:>6}", name, shops);
        }
    }

    println!();
    Ok(())
}

/// Tags with the most shops, ties broken by name.
fn top_tags(store: &ReferenceStore, limit: usize) -> Vec<(&str, usize)> {
    let mut tags: Vec<(&str, usize)> = store
        .tags()
        .iter()
        .map(|(name, shops)| (name, shops.len()))
        .collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    tags.truncate(limit);
    tags
}
