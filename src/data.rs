//! Startup loading of the reference data directory.
//!
//! Opens the four configured files and hands them to
//! [`ReferenceStore::load`]. Any failure is returned with the offending
//! path attached; callers treat it as fatal.

use anyhow::{Context, Result};
use shop_search_core::ReferenceStore;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use crate::config::DataConfig;

pub fn load_store(data: &DataConfig) -> Result<ReferenceStore> {
    let started = Instant::now();
    tracing::info!(dir = %data.dir.display(), "loading reference data");

    let store = ReferenceStore::load(
        open(&data.products_path())?,
        open(&data.shops_path())?,
        open(&data.taggings_path())?,
        open(&data.tags_path())?,
    )
    .with_context(|| format!("Failed to load reference data from {}", data.dir.display()))?;

    tracing::info!(
        products = store.products().len(),
        shops = store.shops().len(),
        tags = store.tags().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "reference data loaded"
    );

    Ok(store)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open reference file: {}", path.display()))?;
    Ok(BufReader::new(file))
}
