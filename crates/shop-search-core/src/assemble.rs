//! Result assembly: join each selected product with its shop.

use serde::Serialize;

use crate::error::SearchError;
use crate::models::{Product, Shop};
use crate::search::{search, SearchFilters};
use crate::store::ReferenceStore;

/// A product as returned to clients, with its shop embedded in place of
/// `shop_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub id: String,
    pub title: String,
    pub popularity: f64,
    pub quantity: u64,
    pub shop: Shop,
}

/// Embed the product's shop record.
///
/// A missing shop means the store's load-time integrity check was bypassed
/// and is reported rather than skipped.
pub fn assemble(store: &ReferenceStore, product: &Product) -> Result<ProductRecord, SearchError> {
    let shop = store
        .shop(&product.shop_id)
        .ok_or_else(|| SearchError::MissingShop {
            product_id: product.id.clone(),
            shop_id: product.shop_id.clone(),
        })?;

    Ok(ProductRecord {
        id: product.id.clone(),
        title: product.title.clone(),
        popularity: product.popularity,
        quantity: product.quantity,
        shop: shop.clone(),
    })
}

/// [`search`] followed by [`assemble`] on every hit.
pub fn search_records(
    store: &ReferenceStore,
    filters: &SearchFilters,
) -> Result<Vec<ProductRecord>, SearchError> {
    search(store, filters)
        .into_iter()
        .map(|product| assemble(store, product))
        .collect()
}
