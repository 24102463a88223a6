//! Reference data records.
//!
//! One statically declared record type per reference file. Field order
//! matches the column order of the file's header row.

use serde::{Deserialize, Serialize};

/// A row of `products.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: String,
    /// Foreign key into [`Shop::id`].
    pub shop_id: String,
    pub title: String,
    /// Static ranking signal; higher sorts first.
    pub popularity: f64,
    pub quantity: u64,
}

/// A row of `shops.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// A row of `taggings.csv`, the shop/tag join table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tagging {
    pub id: String,
    pub shop_id: String,
    pub tag_id: String,
}

/// A row of `tags.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}
