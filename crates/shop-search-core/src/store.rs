//! The Reference Store: immutable products, shops and tag index.
//!
//! Built once from four comma-separated sources and read-only afterwards,
//! so a single instance can be shared across threads without locking.
//!
//! # Loading
//!
//! 1. Each source's header row must match its fixed column list exactly.
//! 2. Rows are deserialized into the typed records of [`crate::models`];
//!    any malformed row fails the whole load. Surrounding whitespace is
//!    trimmed from every field.
//! 3. Shops are indexed by id (duplicates rejected), every product's
//!    `shop_id` is checked against that index.
//! 4. Products are stable-sorted by popularity, descending, so equal
//!    popularities keep file order.

use std::collections::HashMap;
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::models::{Product, Shop, Tag, Tagging};
use crate::tags::TagIndex;

pub const PRODUCT_COLUMNS: &[&str] = &["id", "shop_id", "title", "popularity", "quantity"];
pub const SHOP_COLUMNS: &[&str] = &["id", "name", "lat", "lng"];
pub const TAGGING_COLUMNS: &[&str] = &["id", "shop_id", "tag_id"];
pub const TAG_COLUMNS: &[&str] = &["id", "name"];

#[derive(Debug, Clone)]
pub struct ReferenceStore {
    products: Vec<Product>,
    shops: Vec<Shop>,
    shop_index: HashMap<String, usize>,
    tags: TagIndex,
}

impl ReferenceStore {
    /// Parse all four reference sources and build the store.
    pub fn load<P, S, G, T>(
        products: P,
        shops: S,
        taggings: G,
        tags: T,
    ) -> Result<Self, LoadError>
    where
        P: Read,
        S: Read,
        G: Read,
        T: Read,
    {
        let products = parse_products(products)?;
        let shops = parse_shops(shops)?;
        let taggings = parse_taggings(taggings)?;
        let tags = parse_tags(tags)?;
        Self::new(products, shops, TagIndex::build(&taggings, &tags))
    }

    /// Build a store from already-decoded records.
    ///
    /// Enforces the same invariants as [`ReferenceStore::load`]: finite
    /// numbers, unique shop ids, no dangling product shop references.
    pub fn new(
        mut products: Vec<Product>,
        shops: Vec<Shop>,
        tags: TagIndex,
    ) -> Result<Self, LoadError> {
        let mut shop_index = HashMap::with_capacity(shops.len());
        for (pos, shop) in shops.iter().enumerate() {
            check_finite("shops", &shop.id, "lat", shop.lat)?;
            check_finite("shops", &shop.id, "lng", shop.lng)?;
            if shop_index.insert(shop.id.clone(), pos).is_some() {
                return Err(LoadError::DuplicateShop {
                    id: shop.id.clone(),
                });
            }
        }

        for product in &products {
            check_finite("products", &product.id, "popularity", product.popularity)?;
            if !shop_index.contains_key(&product.shop_id) {
                return Err(LoadError::DanglingShop {
                    product_id: product.id.clone(),
                    shop_id: product.shop_id.clone(),
                });
            }
        }

        // sort_by is stable: ties keep file order.
        products.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

        Ok(Self {
            products,
            shops,
            shop_index,
            tags,
        })
    }

    /// All products, most popular first.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All shops in file order.
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn shop(&self, id: &str) -> Option<&Shop> {
        self.shop_index.get(id).map(|&pos| &self.shops[pos])
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }
}

fn check_finite(
    file: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), LoadError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LoadError::NonFinite {
            file,
            id: id.to_string(),
            field,
            value,
        })
    }
}

pub fn parse_products<R: Read>(source: R) -> Result<Vec<Product>, LoadError> {
    read_rows("products", PRODUCT_COLUMNS, source)
}

pub fn parse_shops<R: Read>(source: R) -> Result<Vec<Shop>, LoadError> {
    read_rows("shops", SHOP_COLUMNS, source)
}

pub fn parse_taggings<R: Read>(source: R) -> Result<Vec<Tagging>, LoadError> {
    read_rows("taggings", TAGGING_COLUMNS, source)
}

pub fn parse_tags<R: Read>(source: R) -> Result<Vec<Tag>, LoadError> {
    read_rows("tags", TAG_COLUMNS, source)
}

/// Validate the header against `columns`, then decode every row as `T`.
fn read_rows<T, R>(file: &'static str, columns: &[&str], source: R) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
{
    let parse_err = |source| LoadError::Parse { file, source };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(parse_err)?.clone();
    if !headers.iter().eq(columns.iter().copied()) {
        return Err(LoadError::Header {
            file,
            expected: columns.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    reader
        .deserialize::<T>()
        .map(|row| row.map_err(parse_err))
        .collect()
}
