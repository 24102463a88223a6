//! Boundary layer between raw request options and the core planner.
//!
//! Query options arrive as untyped key/value pairs. They are coerced into a
//! [`SearchFilters`] here and never rejected: a malformed value becomes
//! "absent" (or the configured default for `count`), so the core only ever
//! sees valid filters.
//!
//! | Option   | Type                  | Missing / invalid |
//! |----------|-----------------------|-------------------|
//! | `count`  | integer ≥ 0, uncapped | `default_count`   |
//! | `lat`    | float                 | absent            |
//! | `lng`    | float                 | absent            |
//! | `radius` | integer (metres)      | absent            |
//! | `tags`   | comma-separated names | absent            |

use anyhow::Result;
use serde::Serialize;
use shop_search_core::{search_records, ProductRecord, ReferenceStore, SearchFilters};
use std::collections::BTreeSet;

use crate::config::{Config, SearchConfig};
use crate::data;

/// JSON body returned by `GET /search` and `shop-search search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub products: Vec<ProductRecord>,
}

/// Raw, unvalidated search options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub count: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub tags: Option<String>,
}

impl SearchParams {
    /// Collect the recognised options from query-string pairs.
    ///
    /// The first occurrence of each key wins; unrecognised keys are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "count" => &mut params.count,
                "lat" => &mut params.lat,
                "lng" => &mut params.lng,
                "radius" => &mut params.radius,
                "tags" => &mut params.tags,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn into_filters(self, search: &SearchConfig) -> SearchFilters {
        let count = self
            .count
            .as_deref()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(search.default_count);

        SearchFilters {
            lat: self.lat.as_deref().and_then(parse_coordinate),
            lng: self.lng.as_deref().and_then(parse_coordinate),
            radius: self
                .radius
                .as_deref()
                .and_then(|v| v.trim().parse::<i64>().ok()),
            tag_names: self.tags.as_deref().map(parse_tags).unwrap_or_default(),
            count,
        }
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a comma-separated tag list into trimmed, non-empty, unique names.
pub fn parse_tags(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run one query and wrap the assembled records in a [`SearchResponse`].
pub fn run_query(store: &ReferenceStore, filters: &SearchFilters) -> Result<SearchResponse> {
    let products = search_records(store, filters)?;
    Ok(SearchResponse { products })
}

/// `shop-search search`: load the data, run one query, print JSON.
pub fn run_search(config: &Config, params: SearchParams) -> Result<()> {
    let store = data::load_store(&config.data)?;
    let filters = params.into_filters(&config.search);
    let response = run_query(&store, &filters)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
