//! Query planner: popularity-ordered scan over the eligible shop set.
//!
//! # Algorithm
//!
//! 1. Geo filtering is active when `lat`, `lng` and `radius` are all present
//!    and `radius > 0`.
//! 2. Tag filtering is active when `tag_names` is non-empty.
//! 3. With neither active, the first `count` products are returned as-is.
//! 4. Otherwise the eligible shop set is the geo set, the tag set, or their
//!    intersection when both are active.
//! 5. Products are scanned in popularity order, keeping those whose shop is
//!    eligible, until `count` have been collected.
//!
//! Results are never re-sorted; they inherit the store's order.

use std::collections::{BTreeSet, HashSet};

use crate::geo;
use crate::models::{Product, Shop};
use crate::store::ReferenceStore;

/// Result count used when the caller does not supply one.
pub const DEFAULT_COUNT: usize = 10;

/// The recognised search options, each independently optional.
///
/// Values are trusted: the boundary layer has already coerced or dropped
/// anything malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Radius in metres.
    pub radius: Option<i64>,
    pub tag_names: BTreeSet<String>,
    pub count: usize,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            lat: None,
            lng: None,
            radius: None,
            tag_names: BTreeSet::new(),
            count: DEFAULT_COUNT,
        }
    }
}

impl SearchFilters {
    /// The active geo filter, if all of its parts are present.
    pub fn geo(&self) -> Option<GeoFilter> {
        match (self.lat, self.lng, self.radius) {
            (Some(lat), Some(lng), Some(radius)) if radius > 0 => Some(GeoFilter {
                lat,
                lng,
                radius_m: radius as f64,
            }),
            _ => None,
        }
    }

    pub fn tags_active(&self) -> bool {
        !self.tag_names.is_empty()
    }
}

/// A query point and a strict radius around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: f64,
}

impl GeoFilter {
    pub fn contains(&self, shop: &Shop) -> bool {
        geo::is_within_radius(shop.lat, shop.lng, self.lat, self.lng, self.radius_m)
    }
}

/// Run a query against the store, returning at most `filters.count`
/// products, most popular first.
pub fn search<'a>(store: &'a ReferenceStore, filters: &SearchFilters) -> Vec<&'a Product> {
    let products = store.products().iter();

    match eligible_shops(store, filters) {
        None => products.take(filters.count).collect(),
        Some(eligible) if eligible.is_empty() => Vec::new(),
        Some(eligible) => products
            .filter(|p| eligible.contains(p.shop_id.as_str()))
            .take(filters.count)
            .collect(),
    }
}

/// The set of shop ids passing every active filter.
///
/// `None` means no filter is active and every shop is eligible; the set is
/// never materialised in that case.
pub fn eligible_shops<'a>(
    store: &'a ReferenceStore,
    filters: &SearchFilters,
) -> Option<HashSet<&'a str>> {
    let near = filters.geo().map(|geo| {
        store
            .shops()
            .iter()
            .filter(|shop| geo.contains(shop))
            .map(|shop| shop.id.as_str())
            .collect::<HashSet<_>>()
    });

    let tagged = filters
        .tags_active()
        .then(|| store.tags().shops_for_tags(&filters.tag_names));

    match (near, tagged) {
        (None, None) => None,
        (Some(near), None) => Some(near),
        (None, Some(tagged)) => Some(tagged),
        (Some(near), Some(tagged)) => Some(near.intersection(&tagged).copied().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Tag, Tagging};
    use crate::tags::TagIndex;

    fn shop(id: usize, lat: f64, lng: f64) -> Shop {
        Shop {
            id: id.to_string(),
            name: format!("Shop {}", id),
            lat,
            lng,
        }
    }

    fn product(id: usize, shop_id: usize, popularity: f64) -> Product {
        Product {
            id: format!("p{}", id),
            shop_id: shop_id.to_string(),
            title: format!("Product {}", id),
            popularity,
            quantity: 1,
        }
    }

    /// Shops `0..20` spread along the equator one degree apart, one product
    /// per shop with popularity rising with the shop number, and tag `t`
    /// on shops 1, 10 and 20 (20 does not exist).
    fn fixture() -> ReferenceStore {
        let shops: Vec<Shop> = (0..20).map(|i| shop(i, 0.0, i as f64)).collect();
        let products: Vec<Product> = (0..20)
            .map(|i| product(i, i, i as f64 / 20.0))
            .collect();
        let taggings: Vec<Tagging> = [1, 10, 20]
            .iter()
            .enumerate()
            .map(|(n, shop_id)| Tagging {
                id: n.to_string(),
                shop_id: shop_id.to_string(),
                tag_id: "1".to_string(),
            })
            .collect();
        let tags = vec![Tag {
            id: "1".to_string(),
            name: "t".to_string(),
        }];
        ReferenceStore::new(products, shops, TagIndex::build(&taggings, &tags)).unwrap()
    }

    fn filters(count: usize) -> SearchFilters {
        SearchFilters {
            count,
            ..SearchFilters::default()
        }
    }

    fn tag_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_unfiltered_is_prefix_of_popularity_order() {
        let store = fixture();
        for count in [0, 1, 5, 20, 50] {
            let results = search(&store, &filters(count));
            assert_eq!(results.len(), count.min(20));
            let prefix: Vec<&Product> = store.products().iter().take(count).collect();
            assert_eq!(results, prefix);
            assert!(results
                .windows(2)
                .all(|w| w[0].popularity >= w[1].popularity));
        }
    }

    #[test]
    fn test_default_count_is_ten() {
        let store = fixture();
        assert_eq!(search(&store, &SearchFilters::default()).len(), 10);
    }

    #[test]
    fn test_geo_only() {
        let store = fixture();
        // Around shop 10 with a radius just over one degree of longitude.
        let f = SearchFilters {
            lat: Some(0.0),
            lng: Some(10.0),
            radius: Some(120_000),
            ..filters(10)
        };
        assert_eq!(ids(&search(&store, &f)), vec!["p11", "p10", "p9"]);
    }

    #[test]
    fn test_geo_requires_all_parts() {
        let store = fixture();
        let f = SearchFilters {
            lat: Some(0.0),
            lng: Some(10.0),
            ..filters(20)
        };
        assert!(f.geo().is_none());
        assert_eq!(search(&store, &f).len(), 20);
    }

    #[test]
    fn test_zero_radius_is_inactive() {
        let store = fixture();
        let f = SearchFilters {
            lat: Some(0.0),
            lng: Some(0.0),
            radius: Some(0),
            ..filters(5)
        };
        assert!(f.geo().is_none());
        assert_eq!(search(&store, &f).len(), 5);
    }

    #[test]
    fn test_zero_coordinates_are_present() {
        let store = fixture();
        let f = SearchFilters {
            lat: Some(0.0),
            lng: Some(0.0),
            radius: Some(1_000),
            ..filters(5)
        };
        assert_eq!(ids(&search(&store, &f)), vec!["p0"]);
    }

    #[test]
    fn test_geo_matching_nothing_is_empty() {
        let store = fixture();
        let f = SearchFilters {
            lat: Some(45.0),
            lng: Some(-100.0),
            radius: Some(1_000),
            ..filters(5)
        };
        assert!(search(&store, &f).is_empty());
    }

    #[test]
    fn test_tags_only_restricts_to_tagged_shops() {
        let store = fixture();
        let f = SearchFilters {
            tag_names: tag_set(&["t"]),
            ..filters(10)
        };
        let results = search(&store, &f);
        assert_eq!(ids(&results), vec!["p10", "p1"]);
        assert!(results.iter().all(|p| p.shop_id == "1" || p.shop_id == "10"));
    }

    #[test]
    fn test_empty_tag_set_does_not_restrict() {
        let store = fixture();
        let f = SearchFilters {
            tag_names: BTreeSet::new(),
            ..filters(10)
        };
        assert_eq!(search(&store, &f), search(&store, &filters(10)));
    }

    #[test]
    fn test_unknown_tag_matches_nothing() {
        let store = fixture();
        let f = SearchFilters {
            tag_names: tag_set(&["nope"]),
            ..filters(10)
        };
        assert!(search(&store, &f).is_empty());
    }

    #[test]
    fn test_geo_and_tags_intersect() {
        let store = fixture();
        let f = SearchFilters {
            lat: Some(0.0),
            lng: Some(10.0),
            radius: Some(50_000),
            tag_names: tag_set(&["t"]),
            ..filters(10)
        };
        let results = search(&store, &f);
        assert_eq!(ids(&results), vec!["p10"]);
        assert_eq!(results[0].shop_id, "10");
    }

    #[test]
    fn test_count_truncates_filtered_scan() {
        let store = fixture();
        let f = SearchFilters {
            tag_names: tag_set(&["t"]),
            ..filters(1)
        };
        assert_eq!(ids(&search(&store, &f)), vec!["p10"]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let store = fixture();
        let f = SearchFilters {
            lat: Some(0.0),
            lng: Some(5.0),
            radius: Some(500_000),
            tag_names: tag_set(&["t"]),
            ..filters(3)
        };
        assert_eq!(search(&store, &f), search(&store, &f));
    }
}
