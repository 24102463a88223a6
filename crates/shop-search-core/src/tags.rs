//! Tag name → shop id index.
//!
//! Built in two passes: shop ids are first grouped by the raw tag id of the
//! taggings join table, then re-keyed by the human-readable name from the
//! tags table. A tag with no taggings never gets an entry.

use std::collections::{HashMap, HashSet};

use crate::models::{Tag, Tagging};

/// Mapping from tag name to the deduplicated set of shop ids carrying it.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_name: HashMap<String, HashSet<String>>,
}

impl TagIndex {
    pub fn build(taggings: &[Tagging], tags: &[Tag]) -> Self {
        let mut by_tag_id: HashMap<&str, HashSet<&str>> = HashMap::new();
        for tagging in taggings {
            by_tag_id
                .entry(tagging.tag_id.as_str())
                .or_default()
                .insert(tagging.shop_id.as_str());
        }

        let mut by_name: HashMap<String, HashSet<String>> = HashMap::new();
        for tag in tags {
            let Some(shop_ids) = by_tag_id.get(tag.id.as_str()) else {
                continue;
            };
            // Several tag ids may share one name; their shops merge.
            by_name
                .entry(tag.name.clone())
                .or_default()
                .extend(shop_ids.iter().map(|id| id.to_string()));
        }

        Self { by_name }
    }

    /// Shop ids carrying `name`, or `None` for a tag nobody uses.
    pub fn shops(&self, name: &str) -> Option<&HashSet<String>> {
        self.by_name.get(name)
    }

    /// Union of the shop sets of every name in `names`.
    ///
    /// Unknown names contribute nothing. An empty `names` yields an empty
    /// set; telling "no tag filter" apart from "no match" is the caller's job.
    pub fn shops_for_tags<I, S>(&self, names: I) -> HashSet<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.by_name.get(name.as_ref()))
            .flat_map(|ids| ids.iter().map(String::as_str))
            .collect()
    }

    /// Iterates `(tag name, shop ids)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.by_name.iter().map(|(name, ids)| (name.as_str(), ids))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagging(id: &str, shop_id: &str, tag_id: &str) -> Tagging {
        Tagging {
            id: id.to_string(),
            shop_id: shop_id.to_string(),
            tag_id: tag_id.to_string(),
        }
    }

    fn tag(id: &str, name: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn sample_index() -> TagIndex {
        let taggings = vec![
            tagging("1", "s1", "t1"),
            tagging("2", "s2", "t1"),
            tagging("3", "s2", "t2"),
            tagging("4", "s3", "t2"),
            tagging("5", "s1", "t1"),
        ];
        let tags = vec![tag("t1", "coffee"), tag("t2", "books"), tag("t3", "unused")];
        TagIndex::build(&taggings, &tags)
    }

    #[test]
    fn test_build_dedups_per_tag() {
        let index = sample_index();
        assert_eq!(index.shops("coffee").map(HashSet::len), Some(2));
        assert_eq!(index.shops("books").map(HashSet::len), Some(2));
    }

    #[test]
    fn test_tag_without_taggings_is_absent() {
        let index = sample_index();
        assert!(index.shops("unused").is_none());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_same_name_under_two_ids_merges() {
        let taggings = vec![tagging("1", "a", "t1"), tagging("2", "b", "t9")];
        let tags = vec![tag("t1", "food"), tag("t9", "food")];
        let index = TagIndex::build(&taggings, &tags);
        let shops = index.shops("food").unwrap();
        assert!(shops.contains("a") && shops.contains("b"));
    }

    #[test]
    fn test_shops_for_tags_union() {
        let index = sample_index();
        let shops = index.shops_for_tags(["coffee", "books"]);
        let expected: HashSet<&str> = ["s1", "s2", "s3"].into_iter().collect();
        assert_eq!(shops, expected);
    }

    #[test]
    fn test_shops_for_tags_unknown_and_empty() {
        let index = sample_index();
        assert!(index.shops_for_tags(["nope"]).is_empty());
        assert!(index.shops_for_tags(Vec::<String>::new()).is_empty());

        let shops = index.shops_for_tags(["nope", "books"]);
        assert_eq!(shops.len(), 2);
    }
}
