//! Seeded, read-only resource collection
//!
//! The store is built once before the server accepts connections and is never
//! written to afterwards, so it can be shared behind an `Arc` without locking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::payload::random_letters;

/// Resources seeded in the default configuration
pub const DEFAULT_RESOURCE_COUNT: usize = 100;
/// Length of each seeded resource name
pub const DEFAULT_NAME_LENGTH: usize = 10;
/// Page size used when no usable `limit` is requested
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// A named record served by `/resource`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
}

/// Resources with dense ids `0..len`
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    resources: Vec<Resource>,
}

impl ResourceStore {
    /// Seed `count` resources with random names of the default length
    pub fn seed(count: usize) -> Self {
        Self::seed_with_name_length(count, DEFAULT_NAME_LENGTH)
    }

    pub fn seed_with_name_length(count: usize, name_length: usize) -> Self {
        let resources = (0..count as u64)
            .map(|id| Resource {
                id,
                name: random_letters(name_length),
            })
            .collect();

        Self { resources }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// First `min(limit, len)` resources in ascending id order
    pub fn list(&self, limit: usize) -> &[Resource] {
        &self.resources[..limit.min(self.resources.len())]
    }

    /// Exact id lookup; negative and out of range ids are not found
    pub fn get(&self, id: i64) -> CoreResult<&Resource> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.resources.get(index))
            .ok_or_else(|| CoreError::not_found(id))
    }
}

/// Resolve a requested page size; `0` and missing fall back to the default
pub fn resolve_limit(requested: Option<u64>, default_limit: usize) -> usize {
    match requested {
        None | Some(0) => default_limit,
        Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
    }
}

/// Key a page by its position rather than by resource id
pub fn index_page(page: &[Resource]) -> BTreeMap<usize, &Resource> {
    page.iter().enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_produces_dense_ids() {
        let store = ResourceStore::seed(DEFAULT_RESOURCE_COUNT);
        assert_eq!(store.len(), 100);
        for (expected, resource) in store.list(usize::MAX).iter().enumerate() {
            assert_eq!(resource.id, expected as u64);
            assert_eq!(resource.name.len(), DEFAULT_NAME_LENGTH);
            assert!(resource.name.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_empty_store() {
        let store = ResourceStore::seed(0);
        assert!(store.is_empty());
        assert!(store.list(10).is_empty());
        assert!(store.get(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_caps_at_store_size() {
        let store = ResourceStore::seed(5);
        assert_eq!(store.list(3).len(), 3);
        assert_eq!(store.list(5).len(), 5);
        assert_eq!(store.list(500).len(), 5);
        assert_eq!(store.list(3)[2].id, 2);
    }

    #[test]
    fn test_get_is_stable() {
        let store = ResourceStore::seed(10);
        let first = store.get(5).unwrap().clone();
        let second = store.get(5).unwrap();
        assert_eq!(&first, second);
        assert_eq!(second.id, 5);
    }

    #[test]
    fn test_get_out_of_range() {
        let store = ResourceStore::seed(100);
        assert_eq!(store.get(150).unwrap_err(), CoreError::NotFound { id: 150 });
        assert_eq!(store.get(100).unwrap_err(), CoreError::NotFound { id: 100 });
        assert_eq!(store.get(-1).unwrap_err(), CoreError::NotFound { id: -1 });
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, DEFAULT_PAGE_LIMIT), 10);
        assert_eq!(resolve_limit(Some(0), DEFAULT_PAGE_LIMIT), 10);
        assert_eq!(resolve_limit(Some(3), DEFAULT_PAGE_LIMIT), 3);
        assert_eq!(resolve_limit(Some(1000), DEFAULT_PAGE_LIMIT), 1000);
    }

    #[test]
    fn test_index_page_reindexes_from_zero() {
        let store = ResourceStore::seed(20);
        let page = index_page(store.list(3));
        let json = serde_json::to_value(&page).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["0", "1", "2"]);
        assert_eq!(json["2"]["id"], 2);
        assert!(json["0"]["name"].is_string());
    }
}
