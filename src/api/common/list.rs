//
//  argocd-rs
//  api/common/list.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! List Envelope
//!
//! Every Argo CD list endpoint answers with the same envelope:
//!
//! ```json
//! {"metadata": {"resourceVersion": "42"}, "items": [ ... ]}
//! ```
//!
//! The server may return `"items": null` (or omit the key) for an empty list;
//! both decode to an empty vector.
//!
//! # Example
//!
//! ```rust
//! use argocd_rs::api::common::ItemList;
//!
//! let list: ItemList<String> = serde_json::from_str(r#"{"items":null}"#).unwrap();
//! assert!(list.is_empty());
//! assert!(!list.has_more());
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use super::ListMeta;

/// A list of resources with its list metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ItemList<T> {
    /// List metadata; carries the continuation token, if any.
    #[serde(default)]
    pub metadata: ListMeta,

    /// Items on this page. `null` and a missing key both mean no items.
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self {
            metadata: ListMeta::default(),
            items: Vec::new(),
        }
    }
}

impl<T> ItemList<T> {
    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the server has more items past this page.
    pub fn has_more(&self) -> bool {
        self.metadata
            .continue_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for ItemList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ItemList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_decode() {
        let list: ItemList<u32> =
            serde_json::from_str(r#"{"metadata":{"resourceVersion":"7"},"items":[1,2,3]}"#)
                .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.metadata.resource_version.as_deref(), Some("7"));
        assert_eq!(list.into_iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let list: ItemList<u32> = serde_json::from_str(r#"{"metadata":{}}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_has_more() {
        let list: ItemList<u32> =
            serde_json::from_str(r#"{"metadata":{"continue":"next-page"},"items":[]}"#).unwrap();
        assert!(list.has_more());

        let list: ItemList<u32> =
            serde_json::from_str(r#"{"metadata":{"continue":""},"items":[]}"#).unwrap();
        assert!(!list.has_more());
    }
}
