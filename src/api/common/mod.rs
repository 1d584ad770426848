//
//  argocd-rs
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Argo CD resources are Kubernetes custom resources, so every one of them
//! carries the same object metadata and every list carries the same list
//! metadata. This module holds those shared shapes.
//!
//! # Overview
//!
//! - [`ObjectMeta`] - Name, namespace, labels and bookkeeping fields
//! - [`ListMeta`] - Resource version and continuation token of a list
//! - [`ItemList`] - Generic `{"metadata": ..., "items": [...]}` envelope
//! - [`ConnectionState`] - Connection status reported for clusters and repositories
//! - [`HealthStatus`] - Health assessment of an application or resource
//!
//! # Notes
//!
//! - Every field is optional on the wire; missing fields decode to defaults
//! - Empty fields are left out when serializing so that request bodies stay
//!   minimal and the server applies its own defaults

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod list;

pub use list::*;
pub(crate) use list::null_as_empty;

/// Standard Kubernetes object metadata.
///
/// # Example
///
/// ```rust
/// use argocd_rs::api::common::ObjectMeta;
///
/// let meta = ObjectMeta::named("guestbook").in_namespace("argocd");
/// assert_eq!(meta.name, "guestbook");
/// assert_eq!(meta.namespace.as_deref(), Some("argocd"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name, unique within its namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Namespace the object lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Server-assigned unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Opaque version used for optimistic concurrency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Generation of the desired state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,

    /// RFC 3339 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<String>,

    /// Set when deletion has been requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finalizers: Vec<String>,
}

impl ObjectMeta {
    /// Metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Metadata of a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Token for fetching the next chunk of a large list.
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_item_count: Option<i64>,
}

/// Connection state of a cluster or repository as last observed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    /// `Successful`, `Failed` or `Unknown`.
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted_at: Option<String>,
}

/// Health of an application or of a single resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `Healthy`, `Progressing`, `Degraded`, `Suspended`, `Missing` or `Unknown`.
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Serde helper for omitting `false` booleans.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// The gateway renders `int64` fields as JSON strings; accept both forms.
pub(crate) mod int64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(i64),
        Text(String),
        Null,
    }

    pub(crate) fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*value)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Ok(n),
            Wire::Text(s) if s.is_empty() => Ok(0),
            Wire::Text(s) => s.parse().map_err(de::Error::custom),
            Wire::Null => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_meta_omits_empty_fields() {
        let json = serde_json::to_value(ObjectMeta::named("guestbook")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "guestbook"}));
    }

    #[test]
    fn test_object_meta_decodes_server_fields() {
        let meta: ObjectMeta = serde_json::from_str(
            r#"{
                "name": "guestbook",
                "namespace": "argocd",
                "resourceVersion": "12345",
                "creationTimestamp": "2024-05-01T10:00:00Z",
                "labels": {"team": "web"},
                "managedFields": [{"manager": "argocd-server"}]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.resource_version.as_deref(), Some("12345"));
        assert_eq!(meta.labels["team"], "web");
        assert!(meta.finalizers.is_empty());
    }

    #[test]
    fn test_list_meta_continue_rename() {
        let meta: ListMeta = serde_json::from_str(r#"{"continue":"abc"}"#).unwrap();
        assert_eq!(meta.continue_token.as_deref(), Some("abc"));
    }
}
