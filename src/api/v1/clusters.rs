//
//  argocd-rs
//  api/v1/clusters.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cluster API types and operations.
//!
//! A cluster is addressed either by its API server URL or by its name. The
//! URL goes into the path percent-encoded; `id.type` tells the server which
//! of the two it is looking at.
//!
//! # Example
//!
//! ```rust,no_run
//! use argocd_rs::Client;
//! use argocd_rs::api::v1::clusters::ClusterId;
//!
//! # async fn example(client: Client) -> Result<(), argocd_rs::ArgoError> {
//! let cluster = client
//!     .clusters()
//!     .get(&ClusterId::server("https://kubernetes.default.svc"))
//!     .await?;
//! println!("{} is {}", cluster.name, cluster.connection_state().status);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{v1, Client};
use crate::api::common::{is_false, null_as_empty, ConnectionState, ItemList};
use crate::api::error::Result;
use crate::api::request::{escape_segment, HttpMethod};

/// A destination cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// API server URL.
    #[serde(default)]
    pub server: String,

    #[serde(default)]
    pub name: String,

    /// Credentials and TLS settings. Secrets are redacted by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,

    /// Restricts Argo CD to these namespaces; empty means cluster-wide.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub namespaces: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub cluster_resources: bool,

    /// Project the cluster is scoped to, if any.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Read-only status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ClusterInfo>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Cluster {
    /// The connection state as last observed, or an empty state.
    pub fn connection_state(&self) -> ConnectionState {
        self.info
            .as_ref()
            .map(|info| info.connection_state.clone())
            .unwrap_or_default()
    }
}

/// A page of clusters.
pub type ClusterList = ItemList<Cluster>;

/// Observed information about a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    #[serde(default)]
    pub connection_state: ConnectionState,

    #[serde(default)]
    pub server_version: String,

    #[serde(default)]
    pub applications_count: i64,

    #[serde(default)]
    pub cache_info: ClusterCacheInfo,
}

/// State of the controller's cache for a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCacheInfo {
    #[serde(default, with = "crate::api::common::int64")]
    pub resources_count: i64,

    #[serde(default, with = "crate::api::common::int64")]
    pub apis_count: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cache_sync_time: Option<String>,
}

/// How a [`ClusterId`] value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterIdType {
    /// The value is the API server URL.
    #[default]
    Server,
    /// The value is the cluster name.
    Name,
}

impl ClusterIdType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "url",
            Self::Name => "name",
        }
    }
}

/// Identifies a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterId {
    pub id_type: ClusterIdType,
    pub value: String,
}

impl ClusterId {
    /// By API server URL.
    pub fn server(url: impl Into<String>) -> Self {
        Self {
            id_type: ClusterIdType::Server,
            value: url.into(),
        }
    }

    /// By cluster name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            id_type: ClusterIdType::Name,
            value: name.into(),
        }
    }

    /// Guesses the type: anything with a scheme is a server URL.
    pub fn parse(value: &str) -> Self {
        if value.contains("://") {
            Self::server(value)
        } else {
            Self::name(value)
        }
    }

    fn path(&self, suffix: &str) -> String {
        v1(&format!("clusters/{}{}", escape_segment(&self.value), suffix))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Filters for [`ClustersService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize)]
struct IdQuery {
    #[serde(rename = "id.type")]
    id_type: &'static str,
    #[serde(rename = "updatedFields", skip_serializing_if = "Vec::is_empty")]
    updated_fields: Vec<String>,
}

impl IdQuery {
    fn new(id: &ClusterId) -> Self {
        Self {
            id_type: id.id_type.as_str(),
            updated_fields: Vec::new(),
        }
    }
}

/// Cluster operations.
#[derive(Debug, Clone)]
pub struct ClustersService {
    client: Client,
}

impl ClustersService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists clusters.
    pub async fn list(&self, query: &ClusterQuery) -> Result<ClusterList> {
        self.client
            .new_request(HttpMethod::Get, &v1("clusters"))
            .query(query)
            .execute()
            .await
    }

    /// Registers a cluster. With `upsert` an existing registration is replaced.
    pub async fn create(&self, cluster: &Cluster, upsert: bool) -> Result<Cluster> {
        self.client
            .new_request(HttpMethod::Post, &v1("clusters"))
            .query_pair("upsert", upsert)
            .json(cluster)
            .execute()
            .await
    }

    /// Returns one cluster.
    pub async fn get(&self, id: &ClusterId) -> Result<Cluster> {
        self.client
            .new_request(HttpMethod::Get, &id.path(""))
            .query(&IdQuery::new(id))
            .execute()
            .await
    }

    /// Updates a cluster. A non-empty `updated_fields` limits the update to
    /// those fields (e.g. `name`, `namespaces`, `project`).
    pub async fn update(
        &self,
        id: &ClusterId,
        updated_fields: &[String],
        cluster: &Cluster,
    ) -> Result<Cluster> {
        let query = IdQuery {
            updated_fields: updated_fields.to_vec(),
            ..IdQuery::new(id)
        };
        self.client
            .new_request(HttpMethod::Put, &id.path(""))
            .query(&query)
            .json(cluster)
            .execute()
            .await
    }

    /// Removes a cluster registration.
    pub async fn delete(&self, id: &ClusterId) -> Result<()> {
        self.client
            .new_request(HttpMethod::Delete, &id.path(""))
            .query(&IdQuery::new(id))
            .execute_unit()
            .await
    }

    /// Drops the controller's cache for a cluster.
    pub async fn invalidate_cache(&self, id: &ClusterId) -> Result<Cluster> {
        self.client
            .new_request(HttpMethod::Post, &id.path("/invalidate-cache"))
            .execute()
            .await
    }

    /// Rotates the bearer token Argo CD uses for a cluster.
    pub async fn rotate_auth(&self, id: &ClusterId) -> Result<()> {
        self.client
            .new_request(HttpMethod::Post, &id.path("/rotate-auth"))
            .execute_unit()
            .await
    }
}
