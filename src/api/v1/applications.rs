//
//  argocd-rs
//  api/v1/applications.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Application API types and operations.
//!
//! Applications are the central Argo CD resource: a source (Git, Helm or
//! OCI), a destination cluster and namespace, and the observed sync and
//! health status between the two.
//!
//! # Overview
//!
//! | Method | HTTP | Path |
//! |--------|------|------|
//! | [`list`](ApplicationsService::list) | GET | `applications` |
//! | [`create`](ApplicationsService::create) | POST | `applications` |
//! | [`get`](ApplicationsService::get) | GET | `applications/{name}` |
//! | [`update`](ApplicationsService::update) | PUT | `applications/{name}` |
//! | [`patch`](ApplicationsService::patch) | PATCH | `applications/{name}` |
//! | [`delete`](ApplicationsService::delete) | DELETE | `applications/{name}` |
//! | [`sync`](ApplicationsService::sync) | POST | `applications/{name}/sync` |
//! | [`managed_resources`](ApplicationsService::managed_resources) | GET | `applications/{name}/managed-resources` |
//! | [`resource_tree`](ApplicationsService::resource_tree) | GET | `applications/{name}/resource-tree` |
//! | [`list_resource_events`](ApplicationsService::list_resource_events) | GET | `applications/{name}/events` |
//! | [`application_pod_logs`](ApplicationsService::application_pod_logs) | GET | `applications/{name}/logs` |
//! | [`pod_logs`](ApplicationsService::pod_logs) | GET | `applications/{name}/pods/{pod}/logs` |
//! | [`get_manifests`](ApplicationsService::get_manifests) | GET | `applications/{name}/manifests` |
//! | [`terminate_operation`](ApplicationsService::terminate_operation) | DELETE | `applications/{name}/operation` |
//! | [`get_resource`](ApplicationsService::get_resource) | GET | `applications/{name}/resource` |
//! | [`list_resource_actions`](ApplicationsService::list_resource_actions) | GET | `applications/{name}/resource/actions` |
//!
//! # Notes
//!
//! - Models keep the fields a client usually reads; anything else the server
//!   sends is preserved in the `extra` maps so that a fetched application can
//!   be sent back through [`update`](ApplicationsService::update) unchanged
//! - Log endpoints return one JSON record per line; they are collected into a
//!   `Vec<LogEntry>` once the server closes the response

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{v1, Client};
use crate::api::common::{is_false, null_as_empty, HealthStatus, ItemList, ObjectMeta};
use crate::api::error::Result;
use crate::api::request::{escape_segment, HttpMethod};

/// An Argo CD application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: ApplicationSpec,

    #[serde(default)]
    pub status: ApplicationStatus,

    /// Operation requested but not yet picked up by the controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Value>,
}

impl Application {
    /// A new application pointing `source` at `destination` within `project`.
    pub fn new(
        name: impl Into<String>,
        project: impl Into<String>,
        source: ApplicationSource,
        destination: ApplicationDestination,
    ) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            spec: ApplicationSpec {
                project: project.into(),
                source: Some(source),
                destination,
                ..ApplicationSpec::default()
            },
            ..Self::default()
        }
    }
}

/// A page of applications.
pub type ApplicationList = ItemList<Application>;

/// Desired state of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ApplicationSource>,

    /// Multi-source applications use this instead of `source`.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub sources: Vec<ApplicationSource>,

    #[serde(default)]
    pub destination: ApplicationDestination,

    #[serde(default)]
    pub project: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_policy: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Where manifests come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    #[serde(rename = "repoURL", default)]
    pub repo_url: String,

    /// Directory within a Git repository.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Branch, tag, commit or chart version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_revision: String,

    /// Chart name for Helm repositories.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chart: String,

    /// Tool-specific settings (`helm`, `kustomize`, `directory`, `plugin`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Where manifests are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDestination {
    /// API server URL. Mutually exclusive with `name`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Cluster name. Mutually exclusive with `server`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Observed state of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    #[serde(default)]
    pub sync: SyncStatus,

    #[serde(default)]
    pub health: HealthStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub resources: Vec<ResourceStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_state: Option<OperationState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconciled_at: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Comparison between desired and live state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    /// `Synced`, `OutOfSync` or `Unknown`.
    #[serde(default)]
    pub status: String,

    /// Revision the comparison was made against.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub revision: String,
}

/// Status of one resource managed by an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthStatus>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_pruning: bool,
}

/// State of the last or current operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationState {
    /// `Running`, `Terminating`, `Failed`, `Error` or `Succeeded`.
    #[serde(default)]
    pub phase: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Filters for [`ApplicationsService::list`] and [`ApplicationsService::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    /// Only the application with this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `normal` or `hard` forces a refresh before answering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Label selector, e.g. `team=web`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Only applications sourced from this repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct WriteOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    upsert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validate: Option<bool>,
}

/// A patch applied by [`ApplicationsService::patch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatchRequest {
    /// Patch document, serialized.
    pub patch: String,

    /// `merge` (JSON merge patch) or `json` (JSON patch).
    pub patch_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl ApplicationPatchRequest {
    /// A JSON merge patch.
    pub fn merge(patch: &Value) -> Self {
        Self {
            patch: patch.to_string(),
            patch_type: "merge".to_string(),
            ..Self::default()
        }
    }
}

/// Options for [`ApplicationsService::delete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOptions {
    /// Also delete the application's resources. The server defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade: Option<bool>,

    /// `foreground`, `background` or `orphan`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagation_policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,
}

/// A sync request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Revision to sync to; empty means the target revision.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub revision: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub prune: bool,

    /// Restrict the sync to these resources; empty syncs everything.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<SyncOperationResource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_options: Option<Value>,
}

/// Resource selector for a partial sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOperationResource {
    #[serde(default)]
    pub group: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

#[derive(Serialize)]
struct SyncBody<'a> {
    name: &'a str,
    #[serde(flatten)]
    request: &'a SyncRequest,
}

/// Identifies resources of an application. Used by
/// [`ApplicationsService::managed_resources`] and
/// [`ApplicationsService::resource_tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesQuery {
    /// Application name; goes into the path.
    #[serde(skip)]
    pub application_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl ResourcesQuery {
    /// All resources of `application`.
    pub fn for_application(application: impl Into<String>) -> Self {
        Self {
            application_name: application.into(),
            ..Self::default()
        }
    }
}

/// Managed resources with their diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagedResourcesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<ResourceDiff>,
}

/// Desired versus live state of one resource. States are serialized manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDiff {
    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub target_state: String,

    #[serde(default)]
    pub live_state: String,

    #[serde(default)]
    pub normalized_live_state: String,

    #[serde(default)]
    pub predicted_live_state: String,

    #[serde(default)]
    pub hook: bool,

    #[serde(default)]
    pub modified: bool,
}

/// Live resources of an application as a forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationTree {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<ResourceNode>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub orphaned_nodes: Vec<ResourceNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub hosts: Vec<Value>,
}

/// Reference to a Kubernetes object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uid: String,
}

/// One node of an [`ApplicationTree`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    #[serde(flatten)]
    pub resource: ResourceRef,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_refs: Vec<ResourceRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthStatus>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub info: Vec<InfoItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A name/value pair shown next to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Filters for [`ApplicationsService::list_resource_events`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEventsQuery {
    /// Application name; goes into the path.
    #[serde(skip)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    #[serde(rename = "resourceUID", skip_serializing_if = "Option::is_none")]
    pub resource_uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// A Kubernetes event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub involved_object: ResourceRef,

    #[serde(default)]
    pub reason: String,

    #[serde(default)]
    pub message: String,

    /// `Normal` or `Warning`.
    #[serde(rename = "type", default)]
    pub event_type: String,

    #[serde(default)]
    pub count: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_timestamp: Option<String>,
}

/// A page of events.
pub type EventList = ItemList<Event>;

/// Filters for the log endpoints.
///
/// Logs are collected until the server closes the stream, so there is no
/// `follow` switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_seconds: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_lines: Option<i64>,

    #[serde(skip_serializing_if = "is_false")]
    pub previous: bool,

    /// Only lines containing this text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Logs of all pods owned by this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// One log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,

    #[serde(default)]
    pub pod_name: String,

    /// Set on the terminating record of a stream.
    #[serde(default)]
    pub last: bool,
}

/// Rendered manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResponse {
    /// One serialized manifest per entry.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub manifests: Vec<String>,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub server: String,

    #[serde(default)]
    pub revision: String,

    /// `Helm`, `Kustomize`, `Directory` or `Plugin`.
    #[serde(default)]
    pub source_type: String,
}

/// Identifies a single live resource of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResourceRequest {
    /// Application name; goes into the path.
    #[serde(skip)]
    pub name: String,

    pub namespace: String,
    pub resource_name: String,
    pub version: String,
    pub group: String,
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// The live manifest of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResourceResponse {
    /// Serialized JSON manifest.
    #[serde(default)]
    pub manifest: String,
}

impl ApplicationResourceResponse {
    /// Parses the manifest.
    pub fn manifest_value(&self) -> Result<Value> {
        serde_json::from_str(&self.manifest)
            .map_err(|e| crate::api::error::ArgoError::Decode(e.to_string()))
    }
}

/// Actions available on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceActionsListResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub actions: Vec<ResourceAction>,
}

/// A custom resource action, e.g. `restart`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAction {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub disabled: bool,
}

/// Application operations.
#[derive(Debug, Clone)]
pub struct ApplicationsService {
    client: Client,
}

impl ApplicationsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn app_path(name: &str, suffix: &str) -> String {
        v1(&format!("applications/{}{}", escape_segment(name), suffix))
    }

    /// Lists applications matching `query`.
    pub async fn list(&self, query: &ApplicationQuery) -> Result<ApplicationList> {
        self.client
            .new_request(HttpMethod::Get, &v1("applications"))
            .query(query)
            .execute()
            .await
    }

    /// Creates an application.
    ///
    /// With `upsert` an existing application with a different spec is
    /// replaced instead of rejected. `validate: Some(false)` skips the
    /// server's source and destination checks.
    pub async fn create(
        &self,
        application: &Application,
        upsert: Option<bool>,
        validate: Option<bool>,
    ) -> Result<Application> {
        self.client
            .new_request(HttpMethod::Post, &v1("applications"))
            .query(&WriteOptions { upsert, validate })
            .json(application)
            .execute()
            .await
    }

    /// Returns one application.
    ///
    /// `query.name` is ignored in favour of `name`; the other filters are
    /// passed through (e.g. `refresh`).
    pub async fn get(&self, name: &str, query: &ApplicationQuery) -> Result<Application> {
        let query = ApplicationQuery {
            name: None,
            ..query.clone()
        };
        self.client
            .new_request(HttpMethod::Get, &Self::app_path(name, ""))
            .query(&query)
            .execute()
            .await
    }

    /// Replaces an application. The name is taken from its metadata.
    pub async fn update(
        &self,
        application: &Application,
        validate: Option<bool>,
    ) -> Result<Application> {
        self.client
            .new_request(
                HttpMethod::Put,
                &Self::app_path(&application.metadata.name, ""),
            )
            .query(&WriteOptions {
                upsert: None,
                validate,
            })
            .json(application)
            .execute()
            .await
    }

    /// Patches an application and returns the result.
    pub async fn patch(&self, name: &str, request: &ApplicationPatchRequest) -> Result<Application> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            #[serde(flatten)]
            request: &'a ApplicationPatchRequest,
        }

        self.client
            .new_request(HttpMethod::Patch, &Self::app_path(name, ""))
            .json(&Body { name, request })
            .execute()
            .await
    }

    /// Deletes an application.
    pub async fn delete(&self, name: &str, options: &DeleteOptions) -> Result<()> {
        self.client
            .new_request(HttpMethod::Delete, &Self::app_path(name, ""))
            .query(options)
            .execute_unit()
            .await
    }

    /// Starts a sync and returns the application with the operation attached.
    pub async fn sync(&self, name: &str, request: &SyncRequest) -> Result<Application> {
        self.client
            .new_request(HttpMethod::Post, &Self::app_path(name, "/sync"))
            .json(&SyncBody { name, request })
            .execute()
            .await
    }

    /// Returns managed resources with their diffs.
    pub async fn managed_resources(
        &self,
        query: &ResourcesQuery,
    ) -> Result<ManagedResourcesResponse> {
        self.client
            .new_request(
                HttpMethod::Get,
                &Self::app_path(&query.application_name, "/managed-resources"),
            )
            .query(query)
            .execute()
            .await
    }

    /// Returns the tree of live resources.
    pub async fn resource_tree(&self, query: &ResourcesQuery) -> Result<ApplicationTree> {
        self.client
            .new_request(
                HttpMethod::Get,
                &Self::app_path(&query.application_name, "/resource-tree"),
            )
            .query(query)
            .execute()
            .await
    }

    /// Lists Kubernetes events for the application or one of its resources.
    pub async fn list_resource_events(&self, query: &ResourceEventsQuery) -> Result<EventList> {
        self.client
            .new_request(HttpMethod::Get, &Self::app_path(&query.name, "/events"))
            .query(query)
            .execute()
            .await
    }

    /// Collects log lines of the application's pods.
    pub async fn application_pod_logs(&self, name: &str, query: &LogsQuery) -> Result<Vec<LogEntry>> {
        self.client
            .new_request(HttpMethod::Get, &Self::app_path(name, "/logs"))
            .query(query)
            .query_pair("follow", false)
            .execute_stream()
            .await
    }

    /// Collects log lines of one pod.
    pub async fn pod_logs(&self, name: &str, pod: &str, query: &LogsQuery) -> Result<Vec<LogEntry>> {
        let suffix = format!("/pods/{}/logs", escape_segment(pod));
        self.client
            .new_request(HttpMethod::Get, &Self::app_path(name, &suffix))
            .query(query)
            .query_pair("follow", false)
            .execute_stream()
            .await
    }

    /// Renders manifests, at `revision` when given.
    pub async fn get_manifests(&self, name: &str, revision: Option<&str>) -> Result<ManifestResponse> {
        let mut request = self
            .client
            .new_request(HttpMethod::Get, &Self::app_path(name, "/manifests"));
        if let Some(revision) = revision.filter(|r| !r.is_empty()) {
            request = request.query_pair("revision", revision);
        }
        request.execute().await
    }

    /// Terminates the running operation.
    pub async fn terminate_operation(&self, name: &str) -> Result<()> {
        self.client
            .new_request(HttpMethod::Delete, &Self::app_path(name, "/operation"))
            .execute_unit()
            .await
    }

    /// Returns the live manifest of one resource.
    pub async fn get_resource(
        &self,
        request: &ApplicationResourceRequest,
    ) -> Result<ApplicationResourceResponse> {
        self.client
            .new_request(HttpMethod::Get, &Self::app_path(&request.name, "/resource"))
            .query(request)
            .execute()
            .await
    }

    /// Lists custom actions available on one resource.
    pub async fn list_resource_actions(
        &self,
        request: &ApplicationResourceRequest,
    ) -> Result<ResourceActionsListResponse> {
        self.client
            .new_request(
                HttpMethod::Get,
                &Self::app_path(&request.name, "/resource/actions"),
            )
            .query(request)
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::TransportResponse;
    use crate::api::v1::test_support::{client, transport};

    const GUESTBOOK: &str = r#"{
        "metadata": {"name": "guestbook", "namespace": "argocd"},
        "spec": {
            "project": "default",
            "source": {
                "repoURL": "https://github.com/argoproj/argocd-example-apps.git",
                "path": "guestbook",
                "targetRevision": "HEAD",
                "directory": {"recurse": true}
            },
            "destination": {"server": "https://kubernetes.default.svc", "namespace": "web"},
            "syncPolicy": {"automated": {"prune": true}}
        },
        "status": {
            "sync": {"status": "Synced", "revision": "abc123"},
            "health": {"status": "Healthy"},
            "resources": [{"kind": "Service", "name": "guestbook-ui", "status": "Synced"}],
            "summary": {"images": ["gcr.io/heptio-images/ks-guestbook-demo:0.2"]}
        }
    }"#;

    #[tokio::test]
    async fn test_list_with_query() {
        let mock = transport(&[&format!(r#"{{"metadata":{{}},"items":[{GUESTBOOK}]}}"#)]);
        let query = ApplicationQuery {
            projects: vec!["default".into(), "infra".into()],
            selector: Some("team=web".into()),
            ..Default::default()
        };
        let apps = client(&mock).applications().list(&query).await.unwrap();

        assert_eq!(apps.len(), 1);
        let app = &apps.items[0];
        assert_eq!(app.status.sync.status, "Synced");
        assert_eq!(app.status.health.status, "Healthy");
        assert!(app.spec.source.as_ref().unwrap().extra.contains_key("directory"));
        assert!(app.status.extra.contains_key("summary"));

        let sent = mock.last_request();
        assert_eq!(sent.url, "https://argocd.example.com/api/v1/applications");
        assert_eq!(
            sent.query,
            vec![
                ("projects".to_string(), "default".to_string()),
                ("projects".to_string(), "infra".to_string()),
                ("selector".to_string(), "team=web".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_uses_application_path() {
        let mock = transport(&[GUESTBOOK]);
        let query = ApplicationQuery {
            name: Some("ignored".into()),
            refresh: Some("hard".into()),
            ..Default::default()
        };
        let app = client(&mock).applications().get("guestbook", &query).await.unwrap();

        assert_eq!(app.metadata.name, "guestbook");
        let sent = mock.last_request();
        assert_eq!(sent.url, "https://argocd.example.com/api/v1/applications/guestbook");
        assert_eq!(sent.query_value("refresh"), Some("hard"));
        assert_eq!(sent.query_value("name"), None);
    }

    #[tokio::test]
    async fn test_fetched_application_round_trips_through_update() {
        let mock = transport(&[GUESTBOOK, GUESTBOOK]);
        let client = client(&mock);
        let app = client
            .applications()
            .get("guestbook", &ApplicationQuery::default())
            .await
            .unwrap();
        client.applications().update(&app, Some(false)).await.unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.query_value("validate"), Some("false"));
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["spec"]["syncPolicy"]["automated"]["prune"], true);
        assert_eq!(body["spec"]["source"]["directory"]["recurse"], true);
        assert_eq!(body["spec"]["source"]["repoURL"], "https://github.com/argoproj/argocd-example-apps.git");
    }

    #[tokio::test]
    async fn test_create_options() {
        let mock = transport(&[GUESTBOOK]);
        let app = Application::new(
            "guestbook",
            "default",
            ApplicationSource {
                repo_url: "https://github.com/argoproj/argocd-example-apps.git".into(),
                path: "guestbook".into(),
                ..Default::default()
            },
            ApplicationDestination {
                server: "https://kubernetes.default.svc".into(),
                namespace: "web".into(),
                ..Default::default()
            },
        );
        client(&mock)
            .applications()
            .create(&app, Some(true), None)
            .await
            .unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.query, vec![("upsert".to_string(), "true".to_string())]);
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["metadata"]["name"], "guestbook");
        assert_eq!(body["spec"]["project"], "default");
    }

    #[tokio::test]
    async fn test_patch_body() {
        let mock = transport(&[GUESTBOOK]);
        let patch = ApplicationPatchRequest::merge(&serde_json::json!({
            "spec": {"source": {"targetRevision": "v2"}}
        }));
        client(&mock).applications().patch("guestbook", &patch).await.unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(sent.header("content-type"), None);
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "guestbook");
        assert_eq!(body["patchType"], "merge");
    }

    #[tokio::test]
    async fn test_delete_options() {
        let mock = transport(&["{}"]);
        let options = DeleteOptions {
            cascade: Some(false),
            propagation_policy: Some("background".into()),
            ..Default::default()
        };
        client(&mock).applications().delete("guestbook", &options).await.unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.query_value("cascade"), Some("false"));
        assert_eq!(sent.query_value("propagationPolicy"), Some("background"));
    }

    #[tokio::test]
    async fn test_sync_body() {
        let mock = transport(&[GUESTBOOK]);
        let request = SyncRequest {
            revision: "v1.2.0".into(),
            prune: true,
            ..Default::default()
        };
        client(&mock).applications().sync("guestbook", &request).await.unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.url, "https://argocd.example.com/api/v1/applications/guestbook/sync");
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "guestbook", "revision": "v1.2.0", "prune": true})
        );
    }

    #[tokio::test]
    async fn test_managed_resources_items() {
        let mock = transport(&[r#"{"items":[
            {"kind":"Deployment","name":"web","targetState":"{}","liveState":"{}","modified":true}
        ]}"#]);
        let query = ResourcesQuery {
            kind: Some("Deployment".into()),
            ..ResourcesQuery::for_application("guestbook")
        };
        let resources = client(&mock)
            .applications()
            .managed_resources(&query)
            .await
            .unwrap();

        assert_eq!(resources.items.len(), 1);
        assert!(resources.items[0].modified);
        let sent = mock.last_request();
        assert_eq!(
            sent.url,
            "https://argocd.example.com/api/v1/applications/guestbook/managed-resources"
        );
        assert_eq!(sent.query, vec![("kind".to_string(), "Deployment".to_string())]);
    }

    #[tokio::test]
    async fn test_resource_tree() {
        let mock = transport(&[r#"{"nodes":[
            {"group":"apps","version":"v1","kind":"Deployment","namespace":"web","name":"guestbook-ui",
             "uid":"u1","health":{"status":"Healthy"},"info":[{"name":"Revision","value":"Rev:1"}]},
            {"version":"v1","kind":"Pod","namespace":"web","name":"guestbook-ui-1",
             "parentRefs":[{"group":"apps","kind":"ReplicaSet","name":"guestbook-ui-7f","namespace":"web"}],
             "images":["ks-guestbook-demo:0.2"]}
        ],"orphanedNodes":null}"#]);
        let tree = client(&mock)
            .applications()
            .resource_tree(&ResourcesQuery::for_application("guestbook"))
            .await
            .unwrap();

        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.nodes[0].resource.kind, "Deployment");
        assert_eq!(tree.nodes[0].info[0].value, "Rev:1");
        assert_eq!(tree.nodes[1].parent_refs[0].kind, "ReplicaSet");
        assert!(tree.orphaned_nodes.is_empty());
        assert!(mock.last_request().url.ends_with("/applications/guestbook/resource-tree"));
    }

    #[tokio::test]
    async fn test_list_resource_events() {
        let mock = transport(&[r#"{"items":[
            {"metadata":{"name":"ev1"},"reason":"ResourceUpdated","message":"Updated sync status","type":"Normal","count":3}
        ]}"#]);
        let query = ResourceEventsQuery {
            name: "guestbook".into(),
            resource_uid: Some("u1".into()),
            ..Default::default()
        };
        let events = client(&mock)
            .applications()
            .list_resource_events(&query)
            .await
            .unwrap();

        assert_eq!(events.items[0].event_type, "Normal");
        assert_eq!(events.items[0].count, 3);
        assert_eq!(mock.last_request().query_value("resourceUID"), Some("u1"));
    }

    #[tokio::test]
    async fn test_pod_logs_stream() {
        let mock = transport(&[concat!(
            r#"{"result":{"content":"starting","podName":"web-1","timeStamp":"2024-05-01T10:00:00Z"}}"#,
            "\n",
            r#"{"result":{"content":"ready","podName":"web-1"}}"#,
            "\n",
            r#"{"result":{"content":"","podName":"","last":true}}"#,
            "\n"
        )]);
        let query = LogsQuery {
            container: Some("app".into()),
            tail_lines: Some(100),
            ..Default::default()
        };
        let logs = client(&mock)
            .applications()
            .pod_logs("guestbook", "web-1", &query)
            .await
            .unwrap();

        assert_eq!(logs.len(), 3);
        assert_eq!(logs[1].content, "ready");
        assert!(logs[2].last);
        let sent = mock.last_request();
        assert_eq!(
            sent.url,
            "https://argocd.example.com/api/v1/applications/guestbook/pods/web-1/logs"
        );
        assert_eq!(sent.query_value("tailLines"), Some("100"));
        assert_eq!(sent.query_value("follow"), Some("false"));
    }

    #[tokio::test]
    async fn test_application_pod_logs_path() {
        let mock = transport(&[""]);
        let logs = client(&mock)
            .applications()
            .application_pod_logs("guestbook", &LogsQuery::default())
            .await
            .unwrap();
        assert!(logs.is_empty());
        assert!(mock.last_request().url.ends_with("/applications/guestbook/logs"));
    }

    #[tokio::test]
    async fn test_get_manifests_revision() {
        let mock = transport(&[
            r#"{"manifests":["{\"kind\":\"Service\"}"],"revision":"abc","sourceType":"Directory"}"#,
            r#"{"manifests":null}"#,
        ]);
        let client = client(&mock);

        let manifests = client
            .applications()
            .get_manifests("guestbook", Some("abc"))
            .await
            .unwrap();
        assert_eq!(manifests.manifests.len(), 1);
        assert_eq!(manifests.source_type, "Directory");
        assert_eq!(mock.last_request().query_value("revision"), Some("abc"));

        let manifests = client.applications().get_manifests("guestbook", None).await.unwrap();
        assert!(manifests.manifests.is_empty());
        assert!(mock.last_request().query.is_empty());
    }

    #[tokio::test]
    async fn test_terminate_operation() {
        let mock = transport(&["{}"]);
        client(&mock).applications().terminate_operation("guestbook").await.unwrap();
        let sent = mock.last_request();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert!(sent.url.ends_with("/applications/guestbook/operation"));
    }

    #[tokio::test]
    async fn test_get_resource_and_actions() {
        let mock = transport(&[
            r#"{"manifest":"{\"kind\":\"Deployment\",\"metadata\":{\"name\":\"web\"}}"}"#,
            r#"{"actions":[{"name":"restart"},{"name":"pause","disabled":true}]}"#,
        ]);
        let client = client(&mock);
        let request = ApplicationResourceRequest {
            name: "guestbook".into(),
            namespace: "web".into(),
            resource_name: "web".into(),
            version: "v1".into(),
            group: "apps".into(),
            kind: "Deployment".into(),
            ..Default::default()
        };

        let resource = client.applications().get_resource(&request).await.unwrap();
        assert_eq!(resource.manifest_value().unwrap()["metadata"]["name"], "web");
        let first = &mock.requests()[0];
        assert!(first.url.ends_with("/applications/guestbook/resource"));
        assert_eq!(first.query_value("resourceName"), Some("web"));
        assert_eq!(first.query_value("name"), None);

        let actions = client.applications().list_resource_actions(&request).await.unwrap();
        assert_eq!(actions.actions.len(), 2);
        assert!(actions.actions[1].disabled);
        assert!(mock.last_request().url.ends_with("/applications/guestbook/resource/actions"));
    }

    #[tokio::test]
    async fn test_name_is_escaped() {
        let mock = transport(&[GUESTBOOK]);
        client(&mock)
            .applications()
            .get("team/app", &ApplicationQuery::default())
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().url,
            "https://argocd.example.com/api/v1/applications/team%2Fapp"
        );
    }

    #[tokio::test]
    async fn test_not_found_is_api_error() {
        let mock = transport(&[]);
        mock.push(TransportResponse::new(
            404,
            r#"{"error":"applications.argoproj.io \"nope\" not found","code":5,"message":"applications.argoproj.io \"nope\" not found"}"#,
        ));
        let err = client(&mock)
            .applications()
            .get("nope", &ApplicationQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ArgoError::Api {
                status: 404,
                code: Some(5),
                ..
            }
        ));
    }
}
