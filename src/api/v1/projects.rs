//
//  argocd-rs
//  api/v1/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project API types and operations.
//!
//! Projects group applications and restrict where they may pull from and
//! deploy to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{v1, Client};
use crate::api::common::{null_as_empty, ItemList, ObjectMeta};
use crate::api::error::Result;
use crate::api::request::{escape_segment, HttpMethod};

use super::applications::ApplicationDestination;
use super::clusters::Cluster;
use super::repositories::Repository;

/// An Argo CD project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppProject {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: AppProjectSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl AppProject {
    /// A project with the given name and an empty spec.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            ..Self::default()
        }
    }
}

/// A page of projects.
pub type AppProjectList = ItemList<AppProject>;

/// Project restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProjectSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Repository URL globs applications may use; `*` allows all.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub source_repos: Vec<String>,

    /// Permitted destinations; fields may be globs.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub destinations: Vec<ApplicationDestination>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub cluster_resource_whitelist: Vec<GroupKind>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub namespace_resource_blacklist: Vec<GroupKind>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub roles: Vec<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A Kubernetes API group and kind; either may be `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKind {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub kind: String,
}

/// A project together with everything visible through it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedProjectsResponse {
    #[serde(default)]
    pub project: AppProject,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub global_projects: Vec<AppProject>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub repositories: Vec<Repository>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub clusters: Vec<Cluster>,
}

#[derive(Serialize)]
struct ProjectBody<'a> {
    project: &'a AppProject,
    #[serde(skip_serializing_if = "Option::is_none")]
    upsert: Option<bool>,
}

/// Project operations.
#[derive(Debug, Clone)]
pub struct ProjectsService {
    client: Client,
}

impl ProjectsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn project_path(name: &str, suffix: &str) -> String {
        v1(&format!("projects/{}{}", escape_segment(name), suffix))
    }

    /// Lists projects, optionally only the one called `name`.
    pub async fn list(&self, name: Option<&str>) -> Result<AppProjectList> {
        let mut request = self.client.new_request(HttpMethod::Get, &v1("projects"));
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            request = request.query_pair("name", name);
        }
        request.execute().await
    }

    /// Creates a project. With `upsert` an existing project is replaced.
    pub async fn create(&self, project: &AppProject, upsert: bool) -> Result<AppProject> {
        self.client
            .new_request(HttpMethod::Post, &v1("projects"))
            .json(&ProjectBody {
                project,
                upsert: Some(upsert),
            })
            .execute()
            .await
    }

    /// Returns one project.
    pub async fn get(&self, name: &str) -> Result<AppProject> {
        self.client
            .new_request(HttpMethod::Get, &Self::project_path(name, ""))
            .execute()
            .await
    }

    /// Returns a project with its global projects, repositories and clusters.
    pub async fn get_detailed_project(&self, name: &str) -> Result<DetailedProjectsResponse> {
        self.client
            .new_request(HttpMethod::Get, &Self::project_path(name, "/detailed"))
            .execute()
            .await
    }

    /// Replaces a project. The name is taken from its metadata.
    pub async fn update(&self, project: &AppProject) -> Result<AppProject> {
        self.client
            .new_request(
                HttpMethod::Put,
                &Self::project_path(&project.metadata.name, ""),
            )
            .json(&ProjectBody {
                project,
                upsert: None,
            })
            .execute()
            .await
    }

    /// Deletes a project. The server refuses while applications still use it.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .new_request(HttpMethod::Delete, &Self::project_path(name, ""))
            .execute_unit()
            .await
    }
}
