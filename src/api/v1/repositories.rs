//
//  argocd-rs
//  api/v1/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository API types and operations.
//!
//! Repositories are addressed by their URL, which is percent-encoded into a
//! single path segment:
//!
//! ```text
//! https://github.com/org/repo.git
//!   -> api/v1/repositories/https%3A%2F%2Fgithub.com%2Forg%2Frepo.git
//! ```
//!
//! # Notes
//!
//! - Credentials are write-only; the server never returns them
//! - [`Repository`]'s `Debug` output leaves credentials out

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{v1, Client};
use crate::api::common::{is_false, null_as_empty, ConnectionState, ItemList};
use crate::api::error::Result;
use crate::api::request::{escape_segment, HttpMethod};

/// A repository registered with Argo CD.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Repository URL.
    #[serde(default)]
    pub repo: String,

    /// `git` or `helm`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub repo_type: String,

    /// Display name; required for Helm repositories.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_private_key: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub insecure: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_lfs: bool,

    #[serde(rename = "enableOCI", default, skip_serializing_if = "is_false")]
    pub enable_oci: bool,

    /// Set when credentials come from a matching credential template.
    #[serde(default, skip_serializing_if = "is_false")]
    pub inherited_creds: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<ConnectionState>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Repository {
    /// A Git repository without credentials.
    pub fn git(url: impl Into<String>) -> Self {
        Self {
            repo: url.into(),
            repo_type: "git".to_string(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("repo", &self.repo)
            .field("repo_type", &self.repo_type)
            .field("name", &self.name)
            .field("project", &self.project)
            .field("username", &self.username)
            .field("insecure", &self.insecure)
            .field("connection_state", &self.connection_state)
            .finish_non_exhaustive()
    }
}

/// A page of repositories.
pub type RepositoryList = ItemList<Repository>;

/// Applications discovered in a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoAppsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<AppInfo>,
}

/// A directory that looks like an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// `Helm`, `Kustomize`, `Directory` or `Plugin`.
    #[serde(rename = "type", default)]
    pub app_type: String,
    #[serde(default)]
    pub path: String,
}

/// Filters for [`RepositoriesService::list_apps`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoAppsQuery {
    /// Repository URL; goes into the path.
    #[serde(skip)]
    pub repo: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_project: Option<String>,
}

/// Charts of a Helm repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmChartsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<HelmChart>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmChart {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub versions: Vec<String>,
}

/// Branches and tags of a Git repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refs {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub branches: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

/// Connection parameters checked by [`RepositoriesService::validate_access`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoAccessQuery {
    pub repo: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub repo_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_private_key: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub insecure: bool,

    #[serde(rename = "enableOci", default, skip_serializing_if = "is_false")]
    pub enable_oci: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
}

impl fmt::Debug for RepoAccessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoAccessQuery")
            .field("repo", &self.repo)
            .field("repo_type", &self.repo_type)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshQuery {
    force_refresh: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateQuery {
    upsert: bool,
    creds_only: bool,
}

/// Repository operations.
#[derive(Debug, Clone)]
pub struct RepositoriesService {
    client: Client,
}

impl RepositoriesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn repo_path(url: &str, suffix: &str) -> String {
        v1(&format!("repositories/{}{}", escape_segment(url), suffix))
    }

    /// Lists repositories. `force_refresh` bypasses the server cache.
    pub async fn list_repositories(&self, force_refresh: bool) -> Result<RepositoryList> {
        self.client
            .new_request(HttpMethod::Get, &v1("repositories"))
            .query(&RefreshQuery { force_refresh })
            .execute()
            .await
    }

    /// Registers a repository.
    ///
    /// With `upsert` an existing registration is replaced. With `creds_only`
    /// only credentials are stored, as a template for matching URLs.
    pub async fn create_repository(
        &self,
        repository: &Repository,
        upsert: bool,
        creds_only: bool,
    ) -> Result<Repository> {
        self.client
            .new_request(HttpMethod::Post, &v1("repositories"))
            .query(&CreateQuery { upsert, creds_only })
            .json(repository)
            .execute()
            .await
    }

    /// Updates a repository. The URL is taken from `repository.repo`.
    pub async fn update_repository(&self, repository: &Repository) -> Result<Repository> {
        self.client
            .new_request(HttpMethod::Put, &Self::repo_path(&repository.repo, ""))
            .json(repository)
            .execute()
            .await
    }

    /// Returns one repository.
    pub async fn get_repository(&self, url: &str, force_refresh: bool) -> Result<Repository> {
        self.client
            .new_request(HttpMethod::Get, &Self::repo_path(url, ""))
            .query(&RefreshQuery { force_refresh })
            .execute()
            .await
    }

    /// Removes a repository registration.
    pub async fn delete_repository(&self, url: &str, force_refresh: bool) -> Result<()> {
        self.client
            .new_request(HttpMethod::Delete, &Self::repo_path(url, ""))
            .query(&RefreshQuery { force_refresh })
            .execute_unit()
            .await
    }

    /// Lists application directories found at a revision.
    pub async fn list_apps(&self, query: &RepoAppsQuery) -> Result<RepoAppsResponse> {
        self.client
            .new_request(HttpMethod::Get, &Self::repo_path(&query.repo, "/apps"))
            .query(query)
            .execute()
            .await
    }

    /// Lists charts of a Helm repository.
    pub async fn get_helm_charts(&self, url: &str, force_refresh: bool) -> Result<HelmChartsResponse> {
        self.client
            .new_request(HttpMethod::Get, &Self::repo_path(url, "/helmcharts"))
            .query(&RefreshQuery { force_refresh })
            .execute()
            .await
    }

    /// Lists branches and tags.
    pub async fn list_refs(&self, url: &str, force_refresh: bool) -> Result<Refs> {
        self.client
            .new_request(HttpMethod::Get, &Self::repo_path(url, "/refs"))
            .query(&RefreshQuery { force_refresh })
            .execute()
            .await
    }

    /// Checks that the server can reach a repository with the given
    /// parameters. Succeeds with `()`; a failed check is an error.
    pub async fn validate_access(&self, query: &RepoAccessQuery) -> Result<()> {
        self.client
            .new_request(HttpMethod::Post, &Self::repo_path(&query.repo, "/validate"))
            .json(query)
            .execute_unit()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::api::v1::test_support::{client, transport};

    const REPO_URL: &str = "https://github.com/argoproj/argocd-example-apps.git";
    const ENCODED: &str = "https%3A%2F%2Fgithub.com%2Fargoproj%2Fargocd-example-apps.git";

    #[tokio::test]
    async fn test_list_repositories() {
        let mock = transport(&[r#"{"items":[
            {"repo":"https://github.com/argoproj/argocd-example-apps.git","type":"git",
             "connectionState":{"status":"Successful","attemptedAt":"2024-05-01T10:00:00Z"}}
        ]}"#]);
        let repos = client(&mock).repositories().list_repositories(true).await.unwrap();

        assert_eq!(repos.items[0].repo_type, "git");
        assert_eq!(
            repos.items[0].connection_state.as_ref().unwrap().status,
            "Successful"
        );
        assert_eq!(mock.last_request().query_value("forceRefresh"), Some("true"));
    }

    #[tokio::test]
    async fn test_get_escapes_url() {
        let mock = transport(&[r#"{"repo":"https://github.com/argoproj/argocd-example-apps.git"}"#]);
        client(&mock)
            .repositories()
            .get_repository(REPO_URL, false)
            .await
            .unwrap();
        let sent = mock.last_request();
        assert_eq!(
            sent.url,
            format!("https://argocd.example.com/api/v1/repositories/{ENCODED}")
        );
        assert_eq!(sent.query_value("forceRefresh"), Some("false"));
    }

    #[tokio::test]
    async fn test_create_sends_credentials() {
        let mock = transport(&["{}"]);
        let repo = Repository {
            username: "bot".into(),
            password: "s3cret".into(),
            ..Repository::git(REPO_URL)
        };
        client(&mock)
            .repositories()
            .create_repository(&repo, false, true)
            .await
            .unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.url, "https://argocd.example.com/api/v1/repositories");
        assert_eq!(sent.query_value("upsert"), Some("false"));
        assert_eq!(sent.query_value("credsOnly"), Some("true"));
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["password"], "s3cret");
        assert_eq!(body["type"], "git");
        assert!(!format!("{repo:?}").contains("s3cret"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let mock = transport(&["{}", "{}"]);
        let client = client(&mock);
        client
            .repositories()
            .update_repository(&Repository::git(REPO_URL))
            .await
            .unwrap();
        client
            .repositories()
            .delete_repository(REPO_URL, false)
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert!(requests[0].url.ends_with(ENCODED));
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert!(requests[1].url.ends_with(ENCODED));
    }

    #[tokio::test]
    async fn test_list_apps() {
        let mock = transport(&[r#"{"items":[{"type":"Kustomize","path":"kustomize-guestbook"}]}"#]);
        let query = RepoAppsQuery {
            repo: REPO_URL.into(),
            revision: Some("HEAD".into()),
            ..Default::default()
        };
        let apps = client(&mock).repositories().list_apps(&query).await.unwrap();

        assert_eq!(apps.items[0].app_type, "Kustomize");
        let sent = mock.last_request();
        assert!(sent.url.ends_with(&format!("{ENCODED}/apps")));
        assert_eq!(sent.query, vec![("revision".to_string(), "HEAD".to_string())]);
    }

    #[tokio::test]
    async fn test_helm_charts_and_refs() {
        let mock = transport(&[
            r#"{"items":[{"name":"nginx","versions":["15.0.0","14.2.1"]}]}"#,
            r#"{"branches":["main","release-1.0"],"tags":null}"#,
        ]);
        let client = client(&mock);

        let charts = client
            .repositories()
            .get_helm_charts("https://charts.bitnami.com/bitnami", false)
            .await
            .unwrap();
        assert_eq!(charts.items[0].versions.len(), 2);
        assert!(mock.requests()[0].url.ends_with("/helmcharts"));

        let refs = client.repositories().list_refs(REPO_URL, false).await.unwrap();
        assert_eq!(refs.branches, vec!["main".to_string(), "release-1.0".to_string()]);
        assert!(refs.tags.is_empty());
        assert!(mock.last_request().url.ends_with("/refs"));
    }

    #[tokio::test]
    async fn test_validate_access_posts_body() {
        let mock = transport(&["{}"]);
        let query = RepoAccessQuery {
            repo: REPO_URL.into(),
            repo_type: "git".into(),
            username: "bot".into(),
            password: "token".into(),
            ..Default::default()
        };
        client(&mock).repositories().validate_access(&query).await.unwrap();

        let sent = mock.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with(&format!("{ENCODED}/validate")));
        assert!(sent.query.is_empty());
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["repo"], REPO_URL);
        assert_eq!(body["username"], "bot");
    }

    #[tokio::test]
    async fn test_validate_access_failure() {
        let mock = std::sync::Arc::new(MockTransport::new().respond(
            400,
            r#"{"error":"authentication required","code":3,"message":"authentication required"}"#,
        ));
        let query = RepoAccessQuery {
            repo: REPO_URL.into(),
            ..Default::default()
        };
        let err = client(&mock)
            .repositories()
            .validate_access(&query)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API error (400): authentication required");
    }
}
