//
//  argocd-rs
//  api/v1/repo_creds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository credential templates.
//!
//! A template's URL is a prefix: every repository whose URL starts with it
//! inherits the template's credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::client::{v1, Client};
use crate::api::common::{is_false, ItemList};
use crate::api::error::Result;
use crate::api::request::{escape_segment, HttpMethod};

/// A credential template.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCreds {
    /// URL prefix the template applies to.
    #[serde(default)]
    pub url: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub repo_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_private_key: String,

    #[serde(rename = "enableOCI", default, skip_serializing_if = "is_false")]
    pub enable_oci: bool,
}

impl fmt::Debug for RepoCreds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoCreds")
            .field("url", &self.url)
            .field("repo_type", &self.repo_type)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// A page of credential templates.
pub type RepoCredsList = ItemList<RepoCreds>;

/// Credential template operations.
#[derive(Debug, Clone)]
pub struct RepoCredsService {
    client: Client,
}

impl RepoCredsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists templates, optionally only the one for `url`.
    pub async fn list_repository_credentials(&self, url: Option<&str>) -> Result<RepoCredsList> {
        let mut request = self.client.new_request(HttpMethod::Get, &v1("repocreds"));
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            request = request.query_pair("url", url);
        }
        request.execute().await
    }

    /// Creates a template. With `upsert` an existing template is replaced.
    pub async fn create_repository_credentials(
        &self,
        creds: &RepoCreds,
        upsert: bool,
    ) -> Result<RepoCreds> {
        self.client
            .new_request(HttpMethod::Post, &v1("repocreds"))
            .query_pair("upsert", upsert)
            .json(creds)
            .execute()
            .await
    }

    /// Deletes the template for `url`.
    pub async fn delete_repository_credentials(&self, url: &str) -> Result<()> {
        self.client
            .new_request(
                HttpMethod::Delete,
                &v1(&format!("repocreds/{}", escape_segment(url))),
            )
            .execute_unit()
            .await
    }
}
