//
//  argocd-rs
//  api/v1/accounts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Account API types and operations.
//!
//! Local Argo CD accounts, their API tokens, and RBAC permission checks.
//!
//! # Example
//!
//! ```rust,no_run
//! use argocd_rs::Client;
//! use argocd_rs::api::v1::accounts::CanIRequest;
//!
//! # async fn example(client: Client) -> Result<(), argocd_rs::ArgoError> {
//! let allowed = client
//!     .accounts()
//!     .can_i(&CanIRequest::new("applications", "sync").subresource("default/guestbook"))
//!     .await?;
//! println!("sync allowed: {}", allowed.is_allowed());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::{v1, Client};
use crate::api::common::null_as_empty;
use crate::api::error::Result;
use crate::api::request::{escape_segment, HttpMethod};

/// Accounts known to the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountsList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Account>,
}

/// A local account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub enabled: bool,

    /// `login` and/or `apiKey`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub capabilities: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub tokens: Vec<Token>,
}

impl Account {
    /// Whether the account may log in interactively.
    pub fn can_login(&self) -> bool {
        self.capabilities.iter().any(|c| c == "login")
    }
}

/// Metadata of an API token. The token value itself is never returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default)]
    pub id: String,

    /// Unix seconds. The server encodes 64-bit integers as strings.
    #[serde(default, with = "crate::api::common::int64")]
    pub issued_at: i64,

    /// Unix seconds; `0` means the token never expires.
    #[serde(default, with = "crate::api::common::int64")]
    pub expires_at: i64,
}

/// Permission check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanIRequest {
    /// Resource kind, e.g. `applications`.
    pub resource: String,
    /// Action, e.g. `get` or `sync`.
    pub action: String,
    /// Optional object, e.g. `default/guestbook`.
    pub subresource: String,
}

impl CanIRequest {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            subresource: String::new(),
        }
    }

    pub fn subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = subresource.into();
        self
    }

    fn path(&self) -> String {
        let mut path = format!(
            "account/can-i/{}/{}",
            escape_segment(&self.resource),
            escape_segment(&self.action)
        );
        if !self.subresource.is_empty() {
            path.push('/');
            path.push_str(&escape_segment(&self.subresource));
        }
        path
    }
}

/// Permission check result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanIResponse {
    /// `yes` or `no`.
    #[serde(default)]
    pub value: String,
}

impl CanIResponse {
    pub fn is_allowed(&self) -> bool {
        self.value == "yes"
    }
}

/// Password change request.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub new_password: String,
    pub current_password: String,
    /// Account to change; empty means the caller's own account.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl std::fmt::Debug for UpdatePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdatePasswordRequest")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTokenRequest<'a> {
    name: &'a str,
    id: &'a str,
    expires_in: i64,
}

/// A newly issued API token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenResponse {
    #[serde(default)]
    pub token: String,
}

/// Account operations.
#[derive(Debug, Clone)]
pub struct AccountsService {
    client: Client,
}

impl AccountsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists all accounts.
    pub async fn list_accounts(&self) -> Result<AccountsList> {
        self.client
            .new_request(HttpMethod::Get, &v1("account"))
            .execute()
            .await
    }

    /// Checks whether the current account may perform an action.
    pub async fn can_i(&self, request: &CanIRequest) -> Result<CanIResponse> {
        self.client
            .new_request(HttpMethod::Get, &v1(&request.path()))
            .execute()
            .await
    }

    /// Changes an account's password.
    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> Result<()> {
        self.client
            .new_request(HttpMethod::Put, &v1("account/password"))
            .json(request)
            .execute_unit()
            .await
    }

    /// Returns one account.
    pub async fn get_account(&self, name: &str) -> Result<Account> {
        self.client
            .new_request(HttpMethod::Get, &v1(&format!("account/{}", escape_segment(name))))
            .execute()
            .await
    }

    /// Issues an API token for `name`.
    ///
    /// `expires_in` is in seconds; `0` issues a token that never expires.
    /// An empty `id` lets the server generate one.
    pub async fn create_token(
        &self,
        name: &str,
        id: &str,
        expires_in: i64,
    ) -> Result<CreateTokenResponse> {
        let body = CreateTokenRequest {
            name,
            id,
            expires_in,
        };
        self.client
            .new_request(
                HttpMethod::Post,
                &v1(&format!("account/{}/token", escape_segment(name))),
            )
            .json(&body)
            .execute()
            .await
    }

    /// Revokes an API token.
    pub async fn delete_token(&self, name: &str, id: &str) -> Result<()> {
        let path = format!(
            "account/{}/token/{}",
            escape_segment(name),
            escape_segment(id)
        );
        self.client
            .new_request(HttpMethod::Delete, &v1(&path))
            .execute_unit()
            .await
    }
}
