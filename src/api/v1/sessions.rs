//
//  argocd-rs
//  api/v1/sessions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Session endpoints.
//!
//! `POST api/v1/session` exchanges a username and password for a JWT. It is
//! the only endpoint that is called without an `Authorization` header.

use serde::{Deserialize, Serialize};

use crate::api::client::{v1, Client};
use crate::api::error::Result;
use crate::api::request::HttpMethod;

/// Login request body.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SessionCreateRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SessionCreateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCreateRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The issued JWT.
    #[serde(default)]
    pub token: String,
}

/// Information about the user behind the current token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub logged_in: bool,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub iss: String,

    #[serde(default)]
    pub groups: Vec<String>,
}

/// Session operations.
#[derive(Debug, Clone)]
pub struct SessionsService {
    client: Client,
}

impl SessionsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Logs in and returns the issued token.
    ///
    /// The request never carries an `Authorization` header, so this works on
    /// a client that has no token yet. The token is returned, not stored;
    /// [`Client::init`] is what stores it.
    pub async fn create(&self, username: &str, password: &str) -> Result<SessionResponse> {
        let body = SessionCreateRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client
            .new_unauthenticated_request(HttpMethod::Post, &v1("session"))
            .json(&body)
            .execute()
            .await
    }

    /// Returns information about the current user.
    pub async fn get_user_info(&self) -> Result<UserInfo> {
        self.client
            .new_request(HttpMethod::Get, &v1("session/userinfo"))
            .execute()
            .await
    }

    /// Invalidates the current token on the server.
    pub async fn delete(&self) -> Result<()> {
        self.client
            .new_request(HttpMethod::Delete, &v1("session"))
            .execute_unit()
            .await
    }
}
