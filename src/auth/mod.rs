//
//  argocd-rs
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Argo CD issues JWTs from `POST api/v1/session`. The [`Client`] calls an
//! [`Authenticator`] the first time [`Client::init`] runs without a token;
//! the default [`SessionAuthenticator`] simply posts the username and
//! password to that endpoint.
//!
//! ## Module Structure
//!
//! - [`Authenticator`]: the login seam, replaceable with
//!   [`options::authenticator`](crate::api::options::authenticator)
//! - [`SessionAuthenticator`]: the username/password login
//! - [`token`]: token format checks and JWT claim inspection
//!
//! ## Example
//!
//! A caller whose tokens come from an SSO flow can plug in its own login:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use argocd_rs::api::options;
//! use argocd_rs::api::v1::sessions::SessionResponse;
//! use argocd_rs::auth::Authenticator;
//! use argocd_rs::{ArgoError, Client};
//!
//! struct FromEnv;
//!
//! #[async_trait]
//! impl Authenticator for FromEnv {
//!     async fn create_user_jwt(
//!         &self,
//!         _client: &Client,
//!         _username: &str,
//!         _password: &str,
//!     ) -> Result<SessionResponse, ArgoError> {
//!         let token = std::env::var("SSO_TOKEN").unwrap_or_default();
//!         Ok(SessionResponse { token })
//!     }
//! }
//!
//! # fn build() -> Result<Client, ArgoError> {
//! Client::new(
//!     "https://argocd.example.com",
//!     "",
//!     "",
//!     "",
//!     [options::authenticator(Arc::new(FromEnv))],
//! )
//! # }
//! ```

pub mod token;

pub use token::{decode_claims, validate_token, TokenClaims};

use async_trait::async_trait;

use crate::api::v1::sessions::SessionResponse;
use crate::api::{Client, Result};

/// Exchanges credentials for a session token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns a session for `username` and `password`.
    ///
    /// `client` is the client being initialised. Implementations must not
    /// call [`Client::init`] on it.
    async fn create_user_jwt(
        &self,
        client: &Client,
        username: &str,
        password: &str,
    ) -> Result<SessionResponse>;
}

/// Logs in through `POST api/v1/session`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAuthenticator;

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn create_user_jwt(
        &self,
        client: &Client,
        username: &str,
        password: &str,
    ) -> Result<SessionResponse> {
        client.sessions().create(username, password).await
    }
}
