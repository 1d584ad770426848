//
//  argocd-rs
//  api/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Session token storage.
//!
//! A client authenticates once and reuses the token for every call. The token
//! lives in a write-once cell: it is set at construction, by the first
//! successful [`Client::init`](super::Client::init), or by
//! [`Client::set_token`](super::Client::set_token), and never replaced
//! afterwards.

use std::fmt;

use tokio::sync::OnceCell;

use super::error::{ArgoError, Result};

const BEARER_PREFIX: &str = "Bearer ";

/// A bearer token as issued by the session endpoint.
///
/// The raw value is stored without the `Bearer ` prefix; a prefixed value
/// passed in by a caller is normalized on entry, so [`AuthToken::bearer`]
/// always yields exactly one prefix.
///
/// ```rust
/// use argocd_rs::AuthToken;
///
/// let token = AuthToken::new("Bearer abc123");
/// assert_eq!(token.as_str(), "abc123");
/// assert_eq!(token.bearer(), "Bearer abc123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    raw: String,
}

impl AuthToken {
    /// Wraps a token, stripping any `Bearer ` prefixes.
    ///
    /// A value that is nothing but the prefix yields an empty token.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let mut raw = token.trim();
        loop {
            if raw == BEARER_PREFIX.trim_end() {
                raw = "";
            }
            match raw.strip_prefix(BEARER_PREFIX) {
                Some(rest) => raw = rest.trim_start(),
                None => break,
            }
        }
        Self {
            raw: raw.to_string(),
        }
    }

    /// The token without any prefix.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("{BEARER_PREFIX}{}", self.raw)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Write-once holder for the client's token.
#[derive(Debug, Default)]
pub(crate) struct TokenCell {
    cell: OnceCell<AuthToken>,
}

impl TokenCell {
    /// Creates a cell, pre-populated when `initial` is non-empty.
    pub(crate) fn new(initial: &str) -> Self {
        let token = AuthToken::new(initial);
        let cell = if token.is_empty() {
            OnceCell::new()
        } else {
            OnceCell::new_with(Some(token))
        };
        Self { cell }
    }

    pub(crate) fn get(&self) -> Option<&AuthToken> {
        self.cell.get()
    }

    /// Stores `token` if the cell is still empty.
    pub(crate) fn set(&self, token: AuthToken) -> Result<()> {
        if token.is_empty() {
            return Err(ArgoError::EmptyToken);
        }
        self.cell.set(token).map_err(|_| ArgoError::TokenAlreadySet)
    }

    /// Runs `init` unless a token is present or another caller is already
    /// running it; concurrent callers wait for that caller's outcome.
    ///
    /// An empty token produced by `init` is rejected and leaves the cell
    /// empty.
    pub(crate) async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<&AuthToken>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<AuthToken>>,
    {
        self.cell
            .get_or_try_init(|| async {
                let token = init().await?;
                if token.is_empty() {
                    return Err(ArgoError::EmptyToken);
                }
                Ok(token)
            })
            .await
    }
}
