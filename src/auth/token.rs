//
//  argocd-rs
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Inspection
//!
//! Argo CD session and API tokens are JWTs. The client treats them as opaque
//! bearer credentials; this module only reads the unverified claims so the
//! CLI can show who a stored token belongs to and when it expires.
//!
//! ## Example
//!
//! ```rust
//! use argocd_rs::auth::{decode_claims, validate_token};
//!
//! // {"alg":"HS256","typ":"JWT"} . {"iss":"argocd","sub":"admin:login","exp":4102444800}
//! let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
//!              eyJpc3MiOiJhcmdvY2QiLCJzdWIiOiJhZG1pbjpsb2dpbiIsImV4cCI6NDEwMjQ0NDgwMH0.\
//!              c2lnbmF0dXJl";
//! assert!(validate_token(token));
//!
//! let claims = decode_claims(token).unwrap();
//! assert_eq!(claims.username(), "admin");
//! ```
//!
//! ## Notes
//!
//! - Signatures are not verified; never base an authorization decision on
//!   these claims
//! - A token that is not a JWT is still a valid bearer token for the client

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Reads a token from standard input.
///
/// Only the first line is read and it is trimmed, so
/// `echo "$TOKEN" | argocd-rs login --auth-token-stdin` works.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;

    Ok(line.trim().to_string())
}

/// Validates the format of a token string.
///
/// The token must be non-empty and must not contain whitespace. Whether the
/// server accepts it is not checked.
///
/// ```rust
/// use argocd_rs::auth::validate_token;
///
/// assert!(validate_token("abc123"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Unverified JWT claims of an Argo CD token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Issuer; `argocd` for locally issued tokens.
    #[serde(default)]
    pub iss: String,

    /// Subject; `<account>:login` for session tokens, `<account>` for API tokens.
    #[serde(default)]
    pub sub: String,

    /// Token id; set on API tokens.
    #[serde(default)]
    pub jti: Option<String>,

    #[serde(default)]
    pub iat: Option<i64>,

    #[serde(default)]
    pub nbf: Option<i64>,

    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Account name without the `:login` suffix of session tokens.
    pub fn username(&self) -> &str {
        self.sub
            .split_once(':')
            .map(|(name, _)| name)
            .unwrap_or(&self.sub)
    }

    /// When the token was issued.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(timestamp)
    }

    /// When the token expires; `None` for tokens without expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(timestamp)
    }

    /// Whether the token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }

    /// Whether the token has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Decodes the claims of a JWT without verifying its signature.
///
/// A leading `Bearer ` is ignored.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);

    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => bail!("Token is not a JWT"),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .context("Token payload is not base64url")?;
    serde_json::from_slice(&bytes).context("Token payload is not a JSON object")
}
