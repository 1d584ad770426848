//
//  argocd-rs
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Error Types
//!
//! Every fallible operation in the library returns [`ArgoError`]. The variants
//! follow the lifecycle of a call:
//!
//! | Stage | Variants |
//! |-------|----------|
//! | Construction | `InvalidBaseUrl`, `InvalidOption`, `HttpClient` |
//! | Authentication | `EmptyToken`, `TokenAlreadySet` |
//! | Request building | `InvalidPath`, `Encode` |
//! | Transport | `Transport` (aggregated) |
//! | Decoding | `Api`, `Decode` |
//!
//! Transport faults are never reported one by one. A single call may surface
//! several of them, so they are folded into one `Transport` value by
//! [`aggregate_errors`], preserving their order and joining their messages
//! with line breaks. Individual causes are not inspectable after folding.

use serde::Deserialize;
use thiserror::Error;

/// Unified error type for all Argo CD client operations.
///
/// # Example
///
/// ```rust
/// use argocd_rs::ArgoError;
///
/// fn describe(err: &ArgoError) -> &'static str {
///     match err {
///         ArgoError::Api { status: 404, .. } => "not found",
///         ArgoError::Api { .. } => "rejected by server",
///         ArgoError::Transport(_) => "network problem",
///         _ => "client error",
///     }
/// }
///
/// let err = ArgoError::Api { status: 404, code: Some(5), message: "app not found".into() };
/// assert_eq!(describe(&err), "not found");
/// ```
#[derive(Error, Debug)]
pub enum ArgoError {
    /// The base URL could not be parsed or is not absolute.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The URL as supplied by the caller
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A client option rejected its input during construction.
    #[error("invalid client option: {0}")]
    InvalidOption(String),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    /// Authentication succeeded but the server handed back an empty token.
    #[error("client token is empty")]
    EmptyToken,

    /// A non-empty token is already stored and may not be replaced.
    #[error("client token is already set")]
    TokenAlreadySet,

    /// A request path was not relative to the API prefix.
    #[error("invalid request path '{0}': must not begin with '/'")]
    InvalidPath(String),

    /// A request body or query could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// One or more transport-level faults, joined by line breaks.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-200 status.
    ///
    /// `code` is the gRPC status code Argo CD embeds in its error bodies, when
    /// present.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// gRPC status code from the error body
        code: Option<i32>,
        /// Server-provided message, or the raw body
        message: String,
    },

    /// A 200 response body did not match the expected type.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ArgoError>;

/// Error payload returned by the Argo CD API gateway.
///
/// ```json
/// {"error": "application 'guestbook' not found", "code": 5, "message": "application 'guestbook' not found"}
/// ```
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<i32>,
    #[serde(default)]
    message: Option<String>,
}

/// Folds the transport errors collected during one call into a single error.
///
/// Returns `None` for an empty sequence. Otherwise every message is kept in
/// its original order, separated by `'\n'`.
///
/// # Example
///
/// ```rust
/// use argocd_rs::api::aggregate_errors;
///
/// let none: Vec<String> = Vec::new();
/// assert!(aggregate_errors(&none).is_none());
///
/// let err = aggregate_errors(&["dns lookup failed", "connection reset"]).unwrap();
/// assert_eq!(err.to_string(), "dns lookup failed\nconnection reset");
/// ```
pub fn aggregate_errors<E: std::fmt::Display>(errors: &[E]) -> Option<ArgoError> {
    if errors.is_empty() {
        return None;
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Some(ArgoError::Transport(joined))
}

/// Builds an [`ArgoError::Api`] from a non-200 response.
///
/// Prefers the `message` field of the error body, then `error`, and falls back
/// to the raw body text when the body is not an Argo CD error document.
pub fn api_error(status: u16, body: &str) -> ArgoError {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .or(parsed.error.filter(|e| !e.is_empty()))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP status {status}")
            } else {
                trimmed.to_string()
            }
        });
    ArgoError::Api {
        status,
        code: parsed.code,
        message,
    }
}
